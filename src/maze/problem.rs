use std::cell::Cell;

use super::{Direction, LayoutError, Maze, Pos};
use crate::search::{SearchProblem, Successor};

/// Find a path from the start to a single goal cell.
///
/// Steps cost 1 unless a cost function is given. The number of expanded
/// states is recorded for inspection.
pub struct PositionProblem<'a> {
    maze: &'a Maze,
    start: Pos,
    goal: Pos,
    cost: Box<dyn Fn(Pos) -> f64 + 'a>,
    expanded: Cell<usize>,
}

impl<'a> PositionProblem<'a> {
    pub fn new(maze: &'a Maze, goal: Pos) -> PositionProblem<'a> {
        PositionProblem {
            maze,
            start: maze.start,
            goal,
            cost: Box::new(|_| 1.0),
            expanded: Cell::new(0),
        }
    }

    pub fn with_start(mut self, start: Pos) -> Self {
        self.start = start;
        self
    }

    /// Cost of entering a cell, has to be non-negative.
    pub fn with_cost(mut self, cost: impl Fn(Pos) -> f64 + 'a) -> Self {
        self.cost = Box::new(cost);
        self
    }

    pub fn goal(&self) -> Pos {
        self.goal
    }

    /// Number of states whose successors were requested.
    pub fn expanded(&self) -> usize {
        self.expanded.get()
    }
}

impl<'a> SearchProblem for PositionProblem<'a> {
    type State = Pos;
    type Action = Direction;

    fn start_state(&self) -> Pos {
        self.start
    }

    fn is_goal(&self, state: &Pos) -> bool {
        *state == self.goal
    }

    fn successors(&self, state: &Pos) -> Vec<Successor<Pos, Direction>> {
        self.expanded.set(self.expanded.get() + 1);
        self.maze
            .neighbors(*state)
            .map(|(d, p)| Successor::new(p, d, (self.cost)(p)))
            .collect()
    }

    /// Illegal sequences cost infinity.
    fn cost_of_actions(&self, actions: &[Direction]) -> f64 {
        let mut p = self.start;
        let mut total = 0.0;
        for &d in actions {
            p = p.apply(d);
            if !self.maze.is_free(p) {
                return f64::INFINITY;
            }
            total += (self.cost)(p);
        }
        total
    }
}

/// Manhattan distance to the goal, admissible for unit costs.
pub fn manhattan_heuristic(pos: &Pos, problem: &PositionProblem<'_>) -> f64 {
    pos.manhattan(problem.goal()) as f64
}

/// Eat all food of the maze.
///
/// The state is the position and a bitmask of the remaining food, so at most
/// 64 food cells are supported.
pub struct FoodProblem<'a> {
    maze: &'a Maze,
    food: Vec<Pos>,
}

impl<'a> FoodProblem<'a> {
    pub fn new(maze: &'a Maze) -> Result<FoodProblem<'a>, LayoutError> {
        if maze.food.len() > 64 {
            return Err(LayoutError::TooMuchFood(maze.food.len()));
        }
        Ok(FoodProblem {
            maze,
            food: maze.food.clone(),
        })
    }

    /// Positions of the food left in the mask.
    pub fn remaining(&self, mask: u64) -> impl Iterator<Item = Pos> + '_ {
        self.food
            .iter()
            .enumerate()
            .filter(move |(i, _)| mask & (1 << i) != 0)
            .map(|(_, &p)| p)
    }

    fn eat(&self, p: Pos, mask: u64) -> u64 {
        match self.food.iter().position(|&f| f == p) {
            Some(i) => mask & !(1 << i),
            None => mask,
        }
    }
}

impl<'a> SearchProblem for FoodProblem<'a> {
    type State = (Pos, u64);
    type Action = Direction;

    fn start_state(&self) -> (Pos, u64) {
        let all = if self.food.len() == 64 {
            u64::MAX
        } else {
            (1 << self.food.len()) - 1
        };
        (self.maze.start, self.eat(self.maze.start, all))
    }

    fn is_goal(&self, state: &(Pos, u64)) -> bool {
        state.1 == 0
    }

    fn successors(&self, &(pos, mask): &(Pos, u64)) -> Vec<Successor<(Pos, u64), Direction>> {
        self.maze
            .neighbors(pos)
            .map(|(d, p)| Successor::new((p, self.eat(p, mask)), d, 1.0))
            .collect()
    }

    fn cost_of_actions(&self, actions: &[Direction]) -> f64 {
        let mut p = self.maze.start;
        for &d in actions {
            p = p.apply(d);
            if !self.maze.is_free(p) {
                return f64::INFINITY;
            }
        }
        actions.len() as f64
    }
}

/// Distance to the farthest remaining food, admissible and consistent.
pub fn food_heuristic(state: &(Pos, u64), problem: &FoodProblem<'_>) -> f64 {
    problem
        .remaining(state.1)
        .map(|f| state.0.manhattan(f))
        .max()
        .unwrap_or(0) as f64
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::search::{
        a_star_search, breadth_first_search, depth_first_search, uniform_cost_search,
        NullHeuristic, SearchAlgorithm,
    };

    const TINY: &str = r#"
        %%%%%%%
        %    P%
        % %%% %
        %  %  %
        %%   %%
        %. %%%%
        %%%%%%%"#;

    const OPEN: &str = r#"
        %%%%%%%%%%
        %        %
        %  %%%%  %
        %  %P.%  %
        %  %  %  %
        %        %
        %.      .%
        %%%%%%%%%%"#;

    fn replay(maze: &Maze, start: Pos, path: &[Direction]) -> Pos {
        path.iter().fold(start, |p, &d| {
            let next = p.apply(d);
            assert!(maze.is_free(next));
            next
        })
    }

    #[test]
    fn tiny_maze() {
        let maze = Maze::parse(TINY).unwrap();
        let goal = maze.food[0];
        let problem = PositionProblem::new(&maze, goal);

        for algorithm in SearchAlgorithm::iter() {
            let path = algorithm.run(&problem, &manhattan_heuristic);
            assert_eq!(replay(&maze, maze.start, &path), goal, "{algorithm}");
        }

        // The only shortest path
        use Direction::*;
        let path = breadth_first_search(&problem);
        assert_eq!(path, vec![South, South, West, South, West, West, South, West]);
        assert_eq!(problem.cost_of_actions(&path), 8.0);
        assert_eq!(problem.cost_of_actions(&[North]), f64::INFINITY);
    }

    #[test]
    fn expansions() {
        let maze = Maze::parse(OPEN).unwrap();
        let goal = Pos::new(1, 1);

        let ucs = PositionProblem::new(&maze, goal);
        let path = uniform_cost_search(&ucs);
        assert_eq!(replay(&maze, maze.start, &path), goal);

        let astar = PositionProblem::new(&maze, goal);
        let guided = a_star_search(&astar, &manhattan_heuristic);
        assert_eq!(path.len(), guided.len());
        assert!(astar.expanded() <= ucs.expanded());

        let dfs = PositionProblem::new(&maze, goal);
        let path = depth_first_search(&dfs);
        assert_eq!(replay(&maze, maze.start, &path), goal);
        assert!(path.len() >= guided.len());

        // no cell is expanded twice, even when the goal is walled off
        let free = (0..maze.width as i16)
            .flat_map(|x| (0..maze.height as i16).map(move |y| Pos::new(x, y)))
            .filter(|&p| maze.is_free(p))
            .count();
        for goal in [Pos::new(1, 1), Pos::new(0, 0)] {
            for algorithm in SearchAlgorithm::iter() {
                let problem = PositionProblem::new(&maze, goal);
                algorithm.run(&problem, &manhattan_heuristic);
                assert!(problem.expanded() <= free, "{algorithm}");
                if goal == Pos::new(0, 0) {
                    assert_eq!(problem.expanded(), free, "{algorithm}");
                }
            }
        }
    }

    #[test]
    fn cell_costs() {
        // Prefer the west half, entering the east half is expensive
        let maze = Maze::parse(OPEN).unwrap();
        let goal = Pos::new(8, 1);
        let problem =
            PositionProblem::new(&maze, goal).with_cost(|p| if p.x >= 5 { 10.0 } else { 1.0 });

        let cheap = uniform_cost_search(&problem);
        let short = breadth_first_search(&problem);
        assert_eq!(replay(&maze, maze.start, &cheap), goal);
        assert!(problem.cost_of_actions(&cheap) <= problem.cost_of_actions(&short));
        assert_eq!(
            problem.cost_of_actions(&cheap),
            problem.cost_of_actions(&a_star_search(&problem, &NullHeuristic))
        );
    }

    #[test]
    fn unreachable_goal() {
        let maze = Maze::parse("%%%%%\n%P%.%\n%%%%%").unwrap();
        let problem = PositionProblem::new(&maze, maze.food[0]);
        for algorithm in SearchAlgorithm::iter() {
            assert!(algorithm.run(&problem, &manhattan_heuristic).is_empty());
        }

        let start = PositionProblem::new(&maze, maze.start);
        assert!(breadth_first_search(&start).is_empty());
        assert_eq!(start.with_start(Pos::new(1, 1)).start_state(), Pos::new(1, 1));
    }

    #[test]
    fn eat_all_food() {
        let maze = Maze::parse(OPEN).unwrap();
        let problem = FoodProblem::new(&maze).unwrap();

        let path = breadth_first_search(&problem);
        let guided = a_star_search(&problem, &food_heuristic);
        assert_eq!(path.len(), guided.len());

        // every food cell is on the path
        let mut p = maze.start;
        let mut eaten = vec![p];
        for &d in &guided {
            p = p.apply(d);
            eaten.push(p);
        }
        assert!(maze.food.iter().all(|f| eaten.contains(f)));
        assert_eq!(problem.cost_of_actions(&guided), guided.len() as f64);
    }
}
