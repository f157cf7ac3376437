use std::fmt::{self, Debug};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{render, Direction, Maze, Pos};
use crate::eval::{Evaluation, ScoreEvaluation};
use crate::game::GameState;

const FOOD_REWARD: i32 = 10;
const TIME_PENALTY: i32 = 1;
const WIN_REWARD: i32 = 500;
const LOSE_PENALTY: i32 = 500;

/// Pacman (agent 0) collects food while the ghosts (agents 1..) hunt it.
///
/// The game is won when all food is eaten and lost as soon as a ghost
/// shares a cell with pacman. Terminal states have no legal actions.
#[derive(Clone, PartialEq, Eq)]
pub struct Chase<'a> {
    maze: &'a Maze,
    pacman: Pos,
    ghosts: Vec<Pos>,
    food: Vec<Pos>,
    score: i32,
    caught: bool,
}

impl<'a> Chase<'a> {
    /// Initial state with the start positions of the maze.
    pub fn new(maze: &'a Maze) -> Chase<'a> {
        let mut state = Chase {
            maze,
            pacman: maze.start,
            ghosts: maze.ghosts.clone(),
            food: maze.food.clone(),
            score: 0,
            caught: false,
        };
        state.check_caught();
        state
    }

    pub fn maze(&self) -> &'a Maze {
        self.maze
    }

    pub fn pacman(&self) -> Pos {
        self.pacman
    }

    pub fn ghosts(&self) -> &[Pos] {
        &self.ghosts
    }

    pub fn food(&self) -> &[Pos] {
        &self.food
    }

    fn is_terminal(&self) -> bool {
        self.is_win() || self.is_lose()
    }

    fn check_caught(&mut self) {
        if !self.caught && !self.is_win() && self.ghosts.contains(&self.pacman) {
            self.caught = true;
            self.score -= LOSE_PENALTY;
        }
    }
}

impl<'a> GameState for Chase<'a> {
    type Action = Direction;

    fn legal_actions(&self, agent: usize) -> Vec<Direction> {
        if self.is_terminal() {
            return Vec::new();
        }
        if agent == 0 {
            let mut actions: Vec<_> = self.maze.neighbors(self.pacman).map(|(d, _)| d).collect();
            actions.push(Direction::Stop);
            actions
        } else if let Some(&ghost) = self.ghosts.get(agent - 1) {
            let actions: Vec<_> = self.maze.neighbors(ghost).map(|(d, _)| d).collect();
            if actions.is_empty() {
                vec![Direction::Stop]
            } else {
                actions
            }
        } else {
            Vec::new()
        }
    }

    fn successor(&self, agent: usize, action: &Direction) -> Self {
        let mut next = self.clone();
        if agent == 0 {
            next.pacman = self.pacman.apply(*action);
            next.score -= TIME_PENALTY;
            if let Some(i) = next.food.iter().position(|&f| f == next.pacman) {
                next.food.swap_remove(i);
                next.score += FOOD_REWARD;
                if next.food.is_empty() {
                    next.score += WIN_REWARD;
                }
            }
        } else if let Some(ghost) = next.ghosts.get_mut(agent - 1) {
            *ghost = ghost.apply(*action);
        }
        next.check_caught();
        next
    }

    fn num_agents(&self) -> usize {
        1 + self.ghosts.len()
    }

    fn is_win(&self) -> bool {
        self.food.is_empty()
    }

    fn is_lose(&self) -> bool {
        self.caught
    }

    fn score(&self) -> f64 {
        self.score as f64
    }
}

impl<'a> Debug for Chase<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Chase {{ score: {}, food: {} }}", self.score, self.food.len())?;
        render(f, self.maze, self.pacman, &self.ghosts, &self.food)
    }
}

/// Evaluation for the chase: the score, a pull towards the nearest food and
/// a penalty for ghosts within two steps.
///
/// Terminal states are valued by their score alone.
pub fn chase_evaluation(state: &Chase<'_>) -> f64 {
    let score = state.score();
    if state.is_win() || state.is_lose() {
        return score;
    }

    let pacman = state.pacman();
    // outweighs the time penalty of a step towards food
    let food = state
        .food()
        .iter()
        .map(|&f| pacman.manhattan(f))
        .min()
        .map_or(0.0, |d| 2.0 * d as f64)
        + 20.0 * state.food().len() as f64;

    let danger: f64 = state
        .ghosts()
        .iter()
        .map(|&g| pacman.manhattan(g))
        .filter(|&d| d <= 2)
        .map(|d| 100.0 / (1 + d) as f64)
        .sum();

    score - food - danger
}

/// Evaluation used by the chase agents, the game score unless configured otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChaseEval {
    #[default]
    Score,
    Chase,
}

impl<'a> Evaluation<Chase<'a>> for ChaseEval {
    fn eval(&self, state: &Chase<'a>) -> f64 {
        match self {
            ChaseEval::Score => ScoreEvaluation.eval(state),
            ChaseEval::Chase => chase_evaluation(state),
        }
    }
}

impl FromStr for ChaseEval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "score" => Ok(ChaseEval::Score),
            "chase" => Ok(ChaseEval::Chase),
            _ => Err(format!("unknown evaluation '{s}', expected score or chase")),
        }
    }
}

impl fmt::Display for ChaseEval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChaseEval::Score => "score",
            ChaseEval::Chase => "chase",
        })
    }
}
