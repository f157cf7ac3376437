use std::collections::HashSet;

use log::debug;

use super::{Frontier, Heuristic, PriorityQueue, Queue, SearchProblem, Stack, Successor};

/// Frontier entry: a state, the actions leading to it and their accumulated cost.
struct Node<S, A> {
    state: S,
    path: Vec<A>,
    cost: f64,
}

/// Graph search skeleton shared by all variants.
///
/// Every state is expanded at most once. Re-discovered states are pushed again and
/// discarded when popped after their first expansion. The goal test happens on
/// removal, so the frontier order alone decides which goal is found first.
fn graph_search<P, F, K>(name: &str, problem: &P, mut frontier: F, priority: K) -> Vec<P::Action>
where
    P: SearchProblem + ?Sized,
    F: Frontier<Node<P::State, P::Action>>,
    K: Fn(&P::State, f64) -> f64,
{
    let start = problem.start_state();
    let start_priority = priority(&start, 0.0);
    frontier.insert(
        Node {
            state: start,
            path: Vec::new(),
            cost: 0.0,
        },
        start_priority,
    );

    let mut visited = HashSet::new();

    while let Some(Node { state, path, cost }) = frontier.remove() {
        if !visited.insert(state.clone()) {
            continue;
        }

        if problem.is_goal(&state) {
            debug!(
                "{name}: goal after {} expansions, {} actions, cost {cost}",
                visited.len(),
                path.len()
            );
            return path;
        }

        for Successor {
            state: next,
            action,
            cost: step,
        } in problem.successors(&state)
        {
            if visited.contains(&next) {
                continue;
            }
            let mut next_path = Vec::with_capacity(path.len() + 1);
            next_path.extend(path.iter().cloned());
            next_path.push(action);

            let next_cost = cost + step;
            let next_priority = priority(&next, next_cost);
            frontier.insert(
                Node {
                    state: next,
                    path: next_path,
                    cost: next_cost,
                },
                next_priority,
            );
        }
    }

    debug!("{name}: no goal after {} expansions", visited.len());
    Vec::new()
}

/// Search the deepest nodes first.
///
/// Returns the first path found, which is not necessarily the shortest.
pub fn depth_first_search<P: SearchProblem + ?Sized>(problem: &P) -> Vec<P::Action> {
    graph_search("dfs", problem, Stack::new(), |_, _| 0.0)
}

/// Search the shallowest nodes first. Returns a path with the fewest actions.
pub fn breadth_first_search<P: SearchProblem + ?Sized>(problem: &P) -> Vec<P::Action> {
    graph_search("bfs", problem, Queue::new(), |_, _| 0.0)
}

/// Search the node of least total cost first.
pub fn uniform_cost_search<P: SearchProblem + ?Sized>(problem: &P) -> Vec<P::Action> {
    graph_search("ucs", problem, PriorityQueue::new(), |_, cost| cost)
}

/// Search the node with the lowest cost plus heuristic estimate first.
pub fn a_star_search<P, H>(problem: &P, heuristic: &H) -> Vec<P::Action>
where
    P: SearchProblem + ?Sized,
    H: Heuristic<P> + ?Sized,
{
    graph_search("astar", problem, PriorityQueue::new(), |state, cost| {
        cost + heuristic.estimate(state, problem)
    })
}
