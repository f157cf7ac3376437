//! # Graph Search
//!
//! Uninformed and informed search over any [`SearchProblem`].
//! All variants share one graph search loop and only differ in their frontier.

mod frontier;
pub use frontier::*;
mod graph;
pub use graph::*;

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A transition from a state: the reached state, the action taken and its non-negative cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Successor<S, A> {
    pub state: S,
    pub action: A,
    pub cost: f64,
}

impl<S, A> Successor<S, A> {
    pub fn new(state: S, action: A, cost: f64) -> Self {
        Self {
            state,
            action,
            cost,
        }
    }
}

/// A searchable domain.
pub trait SearchProblem {
    type State: Clone + Eq + Hash;
    type Action: Clone;

    fn start_state(&self) -> Self::State;

    fn is_goal(&self, state: &Self::State) -> bool;

    /// Successors in a deterministic order.
    fn successors(&self, state: &Self::State) -> Vec<Successor<Self::State, Self::Action>>;

    /// Total cost of replaying `actions` from the start state.
    fn cost_of_actions(&self, actions: &[Self::Action]) -> f64;
}

/// Estimated remaining cost from a state to the nearest goal.
///
/// A* only returns optimal paths if the estimate never exceeds the true cost.
/// This is not checked.
pub trait Heuristic<P: SearchProblem + ?Sized> {
    fn estimate(&self, state: &P::State, problem: &P) -> f64;
}

impl<P, F> Heuristic<P> for F
where
    P: SearchProblem + ?Sized,
    F: Fn(&P::State, &P) -> f64,
{
    fn estimate(&self, state: &P::State, problem: &P) -> f64 {
        self(state, problem)
    }
}

/// The trivial heuristic, reduces A* to uniform cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHeuristic;

impl<P: SearchProblem + ?Sized> Heuristic<P> for NullHeuristic {
    fn estimate(&self, _: &P::State, _: &P) -> f64 {
        0.0
    }
}

/// Names one of the search variants, e.g. for command line selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchAlgorithm {
    Dfs,
    Bfs,
    Ucs,
    AStar,
}

impl SearchAlgorithm {
    pub fn iter() -> impl Iterator<Item = SearchAlgorithm> {
        [
            SearchAlgorithm::Dfs,
            SearchAlgorithm::Bfs,
            SearchAlgorithm::Ucs,
            SearchAlgorithm::AStar,
        ]
        .into_iter()
    }

    /// Runs the search. The heuristic is only consulted by A*.
    pub fn run<P, H>(self, problem: &P, heuristic: &H) -> Vec<P::Action>
    where
        P: SearchProblem + ?Sized,
        H: Heuristic<P> + ?Sized,
    {
        match self {
            SearchAlgorithm::Dfs => depth_first_search(problem),
            SearchAlgorithm::Bfs => breadth_first_search(problem),
            SearchAlgorithm::Ucs => uniform_cost_search(problem),
            SearchAlgorithm::AStar => a_star_search(problem, heuristic),
        }
    }
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchAlgorithm::Dfs => "dfs",
            SearchAlgorithm::Bfs => "bfs",
            SearchAlgorithm::Ucs => "ucs",
            SearchAlgorithm::AStar => "astar",
        })
    }
}

impl FromStr for SearchAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dfs" | "depthfirstsearch" => Ok(SearchAlgorithm::Dfs),
            "bfs" | "breadthfirstsearch" => Ok(SearchAlgorithm::Bfs),
            "ucs" | "uniformcostsearch" => Ok(SearchAlgorithm::Ucs),
            "astar" | "a*" | "astarsearch" => Ok(SearchAlgorithm::AStar),
            _ => Err(format!("unknown search algorithm '{s}'")),
        }
    }
}
