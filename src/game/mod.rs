//! # Adversarial Tree Search
//!
//! Depth limited game tree search for one maximizing agent (id 0) against
//! any number of adversaries that move in turn.
//!
//! - [`minimax`]: adversaries minimize
//! - [`alphabeta`]: same values as minimax, but skips subtrees that cannot change the result
//! - [`expectimax`]: adversaries choose uniformly at random
//!
//! The depth limit counts rounds, a round is complete when every agent has moved once.

mod alphabeta;
pub use alphabeta::*;
mod expectimax;
pub use expectimax::*;
mod minimax;
pub use minimax::*;

use std::fmt::Debug;

use crate::eval::Evaluation;
use crate::Error;

/// A turn based game with alternating agents.
///
/// Successor generation never mutates a state, it returns a new one.
/// Every state without legal actions for the agent to move has to be won or lost.
pub trait GameState: Sized {
    type Action: Clone + Debug;

    fn legal_actions(&self, agent: usize) -> Vec<Self::Action>;

    fn successor(&self, agent: usize, action: &Self::Action) -> Self;

    /// Number of agents, at least one. Agent 0 is the maximizing agent.
    fn num_agents(&self) -> usize;

    fn is_win(&self) -> bool;

    fn is_lose(&self) -> bool;

    /// The running score of the game.
    fn score(&self) -> f64;
}

/// Result of a tree search.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision<A> {
    /// Best action for agent 0, `None` if the root is terminal or has no legal actions.
    pub action: Option<A>,
    /// Backed up value of the root.
    pub value: f64,
    /// Number of visited states, including the root.
    pub nodes: usize,
}

/// Advances the turn: after the last agent, agent 0 moves again in the next round.
pub fn next_ply(agent: usize, round: usize, num_agents: usize) -> (usize, usize) {
    if agent + 1 >= num_agents {
        (0, round + 1)
    } else {
        (agent + 1, round)
    }
}

/// Configuration and statistics threaded through the recursion.
pub(crate) struct Context<'a, E: ?Sized> {
    max_depth: usize,
    eval: &'a E,
    nodes: usize,
}

impl<'a, E: ?Sized> Context<'a, E> {
    pub fn new<G: GameState>(state: &G, max_depth: usize, eval: &'a E) -> Result<Self, Error> {
        if state.num_agents() == 0 {
            return Err(Error::NoAgents);
        }
        Ok(Self {
            max_depth,
            eval,
            nodes: 0,
        })
    }

    /// Counts the visit and returns the static value if the state is a leaf.
    pub fn leaf<G>(&mut self, state: &G, round: usize) -> Option<f64>
    where
        G: GameState,
        E: Evaluation<G>,
    {
        self.nodes += 1;
        if state.is_win() || state.is_lose() || round >= self.max_depth {
            Some(self.eval.eval(state))
        } else {
            None
        }
    }

    pub fn evaluate<G>(&self, state: &G) -> f64
    where
        G: GameState,
        E: Evaluation<G>,
    {
        self.eval.eval(state)
    }

    /// Legal actions of a non-terminal state.
    ///
    /// Only the root may have none, it is the only node where agent 0 moves in round 0.
    pub fn actions<G: GameState>(
        &self,
        state: &G,
        agent: usize,
        round: usize,
    ) -> Result<Vec<G::Action>, Error> {
        let actions = state.legal_actions(agent);
        if actions.is_empty() && (agent, round) != (0, 0) {
            return Err(Error::NoLegalActions { agent, round });
        }
        Ok(actions)
    }

    pub fn finish<A>(self, value: f64, action: Option<A>) -> Decision<A> {
        Decision {
            action,
            value,
            nodes: self.nodes,
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::rc::Rc;

    use rand::rngs::SmallRng;
    use rand::Rng;

    use super::GameState;

    /// Explicit game tree. Leaves are terminal: won if their value is positive, lost otherwise.
    #[derive(Debug)]
    pub enum Tree {
        Leaf(f64),
        Node(Vec<Rc<Tree>>),
    }

    pub fn leaf(value: f64) -> Rc<Tree> {
        Rc::new(Tree::Leaf(value))
    }

    pub fn node(children: Vec<Rc<Tree>>) -> Rc<Tree> {
        Rc::new(Tree::Node(children))
    }

    /// Complete tree of the given height with random branching and integer leaves.
    pub fn random_tree(rng: &mut SmallRng, height: usize) -> Rc<Tree> {
        if height == 0 {
            leaf(rng.gen_range(-9..=9) as f64)
        } else {
            let branching = rng.gen_range(1..=3);
            node((0..branching).map(|_| random_tree(rng, height - 1)).collect())
        }
    }

    /// Tree position. The action is the child index, inner nodes score 0.
    #[derive(Debug, Clone)]
    pub struct TreeGame {
        pub tree: Rc<Tree>,
        pub agents: usize,
    }

    impl TreeGame {
        pub fn new(tree: Rc<Tree>, agents: usize) -> TreeGame {
            TreeGame { tree, agents }
        }

        /// Number of positions in the whole tree.
        pub fn size(&self) -> usize {
            fn rec(tree: &Tree) -> usize {
                match tree {
                    Tree::Leaf(_) => 1,
                    Tree::Node(children) => 1 + children.iter().map(|c| rec(c)).sum::<usize>(),
                }
            }
            rec(&self.tree)
        }
    }

    impl GameState for TreeGame {
        type Action = usize;

        fn legal_actions(&self, _: usize) -> Vec<usize> {
            match &*self.tree {
                Tree::Leaf(_) => Vec::new(),
                Tree::Node(children) => (0..children.len()).collect(),
            }
        }

        fn successor(&self, _: usize, action: &usize) -> TreeGame {
            match &*self.tree {
                Tree::Node(children) => TreeGame::new(children[*action].clone(), self.agents),
                Tree::Leaf(_) => panic!("successor of a leaf"),
            }
        }

        fn num_agents(&self) -> usize {
            self.agents
        }

        fn is_win(&self) -> bool {
            matches!(*self.tree, Tree::Leaf(v) if v > 0.0)
        }

        fn is_lose(&self) -> bool {
            matches!(*self.tree, Tree::Leaf(v) if v <= 0.0)
        }

        fn score(&self) -> f64 {
            match *self.tree {
                Tree::Leaf(v) => v,
                Tree::Node(_) => 0.0,
            }
        }
    }
}
