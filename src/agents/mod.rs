use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use log::info;
use serde::{Deserialize, Serialize};

mod reflex;
pub use reflex::*;

use crate::eval::{Evaluation, Lookahead};
use crate::game::{self, GameState};
use crate::Error;

const DEFAULT_DEPTH: usize = 2;

fn default_depth() -> usize {
    DEFAULT_DEPTH
}

/// Agent configuration, parsed from json on the command line.
///
/// ```json
/// {"AlphaBeta":{"depth":3}}
/// {"Reflex":{"tie_break":{"Seeded":7}}}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Agent {
    Reflex(ReflexAgent),
    Minimax {
        #[serde(default = "default_depth")]
        depth: usize,
    },
    AlphaBeta {
        #[serde(default = "default_depth")]
        depth: usize,
    },
    Expectimax {
        #[serde(default = "default_depth")]
        depth: usize,
    },
}

impl Default for Agent {
    fn default() -> Self {
        Self::Minimax {
            depth: DEFAULT_DEPTH,
        }
    }
}

impl Agent {
    /// Chooses the next action of agent 0.
    ///
    /// The tree searches use `eval` at their leafs, the reflex agent looks one ply ahead with it.
    pub fn action<G, E>(&mut self, state: &G, eval: &E) -> Result<Option<G::Action>, Error>
    where
        G: GameState,
        E: Evaluation<G> + ?Sized,
    {
        let start = Instant::now();
        let decision = match self {
            Agent::Reflex(agent) => agent.decide(state, &Lookahead(eval)),
            Agent::Minimax { depth } => game::minimax(state, *depth, eval)?,
            Agent::AlphaBeta { depth } => game::alphabeta(state, *depth, eval)?,
            Agent::Expectimax { depth } => game::expectimax(state, *depth, eval)?,
        };
        info!(
            ">>> {} {:?}ms nodes={} value={} {:?}",
            self,
            start.elapsed().as_millis(),
            decision.nodes,
            decision.value,
            decision.action
        );
        Ok(decision.action)
    }
}

impl FromStr for Agent {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", serde_json::to_string(self).unwrap_or_default())
    }
}
