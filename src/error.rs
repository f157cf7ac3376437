use std::path::PathBuf;

use thiserror::Error;

use crate::maze::LayoutError;

/// Errors surfaced by the game-tree engine, the agents and the maze loaders.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The game state has no moves for an agent although it is neither won nor lost.
    /// Terminal coverage is the responsibility of the [`GameState`](crate::game::GameState).
    #[error("agent {agent} has no legal actions in a non-terminal state (round {round})")]
    NoLegalActions { agent: usize, round: usize },

    #[error("game state has no agents")]
    NoAgents,

    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid agent configuration: {0}")]
    Config(#[from] serde_json::Error),
}
