//! Error type for the headless interpreter.

use paintball_core::error::GameError;
use thiserror::Error;

use crate::scenario::ScenarioError;

/// Failures that end a session.
#[derive(Error, Debug)]
pub enum HeadlessError {
    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A scenario could not be loaded.
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    /// The engine refused a scenario's setup.
    #[error("Game setup failed: {0}")]
    Game(#[from] GameError),
}
