//! Player commands as data.
//!
//! Frontends parse input into a [`Command`] and hand it to
//! [`Game::apply`]; replays store the same values.

use serde::{Deserialize, Serialize};

use crate::building::CreateStatus;
use crate::combat::Action;
use crate::error::Result;
use crate::field::Snapshot;
use crate::game::{Game, GameResponse, GameStatus};

/// One turn's worth of player input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Spawn a unit at one of the current team's bunkers.
    Create {
        /// Color name, e.g. `"red"`.
        color: String,
        /// Bunker name.
        building: String,
    },
    /// Move the unit standing at `(x, y)`.
    Move {
        /// Column, 1-based.
        x: i64,
        /// Row, 1-based.
        y: i64,
        /// Direction names, e.g. `"north"`.
        directions: Vec<String>,
    },
    /// Every unit of the current team attacks.
    Attack,
}

/// Response to an applied [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Response to [`Command::Create`].
    Created(GameResponse<CreateStatus>),
    /// Response to [`Command::Move`].
    Moved(GameResponse<Vec<Action>>),
    /// Response to [`Command::Attack`].
    Attacked(GameResponse<Snapshot>),
}

impl Outcome {
    /// Status of the underlying response.
    #[must_use]
    pub const fn status(&self) -> GameStatus {
        match self {
            Self::Created(r) => r.status,
            Self::Moved(r) => r.status,
            Self::Attacked(r) => r.status,
        }
    }
}

impl Game {
    /// Run a command for the current team.
    pub fn apply(&mut self, command: &Command) -> Result<Outcome> {
        match command {
            Command::Create { color, building } => {
                self.create_unit(color, building).map(Outcome::Created)
            }
            Command::Move { x, y, directions } => {
                self.move_unit_at(*x, *y, directions.as_slice()).map(Outcome::Moved)
            }
            Command::Attack => self.current_team_attacks().map(Outcome::Attacked),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
