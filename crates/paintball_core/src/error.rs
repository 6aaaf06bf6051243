//! Error types for the paintball engine.
//!
//! Only configuration rejections and lifecycle misuse are errors. Command
//! precondition failures and combat outcomes are ordinary statuses carried in
//! a [`GameResponse`](crate::game::GameResponse).

use thiserror::Error;

use crate::game::Phase;

/// Result type alias using [`GameError`].
pub type Result<T> = std::result::Result<T, GameError>;

/// Why a building could not be added during setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildingRejection {
    /// Coordinates fall outside the field.
    OutOfBounds,
    /// Starting treasury must be strictly positive.
    EmptyTreasury,
    /// The target cell already holds a building.
    CellTaken,
    /// Another building already uses this name.
    DuplicateName,
}

impl std::fmt::Display for BuildingRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Self::OutOfBounds => "position is off the field",
            Self::EmptyTreasury => "treasury must be positive",
            Self::CellTaken => "cell already holds a building",
            Self::DuplicateName => "name already in use",
        };
        f.write_str(reason)
    }
}

/// Why a team could not be added during setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamRejection {
    /// Another team already uses this name.
    DuplicateName,
    /// No unclaimed building carries the requested name.
    NoFreeBuilding,
}

impl std::fmt::Display for TeamRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Self::DuplicateName => "name already in use",
            Self::NoFreeBuilding => "no unclaimed building with that name",
        };
        f.write_str(reason)
    }
}

/// Top-level error type for the engine.
#[derive(Debug, Error)]
pub enum GameError {
    /// Field dimensions below the minimum.
    #[error("Invalid field size {width}x{height}: both dimensions must be at least {min}")]
    InvalidSize {
        /// Requested width.
        width: i64,
        /// Requested height.
        height: i64,
        /// Minimum accepted dimension.
        min: u32,
    },

    /// Field cells could not be allocated.
    #[error("Field of {width}x{height} cells is too large to allocate")]
    FieldTooLarge {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Setup tried to place buildings before the field exists.
    #[error("Field has not been configured")]
    FieldNotConfigured,

    /// A building was rejected during setup.
    #[error("Building '{name}' rejected: {reason}")]
    BuildingRejected {
        /// Name of the rejected building.
        name: String,
        /// Rejection cause.
        reason: BuildingRejection,
    },

    /// A team was rejected during setup.
    #[error("Team '{name}' rejected: {reason}")]
    TeamRejected {
        /// Name of the rejected team.
        name: String,
        /// Rejection cause.
        reason: TeamRejection,
    },

    /// Fewer than two teams at start.
    #[error("Not enough teams to start: have {count}, need at least 2")]
    NotEnoughTeams {
        /// Number of registered teams.
        count: usize,
    },

    /// Operation issued in the wrong lifecycle phase.
    #[error("Operation requires phase {expected:?}, match is {actual:?}")]
    WrongPhase {
        /// Phase the operation needs.
        expected: Phase,
        /// Phase the match is in.
        actual: Phase,
    },

    /// Replay encoding or decoding failed.
    #[error("Replay error: {0}")]
    Replay(String),
}
