//! # Paintball Core
//!
//! Deterministic engine for a turn-based paintball game.
//!
//! Teams take turns on a rectangular field. Each turn a team spawns a unit at
//! one of its bunkers, moves a unit, or has all its units sweep their attack
//! patterns. Colors beat each other in a cycle and bunkers change hands when
//! an enemy unit reaches them. A team with no bunkers and no units is out.
//!
//! This crate contains **only** game logic:
//! - No rendering
//! - No IO
//! - No randomness
//!
//! Frontends such as the headless command interpreter drive it through
//! [`Game`](game::Game) and read [`Snapshot`](field::Snapshot)s back.
//!
//! ## Crate Structure
//!
//! - [`game`] - Turn engine, setup validation and command responses
//! - [`world`] - Arena owning the field, bunkers, units and teams
//! - [`unit`] - Movement, engagement and area attacks
//! - [`pattern`] - Per-color attack sweep orders
//! - [`combat`] - Colors and per-step outcomes
//! - [`field`] - Grid cells and visibility snapshots
//! - [`replay`] - Deterministic command recording

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod building;
pub mod combat;
pub mod command;
pub mod entity;
pub mod error;
pub mod field;
pub mod game;
pub mod geometry;
pub mod pattern;
pub mod replay;
pub mod roster;
pub mod setup;
pub mod team;
pub mod unit;
pub mod world;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::building::{Building, CreateStatus};
    pub use crate::combat::{Action, ActionStatus, UnitColor};
    pub use crate::command::{Command, Outcome};
    pub use crate::entity::{BuildingId, Entity, TeamId, UnitId};
    pub use crate::error::{GameError, Result};
    pub use crate::field::{CellState, Snapshot};
    pub use crate::game::{Game, GameResponse, GameStatus, Phase};
    pub use crate::geometry::{Direction, Position};
    pub use crate::replay::{Recorder, Replay};
    pub use crate::roster::SizedIter;
    pub use crate::setup::MatchSetup;
    pub use crate::team::Team;
    pub use crate::unit::Unit;
}
