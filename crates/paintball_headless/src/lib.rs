//! Command interpreter for playing paintball in a terminal.
//!
//! This crate drives a [`paintball_core`] match from line-oriented input:
//!
//! - **stdin**: commands (`game`, `create`, `move`, `attack`, `map`, ...)
//! - **stdout**: prompts and responses, in fixed wording
//! - **stderr**: logs (human-readable)
//!
//! See the [`protocol`] module for the command syntax and messages.
//!
//! # Example
//!
//! ```bash
//! # Play interactively
//! cargo run -p paintball_headless
//!
//! # Start with a prepared match
//! cargo run -p paintball_headless -- play --scenario crates/paintball_headless/scenarios/corners.ron
//!
//! # Check a scenario file without playing
//! cargo run -p paintball_headless -- check crates/paintball_headless/scenarios/corners.ron
//! ```

pub mod error;
pub mod interpreter;
pub mod protocol;
pub mod render;
pub mod scenario;

pub use error::HeadlessError;
pub use interpreter::Session;
pub use render::render_map;
pub use scenario::{Scenario, ScenarioError};
