//! Declarative match setup.
//!
//! A [`MatchSetup`] lists the field size, bunkers and teams of a match. It is
//! plain serde data so frontends can load it from files and replays can embed
//! it. [`MatchSetup::build`] replays it through the [`Game`] setup operations.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::game::Game;

/// A bunker to place during setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BunkerSetup {
    /// Column, 1-based.
    pub x: i64,
    /// Row, 1-based.
    pub y: i64,
    /// Starting coins.
    pub treasury: i64,
    /// Unique name.
    pub name: String,
}

/// A team and the bunker it starts with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSetup {
    /// Unique name.
    pub name: String,
    /// Name of an unclaimed bunker.
    pub bunker: String,
}

/// Everything needed to start a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSetup {
    /// Field width.
    pub width: i64,
    /// Field height.
    pub height: i64,
    /// Bunkers, placed in order.
    #[serde(default)]
    pub bunkers: Vec<BunkerSetup>,
    /// Teams in turn order.
    #[serde(default)]
    pub teams: Vec<TeamSetup>,
}

impl MatchSetup {
    /// Empty setup for a field of the given size.
    #[must_use]
    pub const fn new(width: i64, height: i64) -> Self {
        Self {
            width,
            height,
            bunkers: Vec::new(),
            teams: Vec::new(),
        }
    }

    /// Add a bunker.
    #[must_use]
    pub fn bunker(mut self, x: i64, y: i64, treasury: i64, name: impl Into<String>) -> Self {
        self.bunkers.push(BunkerSetup {
            x,
            y,
            treasury,
            name: name.into(),
        });
        self
    }

    /// Add a team anchored to `bunker`.
    #[must_use]
    pub fn team(mut self, name: impl Into<String>, bunker: impl Into<String>) -> Self {
        self.teams.push(TeamSetup {
            name: name.into(),
            bunker: bunker.into(),
        });
        self
    }

    /// Configure a game from this setup and start it.
    ///
    /// Individual bunkers and teams that are rejected are logged and skipped,
    /// the way an operator typing them in would see them refused one by one.
    /// Fails if the field size is invalid or fewer than two teams made it in.
    pub fn build(&self) -> Result<Game> {
        let mut game = Game::new();
        game.configure_field(self.width, self.height)?;

        for bunker in &self.bunkers {
            if let Err(error) = game.add_building(bunker.x, bunker.y, bunker.treasury, &bunker.name) {
                tracing::warn!(%error, "Skipping bunker");
            }
        }
        for team in &self.teams {
            if let Err(error) = game.add_team(&team.name, &team.bunker) {
                tracing::warn!(%error, "Skipping team");
            }
        }

        game.start()?;
        Ok(game)
    }
}

// ============================================================================
// Tests
// ============================================================================
