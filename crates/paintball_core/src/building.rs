//! Bunkers: stationary, capturable buildings with a treasury.
//!
//! A bunker earns one coin per turn and spends coins to spawn units on its
//! own cell. Bunkers are never destroyed, only handed from team to team.

use serde::{Deserialize, Serialize};

use crate::combat::UnitColor;
use crate::entity::{BuildingId, Entity, TeamId, UnitId};
use crate::geometry::Position;

/// Income credited to every bunker at the end of each turn.
pub const INCOME_PER_TURN: u32 = 1;

/// Outcome of asking a bunker to spawn a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreateStatus {
    /// The unit was created.
    Created(UnitId),
    /// A unit already stands on the bunker.
    Occupied,
    /// Treasury is below the color's cost.
    InsufficientFunds,
    /// The bunker has no team to enlist the unit in.
    Unowned,
}

/// A bunker on the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    id: BuildingId,
    name: String,
    treasury: u32,
    position: Position,
    owner: Option<TeamId>,
}

impl Building {
    /// Create an unowned bunker.
    #[must_use]
    pub fn new(id: BuildingId, name: impl Into<String>, treasury: u32, position: Position) -> Self {
        Self {
            id,
            name: name.into(),
            treasury,
            position,
            owner: None,
        }
    }

    /// Arena id.
    #[must_use]
    pub const fn id(&self) -> BuildingId {
        self.id
    }

    /// Unique name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Coins available.
    #[must_use]
    pub const fn treasury(&self) -> u32 {
        self.treasury
    }

    /// Whether the treasury covers a unit of `color`.
    #[must_use]
    pub const fn can_afford(&self, color: UnitColor) -> bool {
        self.treasury >= color.cost()
    }

    /// Debit the cost of a unit of `color`.
    ///
    /// Returns `false`, leaving the treasury untouched, if funds are short.
    pub fn spend(&mut self, color: UnitColor) -> bool {
        if !self.can_afford(color) {
            return false;
        }
        self.treasury -= color.cost();
        true
    }

    /// Passive income at the end of a turn.
    pub fn end_turn(&mut self) {
        self.treasury = self.treasury.saturating_add(INCOME_PER_TURN);
    }

    pub(crate) fn set_owner(&mut self, owner: Option<TeamId>) {
        self.owner = owner;
    }
}

impl Entity for Building {
    fn position(&self) -> Position {
        self.position
    }

    fn owner(&self) -> Option<TeamId> {
        self.owner
    }
}

// ============================================================================
// Tests
// ============================================================================
