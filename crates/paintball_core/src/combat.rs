//! Paint colors and the rock-paper-scissors combat triangle.
//!
//! Red beats Blue, Blue beats Green, Green beats Red. When both sides share a
//! color the attacker wins, so a fight never ends in a draw.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entity::UnitId;
use crate::geometry::Position;

/// Color of a unit. Fixes its cost, move range and attack pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitColor {
    /// Expensive, moves up to three cells, sweeps the block towards the south-east.
    Red,
    /// Moves one cell, sweeps both diagonals.
    Green,
    /// Moves one cell, sweeps its own row.
    Blue,
}

impl UnitColor {
    /// All colors in declaration order.
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];

    /// Coins debited from the spawning bunker.
    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            Self::Red => 4,
            Self::Green | Self::Blue => 2,
        }
    }

    /// Maximum number of steps a single move command may contain.
    #[must_use]
    pub const fn max_steps(self) -> usize {
        match self {
            Self::Red => 3,
            Self::Green | Self::Blue => 1,
        }
    }

    /// The color this one defeats.
    #[must_use]
    pub const fn prey(self) -> Self {
        match self {
            Self::Red => Self::Blue,
            Self::Blue => Self::Green,
            Self::Green => Self::Red,
        }
    }

    /// Whether an attacker of this color wins against `defender`.
    #[must_use]
    pub fn beats(self, defender: Self) -> bool {
        self == defender || self.prey() == defender
    }

    /// Lowercase command name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }
}

impl fmt::Display for UnitColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a color name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown unit color '{0}'")]
pub struct UnknownColor(pub String);

impl FromStr for UnitColor {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(Self::Red),
            "green" => Ok(Self::Green),
            "blue" => Ok(Self::Blue),
            other => Err(UnknownColor(other.to_string())),
        }
    }
}

/// Outcome of a single move step, engagement or area attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionStatus {
    /// Moved or scanned without incident.
    Nothing,
    /// Defeated an enemy unit.
    WonFight,
    /// The acting unit lost a fight and was removed.
    PlayerEliminated,
    /// Took over a bunker.
    BunkerSeized,
    /// Defeated the defender and took over its bunker.
    WonAndSeized,
    /// Wrong number of directions for this color.
    InvalidMove,
    /// Direction name not recognised.
    InvalidDirection,
    /// Step would leave the field.
    OffTheMap,
    /// Target cell holds a friendly unit.
    PositionOccupied,
    /// Area attack finished with the attacker alive.
    Survived,
}

impl ActionStatus {
    /// Fold a fight result into a seizure.
    #[must_use]
    pub const fn with_seizure(self) -> Self {
        match self {
            Self::WonFight => Self::WonAndSeized,
            _ => Self::BunkerSeized,
        }
    }
}

/// Record of one move step: who acted, where it ended up, and what happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Acting unit.
    pub unit: UnitId,
    /// Its color.
    pub color: UnitColor,
    /// Location after the step. For a lost fight this is where the unit stood.
    pub location: Position,
    /// Outcome.
    pub status: ActionStatus,
}

// ============================================================================
// Tests
// ============================================================================
