//! Grid coordinates and compass directions.
//!
//! Coordinates are 1-based: the top-left cell is `(1, 1)` and `y` grows
//! southwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A cell coordinate on the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Column, starting at 1.
    pub x: u32,
    /// Row, starting at 1.
    pub y: u32,
}

impl Position {
    /// Create a position.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Offset by a signed delta. Returns `None` if either coordinate would drop below 1.
    #[must_use]
    pub fn offset(self, dx: i64, dy: i64) -> Option<Self> {
        let x = i64::from(self.x) + dx;
        let y = i64::from(self.y) + dy;
        if x < 1 || y < 1 {
            return None;
        }
        Some(Self::new(u32::try_from(x).ok()?, u32::try_from(y).ok()?))
    }

    /// The neighbouring position one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four compass directions a unit can step in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards row 1.
    North,
    /// Towards the last row.
    South,
    /// Towards the last column.
    East,
    /// Towards column 1.
    West,
}

impl Direction {
    /// All directions in declaration order.
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Grid delta `(dx, dy)` of one step.
    #[must_use]
    pub const fn delta(self) -> (i64, i64) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
        }
    }

    /// Lowercase command name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        }
    }
}

/// Error returned when a direction name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction '{0}'")]
pub struct UnknownDirection(pub String);

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "north" => Ok(Self::North),
            "south" => Ok(Self::South),
            "east" => Ok(Self::East),
            "west" => Ok(Self::West),
            other => Err(UnknownDirection(other.to_string())),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
