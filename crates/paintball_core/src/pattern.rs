//! Area-attack patterns.
//!
//! Each color sweeps a fixed shape around its own cell. A pattern is a pure
//! function of the attacker's position and the field dimensions, returning the
//! cells to engage in visiting order. The attacker's own cell is never part
//! of a pattern and no cell appears twice.

use crate::combat::UnitColor;
use crate::geometry::Position;

/// Cells swept by an attacker of `color` standing at `origin`.
#[must_use]
pub fn attack_pattern(color: UnitColor, origin: Position, width: u32, height: u32) -> Vec<Position> {
    match color {
        UnitColor::Red => red_block(origin, width, height),
        UnitColor::Green => green_diagonals(origin, width, height),
        UnitColor::Blue => blue_row(origin, width),
    }
}

/// Block from the attacker to the bottom-right corner, row-major, minus the origin.
#[must_use]
pub fn red_block(origin: Position, width: u32, height: u32) -> Vec<Position> {
    let block_width = width - origin.x + 1;
    let block_height = height - origin.y + 1;
    let total = block_width * block_height;

    (1..total)
        .map(|i| Position::new(origin.x + i % block_width, origin.y + i / block_width))
        .collect()
}

/// Every other cell of the attacker's row, spiralling outwards.
///
/// Offsets alternate right then left with growing distance (+1, -1, +2, -2,
/// ...). Once one side runs out, the remaining cells of the other side are
/// taken in order of increasing distance.
#[must_use]
pub fn blue_row(origin: Position, width: u32) -> Vec<Position> {
    let x = origin.x;
    let y = origin.y;

    (1..width)
        .map(|i| {
            let offset = (i - 1) / 2 + 1;
            let column = if x + offset > width {
                width - i
            } else if x <= offset {
                i + 1
            } else if i % 2 == 1 {
                x + offset
            } else {
                x - offset
            };
            Position::new(column, y)
        })
        .collect()
}

/// Diagonal rays: NW, NE, SW, SE.
const DIAGONALS: [(i64, i64); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

/// Both diagonals through the attacker, one step outward per round.
///
/// Each round visits the next cell of every ray that still has one. The
/// first round starts at NW and every later round starts one ray further
/// along, wrapping around: NW, NE, SW, SE, then NE, SW, SE, NW, and so on.
#[must_use]
pub fn green_diagonals(origin: Position, width: u32, height: u32) -> Vec<Position> {
    let west = origin.x - 1;
    let east = width - origin.x;
    let north = origin.y - 1;
    let south = height - origin.y;
    let lengths = [
        west.min(north),
        east.min(north),
        west.min(south),
        east.min(south),
    ];
    let longest = lengths.iter().copied().max().unwrap_or(0);

    let mut cells = Vec::with_capacity(lengths.iter().sum::<u32>() as usize);
    for step in 1..=longest {
        let first = (step as usize - 1) % DIAGONALS.len();
        for ray in (first..DIAGONALS.len()).chain(0..first) {
            if step > lengths[ray] {
                continue;
            }
            let (dx, dy) = DIAGONALS[ray];
            let distance = i64::from(step);
            if let Some(pos) = origin.offset(dx * distance, dy * distance) {
                cells.push(pos);
            }
        }
    }
    cells
}

// ============================================================================
// Tests
// ============================================================================
