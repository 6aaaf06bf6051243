//! ASCII rendering of a team's view of the field.
//!
//! ```text
//! 10 10
//! **1 2 3 4 5 6 7 8 9 10
//! 1 O . . . . . . . . .
//! 2 . P . . . . . . . .
//! ...
//! ```
//!
//! `.` empty, `B` bunker, `P` player, `O` player on a bunker. Cells hidden by
//! the snapshot's visibility rules render as empty.

use paintball_core::field::{CellState, Snapshot};

/// Character for a cell.
#[must_use]
pub const fn cell_char(state: CellState) -> char {
    match state {
        CellState::Empty => '.',
        CellState::Building => 'B',
        CellState::Unit => 'P',
        CellState::BuildingAndUnit => 'O',
    }
}

/// Render a snapshot with its size line, column header and numbered rows.
#[must_use]
pub fn render_map(snapshot: &Snapshot) -> String {
    let mut out = format!("{} {}\n**", snapshot.width, snapshot.height);
    let header: Vec<String> = (1..=snapshot.width).map(|x| x.to_string()).collect();
    out.push_str(&header.join(" "));
    out.push('\n');

    for (row, cells) in snapshot.rows().enumerate() {
        out.push_str(&(row + 1).to_string());
        for &state in cells {
            out.push(' ');
            out.push(cell_char(state));
        }
        out.push('\n');
    }
    out
}
