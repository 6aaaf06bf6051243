//! The playing field: a fixed grid of cells.
//!
//! Each cell holds at most one unit and at most one building, independently.
//! Cells are stored in row-major order and addressed with 1-based
//! [`Position`]s.

use serde::{Deserialize, Serialize};

use crate::entity::{BuildingId, UnitId};
use crate::geometry::Position;

/// Occupancy of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Unit standing on the cell.
    pub unit: Option<UnitId>,
    /// Building standing on the cell.
    pub building: Option<BuildingId>,
}

impl Cell {
    /// Neither a unit nor a building.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.unit.is_none() && self.building.is_none()
    }

    /// What a renderer should draw for this cell, ignoring ownership.
    #[must_use]
    pub const fn state(&self) -> CellState {
        CellState::from_presence(self.building.is_some(), self.unit.is_some())
    }
}

/// Visible state of a cell in a [`Snapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    /// Nothing visible.
    #[default]
    Empty,
    /// A building with no unit on it.
    Building,
    /// A unit on open ground.
    Unit,
    /// A unit standing on a building.
    BuildingAndUnit,
}

impl CellState {
    /// State for the given presence flags.
    #[must_use]
    pub const fn from_presence(building: bool, unit: bool) -> Self {
        match (building, unit) {
            (false, false) => Self::Empty,
            (true, false) => Self::Building,
            (false, true) => Self::Unit,
            (true, true) => Self::BuildingAndUnit,
        }
    }

    /// Whether a building is visible.
    #[must_use]
    pub const fn has_building(self) -> bool {
        matches!(self, Self::Building | Self::BuildingAndUnit)
    }

    /// Whether a unit is visible.
    #[must_use]
    pub const fn has_unit(self) -> bool {
        matches!(self, Self::Unit | Self::BuildingAndUnit)
    }
}

/// Point-in-time rendering of the field, optionally filtered for one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Field width in cells.
    pub width: u32,
    /// Field height in cells.
    pub height: u32,
    /// Cell states in row-major order.
    pub cells: Vec<CellState>,
}

impl Snapshot {
    /// State of the cell at `pos`, `None` if off the field.
    #[must_use]
    pub fn cell(&self, pos: Position) -> Option<CellState> {
        if pos.x == 0 || pos.y == 0 || pos.x > self.width || pos.y > self.height {
            return None;
        }
        let index = (pos.y as usize - 1) * self.width as usize + (pos.x as usize - 1);
        self.cells.get(index).copied()
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Count cells in a given state.
    #[must_use]
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&s| s == state).count()
    }
}

/// Rectangular grid of cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Grid width in cells.
    width: u32,
    /// Grid height in cells.
    height: u32,
    /// Cell data stored in row-major order.
    cells: Vec<Cell>,
}

impl Field {
    /// Create an empty field.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero, or if the cells cannot be
    /// allocated.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0, "Field width must be positive");
        assert!(height > 0, "Field height must be positive");

        Self::try_new(width, height)
            .unwrap_or_else(|| panic!("Field of {width}x{height} cells does not fit in memory"))
    }

    /// Create an empty field, or `None` if either dimension is zero or the
    /// cells cannot be allocated.
    #[must_use]
    pub fn try_new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let cell_count = (width as usize).checked_mul(height as usize)?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(cell_count).ok()?;
        cells.resize(cell_count, Cell::default());

        Some(Self {
            width,
            height,
            cells,
        })
    }

    /// Field width in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Field height in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Check whether signed coordinates fall on the field.
    #[must_use]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 1 && y >= 1 && x <= i64::from(self.width) && y <= i64::from(self.height)
    }

    /// Check whether a position falls on the field.
    #[must_use]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 1 && pos.y >= 1 && pos.x <= self.width && pos.y <= self.height
    }

    /// Convert signed coordinates to a position on this field.
    #[must_use]
    pub fn position(&self, x: i64, y: i64) -> Option<Position> {
        if !self.contains(x, y) {
            return None;
        }
        Some(Position::new(u32::try_from(x).ok()?, u32::try_from(y).ok()?))
    }

    #[inline]
    fn index(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| (pos.y as usize - 1) * self.width as usize + (pos.x as usize - 1))
    }

    /// Cell at `pos`, `None` if out of bounds.
    #[must_use]
    pub fn cell_at(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        let index = self.index(pos)?;
        self.cells.get_mut(index)
    }

    /// Unit standing at `pos`.
    #[must_use]
    pub fn unit_at(&self, pos: Position) -> Option<UnitId> {
        self.cell_at(pos).and_then(|cell| cell.unit)
    }

    /// Building standing at `pos`.
    #[must_use]
    pub fn building_at(&self, pos: Position) -> Option<BuildingId> {
        self.cell_at(pos).and_then(|cell| cell.building)
    }

    /// Put a unit on a cell. Returns `false` if out of bounds.
    pub fn set_unit_at(&mut self, pos: Position, unit: UnitId) -> bool {
        match self.cell_mut(pos) {
            Some(cell) => {
                cell.unit = Some(unit);
                true
            }
            None => false,
        }
    }

    /// Clear the unit slot of a cell, returning what was there.
    pub fn remove_unit_at(&mut self, pos: Position) -> Option<UnitId> {
        self.cell_mut(pos).and_then(|cell| cell.unit.take())
    }

    /// Put a building on a cell. Returns `false` if out of bounds.
    pub fn set_building_at(&mut self, pos: Position, building: BuildingId) -> bool {
        match self.cell_mut(pos) {
            Some(cell) => {
                cell.building = Some(building);
                true
            }
            None => false,
        }
    }

    /// Clear the building slot of a cell, returning what was there.
    pub fn remove_building_at(&mut self, pos: Position) -> Option<BuildingId> {
        self.cell_mut(pos).and_then(|cell| cell.building.take())
    }

    /// Iterate all cells in row-major order with their positions.
    pub fn cells(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        let width = self.width as usize;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let x = (i % width) as u32 + 1;
            let y = (i / width) as u32 + 1;
            (Position::new(x, y), cell)
        })
    }

    /// Unfiltered snapshot: every entity is visible.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_with(|_, cell| cell.state())
    }

    /// Snapshot where `state_of` decides what each cell shows.
    pub fn snapshot_with<F>(&self, mut state_of: F) -> Snapshot
    where
        F: FnMut(Position, &Cell) -> CellState,
    {
        Snapshot {
            width: self.width,
            height: self.height,
            cells: self.cells().map(|(pos, cell)| state_of(pos, cell)).collect(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_creation() {
        let field = Field::new(12, 10);
        assert_eq!(field.width(), 12);
        assert_eq!(field.height(), 10);
        assert_eq!(field.cells().count(), 120);
        assert!(field.cells().all(|(_, cell)| cell.is_empty()));
    }

    #[test]
    fn test_field_try_new_rejects_unallocatable_sizes() {
        assert!(Field::try_new(0, 10).is_none());
        assert!(Field::try_new(10, 0).is_none());
        assert!(Field::try_new(u32::MAX, u32::MAX).is_none());
        assert_eq!(Field::try_new(12, 10), Some(Field::new(12, 10)));
    }

    #[test]
    fn test_field_bounds_are_one_based() {
        let field = Field::new(10, 10);
        assert!(field.contains(1, 1));
        assert!(field.contains(10, 10));
        assert!(!field.contains(0, 5));
        assert!(!field.contains(5, 0));
        assert!(!field.contains(11, 5));
        assert!(!field.contains(-3, 5));
        assert_eq!(field.cell_at(Position::new(0, 1)), None);
        assert_eq!(field.position(10, 11), None);
    }

    #[test]
    fn test_field_unit_and_building_are_independent() {
        let mut field = Field::new(10, 10);
        let pos = Position::new(3, 4);

        assert!(field.set_building_at(pos, BuildingId(0)));
        assert!(field.set_unit_at(pos, UnitId(7)));
        assert_eq!(field.cell_at(pos).map(Cell::state), Some(CellState::BuildingAndUnit));

        assert_eq!(field.remove_unit_at(pos), Some(UnitId(7)));
        assert_eq!(field.unit_at(pos), None);
        assert_eq!(field.building_at(pos), Some(BuildingId(0)));

        assert_eq!(field.remove_building_at(pos), Some(BuildingId(0)));
        assert!(field.cell_at(pos).is_some_and(Cell::is_empty));
    }

    #[test]
    fn test_field_set_out_of_bounds() {
        let mut field = Field::new(10, 10);
        assert!(!field.set_unit_at(Position::new(11, 1), UnitId(0)));
        assert!(!field.set_building_at(Position::new(1, 11), BuildingId(0)));
        assert_eq!(field.remove_unit_at(Position::new(11, 1)), None);
    }

    #[test]
    fn test_cells_iterate_row_major() {
        let field = Field::new(10, 11);
        let positions: Vec<Position> = field.cells().map(|(pos, _)| pos).take(12).collect();
        assert_eq!(positions[0], Position::new(1, 1));
        assert_eq!(positions[9], Position::new(10, 1));
        assert_eq!(positions[10], Position::new(1, 2));
        assert_eq!(field.cells().last().map(|(pos, _)| pos), Some(Position::new(10, 11)));
    }

    #[test]
    fn test_unfiltered_snapshot() {
        let mut field = Field::new(10, 10);
        field.set_building_at(Position::new(1, 1), BuildingId(0));
        field.set_unit_at(Position::new(2, 1), UnitId(0));
        field.set_unit_at(Position::new(10, 10), UnitId(1));
        field.set_building_at(Position::new(10, 10), BuildingId(1));

        let snapshot = field.snapshot();
        assert_eq!(snapshot.cells.len(), 100);
        assert_eq!(snapshot.cell(Position::new(1, 1)), Some(CellState::Building));
        assert_eq!(snapshot.cell(Position::new(2, 1)), Some(CellState::Unit));
        assert_eq!(
            snapshot.cell(Position::new(10, 10)),
            Some(CellState::BuildingAndUnit)
        );
        assert_eq!(snapshot.count(CellState::Empty), 97);
        assert_eq!(snapshot.rows().count(), 10);
    }
}
