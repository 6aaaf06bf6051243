//! Arena holding the field and every entity on it.
//!
//! The world owns the [`Field`], all [`Building`]s, [`Unit`]s and [`Team`]s.
//! Every mutation that touches both a cell and an entity goes through here, so
//! an entity's recorded position and owner always agree with the cell and the
//! team roster that reference it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::building::{Building, CreateStatus};
use crate::combat::UnitColor;
use crate::entity::{BuildingId, Entity, TeamId, UnitId};
use crate::field::{CellState, Field, Snapshot};
use crate::geometry::Position;
use crate::team::Team;
use crate::unit::Unit;

/// Field plus entity arenas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    field: Field,
    buildings: Vec<Building>,
    units: BTreeMap<UnitId, Unit>,
    teams: Vec<Team>,
    next_unit_id: u32,
}

impl World {
    /// Create a world over an empty field.
    #[must_use]
    pub fn new(field: Field) -> Self {
        Self {
            field,
            buildings: Vec::new(),
            units: BTreeMap::new(),
            teams: Vec::new(),
            next_unit_id: 0,
        }
    }

    /// The playing field.
    #[must_use]
    pub const fn field(&self) -> &Field {
        &self.field
    }

    /// Look up a building.
    #[must_use]
    pub fn building(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.get(id.index())
    }

    /// All buildings in creation order.
    #[must_use]
    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    /// Find a building by name.
    #[must_use]
    pub fn building_named(&self, name: &str) -> Option<&Building> {
        self.buildings.iter().find(|b| b.name() == name)
    }

    /// Look up a living unit.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    /// Living units in id order.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    /// Look up a team, including eliminated ones.
    #[must_use]
    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(id.index())
    }

    /// Find a team by name.
    #[must_use]
    pub fn team_named(&self, name: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.name() == name)
    }

    /// Register an unowned building and place it on its cell.
    ///
    /// The caller validates the position and name.
    pub fn add_building(&mut self, name: &str, treasury: u32, position: Position) -> BuildingId {
        let id = BuildingId(self.buildings.len() as u32);
        self.buildings
            .push(Building::new(id, name, treasury, position));
        self.field.set_building_at(position, id);
        id
    }

    /// Register a team with empty rosters.
    pub fn add_team(&mut self, name: &str) -> TeamId {
        let id = TeamId(self.teams.len() as u32);
        self.teams.push(Team::new(id, name));
        id
    }

    /// Hand a building to `team`, taking it out of its previous owner's roster.
    pub fn transfer_building(&mut self, building: BuildingId, team: TeamId) {
        let Some(previous) = self.building(building).map(Entity::owner) else {
            debug_assert!(false, "transfer of unknown {building:?}");
            return;
        };
        if previous == Some(team) {
            return;
        }
        if let Some(old) = previous.and_then(|t| self.teams.get_mut(t.index())) {
            old.remove_building(building);
        }
        if let Some(new) = self.teams.get_mut(team.index()) {
            new.add_building(building);
        }
        if let Some(b) = self.buildings.get_mut(building.index()) {
            b.set_owner(Some(team));
        }
        tracing::trace!(?building, ?previous, ?team, "Building changed hands");
    }

    /// Spawn a unit of `color` on a building's cell, paid from its treasury.
    ///
    /// The unit joins the building's owner. Nothing changes unless the result is
    /// [`CreateStatus::Created`].
    pub fn spawn_unit(&mut self, building: BuildingId, color: UnitColor) -> CreateStatus {
        let Some(b) = self.buildings.get(building.index()) else {
            return CreateStatus::Unowned;
        };
        let position = b.position();
        let Some(team) = b.owner() else {
            return CreateStatus::Unowned;
        };
        if self.field.unit_at(position).is_some() {
            return CreateStatus::Occupied;
        }
        if !self.buildings[building.index()].spend(color) {
            return CreateStatus::InsufficientFunds;
        }

        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        self.units.insert(id, Unit::new(id, color, position, team));
        self.field.set_unit_at(position, id);
        if let Some(t) = self.teams.get_mut(team.index()) {
            t.add_unit(id);
        }
        CreateStatus::Created(id)
    }

    /// Put a unit straight onto a cell, bypassing bunkers and treasuries.
    #[cfg(test)]
    pub(crate) fn place_unit(&mut self, team: TeamId, color: UnitColor, position: Position) -> UnitId {
        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        self.units.insert(id, Unit::new(id, color, position, team));
        self.field.set_unit_at(position, id);
        if let Some(t) = self.teams.get_mut(team.index()) {
            t.add_unit(id);
        }
        id
    }

    /// Take a unit off the field and out of its team.
    pub fn remove_unit(&mut self, id: UnitId) -> Option<Unit> {
        let unit = self.units.remove(&id)?;
        let cleared = self.field.remove_unit_at(unit.position());
        debug_assert_eq!(cleared, Some(id), "cell did not hold {id:?}");
        if let Some(team) = self.teams.get_mut(unit.team().index()) {
            team.remove_unit(id);
        }
        Some(unit)
    }

    /// Move a unit to another cell, clearing the old one.
    pub(crate) fn relocate_unit(&mut self, id: UnitId, to: Position) {
        let Some(unit) = self.units.get_mut(&id) else {
            return;
        };
        let from = unit.position();
        unit.set_position(to);
        self.field.remove_unit_at(from);
        self.field.set_unit_at(to, id);
    }

    /// Whether the unit on a cell belongs to `team`.
    fn unit_owned_by(&self, id: UnitId, team: TeamId) -> bool {
        self.unit(id).is_some_and(|u| u.is_owned_by(team))
    }

    /// Whether the building on a cell belongs to `team`.
    fn building_owned_by(&self, id: BuildingId, team: TeamId) -> bool {
        self.building(id).is_some_and(|b| b.is_owned_by(team))
    }

    /// Snapshot of the whole field with every entity visible.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.field.snapshot()
    }

    /// Snapshot as seen by `team`.
    ///
    /// A cell reads as empty when it holds a unit `team` does not own, and also
    /// when it holds a building `team` does not own. Visibility is per cell, so
    /// a friendly unit standing on an enemy bunker is hidden too.
    #[must_use]
    pub fn snapshot_for(&self, team: TeamId) -> Snapshot {
        self.field.snapshot_with(|_, cell| {
            let foreign_unit = cell.unit.is_some_and(|u| !self.unit_owned_by(u, team));
            let foreign_building = cell
                .building
                .is_some_and(|b| !self.building_owned_by(b, team));
            if foreign_unit || foreign_building {
                CellState::Empty
            } else {
                cell.state()
            }
        })
    }

    /// Check that cells, entities and rosters all agree.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let units_placed = self.units.values().all(|u| {
            self.field.unit_at(u.position()) == Some(u.id())
                && self
                    .team(u.team())
                    .is_some_and(|t| t.units().any(|&id| id == u.id()))
        });
        let buildings_placed = self.buildings.iter().all(|b| {
            self.field.building_at(b.position()) == Some(b.id())
                && b.owner().map_or(true, |owner| {
                    self.team(owner)
                        .is_some_and(|t| t.buildings().any(|&id| id == b.id()))
                })
        });
        let cells_known = self.field.cells().all(|(pos, cell)| {
            cell.unit
                .map_or(true, |u| self.unit(u).is_some_and(|u| u.position() == pos))
                && cell
                    .building
                    .map_or(true, |b| self.building(b).is_some_and(|b| b.position() == pos))
        });
        units_placed && buildings_placed && cells_known
    }

    pub(crate) fn buildings_mut(&mut self) -> impl Iterator<Item = &mut Building> {
        self.buildings.iter_mut()
    }
}

// ============================================================================
// Tests
// ============================================================================
