//! Teams and their rosters.

use serde::{Deserialize, Serialize};

use crate::entity::{BuildingId, TeamId, UnitId};
use crate::roster::{Roster, SizedIter};

/// A team competing for the field.
///
/// Buildings are listed in the order they were claimed or seized, units in
/// the order they were created. The owner back-reference on each entity is
/// maintained by the [`World`](crate::world::World) alongside these rosters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    name: String,
    buildings: Roster<BuildingId>,
    units: Roster<UnitId>,
}

impl Team {
    /// Create a team with empty rosters.
    #[must_use]
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            buildings: Roster::new(),
            units: Roster::new(),
        }
    }

    /// Arena id.
    #[must_use]
    pub const fn id(&self) -> TeamId {
        self.id
    }

    /// Unique name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Team with no buildings and no units is out of the match.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty() && self.units.is_empty()
    }

    /// Owned buildings in claim order.
    pub fn buildings(&self) -> SizedIter<std::slice::Iter<'_, BuildingId>> {
        self.buildings.iter()
    }

    /// Living units in creation order.
    pub fn units(&self) -> SizedIter<std::slice::Iter<'_, UnitId>> {
        self.units.iter()
    }

    /// Owned building ids in claim order.
    #[must_use]
    pub fn building_ids(&self) -> &[BuildingId] {
        self.buildings.as_slice()
    }

    /// Living unit ids in creation order.
    #[must_use]
    pub fn unit_ids(&self) -> &[UnitId] {
        self.units.as_slice()
    }

    /// Number of owned buildings.
    #[must_use]
    pub fn building_count(&self) -> usize {
        self.buildings.len()
    }

    /// Number of living units.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub(crate) fn add_building(&mut self, building: BuildingId) {
        self.buildings.push(building);
    }

    pub(crate) fn remove_building(&mut self, building: BuildingId) {
        let removed = self.buildings.remove(&building);
        debug_assert!(removed.is_some(), "{building:?} not in roster of {}", self.name);
    }

    pub(crate) fn add_unit(&mut self, unit: UnitId) {
        self.units.push(unit);
    }

    pub(crate) fn remove_unit(&mut self, unit: UnitId) {
        let removed = self.units.remove(&unit);
        debug_assert!(removed.is_some(), "{unit:?} not in roster of {}", self.name);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_team_is_empty() {
        let team = Team::new(TeamId(0), "reds");
        assert!(team.is_empty());
        assert_eq!(team.buildings().size(), 0);
        assert_eq!(team.units().size(), 0);
    }

    #[test]
    fn test_team_not_empty_with_either_roster() {
        let mut team = Team::new(TeamId(0), "reds");
        team.add_building(BuildingId(3));
        assert!(!team.is_empty());
        team.remove_building(BuildingId(3));
        assert!(team.is_empty());

        team.add_unit(UnitId(9));
        assert!(!team.is_empty());
        team.remove_unit(UnitId(9));
        assert!(team.is_empty());
    }

    #[test]
    fn test_rosters_keep_order() {
        let mut team = Team::new(TeamId(1), "blues");
        for id in [4, 1, 7] {
            team.add_unit(UnitId(id));
        }
        team.remove_unit(UnitId(1));
        let units: Vec<UnitId> = team.units().copied().collect();
        assert_eq!(units, vec![UnitId(4), UnitId(7)]);
        assert_eq!(team.unit_count(), 2);
    }
}
