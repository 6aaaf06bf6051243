//! Units and their movement and combat rules.
//!
//! A unit is a colored piece owned by exactly one team. Its color decides how
//! far one move command may take it and which cells its area attack sweeps.
//! All resolution runs against the [`World`] so that removals and seizures
//! keep the field and rosters in sync.
//!
//! # Engagement
//!
//! Entering or attacking a cell resolves in order:
//! 1. A friendly unit on the cell: nothing happens.
//! 2. An enemy unit: colors fight. The loser leaves the field and its team.
//!    If the acting unit lost, resolution stops there.
//! 3. A building not owned by the acting team changes hands.

use serde::{Deserialize, Serialize};

use crate::combat::{Action, ActionStatus, UnitColor};
use crate::entity::{Entity, TeamId, UnitId};
use crate::geometry::{Direction, Position};
use crate::pattern::attack_pattern;
use crate::world::World;

/// A unit on the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    id: UnitId,
    color: UnitColor,
    position: Position,
    team: TeamId,
}

impl Unit {
    /// Create a unit.
    #[must_use]
    pub const fn new(id: UnitId, color: UnitColor, position: Position, team: TeamId) -> Self {
        Self {
            id,
            color,
            position,
            team,
        }
    }

    /// Arena id.
    #[must_use]
    pub const fn id(&self) -> UnitId {
        self.id
    }

    /// Paint color.
    #[must_use]
    pub const fn color(&self) -> UnitColor {
        self.color
    }

    /// Owning team.
    #[must_use]
    pub const fn team(&self) -> TeamId {
        self.team
    }

    /// Whether `count` directions form a legal move command for this unit.
    #[must_use]
    pub const fn accepts_steps(&self, count: usize) -> bool {
        count >= 1 && count <= self.color.max_steps()
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}

impl Entity for Unit {
    fn position(&self) -> Position {
        self.position
    }

    fn owner(&self) -> Option<TeamId> {
        Some(self.team)
    }
}

impl World {
    /// Resolve `attacker` engaging the cell at `target`.
    ///
    /// Does not move the attacker. Returns [`ActionStatus::PlayerEliminated`]
    /// if the attacker lost and was removed.
    pub fn engage(&mut self, attacker: UnitId, target: Position) -> ActionStatus {
        let Some((color, team)) = self.unit(attacker).map(|u| (u.color(), u.team())) else {
            debug_assert!(false, "engagement by unknown {attacker:?}");
            return ActionStatus::Nothing;
        };
        let Some(cell) = self.field().cell_at(target).copied() else {
            return ActionStatus::Nothing;
        };

        let mut status = ActionStatus::Nothing;
        if let Some(defender) = cell.unit.and_then(|id| self.unit(id)) {
            if defender.team() == team {
                return ActionStatus::Nothing;
            }
            let defender_id = defender.id();
            if color.beats(defender.color()) {
                tracing::trace!(?attacker, ?defender_id, x = target.x, y = target.y, "Won fight");
                self.remove_unit(defender_id);
                status = ActionStatus::WonFight;
            } else {
                tracing::trace!(?attacker, ?defender_id, x = target.x, y = target.y, "Lost fight");
                self.remove_unit(attacker);
                return ActionStatus::PlayerEliminated;
            }
        }

        if let Some(building) = cell.building {
            let owned = self.building(building).is_some_and(|b| b.is_owned_by(team));
            if !owned {
                self.transfer_building(building, team);
                status = status.with_seizure();
            }
        }
        status
    }

    /// Move a unit one cell.
    ///
    /// `direction` is `None` when the command named an unknown direction.
    pub fn step_unit(&mut self, id: UnitId, direction: Option<Direction>) -> Option<Action> {
        let unit = self.unit(id)?;
        let origin = unit.position();
        let team = unit.team();
        let record = |location, status| Action {
            unit: id,
            color: unit.color(),
            location,
            status,
        };

        let Some(direction) = direction else {
            return Some(record(origin, ActionStatus::InvalidDirection));
        };
        let Some(target) = origin.step(direction).filter(|p| self.field().in_bounds(*p)) else {
            return Some(record(origin, ActionStatus::OffTheMap));
        };
        let blocked = self
            .field()
            .unit_at(target)
            .and_then(|other| self.unit(other))
            .is_some_and(|other| other.team() == team);
        if blocked {
            return Some(record(origin, ActionStatus::PositionOccupied));
        }

        let color = unit.color();
        let status = self.engage(id, target);
        let action = |location| Action {
            unit: id,
            color,
            location,
            status,
        };
        if status == ActionStatus::PlayerEliminated {
            return Some(action(origin));
        }
        self.relocate_unit(id, target);
        Some(action(target))
    }

    /// Execute a move command of one or more steps.
    ///
    /// A command with the wrong number of directions for the unit's color is
    /// rejected as a single [`ActionStatus::InvalidMove`] without side effects.
    /// Otherwise steps run in order and stop once the unit is eliminated.
    pub fn move_unit(&mut self, id: UnitId, directions: &[Option<Direction>]) -> Vec<Action> {
        let Some(unit) = self.unit(id) else {
            return Vec::new();
        };
        if !unit.accepts_steps(directions.len()) {
            return vec![Action {
                unit: id,
                color: unit.color(),
                location: unit.position(),
                status: ActionStatus::InvalidMove,
            }];
        }

        let mut actions = Vec::with_capacity(directions.len());
        for &direction in directions {
            let Some(action) = self.step_unit(id, direction) else {
                break;
            };
            actions.push(action);
            if action.status == ActionStatus::PlayerEliminated {
                break;
            }
        }
        actions
    }

    /// Sweep the unit's attack pattern without moving it.
    ///
    /// Stops at the first lost fight and returns
    /// [`ActionStatus::PlayerEliminated`]; otherwise [`ActionStatus::Survived`].
    pub fn area_attack(&mut self, id: UnitId) -> ActionStatus {
        let Some(unit) = self.unit(id) else {
            return ActionStatus::PlayerEliminated;
        };
        let field = self.field();
        let cells = attack_pattern(unit.color(), unit.position(), field.width(), field.height());

        for target in cells {
            if self.engage(id, target) == ActionStatus::PlayerEliminated {
                return ActionStatus::PlayerEliminated;
            }
        }
        ActionStatus::Survived
    }
}

// ============================================================================
// Tests
// ============================================================================
