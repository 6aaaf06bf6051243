//! Turn engine driving a match from setup to a single winner.
//!
//! A match moves through three phases:
//!
//! 1. **Setup** - configure the field, add bunkers, add teams anchored to them.
//! 2. **In progress** - teams take turns issuing one command each.
//! 3. **Ended** - one team is left (or the match was stopped). Terminal.
//!
//! Every player-facing command consumes the acting team's turn, including
//! commands rejected for a bad color, position or ownership. After any
//! command that can change rosters, teams with no buildings and no units are
//! eliminated.
//!
//! # Example
//!
//! ```
//! use paintball_core::game::{Game, GameStatus};
//!
//! let mut game = Game::new();
//! game.configure_field(10, 10).unwrap();
//! game.add_building(1, 1, 10, "B1").unwrap();
//! game.add_building(10, 10, 10, "B2").unwrap();
//! game.add_team("T1", "B1").unwrap();
//! game.add_team("T2", "B2").unwrap();
//! game.start().unwrap();
//!
//! let response = game.create_unit("red", "B1").unwrap();
//! assert_eq!(response.status, GameStatus::Ok);
//! assert_eq!(game.building_named("B1").map(|b| b.treasury()), Some(6 + 1));
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::building::{Building, CreateStatus};
use crate::combat::{Action, UnitColor};
use crate::entity::{BuildingId, Entity, TeamId, UnitId};
use crate::error::{BuildingRejection, GameError, Result, TeamRejection};
use crate::field::{Field, Snapshot};
use crate::geometry::Direction;
use crate::roster::SizedIter;
use crate::team::Team;
use crate::unit::Unit;
use crate::world::World;

/// Smallest accepted field dimension.
pub const MIN_FIELD_SIZE: u32 = 10;

/// Minimum number of teams needed to start.
pub const MIN_TEAMS: usize = 2;

/// Lifecycle phase of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Field, bunkers and teams are being configured.
    Setup,
    /// Teams are taking turns.
    InProgress,
    /// The match is over. A new [`Game`] is needed to play again.
    Ended,
}

/// Status attached to every command response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Command executed; see the result payload.
    Ok,
    /// The acting team lost its last unit and building.
    TeamEliminated,
    /// The acting team was eliminated and that left a single team.
    TeamEliminatedAndGameOver,
    /// Only one team is left.
    GameOver,
    /// Coordinates are off the field.
    InvalidPosition,
    /// No unit on the given cell.
    NoUnit,
    /// The unit or bunker belongs to another team.
    WrongTeam,
    /// Color name not recognised.
    InvalidColor,
    /// No bunker with the given name.
    InvalidBuilding,
}

impl GameStatus {
    /// Whether this status ends the match.
    #[must_use]
    pub const fn is_game_over(self) -> bool {
        matches!(self, Self::GameOver | Self::TeamEliminatedAndGameOver)
    }
}

/// Response to a player-facing command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResponse<T> {
    /// Outcome of the command.
    pub status: GameStatus,
    /// Payload, absent when a precondition failed.
    pub result: Option<T>,
    /// Winning team, set once the match is over.
    pub winner: Option<TeamId>,
}

impl<T> GameResponse<T> {
    fn ok(result: T) -> Self {
        Self {
            status: GameStatus::Ok,
            result: Some(result),
            winner: None,
        }
    }

    fn rejected(status: GameStatus) -> Self {
        Self {
            status,
            result: None,
            winner: None,
        }
    }
}

/// A match of paintball.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    phase: Phase,
    world: Option<World>,
    /// Teams still in the match, in turn order.
    active: Vec<TeamId>,
    /// Index into `active` of the team whose turn it is.
    current: usize,
    /// Completed turns.
    turn: u64,
    winner: Option<TeamId>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Create a match in the setup phase with no field.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::Setup,
            world: None,
            active: Vec::new(),
            current: 0,
            turn: 0,
            winner: None,
        }
    }

    // ------------------------------------------------------------------------
    // Setup
    // ------------------------------------------------------------------------

    fn require(&self, expected: Phase) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    fn world_for_setup(&mut self) -> Result<&mut World> {
        self.require(Phase::Setup)?;
        self.world.as_mut().ok_or(GameError::FieldNotConfigured)
    }

    /// Set the field size. Discards any bunkers and teams already added.
    pub fn configure_field(&mut self, width: i64, height: i64) -> Result<()> {
        self.require(Phase::Setup)?;
        let dims = u32::try_from(width)
            .ok()
            .zip(u32::try_from(height).ok())
            .filter(|&(w, h)| w >= MIN_FIELD_SIZE && h >= MIN_FIELD_SIZE);
        let Some((width_cells, height_cells)) = dims else {
            return Err(GameError::InvalidSize {
                width,
                height,
                min: MIN_FIELD_SIZE,
            });
        };

        let Some(field) = Field::try_new(width_cells, height_cells) else {
            tracing::warn!(width, height, "Field allocation failed");
            return Err(GameError::FieldTooLarge {
                width: width_cells,
                height: height_cells,
            });
        };

        self.world = Some(World::new(field));
        self.active.clear();
        tracing::debug!(width, height, "Field configured");
        Ok(())
    }

    /// Add an unowned bunker.
    pub fn add_building(&mut self, x: i64, y: i64, treasury: i64, name: &str) -> Result<BuildingId> {
        let world = self.world_for_setup()?;
        let reject = |reason| GameError::BuildingRejected {
            name: name.to_string(),
            reason,
        };

        let Some(position) = world.field().position(x, y) else {
            return Err(reject(BuildingRejection::OutOfBounds));
        };
        if treasury <= 0 {
            return Err(reject(BuildingRejection::EmptyTreasury));
        }
        if world.field().building_at(position).is_some() {
            return Err(reject(BuildingRejection::CellTaken));
        }
        if world.building_named(name).is_some() {
            return Err(reject(BuildingRejection::DuplicateName));
        }

        let treasury = u32::try_from(treasury).unwrap_or(u32::MAX);
        let id = world.add_building(name, treasury, position);
        tracing::debug!(name, x, y, treasury, "Building added");
        Ok(id)
    }

    /// Add a team and hand it the unclaimed bunker called `building`.
    pub fn add_team(&mut self, name: &str, building: &str) -> Result<TeamId> {
        let world = self.world_for_setup()?;
        let reject = |reason| GameError::TeamRejected {
            name: name.to_string(),
            reason,
        };

        if world.team_named(name).is_some() {
            return Err(reject(TeamRejection::DuplicateName));
        }
        let Some(anchor) = world
            .buildings()
            .iter()
            .find(|b| b.name() == building && b.owner().is_none())
            .map(Building::id)
        else {
            return Err(reject(TeamRejection::NoFreeBuilding));
        };

        let team = world.add_team(name);
        world.transfer_building(anchor, team);
        self.active.push(team);
        tracing::debug!(team = name, building, "Team added");
        Ok(team)
    }

    /// Begin the match.
    pub fn start(&mut self) -> Result<()> {
        self.require(Phase::Setup)?;
        if self.active.len() < MIN_TEAMS {
            return Err(GameError::NotEnoughTeams {
                count: self.active.len(),
            });
        }
        self.phase = Phase::InProgress;
        self.current = 0;
        tracing::info!(teams = self.active.len(), "Match started");
        Ok(())
    }

    /// End the match without a winner.
    pub fn stop(&mut self) {
        if self.phase != Phase::Ended {
            tracing::info!(turn = self.turn, "Match stopped");
        }
        self.phase = Phase::Ended;
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    fn world_in_play(&mut self) -> Result<&mut World> {
        self.require(Phase::InProgress)?;
        self.world.as_mut().ok_or(GameError::FieldNotConfigured)
    }

    fn current_team_id(&self) -> Option<TeamId> {
        self.active.get(self.current).copied()
    }

    /// Spawn a unit of `color` at the current team's bunker named `building`.
    pub fn create_unit(&mut self, color: &str, building: &str) -> Result<GameResponse<CreateStatus>> {
        self.world_in_play()?;
        let response = self.try_create_unit(color, building);
        tracing::debug!(color, building, status = ?response.status, result = ?response.result, "Create unit");
        self.end_of_turn();
        Ok(response)
    }

    fn try_create_unit(&mut self, color: &str, building: &str) -> GameResponse<CreateStatus> {
        let current = self.current_team_id();
        let Some(world) = self.world.as_mut() else {
            return GameResponse::rejected(GameStatus::InvalidBuilding);
        };
        let Ok(color) = color.parse::<UnitColor>() else {
            return GameResponse::rejected(GameStatus::InvalidColor);
        };
        let Some(target) = world.building_named(building) else {
            return GameResponse::rejected(GameStatus::InvalidBuilding);
        };
        if target.owner().is_none() || target.owner() != current {
            return GameResponse::rejected(GameStatus::WrongTeam);
        }
        let id = target.id();
        GameResponse::ok(world.spawn_unit(id, color))
    }

    /// Move the unit at `(x, y)` along `directions`.
    ///
    /// Unknown direction names become
    /// [`ActionStatus::InvalidDirection`](crate::combat::ActionStatus::InvalidDirection)
    /// steps in the returned log.
    pub fn move_unit_at<D: AsRef<str>>(
        &mut self,
        x: i64,
        y: i64,
        directions: &[D],
    ) -> Result<GameResponse<Vec<Action>>> {
        let current = self.current_team_id();
        let world = self.world_in_play()?;

        let Some(position) = world.field().position(x, y) else {
            return Ok(self.rejected_turn(GameStatus::InvalidPosition));
        };
        let Some(unit) = world.field().unit_at(position).and_then(|id| world.unit(id)) else {
            return Ok(self.rejected_turn(GameStatus::NoUnit));
        };
        if Some(unit.team()) != current {
            return Ok(self.rejected_turn(GameStatus::WrongTeam));
        }

        let id = unit.id();
        let steps: Vec<Option<Direction>> = directions
            .iter()
            .map(|d| d.as_ref().parse().ok())
            .collect();
        let actions = world.move_unit(id, &steps);
        tracing::debug!(x, y, steps = actions.len(), last = ?actions.last().map(|a| a.status), "Move");

        self.remove_empty_teams();
        if self.phase == Phase::Ended {
            return Ok(GameResponse {
                status: GameStatus::GameOver,
                result: Some(actions),
                winner: self.winner,
            });
        }
        self.end_of_turn();
        Ok(GameResponse::ok(actions))
    }

    /// Every unit of the current team sweeps its attack pattern.
    ///
    /// Returns the field as seen by the acting team afterwards.
    pub fn current_team_attacks(&mut self) -> Result<GameResponse<Snapshot>> {
        let current = self.current_team_id();
        let world = self.world_in_play()?;
        let Some(acting) = current else {
            return Err(GameError::WrongPhase {
                expected: Phase::InProgress,
                actual: Phase::Ended,
            });
        };

        let attackers: Vec<UnitId> = world
            .team(acting)
            .map(|t| t.units().copied().collect())
            .unwrap_or_default();
        for id in attackers {
            if world.unit(id).is_some() {
                let outcome = world.area_attack(id);
                tracing::trace!(unit = ?id, ?outcome, "Area attack");
            }
        }

        let team_eliminated = world.team(acting).map_or(true, Team::is_empty);
        let view = world.snapshot_for(acting);
        self.remove_empty_teams();
        let game_over = self.phase == Phase::Ended;

        let status = match (team_eliminated, game_over) {
            (true, true) => GameStatus::TeamEliminatedAndGameOver,
            (false, true) => GameStatus::GameOver,
            (true, false) => GameStatus::TeamEliminated,
            (false, false) => GameStatus::Ok,
        };
        tracing::debug!(team = ?acting, ?status, "Attack");
        self.end_of_turn();
        Ok(GameResponse {
            status,
            result: Some(view),
            winner: self.winner,
        })
    }

    fn rejected_turn<T>(&mut self, status: GameStatus) -> GameResponse<T> {
        tracing::debug!(?status, "Command rejected");
        self.end_of_turn();
        GameResponse::rejected(status)
    }

    /// Pass the turn to the next team and pay every bunker its income.
    fn end_of_turn(&mut self) {
        if !self.active.is_empty() {
            self.current = (self.current + 1) % self.active.len();
        }
        if let Some(world) = self.world.as_mut() {
            world.buildings_mut().for_each(Building::end_turn);
        }
        self.turn += 1;

        #[cfg(feature = "debug-validation")]
        debug_assert!(
            self.world.as_ref().map_or(true, World::is_consistent),
            "world inconsistent after turn {}",
            self.turn
        );
    }

    /// Drop teams with empty rosters and end the match if one is left.
    fn remove_empty_teams(&mut self) {
        let Some(world) = self.world.as_ref() else {
            return;
        };

        let mut index = 0;
        while index < self.active.len() {
            let team = self.active[index];
            if !world.team(team).map_or(true, Team::is_empty) {
                index += 1;
                continue;
            }
            self.active.remove(index);
            if index <= self.current {
                // Point at the team before the removed one so the next
                // rotation lands on the team that followed it.
                self.current = match self.current {
                    0 => self.active.len().saturating_sub(1),
                    n => n - 1,
                };
            }
            tracing::info!(team = world.team(team).map(Team::name), "Team eliminated");
        }

        if self.active.len() <= 1 && self.phase == Phase::InProgress {
            self.phase = Phase::Ended;
            self.winner = self.active.first().copied();
            tracing::info!(
                winner = self.winner.and_then(|t| world.team(t)).map(Team::name),
                turn = self.turn,
                "Game over"
            );
        }
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether teams are currently taking turns.
    #[must_use]
    pub fn in_progress(&self) -> bool {
        self.phase == Phase::InProgress
    }

    /// Turns completed so far.
    #[must_use]
    pub const fn turn(&self) -> u64 {
        self.turn
    }

    /// The world, once a field is configured.
    #[must_use]
    pub const fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    /// Field width, 0 before configuration.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.world.as_ref().map_or(0, |w| w.field().width())
    }

    /// Field height, 0 before configuration.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.world.as_ref().map_or(0, |w| w.field().height())
    }

    /// Every bunker in creation order.
    pub fn buildings(&self) -> SizedIter<std::slice::Iter<'_, Building>> {
        let all = self.world.as_ref().map(World::buildings).unwrap_or_default();
        SizedIter::new(all.iter())
    }

    /// Look up a bunker.
    #[must_use]
    pub fn building(&self, id: BuildingId) -> Option<&Building> {
        self.world.as_ref()?.building(id)
    }

    /// Find a bunker by name.
    #[must_use]
    pub fn building_named(&self, name: &str) -> Option<&Building> {
        self.world.as_ref()?.building_named(name)
    }

    /// Look up a living unit.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.world.as_ref()?.unit(id)
    }

    /// The unit standing at `(x, y)`.
    #[must_use]
    pub fn unit_at(&self, x: i64, y: i64) -> Option<&Unit> {
        let world = self.world.as_ref()?;
        let position = world.field().position(x, y)?;
        world.unit(world.field().unit_at(position)?)
    }

    /// Teams still in the match, in turn order.
    pub fn teams(&self) -> SizedIter<impl Iterator<Item = &Team> + '_> {
        let teams = self
            .active
            .iter()
            .filter_map(move |&id| self.world.as_ref().and_then(|w| w.team(id)));
        SizedIter::with_size(teams, self.active.len())
    }

    /// Look up a team, including eliminated ones.
    #[must_use]
    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.world.as_ref()?.team(id)
    }

    /// Find a team by name, including eliminated ones.
    #[must_use]
    pub fn team_named(&self, name: &str) -> Option<&Team> {
        self.world.as_ref()?.team_named(name)
    }

    /// Team whose turn it is.
    #[must_use]
    pub fn current_team(&self) -> Option<&Team> {
        self.team(self.current_team_id()?)
    }

    /// Winner, once the match ended with one team left.
    #[must_use]
    pub fn winner(&self) -> Option<&Team> {
        self.team(self.winner?)
    }

    /// Bunkers owned by `team`, in the order they were claimed.
    pub fn team_buildings(&self, team: TeamId) -> SizedIter<impl Iterator<Item = &Building> + '_> {
        let ids = self.team(team).map(Team::building_ids).unwrap_or_default();
        let items = ids.iter().filter_map(move |&id| self.building(id));
        SizedIter::with_size(items, ids.len())
    }

    /// Living units of `team`, in creation order.
    pub fn team_units(&self, team: TeamId) -> SizedIter<impl Iterator<Item = &Unit> + '_> {
        let ids = self.team(team).map(Team::unit_ids).unwrap_or_default();
        let items = ids.iter().filter_map(move |&id| self.unit(id));
        SizedIter::with_size(items, ids.len())
    }

    /// Field snapshot, filtered for `viewer` if given.
    #[must_use]
    pub fn snapshot(&self, viewer: Option<TeamId>) -> Snapshot {
        match (self.world.as_ref(), viewer) {
            (Some(world), Some(team)) => world.snapshot_for(team),
            (Some(world), None) => world.snapshot(),
            (None, _) => Snapshot {
                width: 0,
                height: 0,
                cells: Vec::new(),
            },
        }
    }

    /// Hash of the match state, stable across runs of the same commands.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();

        self.phase.hash(&mut hasher);
        self.turn.hash(&mut hasher);
        self.current.hash(&mut hasher);
        self.active.hash(&mut hasher);
        self.winner.hash(&mut hasher);

        if let Some(world) = self.world.as_ref() {
            world.field().width().hash(&mut hasher);
            world.field().height().hash(&mut hasher);
            for building in world.buildings() {
                building.id().hash(&mut hasher);
                building.treasury().hash(&mut hasher);
                building.owner().hash(&mut hasher);
            }
            for unit in world.units() {
                unit.id().hash(&mut hasher);
                unit.color().hash(&mut hasher);
                unit.position().hash(&mut hasher);
                unit.team().hash(&mut hasher);
            }
        }

        hasher.finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
