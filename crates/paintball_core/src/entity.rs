//! Entity identifiers and the capability shared by buildings and units.
//!
//! Buildings, units and teams live in arenas owned by the
//! [`World`](crate::world::World). They refer to each other through these
//! typed indices instead of references, so cells never point back into the
//! entities they hold.

use serde::{Deserialize, Serialize};

use crate::geometry::Position;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Arena slot of this id.
            #[must_use]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

arena_id!(
    /// Identifier of a unit (player piece).
    UnitId
);
arena_id!(
    /// Identifier of a building (bunker).
    BuildingId
);
arena_id!(
    /// Identifier of a team.
    TeamId
);

/// Capability shared by everything that stands on the field and can be owned.
///
/// Location and owner are only mutated by the [`World`](crate::world::World),
/// which keeps the cell and the entity in agreement.
pub trait Entity {
    /// Cell this entity stands on.
    fn position(&self) -> Position;

    /// Owning team, `None` for a bunker nobody has claimed yet.
    fn owner(&self) -> Option<TeamId>;

    /// Whether `team` owns this entity.
    fn is_owned_by(&self, team: TeamId) -> bool {
        self.owner() == Some(team)
    }
}
