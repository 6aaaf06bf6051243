//! Test fixtures and helpers.
//!
//! Pre-built match setups and command shorthands for consistent testing.

use paintball_core::command::Command;
use paintball_core::game::Game;
use paintball_core::setup::MatchSetup;

/// Two teams on a 10x10 field, bunkers in opposite corners with 10 coins.
///
/// `T1` owns `B1` at (1, 1) and plays first; `T2` owns `B2` at (10, 10).
#[must_use]
pub fn two_corner_setup() -> MatchSetup {
    MatchSetup::new(10, 10)
        .bunker(1, 1, 10, "B1")
        .bunker(10, 10, 10, "B2")
        .team("T1", "B1")
        .team("T2", "B2")
}

/// Three teams on a 12x12 field, plus an unclaimed bunker in the middle.
#[must_use]
pub fn three_team_setup() -> MatchSetup {
    MatchSetup::new(12, 12)
        .bunker(1, 1, 20, "north")
        .bunker(12, 1, 20, "east")
        .bunker(1, 12, 20, "west")
        .bunker(6, 6, 5, "centre")
        .team("A", "north")
        .team("B", "east")
        .team("C", "west")
}

/// Start the [`two_corner_setup`] match.
///
/// # Panics
///
/// Panics if the fixture itself is invalid.
#[must_use]
pub fn two_corner_game() -> Game {
    two_corner_setup().build().expect("fixture setup is valid")
}

/// Parse a setup written in RON.
///
/// # Panics
///
/// Panics on malformed input, naming the parse error.
#[must_use]
pub fn setup_from_ron(source: &str) -> MatchSetup {
    ron::from_str(source).unwrap_or_else(|e| panic!("bad setup fixture: {e}"))
}

/// `create <color> <building>`.
#[must_use]
pub fn create(color: &str, building: &str) -> Command {
    Command::Create {
        color: color.to_string(),
        building: building.to_string(),
    }
}

/// `move <x> <y> <directions...>`.
#[must_use]
pub fn step(x: i64, y: i64, directions: &[&str]) -> Command {
    Command::Move {
        x,
        y,
        directions: directions.iter().map(|d| (*d).to_string()).collect(),
    }
}

/// `attack`.
#[must_use]
pub const fn attack() -> Command {
    Command::Attack
}

/// Apply commands in order, ignoring responses.
///
/// Stops at the first command the game refuses, i.e. once the match is over.
pub fn play(game: &mut Game, commands: &[Command]) {
    for command in commands {
        if game.apply(command).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_start() {
        assert!(two_corner_game().in_progress());
        let game = three_team_setup().build().unwrap();
        assert_eq!(game.teams().size(), 3);
        assert_eq!(game.buildings().size(), 4);
    }

    #[test]
    fn test_setup_from_ron() {
        let setup = setup_from_ron(
            r#"(
                width: 10,
                height: 10,
                bunkers: [
                    (x: 1, y: 1, treasury: 10, name: "B1"),
                    (x: 10, y: 10, treasury: 10, name: "B2"),
                ],
                teams: [
                    (name: "T1", bunker: "B1"),
                    (name: "T2", bunker: "B2"),
                ],
            )"#,
        );
        assert_eq!(setup, two_corner_setup());
    }
}
