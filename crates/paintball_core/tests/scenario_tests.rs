//! End-to-end match scenarios.
//!
//! Each test builds a match through the public API and drives it with
//! commands, checking the responses and the resulting world.

use paintball_core::pattern::attack_pattern;
use paintball_core::prelude::*;
use paintball_test_utils::fixtures::{attack, create, play, step, two_corner_game};

fn unit_position(game: &Game, x: i64, y: i64) -> Option<(UnitColor, &str)> {
    let unit = game.unit_at(x, y)?;
    let team = game.team(unit.team())?;
    Some((unit.color(), team.name()))
}

// ============================================================================
// Creation
// ============================================================================

#[test]
fn test_create_red_spends_four_coins() {
    let mut game = two_corner_game();

    let response = game.create_unit("red", "B1").unwrap();
    assert_eq!(response.status, GameStatus::Ok);
    assert!(matches!(response.result, Some(CreateStatus::Created(_))));

    // Income is paid at the end of the turn that spent the coins.
    let b1 = game.building_named("B1").unwrap();
    assert_eq!(b1.treasury(), 10 - 4 + 1);
    assert_eq!(unit_position(&game, 1, 1), Some((UnitColor::Red, "T1")));

    let t1 = game.team_named("T1").unwrap().id();
    assert_eq!(game.team_units(t1).size(), 1);
}

#[test]
fn test_create_in_occupied_bunker() {
    let mut game = two_corner_game();
    play(&mut game, &[create("blue", "B1"), attack()]);

    let response = game.create_unit("green", "B1").unwrap();
    assert_eq!(response.result, Some(CreateStatus::Occupied));
    assert_eq!(game.unit_at(1, 1).map(Unit::color), Some(UnitColor::Blue));
}

#[test]
fn test_create_without_funds() {
    let mut game = Game::new();
    game.configure_field(10, 10).unwrap();
    game.add_building(1, 1, 3, "poor").unwrap();
    game.add_building(10, 10, 10, "rich").unwrap();
    game.add_team("T1", "poor").unwrap();
    game.add_team("T2", "rich").unwrap();
    game.start().unwrap();

    let response = game.create_unit("red", "poor").unwrap();
    assert_eq!(response.result, Some(CreateStatus::InsufficientFunds));
    assert_eq!(game.building_named("poor").unwrap().treasury(), 4);
    assert!(game.unit_at(1, 1).is_none());
}

#[test]
fn test_create_in_enemy_bunker() {
    let mut game = two_corner_game();
    let response = game.create_unit("red", "B2").unwrap();
    assert_eq!(response.status, GameStatus::WrongTeam);
    assert_eq!(game.turn(), 1);
    assert_eq!(game.current_team().map(Team::name), Some("T2"));
}

// ============================================================================
// Movement
// ============================================================================

#[test]
fn test_red_moves_two_steps_north() {
    let mut game = Game::new();
    game.configure_field(10, 10).unwrap();
    game.add_building(5, 5, 10, "mid").unwrap();
    game.add_building(10, 10, 10, "far").unwrap();
    game.add_team("T1", "mid").unwrap();
    game.add_team("T2", "far").unwrap();
    game.start().unwrap();
    play(&mut game, &[create("red", "mid"), attack()]);

    let response = game.move_unit_at(5, 5, &["north", "north"]).unwrap();
    assert_eq!(response.status, GameStatus::Ok);

    let actions = response.result.unwrap();
    assert_eq!(actions.len(), 2);
    assert!(actions.iter().all(|a| a.status == ActionStatus::Nothing));
    assert_eq!(actions[1].location, Position::new(5, 3));
    assert!(game.unit_at(5, 5).is_none());
    assert_eq!(unit_position(&game, 5, 3), Some((UnitColor::Red, "T1")));
}

#[test]
fn test_blue_rejects_two_directions() {
    let mut game = two_corner_game();
    play(&mut game, &[create("blue", "B1"), attack()]);
    let before = game.unit_at(1, 1).map(Unit::id);

    let response = game.move_unit_at(1, 1, &["south", "east"]).unwrap();
    let actions = response.result.unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].status, ActionStatus::InvalidMove);

    assert_eq!(game.unit_at(1, 1).map(Unit::id), before);
    assert_eq!(game.turn(), 3);
    assert_eq!(game.current_team().map(Team::name), Some("T2"));
}

#[test]
fn test_step_into_friend_is_blocked() {
    let mut game = Game::new();
    game.configure_field(10, 10).unwrap();
    game.add_building(1, 1, 10, "a").unwrap();
    game.add_building(2, 1, 10, "b").unwrap();
    game.add_building(10, 10, 10, "c").unwrap();
    game.add_team("T1", "a").unwrap();
    game.add_team("T2", "c").unwrap();
    game.start().unwrap();

    // "b" is unowned, so seize it first with a green from "a".
    play(
        &mut game,
        &[
            create("green", "a"),
            attack(),
            step(1, 1, &["east"]),
            attack(),
            create("blue", "a"),
            attack(),
        ],
    );
    assert_eq!(
        game.building_named("b").and_then(Building::owner),
        game.team_named("T1").map(Team::id)
    );

    let before = game.snapshot(None);
    let actions = game.move_unit_at(1, 1, &["east"]).unwrap().result.unwrap();
    assert_eq!(actions[0].status, ActionStatus::PositionOccupied);
    assert_eq!(actions[0].location, Position::new(1, 1));
    assert_eq!(game.snapshot(None), before);
}

#[test]
fn test_move_off_the_map() {
    let mut game = two_corner_game();
    play(&mut game, &[create("red", "B1"), attack()]);

    let actions = game
        .move_unit_at(1, 1, &["west", "south"])
        .unwrap()
        .result
        .unwrap();
    assert_eq!(actions[0].status, ActionStatus::OffTheMap);
    assert_eq!(actions[1].status, ActionStatus::Nothing);
    assert_eq!(unit_position(&game, 1, 2), Some((UnitColor::Red, "T1")));
}

#[test]
fn test_move_rejections_consume_the_turn() {
    let mut game = two_corner_game();

    let outside = game.move_unit_at(0, 5, &["north"]).unwrap();
    assert_eq!(outside.status, GameStatus::InvalidPosition);
    let empty = game.move_unit_at(5, 5, &["north"]).unwrap();
    assert_eq!(empty.status, GameStatus::NoUnit);

    assert_eq!(game.turn(), 2);
    assert_eq!(game.current_team().map(Team::name), Some("T1"));
}

// ============================================================================
// Attacks
// ============================================================================

#[test]
fn test_green_sweeps_diagonals() {
    let cells = attack_pattern(UnitColor::Green, Position::new(3, 3), 10, 10);
    assert_eq!(cells.len(), 2 + 2 + 2 + 7);

    let mut unique = cells.clone();
    unique.sort_by_key(|p| (p.x, p.y));
    unique.dedup();
    assert_eq!(unique.len(), cells.len());
    assert!(cells
        .iter()
        .all(|p| (i64::from(p.x) - 3).abs() == (i64::from(p.y) - 3).abs()));
}

#[test]
fn test_losing_attacker_stops_sweeping() {
    let mut game = Game::new();
    game.configure_field(10, 10).unwrap();
    game.add_building(1, 1, 10, "home").unwrap();
    game.add_building(3, 1, 10, "away").unwrap();
    game.add_building(10, 10, 10, "spare").unwrap();
    game.add_team("T1", "home").unwrap();
    game.add_team("T2", "away").unwrap();
    game.add_team("T3", "spare").unwrap();
    game.start().unwrap();

    // Blue attacks row 1 and meets the red at (3, 1) first.
    play(&mut game, &[create("blue", "home"), create("red", "away"), attack()]);
    let response = game.current_team_attacks().unwrap();

    assert_eq!(response.status, GameStatus::Ok);
    assert!(game.unit_at(1, 1).is_none());
    assert_eq!(unit_position(&game, 3, 1), Some((UnitColor::Red, "T2")));
    // Home still belongs to T1, so the team survives.
    assert_eq!(game.teams().size(), 3);
}

// ============================================================================
// Elimination
// ============================================================================

#[test]
fn test_last_unit_lost_ends_the_match() {
    let mut game = Game::new();
    game.configure_field(10, 10).unwrap();
    game.add_building(1, 1, 10, "B1").unwrap();
    game.add_building(1, 3, 10, "B2").unwrap();
    game.add_team("T1", "B1").unwrap();
    game.add_team("T2", "B2").unwrap();
    game.start().unwrap();
    play(&mut game, &[create("red", "B1"), create("blue", "B2")]);

    let response = game.move_unit_at(1, 1, &["south", "south"]).unwrap();
    assert_eq!(response.status, GameStatus::GameOver);
    let actions = response.result.unwrap();
    assert_eq!(actions[1].status, ActionStatus::WonAndSeized);

    let winner = game.team_named("T1").map(Team::id);
    assert_eq!(response.winner, winner);
    assert_eq!(game.winner().map(Team::name), Some("T1"));
    assert_eq!(game.phase(), Phase::Ended);
    assert!(game.teams().all(|t| t.name() != "T2"));
    assert!(matches!(game.current_team_attacks(), Err(GameError::WrongPhase { .. })));
}

#[test]
fn test_stop_ends_without_winner() {
    let mut game = two_corner_game();
    play(&mut game, &[create("green", "B1"), create("blue", "B2")]);

    game.stop();
    assert_eq!(game.phase(), Phase::Ended);
    assert!(game.winner().is_none());
    assert!(game.create_unit("red", "B1").is_err());
}

#[test]
fn test_three_way_rotation_skips_eliminated() {
    let mut game = Game::new();
    game.configure_field(10, 10).unwrap();
    game.add_building(1, 1, 10, "a").unwrap();
    game.add_building(1, 3, 10, "b").unwrap();
    game.add_building(10, 10, 10, "c").unwrap();
    game.add_team("A", "a").unwrap();
    game.add_team("B", "b").unwrap();
    game.add_team("C", "c").unwrap();
    game.start().unwrap();

    play(
        &mut game,
        &[create("red", "a"), create("blue", "b"), create("green", "c")],
    );
    let response = game.move_unit_at(1, 1, &["south", "south"]).unwrap();
    assert_eq!(response.status, GameStatus::Ok);
    assert!(game.teams().all(|t| t.name() != "B"));
    assert_eq!(game.current_team().map(Team::name), Some("C"));
    assert_eq!(game.teams().size(), 2);
}

/// Bunkers "a" at (1,1) and "b" at (1,3), plus "c" in the far corner when
/// `third` is set. Teams A, B (and C) own them in that order.
fn stranded_blue_game(third: bool) -> Game {
    let mut game = Game::new();
    game.configure_field(10, 10).unwrap();
    game.add_building(1, 1, 10, "a").unwrap();
    game.add_building(1, 3, 10, "b").unwrap();
    game.add_team("A", "a").unwrap();
    game.add_team("B", "b").unwrap();
    if third {
        game.add_building(10, 10, 10, "c").unwrap();
        game.add_team("C", "c").unwrap();
    }
    game.start().unwrap();
    game
}

/// Leave B with a single blue at (2,3) and no bunker, next to A's red
/// standing on the seized bunker at (1,3). B is the next team to act.
fn strand_blue(game: &mut Game, third: bool) {
    let c_turn = |command| if third { vec![command] } else { Vec::new() };

    let mut commands = vec![create("red", "a"), create("blue", "b")];
    commands.extend(c_turn(create("blue", "c")));
    commands.extend([step(1, 1, &["east"]), step(1, 3, &["east"])]);
    commands.extend(c_turn(step(10, 10, &["west"])));
    commands.push(step(2, 1, &["west", "south", "south"]));
    play(game, &commands);

    let b = game.team_named("B").map(Team::id);
    assert_eq!(
        game.building_named("b").and_then(Building::owner),
        game.team_named("A").map(Team::id)
    );
    assert_eq!(unit_position(game, 1, 3), Some((UnitColor::Red, "A")));
    assert_eq!(unit_position(game, 2, 3), Some((UnitColor::Blue, "B")));
    assert_eq!(game.current_team().map(Team::id), b);
}

#[test]
fn test_attacking_team_eliminates_itself() {
    let mut game = stranded_blue_game(true);
    strand_blue(&mut game, true);

    // The blue sweeps (3,3) and then meets the red at (1,3).
    let response = game.current_team_attacks().unwrap();
    assert_eq!(response.status, GameStatus::TeamEliminated);
    assert!(response.winner.is_none());
    assert!(game.unit_at(2, 3).is_none());
    assert_eq!(unit_position(&game, 1, 3), Some((UnitColor::Red, "A")));

    assert!(game.teams().all(|t| t.name() != "B"));
    assert_eq!(game.teams().size(), 2);
    assert_eq!(game.phase(), Phase::InProgress);
    assert_eq!(game.current_team().map(Team::name), Some("C"));
}

#[test]
fn test_attacking_team_eliminates_itself_and_ends_the_match() {
    let mut game = stranded_blue_game(false);
    strand_blue(&mut game, false);

    let response = game.current_team_attacks().unwrap();
    assert_eq!(response.status, GameStatus::TeamEliminatedAndGameOver);
    assert!(response.status.is_game_over());
    assert_eq!(response.winner, game.team_named("A").map(Team::id));
    assert_eq!(game.winner().map(Team::name), Some("A"));
    assert_eq!(game.phase(), Phase::Ended);
    assert_eq!(game.teams().size(), 1);
}
