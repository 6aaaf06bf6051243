//! Text protocol for the interactive interpreter.
//!
//! Input is one command per line: a keyword followed by space-separated
//! arguments. Starting a game reads further lines for bunkers and teams.
//!
//! # Example Session
//!
//! ```text
//! > game 10 10 2 2
//! 2 bunkers:
//! 1 1 10 B1
//! 10 10 10 B2
//! 2 teams:
//! T1 B1
//! T2 B2
//! T1> create red B1
//! red player created in B1
//! T2> move 10 10 north
//! No player in that position.
//! T1> quit
//! Bye.
//! ```

use std::str::FromStr;

use paintball_core::command::Command;
use paintball_core::setup::{BunkerSetup, TeamSetup};
use thiserror::Error;

// ============================================================================
// Output messages
// ============================================================================

/// Fixed lines printed by the interpreter.
#[allow(missing_docs)]
pub mod messages {
    pub const BYE: &str = "Bye.";
    pub const NOT_ENOUGH_ARGS: &str = "ERROR: NOT ENOUGH ARGUMENTS";
    pub const SIZE_NOT_OK: &str = "ERROR: FIELD RESOLUTION IS NOT OK";
    pub const NOT_ENOUGH_TEAMS: &str = "FATAL ERROR: Insufficient number of teams.";
    pub const BUNKERS_LIST: &str = " bunkers:";
    pub const BUNKER_NOT_CREATED: &str = "Bunker not created.";
    pub const TEAMS_LIST: &str = " teams:";
    pub const TEAM_NOT_CREATED: &str = "Team not created.";
    pub const INVALID_COMMAND: &str = "Invalid command.";
    pub const WITHOUT_OWNER: &str = "without owner";
    pub const WITHOUT_BUNKERS: &str = "Without bunkers.";
    pub const COINS_IN_POSITION: &str = "coins in position";
    pub const WITHOUT_PLAYERS: &str = "Without players.";
    pub const PLAYERS_LIST: &str = " players:";
    pub const PLAYER_IN_POSITION: &str = "player in position";
    pub const INVALID_PLAYER_COLOR: &str = "Non-existent player type.";
    pub const INVALID_BUNKER_NAME: &str = "Non-existent bunker.";
    pub const WRONG_TEAM_BUNKER: &str = "Bunker illegally invaded.";
    pub const BUNKER_OCCUPIED: &str = "Bunker not free.";
    pub const NOT_ENOUGH_COINS: &str = "Insufficient coins for recruitment.";
    pub const PLAYER_CREATED: &str = "player created";
    pub const UNEXPECTED_ERROR: &str = "Unexpected error";
    pub const INVALID_POSITION: &str = "Invalid position.";
    pub const INVALID_DIRECTION: &str = "Invalid direction.";
    pub const NO_PLAYER: &str = "No player in that position.";
    pub const INVALID_MOVE: &str = "Invalid move.";
    pub const POSITION_OCCUPIED: &str = "Position occupied.";
    pub const OFF_THE_MAP: &str = "Trying to move off the map.";
    pub const BUNKER_SEIZED: &str = "Bunker seized.";
    pub const WON_FIGHT: &str = "Won the fight.";
    pub const PLAYER_ELIMINATED: &str = "Player eliminated.";
    pub const WON_AND_SEIZED: &str = "Won the fight and bunker seized.";
    pub const PLAYER_NOT_FROM_TEAM: &str = "Unable to move player from the enemy team.";
    pub const WINNER_IS: &str = "Winner is";
    pub const PLAYERS_ELIMINATED: &str = "All players eliminated.";
    pub const REPLAY_VERIFIED: &str = "Replay verified.";
    pub const REPLAY_DIVERGED: &str = "Replay diverged.";

    pub const COMMANDS_NO_GAME: &str = "\
game - Create a new game
help - Show available commands
quit - End program execution
";

    pub const COMMANDS_IN_GAME: &str = "\
game - Create a new game
move - Move a player
create - Create a player in a bunker
attack - Attack with all players of the current team
status - Show the current state of the game
map - Show the map of the current team
bunkers - List the bunkers of the current team, by the order they were seized
players - List the active players of the current team, by the order they were created
replay - Re-run the moves made so far and check they reproduce the game
help - Show available commands
quit - End program execution
";
}

// ============================================================================
// Input parsing
// ============================================================================

/// Why a command's arguments could not be parsed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgError {
    /// Fewer arguments than the command needs.
    #[error("{}", messages::NOT_ENOUGH_ARGS)]
    NotEnough,
    /// An argument that should be a number is not.
    #[error("{}", messages::INVALID_COMMAND)]
    Malformed,
}

/// Command keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// `game <width> <height> <teams> <bunkers>`
    Game,
    /// `move <x> <y> <direction>...`
    Move,
    /// `create <color> <bunker>`
    Create,
    /// `attack`
    Attack,
    /// `status`
    Status,
    /// `map`
    Map,
    /// `bunkers`
    Bunkers,
    /// `players`
    Players,
    /// `replay`
    Replay,
    /// `help`
    Help,
    /// `quit`
    Quit,
}

impl FromStr for Keyword {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "game" => Self::Game,
            "move" => Self::Move,
            "create" => Self::Create,
            "attack" => Self::Attack,
            "status" => Self::Status,
            "map" => Self::Map,
            "bunkers" => Self::Bunkers,
            "players" => Self::Players,
            "replay" => Self::Replay,
            "help" => Self::Help,
            "quit" => Self::Quit,
            _ => return Err(()),
        })
    }
}

/// Split a line into its keyword and the rest.
///
/// Returns `None` for a blank line. An unknown keyword is `Some((None, _))`.
#[must_use]
pub fn split_command(line: &str) -> Option<(Option<Keyword>, &str)> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (word, args) = line.split_once(' ').unwrap_or((line, ""));
    if word.is_empty() {
        return None;
    }
    Some((word.parse().ok(), args))
}

fn number(token: &str) -> Result<i64, ArgError> {
    token.trim().parse().map_err(|_| ArgError::Malformed)
}

/// Arguments of `game`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameArgs {
    /// Field width.
    pub width: i64,
    /// Field height.
    pub height: i64,
    /// Team lines to read.
    pub teams: i64,
    /// Bunker lines to read.
    pub bunkers: i64,
}

/// Parse `<width> <height> <teams> <bunkers>`.
pub fn parse_game_args(args: &str) -> Result<GameArgs, ArgError> {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    let [width, height, teams, bunkers, ..] = tokens[..] else {
        return Err(ArgError::NotEnough);
    };
    Ok(GameArgs {
        width: number(width)?,
        height: number(height)?,
        teams: number(teams)?,
        bunkers: number(bunkers)?,
    })
}

/// Parse `<color> <bunker name>` into a create command.
pub fn parse_create_args(args: &str) -> Result<Command, ArgError> {
    let (color, building) = args.split_once(' ').ok_or(ArgError::NotEnough)?;
    Ok(Command::Create {
        color: color.to_string(),
        building: building.to_string(),
    })
}

/// Parse `<x> <y> <direction>...` into a move command.
pub fn parse_move_args(args: &str) -> Result<Command, ArgError> {
    let mut tokens = args.split_whitespace();
    let (Some(x), Some(y)) = (tokens.next(), tokens.next()) else {
        return Err(ArgError::NotEnough);
    };
    Ok(Command::Move {
        x: number(x)?,
        y: number(y)?,
        directions: tokens.map(str::to_string).collect(),
    })
}

/// Parse a bunker line, `<x> <y> <treasury> <name>`. The name may contain spaces.
#[must_use]
pub fn parse_bunker_line(line: &str) -> Option<BunkerSetup> {
    let mut parts = line.trim_end_matches(['\r', '\n']).splitn(4, ' ');
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    let treasury = parts.next()?.parse().ok()?;
    let name = parts.next()?.to_string();
    Some(BunkerSetup { x, y, treasury, name })
}

/// Parse a team line, `<team name> <bunker name>`.
#[must_use]
pub fn parse_team_line(line: &str) -> Option<TeamSetup> {
    let (name, bunker) = line.trim_end_matches(['\r', '\n']).split_once(' ')?;
    Some(TeamSetup {
        name: name.to_string(),
        bunker: bunker.to_string(),
    })
}

// ============================================================================
// Tests
// ============================================================================
