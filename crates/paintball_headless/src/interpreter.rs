//! Interactive session driving a match from line-oriented input.
//!
//! A [`Session`] reads commands from any [`BufRead`] and writes responses to
//! any [`Write`], so the binary wires it to stdin/stdout and tests feed it
//! strings. Every command accepted by the engine is recorded; `replay`
//! re-runs the recording and checks it lands on the live state.

use std::io::{self, BufRead, Write};

use paintball_core::building::CreateStatus;
use paintball_core::combat::{Action, ActionStatus};
use paintball_core::command::{Command, Outcome};
use paintball_core::entity::Entity;
use paintball_core::field::Snapshot;
use paintball_core::game::{Game, GameResponse, GameStatus};
use paintball_core::replay::{Recorder, Replay};
use paintball_core::setup::MatchSetup;

use crate::error::HeadlessError;
use crate::protocol::{
    messages, parse_bunker_line, parse_create_args, parse_game_args, parse_move_args,
    parse_team_line, split_command, Keyword,
};
use crate::render::render_map;

/// An interpreter session.
pub struct Session<R, W> {
    input: R,
    output: W,
    recorder: Option<Recorder>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session with no match running.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            recorder: None,
        }
    }

    /// Start the session with a match already set up.
    pub fn with_setup(mut self, setup: MatchSetup) -> Result<Self, HeadlessError> {
        self.recorder = Some(Recorder::start(setup)?);
        Ok(self)
    }

    /// The running match, if any.
    pub fn game(&self) -> Option<&Game> {
        self.recorder.as_ref().map(Recorder::game)
    }

    /// Consume the session, returning its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Read and execute commands until `quit` or end of input.
    pub fn run(&mut self) -> Result<(), HeadlessError> {
        let mut show_prompt = true;
        loop {
            if show_prompt {
                self.prompt()?;
            }
            let Some(line) = self.read_line()? else {
                tracing::debug!("End of input");
                break;
            };
            let Some((keyword, args)) = split_command(&line) else {
                show_prompt = false;
                continue;
            };
            show_prompt = true;
            tracing::debug!(command = %line, "Input");

            match keyword {
                Some(Keyword::Quit) => {
                    self.say(messages::BYE)?;
                    self.recorder = None;
                    break;
                }
                Some(Keyword::Help) => self.help()?,
                Some(Keyword::Game) => self.new_game(args)?,
                Some(keyword) if self.recorder.is_some() => self.in_game(keyword, args)?,
                _ => self.say(messages::INVALID_COMMAND)?,
            }
        }
        Ok(())
    }

    fn in_game(&mut self, keyword: Keyword, args: &str) -> io::Result<()> {
        match keyword {
            Keyword::Status => self.status(),
            Keyword::Map => self.map(),
            Keyword::Bunkers => self.bunkers(),
            Keyword::Players => self.players(),
            Keyword::Replay => self.replay(),
            Keyword::Create => match parse_create_args(args) {
                Ok(command) => self.play(command),
                Err(error) => self.say(error),
            },
            Keyword::Move => match parse_move_args(args) {
                Ok(command) => self.play(command),
                Err(error) => self.say(error),
            },
            Keyword::Attack => self.play(Command::Attack),
            Keyword::Game | Keyword::Help | Keyword::Quit => Ok(()),
        }
    }

    // ------------------------------------------------------------------------
    // IO helpers
    // ------------------------------------------------------------------------

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn say(&mut self, text: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    fn prompt(&mut self) -> io::Result<()> {
        let prefix = self
            .game()
            .and_then(Game::current_team)
            .map(|t| t.name().to_string())
            .unwrap_or_default();
        write!(self.output, "{prefix}> ")?;
        self.output.flush()
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    fn help(&mut self) -> io::Result<()> {
        let text = if self.recorder.is_some() {
            messages::COMMANDS_IN_GAME
        } else {
            messages::COMMANDS_NO_GAME
        };
        write!(self.output, "{text}")
    }

    /// `game <width> <height> <teams> <bunkers>`, followed by the bunker and
    /// team lines. Replaces any running match, even if setup fails.
    fn new_game(&mut self, args: &str) -> io::Result<()> {
        self.recorder = None;
        let args = match parse_game_args(args) {
            Ok(args) => args,
            Err(error) => return self.say(error),
        };

        let mut game = Game::new();
        if game.configure_field(args.width, args.height).is_err() {
            return self.say(messages::SIZE_NOT_OK);
        }
        if args.teams < 2 {
            return self.say(messages::NOT_ENOUGH_TEAMS);
        }
        let mut accepted = MatchSetup::new(args.width, args.height);

        self.say(format_args!("{}{}", args.bunkers, messages::BUNKERS_LIST))?;
        for _ in 0..args.bunkers.max(0) {
            let Some(line) = self.read_line()? else {
                break;
            };
            let added = parse_bunker_line(&line).filter(|b| {
                game.add_building(b.x, b.y, b.treasury, &b.name)
                    .map_err(|error| tracing::debug!(%error, "Bunker rejected"))
                    .is_ok()
            });
            match added {
                Some(bunker) => accepted.bunkers.push(bunker),
                None => self.say(messages::BUNKER_NOT_CREATED)?,
            }
        }

        self.say(format_args!("{}{}", args.teams, messages::TEAMS_LIST))?;
        for _ in 0..args.teams {
            let Some(line) = self.read_line()? else {
                break;
            };
            let added = parse_team_line(&line).filter(|t| {
                game.add_team(&t.name, &t.bunker)
                    .map_err(|error| tracing::debug!(%error, "Team rejected"))
                    .is_ok()
            });
            match added {
                Some(team) => accepted.teams.push(team),
                None => self.say(messages::TEAM_NOT_CREATED)?,
            }
        }

        if game.start().is_err() {
            return self.say(messages::NOT_ENOUGH_TEAMS);
        }
        match Recorder::start(accepted) {
            Ok(recorder) => self.recorder = Some(recorder),
            Err(error) => {
                tracing::error!(%error, "Accepted setup failed to rebuild");
                self.say(messages::UNEXPECTED_ERROR)?;
            }
        }
        Ok(())
    }

    fn status(&mut self) -> io::Result<()> {
        let Some(game) = self.game() else {
            return self.say(messages::INVALID_COMMAND);
        };
        let mut lines = vec![
            format!("{} {}", game.width(), game.height()),
            format!("{}{}", game.buildings().size(), messages::BUNKERS_LIST),
        ];
        for building in game.buildings() {
            let owner = building
                .owner()
                .and_then(|t| game.team(t))
                .map_or(messages::WITHOUT_OWNER, |t| t.name());
            lines.push(format!("{} ({owner})", building.name()));
        }
        let teams = game.teams();
        lines.push(format!("{}{}", teams.size(), messages::TEAMS_LIST));
        lines.push(teams.map(|t| t.name()).collect::<Vec<_>>().join("; "));

        for line in lines {
            self.say(line)?;
        }
        Ok(())
    }

    fn map(&mut self) -> io::Result<()> {
        let Some(game) = self.game() else {
            return self.say(messages::INVALID_COMMAND);
        };
        let viewer = game.current_team().map(|t| t.id());
        let map = render_map(&game.snapshot(viewer));
        write!(self.output, "{map}")
    }

    fn bunkers(&mut self) -> io::Result<()> {
        let Some(game) = self.game() else {
            return self.say(messages::INVALID_COMMAND);
        };
        let Some(team) = game.current_team().map(|t| t.id()) else {
            return self.say(messages::INVALID_COMMAND);
        };
        let bunkers = game.team_buildings(team);
        if bunkers.size() == 0 {
            drop(bunkers);
            return self.say(messages::WITHOUT_BUNKERS);
        }

        let mut lines = vec![format!("{}{}", bunkers.size(), messages::BUNKERS_LIST)];
        for bunker in bunkers {
            let at = bunker.position();
            lines.push(format!(
                "{} with {} {} {at}",
                bunker.name(),
                bunker.treasury(),
                messages::COINS_IN_POSITION
            ));
        }
        for line in lines {
            self.say(line)?;
        }
        Ok(())
    }

    fn players(&mut self) -> io::Result<()> {
        let Some(game) = self.game() else {
            return self.say(messages::INVALID_COMMAND);
        };
        let Some(team) = game.current_team().map(|t| t.id()) else {
            return self.say(messages::INVALID_COMMAND);
        };
        let units = game.team_units(team);
        if units.size() == 0 {
            drop(units);
            return self.say(messages::WITHOUT_PLAYERS);
        }

        let mut lines = vec![format!("{}{}", units.size(), messages::PLAYERS_LIST)];
        for unit in units {
            lines.push(format!(
                "{} {} {}",
                unit.color(),
                messages::PLAYER_IN_POSITION,
                unit.position()
            ));
        }
        for line in lines {
            self.say(line)?;
        }
        Ok(())
    }

    fn replay(&mut self) -> io::Result<()> {
        let Some(recorder) = self.recorder.clone() else {
            return self.say(messages::INVALID_COMMAND);
        };
        let replay = recorder.finish();
        let verified = replay
            .to_bytes()
            .and_then(|bytes| Replay::from_bytes(&bytes))
            .and_then(|decoded| decoded.verify());
        match verified {
            Ok(true) => {
                tracing::info!(commands = replay.command_count(), "Replay verified");
                self.say(messages::REPLAY_VERIFIED)
            }
            Ok(false) => self.say(messages::REPLAY_DIVERGED),
            Err(error) => {
                tracing::warn!(%error, "Replay failed");
                self.say(messages::UNEXPECTED_ERROR)
            }
        }
    }

    /// Run a turn-consuming command and report the outcome.
    fn play(&mut self, command: Command) -> io::Result<()> {
        let Some(recorder) = self.recorder.as_mut() else {
            return self.say(messages::INVALID_COMMAND);
        };
        let outcome = match recorder.apply(command.clone()) {
            Ok(outcome) => outcome,
            Err(error) => {
                tracing::warn!(%error, "Command refused");
                return self.say(messages::INVALID_COMMAND);
            }
        };

        let (lines, winner) = {
            let game = recorder.game();
            let winner = game.winner().map(|t| t.name().to_string());
            let lines = match (&command, &outcome) {
                (Command::Create { color, building }, Outcome::Created(r)) => {
                    create_lines(color, building, r)
                }
                (_, Outcome::Moved(r)) => move_lines(r),
                (_, Outcome::Attacked(r)) => attack_lines(r),
                _ => vec![messages::UNEXPECTED_ERROR.to_string()],
            };
            (lines, winner)
        };

        for line in lines {
            self.say(line)?;
        }
        if outcome.status().is_game_over() {
            if let Some(name) = winner {
                self.say(format_args!("{} {name}.", messages::WINNER_IS))?;
            }
            tracing::info!("Match over, returning to the lobby");
            self.recorder = None;
        }
        Ok(())
    }
}

fn create_lines(color: &str, building: &str, response: &GameResponse<CreateStatus>) -> Vec<String> {
    let line = match (response.status, response.result) {
        (GameStatus::Ok, Some(CreateStatus::Created(_))) => {
            format!("{color} {} in {building}", messages::PLAYER_CREATED)
        }
        (GameStatus::Ok, Some(CreateStatus::InsufficientFunds)) => messages::NOT_ENOUGH_COINS.to_string(),
        (GameStatus::Ok, Some(CreateStatus::Occupied)) => messages::BUNKER_OCCUPIED.to_string(),
        (GameStatus::InvalidColor, _) => messages::INVALID_PLAYER_COLOR.to_string(),
        (GameStatus::InvalidBuilding, _) => messages::INVALID_BUNKER_NAME.to_string(),
        (GameStatus::WrongTeam, _) => messages::WRONG_TEAM_BUNKER.to_string(),
        _ => messages::UNEXPECTED_ERROR.to_string(),
    };
    vec![line]
}

fn move_lines(response: &GameResponse<Vec<Action>>) -> Vec<String> {
    match response.status {
        GameStatus::InvalidPosition => vec![messages::INVALID_POSITION.to_string()],
        GameStatus::NoUnit => vec![messages::NO_PLAYER.to_string()],
        GameStatus::WrongTeam => vec![messages::PLAYER_NOT_FROM_TEAM.to_string()],
        GameStatus::Ok | GameStatus::GameOver => response
            .result
            .iter()
            .flatten()
            .flat_map(action_lines)
            .collect(),
        _ => vec![messages::UNEXPECTED_ERROR.to_string()],
    }
}

fn action_lines(action: &Action) -> Vec<String> {
    let position = format!(
        "{} {} {}",
        action.color,
        messages::PLAYER_IN_POSITION,
        action.location
    );
    let headline = match action.status {
        ActionStatus::InvalidDirection => return vec![messages::INVALID_DIRECTION.to_string()],
        ActionStatus::OffTheMap => return vec![messages::OFF_THE_MAP.to_string()],
        ActionStatus::PositionOccupied => return vec![messages::POSITION_OCCUPIED.to_string()],
        ActionStatus::PlayerEliminated => return vec![messages::PLAYER_ELIMINATED.to_string()],
        ActionStatus::InvalidMove => return vec![messages::INVALID_MOVE.to_string()],
        ActionStatus::Nothing => return vec![position],
        ActionStatus::BunkerSeized => messages::BUNKER_SEIZED,
        ActionStatus::WonFight => messages::WON_FIGHT,
        ActionStatus::WonAndSeized => messages::WON_AND_SEIZED,
        ActionStatus::Survived => return vec![messages::UNEXPECTED_ERROR.to_string()],
    };
    vec![headline.to_string(), position]
}

fn attack_lines(response: &GameResponse<Snapshot>) -> Vec<String> {
    let map = || {
        response
            .result
            .as_ref()
            .map(|s| render_map(s).lines().map(str::to_string).collect())
            .unwrap_or_default()
    };
    match response.status {
        GameStatus::Ok | GameStatus::GameOver => map(),
        GameStatus::TeamEliminated | GameStatus::TeamEliminatedAndGameOver => {
            vec![messages::PLAYERS_ELIMINATED.to_string()]
        }
        _ => vec![messages::UNEXPECTED_ERROR.to_string()],
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use paintball_test_utils::fixtures::two_corner_setup;

    const TWO_CORNERS: &str = "game 10 10 2 2\n1 1 10 B1\n10 10 10 B2\nT1 B1\nT2 B2\n";

    fn transcript(input: &str) -> String {
        let mut session = Session::new(input.as_bytes(), Vec::new());
        session.run().unwrap();
        String::from_utf8(session.into_output()).unwrap()
    }

    fn transcript_with(setup: MatchSetup, input: &str) -> String {
        let mut session = Session::new(input.as_bytes(), Vec::new())
            .with_setup(setup)
            .unwrap();
        session.run().unwrap();
        String::from_utf8(session.into_output()).unwrap()
    }

    #[test]
    fn test_help_and_quit_without_game() {
        let out = transcript("help\nquit\n");
        assert_eq!(out, format!("> {}> Bye.\n", messages::COMMANDS_NO_GAME));
    }

    #[test]
    fn test_commands_need_a_game() {
        let out = transcript("status\nattack\ndance\nquit\n");
        assert_eq!(
            out,
            "> Invalid command.\n> Invalid command.\n> Invalid command.\n> Bye.\n"
        );
    }

    #[test]
    fn test_blank_line_suppresses_prompt() {
        let out = transcript("\n\nquit\n");
        assert_eq!(out, "> Bye.\n");
    }

    #[test]
    fn test_new_game_setup() {
        let out = transcript(&format!("{TWO_CORNERS}status\nquit\n"));
        let expected = "\
> 2 bunkers:
2 teams:
T1> 10 10
2 bunkers:
B1 (T1)
B2 (T2)
2 teams:
T1; T2
T1> Bye.
";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_new_game_rejections() {
        let out = transcript("game 5 5 2 2\ngame 10 10 1 0\ngame 10 10\nquit\n");
        assert_eq!(
            out,
            "> ERROR: FIELD RESOLUTION IS NOT OK\n\
             > FATAL ERROR: Insufficient number of teams.\n\
             > ERROR: NOT ENOUGH ARGUMENTS\n\
             > Bye.\n"
        );
    }

    #[test]
    fn test_new_game_rejects_field_too_large_to_allocate() {
        let out = transcript("game 4294967295 4294967295 2 2\nhelp\nquit\n");
        assert_eq!(
            out,
            format!(
                "> ERROR: FIELD RESOLUTION IS NOT OK\n> {}> Bye.\n",
                messages::COMMANDS_NO_GAME
            )
        );
    }

    #[test]
    fn test_new_game_reports_bad_entries() {
        let input = "game 10 10 2 3\n1 1 10 B1\n1 1 5 dup-cell\n10 10 0 broke\nT1 B1\nT2 B1\nquit\n";
        let out = transcript(input);
        assert_eq!(
            out,
            "> 3 bunkers:\n\
             Bunker not created.\n\
             Bunker not created.\n\
             2 teams:\n\
             Team not created.\n\
             FATAL ERROR: Insufficient number of teams.\n\
             > Bye.\n"
        );
    }

    #[test]
    fn test_create_and_list() {
        let out = transcript_with(
            two_corner_setup(),
            "create red B1\ncreate purple B2\nbunkers\nplayers\nquit\n",
        );
        let expected = "\
T1> red player created in B1
T2> Non-existent player type.
T1> 1 bunkers:
B1 with 8 coins in position (1, 1)
T1> 1 players:
red player in position (1, 1)
T1> Bye.
";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_create_failures() {
        let out = transcript_with(
            two_corner_setup(),
            "create red B2\ncreate red nowhere\ncreate red\nquit\n",
        );
        assert_eq!(
            out,
            "T1> Bunker illegally invaded.\n\
             T2> Non-existent bunker.\n\
             T1> ERROR: NOT ENOUGH ARGUMENTS\n\
             T1> Bye.\n"
        );
    }

    #[test]
    fn test_move_reports_each_step() {
        let out = transcript_with(
            two_corner_setup(),
            "create red B1\nattack\nmove 1 1 north east up\nquit\n",
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "T1> red player created in B1");
        assert_eq!(
            &lines[lines.len() - 4..],
            &[
                "T1> Trying to move off the map.",
                "red player in position (2, 1)",
                "Invalid direction.",
                "T2> Bye.",
            ]
        );
    }

    #[test]
    fn test_move_failures() {
        let out = transcript_with(
            two_corner_setup(),
            "move 0 1 north\nmove 5 5 north\nmove 1\nquit\n",
        );
        assert_eq!(
            out,
            "T1> Invalid position.\n\
             T2> No player in that position.\n\
             T1> ERROR: NOT ENOUGH ARGUMENTS\n\
             T1> Bye.\n"
        );
    }

    #[test]
    fn test_attack_wins_the_game() {
        let out = transcript_with(
            two_corner_setup(),
            "create red B1\ncreate red B2\nattack\nstatus\nquit\n",
        );
        assert!(out.contains("T1> 10 10\n**1 2 3 4 5 6 7 8 9 10\n1 O . . . . . . . . .\n"));
        assert!(out.contains("10 . . . . . . . . . B\nWinner is T1.\n> Invalid command.\n> Bye.\n"));
    }

    #[test]
    fn test_map_shows_current_team_view() {
        let out = transcript_with(two_corner_setup(), "map\nquit\n");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "T1> 10 10");
        assert_eq!(lines[2], "1 B . . . . . . . . .");
        assert_eq!(lines[11], "10 . . . . . . . . . .");
    }

    #[test]
    fn test_replay_command() {
        let out = transcript_with(
            two_corner_setup(),
            "create blue B1\nmove 1 1 south\nreplay\nquit\n",
        );
        assert!(out.contains("> Replay verified.\n"));
    }

    #[test]
    fn test_end_of_input_stops_session() {
        let mut session = Session::new("create red B1\n".as_bytes(), Vec::new())
            .with_setup(two_corner_setup())
            .unwrap();
        session.run().unwrap();
        assert_eq!(session.game().map(Game::turn), Some(1));
    }
}
