//! Replay system for recording and playing back matches.
//!
//! A replay stores the setup and the stream of commands issued during the
//! match. The engine is deterministic, so running the commands against a
//! fresh game built from the setup recreates it exactly.

use serde::{Deserialize, Serialize};

use crate::command::{Command, Outcome};
use crate::error::{GameError, Result};
use crate::game::Game;
use crate::setup::MatchSetup;

/// Replay format version for compatibility.
pub const REPLAY_VERSION: u32 = 1;

/// Complete replay data structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replay {
    /// Replay format version.
    pub version: u32,
    /// Setup the match started from.
    pub setup: MatchSetup,
    /// Commands in the order they were issued.
    pub commands: Vec<Command>,
    /// Turns played when recording stopped.
    pub final_turn: u64,
    /// Final state hash for verification.
    pub final_hash: u64,
}

impl Replay {
    /// Start an empty recording for `setup`.
    #[must_use]
    pub const fn new(setup: MatchSetup) -> Self {
        Self {
            version: REPLAY_VERSION,
            setup,
            commands: Vec::new(),
            final_turn: 0,
            final_hash: 0,
        }
    }

    /// Record a command.
    pub fn record(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Finalize the replay with end-of-recording state.
    pub fn finalize(&mut self, game: &Game) {
        self.final_turn = game.turn();
        self.final_hash = game.state_hash();
    }

    /// Total number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| GameError::Replay(format!("Failed to serialize replay: {e}")))
    }

    /// Decode bytes produced by [`Replay::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let replay: Self = bincode::deserialize(bytes)
            .map_err(|e| GameError::Replay(format!("Failed to deserialize replay: {e}")))?;

        if replay.version != REPLAY_VERSION {
            return Err(GameError::Replay(format!(
                "Replay version mismatch: expected {REPLAY_VERSION}, got {}",
                replay.version
            )));
        }
        Ok(replay)
    }

    /// Rebuild the match and run every recorded command.
    ///
    /// Stops early, without error, if the match ends before the commands do.
    pub fn play(&self) -> Result<Game> {
        let mut game = self.setup.build()?;
        for command in &self.commands {
            if !game.in_progress() {
                tracing::warn!(turn = game.turn(), "Replay has commands past the end of the match");
                break;
            }
            game.apply(command)?;
        }
        Ok(game)
    }

    /// Whether playback reproduces the recorded final hash.
    pub fn verify(&self) -> Result<bool> {
        let game = self.play()?;
        let matches = game.state_hash() == self.final_hash && game.turn() == self.final_turn;
        if !matches {
            tracing::warn!(
                expected = self.final_hash,
                actual = game.state_hash(),
                "Replay diverged"
            );
        }
        Ok(matches)
    }
}

/// A game that records every command it is given.
#[derive(Debug, Clone)]
pub struct Recorder {
    game: Game,
    replay: Replay,
}

impl Recorder {
    /// Build the game from `setup` and start recording.
    pub fn start(setup: MatchSetup) -> Result<Self> {
        let game = setup.build()?;
        Ok(Self {
            game,
            replay: Replay::new(setup),
        })
    }

    /// Apply and record a command. Commands the game refuses are not recorded.
    pub fn apply(&mut self, command: Command) -> Result<Outcome> {
        let outcome = self.game.apply(&command)?;
        self.replay.record(command);
        Ok(outcome)
    }

    /// The game being recorded.
    #[must_use]
    pub const fn game(&self) -> &Game {
        &self.game
    }

    /// Stop recording and return the finalized replay.
    #[must_use]
    pub fn finish(mut self) -> Replay {
        self.replay.finalize(&self.game);
        self.replay
    }
}

// ============================================================================
// Tests
// ============================================================================
