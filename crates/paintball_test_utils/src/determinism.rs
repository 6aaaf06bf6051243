//! Determinism testing utilities.
//!
//! Provides a harness for verifying that the engine produces identical
//! results given identical inputs.
//!
//! # Testing Strategy
//!
//! Replays and the headless interpreter rely on the engine being fully
//! deterministic. Sources of non-determinism to watch for:
//!
//! - **HashMap iteration order**: Rust's default hasher is randomized.
//!   Units live in a `BTreeMap` and every roster is an ordered `Vec`.
//!
//! - **System randomness**: the engine never draws random numbers.
//!
//! # Test Levels
//!
//! 1. **Unit tests**: individual rules (patterns, fights, rotation)
//! 2. **Property tests**: random command streams must replay identically
//! 3. **Parallel tests**: running N matches on threads all match

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::thread;

use paintball_core::command::Command;
use paintball_core::game::Game;
use paintball_core::replay::{Recorder, Replay};
use paintball_core::setup::MatchSetup;

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Hashes from each run.
    pub hashes: Vec<u64>,
    /// Number of commands applied per run.
    pub commands: usize,
}

impl DeterminismResult {
    fn from_hashes(hashes: Vec<u64>, commands: usize) -> Self {
        Self {
            is_deterministic: hashes.windows(2).all(|w| w[0] == w[1]),
            hashes,
            commands,
        }
    }

    /// Get all unique hashes (should be 1 for a deterministic engine).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that every run matched, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Match is non-deterministic!\n\
                 Runs: {}\n\
                 Commands: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                self.commands,
                unique.len(),
                self.hashes
            );
        }
    }
}

fn run_match(setup: &MatchSetup, commands: &[Command]) -> u64 {
    match setup.build() {
        Ok(mut game) => {
            crate::fixtures::play(&mut game, commands);
            game.state_hash()
        }
        Err(error) => {
            tracing::debug!(%error, "Setup rejected");
            0
        }
    }
}

/// Build the match `runs` times, apply `commands` and compare final hashes.
#[must_use]
pub fn verify_determinism(runs: usize, setup: &MatchSetup, commands: &[Command]) -> DeterminismResult {
    let hashes = (0..runs).map(|_| run_match(setup, commands)).collect();
    DeterminismResult::from_hashes(hashes, commands.len())
}

/// Run the same match on `threads` scoped threads and compare final hashes.
///
/// # Panics
///
/// Panics if a worker thread panics.
#[must_use]
pub fn run_parallel_matches(threads: usize, setup: &MatchSetup, commands: &[Command]) -> DeterminismResult {
    let hashes = thread::scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|_| s.spawn(|| run_match(setup, commands)))
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().expect("match thread panicked"))
            .collect()
    });
    DeterminismResult::from_hashes(hashes, commands.len())
}

/// Play two copies of a match command by command, finding the first divergence.
///
/// # Returns
///
/// `None` if the copies agree throughout, `Some(n)` if they differ after the
/// `n`th command (0 for the initial state).
#[must_use]
pub fn find_first_divergence(setup: &MatchSetup, commands: &[Command]) -> Option<usize> {
    let (Ok(mut a), Ok(mut b)) = (setup.build(), setup.build()) else {
        return None;
    };
    if a.state_hash() != b.state_hash() {
        return Some(0);
    }

    for (index, command) in commands.iter().enumerate() {
        let ra = a.apply(command).is_ok();
        let rb = b.apply(command).is_ok();
        if ra != rb || a.state_hash() != b.state_hash() {
            tracing::debug!(index, ?command, "Matches diverged");
            return Some(index + 1);
        }
        if !ra {
            break;
        }
    }
    None
}

/// Record a match, encode the replay and check playback lands on the same state.
#[must_use]
pub fn verify_replay_determinism(setup: &MatchSetup, commands: &[Command]) -> bool {
    let Ok(mut recorder) = Recorder::start(setup.clone()) else {
        return false;
    };
    for command in commands {
        if recorder.apply(command.clone()).is_err() {
            break;
        }
    }
    let expected = recorder.game().state_hash();

    let Ok(bytes) = recorder.finish().to_bytes() else {
        return false;
    };
    let Ok(replay) = Replay::from_bytes(&bytes) else {
        return false;
    };
    replay
        .play()
        .is_ok_and(|game: Game| game.state_hash() == expected)
}

/// Compute a simple hash for any hashable value.
pub fn compute_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Proptest strategies for engine testing.
///
/// These strategies generate random but reproducible commands and setups.
pub mod strategies {
    use paintball_core::command::Command;
    use paintball_core::setup::MatchSetup;
    use proptest::prelude::*;

    /// Color names, including one the engine rejects.
    pub fn arb_color_name() -> impl Strategy<Value = String> {
        prop_oneof![
            4 => prop::sample::select(vec!["red", "green", "blue"]),
            1 => Just("purple"),
        ]
        .prop_map(str::to_string)
    }

    /// Direction names, including one the engine rejects.
    pub fn arb_direction_name() -> impl Strategy<Value = String> {
        prop_oneof![
            8 => prop::sample::select(vec!["north", "south", "east", "west"]),
            1 => Just("up"),
        ]
        .prop_map(str::to_string)
    }

    /// Field dimensions from the minimum up to `max`.
    pub fn arb_field_size(max: i64) -> impl Strategy<Value = (i64, i64)> {
        (10..=max, 10..=max)
    }

    /// A create command naming one of `buildings`.
    pub fn arb_create_command(buildings: Vec<String>) -> impl Strategy<Value = Command> {
        (arb_color_name(), prop::sample::select(buildings))
            .prop_map(|(color, building)| Command::Create { color, building })
    }

    /// A move command anywhere within one cell of a `width` x `height` field.
    pub fn arb_move_command(width: i64, height: i64) -> impl Strategy<Value = Command> {
        (
            0..=width + 1,
            0..=height + 1,
            proptest::collection::vec(arb_direction_name(), 0..=4),
        )
            .prop_map(|(x, y, directions)| Command::Move { x, y, directions })
    }

    /// Any command against `setup`, weighted towards creating and moving.
    pub fn arb_command(setup: &MatchSetup) -> impl Strategy<Value = Command> {
        let names: Vec<String> = setup.bunkers.iter().map(|b| b.name.clone()).collect();
        prop_oneof![
            3 => arb_create_command(names),
            5 => arb_move_command(setup.width, setup.height),
            1 => Just(Command::Attack),
        ]
    }

    /// Generate a sequence of commands.
    pub fn arb_command_sequence(setup: &MatchSetup, max_len: usize) -> impl Strategy<Value = Vec<Command>> {
        proptest::collection::vec(arb_command(setup), 0..max_len)
    }
}
