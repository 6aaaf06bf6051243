//! Headless paintball interpreter.
//!
//! Reads commands on stdin and answers on stdout. Logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Interactive mode - set up a match with `game`
//! cargo run -p paintball_headless
//!
//! # Start from a scenario file
//! cargo run -p paintball_headless -- play --scenario scenarios/corners.ron
//!
//! # Validate a scenario
//! cargo run -p paintball_headless -- check scenarios/corners.ron
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paintball_headless::{HeadlessError, Scenario, Session};

#[derive(Parser)]
#[command(name = "paintball")]
#[command(about = "Turn-based paintball in the terminal")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive session
    Play {
        /// Scenario file to start with
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Start with one of the built-in scenarios
        #[arg(long, conflicts_with = "scenario", value_parser = ["default", "four-corners"])]
        builtin: Option<String>,
    },

    /// Load a scenario, build its match and print a summary
    Check {
        /// Scenario file to check
        scenario: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging to stderr (stdout is for the interpreter)
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    let result = match cli.command {
        Some(Commands::Play { scenario, builtin }) => cmd_play(scenario, builtin),
        Some(Commands::Check { scenario }) => cmd_check(scenario),
        None => cmd_play(None, None),
    };

    if let Err(error) = result {
        tracing::error!(%error, "Session failed");
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

/// Run an interactive session on stdin/stdout
fn cmd_play(scenario: Option<PathBuf>, builtin: Option<String>) -> Result<(), HeadlessError> {
    let scenario = match (scenario, builtin.as_deref()) {
        (Some(path), _) => Some(Scenario::load(path)?),
        (None, Some("four-corners")) => Some(Scenario::four_corners()),
        (None, Some(_)) => Some(Scenario::default()),
        (None, None) => None,
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock());
    if let Some(scenario) = scenario {
        tracing::info!(name = %scenario.name, "Starting scenario");
        session = session.with_setup(scenario.setup)?;
    } else {
        tracing::info!("Starting interactive session");
    }
    session.run()
}

/// Validate a scenario file
fn cmd_check(path: PathBuf) -> Result<(), HeadlessError> {
    let scenario = Scenario::load(&path)?;
    let game = scenario.setup.build()?;

    println!("{}", scenario.name);
    if !scenario.description.is_empty() {
        println!("{}", scenario.description);
    }
    println!("Field: {}x{}", game.width(), game.height());
    println!(
        "Bunkers: {} ({} requested)",
        game.buildings().size(),
        scenario.setup.bunkers.len()
    );
    println!(
        "Teams: {} ({} requested)",
        game.teams().size(),
        scenario.setup.teams.len()
    );
    Ok(())
}
