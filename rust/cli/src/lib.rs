//! # gamemaster CLI Library
//!
//! Command-line front end for the turn-based game engine: run matches
//! between built-in agents, simulate batches, replay transcripts, rank poker
//! hands and practice a seat interactively.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the arguments, dispatches to a command handler and returns
//! the process exit code. Output goes to the writers it is given, so tests
//! can capture it.
//!
//! ```
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let code = gamemaster_cli::run(
//!     ["gamemaster", "rank", "--cards", "A♠ K♠ Q♠ J♠ T♠"],
//!     &mut out,
//!     &mut err,
//! );
//! assert_eq!(code, 0);
//! assert!(String::from_utf8(out).unwrap().contains("Straight Flush"));
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: One match between agents, with its transcript
//! - `sim`: Many matches with consecutive seeds and win counts
//! - `replay`: Print matches recorded by `sim --output`
//! - `rank`: Best five-card hand among 5 to 7 cards
//! - `practice`: Play one seat against the house on stdin
//! - `cfg`: Display the resolved configuration
//! - `rng`: Print a seeded ChaCha20 sample

use clap::Parser;
use std::io::Write;
pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;

use cli::{Commands, GamemasterCli};

use commands::{
    handle_cfg_command, handle_play_command, handle_practice_command, handle_rank_command,
    handle_replay_command, handle_rng_command, handle_sim_command,
};

pub use commands::SimArgs;
pub use error::{BatchValidationError, CliError};

/// Every top-level subcommand, as listed in usage errors.
pub const COMMANDS: &[&str] = &["play", "sim", "replay", "rank", "practice", "cfg", "rng"];

/// Parses `args` and runs the selected command.
///
/// Returns [`exit_code::SUCCESS`] on success and [`exit_code::ERROR`] for
/// argument errors and failed commands. `--help` and `--version` print to
/// `out` and succeed.
///
/// # Available Commands
///
/// - `play --game G [--agents a,b] [--players N] [--seed N] [--max-turns N]`
/// - `sim --game G --matches N [--seed N] [--agents a,b] [--output FILE]`
/// - `replay --input FILE`
/// - `rank --cards "A♠ K♠ Q♠ J♠ T♠"`
/// - `practice --game {blackjack|poker} [--seed N]`
/// - `cfg`
/// - `rng [--seed N]`
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let parsed = GamemasterCli::try_parse_from(&argv);
    match parsed {
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    if writeln!(err, "{}", e).is_err()
                        || writeln!(err).is_err()
                        || writeln!(err, "Turn-based game engine CLI").is_err()
                        || writeln!(err, "Usage: gamemaster <command> [options]\n").is_err()
                        || writeln!(err, "Commands:").is_err()
                    {
                        return exit_code::ERROR;
                    }
                    for c in COMMANDS {
                        if writeln!(err, "  {}", c).is_err() {
                            return exit_code::ERROR;
                        }
                    }
                    if writeln!(err, "\nFor full help, run: gamemaster --help").is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::ERROR
                }
            }
        }
        Ok(cli) => {
            let result = match cli.cmd {
                Commands::Play {
                    game,
                    agents,
                    players,
                    seed,
                    max_turns,
                } => handle_play_command(game, &agents, players, seed, max_turns, out, err),
                Commands::Sim {
                    game,
                    matches,
                    seed,
                    agents,
                    players,
                    max_turns,
                    output,
                } => handle_sim_command(
                    SimArgs {
                        game,
                        matches,
                        seed,
                        agents,
                        players,
                        max_turns,
                        output,
                    },
                    out,
                    err,
                ),
                Commands::Replay { input } => handle_replay_command(&input, out, err),
                Commands::Rank { cards } => handle_rank_command(&cards, out),
                Commands::Practice { game, seed } => {
                    // Use stdin for real input (supports both TTY and piped stdin)
                    let stdin = std::io::stdin();
                    let mut stdin_lock = stdin.lock();
                    handle_practice_command(game, seed, out, err, &mut stdin_lock)
                }
                Commands::Cfg => handle_cfg_command(out, err),
                Commands::Rng { seed } => handle_rng_command(seed, out),
            };
            match result {
                Ok(()) => exit_code::SUCCESS,
                // configuration failures are reported where they are loaded
                Err(CliError::Config(_)) => exit_code::ERROR,
                Err(e) => {
                    if writeln!(err, "Error: {}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::ERROR
                }
            }
        }
    }
}
