//! Sim command handler.
//!
//! Plays `matches` independent matches. Match `i` seeds both the game and
//! its agents with `seed + i`, so any single match can be reproduced with
//! `play --seed`. Prints per-seat win counts and mean scores, and can append
//! every match to a JSON Lines transcript.

use std::collections::BTreeMap;
use std::io::Write;

use gamemaster_engine::TurnBasedGame;
use gamemaster_engine::logger::{MatchLogger, MatchRecord};
use gamemaster_engine::master::{GameMaster, MatchConfig};

use super::{build_agents, build_game, load_config, resolve_seed};
use crate::cli::GameKind;
use crate::error::CliError;
use crate::formatters::format_reward;

/// Flags for one `sim` run.
#[derive(Debug, Clone)]
pub struct SimArgs {
    pub game: GameKind,
    pub matches: u32,
    pub seed: Option<u64>,
    pub agents: Vec<String>,
    pub players: Option<u16>,
    pub max_turns: Option<u32>,
    pub output: Option<String>,
}

#[derive(Debug, Default)]
struct Tally {
    wins: BTreeMap<String, u32>,
    totals: BTreeMap<String, f64>,
    ties: u32,
    incomplete: u32,
}

pub fn handle_sim_command(
    args: SimArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if args.matches == 0 {
        return Err(CliError::InvalidInput("matches must be >=1".into()));
    }
    let cfg = load_config(err)?;
    let base_seed = resolve_seed(args.seed, &cfg);
    let max_turns = args.max_turns.map_or(cfg.max_turns, |t| t as usize);

    let mut logger = match &args.output {
        Some(path) => Some(MatchLogger::append(path).map_err(|e| {
            CliError::InvalidInput(format!("cannot open {}: {}", path, e))
        })?),
        None => None,
    };

    let mut tally = Tally::default();
    let mut seats: Vec<String> = Vec::new();
    for i in 0..args.matches {
        let seed = base_seed.wrapping_add(u64::from(i));
        let table = build_game(args.game, args.players, seed, &cfg)?;
        seats = table.players().to_vec();
        let lineup = build_agents(&seats, &args.agents, args.game.default_agent(), seed)?;
        let result = GameMaster::new(table, lineup, MatchConfig { max_turns })?.run()?;

        for (actor, score) in &result.scores {
            *tally.totals.entry(actor.clone()).or_insert(0.0) += score;
        }
        match (&result.winner, result.completed) {
            (Some(w), _) => *tally.wins.entry(w.clone()).or_insert(0) += 1,
            (None, true) => tally.ties += 1,
            (None, false) => tally.incomplete += 1,
        }

        if let Some(logger) = logger.as_mut() {
            let record = MatchRecord {
                match_id: logger.next_id(),
                game: args.game.as_str().to_string(),
                seed: (args.game != GameKind::Tictactoe).then_some(seed),
                ts: None,
                result,
            };
            logger.write(&record)?;
        }
    }
    tracing::info!(
        game = args.game.as_str(),
        matches = args.matches,
        seed = base_seed,
        "simulation finished"
    );

    writeln!(
        out,
        "Simulated {} {} matches (seeds {}..={})",
        args.matches,
        args.game.as_str(),
        base_seed,
        base_seed.wrapping_add(u64::from(args.matches - 1))
    )?;
    for seat in &seats {
        let wins = tally.wins.get(seat).copied().unwrap_or(0);
        let mean = tally.totals.get(seat).copied().unwrap_or(0.0) / f64::from(args.matches);
        writeln!(out, "  {}: {} wins, mean score {}", seat, wins, format_reward(mean))?;
    }
    writeln!(out, "  ties: {}", tally.ties)?;
    if tally.incomplete > 0 {
        writeln!(out, "  stopped at turn limit: {}", tally.incomplete)?;
    }
    if let Some(path) = &args.output {
        writeln!(out, "Wrote {} records to {}", args.matches, path)?;
    }
    Ok(())
}
