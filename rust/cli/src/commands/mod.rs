//! Command handler modules for the gamemaster CLI.
//!
//! Each subcommand lives in its own module with one public entry point,
//! `handle_COMMAND_command(...) -> Result<(), CliError>`, taking its output
//! streams as `&mut dyn Write` parameters. The helpers below build games and
//! agent line-ups shared by `play` and `sim`.

mod cfg;
mod play;
mod practice;
mod rank;
mod replay;
mod rng;
mod sim;

pub use cfg::handle_cfg_command;
pub use play::handle_play_command;
pub use practice::handle_practice_command;
pub use rank::handle_rank_command;
pub use replay::handle_replay_command;
pub use rng::handle_rng_command;
pub use sim::{SimArgs, handle_sim_command};

use std::io::Write;

use gamemaster_ai::create_agent;
use gamemaster_engine::TurnBasedGame;
use gamemaster_engine::blackjack::{BlackjackConfig, BlackjackGame};
use gamemaster_engine::master::AgentMap;
use gamemaster_engine::poker::{HeadsUpPoker, PokerConfig};
use gamemaster_engine::tictactoe::{TicTacToe, TicTacToeConfig};

use crate::cli::GameKind;
use crate::config::{self, Config};
use crate::error::CliError;
use crate::ui;

/// Resolved configuration, with the failure echoed to `err`.
pub(crate) fn load_config(err: &mut dyn Write) -> Result<Config, CliError> {
    config::load_with_sources()
        .map(|resolved| resolved.config)
        .map_err(|e| {
            let msg = format!("Invalid configuration: {}", e);
            let _ = ui::write_error(err, &msg);
            CliError::Config(msg)
        })
}

/// `--seed`, then the configured seed, then a fresh random one.
pub(crate) fn resolve_seed(flag: Option<u64>, cfg: &Config) -> u64 {
    flag.or(cfg.seed).unwrap_or_else(rand::random)
}

/// Seat names for an n-seat blackjack table.
pub(crate) fn blackjack_seats(n: u16) -> Vec<String> {
    (1..=n).map(|i| format!("player_{}", i)).collect()
}

/// A fresh game of `kind`. `seats` only applies to blackjack.
pub(crate) fn build_game(
    kind: GameKind,
    seats: Option<u16>,
    seed: u64,
    cfg: &Config,
) -> Result<Box<dyn TurnBasedGame>, CliError> {
    if seats.is_some() && kind != GameKind::Blackjack {
        return Err(CliError::InvalidInput(format!(
            "--players only applies to blackjack; {} always seats two",
            kind.as_str()
        )));
    }
    let game: Box<dyn TurnBasedGame> = match kind {
        GameKind::Blackjack => {
            let mut config = BlackjackConfig {
                seed: Some(seed),
                rewards: cfg.blackjack,
                ..BlackjackConfig::default()
            };
            if let Some(n) = seats {
                config.players = blackjack_seats(n);
            }
            Box::new(BlackjackGame::new(config)?)
        }
        GameKind::Poker => Box::new(HeadsUpPoker::new(PokerConfig {
            seed: Some(seed),
            rewards: cfg.poker,
            ..PokerConfig::default()
        })?),
        GameKind::Tictactoe => Box::new(TicTacToe::new(TicTacToeConfig::default())?),
    };
    Ok(game)
}

/// One agent per seat. `kinds` are taken in seat order and the last one is
/// repeated; with no kinds every seat gets the game's default agent. Seat `i`
/// is seeded with `seed + i`.
pub(crate) fn build_agents(
    seats: &[String],
    kinds: &[String],
    default_kind: &str,
    seed: u64,
) -> Result<AgentMap, CliError> {
    if kinds.len() > seats.len() {
        return Err(CliError::InvalidInput(format!(
            "{} agents given for {} seats",
            kinds.len(),
            seats.len()
        )));
    }
    let mut agents = AgentMap::new();
    for (i, seat) in seats.iter().enumerate() {
        let kind = kinds
            .get(i)
            .or_else(|| kinds.last())
            .map(String::as_str)
            .unwrap_or(default_kind);
        let agent = create_agent(kind, seed.wrapping_add(i as u64))?;
        agents.insert(seat.clone(), agent);
    }
    Ok(agents)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seats() -> Vec<String> {
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    }

    #[test]
    fn last_agent_kind_fills_remaining_seats() {
        let agents = build_agents(&seats(), &["first".into(), "random".into()], "first", 1).unwrap();
        assert_eq!(agents["a"].name(), "FirstLegal");
        assert_eq!(agents["b"].name(), "RandomLegal");
        assert_eq!(agents["c"].name(), "RandomLegal");
    }

    #[test]
    fn default_kind_used_without_agents() {
        let agents = build_agents(&seats(), &[], "threshold", 1).unwrap();
        assert!(agents.values().all(|a| a.name() == "ThresholdBlackjack"));
    }

    #[test]
    fn too_many_agents_is_rejected() {
        let kinds: Vec<String> = ["first"; 4].iter().map(|s| s.to_string()).collect();
        assert!(matches!(
            build_agents(&seats(), &kinds, "first", 0),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn unknown_agent_kind_is_rejected() {
        assert!(build_agents(&seats(), &["oracle".into()], "first", 0).is_err());
    }

    #[test]
    fn blackjack_table_uses_requested_seats() {
        let game = build_game(GameKind::Blackjack, Some(3), 9, &Config::default()).unwrap();
        assert_eq!(game.players(), blackjack_seats(3).as_slice());
        assert_eq!(game.name(), "blackjack");
    }

    #[test]
    fn seat_count_is_rejected_for_two_seat_games() {
        for kind in [GameKind::Poker, GameKind::Tictactoe] {
            match build_game(kind, Some(2), 9, &Config::default()) {
                Err(CliError::InvalidInput(msg)) => assert!(msg.contains(kind.as_str())),
                _ => panic!("{} accepted --players", kind.as_str()),
            }
            assert!(build_game(kind, None, 9, &Config::default()).is_ok());
        }
    }

    #[test]
    fn explicit_seed_wins_over_config() {
        let cfg = Config {
            seed: Some(5),
            ..Config::default()
        };
        assert_eq!(resolve_seed(Some(9), &cfg), 9);
        assert_eq!(resolve_seed(None, &cfg), 5);
    }
}
