//! # gamemaster-engine: Turn-Based Multi-Agent Game Engine
//!
//! A small contract for synchronous turn-based games, three games that
//! implement it, and a match orchestrator that drives independent agents
//! through observe, decide, apply cycles. Every game owns a seeded RNG, so
//! the same seed and the same commands always produce the same match.
//!
//! ## Core Modules
//!
//! - [`game`] - The [`TurnBasedGame`](game::TurnBasedGame) contract and turn results
//! - [`master`] - [`GameMaster`](master::GameMaster) orchestration and match results
//! - [`blackjack`] - Multi-seat blackjack against a dealer
//! - [`poker`] - Heads-up limit hold'em and house call policies
//! - [`tictactoe`] - Tic-tac-toe
//! - [`hand`] - Best five-card hand ranking
//! - [`cards`] - Card, suit and rank types with label parsing
//! - [`deck`] - Seeded ChaCha20 decks
//! - [`practice`] - Single-seat sessions against house seats
//! - [`logger`] - JSON Lines match transcripts
//! - [`errors`] - Error types
//!
//! ## Quick Start
//!
//! ```rust
//! use gamemaster_engine::game::TurnBasedGame;
//! use gamemaster_engine::poker::{HeadsUpPoker, PokerConfig};
//!
//! let mut game = HeadsUpPoker::new(PokerConfig { seed: Some(7), ..PokerConfig::default() }).unwrap();
//! let actor = game.current_actor().to_string();
//! let result = game.apply(&actor, "fold").unwrap();
//! assert!(result.done);
//! assert_eq!(result.reward, -1.0);
//! ```

pub mod blackjack;
pub mod cards;
pub mod deck;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod master;
pub mod poker;
pub mod practice;
pub mod tictactoe;

pub use errors::{GameError, MatchError};
pub use game::{Observation, TurnBasedGame, TurnResult};
pub use master::{Agent, GameMaster, MatchConfig, MatchResult};
