//! Command-line argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "gamemaster",
    version,
    about = "Turn-based multi-agent game engine: blackjack, heads-up poker, tic-tac-toe"
)]
pub struct GamemasterCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one match between built-in agents and print the transcript
    Play {
        #[arg(long, value_enum)]
        game: GameKind,
        /// Agent kinds by seat, comma separated; the last one fills any remaining seats
        #[arg(long, value_delimiter = ',')]
        agents: Vec<String>,
        /// Blackjack seats; rejected for the two-seat games
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..=7))]
        players: Option<u16>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        max_turns: Option<u32>,
    },
    /// Run many matches with consecutive seeds and count wins
    Sim {
        #[arg(long, value_enum)]
        game: GameKind,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        matches: u32,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_delimiter = ',')]
        agents: Vec<String>,
        /// Blackjack seats; rejected for the two-seat games
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..=7))]
        players: Option<u16>,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        max_turns: Option<u32>,
        /// Append every match to this JSON Lines file
        #[arg(long)]
        output: Option<String>,
    },
    /// Print the matches recorded in a JSON Lines file
    Replay {
        #[arg(long)]
        input: String,
    },
    /// Rank the best five-card hand among 5 to 7 cards
    Rank {
        /// Card labels such as "A♠ K♠ Q♠ J♠ T♠" or "As,Ks,Qs,Js,Ts"
        #[arg(long)]
        cards: String,
    },
    /// Play one seat yourself against the house, reading commands from stdin
    Practice {
        #[arg(long, value_enum)]
        game: PracticeGame,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
    /// Print a sample from the seeded ChaCha20 generator
    Rng {
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum GameKind {
    Blackjack,
    Poker,
    Tictactoe,
}

impl GameKind {
    /// # Examples
    ///
    /// ```
    /// # use gamemaster_cli::cli::GameKind;
    /// assert_eq!(GameKind::Tictactoe.as_str(), "tictactoe");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Blackjack => "blackjack",
            GameKind::Poker => "poker",
            GameKind::Tictactoe => "tictactoe",
        }
    }

    /// Agent kind used for seats `--agents` leaves unspecified.
    pub fn default_agent(&self) -> &'static str {
        match self {
            GameKind::Blackjack => "threshold",
            GameKind::Poker => "baseline",
            GameKind::Tictactoe => "random",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PracticeGame {
    Blackjack,
    Poker,
}
