//! Tic-tac-toe on a 3x3 board.
//!
//! Strict alternation, no randomness. Invalid or occupied targets cost the
//! mover a penalty and leave the turn with them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::GameError;
use crate::game::{
    check_players, finished_info, out_of_turn_info, zero_scores, Info, Observation, Scores,
    Status, TurnBasedGame, TurnResult,
};

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

const SYMBOLS: [char; 2] = ['X', 'O'];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicTacToeConfig {
    pub players: Vec<String>,
    pub win_reward: f64,
    pub loss_penalty: f64,
    pub invalid_penalty: f64,
}

impl Default for TicTacToeConfig {
    fn default() -> Self {
        Self {
            players: vec!["player_x".into(), "player_o".into()],
            win_reward: 1.0,
            loss_penalty: -1.0,
            invalid_penalty: -0.5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TicTacToe {
    config: TicTacToeConfig,
    board: [Option<char>; 9],
    current: usize,
    winner: Option<usize>,
    terminal: bool,
    scores: Scores,
    moves_made: usize,
}

impl TicTacToe {
    /// The first seat plays `X` and moves first.
    pub fn new(config: TicTacToeConfig) -> Result<Self, GameError> {
        check_players(
            "tic-tac-toe",
            &config.players,
            "exactly 2",
            config.players.len() == 2,
        )?;
        let scores = zero_scores(&config.players);
        Ok(Self {
            config,
            board: [None; 9],
            current: 0,
            winner: None,
            terminal: false,
            scores,
            moves_made: 0,
        })
    }

    pub fn board(&self) -> &[Option<char>; 9] {
        &self.board
    }

    fn seat(&self, actor: &str) -> Option<usize> {
        self.config.players.iter().position(|p| p == actor)
    }

    fn cells(&self) -> Vec<Value> {
        self.board
            .iter()
            .map(|c| Value::from(c.map(String::from).unwrap_or_else(|| " ".to_string())))
            .collect()
    }

    fn has_line(&self, symbol: char) -> bool {
        LINES
            .iter()
            .any(|line| line.iter().all(|&i| self.board[i] == Some(symbol)))
    }

    fn render(&self, seat: usize) -> String {
        let cell = |i: usize| self.board[i].unwrap_or(' ').to_string();
        let mut lines = vec![
            format!("Tic-Tac-Toe, you are '{}'", SYMBOLS[seat]),
            "---------".to_string(),
        ];
        for row in 0..3 {
            lines.push(format!("{} | {} | {}", cell(row * 3), cell(row * 3 + 1), cell(row * 3 + 2)));
        }
        lines.push("---------".to_string());
        lines.push(format!(
            "Turn {}. {}",
            self.moves_made,
            if self.terminal { "Game over." } else { "Awaiting moves." }
        ));
        lines.join("\n")
    }

    fn penalize(&mut self, actor: &str, reason: &str, legal: Vec<String>) -> Result<TurnResult, GameError> {
        if let Some(score) = self.scores.get_mut(actor) {
            *score += self.config.invalid_penalty;
        }
        tracing::warn!(game = "tictactoe", actor, reason, "rejected move");
        let mut info = if reason == "out_of_turn" {
            out_of_turn_info(legal)
        } else {
            let mut info = Info::new();
            info.insert("invalid".into(), Value::Bool(true));
            info.insert("reason".into(), Value::from(reason));
            info.insert("legal_moves".into(), Value::from(legal));
            info
        };
        info.insert("penalty".into(), Value::from(self.config.invalid_penalty));
        Ok(TurnResult {
            observation: self.observation(actor)?,
            reward: self.config.invalid_penalty,
            done: false,
            info,
        })
    }
}

/// Picks the first token that is a number from 1 to 9, so `"5"`, `"play 5"`
/// and `"cell-5"` all address cell 5. Returns a 0-based index.
pub fn parse_move(command: &str) -> Option<usize> {
    command
        .trim()
        .to_ascii_lowercase()
        .replace('-', " ")
        .split_whitespace()
        .filter(|t| t.chars().all(|c| c.is_ascii_digit()))
        .filter_map(|t| t.parse::<usize>().ok())
        .find(|v| (1..=9).contains(v))
        .map(|v| v - 1)
}

impl TurnBasedGame for TicTacToe {
    fn name(&self) -> &'static str {
        "tictactoe"
    }

    fn players(&self) -> &[String] {
        &self.config.players
    }

    fn reset(&mut self) {
        self.board = [None; 9];
        self.current = 0;
        self.winner = None;
        self.terminal = false;
        self.moves_made = 0;
        self.scores = zero_scores(&self.config.players);
    }

    fn current_actor(&self) -> &str {
        &self.config.players[self.current]
    }

    fn observation(&self, actor: &str) -> Result<Observation, GameError> {
        let seat = self
            .seat(actor)
            .ok_or_else(|| GameError::UnknownActor(actor.to_string()))?;
        let mut obs = Observation::new();
        obs.insert("text".into(), Value::from(self.render(seat)));
        obs.insert("board".into(), Value::from(self.cells()));
        obs.insert("your_symbol".into(), Value::from(SYMBOLS[seat].to_string()));
        obs.insert(
            "opponent_symbol".into(),
            Value::from(SYMBOLS[1 - seat].to_string()),
        );
        obs.insert("turn_count".into(), Value::from(self.moves_made));
        obs.insert("is_terminal".into(), Value::Bool(self.terminal));
        Ok(obs)
    }

    fn legal_actions(&self, actor: &str) -> Vec<String> {
        if self.terminal || actor != self.current_actor() {
            return Vec::new();
        }
        self.board
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| (i + 1).to_string())
            .collect()
    }

    fn apply(&mut self, actor: &str, command: &str) -> Result<TurnResult, GameError> {
        let seat = self
            .seat(actor)
            .ok_or_else(|| GameError::UnknownActor(actor.to_string()))?;
        if self.terminal {
            return Ok(TurnResult {
                observation: self.observation(actor)?,
                reward: 0.0,
                done: true,
                info: finished_info("match_already_finished"),
            });
        }
        if seat != self.current {
            let legal = self.legal_actions(self.current_actor());
            return self.penalize(actor, "out_of_turn", legal);
        }
        let target = match parse_move(command) {
            Some(i) if self.board[i].is_none() => i,
            _ => {
                let legal = self.legal_actions(actor);
                return self.penalize(actor, "illegal_move", legal);
            }
        };

        let symbol = SYMBOLS[seat];
        self.board[target] = Some(symbol);
        self.moves_made += 1;
        tracing::debug!(game = "tictactoe", actor, cell = target + 1, "move");

        let mut info = Info::new();
        info.insert("position".into(), Value::from(target + 1));
        if self.has_line(symbol) {
            self.terminal = true;
            self.winner = Some(seat);
            let opponent = self.config.players[1 - seat].clone();
            *self.scores.entry(actor.to_string()).or_insert(0.0) += self.config.win_reward;
            *self.scores.entry(opponent).or_insert(0.0) += self.config.loss_penalty;
            info.insert("outcome".into(), Value::from("win"));
            info.insert("winner".into(), Value::from(actor));
            info.insert("final_board".into(), Value::from(self.cells()));
            return Ok(TurnResult {
                observation: self.observation(actor)?,
                reward: self.config.win_reward,
                done: true,
                info,
            });
        }
        if self.board.iter().all(Option::is_some) {
            self.terminal = true;
            info.insert("outcome".into(), Value::from("draw"));
            info.insert("winner".into(), Value::Null);
            info.insert("final_board".into(), Value::from(self.cells()));
            return Ok(TurnResult {
                observation: self.observation(actor)?,
                reward: 0.0,
                done: true,
                info,
            });
        }

        self.current = 1 - self.current;
        info.insert("outcome".into(), Value::from("ongoing"));
        info.insert(
            "legal_moves".into(),
            Value::from(self.legal_actions(self.current_actor())),
        );
        Ok(TurnResult {
            observation: self.observation(actor)?,
            reward: 0.0,
            done: false,
            info,
        })
    }

    fn is_terminal(&self) -> bool {
        self.terminal
    }

    fn final_scores(&self) -> Scores {
        self.scores.clone()
    }

    fn status(&self) -> Status {
        let mut status = Status::new();
        status.insert(
            "winner".into(),
            self.winner
                .map(|s| Value::from(self.config.players[s].clone()))
                .unwrap_or(Value::Null),
        );
        status.insert("board".into(), Value::from(self.cells()));
        status.insert("turns".into(), Value::from(self.moves_made));
        status.insert("terminal".into(), Value::Bool(self.terminal));
        status
    }
}
