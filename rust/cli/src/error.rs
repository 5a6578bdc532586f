//! Error types for the CLI application.
//!
//! Every command handler returns `Result<(), CliError>`; [`crate::run`]
//! prints the error and maps it to an exit code.
//!
//! ## Batch Validation Errors
//!
//! `BatchValidationError<T>` pairs a failure with the item it came from. The
//! replay command uses it to report transcript lines that could not be read
//! while still printing the ones that could.

use std::fmt;

use gamemaster_ai::AgentError;
use gamemaster_engine::{GameError, MatchError};

use crate::config::ConfigError;

#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Game or orchestrator error
    Engine(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "Engine error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        CliError::Engine(error.to_string())
    }
}

impl From<MatchError> for CliError {
    fn from(error: MatchError) -> Self {
        CliError::Engine(error.to_string())
    }
}

// Unknown agent names come straight from the command line.
impl From<AgentError> for CliError {
    fn from(error: AgentError) -> Self {
        CliError::InvalidInput(error.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

/// A failure tied to the item that caused it.
///
/// # Examples
///
/// ```rust
/// use gamemaster_cli::BatchValidationError;
///
/// let error = BatchValidationError {
///     item_context: 5,
///     message: "expected value at line 1 column 1".to_string(),
/// };
/// assert_eq!(error.to_string(), "5: expected value at line 1 column 1");
/// ```
#[derive(Debug)]
pub struct BatchValidationError<T> {
    /// Context identifying the item that failed validation
    pub item_context: T,
    /// Descriptive error message
    pub message: String,
}

impl<T: std::fmt::Display> std::fmt::Display for BatchValidationError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.item_context, self.message)
    }
}
