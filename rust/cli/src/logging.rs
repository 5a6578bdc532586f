//! Diagnostic logging for the binary.
//!
//! Engine and agent events go through `tracing`; this installs the fmt
//! subscriber that prints them. `RUST_LOG` selects what is shown, defaulting
//! to warnings only so transcripts on stdout stay clean.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "warn";

/// Installs a stderr subscriber. Calling it twice is harmless; the second
/// install is ignored.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("global subscriber already installed");
    }
}
