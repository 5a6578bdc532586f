//! Exit code constants for the CLI application.
//!
//! Every command maps its outcome onto one of these.

/// Success exit code (standard Unix convention).
pub const SUCCESS: i32 = 0;

/// General error exit code: bad arguments, unreadable files, invalid config.
pub const ERROR: i32 = 2;
