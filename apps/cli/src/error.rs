//! # Shell Error Type
//!
//! Errors that end the shell. Everything else (bad input, a missing product,
//! a failed query) is reported on screen and the menu loop continues.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Startup                          Menu loop                             │
//! │  ───────                          ─────────                             │
//! │  ConfigError ──► ShellError       InputClosed ──► clean exit            │
//! │  DbError     ──► ShellError       Io          ──► ShellError            │
//! │  (exit code 1)                    DbError     ──► printed, loop goes on │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;

use stockpile_db::DbError;
use thiserror::Error;

use crate::config::ConfigError;

/// Fatal shell errors.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Reading the terminal or writing to it failed.
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    /// Standard input reached end of file.
    #[error("Input closed")]
    InputClosed,

    /// The store could not be opened or initialized.
    #[error("Database unavailable: {0}")]
    Db(#[from] DbError),

    /// Startup configuration was invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for shell operations.
pub type ShellResult<T> = Result<T, ShellError>;
