//! # Stockpile Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockpile                                        │
//! │                                                                         │
//! │  main.rs ────► Parses flags, hands off to the library                  │
//! │  lib.rs ─────► Logging, database, menu loop                            │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                         SQLite Database                          │  │
//! │  │  inventario.db (local file, WAL mode)                            │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Exit status is 0 after a normal exit (or end of input) and 1 when the
//! database cannot be opened or the configuration is invalid.

use std::process::ExitCode;

use clap::Parser;
use stockpile_cli::config::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match stockpile_cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}
