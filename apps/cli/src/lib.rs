//! # Stockpile Shell Library
//!
//! Startup and wiring for the interactive inventory shell.
//!
//! ## Module Organization
//! ```text
//! stockpile_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── config.rs       ◄─── Flags, env vars, default paths
//! ├── shell.rs        ◄─── Menu loop and actions
//! ├── render.rs       ◄─── Product tables and color palette
//! └── error.rs        ◄─── Fatal shell errors
//! ```

pub mod config;
pub mod error;
pub mod render;
pub mod shell;

use std::io;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use stockpile_db::{Database, DbConfig};

use config::{Cli, ShellConfig, DEFAULT_LOG_FILTER};
use error::ShellResult;
use render::Palette;
use shell::Shell;

/// Runs the shell until the user exits.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Shell Startup                                     │
/// │                                                                         │
/// │  1. Resolve configuration ─► ConfigError is fatal                      │
/// │  2. Initialize logging (stderr)                                         │
/// │  3. Open database & run migrations ─► DbError is fatal                 │
/// │  4. Menu loop over stdin / stdout                                       │
/// │  5. Close the pool                                                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> ShellResult<()> {
    let config = ShellConfig::load(&cli)?;

    init_tracing(&config.log_filter);

    info!(db_path = ?config.database_path, "Starting Stockpile shell");

    let db_config = DbConfig::new(&config.database_path).busy_timeout(config.busy_timeout);

    let db = Database::new(db_config).await.map_err(|e| {
        error!(error = %e, "Failed to open inventory database");
        e
    })?;

    match db.migration_status().await {
        Ok((total, applied)) => info!(total, applied, "Schema ready"),
        Err(e) => warn!(error = %e, "Could not read migration status"),
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let palette = Palette::new(config.color);

    let result = Shell::new(db.products(), stdin.lock(), stdout.lock(), palette)
        .run()
        .await;

    db.close().await;
    info!("Stockpile shell stopped");

    result
}

/// Initializes the tracing subscriber.
///
/// Log lines go to stderr so they never mix into the menu on stdout.
/// An unparsable filter falls back to [`DEFAULT_LOG_FILTER`].
fn init_tracing(directives: &str) {
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // Ignore the error: a subscriber may already be installed (tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
