//! # Shell Configuration
//!
//! Settings resolved once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line flags (`--db`, `--no-color`, `--log`)
//! 2. Environment variables (`STOCKPILE_*`, `NO_COLOR`, `RUST_LOG`)
//! 3. Defaults (this file)
//!
//! Configuration is read-only after startup.

use clap::Parser;
use directories::ProjectDirs;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default tracing filter when neither `--log` nor `RUST_LOG` is set.
///
/// Kept at `warn` so log lines don't interleave with the menu.
pub const DEFAULT_LOG_FILTER: &str = "warn,sqlx=warn";

/// Database file name inside the platform data directory.
pub const DEFAULT_DB_FILE: &str = "inventario.db";

/// Stockpile: a single-user inventory tracker.
#[derive(Debug, Clone, Parser)]
#[command(name = "stockpile", author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the SQLite database file
    #[arg(long, env = "STOCKPILE_DB_PATH")]
    pub db: Option<PathBuf>,

    /// Disable colored output and screen clearing
    #[arg(long, env = "STOCKPILE_NO_COLOR")]
    pub no_color: bool,

    /// Tracing filter directives (e.g. `stockpile_db=debug`)
    #[arg(long, env = "RUST_LOG")]
    pub log: Option<String>,
}

/// Resolved shell configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellConfig {
    /// SQLite file the store opens.
    pub database_path: PathBuf,

    /// Whether the renderer may emit ANSI color and clear-screen sequences.
    pub color: bool,

    /// How long a statement waits on a locked database.
    pub busy_timeout: Duration,

    /// Tracing filter directives.
    pub log_filter: String,
}

impl ShellConfig {
    /// Resolves configuration from parsed flags and the environment.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        Self::from_sources(cli, |key| {
            env::var_os(key).map(|value| value.to_string_lossy().into_owned())
        })
    }

    /// Resolves configuration with `lookup` standing in for the environment.
    pub fn from_sources(
        cli: &Cli,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let database_path = match &cli.db {
            Some(path) => path.clone(),
            None => default_database_path()?,
        };

        // https://no-color.org: any value disables color
        let color = !cli.no_color && lookup("NO_COLOR").is_none();

        let busy_timeout_ms: u64 = lookup("STOCKPILE_BUSY_TIMEOUT_MS")
            .unwrap_or_else(|| "5000".to_string())
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue("STOCKPILE_BUSY_TIMEOUT_MS".to_string()))?;

        let log_filter = cli
            .log
            .clone()
            .filter(|filter| !filter.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(ShellConfig {
            database_path,
            color,
            busy_timeout: Duration::from_millis(busy_timeout_ms),
            log_filter,
        })
    }
}

/// Determines the default database file path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.stockpile.stockpile/inventario.db`
/// - **Windows**: `%APPDATA%\stockpile\stockpile\data\inventario.db`
/// - **Linux**: `~/.local/share/stockpile/inventario.db`
fn default_database_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("com", "stockpile", "stockpile")
        .ok_or(ConfigError::NoDataDir)?;

    let data_dir = proj_dirs.data_dir();

    std::fs::create_dir_all(data_dir).map_err(|e| ConfigError::DataDir {
        path: data_dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(data_dir.join(DEFAULT_DB_FILE))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Could not determine app data directory; pass --db or set STOCKPILE_DB_PATH")]
    NoDataDir,

    #[error("Could not create data directory {}: {reason}", path.display())]
    DataDir { path: PathBuf, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn cli_with_db(path: &str) -> Cli {
        Cli {
            db: Some(PathBuf::from(path)),
            no_color: false,
            log: None,
        }
    }

    #[test]
    fn test_explicit_flags_win() {
        let cli = Cli::parse_from([
            "stockpile",
            "--db",
            "/tmp/stock.db",
            "--no-color",
            "--log",
            "stockpile_db=debug",
        ]);

        let config = ShellConfig::from_sources(&cli, no_env).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/stock.db"));
        assert!(!config.color);
        assert_eq!(config.log_filter, "stockpile_db=debug");
    }

    #[test]
    fn test_blank_log_filter_falls_back_to_default() {
        let cli = Cli {
            log: Some("  ".to_string()),
            ..cli_with_db("inventario.db")
        };

        let config = ShellConfig::from_sources(&cli, no_env).unwrap();
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert_eq!(config.busy_timeout, Duration::from_millis(5000));
    }

    #[test]
    fn test_no_color_env_disables_color() {
        let cli = cli_with_db("inventario.db");

        let config = ShellConfig::from_sources(&cli, |key| {
            (key == "NO_COLOR").then(String::new)
        })
        .unwrap();
        assert!(!config.color);

        assert!(ShellConfig::from_sources(&cli, no_env).unwrap().color);
    }

    #[test]
    fn test_busy_timeout_from_env() {
        let cli = cli_with_db("inventario.db");

        let config = ShellConfig::from_sources(&cli, |key| {
            (key == "STOCKPILE_BUSY_TIMEOUT_MS").then(|| "250".to_string())
        })
        .unwrap();
        assert_eq!(config.busy_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_busy_timeout_is_rejected() {
        let cli = cli_with_db("inventario.db");

        for bad in ["soon", "-1", "1.5"] {
            let err = ShellConfig::from_sources(&cli, |key| {
                (key == "STOCKPILE_BUSY_TIMEOUT_MS").then(|| bad.to_string())
            })
            .unwrap_err();

            assert_matches!(err, ConfigError::InvalidValue(ref name) if name == "STOCKPILE_BUSY_TIMEOUT_MS");
        }
    }
}
