// src/logging.rs

//! `tracing` subscriber setup for the `sitesched` binary.
//!
//! Filter precedence:
//! 1. `--log-level` (applies to every target),
//! 2. `SITESCHED_LOG`, which takes full `EnvFilter` directives such as
//!    `sitesched::schedule=debug,info`,
//! 3. `info`.
//!
//! Output goes to stderr; stdout carries the schedule itself.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

/// Environment variable read when no `--log-level` is given.
pub const LOG_ENV_VAR: &str = "SITESCHED_LOG";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    fmt()
        .with_env_filter(build_filter(cli_level))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}

fn build_filter(cli_level: Option<LogLevel>) -> EnvFilter {
    if let Some(level) = cli_level {
        return EnvFilter::new(level.as_directive());
    }
    match EnvFilter::try_from_env(LOG_ENV_VAR) {
        Ok(filter) => filter,
        Err(e) => {
            // Only a malformed value is reported.
            if std::env::var_os(LOG_ENV_VAR).is_some() {
                eprintln!("ignoring invalid {LOG_ENV_VAR}: {e}");
            }
            EnvFilter::new("info")
        }
    }
}
