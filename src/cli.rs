// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `sitesched`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sitesched",
    version,
    about = "Compute construction milestone schedules from a dependency graph.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the project file (TOML).
    ///
    /// Default: `Sitesched.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Sitesched.toml")]
    pub project: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// Overrides `SITESCHED_LOG` when given.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Reset offsets from their template values before printing.
    #[arg(long)]
    pub regenerate: bool,

    /// With `--regenerate`, also reset pinned milestones.
    #[arg(long, requires = "regenerate")]
    pub override_pins: bool,

    /// Shift every incomplete, unpinned milestone by N days.
    #[arg(long, value_name = "DAYS", allow_hyphen_values = true)]
    pub shift: Option<i64>,

    /// Print the computed snapshot as JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    /// Persist the computed snapshot using the project's storage mode.
    #[arg(long)]
    pub save: bool,

    /// Parse + validate and print the project file, without scheduling.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Filter directive for this level.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
