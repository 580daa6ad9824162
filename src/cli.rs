// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! NOTE: this expects `clap` to be built with the `derive` feature, e.g.:
//! `clap = { version = "4.5.53", features = ["derive"] }` in `Cargo.toml`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `modwatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "modwatch",
    version,
    about = "Watch a moderation backend and alert on live posts and new reports.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Modwatch.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Modwatch.toml")]
    pub config: String,

    /// Load + validate the config, print a summary, and exit without
    /// connecting to anything.
    #[arg(long)]
    pub check: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MODWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
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

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
