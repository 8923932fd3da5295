// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `mdwatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mdwatch",
    version,
    about = "Monitor GROMACS MD simulation progress and send periodic reports.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Mdwatch.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Mdwatch.toml")]
    pub config: String,

    /// Override `[monitor].input_dir` from the config.
    #[arg(long, value_name = "DIR")]
    pub input_dir: Option<String>,

    /// Override `[monitor].output_dir` from the config.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Generate one report now and exit, without the monitoring loop.
    #[arg(long)]
    pub once: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MDWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Load + validate config, list detected units, but don't run anything.
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

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
