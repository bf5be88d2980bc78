//! CLI argument parsing for yaml2jmxtrans
//!
//! This module provides the command-line interface using clap derive macros.
//!
//! # Arguments
//!
//! - `INPUT`: YAML input document
//! - `--output-dir` / `-o`: Directory receiving `<setname>.json` files (default: ., env: YAML2JMXTRANS_OUTPUT_DIR)
//! - `--validate`: Resolve every host set without writing files
//! - `--dry-run`: Print every generated document instead of writing files
//! - `--log-level` / `-l`: Log level (trace/debug/info/warn/error, env: YAML2JMXTRANS_LOG_LEVEL)
//!
//! `RUST_LOG`, when set, takes precedence over `--log-level`.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// yaml2jmxtrans - Generate jmxtrans configuration from YAML
///
/// Reads one YAML document describing queries, output writers and host
/// sets, and writes one jmxtrans JSON file per host set.
#[derive(Parser, Debug)]
#[command(name = "yaml2jmxtrans")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the YAML input document
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory the generated files are written to
    #[arg(
        short,
        long,
        value_name = "DIR",
        default_value = ".",
        env = "YAML2JMXTRANS_OUTPUT_DIR"
    )]
    pub output_dir: PathBuf,

    /// Resolve every host set without writing files
    #[arg(long, conflicts_with = "dry_run")]
    pub validate: bool,

    /// Print generated documents to standard output instead of writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Log level
    #[arg(
        short,
        long,
        value_enum,
        default_value = "info",
        env = "YAML2JMXTRANS_LOG_LEVEL"
    )]
    pub log_level: LogLevel,
}

/// Log level options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Trace level - most verbose
    Trace,
    /// Debug level
    Debug,
    /// Info level - default
    Info,
    /// Warn level
    Warn,
    /// Error level - least verbose
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}
