//! yaml2jmxtrans library
//!
//! This crate compiles a compact YAML description of JMX targets and MBean
//! queries into the per-host-set JSON documents consumed by jmxtrans.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod hosts;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging subsystem
///
/// Logs are written to standard error so standard output only carries
/// usage text and `--dry-run` documents.
///
/// # Arguments
/// * `level` - Log level string (trace, debug, info, warn, error)
///
/// # Errors
/// Returns an error if the logging system fails to initialize
pub fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
