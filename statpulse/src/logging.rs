//! Tracing setup. Stdout carries the display, so logs never go there.

use std::{fs::OpenOptions, sync::Mutex};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "STATPULSE_LOG";
pub const LOG_FILE_ENV: &str = "STATPULSE_LOG_FILE";

/// Filter from `STATPULSE_LOG`, then `RUST_LOG`, else `warn`. Output to stderr, or
/// appended to `STATPULSE_LOG_FILE` when set.
pub fn init() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let res = match std::env::var_os(LOG_FILE_ENV) {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("opening log file {}", path.to_string_lossy()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init(),
    };
    res.map_err(|e| anyhow::anyhow!(e))
}
