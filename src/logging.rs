use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{anyhow, Context};
use tracing_subscriber::EnvFilter;

/// Path of the log file. Logging stays off when unset, the terminal is busy drawing the game.
pub const LOG_ENV_VAR: &str = "TORSNAKE_LOG";

pub fn init() -> anyhow::Result<()> {
    let path = match std::env::var_os(LOG_ENV_VAR) {
        Some(path) => path,
        None => return Ok(()),
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {:?}", path))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!(e))
}
