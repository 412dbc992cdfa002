//! Tracing setup.
//!
//! The terminal belongs to the game screen, so log lines go to
//! `~/.flappy/flappy.log`. `FLAPPY_LOG` takes an `EnvFilter` directive and
//! defaults to `info`.

use crate::utils::persistence;
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "flappy.log";
pub const LOG_ENV: &str = "FLAPPY_LOG";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber writing to the log file. Returns the path.
pub fn init() -> io::Result<PathBuf> {
    let path = persistence::save_path(LOG_FILE)?;
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    Ok(path)
}

/// Subscriber for one-shot CLI commands, logging to stderr.
pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
