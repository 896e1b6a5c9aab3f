//! Tracing setup
//!
//! The interactive mode owns the terminal, so logs only go to a file there.

use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. With `log_file` set, events are appended
/// there; otherwise they go to stderr when `stderr_fallback` is true and are
/// dropped when it is false.
pub fn init(log_file: Option<&Path>, stderr_fallback: bool) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None if stderr_fallback => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_writer(std::io::stderr)
                .try_init();
        }
        None => {}
    }
    Ok(())
}
