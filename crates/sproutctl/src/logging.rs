//! Logging setup.
//!
//! One-shot commands log to stderr. Dashboard mode logs to a file so
//! tracing output never corrupts the alternate screen.
//!
//! Log file path fallback chain:
//! 1. `$SPROUT_LOG_FILE` (explicit override)
//! 2. `$XDG_STATE_HOME/sprout/sproutctl.log`
//! 3. `~/.local/state/sprout/sproutctl.log`

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable controlling the log filter (tracing syntax).
const LOG_FILTER_ENV: &str = "SPROUT_LOG";

/// Initialize tracing. `to_file` is set for dashboard mode.
pub fn init(to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    if to_file {
        let path = log_file_path().context("could not determine a log file path")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open {}", path.display()))?;

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    Ok(())
}

fn log_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("SPROUT_LOG_FILE") {
        return Some(PathBuf::from(path));
    }

    if let Ok(xdg_state) = std::env::var("XDG_STATE_HOME") {
        return Some(PathBuf::from(xdg_state).join("sprout").join("sproutctl.log"));
    }

    dirs::home_dir().map(|home| {
        home.join(".local")
            .join("state")
            .join("sprout")
            .join("sproutctl.log")
    })
}
