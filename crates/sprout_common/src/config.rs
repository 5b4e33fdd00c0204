//! Client configuration.
//!
//! Base URL resolution order:
//! 1. `SPROUT_API_URL` environment variable
//! 2. `~/.config/sprout/config.toml`
//! 3. built-in default (`http://localhost:3000`)
//!
//! Timing knobs are fixed constants: the poll cadence is part of the
//! dashboard's contract with the backend, not a user preference.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default backend base URL (the `/api` prefix is added by the client).
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Environment variable overriding the base URL.
pub const API_URL_ENV: &str = "SPROUT_API_URL";

/// Seconds between poll cycles.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Delay between retries of a failed poll cycle.
pub const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Additional attempts after a failed poll cycle (4 attempts total).
pub const MAX_RETRIES: u32 = 3;

/// Samples kept per reading series.
pub const HISTORY_CAPACITY: usize = 60;

/// How long a notification stays on screen before auto-dismissal.
pub const NOTIFICATION_DURATION: Duration = Duration::from_secs(3);

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
}

/// On-disk shape of `config.toml`. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    base_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration with the env > file > default fallback chain.
    pub fn load() -> Self {
        let env_url = std::env::var(API_URL_ENV).ok();
        let file_url = Self::config_file_path()
            .and_then(|path| Self::read_file(&path).ok())
            .and_then(|file| file.base_url);
        Self::resolve(env_url, file_url)
    }

    /// Pure precedence logic, split out so it is testable without touching
    /// the process environment.
    pub fn resolve(env_url: Option<String>, file_url: Option<String>) -> Self {
        let base_url = env_url
            .filter(|url| !url.trim().is_empty())
            .or(file_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self { base_url }
    }

    /// `~/.config/sprout/config.toml`
    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sprout").join("config.toml"))
    }

    fn read_file(path: &Path) -> Result<ConfigFile> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Load a specific config file, used by tests and `--base-url` plumbing.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = Self::read_file(path)?;
        Ok(Self::resolve(None, file.base_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_base_url() {
        assert_eq!(Config::default().base_url, "http://localhost:3000");
    }

    #[test]
    fn env_beats_file_beats_default() {
        let from_env = Config::resolve(
            Some("http://env:3000".into()),
            Some("http://file:3000".into()),
        );
        assert_eq!(from_env.base_url, "http://env:3000");

        let from_file = Config::resolve(None, Some("http://file:3000".into()));
        assert_eq!(from_file.base_url, "http://file:3000");

        let fallback = Config::resolve(None, None);
        assert_eq!(fallback.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn blank_env_value_is_ignored() {
        let config = Config::resolve(Some("  ".into()), None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn reads_base_url_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"http://greenhouse.local:8080\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, "http://greenhouse.local:8080");
    }

    #[test]
    fn empty_toml_falls_back_to_default() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = [not a string").unwrap();
        assert!(Config::from_file(file.path()).is_err());
    }
}
