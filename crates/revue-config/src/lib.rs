//! Shared configuration for the revue desktop shell.
//!
//! TOML + env config loading (figment), platform config path resolution,
//! and keyring-backed secure storage for the shell's named slots. The
//! shell reads this once at startup; the core coordinators never touch
//! ambient configuration.

mod secure;

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub use secure::{SecureStore, StorageKey};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("secure storage failure: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config struct ───────────────────────────────────────────────────

/// Top-level configuration shared by the desktop shell and its tools.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Review server base URL, if the shell is paired with one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_url: Option<Url>,

    /// Override for the freshness polling cadence.
    #[serde(default = "default_freshness_interval")]
    pub freshness_interval_secs: u64,

    /// Trust-pattern ids the user auto-approves.
    #[serde(default)]
    pub auto_approve: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: None,
            freshness_interval_secs: default_freshness_interval(),
            auto_approve: Vec::new(),
        }
    }
}

fn default_freshness_interval() -> u64 {
    60
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "revue", "revue").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("revue");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the Config from the canonical file path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the Config from an explicit file path + environment.
///
/// Defaults materialize when the file does not exist; `REVUE_`-prefixed
/// environment variables win over file values.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("REVUE_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

/// Serialize config to TOML and write to an explicit path.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}
