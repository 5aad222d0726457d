//! Application configuration: the remembered vault root and probe
//! settings, persisted as TOML.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub vault: VaultConfig,
    pub probe: ProbeConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// The most recently selected vault root (the `Content` folder).
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Explicit ffprobe path; PATH lookup when unset.
    pub ffprobe_path: Option<PathBuf>,

    /// Per-invocation probe timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            ffprobe_path: None,
            timeout_secs: 30,
        }
    }
}

impl ProbeConfig {
    /// The ffprobe program to invoke.
    pub fn tool(&self) -> PathBuf {
        self.ffprobe_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("ffprobe"))
    }

    /// The probe timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config.
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = ["./vaultview.toml", "~/.config/vaultview/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Save the config to a TOML file, creating parent directories as needed.
pub fn save_config(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    Ok(())
}

/// The path used to persist settings when no `--config` was given.
pub fn default_config_path() -> PathBuf {
    let path = shellexpand::tilde("~/.config/vaultview/config.toml");
    PathBuf::from(path.as_ref())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.probe.timeout_secs == 0 {
        anyhow::bail!("probe.timeout_secs must be greater than 0");
    }

    if let Some(root) = &config.vault.root {
        if !root.exists() {
            tracing::warn!("Configured vault root does not exist: {:?}", root);
        }
    }

    Ok(())
}
