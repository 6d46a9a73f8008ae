//! Drill configuration loaded from `vokabel.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::questions::{Direction, DEFAULT_CHOICES};

/// Environment variable overriding the database location.
pub const DATABASE_ENV: &str = "VOKABEL_DATABASE";

/// Log filter applied on top of `RUST_LOG`: library events at info.
pub const DEFAULT_LOG_DIRECTIVE: &str = concat!(env!("CARGO_CRATE_NAME"), "=info");

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillConfig {
    /// SQLite file holding verbs, nouns and learned counts.
    #[serde(default = "default_database")]
    pub database: PathBuf,
    /// Options per multiple-choice question.
    #[serde(default = "default_choices")]
    pub choices: usize,
    /// Fixed seed for reproducible sessions; entropy when unset.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub default_direction: Direction,
}

fn default_database() -> PathBuf {
    PathBuf::from("vokabel.db")
}

fn default_choices() -> usize {
    DEFAULT_CHOICES
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            choices: default_choices(),
            seed: None,
            default_direction: Direction::default(),
        }
    }
}

impl DrillConfig {
    /// Parse a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: DrillConfig = toml::from_str(content).context("invalid config")?;
        anyhow::ensure!(
            config.choices >= 2,
            "choices must be at least 2, got {}",
            config.choices
        );
        Ok(config)
    }
}

/// Load config from an explicit path, or `vokabel.toml` in the current
/// directory, falling back to defaults. `VOKABEL_DATABASE` wins over the file.
pub fn load_config(path: Option<&Path>) -> Result<DrillConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => Some(PathBuf::from("vokabel.toml")).filter(|p| p.exists()),
    };

    let mut config = match config_path {
        Some(p) => {
            let content = std::fs::read_to_string(&p)
                .with_context(|| format!("failed to read {}", p.display()))?;
            DrillConfig::from_toml(&content)
                .with_context(|| format!("failed to load {}", p.display()))?
        }
        None => DrillConfig::default(),
    };

    if let Ok(database) = std::env::var(DATABASE_ENV) {
        if !database.trim().is_empty() {
            config.database = PathBuf::from(database);
        }
    }

    Ok(config)
}
