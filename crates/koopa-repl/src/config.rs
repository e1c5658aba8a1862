//! Configuration for the koopa REPL.
//!
//! Configuration is loaded from `~/.config/koopa/repl.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use koopa_kernel::KernelConfig;
use serde::{Deserialize, Serialize};

/// Configuration for the koopa REPL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplConfig {
    /// User name shown in the prompt.
    #[serde(default = "default_user")]
    pub user: String,

    /// Host name shown in the prompt.
    #[serde(default = "default_host")]
    pub host: String,

    /// JSON world to load instead of the bundled demo.
    #[serde(default)]
    pub world: Option<PathBuf>,

    /// Persist line history between sessions.
    #[serde(default = "default_history")]
    pub history: bool,

    /// Kernel settings (`[kernel]` table).
    #[serde(default = "default_kernel")]
    pub kernel: KernelConfig,
}

fn default_user() -> String {
    "larrypig".to_string()
}

fn default_host() -> String {
    "larrypig".to_string()
}

fn default_history() -> bool {
    true
}

fn default_kernel() -> KernelConfig {
    KernelConfig::named("repl")
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            user: default_user(),
            host: default_host(),
            world: None,
            history: default_history(),
            kernel: default_kernel(),
        }
    }
}

impl ReplConfig {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Get the default config file path.
    pub fn config_path() -> Result<PathBuf> {
        let dirs =
            ProjectDirs::from("", "", "koopa").context("Could not determine config directory")?;

        Ok(dirs.config_dir().join("repl.toml"))
    }

    /// Override the world file (from `--world`).
    pub fn with_world(mut self, path: impl Into<PathBuf>) -> Self {
        self.world = Some(path.into());
        self
    }
}
