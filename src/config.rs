//! Paleta configuration.
//!
//! TOML file, looked up as `.paleta.toml` in the working directory first,
//! then the user config directory. Absence is not an error; defaults apply.

use crate::gemini::DEFAULT_BASE_URL;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Working-directory config file name (wins over the user config file).
pub const LOCAL_CONFIG_FILENAME: &str = ".paleta.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletaConfig {
    /// Configuration file version
    pub version: String,

    /// Generation defaults
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Remote endpoint settings
    #[serde(default)]
    pub api: ApiConfig,

    /// History persistence settings
    #[serde(default)]
    pub history: HistoryConfig,
}

impl Default for PaletaConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            generation: GenerationConfig::default(),
            api: ApiConfig::default(),
            history: HistoryConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Default model id used when the CLI flag is absent
    pub model: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Endpoint root
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Override of the history file location (defaults to the platform
    /// data directory)
    pub path: Option<PathBuf>,
}

impl PaletaConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// User config file location.
    pub fn user_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("paleta")
            .join("config.toml")
    }

    /// Resolve the effective configuration: `.paleta.toml` in the working
    /// directory, else the user config file, else defaults. A malformed
    /// file is an error; a missing one is not.
    pub fn resolve() -> Result<Self> {
        let local = std::path::Path::new(LOCAL_CONFIG_FILENAME);
        if local.exists() {
            return Self::load(local);
        }
        let user = Self::user_path();
        if user.exists() {
            return Self::load(&user);
        }
        Ok(Self::default())
    }

    /// Effective history file location.
    pub fn history_path(&self) -> PathBuf {
        self.history
            .path
            .clone()
            .unwrap_or_else(crate::history::HistoryStore::default_path)
    }
}

// ============================================================================
// Tests
// ============================================================================
