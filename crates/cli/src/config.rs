//! Client configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional file,
//! then `CRMAI_*` environment variables (`__` separates nested keys, e.g.
//! `CRMAI_API__BASE_URL`), then command-line flags.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the data directory when `--config` is not given
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend connection settings
    pub api: ApiConfig,

    /// Where the session file and logs live
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend origin, e.g. `http://localhost:8000`
    pub base_url: String,

    /// Path prefix every endpoint lives under
    pub prefix: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            data_dir: default_data_dir(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            prefix: crmai_http::DEFAULT_API_PREFIX.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Values given on the command line; they win over every other source
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("crmai")
}

impl AppConfig {
    /// Load configuration from every source.
    ///
    /// An explicit `file` must exist; the default `<data_dir>/config.toml` is
    /// optional.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be parsed or a value has the wrong type
    pub fn load(file: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let defaults = Self::default();
        let data_dir = overrides
            .data_dir
            .clone()
            .unwrap_or_else(|| defaults.data_dir.clone());

        let builder = ::config::Config::builder()
            .set_default("api.base_url", defaults.api.base_url)?
            .set_default("api.prefix", defaults.api.prefix)?
            .set_default("api.timeout_secs", defaults.api.timeout_secs)?
            .set_default("data_dir", data_dir.to_string_lossy().to_string())?;

        let builder = match file {
            Some(path) => builder.add_source(::config::File::from(path)),
            None => builder.add_source(::config::File::from(data_dir.join(CONFIG_FILE)).required(false)),
        };

        let settings = builder
            .add_source(
                ::config::Environment::with_prefix("CRMAI")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("api.base_url", overrides.api_url.clone())?
            .set_override_option(
                "data_dir",
                overrides
                    .data_dir
                    .as_ref()
                    .map(|dir| dir.to_string_lossy().to_string()),
            )?
            .set_override_option("api.timeout_secs", overrides.timeout_secs)?
            .build()
            .context("failed to load configuration")?;

        settings
            .try_deserialize()
            .context("invalid configuration")
    }

    /// Write this configuration as TOML, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))
    }

    pub fn session_file(&self) -> PathBuf {
        self.data_dir.join(crmai_session::AuthConfig::STORAGE_FILE)
    }
}
