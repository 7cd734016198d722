//! Configuration for gemgauge
//!
//! Supports loading config from:
//! - Environment variables (highest priority)
//! - ./gemgauge.toml in the working directory
//! - ~/.config/gemgauge/config.toml

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default timeout for the registry forward call, in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GaugeConfig {
    /// Directory holding the result stores (default: ~/.cache/gemgauge)
    pub data_dir: Option<PathBuf>,

    #[serde(default)]
    pub registry: RegistryConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RegistryConfig {
    /// Registry metrics endpoint to forward reports to. Unset = no forwarding.
    pub url: Option<String>,

    /// Timeout for the forward call in seconds (default: 5)
    pub timeout_secs: Option<u64>,
}

impl GaugeConfig {
    /// Load config from all sources, with priority:
    /// 1. Environment variables (highest)
    /// 2. ./gemgauge.toml
    /// 3. User config (~/.config/gemgauge/config.toml)
    pub fn load() -> Result<Self> {
        let mut config = GaugeConfig::default();

        if let Some(user_config) = Self::user_config_path()
            .filter(|p| p.exists())
            .and_then(|p| std::fs::read_to_string(&p).ok())
            .and_then(|content| toml::from_str::<GaugeConfig>(&content).ok())
        {
            config.merge(user_config);
        }

        let local = Path::new("gemgauge.toml");
        if local.exists() {
            let content = std::fs::read_to_string(local)?;
            config.merge(toml::from_str(&content)?);
        }

        config.apply_env();
        Ok(config)
    }

    /// Load config from an explicit file path, then apply env overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: GaugeConfig = toml::from_str(&content)?;
        config.apply_env();
        Ok(config)
    }

    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gemgauge").join("config.toml"))
    }

    /// Environment variables override everything
    fn apply_env(&mut self) {
        if let Ok(dir) = std::env::var("GEMGAUGE_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Ok(url) = std::env::var("GEMGAUGE_REGISTRY_URL") {
            self.registry.url = Some(url);
        }
        if let Ok(secs) = std::env::var("GEMGAUGE_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                self.registry.timeout_secs = Some(secs);
            }
        }
    }

    /// Merge another config into this one (other takes priority)
    fn merge(&mut self, other: GaugeConfig) {
        if other.data_dir.is_some() {
            self.data_dir = other.data_dir;
        }
        if other.registry.url.is_some() {
            self.registry.url = other.registry.url;
        }
        if other.registry.timeout_secs.is_some() {
            self.registry.timeout_secs = other.registry.timeout_secs;
        }
    }

    /// Resolve the data directory, falling back to the user cache dir.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("gemgauge")
        })
    }

    /// Registry sink URL, if forwarding is configured
    pub fn registry_url(&self) -> Option<&str> {
        self.registry.url.as_deref()
    }

    /// Timeout for the registry forward call
    pub fn forward_timeout(&self) -> Duration {
        Duration::from_secs(self.registry.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Starter config written by `gemgauge init`
    pub fn starter_toml() -> &'static str {
        r#"# gemgauge configuration
#
# Where benchmark results, scan results, and reports are stored.
# Default: ~/.cache/gemgauge
# data_dir = "/var/lib/gemgauge"

[registry]
# Registry metrics endpoint. Reports are POSTed here after being persisted.
# Leave unset to skip forwarding.
# url = "http://localhost:8080/api/v1/metrics/reports"

# Timeout for the forward call in seconds.
# timeout_secs = 5
"#
    }
}
