//! RON configuration: logging, fetch limits and the plugin list.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use discovery_core::{OptionItem, OptionSet, PluginDescriptor, PluginRegistry};
use discovery_engine::{FetchSettings, SourceEndpoints};
use serde::Deserialize;
use thiserror::Error;

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_PATH: &str = "./discovery.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0:?}")]
    NotFound(PathBuf),
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_destination: LogDestination,
    #[serde(default)]
    pub fetch: FetchConfig,
    pub plugins: Vec<PluginConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_bytes: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        let defaults = FetchSettings::default();
        Self {
            connect_timeout_ms: defaults.connect_timeout.as_millis() as u64,
            request_timeout_ms: defaults.request_timeout.as_millis() as u64,
            max_bytes: defaults.max_bytes,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PluginConfig {
    pub id: String,
    pub label: String,
    pub endpoint: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub type_options: Vec<(String, String)>,
    #[serde(default)]
    pub region_options: Vec<(String, String)>,
    #[serde(default)]
    pub status_options: Vec<(String, String)>,
    #[serde(default)]
    pub sort_options: Vec<(String, String)>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn to_options(pairs: &[(String, String)]) -> Vec<OptionItem> {
    pairs
        .iter()
        .map(|(value, label)| OptionItem::new(value.clone(), label.clone()))
        .collect()
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::from_ron_str(&content)
    }

    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig =
            ron::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for plugin in &self.plugins {
            if plugin.id.trim().is_empty() {
                return Err(ConfigError::Invalid("plugin with empty id".to_string()));
            }
            if !seen.insert(plugin.id.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate plugin id {:?}", plugin.id)));
            }
        }
        if !self.plugins.iter().any(|plugin| !plugin.disabled) {
            return Err(ConfigError::Invalid("no enabled plugin".to_string()));
        }
        Ok(())
    }

    pub fn registry(&self) -> PluginRegistry {
        PluginRegistry::new(self.plugins.iter().map(|plugin| {
            let descriptor = PluginDescriptor::new(
                plugin.id.clone(),
                plugin.label.clone(),
                OptionSet {
                    type_options: to_options(&plugin.type_options),
                    region_options: to_options(&plugin.region_options),
                    status_options: to_options(&plugin.status_options),
                    sort_options: to_options(&plugin.sort_options),
                },
            );
            if plugin.disabled {
                descriptor.disabled()
            } else {
                descriptor
            }
        }))
    }

    pub fn endpoints(&self) -> SourceEndpoints {
        self.plugins
            .iter()
            .map(|plugin| (plugin.id.clone(), plugin.endpoint.clone()))
            .collect()
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_millis(self.fetch.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.fetch.request_timeout_ms),
            max_bytes: self.fetch.max_bytes,
        }
    }
}
