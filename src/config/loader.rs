// src/config/loader.rs
//! Client configuration file loading

use crate::config::settings::{AcquisitionSettings, SignalSettings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Client-side configuration: where the device lives and what settings to
/// assume until the first round trip seeds the store.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClientConfig {
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    #[serde(default = "defaults::request_timeout_ms")]
    pub request_timeout_ms: u64,

    #[serde(default)]
    pub acquisition: AcquisitionSettings,

    #[serde(default)]
    pub signal: SignalSettings,
}

mod defaults {
    use crate::config::constants::wire;

    pub fn base_url() -> String {
        wire::DEFAULT_BASE_URL.to_string()
    }

    pub fn request_timeout_ms() -> u64 {
        wire::DEFAULT_REQUEST_TIMEOUT_MS
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            request_timeout_ms: defaults::request_timeout_ms(),
            acquisition: AcquisitionSettings::default(),
            signal: SignalSettings::default(),
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("failed to read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Loads [`ClientConfig`] from the first existing candidate path, falling
/// back to defaults when no file is present.
pub struct ConfigLoader {
    config_paths: Vec<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_paths: Self::discover_config_paths(),
        }
    }

    /// Loader over an explicit candidate list, first match wins.
    pub fn with_paths(paths: Vec<PathBuf>) -> Self {
        Self { config_paths: paths }
    }

    /// Load the first configuration file that exists. A missing file is
    /// not an error; an unreadable or unparsable one is.
    pub fn load(&self) -> Result<ClientConfig, ConfigFileError> {
        for path in &self.config_paths {
            if path.is_file() {
                let config = Self::load_file(path)?;
                info!(path = %path.display(), "loaded client configuration");
                return Ok(config);
            }
            debug!(path = %path.display(), "no configuration file at candidate path");
        }
        info!("no configuration file found, using defaults");
        Ok(ClientConfig::default())
    }

    /// Load and parse one specific file.
    pub fn load_file(path: &Path) -> Result<ClientConfig, ConfigFileError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigFileError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn discover_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("scope-link.toml")];
        if let Some(home) = std::env::var_os("HOME") {
            paths.push(
                PathBuf::from(home)
                    .join(".config")
                    .join("scope-link")
                    .join("config.toml"),
            );
        }
        paths.push(PathBuf::from("/etc/scope-link/config.toml"));
        paths
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientConfig {
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.request_timeout_ms)
    }

    /// Endpoint URL under the configured base, slash-normalized.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}
