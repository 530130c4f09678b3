// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client configuration management.
//!
//! Configuration is stored in `<config dir>/marquee/config.toml` and includes:
//! - `backend_url`: Base URL of the movie service (e.g., "http://localhost:3001")
//! - `api_prefix`: Path prefix of the movie endpoints (`/health` sits outside it)
//! - `token`: Optional bearer token sent with movie requests
//! - `[sync]`: Probe, drain and request timing
//!
//! Environment variables override the file, and command-line flags override
//! both.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::env;
use crate::error::{Error, Result};

const APP_DIR_NAME: &str = "marquee";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the movie service.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// Path prefix of the movie endpoints.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    /// Bearer token for movie requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Directory for the queue, cache and lock files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_dir: Option<PathBuf>,
    /// Log file for `watch`. Logs go to stderr when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Sync timing.
    #[serde(default)]
    pub sync: SyncConfig,
}

/// Timing for connectivity probes and queue drains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Health probe bound in milliseconds (default: 5000).
    #[serde(default = "default_health_timeout_ms")]
    pub health_timeout_ms: u64,
    /// Interval between health probes in milliseconds (default: 10000).
    #[serde(default = "default_health_interval_ms")]
    pub health_interval_ms: u64,
    /// Interval between opportunistic drains in milliseconds (default: 10000).
    #[serde(default = "default_sync_interval_ms")]
    pub sync_interval_ms: u64,
    /// Bound on each remote call in milliseconds (default: 10000).
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Page size used when fetching the full collection (default: 100).
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
}

fn default_backend_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_health_timeout_ms() -> u64 {
    5_000
}

fn default_health_interval_ms() -> u64 {
    10_000
}

fn default_sync_interval_ms() -> u64 {
    10_000
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_page_limit() -> u32 {
    100
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            health_timeout_ms: default_health_timeout_ms(),
            health_interval_ms: default_health_interval_ms(),
            sync_interval_ms: default_sync_interval_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            page_limit: default_page_limit(),
        }
    }
}

impl SyncConfig {
    pub fn health_timeout(&self) -> Duration {
        Duration::from_millis(self.health_timeout_ms)
    }

    pub fn health_interval(&self) -> Duration {
        Duration::from_millis(self.health_interval_ms.max(1))
    }

    pub fn sync_interval(&self) -> Duration {
        Duration::from_millis(self.sync_interval_ms.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn page_limit(&self) -> u32 {
        self.page_limit.max(1)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backend_url: default_backend_url(),
            api_prefix: default_api_prefix(),
            token: None,
            state_dir: None,
            log_file: None,
            sync: SyncConfig::default(),
        }
    }
}

impl Config {
    /// Parses a TOML document.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("failed to parse config: {}", e)))
    }

    /// Loads configuration from `path`, or from the default location.
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    /// Environment overrides are applied on top.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|e| {
                    Error::Config(format!("failed to read {}: {}", path.display(), e))
                })?;
                Config::parse(&content)?
            }
            None => match default_config_path() {
                Some(path) if path.is_file() => {
                    let content = fs::read_to_string(&path)?;
                    Config::parse(&content)?
                }
                _ => Config::default(),
            },
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Applies `MARQUEE_*` environment overrides.
    pub fn apply_env(&mut self) {
        if let Some(url) = env::backend_url() {
            self.backend_url = url;
        }
        if let Some(token) = env::token() {
            self.token = Some(token);
        }
        if let Some(dir) = env::state_dir() {
            self.state_dir = Some(dir);
        }
    }

    /// Checks that the backend URL is usable.
    pub fn validate(&self) -> Result<()> {
        let url = &self.backend_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "invalid backend_url '{}': must start with http:// or https://",
                url
            )));
        }
        if !self.api_prefix.is_empty() && !self.api_prefix.starts_with('/') {
            return Err(Error::Config(format!(
                "invalid api_prefix '{}': must start with '/'",
                self.api_prefix
            )));
        }
        Ok(())
    }

    /// Resolves the state directory.
    ///
    /// Order: configured/env value, `$XDG_STATE_HOME/marquee`, then
    /// `~/.local/state/marquee`.
    pub fn resolve_state_dir(&self) -> PathBuf {
        if let Some(dir) = &self.state_dir {
            return dir.clone();
        }
        if let Some(dir) = env::xdg_state_home() {
            return dir.join(APP_DIR_NAME);
        }
        dirs::home_dir()
            .map(|h| h.join(".local/state").join(APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(".local/state").join(APP_DIR_NAME))
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))
    }
}

/// Default location of the config file.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
