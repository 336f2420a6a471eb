//! # Application Config
//!
//! A single YAML file holding the data directory and the few display and
//! timing knobs the store uses.
//!
//! ## YAML Format
//!
//! ```yaml
//! data_directory: "/home/pastor/Documents/Church Dashboard"
//! auth_latency_ms: 1000
//! birthday_display_limit: 5
//! new_member_window_days: 30
//! services:
//!   - Sunday Morning
//!   - Sunday Evening
//! visitor_sources:
//!   - Walk-in
//!   - Online
//! ```
//!
//! The file is read from `$CHURCH_DASHBOARD_CONFIG` when set, otherwise from
//! `config.yaml` inside the default data directory. A missing file yields the
//! defaults, which are written back so they can be edited.

use anyhow::{bail, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::dashboard_service::DashboardOptions;

pub const CONFIG_ENV_VAR: &str = "CHURCH_DASHBOARD_CONFIG";
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Ten years
pub const MAX_NEW_MEMBER_WINDOW_DAYS: i64 = 3650;
pub const MAX_AUTH_LATENCY_MS: u64 = 60_000;

/// `<Documents>/Church Dashboard`, or `./church-dashboard-data` when the
/// platform has no documents directory
pub fn default_data_directory() -> PathBuf {
    dirs::document_dir()
        .map(|docs| docs.join("Church Dashboard"))
        .unwrap_or_else(|| PathBuf::from("church-dashboard-data"))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the JSON collection files live
    pub data_directory: PathBuf,
    /// Simulated delay for login and registration
    pub auth_latency_ms: u64,
    pub birthday_display_limit: usize,
    pub new_member_window_days: i64,
    /// Service names offered when taking attendance
    pub services: Vec<String>,
    /// Answers offered for "how did you hear about us"
    pub visitor_sources: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_directory: default_data_directory(),
            auth_latency_ms: 1000,
            birthday_display_limit: 5,
            new_member_window_days: 30,
            services: [
                "Sunday Morning",
                "Sunday Evening",
                "Wednesday Evening",
                "Bible Study",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            visitor_sources: [
                "Walk-in",
                "Friend Invitation",
                "Online",
                "Community Event",
                "Advertisement",
                "Other",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl AppConfig {
    /// Load from `$CHURCH_DASHBOARD_CONFIG` or the default location
    pub fn load() -> Result<Self> {
        let path = match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => PathBuf::from(path),
            None => default_data_directory().join(CONFIG_FILE_NAME),
        };
        Self::load_from(&path)
    }

    /// Load `path`, creating it with defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let yaml = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            let config: AppConfig = serde_yaml::from_str(&yaml)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?;
            config
                .validate()
                .with_context(|| format!("Invalid config file {}", path.display()))?;
            debug!("Loaded config from {:?}", path);
            Ok(config)
        } else {
            let config = AppConfig::default();
            config.save_to(path)?;
            info!("Created default config at {:?}", path);
            Ok(config)
        }
    }

    /// Write the config as YAML using a temp file and rename
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create config directory {}", parent.display())
                })?;
            }
        }

        let yaml = serde_yaml::to_string(self).context("Failed to serialize config")?;
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, yaml)
            .with_context(|| format!("Failed to write config to {}", temp_path.display()))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to move config into place at {}", path.display()))?;

        debug!("Saved config to {:?}", path);
        Ok(())
    }

    /// Reject values the dashboard cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(0..=MAX_NEW_MEMBER_WINDOW_DAYS).contains(&self.new_member_window_days) {
            bail!(
                "new_member_window_days must be between 0 and {}, got {}",
                MAX_NEW_MEMBER_WINDOW_DAYS,
                self.new_member_window_days
            );
        }
        if self.auth_latency_ms > MAX_AUTH_LATENCY_MS {
            bail!(
                "auth_latency_ms must be at most {}, got {}",
                MAX_AUTH_LATENCY_MS,
                self.auth_latency_ms
            );
        }
        if self.services.iter().any(|s| s.trim().is_empty()) {
            bail!("services cannot contain blank names");
        }
        if self.visitor_sources.iter().any(|s| s.trim().is_empty()) {
            bail!("visitor_sources cannot contain blank names");
        }
        Ok(())
    }

    pub fn auth_latency(&self) -> Duration {
        Duration::from_millis(self.auth_latency_ms)
    }

    pub fn dashboard_options(&self) -> DashboardOptions {
        DashboardOptions {
            birthday_display_limit: self.birthday_display_limit,
            new_member_window_days: self.new_member_window_days,
        }
    }
}
