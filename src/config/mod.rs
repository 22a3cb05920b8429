//
//  pagerduty-cli
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Settings for `pd` live in a TOML file in the platform configuration
//! directory:
//!
//! - **Linux**: `~/.config/pd/config.toml`
//! - **macOS**: `~/Library/Application Support/pd/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\pd\config.toml`
//!
//! A missing file means defaults. API tokens are never written here; they
//! are kept in the system keyring (see [`crate::auth::KeyringStore`]).
//!
//! ## Example Configuration File
//!
//! ```toml
//! [core]
//! default_profile = "work"
//! batch_size = 25
//! color = "auto"
//!
//! [profiles.work]
//! subdomain = "acme"
//! email = "jane@acme.com"
//! ```
//!
//! ## Keys
//!
//! `pd config get/set` address settings by key:
//!
//! | Key | Field |
//! |-----|-------|
//! | `api_url` | `core.api_url` |
//! | `default_profile` | `core.default_profile` |
//! | `batch_size` | `core.batch_size` |
//! | `color` | `core.color` |
//! | `profiles.<name>.subdomain` | `profiles[name].subdomain` |
//! | `profiles.<name>.email` | `profiles[name].email` |

mod file;

pub use file::*;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::{DEFAULT_BASE_URL, DEFAULT_BATCH_SIZE};

/// Name of the profile used when none is selected.
pub const DEFAULT_PROFILE: &str = "default";

/// Complete configuration state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub core: CoreConfig,

    /// Per-account settings keyed by profile name.
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileConfig>,
}

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Overrides the API base URL (`https://api.pagerduty.com`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Profile used when neither `--profile` nor `PD_PROFILE` is given.
    #[serde(default = "default_profile")]
    pub default_profile: String,

    /// Maximum number of concurrent requests per batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// `auto`, `always` or `never`.
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_profile() -> String {
    DEFAULT_PROFILE.to_string()
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_color() -> String {
    "auto".to_string()
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            default_profile: default_profile(),
            batch_size: default_batch_size(),
            color: default_color(),
        }
    }
}

/// Settings for one PagerDuty account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProfileConfig {
    /// Account subdomain (`<subdomain>.pagerduty.com`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,

    /// Email of the account owner, sent as the `From` header where required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Config {
    /// Loads the configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from `path`, or defaults when it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            return Ok(Self::default());
        }
        let content = read_config_file(path)?;
        toml::from_str(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    /// Returns where the configuration file lives. The file may not exist.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "pd")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Returns the API base URL, honoring the `api_url` override.
    pub fn api_url(&self) -> &str {
        self.core.api_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Returns the settings of a profile.
    pub fn profile(&self, name: &str) -> Option<&ProfileConfig> {
        self.profiles.get(name)
    }

    /// Reads a setting by key.
    ///
    /// Returns `None` for unknown keys and for unset optional settings.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pagerduty_cli::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.get("batch_size"), Some("25".to_string()));
    /// assert_eq!(config.get("api_url"), None);
    /// ```
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api_url" => self.core.api_url.clone(),
            "default_profile" => Some(self.core.default_profile.clone()),
            "batch_size" => Some(self.core.batch_size.to_string()),
            "color" => Some(self.core.color.clone()),
            _ => {
                let (profile, field) = split_profile_key(key)?;
                let profile = self.profiles.get(profile)?;
                match field {
                    "subdomain" => profile.subdomain.clone(),
                    "email" => profile.email.clone(),
                    _ => None,
                }
            }
        }
    }

    /// Updates a setting by key.
    ///
    /// Profile keys create the profile on first use. Changes are persisted
    /// only by [`Config::save`].
    ///
    /// # Errors
    ///
    /// Fails for unknown keys and for values of the wrong shape.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api_url" => {
                let parsed = url::Url::parse(value)
                    .with_context(|| format!("Invalid URL '{}'", value))?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    bail!("api_url must be an http(s) URL");
                }
                self.core.api_url = Some(value.trim_end_matches('/').to_string());
            }
            "default_profile" => self.core.default_profile = value.to_string(),
            "batch_size" => {
                let size: usize = value
                    .parse()
                    .with_context(|| format!("batch_size must be a number, got '{}'", value))?;
                if size == 0 {
                    bail!("batch_size must be at least 1");
                }
                self.core.batch_size = size;
            }
            "color" => {
                if !matches!(value, "auto" | "always" | "never") {
                    bail!("color must be one of: auto, always, never");
                }
                self.core.color = value.to_string();
            }
            _ => {
                let Some((profile, field @ ("subdomain" | "email"))) = split_profile_key(key) else {
                    bail!("Unknown configuration key '{}'", key);
                };
                let value = Some(value.to_string()).filter(|v| !v.trim().is_empty());
                let entry = self.profiles.entry(profile.to_string()).or_default();
                if field == "subdomain" {
                    entry.subdomain = value;
                } else {
                    entry.email = value;
                }
            }
        }
        Ok(())
    }

    /// Lists every set value as `(key, value)` pairs.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut entries = Vec::new();
        for key in ["api_url", "default_profile", "batch_size", "color"] {
            if let Some(value) = self.get(key) {
                entries.push((key.to_string(), value));
            }
        }
        for (name, profile) in &self.profiles {
            if let Some(subdomain) = &profile.subdomain {
                entries.push((format!("profiles.{}.subdomain", name), subdomain.clone()));
            }
            if let Some(email) = &profile.email {
                entries.push((format!("profiles.{}.email", name), email.clone()));
            }
        }
        entries
    }
}

fn split_profile_key(key: &str) -> Option<(&str, &str)> {
    let rest = key.strip_prefix("profiles.")?;
    let (profile, field) = rest.rsplit_once('.')?;
    (!profile.is_empty()).then_some((profile, field))
}
