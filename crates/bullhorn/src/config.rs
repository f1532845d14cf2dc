// SPDX-FileCopyrightText: 2026 Bullhorn Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration for the shell.
//!
//! Values merge in order: built-in defaults, the XDG config file
//! (`~/.config/bullhorn/config.toml`), a `bullhorn.toml` in the working
//! directory, then `BULLHORN_*` environment variables. Later layers win.

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use bullhorn_core::BullhornError;

/// Top-level configuration tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct BullhornConfig {
    pub connection: ConnectionDefaults,
    pub shell: ShellConfig,
}

/// Defaults applied when `connect` is invoked without explicit endpoint flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ConnectionDefaults {
    pub host: String,
    pub port: u16,
    pub prefix: String,
}

impl Default for ConnectionDefaults {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 6379,
            prefix: "bull".to_string(),
        }
    }
}

/// Behavior of the interactive loop itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ShellConfig {
    /// Where history and saved connections live. Defaults to the platform
    /// data directory.
    pub data_dir: Option<PathBuf>,
    /// Default inclusive end index for listing commands.
    pub page_size: i64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            page_size: 100,
        }
    }
}

impl BullhornConfig {
    /// Directory holding mutable shell state.
    pub fn data_dir(&self) -> PathBuf {
        match &self.shell.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("bullhorn"),
        }
    }

    /// Location of the readline history file.
    pub fn history_path(&self) -> PathBuf {
        self.data_dir().join("history")
    }

    /// Location of the saved-connection registry.
    pub fn registry_path(&self) -> PathBuf {
        self.data_dir().join("connections.toml")
    }
}

fn base_figment() -> Figment {
    Figment::from(Serialized::defaults(BullhornConfig::default()))
}

fn env_provider() -> Env {
    // BULLHORN_CONNECTION_HOST -> connection.host
    Env::prefixed("BULLHORN_").split("_")
}

/// Load configuration from the default file hierarchy.
pub fn load() -> Result<BullhornConfig, BullhornError> {
    let mut figment = base_figment();
    if let Some(config_dir) = dirs::config_dir() {
        figment = figment.merge(Toml::file(config_dir.join("bullhorn").join("config.toml")));
    }
    figment
        .merge(Toml::file("bullhorn.toml"))
        .merge(env_provider())
        .extract()
        .map_err(|e| BullhornError::Validation(format!("invalid configuration: {e}")))
}

/// Load configuration from one explicit file, still honoring the environment.
pub fn load_from_path(path: &Path) -> Result<BullhornConfig, BullhornError> {
    if !path.exists() {
        return Err(BullhornError::Validation(format!(
            "configuration file {} does not exist",
            path.display()
        )));
    }
    base_figment()
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
        .map_err(|e| BullhornError::Validation(format!("invalid configuration: {e}")))
}
