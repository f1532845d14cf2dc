// SPDX-FileCopyrightText: 2026 Bullhorn Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Saved connection profiles, persisted as a TOML file in the data
//! directory. The file is rewritten whole on every mutation; profiles are
//! small and the shell is the only writer.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use bullhorn_core::{BullhornError, ConnectionProfile};

/// Name under which the most recent successful connection is stored.
/// Not settable or removable by the operator.
pub const LAST_USED: &str = "__last-used__";

type ProfileMap = BTreeMap<String, ConnectionProfile>;

pub struct ConnectionRegistry {
    path: PathBuf,
}

impl ConnectionRegistry {
    pub fn open(path: PathBuf) -> Self {
        Self { path }
    }

    fn load(&self) -> Result<ProfileMap, BullhornError> {
        if !self.path.exists() {
            return Ok(ProfileMap::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(registry_err)?;
        toml::from_str(&raw).map_err(|e| BullhornError::Registry {
            source: Box::new(e),
        })
    }

    fn store(&self, profiles: &ProfileMap) -> Result<(), BullhornError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(registry_err)?;
        }
        let raw = toml::to_string_pretty(profiles).map_err(|e| BullhornError::Registry {
            source: Box::new(e),
        })?;
        fs::write(&self.path, raw).map_err(registry_err)
    }

    /// Store `profile` under `name`, replacing any previous entry.
    pub fn save(&self, name: &str, profile: &ConnectionProfile) -> Result<(), BullhornError> {
        if name == LAST_USED {
            return Err(BullhornError::ReservedName(name.to_string()));
        }
        let mut profiles = self.load()?;
        profiles.insert(name.to_string(), profile.clone());
        self.store(&profiles)
    }

    /// Record the profile of the connection that just succeeded.
    pub fn save_last(&self, profile: &ConnectionProfile) -> Result<(), BullhornError> {
        let mut profiles = self.load()?;
        profiles.insert(LAST_USED.to_string(), profile.clone());
        self.store(&profiles)
    }

    /// Remove a saved profile. Returns `false` when no such entry existed.
    pub fn remove(&self, name: &str) -> Result<bool, BullhornError> {
        if name == LAST_USED {
            return Err(BullhornError::ReservedName(name.to_string()));
        }
        let mut profiles = self.load()?;
        let removed = profiles.remove(name).is_some();
        if removed {
            self.store(&profiles)?;
        }
        Ok(removed)
    }

    pub fn get(&self, name: &str) -> Result<ConnectionProfile, BullhornError> {
        self.load()?
            .remove(name)
            .ok_or_else(|| BullhornError::ProfileNotFound(name.to_string()))
    }

    /// All stored names, sorted. The reserved last-used entry shows up
    /// like any other; it is only save/remove that refuse it.
    pub fn list(&self) -> Result<Vec<String>, BullhornError> {
        Ok(self.load()?.into_keys().collect())
    }
}

fn registry_err(e: std::io::Error) -> BullhornError {
    BullhornError::Registry {
        source: Box::new(e),
    }
}
