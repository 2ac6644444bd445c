// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Pocketledger", "pocketledger"));

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Could not determine platform-specific data dir")]
    NoDataDir,
    #[error("Failed to create data dir {dir}")]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write slot '{key}'")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize slot '{key}'")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Named-slot persistence. Each slot holds one JSON document.
///
/// Reads are infallible by contract: a missing or unreadable slot is
/// reported as absent and the caller falls back to its default. Writes
/// surface errors so the caller can retry, but never roll anything back.
pub trait Store {
    fn load_raw(&self, key: &str) -> Option<String>;
    fn save_raw(&mut self, key: &str, raw: &str) -> Result<(), StoreError>;
}

/// Load a slot, falling back to `default` when the slot is absent or does
/// not deserialize (silent recovery from corruption).
pub fn load_or<T: DeserializeOwned>(store: &dyn Store, key: &str, default: T) -> T {
    match store.load_raw(key) {
        Some(raw) => serde_json::from_str(&raw).unwrap_or(default),
        None => default,
    }
}

pub fn save<T: Serialize>(store: &mut dyn Store, key: &str, value: &T) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.save_raw(key, &raw)
}

/// One JSON file per slot under a data directory.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open the store at the platform data directory.
    pub fn open_default() -> Result<Self, StoreError> {
        let proj = ProjectDirs::from(APP.0, APP.1, APP.2).ok_or(StoreError::NoDataDir)?;
        Self::open_at(proj.data_dir())
    }

    pub fn open_at(dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(dir).map_err(|source| StoreError::CreateDir {
            dir: dir.to_path_buf(),
            source,
        })?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Store for JsonFileStore {
    fn load_raw(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.slot_path(key)).ok()
    }

    fn save_raw(&mut self, key: &str, raw: &str) -> Result<(), StoreError> {
        fs::write(self.slot_path(key), raw).map_err(|source| StoreError::Write {
            key: key.to_string(),
            source,
        })
    }
}

/// In-memory store for tests and ephemeral use.
#[derive(Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn load_raw(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn save_raw(&mut self, key: &str, raw: &str) -> Result<(), StoreError> {
        self.slots.insert(key.to_string(), raw.to_string());
        Ok(())
    }
}
