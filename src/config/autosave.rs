// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Autosave store for recorded combinations
//!
//! Persists `(key_code, flags)` pairs keyed by a caller-supplied autosave
//! name, as a JSON map in a single file. Writes are atomic
//! (temp-file-then-rename) so the store is never half-written.
//!
//! The recorder core never touches this module; hosts wire the change
//! notification to [`ComboStore::save`] themselves.

use atomic_write_file::AtomicWriteFile;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use crate::config::error::StoreError;
use crate::core::types::KeyCombo;

/// File-backed map from autosave names to combinations.
pub struct ComboStore {
    path: PathBuf,
}

impl ComboStore {
    /// Creates a store backed by the given file. The file need not exist
    /// yet; a missing store reads as empty.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Reads the whole store.
    pub fn load_all(&self) -> Result<BTreeMap<String, KeyCombo>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| StoreError::Malformed {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// Reads one combination by name.
    pub fn load(&self, name: &str) -> Result<Option<KeyCombo>, StoreError> {
        Ok(self.load_all()?.get(name).copied())
    }

    /// Saves a combination under a name, replacing any previous value.
    pub fn save(&self, name: &str, combo: KeyCombo) -> Result<(), StoreError> {
        let mut all = self.load_all()?;
        all.insert(name.to_string(), combo);
        self.write_all(&all)
    }

    /// Removes a named combination. Returns whether it existed.
    pub fn remove(&self, name: &str) -> Result<bool, StoreError> {
        let mut all = self.load_all()?;
        let existed = all.remove(name).is_some();
        if existed {
            self.write_all(&all)?;
        }
        Ok(existed)
    }

    fn write_all(&self, all: &BTreeMap<String, KeyCombo>) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(all).map_err(|e| StoreError::Malformed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        let mut file = AtomicWriteFile::options()
            .open(&self.path)
            .map_err(|e| StoreError::WriteFailed(format!("Failed to open for atomic write: {}", e)))?;

        file.write_all(content.as_bytes())
            .map_err(|e| StoreError::WriteFailed(format!("Failed to write content: {}", e)))?;

        file.commit()
            .map_err(|e| StoreError::WriteFailed(format!("Failed to commit atomic write: {}", e)))?;

        Ok(())
    }
}
