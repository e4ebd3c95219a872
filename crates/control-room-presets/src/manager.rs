// Copyright 2025 eraflo
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

//! The preset registry of a host session.

use crate::defaults::load_default_presets;
use crate::error::{PresetError, PresetResult};
use crate::preset::{validate_name, Preset};
use crate::record::{decode_records, encode_records, PresetRecord};
use crate::store::PresetStore;
use std::path::{Path, PathBuf};

/// Base of the names handed out by [`PresetManager::next_preset_name`].
pub const PRESET_BASE_NAME: &str = "Preset";

/// Owns the user presets of a session and the read-only default presets.
///
/// The manager is the only component that talks to the [`PresetStore`]. Every
/// mutation is in memory until [`save_presets`](Self::save_presets) is called.
///
/// Invariants on the user list: names are unique, and at most one preset is
/// active.
#[derive(Debug)]
pub struct PresetManager {
    store: Box<dyn PresetStore>,
    defaults_dir: Option<PathBuf>,
    presets: Vec<Preset>,
    defaults: Vec<Preset>,
    hydrated: bool,
}

impl PresetManager {
    /// Creates an empty manager. Nothing is read until [`initialize`](Self::initialize).
    pub fn new(store: Box<dyn PresetStore>, defaults_dir: Option<PathBuf>) -> Self {
        Self {
            store,
            defaults_dir,
            presets: Vec::new(),
            defaults: Vec::new(),
            hydrated: false,
        }
    }

    /// Creates a manager and hydrates it from the store and the defaults directory.
    pub fn open(store: Box<dyn PresetStore>, defaults_dir: Option<PathBuf>) -> Self {
        let mut manager = Self::new(store, defaults_dir);
        manager.initialize();
        manager
    }

    /// Hydrates the manager the first time it is called. Later calls do nothing.
    pub fn initialize(&mut self) {
        if self.hydrated {
            return;
        }
        self.retrieve_presets();
        self.retrieve_default_presets();
        self.hydrated = true;
        log::info!(
            "PresetManager initialized with {} user presets and {} defaults.",
            self.presets.len(),
            self.defaults.len()
        );
    }

    /// Whether [`initialize`](Self::initialize) already ran.
    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// The directory default presets are loaded from.
    pub fn defaults_dir(&self) -> Option<&Path> {
        self.defaults_dir.as_deref()
    }

    /// Forgets every user preset. The store is untouched.
    pub fn clear(&mut self) {
        self.presets.clear();
    }

    /// Adds a preset, replacing any user preset with the same name.
    ///
    /// If the incoming preset is active, every other preset is deactivated.
    pub fn add_preset(&mut self, preset: Preset) {
        self.presets.retain(|existing| *existing != preset);
        if preset.is_active() {
            for existing in &mut self.presets {
                existing.set_active(false);
            }
        }
        self.presets.push(preset);
    }

    /// Removes a user preset by name. `None` and unknown names are ignored.
    pub fn remove_preset(&mut self, name: Option<&str>) -> Option<Preset> {
        let name = name?;
        let index = self.presets.iter().position(|p| p.name() == name)?;
        Some(self.presets.remove(index))
    }

    /// Makes `name` the only active preset. Returns `false`, changing nothing,
    /// if no user preset has that name.
    pub fn set_preset_active(&mut self, name: &str) -> bool {
        if !self.has_preset_with_name(name) {
            return false;
        }
        for preset in &mut self.presets {
            let active = preset.name() == name;
            preset.set_active(active);
        }
        true
    }

    /// The active user preset, if any.
    pub fn active_preset(&self) -> Option<&Preset> {
        self.presets.iter().find(|p| p.is_active())
    }

    /// Reloads the user presets from the store.
    ///
    /// A payload that cannot be decoded leaves the list empty with a warning.
    /// When several records claim to be active, only the first keeps the flag.
    pub fn retrieve_presets(&mut self) {
        self.clear();

        let payload = match self.store.load() {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                log::debug!("No saved presets in the store.");
                return;
            }
            Err(e) => {
                log::warn!("Failed to read saved presets: {e}");
                return;
            }
        };

        let records = match decode_records(&payload) {
            Ok(records) => records,
            Err(e) => {
                log::warn!("Saved presets are corrupted and were ignored: {e}");
                return;
            }
        };

        let mut found_active = false;
        for record in records {
            let mut preset = Preset::from_record(record);
            if self.has_preset_with_name(preset.name()) {
                log::warn!("Duplicate saved preset '{}' ignored.", preset.name());
                continue;
            }
            if preset.is_active() {
                if found_active {
                    log::warn!(
                        "Preset '{}' was also marked active; keeping the first one.",
                        preset.name()
                    );
                    preset.set_active(false);
                }
                found_active = true;
            }
            self.presets.push(preset);
        }
        log::debug!("Retrieved {} saved presets.", self.presets.len());
    }

    /// Reloads the default presets from the defaults directory.
    pub fn retrieve_default_presets(&mut self) {
        self.defaults = match &self.defaults_dir {
            Some(dir) => load_default_presets(dir),
            None => Vec::new(),
        };
    }

    /// Writes the user presets to the store as one JSON array.
    pub fn save_presets(&self) -> PresetResult<()> {
        let records: Vec<PresetRecord> = self.presets.iter().map(Preset::to_record).collect();
        let payload = encode_records(&records)?;
        self.store.save(&payload)?;
        log::debug!("Saved {} presets.", records.len());
        Ok(())
    }

    /// The user presets sorted by name.
    pub fn get_presets(&self) -> Vec<&Preset> {
        let mut presets: Vec<&Preset> = self.presets.iter().collect();
        presets.sort_by(|a, b| a.name().cmp(b.name()));
        presets
    }

    /// The read-only default presets, in file name order.
    pub fn default_presets(&self) -> &[Preset] {
        &self.defaults
    }

    /// Looks up a user preset.
    pub fn preset(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name() == name)
    }

    /// Looks up a user preset for modification.
    pub fn preset_mut(&mut self, name: &str) -> Option<&mut Preset> {
        self.presets.iter_mut().find(|p| p.name() == name)
    }

    /// Looks up a default preset.
    pub fn default_preset(&self, name: &str) -> Option<&Preset> {
        self.defaults.iter().find(|p| p.name() == name)
    }

    /// Number of user presets.
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Returns `true` if there is no user preset.
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Returns `true` if a user preset has this name. Defaults are not considered.
    pub fn has_preset_with_name(&self, name: &str) -> bool {
        self.preset(name).is_some()
    }

    /// Renames a user preset in memory.
    ///
    /// The new name must be non-empty, made of alphanumerics and `_`, and not
    /// used by another user preset. A rejected rename changes nothing.
    pub fn rename_preset(&mut self, old: &str, new: &str) -> PresetResult<()> {
        if !validate_name(new) {
            return Err(PresetError::InvalidName(new.to_string()));
        }
        if old != new && self.has_preset_with_name(new) {
            return Err(PresetError::NameTaken(new.to_string()));
        }
        let preset = self
            .preset_mut(old)
            .ok_or_else(|| PresetError::NotFound(old.to_string()))?;
        preset.set_name(new);
        Ok(())
    }

    /// The first `Preset<N>` name (N from 1) no user preset uses.
    pub fn next_preset_name(&self) -> String {
        (1..)
            .map(|n| format!("{PRESET_BASE_NAME}{n}"))
            .find(|name| !self.has_preset_with_name(name))
            .unwrap_or_else(|| PRESET_BASE_NAME.to_string())
    }
}
