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

//! The [`Preset`] value: a named, partial snapshot of field values across parts.

use crate::record::PresetRecord;
use control_room_core::Scalar;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The fields one part stored in a preset, keyed by field name.
pub type PartFields = BTreeMap<String, Scalar>;

/// Identifies one field of one part, e.g. `sampling/camera_aa`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldRef {
    /// The owning part's name.
    pub part: String,
    /// The field key inside the part.
    pub field: String,
}

impl FieldRef {
    /// Creates a field reference.
    pub fn new(part: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            part: part.into(),
            field: field.into(),
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.part, self.field)
    }
}

/// Replaces every whitespace character with `_`.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Returns `true` if `name` is non-empty and made of alphanumerics and `_` only.
pub fn validate_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// A named snapshot of part fields.
///
/// Two presets are equal when their names are equal, whatever their fields.
/// A manager never holds two user presets with the same name, so the name is
/// the preset's identity.
#[derive(Debug, Clone, Default)]
pub struct Preset {
    name: String,
    active: bool,
    fields: BTreeMap<String, PartFields>,
}

impl Preset {
    /// Creates an empty, inactive preset. Whitespace in `name` becomes `_`.
    pub fn new(name: &str) -> Self {
        Self {
            name: sanitize_name(name),
            active: false,
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style variant of [`set_active`](Self::set_active).
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Rebuilds a preset from its wire record.
    pub fn from_record(record: PresetRecord) -> Self {
        Self {
            name: sanitize_name(&record.name),
            active: record.active,
            fields: record.parts,
        }
    }

    /// Produces the wire record. The preset itself is left untouched.
    pub fn to_record(&self) -> PresetRecord {
        PresetRecord {
            name: self.name.clone(),
            active: self.active,
            parts: self.fields.clone(),
        }
    }

    /// The preset name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the preset. Callers are expected to validate the name first.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Whether this preset is the active one of its manager.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Sets the active flag.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Stores a field value, creating the part entry if needed.
    pub fn set(&mut self, part: &str, key: &str, value: impl Into<Scalar>) {
        self.fields
            .entry(part.to_string())
            .or_default()
            .insert(key.to_string(), value.into());
    }

    /// Reads a field value.
    pub fn get(&self, part: &str, key: &str) -> Option<Scalar> {
        self.fields.get(part)?.get(key).copied()
    }

    /// Returns `true` if the field was stored.
    pub fn contains(&self, part: &str, key: &str) -> bool {
        self.fields
            .get(part)
            .is_some_and(|fields| fields.contains_key(key))
    }

    /// Removes a field. The part entry goes away with its last field.
    pub fn remove(&mut self, part: &str, key: &str) -> Option<Scalar> {
        let fields = self.fields.get_mut(part)?;
        let removed = fields.remove(key);
        if fields.is_empty() {
            self.fields.remove(part);
        }
        removed
    }

    /// Names of the parts that stored at least one field.
    pub fn parts(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// The fields stored by one part.
    pub fn fields(&self, part: &str) -> Option<&PartFields> {
        self.fields.get(part)
    }

    /// Iterates every stored field as `(part, field, value)`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, Scalar)> {
        self.fields.iter().flat_map(|(part, fields)| {
            fields
                .iter()
                .map(move |(key, value)| (part.as_str(), key.as_str(), *value))
        })
    }

    /// Total number of stored fields across all parts.
    pub fn len(&self) -> usize {
        self.fields.values().map(BTreeMap::len).sum()
    }

    /// Returns `true` if no field is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every field not listed in `allowed`.
    ///
    /// Part entries left empty are dropped too. Filtering twice with the same
    /// list changes nothing the second time.
    pub fn filter(&mut self, allowed: &[FieldRef]) {
        for (part, fields) in self.fields.iter_mut() {
            fields.retain(|key, _| {
                allowed
                    .iter()
                    .any(|r| r.part == *part && r.field == *key)
            });
        }
        self.fields.retain(|_, fields| !fields.is_empty());
    }
}

impl PartialEq for Preset {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Preset {}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Preset({}", self.name)?;
        if self.active {
            write!(f, ", active")?;
        }
        write!(f, ", {} fields)", self.len())
    }
}
