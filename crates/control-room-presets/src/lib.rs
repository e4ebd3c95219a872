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

//! # Control Room Presets
//!
//! Named snapshots of render settings and their lifecycle.
//!
//! - [`Preset`] holds the values, keyed by part and field.
//! - [`PresetRecord`] is the flat JSON shape presets are persisted as.
//! - [`PresetStore`] moves the encoded user list in and out of the scene.
//! - [`PresetManager`] owns the user and default presets of a session and is
//!   the only component that reads or writes the store.

#![warn(missing_docs)]

pub mod defaults;
pub mod error;
pub mod manager;
pub mod preset;
pub mod record;
pub mod store;

pub use defaults::{default_preset_files, load_default_presets, load_preset_file};
pub use error::{PresetError, PresetResult};
pub use manager::{PresetManager, PRESET_BASE_NAME};
pub use preset::{sanitize_name, validate_name, FieldRef, PartFields, Preset};
pub use record::PresetRecord;
pub use store::{FileInfoStore, InMemoryStore, PresetStore, DEFAULT_STORE_KEY};
