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

//! Errors of the preset subsystem.

use control_room_core::HostError;
use thiserror::Error;

/// A convenience alias for preset operations.
pub type PresetResult<T> = Result<T, PresetError>;

/// An error raised while naming, loading or saving presets.
#[derive(Debug, Error)]
pub enum PresetError {
    /// The name is empty or contains characters other than alphanumerics and `_`.
    #[error("Invalid preset name '{0}': use letters, digits and underscores only")]
    InvalidName(String),
    /// Another user preset already uses this name.
    #[error("A preset named '{0}' already exists")]
    NameTaken(String),
    /// No user preset has this name.
    #[error("Preset not found: {0}")]
    NotFound(String),
    /// A record is valid JSON but not a preset.
    #[error("Malformed preset record: {0}")]
    MalformedRecord(String),
    /// The payload could not be parsed or produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The scene metadata rejected a read or write.
    #[error("Preset store error: {0}")]
    Store(#[from] HostError),
    /// A default preset file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
