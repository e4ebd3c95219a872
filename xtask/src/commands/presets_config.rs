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

use serde::Deserialize;
use std::path::PathBuf;

/// Represents the structure of the `Presets.toml` manifest file.
#[derive(Deserialize, Debug)]
pub struct PresetsManifest {
    /// Directories holding bundled default presets.
    pub default_directories: Vec<PathBuf>,
}

impl Default for PresetsManifest {
    /// Used when `Presets.toml` is not found: a single `presets/defaults`
    /// directory.
    fn default() -> Self {
        Self {
            default_directories: vec![PathBuf::from("presets/defaults")],
        }
    }
}
