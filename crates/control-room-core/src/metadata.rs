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

//! String metadata saved inside the host scene file.

use crate::error::HostResult;

/// Key/value string storage that travels with the scene file.
pub trait SceneMetadata: Send + Sync {
    /// Reads a metadata entry.
    fn file_info(&self, key: &str) -> Option<String>;

    /// Writes a metadata entry, replacing any previous value.
    fn set_file_info(&self, key: &str, value: &str) -> HostResult<()>;
}
