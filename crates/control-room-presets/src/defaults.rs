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

//! Loading of the read-only default presets bundled with the tool.

use crate::error::PresetResult;
use crate::preset::Preset;
use crate::record::decode_record;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Lists the `*.json` files directly inside `dir`, sorted by file name.
///
/// A missing directory yields an empty list.
pub fn default_preset_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        log::debug!("No default preset directory at {}", dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Failed to read default preset entry: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    files
}

/// Reads one default preset file.
pub fn load_preset_file(path: &Path) -> PresetResult<Preset> {
    let text = fs::read_to_string(path)?;
    let record = decode_record(&text)?;
    Ok(Preset::from_record(record))
}

/// Loads every default preset of `dir`.
///
/// Each file is parsed on its own: a file that cannot be read or parsed is
/// logged and skipped. Default presets are never active.
pub fn load_default_presets(dir: &Path) -> Vec<Preset> {
    default_preset_files(dir)
        .into_iter()
        .filter_map(|path| match load_preset_file(&path) {
            Ok(preset) => Some(preset.with_active(false)),
            Err(e) => {
                log::warn!("Skipping default preset {}: {e}", path.display());
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use control_room_core::Scalar;
    use tempfile::tempdir;

    #[test]
    fn loads_sorted_and_skips_bad_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b_close.json"), r#"{"name":"Close","dof":{"fStop":2.8}}"#).unwrap();
        fs::write(dir.path().join("a_wide.json"), r#"{"name":"Wide","active":true}"#).unwrap();
        fs::write(dir.path().join("c_broken.json"), "{ not json").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("d.json"), r#"{"name":"Deep"}"#).unwrap();

        let presets = load_default_presets(dir.path());

        let names: Vec<_> = presets.iter().map(Preset::name).collect();
        assert_eq!(names, vec!["Wide", "Close"]);
        assert!(presets.iter().all(|p| !p.is_active()));
        assert_eq!(presets[1].get("dof", "fStop"), Some(Scalar::Float(2.8)));
    }

    #[test]
    fn missing_directory_is_empty() {
        let dir = tempdir().unwrap();
        assert!(load_default_presets(&dir.path().join("absent")).is_empty());
    }
}
