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

use crate::commands::presets_config::PresetsManifest;
use crate::helpers::*;
use anyhow::{Context, Result};
use control_room_core::HostContext;
use control_room_editor::default_parts;
use control_room_editor::sample::sample_scene;
use control_room_presets::{default_preset_files, load_preset_file, validate_name, FieldRef, Preset};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Checks every bundled default preset: it must parse, carry a valid unique
/// name and only store fields some part knows.
pub fn validate(dir: Option<PathBuf>) -> Result<()> {
    print_task_start("Validating Default Presets", MAGNIFIER, CYAN);

    let known = known_fields();
    let mut names: BTreeMap<String, PathBuf> = BTreeMap::new();
    let mut problems = Vec::new();
    let mut checked = 0;

    for path in preset_files(dir)? {
        checked += 1;
        let preset = match load_preset_file(&path) {
            Ok(preset) => preset,
            Err(e) => {
                problems.push(format!("{}: {e}", path.display()));
                continue;
            }
        };
        problems.extend(
            check_preset(&preset, &known)
                .into_iter()
                .map(|problem| format!("{}: {problem}", path.display())),
        );
        if let Some(first) = names.insert(preset.name().to_string(), path.clone()) {
            problems.push(format!(
                "{}: name '{}' already used by {}",
                path.display(),
                preset.name(),
                first.display()
            ));
        }
    }

    if problems.is_empty() {
        print_success(&format!("{checked} default presets are valid."));
        return Ok(());
    }
    for problem in &problems {
        print_error(problem);
    }
    anyhow::bail!("{} problems in {checked} default presets.", problems.len());
}

/// Prints the bundled default presets and their fields.
pub fn list(dir: Option<PathBuf>) -> Result<()> {
    print_task_start("Default Presets", SLIDERS, MAGENTA);
    for path in preset_files(dir)? {
        let preset = load_preset_file(&path)
            .with_context(|| format!("Failed to load '{}'", path.display()))?;
        println!(
            "{}{}{} ({} fields) {}",
            BOLD,
            preset.name(),
            RESET,
            preset.len(),
            path.display()
        );
        for (part, field, value) in preset.iter() {
            println!("    {part}/{field} = {value}");
        }
    }
    Ok(())
}

fn check_preset(preset: &Preset, known: &BTreeSet<FieldRef>) -> Vec<String> {
    let mut problems = Vec::new();
    if !validate_name(preset.name()) {
        problems.push(format!("invalid name '{}'", preset.name()));
    }
    if preset.is_empty() {
        problems.push("stores no field".to_string());
    }
    for (part, field, _) in preset.iter() {
        if !known.contains(&FieldRef::new(part, field)) {
            problems.push(format!("unknown field {part}/{field}"));
        }
    }
    problems
}

/// Every field a part can store, taken from the parts themselves.
fn known_fields() -> BTreeSet<FieldRef> {
    let scene = sample_scene();
    let ctx = HostContext::new(scene.clone(), scene);
    default_parts(&ctx)
        .iter()
        .flat_map(|part| part.preset_fields())
        .collect()
}

fn preset_files(dir: Option<PathBuf>) -> Result<Vec<PathBuf>> {
    let dirs = match dir {
        Some(dir) => vec![dir],
        None => load_manifest()?.default_directories,
    };
    let mut files = Vec::new();
    for dir in dirs.iter().filter(|dir| dir.exists()) {
        files.extend(default_preset_files(dir));
    }
    if files.is_empty() {
        print_info("No default preset found.");
    }
    Ok(files)
}

/// Loads the `Presets.toml` manifest from the workspace root.
/// If the file does not exist, it returns the default configuration.
fn load_manifest() -> Result<PresetsManifest> {
    let manifest_path = Path::new("Presets.toml");
    if !manifest_path.exists() {
        return Ok(PresetsManifest::default());
    }
    let manifest_str = fs::read_to_string(manifest_path)
        .with_context(|| format!("Failed to read manifest file at '{}'", manifest_path.display()))?;
    toml::from_str(&manifest_str)
        .with_context(|| format!("Failed to parse TOML from '{}'", manifest_path.display()))
}
