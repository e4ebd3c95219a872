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

//! Integration tests for loading and saving presets through scene metadata.

use control_room_core::{InMemoryScene, Scalar, SceneMetadata};
use control_room_presets::{
    FileInfoStore, InMemoryStore, Preset, PresetError, PresetManager, DEFAULT_STORE_KEY,
};
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

fn scene_with_presets(payload: &str) -> Arc<InMemoryScene> {
    let scene = Arc::new(InMemoryScene::new());
    scene.set_file_info(DEFAULT_STORE_KEY, payload).unwrap();
    scene
}

#[test]
fn test_wide_preset_is_retrieved_from_scene() {
    let scene = scene_with_presets(r#"[{"name":"Wide","active":true,"camera":{"width":1920}}]"#);

    let manager = PresetManager::open(Box::new(FileInfoStore::new(scene)), None);

    let presets = manager.get_presets();
    assert_eq!(presets.len(), 1);
    assert_eq!(presets[0].name(), "Wide");
    assert!(presets[0].is_active());
    assert_eq!(presets[0].get("camera", "width"), Some(Scalar::Int(1920)));
}

#[test]
fn test_corrupted_store_yields_empty_list() {
    let scene = scene_with_presets("not json");

    let manager = PresetManager::open(Box::new(FileInfoStore::new(scene.clone())), None);

    assert!(manager.is_empty());
    // The corrupted payload is left alone until the next explicit save.
    assert_eq!(scene.file_info(DEFAULT_STORE_KEY).as_deref(), Some("not json"));
}

#[test]
fn test_save_then_reload_in_a_new_session() {
    let scene = Arc::new(InMemoryScene::new());
    let mut manager = PresetManager::open(Box::new(FileInfoStore::new(scene.clone())), None);

    let mut preset = Preset::new("Close Up").with_active(true);
    preset.set("dof", "fStop", 2.8);
    preset.set("dof", "depthOfField", true);
    manager.add_preset(preset);
    manager.save_presets().unwrap();

    let reloaded = PresetManager::open(Box::new(FileInfoStore::new(scene)), None);
    let close_up = reloaded.preset("Close_Up").expect("preset should be saved");
    assert!(close_up.is_active());
    assert_eq!(close_up.get("dof", "fStop"), Some(Scalar::Float(2.8)));
    assert_eq!(close_up.get("dof", "depthOfField"), Some(Scalar::Bool(true)));
}

#[test]
fn test_rename_collision_is_rejected_without_saving() {
    let store = Arc::new(InMemoryStore::with_payload(r#"[{"name":"A"},{"name":"B"}]"#));
    let mut manager = PresetManager::open(Box::new(store.clone()), None);

    let result = manager.rename_preset("A", "B");

    assert!(matches!(result, Err(PresetError::NameTaken(name)) if name == "B"));
    assert!(manager.has_preset_with_name("A"));
    assert_eq!(manager.len(), 2);
    assert_eq!(store.save_count(), 0);
}

#[test]
fn test_defaults_are_isolated_per_file_and_never_saved() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("hd.json"),
        r#"{"name":"HD","image_size":{"width":1920,"height":1080}}"#,
    )
    .unwrap();
    fs::write(dir.path().join("broken.json"), r#"{"active":true}"#).unwrap();

    let store = Arc::new(InMemoryStore::new());
    let manager = PresetManager::open(Box::new(store.clone()), Some(dir.path().to_path_buf()));

    assert_eq!(manager.default_presets().len(), 1);
    assert_eq!(
        manager
            .default_preset("HD")
            .and_then(|p| p.get("image_size", "height")),
        Some(Scalar::Int(1080))
    );
    assert!(!manager.has_preset_with_name("HD"));

    manager.save_presets().unwrap();
    assert_eq!(store.payload().as_deref(), Some("[]"));
}

#[test]
fn test_legacy_payload_with_escaped_quotes() {
    let scene = scene_with_presets(r#"[{\"name\": \"Legacy\", \"active\": false}]"#);
    let manager = PresetManager::open(Box::new(FileInfoStore::new(scene)), None);
    assert!(manager.has_preset_with_name("Legacy"));
}
