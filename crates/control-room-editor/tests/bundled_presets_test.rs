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

use control_room_core::HostContext;
use control_room_editor::default_parts;
use control_room_editor::sample::sample_scene;
use control_room_presets::{default_preset_files, load_default_presets, FieldRef};
use std::collections::BTreeSet;
use std::path::PathBuf;

fn bundled_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../presets/defaults")
}

#[test]
fn test_bundled_presets_only_store_known_fields() {
    let scene = sample_scene();
    let ctx = HostContext::new(scene.clone(), scene);
    let known: BTreeSet<FieldRef> = default_parts(&ctx)
        .iter()
        .flat_map(|part| part.preset_fields())
        .collect();

    let presets = load_default_presets(&bundled_dir());

    assert_eq!(presets.len(), default_preset_files(&bundled_dir()).len());
    assert!(!presets.is_empty());
    for preset in &presets {
        assert!(!preset.is_active());
        for (part, field, _) in preset.iter() {
            assert!(
                known.contains(&FieldRef::new(part, field)),
                "{} stores unknown field {part}/{field}",
                preset.name()
            );
        }
    }
}
