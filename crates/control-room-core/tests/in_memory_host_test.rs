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

//! Integration tests for driving the in-memory scene through `HostContext`.

use control_room_core::memory::InMemoryScene;
use control_room_core::{
    AttributePath, EventBus, HostContext, HostError, HostEvent, OverrideHost, OverrideKind,
    RenderLayer, Scalar,
};
use std::sync::Arc;

fn render_scene() -> Arc<InMemoryScene> {
    let scene = Arc::new(InMemoryScene::new());
    scene.add_node("defaultResolution", "resolution");
    scene.define("defaultResolution", "width", 1920);
    scene.define("defaultResolution", "height", 1080);
    scene.add_node("perspShape", "camera");
    scene.define("perspShape", "fStop", 5.6);
    scene
}

#[test]
fn test_context_reads_and_writes_through_host() {
    let scene = render_scene();
    let ctx = HostContext::new(scene.clone(), scene.clone());
    let width = AttributePath::new("defaultResolution", "width");

    ctx.set(&width, 1280).unwrap();

    assert_eq!(ctx.get(&width).unwrap(), Scalar::Int(1280));
    assert!(ctx.visible_layer().is_default());
}

#[test]
fn test_layer_switch_is_published_and_changes_values() {
    let scene = render_scene();
    let bus = EventBus::<HostEvent>::new();
    scene.connect_events(bus.sender());
    let ctx = HostContext::new(scene.clone(), scene.clone());
    let fstop = AttributePath::new("perspShape", "fStop");

    // ARRANGE: an override on a secondary layer
    scene.add_layer("closeup");
    scene
        .add_override_in("closeup", &["cameras"], &fstop, OverrideKind::AbsoluteUnique)
        .unwrap();

    // ACT
    scene.set_visible_layer("closeup").unwrap();
    ctx.set(&fstop, 2.8).unwrap();

    // ASSERT
    assert_eq!(
        bus.drain(),
        vec![HostEvent::VisibleLayerChanged {
            layer: "closeup".to_string()
        }]
    );
    assert_eq!(ctx.get(&fstop).unwrap(), Scalar::Float(2.8));
    assert_eq!(scene.base_value(&fstop).unwrap(), Scalar::Float(5.6));
    assert_eq!(
        ctx.overrides
            .list_overrides_recursive(&RenderLayer::new("closeup"))
            .len(),
        1
    );
}

#[test]
fn test_unknown_layer_is_a_backend_error() {
    let scene = render_scene();
    assert!(matches!(
        scene.set_visible_layer("nope"),
        Err(HostError::Backend(_))
    ));
    assert!(scene.visible_layer().is_default());
}
