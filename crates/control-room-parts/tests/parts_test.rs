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

use control_room_core::{AttributePath, HostContext, InMemoryScene, OverrideKind, Scalar};
use control_room_parts::nodes::{RENDER_OPTIONS, RESOLUTION};
use control_room_parts::{
    AdaptiveSamplingPart, CameraPart, ControlRoomPart, Decoration, DepthOfFieldPart,
    FeatureOverridesPart, FieldInput, ImageSizePart, MotionBlurPart, PartError, PartId,
    SamplingPart,
};
use control_room_presets::Preset;
use std::sync::Arc;

fn scene() -> Arc<InMemoryScene> {
    let scene = Arc::new(InMemoryScene::new());
    scene.add_node(RENDER_OPTIONS, "aiOptions");
    for (attribute, value) in [
        ("AASamples", 3),
        ("GIDiffuseSamples", 2),
        ("GISpecularSamples", 2),
        ("GITransmissionSamples", 2),
        ("GISssSamples", 2),
        ("GIVolumeSamples", 2),
        ("GIDiffuseDepth", 1),
        ("GISpecularDepth", 1),
        ("AASamplesMax", 8),
        ("motion_steps", 2),
    ] {
        scene.define(RENDER_OPTIONS, attribute, value);
    }
    for attribute in [
        "enableProgressiveRender",
        "enableAdaptiveSampling",
        "motion_blur_enable",
        "ignoreMotionBlur",
        "ignoreSubdivision",
        "ignoreAtmosphere",
        "ignoreDisplacement",
        "ignoreMotion",
        "ignoreDof",
        "outputVarianceAOVs",
    ] {
        scene.define(RENDER_OPTIONS, attribute, false);
    }
    scene.define(RENDER_OPTIONS, "AAAdaptiveThreshold", 0.015);
    scene.define(RENDER_OPTIONS, "motion_frames", 0.5);

    scene.add_node(RESOLUTION, "resolution");
    scene.define(RESOLUTION, "width", 1920);
    scene.define(RESOLUTION, "height", 1080);
    scene.define(RESOLUTION, "deviceAspectRatio", 1.778);

    scene.add_node("shotCamShape", "camera");
    for (attribute, value) in [
        ("renderable", Scalar::Bool(true)),
        ("depthOfField", Scalar::Bool(false)),
        ("fStop", Scalar::Float(5.6)),
        ("overscan", Scalar::Float(1.0)),
        ("displayResolution", Scalar::Bool(true)),
        ("displayGateMaskOpacity", Scalar::Float(0.7)),
        ("displayGateMaskColorR", Scalar::Float(0.5)),
        ("displayGateMaskColorG", Scalar::Float(0.5)),
        ("displayGateMaskColorB", Scalar::Float(0.5)),
    ] {
        scene.define("shotCamShape", attribute, value);
    }

    scene.add_node("beauty", "aiAOV");
    scene.define("beauty", "enabled", true);
    scene.add_layer("lighting");
    scene
}

fn all_parts(ctx: &HostContext) -> Vec<Box<dyn ControlRoomPart>> {
    let camera = CameraPart::new(ctx);
    let selected = camera.selected().map(str::to_string);
    vec![
        Box::new(camera),
        Box::new(FeatureOverridesPart::new()),
        Box::new(DepthOfFieldPart::new(selected.as_deref())),
        Box::new(MotionBlurPart::new()),
        Box::new(ImageSizePart::new(ctx, selected.as_deref())),
        Box::new(SamplingPart::new()),
        Box::new(AdaptiveSamplingPart::new()),
    ]
}

fn capture(ctx: &HostContext, parts: &[Box<dyn ControlRoomPart>], name: &str) -> Preset {
    let mut preset = Preset::new(name);
    for part in parts {
        part.add_to_preset(ctx, &mut preset).unwrap();
    }
    preset
}

#[test]
fn test_capture_and_apply_restores_every_part() {
    // --- ARRANGE ---
    let scene = scene();
    let ctx = HostContext::new(scene.clone(), scene.clone());
    let mut parts = all_parts(&ctx);
    let snapshot = capture(&ctx, &parts, "Snapshot");

    // --- ACT ---
    ctx.set(&AttributePath::new(RENDER_OPTIONS, "AASamples"), 9).unwrap();
    ctx.set(&AttributePath::new(RENDER_OPTIONS, "ignoreDof"), true).unwrap();
    ctx.set(&AttributePath::new("beauty", "enabled"), false).unwrap();
    ctx.set(&AttributePath::new("shotCamShape", "fStop"), 2.0).unwrap();
    ctx.set(&AttributePath::new(RESOLUTION, "width"), 1024).unwrap();
    for part in parts.iter_mut() {
        part.apply(&ctx, &snapshot).unwrap();
    }

    // --- ASSERT ---
    let get = |node: &str, attribute: &str| ctx.get(&AttributePath::new(node, attribute)).unwrap();
    assert_eq!(get(RENDER_OPTIONS, "AASamples"), Scalar::Int(3));
    assert_eq!(get(RENDER_OPTIONS, "ignoreDof"), Scalar::Bool(false));
    assert_eq!(get("beauty", "enabled"), Scalar::Bool(true));
    assert_eq!(get("shotCamShape", "fStop"), Scalar::Float(5.6));
    assert_eq!(get(RESOLUTION, "width"), Scalar::Int(1920));
    assert!(snapshot.contains("image_size", "opacity_gate"));
    assert!(!snapshot.contains("camera", "camera"));
}

#[test]
fn test_hovered_preset_decorates_fields() {
    let scene = scene();
    let ctx = HostContext::new(scene.clone(), scene.clone());
    let parts = all_parts(&ctx);
    let mut hovered = capture(&ctx, &parts, "Hovered");
    hovered.set("sampling", "camera_aa", 6);

    let sampling = parts.iter().find(|p| p.id() == PartId::Sampling).unwrap();
    let view = sampling.describe(&ctx, Some(&hovered)).unwrap();

    let aa = view.field("camera_aa").unwrap();
    assert_eq!(aa.decoration, Decoration::PresetDiffers);
    assert_eq!(aa.value, Some(Scalar::Int(6)));
    assert_eq!(view.field("diffuse").unwrap().decoration, Decoration::PresetMatches);

    let neutral = sampling.describe(&ctx, None).unwrap();
    assert_eq!(neutral.field("camera_aa").unwrap().value, Some(Scalar::Int(3)));
}

#[test]
fn test_preset_decoration_wins_over_override() {
    let scene = scene();
    let ctx = HostContext::new(scene.clone(), scene.clone());
    scene.set_visible_layer("lighting").unwrap();
    let mut parts = all_parts(&ctx);
    let index = parts.iter().position(|p| p.id() == PartId::MotionBlur).unwrap();
    parts[index].add_override(&ctx, "enable").unwrap();

    let view = parts[index].describe(&ctx, None).unwrap();
    assert_eq!(view.field("enable").unwrap().decoration, Decoration::Override);
    assert!(view.field("enable").unwrap().can_remove_override);

    let hovered = capture(&ctx, &parts, "Live");
    let view = parts[index].describe(&ctx, Some(&hovered)).unwrap();
    assert_eq!(view.field("enable").unwrap().decoration, Decoration::PresetMatches);
}

#[test]
fn test_nested_override_is_found_after_layer_switch() {
    let scene = scene();
    let ctx = HostContext::new(scene.clone(), scene.clone());
    scene.add_override_in(
        "lighting",
        &["collection1", "sub"],
        &AttributePath::new(RENDER_OPTIONS, "ignoreAtmosphere"),
        OverrideKind::AbsoluteUnique,
    )
    .unwrap();
    let mut parts = all_parts(&ctx);
    let index = parts.iter().position(|p| p.id() == PartId::FeatureOverrides).unwrap();

    let view = parts[index].describe(&ctx, None).unwrap();
    assert_eq!(view.field("ignore_atmosphere").unwrap().decoration, Decoration::Neutral);

    scene.set_visible_layer("lighting").unwrap();
    parts[index].refresh_overrides(&ctx);
    let view = parts[index].describe(&ctx, None).unwrap();
    assert_eq!(view.field("ignore_atmosphere").unwrap().decoration, Decoration::Override);
}

#[test]
fn test_override_refused_on_default_layer() {
    let scene = scene();
    let ctx = HostContext::new(scene.clone(), scene.clone());
    let mut parts = all_parts(&ctx);

    let result = parts[5].add_override(&ctx, "camera_aa");
    assert!(matches!(result, Err(PartError::Host(_))));
    let view = parts[5].describe(&ctx, None).unwrap();
    assert!(!view.field("camera_aa").unwrap().can_add_override);
}

#[test]
fn test_out_of_range_edit_is_rejected() {
    let scene = scene();
    let ctx = HostContext::new(scene.clone(), scene.clone());
    let mut sampling = SamplingPart::new();

    let result = sampling.edit(&ctx, "camera_aa", FieldInput::Text("1000".to_string()));
    assert!(matches!(result, Err(PartError::OutOfRange { .. })));
    sampling
        .edit(&ctx, "camera_aa", FieldInput::Text("42".to_string()))
        .unwrap();

    let view = sampling.describe(&ctx, None).unwrap();
    assert_eq!(view.field("camera_aa").unwrap().value, Some(Scalar::Int(42)));
}
