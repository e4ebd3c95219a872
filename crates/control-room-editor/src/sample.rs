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

//! A small in-memory scene with the render settings the dialog drives.

use control_room_core::{InMemoryScene, Scalar};
use control_room_parts::nodes::{AOV_TYPE, CAMERA_TYPE, RENDER_OPTIONS, RESOLUTION};
use std::sync::Arc;

const RENDER_OPTIONS_VALUES: [(&str, Scalar); 22] = [
    ("AASamples", Scalar::Int(3)),
    ("GIDiffuseSamples", Scalar::Int(2)),
    ("GISpecularSamples", Scalar::Int(2)),
    ("GITransmissionSamples", Scalar::Int(2)),
    ("GISssSamples", Scalar::Int(2)),
    ("GIVolumeSamples", Scalar::Int(2)),
    ("GIDiffuseDepth", Scalar::Int(1)),
    ("GISpecularDepth", Scalar::Int(1)),
    ("enableProgressiveRender", Scalar::Bool(false)),
    ("AASamplesMax", Scalar::Int(8)),
    ("AAAdaptiveThreshold", Scalar::Float(0.015)),
    ("enableAdaptiveSampling", Scalar::Bool(false)),
    ("motion_blur_enable", Scalar::Bool(false)),
    ("ignoreMotionBlur", Scalar::Bool(false)),
    ("motion_steps", Scalar::Int(2)),
    ("motion_frames", Scalar::Float(0.5)),
    ("ignoreSubdivision", Scalar::Bool(false)),
    ("ignoreAtmosphere", Scalar::Bool(false)),
    ("ignoreDisplacement", Scalar::Bool(false)),
    ("ignoreMotion", Scalar::Bool(false)),
    ("ignoreDof", Scalar::Bool(false)),
    ("outputVarianceAOVs", Scalar::Bool(false)),
];

const CAMERA_VALUES: [(&str, Scalar); 9] = [
    ("renderable", Scalar::Bool(true)),
    ("depthOfField", Scalar::Bool(false)),
    ("fStop", Scalar::Float(5.6)),
    ("overscan", Scalar::Float(1.0)),
    ("displayResolution", Scalar::Bool(false)),
    ("displayGateMaskOpacity", Scalar::Float(0.7)),
    ("displayGateMaskColorR", Scalar::Float(0.5)),
    ("displayGateMaskColorG", Scalar::Float(0.5)),
    ("displayGateMaskColorB", Scalar::Float(0.5)),
];

/// Adds a camera node with default display settings.
pub fn add_camera(scene: &InMemoryScene, name: &str, renderable: bool) {
    scene.add_node(name, CAMERA_TYPE);
    for (attribute, value) in CAMERA_VALUES {
        scene.define(name, attribute, value);
    }
    scene.define(name, "renderable", renderable);
}

/// A scene with the renderer loaded, one renderable camera, two AOVs and a
/// `lighting` render layer.
pub fn sample_scene() -> Arc<InMemoryScene> {
    let scene = Arc::new(InMemoryScene::new());
    scene.add_node(RENDER_OPTIONS, "aiOptions");
    for (attribute, value) in RENDER_OPTIONS_VALUES {
        scene.define(RENDER_OPTIONS, attribute, value);
    }

    scene.add_node(RESOLUTION, "resolution");
    scene.define(RESOLUTION, "width", 1920);
    scene.define(RESOLUTION, "height", 1080);
    scene.define(RESOLUTION, "deviceAspectRatio", 1.778);

    add_camera(&scene, "shotCamShape", true);
    add_camera(&scene, "perspShape", false);

    for aov in ["aiAOV_diffuse", "aiAOV_specular"] {
        scene.add_node(aov, AOV_TYPE);
        scene.define(aov, "enabled", true);
    }
    scene.add_layer("lighting");
    scene
}
