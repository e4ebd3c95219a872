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

//! Names of the host nodes and attributes the parts drive.

/// Global render options node of the renderer.
pub const RENDER_OPTIONS: &str = "defaultArnoldRenderOptions";
/// Global output resolution node.
pub const RESOLUTION: &str = "defaultResolution";
/// Node type of cameras.
pub const CAMERA_TYPE: &str = "camera";
/// Node type of the renderer's AOVs.
pub const AOV_TYPE: &str = "aiAOV";

/// Camera attribute flagging the camera for rendering.
pub const CAMERA_RENDERABLE: &str = "renderable";
/// Per-AOV enable flag.
pub const AOV_ENABLED: &str = "enabled";
