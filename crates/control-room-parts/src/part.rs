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

//! The contract every settings part implements.

use crate::error::{PartError, PartResult};
use crate::field::FieldInput;
use crate::view::PartView;
use control_room_core::{AttributePath, HostContext};
use control_room_presets::{FieldRef, Preset};
use serde::Serialize;
use std::fmt;

/// Identifies a settings part. The name is the part's key inside presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PartId {
    /// Renderable camera selection.
    #[serde(rename = "camera")]
    Camera,
    /// Global feature switches and AOV toggles.
    #[serde(rename = "feature_overrides")]
    FeatureOverrides,
    /// Camera depth of field.
    #[serde(rename = "dof")]
    DepthOfField,
    /// Motion blur settings.
    #[serde(rename = "motion_blur")]
    MotionBlur,
    /// Output resolution and camera gate.
    #[serde(rename = "image_size")]
    ImageSize,
    /// Sample counts and ray depths.
    #[serde(rename = "sampling")]
    Sampling,
    /// Adaptive sampling settings.
    #[serde(rename = "adaptive_sampling")]
    AdaptiveSampling,
}

impl PartId {
    /// Every part, in dialog order.
    pub const ALL: [PartId; 7] = [
        PartId::Camera,
        PartId::FeatureOverrides,
        PartId::DepthOfField,
        PartId::MotionBlur,
        PartId::ImageSize,
        PartId::Sampling,
        PartId::AdaptiveSampling,
    ];

    /// The key used in presets.
    pub fn name(&self) -> &'static str {
        match self {
            PartId::Camera => "camera",
            PartId::FeatureOverrides => "feature_overrides",
            PartId::DepthOfField => "dof",
            PartId::MotionBlur => "motion_blur",
            PartId::ImageSize => "image_size",
            PartId::Sampling => "sampling",
            PartId::AdaptiveSampling => "adaptive_sampling",
        }
    }

    /// The section title.
    pub fn title(&self) -> &'static str {
        match self {
            PartId::Camera => "Camera",
            PartId::FeatureOverrides => "Feature Overrides",
            PartId::DepthOfField => "Depth of Field",
            PartId::MotionBlur => "Motion Blur",
            PartId::ImageSize => "Image Size",
            PartId::Sampling => "Sampling",
            PartId::AdaptiveSampling => "Adaptive Sampling",
        }
    }

    /// Parses a preset key back into a part.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.name() == name)
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Side effect of an edit that other parts must hear about.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditEffect {
    /// Nothing beyond the part itself.
    #[default]
    None,
    /// Another camera was selected. Camera-bound parts must retarget.
    CameraChanged(Option<String>),
}

/// A settings group owning a disjoint set of live attributes.
///
/// Parts never hold the host; every call receives the [`HostContext`].
pub trait ControlRoomPart: Send {
    /// Which part this is.
    fn id(&self) -> PartId;

    /// Stores the part's live values into `preset`, under [`PartId::name`].
    fn add_to_preset(&self, ctx: &HostContext, preset: &mut Preset) -> PartResult<()>;

    /// Writes the preset's values to the live attributes.
    ///
    /// Fields the preset does not store are left untouched.
    fn apply(&mut self, ctx: &HostContext, preset: &Preset) -> PartResult<()>;

    /// Describes the part, previewing `hovered` when a preset is hovered.
    fn describe(&self, ctx: &HostContext, hovered: Option<&Preset>) -> PartResult<PartView>;

    /// Handles an edit of field `key`.
    fn edit(&mut self, ctx: &HostContext, key: &str, input: FieldInput) -> PartResult<EditEffect>;

    /// The fields this part can store in a preset.
    fn preset_fields(&self) -> Vec<FieldRef> {
        Vec::new()
    }

    /// Attributes whose changes should refresh this part.
    fn watched_attributes(&self) -> Vec<AttributePath> {
        Vec::new()
    }

    /// Called when a watched attribute changed.
    fn on_attribute_changed(&mut self, _ctx: &HostContext, _path: &AttributePath) {}

    /// Called when the scene selection changed.
    fn on_selection_changed(&mut self, _ctx: &HostContext) -> PartResult<EditEffect> {
        Ok(EditEffect::None)
    }

    /// Called when another camera was selected.
    fn on_camera_changed(&mut self, _ctx: &HostContext, _camera: Option<&str>) {}

    /// Re-reads override state, e.g. after a render layer switch.
    fn refresh_overrides(&mut self, _ctx: &HostContext) {}

    /// Creates an override for field `key` on the visible layer.
    fn add_override(&mut self, _ctx: &HostContext, key: &str) -> PartResult<()> {
        Err(PartError::UnknownField {
            part: self.id(),
            key: key.to_string(),
        })
    }

    /// Removes the override of field `key`.
    fn remove_override(&mut self, _ctx: &HostContext, key: &str) -> PartResult<()> {
        Err(PartError::UnknownField {
            part: self.id(),
            key: key.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for id in PartId::ALL {
            assert_eq!(PartId::from_name(id.name()), Some(id));
        }
        assert_eq!(PartId::from_name("presets"), None);
        assert_eq!(PartId::DepthOfField.to_string(), "dof");
    }
}
