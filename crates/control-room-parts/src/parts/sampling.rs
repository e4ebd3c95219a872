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

//! Sample counts and ray depths.

use crate::error::PartResult;
use crate::field::{FieldBinding, FieldGroup, FieldInput, SliderRange};
use crate::nodes::RENDER_OPTIONS;
use crate::part::{ControlRoomPart, EditEffect, PartId};
use crate::view::PartView;
use control_room_core::{AttributePath, HostContext};
use control_room_presets::{FieldRef, Preset};

const SAMPLES: SliderRange = SliderRange::with_soft_max(0.0, 10.0, 100.0);
const DEPTH: SliderRange = SliderRange::with_soft_max(0.0, 16.0, 160.0);

/// Progressive rendering switch and per-ray-type sample counts.
#[derive(Debug, Clone)]
pub struct SamplingPart {
    fields: FieldGroup,
}

impl Default for SamplingPart {
    fn default() -> Self {
        Self::new()
    }
}

impl SamplingPart {
    /// Creates the part bound to the global render options.
    pub fn new() -> Self {
        let n = RENDER_OPTIONS;
        let fields = FieldGroup::new(
            PartId::Sampling,
            vec![
                FieldBinding::toggle(
                    "Enable Progressive Render",
                    "enable_progressive_render",
                    n,
                    "enableProgressiveRender",
                ),
                FieldBinding::int_slider("Camera (AA)", "camera_aa", n, "AASamples", SAMPLES),
                FieldBinding::int_slider("Diffuse", "diffuse", n, "GIDiffuseSamples", SAMPLES),
                FieldBinding::int_slider("Specular", "specular", n, "GISpecularSamples", SAMPLES),
                FieldBinding::int_slider(
                    "Transmission",
                    "transmission",
                    n,
                    "GITransmissionSamples",
                    SAMPLES,
                ),
                FieldBinding::int_slider("SSS", "sss", n, "GISssSamples", SAMPLES),
                FieldBinding::int_slider(
                    "Volume Indirect",
                    "volume_indirect",
                    n,
                    "GIVolumeSamples",
                    SAMPLES,
                ),
                FieldBinding::int_slider(
                    "Ray Depth Diffuse",
                    "ray_depth_diffuse",
                    n,
                    "GIDiffuseDepth",
                    DEPTH,
                ),
                FieldBinding::int_slider(
                    "Ray Depth Specular",
                    "ray_depth_specular",
                    n,
                    "GISpecularDepth",
                    DEPTH,
                ),
            ],
        );
        Self { fields }
    }

    /// The bound fields.
    pub fn fields(&self) -> &FieldGroup {
        &self.fields
    }
}

impl ControlRoomPart for SamplingPart {
    fn id(&self) -> PartId {
        PartId::Sampling
    }

    fn add_to_preset(&self, ctx: &HostContext, preset: &mut Preset) -> PartResult<()> {
        Ok(self.fields.add_to_preset(ctx, preset)?)
    }

    fn apply(&mut self, ctx: &HostContext, preset: &Preset) -> PartResult<()> {
        self.fields.apply(ctx, preset)?;
        Ok(())
    }

    fn describe(&self, ctx: &HostContext, hovered: Option<&Preset>) -> PartResult<PartView> {
        let mut view = PartView::new(self.id());
        view.fields = self.fields.views(ctx, hovered)?;
        Ok(view)
    }

    fn edit(&mut self, ctx: &HostContext, key: &str, input: FieldInput) -> PartResult<EditEffect> {
        self.fields.edit(ctx, key, input)?;
        Ok(EditEffect::None)
    }

    fn preset_fields(&self) -> Vec<FieldRef> {
        self.fields.field_refs()
    }

    fn watched_attributes(&self) -> Vec<AttributePath> {
        self.fields.watched_attributes()
    }

    fn refresh_overrides(&mut self, ctx: &HostContext) {
        self.fields.refresh_overrides(ctx);
    }

    fn add_override(&mut self, ctx: &HostContext, key: &str) -> PartResult<()> {
        self.fields.add_override(ctx, key)
    }

    fn remove_override(&mut self, ctx: &HostContext, key: &str) -> PartResult<()> {
        self.fields.remove_override(ctx, key)
    }
}
