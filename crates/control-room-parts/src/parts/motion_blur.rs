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

//! Motion blur settings.

use crate::error::PartResult;
use crate::field::{FieldBinding, FieldGroup, FieldInput, SliderRange};
use crate::nodes::RENDER_OPTIONS;
use crate::part::{ControlRoomPart, EditEffect, PartId};
use crate::view::PartView;
use control_room_core::{AttributePath, HostContext};
use control_room_presets::{FieldRef, Preset};

/// Motion blur switch, instantaneous shutter, key count and step length.
#[derive(Debug, Clone)]
pub struct MotionBlurPart {
    fields: FieldGroup,
}

impl Default for MotionBlurPart {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionBlurPart {
    /// Creates the part bound to the global render options.
    pub fn new() -> Self {
        let fields = FieldGroup::new(
            PartId::MotionBlur,
            vec![
                FieldBinding::int_slider(
                    "Keys",
                    "motion_blur_keys",
                    RENDER_OPTIONS,
                    "motion_steps",
                    SliderRange::with_soft_max(2.0, 30.0, 300.0),
                ),
                FieldBinding::float_slider(
                    "Motion Step",
                    "motion_blur_step",
                    RENDER_OPTIONS,
                    "motion_frames",
                    SliderRange::new(0.0, 1.0),
                ),
                FieldBinding::toggle(
                    "Enable Motion Blur",
                    "enable",
                    RENDER_OPTIONS,
                    "motion_blur_enable",
                ),
                FieldBinding::toggle(
                    "Instantaneous Shutter",
                    "instant_shutter",
                    RENDER_OPTIONS,
                    "ignoreMotionBlur",
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

impl ControlRoomPart for MotionBlurPart {
    fn id(&self) -> PartId {
        PartId::MotionBlur
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
        // Checkboxes on top.
        let mut fields = self.fields.views(ctx, hovered)?;
        fields.rotate_right(2);
        view.fields = fields;
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
