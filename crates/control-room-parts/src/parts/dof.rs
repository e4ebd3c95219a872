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

//! Depth of field of the selected camera.

use crate::error::{PartError, PartResult};
use crate::field::{FieldBinding, FieldGroup, FieldInput, SliderRange};
use crate::part::{ControlRoomPart, EditEffect, PartId};
use crate::view::PartView;
use control_room_core::{AttributePath, HostContext};
use control_room_presets::{FieldRef, Preset};

/// Preset key (and camera attribute) of the depth of field switch.
pub const DEPTH_OF_FIELD: &str = "depthOfField";
/// Preset key (and camera attribute) of the aperture.
pub const F_STOP: &str = "fStop";

/// Depth of field switch and f-stop of the selected camera.
///
/// Without a camera the part stores nothing and applies nothing.
#[derive(Debug, Clone)]
pub struct DepthOfFieldPart {
    camera: Option<String>,
    fields: FieldGroup,
}

impl DepthOfFieldPart {
    /// Creates the part bound to `camera`.
    pub fn new(camera: Option<&str>) -> Self {
        let node = camera.unwrap_or_default();
        let fields = FieldGroup::new(
            PartId::DepthOfField,
            vec![
                FieldBinding::toggle("Enable DOF", DEPTH_OF_FIELD, node, DEPTH_OF_FIELD),
                FieldBinding::float_slider(
                    "F Stop",
                    F_STOP,
                    node,
                    F_STOP,
                    SliderRange::new(1.0, 64.0),
                ),
            ],
        );
        Self {
            camera: camera.map(str::to_string),
            fields,
        }
    }

    /// The camera the fields are bound to.
    pub fn camera(&self) -> Option<&str> {
        self.camera.as_deref()
    }
}

impl ControlRoomPart for DepthOfFieldPart {
    fn id(&self) -> PartId {
        PartId::DepthOfField
    }

    fn add_to_preset(&self, ctx: &HostContext, preset: &mut Preset) -> PartResult<()> {
        if self.camera.is_some() {
            self.fields.add_to_preset(ctx, preset)?;
        }
        Ok(())
    }

    fn apply(&mut self, ctx: &HostContext, preset: &Preset) -> PartResult<()> {
        if self.camera.is_some() {
            self.fields.apply(ctx, preset)?;
        }
        Ok(())
    }

    fn describe(&self, ctx: &HostContext, hovered: Option<&Preset>) -> PartResult<PartView> {
        let mut view = PartView::new(self.id());
        if self.camera.is_none() {
            view.notes.push("No renderable camera".to_string());
            return Ok(view);
        }
        let mut fields = self.fields.views(ctx, hovered)?;
        let dof_on = fields
            .first()
            .and_then(|f| f.value)
            .is_some_and(|v| v.as_bool());
        if let Some(f_stop) = fields.get_mut(1) {
            f_stop.enabled = dof_on;
        }
        view.fields = fields;
        Ok(view)
    }

    fn edit(&mut self, ctx: &HostContext, key: &str, input: FieldInput) -> PartResult<EditEffect> {
        if self.camera.is_none() {
            return Err(PartError::NoCamera);
        }
        self.fields.edit(ctx, key, input)?;
        Ok(EditEffect::None)
    }

    fn preset_fields(&self) -> Vec<FieldRef> {
        self.fields.field_refs()
    }

    fn watched_attributes(&self) -> Vec<AttributePath> {
        if self.camera.is_none() {
            return Vec::new();
        }
        self.fields.watched_attributes()
    }

    fn on_camera_changed(&mut self, ctx: &HostContext, camera: Option<&str>) {
        self.camera = camera.map(str::to_string);
        self.fields.retarget(camera.unwrap_or_default());
        if self.camera.is_some() {
            self.fields.refresh_overrides(ctx);
        }
    }

    fn refresh_overrides(&mut self, ctx: &HostContext) {
        if self.camera.is_some() {
            self.fields.refresh_overrides(ctx);
        }
    }

    fn add_override(&mut self, ctx: &HostContext, key: &str) -> PartResult<()> {
        if self.camera.is_none() {
            return Err(PartError::NoCamera);
        }
        self.fields.add_override(ctx, key)
    }

    fn remove_override(&mut self, ctx: &HostContext, key: &str) -> PartResult<()> {
        self.fields.remove_override(ctx, key)
    }
}
