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

//! Global feature switches of the renderer and AOV toggling.

use crate::decoration::decorate;
use crate::error::{PartError, PartResult};
use crate::field::{FieldBinding, FieldGroup, FieldInput};
use crate::nodes::{AOV_ENABLED, AOV_TYPE, RENDER_OPTIONS};
use crate::part::{ControlRoomPart, EditEffect, PartId};
use crate::view::{FieldView, FieldWidget, PartView};
use control_room_core::{AttributePath, HostContext, HostResult, Scalar};
use control_room_presets::{FieldRef, Preset};

/// Preset key of the derived "ignore AOVs" switch.
pub const IGNORE_AOVS: &str = "ignore_aovs";

/// Counts the AOVs of the scene as `(enabled, total)`.
pub fn aov_counts(ctx: &HostContext) -> HostResult<(usize, usize)> {
    let aovs = ctx.attributes.nodes_of_type(AOV_TYPE);
    let mut enabled = 0;
    for aov in &aovs {
        if ctx.get(&AttributePath::new(aov.as_str(), AOV_ENABLED))?.as_bool() {
            enabled += 1;
        }
    }
    Ok((enabled, aovs.len()))
}

/// AOVs count as ignored when none of them is enabled.
pub fn aovs_ignored(ctx: &HostContext) -> HostResult<bool> {
    Ok(aov_counts(ctx)?.0 == 0)
}

fn set_aovs_ignored(ctx: &HostContext, ignored: bool) -> HostResult<()> {
    for aov in ctx.attributes.nodes_of_type(AOV_TYPE) {
        ctx.set(&AttributePath::new(aov, AOV_ENABLED), !ignored)?;
    }
    Ok(())
}

/// The `ignore*` switches, variance AOV output and the AOV master toggle.
#[derive(Debug, Clone)]
pub struct FeatureOverridesPart {
    fields: FieldGroup,
}

impl Default for FeatureOverridesPart {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureOverridesPart {
    /// Creates the part bound to the global render options.
    pub fn new() -> Self {
        let n = RENDER_OPTIONS;
        let fields = FieldGroup::new(
            PartId::FeatureOverrides,
            vec![
                FieldBinding::toggle(
                    "Ignore Subdivision",
                    "ignore_subdivision",
                    n,
                    "ignoreSubdivision",
                ),
                FieldBinding::toggle("Ignore Atmosphere", "ignore_atmosphere", n, "ignoreAtmosphere"),
                FieldBinding::toggle(
                    "Ignore Displacement",
                    "ignore_displacement",
                    n,
                    "ignoreDisplacement",
                ),
                FieldBinding::toggle("Ignore Motion", "ignore_motion", n, "ignoreMotion"),
                FieldBinding::toggle("Ignore Depth of Field", "ignore_dof", n, "ignoreDof"),
                FieldBinding::toggle(
                    "Output Denoising AOVs",
                    "output_denoising",
                    n,
                    "outputVarianceAOVs",
                ),
            ],
        );
        Self { fields }
    }

    /// The attribute-bound fields. `ignore_aovs` is not among them.
    pub fn fields(&self) -> &FieldGroup {
        &self.fields
    }

    fn ignore_aovs_view(&self, ctx: &HostContext, hovered: Option<&Preset>) -> HostResult<FieldView> {
        let (enabled, total) = aov_counts(ctx)?;
        let live = Scalar::Bool(enabled == 0);
        let (decoration, shown) = decorate(hovered, self.id().name(), IGNORE_AOVS, live, false);
        Ok(FieldView {
            key: IGNORE_AOVS.to_string(),
            label: format!("Ignore AOVs [{enabled}/{total}]"),
            value: Some(shown),
            text: shown.to_string(),
            decoration,
            enabled: true,
            widget: FieldWidget::Toggle,
            can_add_override: false,
            can_remove_override: false,
        })
    }
}

impl ControlRoomPart for FeatureOverridesPart {
    fn id(&self) -> PartId {
        PartId::FeatureOverrides
    }

    fn add_to_preset(&self, ctx: &HostContext, preset: &mut Preset) -> PartResult<()> {
        self.fields.add_to_preset(ctx, preset)?;
        preset.set(self.id().name(), IGNORE_AOVS, aovs_ignored(ctx)?);
        Ok(())
    }

    fn apply(&mut self, ctx: &HostContext, preset: &Preset) -> PartResult<()> {
        self.fields.apply(ctx, preset)?;
        if let Some(ignored) = preset.get(self.id().name(), IGNORE_AOVS) {
            set_aovs_ignored(ctx, ignored.as_bool())?;
        }
        Ok(())
    }

    fn describe(&self, ctx: &HostContext, hovered: Option<&Preset>) -> PartResult<PartView> {
        let mut view = PartView::new(self.id());
        let mut fields = self.fields.views(ctx, hovered)?;
        let denoising = fields.len().saturating_sub(1);
        fields.insert(denoising, self.ignore_aovs_view(ctx, hovered)?);
        view.fields = fields;
        Ok(view)
    }

    fn edit(&mut self, ctx: &HostContext, key: &str, input: FieldInput) -> PartResult<EditEffect> {
        if key != IGNORE_AOVS {
            self.fields.edit(ctx, key, input)?;
            return Ok(EditEffect::None);
        }
        match input {
            FieldInput::Value(value) => set_aovs_ignored(ctx, value.as_bool())?,
            other => {
                return Err(PartError::InvalidInput {
                    key: key.to_string(),
                    input: format!("{other:?}"),
                })
            }
        }
        Ok(EditEffect::None)
    }

    fn preset_fields(&self) -> Vec<FieldRef> {
        let mut refs = self.fields.field_refs();
        refs.push(FieldRef::new(self.id().name(), IGNORE_AOVS));
        refs
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
