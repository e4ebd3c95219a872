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

//! Fields bound to one host attribute each.
//!
//! A [`FieldBinding`] is the unit every part is built from: it reads and writes
//! its attribute, stores it into presets and applies it back, describes itself
//! for the dialog and tracks its override. A [`FieldGroup`] runs the same
//! operations over an ordered list of bindings.

use crate::decoration::decorate;
use crate::error::{PartError, PartResult};
use crate::override_adapter::OverrideAdapter;
use crate::part::PartId;
use crate::view::{FieldView, FieldWidget, SliderState};
use control_room_core::{AttributePath, HostContext, HostResult, Scalar, ScalarKind};
use control_room_presets::{FieldRef, Preset};

/// Slider positions per unit for float sliders.
pub const FLOAT_SLIDER_SCALE: i64 = 1000;

/// Bounds of a slider field.
///
/// The slider spans `min..max`. Typed values are accepted up to `soft_max`, and
/// the slider grows to show such a value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    /// Lowest value.
    pub min: f64,
    /// Nominal end of the slider.
    pub max: f64,
    /// Highest value accepted from text entry.
    pub soft_max: f64,
}

impl SliderRange {
    /// A range whose soft max equals its max.
    pub const fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            soft_max: max,
        }
    }

    /// A range accepting typed values up to `soft_max`.
    pub const fn with_soft_max(min: f64, max: f64, soft_max: f64) -> Self {
        Self { min, max, soft_max }
    }
}

/// How a field is edited and which scalar kind it stores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// A checkbox storing a boolean.
    Toggle,
    /// A text entry storing an integer of at least `min`.
    IntEntry {
        /// Lowest accepted value.
        min: i64,
    },
    /// An integer slider.
    IntSlider(SliderRange),
    /// A float slider, driven on a x1000 integer scale.
    FloatSlider(SliderRange),
}

impl FieldKind {
    /// The scalar kind values are coerced to.
    pub fn scalar_kind(&self) -> ScalarKind {
        match self {
            FieldKind::Toggle => ScalarKind::Bool,
            FieldKind::IntEntry { .. } | FieldKind::IntSlider(_) => ScalarKind::Int,
            FieldKind::FloatSlider(_) => ScalarKind::Float,
        }
    }

    /// Slider positions per unit of value.
    pub fn scale(&self) -> i64 {
        match self {
            FieldKind::FloatSlider(_) => FLOAT_SLIDER_SCALE,
            _ => 1,
        }
    }
}

/// A raw edit coming from the dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    /// A typed value, e.g. a checkbox state.
    Value(Scalar),
    /// A slider position, in slider units.
    Slider(i64),
    /// Text typed in an entry.
    Text(String),
    /// An option picked from a choice field.
    Choice(String),
}

impl From<Scalar> for FieldInput {
    fn from(value: Scalar) -> Self {
        FieldInput::Value(value)
    }
}

impl From<bool> for FieldInput {
    fn from(value: bool) -> Self {
        FieldInput::Value(Scalar::Bool(value))
    }
}

impl From<i64> for FieldInput {
    fn from(value: i64) -> Self {
        FieldInput::Value(Scalar::Int(value))
    }
}

impl From<f64> for FieldInput {
    fn from(value: f64) -> Self {
        FieldInput::Value(Scalar::Float(value))
    }
}

/// A preset field bound to one host attribute.
#[derive(Debug, Clone)]
pub struct FieldBinding {
    key: &'static str,
    label: &'static str,
    kind: FieldKind,
    adapter: OverrideAdapter,
}

impl FieldBinding {
    /// Creates a binding of any kind.
    pub fn new(
        label: &'static str,
        key: &'static str,
        node: &str,
        attribute: &str,
        kind: FieldKind,
    ) -> Self {
        Self {
            key,
            label,
            kind,
            adapter: OverrideAdapter::new(node, attribute),
        }
    }

    /// A checkbox.
    pub fn toggle(label: &'static str, key: &'static str, node: &str, attribute: &str) -> Self {
        Self::new(label, key, node, attribute, FieldKind::Toggle)
    }

    /// An integer slider.
    pub fn int_slider(
        label: &'static str,
        key: &'static str,
        node: &str,
        attribute: &str,
        range: SliderRange,
    ) -> Self {
        Self::new(label, key, node, attribute, FieldKind::IntSlider(range))
    }

    /// A float slider.
    pub fn float_slider(
        label: &'static str,
        key: &'static str,
        node: &str,
        attribute: &str,
        range: SliderRange,
    ) -> Self {
        Self::new(label, key, node, attribute, FieldKind::FloatSlider(range))
    }

    /// The preset key.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// The display label.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// The field kind.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The bound attribute.
    pub fn attribute(&self) -> &AttributePath {
        self.adapter.path()
    }

    /// The override tracker of the bound attribute.
    pub fn adapter(&self) -> &OverrideAdapter {
        &self.adapter
    }

    /// Mutable access to the override tracker.
    pub fn adapter_mut(&mut self) -> &mut OverrideAdapter {
        &mut self.adapter
    }

    /// Rebinds the field to the same attribute on another node.
    pub fn retarget(&mut self, node: &str) {
        self.adapter.retarget(node);
    }

    /// Reads the live value, coerced to the field's kind.
    pub fn read(&self, ctx: &HostContext) -> HostResult<Scalar> {
        Ok(ctx.get(self.attribute())?.coerce_to(self.kind.scalar_kind()))
    }

    /// Stores the live value into `preset` under `part`.
    pub fn add_to_preset(&self, ctx: &HostContext, part: &str, preset: &mut Preset) -> HostResult<()> {
        preset.set(part, self.key, self.read(ctx)?);
        Ok(())
    }

    /// Writes the preset's value to the attribute. Returns `false`, touching
    /// nothing, if the preset does not store this field.
    pub fn apply(&self, ctx: &HostContext, part: &str, preset: &Preset) -> HostResult<bool> {
        if !preset.contains(part, self.key) {
            return Ok(false);
        }
        let Some(value) = preset.get(part, self.key) else {
            return Ok(false);
        };
        ctx.set(self.attribute(), value.coerce_to(self.kind.scalar_kind()))?;
        Ok(true)
    }

    /// Validates an edit and writes it to the attribute.
    pub fn edit(&self, ctx: &HostContext, input: FieldInput) -> PartResult<()> {
        let value = self.resolve(input)?;
        ctx.set(self.attribute(), value)?;
        Ok(())
    }

    /// Turns a raw edit into a value of the field's kind.
    pub fn resolve(&self, input: FieldInput) -> PartResult<Scalar> {
        let invalid = |input: String| PartError::InvalidInput {
            key: self.key.to_string(),
            input,
        };

        let value = match (self.kind, input) {
            (_, FieldInput::Choice(choice)) => return Err(invalid(choice)),
            (FieldKind::Toggle, FieldInput::Value(v)) => Scalar::Bool(v.as_bool()),
            (FieldKind::Toggle, FieldInput::Text(text)) => match text.trim() {
                "true" | "1" => Scalar::Bool(true),
                "false" | "0" => Scalar::Bool(false),
                _ => return Err(invalid(text)),
            },
            (FieldKind::Toggle, FieldInput::Slider(pos)) => return Err(invalid(pos.to_string())),
            (FieldKind::FloatSlider(_), FieldInput::Slider(pos)) => {
                Scalar::Float(pos as f64 / FLOAT_SLIDER_SCALE as f64)
            }
            (_, FieldInput::Slider(pos)) => Scalar::Int(pos),
            (kind, FieldInput::Value(v)) => v.coerce_to(kind.scalar_kind()),
            (FieldKind::FloatSlider(_), FieldInput::Text(text)) => match text.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => Scalar::Float(v),
                _ => return Err(invalid(text)),
            },
            (_, FieldInput::Text(text)) => match text.trim().parse::<i64>() {
                Ok(v) => Scalar::Int(v),
                Err(_) => return Err(invalid(text)),
            },
        };

        let (min, max) = match self.kind {
            FieldKind::Toggle => return Ok(value),
            FieldKind::IntEntry { min } => (min as f64, f64::INFINITY),
            FieldKind::IntSlider(range) | FieldKind::FloatSlider(range) => {
                (range.min, range.soft_max)
            }
        };
        let v = value.as_float();
        if v < min || v > max {
            return Err(PartError::OutOfRange {
                key: self.key.to_string(),
                value: v,
                min,
                max,
            });
        }
        Ok(value)
    }

    /// Slider state for a displayed value, or `None` for non-slider fields.
    ///
    /// A value past the nominal max stretches the slider, at most to the soft max.
    pub fn slider_state(&self, value: Scalar) -> Option<SliderState> {
        let range = match self.kind {
            FieldKind::IntSlider(range) | FieldKind::FloatSlider(range) => range,
            _ => return None,
        };
        let scale = self.kind.scale();
        let v = value.as_float();
        let max = if v >= range.max {
            v.min(range.soft_max)
        } else {
            range.max
        };
        let to_position = |x: f64| (x * scale as f64).round() as i64;
        Some(SliderState {
            min: to_position(range.min),
            max: to_position(max),
            position: to_position(v.clamp(range.min, max)),
            scale,
        })
    }

    /// Describes the field, decorated against the hovered preset.
    pub fn view(
        &self,
        ctx: &HostContext,
        part: &str,
        hovered: Option<&Preset>,
        enabled: bool,
    ) -> HostResult<FieldView> {
        let live = self.read(ctx)?;
        let (decoration, shown) =
            decorate(hovered, part, self.key, live, self.adapter.is_displayed(ctx));
        let widget = match self.kind {
            FieldKind::Toggle => FieldWidget::Toggle,
            FieldKind::IntEntry { .. } => FieldWidget::Entry,
            FieldKind::IntSlider(_) | FieldKind::FloatSlider(_) => {
                match self.slider_state(shown) {
                    Some(state) => FieldWidget::Slider(state),
                    None => FieldWidget::Entry,
                }
            }
        };
        Ok(FieldView {
            key: self.key.to_string(),
            label: self.label.to_string(),
            value: Some(shown),
            text: shown.to_string(),
            decoration,
            enabled,
            widget,
            can_add_override: self.adapter.can_create(ctx),
            can_remove_override: self.adapter.can_remove(ctx),
        })
    }
}

/// An ordered list of bindings belonging to one part.
///
/// Order matters for [`apply`](Self::apply): bindings are written first to last.
#[derive(Debug, Clone)]
pub struct FieldGroup {
    part: PartId,
    bindings: Vec<FieldBinding>,
}

impl FieldGroup {
    /// Creates a group for `part`.
    pub fn new(part: PartId, bindings: Vec<FieldBinding>) -> Self {
        Self { part, bindings }
    }

    /// The owning part.
    pub fn part(&self) -> PartId {
        self.part
    }

    /// The bindings in order.
    pub fn bindings(&self) -> &[FieldBinding] {
        &self.bindings
    }

    /// Looks a binding up by key.
    pub fn binding(&self, key: &str) -> Option<&FieldBinding> {
        self.bindings.iter().find(|b| b.key == key)
    }

    fn binding_or_err(&self, key: &str) -> PartResult<&FieldBinding> {
        self.binding(key).ok_or_else(|| PartError::UnknownField {
            part: self.part,
            key: key.to_string(),
        })
    }

    fn binding_mut_or_err(&mut self, key: &str) -> PartResult<&mut FieldBinding> {
        let part = self.part;
        self.bindings
            .iter_mut()
            .find(|b| b.key == key)
            .ok_or_else(|| PartError::UnknownField {
                part,
                key: key.to_string(),
            })
    }

    /// Preset references of every binding.
    pub fn field_refs(&self) -> Vec<FieldRef> {
        self.bindings
            .iter()
            .map(|b| FieldRef::new(self.part.name(), b.key))
            .collect()
    }

    /// Stores every bound value.
    pub fn add_to_preset(&self, ctx: &HostContext, preset: &mut Preset) -> HostResult<()> {
        for binding in &self.bindings {
            binding.add_to_preset(ctx, self.part.name(), preset)?;
        }
        Ok(())
    }

    /// Applies every field the preset stores. Returns how many were written.
    pub fn apply(&self, ctx: &HostContext, preset: &Preset) -> HostResult<usize> {
        let mut applied = 0;
        for binding in &self.bindings {
            if binding.apply(ctx, self.part.name(), preset)? {
                applied += 1;
            }
        }
        Ok(applied)
    }

    /// Describes every binding, all enabled.
    pub fn views(&self, ctx: &HostContext, hovered: Option<&Preset>) -> HostResult<Vec<FieldView>> {
        self.bindings
            .iter()
            .map(|b| b.view(ctx, self.part.name(), hovered, true))
            .collect()
    }

    /// Edits one field.
    pub fn edit(&self, ctx: &HostContext, key: &str, input: FieldInput) -> PartResult<()> {
        self.binding_or_err(key)?.edit(ctx, input)
    }

    /// Every bound attribute.
    pub fn watched_attributes(&self) -> Vec<AttributePath> {
        self.bindings.iter().map(|b| b.attribute().clone()).collect()
    }

    /// Re-reads override state for every binding.
    pub fn refresh_overrides(&mut self, ctx: &HostContext) {
        for binding in &mut self.bindings {
            binding.adapter.retrieve(ctx);
        }
    }

    /// Creates an override for one field.
    pub fn add_override(&mut self, ctx: &HostContext, key: &str) -> PartResult<()> {
        self.binding_mut_or_err(key)?.adapter.create(ctx)?;
        Ok(())
    }

    /// Removes the override of one field.
    pub fn remove_override(&mut self, ctx: &HostContext, key: &str) -> PartResult<()> {
        self.binding_mut_or_err(key)?.adapter.remove(ctx)?;
        Ok(())
    }

    /// Rebinds every field to `node`.
    pub fn retarget(&mut self, node: &str) {
        for binding in &mut self.bindings {
            binding.retarget(node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use control_room_core::InMemoryScene;
    use std::sync::Arc;

    fn context() -> HostContext {
        let scene = Arc::new(InMemoryScene::new());
        scene.add_node("opts", "aiOptions");
        scene.define("opts", "AASamples", 3);
        scene.define("opts", "motion_frames", 0.5);
        HostContext::new(scene.clone(), scene)
    }

    fn aa() -> FieldBinding {
        FieldBinding::int_slider(
            "Camera (AA)",
            "camera_aa",
            "opts",
            "AASamples",
            SliderRange::with_soft_max(0.0, 10.0, 100.0),
        )
    }

    fn frames() -> FieldBinding {
        FieldBinding::float_slider(
            "Motion Step",
            "motion_blur_step",
            "opts",
            "motion_frames",
            SliderRange::new(0.0, 1.0),
        )
    }

    #[test]
    fn float_slider_positions_are_scaled() {
        let ctx = context();
        frames().edit(&ctx, FieldInput::Slider(250)).unwrap();
        assert_eq!(ctx.get(frames().attribute()).unwrap(), Scalar::Float(0.25));
        assert_eq!(
            frames().slider_state(Scalar::Float(0.25)),
            Some(SliderState {
                min: 0,
                max: 1000,
                position: 250,
                scale: 1000
            })
        );
    }

    #[test]
    fn slider_grows_up_to_soft_max() {
        let binding = aa();
        assert_eq!(binding.slider_state(Scalar::Int(5)).unwrap().max, 10);
        assert_eq!(binding.slider_state(Scalar::Int(42)).unwrap().max, 42);
        let capped = binding.slider_state(Scalar::Int(500)).unwrap();
        assert_eq!((capped.max, capped.position), (100, 100));
    }

    #[test]
    fn text_is_validated_against_soft_max() {
        let ctx = context();
        aa().edit(&ctx, FieldInput::Text(" 42 ".to_string())).unwrap();
        assert_eq!(ctx.get(aa().attribute()).unwrap(), Scalar::Int(42));

        assert!(matches!(
            aa().edit(&ctx, FieldInput::Text("101".to_string())),
            Err(PartError::OutOfRange { .. })
        ));
        assert!(matches!(
            aa().edit(&ctx, FieldInput::Text("many".to_string())),
            Err(PartError::InvalidInput { .. })
        ));
        assert_eq!(ctx.get(aa().attribute()).unwrap(), Scalar::Int(42));
    }

    #[test]
    fn apply_skips_missing_field() {
        let ctx = context();
        let preset = Preset::new("Empty");
        assert!(!aa().apply(&ctx, "sampling", &preset).unwrap());
        assert_eq!(ctx.get(aa().attribute()).unwrap(), Scalar::Int(3));
    }

    #[test]
    fn view_text_rounds_to_three_decimals() {
        let ctx = context();
        ctx.set(frames().attribute(), 0.123_456).unwrap();
        let view = frames().view(&ctx, "motion_blur", None, true).unwrap();
        assert_eq!(view.text, "0.123");
        assert!(!view.can_add_override);
    }

    #[test]
    fn group_reports_unknown_fields() {
        let ctx = context();
        let group = FieldGroup::new(PartId::Sampling, vec![aa()]);
        assert_eq!(
            group.edit(&ctx, "nope", FieldInput::Value(Scalar::Int(1))),
            Err(PartError::UnknownField {
                part: PartId::Sampling,
                key: "nope".to_string()
            })
        );
        assert_eq!(group.field_refs(), vec![FieldRef::new("sampling", "camera_aa")]);
    }
}
