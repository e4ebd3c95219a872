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

//! Output resolution, aspect ratio presets and the camera gate.

use crate::decoration::decorate;
use crate::error::{PartError, PartResult};
use crate::field::{FieldBinding, FieldInput, FieldKind, SliderRange};
use crate::nodes::RESOLUTION;
use crate::override_adapter::OverrideAdapter;
use crate::part::{ControlRoomPart, EditEffect, PartId};
use crate::view::{FieldView, FieldWidget, PartView};
use control_room_core::{AttributePath, HostContext, HostResult, Scalar};
use control_room_presets::{FieldRef, Preset};

/// Largest difference at which a device aspect ratio matches a table entry.
pub const RATIO_TOLERANCE: f64 = 0.001;

const WIDTH: &str = "width";
const HEIGHT: &str = "height";
const OVERSCAN: &str = "overscan";
const OPACITY_GATE: &str = "opacity_gate";
const GATE_ENABLED: &str = "gate_enabled";
const ASPECT_RATIO_FIELD: &str = "aspect_ratio";
const FORMAT_FIELD: &str = "format";

const DEVICE_ASPECT_RATIO: &str = "deviceAspectRatio";
const DISPLAY_RESOLUTION: &str = "displayResolution";
const GATE_MASK_OPACITY: &str = "displayGateMaskOpacity";
const GATE_MASK_COLOR: [&str; 3] = [
    "displayGateMaskColorR",
    "displayGateMaskColorG",
    "displayGateMaskColorB",
];

const OPAQUE_GATE_OPACITY: f64 = 1.0;
const TRANSLUCENT_GATE_OPACITY: f64 = 0.7;
const OPAQUE_GATE_COLOR: f64 = 0.0;
const TRANSLUCENT_GATE_COLOR: f64 = 0.5;

/// A standard aspect ratio with its SD and HD widths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRatio {
    /// Display name.
    pub name: &'static str,
    /// Width divided by height.
    pub ratio: f64,
    /// Width of the HD format.
    pub hd: i64,
    /// Width of the SD format.
    pub sd: i64,
}

/// The aspect ratios offered by the dialog.
pub const ASPECT_RATIOS: [AspectRatio; 5] = [
    AspectRatio { name: "1:1", ratio: 1.0, hd: 1920, sd: 720 },
    AspectRatio { name: "16:9", ratio: 1.777_777_777_78, hd: 1920, sd: 1280 },
    AspectRatio { name: "9:16", ratio: 0.5625, hd: 1080, sd: 720 },
    AspectRatio { name: "4:5", ratio: 0.8, hd: 1536, sd: 720 },
    AspectRatio { name: "Scope", ratio: 2.386_946_386_95, hd: 2048, sd: 1024 },
];

/// Finds the table entry matching a device aspect ratio.
pub fn match_aspect_ratio(value: f64) -> Option<&'static AspectRatio> {
    ASPECT_RATIOS
        .iter()
        .find(|r| approx::abs_diff_eq!(value, r.ratio, epsilon = RATIO_TOLERANCE))
}

/// Output formats of an aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Standard definition width.
    Sd,
    /// High definition width.
    Hd,
}

impl Format {
    /// Both formats, in display order.
    pub const ALL: [Format; 2] = [Format::Sd, Format::Hd];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Format::Sd => "SD",
            Format::Hd => "HD",
        }
    }

    /// Width of this format for `ratio`.
    pub fn width(&self, ratio: &AspectRatio) -> i64 {
        match self {
            Format::Sd => ratio.sd,
            Format::Hd => ratio.hd,
        }
    }
}

/// Resolution, aspect ratio lock, overscan and resolution gate.
///
/// While an aspect ratio is selected, width and height stay coupled: editing
/// one recomputes the other.
#[derive(Debug, Clone)]
pub struct ImageSizePart {
    camera: Option<String>,
    width: FieldBinding,
    height: FieldBinding,
    overscan: FieldBinding,
    gate_enabled: FieldBinding,
    gate_opacity: OverrideAdapter,
    ratio: Option<&'static AspectRatio>,
}

impl ImageSizePart {
    /// Creates the part bound to `camera` and reads the current aspect ratio.
    pub fn new(ctx: &HostContext, camera: Option<&str>) -> Self {
        let node = camera.unwrap_or_default();
        let mut part = Self {
            camera: camera.map(str::to_string),
            width: FieldBinding::new("Width", WIDTH, RESOLUTION, WIDTH, FieldKind::IntEntry { min: 1 }),
            height: FieldBinding::new(
                "Height",
                HEIGHT,
                RESOLUTION,
                HEIGHT,
                FieldKind::IntEntry { min: 1 },
            ),
            overscan: FieldBinding::float_slider(
                "Overscan",
                OVERSCAN,
                node,
                OVERSCAN,
                SliderRange::new(0.0, 10.0),
            ),
            gate_enabled: FieldBinding::toggle("Enable Gate", GATE_ENABLED, node, DISPLAY_RESOLUTION),
            gate_opacity: OverrideAdapter::new(node, GATE_MASK_OPACITY),
            ratio: None,
        };
        part.retrieve_aspect_ratio(ctx);
        part
    }

    /// The selected aspect ratio, if any.
    pub fn ratio(&self) -> Option<&'static AspectRatio> {
        self.ratio
    }

    /// The camera the gate and overscan fields are bound to.
    pub fn camera(&self) -> Option<&str> {
        self.camera.as_deref()
    }

    fn resolution(attribute: &str) -> AttributePath {
        AttributePath::new(RESOLUTION, attribute)
    }

    fn camera_path(&self, attribute: &str) -> PartResult<AttributePath> {
        let camera = self.camera.as_deref().ok_or(PartError::NoCamera)?;
        Ok(AttributePath::new(camera, attribute))
    }

    /// Selects the table entry matching the live device aspect ratio.
    pub fn retrieve_aspect_ratio(&mut self, ctx: &HostContext) {
        self.ratio = match ctx.get(&Self::resolution(DEVICE_ASPECT_RATIO)) {
            Ok(value) => match_aspect_ratio(value.as_float()),
            Err(e) => {
                log::warn!("Cannot read the device aspect ratio: {e}");
                None
            }
        };
    }

    /// Toggles an aspect ratio. Selecting a new one sets the device aspect
    /// ratio and recomputes the height; selecting the current one unlocks it.
    pub fn select_ratio(&mut self, ctx: &HostContext, name: &str) -> PartResult<()> {
        let ratio = ASPECT_RATIOS
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| PartError::UnknownChoice {
                key: ASPECT_RATIO_FIELD.to_string(),
                choice: name.to_string(),
            })?;
        if self.ratio.is_some_and(|current| current.name == name) {
            self.ratio = None;
            return Ok(());
        }
        ctx.set(&Self::resolution(DEVICE_ASPECT_RATIO), ratio.ratio)?;
        self.ratio = Some(ratio);
        self.sync_height(ctx)?;
        self.retrieve_aspect_ratio(ctx);
        Ok(())
    }

    /// Sets the width of the SD or HD format of the selected ratio.
    pub fn select_format(&mut self, ctx: &HostContext, format: Format) -> PartResult<()> {
        let ratio = self
            .ratio
            .ok_or_else(|| PartError::Disabled(FORMAT_FIELD.to_string()))?;
        ctx.set(&Self::resolution(WIDTH), format.width(ratio))?;
        self.sync_height(ctx)?;
        self.retrieve_aspect_ratio(ctx);
        Ok(())
    }

    fn sync_height(&self, ctx: &HostContext) -> HostResult<()> {
        if let Some(ratio) = self.ratio {
            let width = ctx.get(&Self::resolution(WIDTH))?.as_float();
            ctx.set(&Self::resolution(HEIGHT), (width / ratio.ratio).round() as i64)?;
        }
        Ok(())
    }

    fn sync_width(&self, ctx: &HostContext) -> HostResult<()> {
        if let Some(ratio) = self.ratio {
            let height = ctx.get(&Self::resolution(HEIGHT))?.as_float();
            ctx.set(&Self::resolution(WIDTH), (height * ratio.ratio).round() as i64)?;
        }
        Ok(())
    }

    /// Whether the resolution gate mask is opaque.
    pub fn is_gate_opaque(&self, ctx: &HostContext) -> PartResult<bool> {
        let opacity = ctx.get(&self.camera_path(GATE_MASK_OPACITY)?)?.as_float();
        Ok(approx::relative_eq!(opacity, OPAQUE_GATE_OPACITY))
    }

    /// Makes the gate mask opaque black, or translucent grey.
    pub fn set_gate_opaque(&self, ctx: &HostContext, opaque: bool) -> PartResult<()> {
        let (opacity, color) = if opaque {
            (OPAQUE_GATE_OPACITY, OPAQUE_GATE_COLOR)
        } else {
            (TRANSLUCENT_GATE_OPACITY, TRANSLUCENT_GATE_COLOR)
        };
        ctx.set(&self.camera_path(GATE_MASK_OPACITY)?, opacity)?;
        for channel in GATE_MASK_COLOR {
            ctx.set(&self.camera_path(channel)?, color)?;
        }
        Ok(())
    }

    fn format_view(&self, ctx: &HostContext) -> HostResult<FieldView> {
        let width = ctx.get(&Self::resolution(WIDTH))?.as_int();
        let selected = self
            .ratio
            .and_then(|ratio| Format::ALL.iter().position(|f| f.width(ratio) == width));
        Ok(FieldView::choice(
            FORMAT_FIELD,
            "Format",
            Format::ALL.iter().map(|f| f.name().to_string()).collect(),
            selected,
            self.ratio.is_some(),
        ))
    }

    fn opacity_gate_view(&self, ctx: &HostContext, hovered: Option<&Preset>) -> PartResult<FieldView> {
        let live = Scalar::Bool(self.is_gate_opaque(ctx)?);
        let (decoration, shown) = decorate(
            hovered,
            self.id().name(),
            OPACITY_GATE,
            live,
            self.gate_opacity.is_displayed(ctx),
        );
        Ok(FieldView {
            key: OPACITY_GATE.to_string(),
            label: "Opaque Gate".to_string(),
            value: Some(shown),
            text: shown.to_string(),
            decoration,
            enabled: true,
            widget: FieldWidget::Toggle,
            can_add_override: self.gate_opacity.can_create(ctx),
            can_remove_override: self.gate_opacity.can_remove(ctx),
        })
    }
}

fn unknown(key: &str) -> PartError {
    PartError::UnknownField {
        part: PartId::ImageSize,
        key: key.to_string(),
    }
}

fn invalid_input(key: &str, input: &FieldInput) -> PartError {
    PartError::InvalidInput {
        key: key.to_string(),
        input: format!("{input:?}"),
    }
}

impl ControlRoomPart for ImageSizePart {
    fn id(&self) -> PartId {
        PartId::ImageSize
    }

    fn add_to_preset(&self, ctx: &HostContext, preset: &mut Preset) -> PartResult<()> {
        let part = self.id().name();
        self.width.add_to_preset(ctx, part, preset)?;
        self.height.add_to_preset(ctx, part, preset)?;
        if self.camera.is_some() {
            self.overscan.add_to_preset(ctx, part, preset)?;
            preset.set(part, OPACITY_GATE, self.is_gate_opaque(ctx)?);
            self.gate_enabled.add_to_preset(ctx, part, preset)?;
        }
        Ok(())
    }

    fn apply(&mut self, ctx: &HostContext, preset: &Preset) -> PartResult<()> {
        let part = self.id().name();
        let width_set = self.width.apply(ctx, part, preset)?;
        let height_set = self.height.apply(ctx, part, preset)?;
        if width_set || height_set {
            let width = ctx.get(&Self::resolution(WIDTH))?.as_float();
            let height = ctx.get(&Self::resolution(HEIGHT))?.as_float();
            if height != 0.0 {
                ctx.set(&Self::resolution(DEVICE_ASPECT_RATIO), width / height)?;
            }
        }
        self.retrieve_aspect_ratio(ctx);

        if self.camera.is_some() {
            self.overscan.apply(ctx, part, preset)?;
            self.gate_enabled.apply(ctx, part, preset)?;
            if let Some(opaque) = preset.get(part, OPACITY_GATE) {
                self.set_gate_opaque(ctx, opaque.as_bool())?;
            }
        }
        Ok(())
    }

    fn describe(&self, ctx: &HostContext, hovered: Option<&Preset>) -> PartResult<PartView> {
        let part = self.id().name();
        let mut view = PartView::new(self.id());
        view.fields.push(self.width.view(ctx, part, hovered, true)?);
        view.fields.push(self.height.view(ctx, part, hovered, true)?);

        let ratio_names = ASPECT_RATIOS.iter().map(|r| r.name.to_string()).collect();
        let ratio_index = self
            .ratio
            .and_then(|ratio| ASPECT_RATIOS.iter().position(|r| r.name == ratio.name));
        view.fields.push(FieldView::choice(
            ASPECT_RATIO_FIELD,
            "Aspect Ratio",
            ratio_names,
            ratio_index,
            true,
        ));
        view.fields.push(self.format_view(ctx)?);

        if self.camera.is_some() {
            view.fields.push(self.overscan.view(ctx, part, hovered, true)?);
            view.fields.push(self.gate_enabled.view(ctx, part, hovered, true)?);
            view.fields.push(self.opacity_gate_view(ctx, hovered)?);
        } else {
            view.notes.push("No renderable camera".to_string());
        }
        Ok(view)
    }

    fn edit(&mut self, ctx: &HostContext, key: &str, input: FieldInput) -> PartResult<EditEffect> {
        match key {
            WIDTH => {
                self.width.edit(ctx, input)?;
                self.sync_height(ctx)?;
            }
            HEIGHT => {
                self.height.edit(ctx, input)?;
                self.sync_width(ctx)?;
            }
            ASPECT_RATIO_FIELD => match input {
                FieldInput::Choice(choice) => self.select_ratio(ctx, &choice)?,
                other => return Err(invalid_input(key, &other)),
            },
            FORMAT_FIELD => match input {
                FieldInput::Choice(choice) => {
                    let format = Format::ALL
                        .into_iter()
                        .find(|f| f.name() == choice)
                        .ok_or_else(|| PartError::UnknownChoice {
                            key: key.to_string(),
                            choice: choice.clone(),
                        })?;
                    self.select_format(ctx, format)?;
                }
                other => return Err(invalid_input(key, &other)),
            },
            OVERSCAN | GATE_ENABLED if self.camera.is_none() => return Err(PartError::NoCamera),
            OVERSCAN => self.overscan.edit(ctx, input)?,
            GATE_ENABLED => self.gate_enabled.edit(ctx, input)?,
            OPACITY_GATE => match input {
                FieldInput::Value(value) => self.set_gate_opaque(ctx, value.as_bool())?,
                other => return Err(invalid_input(key, &other)),
            },
            _ => return Err(unknown(key)),
        }
        Ok(EditEffect::None)
    }

    fn preset_fields(&self) -> Vec<FieldRef> {
        [WIDTH, HEIGHT, OVERSCAN, OPACITY_GATE, GATE_ENABLED]
            .into_iter()
            .map(|key| FieldRef::new(self.id().name(), key))
            .collect()
    }

    fn watched_attributes(&self) -> Vec<AttributePath> {
        let mut paths = vec![
            Self::resolution(WIDTH),
            Self::resolution(HEIGHT),
            Self::resolution(DEVICE_ASPECT_RATIO),
        ];
        if let Some(camera) = self.camera.as_deref() {
            for attribute in [OVERSCAN, DISPLAY_RESOLUTION, GATE_MASK_OPACITY] {
                paths.push(AttributePath::new(camera, attribute));
            }
        }
        paths
    }

    fn on_attribute_changed(&mut self, ctx: &HostContext, path: &AttributePath) {
        if path.node == RESOLUTION {
            self.retrieve_aspect_ratio(ctx);
        }
    }

    fn on_camera_changed(&mut self, ctx: &HostContext, camera: Option<&str>) {
        self.camera = camera.map(str::to_string);
        let node = camera.unwrap_or_default();
        self.overscan.retarget(node);
        self.gate_enabled.retarget(node);
        self.gate_opacity.retarget(node);
        self.refresh_overrides(ctx);
    }

    fn refresh_overrides(&mut self, ctx: &HostContext) {
        self.width.adapter_mut().retrieve(ctx);
        self.height.adapter_mut().retrieve(ctx);
        if self.camera.is_some() {
            self.overscan.adapter_mut().retrieve(ctx);
            self.gate_enabled.adapter_mut().retrieve(ctx);
            self.gate_opacity.retrieve(ctx);
        }
    }

    fn add_override(&mut self, ctx: &HostContext, key: &str) -> PartResult<()> {
        let adapter = match key {
            WIDTH => self.width.adapter_mut(),
            HEIGHT => self.height.adapter_mut(),
            OVERSCAN | GATE_ENABLED | OPACITY_GATE if self.camera.is_none() => {
                return Err(PartError::NoCamera)
            }
            OVERSCAN => self.overscan.adapter_mut(),
            GATE_ENABLED => self.gate_enabled.adapter_mut(),
            OPACITY_GATE => &mut self.gate_opacity,
            _ => return Err(unknown(key)),
        };
        adapter.create(ctx)?;
        Ok(())
    }

    fn remove_override(&mut self, ctx: &HostContext, key: &str) -> PartResult<()> {
        let adapter = match key {
            WIDTH => self.width.adapter_mut(),
            HEIGHT => self.height.adapter_mut(),
            OVERSCAN => self.overscan.adapter_mut(),
            GATE_ENABLED => self.gate_enabled.adapter_mut(),
            OPACITY_GATE => &mut self.gate_opacity,
            _ => return Err(unknown(key)),
        };
        adapter.remove(ctx)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use control_room_core::InMemoryScene;
    use std::sync::Arc;

    fn context() -> HostContext {
        let scene = Arc::new(InMemoryScene::new());
        scene.add_node(RESOLUTION, "resolution");
        scene.define(RESOLUTION, WIDTH, 1920);
        scene.define(RESOLUTION, HEIGHT, 1080);
        scene.define(RESOLUTION, DEVICE_ASPECT_RATIO, 1.777_777_7);
        scene.add_node("perspShape", "camera");
        scene.define("perspShape", OVERSCAN, 1.0);
        scene.define("perspShape", DISPLAY_RESOLUTION, false);
        scene.define("perspShape", GATE_MASK_OPACITY, 0.7);
        for channel in GATE_MASK_COLOR {
            scene.define("perspShape", channel, 0.5);
        }
        HostContext::new(scene.clone(), scene)
    }

    fn get(ctx: &HostContext, node: &str, attribute: &str) -> Scalar {
        ctx.get(&AttributePath::new(node, attribute)).unwrap()
    }

    #[test]
    fn ratio_table_matching() {
        assert_eq!(match_aspect_ratio(1.7778).map(|r| r.name), Some("16:9"));
        assert_eq!(match_aspect_ratio(2.3869).map(|r| r.name), Some("Scope"));
        assert_eq!(match_aspect_ratio(1.5), None);
    }

    #[test]
    fn ratio_lock_couples_width_and_height() {
        let ctx = context();
        let mut part = ImageSizePart::new(&ctx, Some("perspShape"));
        assert_eq!(part.ratio().map(|r| r.name), Some("16:9"));

        part.edit(&ctx, WIDTH, FieldInput::Text("1280".to_string())).unwrap();
        assert_eq!(get(&ctx, RESOLUTION, HEIGHT), Scalar::Int(720));

        part.edit(&ctx, HEIGHT, FieldInput::Text("1080".to_string())).unwrap();
        assert_eq!(get(&ctx, RESOLUTION, WIDTH), Scalar::Int(1920));
    }

    #[test]
    fn selecting_current_ratio_unlocks() {
        let ctx = context();
        let mut part = ImageSizePart::new(&ctx, Some("perspShape"));
        part.edit(&ctx, ASPECT_RATIO_FIELD, FieldInput::Choice("16:9".to_string()))
            .unwrap();
        assert!(part.ratio().is_none());

        part.edit(&ctx, WIDTH, FieldInput::Text("1000".to_string())).unwrap();
        assert_eq!(get(&ctx, RESOLUTION, HEIGHT), Scalar::Int(1080));
        assert_eq!(
            part.select_format(&ctx, Format::Hd),
            Err(PartError::Disabled(FORMAT_FIELD.to_string()))
        );
    }

    #[test]
    fn ratio_then_format() {
        let ctx = context();
        let mut part = ImageSizePart::new(&ctx, Some("perspShape"));
        part.edit(&ctx, ASPECT_RATIO_FIELD, FieldInput::Choice("4:5".to_string()))
            .unwrap();
        part.edit(&ctx, FORMAT_FIELD, FieldInput::Choice("HD".to_string()))
            .unwrap();

        assert_eq!(get(&ctx, RESOLUTION, WIDTH), Scalar::Int(1536));
        assert_eq!(get(&ctx, RESOLUTION, HEIGHT), Scalar::Int(1920));
        let view = part.describe(&ctx, None).unwrap();
        assert_eq!(view.field(FORMAT_FIELD).unwrap().text, "HD");
        assert_eq!(view.field(ASPECT_RATIO_FIELD).unwrap().text, "4:5");
    }

    #[test]
    fn apply_sets_aspect_ratio_and_gate() {
        let ctx = context();
        let mut part = ImageSizePart::new(&ctx, Some("perspShape"));
        let mut preset = Preset::new("Square");
        preset.set("image_size", WIDTH, 1024);
        preset.set("image_size", HEIGHT, 1024);
        preset.set("image_size", OPACITY_GATE, true);

        part.apply(&ctx, &preset).unwrap();

        assert_eq!(get(&ctx, RESOLUTION, DEVICE_ASPECT_RATIO), Scalar::Float(1.0));
        assert_eq!(part.ratio().map(|r| r.name), Some("1:1"));
        assert_eq!(get(&ctx, "perspShape", GATE_MASK_OPACITY), Scalar::Float(1.0));
        assert_eq!(get(&ctx, "perspShape", "displayGateMaskColorG"), Scalar::Float(0.0));
        assert_eq!(get(&ctx, "perspShape", OVERSCAN), Scalar::Float(1.0));
    }

    #[test]
    fn apply_with_zero_height_keeps_aspect_ratio() {
        let ctx = context();
        let mut part = ImageSizePart::new(&ctx, None);
        let mut preset = Preset::new("Broken");
        preset.set("image_size", HEIGHT, 0);

        part.apply(&ctx, &preset).unwrap();

        assert_eq!(get(&ctx, RESOLUTION, HEIGHT), Scalar::Int(0));
        assert_eq!(
            get(&ctx, RESOLUTION, DEVICE_ASPECT_RATIO),
            Scalar::Float(1.777_777_7)
        );
    }

    #[test]
    fn preset_capture_includes_gate_state() {
        let ctx = context();
        let part = ImageSizePart::new(&ctx, Some("perspShape"));
        let mut preset = Preset::new("p");
        part.add_to_preset(&ctx, &mut preset).unwrap();
        assert_eq!(preset.get("image_size", OPACITY_GATE), Some(Scalar::Bool(false)));
        assert_eq!(preset.get("image_size", GATE_ENABLED), Some(Scalar::Bool(false)));
        assert_eq!(preset.len(), 5);
    }
}
