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

//! Selection of the renderable camera the camera-bound parts follow.

use crate::error::{PartError, PartResult};
use crate::field::FieldInput;
use crate::nodes::{CAMERA_RENDERABLE, CAMERA_TYPE};
use crate::part::{ControlRoomPart, EditEffect, PartId};
use crate::view::{FieldView, PartView};
use control_room_core::{AttributePath, HostContext};
use control_room_presets::Preset;

/// Key of the camera choice field.
pub const CAMERA_FIELD: &str = "camera";

/// Lists the cameras flagged as renderable, sorted by name.
///
/// A camera whose flag cannot be read is treated as not renderable.
pub fn renderable_cameras(ctx: &HostContext) -> Vec<String> {
    ctx.attributes
        .nodes_of_type(CAMERA_TYPE)
        .into_iter()
        .filter(|cam| {
            ctx.get(&AttributePath::new(cam.as_str(), CAMERA_RENDERABLE))
                .is_ok_and(|renderable| renderable.as_bool())
        })
        .collect()
}

/// Picks which renderable camera the dialog works on. Stores nothing in presets.
#[derive(Debug, Clone, Default)]
pub struct CameraPart {
    selected: Option<String>,
}

impl CameraPart {
    /// Selects the first renderable camera of the scene.
    ///
    /// Logs a warning when there is none, and a notice when several cameras
    /// are renderable.
    pub fn new(ctx: &HostContext) -> Self {
        let cameras = renderable_cameras(ctx);
        match cameras.len() {
            0 => log::warn!("There is no renderable camera set in render settings."),
            1 => {}
            n => log::info!("{n} cameras are set as renderable."),
        }
        Self {
            selected: cameras.into_iter().next(),
        }
    }

    /// The selected camera.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Selects a renderable camera by name.
    pub fn select(&mut self, ctx: &HostContext, camera: &str) -> PartResult<EditEffect> {
        if !renderable_cameras(ctx).iter().any(|c| c == camera) {
            return Err(PartError::UnknownCamera(camera.to_string()));
        }
        if self.selected.as_deref() == Some(camera) {
            return Ok(EditEffect::None);
        }
        self.selected = Some(camera.to_string());
        log::debug!("Camera '{camera}' selected.");
        Ok(EditEffect::CameraChanged(self.selected.clone()))
    }
}

impl ControlRoomPart for CameraPart {
    fn id(&self) -> PartId {
        PartId::Camera
    }

    fn add_to_preset(&self, _ctx: &HostContext, _preset: &mut Preset) -> PartResult<()> {
        Ok(())
    }

    fn apply(&mut self, _ctx: &HostContext, _preset: &Preset) -> PartResult<()> {
        Ok(())
    }

    fn describe(&self, ctx: &HostContext, _hovered: Option<&Preset>) -> PartResult<PartView> {
        let cameras = renderable_cameras(ctx);
        let mut view = PartView::new(self.id());
        match cameras.len() {
            0 => view
                .notes
                .push("There is no renderable camera set in render settings".to_string()),
            1 => {}
            n => view
                .notes
                .push(format!("{n} cameras are set as renderable")),
        }
        let selected = self
            .selected
            .as_ref()
            .and_then(|sel| cameras.iter().position(|c| c == sel));
        view.fields.push(FieldView::choice(
            CAMERA_FIELD,
            "Renderable Camera",
            cameras,
            selected,
            true,
        ));
        Ok(view)
    }

    fn edit(&mut self, ctx: &HostContext, key: &str, input: FieldInput) -> PartResult<EditEffect> {
        if key != CAMERA_FIELD {
            return Err(PartError::UnknownField {
                part: self.id(),
                key: key.to_string(),
            });
        }
        match input {
            FieldInput::Choice(camera) => self.select(ctx, &camera),
            other => Err(PartError::InvalidInput {
                key: key.to_string(),
                input: format!("{other:?}"),
            }),
        }
    }

    /// Cameras may have been created, deleted or flagged. Keeps the selection
    /// when it is still renderable, falls back to the first camera otherwise.
    fn on_selection_changed(&mut self, ctx: &HostContext) -> PartResult<EditEffect> {
        let cameras = renderable_cameras(ctx);
        let still_valid = self
            .selected
            .as_ref()
            .is_some_and(|sel| cameras.contains(sel));
        if still_valid {
            return Ok(EditEffect::None);
        }
        let fallback = cameras.into_iter().next();
        if fallback == self.selected {
            return Ok(EditEffect::None);
        }
        self.selected = fallback;
        Ok(EditEffect::CameraChanged(self.selected.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use control_room_core::InMemoryScene;
    use std::sync::Arc;

    fn scene() -> (Arc<InMemoryScene>, HostContext) {
        let scene = Arc::new(InMemoryScene::new());
        for (name, renderable) in [("frontShape", false), ("perspShape", true), ("topShape", true)] {
            scene.add_node(name, CAMERA_TYPE);
            scene.define(name, CAMERA_RENDERABLE, renderable);
        }
        let ctx = HostContext::new(scene.clone(), scene.clone());
        (scene, ctx)
    }

    #[test]
    fn picks_first_renderable_camera() {
        let (_, ctx) = scene();
        let part = CameraPart::new(&ctx);
        assert_eq!(part.selected(), Some("perspShape"));
        assert_eq!(renderable_cameras(&ctx), vec!["perspShape", "topShape"]);

        let view = part.describe(&ctx, None).unwrap();
        assert_eq!(view.notes, vec!["2 cameras are set as renderable"]);
        assert_eq!(view.field(CAMERA_FIELD).unwrap().text, "perspShape");
    }

    #[test]
    fn selecting_reports_camera_change() {
        let (_, ctx) = scene();
        let mut part = CameraPart::new(&ctx);
        assert_eq!(
            part.edit(&ctx, CAMERA_FIELD, FieldInput::Choice("topShape".to_string())),
            Ok(EditEffect::CameraChanged(Some("topShape".to_string())))
        );
        assert_eq!(
            part.select(&ctx, "frontShape"),
            Err(PartError::UnknownCamera("frontShape".to_string()))
        );
        assert_eq!(part.select(&ctx, "topShape"), Ok(EditEffect::None));
    }

    #[test]
    fn deleted_camera_falls_back_to_first() {
        let (scene, ctx) = scene();
        let mut part = CameraPart::new(&ctx);
        scene.remove_node("perspShape");
        assert_eq!(
            part.on_selection_changed(&ctx),
            Ok(EditEffect::CameraChanged(Some("topShape".to_string())))
        );
        scene.remove_node("topShape");
        assert_eq!(
            part.on_selection_changed(&ctx),
            Ok(EditEffect::CameraChanged(None))
        );
        assert_eq!(part.on_selection_changed(&ctx), Ok(EditEffect::None));
    }
}
