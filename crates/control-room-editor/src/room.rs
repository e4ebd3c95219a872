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

//! The dialog controller: owns the parts and the preset manager of a session.

use crate::config::{ControlRoomConfig, DialogPrefs, WindowPos, WindowSize};
use crate::error::{ControlRoomError, ControlRoomResult};
use crate::panel::{PresetsPanel, PresetsPanelView};
use control_room_core::{
    AttributePath, EventBus, HostContext, HostError, HostEvent, SceneMetadata, WatchId,
};
use control_room_parts::nodes::RENDER_OPTIONS;
use control_room_parts::{
    AdaptiveSamplingPart, CameraPart, ControlRoomPart, Decoration, DepthOfFieldPart, EditEffect,
    FeatureOverridesPart, FieldInput, ImageSizePart, MotionBlurPart, PartId, PartResult, PartView,
    SamplingPart,
};
use control_room_presets::{validate_name, FieldRef, FileInfoStore, Preset, PresetError, PresetManager};
use std::path::PathBuf;
use std::sync::Arc;

/// Builds the settings parts in display order.
pub fn default_parts(ctx: &HostContext) -> Vec<Box<dyn ControlRoomPart>> {
    let camera = CameraPart::new(ctx);
    let selected = camera.selected().map(str::to_string);
    vec![
        Box::new(camera),
        Box::new(FeatureOverridesPart::new()),
        Box::new(DepthOfFieldPart::new(selected.as_deref())),
        Box::new(MotionBlurPart::new()),
        Box::new(ImageSizePart::new(ctx, selected.as_deref())),
        Box::new(SamplingPart::new()),
        Box::new(AdaptiveSamplingPart::new()),
    ]
}

/// The Control Room dialog, independent of any widget toolkit.
///
/// The controller owns the settings parts and the [`PresetManager`]. A toolkit
/// draws [`describe`](Self::describe) and [`panel`](Self::panel), forwards user
/// edits, and calls [`pump_events`](Self::pump_events) whenever the host may
/// have published [`HostEvent`]s on [`events`](Self::events).
///
/// While a preset is hovered, field edits are treated as display echoes and
/// dropped, so a preview never writes live attributes.
pub struct ControlRoom {
    ctx: HostContext,
    manager: PresetManager,
    parts: Vec<Box<dyn ControlRoomPart>>,
    panel: PresetsPanel,
    events: EventBus<HostEvent>,
    watches: Vec<WatchId>,
    hovered: Option<String>,
    excluded_parts: Vec<PartId>,
    prefs: DialogPrefs,
    prefs_path: Option<PathBuf>,
    open: bool,
}

impl ControlRoom {
    /// Opens the dialog on a scene whose presets live in its file info.
    pub fn from_scene(
        ctx: HostContext,
        metadata: Arc<dyn SceneMetadata>,
        config: &ControlRoomConfig,
    ) -> ControlRoomResult<Self> {
        let store = FileInfoStore::with_key(metadata, config.store_key.clone());
        let manager = PresetManager::new(Box::new(store), config.defaults_dir.clone());
        Self::open(ctx, manager, config)
    }

    /// Opens the dialog.
    ///
    /// Fails if the renderer is not loaded. The manager is hydrated if needed,
    /// override state is read and the watched attributes are subscribed.
    pub fn open(
        ctx: HostContext,
        mut manager: PresetManager,
        config: &ControlRoomConfig,
    ) -> ControlRoomResult<Self> {
        if !ctx.attributes.exists(RENDER_OPTIONS) {
            log::error!("Control Room can't run without the Arnold Renderer loaded.");
            return Err(ControlRoomError::RendererNotLoaded);
        }
        manager.initialize();

        let parts = default_parts(&ctx);
        let mut room = Self {
            ctx,
            manager,
            parts,
            panel: PresetsPanel::new(config.max_presets),
            events: EventBus::new(),
            watches: Vec::new(),
            hovered: None,
            excluded_parts: config.excluded_parts.clone(),
            prefs: DialogPrefs::default(),
            prefs_path: None,
            open: true,
        };
        room.refresh_overrides();
        room.watch_all();
        log::info!("Control Room opened on layer '{}'.", room.ctx.visible_layer().name);
        Ok(room)
    }

    /// Uses `prefs`, written back to `path` when the dialog closes.
    pub fn with_prefs(mut self, prefs: DialogPrefs, path: Option<PathBuf>) -> Self {
        self.prefs = prefs;
        self.prefs_path = path;
        self
    }

    /// The window preferences.
    pub fn prefs(&self) -> &DialogPrefs {
        &self.prefs
    }

    /// Records the window geometry.
    pub fn set_geometry(&mut self, size: WindowSize, pos: WindowPos) {
        self.prefs.remember(size, pos);
    }

    /// The event bus the host publishes on.
    pub fn events(&self) -> &EventBus<HostEvent> {
        &self.events
    }

    /// The host collaborators.
    pub fn context(&self) -> &HostContext {
        &self.ctx
    }

    /// The preset manager of the session.
    pub fn manager(&self) -> &PresetManager {
        &self.manager
    }

    /// Whether the dialog is still open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The parts, in display order.
    pub fn parts(&self) -> &[Box<dyn ControlRoomPart>] {
        &self.parts
    }

    /// The part with this id.
    pub fn part(&self, id: PartId) -> Option<&dyn ControlRoomPart> {
        self.parts.iter().find(|p| p.id() == id).map(|p| p.as_ref())
    }

    /// Number of attribute subscriptions currently held.
    pub fn watch_count(&self) -> usize {
        self.watches.len()
    }

    fn ensure_open(&self) -> ControlRoomResult<()> {
        if self.open {
            Ok(())
        } else {
            Err(ControlRoomError::Closed)
        }
    }

    fn part_index(&self, id: PartId) -> ControlRoomResult<usize> {
        self.parts
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| ControlRoomError::UnknownPart(id.name().to_string()))
    }

    /// A user preset, or else a default preset, named `name`.
    pub fn find_preset(&self, name: &str) -> Option<&Preset> {
        self.manager
            .preset(name)
            .or_else(|| self.manager.default_preset(name))
    }

    // --- Display ---

    /// Describes every part, decorated against the hovered preset.
    pub fn describe(&self) -> ControlRoomResult<Vec<PartView>> {
        self.ensure_open()?;
        let hovered = self.hovered_preset();
        let views = self
            .parts
            .iter()
            .map(|part| part.describe(&self.ctx, hovered))
            .collect::<PartResult<Vec<_>>>()?;
        Ok(views)
    }

    /// Describes the presets row.
    pub fn panel(&self) -> PresetsPanelView {
        self.panel.view(&self.manager, self.hovered.as_deref())
    }

    /// Starts previewing a preset.
    pub fn hover_preset(&mut self, name: &str) -> ControlRoomResult<()> {
        self.ensure_open()?;
        if self.find_preset(name).is_none() {
            return Err(ControlRoomError::UnknownPreset(name.to_string()));
        }
        log::trace!("Hovering preset '{name}'.");
        self.hovered = Some(name.to_string());
        Ok(())
    }

    /// Stops previewing.
    pub fn clear_hover(&mut self) {
        self.hovered = None;
    }

    /// The previewed preset, if any.
    pub fn hovered_preset(&self) -> Option<&Preset> {
        self.hovered.as_deref().and_then(|name| self.find_preset(name))
    }

    // --- Edits ---

    /// Forwards a field edit to its part.
    ///
    /// Dropped while a preset is hovered.
    pub fn edit(&mut self, part: PartId, key: &str, input: FieldInput) -> ControlRoomResult<EditEffect> {
        self.ensure_open()?;
        if self.hovered.is_some() {
            log::trace!("Ignoring edit of {part}/{key} during preset hover.");
            return Ok(EditEffect::None);
        }
        let index = self.part_index(part)?;
        let effect = self.parts[index].edit(&self.ctx, key, input)?;
        self.handle_effect(&effect);
        Ok(effect)
    }

    /// Creates an override for a field on the visible layer.
    pub fn add_override(&mut self, part: PartId, key: &str) -> ControlRoomResult<()> {
        self.ensure_open()?;
        let index = self.part_index(part)?;
        self.parts[index].add_override(&self.ctx, key)?;
        Ok(())
    }

    /// Deletes the override of a field on the visible layer.
    pub fn remove_override(&mut self, part: PartId, key: &str) -> ControlRoomResult<()> {
        self.ensure_open()?;
        let index = self.part_index(part)?;
        self.parts[index].remove_override(&self.ctx, key)?;
        Ok(())
    }

    fn handle_effect(&mut self, effect: &EditEffect) {
        if let EditEffect::CameraChanged(camera) = effect {
            self.propagate_camera(camera.as_deref());
        }
    }

    fn propagate_camera(&mut self, camera: Option<&str>) {
        log::info!("Camera changed to {}", camera.unwrap_or("<none>"));
        for part in self.parts.iter_mut().filter(|p| p.id() != PartId::Camera) {
            part.on_camera_changed(&self.ctx, camera);
        }
        self.unwatch_all();
        self.watch_all();
    }

    // --- Presets ---

    /// The fields generated presets keep.
    fn captured_fields(&self) -> Vec<FieldRef> {
        self.parts
            .iter()
            .filter(|p| !self.excluded_parts.contains(&p.id()))
            .flat_map(|p| p.preset_fields())
            .collect()
    }

    fn capture(&self, name: &str) -> ControlRoomResult<Preset> {
        let mut preset = Preset::new(name).with_active(true);
        if !validate_name(preset.name()) {
            return Err(PresetError::InvalidName(name.to_string()).into());
        }
        for part in &self.parts {
            part.add_to_preset(&self.ctx, &mut preset)?;
        }
        preset.filter(&self.captured_fields());
        Ok(preset)
    }

    fn store(&mut self, preset: Preset) -> ControlRoomResult<()> {
        log::info!("Saving preset '{}' ({} fields).", preset.name(), preset.len());
        self.manager.add_preset(preset);
        self.manager.save_presets()?;
        Ok(())
    }

    /// Captures every part into an active preset named `name`, replacing any
    /// user preset with that name, and saves.
    ///
    /// Every part is captured before anything is written.
    pub fn generate_preset(&mut self, name: &str) -> ControlRoomResult<()> {
        self.ensure_open()?;
        let preset = self.capture(name)?;
        self.store(preset)
    }

    /// Like [`generate_preset`](Self::generate_preset), but keeps only the
    /// fields overridden on the visible layer.
    pub fn generate_layer_preset(&mut self, name: &str) -> ControlRoomResult<()> {
        self.ensure_open()?;
        if self.ctx.visible_layer().is_default() {
            return Err(HostError::DefaultLayer.into());
        }
        let mut preset = self.capture(name)?;
        let mut overridden = Vec::new();
        for part in &self.parts {
            let view = part.describe(&self.ctx, None)?;
            overridden.extend(
                view.fields
                    .iter()
                    .filter(|f| f.decoration == Decoration::Override)
                    .map(|f| FieldRef::new(part.id().name(), f.key.as_str())),
            );
        }
        preset.filter(&overridden);
        self.store(preset)
    }

    /// Generates a preset under the next free `Preset<N>` name.
    pub fn new_preset(&mut self) -> ControlRoomResult<String> {
        self.ensure_open()?;
        if !self.panel.has_room(&self.manager) {
            return Err(ControlRoomError::PanelFull(self.panel.capacity()));
        }
        let name = self.manager.next_preset_name();
        self.generate_preset(&name)?;
        Ok(name)
    }

    /// Overwrites an existing user preset with the live values.
    pub fn save_to_preset(&mut self, name: &str) -> ControlRoomResult<()> {
        self.ensure_open()?;
        if !self.manager.has_preset_with_name(name) {
            return Err(ControlRoomError::UnknownPreset(name.to_string()));
        }
        self.generate_preset(name)
    }

    /// Writes a user or default preset to the scene.
    ///
    /// A part that fails is logged and skipped; the others still apply.
    pub fn apply_preset(&mut self, name: &str) -> ControlRoomResult<()> {
        self.ensure_open()?;
        let preset = self
            .find_preset(name)
            .cloned()
            .ok_or_else(|| ControlRoomError::UnknownPreset(name.to_string()))?;
        self.hovered = None;
        for part in &mut self.parts {
            if let Err(e) = part.apply(&self.ctx, &preset) {
                log::warn!("Part '{}' could not apply preset '{name}': {e}", part.id());
            }
        }
        self.refresh_overrides();
        log::info!("Preset '{name}' applied.");
        Ok(())
    }

    /// Renames a user preset and saves. A rejected name changes nothing.
    pub fn rename_preset(&mut self, old: &str, new: &str) -> ControlRoomResult<()> {
        self.ensure_open()?;
        self.manager.rename_preset(old, new)?;
        self.manager.save_presets()?;
        if self.hovered.as_deref() == Some(old) {
            self.hovered = Some(new.to_string());
        }
        Ok(())
    }

    /// Deletes a user preset and saves.
    pub fn delete_preset(&mut self, name: &str) -> ControlRoomResult<()> {
        self.ensure_open()?;
        self.manager
            .remove_preset(Some(name))
            .ok_or_else(|| ControlRoomError::UnknownPreset(name.to_string()))?;
        self.manager.save_presets()?;
        if self.hovered.as_deref() == Some(name) {
            self.hovered = None;
        }
        log::info!("Preset '{name}' deleted.");
        Ok(())
    }

    // --- Host events ---

    /// Handles every pending host event. Returns how many were handled.
    ///
    /// A [`HostEvent::SceneOpened`] reloads the presets and closes the
    /// dialog; events queued after it are dropped.
    pub fn pump_events(&mut self) -> ControlRoomResult<usize> {
        self.ensure_open()?;
        let mut handled = 0;
        for event in self.events.drain() {
            if !self.open {
                log::debug!("Dialog closed, dropping {event:?}");
                continue;
            }
            self.handle_event(event);
            handled += 1;
        }
        Ok(handled)
    }

    fn handle_event(&mut self, event: HostEvent) {
        log::trace!("Handling {event:?}");
        match event {
            HostEvent::AttributeChanged(path) => self.attribute_changed(&path),
            HostEvent::VisibleLayerChanged { layer } => {
                log::debug!("Visible layer is now '{layer}'.");
                self.refresh_overrides();
            }
            HostEvent::SceneOpened => {
                log::info!("Scene opened: reloading presets and closing the Control Room.");
                self.manager.retrieve_presets();
                self.close();
            }
            HostEvent::SelectionChanged => {
                let Ok(index) = self.part_index(PartId::Camera) else {
                    return;
                };
                match self.parts[index].on_selection_changed(&self.ctx) {
                    Ok(effect) => self.handle_effect(&effect),
                    Err(e) => log::warn!("Cannot update the camera after a selection change: {e}"),
                }
            }
        }
    }

    fn attribute_changed(&mut self, path: &AttributePath) {
        for part in &mut self.parts {
            if part.watched_attributes().contains(path) {
                part.on_attribute_changed(&self.ctx, path);
            }
        }
    }

    fn refresh_overrides(&mut self) {
        for part in &mut self.parts {
            part.refresh_overrides(&self.ctx);
        }
    }

    fn watch_all(&mut self) {
        for part in &self.parts {
            for path in part.watched_attributes() {
                self.watches.push(self.ctx.attributes.watch(&path));
            }
        }
        log::debug!("Watching {} attributes.", self.watches.len());
    }

    fn unwatch_all(&mut self) {
        for id in self.watches.drain(..) {
            self.ctx.attributes.unwatch(id);
        }
    }

    /// Closes the dialog: drops subscriptions and saves the preferences.
    ///
    /// Closing twice does nothing.
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.hovered = None;
        self.unwatch_all();
        if let Some(path) = &self.prefs_path {
            if let Err(e) = self.prefs.save_to(path) {
                log::warn!("Cannot save dialog preferences: {e}");
            }
        }
        log::info!("Control Room closed.");
    }
}

impl Drop for ControlRoom {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for ControlRoom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlRoom")
            .field("ctx", &self.ctx)
            .field("parts", &self.parts.iter().map(|p| p.id()).collect::<Vec<_>>())
            .field("presets", &self.manager.len())
            .field("hovered", &self.hovered)
            .field("open", &self.open)
            .finish()
    }
}
