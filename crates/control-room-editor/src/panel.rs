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

//! The presets row at the bottom of the dialog.

use control_room_presets::PresetManager;
use serde::Serialize;

/// One user preset slot and the actions it offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetSlot {
    /// Preset name.
    pub name: String,
    /// Whether it is the active preset.
    pub active: bool,
    /// Whether the pointer is over its apply button.
    pub hovered: bool,
}

/// Everything the presets row displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetsPanelView {
    /// User presets, sorted by name, at most the panel capacity.
    pub slots: Vec<PresetSlot>,
    /// Bundled presets, which can be applied but not edited.
    pub defaults: Vec<String>,
    /// Whether the "New Preset" button is shown.
    pub can_add: bool,
    /// Slots left empty after the button.
    pub free_slots: usize,
}

/// Lays out user presets in a fixed number of slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetsPanel {
    capacity: usize,
}

impl PresetsPanel {
    /// Creates a panel with `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether a new preset fits.
    pub fn has_room(&self, manager: &PresetManager) -> bool {
        manager.len() < self.capacity
    }

    /// Builds the view of the panel.
    pub fn view(&self, manager: &PresetManager, hovered: Option<&str>) -> PresetsPanelView {
        let slots: Vec<PresetSlot> = manager
            .get_presets()
            .into_iter()
            .take(self.capacity)
            .map(|preset| PresetSlot {
                name: preset.name().to_string(),
                active: preset.is_active(),
                hovered: hovered == Some(preset.name()),
            })
            .collect();
        let can_add = slots.len() < self.capacity;
        let used = slots.len() + usize::from(can_add);
        PresetsPanelView {
            defaults: manager
                .default_presets()
                .iter()
                .map(|p| p.name().to_string())
                .collect(),
            free_slots: self.capacity.saturating_sub(used),
            can_add,
            slots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use control_room_presets::{InMemoryStore, Preset};

    fn manager_with(names: &[&str]) -> PresetManager {
        let mut manager = PresetManager::open(Box::new(InMemoryStore::new()), None);
        for name in names {
            manager.add_preset(Preset::new(name));
        }
        manager
    }

    #[test]
    fn empty_panel_offers_new_preset() {
        let panel = PresetsPanel::new(4);
        let view = panel.view(&manager_with(&[]), None);
        assert!(view.slots.is_empty());
        assert!(view.can_add);
        assert_eq!(view.free_slots, 3);
    }

    #[test]
    fn full_panel_hides_new_preset() {
        let panel = PresetsPanel::new(4);
        let manager = manager_with(&["D", "B", "A", "C"]);
        let view = panel.view(&manager, Some("B"));

        assert!(!view.can_add);
        assert!(!panel.has_room(&manager));
        assert_eq!(view.free_slots, 0);
        let names: Vec<_> = view.slots.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C", "D"]);
        assert!(view.slots[1].hovered);
    }
}
