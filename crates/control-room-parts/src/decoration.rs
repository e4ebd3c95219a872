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

//! How a field is highlighted when the dialog draws it.

use control_room_core::Scalar;
use control_room_presets::Preset;
use serde::Serialize;

/// Visual state of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decoration {
    /// Nothing to highlight.
    #[default]
    Neutral,
    /// The attribute has an override on the visible render layer.
    Override,
    /// The hovered preset stores this field with the live value.
    PresetMatches,
    /// The hovered preset stores this field with another value.
    PresetDiffers,
}

impl Decoration {
    /// Returns `true` for the two hover preview states.
    pub fn is_preview(&self) -> bool {
        matches!(self, Decoration::PresetMatches | Decoration::PresetDiffers)
    }

    /// Colour hint for toolkits, as a CSS hex string.
    pub fn color_hint(&self) -> Option<&'static str> {
        match self {
            Decoration::Neutral => None,
            Decoration::Override => Some("#ff7f00"),
            Decoration::PresetMatches => Some("#5cb85c"),
            Decoration::PresetDiffers => Some("#d9534f"),
        }
    }
}

/// Resolves the decoration of a field and the value to display.
///
/// A hovered preset that stores the field wins over override state. When the
/// preset differs from the live value the preset's value is displayed, so the
/// user previews what applying it would do.
pub fn decorate(
    hovered: Option<&Preset>,
    part: &str,
    key: &str,
    live: Scalar,
    override_displayed: bool,
) -> (Decoration, Scalar) {
    if let Some(stored) = hovered.and_then(|preset| preset.get(part, key)) {
        if stored.matches(&live) {
            return (Decoration::PresetMatches, live);
        }
        return (Decoration::PresetDiffers, stored.coerce_to(live.kind()));
    }
    if override_displayed {
        (Decoration::Override, live)
    } else {
        (Decoration::Neutral, live)
    }
}
