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

//! Toolkit-independent description of what the dialog shows.

use crate::decoration::Decoration;
use crate::part::PartId;
use control_room_core::Scalar;
use serde::Serialize;

/// Integer slider state. Float fields use a scaled integer slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SliderState {
    /// Lowest slider position.
    pub min: i64,
    /// Highest slider position.
    pub max: i64,
    /// Current slider position.
    pub position: i64,
    /// Positions per unit of value (1 for integers, 1000 for floats).
    pub scale: i64,
}

/// The widget a field is drawn with.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum FieldWidget {
    /// A checkbox.
    Toggle,
    /// A free text entry.
    Entry,
    /// A text entry next to a slider.
    Slider(SliderState),
    /// A set of mutually exclusive options.
    Choice {
        /// The option labels.
        options: Vec<String>,
        /// The selected option, if any.
        selected: Option<usize>,
    },
}

/// One field as the dialog should draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView {
    /// The key used by edits and presets.
    pub key: String,
    /// Human readable label.
    pub label: String,
    /// Displayed value. `None` for pure choice fields.
    pub value: Option<Scalar>,
    /// Displayed text.
    pub text: String,
    /// Highlight state.
    pub decoration: Decoration,
    /// Whether the field accepts edits.
    pub enabled: bool,
    /// The widget to draw.
    pub widget: FieldWidget,
    /// Whether "Add Override" should be offered.
    pub can_add_override: bool,
    /// Whether "Remove Override" should be offered.
    pub can_remove_override: bool,
}

impl FieldView {
    /// A choice field, never decorated nor overridable.
    pub fn choice(
        key: &str,
        label: &str,
        options: Vec<String>,
        selected: Option<usize>,
        enabled: bool,
    ) -> Self {
        let text = selected
            .and_then(|index| options.get(index).cloned())
            .unwrap_or_default();
        Self {
            key: key.to_string(),
            label: label.to_string(),
            value: None,
            text,
            decoration: Decoration::Neutral,
            enabled,
            widget: FieldWidget::Choice { options, selected },
            can_add_override: false,
            can_remove_override: false,
        }
    }
}

/// Everything one part shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartView {
    /// The part.
    pub id: PartId,
    /// Section title.
    pub title: String,
    /// Fields in display order.
    pub fields: Vec<FieldView>,
    /// Informational lines, e.g. warnings about the scene.
    pub notes: Vec<String>,
}

impl PartView {
    /// An empty view for `id`.
    pub fn new(id: PartId) -> Self {
        Self {
            id,
            title: id.title().to_string(),
            fields: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Looks a field up by key.
    pub fn field(&self, key: &str) -> Option<&FieldView> {
        self.fields.iter().find(|f| f.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn views_serialize_for_toolkits() {
        let mut view = PartView::new(PartId::ImageSize);
        view.fields.push(FieldView::choice(
            "format",
            "Format",
            vec!["SD".to_string(), "HD".to_string()],
            Some(1),
            true,
        ));
        view.fields.push(FieldView {
            key: "overscan".to_string(),
            label: "Overscan".to_string(),
            value: Some(Scalar::Float(1.2)),
            text: "1.2".to_string(),
            decoration: Decoration::Override,
            enabled: true,
            widget: FieldWidget::Slider(SliderState {
                min: 0,
                max: 10_000,
                position: 1200,
                scale: 1000,
            }),
            can_add_override: false,
            can_remove_override: true,
        });

        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["id"], "image_size");
        assert_eq!(json["title"], "Image Size");
        assert_eq!(json["fields"][0]["text"], "HD");
        assert_eq!(json["fields"][0]["widget"]["type"], "choice");
        assert_eq!(json["fields"][0]["widget"]["selected"], 1);
        assert_eq!(json["fields"][1]["value"], 1.2);
        assert_eq!(json["fields"][1]["widget"]["type"], "slider");
        assert_eq!(json["fields"][1]["widget"]["position"], 1200);
    }
}
