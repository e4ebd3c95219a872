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

//! # Control Room Parts
//!
//! The settings parts of the Control Room and the machinery they share.
//!
//! Every part implements [`ControlRoomPart`]: it can capture its fields into a
//! [`Preset`](control_room_presets::Preset), write a preset back to the scene,
//! and describe itself as a [`PartView`] decorated against a hovered preset.
//! Simple parts are a [`FieldGroup`] of [`FieldBinding`]s; each binding tracks
//! the render-layer override of its attribute through an [`OverrideAdapter`].

#![warn(missing_docs)]

pub mod decoration;
pub mod error;
pub mod field;
pub mod nodes;
pub mod override_adapter;
pub mod part;
pub mod parts;
pub mod view;

pub use decoration::{decorate, Decoration};
pub use error::{PartError, PartResult};
pub use field::{FieldBinding, FieldGroup, FieldInput, FieldKind, SliderRange, FLOAT_SLIDER_SCALE};
pub use override_adapter::OverrideAdapter;
pub use part::{ControlRoomPart, EditEffect, PartId};
pub use parts::*;
pub use view::{FieldView, FieldWidget, PartView, SliderState};
