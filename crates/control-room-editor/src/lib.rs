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

//! # Control Room Editor
//!
//! The Control Room dialog as a headless controller.
//!
//! [`ControlRoom`] wires the settings parts of `control-room-parts` to a
//! [`PresetManager`](control_room_presets::PresetManager), turns host
//! notifications into part updates and exposes plain views any widget toolkit
//! can draw. [`DialogPrefs`] remembers the window geometry between sessions.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod panel;
pub mod room;
pub mod sample;

pub use config::{ControlRoomConfig, DialogPrefs, WindowPos, WindowSize, MAX_PRESETS};
pub use error::{ControlRoomError, ControlRoomResult};
pub use panel::{PresetSlot, PresetsPanel, PresetsPanelView};
pub use room::{default_parts, ControlRoom};
