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

//! Errors of the dialog controller.

use control_room_core::HostError;
use control_room_parts::PartError;
use control_room_presets::PresetError;
use thiserror::Error;

/// A convenience alias for dialog operations.
pub type ControlRoomResult<T> = Result<T, ControlRoomError>;

/// An error raised by the Control Room dialog.
#[derive(Debug, Error)]
pub enum ControlRoomError {
    /// The renderer's global options node is missing from the scene.
    #[error("Arnold Renderer not loaded: open the Render Settings window to load it")]
    RendererNotLoaded,
    /// The dialog was closed, typically because another scene was opened.
    #[error("The Control Room dialog is closed")]
    Closed,
    /// No part has this name.
    #[error("Unknown part: {0}")]
    UnknownPart(String),
    /// Neither a user nor a default preset has this name.
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
    /// Every preset slot of the panel is used.
    #[error("No free preset slot (maximum {0})")]
    PanelFull(usize),
    /// A settings part rejected the operation.
    #[error(transparent)]
    Part(#[from] PartError),
    /// The preset subsystem rejected the operation.
    #[error(transparent)]
    Preset(#[from] PresetError),
    /// The host rejected the operation.
    #[error(transparent)]
    Host(#[from] HostError),
    /// Preferences could not be read or written.
    #[error("Preferences I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Preferences could not be encoded.
    #[error("Preferences JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
