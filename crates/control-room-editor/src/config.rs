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

//! Session configuration and persisted window preferences.

use crate::error::ControlRoomResult;
use control_room_parts::PartId;
use control_room_presets::DEFAULT_STORE_KEY;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Number of user presets the panel shows.
pub const MAX_PRESETS: usize = 4;

/// Minimum (and default) window width.
pub const MIN_WIDTH: u32 = 550;
/// Minimum (and default) window height.
pub const MIN_HEIGHT: u32 = 900;

const PREFS_DIR: &str = "control_room";
const PREFS_FILE: &str = "control_room.json";

/// How a Control Room session is set up.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlRoomConfig {
    /// Directory holding the bundled default presets.
    pub defaults_dir: Option<PathBuf>,
    /// Maximum number of user presets.
    pub max_presets: usize,
    /// Scene metadata key the user presets are stored under.
    pub store_key: String,
    /// Parts whose fields are left out of generated presets.
    pub excluded_parts: Vec<PartId>,
}

impl Default for ControlRoomConfig {
    fn default() -> Self {
        Self {
            defaults_dir: None,
            max_presets: MAX_PRESETS,
            store_key: DEFAULT_STORE_KEY.to_string(),
            excluded_parts: Vec::new(),
        }
    }
}

impl ControlRoomConfig {
    /// Sets the defaults directory.
    pub fn with_defaults_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.defaults_dir = Some(dir.into());
        self
    }

    /// Leaves `part` out of generated presets.
    pub fn excluding(mut self, part: PartId) -> Self {
        if !self.excluded_parts.contains(&part) {
            self.excluded_parts.push(part);
        }
        self
    }
}

/// Window size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Window position in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowPos {
    /// Horizontal position.
    pub x: i32,
    /// Vertical position.
    pub y: i32,
}

/// Window geometry remembered between sessions.
///
/// A missing position means "centered on the main window".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogPrefs {
    /// Last window size.
    #[serde(default = "default_size")]
    pub window_size: WindowSize,
    /// Last window position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_pos: Option<WindowPos>,
}

fn default_size() -> WindowSize {
    WindowSize {
        width: MIN_WIDTH,
        height: MIN_HEIGHT,
    }
}

impl Default for DialogPrefs {
    fn default() -> Self {
        Self {
            window_size: default_size(),
            window_pos: None,
        }
    }
}

impl DialogPrefs {
    /// Location of the preferences file in the user config directory.
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(PREFS_DIR)
            .join(PREFS_FILE)
    }

    /// Loads the preferences from the user config directory.
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    /// Loads preferences from `path`.
    ///
    /// A missing or unreadable file yields the defaults.
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            log::debug!("No dialog preferences at {}", path.display());
            return Self::default();
        };
        match serde_json::from_str::<Self>(&contents) {
            Ok(prefs) => prefs.clamped(),
            Err(e) => {
                log::warn!("Ignoring corrupt preferences {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Writes the preferences to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> ControlRoomResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::debug!("Dialog preferences saved to {}", path.display());
        Ok(())
    }

    /// Records the window geometry at close time.
    pub fn remember(&mut self, size: WindowSize, pos: WindowPos) {
        self.window_size = size;
        self.window_pos = Some(pos);
        *self = self.clamped();
    }

    /// The same preferences with the size raised to the minimum.
    pub fn clamped(mut self) -> Self {
        self.window_size.width = self.window_size.width.max(MIN_WIDTH);
        self.window_size.height = self.window_size.height.max(MIN_HEIGHT);
        self
    }
}
