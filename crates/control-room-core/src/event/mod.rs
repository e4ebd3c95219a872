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

//! Notifications emitted by the host application.
//!
//! The host pushes [`HostEvent`]s into an [`EventBus`]; the dialog owns the bus
//! and drains the receiver on the UI thread. The bus itself is generic so tests
//! can use it with their own event types.

mod bus;

pub use self::bus::EventBus;

use crate::attribute::AttributePath;

/// A notification coming from the host session.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// A watched attribute changed value.
    AttributeChanged(AttributePath),
    /// Another render layer became visible.
    VisibleLayerChanged {
        /// Name of the newly visible layer.
        layer: String,
    },
    /// A scene file was opened; all scene-bound state is stale.
    SceneOpened,
    /// The selection changed, which may mean a camera was created or deleted.
    SelectionChanged,
}
