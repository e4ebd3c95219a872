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

//! # Control Room Core
//!
//! Foundational crate containing the scalar value type, the interface contracts
//! for the host application (attributes, render-layer overrides, scene metadata)
//! and the event primitives the dialog listens on.
//!
//! Nothing in this crate knows about presets or settings parts. Higher-level
//! crates build on these contracts, and the [`memory`] module provides a
//! complete in-memory host for tests and the demo binary.

#![warn(missing_docs)]

pub mod attribute;
pub mod context;
pub mod error;
pub mod event;
pub mod memory;
pub mod metadata;
pub mod overrides;
pub mod value;

pub use attribute::{AttributeHost, AttributePath, WatchId};
pub use context::HostContext;
pub use error::{HostError, HostResult};
pub use event::{EventBus, HostEvent};
pub use memory::InMemoryScene;
pub use metadata::SceneMetadata;
pub use overrides::{
    OverrideHandle, OverrideHost, OverrideInfo, OverrideKind, RenderLayer, DEFAULT_LAYER_NAME,
};
pub use value::{Scalar, ScalarKind};
