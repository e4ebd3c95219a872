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

//! The render-layer override contract.
//!
//! Overrides are owned by the host. This crate only names them through
//! [`OverrideHandle`]s and asks the host to create, delete, or list them.

use crate::error::HostResult;

/// Name of the layer on which overrides are meaningless.
pub const DEFAULT_LAYER_NAME: &str = "defaultRenderLayer";

/// An opaque reference to an override object living in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverrideHandle(pub u64);

/// The flavour of an override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverrideKind {
    /// Replaces the attribute value on one specific node.
    AbsoluteUnique,
    /// Replaces the attribute value on every node matched by a collection.
    Absolute,
    /// Offsets or scales the attribute value.
    Relative,
}

/// What an override targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideInfo {
    /// The handle this description belongs to.
    pub handle: OverrideHandle,
    /// The overridden node.
    pub node: String,
    /// The overridden attribute.
    pub attribute: String,
    /// The kind of override.
    pub kind: OverrideKind,
}

/// A render layer as seen by the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderLayer {
    /// The layer name.
    pub name: String,
}

impl RenderLayer {
    /// Creates a layer description.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The default (master) layer.
    pub fn default_layer() -> Self {
        Self::new(DEFAULT_LAYER_NAME)
    }

    /// Returns `true` for the default layer, where override decoration is hidden.
    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_LAYER_NAME
    }
}

/// Access to the host's render-layer override system.
pub trait OverrideHost: Send + Sync {
    /// Returns the layer currently visible in the session.
    fn visible_layer(&self) -> RenderLayer;

    /// Creates an absolute override for `node.attribute` on the visible layer.
    fn create_absolute_override(&self, node: &str, attribute: &str) -> HostResult<OverrideHandle>;

    /// Deletes an override.
    fn delete_override(&self, handle: OverrideHandle) -> HostResult<()>;

    /// Lists every override of a layer, descending into nested collections.
    fn list_overrides_recursive(&self, layer: &RenderLayer) -> Vec<OverrideHandle>;

    /// Describes an override, or `None` if the handle is stale.
    fn override_info(&self, handle: OverrideHandle) -> Option<OverrideInfo>;
}
