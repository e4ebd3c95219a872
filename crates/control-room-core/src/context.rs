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

//! Host context handed to every settings part.

use crate::attribute::{AttributeHost, AttributePath};
use crate::error::HostResult;
use crate::overrides::{OverrideHost, RenderLayer};
use crate::value::Scalar;
use std::sync::Arc;

/// Bundles the host collaborators a settings part needs.
///
/// Parts never own the host; they receive this context on every call, so the
/// same part can be driven by the real application or by an in-memory scene.
#[derive(Clone)]
pub struct HostContext {
    /// Live attribute access.
    pub attributes: Arc<dyn AttributeHost>,
    /// Render-layer override access.
    pub overrides: Arc<dyn OverrideHost>,
}

impl HostContext {
    /// Creates a context from its collaborators.
    pub fn new(attributes: Arc<dyn AttributeHost>, overrides: Arc<dyn OverrideHost>) -> Self {
        Self {
            attributes,
            overrides,
        }
    }

    /// Shorthand for [`AttributeHost::get`].
    pub fn get(&self, path: &AttributePath) -> HostResult<Scalar> {
        self.attributes.get(path)
    }

    /// Shorthand for [`AttributeHost::set`].
    pub fn set(&self, path: &AttributePath, value: impl Into<Scalar>) -> HostResult<()> {
        self.attributes.set(path, value.into())
    }

    /// Shorthand for [`OverrideHost::visible_layer`].
    pub fn visible_layer(&self) -> RenderLayer {
        self.overrides.visible_layer()
    }
}

impl std::fmt::Debug for HostContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostContext")
            .field("visible_layer", &self.overrides.visible_layer().name)
            .finish()
    }
}
