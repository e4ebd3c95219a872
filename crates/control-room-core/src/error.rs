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

//! Errors reported by host collaborators.

use crate::attribute::AttributePath;
use crate::overrides::OverrideHandle;
use crate::value::ScalarKind;
use thiserror::Error;

/// A convenience alias for results returned by host collaborators.
pub type HostResult<T> = Result<T, HostError>;

/// An error raised by the host application while reading or writing scene state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HostError {
    /// The named scene node does not exist.
    #[error("Node not found: {0}")]
    NodeNotFound(String),
    /// The node exists but has no such attribute.
    #[error("Attribute not found: {0}")]
    AttributeNotFound(AttributePath),
    /// A value of the wrong kind was written to an attribute that cannot convert it.
    #[error("Type mismatch on {path}: expected {expected:?}, found {found:?}")]
    TypeMismatch {
        /// The attribute being written.
        path: AttributePath,
        /// The kind the attribute stores.
        expected: ScalarKind,
        /// The kind that was supplied.
        found: ScalarKind,
    },
    /// The override handle does not refer to a live override.
    #[error("Override not found: {0:?}")]
    OverrideNotFound(OverrideHandle),
    /// Overrides cannot be created on the default render layer.
    #[error("Overrides cannot be created on the default render layer")]
    DefaultLayer,
    /// A failure inside the host implementation itself.
    #[error("Host backend error: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_error_display() {
        let err = HostError::AttributeNotFound(AttributePath::new("persp", "fStop"));
        assert_eq!(err.to_string(), "Attribute not found: persp.fStop");

        let err = HostError::TypeMismatch {
            path: AttributePath::new("persp", "depthOfField"),
            expected: ScalarKind::Bool,
            found: ScalarKind::Float,
        };
        assert_eq!(
            err.to_string(),
            "Type mismatch on persp.depthOfField: expected Bool, found Float"
        );
    }
}
