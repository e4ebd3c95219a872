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

//! The live attribute contract of the host scene graph.

use crate::error::HostResult;
use crate::value::Scalar;
use std::fmt;

/// Identifies one attribute on one scene node, written `node.attribute`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttributePath {
    /// The name of the node owning the attribute.
    pub node: String,
    /// The attribute name on that node.
    pub attribute: String,
}

impl AttributePath {
    /// Creates a new path from a node and an attribute name.
    pub fn new(node: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            attribute: attribute.into(),
        }
    }

    /// Parses a `node.attribute` string. The split happens on the first dot.
    pub fn parse(path: &str) -> Option<Self> {
        let (node, attribute) = path.split_once('.')?;
        if node.is_empty() || attribute.is_empty() {
            return None;
        }
        Some(Self::new(node, attribute))
    }

    /// Returns the same attribute on another node.
    pub fn with_node(&self, node: impl Into<String>) -> Self {
        Self::new(node, self.attribute.clone())
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.node, self.attribute)
    }
}

/// An opaque subscription handle returned by [`AttributeHost::watch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchId(pub u64);

/// Read/write access to live scene attributes.
///
/// Change notifications are not delivered through callbacks: once a path is
/// watched, the host publishes [`HostEvent::AttributeChanged`](crate::HostEvent)
/// on the event bus it was given, until the watch is dropped with
/// [`unwatch`](AttributeHost::unwatch).
pub trait AttributeHost: Send + Sync {
    /// Reads the current value of an attribute.
    fn get(&self, path: &AttributePath) -> HostResult<Scalar>;

    /// Writes an attribute. The host converts between numeric kinds as needed.
    fn set(&self, path: &AttributePath, value: Scalar) -> HostResult<()>;

    /// Returns `true` if a node with this name exists.
    fn exists(&self, node: &str) -> bool;

    /// Lists the nodes of the given type, sorted by name.
    fn nodes_of_type(&self, node_type: &str) -> Vec<String>;

    /// Subscribes to change notifications for one attribute.
    fn watch(&self, path: &AttributePath) -> WatchId;

    /// Drops a subscription. Unknown ids are ignored.
    fn unwatch(&self, id: WatchId);
}
