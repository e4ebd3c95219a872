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

//! An in-memory host scene.
//!
//! [`InMemoryScene`] implements every host contract of this crate: typed node
//! attributes, render layers with nested override collections, scene metadata
//! and watched-attribute notifications. It backs the test suites and the demo
//! binary, and is a reference for what a real host binding must do.

use crate::attribute::{AttributeHost, AttributePath, WatchId};
use crate::error::{HostError, HostResult};
use crate::event::HostEvent;
use crate::metadata::SceneMetadata;
use crate::overrides::{
    OverrideHandle, OverrideHost, OverrideInfo, OverrideKind, RenderLayer, DEFAULT_LAYER_NAME,
};
use crate::value::{Scalar, ScalarKind};
use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone)]
struct Node {
    node_type: String,
    attributes: BTreeMap<String, Scalar>,
}

#[derive(Debug, Clone, Default)]
struct Collection {
    name: String,
    overrides: Vec<OverrideHandle>,
    children: Vec<Collection>,
}

impl Collection {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn collect(&self, out: &mut Vec<OverrideHandle>) {
        out.extend(self.overrides.iter().copied());
        for child in &self.children {
            child.collect(out);
        }
    }

    fn remove(&mut self, handle: OverrideHandle) -> bool {
        if let Some(pos) = self.overrides.iter().position(|h| *h == handle) {
            self.overrides.remove(pos);
            return true;
        }
        self.children.iter_mut().any(|child| child.remove(handle))
    }

    fn descend_or_create(&mut self, path: &[&str]) -> &mut Collection {
        match path.split_first() {
            None => self,
            Some((head, rest)) => {
                let index = match self.children.iter().position(|c| c.name == *head) {
                    Some(index) => index,
                    None => {
                        self.children.push(Collection::named(head));
                        self.children.len() - 1
                    }
                };
                self.children[index].descend_or_create(rest)
            }
        }
    }
}

#[derive(Debug, Clone)]
struct OverrideRecord {
    layer: String,
    node: String,
    attribute: String,
    kind: OverrideKind,
    value: Scalar,
}

#[derive(Debug)]
struct SceneState {
    nodes: BTreeMap<String, Node>,
    layers: BTreeMap<String, Collection>,
    visible_layer: String,
    overrides: BTreeMap<OverrideHandle, OverrideRecord>,
    next_override: u64,
    watches: HashMap<WatchId, AttributePath>,
    next_watch: u64,
    file_info: BTreeMap<String, String>,
}

impl SceneState {
    fn new() -> Self {
        let mut layers = BTreeMap::new();
        layers.insert(
            DEFAULT_LAYER_NAME.to_string(),
            Collection::named(DEFAULT_LAYER_NAME),
        );
        Self {
            nodes: BTreeMap::new(),
            layers,
            visible_layer: DEFAULT_LAYER_NAME.to_string(),
            overrides: BTreeMap::new(),
            next_override: 1,
            watches: HashMap::new(),
            next_watch: 1,
            file_info: BTreeMap::new(),
        }
    }

    /// Finds an override of the visible layer that substitutes `path`.
    fn visible_override(&self, path: &AttributePath) -> Option<OverrideHandle> {
        self.overrides
            .iter()
            .find(|(_, o)| {
                o.layer == self.visible_layer && o.node == path.node && o.attribute == path.attribute
            })
            .map(|(handle, _)| *handle)
    }

    fn base_value(&self, path: &AttributePath) -> HostResult<Scalar> {
        let node = self
            .nodes
            .get(&path.node)
            .ok_or_else(|| HostError::NodeNotFound(path.node.clone()))?;
        node.attributes
            .get(&path.attribute)
            .copied()
            .ok_or_else(|| HostError::AttributeNotFound(path.clone()))
    }

    fn is_watched(&self, path: &AttributePath) -> bool {
        self.watches.values().any(|watched| watched == path)
    }
}

/// A complete host scene held in memory.
#[derive(Debug)]
pub struct InMemoryScene {
    state: RwLock<SceneState>,
    events: RwLock<Option<flume::Sender<HostEvent>>>,
}

impl Default for InMemoryScene {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryScene {
    /// Creates an empty scene with only the default render layer.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(SceneState::new()),
            events: RwLock::new(None),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SceneState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SceneState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, event: HostEvent) {
        let events = self.events.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(sender) = events.as_ref() {
            if let Err(e) = sender.send(event) {
                log::error!("Failed to send host event: {e}. Receiver likely disconnected.");
            }
        }
    }

    /// Routes future notifications to `sender`, replacing any previous sink.
    pub fn connect_events(&self, sender: flume::Sender<HostEvent>) {
        *self.events.write().unwrap_or_else(PoisonError::into_inner) = Some(sender);
    }

    /// Adds (or retypes) a node. Existing attributes are kept.
    pub fn add_node(&self, name: &str, node_type: &str) {
        let mut state = self.write();
        state
            .nodes
            .entry(name.to_string())
            .and_modify(|node| node.node_type = node_type.to_string())
            .or_insert_with(|| Node {
                node_type: node_type.to_string(),
                attributes: BTreeMap::new(),
            });
    }

    /// Removes a node and every override targeting it.
    pub fn remove_node(&self, name: &str) {
        let mut state = self.write();
        state.nodes.remove(name);
        let stale: Vec<OverrideHandle> = state
            .overrides
            .iter()
            .filter(|(_, o)| o.node == name)
            .map(|(handle, _)| *handle)
            .collect();
        for handle in stale {
            state.overrides.remove(&handle);
            for root in state.layers.values_mut() {
                root.remove(handle);
            }
        }
    }

    /// Declares an attribute with its initial value, without notifying watchers.
    ///
    /// The node is created with an empty type if it does not exist yet.
    pub fn define(&self, node: &str, attribute: &str, value: impl Into<Scalar>) {
        let mut state = self.write();
        state
            .nodes
            .entry(node.to_string())
            .or_insert_with(|| Node {
                node_type: String::new(),
                attributes: BTreeMap::new(),
            })
            .attributes
            .insert(attribute.to_string(), value.into());
    }

    /// Adds an empty render layer.
    pub fn add_layer(&self, name: &str) {
        self.write()
            .layers
            .entry(name.to_string())
            .or_insert_with(|| Collection::named(name));
    }

    /// Makes another layer visible and notifies the dialog.
    pub fn set_visible_layer(&self, name: &str) -> HostResult<()> {
        {
            let mut state = self.write();
            if !state.layers.contains_key(name) {
                return Err(HostError::Backend(format!("Unknown render layer '{name}'")));
            }
            state.visible_layer = name.to_string();
        }
        self.publish(HostEvent::VisibleLayerChanged {
            layer: name.to_string(),
        });
        Ok(())
    }

    /// Adds an override inside a (possibly nested) collection of `layer`.
    ///
    /// Missing collections along `collection_path` are created. The override
    /// starts with the attribute's current base value.
    pub fn add_override_in(
        &self,
        layer: &str,
        collection_path: &[&str],
        path: &AttributePath,
        kind: OverrideKind,
    ) -> HostResult<OverrideHandle> {
        let mut state = self.write();
        let value = state.base_value(path)?;
        if !state.layers.contains_key(layer) {
            return Err(HostError::Backend(format!("Unknown render layer '{layer}'")));
        }
        let handle = OverrideHandle(state.next_override);
        state.next_override += 1;
        state.overrides.insert(
            handle,
            OverrideRecord {
                layer: layer.to_string(),
                node: path.node.clone(),
                attribute: path.attribute.clone(),
                kind,
                value,
            },
        );
        if let Some(root) = state.layers.get_mut(layer) {
            root.descend_or_create(collection_path).overrides.push(handle);
        }
        Ok(handle)
    }

    /// Simulates opening a scene file: metadata is replaced and the dialog notified.
    pub fn open_scene(&self, file_info: BTreeMap<String, String>) {
        self.write().file_info = file_info;
        self.publish(HostEvent::SceneOpened);
    }

    /// Simulates a selection change.
    pub fn notify_selection_changed(&self) {
        self.publish(HostEvent::SelectionChanged);
    }

    /// Number of live attribute subscriptions.
    pub fn watch_count(&self) -> usize {
        self.read().watches.len()
    }

    /// Reads the base value of an attribute, ignoring any override.
    pub fn base_value(&self, path: &AttributePath) -> HostResult<Scalar> {
        self.read().base_value(path)
    }
}

impl AttributeHost for InMemoryScene {
    fn get(&self, path: &AttributePath) -> HostResult<Scalar> {
        let state = self.read();
        let base = state.base_value(path)?;
        match state.visible_override(path) {
            Some(handle) => Ok(state.overrides.get(&handle).map_or(base, |o| o.value)),
            None => Ok(base),
        }
    }

    fn set(&self, path: &AttributePath, value: Scalar) -> HostResult<()> {
        let notify = {
            let mut state = self.write();
            let current = state.base_value(path)?;
            let value = match (current.kind(), value.kind()) {
                (ScalarKind::Bool, ScalarKind::Float) => {
                    return Err(HostError::TypeMismatch {
                        path: path.clone(),
                        expected: ScalarKind::Bool,
                        found: ScalarKind::Float,
                    })
                }
                (kind, _) => value.coerce_to(kind),
            };

            match state.visible_override(path) {
                Some(handle) => {
                    if let Some(record) = state.overrides.get_mut(&handle) {
                        record.value = value;
                    }
                }
                None => {
                    if let Some(node) = state.nodes.get_mut(&path.node) {
                        node.attributes.insert(path.attribute.clone(), value);
                    }
                }
            }
            state.is_watched(path)
        };

        if notify {
            self.publish(HostEvent::AttributeChanged(path.clone()));
        }
        Ok(())
    }

    fn exists(&self, node: &str) -> bool {
        self.read().nodes.contains_key(node)
    }

    fn nodes_of_type(&self, node_type: &str) -> Vec<String> {
        self.read()
            .nodes
            .iter()
            .filter(|(_, node)| node.node_type == node_type)
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn watch(&self, path: &AttributePath) -> WatchId {
        let mut state = self.write();
        let id = WatchId(state.next_watch);
        state.next_watch += 1;
        state.watches.insert(id, path.clone());
        id
    }

    fn unwatch(&self, id: WatchId) {
        self.write().watches.remove(&id);
    }
}

impl OverrideHost for InMemoryScene {
    fn visible_layer(&self) -> RenderLayer {
        RenderLayer::new(self.read().visible_layer.clone())
    }

    fn create_absolute_override(&self, node: &str, attribute: &str) -> HostResult<OverrideHandle> {
        let layer = self.read().visible_layer.clone();
        if layer == DEFAULT_LAYER_NAME {
            return Err(HostError::DefaultLayer);
        }
        let path = AttributePath::new(node, attribute);
        let handle = self.add_override_in(&layer, &[], &path, OverrideKind::AbsoluteUnique)?;
        log::debug!("Created override {handle:?} for {path} on layer '{layer}'");
        Ok(handle)
    }

    fn delete_override(&self, handle: OverrideHandle) -> HostResult<()> {
        let mut state = self.write();
        let record = state
            .overrides
            .remove(&handle)
            .ok_or(HostError::OverrideNotFound(handle))?;
        if let Some(root) = state.layers.get_mut(&record.layer) {
            root.remove(handle);
        }
        Ok(())
    }

    fn list_overrides_recursive(&self, layer: &RenderLayer) -> Vec<OverrideHandle> {
        let state = self.read();
        let mut handles = Vec::new();
        if let Some(root) = state.layers.get(&layer.name) {
            root.collect(&mut handles);
        }
        handles
    }

    fn override_info(&self, handle: OverrideHandle) -> Option<OverrideInfo> {
        self.read().overrides.get(&handle).map(|o| OverrideInfo {
            handle,
            node: o.node.clone(),
            attribute: o.attribute.clone(),
            kind: o.kind,
        })
    }
}

impl SceneMetadata for InMemoryScene {
    fn file_info(&self, key: &str) -> Option<String> {
        self.read().file_info.get(key).cloned()
    }

    fn set_file_info(&self, key: &str, value: &str) -> HostResult<()> {
        self.write()
            .file_info
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventBus;

    fn scene_with_options() -> InMemoryScene {
        let scene = InMemoryScene::new();
        scene.add_node("defaultArnoldRenderOptions", "aiOptions");
        scene.define("defaultArnoldRenderOptions", "AASamples", 3);
        scene.define("defaultArnoldRenderOptions", "enableProgressiveRender", false);
        scene
    }

    #[test]
    fn set_coerces_to_attribute_kind() {
        let scene = scene_with_options();
        let path = AttributePath::new("defaultArnoldRenderOptions", "AASamples");
        scene.set(&path, Scalar::Float(5.0)).unwrap();
        assert_eq!(scene.get(&path).unwrap(), Scalar::Int(5));
    }

    #[test]
    fn set_rejects_float_on_bool() {
        let scene = scene_with_options();
        let path = AttributePath::new("defaultArnoldRenderOptions", "enableProgressiveRender");
        let err = scene.set(&path, Scalar::Float(0.5)).unwrap_err();
        assert!(matches!(err, HostError::TypeMismatch { .. }));
    }

    #[test]
    fn missing_node_and_attribute_are_distinct_errors() {
        let scene = scene_with_options();
        assert_eq!(
            scene.get(&AttributePath::new("ghost", "x")),
            Err(HostError::NodeNotFound("ghost".to_string()))
        );
        assert!(matches!(
            scene.get(&AttributePath::new("defaultArnoldRenderOptions", "nope")),
            Err(HostError::AttributeNotFound(_))
        ));
    }

    #[test]
    fn watched_attributes_publish_changes() {
        let scene = scene_with_options();
        let bus = EventBus::<HostEvent>::new();
        scene.connect_events(bus.sender());
        let path = AttributePath::new("defaultArnoldRenderOptions", "AASamples");
        let other = AttributePath::new("defaultArnoldRenderOptions", "enableProgressiveRender");

        let id = scene.watch(&path);
        scene.set(&path, Scalar::Int(4)).unwrap();
        scene.set(&other, Scalar::Bool(true)).unwrap();
        assert_eq!(bus.drain(), vec![HostEvent::AttributeChanged(path.clone())]);

        scene.unwatch(id);
        scene.set(&path, Scalar::Int(5)).unwrap();
        assert!(bus.drain().is_empty());
        assert_eq!(scene.watch_count(), 0);
    }

    #[test]
    fn overrides_refused_on_default_layer() {
        let scene = scene_with_options();
        assert_eq!(
            scene.create_absolute_override("defaultArnoldRenderOptions", "AASamples"),
            Err(HostError::DefaultLayer)
        );
    }

    #[test]
    fn override_substitutes_value_on_its_layer_only() {
        let scene = scene_with_options();
        let path = AttributePath::new("defaultArnoldRenderOptions", "AASamples");
        scene.add_layer("beauty");
        scene.set_visible_layer("beauty").unwrap();

        let handle = scene
            .create_absolute_override("defaultArnoldRenderOptions", "AASamples")
            .unwrap();
        scene.set(&path, Scalar::Int(8)).unwrap();
        assert_eq!(scene.get(&path).unwrap(), Scalar::Int(8));
        assert_eq!(scene.base_value(&path).unwrap(), Scalar::Int(3));

        scene.set_visible_layer(DEFAULT_LAYER_NAME).unwrap();
        assert_eq!(scene.get(&path).unwrap(), Scalar::Int(3));

        scene.delete_override(handle).unwrap();
        assert!(scene.override_info(handle).is_none());
        assert_eq!(
            scene.delete_override(handle),
            Err(HostError::OverrideNotFound(handle))
        );
    }

    #[test]
    fn list_overrides_descends_into_nested_collections() {
        let scene = scene_with_options();
        scene.add_layer("beauty");
        let path = AttributePath::new("defaultArnoldRenderOptions", "AASamples");
        let nested = scene
            .add_override_in("beauty", &["render", "quality"], &path, OverrideKind::AbsoluteUnique)
            .unwrap();
        let top = scene
            .add_override_in("beauty", &[], &path, OverrideKind::Relative)
            .unwrap();

        let mut handles = scene.list_overrides_recursive(&RenderLayer::new("beauty"));
        handles.sort();
        assert_eq!(handles, vec![nested, top]);
        assert!(scene
            .list_overrides_recursive(&RenderLayer::default_layer())
            .is_empty());
    }

    #[test]
    fn remove_node_drops_its_overrides() {
        let scene = scene_with_options();
        scene.add_layer("beauty");
        let path = AttributePath::new("defaultArnoldRenderOptions", "AASamples");
        let handle = scene
            .add_override_in("beauty", &["col"], &path, OverrideKind::AbsoluteUnique)
            .unwrap();
        scene.remove_node("defaultArnoldRenderOptions");
        assert!(scene.override_info(handle).is_none());
        assert!(scene
            .list_overrides_recursive(&RenderLayer::new("beauty"))
            .is_empty());
    }

    #[test]
    fn nodes_of_type_is_sorted() {
        let scene = InMemoryScene::new();
        scene.add_node("zCam", "camera");
        scene.add_node("aCam", "camera");
        scene.add_node("light", "pointLight");
        assert_eq!(scene.nodes_of_type("camera"), vec!["aCam", "zCam"]);
    }

    #[test]
    fn open_scene_replaces_metadata_and_notifies() {
        let scene = InMemoryScene::new();
        let bus = EventBus::<HostEvent>::new();
        scene.connect_events(bus.sender());
        scene.set_file_info("presets", "[]").unwrap();

        scene.open_scene(BTreeMap::new());
        assert!(scene.file_info("presets").is_none());
        assert_eq!(bus.drain(), vec![HostEvent::SceneOpened]);
    }
}
