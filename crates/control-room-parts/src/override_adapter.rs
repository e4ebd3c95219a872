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

//! Tracks the render-layer override of one attribute.

use control_room_core::{
    AttributePath, HostContext, HostError, HostResult, OverrideHandle, OverrideKind,
};

/// Remembers whether `node.attribute` has an absolute override on the visible layer.
///
/// The host owns the override; the adapter only caches its handle. Call
/// [`retrieve`](Self::retrieve) again whenever the visible layer changes or the
/// override may have been edited elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideAdapter {
    path: AttributePath,
    handle: Option<OverrideHandle>,
}

impl OverrideAdapter {
    /// Creates an adapter with no known override.
    pub fn new(node: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            path: AttributePath::new(node, attribute),
            handle: None,
        }
    }

    /// The tracked attribute.
    pub fn path(&self) -> &AttributePath {
        &self.path
    }

    /// The cached override handle.
    pub fn handle(&self) -> Option<OverrideHandle> {
        self.handle
    }

    /// Creates an absolute override on the visible layer.
    ///
    /// Refused on the default layer. If an override is already known, its
    /// handle is returned and nothing is created.
    pub fn create(&mut self, ctx: &HostContext) -> HostResult<OverrideHandle> {
        if ctx.visible_layer().is_default() {
            return Err(HostError::DefaultLayer);
        }
        if let Some(handle) = self.handle {
            return Ok(handle);
        }
        let handle = ctx
            .overrides
            .create_absolute_override(&self.path.node, &self.path.attribute)?;
        log::debug!("Override {handle:?} created for {}", self.path);
        self.handle = Some(handle);
        Ok(handle)
    }

    /// Deletes the known override, if any.
    ///
    /// A handle the host no longer knows is simply forgotten.
    pub fn remove(&mut self, ctx: &HostContext) -> HostResult<()> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        match ctx.overrides.delete_override(handle) {
            Ok(()) | Err(HostError::OverrideNotFound(_)) => Ok(()),
            Err(e) => {
                self.handle = Some(handle);
                Err(e)
            }
        }
    }

    /// Looks for an absolute-unique override of the attribute on the visible
    /// layer, descending into nested collections, and caches what it finds.
    pub fn retrieve(&mut self, ctx: &HostContext) -> Option<OverrideHandle> {
        let layer = ctx.visible_layer();
        self.handle = ctx
            .overrides
            .list_overrides_recursive(&layer)
            .into_iter()
            .find(|handle| {
                ctx.overrides.override_info(*handle).is_some_and(|info| {
                    info.kind == OverrideKind::AbsoluteUnique
                        && info.node == self.path.node
                        && info.attribute == self.path.attribute
                })
            });
        self.handle
    }

    /// Whether override decoration should show: an override is known and the
    /// visible layer is not the default one.
    pub fn is_displayed(&self, ctx: &HostContext) -> bool {
        self.handle.is_some() && !ctx.visible_layer().is_default()
    }

    /// Whether "Add Override" makes sense right now.
    pub fn can_create(&self, ctx: &HostContext) -> bool {
        self.handle.is_none() && !ctx.visible_layer().is_default()
    }

    /// Whether "Remove Override" makes sense right now.
    pub fn can_remove(&self, ctx: &HostContext) -> bool {
        self.handle.is_some() && !ctx.visible_layer().is_default()
    }

    /// Points the adapter at another node, forgetting the cached handle.
    pub fn retarget(&mut self, node: impl Into<String>) {
        self.path.node = node.into();
        self.handle = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use control_room_core::{InMemoryScene, OverrideHost};
    use std::sync::Arc;

    fn context() -> (Arc<InMemoryScene>, HostContext) {
        let scene = Arc::new(InMemoryScene::new());
        scene.add_node("defaultArnoldRenderOptions", "aiOptions");
        scene.define("defaultArnoldRenderOptions", "AASamples", 3);
        scene.add_layer("beauty");
        let ctx = HostContext::new(scene.clone(), scene.clone());
        (scene, ctx)
    }

    #[test]
    fn create_is_refused_on_default_layer() {
        let (_, ctx) = context();
        let mut adapter = OverrideAdapter::new("defaultArnoldRenderOptions", "AASamples");
        assert_eq!(adapter.create(&ctx), Err(HostError::DefaultLayer));
        assert!(!adapter.can_create(&ctx));
    }

    #[test]
    fn create_remove_cycle() {
        let (scene, ctx) = context();
        scene.set_visible_layer("beauty").unwrap();
        let mut adapter = OverrideAdapter::new("defaultArnoldRenderOptions", "AASamples");

        let handle = adapter.create(&ctx).unwrap();
        assert_eq!(adapter.create(&ctx).unwrap(), handle);
        assert!(adapter.is_displayed(&ctx));
        assert!(adapter.can_remove(&ctx));

        adapter.remove(&ctx).unwrap();
        assert!(adapter.handle().is_none());
        assert!(scene.override_info(handle).is_none());
        adapter.remove(&ctx).unwrap();
    }

    #[test]
    fn retrieve_ignores_other_kinds_and_attributes() {
        let (scene, ctx) = context();
        scene.define("defaultArnoldRenderOptions", "GIDiffuseSamples", 2);
        let aa = AttributePath::new("defaultArnoldRenderOptions", "AASamples");
        let diffuse = AttributePath::new("defaultArnoldRenderOptions", "GIDiffuseSamples");
        scene
            .add_override_in("beauty", &["a"], &aa, OverrideKind::Relative)
            .unwrap();
        scene
            .add_override_in("beauty", &["b"], &diffuse, OverrideKind::AbsoluteUnique)
            .unwrap();
        let wanted = scene
            .add_override_in("beauty", &["c", "d"], &aa, OverrideKind::AbsoluteUnique)
            .unwrap();

        let mut adapter = OverrideAdapter::new("defaultArnoldRenderOptions", "AASamples");
        assert_eq!(adapter.retrieve(&ctx), None);

        scene.set_visible_layer("beauty").unwrap();
        assert_eq!(adapter.retrieve(&ctx), Some(wanted));
    }

    #[test]
    fn display_hidden_on_default_layer() {
        let (scene, ctx) = context();
        scene.set_visible_layer("beauty").unwrap();
        let mut adapter = OverrideAdapter::new("defaultArnoldRenderOptions", "AASamples");
        adapter.create(&ctx).unwrap();

        scene.set_visible_layer("defaultRenderLayer").unwrap();
        assert!(!adapter.is_displayed(&ctx));
    }

    #[test]
    fn retarget_forgets_handle() {
        let (scene, ctx) = context();
        scene.set_visible_layer("beauty").unwrap();
        let mut adapter = OverrideAdapter::new("defaultArnoldRenderOptions", "AASamples");
        adapter.create(&ctx).unwrap();
        adapter.retarget("otherOptions");
        assert_eq!(adapter.path().node, "otherOptions");
        assert!(adapter.handle().is_none());
    }
}
