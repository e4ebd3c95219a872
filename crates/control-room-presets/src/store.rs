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

//! Persistence backends for the user preset list.

use crate::error::{PresetError, PresetResult};
use control_room_core::{HostError, SceneMetadata};
use std::fmt::Debug;
use std::sync::{Arc, RwLock};

/// Scene metadata key under which user presets are saved.
pub const DEFAULT_STORE_KEY: &str = "presets";

/// Trait defining the interface for preset payload storage.
///
/// A store only moves an opaque payload around; encoding and decoding belong to
/// the [`PresetManager`](crate::PresetManager).
pub trait PresetStore: Send + Sync + Debug {
    /// Reads the saved payload, or `None` if nothing was ever saved.
    fn load(&self) -> PresetResult<Option<String>>;

    /// Replaces the saved payload.
    fn save(&self, payload: &str) -> PresetResult<()>;
}

/// Stores presets inside the scene file, through its metadata.
pub struct FileInfoStore {
    metadata: Arc<dyn SceneMetadata>,
    key: String,
}

impl FileInfoStore {
    /// Creates a store writing under [`DEFAULT_STORE_KEY`].
    pub fn new(metadata: Arc<dyn SceneMetadata>) -> Self {
        Self::with_key(metadata, DEFAULT_STORE_KEY)
    }

    /// Creates a store writing under a custom metadata key.
    pub fn with_key(metadata: Arc<dyn SceneMetadata>, key: impl Into<String>) -> Self {
        Self {
            metadata,
            key: key.into(),
        }
    }

    /// The metadata key in use.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Debug for FileInfoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileInfoStore")
            .field("key", &self.key)
            .finish()
    }
}

impl PresetStore for FileInfoStore {
    fn load(&self) -> PresetResult<Option<String>> {
        Ok(self.metadata.file_info(&self.key))
    }

    fn save(&self, payload: &str) -> PresetResult<()> {
        self.metadata.set_file_info(&self.key, payload)?;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryPayload {
    payload: Option<String>,
    saves: usize,
}

/// A store held in memory. It counts saves so callers can observe them.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    storage: RwLock<MemoryPayload>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `payload`.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            storage: RwLock::new(MemoryPayload {
                payload: Some(payload.into()),
                saves: 0,
            }),
        }
    }

    /// The current payload, if any.
    pub fn payload(&self) -> Option<String> {
        self.storage
            .read()
            .ok()
            .and_then(|storage| storage.payload.clone())
    }

    /// How many times [`PresetStore::save`] succeeded.
    pub fn save_count(&self) -> usize {
        self.storage.read().map(|storage| storage.saves).unwrap_or(0)
    }
}

impl PresetStore for InMemoryStore {
    fn load(&self) -> PresetResult<Option<String>> {
        let storage = self.storage.read().map_err(|_| {
            PresetError::Store(HostError::Backend(
                "Failed to acquire read lock".to_string(),
            ))
        })?;
        Ok(storage.payload.clone())
    }

    fn save(&self, payload: &str) -> PresetResult<()> {
        let mut storage = self.storage.write().map_err(|_| {
            PresetError::Store(HostError::Backend(
                "Failed to acquire write lock".to_string(),
            ))
        })?;
        storage.payload = Some(payload.to_string());
        storage.saves += 1;
        Ok(())
    }
}

/// Lets one store be shared between the manager and an observer.
impl<S: PresetStore + ?Sized> PresetStore for Arc<S> {
    fn load(&self) -> PresetResult<Option<String>> {
        (**self).load()
    }

    fn save(&self, payload: &str) -> PresetResult<()> {
        (**self).save(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use control_room_core::InMemoryScene;

    #[test]
    fn file_info_store_uses_scene_metadata() {
        let scene = Arc::new(InMemoryScene::new());
        let store = FileInfoStore::new(scene.clone());

        assert_eq!(store.load().unwrap(), None);
        store.save("[]").unwrap();

        assert_eq!(scene.file_info(DEFAULT_STORE_KEY).as_deref(), Some("[]"));
        assert_eq!(store.load().unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn custom_key_is_isolated() {
        let scene = Arc::new(InMemoryScene::new());
        let store = FileInfoStore::with_key(scene.clone(), "control_room_presets");
        store.save("[]").unwrap();
        assert!(scene.file_info(DEFAULT_STORE_KEY).is_none());
        assert_eq!(store.key(), "control_room_presets");
    }

    #[test]
    fn memory_store_counts_saves() {
        let store = InMemoryStore::with_payload("[]");
        assert_eq!(store.save_count(), 0);
        store.save("[1]").unwrap();
        store.save("[2]").unwrap();
        assert_eq!(store.save_count(), 2);
        assert_eq!(store.payload().as_deref(), Some("[2]"));
    }
}
