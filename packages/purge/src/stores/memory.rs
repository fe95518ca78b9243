//! In-memory artifact store for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{StorageError, StorageResult};
use crate::traits::store::{validate_artifact_name, ArtifactStore};

/// In-memory storage for artifacts.
///
/// Useful for testing. Applies the same name rules as `FileStore` so a test
/// run rejects exactly what production would.
#[derive(Default)]
pub struct MemoryStore {
    artifacts: RwLock<HashMap<String, String>>,
    writes: RwLock<Vec<String>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored artifacts.
    pub fn artifact_count(&self) -> usize {
        self.artifacts.read().unwrap().len()
    }

    /// Stored artifact names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.artifacts.read().unwrap().keys().cloned().collect();
        names.sort();
        names
    }

    /// Synchronous lookup, for assertions.
    pub fn get(&self, name: &str) -> Option<String> {
        self.artifacts.read().unwrap().get(name).cloned()
    }

    /// Names written so far, in write order (repeats included).
    pub fn write_log(&self) -> Vec<String> {
        self.writes.read().unwrap().clone()
    }

    /// Clear all stored data.
    pub fn clear(&self) {
        self.artifacts.write().unwrap().clear();
        self.writes.write().unwrap().clear();
    }
}

#[async_trait]
impl ArtifactStore for MemoryStore {
    async fn write(&self, name: &str, css: &str) -> StorageResult<()> {
        if !validate_artifact_name(name) {
            return Err(StorageError::UnsafeName(name.to_string()));
        }
        self.artifacts
            .write()
            .unwrap()
            .insert(name.to_string(), css.to_string());
        self.writes.write().unwrap().push(name.to_string());
        Ok(())
    }

    async fn read(&self, name: &str) -> StorageResult<Option<String>> {
        Ok(self.get(name))
    }
}
