//! Storage trait for persisted artifacts.
//!
//! Artifacts are plain key-value writes: the key is the artifact file name
//! (derived from the section id), the value is the CSS text. Writes
//! overwrite; two requests producing the same name race and the later write
//! wins.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::StorageResult;

/// Destination for reduced CSS.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Write `css` under `name`, replacing any previous value.
    async fn write(&self, name: &str, css: &str) -> StorageResult<()>;

    /// Read back the value stored under `name`.
    async fn read(&self, name: &str) -> StorageResult<Option<String>>;
}

#[async_trait]
impl<T: ArtifactStore + ?Sized> ArtifactStore for Arc<T> {
    async fn write(&self, name: &str, css: &str) -> StorageResult<()> {
        (**self).write(name, css).await
    }

    async fn read(&self, name: &str) -> StorageResult<Option<String>> {
        (**self).read(name).await
    }
}

/// Check that an artifact name is a single path component.
pub fn validate_artifact_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}
