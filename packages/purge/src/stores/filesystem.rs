//! Filesystem artifact store rooted at a public directory.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{StorageError, StorageResult};
use crate::traits::store::{validate_artifact_name, ArtifactStore};

/// Writes artifacts as files directly under a root directory.
///
/// The root is created on first write if it does not exist. Files are
/// overwritten without locking.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> StorageResult<PathBuf> {
        if !validate_artifact_name(name) {
            return Err(StorageError::UnsafeName(name.to_string()));
        }
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl ArtifactStore for FileStore {
    async fn write(&self, name: &str, css: &str) -> StorageResult<()> {
        let path = self.path_for(name)?;
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(&path, css).await?;
        debug!(path = %path.display(), bytes = css.len(), "Wrote artifact");
        Ok(())
    }

    async fn read(&self, name: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(name)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(css) => Ok(Some(css)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
