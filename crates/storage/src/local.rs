//! Filesystem object store.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use pactum_core::attachment::AttachmentStore;
use pactum_core::error::CoreError;

/// Stores objects as files under a root directory, one file per locator.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `locator` under the root, rejecting anything that could escape it.
    fn path_for(&self, locator: &str) -> Result<PathBuf, CoreError> {
        let relative = Path::new(locator);
        let safe = !locator.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(CoreError::Storage(format!("Invalid object locator '{locator}'")));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl AttachmentStore for LocalObjectStore {
    async fn put(
        &self,
        locator: &str,
        bytes: Vec<u8>,
        _content_type: Option<&str>,
    ) -> Result<(), CoreError> {
        let path = self.path_for(locator)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                CoreError::Storage(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| CoreError::Storage(format!("Failed to write {}: {e}", path.display())))
    }

    /// Missing files count as removed.
    async fn remove(&self, locator: &str) -> Result<(), CoreError> {
        let path = self.path_for(locator)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(%locator, "Object already absent");
                Ok(())
            }
            Err(e) => Err(CoreError::Storage(format!(
                "Failed to remove {}: {e}",
                path.display()
            ))),
        }
    }
}
