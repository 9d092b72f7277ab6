//! Object storage backends for contract attachments.
//!
//! Both backends implement [`AttachmentStore`]; which one the server uses is
//! chosen at startup from [`StorageSettings`].

use std::path::PathBuf;
use std::sync::Arc;

use pactum_core::attachment::AttachmentStore;
use pactum_core::error::CoreError;

pub mod local;
pub mod s3;

pub use local::LocalObjectStore;
pub use s3::S3ObjectStore;

/// Storage backend kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackendType {
    Local,
    S3,
}

impl StorageBackendType {
    /// Parse from the `STORAGE_BACKEND` setting.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "local" => Ok(Self::Local),
            "s3" => Ok(Self::S3),
            other => Err(CoreError::Validation(format!(
                "Unknown storage backend '{other}'. Must be one of: local, s3"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::S3 => "s3",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Local => "Local Filesystem",
            Self::S3 => "Amazon S3 / Compatible",
        }
    }
}

/// Backend selection and its parameters.
#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub backend: StorageBackendType,
    /// Root directory for the local backend.
    pub root: PathBuf,
    pub bucket: Option<String>,
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible services (MinIO, R2, ...).
    pub endpoint: Option<String>,
}

/// Build the configured backend.
pub async fn connect(settings: &StorageSettings) -> Result<Arc<dyn AttachmentStore>, CoreError> {
    match settings.backend {
        StorageBackendType::Local => {
            tracing::info!(root = %settings.root.display(), "Using local object storage");
            Ok(Arc::new(LocalObjectStore::new(&settings.root)))
        }
        StorageBackendType::S3 => {
            let bucket = settings.bucket.clone().ok_or_else(|| {
                CoreError::Validation("S3_BUCKET is required for the s3 backend".into())
            })?;
            tracing::info!(%bucket, endpoint = ?settings.endpoint, "Using S3 object storage");
            let store = S3ObjectStore::connect(
                bucket,
                settings.region.clone(),
                settings.endpoint.clone(),
            )
            .await;
            Ok(Arc::new(store))
        }
    }
}
