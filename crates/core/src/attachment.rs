//! File attachments: locator construction, the object store seam, and the
//! manager that uploads, resolves and removes stored files.
//!
//! A *locator* is the owner-scoped object key (`{owner}/{millis}_{rand}_{name}`);
//! the public URL is derived from it and never stored.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Fallback stored name when a client sends an unusable file name.
const FALLBACK_FILE_NAME: &str = "file";

/// Maximum length of the sanitized file-name segment of a locator.
const MAX_FILE_NAME_LEN: usize = 120;

/// Reference to a stored file: the object locator plus the original name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub locator: String,
    pub file_name: String,
}

/// A file payload received from a client.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Object storage backend.
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Store `bytes` under `locator`, replacing nothing: locators are unique.
    async fn put(
        &self,
        locator: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<(), CoreError>;

    /// Remove the object at `locator`.
    async fn remove(&self, locator: &str) -> Result<(), CoreError>;
}

/// Uploads attachments under per-owner locators and resolves their URLs.
#[derive(Clone)]
pub struct AttachmentManager {
    store: Arc<dyn AttachmentStore>,
    public_base: String,
}

impl AttachmentManager {
    /// `public_base` is the URL prefix objects are publicly served under.
    pub fn new(store: Arc<dyn AttachmentStore>, public_base: impl Into<String>) -> Self {
        let public_base = public_base.into().trim_end_matches('/').to_string();
        Self { store, public_base }
    }

    /// Store `upload` under a fresh locator scoped to `owner`.
    pub async fn upload(&self, owner: DbId, upload: Upload) -> Result<FileRef, CoreError> {
        let locator = build_locator(owner, &upload.file_name);
        tracing::debug!(owner, %locator, size = upload.bytes.len(), "Uploading attachment");

        self.store
            .put(&locator, upload.bytes, upload.content_type.as_deref())
            .await?;

        Ok(FileRef {
            locator,
            file_name: upload.file_name,
        })
    }

    /// Public URL for a stored object.
    pub fn public_reference(&self, locator: &str) -> String {
        format!("{}/{}", self.public_base, locator)
    }

    /// Remove a stored object by locator.
    pub async fn remove(&self, locator: &str) -> Result<(), CoreError> {
        tracing::debug!(%locator, "Removing attachment");
        self.store.remove(locator).await
    }
}

/// Build a storage locator: owner, millisecond timestamp, random suffix and
/// the sanitized original name.
pub fn build_locator(owner: DbId, file_name: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: u32 = rand::random();
    format!(
        "{owner}/{millis}_{suffix:08x}_{}",
        sanitize_file_name(file_name)
    )
}

/// Reduce a client-supplied file name to a safe single path segment.
///
/// Directory components are dropped and anything outside `[A-Za-z0-9._-]`
/// becomes `_`. Leading dots are stripped so the result is never hidden or
/// a relative path.
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or("");

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        return FALLBACK_FILE_NAME.to_string();
    }

    // Keep the tail so the extension survives truncation.
    let len = trimmed.len();
    if len > MAX_FILE_NAME_LEN {
        trimmed[len - MAX_FILE_NAME_LEN..].to_string()
    } else {
        trimmed.to_string()
    }
}
