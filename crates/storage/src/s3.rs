//! S3-compatible object store.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use pactum_core::attachment::AttachmentStore;
use pactum_core::error::CoreError;

/// Stores objects in one bucket, keyed by locator.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Build a client from the environment's credentials chain.
    ///
    /// A custom `endpoint` switches to path-style addressing, which most
    /// S3-compatible services require.
    pub async fn connect(bucket: String, region: Option<String>, endpoint: Option<String>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        let shared = loader.load().await;

        let mut config = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint) = endpoint {
            config = config.endpoint_url(endpoint).force_path_style(true);
        }
        Self::new(Client::from_conf(config.build()), bucket)
    }
}

#[async_trait]
impl AttachmentStore for S3ObjectStore {
    async fn put(
        &self,
        locator: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<(), CoreError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(locator)
            .body(ByteStream::from(bytes))
            .set_content_type(content_type.map(str::to_string))
            .send()
            .await
            .map_err(|e| {
                CoreError::Storage(format!(
                    "Failed to upload '{locator}': {}",
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(())
    }

    async fn remove(&self, locator: &str) -> Result<(), CoreError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(locator)
            .send()
            .await
            .map_err(|e| {
                CoreError::Storage(format!(
                    "Failed to remove '{locator}': {}",
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(())
    }
}
