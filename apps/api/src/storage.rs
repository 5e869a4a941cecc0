//! Raw upload archival behind a narrow file-store capability.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

#[async_trait]
pub trait FileStore: Send + Sync {
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), AppError>;
}

/// S3-backed store (MinIO locally, AWS in production).
pub struct S3FileStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3FileStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl FileStore for S3FileStore {
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), AppError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(aws_sdk_s3::primitives::ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        debug!("stored {key} in bucket {}", self.bucket);
        Ok(())
    }
}
