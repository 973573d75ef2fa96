use std::path::Path;

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::extraction::DocumentKind;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read upload for storage: {0}")]
    Read(String),

    #[error("S3 upload failed: {0}")]
    Upload(String),
}

/// Object storage collaborator: keeps the original upload and returns a public URL.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn store(&self, local_path: &Path, kind: DocumentKind) -> Result<String, StorageError>;
}

/// S3 / MinIO-backed store. Objects land under `resumes/{uuid}.{ext}`.
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3ObjectStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String, public_base_url: String) -> Self {
        Self {
            client,
            bucket,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn store(&self, local_path: &Path, kind: DocumentKind) -> Result<String, StorageError> {
        let key = object_key(Uuid::new_v4(), kind.extension());
        let body = ByteStream::from_path(local_path)
            .await
            .map_err(|e| StorageError::Read(e.to_string()))?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(kind.mime())
            .body(body)
            .send()
            .await
            .map_err(|e| StorageError::Upload(e.to_string()))?;

        info!("Uploaded resume to s3://{}/{}", self.bucket, key);
        Ok(format!("{}/{}", self.public_base_url, key))
    }
}

fn object_key(id: Uuid, extension: &str) -> String {
    format!("resumes/{id}.{extension}")
}
