//! Object storage for project files.
//!
//! Handlers talk to [`ObjectStorage`]; `main` picks [`s3::S3Storage`] when a
//! bucket is configured and [`memory::MemoryStorage`] otherwise.

pub mod memory;
pub mod s3;

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

/// Errors from the object storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to presign upload for '{key}': {message}")]
    Presign { key: String, message: String },

    #[error("Failed to write object '{key}': {message}")]
    Put { key: String, message: String },

    #[error("Failed to delete object '{key}': {message}")]
    Delete { key: String, message: String },
}

/// A time-limited URL the client can `PUT` the file body to.
#[derive(Debug, Clone, Serialize)]
pub struct PresignedUpload {
    pub upload_url: String,
    pub method: &'static str,
    pub storage_key: String,
    pub expires_in: u64,
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Presign a direct upload of `key` with the given content type.
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<PresignedUpload, StorageError>;

    /// Upload `body` through the server.
    async fn put(&self, key: &str, content_type: &str, body: Vec<u8>) -> Result<(), StorageError>;

    /// Remove an object. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}
