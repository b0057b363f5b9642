//! In-process [`ObjectStorage`] used in development and tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{ObjectStorage, PresignedUpload, StorageError};

#[derive(Debug, Default)]
pub struct MemoryStorage {
    objects: Mutex<HashMap<String, (String, Vec<u8>)>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects
            .lock()
            .map(|objects| objects.contains_key(key))
            .unwrap_or(false)
    }

    /// Stored size in bytes, if the key exists.
    pub fn size_of(&self, key: &str) -> Option<usize> {
        self.objects
            .lock()
            .ok()
            .and_then(|objects| objects.get(key).map(|(_, body)| body.len()))
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn presign_put(
        &self,
        key: &str,
        _content_type: &str,
        expires_in: Duration,
    ) -> Result<PresignedUpload, StorageError> {
        Ok(PresignedUpload {
            upload_url: format!("memory://uploads/{key}"),
            method: "PUT",
            storage_key: key.to_string(),
            expires_in: expires_in.as_secs(),
        })
    }

    async fn put(&self, key: &str, content_type: &str, body: Vec<u8>) -> Result<(), StorageError> {
        let mut objects = self.objects.lock().map_err(|_| StorageError::Put {
            key: key.to_string(),
            message: "storage lock poisoned".into(),
        })?;
        objects.insert(key.to_string(), (content_type.to_string(), body));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut objects = self.objects.lock().map_err(|_| StorageError::Delete {
            key: key.to_string(),
            message: "storage lock poisoned".into(),
        })?;
        objects.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_delete() {
        let storage = MemoryStorage::new();
        storage
            .put("1_a.txt", "text/plain", b"hello".to_vec())
            .await
            .unwrap();
        assert_eq!(storage.size_of("1_a.txt"), Some(5));

        storage.delete("1_a.txt").await.unwrap();
        assert!(!storage.contains("1_a.txt"));
        // Deleting again is fine.
        storage.delete("1_a.txt").await.unwrap();
    }

    #[tokio::test]
    async fn presign_echoes_key_and_expiry() {
        let storage = MemoryStorage::new();
        let upload = storage
            .presign_put("9_plan.pdf", "application/pdf", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(upload.storage_key, "9_plan.pdf");
        assert_eq!(upload.expires_in, 60);
        assert_eq!(upload.method, "PUT");
    }
}
