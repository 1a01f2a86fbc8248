//! Blob store contract
//!
//! Uploaded originals and generated reports are opaque blobs addressed by
//! a `user_id/object_name` key. Clients never read blobs through the
//! service; they get presigned URLs instead.

use crate::error::{ServiceError, ServiceResult};
use std::collections::HashMap;
use std::sync::Mutex;

/// Object storage for originals and reports.
pub trait BlobStore {
    /// Store a blob under the given key with its content type.
    fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> ServiceResult<()>;

    /// Short-lived download URL for a stored blob.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Blob`] if no blob exists under the key.
    fn presign(&self, key: &str) -> ServiceResult<String>;
}

/// In-memory blob store; presigned URLs use a `memory://` scheme.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    inner: Mutex<HashMap<String, (Vec<u8>, String)>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored bytes for a key, for test assertions.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.inner
            .lock()
            .ok()
            .and_then(|m| m.get(key).map(|(bytes, _)| bytes.clone()))
    }
}

impl BlobStore for MemoryBlobStore {
    fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> ServiceResult<()> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| ServiceError::Blob("store lock poisoned".into()))?;
        inner.insert(key.to_string(), (bytes.to_vec(), content_type.to_string()));
        Ok(())
    }

    fn presign(&self, key: &str) -> ServiceResult<String> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| ServiceError::Blob("store lock poisoned".into()))?;
        if inner.contains_key(key) {
            Ok(format!("memory://{key}"))
        } else {
            Err(ServiceError::Blob(format!("no blob under key '{key}'")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_then_presign() {
        let store = MemoryBlobStore::new();
        store.put("1/abc.png", b"bytes", "image/png").unwrap();
        assert_eq!(store.presign("1/abc.png").unwrap(), "memory://1/abc.png");
        assert_eq!(store.get("1/abc.png").unwrap(), b"bytes");
    }

    #[test]
    fn test_presign_missing_key_fails() {
        let store = MemoryBlobStore::new();
        assert!(store.presign("1/missing").is_err());
    }
}
