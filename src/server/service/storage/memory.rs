//! In-memory `ObjectStorage` used by tests.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;

use crate::server::{
    error::storage::StorageError,
    service::storage::{ObjectStorage, StoredObject},
};

#[derive(Debug, Clone)]
struct Blob {
    size: u64,
    content_type: String,
}

/// Objects keyed by `(bucket, path)`. Clones share the same store.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    objects: Arc<Mutex<BTreeMap<(String, String), Blob>>>,
    /// When set, every call fails with a 503 API error.
    failing: bool,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A storage whose every operation fails.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn paths(&self, bucket: &str) -> Vec<String> {
        self.objects
            .lock()
            .unwrap()
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, p)| p.clone())
            .collect()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing {
            return Err(StorageError::Api {
                status: 503,
                message: "storage unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for InMemoryStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.check()?;
        self.objects.lock().unwrap().insert(
            (bucket.to_string(), path.to_string()),
            Blob {
                size: bytes.len() as u64,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StorageError> {
        self.check()?;
        let mut objects = self.objects.lock().unwrap();
        for path in paths {
            objects.remove(&(bucket.to_string(), path.clone()));
        }
        Ok(())
    }

    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<StoredObject>, StorageError> {
        self.check()?;
        let folder = format!("{}/", prefix.trim_end_matches('/'));

        let mut listed: Vec<StoredObject> = self
            .objects
            .lock()
            .unwrap()
            .iter()
            .filter(|((b, _), _)| b == bucket)
            .filter_map(|((_, path), blob)| {
                let name = path.strip_prefix(&folder)?;
                (!name.contains('/')).then(|| StoredObject {
                    name: name.to_string(),
                    size: Some(blob.size),
                    content_type: Some(blob.content_type.clone()),
                })
            })
            .collect();
        listed.sort_by(|a, b| b.name.cmp(&a.name));

        Ok(listed)
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("memory://public/{}/{}", bucket, path)
    }

    async fn signed_url(
        &self,
        bucket: &str,
        path: &str,
        expires_in: u64,
    ) -> Result<String, StorageError> {
        self.check()?;
        Ok(format!(
            "memory://signed/{}/{}?expires_in={}",
            bucket, path, expires_in
        ))
    }
}
