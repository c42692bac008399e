//! Object storage abstraction.
//!
//! `ObjectStorage` is the seam between the file pipeline and the bucket backend.
//! Production uses `SupabaseStorage`; tests swap in an in-memory implementation.

pub mod supabase;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

use crate::server::error::storage::StorageError;

/// An object directly inside a listed folder.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    /// Object name relative to the listed prefix.
    pub name: String,
    pub size: Option<u64>,
    pub content_type: Option<String>,
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Stores `bytes` at `path`, replacing any existing object.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError>;

    /// Deletes the objects at `paths`. Missing objects are ignored.
    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StorageError>;

    /// Lists the objects directly inside the `prefix` folder; sub-folders are skipped.
    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<StoredObject>, StorageError>;

    /// URL of an object in a public bucket.
    fn public_url(&self, bucket: &str, path: &str) -> String;

    /// Time-limited URL of an object in a private bucket.
    async fn signed_url(
        &self,
        bucket: &str,
        path: &str,
        expires_in: u64,
    ) -> Result<String, StorageError>;
}
