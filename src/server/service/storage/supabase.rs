//! Supabase Storage REST client.
//!
//! Every request authenticates with the service role key, both as bearer token and as
//! `apikey` header, which bypasses bucket policies. Access control is enforced by the
//! file service before any call reaches this client.

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Response};
use serde::Deserialize;
use serde_json::json;

use crate::server::{
    error::storage::StorageError,
    service::storage::{ObjectStorage, StoredObject},
};

const LIST_LIMIT: u32 = 1000;

pub struct SupabaseStorage {
    client: reqwest::Client,
    /// `{project_url}/storage/v1`
    base_url: String,
    service_key: String,
}

#[derive(Deserialize)]
struct ListEntry {
    name: String,
    /// Folders are returned with a null id.
    id: Option<String>,
    metadata: Option<ListMetadata>,
}

#[derive(Deserialize)]
struct ListMetadata {
    size: Option<u64>,
    mimetype: Option<String>,
}

#[derive(Deserialize)]
struct SignedUrlResponse {
    #[serde(rename = "signedURL")]
    signed_url: String,
}

impl SupabaseStorage {
    pub fn new(client: reqwest::Client, project_url: &str, service_key: String) -> Self {
        Self {
            client,
            base_url: format!("{}/storage/v1", project_url.trim_end_matches('/')),
            service_key,
        }
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let url = format!("{}/object/{}/{}", self.base_url, bucket, path);

        let response = self
            .authorized(self.client.post(url))
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await?;

        ensure_success(response).await?;

        Ok(())
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StorageError> {
        if paths.is_empty() {
            return Ok(());
        }

        let url = format!("{}/object/{}", self.base_url, bucket);

        let response = self
            .authorized(self.client.delete(url))
            .json(&json!({ "prefixes": paths }))
            .send()
            .await?;

        ensure_success(response).await?;

        Ok(())
    }

    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<StoredObject>, StorageError> {
        let url = format!("{}/object/list/{}", self.base_url, bucket);

        let response = self
            .authorized(self.client.post(url))
            .json(&json!({
                "prefix": prefix,
                "limit": LIST_LIMIT,
                "offset": 0,
                "sortBy": { "column": "name", "order": "desc" },
            }))
            .send()
            .await?;

        let entries: Vec<ListEntry> = ensure_success(response).await?.json().await?;

        Ok(entries
            .into_iter()
            .filter(|entry| entry.id.is_some())
            .map(|entry| {
                let (size, content_type) = entry
                    .metadata
                    .map(|m| (m.size, m.mimetype))
                    .unwrap_or((None, None));
                StoredObject {
                    name: entry.name,
                    size,
                    content_type,
                }
            })
            .collect())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/object/public/{}/{}", self.base_url, bucket, path)
    }

    async fn signed_url(
        &self,
        bucket: &str,
        path: &str,
        expires_in: u64,
    ) -> Result<String, StorageError> {
        let url = format!("{}/object/sign/{}/{}", self.base_url, bucket, path);

        let response = self
            .authorized(self.client.post(url))
            .json(&json!({ "expiresIn": expires_in }))
            .send()
            .await?;

        let signed: SignedUrlResponse = ensure_success(response).await?.json().await?;

        // The API answers with a path relative to /storage/v1
        Ok(format!("{}{}", self.base_url, signed.signed_url))
    }
}

/// Maps non-2xx answers to `StorageError::Api` carrying the response body.
async fn ensure_success(response: Response) -> Result<Response, StorageError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();

    Err(StorageError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> SupabaseStorage {
        SupabaseStorage::new(
            reqwest::Client::new(),
            "https://project.supabase.co/",
            "key".to_string(),
        )
    }

    #[test]
    fn builds_public_url() {
        assert_eq!(
            storage().public_url("pet-images", "1/pet/2/profile/3-abc.png"),
            "https://project.supabase.co/storage/v1/object/public/pet-images/1/pet/2/profile/3-abc.png"
        );
    }
}
