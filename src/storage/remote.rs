/**
 * Remote Avatar Storage
 *
 * Uploads avatars to a configured image service over HTTP. The service
 * receives a multipart POST with the file part and responds with JSON
 * containing the public URL it assigned:
 *
 * ```json
 * { "secure_url": "https://images.example/avatars/alice_abc.png" }
 * ```
 *
 * Any transport failure, non-success status, or response without a
 * `secure_url` surfaces as a `StorageError`, which the API layer reports
 * as a 500 with the detail kept server-side.
 */

use async_trait::async_trait;
use serde::Deserialize;

use crate::storage::{AvatarStore, StorageError};

/// Response body expected from the image service
#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

/// HTTP-backed avatar store
pub struct RemoteImageStore {
    client: reqwest::Client,
    upload_url: String,
    api_key: String,
}

impl RemoteImageStore {
    /// Create a store that uploads to `upload_url`, authenticating with
    /// `api_key` as a bearer token
    pub fn new(upload_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            upload_url,
            api_key,
        }
    }
}

#[async_trait]
impl AvatarStore for RemoteImageStore {
    async fn store(&self, bytes: &[u8], suggested_name: &str) -> Result<String, StorageError> {
        let part = reqwest::multipart::Part::bytes(bytes.to_vec()).file_name(suggested_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&self.upload_url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StorageError::BadResponse(format!(
                "upload endpoint answered {}",
                response.status()
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| StorageError::BadResponse(e.to_string()))?;

        tracing::debug!(url = %body.secure_url, "avatar uploaded to image service");
        Ok(body.secure_url)
    }
}
