//! Remote image host media backend.
//!
//! Blobs are streamed to the host's upload endpoint; the returned
//! secure URL is stored on the record, and the host's asset id is kept
//! as the backend reference so the blob can be destroyed when the
//! record is deleted.
//!
//! Requests are authenticated with an API key plus a SHA-256 signature
//! over the sorted parameters and the API secret.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::config::CloudStorageConfig;

use super::{MediaError, MediaStore, StoredMedia};

/// Image host API base URL.
const UPLOAD_BASE_URL: &str = "https://api.cloudinary.com/v1_1";

/// Media store backed by a remote image host.
pub struct CloudMediaStore {
    client: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: SecretString,
    folder: String,
}

/// Successful upload response from the image host.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

impl CloudMediaStore {
    /// Create a new image host client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::Http` if the HTTP client fails to build.
    pub fn new(config: &CloudStorageConfig) -> Result<Self, MediaError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            cloud_name: config.cloud_name.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            folder: config.folder.clone(),
        })
    }

    /// Sign a sorted parameter string with the API secret.
    fn sign(&self, params: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(params.as_bytes());
        hasher.update(self.api_secret.expose_secret().as_bytes());
        hex::encode(hasher.finalize())
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{UPLOAD_BASE_URL}/{}/image/{action}", self.cloud_name)
    }
}

#[async_trait]
impl MediaStore for CloudMediaStore {
    async fn store(&self, data: Bytes, filename: &str) -> Result<StoredMedia, MediaError> {
        let timestamp = chrono::Utc::now().timestamp();
        // Parameters are signed in sorted order, excluding file and api_key.
        let signature = self.sign(&format!("folder={}&timestamp={timestamp}", self.folder));

        let file_part = multipart::Part::bytes(data.to_vec()).file_name(filename.to_owned());
        let form = multipart::Form::new()
            .part("file", file_part)
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("folder", self.folder.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MediaError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| MediaError::Parse(e.to_string()))?;

        Ok(StoredMedia {
            url: uploaded.secure_url,
            backend_ref: Some(uploaded.public_id),
        })
    }

    async fn delete(&self, _url: &str, backend_ref: Option<&str>) -> Result<(), MediaError> {
        // Without an asset id there is nothing we can destroy remotely.
        let Some(public_id) = backend_ref else {
            return Ok(());
        };

        let timestamp = chrono::Utc::now().timestamp();
        let signature = self.sign(&format!("public_id={public_id}&timestamp={timestamp}"));

        let form = multipart::Form::new()
            .text("public_id", public_id.to_owned())
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        let response = self
            .client
            .post(self.endpoint("destroy"))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MediaError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_store() -> CloudMediaStore {
        CloudMediaStore::new(&CloudStorageConfig {
            cloud_name: "demo".to_string(),
            api_key: "123456".to_string(),
            api_secret: SecretString::from("topsecret"),
            folder: "ngo-gallery".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_sign_is_deterministic_hex_sha256() {
        let store = test_store();

        let a = store.sign("folder=ngo-gallery&timestamp=1700000000");
        let b = store.sign("folder=ngo-gallery&timestamp=1700000000");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_sign_varies_with_params() {
        let store = test_store();

        let a = store.sign("public_id=x&timestamp=1700000000");
        let b = store.sign("public_id=y&timestamp=1700000000");
        assert_ne!(a, b);
    }

    #[test]
    fn test_endpoint_includes_cloud_name() {
        let store = test_store();
        assert_eq!(
            store.endpoint("upload"),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
        assert_eq!(
            store.endpoint("destroy"),
            "https://api.cloudinary.com/v1_1/demo/image/destroy"
        );
    }
}
