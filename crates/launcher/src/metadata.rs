//! Metadata publishing
//!
//! The image and descriptive fields go to the pinning service as one
//! multipart form. The service answers with the URI of the metadata document
//! that ends up in the on-chain create instruction.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{LaunchError, LaunchResult};
use crate::types::TokenDetails;

/// Response field carrying the pinned metadata URI
pub const URI_FIELD: &str = "metadataUri";

/// One metadata upload
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataUpload {
    pub image_path: PathBuf,
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub twitter: String,
    pub website: String,
}

impl From<&TokenDetails> for MetadataUpload {
    fn from(details: &TokenDetails) -> Self {
        Self {
            image_path: details.image_path.clone(),
            name: details.name.clone(),
            symbol: details.symbol.clone(),
            description: details.description.clone(),
            twitter: details.twitter.clone(),
            website: details.website.clone(),
        }
    }
}

#[async_trait]
pub trait MetadataUploader: Send + Sync {
    /// Pin the image and metadata, returning the metadata URI
    async fn publish(&self, upload: &MetadataUpload) -> LaunchResult<String>;
}

/// Uploader posting to an HTTP pinning endpoint
pub struct HttpUploader {
    client: reqwest::Client,
    url: String,
    created_on: String,
}

impl HttpUploader {
    pub fn new(url: impl Into<String>, created_on: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            created_on: created_on.into(),
        }
    }

    async fn build_form(&self, upload: &MetadataUpload) -> LaunchResult<Form> {
        let image = tokio::fs::read(&upload.image_path).await.map_err(|e| {
            LaunchError::Upload(format!(
                "Failed to read image {}: {}",
                upload.image_path.display(),
                e
            ))
        })?;
        debug!(bytes = image.len(), path = %upload.image_path.display(), "Read image");

        let file_name = upload
            .image_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        let part = Part::bytes(image)
            .file_name(file_name)
            .mime_str(image_mime(&upload.image_path))
            .map_err(|e| LaunchError::Upload(e.to_string()))?;

        Ok(Form::new()
            .part("file", part)
            .text("name", upload.name.clone())
            .text("symbol", upload.symbol.clone())
            .text("description", upload.description.clone())
            .text("twitter", upload.twitter.clone())
            .text("website", upload.website.clone())
            .text("showName", "true")
            .text("createdOn", self.created_on.clone()))
    }
}

#[async_trait]
impl MetadataUploader for HttpUploader {
    async fn publish(&self, upload: &MetadataUpload) -> LaunchResult<String> {
        let form = self.build_form(upload).await?;

        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| LaunchError::Upload(format!("Request to {} failed: {}", self.url, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LaunchError::Upload(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(LaunchError::Upload(format!(
                "Upload endpoint returned {}: {}",
                status, body
            )));
        }

        let uri = extract_uri(&body)?;
        info!(%uri, "Metadata pinned");
        Ok(uri)
    }
}

/// Pull the metadata URI out of the service's JSON response
pub fn extract_uri(body: &str) -> LaunchResult<String> {
    let json: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| LaunchError::Upload(format!("Response is not JSON: {}", e)))?;

    json.get(URI_FIELD)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| LaunchError::Upload(format!("Response has no '{}' field", URI_FIELD)))
}

fn image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
