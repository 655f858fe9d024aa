use crate::error::{ApiError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A record decoded from the `result` field of a success envelope.
///
/// Decoding only proves the fields are present. [`ApiRecord::check`] rejects
/// values that are well-typed but unusable, such as an empty id.
pub trait ApiRecord: DeserializeOwned + Send + 'static {
    /// Returns a description of the first invalid field, if any.
    fn check(&self) -> std::result::Result<(), String>;
}

/// A short link created by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// The generated identifier of the short link.
    pub id: String,
    /// The URL the short link redirects to.
    pub url: String,
}

impl LinkRecord {
    /// Generates the public short URL for this link under the given base URL.
    pub fn short_url(&self, public_base: &str) -> String {
        format!("{}/link/{}", public_base.trim_end_matches('/'), self.id)
    }
}

impl ApiRecord for LinkRecord {
    fn check(&self) -> std::result::Result<(), String> {
        if self.id.is_empty() {
            return Err("link id is empty".to_string());
        }
        Ok(())
    }
}

/// Metadata of an image stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub id: String,
    pub name: String,
    /// Size in megabytes.
    pub size: f64,
    pub original_url: String,
    pub thumbnail_url: String,
}

impl ImageRecord {
    /// Public page showing this image under the given base URL.
    pub fn view_url(&self, public_base: &str) -> String {
        format!("{}/image/view/{}", public_base.trim_end_matches('/'), self.id)
    }

    /// Size rounded to one decimal, e.g. `0.5 MB`.
    pub fn display_size(&self) -> String {
        format!("{:.1} MB", self.size)
    }

    /// Forum embed linking the thumbnail to the original image.
    pub fn bbcode(&self) -> String {
        format!(
            "[URL={}][IMG]{}[/IMG][/URL]",
            self.original_url, self.thumbnail_url
        )
    }
}

impl ApiRecord for ImageRecord {
    fn check(&self) -> std::result::Result<(), String> {
        if self.id.is_empty() {
            return Err("image id is empty".to_string());
        }
        if !self.size.is_finite() || self.size < 0.0 {
            return Err(format!("image size is not a valid amount: {}", self.size));
        }
        Ok(())
    }
}

/// Binary content with a file name, sent as the `file` part of an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

impl ImageUpload {
    /// Creates an upload from in-memory content, guessing the MIME type from the file name.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let file_name = file_name.into();
        let mime = guess_image_mime(&file_name).map(str::to_string);
        Self {
            file_name,
            bytes: bytes.into(),
            mime,
        }
    }

    /// Overrides the MIME type attached to the upload.
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// Reads a file from disk and uses its file name for the upload.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                ApiError::InvalidInput(format!("path has no file name: {}", path.display()))
            })?
            .to_string();

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            ApiError::InvalidInput(format!("failed to read '{}': {e}", path.display()))
        })?;

        Ok(Self::new(file_name, bytes))
    }

    /// Size of the content in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn guess_image_mime(file_name: &str) -> Option<&'static str> {
    let (_, extension) = file_name.rsplit_once('.')?;
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_url_trims_trailing_slash() {
        let link = LinkRecord {
            id: "abc123".to_string(),
            url: "https://example.com".to_string(),
        };
        assert_eq!(
            link.short_url("https://shorty.io"),
            "https://shorty.io/link/abc123"
        );
        assert_eq!(
            link.short_url("https://shorty.io/"),
            "https://shorty.io/link/abc123"
        );
    }

    #[test]
    fn empty_link_id_is_rejected() {
        let link = LinkRecord {
            id: String::new(),
            url: "https://example.com".to_string(),
        };
        assert!(link.check().is_err());
    }

    #[test]
    fn image_record_uses_camel_case_fields() {
        let json = r#"{
            "id": "img1",
            "name": "cat.png",
            "size": 10,
            "originalUrl": "https://shorty.io/i/o/img1",
            "thumbnailUrl": "https://shorty.io/i/t/img1",
            "hash": "ignored"
        }"#;
        let image: ImageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(image.size, 10.0);
        assert_eq!(image.original_url, "https://shorty.io/i/o/img1");
        assert_eq!(image.thumbnail_url, "https://shorty.io/i/t/img1");
        assert!(image.check().is_ok());
    }

    #[test]
    fn image_view_helpers() {
        let image = ImageRecord {
            id: "img1".to_string(),
            name: "cat.png".to_string(),
            size: 1.26,
            original_url: "https://shorty.io/i/o/img1".to_string(),
            thumbnail_url: "https://shorty.io/i/t/img1".to_string(),
        };
        assert_eq!(
            image.view_url("https://shorty.io/"),
            "https://shorty.io/image/view/img1"
        );
        assert_eq!(image.display_size(), "1.3 MB");
        assert_eq!(
            image.bbcode(),
            "[URL=https://shorty.io/i/o/img1][IMG]https://shorty.io/i/t/img1[/IMG][/URL]"
        );
    }

    #[test]
    fn negative_image_size_is_rejected() {
        let image = ImageRecord {
            id: "img1".to_string(),
            name: "cat.png".to_string(),
            size: -1.0,
            original_url: String::new(),
            thumbnail_url: String::new(),
        };
        assert!(image.check().is_err());
    }

    #[test]
    fn upload_guesses_mime_from_extension() {
        assert_eq!(
            ImageUpload::new("cat.JPG", vec![1, 2, 3]).mime.as_deref(),
            Some("image/jpeg")
        );
        assert_eq!(ImageUpload::new("notes", vec![]).mime, None);
        assert_eq!(
            ImageUpload::new("notes", vec![])
                .with_mime("text/plain")
                .mime
                .as_deref(),
            Some("text/plain")
        );
    }

    #[tokio::test]
    async fn upload_from_missing_path_is_invalid_input() {
        let err = ImageUpload::from_path("/definitely/not/here.png")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }
}
