use crate::error::Result;
use crate::record::{ImageRecord, ImageUpload, LinkRecord};
use async_trait::async_trait;

/// Operations offered by the Shorty backend.
///
/// Read operations model "not found" as `Ok(None)`; only failures are errors.
#[async_trait]
pub trait ShortyApi: Send + Sync + 'static {
    /// Creates a short link for `url`.
    ///
    /// Creation either succeeds or fails, there is no not-found outcome.
    async fn create_link(&self, url: &str) -> Result<LinkRecord>;

    /// Fetches a short link by id.
    /// Returns `None` if the backend does not know the id.
    async fn get_link(&self, id: &str) -> Result<Option<LinkRecord>>;

    /// Uploads an image and returns the metadata the backend stored for it.
    async fn upload_image(&self, upload: ImageUpload) -> Result<Option<ImageRecord>>;

    /// Fetches image metadata by id.
    /// Returns `None` if the backend does not know the id.
    async fn get_image_info(&self, id: &str) -> Result<Option<ImageRecord>>;
}
