use crate::config::{ConfigError, ServiceConfig};
use crate::response::RawResponse;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Url};
use serde::Serialize;
use shorty_core::{ApiError, ImageRecord, ImageUpload, LinkRecord, Result, ShortyApi};
use std::sync::Arc;
use tracing::{debug, trace};

const API_PREFIX: [&str; 2] = ["api", "v1"];

/// Field name of the file part in an image upload.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Serialize)]
struct CreateLinkRequest<'a> {
    url: &'a str,
}

/// HTTP implementation of [`ShortyApi`] against a remote Shorty backend.
///
/// The client holds only its configuration and a connection pool, so it is
/// cheap to clone and safe to share between tasks. Calls are independent of
/// each other: no retry, no caching, no ordering between concurrent calls.
#[derive(Clone)]
pub struct RemoteServiceClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Arc<str>,
}

impl std::fmt::Debug for RemoteServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteServiceClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl RemoteServiceClient {
    /// Creates a new client after validating the configuration.
    ///
    /// No request is issued here; a missing base URL or API key is reported
    /// before the client can be used.
    pub fn new(config: ServiceConfig) -> std::result::Result<Self, ConfigError> {
        let base_url = config.validate()?;

        let mut builder = reqwest::Client::builder().user_agent(config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            api_key: Arc::from(config.api_key),
        })
    }

    /// Returns the validated base URL of the backend.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds `{base}/api/v1/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ApiError::InvalidInput(format!("base url cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(API_PREFIX)
            .extend(segments);
        Ok(url)
    }

    async fn execute(&self, operation: &'static str, request: RequestBuilder) -> Result<RawResponse> {
        let response = request
            .bearer_auth(&self.api_key)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| map_reqwest_error(operation, e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| map_reqwest_error(operation, e))?;

        debug!(operation, status = status.as_u16(), body_len = body.len(), "received response");
        Ok(RawResponse::new(status, body.to_vec()))
    }
}

fn map_reqwest_error(operation: &str, err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Transport(format!("{operation}: request timed out: {err}"))
    } else {
        ApiError::Transport(format!("{operation}: {err}"))
    }
}

fn require_id(kind: &str, id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(ApiError::InvalidInput(format!("{kind} id cannot be empty")));
    }
    // URL path normalization drops dot segments, which would target another route.
    if id == "." || id == ".." {
        return Err(ApiError::InvalidInput(format!(
            "{kind} id cannot be a dot segment: '{id}'"
        )));
    }
    Ok(())
}

#[async_trait]
impl ShortyApi for RemoteServiceClient {
    async fn create_link(&self, url: &str) -> Result<LinkRecord> {
        let endpoint = self.endpoint(&["link", "create"])?;
        trace!(endpoint = %endpoint, url, "creating short link");

        let request = self.http.post(endpoint).json(&CreateLinkRequest { url });
        let link: LinkRecord = self.execute("create_link", request).await?.into_required()?;

        debug!(id = %link.id, url = %link.url, "created short link");
        Ok(link)
    }

    async fn get_link(&self, id: &str) -> Result<Option<LinkRecord>> {
        require_id("link", id)?;
        let endpoint = self.endpoint(&["link", id])?;
        trace!(endpoint = %endpoint, "fetching short link");

        let request = self.http.get(endpoint);
        self.execute("get_link", request).await?.into_optional()
    }

    async fn upload_image(&self, upload: ImageUpload) -> Result<Option<ImageRecord>> {
        let endpoint = self.endpoint(&["image", "upload"])?;
        trace!(
            endpoint = %endpoint,
            file_name = %upload.file_name,
            size = upload.len(),
            "uploading image"
        );

        let mut part = Part::bytes(upload.bytes).file_name(upload.file_name);
        if let Some(mime) = upload.mime.as_deref() {
            part = part
                .mime_str(mime)
                .map_err(|e| ApiError::InvalidInput(format!("invalid mime type '{mime}': {e}")))?;
        }
        let form = Form::new().part(UPLOAD_FIELD, part);

        let request = self.http.post(endpoint).multipart(form);
        let image: Option<ImageRecord> =
            self.execute("upload_image", request).await?.into_optional()?;

        if let Some(image) = &image {
            debug!(id = %image.id, name = %image.name, "uploaded image");
        }
        Ok(image)
    }

    async fn get_image_info(&self, id: &str) -> Result<Option<ImageRecord>> {
        require_id("image", id)?;
        let endpoint = self.endpoint(&["image", "info", id])?;
        trace!(endpoint = %endpoint, "fetching image info");

        let request = self.http.get(endpoint);
        self.execute("get_image_info", request).await?.into_optional()
    }
}
