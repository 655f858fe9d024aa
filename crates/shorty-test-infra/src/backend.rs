use crate::routes;
use crate::Result;
use dashmap::DashMap;
use shorty_core::{ImageRecord, LinkRecord};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::warn;
use typed_builder::TypedBuilder;

#[derive(Debug, Clone, TypedBuilder)]
pub struct StubConfig {
    /// Bearer token every request must carry.
    #[builder(default = "test-api-key".to_string(), setter(into))]
    pub api_key: String,

    /// Public URL used when building image URLs.
    #[builder(default = "http://shorty.test".to_string(), setter(into))]
    pub public_url: String,
}

impl Default for StubConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Backend routes that can be scripted with [`StubBackend::respond_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    CreateLink,
    GetLink,
    UploadImage,
    GetImageInfo,
}

/// A canned response replacing the stub's normal behavior for one route.
#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub body: String,
    pub content_type: &'static str,
}

/// What the stub received for an uploaded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub len: usize,
}

pub(crate) struct StubStore {
    pub(crate) config: StubConfig,
    pub(crate) links: DashMap<String, LinkRecord>,
    pub(crate) images: DashMap<String, ImageRecord>,
    pub(crate) uploads: DashMap<String, ReceivedUpload>,
    pub(crate) canned: DashMap<Route, CannedResponse>,
    next_id: AtomicU64,
    requests: AtomicU64,
}

impl StubStore {
    fn new(config: StubConfig) -> Self {
        Self {
            config,
            links: DashMap::new(),
            images: DashMap::new(),
            uploads: DashMap::new(),
            canned: DashMap::new(),
            next_id: AtomicU64::new(0),
            requests: AtomicU64::new(0),
        }
    }

    /// Generates sequential ids such as `l000000`, `i000001`.
    pub(crate) fn next_id(&self, prefix: char) -> String {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        format!("{prefix}{n:06}")
    }

    pub(crate) fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }
}

pub(crate) type SharedStore = Arc<StubStore>;

/// Test fixture for an in-process Shorty backend.
///
/// Serves the backend's JSON API on an ephemeral loopback port, keeps links
/// and images in memory, and rejects requests without the configured bearer
/// key. The server shuts down when the fixture is dropped.
pub struct StubBackend {
    addr: SocketAddr,
    store: SharedStore,
    task: JoinHandle<()>,
}

impl StubBackend {
    /// Starts a stub backend on `127.0.0.1` with an OS-assigned port.
    pub async fn start(config: StubConfig) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let store: SharedStore = Arc::new(StubStore::new(config));
        let app = routes::router(store.clone());

        let task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                warn!(error = %e, "stub backend stopped with error");
            }
        });

        Ok(Self { addr, store, task })
    }

    /// Base URL to configure a client with, e.g. `http://127.0.0.1:34567`.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn api_key(&self) -> &str {
        &self.store.config.api_key
    }

    pub fn public_url(&self) -> &str {
        &self.store.config.public_url
    }

    /// Replaces the normal behavior of `route` with a fixed JSON response.
    pub fn respond_with(&self, route: Route, status: u16, body: impl Into<String>) {
        self.respond_with_content_type(route, status, body, "application/json");
    }

    pub fn respond_with_content_type(
        &self,
        route: Route,
        status: u16,
        body: impl Into<String>,
        content_type: &'static str,
    ) {
        self.store.canned.insert(
            route,
            CannedResponse {
                status,
                body: body.into(),
                content_type,
            },
        );
    }

    /// Restores the normal behavior of every route.
    pub fn clear_responses(&self) {
        self.store.canned.clear();
    }

    pub fn insert_link(&self, id: impl Into<String>, url: impl Into<String>) {
        let link = LinkRecord {
            id: id.into(),
            url: url.into(),
        };
        self.store.links.insert(link.id.clone(), link);
    }

    pub fn link(&self, id: &str) -> Option<LinkRecord> {
        self.store.links.get(id).map(|entry| entry.value().clone())
    }

    pub fn insert_image(&self, image: ImageRecord) {
        self.store.images.insert(image.id.clone(), image);
    }

    pub fn image(&self, id: &str) -> Option<ImageRecord> {
        self.store.images.get(id).map(|entry| entry.value().clone())
    }

    pub fn received_upload(&self, id: &str) -> Option<ReceivedUpload> {
        self.store.uploads.get(id).map(|entry| entry.value().clone())
    }

    /// Number of requests that reached a route handler, authorized or not.
    pub fn request_count(&self) -> u64 {
        self.store.requests.load(Ordering::Relaxed)
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}
