//! HTTP client for the Shorty backend.
//!
//! [`RemoteServiceClient`] implements [`ShortyApi`](shorty_core::ShortyApi)
//! over the backend's JSON API. Responses are classified once per call into
//! success, not-found, or failure, and their envelopes are decoded into
//! typed records.
//!
//! # Example
//!
//! ```rust,no_run
//! use shorty_client::{RemoteServiceClient, ServiceConfig};
//! use shorty_core::ShortyApi;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RemoteServiceClient::new(
//!     ServiceConfig::builder()
//!         .base_url("https://shorty.example")
//!         .api_key("secret")
//!         .build(),
//! )?;
//!
//! let link = client.create_link("https://example.com/some/long/path").await?;
//! println!("short link: {}", link.short_url("https://shorty.example"));
//!
//! match client.get_link(&link.id).await? {
//!     Some(link) => println!("{} -> {}", link.id, link.url),
//!     None => println!("link not found"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod response;

pub use client::RemoteServiceClient;
pub use config::{ConfigError, ServiceConfig};
pub use response::{RawResponse, ResponseClass};
