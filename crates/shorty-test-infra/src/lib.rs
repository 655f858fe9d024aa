//! Test infrastructure for the Shorty client crates.
//!
//! [`StubBackend`] runs an in-memory imitation of the Shorty backend inside
//! the test process, speaking the same routes and envelopes.
//!
//! # Example
//!
//! ```rust,no_run
//! use shorty_test_infra::{Route, StubBackend, StubConfig};
//!
//! # async fn example() -> shorty_test_infra::Result<()> {
//! let backend = StubBackend::start(StubConfig::builder().api_key("secret").build()).await?;
//! backend.insert_link("abc123", "https://example.com");
//!
//! // Force a server error on link lookups.
//! backend.respond_with(
//!     Route::GetLink,
//!     500,
//!     r#"{"status":"error","error":{"id":"-","message":"database is down"}}"#,
//! );
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod error;
mod routes;

pub use backend::{CannedResponse, ReceivedUpload, Route, StubBackend, StubConfig};
pub use error::{Result, TestInfraError};
