//! Core types and traits for the Shorty client.
//!
//! This crate provides the records exchanged with the Shorty backend, the
//! result/error envelope they travel in, and the [`ShortyApi`] trait that
//! the HTTP client implements and the command-line frontend consumes.

pub mod api;
pub mod envelope;
pub mod error;
pub mod record;

pub use api::ShortyApi;
pub use envelope::{ErrorBody, ErrorEnvelope, SuccessEnvelope};
pub use error::{ApiError, Result};
pub use record::{ApiRecord, ImageRecord, ImageUpload, LinkRecord};
