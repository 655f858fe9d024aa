//! Command-line frontend for the Shorty backend.
//!
//! The `shorty` binary parses its arguments into an [`command::Action`],
//! runs it through any [`ShortyApi`](shorty_core::ShortyApi) implementation
//! and renders the [`command::Outcome`].

pub mod command;
pub mod output;
pub mod telemetry;

pub use command::{execute, Action, Outcome};
pub use output::{qr_code, render, OutputFormat, RenderOptions};
pub use telemetry::LogFormat;
