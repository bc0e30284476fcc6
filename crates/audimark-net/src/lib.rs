//! # audimark-net
//!
//! REST data source for the review queue. Wraps the tool backend's HTTP API
//! behind a typed [`ApiClient`]: server-paginated submission and recording
//! listings, feedback and grade writes, deep-link resources, and audio
//! upload. Raw server payloads are normalized into the canonical row types
//! from `audimark-shared` before they leave this crate.

pub mod client;
pub mod wire;

mod error;

pub use client::ApiClient;
pub use error::NetError;
