//! rescfg API - HTTP adapter for the marketplace service
//!
//! Implements the `rescfg-core` catalog and patch ports over REST.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

mod client;
mod error;
mod models;

pub use client::{MarketplaceClient, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use error::{ApiError, ApiResult};
pub use models::{ResourceBody, ResourceEnvelope};
