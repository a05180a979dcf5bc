//! Network access to the storefront backend.
//!
//! This module provides:
//! - A reqwest-based HTTP client with bearer auth and cancellable requests
//! - Typed calls for the items, count and contact endpoints

mod client;
mod storefront;

pub use client::HttpClient;
pub use storefront::{CountResource, CountResponse, StorefrontClient};
