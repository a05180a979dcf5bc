//! Ghia Core - Headless storefront state for the Ghia Gym shop.
//!
//! This crate holds the data layer behind the storefront pages: a TTL cache
//! shared across pages, cancellable cached fetches, the product filter and
//! sort pipeline, and the contact and booking forms. It has no UI; callers
//! render the states it publishes.
//!
//! # Example
//!
//! ```rust,ignore
//! use ghia_core::{Storefront, StorefrontConfig};
//!
//! #[tokio::main]
//! async fn main() -> ghia_core::Result<()> {
//!     let storefront = Storefront::new(StorefrontConfig::from_env()?)?;
//!
//!     let catalog = storefront.product_catalog();
//!     catalog.activate().await;
//!     println!("{} products", catalog.view().items.len());
//!
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod cancel;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fetch;
pub mod forms;
pub mod network;
pub mod preferences;
pub mod promo;
pub mod stats;

mod api;

// Re-export commonly used types
pub use cache::{CacheEntry, Clock, DataCache, ManualClock, SystemClock};
pub use cancel::{CancellationToken, CancelledError};
pub use cart::{Cart, CartLine};
pub use catalog::{
    CatalogSource, CatalogView, CategorySelection, Item, ItemQuery, PriceDraft, PriceRange,
    ProductCatalog, ProductFilters, SortOrder,
};
pub use config::StorefrontConfig;
pub use error::{Result, StorefrontError, GENERIC_LOAD_ERROR};
pub use fetch::{CachedFetch, FetchPhase, FetchState, Supplier};
pub use forms::{BookingForm, BookingMode, ContactForm};
pub use network::{CountResource, HttpClient, StorefrontClient};
pub use preferences::{LocalStore, Preferences};
pub use promo::Countdown;
pub use stats::{StatsCounts, StatsSummary};

// Re-export builder from api module
pub use api::StorefrontBuilder;

use std::sync::Arc;

/// Main entry point: configuration plus the shared cache, API client and
/// preference store that every page is built from.
pub struct Storefront {
    config: StorefrontConfig,
    cache: Arc<DataCache>,
    client: StorefrontClient,
    preferences: Arc<Preferences>,
}

impl Storefront {
    /// Create a storefront with a fresh cache and the system clock.
    pub fn new(config: StorefrontConfig) -> Result<Self> {
        StorefrontBuilder::new().with_config(config).build()
    }

    /// Create a builder for Storefront.
    pub fn builder() -> StorefrontBuilder {
        StorefrontBuilder::new()
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<DataCache> {
        &self.cache
    }

    pub fn client(&self) -> &StorefrontClient {
        &self.client
    }

    pub fn preferences(&self) -> &Arc<Preferences> {
        &self.preferences
    }
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("api_base_url", &self.config.api_base_url)
            .field("cached_entries", &self.cache.len())
            .finish()
    }
}
