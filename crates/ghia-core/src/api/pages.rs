//! Page-level state constructors.
//!
//! Every page built here shares the storefront's cache, so two pages
//! reading the same key see the same entry.

use crate::catalog::{featured_products, Item, ProductCatalog};
use crate::fetch::CachedFetch;
use crate::forms::ContactForm;
use crate::stats::StatsCounts;
use crate::{Result, Storefront};

impl Storefront {
    /// State for the products page.
    pub fn product_catalog(&self) -> ProductCatalog {
        ProductCatalog::new(self.cache.clone(), self.client.clone(), self.config.cache_ttl)
    }

    /// The home page's featured listing.
    pub fn featured_products(&self) -> CachedFetch<Vec<Item>> {
        featured_products(self.cache.clone(), self.client.clone(), self.config.cache_ttl)
    }

    /// Dashboard counters.
    pub fn stats_counts(&self) -> StatsCounts {
        StatsCounts::new(self.cache.clone(), self.client.clone(), self.config.cache_ttl)
    }

    /// Validate and send the contact form.
    pub async fn submit_contact(&self, form: &ContactForm) -> Result<()> {
        self.client.submit_contact(form).await
    }
}
