//! Dashboard counters for products, users and orders.

use crate::cache::DataCache;
use crate::cancel::CancellationToken;
use crate::fetch::{CachedFetch, FetchState};
use crate::network::{CountResource, StorefrontClient};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Combined result of the three counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsSummary {
    pub product_count: u64,
    pub user_count: u64,
    pub order_count: u64,
    pub is_loading: bool,
    /// First error in products, users, orders order.
    pub error: Option<String>,
}

impl StatsSummary {
    pub fn from_states(
        products: &FetchState<u64>,
        users: &FetchState<u64>,
        orders: &FetchState<u64>,
    ) -> Self {
        Self {
            product_count: products.data.unwrap_or(0),
            user_count: users.data.unwrap_or(0),
            order_count: orders.data.unwrap_or(0),
            is_loading: products.loading || users.loading || orders.loading,
            error: products
                .error
                .clone()
                .or_else(|| users.error.clone())
                .or_else(|| orders.error.clone()),
        }
    }
}

/// Three cached count fetches shown together.
#[derive(Debug)]
pub struct StatsCounts {
    products: CachedFetch<u64>,
    users: CachedFetch<u64>,
    orders: CachedFetch<u64>,
}

impl StatsCounts {
    pub fn new(cache: Arc<DataCache>, client: StorefrontClient, ttl: Duration) -> Self {
        let counter = |resource: CountResource| {
            let client = client.clone();
            CachedFetch::<u64>::new(
                cache.clone(),
                resource.cache_key(),
                move |_key: &str, token: CancellationToken| {
                    let client = client.clone();
                    async move { client.fetch_count(resource, &token).await }
                },
                ttl,
            )
        };

        Self {
            products: counter(CountResource::Products),
            users: counter(CountResource::Users),
            orders: counter(CountResource::Orders),
        }
    }

    /// Load all three counters concurrently.
    pub async fn activate(&self) {
        futures::join!(
            self.products.activate(),
            self.users.activate(),
            self.orders.activate()
        );
    }

    pub async fn refresh(&self) {
        futures::join!(
            self.products.refresh(),
            self.users.refresh(),
            self.orders.refresh()
        );
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary::from_states(
            &self.products.snapshot(),
            &self.users.snapshot(),
            &self.orders.snapshot(),
        )
    }

    pub fn fetch(&self, resource: CountResource) -> &CachedFetch<u64> {
        match resource {
            CountResource::Products => &self.products,
            CountResource::Users => &self.users,
            CountResource::Orders => &self.orders,
        }
    }

    pub fn teardown(&self) {
        self.products.teardown();
        self.users.teardown();
        self.orders.teardown();
    }
}
