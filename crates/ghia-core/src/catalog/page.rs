//! The products page: a filtered listing backed by an all-items fallback.

use super::filter::{derive_view, CategorySelection, PriceRange, ProductFilters, SortOrder};
use super::item::Item;
use super::query::{products_cache_key, ItemQuery};
use crate::cache::DataCache;
use crate::cancel::CancellationToken;
use crate::config::CacheKeys;
use crate::fetch::{CachedFetch, FetchState};
use crate::network::StorefrontClient;
use crate::StorefrontError;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::debug;

/// Where the listed items came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    /// The listing fetched for the current filters.
    Filtered,
    /// The filtered listing is missing; the all-items listing stands in.
    Fallback,
    /// Neither listing has arrived.
    Empty,
}

/// Everything the products page renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogView {
    pub items: Vec<Item>,
    pub source: CatalogSource,
    /// The filtered listing is being fetched.
    pub loading: bool,
    /// A fetch is running while older items are already on screen.
    pub refreshing: bool,
    /// Error of the filtered listing.
    pub error: Option<String>,
    /// Nothing to show yet and something is still loading.
    pub show_full_page_skeleton: bool,
}

/// Pick the list to filter: filtered data wins, all-items data is the
/// fallback.
pub fn resolve_source<'a>(
    filtered: &'a FetchState<Vec<Item>>,
    all_items: &'a FetchState<Vec<Item>>,
) -> (Option<&'a [Item]>, CatalogSource) {
    match (&filtered.data, &all_items.data) {
        (Some(items), _) => (Some(items.as_slice()), CatalogSource::Filtered),
        (None, Some(items)) => (Some(items.as_slice()), CatalogSource::Fallback),
        (None, None) => (None, CatalogSource::Empty),
    }
}

/// Assemble the page view from both fetch states and the filter state.
pub fn build_view(
    filtered: &FetchState<Vec<Item>>,
    all_items: &FetchState<Vec<Item>>,
    filters: &ProductFilters,
    range: &PriceRange,
) -> CatalogView {
    let (source_items, source) = resolve_source(filtered, all_items);
    let items = source_items
        .map(|items| derive_view(items, filters, range))
        .unwrap_or_default();
    let any_loading = filtered.loading || all_items.loading;

    CatalogView {
        items,
        source,
        loading: filtered.loading,
        refreshing: filtered.loading && all_items.data.is_some(),
        error: filtered.error.clone(),
        show_full_page_skeleton: any_loading && source == CatalogSource::Empty,
    }
}

#[derive(Debug, Clone, Default)]
struct Selection {
    filters: ProductFilters,
    range: PriceRange,
}

impl Selection {
    fn key_and_query(&self) -> (String, ItemQuery) {
        (
            products_cache_key(&self.filters, &self.range),
            ItemQuery::for_filters(&self.filters, &self.range),
        )
    }
}

/// Query of every filtered listing key handed out so far.
type QueryRegistry = Arc<RwLock<HashMap<String, ItemQuery>>>;

/// Products page state: current filters plus the two listings behind them.
pub struct ProductCatalog {
    selection: Arc<RwLock<Selection>>,
    queries: QueryRegistry,
    filtered: CachedFetch<Vec<Item>>,
    all_items: CachedFetch<Vec<Item>>,
    ttl: Duration,
}

impl ProductCatalog {
    pub fn new(cache: Arc<DataCache>, client: StorefrontClient, ttl: Duration) -> Self {
        let selection = Selection::default();
        let (initial_key, initial_query) = selection.key_and_query();
        let queries: QueryRegistry = Arc::new(RwLock::new(HashMap::from([(
            initial_key.clone(),
            initial_query,
        )])));

        // The query is looked up by the key the call was started for, so a
        // result is always stored under the key of the filters it answers.
        let filtered = {
            let client = client.clone();
            let queries = queries.clone();
            CachedFetch::<Vec<Item>>::new(
                cache.clone(),
                initial_key,
                move |key: &str, token: CancellationToken| {
                    let client = client.clone();
                    let query = read(&queries).get(key).cloned();
                    let key = key.to_string();
                    async move {
                        let query = query.ok_or_else(|| {
                            StorefrontError::Other(format!("No query registered for {}", key))
                        })?;
                        client.fetch_items(&query, &token).await
                    }
                },
                ttl,
            )
        };
        let all_items = items_fetch(cache, client, CacheKeys::ALL_ITEMS, ItemQuery::all(), ttl);

        Self {
            selection: Arc::new(RwLock::new(selection)),
            queries,
            filtered,
            all_items,
            ttl,
        }
    }

    /// Load both listings, from cache where fresh.
    pub async fn activate(&self) {
        futures::join!(self.filtered.activate(), self.all_items.activate());
    }

    pub fn filters(&self) -> ProductFilters {
        read(&self.selection).filters.clone()
    }

    pub fn price_range(&self) -> PriceRange {
        read(&self.selection).range
    }

    pub async fn set_filters(&self, filters: ProductFilters) {
        {
            let mut current = write(&self.selection);
            current.filters = filters;
        }
        self.sync_key().await;
    }

    pub async fn set_category(&self, category: CategorySelection) {
        let mut filters = self.filters();
        filters.category = category;
        self.set_filters(filters).await;
    }

    pub async fn set_sort(&self, sort: SortOrder) {
        let mut filters = self.filters();
        filters.sort = sort;
        self.set_filters(filters).await;
    }

    pub async fn set_price_range(&self, range: PriceRange) {
        {
            let mut current = write(&self.selection);
            current.range = range;
        }
        self.sync_key().await;
    }

    /// Replace filters and price range together, fetching at most once.
    pub async fn set_selection(&self, filters: ProductFilters, range: PriceRange) {
        {
            let mut current = write(&self.selection);
            current.filters = filters;
            current.range = range;
        }
        self.sync_key().await;
    }

    /// Re-fetch the filtered listing (the page's retry button).
    pub async fn refresh(&self) {
        self.filtered.refresh().await;
    }

    pub fn view(&self) -> CatalogView {
        let current = read(&self.selection).clone();
        build_view(
            &self.filtered.snapshot(),
            &self.all_items.snapshot(),
            &current.filters,
            &current.range,
        )
    }

    pub fn filtered_fetch(&self) -> &CachedFetch<Vec<Item>> {
        &self.filtered
    }

    pub fn all_items_fetch(&self) -> &CachedFetch<Vec<Item>> {
        &self.all_items
    }

    /// Query sent for a filtered listing key, if that key was ever used.
    pub fn query_for(&self, key: &str) -> Option<ItemQuery> {
        read(&self.queries).get(key).cloned()
    }

    pub fn teardown(&self) {
        self.filtered.teardown();
        self.all_items.teardown();
    }

    async fn sync_key(&self) {
        let (key, query) = read(&self.selection).key_and_query();
        write(&self.queries).entry(key.clone()).or_insert(query);
        debug!("Products listing key is now {}", key);
        self.filtered.reconfigure(key, self.ttl).await;
    }
}

impl std::fmt::Debug for ProductCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductCatalog")
            .field("filtered", &self.filtered)
            .field("all_items", &self.all_items)
            .finish()
    }
}

/// A cached listing for a fixed query, such as the featured section.
pub fn items_fetch(
    cache: Arc<DataCache>,
    client: StorefrontClient,
    key: &str,
    query: ItemQuery,
    ttl: Duration,
) -> CachedFetch<Vec<Item>> {
    CachedFetch::new(
        cache,
        key,
        move |_key: &str, token: CancellationToken| {
            let client = client.clone();
            let query = query.clone();
            async move { client.fetch_items(&query, &token).await }
        },
        ttl,
    )
}

/// The home page's featured products listing.
pub fn featured_products(
    cache: Arc<DataCache>,
    client: StorefrontClient,
    ttl: Duration,
) -> CachedFetch<Vec<Item>> {
    items_fetch(cache, client, CacheKeys::FEATURED, ItemQuery::featured(), ttl)
}

fn read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    match lock.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    match lock.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
