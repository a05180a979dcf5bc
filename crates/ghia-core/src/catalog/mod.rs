//! Product catalog: items, client-side filtering and the products page.

mod filter;
mod item;
mod page;
mod query;

pub use filter::{
    derive_view, matches, CategorySelection, PriceDraft, PriceRange, ProductFilters, SortOrder,
};
pub use item::Item;
pub use page::{
    build_view, featured_products, items_fetch, resolve_source, CatalogSource, CatalogView,
    ProductCatalog,
};
pub use query::{products_cache_key, ItemQuery};
