//! Query parameters for the items endpoint and the cache keys derived from
//! filter state.

use super::filter::{PriceRange, ProductFilters, SortOrder};

/// Parameters of `GET /items`. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemQuery {
    pub show_all: Option<bool>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: Option<SortOrder>,
    pub category: Option<String>,
}

impl ItemQuery {
    /// Query with no parameters: the backend's default listing.
    pub fn all() -> Self {
        Self::default()
    }

    /// Query behind the featured section of the home page.
    pub fn featured() -> Self {
        Self {
            show_all: Some(false),
            ..Self::default()
        }
    }

    /// Query for the products page. Bounds equal to the default range and
    /// empty filters are left out.
    pub fn for_filters(filters: &ProductFilters, range: &PriceRange) -> Self {
        Self {
            show_all: Some(true),
            min_price: range.has_min_bound().then_some(range.min),
            max_price: range.has_max_bound().then_some(range.max),
            sort: (filters.sort != SortOrder::Unsorted).then_some(filters.sort),
            category: (!filters.category.is_empty()).then(|| filters.category.joined()),
        }
    }

    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(show_all) = self.show_all {
            pairs.push(("showAll", show_all.to_string()));
        }
        if let Some(min) = self.min_price {
            pairs.push(("minPrice", min.to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("maxPrice", max.to_string()));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.as_str().to_string()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        pairs
    }
}

/// Cache key of a products page listing: `products-{min}-{max}-{sort}-{category}`.
pub fn products_cache_key(filters: &ProductFilters, range: &PriceRange) -> String {
    format!(
        "products-{}-{}-{}-{}",
        range.min,
        range.max,
        filters.sort.as_str(),
        filters.category.joined()
    )
}
