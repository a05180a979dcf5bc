//! Client-side product filtering and sorting.
//!
//! Everything here is pure: the same inputs always give the same list and
//! nothing touches the network.

use super::item::Item;
use crate::config::CatalogConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Requested ordering of the product list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    /// Keep the order the backend returned ("Fetch All").
    #[default]
    #[serde(rename = "")]
    Unsorted,
    #[serde(rename = "price_asc")]
    PriceAsc,
    #[serde(rename = "price_desc")]
    PriceDesc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Unsorted => "",
            SortOrder::PriceAsc => "price_asc",
            SortOrder::PriceDesc => "price_desc",
        }
    }

    /// Parse the wire value. Anything unrecognised keeps source order.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "price_asc" => SortOrder::PriceAsc,
            "price_desc" => SortOrder::PriceDesc,
            _ => SortOrder::Unsorted,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Unsorted => "Fetch All",
            SortOrder::PriceAsc => "Price: Low to High",
            SortOrder::PriceDesc => "Price: High to Low",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selected categories, exchanged with the backend as a comma-joined string.
///
/// An empty selection matches every category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CategorySelection {
    selected: Vec<String>,
}

impl CategorySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `"Rings,Necklaces"`. Empty segments are dropped.
    pub fn from_joined(joined: &str) -> Self {
        let mut selection = Self::new();
        for category in joined.split(',').map(str::trim).filter(|c| !c.is_empty()) {
            if !selection.contains(category) {
                selection.selected.push(category.to_string());
            }
        }
        selection
    }

    pub fn single(category: impl Into<String>) -> Self {
        Self {
            selected: vec![category.into()],
        }
    }

    pub fn joined(&self) -> String {
        self.selected.join(",")
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, category: &str) -> bool {
        self.selected.iter().any(|c| c == category)
    }

    pub fn categories(&self) -> &[String] {
        &self.selected
    }

    /// Add `category` if missing, remove it if present.
    pub fn toggle(&mut self, category: &str) {
        if let Some(pos) = self.selected.iter().position(|c| c == category) {
            self.selected.remove(pos);
        } else {
            self.selected.push(category.to_string());
        }
    }

    pub fn is_all_selected(&self, all: &[&str]) -> bool {
        !all.is_empty() && all.iter().all(|c| self.contains(c))
    }

    /// Switch between every category in `all` and none.
    pub fn toggle_all(&mut self, all: &[&str]) {
        if self.is_all_selected(all) {
            self.selected.clear();
        } else {
            self.selected = all.iter().map(|c| c.to_string()).collect();
        }
    }

    /// Whether an item in `category` passes this selection.
    pub fn matches(&self, category: &str) -> bool {
        self.is_empty() || self.contains(category)
    }
}

impl Serialize for CategorySelection {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.joined())
    }
}

impl<'de> Deserialize<'de> for CategorySelection {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let joined = String::deserialize(deserializer)?;
        Ok(Self::from_joined(&joined))
    }
}

/// Inclusive price bounds applied to the list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }

    /// Whether the lower bound narrows the default range.
    pub fn has_min_bound(&self) -> bool {
        self.min > CatalogConfig::PRICE_MIN
    }

    /// Whether the upper bound narrows the default range.
    pub fn has_max_bound(&self) -> bool {
        self.max < CatalogConfig::PRICE_MAX
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::new(CatalogConfig::PRICE_MIN, CatalogConfig::PRICE_MAX)
    }
}

/// Uncommitted min/max inputs of the price filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceDraft {
    pub min: f64,
    pub max: f64,
}

impl PriceDraft {
    pub fn from_range(range: PriceRange) -> Self {
        Self {
            min: range.min,
            max: range.max,
        }
    }

    /// Accept a typed minimum. Returns `false` and keeps the old value for
    /// non-numeric or negative input.
    pub fn set_min_input(&mut self, input: &str) -> bool {
        match parse_price_input(input) {
            Some(value) => {
                self.min = value;
                true
            }
            None => false,
        }
    }

    /// Accept a typed maximum, same rules as [`Self::set_min_input`].
    pub fn set_max_input(&mut self, input: &str) -> bool {
        match parse_price_input(input) {
            Some(value) => {
                self.max = value;
                true
            }
            None => false,
        }
    }

    /// Apply is pointless when the draft already equals the applied range.
    pub fn is_apply_disabled(&self, applied: &PriceRange) -> bool {
        self.min == applied.min && self.max == applied.max
    }

    pub fn to_range(&self) -> PriceRange {
        PriceRange::new(self.min, self.max)
    }

    /// Follow a range that changed from outside the draft.
    pub fn sync_from(&mut self, range: PriceRange) {
        self.min = range.min;
        self.max = range.max;
    }
}

fn parse_price_input(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    // An empty field reads as zero, like a cleared number input.
    let value = if trimmed.is_empty() {
        0.0
    } else {
        trimmed.parse::<f64>().ok()?
    };
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// User-selected category and sort filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilters {
    #[serde(default)]
    pub category: CategorySelection,
    #[serde(default)]
    pub sort: SortOrder,
}

impl ProductFilters {
    pub fn new(category: CategorySelection, sort: SortOrder) -> Self {
        Self { category, sort }
    }
}

/// Whether `item` passes the filters and price bounds.
pub fn matches(item: &Item, filters: &ProductFilters, range: &PriceRange) -> bool {
    range.contains(item.price) && item.is_listed() && filters.category.matches(&item.category)
}

/// Filter and sort `source` into the list a products page shows.
///
/// Sorting is stable, so items with equal prices keep their source order.
pub fn derive_view(source: &[Item], filters: &ProductFilters, range: &PriceRange) -> Vec<Item> {
    let mut view: Vec<Item> = source
        .iter()
        .filter(|item| matches(item, filters, range))
        .cloned()
        .collect();

    match filters.sort {
        SortOrder::PriceAsc => view.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortOrder::PriceDesc => view.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortOrder::Unsorted => {}
    }

    view
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_items() -> Vec<Item> {
        vec![
            Item::new("a", "Silver ring", 50.0, "Rings").with_active(true),
            Item::new("b", "Chain", 20.0, "Necklaces").with_active(true),
            Item::new("c", "Retired ring", 80.0, "Rings").with_active(false),
        ]
    }

    fn prices(items: &[Item]) -> Vec<f64> {
        items.iter().map(|i| i.price).collect()
    }

    #[test]
    fn test_inactive_item_excluded_regardless_of_category() {
        let filters = ProductFilters::new(CategorySelection::single("Rings"), SortOrder::PriceAsc);
        let view = derive_view(&scenario_items(), &filters, &PriceRange::new(0.0, 1000.0));

        assert_eq!(view.len(), 1);
        assert_eq!(view[0].price, 50.0);
        assert_eq!(view[0].category, "Rings");
    }

    #[test]
    fn test_empty_filters_keep_source_order() {
        let view = derive_view(
            &scenario_items(),
            &ProductFilters::default(),
            &PriceRange::default(),
        );
        assert_eq!(prices(&view), vec![50.0, 20.0]);
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let view = derive_view(
            &scenario_items(),
            &ProductFilters::default(),
            &PriceRange::new(20.0, 50.0),
        );
        assert_eq!(prices(&view), vec![50.0, 20.0]);

        let view = derive_view(
            &scenario_items(),
            &ProductFilters::default(),
            &PriceRange::new(20.01, 49.99),
        );
        assert!(view.is_empty());
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let filters = ProductFilters::new(CategorySelection::new(), SortOrder::PriceDesc);
        let range = PriceRange::new(10.0, 60.0);
        let once = derive_view(&scenario_items(), &filters, &range);
        let twice = derive_view(&once, &filters, &range);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_asc_then_desc_reverses_distinct_prices() {
        let items = vec![
            Item::new("1", "a", 30.0, "Rings"),
            Item::new("2", "b", 10.0, "Rings"),
            Item::new("3", "c", 20.0, "Rings"),
        ];
        let range = PriceRange::default();
        let by = |sort| ProductFilters::new(CategorySelection::new(), sort);
        let asc = derive_view(&items, &by(SortOrder::PriceAsc), &range);
        let desc = derive_view(&items, &by(SortOrder::PriceDesc), &range);

        let mut reversed = asc.clone();
        reversed.reverse();
        assert_eq!(desc, reversed);
        assert_eq!(prices(&asc), vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_prices() {
        let items = vec![
            Item::new("first", "a", 10.0, "Rings"),
            Item::new("second", "b", 10.0, "Rings"),
            Item::new("cheap", "c", 5.0, "Rings"),
        ];
        let view = derive_view(
            &items,
            &ProductFilters::new(CategorySelection::new(), SortOrder::PriceDesc),
            &PriceRange::default(),
        );
        let ids: Vec<&str> = view.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "cheap"]);
    }

    #[test]
    fn test_multi_category_selection() {
        let mut items = scenario_items();
        items.push(Item::new("d", "Stud", 15.0, "Earrings"));

        let filters = ProductFilters::new(
            CategorySelection::from_joined("Necklaces,Earrings"),
            SortOrder::Unsorted,
        );
        let view = derive_view(&items, &filters, &PriceRange::default());
        let ids: Vec<&str> = view.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d"]);
    }

    #[test]
    fn test_category_toggle_and_select_all() {
        let all = CatalogConfig::CATEGORIES;
        let mut selection = CategorySelection::new();

        selection.toggle("Rings");
        selection.toggle("Bracelets");
        assert_eq!(selection.joined(), "Rings,Bracelets");
        selection.toggle("Rings");
        assert_eq!(selection.joined(), "Bracelets");

        selection.toggle_all(&all);
        assert!(selection.is_all_selected(&all));
        assert_eq!(selection.joined(), "Necklaces,Rings,Bracelets,Earrings,Accessories");

        selection.toggle_all(&all);
        assert!(selection.is_empty());
        assert_eq!(selection.joined(), "");
    }

    #[test]
    fn test_from_joined_ignores_empty_segments() {
        let selection = CategorySelection::from_joined(",Rings,,Rings,");
        assert_eq!(selection.categories(), &["Rings".to_string()]);
        assert!(CategorySelection::from_joined("").is_empty());
    }

    #[test]
    fn test_sort_order_wire_values() {
        assert_eq!(SortOrder::parse("price_asc"), SortOrder::PriceAsc);
        assert_eq!(SortOrder::parse("price_desc"), SortOrder::PriceDesc);
        assert_eq!(SortOrder::parse("newest"), SortOrder::Unsorted);
        assert_eq!(serde_json::to_string(&SortOrder::PriceAsc).unwrap(), "\"price_asc\"");
        assert_eq!(serde_json::from_str::<SortOrder>("\"\"").unwrap(), SortOrder::Unsorted);
    }

    #[test]
    fn test_filters_serde_uses_joined_categories() {
        let filters: ProductFilters =
            serde_json::from_str(r#"{"category":"Rings,Earrings","sort":"price_desc"}"#).unwrap();
        assert!(filters.category.contains("Earrings"));
        assert_eq!(filters.sort, SortOrder::PriceDesc);
        assert_eq!(
            serde_json::to_value(&filters).unwrap(),
            serde_json::json!({"category": "Rings,Earrings", "sort": "price_desc"})
        );
    }

    #[test]
    fn test_price_draft_rejects_bad_input() {
        let applied = PriceRange::default();
        let mut draft = PriceDraft::from_range(applied);
        assert!(draft.is_apply_disabled(&applied));

        assert!(!draft.set_min_input("-5"));
        assert!(!draft.set_min_input("abc"));
        assert_eq!(draft.min, 0.0);

        assert!(draft.set_min_input("25"));
        assert!(draft.set_max_input("400.5"));
        assert!(!draft.is_apply_disabled(&applied));
        assert_eq!(draft.to_range(), PriceRange::new(25.0, 400.5));

        draft.sync_from(applied);
        assert!(draft.is_apply_disabled(&applied));
    }

    #[test]
    fn test_price_range_bounds_flags() {
        assert!(!PriceRange::default().has_min_bound());
        assert!(!PriceRange::default().has_max_bound());
        assert!(PriceRange::new(1.0, 999.0).has_min_bound());
        assert!(PriceRange::new(1.0, 999.0).has_max_bound());
    }
}
