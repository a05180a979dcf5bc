//! Catalog item as served by the items endpoint.

use serde::{Deserialize, Serialize};

/// A product or class listed in the shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(alias = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub category: String,
    /// `None` counts as active; only an explicit `false` hides the item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            category: category.into(),
            is_active: None,
            image: None,
            description: None,
        }
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.is_active = Some(active);
        self
    }

    pub fn is_listed(&self) -> bool {
        self.is_active != Some(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_shape() {
        let item: Item = serde_json::from_value(serde_json::json!({
            "_id": "64f1",
            "name": "Kettlebell",
            "price": 49.5,
            "category": "Accessories",
            "isActive": false,
        }))
        .unwrap();
        assert_eq!(item.id, "64f1");
        assert_eq!(item.price, 49.5);
        assert_eq!(item.is_active, Some(false));
        assert!(!item.is_listed());
    }

    #[test]
    fn test_missing_is_active_is_listed() {
        let item: Item = serde_json::from_str(r#"{"id":"1","price":10}"#).unwrap();
        assert!(item.is_listed());
        assert!(item.category.is_empty());
    }
}
