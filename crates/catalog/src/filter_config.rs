//! Catalog configuration: which facets each category exposes and which
//! specification key each facet reads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use camstore_core::LocalizedText;

use crate::product::Category;

/// A UI-exposed facet bound to one specification key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterFieldConfig {
    /// Identifier used as the query-string key (e.g. `brand`).
    pub id: String,
    /// Canonical specification key the facet matches against.
    pub spec_key: String,
    pub label: LocalizedText,
    #[serde(default)]
    pub priority: u32,
    #[serde(default)]
    pub default_expanded: bool,
}

/// Per-category slice of the catalog configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryConfig {
    #[serde(default)]
    pub filters: Vec<FilterFieldConfig>,
    /// Specification key that a `subcategory` URL parameter is matched against.
    #[serde(default)]
    pub subcategory_spec_key: Option<String>,
}

/// Lookup table `category → filter id → specification key`.
///
/// Loaded once from the content directory and treated as immutable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogConfig {
    categories: BTreeMap<Category, CategoryConfig>,
}

impl CatalogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: Category, config: CategoryConfig) -> Self {
        self.categories.insert(category, config);
        self
    }

    pub fn category(&self, category: Category) -> Option<&CategoryConfig> {
        self.categories.get(&category)
    }

    /// Filters declared for `category`, in declaration order.
    pub fn filters_for(&self, category: Category) -> &[FilterFieldConfig] {
        self.categories
            .get(&category)
            .map(|c| c.filters.as_slice())
            .unwrap_or(&[])
    }

    pub fn spec_key_for(&self, category: Category, filter_id: &str) -> Option<&str> {
        self.filters_for(category)
            .iter()
            .find(|f| f.id == filter_id)
            .map(|f| f.spec_key.as_str())
    }

    pub fn subcategory_key_for(&self, category: Category) -> Option<&str> {
        self.categories
            .get(&category)
            .and_then(|c| c.subcategory_spec_key.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brand_filter() -> FilterFieldConfig {
        FilterFieldConfig {
            id: "brand".to_string(),
            spec_key: "Brand".to_string(),
            label: LocalizedText::new("ბრენდი", "Бренд", "Brand"),
            priority: 1,
            default_expanded: true,
        }
    }

    #[test]
    fn lookups_resolve_through_category() {
        let config = CatalogConfig::new().with_category(
            Category::Cameras,
            CategoryConfig {
                filters: vec![brand_filter()],
                subcategory_spec_key: Some("Type".to_string()),
            },
        );

        assert_eq!(config.spec_key_for(Category::Cameras, "brand"), Some("Brand"));
        assert_eq!(config.spec_key_for(Category::Cameras, "lens"), None);
        assert_eq!(config.spec_key_for(Category::Storage, "brand"), None);
        assert_eq!(config.subcategory_key_for(Category::Cameras), Some("Type"));
        assert!(config.filters_for(Category::Services).is_empty());
    }

    #[test]
    fn deserializes_keyed_by_category_tag() {
        let json = r#"{
            "cameras": {
                "subcategorySpecKey": "Type",
                "filters": [
                    {"id": "brand", "specKey": "Brand", "label": {"en": "Brand"}, "priority": 1, "defaultExpanded": true}
                ]
            },
            "storage": {}
        }"#;

        let config: CatalogConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.filters_for(Category::Cameras).len(), 1);
        assert!(config.filters_for(Category::Cameras)[0].default_expanded);
        assert!(config.category(Category::Storage).is_some());
        assert!(config.filters_for(Category::Storage).is_empty());
    }
}
