use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use camstore_core::{DomainError, DomainResult, Entity, LocalizedText, ProductId, ValueObject};

/// Top-level catalog category.
///
/// The set is closed: URLs naming anything else are treated as "no category".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Cameras,
    NvrKits,
    Storage,
    Services,
    Accessories,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Cameras,
        Category::NvrKits,
        Category::Storage,
        Category::Services,
        Category::Accessories,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Cameras => "cameras",
            Category::NvrKits => "nvr-kits",
            Category::Storage => "storage",
            Category::Services => "services",
            Category::Accessories => "accessories",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::invalid_id(format!("Category: {s:?}")))
    }
}

/// One row of a product's specification table (e.g. resolution, brand).
///
/// `key.en` is the canonical key that filter configuration refers to; the
/// other translations are display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecEntry {
    pub key: LocalizedText,
    pub value: String,
}

impl ValueObject for SpecEntry {}

impl SpecEntry {
    pub fn new(key: LocalizedText, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }

    pub fn canonical_key(&self) -> &str {
        &self.key.en
    }
}

/// A catalog product as stored in the content directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub category: Category,
    pub price: f64,
    pub currency: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub images: Vec<String>,
    pub name: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    #[serde(default)]
    pub specs: Vec<SpecEntry>,
    pub created_at: DateTime<Utc>,
    /// Rich-text body (MDX source), rendered elsewhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Product {
    /// Value of the first specification whose canonical key equals `key`.
    pub fn spec_value(&self, key: &str) -> Option<&str> {
        self.specs
            .iter()
            .find(|s| s.canonical_key() == key)
            .map(|s| s.value.as_str())
    }

    /// Whether the product is shown on the storefront.
    pub fn is_listed(&self) -> bool {
        self.active
    }

    /// Check content invariants for a product loaded from disk.
    pub fn validate(&self) -> DomainResult<()> {
        if self.id.as_str().trim().is_empty() {
            return Err(DomainError::invalid_id("product id cannot be empty"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::validation(format!(
                "price must be a finite non-negative number (got {})",
                self.price
            )));
        }
        if self.currency.trim().is_empty() {
            return Err(DomainError::validation("currency cannot be empty"));
        }
        if self.name.en.trim().is_empty() {
            return Err(DomainError::validation("english name cannot be empty"));
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn category_parses_only_known_tags() {
        assert_eq!("nvr-kits".parse::<Category>().unwrap(), Category::NvrKits);
        assert!("Cameras".parse::<Category>().is_err());
        assert!("phones".parse::<Category>().is_err());
        for c in Category::ALL {
            assert_eq!(c.as_str().parse::<Category>().unwrap(), c);
        }
    }

    #[test]
    fn spec_value_matches_canonical_key() {
        let p = with_spec(product("cam-1", Category::Cameras, 100.0, 0), "Brand", "Dahua");
        assert_eq!(p.spec_value("Brand"), Some("Dahua"));
        assert_eq!(p.spec_value("brand"), None);
        assert_eq!(p.spec_value("Resolution"), None);
    }

    #[test]
    fn validate_rejects_bad_price_and_currency() {
        let mut p = product("cam-1", Category::Cameras, 100.0, 0);
        assert!(p.validate().is_ok());

        p.price = f64::NAN;
        assert!(matches!(p.validate(), Err(DomainError::Validation(_))));

        p.price = -1.0;
        assert!(matches!(p.validate(), Err(DomainError::Validation(_))));

        p.price = 10.0;
        p.currency = " ".to_string();
        assert!(matches!(p.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn product_deserializes_from_content_json() {
        let json = r#"{
            "id": "hik-dome-4mp",
            "category": "cameras",
            "price": 189.5,
            "currency": "GEL",
            "images": ["/images/hik-dome-4mp.webp"],
            "name": {"ka": "დომ კამერა", "ru": "Купольная камера", "en": "Dome camera"},
            "specs": [{"key": {"ka": "ბრენდი", "ru": "Бренд", "en": "Brand"}, "value": "Hikvision"}],
            "createdAt": "2024-03-01T10:00:00Z"
        }"#;

        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.category, Category::Cameras);
        assert!(p.active);
        assert!(!p.featured);
        assert_eq!(p.spec_value("Brand"), Some("Hikvision"));
        assert!(p.content.is_none());
        assert!(p.validate().is_ok());
    }
}
