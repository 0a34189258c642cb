use serde::{Deserialize, Serialize};

use camstore_catalog::{CatalogSearchParams, Category, FacetValues, Product, RawParams};
use camstore_core::Locale;

/// Query-string key selecting the display/sort locale.
pub const PARAM_LOCALE: &str = "locale";

/// Resolve the request locale; unknown or missing values use `default`.
pub fn request_locale(raw: &RawParams, default: Locale) -> Locale {
    raw.single(PARAM_LOCALE)
        .and_then(|l| l.parse().ok())
        .unwrap_or(default)
}

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
pub struct FeaturedQuery {
    pub max: Option<usize>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPageResponse<'a> {
    pub items: Vec<&'a Product>,
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub page_count: usize,
    pub locale: Locale,
    pub params: &'a CatalogSearchParams,
    /// Canonical query string for shareable URLs.
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse<'a> {
    pub items: Vec<&'a Product>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFiltersResponse<'a> {
    pub category: Category,
    pub subcategory_spec_key: Option<&'a str>,
    pub filters: Vec<FacetValues>,
}
