//! Catalog domain module.
//!
//! This crate contains the storefront's catalog rules: the product model, the
//! per-category filter configuration, URL parameter parsing and query
//! execution. Everything here is deterministic (no IO, no HTTP, no storage).

pub mod facets;
pub mod filter_config;
pub mod product;
pub mod query;
pub mod search_params;

pub use facets::{FacetValue, FacetValues, facet_values};
pub use filter_config::{CatalogConfig, CategoryConfig, FilterFieldConfig};
pub use product::{Category, Product, SpecEntry};
pub use query::{CatalogPage, featured_products, find_product, query_catalog};
pub use search_params::{
    CatalogSearchParams, PageSize, RawParam, RawParams, SortOrder, parse_category,
    parse_filter_values, parse_search_params,
};
