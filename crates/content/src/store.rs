use std::sync::Arc;

use camstore_catalog::{CatalogConfig, Product, find_product};
use camstore_core::ProductId;

/// Read-only view over the storefront's content.
///
/// Content is loaded wholesale and never changes for the lifetime of a store,
/// so accessors hand out borrowed slices.
pub trait ContentStore: Send + Sync {
    /// Every product, including inactive drafts.
    fn products(&self) -> &[Product];

    /// Products shown on the storefront.
    fn active_products(&self) -> &[Product];

    fn catalog_config(&self) -> &CatalogConfig;

    /// A product shown on the storefront; inactive drafts are not found.
    fn product(&self, id: &ProductId) -> Option<&Product> {
        find_product(self.active_products(), id)
    }
}

impl<S> ContentStore for Arc<S>
where
    S: ContentStore + ?Sized,
{
    fn products(&self) -> &[Product] {
        (**self).products()
    }

    fn active_products(&self) -> &[Product] {
        (**self).active_products()
    }

    fn catalog_config(&self) -> &CatalogConfig {
        (**self).catalog_config()
    }

    fn product(&self, id: &ProductId) -> Option<&Product> {
        (**self).product(id)
    }
}

/// In-memory content snapshot for tests/dev (and the backing of the file store).
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentStore {
    products: Vec<Product>,
    active: Vec<Product>,
    config: CatalogConfig,
}

impl InMemoryContentStore {
    pub fn new(products: Vec<Product>, config: CatalogConfig) -> Self {
        let active = products.iter().filter(|p| p.is_listed()).cloned().collect();
        Self {
            products,
            active,
            config,
        }
    }
}

impl ContentStore for InMemoryContentStore {
    fn products(&self) -> &[Product] {
        &self.products
    }

    fn active_products(&self) -> &[Product] {
        &self.active
    }

    fn catalog_config(&self) -> &CatalogConfig {
        &self.config
    }
}
