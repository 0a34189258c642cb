//! Content directory loader.
//!
//! Layout:
//!
//! ```text
//! <root>/catalog.json        category → filter configuration
//! <root>/products/*.json     one product per file
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use camstore_catalog::{CatalogConfig, Product};

use crate::error::ContentError;
use crate::store::{ContentStore, InMemoryContentStore};

pub const CATALOG_FILE: &str = "catalog.json";
pub const PRODUCTS_DIR: &str = "products";

/// Content store backed by a directory of JSON files, read once at load time.
#[derive(Debug, Clone)]
pub struct FileContentStore {
    root: PathBuf,
    snapshot: InMemoryContentStore,
}

impl FileContentStore {
    /// Read the whole content directory.
    ///
    /// Product files that fail to parse or validate are skipped with a warning
    /// so one bad edit does not take the storefront down. A missing products
    /// directory is an error; a missing catalog configuration is not.
    pub fn load(root: impl AsRef<Path>) -> Result<Self, ContentError> {
        let root = root.as_ref().to_path_buf();
        let config = load_catalog_config(&root.join(CATALOG_FILE))?;
        let products = load_products(&root.join(PRODUCTS_DIR))?;

        info!(
            root = %root.display(),
            products = products.len(),
            "content loaded"
        );

        Ok(Self {
            root,
            snapshot: InMemoryContentStore::new(products, config),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ContentStore for FileContentStore {
    fn products(&self) -> &[Product] {
        self.snapshot.products()
    }

    fn active_products(&self) -> &[Product] {
        self.snapshot.active_products()
    }

    fn catalog_config(&self) -> &CatalogConfig {
        self.snapshot.catalog_config()
    }
}

fn load_catalog_config(path: &Path) -> Result<CatalogConfig, ContentError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "catalog configuration missing; no filters available");
            return Ok(CatalogConfig::default());
        }
        Err(e) => return Err(ContentError::io(path, e)),
    };

    serde_json::from_str(&raw).map_err(|e| ContentError::parse(path, e))
}

fn load_products(dir: &Path) -> Result<Vec<Product>, ContentError> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| ContentError::io(dir, e))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut products: Vec<Product> = Vec::with_capacity(paths.len());
    for path in paths {
        match read_product(&path) {
            Ok(product) => {
                if products.iter().any(|p| p.id == product.id) {
                    warn!(path = %path.display(), id = %product.id, "duplicate product id; skipping");
                    continue;
                }
                products.push(product);
            }
            Err(err) => {
                warn!(%err, "skipping product file");
            }
        }
    }

    Ok(products)
}

fn read_product(path: &Path) -> Result<Product, ContentError> {
    let raw = fs::read_to_string(path).map_err(|e| ContentError::io(path, e))?;
    let product: Product = serde_json::from_str(&raw).map_err(|e| ContentError::parse(path, e))?;
    product
        .validate()
        .map_err(|e| ContentError::invalid(path, e))?;
    Ok(product)
}
