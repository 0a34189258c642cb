//! Catalog query execution: filter, sort and paginate an in-memory product list.

use serde::Serialize;

use camstore_core::{Entity, Locale, ProductId};

use crate::filter_config::CatalogConfig;
use crate::product::{Category, Product};
use crate::search_params::{CatalogSearchParams, SortOrder};

/// One page of matching products.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogPage<'a> {
    pub items: Vec<&'a Product>,
    /// Number of matches before pagination.
    pub total: usize,
}

impl CatalogPage<'_> {
    /// Number of pages needed to show `total` items `limit` at a time.
    pub fn page_count(&self, limit: u32) -> usize {
        let limit = limit.max(1) as usize;
        self.total.div_ceil(limit)
    }
}

/// Run a search request against the product collection.
///
/// Criteria are AND'ed; the values of one spec filter are OR'ed. The input is
/// never mutated and the result depends only on the arguments.
pub fn query_catalog<'a>(
    products: &'a [Product],
    params: &CatalogSearchParams,
    config: &CatalogConfig,
    locale: Locale,
) -> CatalogPage<'a> {
    let matcher = Matcher::new(params, config);

    let mut matches: Vec<&Product> = products.iter().filter(|p| matcher.matches(p)).collect();
    sort_products(&mut matches, params.sort, locale);

    let total = matches.len();
    let items = matches
        .into_iter()
        .skip(params.offset())
        .take(params.limit.get() as usize)
        .collect();

    CatalogPage { items, total }
}

/// Criteria with every configuration lookup already resolved.
struct Matcher<'p> {
    category: Option<Category>,
    subcategory: Option<(&'p str, &'p str)>,
    specs: Vec<(&'p str, &'p [String])>,
    min_price: Option<f64>,
    max_price: Option<f64>,
    needle: Option<String>,
}

impl<'p> Matcher<'p> {
    fn new(params: &'p CatalogSearchParams, config: &'p CatalogConfig) -> Self {
        let category = params.category;

        // Lookups need a category; criteria that cannot be resolved are ignored.
        let subcategory = category
            .and_then(|c| config.subcategory_key_for(c))
            .zip(params.subcategory.as_deref());

        let specs = match category {
            Some(c) => params
                .specs
                .iter()
                .filter_map(|(id, values)| Some((config.spec_key_for(c, id)?, values.as_slice())))
                .collect(),
            None => Vec::new(),
        };

        Self {
            category,
            subcategory,
            specs,
            min_price: params.min_price,
            max_price: params.max_price,
            needle: params.search.as_deref().map(str::to_lowercase),
        }
    }

    fn matches(&self, product: &Product) -> bool {
        if self.category.is_some_and(|c| product.category != c) {
            return false;
        }

        if let Some((key, expected)) = self.subcategory {
            if product.spec_value(key) != Some(expected) {
                return false;
            }
        }

        let specs_match = self.specs.iter().all(|(key, accepted)| {
            product
                .spec_value(key)
                .is_some_and(|v| accepted.iter().any(|a| a == v))
        });
        if !specs_match {
            return false;
        }

        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }

        match &self.needle {
            Some(needle) => product
                .name
                .iter()
                .any(|name| name.to_lowercase().contains(needle.as_str())),
            None => true,
        }
    }
}

/// Stable sort; equal keys keep their input order.
fn sort_products(products: &mut [&Product], order: SortOrder, locale: Locale) {
    match order {
        SortOrder::Newest => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::PriceAsc => products.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortOrder::PriceDesc => products.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortOrder::NameAsc => products.sort_by_cached_key(|p| {
            (p.name.get(locale).to_lowercase(), p.id.clone())
        }),
    }
}

/// Featured, listed products, newest first.
pub fn featured_products(products: &[Product], max: usize) -> Vec<&Product> {
    let mut featured: Vec<&Product> = products
        .iter()
        .filter(|p| p.featured && p.is_listed())
        .collect();
    featured.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    featured.truncate(max);
    featured
}

pub fn find_product<'a>(products: &'a [Product], id: &ProductId) -> Option<&'a Product> {
    products.iter().find(|p| p.id() == id)
}
