//! Selectable facet values for the catalog filter sidebar.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::filter_config::FilterFieldConfig;
use crate::product::{Category, Product};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetValue {
    pub value: String,
    pub count: usize,
}

/// A filter together with the values products of its category carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetValues {
    #[serde(flatten)]
    pub filter: FilterFieldConfig,
    pub values: Vec<FacetValue>,
}

/// Distinct specification values per filter among `category`'s products.
///
/// Filters come out ordered by priority, then id; values are sorted and
/// counted.
pub fn facet_values(
    products: &[Product],
    category: Category,
    filters: &[FilterFieldConfig],
) -> Vec<FacetValues> {
    let mut ordered: Vec<&FilterFieldConfig> = filters.iter().collect();
    ordered.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.id.cmp(&b.id)));

    ordered
        .into_iter()
        .map(|filter| {
            let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
            for value in products
                .iter()
                .filter(|p| p.category == category)
                .filter_map(|p| p.spec_value(&filter.spec_key))
            {
                *counts.entry(value).or_default() += 1;
            }

            FacetValues {
                filter: filter.clone(),
                values: counts
                    .into_iter()
                    .map(|(value, count)| FacetValue {
                        value: value.to_string(),
                        count,
                    })
                    .collect(),
            }
        })
        .collect()
}
