//! URL query parameters → typed catalog search request.
//!
//! Every field has its own total parser: malformed or missing input falls back
//! to the field's default instead of failing. Shoppers craft and bookmark these
//! URLs by hand, so rejecting them would only produce broken pages.

use core::str::FromStr;
use std::collections::BTreeMap;

use serde::Serialize;

use camstore_core::DomainError;

use crate::filter_config::{CatalogConfig, FilterFieldConfig};
use crate::product::Category;

pub const PARAM_CATEGORY: &str = "category";
pub const PARAM_SUBCATEGORY: &str = "subcategory";
pub const PARAM_SEARCH: &str = "search";
pub const PARAM_MIN_PRICE: &str = "minPrice";
pub const PARAM_MAX_PRICE: &str = "maxPrice";
pub const PARAM_SORT: &str = "sort";
pub const PARAM_PAGE: &str = "page";
pub const PARAM_LIMIT: &str = "limit";

/// Raw value of one query-string key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawParam {
    Single(String),
    /// The key appeared more than once. Never consulted by the parser.
    Many(Vec<String>),
}

/// Raw query parameters as decoded from a URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams(BTreeMap<String, RawParam>);

impl RawParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an `application/x-www-form-urlencoded` query string.
    ///
    /// Undecodable input yields an empty parameter set.
    pub fn from_query_string(query: &str) -> Self {
        serde_urlencoded::from_str::<Vec<(String, String)>>(query)
            .map(Self::from_iter)
            .unwrap_or_default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: RawParam) {
        self.0.insert(key.into(), value);
    }

    /// Append a value, promoting the key to [`RawParam::Many`] on repetition.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        match self.0.entry(key.into()) {
            std::collections::btree_map::Entry::Vacant(e) => {
                e.insert(RawParam::Single(value));
            }
            std::collections::btree_map::Entry::Occupied(mut e) => {
                let slot = e.get_mut();
                *slot = match std::mem::replace(slot, RawParam::Many(Vec::new())) {
                    RawParam::Single(first) => RawParam::Many(vec![first, value]),
                    RawParam::Many(mut all) => {
                        all.push(value);
                        RawParam::Many(all)
                    }
                };
            }
        }
    }

    /// The value of `key` when it was given exactly once.
    pub fn single(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(RawParam::Single(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&RawParam> {
        self.0.get(key)
    }
}

impl<K, V> FromIterator<(K, V)> for RawParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = RawParams::new();
        for (k, v) in iter {
            params.push(k, v);
        }
        params
    }
}

/// Result ordering for catalog listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    NameAsc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::Newest,
        SortOrder::PriceAsc,
        SortOrder::PriceDesc,
        SortOrder::NameAsc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::PriceAsc => "price-asc",
            SortOrder::PriceDesc => "price-desc",
            SortOrder::NameAsc => "name-asc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOrder::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| DomainError::invalid_id(format!("SortOrder: {s:?}")))
    }
}

/// Number of products per page; one of [`PageSize::ALLOWED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PageSize(u32);

impl PageSize {
    pub const ALLOWED: [u32; 3] = [16, 32, 64];
    pub const DEFAULT: PageSize = PageSize(16);

    pub fn from_value(value: i64) -> Option<Self> {
        Self::ALLOWED
            .into_iter()
            .find(|&allowed| i64::from(allowed) == value)
            .map(PageSize)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A validated catalog search request.
///
/// Every field is either absent or within its domain: `page >= 1`, `limit` is
/// an allowed page size, `category` is a known tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSearchParams {
    pub category: Option<Category>,
    pub subcategory: Option<String>,
    /// Filter id → accepted values (OR'd), in URL order.
    pub specs: BTreeMap<String, Vec<String>>,
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: SortOrder,
    pub page: u32,
    pub limit: PageSize,
}

impl Default for CatalogSearchParams {
    fn default() -> Self {
        Self {
            category: None,
            subcategory: None,
            specs: BTreeMap::new(),
            search: None,
            min_price: None,
            max_price: None,
            sort: SortOrder::default(),
            page: 1,
            limit: PageSize::default(),
        }
    }
}

impl CatalogSearchParams {
    /// Zero-based index of the first item on the requested page.
    pub fn offset(&self) -> usize {
        (self.page.max(1) as usize - 1).saturating_mul(self.limit.get() as usize)
    }

    /// Encode back into query pairs, omitting fields at their default.
    ///
    /// Parsing the pairs with the same filter configuration reproduces `self`.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = self.category {
            pairs.push((PARAM_CATEGORY.to_string(), category.as_str().to_string()));
        }
        if let Some(sub) = &self.subcategory {
            pairs.push((PARAM_SUBCATEGORY.to_string(), sub.clone()));
        }
        for (filter_id, values) in &self.specs {
            if !values.is_empty() {
                pairs.push((filter_id.clone(), values.join(",")));
            }
        }
        if let Some(search) = &self.search {
            pairs.push((PARAM_SEARCH.to_string(), search.clone()));
        }
        if let Some(min) = self.min_price {
            pairs.push((PARAM_MIN_PRICE.to_string(), min.to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push((PARAM_MAX_PRICE.to_string(), max.to_string()));
        }
        if self.sort != SortOrder::default() {
            pairs.push((PARAM_SORT.to_string(), self.sort.as_str().to_string()));
        }
        if self.page != 1 {
            pairs.push((PARAM_PAGE.to_string(), self.page.to_string()));
        }
        if self.limit != PageSize::default() {
            pairs.push((PARAM_LIMIT.to_string(), self.limit.get().to_string()));
        }
        pairs
    }

    /// Canonical, form-urlencoded query string (no leading `?`).
    pub fn to_query_string(&self) -> String {
        // Serializing a sequence of string pairs cannot fail.
        serde_urlencoded::to_string(self.to_query_pairs()).unwrap_or_default()
    }
}

/// Parse raw query parameters given the filters of the active category.
pub fn parse_search_params(raw: &RawParams, filters: &[FilterFieldConfig]) -> CatalogSearchParams {
    let specs = filters
        .iter()
        .filter_map(|f| {
            let values = parse_filter_values(raw.single(&f.id)?);
            (!values.is_empty()).then(|| (f.id.clone(), values))
        })
        .collect();

    CatalogSearchParams {
        category: parse_category(raw),
        subcategory: parse_subcategory(raw.single(PARAM_SUBCATEGORY)),
        specs,
        search: parse_search(raw.single(PARAM_SEARCH)),
        min_price: parse_price(raw.single(PARAM_MIN_PRICE)),
        max_price: parse_price(raw.single(PARAM_MAX_PRICE)),
        sort: parse_sort(raw.single(PARAM_SORT)),
        page: parse_page(raw.single(PARAM_PAGE)),
        limit: parse_limit(raw.single(PARAM_LIMIT)),
    }
}

impl CatalogConfig {
    /// Resolve the category, then parse with that category's filters.
    pub fn parse_search_params(&self, raw: &RawParams) -> CatalogSearchParams {
        let filters = parse_category(raw)
            .map(|c| self.filters_for(c))
            .unwrap_or(&[]);
        parse_search_params(raw, filters)
    }
}

pub fn parse_category(raw: &RawParams) -> Option<Category> {
    raw.single(PARAM_CATEGORY)?.parse().ok()
}

fn parse_subcategory(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Split a comma-separated facet value list; blanks are dropped, duplicates kept.
pub fn parse_filter_values(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_sort(value: Option<&str>) -> SortOrder {
    value.and_then(|v| v.parse().ok()).unwrap_or_default()
}

fn parse_page(value: Option<&str>) -> u32 {
    match value.and_then(leading_integer) {
        Some(n) if n >= 1 => u32::try_from(n).unwrap_or(u32::MAX),
        _ => 1,
    }
}

fn parse_limit(value: Option<&str>) -> PageSize {
    value
        .and_then(leading_integer)
        .and_then(PageSize::from_value)
        .unwrap_or_default()
}

/// Prices follow the same prefix rule as page numbers: `"100abc"` → 100.
fn parse_price(value: Option<&str>) -> Option<f64> {
    value.and_then(leading_float).filter(|p| p.is_finite())
}

fn parse_search(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Integer prefix of `s` (`"12abc"` → 12), saturating on overflow.
fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits: &str = &digits[..digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len())];
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

/// Decimal prefix of `s` (`"49.5 GEL"` → 49.5, `"1e3x"` → 1000).
fn leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'-' | b'+')));
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - end - 1;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'-' | b'+')));
        let exp_end = digits_from(end + 1 + sign);
        if exp_end > end + 1 + sign {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use camstore_core::LocalizedText;

    fn filter(id: &str, spec_key: &str) -> FilterFieldConfig {
        FilterFieldConfig {
            id: id.to_string(),
            spec_key: spec_key.to_string(),
            label: LocalizedText::uniform(spec_key),
            priority: 0,
            default_expanded: false,
        }
    }

    fn raw(pairs: &[(&str, &str)]) -> RawParams {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    #[test]
    fn empty_input_yields_defaults() {
        let params = parse_search_params(&RawParams::new(), &[]);
        assert_eq!(params, CatalogSearchParams::default());
        assert_eq!(params.page, 1);
        assert_eq!(params.limit.get(), 16);
        assert_eq!(params.sort, SortOrder::Newest);
    }

    #[test]
    fn unknown_sort_falls_back_to_newest() {
        let params = parse_search_params(&raw(&[("sort", "bogus")]), &[]);
        assert_eq!(params.sort, SortOrder::Newest);

        let params = parse_search_params(&raw(&[("sort", "price-desc")]), &[]);
        assert_eq!(params.sort, SortOrder::PriceDesc);
    }

    #[test]
    fn filter_values_are_split_trimmed_and_blank_dropped() {
        let filters = [filter("brand", "Brand")];
        let params = parse_search_params(&raw(&[("brand", "Hikvision, ,Dahua")]), &filters);
        assert_eq!(
            params.specs.get("brand"),
            Some(&vec!["Hikvision".to_string(), "Dahua".to_string()])
        );
    }

    #[test]
    fn filter_values_keep_duplicates_and_order() {
        let filters = [filter("brand", "Brand")];
        let params = parse_search_params(&raw(&[("brand", "b,a,b")]), &filters);
        assert_eq!(params.specs["brand"], vec!["b", "a", "b"]);
    }

    #[test]
    fn filter_with_only_blanks_is_omitted() {
        let filters = [filter("brand", "Brand")];
        let params = parse_search_params(&raw(&[("brand", " , ,")]), &filters);
        assert!(params.specs.is_empty());
    }

    #[test]
    fn undeclared_filter_keys_are_ignored() {
        let filters = [filter("brand", "Brand")];
        let params = parse_search_params(&raw(&[("lens", "2.8mm")]), &filters);
        assert!(params.specs.is_empty());
    }

    #[test]
    fn category_outside_closed_set_is_absent() {
        assert_eq!(parse_category(&raw(&[("category", "cameras")])), Some(Category::Cameras));
        assert_eq!(parse_category(&raw(&[("category", "drones")])), None);
        assert_eq!(parse_category(&raw(&[("category", "")])), None);
    }

    #[test]
    fn subcategory_passes_through_verbatim() {
        let params = parse_search_params(&raw(&[("subcategory", " Dome ")]), &[]);
        assert_eq!(params.subcategory.as_deref(), Some(" Dome "));

        let params = parse_search_params(&raw(&[("subcategory", "")]), &[]);
        assert_eq!(params.subcategory, None);
    }

    #[test]
    fn page_collapses_to_one_when_invalid() {
        for input in ["abc", "0", "-3", "", "  "] {
            let params = parse_search_params(&raw(&[("page", input)]), &[]);
            assert_eq!(params.page, 1, "input {input:?}");
        }
        assert_eq!(parse_search_params(&raw(&[("page", "7")]), &[]).page, 7);
        assert_eq!(parse_search_params(&raw(&[("page", "12abc")]), &[]).page, 12);
        assert_eq!(
            parse_search_params(&raw(&[("page", "99999999999999999999")]), &[]).page,
            u32::MAX
        );
    }

    #[test]
    fn limit_only_accepts_allowed_page_sizes() {
        assert_eq!(parse_search_params(&raw(&[("limit", "64")]), &[]).limit.get(), 64);
        assert_eq!(parse_search_params(&raw(&[("limit", "32")]), &[]).limit.get(), 32);
        assert_eq!(parse_search_params(&raw(&[("limit", "20")]), &[]).limit.get(), 16);
        assert_eq!(parse_search_params(&raw(&[("limit", "x")]), &[]).limit.get(), 16);
    }

    #[test]
    fn prices_kept_only_when_finite() {
        let params = parse_search_params(&raw(&[("minPrice", "100"), ("maxPrice", "49.5")]), &[]);
        assert_eq!(params.min_price, Some(100.0));
        assert_eq!(params.max_price, Some(49.5));

        for input in ["abc", "NaN", "inf", "-infinity", "", ".", "-", "1e999"] {
            let params = parse_search_params(&raw(&[("minPrice", input)]), &[]);
            assert_eq!(params.min_price, None, "input {input:?}");
        }
    }

    #[test]
    fn prices_use_numeric_prefix_like_page() {
        for (input, expected) in [
            ("100abc", 100.0),
            (" 49.5 GEL", 49.5),
            ("2.", 2.0),
            (".5", 0.5),
            ("-3", -3.0),
            ("1e3x", 1000.0),
            ("7e", 7.0),
            ("7e+", 7.0),
        ] {
            let params = parse_search_params(&raw(&[("maxPrice", input)]), &[]);
            assert_eq!(params.max_price, Some(expected), "input {input:?}");
        }

        let params = parse_search_params(&raw(&[("page", "2.9"), ("minPrice", "2.9")]), &[]);
        assert_eq!(params.page, 2);
        assert_eq!(params.min_price, Some(2.9));
    }

    #[test]
    fn search_is_trimmed_and_blank_dropped() {
        let params = parse_search_params(&raw(&[("search", "  dome  ")]), &[]);
        assert_eq!(params.search.as_deref(), Some("dome"));

        let params = parse_search_params(&raw(&[("search", "   ")]), &[]);
        assert_eq!(params.search, None);
    }

    #[test]
    fn repeated_keys_are_not_consulted() {
        let params = parse_search_params(
            &RawParams::from_query_string("sort=price-asc&sort=price-desc&page=3"),
            &[],
        );
        assert_eq!(params.sort, SortOrder::Newest);
        assert_eq!(params.page, 3);
    }

    #[test]
    fn mixed_input_resolves_each_field_independently() {
        let params = parse_search_params(
            &raw(&[
                ("category", "cameras"),
                ("minPrice", "100"),
                ("limit", "64"),
                ("page", "abc"),
            ]),
            &[],
        );
        assert_eq!(params.category, Some(Category::Cameras));
        assert_eq!(params.min_price, Some(100.0));
        assert_eq!(params.limit.get(), 64);
        assert_eq!(params.page, 1);
    }

    #[test]
    fn catalog_config_uses_filters_of_parsed_category() {
        use crate::filter_config::CategoryConfig;

        let config = CatalogConfig::new().with_category(
            Category::Cameras,
            CategoryConfig {
                filters: vec![filter("brand", "Brand")],
                subcategory_spec_key: None,
            },
        );

        let params = config.parse_search_params(&raw(&[("category", "cameras"), ("brand", "Dahua")]));
        assert_eq!(params.specs["brand"], vec!["Dahua"]);

        let params = config.parse_search_params(&raw(&[("category", "storage"), ("brand", "Dahua")]));
        assert!(params.specs.is_empty());

        let params = config.parse_search_params(&raw(&[("brand", "Dahua")]));
        assert!(params.specs.is_empty());
    }

    #[test]
    fn query_string_omits_defaults() {
        assert_eq!(CatalogSearchParams::default().to_query_string(), "");

        let params = CatalogSearchParams {
            category: Some(Category::NvrKits),
            sort: SortOrder::PriceAsc,
            page: 2,
            ..Default::default()
        };
        assert_eq!(params.to_query_string(), "category=nvr-kits&sort=price-asc&page=2");
    }

    #[test]
    fn offset_follows_page_and_limit() {
        let params = CatalogSearchParams {
            page: 3,
            limit: PageSize::from_value(32).unwrap(),
            ..Default::default()
        };
        assert_eq!(params.offset(), 64);
        assert_eq!(CatalogSearchParams::default().offset(), 0);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::collection::{btree_map, vec};
        use proptest::prelude::*;

        const FILTER_IDS: [&str; 3] = ["brand", "resolution", "lens"];

        fn filters() -> Vec<FilterFieldConfig> {
            FILTER_IDS.iter().map(|id| filter(id, id)).collect()
        }

        fn any_key() -> impl Strategy<Value = String> {
            prop_oneof![
                Just(PARAM_CATEGORY.to_string()),
                Just(PARAM_SUBCATEGORY.to_string()),
                Just(PARAM_SEARCH.to_string()),
                Just(PARAM_MIN_PRICE.to_string()),
                Just(PARAM_MAX_PRICE.to_string()),
                Just(PARAM_SORT.to_string()),
                Just(PARAM_PAGE.to_string()),
                Just(PARAM_LIMIT.to_string()),
                Just("brand".to_string()),
                "[a-z]{1,8}",
            ]
        }

        fn any_raw_param() -> impl Strategy<Value = RawParam> {
            prop_oneof![
                ".*".prop_map(RawParam::Single),
                "-?[0-9]{0,12}".prop_map(RawParam::Single),
                vec(".*", 0..3).prop_map(RawParam::Many),
            ]
        }

        fn reachable_params() -> impl Strategy<Value = CatalogSearchParams> {
            let value = "[A-Za-z0-9]([A-Za-z0-9 .]{0,8}[A-Za-z0-9])?";
            (
                proptest::option::of(proptest::sample::select(Category::ALL.to_vec())),
                proptest::option::of("[a-z0-9 -]{1,12}"),
                btree_map(
                    proptest::sample::select(FILTER_IDS.to_vec()).prop_map(str::to_string),
                    vec(value, 1..4),
                    0..3,
                ),
                proptest::option::of("[a-zа-я]([a-zа-я ]{0,10}[a-zа-я])?"),
                proptest::option::of(-1.0e9f64..1.0e9f64),
                proptest::option::of(-1.0e9f64..1.0e9f64),
                proptest::sample::select(SortOrder::ALL.to_vec()),
                1u32..=u32::MAX,
                proptest::sample::select(PageSize::ALLOWED.to_vec()),
            )
                .prop_map(
                    |(category, subcategory, specs, search, min_price, max_price, sort, page, limit)| {
                        CatalogSearchParams {
                            category,
                            subcategory,
                            specs,
                            search,
                            min_price,
                            max_price,
                            sort,
                            page,
                            limit: PageSize::from_value(i64::from(limit)).unwrap(),
                        }
                    },
                )
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: parsing is total and every field stays inside its domain.
            #[test]
            fn parsing_is_total_and_in_domain(
                entries in btree_map(any_key(), any_raw_param(), 0..10)
            ) {
                let mut raw = RawParams::new();
                for (k, v) in entries {
                    raw.insert(k, v);
                }

                let params = parse_search_params(&raw, &filters());

                prop_assert!(params.page >= 1);
                prop_assert!(PageSize::ALLOWED.contains(&params.limit.get()));
                prop_assert!(SortOrder::ALL.contains(&params.sort));
                if let Some(c) = params.category {
                    prop_assert!(Category::ALL.contains(&c));
                }
                prop_assert!(params.min_price.is_none_or(f64::is_finite));
                prop_assert!(params.max_price.is_none_or(f64::is_finite));
                prop_assert!(params.search.as_deref().is_none_or(|s| !s.is_empty() && s.trim() == s));
                for values in params.specs.values() {
                    prop_assert!(!values.is_empty());
                    prop_assert!(values.iter().all(|v| !v.is_empty() && v.trim() == v));
                }
            }

            /// Property: serializing to a query string and re-parsing is the identity.
            #[test]
            fn query_string_round_trips(params in reachable_params()) {
                let query = params.to_query_string();
                let reparsed = parse_search_params(&RawParams::from_query_string(&query), &filters());
                prop_assert_eq!(reparsed, params);
            }
        }
    }
}
