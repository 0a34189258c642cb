use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query, RawQuery},
    response::IntoResponse,
    routing::get,
};

use camstore_catalog::{RawParams, featured_products, query_catalog};
use camstore_core::ProductId;

use crate::app::{dto, errors, services::AppServices};

const DEFAULT_FEATURED: usize = 8;
const MAX_FEATURED: usize = 64;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products))
        .route("/featured", get(list_featured))
        .route("/:id", get(get_product))
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    RawQuery(query): RawQuery,
) -> axum::response::Response {
    let raw = RawParams::from_query_string(query.as_deref().unwrap_or_default());
    let locale = dto::request_locale(&raw, services.default_locale());

    let store = services.store();
    let params = store.catalog_config().parse_search_params(&raw);
    let page = query_catalog(store.active_products(), &params, store.catalog_config(), locale);

    tracing::debug!(
        query = ?query,
        total = page.total,
        page = params.page,
        "catalog query"
    );

    let limit = params.limit.get();
    Json(dto::ProductPageResponse {
        page_count: page.page_count(limit),
        total: page.total,
        items: page.items,
        page: params.page,
        limit,
        locale,
        query: params.to_query_string(),
        params: &params,
    })
    .into_response()
}

pub async fn list_featured(
    Extension(services): Extension<Arc<AppServices>>,
    Query(q): Query<dto::FeaturedQuery>,
) -> axum::response::Response {
    let max = q.max.unwrap_or(DEFAULT_FEATURED).min(MAX_FEATURED);
    let items = featured_products(services.store().active_products(), max);

    Json(dto::ProductListResponse { items }).into_response()
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Ok(product_id) = id.parse::<ProductId>() else {
        return errors::not_found("product not found");
    };

    match services.store().product(&product_id) {
        Some(product) => Json(product).into_response(),
        None => {
            tracing::debug!(id = %product_id, "product not found");
            errors::not_found("product not found")
        }
    }
}
