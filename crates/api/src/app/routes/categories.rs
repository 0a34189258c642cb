use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    response::IntoResponse,
    routing::get,
};

use camstore_catalog::{Category, facet_values};

use crate::app::{dto, errors, services::AppServices};

pub fn router() -> Router {
    Router::new().route("/:category/filters", get(get_filters))
}

pub async fn get_filters(
    Extension(services): Extension<Arc<AppServices>>,
    Path(category): Path<String>,
) -> axum::response::Response {
    let Ok(category) = category.parse::<Category>() else {
        return errors::not_found(format!("unknown category: {category}"));
    };

    let store = services.store();
    let config = store.catalog_config();

    Json(dto::CategoryFiltersResponse {
        category,
        subcategory_spec_key: config.subcategory_key_for(category),
        filters: facet_values(store.active_products(), category, config.filters_for(category)),
    })
    .into_response()
}
