use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::catalog::{CatalogList, CategoryList},
    error::AppResult,
    models::CatalogItem,
    response::ApiResponse,
    routes::params::CatalogQuery,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_catalog))
        .route("/categories", get(list_categories))
        .route("/{id}", get(get_catalog_item))
}

#[utoipa::path(
    get,
    path = "/api/catalog",
    params(
        ("category" = Option<String>, Query, description = "Only products of this category")
    ),
    responses(
        (status = 200, description = "List products", body = ApiResponse<CatalogList>)
    ),
    tag = "Catalog"
)]
pub async fn list_catalog(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> AppResult<Json<ApiResponse<CatalogList>>> {
    Ok(Json(catalog_service::list_catalog(&state, query).await?))
}

#[utoipa::path(
    get,
    path = "/api/catalog/categories",
    responses(
        (status = 200, description = "Distinct category labels", body = ApiResponse<CategoryList>)
    ),
    tag = "Catalog"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    Ok(Json(catalog_service::list_categories(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/catalog/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<CatalogItem>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Catalog"
)]
pub async fn get_catalog_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<CatalogItem>>> {
    Ok(Json(catalog_service::get_catalog_item(&state, &id).await?))
}
