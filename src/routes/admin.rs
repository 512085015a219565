use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::{post, put},
};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse},
        catalog::{CreateProductRequest, DeletedProduct, UpdateProductRequest},
    },
    error::AppResult,
    middleware::auth::AdminUser,
    models::CatalogItem,
    response::ApiResponse,
    services::{auth_service, catalog_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/products", post(create_product))
        .route("/products/{id}", put(update_product).delete(delete_product))
}

#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Bearer token for the menu editor", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid email or password"),
        (status = 403, description = "Menu editing is not configured"),
    ),
    tag = "Admin"
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let Json(payload) = payload?;
    Ok(Json(auth_service::login(&state, payload).await?))
}

#[utoipa::path(
    post,
    path = "/api/admin/products",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Product published", body = ApiResponse<CatalogItem>),
        (status = 400, description = "Blank name or category, or negative price"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not an admin"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_product(
    user: AdminUser,
    State(state): State<AppState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<CatalogItem>>> {
    let Json(payload) = payload?;
    Ok(Json(catalog_service::create_product(&state, &user, payload).await?))
}

#[utoipa::path(
    put,
    path = "/api/admin/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<CatalogItem>),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_product(
    user: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<CatalogItem>>> {
    let Json(payload) = payload?;
    Ok(Json(
        catalog_service::update_product(&state, &user, &id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product removed from the menu", body = ApiResponse<DeletedProduct>),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_product(
    user: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<DeletedProduct>>> {
    Ok(Json(catalog_service::delete_product(&state, &user, &id).await?))
}
