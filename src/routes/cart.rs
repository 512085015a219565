use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::{delete, get, put},
};

use crate::{
    dto::cart::{AddToCartRequest, CartView, UpdateNoteRequest, UpdateQuantityRequest},
    error::AppResult,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cart_list).post(add_to_cart).delete(clear_cart))
        .route("/{product_id}", delete(remove_from_cart))
        .route("/{product_id}/quantity", put(update_quantity))
        .route("/{product_id}/note", put(update_note))
}

#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Current cart with totals", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn cart_list(State(state): State<AppState>) -> AppResult<Json<ApiResponse<CartView>>> {
    Ok(Json(cart_service::list_cart(&state).await?))
}

#[utoipa::path(
    post,
    path = "/api/cart",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Add one unit of a product", body = ApiResponse<CartView>),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Product not in catalog"),
    ),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    payload: Result<Json<AddToCartRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let Json(payload) = payload?;
    Ok(Json(cart_service::add_to_cart(&state, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    responses(
        (status = 200, description = "Cart emptied", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn clear_cart(State(state): State<AppState>) -> AppResult<Json<ApiResponse<CartView>>> {
    Ok(Json(cart_service::clear_cart(&state).await?))
}

#[utoipa::path(
    delete,
    path = "/api/cart/{product_id}",
    params(
        ("product_id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Removed, or already absent", body = ApiResponse<CartView>),
    ),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    Ok(Json(cart_service::remove_from_cart(&state, &product_id).await?))
}

#[utoipa::path(
    put,
    path = "/api/cart/{product_id}/quantity",
    params(
        ("product_id" = String, Path, description = "Product ID")
    ),
    request_body = UpdateQuantityRequest,
    responses(
        (status = 200, description = "Quantity replaced; zero or less removes the item", body = ApiResponse<CartView>),
    ),
    tag = "Cart"
)]
pub async fn update_quantity(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    payload: Result<Json<UpdateQuantityRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let Json(payload) = payload?;
    Ok(Json(
        cart_service::update_quantity(&state, &product_id, payload).await?,
    ))
}

#[utoipa::path(
    put,
    path = "/api/cart/{product_id}/note",
    params(
        ("product_id" = String, Path, description = "Product ID")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note replaced", body = ApiResponse<CartView>),
    ),
    tag = "Cart"
)]
pub async fn update_note(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    payload: Result<Json<UpdateNoteRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let Json(payload) = payload?;
    Ok(Json(cart_service::update_note(&state, &product_id, payload).await?))
}
