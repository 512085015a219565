use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};

use crate::{
    dto::orders::PaymentOptionList,
    error::AppResult,
    models::OrderDraft,
    response::ApiResponse,
    services::{order_composer::OrderReceipt, order_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(checkout))
        .route("/payment-methods", get(payment_methods))
}

#[utoipa::path(
    post,
    path = "/api/checkout",
    request_body = OrderDraft,
    responses(
        (status = 200, description = "Order message built and handed to the dispatch channel", body = ApiResponse<OrderReceipt>),
        (status = 400, description = "Body is not valid JSON"),
        (status = 422, description = "Empty cart or missing checkout field"),
        (status = 503, description = "Dispatch channel unavailable; cart kept"),
    ),
    tag = "Checkout"
)]
pub async fn checkout(
    State(state): State<AppState>,
    draft: Result<Json<OrderDraft>, JsonRejection>,
) -> AppResult<Json<ApiResponse<OrderReceipt>>> {
    let Json(draft) = draft?;
    Ok(Json(order_service::checkout(&state, draft).await?))
}

#[utoipa::path(
    get,
    path = "/api/checkout/payment-methods",
    responses(
        (status = 200, description = "Accepted payment methods and their extra fields", body = ApiResponse<PaymentOptionList>)
    ),
    tag = "Checkout"
)]
pub async fn payment_methods(
    State(state): State<AppState>,
) -> Json<ApiResponse<PaymentOptionList>> {
    Json(order_service::payment_options(&state))
}
