use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Serialize, ToSchema)]
pub struct HealthData {
    pub status: String,
    pub catalog: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "OK", body = ApiResponse<HealthData>),
    ),
    tag = "Health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthData>> {
    // A failing catalog still lets customers work on a cart they already have.
    let (status, catalog) = match state.catalog.categories().await {
        Ok(_) => ("ok", "reachable"),
        Err(err) => {
            tracing::warn!(error = %err, "catalog health check failed");
            ("degraded", "unreachable")
        }
    };

    let data = HealthData {
        status: status.to_string(),
        catalog: catalog.to_string(),
    };

    Json(ApiResponse::success(
        "Health check",
        data,
        Some(Meta::empty()),
    ))
}
