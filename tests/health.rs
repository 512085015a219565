mod common;

use std::sync::Arc;

use axum::extract::State;
use common::{RecordingChannel, test_state};
use restaurant_order_api::routes::health::health_check;

#[tokio::test]
async fn health_check_returns_ok() {
    let state = test_state(Arc::new(RecordingChannel::default()));

    let response = health_check(State(state)).await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
    assert_eq!(data.catalog, "reachable");
}
