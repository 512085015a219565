mod common;

use std::sync::Arc;

use axum::{
    Router,
    http::{Method, StatusCode},
};
use chrono::{Duration, Utc};
use common::{
    ADMIN_EMAIL, ADMIN_PASSWORD, JWT_SECRET, RecordingChannel, admin_state, send, send_as,
    test_state,
};
use jsonwebtoken::{EncodingKey, Header, encode};
use restaurant_order_api::{dto::auth::Claims, routes::create_app};
use serde_json::{Value, json};

async fn login(app: &Router) -> anyhow::Result<String> {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/admin/login",
        Some(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    Ok(body["data"]["token"].as_str().unwrap_or_default().to_string())
}

fn fries() -> Value {
    json!({
        "name": "Fries",
        "description": "Crispy potato fries",
        "price": "14.50",
        "category": "Sides"
    })
}

#[tokio::test]
async fn admin_publishes_edits_and_removes_a_product() -> anyhow::Result<()> {
    let app = create_app(admin_state(Arc::new(RecordingChannel::default()))?);
    let token = login(&app).await?;
    assert!(token.starts_with("Bearer "));

    let (status, body) = send_as(
        &app,
        Method::POST,
        "/api/admin/products",
        Some(token.as_str()),
        Some(fries()),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["price"], "14.50");
    assert_eq!(body["data"]["image"], "");
    let id = body["data"]["id"].as_str().unwrap_or_default().to_string();

    let (_, body) = send(&app, Method::GET, "/api/catalog/categories", None).await?;
    assert_eq!(body["data"]["items"], json!(["Burgers", "Drinks", "Sides"]));

    let (status, body) = send_as(
        &app,
        Method::PUT,
        &format!("/api/admin/products/{id}"),
        Some(token.as_str()),
        Some(json!({ "price": "15.00", "name": "  Large Fries " })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Large Fries");
    assert_eq!(body["data"]["price"], "15.00");
    assert_eq!(body["data"]["category"], "Sides");

    let (status, _) = send_as(
        &app,
        Method::DELETE,
        &format!("/api/admin/products/{id}"),
        Some(token.as_str()),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, &format!("/api/catalog/{id}"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_as(
        &app,
        Method::DELETE,
        &format!("/api/admin/products/{id}"),
        Some(token.as_str()),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

// Lines in the cart are copies; a later price change only affects new adds.
#[tokio::test]
async fn price_edit_does_not_touch_items_in_the_cart() -> anyhow::Result<()> {
    let app = create_app(admin_state(Arc::new(RecordingChannel::default()))?);
    let token = login(&app).await?;
    send(&app, Method::POST, "/api/cart", Some(json!({ "product_id": "a" }))).await?;

    let (status, _) = send_as(
        &app,
        Method::PUT,
        "/api/admin/products/a",
        Some(token.as_str()),
        Some(json!({ "price": "99.90" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/api/cart", None).await?;
    assert_eq!(body["data"]["total_price"], "25.90");
    Ok(())
}

#[tokio::test]
async fn product_routes_require_a_token() -> anyhow::Result<()> {
    let app = create_app(admin_state(Arc::new(RecordingChannel::default()))?);

    let (status, body) = send(&app, Method::POST, "/api/admin/products", Some(fries())).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthorized");

    let (status, _) = send_as(
        &app,
        Method::DELETE,
        "/api/admin/products/a",
        Some("Bearer not-a-token"),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = send(&app, Method::GET, "/api/catalog/a", None).await?;
    assert_eq!(body["data"]["name"], "Classic Burger");
    Ok(())
}

#[tokio::test]
async fn token_without_admin_role_is_forbidden() -> anyhow::Result<()> {
    let app = create_app(admin_state(Arc::new(RecordingChannel::default()))?);
    let claims = Claims {
        sub: "courier@burgerhouse.test".into(),
        role: "staff".into(),
        exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )?;

    let (status, _) = send_as(
        &app,
        Method::DELETE,
        "/api/admin/products/a",
        Some(format!("Bearer {token}").as_str()),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn wrong_password_is_rejected() -> anyhow::Result<()> {
    let app = create_app(admin_state(Arc::new(RecordingChannel::default()))?);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/admin/login",
        Some(json!({ "email": ADMIN_EMAIL, "password": "guess" })),
    )
    .await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["data"]["token"].is_null());
    Ok(())
}

#[tokio::test]
async fn admin_routes_are_closed_without_credentials() -> anyhow::Result<()> {
    let app = create_app(test_state(Arc::new(RecordingChannel::default())));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/admin/login",
        Some(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })),
    )
    .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send_as(
        &app,
        Method::POST,
        "/api/admin/products",
        Some("Bearer anything"),
        Some(fries()),
    )
    .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn invalid_product_fields_are_rejected() -> anyhow::Result<()> {
    let app = create_app(admin_state(Arc::new(RecordingChannel::default()))?);
    let token = login(&app).await?;

    let mut blank_name = fries();
    blank_name["name"] = json!("   ");
    let (status, body) = send_as(
        &app,
        Method::POST,
        "/api/admin/products",
        Some(token.as_str()),
        Some(blank_name),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Bad Request name must not be blank");

    let mut negative = fries();
    negative["price"] = json!("-1.00");
    let (status, _) = send_as(
        &app,
        Method::POST,
        "/api/admin/products",
        Some(token.as_str()),
        Some(negative),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, Method::GET, "/api/catalog", None).await?;
    assert_eq!(body["meta"]["count"], 2);
    Ok(())
}
