#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use restaurant_order_api::{
    error::OrderError,
    models::{CatalogItem, OrderDraft, PaymentMethod},
    services::{
        auth_service::{AdminAuth, hash_password},
        catalog_service::MemoryCatalog,
        dispatch::DispatchChannel,
        order_composer::{ComposerSettings, OrderComposer},
    },
    state::AppState,
};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "owner@burgerhouse.test";
pub const ADMIN_PASSWORD: &str = "grill-master";
pub const JWT_SECRET: &str = "test-secret";

pub fn product(id: &str, name: &str, price_cents: i64) -> CatalogItem {
    CatalogItem {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("{name} description"),
        price: Decimal::new(price_cents, 2),
        image: format!("/images/{id}.jpg"),
        category: "Burgers".to_string(),
    }
}

pub fn burger() -> CatalogItem {
    product("a", "Classic Burger", 2590)
}

pub fn cola() -> CatalogItem {
    CatalogItem {
        category: "Drinks".to_string(),
        ..product("b", "Cola", 600)
    }
}

pub fn complete_draft(payment_method: PaymentMethod) -> OrderDraft {
    OrderDraft {
        name: Some("Ana Souza".into()),
        phone: Some("(85) 99999-0000".into()),
        street: Some("Rua das Flores".into()),
        number: Some("120".into()),
        neighborhood: Some("Centro".into()),
        payment_method: Some(payment_method),
        change_for: None,
    }
}

/// Keeps every encoded message it was handed.
#[derive(Default)]
pub struct RecordingChannel {
    pub sent: Mutex<Vec<String>>,
}

impl RecordingChannel {
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }
}

impl DispatchChannel for RecordingChannel {
    fn dispatch(&self, encoded_message: &str) -> Result<String, OrderError> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(encoded_message.to_string());
        }
        Ok(format!("https://example.test/send?text={encoded_message}"))
    }
}

pub struct FailingChannel;

impl DispatchChannel for FailingChannel {
    fn dispatch(&self, _encoded_message: &str) -> Result<String, OrderError> {
        Err(OrderError::DispatchUnavailable("channel offline".into()))
    }
}

pub fn composer_with(channel: Arc<dyn DispatchChannel>) -> OrderComposer {
    OrderComposer::new(ComposerSettings::default(), channel)
}

pub fn test_state(channel: Arc<dyn DispatchChannel>) -> AppState {
    let catalog = MemoryCatalog::new(vec![burger(), cola()]);
    AppState::new(Arc::new(catalog), composer_with(channel))
}

/// Same as [`test_state`], with menu editing enabled for [`ADMIN_EMAIL`].
pub fn admin_state(channel: Arc<dyn DispatchChannel>) -> anyhow::Result<AppState> {
    let admin = AdminAuth::new(ADMIN_EMAIL, hash_password(ADMIN_PASSWORD)?, JWT_SECRET)?;
    Ok(test_state(channel).with_admin(admin))
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> anyhow::Result<(StatusCode, Value)> {
    send_as(app, method, uri, None, body).await
}

/// Sends a request with `Authorization: {authorization}` when given.
pub async fn send_as(
    app: &Router,
    method: Method,
    uri: &str,
    authorization: Option<&str>,
    body: Option<Value>,
) -> anyhow::Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(authorization) = authorization {
        builder = builder.header(header::AUTHORIZATION, authorization);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

/// Sends a raw, possibly malformed, JSON body.
pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    body: &'static str,
) -> anyhow::Result<(StatusCode, Value)> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))?;

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}
