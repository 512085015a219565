use std::fmt;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::response::{ApiResponse, Meta};

/// A checkout form field that validation can find missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Name,
    Phone,
    Street,
    Number,
    Neighborhood,
    PaymentMethod,
    ChangeFor,
}

impl DraftField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::Name => "name",
            DraftField::Phone => "phone",
            DraftField::Street => "street",
            DraftField::Number => "number",
            DraftField::Neighborhood => "neighborhood",
            DraftField::PaymentMethod => "payment_method",
            DraftField::ChangeFor => "change_for",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Incomplete {
    EmptyCart,
    MissingField(DraftField),
}

impl fmt::Display for Incomplete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Incomplete::EmptyCart => f.write_str("cart is empty"),
            Incomplete::MissingField(field) => write!(f, "missing {}", field.as_str()),
        }
    }
}

/// Failures of the order composer. Both leave the cart as it was.
#[derive(Debug, Error, PartialEq)]
pub enum OrderError {
    #[error("Incomplete order: {0}")]
    IncompleteOrder(Incomplete),

    #[error("Dispatch unavailable: {0}")]
    DispatchUnavailable(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error("ORM error")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::InvalidBody(rejection) => rejection.status(),
            AppError::Order(OrderError::IncompleteOrder(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Order(OrderError::DispatchUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::OrmError(err) => {
                tracing::error!(error = %err, "catalog query failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "unexpected failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ApiResponse {
            message: self.to_string(),
            data: Some(ErrorData {
                error: self.to_string(),
            }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
