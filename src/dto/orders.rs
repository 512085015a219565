use serde::Serialize;
use utoipa::ToSchema;

use crate::models::PaymentMethod;

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentOption {
    pub method: PaymentMethod,
    pub label: String,
    /// Checkout fields this method adds to the always-required ones.
    pub requires: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentOptionList {
    pub items: Vec<PaymentOption>,
}
