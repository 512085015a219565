use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{CartState, LineItem};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub product_id: String,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    pub note: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub state: CartState,
    pub items: Vec<LineItem>,
    pub total_count: u64,
    pub total_price: Decimal,
}
