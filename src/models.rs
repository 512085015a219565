use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use utoipa::ToSchema;

/// A product as published by the catalog. Read-only for the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
    pub category: String,
}

/// One product entry in the cart.
///
/// Name, description, price and image are copied from the catalog when the
/// product is first added, so later catalog edits never reach an order that
/// is already in progress.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LineItem {
    pub product_id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
    pub quantity: u32,
    pub note: Option<String>,
}

impl LineItem {
    pub fn snapshot(product: &CatalogItem, note: Option<String>) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 1,
            note,
        }
    }

    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CartState {
    Empty,
    NonEmpty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    DebitCard,
    CreditCard,
    InstantTransfer,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::InstantTransfer => "Instant Transfer",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Checkout form as submitted by the customer.
///
/// Every field is optional on the wire; blanks are reported by validation
/// as an incomplete order rather than rejected while parsing the body.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct OrderDraft {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub neighborhood: Option<String>,
    #[serde(default, deserialize_with = "blank_or_invalid_as_none")]
    pub payment_method: Option<PaymentMethod>,
    /// Only read when `payment_method` is `cash`.
    #[serde(default, deserialize_with = "blank_or_invalid_as_none")]
    pub change_for: Option<Decimal>,
}

/// Form selects and inputs post `""` when left untouched. Such values, and
/// anything else that does not parse, count as not supplied.
fn blank_or_invalid_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            tracing::debug!(error = %err, "ignoring unparsable checkout field");
            None
        }
    }))
}

/// Validated customer details, owned by an [`OrderSnapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
    pub street: String,
    pub number: String,
    pub neighborhood: String,
}

/// Immutable result of a successful validation: the draft and the cart
/// contents as they were at that moment.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSnapshot {
    pub customer: CustomerDetails,
    pub payment_method: PaymentMethod,
    pub change_for: Option<Decimal>,
    pub items: Vec<LineItem>,
}

impl OrderSnapshot {
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    pub fn total_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}
