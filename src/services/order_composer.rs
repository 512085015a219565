use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{DraftField, Incomplete, OrderError},
    models::{CustomerDetails, OrderDraft, OrderSnapshot, PaymentMethod},
    services::{cart_store::CartStore, dispatch::DispatchChannel},
};

const NOTHING: &[DraftField] = &[];
const CHANGE_FOR: &[DraftField] = &[DraftField::ChangeFor];

/// Extra fields each payment method makes mandatory.
#[derive(Debug, Clone, Copy)]
pub struct PaymentRules {
    table: &'static [(PaymentMethod, &'static [DraftField])],
}

impl PaymentRules {
    /// Cash orders must say how much change the courier should bring.
    pub const CASH_REQUIRES_CHANGE: Self = Self {
        table: &[
            (PaymentMethod::Cash, CHANGE_FOR),
            (PaymentMethod::DebitCard, NOTHING),
            (PaymentMethod::CreditCard, NOTHING),
            (PaymentMethod::InstantTransfer, NOTHING),
        ],
    };

    pub const CHANGE_OPTIONAL: Self = Self {
        table: &[
            (PaymentMethod::Cash, NOTHING),
            (PaymentMethod::DebitCard, NOTHING),
            (PaymentMethod::CreditCard, NOTHING),
            (PaymentMethod::InstantTransfer, NOTHING),
        ],
    };

    pub fn from_policy(cash_requires_change: bool) -> Self {
        if cash_requires_change {
            Self::CASH_REQUIRES_CHANGE
        } else {
            Self::CHANGE_OPTIONAL
        }
    }

    pub fn required_for(&self, method: PaymentMethod) -> &'static [DraftField] {
        self.table
            .iter()
            .find(|(candidate, _)| *candidate == method)
            .map(|(_, fields)| *fields)
            .unwrap_or(NOTHING)
    }
}

impl Default for PaymentRules {
    fn default() -> Self {
        Self::CASH_REQUIRES_CHANGE
    }
}

#[derive(Debug, Clone)]
pub struct ComposerSettings {
    pub restaurant_name: String,
    pub currency_symbol: String,
    pub rules: PaymentRules,
}

impl Default for ComposerSettings {
    fn default() -> Self {
        Self {
            restaurant_name: "Burger House".into(),
            currency_symbol: "R$".into(),
            rules: PaymentRules::default(),
        }
    }
}

/// What the client gets back after a successful submission.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderReceipt {
    pub message: String,
    pub dispatch_url: String,
    pub total_count: u64,
    pub total_price: Decimal,
    pub submitted_at: DateTime<Utc>,
}

/// Turns the cart and a checkout form into the order message and hands it
/// to the dispatch channel.
#[derive(Clone)]
pub struct OrderComposer {
    settings: ComposerSettings,
    channel: Arc<dyn DispatchChannel>,
}

impl OrderComposer {
    pub fn new(settings: ComposerSettings, channel: Arc<dyn DispatchChannel>) -> Self {
        Self { settings, channel }
    }

    pub fn settings(&self) -> &ComposerSettings {
        &self.settings
    }

    pub fn validate(
        &self,
        draft: &OrderDraft,
        cart: &CartStore,
    ) -> Result<OrderSnapshot, OrderError> {
        if cart.is_empty() {
            return Err(OrderError::IncompleteOrder(Incomplete::EmptyCart));
        }

        let customer = CustomerDetails {
            name: required(draft.name.as_deref(), DraftField::Name)?,
            phone: required(draft.phone.as_deref(), DraftField::Phone)?,
            street: required(draft.street.as_deref(), DraftField::Street)?,
            number: required(draft.number.as_deref(), DraftField::Number)?,
            neighborhood: required(draft.neighborhood.as_deref(), DraftField::Neighborhood)?,
        };
        let payment_method = draft.payment_method.ok_or(OrderError::IncompleteOrder(
            Incomplete::MissingField(DraftField::PaymentMethod),
        ))?;

        let change_for = match payment_method {
            PaymentMethod::Cash => draft.change_for.filter(|amount| *amount > Decimal::ZERO),
            _ => None,
        };

        for field in self.settings.rules.required_for(payment_method) {
            let present = match field {
                DraftField::ChangeFor => change_for.is_some(),
                _ => true,
            };
            if !present {
                return Err(OrderError::IncompleteOrder(Incomplete::MissingField(*field)));
            }
        }

        Ok(OrderSnapshot {
            customer,
            payment_method,
            change_for,
            items: cart.items().to_vec(),
        })
    }

    /// Renders the order message. Money is shown with two decimals.
    pub fn format(&self, snapshot: &OrderSnapshot) -> String {
        let currency = &self.settings.currency_symbol;
        let customer = &snapshot.customer;

        let mut lines = vec![
            format!("*NEW ORDER - {}*", self.settings.restaurant_name.to_uppercase()),
            String::new(),
            format!("*Customer:* {}", customer.name),
            format!("*Phone:* {}", customer.phone),
            format!(
                "*Address:* {}, {} - {}",
                customer.street, customer.number, customer.neighborhood
            ),
            String::new(),
            "*ORDER ITEMS:*".to_owned(),
        ];

        for item in &snapshot.items {
            lines.push(format!(
                "• {}x {} - {} {}",
                item.quantity,
                item.name,
                currency,
                money(item.subtotal())
            ));
            if let Some(note) = &item.note {
                lines.push(format!("   Note: {note}"));
            }
        }

        lines.push(String::new());
        lines.push(format!("*TOTAL: {} {}*", currency, money(snapshot.total_price())));
        lines.push(String::new());
        lines.push(format!("*Payment:* {}", snapshot.payment_method));

        if let (PaymentMethod::Cash, Some(change_for)) =
            (snapshot.payment_method, snapshot.change_for)
        {
            lines.push(format!("*Change for:* {} {}", currency, money(change_for)));
        }

        let mut message = lines.join("\n");
        message.push('\n');
        message
    }

    /// Percent-encodes `message` and hands it to the channel.
    pub fn dispatch(&self, message: &str) -> Result<String, OrderError> {
        let encoded = urlencoding::encode(message);
        self.channel.dispatch(&encoded)
    }

    /// Validates, formats and dispatches the order, then empties the cart.
    ///
    /// The cart is only cleared once the channel accepted the message.
    pub fn submit(
        &self,
        draft: &OrderDraft,
        cart: &mut CartStore,
    ) -> Result<OrderReceipt, OrderError> {
        let snapshot = self.validate(draft, cart)?;
        let message = self.format(&snapshot);
        let dispatch_url = self.dispatch(&message)?;

        cart.clear();
        tracing::info!(
            items = snapshot.items.len(),
            total = %snapshot.total_price(),
            payment = %snapshot.payment_method,
            "order submitted"
        );

        Ok(OrderReceipt {
            message,
            dispatch_url,
            total_count: snapshot.total_count(),
            total_price: snapshot.total_price(),
            submitted_at: Utc::now(),
        })
    }
}

/// Formats an amount with exactly two fractional digits, half away from zero.
pub fn money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

fn required(value: Option<&str>, field: DraftField) -> Result<String, OrderError> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
        .ok_or(OrderError::IncompleteOrder(Incomplete::MissingField(field)))
}
