use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::Mutex;

use crate::models::{CartState, CatalogItem, LineItem};

/// The session's cart, shared by every handler through [`crate::state::AppState`].
pub type SharedCart = Arc<Mutex<CartStore>>;

/// In-memory line items of the order being built.
///
/// Holds at most one [`LineItem`] per product id; repetition is expressed
/// through the quantity. Totals are always derived from the items.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    items: Vec<LineItem>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedCart {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Adds one unit of `product`.
    ///
    /// A product already in the cart gets its quantity bumped; a non-empty
    /// `note` replaces the previous one, a blank or absent note keeps it.
    pub fn add(&mut self, product: &CatalogItem, note: Option<&str>) {
        let note = note
            .filter(|text| !text.trim().is_empty())
            .map(str::to_owned);

        match self.position(&product.id) {
            Some(index) => {
                let item = &mut self.items[index];
                item.quantity = item.quantity.saturating_add(1);
                if note.is_some() {
                    item.note = note;
                }
                tracing::debug!(
                    product_id = %product.id,
                    quantity = item.quantity,
                    "cart item incremented"
                );
            }
            None => {
                self.items.push(LineItem::snapshot(product, note));
                tracing::debug!(product_id = %product.id, "cart item added");
            }
        }
    }

    pub fn remove(&mut self, product_id: &str) {
        if let Some(index) = self.position(product_id) {
            self.items.remove(index);
            tracing::debug!(product_id, "cart item removed");
        }
    }

    /// Replaces the quantity of a product. Zero or less removes it.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }

        if let Some(index) = self.position(product_id) {
            let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
            self.items[index].quantity = quantity;
            tracing::debug!(product_id, quantity, "cart quantity set");
        }
    }

    /// Overwrites the note of a product; blank text clears it.
    pub fn set_note(&mut self, product_id: &str, text: &str) {
        if let Some(index) = self.position(product_id) {
            self.items[index].note = if text.trim().is_empty() {
                None
            } else {
                Some(text.to_owned())
            };
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, product_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn state(&self) -> CartState {
        if self.is_empty() {
            CartState::Empty
        } else {
            CartState::NonEmpty
        }
    }

    pub fn total_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Exact sum of `price * quantity`. Rounding happens only when rendered.
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.product_id == product_id)
    }
}
