use crate::error::OrderError;

/// Outbound surface that delivers an order message to the restaurant.
///
/// Receives the message already percent-encoded and returns the link the
/// client has to open. Delivery itself is never awaited.
pub trait DispatchChannel: Send + Sync {
    fn dispatch(&self, encoded_message: &str) -> Result<String, OrderError>;
}

/// Builds a WhatsApp click-to-chat link addressed to the restaurant.
#[derive(Debug, Clone)]
pub struct WhatsAppChannel {
    base_url: String,
    phone: String,
}

impl WhatsAppChannel {
    pub fn new(base_url: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            phone: phone.into(),
        }
    }
}

impl DispatchChannel for WhatsAppChannel {
    fn dispatch(&self, encoded_message: &str) -> Result<String, OrderError> {
        let base_url = self.base_url.trim_end_matches('/');
        if base_url.is_empty() {
            return Err(OrderError::DispatchUnavailable(
                "no dispatch base url configured".into(),
            ));
        }

        let phone: String = self.phone.chars().filter(char::is_ascii_digit).collect();
        if phone.is_empty() {
            return Err(OrderError::DispatchUnavailable(
                "no destination phone configured".into(),
            ));
        }

        let url = format!("{base_url}/{phone}?text={encoded_message}");
        tracing::info!(destination = %phone, "order link handed to whatsapp");
        Ok(url)
    }
}
