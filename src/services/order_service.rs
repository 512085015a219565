use crate::{
    audit::log_audit,
    dto::orders::{PaymentOption, PaymentOptionList},
    error::{AppError, AppResult},
    models::{OrderDraft, PaymentMethod},
    response::{ApiResponse, Meta},
    services::order_composer::OrderReceipt,
    state::AppState,
};

pub async fn checkout(state: &AppState, draft: OrderDraft) -> AppResult<ApiResponse<OrderReceipt>> {
    // Held across validate, dispatch and clear so they see the same cart.
    let mut cart = state.cart.lock().await;

    let receipt = match state.composer.submit(&draft, &mut cart) {
        Ok(receipt) => receipt,
        Err(err) => {
            tracing::warn!(error = %err, "checkout rejected");
            return Err(AppError::Order(err));
        }
    };

    log_audit(
        "checkout",
        Some("orders"),
        Some(serde_json::json!({
            "total_count": receipt.total_count,
            "total_price": receipt.total_price,
        })),
    );

    Ok(ApiResponse::success(
        "Order sent",
        receipt,
        Some(Meta::empty()),
    ))
}

pub fn payment_options(state: &AppState) -> ApiResponse<PaymentOptionList> {
    let rules = state.composer.settings().rules;
    let items: Vec<PaymentOption> = [
        PaymentMethod::Cash,
        PaymentMethod::DebitCard,
        PaymentMethod::CreditCard,
        PaymentMethod::InstantTransfer,
    ]
    .into_iter()
    .map(|method| PaymentOption {
        method,
        label: method.label().to_string(),
        requires: rules
            .required_for(method)
            .iter()
            .map(|field| field.as_str().to_string())
            .collect(),
    })
    .collect();

    let meta = Meta::count(items.len() as u64);
    ApiResponse::success("Payment methods", PaymentOptionList { items }, Some(meta))
}
