use crate::{
    audit::log_audit,
    dto::cart::{AddToCartRequest, CartView, UpdateNoteRequest, UpdateQuantityRequest},
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    services::cart_store::CartStore,
    state::AppState,
};

pub fn cart_view(cart: &CartStore) -> CartView {
    CartView {
        state: cart.state(),
        items: cart.items().to_vec(),
        total_count: cart.total_count(),
        total_price: cart.total_price(),
    }
}

fn respond(message: &str, cart: &CartStore) -> ApiResponse<CartView> {
    let meta = Meta::count(cart.items().len() as u64);
    ApiResponse::success(message, cart_view(cart), Some(meta))
}

pub async fn list_cart(state: &AppState) -> AppResult<ApiResponse<CartView>> {
    let cart = state.cart.lock().await;
    Ok(respond("OK", &cart))
}

pub async fn add_to_cart(
    state: &AppState,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartView>> {
    let product_id = payload.product_id.trim();
    if product_id.is_empty() {
        return Err(AppError::BadRequest("product_id is required".to_string()));
    }

    let product = match state.catalog.find(product_id).await? {
        Some(product) => product,
        None => return Err(AppError::NotFound),
    };

    let mut cart = state.cart.lock().await;
    cart.add(&product, payload.note.as_deref());

    log_audit(
        "cart_add",
        Some("cart"),
        Some(serde_json::json!({ "product_id": product.id, "note": payload.note })),
    );

    Ok(respond("Added to cart", &cart))
}

pub async fn remove_from_cart(
    state: &AppState,
    product_id: &str,
) -> AppResult<ApiResponse<CartView>> {
    let mut cart = state.cart.lock().await;
    cart.remove(product_id);

    log_audit(
        "cart_remove",
        Some("cart"),
        Some(serde_json::json!({ "product_id": product_id })),
    );

    Ok(respond("Removed from cart", &cart))
}

pub async fn update_quantity(
    state: &AppState,
    product_id: &str,
    payload: UpdateQuantityRequest,
) -> AppResult<ApiResponse<CartView>> {
    let mut cart = state.cart.lock().await;
    cart.set_quantity(product_id, payload.quantity);

    log_audit(
        "cart_quantity",
        Some("cart"),
        Some(serde_json::json!({ "product_id": product_id, "quantity": payload.quantity })),
    );

    Ok(respond("Quantity updated", &cart))
}

pub async fn update_note(
    state: &AppState,
    product_id: &str,
    payload: UpdateNoteRequest,
) -> AppResult<ApiResponse<CartView>> {
    let mut cart = state.cart.lock().await;
    cart.set_note(product_id, &payload.note);

    log_audit(
        "cart_note",
        Some("cart"),
        Some(serde_json::json!({ "product_id": product_id, "note": payload.note })),
    );

    Ok(respond("Note updated", &cart))
}

pub async fn clear_cart(state: &AppState) -> AppResult<ApiResponse<CartView>> {
    let mut cart = state.cart.lock().await;
    cart.clear();
    log_audit("cart_clear", Some("cart"), None);
    Ok(respond("Cart cleared", &cart))
}
