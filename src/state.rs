use std::sync::Arc;

use crate::services::{
    auth_service::AdminAuth,
    cart_store::{CartStore, SharedCart},
    catalog_service::CatalogSource,
    order_composer::OrderComposer,
};

/// Everything a handler needs: one catalog, one session cart, one composer,
/// and the admin credentials when menu editing is enabled.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogSource>,
    pub cart: SharedCart,
    pub composer: Arc<OrderComposer>,
    pub admin: Option<Arc<AdminAuth>>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogSource>, composer: OrderComposer) -> Self {
        Self {
            catalog,
            cart: CartStore::shared(),
            composer: Arc::new(composer),
            admin: None,
        }
    }

    pub fn with_admin(mut self, admin: AdminAuth) -> Self {
        self.admin = Some(Arc::new(admin));
        self
    }
}
