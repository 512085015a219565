use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse},
        cart::{AddToCartRequest, CartView, UpdateNoteRequest, UpdateQuantityRequest},
        catalog::{
            CatalogList, CategoryList, CreateProductRequest, DeletedProduct, UpdateProductRequest,
        },
        orders::{PaymentOption, PaymentOptionList},
    },
    models::{CartState, CatalogItem, LineItem, OrderDraft, PaymentMethod},
    response::{ApiResponse, Meta},
    routes::{admin, cart, catalog, checkout, health, params},
    services::order_composer::OrderReceipt,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        catalog::list_catalog,
        catalog::list_categories,
        catalog::get_catalog_item,
        cart::cart_list,
        cart::add_to_cart,
        cart::clear_cart,
        cart::remove_from_cart,
        cart::update_quantity,
        cart::update_note,
        checkout::checkout,
        checkout::payment_methods,
        admin::login,
        admin::create_product,
        admin::update_product,
        admin::delete_product
    ),
    components(
        schemas(
            CatalogItem,
            LineItem,
            CartState,
            PaymentMethod,
            OrderDraft,
            OrderReceipt,
            AddToCartRequest,
            UpdateQuantityRequest,
            UpdateNoteRequest,
            CartView,
            CatalogList,
            CategoryList,
            PaymentOption,
            PaymentOptionList,
            LoginRequest,
            LoginResponse,
            CreateProductRequest,
            UpdateProductRequest,
            DeletedProduct,
            params::CatalogQuery,
            Meta,
            ApiResponse<CartView>,
            ApiResponse<CatalogList>,
            ApiResponse<CatalogItem>,
            ApiResponse<OrderReceipt>,
            ApiResponse<LoginResponse>,
            ApiResponse<DeletedProduct>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Catalog", description = "Menu browsing endpoints"),
        (name = "Cart", description = "Session cart endpoints"),
        (name = "Checkout", description = "Order submission endpoints"),
        (name = "Admin", description = "Menu management endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
