pub mod auth_service;
pub mod cart_service;
pub mod cart_store;
pub mod catalog_service;
pub mod dispatch;
pub mod order_composer;
pub mod order_service;
