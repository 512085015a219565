//! Ordering back-end for a single restaurant.
//!
//! Customers browse the catalog, build a cart in their session and submit
//! it as a formatted message handed to the restaurant's messaging channel.

pub mod audit;
pub mod config;
pub mod db;
pub mod dto;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
