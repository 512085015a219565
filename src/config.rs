use std::env;

use crate::services::{
    auth_service::AdminAuth,
    order_composer::{ComposerSettings, PaymentRules},
};

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Without it the server runs on the built-in sample menu.
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub restaurant_name: String,
    pub order_phone: String,
    pub dispatch_base_url: String,
    pub currency_symbol: String,
    pub cash_requires_change: bool,
    /// Menu editing stays disabled until all three admin variables are set.
    pub admin_email: Option<String>,
    pub admin_password_hash: Option<String>,
    pub jwt_secret: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let restaurant_name =
            env::var("RESTAURANT_NAME").unwrap_or_else(|_| "Burger House".to_string());
        let order_phone = env::var("ORDER_PHONE").unwrap_or_else(|_| "5585994015283".to_string());
        let dispatch_base_url =
            env::var("DISPATCH_BASE_URL").unwrap_or_else(|_| "https://wa.me".to_string());
        let currency_symbol = env::var("CURRENCY_SYMBOL").unwrap_or_else(|_| "R$".to_string());
        let cash_requires_change = match env::var("CASH_REQUIRES_CHANGE") {
            Ok(value) => parse_flag(&value)?,
            Err(_) => true,
        };

        let admin_email = non_empty_var("ADMIN_EMAIL");
        let admin_password_hash = non_empty_var("ADMIN_PASSWORD_HASH");
        let jwt_secret = non_empty_var("JWT_SECRET");

        if !order_phone.chars().any(|c| c.is_ascii_digit()) {
            anyhow::bail!("ORDER_PHONE must contain the destination number");
        }

        Ok(Self {
            database_url,
            host,
            port,
            restaurant_name,
            order_phone,
            dispatch_base_url,
            currency_symbol,
            cash_requires_change,
            admin_email,
            admin_password_hash,
            jwt_secret,
        })
    }

    pub fn composer_settings(&self) -> ComposerSettings {
        ComposerSettings {
            restaurant_name: self.restaurant_name.clone(),
            currency_symbol: self.currency_symbol.clone(),
            rules: PaymentRules::from_policy(self.cash_requires_change),
        }
    }

    /// `Ok(None)` when no admin variable is set; an error when only some are.
    pub fn admin_auth(&self) -> anyhow::Result<Option<AdminAuth>> {
        match (&self.admin_email, &self.admin_password_hash, &self.jwt_secret) {
            (Some(email), Some(hash), Some(secret)) => {
                Ok(Some(AdminAuth::new(email.as_str(), hash.as_str(), secret.as_str())?))
            }
            (None, None, None) => Ok(None),
            _ => anyhow::bail!(
                "ADMIN_EMAIL, ADMIN_PASSWORD_HASH and JWT_SECRET must be set together"
            ),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("invalid boolean value {other:?}"),
    }
}
