use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use password_hash::rand_core::OsRng;

use crate::{
    audit::log_audit,
    dto::auth::{Claims, LoginRequest, LoginResponse},
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub const ADMIN_ROLE: &str = "admin";

const TOKEN_TTL_HOURS: i64 = 12;

/// The single restaurant operator allowed to edit the menu.
#[derive(Debug, Clone)]
pub struct AdminAuth {
    email: String,
    password_hash: String,
    jwt_secret: String,
}

impl AdminAuth {
    /// `password_hash` is an argon2 PHC string, as printed by the
    /// `hash_password` binary.
    pub fn new(
        email: impl Into<String>,
        password_hash: impl Into<String>,
        jwt_secret: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let password_hash = password_hash.into();
        PasswordHash::new(&password_hash)
            .map_err(|e| anyhow::anyhow!("invalid admin password hash: {e}"))?;

        let jwt_secret = jwt_secret.into();
        if jwt_secret.is_empty() {
            anyhow::bail!("JWT secret must not be empty");
        }

        Ok(Self {
            email: email.into(),
            password_hash,
            jwt_secret,
        })
    }

    /// Checks the credentials and issues a signed token.
    pub fn issue_token(&self, payload: &LoginRequest) -> AppResult<String> {
        if !payload.email.trim().eq_ignore_ascii_case(&self.email) {
            return Err(AppError::Unauthorized);
        }

        let parsed_hash = PasswordHash::new(&self.password_hash)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
        if Argon2::default()
            .verify_password(payload.password.as_bytes(), &parsed_hash)
            .is_err()
        {
            return Err(AppError::Unauthorized);
        }

        let expiration = Utc::now()
            .checked_add_signed(Duration::hours(TOKEN_TTL_HOURS))
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

        let claims = Claims {
            sub: self.email.clone(),
            role: ADMIN_ROLE.to_string(),
            exp: expiration.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
    }

    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::Unauthorized)?;
        Ok(decoded.claims)
    }
}

/// Hashes a password into the PHC string `AdminAuth` expects.
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    Ok(hash.to_string())
}

pub async fn login(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let Some(admin) = state.admin.as_deref() else {
        return Err(AppError::Forbidden);
    };

    let token = match admin.issue_token(&payload) {
        Ok(token) => token,
        Err(err) => {
            tracing::warn!(email = %payload.email, "admin login rejected");
            return Err(err);
        }
    };

    log_audit(
        "admin_login",
        Some("admin"),
        Some(serde_json::json!({ "email": payload.email })),
    );

    let resp = LoginResponse {
        token: format!("Bearer {}", token),
    };
    Ok(ApiResponse::success("Logged in", resp, Some(Meta::empty())))
}
