use axum::{extract::FromRequestParts, http::header};

use crate::{error::AppError, services::auth_service::ADMIN_ROLE, state::AppState};

/// Caller identified by a bearer token issued at `/api/admin/login`.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub email: String,
    pub role: String,
}

pub fn ensure_admin(user: &AdminUser) -> Result<(), AppError> {
    if user.role != ADMIN_ROLE {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Menu editing is off unless admin credentials are configured.
        let Some(admin) = state.admin.as_deref() else {
            return Err(AppError::Forbidden);
        };

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AppError::Unauthorized)?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::BadRequest("Invalid Authorization header".into()))?;

        let Some(token) = auth_str.strip_prefix("Bearer ") else {
            return Err(AppError::BadRequest("Invalid Authorization scheme".into()));
        };

        let claims = admin.verify(token.trim())?;
        Ok(AdminUser {
            email: claims.sub,
            role: claims.role,
        })
    }
}
