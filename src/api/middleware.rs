use crate::api::AppState;
use crate::error::AppError;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

/// The authenticated caller, resolved from an `Authorization: Bearer` token.
///
/// Handlers taking this extractor never run for unauthenticated requests.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts.headers.get(header::AUTHORIZATION).ok_or(AppError::Unauthorized)?;

        let auth_str = auth_header.to_str().map_err(|_| AppError::Unauthorized)?;
        let token = auth_str.strip_prefix("Bearer ").ok_or(AppError::Unauthorized)?;

        let username = state.auth_service.verify_token(token)?;
        tracing::Span::current().record("username", username.as_str());

        Ok(Self { username })
    }
}
