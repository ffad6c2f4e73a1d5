// Authentication extractor for protected routes

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use tracing::warn;

use crate::auth::error::AuthError;
use crate::AppState;

/// Authenticated user extractor for protected routes
///
/// Decodes the bearer token and resolves its subject to an existing
/// user. Requests with a missing, invalid or expired token, or whose
/// subject no longer exists, are rejected with 401.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id_user: i32,
    pub email: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        // Extract Authorization header
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AuthError::MissingToken)?
            .to_str()
            .map_err(|_| AuthError::InvalidToken)?;

        // Verify Bearer token format
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidToken)?;

        let claims = state.auth_service.validate_token(token)?;

        // The subject must still resolve to a stored user
        let user = state
            .auth_service
            .get_user_by_email(&claims.sub)
            .await?
            .ok_or_else(|| {
                warn!("Token subject {} does not resolve to a user", claims.sub);
                AuthError::InvalidToken
            })?;

        Ok(AuthenticatedUser {
            id_user: user.id_user,
            email: user.email,
        })
    }
}
