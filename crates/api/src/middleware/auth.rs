//! Session-token authentication extractors for Axum handlers.
//!
//! Tokens are opaque: the `Authorization: Bearer <token>` header is resolved
//! against the `user_sessions` table, and only an active, unexpired session
//! authenticates. Expired or deactivated tokens are treated as absent.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use budedex_core::error::CoreError;
use budedex_db::repositories::{SessionRepo, UserRepo};

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from a Bearer session token.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(username = %user.username, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
    /// The presented session token, kept for logout.
    pub session_token: String,
}

/// Like [`AuthUser`], but missing/invalid credentials resolve to `None`
/// instead of rejecting the request. Used by the GraphQL context.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Authentication required".into()))
        })?;

        resolve_session(state, &token).await?.ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })
    }
}

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = match bearer_token(parts) {
            Some(token) => resolve_session(state, &token).await?,
            None => None,
        };
        Ok(OptionalAuthUser(user))
    }
}

/// Pull the token out of a `Bearer` Authorization header, if present.
fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Look up an active session and its user.
///
/// A session whose user row has vanished verifies as absent too.
async fn resolve_session(state: &AppState, token: &str) -> Result<Option<AuthUser>, AppError> {
    let session = match SessionRepo::find_active_by_token(&state.pool, token).await? {
        Some(s) => s,
        None => return Ok(None),
    };

    let user = match UserRepo::find_by_username(&state.pool, &session.username).await? {
        Some(u) => u,
        None => return Ok(None),
    };

    Ok(Some(AuthUser {
        username: user.username,
        session_token: token.to_string(),
    }))
}
