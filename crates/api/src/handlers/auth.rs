//! Handlers for account sign-up, sign-in, logout, and password reset.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use budedex_core::error::CoreError;
use budedex_core::validation::{validate_password, validate_username};
use budedex_db::models::session::{CreateSession, Session};
use budedex_db::models::user::User;
use budedex_db::repositories::{SessionRepo, UserRepo};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::generate_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /account/sign-up` and `/account/sign-in`.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /account/request-password-reset`.
#[derive(Debug, Deserialize)]
pub struct PasswordResetRequest {
    pub username: String,
}

/// Request body for `POST /account/reset-password`.
#[derive(Debug, Deserialize)]
pub struct PasswordReset {
    pub token: String,
    pub password: String,
}

/// Successful authentication payload: the user plus its fresh session.
#[derive(Debug, Serialize)]
pub struct AuthData {
    pub user: User,
    pub session: Session,
    /// The session token, duplicated at the top level for client convenience.
    pub token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/rest/account/sign-up
///
/// Create a user + credential pair and issue an initial session.
pub async fn sign_up(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<CredentialsRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AuthData>>)> {
    validate_username(&input.username)?;
    validate_password(&input.password)?;

    if UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Username already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(&state.pool, &input.username, &password_hash).await?;
    let session = issue_session(&state, &user.username, &headers).await?;

    let token = session.session_token.clone();
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Account created successfully",
            AuthData {
                user,
                session,
                token,
            },
        )),
    ))
}

/// POST /api/rest/account/sign-in
///
/// Authenticate with username + password. A locked account fails uniformly
/// before the password is even checked; every failure bumps the attempt
/// counter, and the fifth consecutive failure opens a 15-minute lockout.
pub async fn sign_in(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<CredentialsRequest>,
) -> AppResult<Json<ApiResponse<AuthData>>> {
    let auth = UserRepo::find_auth(&state.pool, &input.username).await?;

    if let Some(auth) = &auth {
        if auth.is_locked(Utc::now()) {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Account is temporarily locked due to too many failed login attempts".into(),
            )));
        }
    }

    let user = UserRepo::find_by_username(&state.pool, &input.username).await?;

    let (user, auth) = match (user, auth) {
        (Some(user), Some(auth)) => (user, auth),
        _ => {
            UserRepo::increment_login_attempts(&state.pool, &input.username).await?;
            return Err(invalid_credentials());
        }
    };

    let password_valid = verify_password(&input.password, &auth.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        UserRepo::increment_login_attempts(&state.pool, &input.username).await?;
        return Err(invalid_credentials());
    }

    UserRepo::record_successful_login(&state.pool, &input.username).await?;

    let session = issue_session(&state, &user.username, &headers).await?;
    let token = session.session_token.clone();

    Ok(Json(ApiResponse::with_message(
        "Sign in successful",
        AuthData {
            user,
            session,
            token,
        },
    )))
}

/// POST /api/rest/account/logout
///
/// Deactivate the presented session. Idempotent: missing or unknown tokens
/// still return success.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<ApiResponse<()>>> {
    if let Some(token) = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        SessionRepo::deactivate(&state.pool, token).await?;
    }

    Ok(Json(ApiResponse::message("Logged out successfully")))
}

/// POST /api/rest/account/logout-all
///
/// Deactivate every session belonging to the authenticated user.
pub async fn logout_all(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<()>>> {
    SessionRepo::deactivate_all_for_user(&state.pool, &user.username).await?;
    Ok(Json(ApiResponse::message("All sessions logged out")))
}

/// POST /api/rest/account/request-password-reset
///
/// Store a short-lived reset token. The response never reveals whether the
/// username exists.
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(input): Json<PasswordResetRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    if UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .is_some()
    {
        let token = generate_token();
        let expires_at =
            Utc::now() + chrono::Duration::minutes(state.config.auth.reset_token_expiry_mins);
        UserRepo::set_reset_token(&state.pool, &input.username, &token, expires_at).await?;
        tracing::info!(username = %input.username, "password reset token created");
    }

    Ok(Json(ApiResponse::message(
        "If the username exists, a password reset token has been issued",
    )))
}

/// POST /api/rest/account/reset-password
///
/// Exchange a valid reset token for a new password. Clears the token and
/// any lockout, and deactivates existing sessions.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(input): Json<PasswordReset>,
) -> AppResult<Json<ApiResponse<()>>> {
    validate_password(&input.password)?;

    let username = UserRepo::find_username_by_reset_token(&state.pool, &input.token)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired reset token".into(),
            ))
        })?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    UserRepo::reset_password(&state.pool, &username, &password_hash).await?;
    SessionRepo::deactivate_all_for_user(&state.pool, &username).await?;

    Ok(Json(ApiResponse::message("Password reset successfully")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username or password".into(),
    ))
}

/// Generate session + refresh tokens and persist the session row.
async fn issue_session(
    state: &AppState,
    username: &str,
    headers: &HeaderMap,
) -> AppResult<Session> {
    let expires_at = Utc::now() + chrono::Duration::hours(state.config.auth.session_expiry_hours);

    let input = CreateSession {
        username: username.to_string(),
        session_token: generate_token(),
        refresh_token: generate_token(),
        expires_at,
        ip_address: header_string(headers, "x-forwarded-for"),
        user_agent: header_string(headers, "user-agent"),
    };

    Ok(SessionRepo::create(&state.pool, &input).await?)
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
