//! Session entity model and DTOs.

use budedex_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Row from the `user_sessions` table.
///
/// A session authenticates only while `is_active` and unexpired; logout
/// flips the flag rather than deleting the row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Session {
    pub id: DbId,
    pub username: String,
    pub session_token: String,
    pub refresh_token: String,
    pub expires_at: Timestamp,
    pub is_active: bool,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for issuing a new session. Tokens are generated by the caller.
#[derive(Debug)]
pub struct CreateSession {
    pub username: String,
    pub session_token: String,
    pub refresh_token: String,
    pub expires_at: Timestamp,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}
