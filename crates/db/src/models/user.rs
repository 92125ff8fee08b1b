//! User, credential, and interaction models.

use budedex_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::strain::Strain;

/// Row from the `users` table. Username is the natural key.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub username: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Credential row from the `auth` table, one-to-one with `users`.
///
/// Contains the password hash -- never serialize this to API responses.
#[derive(Debug, Clone, FromRow)]
pub struct Auth {
    pub username: String,
    pub password_hash: String,
    pub reset_token: Option<String>,
    pub reset_token_expires: Option<Timestamp>,
    pub last_login: Option<Timestamp>,
    pub login_attempts: i32,
    pub locked_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Auth {
    /// Whether the account is currently inside a lockout window.
    pub fn is_locked(&self, now: Timestamp) -> bool {
        matches!(self.locked_until, Some(until) if now < until)
    }
}

/// Row from the `user_stats` view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserStats {
    pub username: String,
    pub favourites_count: i64,
    pub seen_count: i64,
    pub joined_date: Timestamp,
}

/// Row from the `user_totals` view: per-category activity counts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserTotals {
    pub username: String,
    pub favourites_count: i64,
    pub seen_count: i64,
    pub unique_effects: i64,
    pub total_effect_interactions: i64,
    pub unique_flavors: i64,
    pub total_flavor_interactions: i64,
    pub unique_terpenes: i64,
    pub total_terpene_interactions: i64,
    pub unique_medical_conditions: i64,
    pub total_medical_interactions: i64,
    pub joined_date: Timestamp,
}

/// Row from the `favourited` join table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Favourited {
    pub id: DbId,
    pub username: String,
    pub strain_name: String,
    pub created_at: Timestamp,
}

/// Row from the `seen` join table. Repeated marks refresh `seen_at`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Seen {
    pub id: DbId,
    pub username: String,
    pub strain_name: String,
    pub seen_at: Timestamp,
}

/// A favourited strain joined through to its catalog row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FavouritedStrain {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub strain: Strain,
    pub favourited_at: Timestamp,
}

/// A seen strain joined through to its catalog row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SeenStrain {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub strain: Strain,
    pub seen_at: Timestamp,
}

/// Per-strain interaction flags for the batch status check.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StrainStatus {
    pub strain_name: String,
    pub is_liked: bool,
    pub is_seen: bool,
}

/// Row from the per-user category analytics views (`user_effects` etc).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserCategoryCount {
    pub username: String,
    pub name: String,
    pub count: i64,
}

/// DTO for registering a new user.
#[derive(Debug, Deserialize)]
pub struct RegisterUser {
    pub username: String,
    pub password: String,
}
