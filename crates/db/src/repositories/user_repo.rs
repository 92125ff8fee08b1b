//! Repository for the `users` and `auth` tables.

use budedex_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::user::{Auth, User, UserCategoryCount, UserStats, UserTotals};

/// Column list shared across `users` queries.
const USER_COLUMNS: &str = "username, created_at, updated_at";

/// Column list shared across `auth` queries.
const AUTH_COLUMNS: &str = "username, password_hash, reset_token, reset_token_expires, \
                            last_login, login_attempts, locked_until, created_at, updated_at";

/// Failed attempts after which the next failure triggers a lockout.
const LOCKOUT_THRESHOLD: i32 = 4;

/// Provides account and credential operations.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by username.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Create the user and its credential row in one transaction.
    ///
    /// The password must already be hashed by the caller.
    pub async fn create(
        pool: &PgPool,
        username: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("INSERT INTO users (username) VALUES ($1) RETURNING {USER_COLUMNS}");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO auth (username, password_hash) VALUES ($1, $2)")
            .bind(username)
            .bind(password_hash)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(user)
    }

    /// Delete a user. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, username: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Credentials & lockout
    // -----------------------------------------------------------------------

    /// Find the credential row for a username.
    pub async fn find_auth(pool: &PgPool, username: &str) -> Result<Option<Auth>, sqlx::Error> {
        let query = format!("SELECT {AUTH_COLUMNS} FROM auth WHERE username = $1");
        sqlx::query_as::<_, Auth>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Record a failed sign-in. When the pre-increment counter has already
    /// reached the threshold, the same statement opens a 15-minute lockout.
    pub async fn increment_login_attempts(
        pool: &PgPool,
        username: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE auth \
             SET login_attempts = login_attempts + 1, \
                 locked_until = CASE \
                     WHEN login_attempts >= $2 THEN NOW() + INTERVAL '15 minutes' \
                     ELSE locked_until \
                 END \
             WHERE username = $1",
        )
        .bind(username)
        .bind(LOCKOUT_THRESHOLD)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Record a successful sign-in: reset the counter, clear the lock,
    /// stamp `last_login`.
    pub async fn record_successful_login(
        pool: &PgPool,
        username: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE auth \
             SET login_attempts = 0, locked_until = NULL, last_login = NOW() \
             WHERE username = $1",
        )
        .bind(username)
        .execute(pool)
        .await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Password reset
    // -----------------------------------------------------------------------

    /// Store a reset token with its expiry on the credential row.
    pub async fn set_reset_token(
        pool: &PgPool,
        username: &str,
        token: &str,
        expires_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE auth SET reset_token = $2, reset_token_expires = $3 WHERE username = $1")
            .bind(username)
            .bind(token)
            .bind(expires_at)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Resolve an unexpired reset token to its username.
    pub async fn find_username_by_reset_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT username FROM auth \
             WHERE reset_token = $1 AND reset_token_expires > NOW()",
        )
        .bind(token)
        .fetch_optional(pool)
        .await
    }

    /// Apply a new password hash, clearing the reset token and any lockout.
    pub async fn reset_password(
        pool: &PgPool,
        username: &str,
        password_hash: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE auth \
             SET password_hash = $2, reset_token = NULL, reset_token_expires = NULL, \
                 login_attempts = 0, locked_until = NULL \
             WHERE username = $1",
        )
        .bind(username)
        .bind(password_hash)
        .execute(pool)
        .await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Analytics views
    // -----------------------------------------------------------------------

    /// Basic activity stats from the `user_stats` view.
    pub async fn stats(pool: &PgPool, username: &str) -> Result<Option<UserStats>, sqlx::Error> {
        sqlx::query_as::<_, UserStats>("SELECT * FROM user_stats WHERE username = $1")
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Per-category activity totals from the `user_totals` view.
    pub async fn totals(pool: &PgPool, username: &str) -> Result<Option<UserTotals>, sqlx::Error> {
        sqlx::query_as::<_, UserTotals>("SELECT * FROM user_totals WHERE username = $1")
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// A user's most-encountered effects.
    pub async fn top_effects(
        pool: &PgPool,
        username: &str,
        limit: i64,
    ) -> Result<Vec<UserCategoryCount>, sqlx::Error> {
        sqlx::query_as::<_, UserCategoryCount>(
            "SELECT username, effect AS name, count FROM user_effects \
             WHERE username = $1 ORDER BY count DESC LIMIT $2",
        )
        .bind(username)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// A user's most-encountered flavors.
    pub async fn top_flavors(
        pool: &PgPool,
        username: &str,
        limit: i64,
    ) -> Result<Vec<UserCategoryCount>, sqlx::Error> {
        sqlx::query_as::<_, UserCategoryCount>(
            "SELECT username, flavor AS name, count FROM user_flavors \
             WHERE username = $1 ORDER BY count DESC LIMIT $2",
        )
        .bind(username)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// A user's most-encountered terpenes.
    pub async fn top_terpenes(
        pool: &PgPool,
        username: &str,
        limit: i64,
    ) -> Result<Vec<UserCategoryCount>, sqlx::Error> {
        sqlx::query_as::<_, UserCategoryCount>(
            "SELECT username, terpene_name AS name, count FROM user_terpenes \
             WHERE username = $1 ORDER BY count DESC LIMIT $2",
        )
        .bind(username)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// A user's most-encountered medical benefits.
    pub async fn top_medical_benefits(
        pool: &PgPool,
        username: &str,
        limit: i64,
    ) -> Result<Vec<UserCategoryCount>, sqlx::Error> {
        sqlx::query_as::<_, UserCategoryCount>(
            "SELECT username, condition_name AS name, count FROM user_medical_benefits \
             WHERE username = $1 ORDER BY count DESC LIMIT $2",
        )
        .bind(username)
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
