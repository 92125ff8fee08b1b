//! Repository for the `user_sessions` table.

use sqlx::PgPool;

use crate::models::session::{CreateSession, Session};

/// Column list shared across queries.
const COLUMNS: &str = "id, username, session_token, refresh_token, expires_at, \
                       is_active, ip_address, user_agent, created_at";

/// Provides session lifecycle operations.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_sessions \
                 (username, session_token, refresh_token, expires_at, ip_address, user_agent) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(&input.username)
            .bind(&input.session_token)
            .bind(&input.refresh_token)
            .bind(input.expires_at)
            .bind(&input.ip_address)
            .bind(&input.user_agent)
            .fetch_one(pool)
            .await
    }

    /// Find a session that is still active and unexpired.
    ///
    /// Expired or deactivated tokens resolve to `None`, not an error.
    pub async fn find_active_by_token(
        pool: &PgPool,
        session_token: &str,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_sessions \
             WHERE session_token = $1 AND expires_at > NOW() AND is_active = true"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(session_token)
            .fetch_optional(pool)
            .await
    }

    /// Deactivate the session carrying this token. Idempotent.
    pub async fn deactivate(pool: &PgPool, session_token: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE user_sessions SET is_active = false WHERE session_token = $1")
            .bind(session_token)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Deactivate every session belonging to a user.
    pub async fn deactivate_all_for_user(
        pool: &PgPool,
        username: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE user_sessions SET is_active = false WHERE username = $1")
            .bind(username)
            .execute(pool)
            .await?;
        Ok(())
    }
}
