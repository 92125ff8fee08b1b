//! Repository for the `favourited` and `seen` join tables.

use sqlx::PgPool;

use crate::models::user::{Favourited, FavouritedStrain, Seen, SeenStrain, StrainStatus};

/// Provides favourite/seen tracking and the batch status check.
pub struct InteractionRepo;

impl InteractionRepo {
    // -----------------------------------------------------------------------
    // Favourites
    // -----------------------------------------------------------------------

    /// Add a favourite. Re-adding is a silent no-op, so the returned row is
    /// `None` when the pair already existed.
    pub async fn add_favourite(
        pool: &PgPool,
        username: &str,
        strain_name: &str,
    ) -> Result<Option<Favourited>, sqlx::Error> {
        sqlx::query_as::<_, Favourited>(
            "INSERT INTO favourited (username, strain_name) \
             VALUES ($1, $2) \
             ON CONFLICT (username, strain_name) DO NOTHING \
             RETURNING id, username, strain_name, created_at",
        )
        .bind(username)
        .bind(strain_name)
        .fetch_optional(pool)
        .await
    }

    /// Remove a favourite. Returns `true` if a row was deleted.
    pub async fn remove_favourite(
        pool: &PgPool,
        username: &str,
        strain_name: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM favourited WHERE username = $1 AND strain_name = $2")
            .bind(username)
            .bind(strain_name)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// A page of favourites joined through to strain rows, newest first,
    /// with the total count.
    pub async fn list_favourites(
        pool: &PgPool,
        username: &str,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<FavouritedStrain>, i64), sqlx::Error> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM favourited WHERE username = $1",
        )
        .bind(username)
        .fetch_one(pool)
        .await?;

        let rows = sqlx::query_as::<_, FavouritedStrain>(
            "SELECT s.*, f.created_at AS favourited_at \
             FROM favourited f \
             JOIN strains s ON f.strain_name = s.name \
             WHERE f.username = $1 \
             ORDER BY f.created_at DESC \
             LIMIT $2 OFFSET $3",
        )
        .bind(username)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok((rows, total))
    }

    /// Whether the user has favourited this strain.
    pub async fn is_favourite(
        pool: &PgPool,
        username: &str,
        strain_name: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM favourited WHERE username = $1 AND strain_name = $2)",
        )
        .bind(username)
        .bind(strain_name)
        .fetch_one(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Seen
    // -----------------------------------------------------------------------

    /// Mark a strain seen. Repeats refresh `seen_at` instead of inserting.
    pub async fn mark_seen(
        pool: &PgPool,
        username: &str,
        strain_name: &str,
    ) -> Result<Seen, sqlx::Error> {
        sqlx::query_as::<_, Seen>(
            "INSERT INTO seen (username, strain_name) \
             VALUES ($1, $2) \
             ON CONFLICT (username, strain_name) DO UPDATE SET seen_at = NOW() \
             RETURNING id, username, strain_name, seen_at",
        )
        .bind(username)
        .bind(strain_name)
        .fetch_one(pool)
        .await
    }

    /// Remove a seen mark. Returns `true` if a row was deleted.
    pub async fn remove_seen(
        pool: &PgPool,
        username: &str,
        strain_name: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM seen WHERE username = $1 AND strain_name = $2")
            .bind(username)
            .bind(strain_name)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// A page of seen strains joined through to strain rows, most recently
    /// seen first, with the total count.
    pub async fn list_seen(
        pool: &PgPool,
        username: &str,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<SeenStrain>, i64), sqlx::Error> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM seen WHERE username = $1")
                .bind(username)
                .fetch_one(pool)
                .await?;

        let rows = sqlx::query_as::<_, SeenStrain>(
            "SELECT st.*, s.seen_at \
             FROM seen s \
             JOIN strains st ON s.strain_name = st.name \
             WHERE s.username = $1 \
             ORDER BY s.seen_at DESC \
             LIMIT $2 OFFSET $3",
        )
        .bind(username)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok((rows, total))
    }

    /// Whether the user has seen this strain.
    pub async fn has_seen(
        pool: &PgPool,
        username: &str,
        strain_name: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM seen WHERE username = $1 AND strain_name = $2)",
        )
        .bind(username)
        .bind(strain_name)
        .fetch_one(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Batch status
    // -----------------------------------------------------------------------

    /// Liked/seen flags for a batch of strain names in one round trip.
    pub async fn status_batch(
        pool: &PgPool,
        username: &str,
        strain_names: &[String],
    ) -> Result<Vec<StrainStatus>, sqlx::Error> {
        sqlx::query_as::<_, StrainStatus>(
            "SELECT n.name AS strain_name, \
                    EXISTS (SELECT 1 FROM favourited f \
                            WHERE f.username = $1 AND f.strain_name = n.name) AS is_liked, \
                    EXISTS (SELECT 1 FROM seen s \
                            WHERE s.username = $1 AND s.strain_name = n.name) AS is_seen \
             FROM UNNEST($2::text[]) AS n(name)",
        )
        .bind(username)
        .bind(strain_names)
        .fetch_all(pool)
        .await
    }
}
