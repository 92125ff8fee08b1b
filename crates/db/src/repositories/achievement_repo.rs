//! Repository for the achievement catalog and per-user progress.

use budedex_core::types::DbId;
use sqlx::PgPool;
use tracing::warn;

use crate::models::achievement::{
    Achievement, AchievementProgress, AchievementSummary, RecentUnlock, UserAchievement,
};

/// Provides catalog reads and the check-and-unlock mutation path.
pub struct AchievementRepo;

impl AchievementRepo {
    // -----------------------------------------------------------------------
    // Catalog
    // -----------------------------------------------------------------------

    /// The full achievement catalog, grouped by category then target.
    pub async fn all(pool: &PgPool) -> Result<Vec<Achievement>, sqlx::Error> {
        sqlx::query_as::<_, Achievement>(
            "SELECT * FROM achievements ORDER BY category, target_value",
        )
        .fetch_all(pool)
        .await
    }

    /// Catalog entries for one category.
    pub async fn by_category(
        pool: &PgPool,
        category: &str,
    ) -> Result<Vec<Achievement>, sqlx::Error> {
        sqlx::query_as::<_, Achievement>(
            "SELECT * FROM achievements WHERE category = $1 ORDER BY target_value",
        )
        .bind(category)
        .fetch_all(pool)
        .await
    }

    /// Catalog entries for one rarity, most valuable first.
    pub async fn by_rarity(pool: &PgPool, rarity: &str) -> Result<Vec<Achievement>, sqlx::Error> {
        sqlx::query_as::<_, Achievement>(
            "SELECT * FROM achievements WHERE rarity = $1 ORDER BY points DESC",
        )
        .bind(rarity)
        .fetch_all(pool)
        .await
    }

    /// Find one catalog entry by id.
    pub async fn by_id(pool: &PgPool, id: DbId) -> Result<Option<Achievement>, sqlx::Error> {
        sqlx::query_as::<_, Achievement>("SELECT * FROM achievements WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Per-user progress
    // -----------------------------------------------------------------------

    /// A user's progress across the whole catalog, from the
    /// `achievement_status` view.
    pub async fn progress(
        pool: &PgPool,
        username: &str,
    ) -> Result<Vec<AchievementProgress>, sqlx::Error> {
        sqlx::query_as::<_, AchievementProgress>(
            "SELECT * FROM achievement_status WHERE username = $1 \
             ORDER BY category, target_value",
        )
        .bind(username)
        .fetch_all(pool)
        .await
    }

    /// A user's completed achievements, newest unlock first.
    pub async fn completed(
        pool: &PgPool,
        username: &str,
    ) -> Result<Vec<UserAchievement>, sqlx::Error> {
        sqlx::query_as::<_, UserAchievement>(
            "SELECT * FROM user_achievements \
             WHERE username = $1 AND is_completed = TRUE \
             ORDER BY unlocked_at DESC",
        )
        .bind(username)
        .fetch_all(pool)
        .await
    }

    /// Unlock every achievement the progress view says is due, returning the
    /// newly unlocked rows.
    ///
    /// Completion is monotonic: rows already completed are skipped by the
    /// status view, so a second call with no new activity unlocks nothing.
    pub async fn check_and_unlock(
        pool: &PgPool,
        username: &str,
    ) -> Result<Vec<UserAchievement>, sqlx::Error> {
        let due = sqlx::query_as::<_, (DbId, i32)>(
            "SELECT achievement_id, calculated_progress \
             FROM achievement_status \
             WHERE username = $1 \
               AND should_be_completed = TRUE \
               AND is_completed = FALSE",
        )
        .bind(username)
        .fetch_all(pool)
        .await?;

        let mut unlocked = Vec::with_capacity(due.len());
        for (achievement_id, progress) in due {
            let result = sqlx::query_as::<_, UserAchievement>(
                "INSERT INTO user_achievements \
                     (username, achievement_id, progress_value, is_completed, unlocked_at) \
                 VALUES ($1, $2, $3, TRUE, NOW()) \
                 ON CONFLICT (username, achievement_id) DO UPDATE SET \
                     progress_value = $3, is_completed = TRUE, unlocked_at = NOW() \
                 RETURNING *",
            )
            .bind(username)
            .bind(achievement_id)
            .bind(progress)
            .fetch_one(pool)
            .await;

            match result {
                Ok(row) => unlocked.push(row),
                Err(err) => {
                    warn!(username, achievement_id, %err, "failed to unlock achievement");
                }
            }
        }

        Ok(unlocked)
    }

    /// Record partial progress without completing.
    pub async fn update_progress(
        pool: &PgPool,
        username: &str,
        achievement_id: DbId,
        progress_value: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_achievements \
                 (username, achievement_id, progress_value, is_completed) \
             VALUES ($1, $2, $3, FALSE) \
             ON CONFLICT (username, achievement_id) DO UPDATE SET progress_value = $3",
        )
        .bind(username)
        .bind(achievement_id)
        .bind(progress_value)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Aggregate completion/points summary for a user.
    pub async fn summary(
        pool: &PgPool,
        username: &str,
    ) -> Result<AchievementSummary, sqlx::Error> {
        sqlx::query_as::<_, AchievementSummary>(
            "SELECT \
                COUNT(*) AS total_achievements, \
                COUNT(CASE WHEN is_completed THEN 1 END) AS completed_achievements, \
                ROUND( \
                    (COUNT(CASE WHEN is_completed THEN 1 END)::NUMERIC \
                        / NULLIF(COUNT(*), 0)) * 100, 1 \
                )::FLOAT8 AS completion_percentage, \
                SUM(points)::BIGINT AS total_points_available, \
                SUM(CASE WHEN is_completed THEN points ELSE 0 END)::BIGINT \
                    AS total_points_earned \
             FROM achievement_status \
             WHERE username = $1",
        )
        .bind(username)
        .fetch_one(pool)
        .await
    }

    /// Recent unlocks across all users, joined to the catalog.
    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<RecentUnlock>, sqlx::Error> {
        sqlx::query_as::<_, RecentUnlock>(
            "SELECT ua.username, ua.unlocked_at, a.name, a.description, a.rarity, a.points \
             FROM user_achievements ua \
             JOIN achievements a ON ua.achievement_id = a.id \
             WHERE ua.is_completed = TRUE \
             ORDER BY ua.unlocked_at DESC \
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
