//! Repository for leaderboard and analytics views.

use budedex_core::leaderboard::{
    Category, LEVEL_TIERS, WEIGHT_EFFECTS, WEIGHT_FAVOURITES, WEIGHT_FLAVORS,
    WEIGHT_MEDICAL_CONDITIONS, WEIGHT_SEEN, WEIGHT_TERPENES,
};
use sqlx::PgPool;
use tracing::debug;

use crate::models::leaderboard::{
    CategoryLeader, CategoryRankEntry, EffectPopularity, FlavorPopularity, GlobalStats,
    LeaderboardEntry, MedicalConditionPopularity, TerpenePopularity,
};

/// Provides read-only ranking and popularity queries.
pub struct LeaderboardRepo;

impl LeaderboardRepo {
    // -----------------------------------------------------------------------
    // Rankings
    // -----------------------------------------------------------------------

    /// A page of the overall `leaderboard` view with the total count.
    pub async fn overall(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<LeaderboardEntry>, i64), sqlx::Error> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM leaderboard")
            .fetch_one(pool)
            .await?;

        let rows = sqlx::query_as::<_, LeaderboardEntry>(
            "SELECT * FROM leaderboard ORDER BY overall_rank LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok((rows, total))
    }

    /// On-the-fly ranking over `user_totals` for a single category.
    ///
    /// Rank, score, and tier are computed in the query; zero-count rows are
    /// excluded. The column names come from the [`Category`] whitelist, never
    /// from user input.
    pub async fn category(
        pool: &PgPool,
        category: Category,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<CategoryRankEntry>, i64), sqlx::Error> {
        // Overall has no count column; callers route it to `overall`.
        let order_column = match category.order_column() {
            Some(c) => c,
            None => return Err(sqlx::Error::ColumnNotFound("order_column".into())),
        };

        let count_sql = format!("SELECT COUNT(*) FROM user_totals WHERE {order_column} > 0");
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .fetch_one(pool)
            .await?;

        let score_expr = format!(
            "(ut.favourites_count * {WEIGHT_FAVOURITES} + \
              ut.seen_count * {WEIGHT_SEEN} + \
              ut.unique_effects * {WEIGHT_EFFECTS} + \
              ut.unique_flavors * {WEIGHT_FLAVORS} + \
              ut.unique_terpenes * {WEIGHT_TERPENES} + \
              ut.unique_medical_conditions * {WEIGHT_MEDICAL_CONDITIONS})"
        );
        let tier_expr = tier_case_expr(&score_expr);

        let rows_sql = format!(
            "SELECT ut.username, ut.favourites_count, ut.seen_count, \
                    ut.unique_effects, ut.unique_flavors, ut.unique_terpenes, \
                    ut.unique_medical_conditions, ut.joined_date, \
                    ROW_NUMBER() OVER (ORDER BY {order_column} DESC) AS rank, \
                    {score_expr} AS total_score, \
                    {tier_expr} AS level_tier \
             FROM user_totals ut \
             WHERE {order_column} > 0 \
             ORDER BY {order_column} DESC \
             LIMIT $1 OFFSET $2"
        );

        let rows = sqlx::query_as::<_, CategoryRankEntry>(&rows_sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Ok((rows, total))
    }

    /// Top user per category from the `category_leaders` view.
    pub async fn category_leaders(pool: &PgPool) -> Result<Vec<CategoryLeader>, sqlx::Error> {
        sqlx::query_as::<_, CategoryLeader>(
            "SELECT * FROM category_leaders ORDER BY category, rank",
        )
        .fetch_all(pool)
        .await
    }

    /// A single user's row from the overall leaderboard, if ranked.
    pub async fn user_rank(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<LeaderboardEntry>, sqlx::Error> {
        sqlx::query_as::<_, LeaderboardEntry>("SELECT * FROM leaderboard WHERE username = $1")
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Placeholder kept for caller fidelity: scores are never persisted,
    /// every leaderboard read recomputes from current counts.
    pub async fn refresh_user_score(_pool: &PgPool, username: &str) -> Result<(), sqlx::Error> {
        debug!(username, "score refresh requested; scores are computed on read");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Popularity analytics
    // -----------------------------------------------------------------------

    /// Effect popularity across the catalog and user base.
    pub async fn effect_popularity(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<EffectPopularity>, sqlx::Error> {
        sqlx::query_as::<_, EffectPopularity>(
            "SELECT * FROM effect_popularity \
             ORDER BY strain_count DESC, user_interactions DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Flavor popularity across the catalog and user base.
    pub async fn flavor_popularity(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<FlavorPopularity>, sqlx::Error> {
        sqlx::query_as::<_, FlavorPopularity>(
            "SELECT * FROM flavor_popularity \
             ORDER BY strain_count DESC, user_interactions DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Terpene popularity across the catalog and user base.
    pub async fn terpene_popularity(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<TerpenePopularity>, sqlx::Error> {
        sqlx::query_as::<_, TerpenePopularity>(
            "SELECT * FROM terpene_popularity \
             ORDER BY strain_count DESC, user_interactions DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Medical-condition popularity, ranked by reach then effectiveness.
    pub async fn medical_condition_popularity(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<MedicalConditionPopularity>, sqlx::Error> {
        sqlx::query_as::<_, MedicalConditionPopularity>(
            "SELECT * FROM medical_condition_popularity \
             ORDER BY strain_count DESC, avg_effectiveness DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Catalog-wide counters, fanned out concurrently.
    pub async fn global_stats(pool: &PgPool) -> Result<GlobalStats, sqlx::Error> {
        let (
            total_strains,
            total_users,
            total_effects,
            total_flavors,
            total_terpenes,
            total_conditions,
            total_favourites,
            total_seen,
        ) = tokio::try_join!(
            count_table(pool, "strains"),
            count_table(pool, "users"),
            count_table(pool, "effects"),
            count_table(pool, "flavors"),
            count_table(pool, "terpenes"),
            count_table(pool, "medical_conditions"),
            count_table(pool, "favourited"),
            count_table(pool, "seen"),
        )?;

        Ok(GlobalStats {
            total_strains,
            total_users,
            total_effects,
            total_flavors,
            total_terpenes,
            total_conditions,
            total_favourites,
            total_seen,
        })
    }
}

/// COUNT(*) over a fixed table name.
async fn count_table(pool: &PgPool, table: &str) -> Result<i64, sqlx::Error> {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    sqlx::query_scalar::<_, i64>(&sql).fetch_one(pool).await
}

/// Render the level-tier threshold ladder as a SQL CASE over a score
/// expression, matching `budedex_core::leaderboard::level_tier`.
fn tier_case_expr(score_expr: &str) -> String {
    let mut case = String::from("CASE");
    for &(threshold, name) in LEVEL_TIERS {
        case.push_str(&format!(
            " WHEN {score_expr} >= {threshold} THEN '{name}'"
        ));
    }
    case.push_str(&format!(
        " ELSE '{}' END",
        budedex_core::leaderboard::BASE_TIER
    ));
    case
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_case_walks_ladder_highest_first() {
        let case = tier_case_expr("score");
        assert!(case.starts_with("CASE WHEN score >= 1000 THEN 'Master Cultivator'"));
        assert!(case.contains("WHEN score >= 50 THEN 'Budding Enthusiast'"));
        assert!(case.ends_with("ELSE 'Seedling' END"));
        let master = case.find("Master Cultivator").unwrap();
        let seedling = case.find("Seedling").unwrap();
        assert!(master < seedling);
    }
}
