//! Leaderboard and analytics projections.
//!
//! Everything here is a read-only view row; the application never writes
//! scores or ranks back.

use budedex_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// Row from the `leaderboard` view (overall ranking).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub total_score: i64,
    pub overall_rank: i64,
    pub level_tier: String,
    pub favourites_count: i64,
    pub seen_count: i64,
    pub unique_effects: i64,
    pub unique_flavors: i64,
    pub unique_terpenes: i64,
    pub unique_medical_conditions: i64,
    pub favourites_rank: i64,
    pub seen_rank: i64,
    pub effects_rank: i64,
    pub flavors_rank: i64,
    pub terpenes_rank: i64,
    pub medical_conditions_rank: i64,
    pub joined_date: Timestamp,
}

/// On-the-fly category ranking row computed over `user_totals`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryRankEntry {
    pub username: String,
    pub favourites_count: i64,
    pub seen_count: i64,
    pub unique_effects: i64,
    pub unique_flavors: i64,
    pub unique_terpenes: i64,
    pub unique_medical_conditions: i64,
    pub joined_date: Timestamp,
    pub rank: i64,
    pub total_score: i64,
    pub level_tier: String,
}

/// Row from the `category_leaders` view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryLeader {
    pub category: String,
    pub username: String,
    pub count: i64,
    pub rank: i64,
}

/// Row from the `effect_popularity` view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EffectPopularity {
    pub effect: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub effect_type: String,
    pub strain_count: i64,
    pub user_interactions: i64,
}

/// Row from the `flavor_popularity` view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FlavorPopularity {
    pub flavor: String,
    pub strain_count: i64,
    pub user_interactions: i64,
}

/// Row from the `terpene_popularity` view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TerpenePopularity {
    pub terpene_name: String,
    pub terpene_type: Option<String>,
    pub strain_count: i64,
    pub user_interactions: i64,
}

/// Row from the `medical_condition_popularity` view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MedicalConditionPopularity {
    pub condition_name: String,
    pub strain_count: i64,
    pub avg_effectiveness: Option<f64>,
    pub user_interactions: i64,
}

/// Catalog-wide counters.
#[derive(Debug, Clone, Serialize)]
pub struct GlobalStats {
    pub total_strains: i64,
    pub total_users: i64,
    pub total_effects: i64,
    pub total_flavors: i64,
    pub total_terpenes: i64,
    pub total_conditions: i64,
    pub total_favourites: i64,
    pub total_seen: i64,
}
