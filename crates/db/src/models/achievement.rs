//! Achievement catalog and per-user progress models.

use budedex_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Row from the static `achievements` catalog.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Achievement {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub category: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub achievement_type: String,
    pub target_value: i32,
    pub icon: Option<String>,
    pub rarity: String,
    pub points: i32,
    pub created_at: Timestamp,
}

/// Row from the `user_achievements` join table.
///
/// Completion is monotonic: the unlock path only upgrades, never reverts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserAchievement {
    pub id: DbId,
    pub username: String,
    pub achievement_id: DbId,
    pub progress_value: i32,
    pub is_completed: bool,
    pub unlocked_at: Option<Timestamp>,
}

/// Row from the `achievement_status` view: catalog joined with derived
/// progress. The view's derivation is opaque to this layer.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AchievementProgress {
    pub username: String,
    pub achievement_id: DbId,
    pub name: String,
    pub description: String,
    pub category: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub achievement_type: String,
    pub target_value: i32,
    pub icon: Option<String>,
    pub rarity: String,
    pub points: i32,
    pub calculated_progress: i32,
    pub should_be_completed: bool,
    pub is_completed: bool,
    pub unlocked_at: Option<Timestamp>,
}

/// Aggregate summary over a user's `achievement_status` rows.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AchievementSummary {
    pub total_achievements: i64,
    pub completed_achievements: i64,
    pub completion_percentage: Option<f64>,
    pub total_points_available: Option<i64>,
    pub total_points_earned: Option<i64>,
}

/// A recent unlock joined to its catalog entry, across all users.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecentUnlock {
    pub username: String,
    pub unlocked_at: Option<Timestamp>,
    pub name: String,
    pub description: String,
    pub rarity: String,
    pub points: i32,
}
