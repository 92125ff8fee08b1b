//! Handlers for achievement progress, unlocking, and recent activity.

use axum::extract::{Path, Query, State};
use axum::Json;
use budedex_core::achievement::{category_description, category_title, completion_percentage};
use budedex_db::models::achievement::{
    AchievementProgress, AchievementSummary, RecentUnlock, UserAchievement,
};
use budedex_db::repositories::AchievementRepo;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// One achievement with its derived completion percentage.
#[derive(Debug, Serialize)]
pub struct ProgressItem {
    #[serde(flatten)]
    pub progress: AchievementProgress,
    pub completion_percentage: i64,
}

/// Achievements grouped under one category, with display strings.
#[derive(Debug, Serialize)]
pub struct CategoryProgress {
    pub key: String,
    pub title: String,
    pub description: String,
    pub achievements: Vec<ProgressItem>,
}

/// Payload for `GET /achievements`.
#[derive(Debug, Serialize)]
pub struct AchievementsData {
    pub categories: Vec<CategoryProgress>,
    pub summary: AchievementSummary,
}

/// Payload for `POST /achievements/check`.
#[derive(Debug, Serialize)]
pub struct UnlockData {
    pub newly_unlocked: Vec<UserAchievement>,
}

#[derive(Debug, Deserialize)]
pub struct RecentParams {
    pub limit: Option<i64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/rest/achievements
///
/// Full progress for the authenticated user, grouped by category, plus the
/// aggregate summary.
pub async fn list_progress(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<AchievementsData>>> {
    let (rows, summary) = tokio::try_join!(
        AchievementRepo::progress(&state.pool, &user.username),
        AchievementRepo::summary(&state.pool, &user.username),
    )?;

    Ok(Json(ApiResponse::data(AchievementsData {
        categories: group_by_category(rows),
        summary,
    })))
}

/// POST /api/rest/achievements/check
///
/// Unlock everything the progress view says is due. Idempotent: with no new
/// activity since the last call this unlocks nothing.
pub async fn check(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<UnlockData>>> {
    let newly_unlocked = AchievementRepo::check_and_unlock(&state.pool, &user.username).await?;

    let message = match newly_unlocked.len() {
        0 => "No new achievements unlocked".to_string(),
        1 => "1 new achievement unlocked".to_string(),
        n => format!("{n} new achievements unlocked"),
    };

    Ok(Json(ApiResponse::with_message(
        message,
        UnlockData { newly_unlocked },
    )))
}

/// GET /api/rest/achievements/category/{category}
///
/// Progress for one category. An unknown category yields an empty group
/// rather than a 404; the catalog is data, not routes.
pub async fn by_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(category): Path<String>,
) -> AppResult<Json<ApiResponse<CategoryProgress>>> {
    let rows = AchievementRepo::progress(&state.pool, &user.username).await?;
    let achievements = rows
        .into_iter()
        .filter(|p| p.category == category)
        .map(into_item)
        .collect();

    Ok(Json(ApiResponse::data(CategoryProgress {
        title: category_title(&category).to_string(),
        description: category_description(&category).to_string(),
        key: category,
        achievements,
    })))
}

/// GET /api/rest/achievements/recent
///
/// Recent unlocks across all users. Public.
pub async fn recent(
    State(state): State<AppState>,
    Query(params): Query<RecentParams>,
) -> AppResult<Json<ApiResponse<Vec<RecentUnlock>>>> {
    let limit = params.limit.unwrap_or(10).clamp(1, 50);
    let rows = AchievementRepo::recent(&state.pool, limit).await?;

    Ok(Json(ApiResponse::data(rows)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn into_item(progress: AchievementProgress) -> ProgressItem {
    let pct = completion_percentage(
        i64::from(progress.calculated_progress),
        i64::from(progress.target_value),
    );
    ProgressItem {
        progress,
        completion_percentage: pct,
    }
}

/// Group progress rows by category, preserving the query's category order.
fn group_by_category(rows: Vec<AchievementProgress>) -> Vec<CategoryProgress> {
    let mut categories: Vec<CategoryProgress> = Vec::new();
    for row in rows {
        match categories.last_mut() {
            Some(group) if group.key == row.category => group.achievements.push(into_item(row)),
            _ => categories.push(CategoryProgress {
                key: row.category.clone(),
                title: category_title(&row.category).to_string(),
                description: category_description(&row.category).to_string(),
                achievements: vec![into_item(row)],
            }),
        }
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress_row(category: &str, target: i32, current: i32) -> AchievementProgress {
        AchievementProgress {
            username: "tester".into(),
            achievement_id: 1,
            name: format!("{category} {target}"),
            description: String::new(),
            category: category.into(),
            achievement_type: "count".into(),
            target_value: target,
            icon: None,
            rarity: "common".into(),
            points: 10,
            calculated_progress: current,
            should_be_completed: current >= target,
            is_completed: false,
            unlocked_at: None,
        }
    }

    #[test]
    fn grouping_preserves_category_order() {
        let rows = vec![
            progress_row("effects", 5, 2),
            progress_row("effects", 10, 2),
            progress_row("terpenes", 3, 3),
        ];
        let groups = group_by_category(rows);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "effects");
        assert_eq!(groups[0].title, "Effects Explorer");
        assert_eq!(groups[0].achievements.len(), 2);
        assert_eq!(groups[1].key, "terpenes");
        assert_eq!(groups[1].achievements.len(), 1);
    }

    #[test]
    fn items_carry_capped_completion() {
        let item = into_item(progress_row("effects", 10, 25));
        assert_eq!(item.completion_percentage, 100);
        let item = into_item(progress_row("effects", 10, 4));
        assert_eq!(item.completion_percentage, 40);
    }
}
