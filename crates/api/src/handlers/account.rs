//! Handlers for favourites/seen tracking, profile, and status checks.
//!
//! The wishlist and complete actions alias onto the favourites and seen
//! tables; three client intents share two tables, and the wishlist listing
//! is always empty. That mapping is deliberate and mirrored by the clients.

use axum::extract::{Query, State};
use axum::Json;
use budedex_core::leaderboard::{calculate_score, ActivityCounts};
use budedex_core::pagination::offset;
use budedex_db::models::user::{FavouritedStrain, SeenStrain, StrainStatus, User};
use budedex_db::repositories::{InteractionRepo, LeaderboardRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::{ApiResponse, Paginated};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body naming a single strain.
#[derive(Debug, Deserialize)]
pub struct StrainAction {
    pub strain_name: String,
}

/// Request body for the batch status check.
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub strain_names: Vec<String>,
}

/// Payload for `GET /account/profile`.
#[derive(Debug, Serialize)]
pub struct ProfileData {
    pub user: User,
    pub stats: ProfileStats,
    pub favourites: Paginated<FavouritedStrain>,
    pub wishlist: Paginated<FavouritedStrain>,
    pub completed: Paginated<SeenStrain>,
}

#[derive(Debug, Serialize)]
pub struct ProfileStats {
    pub favourites: i64,
    pub wishlist: i64,
    pub completed: i64,
    pub score: i64,
    pub rank: Option<i64>,
}

// ---------------------------------------------------------------------------
// Favourites
// ---------------------------------------------------------------------------

/// POST /api/rest/account/favourites
///
/// Idempotent: re-adding an existing favourite is a silent no-op.
pub async fn add_favourite(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<StrainAction>,
) -> AppResult<Json<ApiResponse<()>>> {
    InteractionRepo::add_favourite(&state.pool, &user.username, &input.strain_name).await?;
    LeaderboardRepo::refresh_user_score(&state.pool, &user.username).await?;

    Ok(Json(ApiResponse::message("Added to favourites successfully")))
}

/// DELETE /api/rest/account/favourites
pub async fn remove_favourite(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<StrainAction>,
) -> AppResult<Json<ApiResponse<()>>> {
    InteractionRepo::remove_favourite(&state.pool, &user.username, &input.strain_name).await?;

    Ok(Json(ApiResponse::message(
        "Removed from favourites successfully",
    )))
}

/// GET /api/rest/account/favourites
pub async fn list_favourites(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<PageParams>,
) -> AppResult<Json<ApiResponse<Paginated<FavouritedStrain>>>> {
    let (page, limit) = params.clamped();
    let (items, total) =
        InteractionRepo::list_favourites(&state.pool, &user.username, limit, offset(page, limit))
            .await?;

    Ok(Json(ApiResponse::data(Paginated::new(
        items, page, limit, total,
    ))))
}

/// POST /api/rest/account/wishlist
///
/// Aliased onto the favourites table.
pub async fn add_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<StrainAction>,
) -> AppResult<Json<ApiResponse<()>>> {
    InteractionRepo::add_favourite(&state.pool, &user.username, &input.strain_name).await?;
    LeaderboardRepo::refresh_user_score(&state.pool, &user.username).await?;

    Ok(Json(ApiResponse::message("Added to wishlist successfully")))
}

// ---------------------------------------------------------------------------
// Seen
// ---------------------------------------------------------------------------

/// POST /api/rest/account/complete
///
/// Aliased onto the seen table; repeats refresh the timestamp.
pub async fn mark_complete(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<StrainAction>,
) -> AppResult<Json<ApiResponse<()>>> {
    InteractionRepo::mark_seen(&state.pool, &user.username, &input.strain_name).await?;
    LeaderboardRepo::refresh_user_score(&state.pool, &user.username).await?;

    Ok(Json(ApiResponse::message("Marked as complete successfully")))
}

/// DELETE /api/rest/account/complete
pub async fn remove_complete(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<StrainAction>,
) -> AppResult<Json<ApiResponse<()>>> {
    InteractionRepo::remove_seen(&state.pool, &user.username, &input.strain_name).await?;

    Ok(Json(ApiResponse::message(
        "Removed from completed successfully",
    )))
}

/// GET /api/rest/account/seen
pub async fn list_seen(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<PageParams>,
) -> AppResult<Json<ApiResponse<Paginated<SeenStrain>>>> {
    let (page, limit) = params.clamped();
    let (items, total) =
        InteractionRepo::list_seen(&state.pool, &user.username, limit, offset(page, limit))
            .await?;

    Ok(Json(ApiResponse::data(Paginated::new(
        items, page, limit, total,
    ))))
}

// ---------------------------------------------------------------------------
// Profile & status
// ---------------------------------------------------------------------------

/// GET /api/rest/account/profile
///
/// Fans out the listings and rank lookups concurrently; any one failure
/// fails the whole request.
pub async fn profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<ProfileData>>> {
    let username = user.username.clone();

    let (user_row, (favourites, fav_total), (completed, seen_total), totals, rank) = tokio::try_join!(
        UserRepo::find_by_username(&state.pool, &username),
        InteractionRepo::list_favourites(&state.pool, &username, 20, 0),
        InteractionRepo::list_seen(&state.pool, &username, 20, 0),
        UserRepo::totals(&state.pool, &username),
        LeaderboardRepo::user_rank(&state.pool, &username),
    )?;

    let user_row = user_row.ok_or_else(|| {
        AppError::Core(budedex_core::error::CoreError::Unauthorized(
            "User no longer exists".into(),
        ))
    })?;

    let score = totals
        .map(|t| {
            calculate_score(&ActivityCounts {
                favourites: t.favourites_count,
                seen: t.seen_count,
                unique_effects: t.unique_effects,
                unique_flavors: t.unique_flavors,
                unique_terpenes: t.unique_terpenes,
                unique_medical_conditions: t.unique_medical_conditions,
            })
        })
        .unwrap_or(0);

    Ok(Json(ApiResponse::data(ProfileData {
        user: user_row,
        stats: ProfileStats {
            favourites: fav_total,
            wishlist: 0,
            completed: seen_total,
            score,
            rank: rank.map(|r| r.overall_rank),
        },
        favourites: Paginated::new(favourites, 1, 20, fav_total),
        wishlist: Paginated::new(Vec::new(), 1, 20, 0),
        completed: Paginated::new(completed, 1, 20, seen_total),
    })))
}

/// POST /api/rest/account/strains/status
///
/// Liked/seen flags for a batch of strain names.
pub async fn strains_status(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<StatusRequest>,
) -> AppResult<Json<ApiResponse<Vec<StrainStatus>>>> {
    if input.strain_names.is_empty() {
        return Ok(Json(ApiResponse::data(Vec::new())));
    }

    let statuses =
        InteractionRepo::status_batch(&state.pool, &user.username, &input.strain_names).await?;

    Ok(Json(ApiResponse::data(statuses)))
}
