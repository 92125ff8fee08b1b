//! Achievement routes: progress, unlocking, and recent activity.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::achievements;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(achievements::list_progress))
        .route("/check", post(achievements::check))
        .route("/category/{category}", get(achievements::by_category))
        .route("/recent", get(achievements::recent))
}
