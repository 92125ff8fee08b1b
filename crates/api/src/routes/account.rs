//! Account routes: credentials, sessions, and interaction tracking.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::SmartIpKeyExtractor;
use tower_governor::GovernorLayer;

use crate::handlers::{account, auth};
use crate::state::AppState;

/// Credential endpoints get a strict per-IP limit: a burst of 5, refilling
/// one attempt per minute. Brute forcing is also slowed by the account
/// lockout, but the limiter stops the noise before it reaches the database.
const CREDENTIAL_BURST: u32 = 5;
const CREDENTIAL_REFILL_SECS: u64 = 60;

pub fn router() -> Router<AppState> {
    let limiter_config = GovernorConfigBuilder::default()
        .key_extractor(SmartIpKeyExtractor)
        .per_second(CREDENTIAL_REFILL_SECS)
        .burst_size(CREDENTIAL_BURST)
        .finish()
        .expect("credential rate limiter config is non-zero");

    let credentials = Router::new()
        .route("/sign-up", post(auth::sign_up))
        .route("/sign-in", post(auth::sign_in))
        .route("/request-password-reset", post(auth::request_password_reset))
        .route("/reset-password", post(auth::reset_password))
        .layer(GovernorLayer::new(Arc::new(limiter_config)));

    Router::new()
        .merge(credentials)
        .route("/logout", post(auth::logout))
        .route("/logout-all", post(auth::logout_all))
        .route(
            "/favourites",
            get(account::list_favourites)
                .post(account::add_favourite)
                .delete(account::remove_favourite),
        )
        .route("/wishlist", post(account::add_wishlist))
        .route(
            "/complete",
            post(account::mark_complete).delete(account::remove_complete),
        )
        .route("/seen", get(account::list_seen))
        .route("/profile", get(account::profile))
        .route("/strains/status", post(account::strains_status))
}
