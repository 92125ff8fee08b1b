//! HTTP route definitions.
//!
//! REST routes live under `/api/rest`:
//!
//! | Method      | Path                                      | Handler                          |
//! |-------------|-------------------------------------------|----------------------------------|
//! | POST        | `/account/sign-up`                        | `auth::sign_up`                  |
//! | POST        | `/account/sign-in`                        | `auth::sign_in`                  |
//! | POST        | `/account/logout`                         | `auth::logout`                   |
//! | POST        | `/account/logout-all`                     | `auth::logout_all`               |
//! | POST        | `/account/request-password-reset`         | `auth::request_password_reset`   |
//! | POST        | `/account/reset-password`                 | `auth::reset_password`           |
//! | GET/POST/DELETE | `/account/favourites`                 | `account::*_favourite(s)`        |
//! | POST        | `/account/wishlist`                       | `account::add_wishlist`          |
//! | POST/DELETE | `/account/complete`                       | `account::*_complete`            |
//! | GET         | `/account/seen`                           | `account::list_seen`             |
//! | GET         | `/account/profile`                        | `account::profile`               |
//! | POST        | `/account/strains/status`                 | `account::strains_status`        |
//! | GET         | `/achievements`                           | `achievements::list_progress`    |
//! | POST        | `/achievements/check`                     | `achievements::check`            |
//! | GET         | `/achievements/category/{category}`       | `achievements::by_category`      |
//! | GET         | `/achievements/recent`                    | `achievements::recent`           |
//!
//! `GET /health` sits at the root, and the GraphQL endpoint at `/api/gql`.

pub mod account;
pub mod achievements;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// All REST routes, to be nested under `/api/rest`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/account", account::router())
        .nest("/achievements", achievements::router())
}
