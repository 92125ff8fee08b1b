use std::sync::Arc;

use crate::config::ServerConfig;
use crate::gql::ApiSchema;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: budedex_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The GraphQL schema, built once at startup.
    pub schema: ApiSchema,
}
