//! GraphQL endpoint: a query-only schema over the strain catalog and
//! leaderboard.
//!
//! The schema carries the database pool as context data; the axum handler
//! injects the optionally-authenticated user per request so resolvers can
//! personalize without requiring auth.

pub mod leaderboard;
pub mod strain;
pub mod types;

use async_graphql::{EmptyMutation, EmptySubscription, MergedObject, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;

use crate::middleware::auth::OptionalAuthUser;
use crate::state::AppState;

/// Root query object combining the resolver groups.
#[derive(MergedObject, Default)]
pub struct QueryRoot(strain::StrainQueryRoot, leaderboard::LeaderboardQueryRoot);

pub type ApiSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

/// Build the schema with the pool installed as context data.
pub fn build_schema(pool: budedex_db::DbPool) -> ApiSchema {
    Schema::build(QueryRoot::default(), EmptyMutation, EmptySubscription)
        .data(pool)
        .finish()
}

/// POST /api/gql
pub async fn graphql_handler(
    State(state): State<AppState>,
    user: OptionalAuthUser,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let request = req.into_inner().data(user);
    state.schema.execute(request).await.into()
}
