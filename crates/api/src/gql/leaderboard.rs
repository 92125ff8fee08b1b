//! Leaderboard resolvers.

use async_graphql::{Context, Object, Result};
use budedex_core::leaderboard::Category;
use budedex_core::pagination::offset;
use budedex_db::repositories::LeaderboardRepo;
use budedex_db::DbPool;

use super::strain::page_args;
use super::types::{
    bad_user_input, CategoryLeaderboardResult, GqlCategoryLeader, GqlLeaderboardEntry,
    LeaderboardResult, PageInfo,
};

#[derive(Default)]
pub struct LeaderboardQueryRoot;

#[Object]
impl LeaderboardQueryRoot {
    /// A page of the overall leaderboard, best score first.
    async fn leaderboard(
        &self,
        ctx: &Context<'_>,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<LeaderboardResult> {
        let (page, limit) = page_args(page, limit)?;
        let pool = ctx.data::<DbPool>()?;

        let (rows, total) = LeaderboardRepo::overall(pool, limit, offset(page, limit)).await?;

        Ok(LeaderboardResult {
            entries: rows.into_iter().map(Into::into).collect(),
            page_info: PageInfo::new(page, limit, total),
        })
    }

    /// A page of the ranking within one activity category. The `overall`
    /// category lives on `leaderboard` instead.
    async fn category_leaderboard(
        &self,
        ctx: &Context<'_>,
        category: String,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<CategoryLeaderboardResult> {
        let (page, limit) = page_args(page, limit)?;
        let parsed = Category::parse(&category)
            .filter(|c| *c != Category::Overall)
            .ok_or_else(|| bad_user_input("Invalid leaderboard category"))?;

        let pool = ctx.data::<DbPool>()?;
        let (rows, total) =
            LeaderboardRepo::category(pool, parsed, limit, offset(page, limit)).await?;

        Ok(CategoryLeaderboardResult {
            entries: rows.into_iter().map(Into::into).collect(),
            page_info: PageInfo::new(page, limit, total),
        })
    }

    /// The top user per activity category.
    async fn category_leaders(&self, ctx: &Context<'_>) -> Result<Vec<GqlCategoryLeader>> {
        let pool = ctx.data::<DbPool>()?;
        let rows = LeaderboardRepo::category_leaders(pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// A single user's leaderboard row, if they are ranked.
    async fn user_rank(
        &self,
        ctx: &Context<'_>,
        username: String,
    ) -> Result<Option<GqlLeaderboardEntry>> {
        let pool = ctx.data::<DbPool>()?;
        Ok(LeaderboardRepo::user_rank(pool, &username)
            .await?
            .map(Into::into))
    }
}
