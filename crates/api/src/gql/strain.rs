//! Strain catalog resolvers.

use async_graphql::{Context, Object, Result};
use budedex_core::pagination::{offset, DEFAULT_PAGE_LIMIT};
use budedex_core::search::normalize_query;
use budedex_db::models::strain::{SearchFilters, StrainQuery};
use budedex_db::repositories::StrainRepo;
use budedex_db::DbPool;

use super::types::{
    bad_user_input, validate_limit, validate_page, GqlStrain, PageInfo, PaginatedSearchHits,
    PaginatedStrains,
};

#[derive(Default)]
pub struct StrainQueryRoot;

#[Object]
impl StrainQueryRoot {
    /// A page of the strain catalog, name ascending.
    async fn strains(
        &self,
        ctx: &Context<'_>,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<PaginatedStrains> {
        let (page, limit) = page_args(page, limit)?;
        let pool = ctx.data::<DbPool>()?;

        let query = StrainQuery {
            page,
            limit,
            ..Default::default()
        };
        let (rows, total) = StrainRepo::list_complete(pool, &query).await?;

        Ok(PaginatedStrains {
            items: rows.into_iter().map(Into::into).collect(),
            page_info: PageInfo::new(page, limit, total),
        })
    }

    /// One strain by exact name.
    async fn strain(&self, ctx: &Context<'_>, name: String) -> Result<Option<GqlStrain>> {
        let pool = ctx.data::<DbPool>()?;
        Ok(StrainRepo::get_complete(pool, &name).await?.map(Into::into))
    }

    /// Relevance-ranked substring search.
    async fn search_strains(
        &self,
        ctx: &Context<'_>,
        query: String,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<PaginatedSearchHits> {
        let (page, limit) = page_args(page, limit)?;
        let query = normalize_query(&query)
            .ok_or_else(|| bad_user_input("Search query must be at least 2 characters"))?;

        let pool = ctx.data::<DbPool>()?;
        let (rows, total) = StrainRepo::search(
            pool,
            &query,
            &SearchFilters::default(),
            limit,
            offset(page, limit),
        )
        .await?;

        Ok(PaginatedSearchHits {
            items: rows.into_iter().map(Into::into).collect(),
            page_info: PageInfo::new(page, limit, total),
        })
    }

    /// Exact case-insensitive match against names and aliases.
    async fn search_exact(&self, ctx: &Context<'_>, query: String) -> Result<Option<GqlStrain>> {
        let pool = ctx.data::<DbPool>()?;
        Ok(StrainRepo::search_exact(pool, &query).await?.map(Into::into))
    }

    /// Strains in one category, name ascending.
    async fn strains_by_category(
        &self,
        ctx: &Context<'_>,
        category: String,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<PaginatedStrains> {
        let (page, limit) = page_args(page, limit)?;
        let pool = ctx.data::<DbPool>()?;

        let (rows, total) =
            StrainRepo::by_category(pool, &category, limit, offset(page, limit)).await?;

        Ok(PaginatedStrains {
            items: rows.into_iter().map(Into::into).collect(),
            page_info: PageInfo::new(page, limit, total),
        })
    }

    /// Strains carrying one effect, best rated first.
    async fn strains_by_effect(
        &self,
        ctx: &Context<'_>,
        effect: String,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<PaginatedStrains> {
        let (page, limit) = page_args(page, limit)?;
        let pool = ctx.data::<DbPool>()?;

        let (rows, total) =
            StrainRepo::by_effect(pool, &effect, limit, offset(page, limit)).await?;

        Ok(PaginatedStrains {
            items: rows.into_iter().map(Into::into).collect(),
            page_info: PageInfo::new(page, limit, total),
        })
    }
}

/// Default and validate the shared page/limit arguments.
pub(super) fn page_args(page: Option<i64>, limit: Option<i64>) -> Result<(i64, i64)> {
    let page = validate_page(page.unwrap_or(1))?;
    let limit = validate_limit(limit.unwrap_or(DEFAULT_PAGE_LIMIT))?;
    Ok((page, limit))
}
