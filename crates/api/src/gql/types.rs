//! GraphQL object types and argument validation.

use async_graphql::{Error, ErrorExtensions, Result, SimpleObject};
use budedex_core::pagination::Pagination;
use budedex_core::types::Timestamp;
use budedex_db::models::leaderboard::{CategoryLeader, CategoryRankEntry, LeaderboardEntry};
use budedex_db::models::strain::{StrainComplete, StrainSearchHit};

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Page metadata embedded in every paginated result.
#[derive(Debug, SimpleObject)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub current_page: i64,
    pub total_pages: i64,
    pub total: i64,
}

impl PageInfo {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let p = Pagination::new(page, limit, total);
        Self {
            has_next_page: p.has_next,
            has_previous_page: p.has_prev,
            current_page: p.page,
            total_pages: p.pages,
            total,
        }
    }
}

/// An invalid-argument error carrying the `BAD_USER_INPUT` code extension.
pub fn bad_user_input(message: &str) -> Error {
    Error::new(message).extend_with(|_, ext| ext.set("code", "BAD_USER_INPUT"))
}

pub fn validate_page(page: i64) -> Result<i64> {
    if page < 1 {
        return Err(bad_user_input("Page must be greater than 0"));
    }
    Ok(page)
}

pub fn validate_limit(limit: i64) -> Result<i64> {
    if !(1..=100).contains(&limit) {
        return Err(bad_user_input("Limit must be between 1 and 100"));
    }
    Ok(limit)
}

// ---------------------------------------------------------------------------
// Strains
// ---------------------------------------------------------------------------

/// A strain with its aggregated taxonomy and genetics.
#[derive(Debug, SimpleObject)]
pub struct GqlStrain {
    pub name: String,
    pub url: Option<String>,
    #[graphql(name = "type")]
    pub strain_type: String,
    pub thc: Option<String>,
    pub cbd: Option<String>,
    pub rating: Option<f64>,
    pub review_count: i32,
    pub top_effect: Option<String>,
    pub category: Option<String>,
    pub image_path: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub aliases: Option<String>,
    pub positive_effects: Option<String>,
    pub negative_effects: Option<String>,
    pub flavors: Option<String>,
    pub terpenes: Option<String>,
    pub medical_benefits: Option<String>,
    pub parents: Option<String>,
    pub children: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<StrainComplete> for GqlStrain {
    fn from(row: StrainComplete) -> Self {
        let s = row.strain;
        Self {
            name: s.name,
            url: s.url,
            strain_type: s.strain_type,
            thc: s.thc,
            cbd: s.cbd,
            rating: s.rating,
            review_count: s.review_count,
            top_effect: s.top_effect,
            category: s.category,
            image_path: s.image_path,
            image_url: s.image_url,
            description: s.description,
            aliases: row.aliases,
            positive_effects: row.positive_effects,
            negative_effects: row.negative_effects,
            flavors: row.flavors,
            terpenes: row.terpenes,
            medical_benefits: row.medical_benefits,
            parents: row.parents,
            children: row.children,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, SimpleObject)]
pub struct PaginatedStrains {
    pub items: Vec<GqlStrain>,
    pub page_info: PageInfo,
}

/// A relevance-ranked search hit.
#[derive(Debug, SimpleObject)]
pub struct GqlSearchHit {
    pub name: String,
    #[graphql(name = "type")]
    pub strain_type: String,
    pub rating: Option<f64>,
    pub review_count: i32,
    pub top_effect: Option<String>,
    pub category: Option<String>,
    pub image_path: Option<String>,
    pub description: Option<String>,
    pub relevance_score: i32,
}

impl From<StrainSearchHit> for GqlSearchHit {
    fn from(row: StrainSearchHit) -> Self {
        Self {
            name: row.name,
            strain_type: row.strain_type,
            rating: row.rating,
            review_count: row.review_count,
            top_effect: row.top_effect,
            category: row.category,
            image_path: row.image_path,
            description: row.description,
            relevance_score: row.relevance_score,
        }
    }
}

#[derive(Debug, SimpleObject)]
pub struct PaginatedSearchHits {
    pub items: Vec<GqlSearchHit>,
    pub page_info: PageInfo,
}

// ---------------------------------------------------------------------------
// Leaderboard
// ---------------------------------------------------------------------------

/// A ranked user on the overall leaderboard.
#[derive(Debug, SimpleObject)]
pub struct GqlLeaderboardEntry {
    pub username: String,
    pub total_score: i64,
    pub overall_rank: i64,
    pub level_tier: String,
    pub favourites_count: i64,
    pub seen_count: i64,
    pub unique_effects: i64,
    pub unique_flavors: i64,
    pub unique_terpenes: i64,
    pub unique_medical_conditions: i64,
    pub favourites_rank: i64,
    pub seen_rank: i64,
    pub effects_rank: i64,
    pub flavors_rank: i64,
    pub terpenes_rank: i64,
    pub medical_conditions_rank: i64,
    pub joined_date: Timestamp,
}

impl From<LeaderboardEntry> for GqlLeaderboardEntry {
    fn from(row: LeaderboardEntry) -> Self {
        Self {
            username: row.username,
            total_score: row.total_score,
            overall_rank: row.overall_rank,
            level_tier: row.level_tier,
            favourites_count: row.favourites_count,
            seen_count: row.seen_count,
            unique_effects: row.unique_effects,
            unique_flavors: row.unique_flavors,
            unique_terpenes: row.unique_terpenes,
            unique_medical_conditions: row.unique_medical_conditions,
            favourites_rank: row.favourites_rank,
            seen_rank: row.seen_rank,
            effects_rank: row.effects_rank,
            flavors_rank: row.flavors_rank,
            terpenes_rank: row.terpenes_rank,
            medical_conditions_rank: row.medical_conditions_rank,
            joined_date: row.joined_date,
        }
    }
}

#[derive(Debug, SimpleObject)]
pub struct LeaderboardResult {
    pub entries: Vec<GqlLeaderboardEntry>,
    pub page_info: PageInfo,
}

/// A ranked user within a single activity category.
#[derive(Debug, SimpleObject)]
pub struct GqlCategoryRankEntry {
    pub username: String,
    pub rank: i64,
    pub total_score: i64,
    pub level_tier: String,
    pub favourites_count: i64,
    pub seen_count: i64,
    pub unique_effects: i64,
    pub unique_flavors: i64,
    pub unique_terpenes: i64,
    pub unique_medical_conditions: i64,
    pub joined_date: Timestamp,
}

impl From<CategoryRankEntry> for GqlCategoryRankEntry {
    fn from(row: CategoryRankEntry) -> Self {
        Self {
            username: row.username,
            rank: row.rank,
            total_score: row.total_score,
            level_tier: row.level_tier,
            favourites_count: row.favourites_count,
            seen_count: row.seen_count,
            unique_effects: row.unique_effects,
            unique_flavors: row.unique_flavors,
            unique_terpenes: row.unique_terpenes,
            unique_medical_conditions: row.unique_medical_conditions,
            joined_date: row.joined_date,
        }
    }
}

#[derive(Debug, SimpleObject)]
pub struct CategoryLeaderboardResult {
    pub entries: Vec<GqlCategoryRankEntry>,
    pub page_info: PageInfo,
}

/// The top user in one activity category.
#[derive(Debug, SimpleObject)]
pub struct GqlCategoryLeader {
    pub category: String,
    pub username: String,
    pub count: i64,
    pub rank: i64,
}

impl From<CategoryLeader> for GqlCategoryLeader {
    fn from(row: CategoryLeader) -> Self {
        Self {
            category: row.category,
            username: row.username,
            count: row.count,
            rank: row.rank,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_info_derives_from_pagination() {
        let info = PageInfo::new(2, 20, 45);
        assert_eq!(info.current_page, 2);
        assert_eq!(info.total_pages, 3);
        assert_eq!(info.total, 45);
        assert!(info.has_next_page);
        assert!(info.has_previous_page);
    }

    #[test]
    fn page_and_limit_bounds() {
        assert!(validate_page(1).is_ok());
        assert!(validate_page(0).is_err());
        assert!(validate_limit(100).is_ok());
        assert!(validate_limit(0).is_err());
        assert!(validate_limit(101).is_err());
    }

    #[test]
    fn bad_user_input_sets_code_extension() {
        let err = bad_user_input("Page must be greater than 0");
        assert_eq!(err.message, "Page must be greater than 0");
        let extensions = format!("{:?}", err.extensions.expect("extensions set"));
        assert!(extensions.contains("BAD_USER_INPUT"));
    }
}
