//! Relevance scoring constants and listing-sort whitelists.
//!
//! Search ranking is computed in SQL with a CASE ladder; the tier values
//! live here so the repository and its tests agree on the ordering. Higher
//! is better and ties break alphabetically by name.

// ---------------------------------------------------------------------------
// Relevance tiers
// ---------------------------------------------------------------------------

/// Case-insensitive exact match on the strain name.
pub const SCORE_EXACT_NAME: i32 = 1000;

/// Name starts with the query.
pub const SCORE_NAME_PREFIX: i32 = 900;

/// Case-insensitive exact match on an alias.
pub const SCORE_EXACT_ALIAS: i32 = 850;

/// An alias starts with the query.
pub const SCORE_ALIAS_PREFIX: i32 = 800;

/// The query appears at a word boundary inside the name.
pub const SCORE_WORD_BOUNDARY: i32 = 700;

/// Every whitespace-separated query token appears in the name.
pub const SCORE_MULTI_MATCH: i32 = 600;

/// The query appears anywhere in the name or an alias.
pub const SCORE_SUBSTRING: i32 = 500;

/// Default number of rows returned by a search.
pub const DEFAULT_SEARCH_LIMIT: i64 = 20;

/// Maximum number of rows returned by a search.
pub const MAX_SEARCH_LIMIT: i64 = 100;

/// Minimum query length; shorter queries return an empty result.
pub const MIN_QUERY_LEN: usize = 2;

/// Normalize a raw search query: trim whitespace and reject too-short input.
pub fn normalize_query(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.len() < MIN_QUERY_LEN {
        return None;
    }
    Some(trimmed.to_string())
}

// ---------------------------------------------------------------------------
// Listing sort
// ---------------------------------------------------------------------------

/// Sortable columns for strain listings. Anything else falls back to name,
/// so user input never reaches the ORDER BY clause directly.
pub const SORTABLE_COLUMNS: &[&str] = &["name", "rating", "review_count", "created_at"];

/// Map a requested sort key to a safe column name, defaulting to `name`.
pub fn sort_column(requested: Option<&str>) -> &'static str {
    match requested {
        Some("rating") => "rating",
        Some("review_count") => "review_count",
        Some("created_at") => "created_at",
        _ => "name",
    }
}

/// Map a requested sort direction to `ASC`/`DESC`, defaulting to ascending.
pub fn sort_direction(requested: Option<&str>) -> &'static str {
    match requested {
        Some(d) if d.eq_ignore_ascii_case("desc") => "DESC",
        _ => "ASC",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relevance_tiers_strictly_ordered() {
        let ladder = [
            SCORE_EXACT_NAME,
            SCORE_NAME_PREFIX,
            SCORE_EXACT_ALIAS,
            SCORE_ALIAS_PREFIX,
            SCORE_WORD_BOUNDARY,
            SCORE_MULTI_MATCH,
            SCORE_SUBSTRING,
        ];
        for pair in ladder.windows(2) {
            assert!(pair[0] > pair[1]);
        }
    }

    #[test]
    fn normalize_query_trims_and_rejects_short() {
        assert_eq!(normalize_query("  og kush  "), Some("og kush".to_string()));
        assert_eq!(normalize_query("a"), None);
        assert_eq!(normalize_query("   "), None);
        assert_eq!(normalize_query(" ok "), Some("ok".to_string()));
    }

    #[test]
    fn sort_column_whitelist() {
        assert_eq!(sort_column(None), "name");
        assert_eq!(sort_column(Some("review_count")), "review_count");
        assert_eq!(sort_column(Some("rating")), "rating");
        assert_eq!(sort_column(Some("; DROP TABLE strains")), "name");
    }

    #[test]
    fn sort_direction_defaults_ascending() {
        assert_eq!(sort_direction(None), "ASC");
        assert_eq!(sort_direction(Some("desc")), "DESC");
        assert_eq!(sort_direction(Some("DESC")), "DESC");
        assert_eq!(sort_direction(Some("sideways")), "ASC");
    }
}
