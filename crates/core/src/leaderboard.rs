//! Leaderboard scoring, level tiers, and category mapping.
//!
//! The weighted score and tier thresholds are business constants; the SQL in
//! the leaderboard repository embeds the same numbers, so any change here
//! must be mirrored there. Score and rank are never persisted -- every read
//! recomputes them from current activity counts.

// ---------------------------------------------------------------------------
// Score weights
// ---------------------------------------------------------------------------

/// Points per favourited strain.
pub const WEIGHT_FAVOURITES: i64 = 10;

/// Points per seen strain.
pub const WEIGHT_SEEN: i64 = 5;

/// Points per unique effect encountered.
pub const WEIGHT_EFFECTS: i64 = 15;

/// Points per unique flavor encountered.
pub const WEIGHT_FLAVORS: i64 = 12;

/// Points per unique terpene encountered.
pub const WEIGHT_TERPENES: i64 = 20;

/// Points per unique medical condition encountered.
pub const WEIGHT_MEDICAL_CONDITIONS: i64 = 18;

/// Raw per-category activity counts for a user.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivityCounts {
    pub favourites: i64,
    pub seen: i64,
    pub unique_effects: i64,
    pub unique_flavors: i64,
    pub unique_terpenes: i64,
    pub unique_medical_conditions: i64,
}

/// Compute the weighted activity score.
pub fn calculate_score(counts: &ActivityCounts) -> i64 {
    counts.favourites * WEIGHT_FAVOURITES
        + counts.seen * WEIGHT_SEEN
        + counts.unique_effects * WEIGHT_EFFECTS
        + counts.unique_flavors * WEIGHT_FLAVORS
        + counts.unique_terpenes * WEIGHT_TERPENES
        + counts.unique_medical_conditions * WEIGHT_MEDICAL_CONDITIONS
}

// ---------------------------------------------------------------------------
// Level tiers
// ---------------------------------------------------------------------------

/// Tier thresholds, highest first: (minimum score, tier name).
pub const LEVEL_TIERS: &[(i64, &str)] = &[
    (1000, "Master Cultivator"),
    (500, "Expert Grower"),
    (250, "Advanced User"),
    (100, "Experienced"),
    (50, "Budding Enthusiast"),
];

/// Tier name for users below every threshold.
pub const BASE_TIER: &str = "Seedling";

/// Resolve the level tier for a score.
pub fn level_tier(score: i64) -> &'static str {
    for &(threshold, name) in LEVEL_TIERS {
        if score >= threshold {
            return name;
        }
    }
    BASE_TIER
}

/// The next tier above `current` and the score needed to reach it.
///
/// The top tier reports itself with no reachable threshold.
pub fn next_level_threshold(current: &str) -> (&'static str, Option<i64>) {
    match current {
        "Seedling" => ("Budding Enthusiast", Some(50)),
        "Budding Enthusiast" => ("Experienced", Some(100)),
        "Experienced" => ("Advanced User", Some(250)),
        "Advanced User" => ("Expert Grower", Some(500)),
        "Expert Grower" => ("Master Cultivator", Some(1000)),
        _ => ("Master Cultivator", None),
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Leaderboard categories with on-the-fly ranking over `user_totals`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Overall,
    Favourites,
    Seen,
    Effects,
    Flavors,
    Terpenes,
    MedicalConditions,
}

impl Category {
    /// Parse a category slug. Unknown slugs are rejected rather than
    /// silently defaulting, so callers can surface a validation error.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "overall" => Some(Self::Overall),
            "favourites" => Some(Self::Favourites),
            "seen" => Some(Self::Seen),
            "effects" => Some(Self::Effects),
            "flavors" => Some(Self::Flavors),
            "terpenes" => Some(Self::Terpenes),
            "medical_conditions" => Some(Self::MedicalConditions),
            _ => None,
        }
    }

    /// The `user_totals` count column this category ranks by.
    ///
    /// `Overall` has no single column; it reads the precomputed
    /// `leaderboard` view instead.
    pub fn order_column(self) -> Option<&'static str> {
        match self {
            Self::Overall => None,
            Self::Favourites => Some("favourites_count"),
            Self::Seen => Some("seen_count"),
            Self::Effects => Some("unique_effects"),
            Self::Flavors => Some("unique_flavors"),
            Self::Terpenes => Some("unique_terpenes"),
            Self::MedicalConditions => Some("unique_medical_conditions"),
        }
    }

    /// The alias the computed rank column is exposed under.
    pub fn rank_column(self) -> Option<&'static str> {
        match self {
            Self::Overall => None,
            Self::Favourites => Some("favourites_rank"),
            Self::Seen => Some("seen_rank"),
            Self::Effects => Some("effects_rank"),
            Self::Flavors => Some("flavors_rank"),
            Self::Terpenes => Some("terpenes_rank"),
            Self::MedicalConditions => Some("medical_conditions_rank"),
        }
    }
}

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

/// Percentile of a rank within `total` ranked users (rank 1 = 100th).
pub fn percentile(rank: i64, total: i64) -> i64 {
    if total == 0 {
        return 100;
    }
    (((total - rank + 1) as f64 / total as f64) * 100.0).round() as i64
}

/// Ordinal display for a rank: 1st, 2nd, 3rd, 4th, ...
pub fn format_rank(rank: i64) -> String {
    match rank {
        1 => "1st".to_string(),
        2 => "2nd".to_string(),
        3 => "3rd".to_string(),
        n => format!("{n}th"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_uses_fixed_weights() {
        // favourites=10, seen=20, effects=5, flavors=3, terpenes=2, medical=1
        // = 100 + 100 + 75 + 36 + 40 + 18 = 369
        let counts = ActivityCounts {
            favourites: 10,
            seen: 20,
            unique_effects: 5,
            unique_flavors: 3,
            unique_terpenes: 2,
            unique_medical_conditions: 1,
        };
        assert_eq!(calculate_score(&counts), 369);
    }

    #[test]
    fn zero_activity_scores_zero() {
        assert_eq!(calculate_score(&ActivityCounts::default()), 0);
    }

    #[test]
    fn tier_ladder_boundaries() {
        assert_eq!(level_tier(0), "Seedling");
        assert_eq!(level_tier(49), "Seedling");
        assert_eq!(level_tier(50), "Budding Enthusiast");
        assert_eq!(level_tier(99), "Budding Enthusiast");
        assert_eq!(level_tier(100), "Experienced");
        assert_eq!(level_tier(250), "Advanced User");
        assert_eq!(level_tier(369), "Advanced User");
        assert_eq!(level_tier(500), "Expert Grower");
        assert_eq!(level_tier(999), "Expert Grower");
        assert_eq!(level_tier(1000), "Master Cultivator");
    }

    #[test]
    fn next_level_walks_the_ladder() {
        assert_eq!(next_level_threshold("Seedling"), ("Budding Enthusiast", Some(50)));
        assert_eq!(next_level_threshold("Expert Grower"), ("Master Cultivator", Some(1000)));
        assert_eq!(next_level_threshold("Master Cultivator"), ("Master Cultivator", None));
    }

    #[test]
    fn category_parse_round_trip() {
        assert_eq!(Category::parse("overall"), Some(Category::Overall));
        assert_eq!(Category::parse("favourites"), Some(Category::Favourites));
        assert_eq!(Category::parse("medical_conditions"), Some(Category::MedicalConditions));
        assert_eq!(Category::parse("bogus"), None);
        assert_eq!(Category::parse(""), None);
    }

    #[test]
    fn category_columns_are_whitelisted() {
        assert_eq!(Category::Overall.order_column(), None);
        assert_eq!(Category::Favourites.order_column(), Some("favourites_count"));
        assert_eq!(Category::Terpenes.order_column(), Some("unique_terpenes"));
        assert_eq!(Category::Seen.rank_column(), Some("seen_rank"));
    }

    #[test]
    fn percentile_of_first_and_last() {
        assert_eq!(percentile(1, 100), 100);
        assert_eq!(percentile(100, 100), 1);
        assert_eq!(percentile(1, 0), 100);
    }

    #[test]
    fn rank_formatting() {
        assert_eq!(format_rank(1), "1st");
        assert_eq!(format_rank(2), "2nd");
        assert_eq!(format_rank(3), "3rd");
        assert_eq!(format_rank(11), "11th");
    }
}
