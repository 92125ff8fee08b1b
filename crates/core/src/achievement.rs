//! Achievement category metadata and progress helpers.
//!
//! The catalog itself lives in the `achievements` table; this module only
//! carries the fixed category presentation strings and the completion-
//! percentage arithmetic the API layer shapes responses with.

/// Display title for an achievement category slug.
///
/// Unrecognized slugs echo the raw key so new database categories still
/// render instead of disappearing.
pub fn category_title(category: &str) -> &str {
    match category {
        "strain_types" => "Strain Types",
        "families" => "Genetics & Families",
        "effects" => "Effects Explorer",
        "flavors" => "Flavor Profiles",
        "terpenes" => "Terpene Discovery",
        "medical" => "Medical Research",
        "exploration" => "Exploration Milestones",
        other => other,
    }
}

/// Display description for an achievement category slug.
///
/// Unrecognized slugs get an empty description.
pub fn category_description(category: &str) -> &str {
    match category {
        "strain_types" => "Master different cannabis strain types",
        "families" => "Explore strain genetics and family trees",
        "effects" => "Discover the full spectrum of cannabis effects",
        "flavors" => "Experience diverse flavor profiles",
        "terpenes" => "Uncover the world of terpenes",
        "medical" => "Research medical applications and benefits",
        "exploration" => "General exploration and collection milestones",
        _ => "",
    }
}

/// Progress toward an achievement target as a 0-100 percentage, capped.
pub fn completion_percentage(current: i64, target: i64) -> i64 {
    if target == 0 {
        return 100;
    }
    (((current as f64 / target as f64) * 100.0).round() as i64).min(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_have_titles() {
        assert_eq!(category_title("strain_types"), "Strain Types");
        assert_eq!(category_title("terpenes"), "Terpene Discovery");
        assert_eq!(category_title("medical"), "Medical Research");
    }

    #[test]
    fn unknown_category_echoes_key() {
        assert_eq!(category_title("new_thing"), "new_thing");
        assert_eq!(category_description("new_thing"), "");
    }

    #[test]
    fn completion_percentage_caps_at_100() {
        assert_eq!(completion_percentage(0, 10), 0);
        assert_eq!(completion_percentage(5, 10), 50);
        assert_eq!(completion_percentage(10, 10), 100);
        assert_eq!(completion_percentage(25, 10), 100);
        assert_eq!(completion_percentage(3, 0), 100);
    }
}
