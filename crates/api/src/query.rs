//! Shared query parameter types for API handlers.

use budedex_core::pagination::{clamp_limit, clamp_page};
use serde::Deserialize;

/// Generic page-based pagination parameters (`?page=&limit=`).
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    /// Clamp to a valid (page, limit) pair.
    pub fn clamped(&self) -> (i64, i64) {
        (clamp_page(self.page), clamp_limit(self.limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_to_defaults() {
        assert_eq!(PageParams::default().clamped(), (1, 20));
        let params = PageParams {
            page: Some(-1),
            limit: Some(1000),
        };
        assert_eq!(params.clamped(), (1, 100));
    }
}
