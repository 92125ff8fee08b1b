//! Shared response envelope types for API handlers.
//!
//! Every REST endpoint replies with `{ success, message?, data? }`; failures
//! come from [`crate::error::AppError`] with the same shape. Paginated
//! payloads embed the standard pagination metadata block.

use budedex_core::pagination::Pagination;
use serde::Serialize;

/// Standard success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// A success envelope carrying only data.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// A success envelope carrying a message and data.
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// A success envelope carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// A page of items with its pagination metadata and total count.
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub items: Vec<T>,
    pub total: i64,
    pub pagination: Pagination,
}

impl<T: Serialize> Paginated<T> {
    pub fn new(items: Vec<T>, page: i64, limit: i64, total: i64) -> Self {
        Self {
            items,
            total,
            pagination: Pagination::new(page, limit, total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_skips_absent_fields() {
        let body = serde_json::to_value(ApiResponse::message("ok")).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "ok");
        assert!(body.get("data").is_none());

        let body = serde_json::to_value(ApiResponse::data(vec![1, 2])).unwrap();
        assert!(body.get("message").is_none());
        assert_eq!(body["data"], serde_json::json!([1, 2]));
    }

    #[test]
    fn paginated_carries_consistent_metadata() {
        let page = Paginated::new(vec!["a", "b"], 2, 2, 5);
        assert_eq!(page.pagination.pages, 3);
        assert!(page.pagination.has_next);
        assert!(page.pagination.has_prev);
    }
}
