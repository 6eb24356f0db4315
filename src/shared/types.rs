use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
    /// Number of pages (paginated endpoints only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<i64>,
    /// Page returned (paginated endpoints only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_page: Option<i64>,
}

impl Meta {
    pub fn total(total: i64) -> Self {
        Self {
            total,
            pages: None,
            current_page: None,
        }
    }

    pub fn paged(total: i64, pagination: &PaginationQuery) -> Self {
        Self {
            total,
            pages: Some(pagination.page_count(total)),
            current_page: Some(pagination.page.max(1)),
        }
    }
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Standard pagination query parameters for list endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PaginationQuery {
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Number of items per page (default: 10, max: 100)
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub per_page: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationQuery {
    /// Calculate SQL OFFSET from page number, saturating for huge pages
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1).saturating_mul(self.limit())
    }

    /// Get clamped per_page (respects MAX_PAGE_SIZE)
    pub fn limit(&self) -> i64 {
        self.per_page.clamp(1, MAX_PAGE_SIZE)
    }

    /// Number of pages needed for `total` items (at least 1)
    pub fn page_count(&self, total: i64) -> i64 {
        let limit = self.limit();
        ((total.max(0) + limit - 1) / limit).max(1)
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_offset_and_limit() {
        let query = PaginationQuery {
            page: 3,
            per_page: 20,
        };
        assert_eq!(query.offset(), 40);
        assert_eq!(query.limit(), 20);

        let clamped = PaginationQuery {
            page: 0,
            per_page: 5000,
        };
        assert_eq!(clamped.offset(), 0);
        assert_eq!(clamped.limit(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_pagination_offset_saturates() {
        let query = PaginationQuery {
            page: i64::MAX,
            per_page: 10,
        };
        assert_eq!(query.offset(), i64::MAX);

        let negative = PaginationQuery {
            page: i64::MIN,
            per_page: 10,
        };
        assert_eq!(negative.offset(), 0);
    }

    #[test]
    fn test_page_count() {
        let query = PaginationQuery::default();
        assert_eq!(query.page_count(0), 1);
        assert_eq!(query.page_count(10), 1);
        assert_eq!(query.page_count(11), 2);
    }

    #[test]
    fn test_paged_meta_skips_nothing_when_set() {
        let meta = Meta::paged(25, &PaginationQuery::default());
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["total"], 25);
        assert_eq!(json["pages"], 3);
        assert_eq!(json["current_page"], 1);

        let plain = serde_json::to_value(Meta::total(4)).unwrap();
        assert!(plain.get("pages").is_none());
    }
}
