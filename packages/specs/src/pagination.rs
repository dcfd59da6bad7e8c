// ABOUTME: Pagination utilities for list endpoints
// ABOUTME: Clamped query parameters and the pagination metadata envelope

use serde::{Deserialize, Serialize};

/// Default page size for paginated queries
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size to prevent performance issues
pub const MAX_PAGE_SIZE: i64 = 100;

/// Minimum page number (1-indexed)
pub const MIN_PAGE: i64 = 1;

/// Query parameters for pagination
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    pub page: i64,
    pub limit: i64,
}

impl PaginationParams {
    /// Create pagination params with custom values
    pub fn with_page_and_limit(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// Validate and normalize pagination parameters.
    /// Returns (limit, offset) suitable for SQL queries.
    pub fn validate(&self) -> (i64, i64) {
        let page = self.page.max(MIN_PAGE);
        let limit = self.limit.clamp(1, MAX_PAGE_SIZE);
        let offset = (page - 1) * limit;

        (limit, offset)
    }

    /// Get SQL LIMIT clause value
    pub fn limit(&self) -> i64 {
        self.validate().0
    }

    /// Get SQL OFFSET clause value
    pub fn offset(&self) -> i64 {
        self.validate().1
    }

    /// Get the current page number
    pub fn page(&self) -> i64 {
        self.page.max(MIN_PAGE)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: MIN_PAGE,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Pagination metadata returned alongside list results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    /// Total number of items across all pages
    pub total: i64,

    /// Current page number (1-indexed)
    pub page: i64,

    /// Items per page
    pub limit: i64,

    /// Total number of pages: ceil(total / limit)
    pub pages: i64,
}

impl Pagination {
    /// Create pagination metadata from params and total count
    pub fn new(params: &PaginationParams, total: i64) -> Self {
        let page = params.page();
        let limit = params.limit();
        let pages = (total + limit - 1) / limit;

        Self {
            total,
            page,
            limit,
            pages,
        }
    }
}
