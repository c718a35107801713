//! Limit/offset paging for list endpoints.

/// Default number of rows returned by a list operation.
pub const DEFAULT_LIMIT: u64 = 10;

/// Default number of rows skipped by a list operation.
pub const DEFAULT_OFFSET: u64 = 0;

/// A window into a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Maximum number of rows to return.
    pub limit: u64,
    /// Number of rows to skip.
    pub offset: u64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl Page {
    /// Creates a page; missing values fall back to the defaults.
    #[must_use]
    pub fn new(limit: Option<u64>, offset: Option<u64>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_LIMIT),
            offset: offset.unwrap_or(DEFAULT_OFFSET),
        }
    }
}

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;
