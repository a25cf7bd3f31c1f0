//! Offset pagination types shared by the read-model repositories.

use serde::{Deserialize, Serialize};

/// Default page size.
pub const DEFAULT_PAGE_SIZE: u64 = 20;
/// Maximum page size.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Options for paginated list queries. Sort fields are validated against a
/// per-entity whitelist by each repository; unknown fields fall back to the
/// entity's default ordering.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub sort: Option<String>,
    pub order: SortOrder,
}

impl ListOptions {
    /// Effective limit, clamped to `[1, MAX_PAGE_SIZE]`.
    pub fn clamped_limit(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    /// Effective offset.
    pub fn offset(&self) -> u64 {
        self.offset.unwrap_or(0)
    }
}

/// One page of results plus the total row count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

impl<T> Page<T> {
    pub fn empty(opts: &ListOptions) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            limit: opts.clamped_limit(),
            offset: opts.offset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_clamping() {
        assert_eq!(ListOptions::default().clamped_limit(), DEFAULT_PAGE_SIZE);
        let opts = ListOptions {
            limit: Some(10_000),
            ..Default::default()
        };
        assert_eq!(opts.clamped_limit(), MAX_PAGE_SIZE);
        let opts = ListOptions {
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(opts.clamped_limit(), 1);
    }
}
