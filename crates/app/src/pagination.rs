//! Skip/limit pagination.

/// Default page size when no limit is requested.
pub const DEFAULT_LIMIT: u32 = 100;

/// Largest page size a caller may request.
pub const MAX_LIMIT: u32 = 100;

/// An offset/limit window over an ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    skip: u64,
    limit: u32,
}

impl Page {
    /// Build a page, defaulting and clamping the limit to `1..=MAX_LIMIT`.
    #[must_use]
    pub fn new(skip: Option<u64>, limit: Option<u32>) -> Self {
        Self {
            skip: skip.unwrap_or(0),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }

    #[must_use]
    pub const fn skip(&self) -> u64 {
        self.skip
    }

    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// SQL `OFFSET` value.
    #[must_use]
    pub fn offset_i64(&self) -> i64 {
        i64::try_from(self.skip).unwrap_or(i64::MAX)
    }

    /// SQL `LIMIT` value.
    #[must_use]
    pub fn limit_i64(&self) -> i64 {
        i64::from(self.limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}
