//! Limit/offset pagination for list endpoints.
//!
//! Bounds are validated strictly: an out-of-range value is a validation
//! error, never silently clamped.

use crate::error::CoreError;

/// Page size used when the caller does not pass `limit`.
pub const DEFAULT_LIMIT: i64 = 50;

/// Largest accepted `limit`.
pub const MAX_LIMIT: i64 = 250;

/// A validated `(limit, offset)` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    limit: usize,
    offset: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT as usize,
            offset: 0,
        }
    }
}

impl Page {
    /// Validate user-supplied pagination parameters.
    ///
    /// `limit` must lie in `[1, MAX_LIMIT]` and `offset` must be
    /// non-negative. Missing values fall back to the defaults.
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Result<Self, CoreError> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(CoreError::Validation(format!(
                "limit must be between 1 and {MAX_LIMIT}, got {limit}"
            )));
        }

        let offset = offset.unwrap_or(0);
        let offset = usize::try_from(offset).map_err(|_| {
            CoreError::Validation(format!("offset must be non-negative, got {offset}"))
        })?;

        Ok(Self {
            limit: limit as usize,
            offset,
        })
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Skip `offset` items and take at most `limit` of the rest.
    ///
    /// An offset past the end yields an empty result.
    pub fn apply<I: IntoIterator>(&self, items: I) -> impl Iterator<Item = I::Item> {
        items.into_iter().skip(self.offset).take(self.limit)
    }
}
