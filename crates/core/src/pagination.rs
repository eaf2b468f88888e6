//! Page-size arithmetic and total-count reconciliation
//!
//! Pure helpers for the paginated collector. Page sizes are explicit values
//! threaded through each collection cycle, never shared state.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// Maximum number of full sweeps before a collection is abandoned
pub const MAX_COLLECT_ATTEMPTS: u32 = 5;

/// Default number of items requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Items per page. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PageSize(NonZeroU32);

impl PageSize {
    /// Returns `None` for zero
    pub fn new(size: u32) -> Option<Self> {
        NonZeroU32::new(size).map(PageSize)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Half the page size, rounded down, never below 1
    pub fn halve(self) -> Self {
        PageSize(NonZeroU32::new(self.0.get() / 2).unwrap_or(NonZeroU32::MIN))
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize(NonZeroU32::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroU32::MIN))
    }
}

impl std::fmt::Display for PageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Page metadata as reported by the service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

impl PageInfo {
    /// Expected item count; absent counts as zero
    pub fn total(&self) -> u64 {
        self.total.unwrap_or(0)
    }

    /// Number of pages to iterate; absent counts as zero
    pub fn total_pages(&self) -> u32 {
        self.total_pages.unwrap_or(0)
    }
}

/// Page numbers to request for a sweep, 1-indexed. Empty when there are no pages.
pub fn page_numbers(total_pages: u32) -> std::ops::RangeInclusive<u32> {
    1..=total_pages
}

/// Accumulated items did not match the reported total
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("collected {collected} items but the service reported {total}")]
pub struct Mismatch {
    pub collected: usize,
    pub total: u64,
}

/// Compare an accumulated item count with the service-reported total
pub fn reconcile(collected: usize, total: u64) -> Result<(), Mismatch> {
    if collected as u64 == total {
        Ok(())
    } else {
        Err(Mismatch { collected, total })
    }
}
