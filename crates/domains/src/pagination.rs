//! Derived pagination metadata.
//!
//! `PaginationData` is never stored and never mutated on its own: every
//! paged fetch recomputes it from the backing row count.

use serde::{Deserialize, Serialize};

/// Metadata describing one page of a larger result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationData {
    pub total_items: u64,
    pub total_pages: u64,
    pub current_page: u32,
    pub page_size: u32,
}

impl PaginationData {
    /// Recompute the metadata for a fetch that found `total_items` rows.
    ///
    /// An empty result set yields zero pages; `current_page` always echoes
    /// the request so the caller can keep its place.
    pub fn derive(total_items: u64, current_page: u32, page_size: u32) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total_items.div_ceil(u64::from(page_size))
        };

        Self {
            total_items,
            total_pages,
            current_page,
            page_size,
        }
    }
}

/// Row offset for a 1-based page number.
pub fn page_offset(page: u32, page_size: u32) -> u64 {
    u64::from(page.saturating_sub(1)) * u64::from(page_size)
}
