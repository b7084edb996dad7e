//! Pagination window math
//!
//! The pager is a 1-indexed cursor over however many rows survived
//! filtering. It never stores the row count itself; callers pass the current
//! count in, which keeps the cursor valid-by-clamping when data shrinks
//! underneath it.

use std::ops::Range;

/// Rows shown per page unless the caller picks otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Most numbered page buttons shown at once; beyond that the strip collapses
/// middle pages behind ellipses.
pub const MAX_PAGE_BUTTONS: usize = 5;

/// A 1-indexed pagination cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current_page: usize,
    page_size: usize,
}

impl Pager {
    /// Creates a pager on page 1. A zero page size is lifted to 1; callers
    /// that care about rejecting zero validate before constructing.
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub(crate) fn set_page(&mut self, page: usize) {
        self.current_page = page;
    }

    pub(crate) fn set_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
    }

    /// Snaps back to page 1.
    pub(crate) fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Total number of pages for `len` rows. An empty collection still has
    /// one (empty) page, so the current page is always in range.
    pub fn total_pages(&self, len: usize) -> usize {
        if len == 0 {
            1
        } else {
            len.div_ceil(self.page_size)
        }
    }

    /// Index window of the current page within `len` rows. The final page is
    /// allowed to be short; a cursor past the end yields an empty window
    /// rather than panicking.
    pub fn window(&self, len: usize) -> Range<usize> {
        let start = (self.current_page - 1)
            .saturating_mul(self.page_size)
            .min(len);
        let end = start.saturating_add(self.page_size).min(len);
        start..end
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// One element of the numbered page strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// A jump-to button for this page number.
    Page(usize),
    /// A gap standing in for collapsed page numbers.
    Ellipsis,
}

/// Builds the numbered page strip for `total` pages with `current` active.
///
/// Up to [`MAX_PAGE_BUTTONS`] numbered buttons appear. When there are more
/// pages than that, the first and last page stay pinned and a three-wide
/// window slides with the current page between them, with ellipses marking
/// whatever got collapsed on either side.
pub fn page_items(current: usize, total: usize) -> Vec<PageItem> {
    if total <= MAX_PAGE_BUTTONS {
        return (1..=total).map(PageItem::Page).collect();
    }

    // Pin page 1 and `total`; slide a 3-page window between them.
    let start = current.saturating_sub(1).clamp(2, total - 3);
    let mut items = vec![PageItem::Page(1)];
    if start > 2 {
        items.push(PageItem::Ellipsis);
    }
    for page in start..start + 3 {
        items.push(PageItem::Page(page));
    }
    if start + 3 < total {
        items.push(PageItem::Ellipsis);
    }
    items.push(PageItem::Page(total));
    items
}

// =============================================================================
// Tests
// =============================================================================
