//! Client-side pagination for list views.

/// Default rows per page in list views.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A 1-based page cursor over an in-memory list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page: usize,
    per_page: usize,
    total_items: usize,
}

impl Paginator {
    /// Start at page 1. A `per_page` of zero is treated as one.
    #[must_use]
    pub fn new(total_items: usize, per_page: usize) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
            total_items,
        }
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Number of pages; an empty list still has one page.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        if self.total_items == 0 {
            1
        } else {
            self.total_items.div_ceil(self.per_page)
        }
    }

    /// Move to `page` if it exists and differs from the current page.
    ///
    /// Returns whether the page changed.
    pub const fn go_to(&mut self, page: usize) -> bool {
        if page >= 1 && page <= self.total_pages() && page != self.page {
            self.page = page;
            true
        } else {
            false
        }
    }

    pub const fn next(&mut self) -> bool {
        self.go_to(self.page + 1)
    }

    pub const fn prev(&mut self) -> bool {
        self.go_to(self.page.saturating_sub(1))
    }

    /// Items of the current page.
    #[must_use]
    pub fn page_items<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.page - 1).saturating_mul(self.per_page);
        let end = start.saturating_add(self.per_page).min(items.len());
        items.get(start..end).unwrap_or(&[])
    }

    /// Whether page controls are worth showing.
    #[must_use]
    pub const fn is_paginated(&self) -> bool {
        self.total_pages() > 1
    }
}
