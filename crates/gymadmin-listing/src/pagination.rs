//! Page windows over a filtered collection

use crate::error::{ListingError, ListingResult};
use serde::{Deserialize, Serialize};

/// Requested page (1-based) and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based); out-of-range values are clamped
    pub page: usize,
    /// Number of items per page
    pub per_page: usize,
}

impl PageRequest {
    /// Build a request
    pub const fn new(page: usize, per_page: usize) -> Self {
        Self { page, per_page }
    }

    /// First page with the given size
    pub const fn first(per_page: usize) -> Self {
        Self::new(1, per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(10)
    }
}

/// One page of results with the metadata a list view needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Items matching the filter across all pages
    pub total_count: usize,
    /// `ceil(total_count / per_page)`, zero for an empty result
    pub total_pages: usize,
    /// Page actually shown after clamping (always at least 1)
    pub current_page: usize,
    /// Page size
    pub per_page: usize,
    /// Whether a later page exists
    pub has_next: bool,
    /// Whether an earlier page exists
    pub has_prev: bool,
}

impl<T> Page<T> {
    /// Whether there is nothing to show (the empty-state case)
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// Next page number, if any
    pub const fn next_page(&self) -> Option<usize> {
        if self.has_next {
            Some(self.current_page + 1)
        } else {
            None
        }
    }

    /// Previous page number, if any
    pub const fn prev_page(&self) -> Option<usize> {
        if self.has_prev {
            Some(self.current_page - 1)
        } else {
            None
        }
    }

    /// 1-based position of the first item on this page, 0 when empty
    pub fn first_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.current_page - 1) * self.per_page + 1
        }
    }

    /// 1-based position of the last item on this page, 0 when empty
    pub fn last_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.current_page - 1) * self.per_page + self.items.len()
        }
    }

    /// Transform the items, keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            total_pages: self.total_pages,
            current_page: self.current_page,
            per_page: self.per_page,
            has_next: self.has_next,
            has_prev: self.has_prev,
        }
    }
}

/// Number of pages needed for `total` items
pub const fn page_count(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        0
    } else {
        total.div_ceil(per_page)
    }
}

/// Cut `items` into the requested page
///
/// Items `[(page-1)*per_page, page*per_page)` are returned. A page past the
/// end is clamped to the last page, page 0 to the first.
///
/// # Errors
///
/// Returns [`ListingError::ZeroPageSize`] when `per_page` is zero.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> ListingResult<Page<T>> {
    if request.per_page == 0 {
        return Err(ListingError::ZeroPageSize);
    }

    let total_count = items.len();
    let total_pages = page_count(total_count, request.per_page);
    let current_page = request.page.clamp(1, total_pages.max(1));
    let offset = (current_page - 1) * request.per_page;

    let items: Vec<T> = items
        .into_iter()
        .skip(offset)
        .take(request.per_page)
        .collect();

    Ok(Page {
        items,
        total_count,
        total_pages,
        current_page,
        per_page: request.per_page,
        has_next: current_page < total_pages,
        has_prev: current_page > 1,
    })
}
