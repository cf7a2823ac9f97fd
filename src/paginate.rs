//! Fixed-size, 1-indexed pagination

use crate::config::DEFAULT_PAGE_SIZE;
use crate::error::{KommunError, Result};

/// Splits ordered lists into pages of a fixed size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Paginator {
    /// Create a paginator; a page size of zero is rejected
    pub fn new(page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(KommunError::InvalidPageSize);
        }
        Ok(Self { page_size })
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// `ceil(total_items / page_size)`, `0` for an empty list
    #[must_use]
    pub const fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.page_size)
    }

    /// Items on page `page_number` (1-indexed); empty for page 0 or past the end
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T], page_number: usize) -> &'a [T] {
        if page_number == 0 {
            return &[];
        }
        let start = (page_number - 1).saturating_mul(self.page_size);
        if start >= items.len() {
            return &[];
        }
        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }

    /// A page together with its position in the whole list
    #[must_use]
    pub fn page<'a, T>(&self, items: &'a [T], page_number: usize) -> Page<'a, T> {
        Page {
            items: self.slice(items, page_number),
            number: page_number,
            total_pages: self.total_pages(items.len()),
            total_items: items.len(),
        }
    }
}

/// One page of an ordered list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page<'a, T> {
    /// Items on this page
    pub items: &'a [T],
    /// 1-indexed page number
    pub number: usize,
    /// Pages in the whole list
    pub total_pages: usize,
    /// Items in the whole list
    pub total_items: usize,
}

impl<T> Page<'_, T> {
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number >= 1 && self.number < self.total_pages
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Items on page `page_number` of `records` split into pages of `page_size`
pub fn paginate<T: Clone>(records: &[T], page_size: usize, page_number: usize) -> Result<Vec<T>> {
    Ok(Paginator::new(page_size)?.slice(records, page_number).to_vec())
}
