//! Splitting ordered listings into fixed-size pages.
//!
//! Page numbers come straight from the `page` query parameter, so they are
//! resolved leniently: anything that is not an integer means the first page,
//! and numbers outside the valid range mean the last page.

use std::num::{IntErrorKind, NonZeroU64};

/// Number of posts on every listing page.
pub const PAGE_SIZE: NonZeroU64 = NonZeroU64::new(10).unwrap();

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Paginator {
    total_items: u64,
    per_page: NonZeroU64,
}

/// The slice of a listing that makes up one page, before it is fetched.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct PageWindow {
    pub total_items: u64,
    pub number: u64,
    pub num_pages: u64,
    pub offset: u64,
    pub limit: u64,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Page<T> {
    pub total_items: u64,
    pub number: u64,
    pub num_pages: u64,
    pub items: Vec<T>,
}

impl Paginator {
    #[must_use]
    pub fn new(total_items: u64, per_page: NonZeroU64) -> Self {
        Self {
            total_items,
            per_page,
        }
    }

    /// An empty listing still has one (empty) page.
    #[must_use]
    pub fn num_pages(self) -> u64 {
        self.total_items.div_ceil(self.per_page.get()).max(1)
    }

    #[must_use]
    pub fn page_number(self, requested: Option<&str>) -> u64 {
        let num_pages = self.num_pages();

        match requested.map(|raw| raw.trim().parse::<i64>()) {
            None => 1,
            Some(Ok(number)) if number < 1 => num_pages,
            Some(Ok(number)) => number.cast_unsigned().min(num_pages),
            // Still an integer, just out of range.
            Some(Err(err))
                if matches!(
                    err.kind(),
                    IntErrorKind::PosOverflow | IntErrorKind::NegOverflow
                ) =>
            {
                num_pages
            }
            Some(Err(_)) => 1,
        }
    }

    #[must_use]
    pub fn window(self, requested: Option<&str>) -> PageWindow {
        let number = self.page_number(requested);
        let per_page = self.per_page.get();

        PageWindow {
            total_items: self.total_items,
            number,
            num_pages: self.num_pages(),
            offset: (number - 1) * per_page,
            limit: per_page,
        }
    }
}

impl PageWindow {
    #[must_use]
    pub fn into_page<T>(self, items: Vec<T>) -> Page<T> {
        Page {
            total_items: self.total_items,
            number: self.number,
            num_pages: self.num_pages,
            items,
        }
    }
}

impl<T> Page<T> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    #[must_use]
    pub fn has_other_pages(&self) -> bool {
        self.has_previous() || self.has_next()
    }

    #[must_use]
    pub fn previous_page_number(&self) -> u64 {
        self.number.saturating_sub(1).max(1)
    }

    #[must_use]
    pub fn next_page_number(&self) -> u64 {
        (self.number + 1).min(self.num_pages)
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
