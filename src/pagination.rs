//! Page state and the pure pagination math.
//!
//! Pages are 1-based. The invariant held everywhere:
//! `1 <= current_page <= max(1, ceil(len / records_per_page))`.
//! Out-of-range slices clamp to empty rather than erroring.

use crate::dataset::Row;

/// Rows rendered per page.
pub const RECORDS_PER_PAGE: usize = 100;

/// Number of pages for a dataset of `len` rows. An empty dataset still has
/// one (empty) page so the page label and boundary checks stay well-defined.
#[must_use]
pub fn page_count(len: usize, records_per_page: usize) -> usize {
    if records_per_page == 0 {
        return 1;
    }
    len.div_ceil(records_per_page).max(1)
}

/// Half-open row index range `[first, last)` covered by `page`, clamped to
/// the dataset length.
#[must_use]
pub fn page_bounds(len: usize, page: usize, records_per_page: usize) -> (usize, usize) {
    let first = page.saturating_sub(1).saturating_mul(records_per_page);
    let last = first.saturating_add(records_per_page);
    (first.min(len), last.min(len))
}

/// The rows visible on `page`. Slicing past the end yields fewer or no rows,
/// never an error.
#[must_use]
pub fn visible_slice(rows: &[Row], page: usize, records_per_page: usize) -> &[Row] {
    let (first, last) = page_bounds(rows.len(), page, records_per_page);
    rows.get(first..last).unwrap_or(&[])
}

/// Current page number plus the page-size constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    records_per_page: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 1,
            records_per_page: RECORDS_PER_PAGE,
        }
    }
}

impl PageState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    #[must_use]
    pub fn records_per_page(&self) -> usize {
        self.records_per_page
    }

    /// Reset to page 1 (a new dataset replaces the old one wholesale).
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Advance one page if not on the last page of a `len`-row dataset.
    /// Returns whether the page changed.
    pub fn next(&mut self, len: usize) -> bool {
        if self.current_page < page_count(len, self.records_per_page) {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page if not on page 1. Returns whether the page changed.
    pub fn previous(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Whether Previous should be disabled.
    #[must_use]
    pub fn at_first(&self) -> bool {
        self.current_page == 1
    }

    /// Whether Next should be disabled for a `len`-row dataset.
    #[must_use]
    pub fn at_last(&self, len: usize) -> bool {
        self.current_page >= page_count(len, self.records_per_page)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use test_case::test_case;

    #[test_case(0, 1; "empty dataset still has one page")]
    #[test_case(1, 1; "single row")]
    #[test_case(99, 1; "just under one page")]
    #[test_case(100, 1; "exactly one page")]
    #[test_case(101, 2; "one row over")]
    #[test_case(250, 3; "two and a half pages")]
    #[test_case(300, 3; "exact multiple")]
    fn page_counts(len: usize, expected: usize) {
        assert_eq!(page_count(len, RECORDS_PER_PAGE), expected);
    }

    #[test_case(250, 1, (0, 100))]
    #[test_case(250, 2, (100, 200))]
    #[test_case(250, 3, (200, 250); "last page clamps")]
    #[test_case(250, 4, (250, 250); "past the end is empty")]
    #[test_case(0, 1, (0, 0); "empty dataset")]
    fn bounds(len: usize, page: usize, expected: (usize, usize)) {
        assert_eq!(page_bounds(len, page, RECORDS_PER_PAGE), expected);
    }

    #[test]
    fn next_stops_at_last_page() {
        let mut page = PageState::new();
        assert!(page.next(250));
        assert!(page.next(250));
        assert_eq!(page.current_page(), 3);
        assert!(!page.next(250), "next on the last page is a no-op");
        assert_eq!(page.current_page(), 3);
    }

    #[test]
    fn previous_stops_at_page_one() {
        let mut page = PageState::new();
        assert!(!page.previous(), "previous on page 1 is a no-op");
        assert_eq!(page.current_page(), 1);
    }

    #[test]
    fn boundary_flags() {
        let mut page = PageState::new();
        assert!(page.at_first());
        assert!(!page.at_last(250));
        page.next(250);
        page.next(250);
        assert!(!page.at_first());
        assert!(page.at_last(250));
    }

    #[test]
    fn empty_dataset_is_both_boundaries() {
        let page = PageState::new();
        assert!(page.at_first());
        assert!(page.at_last(0));
    }
}
