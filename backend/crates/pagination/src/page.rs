//! Page size validation and the trimmed page envelope.

use thiserror::Error;

use crate::cursor::Cursor;

/// Page size applied when the client does not request one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Largest page a client may request; larger requests are clamped.
pub const MAX_PAGE_SIZE: usize = 50;

/// Errors raised when a requested page size is unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageSizeError {
    /// The request asked for zero or fewer rows.
    #[error("page size must be at least 1, got {requested}")]
    NotPositive {
        /// The rejected value.
        requested: i64,
    },
}

/// Validated number of rows per page.
///
/// # Examples
///
/// ```
/// use pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageSize};
///
/// assert_eq!(PageSize::new(None).map(PageSize::get), Ok(DEFAULT_PAGE_SIZE));
/// assert_eq!(PageSize::new(Some(500)).map(PageSize::get), Ok(MAX_PAGE_SIZE));
/// assert!(PageSize::new(Some(0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(usize);

impl PageSize {
    /// Validate a client-supplied page size.
    ///
    /// # Errors
    ///
    /// Returns [`PageSizeError::NotPositive`] when `requested` is below one.
    pub fn new(requested: Option<i64>) -> Result<Self, PageSizeError> {
        let Some(value) = requested else {
            return Ok(Self(DEFAULT_PAGE_SIZE));
        };
        if value < 1 {
            return Err(PageSizeError::NotPositive { requested: value });
        }
        let size = usize::try_from(value).map_or(MAX_PAGE_SIZE, |size| size.min(MAX_PAGE_SIZE));
        Ok(Self(size))
    }

    /// Number of rows returned to the client.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Number of rows to request from storage: one extra row reveals whether
    /// another page follows.
    #[must_use]
    pub const fn fetch_limit(self) -> usize {
        self.0.saturating_add(1)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(DEFAULT_PAGE_SIZE)
    }
}

/// A window of rows plus the flag telling the client whether to keep paging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    has_next_page: bool,
}

impl<T> Page<T> {
    /// Build a page from rows fetched with [`PageSize::fetch_limit`].
    ///
    /// Any rows beyond the page size are dropped; their presence sets
    /// [`Page::has_next_page`].
    #[must_use]
    pub fn from_overfetched(mut rows: Vec<T>, size: PageSize) -> Self {
        let has_next_page = rows.len() > size.get();
        rows.truncate(size.get());
        Self {
            items: rows,
            has_next_page,
        }
    }

    /// Rows in this page, in query order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Whether more rows matched than were returned.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    /// Cursor pointing at the last row of the page, if any.
    pub fn end_cursor<K>(&self, key_of: impl Fn(&T) -> K) -> Option<Cursor<K>> {
        self.items.last().map(|item| Cursor::new(key_of(item)))
    }

    /// Consume the page, returning the rows.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(None, DEFAULT_PAGE_SIZE)]
    #[case(Some(1), 1)]
    #[case(Some(25), 25)]
    #[case(Some(50), 50)]
    #[case(Some(51), MAX_PAGE_SIZE)]
    #[case(Some(i64::MAX), MAX_PAGE_SIZE)]
    fn page_size_defaults_and_clamps(#[case] requested: Option<i64>, #[case] expected: usize) {
        let size = PageSize::new(requested).expect("valid size");
        assert_eq!(size.get(), expected);
        assert_eq!(size.fetch_limit(), expected + 1);
    }

    #[rstest]
    #[case(0)]
    #[case(-3)]
    fn page_size_rejects_non_positive_values(#[case] requested: i64) {
        assert_eq!(
            PageSize::new(Some(requested)),
            Err(PageSizeError::NotPositive { requested })
        );
    }

    #[rstest]
    #[case(0, 0, false)]
    #[case(2, 2, false)]
    #[case(3, 3, false)]
    #[case(4, 3, true)]
    fn trims_overfetched_rows(
        #[case] fetched: usize,
        #[case] expected_len: usize,
        #[case] expected_next: bool,
    ) {
        let size = PageSize::new(Some(3)).expect("valid size");
        let rows: Vec<usize> = (0..fetched).collect();
        let page = Page::from_overfetched(rows, size);

        assert_eq!(page.items().len(), expected_len);
        assert_eq!(page.has_next_page(), expected_next);
    }

    #[rstest]
    fn end_cursor_points_at_last_returned_row() {
        let size = PageSize::new(Some(2)).expect("valid size");
        let page = Page::from_overfetched(vec![30, 20, 10], size);

        let cursor = page.end_cursor(|row| *row).expect("cursor");
        assert_eq!(cursor.into_inner(), 20);
    }

    #[rstest]
    fn end_cursor_is_absent_for_empty_pages() {
        let page: Page<i32> = Page::from_overfetched(Vec::new(), PageSize::default());
        assert!(page.end_cursor(|row| *row).is_none());
    }
}
