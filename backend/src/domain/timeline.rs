//! Keyset pagination over creation-ordered timelines.
//!
//! Articles and comments are paged by the composite key `(created_at, id)`.
//! The key travels to clients as an opaque [`pagination::Cursor`].

use chrono::{DateTime, Utc};
use pagination::{Cursor, Direction, PageSize};
use serde::{Deserialize, Serialize};

use crate::domain::Error;

/// Composite ordering key of a timeline row.
///
/// Serialises as `{"createdAt": "<RFC 3339>", "id": <int>}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineKey {
    /// Creation instant of the row.
    pub created_at: DateTime<Utc>,
    /// Row identifier breaking timestamp ties.
    pub id: i32,
}

impl TimelineKey {
    /// Whether a row with `key` falls strictly after `self` in `direction`.
    ///
    /// Mirrors the SQL predicate used by the persistence adapters.
    #[must_use]
    pub fn precedes(&self, key: &TimelineKey, direction: Direction) -> bool {
        let ordering = (key.created_at, key.id).cmp(&(self.created_at, self.id));
        match direction {
            Direction::Descending => ordering.is_lt(),
            Direction::Ascending => ordering.is_gt(),
        }
    }
}

/// Rows that sit on a timeline.
pub trait Timeline {
    /// Ordering key of this row.
    fn timeline_key(&self) -> TimelineKey;
}

/// Validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Rows per page.
    pub size: PageSize,
    /// Exclusive starting point.
    pub after: Option<TimelineKey>,
    /// Sort direction.
    pub direction: Direction,
}

impl PageRequest {
    /// Validate `first`/`after` arguments.
    ///
    /// # Examples
    /// ```
    /// use pagination::Direction;
    /// use scribe::domain::PageRequest;
    ///
    /// let request = PageRequest::parse(Some(500), None, Direction::Descending)
    ///     .expect("large pages are clamped");
    /// assert_eq!(request.size.get(), 50);
    ///
    /// let err = PageRequest::parse(None, Some("%%%"), Direction::Descending)
    ///     .expect_err("garbage cursor");
    /// assert_eq!(err.message(), "Invalid cursor");
    /// ```
    pub fn parse(
        first: Option<i32>,
        after: Option<&str>,
        direction: Direction,
    ) -> Result<Self, Error> {
        let size = PageSize::new(first.map(i64::from))
            .map_err(|_| Error::invalid_request("`first` must be at least 1"))?;
        let after = after.map(decode_cursor).transpose()?;
        Ok(Self {
            size,
            after,
            direction,
        })
    }

    /// Number of rows adapters should fetch.
    #[must_use]
    pub fn fetch_limit(&self) -> usize {
        self.size.fetch_limit()
    }
}

/// Decode an opaque cursor, rejecting malformed or non-positive keys.
pub fn decode_cursor(raw: &str) -> Result<TimelineKey, Error> {
    let key = Cursor::<TimelineKey>::decode(raw)
        .map_err(|_| Error::invalid_request("Invalid cursor"))?
        .into_inner();
    if key.id <= 0 {
        return Err(Error::invalid_request("Invalid cursor"));
    }
    Ok(key)
}

/// Encode the cursor of a timeline row.
pub fn encode_cursor(key: TimelineKey) -> Result<String, Error> {
    Cursor::new(key)
        .encode()
        .map_err(|err| Error::internal(format!("cursor encoding failed: {err}")))
}
