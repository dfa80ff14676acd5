//! Opaque cursor and page envelope primitives for keyset pagination.
//!
//! Connections in the GraphQL API page through timelines ordered by a
//! composite key (typically a creation timestamp plus a row identifier). This
//! crate keeps the transport details of that scheme in one place:
//!
//! - [`Cursor`] wraps a serialisable key and encodes it as base64 JSON so
//!   clients treat it as an opaque token.
//! - [`PageSize`] validates the requested page size and clamps it to a
//!   server-side maximum.
//! - [`Page`] trims an over-fetched result (`limit + 1` rows) into the
//!   requested window and records whether another page exists.
//!
//! # Example
//!
//! ```
//! use pagination::{Cursor, Page, PageSize};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
//! struct Key {
//!     id: i32,
//! }
//!
//! let size = PageSize::new(Some(2)).expect("valid size");
//! let rows = vec![Key { id: 5 }, Key { id: 4 }, Key { id: 3 }];
//! let page = Page::from_overfetched(rows, size);
//!
//! assert!(page.has_next_page());
//! assert_eq!(page.items().len(), 2);
//!
//! let cursor = page
//!     .end_cursor(|row| row.clone())
//!     .expect("non-empty page")
//!     .encode()
//!     .expect("encodable key");
//! let decoded: Cursor<Key> = Cursor::decode(&cursor).expect("round trip");
//! assert_eq!(decoded.key(), &Key { id: 4 });
//! ```

mod cursor;
mod page;

pub use cursor::{Cursor, CursorError, Direction};
pub use page::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageSize, PageSizeError};
