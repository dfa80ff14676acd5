//! Opaque cursor encoding.
//!
//! A cursor is the base64 (standard alphabet, padded) encoding of the JSON
//! serialisation of a key. Keys are free to choose their own JSON shape, so a
//! timeline key such as `{"createdAt": "...", "id": 7}` travels unchanged.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Ordering applied to the keyset when paging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Oldest first: rows strictly after the cursor key.
    Ascending,
    /// Newest first: rows strictly before the cursor key.
    #[default]
    Descending,
}

/// Errors raised while encoding or decoding a cursor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    /// The cursor text is not valid base64.
    #[error("cursor is not valid base64: {message}")]
    Encoding {
        /// Decoder diagnostic.
        message: String,
    },
    /// The decoded payload is not the expected JSON key.
    #[error("cursor payload is malformed: {message}")]
    Payload {
        /// JSON diagnostic.
        message: String,
    },
    /// The key could not be serialised into JSON.
    #[error("cursor key could not be serialised: {message}")]
    Serialize {
        /// Serialiser diagnostic.
        message: String,
    },
}

/// Opaque pointer into an ordered result set.
///
/// # Examples
///
/// ```
/// use pagination::Cursor;
///
/// let encoded = Cursor::new(42_i32).encode().expect("encodable");
/// assert_eq!(encoded, "NDI=");
/// let decoded: Cursor<i32> = Cursor::decode(&encoded).expect("decodable");
/// assert_eq!(decoded.into_inner(), 42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor<K> {
    key: K,
}

impl<K> Cursor<K> {
    /// Wrap a key in a cursor.
    #[must_use]
    pub const fn new(key: K) -> Self {
        Self { key }
    }

    /// Borrow the wrapped key.
    #[must_use]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Consume the cursor, returning the key.
    #[must_use]
    pub fn into_inner(self) -> K {
        self.key
    }
}

impl<K: Serialize> Cursor<K> {
    /// Encode the key as base64 JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::Serialize`] when the key cannot be represented
    /// as JSON.
    pub fn encode(&self) -> Result<String, CursorError> {
        let json = serde_json::to_vec(&self.key).map_err(|err| CursorError::Serialize {
            message: err.to_string(),
        })?;
        Ok(STANDARD.encode(json))
    }
}

impl<K: DeserializeOwned> Cursor<K> {
    /// Decode a cursor produced by [`Cursor::encode`].
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::Encoding`] for invalid base64 and
    /// [`CursorError::Payload`] when the JSON does not match `K`.
    pub fn decode(value: &str) -> Result<Self, CursorError> {
        let bytes = STANDARD
            .decode(value.trim())
            .map_err(|err| CursorError::Encoding {
                message: err.to_string(),
            })?;
        let key = serde_json::from_slice(&bytes).map_err(|err| CursorError::Payload {
            message: err.to_string(),
        })?;
        Ok(Self { key })
    }
}
