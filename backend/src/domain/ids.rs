//! Integer identifiers for persisted entities.
//!
//! Identifiers are database-assigned serial values and therefore always
//! positive. Values arriving from clients are validated through `new`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation error for client-supplied identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} id must be a positive integer")]
pub struct IdValidationError {
    /// Entity label used in the message.
    pub entity: &'static str,
    /// Rejected value.
    pub value: i64,
}

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident, $entity:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Validate a client-supplied identifier.
            pub fn new(value: i64) -> Result<Self, IdValidationError> {
                i32::try_from(value)
                    .ok()
                    .filter(|id| *id > 0)
                    .map(Self)
                    .ok_or(IdValidationError {
                        entity: $entity,
                        value,
                    })
            }

            /// Wrap a value read back from storage.
            pub(crate) const fn from_row(value: i32) -> Self {
                Self(value)
            }

            /// Raw integer value.
            #[must_use]
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_entity_id!(
    /// Identifier of a registered user.
    UserId,
    "User"
);
define_entity_id!(
    /// Identifier of an article.
    ArticleId,
    "Article"
);
define_entity_id!(
    /// Identifier of a comment.
    CommentId,
    "Comment"
);
define_entity_id!(
    /// Identifier of a like.
    LikeId,
    "Like"
);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, true)]
    #[case(i64::from(i32::MAX), true)]
    #[case(0, false)]
    #[case(-4, false)]
    #[case(i64::from(i32::MAX) + 1, false)]
    fn ids_must_be_positive_i32(#[case] raw: i64, #[case] valid: bool) {
        assert_eq!(ArticleId::new(raw).is_ok(), valid);
    }

    #[rstest]
    fn error_names_the_entity() {
        let err = CommentId::new(0).expect_err("zero rejected");
        assert_eq!(err.to_string(), "Comment id must be a positive integer");
    }
}
