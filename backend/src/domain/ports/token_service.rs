//! Port for issuing and verifying signed bearer tokens.
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{IssuedToken, TokenClaims, TokenKind, UserId};

/// Failures raised while issuing or verifying a token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token's `exp` is in the past.
    #[error("token expired")]
    Expired,
    /// Signature, encoding, or claims are invalid.
    #[error("invalid token: {message}")]
    Invalid {
        /// Decoder diagnostic.
        message: String,
    },
    /// A valid token was presented for the wrong use.
    #[error("expected {expected} token, got {actual}")]
    WrongKind {
        /// Kind the caller asked for.
        expected: TokenKind,
        /// Kind carried by the token.
        actual: TokenKind,
    },
    /// The token could not be signed.
    #[error("token signing failed: {message}")]
    Signing {
        /// Encoder diagnostic.
        message: String,
    },
}

impl TokenError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing {
            message: message.into(),
        }
    }
}

/// Token issuing and verification.
///
/// `now` is passed explicitly so expiry follows the injected clock.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Issue a token of `kind` for `user_id`.
    fn issue(
        &self,
        user_id: UserId,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError>;

    /// Verify signature, expiry, and kind.
    fn verify(
        &self,
        token: &str,
        expected: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<TokenClaims, TokenError>;
}
