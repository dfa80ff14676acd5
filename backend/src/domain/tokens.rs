//! Access and refresh token primitives.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::UserId;

/// Lifetime of an access token.
pub const ACCESS_TOKEN_TTL: Duration = Duration::minutes(15);
/// Lifetime of a refresh token.
pub const REFRESH_TOKEN_TTL: Duration = Duration::days(7);

/// Intended use of a token, carried in its `type` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Short-lived bearer credential.
    Access,
    /// Long-lived credential exchanged for a new pair.
    Refresh,
}

impl TokenKind {
    /// Claim value for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }

    /// Parse a claim value.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "access" => Some(Self::Access),
            "refresh" => Some(Self::Refresh),
            _ => None,
        }
    }

    /// Lifetime of tokens of this kind.
    #[must_use]
    pub const fn ttl(self) -> Duration {
        match self {
            Self::Access => ACCESS_TOKEN_TTL,
            Self::Refresh => REFRESH_TOKEN_TTL,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verified claims of a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject.
    pub user_id: UserId,
    /// Token use.
    pub kind: TokenKind,
    /// Unique token identifier; keeps tokens minted in the same second distinct.
    pub jti: Uuid,
    /// Issue instant.
    pub issued_at: DateTime<Utc>,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
}

/// A signed token together with its claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Encoded token.
    pub token: String,
    /// Claims embedded in `token`.
    pub claims: TokenClaims,
}

/// Access/refresh pair returned to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Short-lived bearer token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
}
