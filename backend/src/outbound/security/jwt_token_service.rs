//! HS256 JWT implementation of the `TokenService` port.
//!
//! Expiry is checked against the caller-supplied `now` rather than the system
//! clock, so `jsonwebtoken`'s own `exp` validation is disabled.

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::{TokenError, TokenService};
use crate::domain::{IssuedToken, TokenClaims, TokenKind, UserId};

/// Wire form of the token claims.
#[derive(Debug, Serialize, Deserialize)]
struct WireClaims {
    #[serde(rename = "userId")]
    user_id: i64,
    #[serde(rename = "type")]
    kind: String,
    jti: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies access and refresh tokens with a shared secret.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtTokenService {
    /// Build a service around the raw signing secret.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp"]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

fn timestamp(seconds: i64) -> Result<DateTime<Utc>, TokenError> {
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| TokenError::invalid("timestamp out of range"))
}

fn into_claims(wire: WireClaims) -> Result<TokenClaims, TokenError> {
    let kind = TokenKind::parse(&wire.kind)
        .ok_or_else(|| TokenError::invalid(format!("unknown token type '{}'", wire.kind)))?;
    let user_id = UserId::new(wire.user_id).map_err(|err| TokenError::invalid(err.to_string()))?;
    let jti = Uuid::parse_str(&wire.jti).map_err(|err| TokenError::invalid(err.to_string()))?;
    Ok(TokenClaims {
        user_id,
        kind,
        jti,
        issued_at: timestamp(wire.iat)?,
        expires_at: timestamp(wire.exp)?,
    })
}

impl TokenService for JwtTokenService {
    fn issue(
        &self,
        user_id: UserId,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let issued_at = now.timestamp();
        let expires_at = (now + kind.ttl()).timestamp();
        let jti = Uuid::new_v4();
        let wire = WireClaims {
            user_id: i64::from(user_id.get()),
            kind: kind.as_str().to_owned(),
            jti: jti.to_string(),
            iat: issued_at,
            exp: expires_at,
        };
        let token = encode(&Header::new(Algorithm::HS256), &wire, &self.encoding)
            .map_err(|err| TokenError::signing(err.to_string()))?;

        Ok(IssuedToken {
            token,
            claims: TokenClaims {
                user_id,
                kind,
                jti,
                issued_at: timestamp(issued_at)?,
                expires_at: timestamp(expires_at)?,
            },
        })
    }

    fn verify(
        &self,
        token: &str,
        expected: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<TokenClaims, TokenError> {
        let data = decode::<WireClaims>(token, &self.decoding, &self.validation).map_err(|err| {
            match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::invalid(err.to_string()),
            }
        })?;
        let claims = into_claims(data.claims)?;
        if claims.expires_at <= now {
            return Err(TokenError::Expired);
        }
        if claims.kind != expected {
            return Err(TokenError::WrongKind {
                expected,
                actual: claims.kind,
            });
        }
        Ok(claims)
    }
}
