//! Account and session services.
//!
//! [`AuthService`] implements the [`AuthCommand`] driving port: it hashes
//! passwords, issues token pairs, and persists refresh tokens hashed so a
//! database leak does not leak live credentials. [`TokenVerifier`] resolves
//! bearer access tokens for inbound adapters.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    AccessTokenVerifier, AuthCommand, CredentialHashError, CredentialHasher, NewRefreshToken,
    NewUser, RefreshTokenRepository, StoredRefreshToken, TokenError,
    TokenService, UserPersistenceError, UserRepository,
};
use crate::domain::{
    AuthPayload, Error, IssuedToken, LoginCredentials, Registration, TokenKind, TokenPair, User,
    UserId,
};

const INVALID_CREDENTIALS: &str = "Invalid email or password";
const REVOKED_REFRESH_TOKEN: &str = "Refresh token has been revoked";

/// Registration, login, refresh, and logout use-cases.
#[derive(Clone)]
pub struct AuthService<U, R> {
    users: Arc<U>,
    refresh_tokens: Arc<R>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: Arc<dyn TokenService>,
    clock: Arc<dyn Clock>,
}

impl<U, R> AuthService<U, R> {
    /// Create a new service with the given adapters.
    pub fn new(
        users: Arc<U>,
        refresh_tokens: Arc<R>,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<dyn TokenService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            hasher,
            tokens,
            clock,
        }
    }
}



fn map_hash_error(error: CredentialHashError) -> Error {
    Error::internal(error.to_string())
}

fn map_issue_error(error: TokenError) -> Error {
    Error::internal(format!("token issue failed: {error}"))
}

fn map_presented_refresh_error(error: &TokenError) -> Error {
    match error {
        TokenError::Expired => Error::unauthorized("Refresh token expired"),
        TokenError::WrongKind { .. } => Error::unauthorized("Invalid token type"),
        TokenError::Invalid { .. } | TokenError::Signing { .. } => {
            Error::unauthorized("Invalid refresh token")
        }
    }
}

impl<U, R> AuthService<U, R>
where
    U: UserRepository,
    R: RefreshTokenRepository,
{
    fn issue(
        &self,
        user_id: UserId,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, Error> {
        self.tokens
            .issue(user_id, kind, now)
            .map_err(map_issue_error)
    }

    /// Issue a token pair and the hashed record of its refresh token.
    async fn issue_pair(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<(TokenPair, NewRefreshToken), Error> {
        let access = self.issue(user_id, TokenKind::Access, now)?;
        let refresh = self.issue(user_id, TokenKind::Refresh, now)?;
        let token_hash = self
            .hasher
            .hash(&refresh.token)
            .await
            .map_err(map_hash_error)?;
        let record = NewRefreshToken {
            user_id,
            token_hash,
            created_at: now,
            expires_at: refresh.claims.expires_at,
        };
        let pair = TokenPair {
            access_token: access.token,
            refresh_token: refresh.token,
        };
        Ok((pair, record))
    }

    async fn start_session(&self, user: User, now: DateTime<Utc>) -> Result<AuthPayload, Error> {
        let (tokens, record) = self.issue_pair(user.id, now).await?;
        self.refresh_tokens
            .store(&record)
            .await
            .map_err(Error::from)?;
        Ok(AuthPayload { tokens, user })
    }

    /// Find the stored row whose hash matches `token`.
    async fn find_stored(
        &self,
        token: &str,
        stored: &[StoredRefreshToken],
        now: Option<DateTime<Utc>>,
    ) -> Result<Option<i32>, Error> {
        for entry in stored {
            if now.is_some_and(|instant| entry.expires_at <= instant) {
                continue;
            }
            if self
                .hasher
                .verify(token, &entry.token_hash)
                .await
                .map_err(map_hash_error)?
            {
                return Ok(Some(entry.id));
            }
        }
        Ok(None)
    }

    async fn stored_tokens(&self, user_id: UserId) -> Result<Vec<StoredRefreshToken>, Error> {
        self.refresh_tokens
            .list_for_user(user_id)
            .await
            .map_err(Error::from)
    }

    async fn purge_expired(&self, user_id: UserId, now: DateTime<Utc>) {
        match self.refresh_tokens.purge_expired(user_id, now).await {
            Ok(0) => {}
            Ok(purged) => info!(%user_id, purged, "purged expired refresh tokens"),
            Err(error) => warn!(%user_id, %error, "failed to purge expired refresh tokens"),
        }
    }
}

#[async_trait]
impl<U, R> AuthCommand for AuthService<U, R>
where
    U: UserRepository,
    R: RefreshTokenRepository,
{
    async fn register(&self, registration: Registration) -> Result<AuthPayload, Error> {
        let now = self.clock.utc();
        let password_hash = self
            .hasher
            .hash(registration.password.expose())
            .await
            .map_err(map_hash_error)?;
        let new_user = NewUser {
            email: registration.email,
            name: Some(registration.name),
            password_hash,
            created_at: now,
        };
        let user = self.users.create(&new_user).await.map_err(|error| {
            if matches!(error, UserPersistenceError::DuplicateEmail { .. }) {
                info!(email = %new_user.email, "registration rejected: email taken");
            }
            Error::from(error)
        })?;
        info!(user_id = %user.id, "user registered");
        self.start_session(user, now).await
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AuthPayload, Error> {
        let now = self.clock.utc();
        let Some(found) = self
            .users
            .find_credentials(&credentials.email)
            .await
            .map_err(Error::from)?
        else {
            warn!(email = %credentials.email, "login failed: unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = self
            .hasher
            .verify(credentials.password.expose(), &found.password_hash)
            .await
            .map_err(map_hash_error)?;
        if !matches {
            warn!(user_id = %found.user.id, "login failed: wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        info!(user_id = %found.user.id, "user logged in");
        self.start_session(found.user, now).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthPayload, Error> {
        let now = self.clock.utc();
        let claims = self
            .tokens
            .verify(refresh_token, TokenKind::Refresh, now)
            .map_err(|error| {
                warn!(%error, "refresh rejected");
                map_presented_refresh_error(&error)
            })?;
        let user_id = claims.user_id;

        let stored = self.stored_tokens(user_id).await?;
        let Some(old_id) = self.find_stored(refresh_token, &stored, Some(now)).await? else {
            warn!(%user_id, jti = %claims.jti, "refresh rejected: token not on record");
            return Err(Error::unauthorized(REVOKED_REFRESH_TOKEN));
        };

        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(Error::from)?
            .ok_or_else(|| Error::unauthorized("User no longer exists"))?;

        let (tokens, record) = self.issue_pair(user_id, now).await?;
        let rotated = self
            .refresh_tokens
            .rotate(old_id, &record)
            .await
            .map_err(Error::from)?;
        if !rotated {
            warn!(%user_id, "refresh rejected: token revoked concurrently");
            return Err(Error::unauthorized(REVOKED_REFRESH_TOKEN));
        }
        info!(%user_id, "refresh token rotated");

        self.purge_expired(user_id, now).await;
        Ok(AuthPayload { tokens, user })
    }

    async fn logout(&self, refresh_token: &str) -> Result<bool, Error> {
        let now = self.clock.utc();
        let claims = self
            .tokens
            .verify(refresh_token, TokenKind::Refresh, now)
            .map_err(|error| map_presented_refresh_error(&error))?;

        let stored = self.stored_tokens(claims.user_id).await?;
        let Some(id) = self.find_stored(refresh_token, &stored, None).await? else {
            return Ok(false);
        };
        let removed = self
            .refresh_tokens
            .delete(id)
            .await
            .map_err(Error::from)?;
        if removed {
            info!(user_id = %claims.user_id, "user logged out");
        }
        Ok(removed)
    }
}

/// Verifies bearer access tokens against the injected clock.
#[derive(Clone)]
pub struct TokenVerifier {
    tokens: Arc<dyn TokenService>,
    clock: Arc<dyn Clock>,
}

impl TokenVerifier {
    /// Create a verifier over a token service.
    pub fn new(tokens: Arc<dyn TokenService>, clock: Arc<dyn Clock>) -> Self {
        Self { tokens, clock }
    }
}

impl AccessTokenVerifier for TokenVerifier {
    fn verify_access_token(&self, token: &str) -> Result<UserId, Error> {
        self.tokens
            .verify(token, TokenKind::Access, self.clock.utc())
            .map(|claims| claims.user_id)
            .map_err(|error| match error {
                TokenError::Expired => Error::unauthorized("Access token expired"),
                TokenError::WrongKind { .. } => Error::unauthorized("Invalid token type"),
                TokenError::Invalid { .. } | TokenError::Signing { .. } => {
                    Error::unauthorized("Invalid access token")
                }
            })
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
