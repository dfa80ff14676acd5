//! Tests for the account and session services.

use std::sync::Arc;

use chrono::{Duration, TimeZone};
use rstest::{fixture, rstest};
use uuid::Uuid;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{
    MockCredentialHasher, MockRefreshTokenRepository, MockTokenService, MockUserRepository,
    UserCredentials,
};
use crate::domain::{Email, TokenClaims, UserName};
use crate::test_support::FixedClock;

type Service = AuthService<MockUserRepository, MockRefreshTokenRepository>;

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn user_id() -> UserId {
    UserId::new(7).expect("valid id")
}

fn user(now: DateTime<Utc>) -> User {
    User {
        id: user_id(),
        email: Email::new("ada@example.com").expect("valid email"),
        name: Some(UserName::new("Ada").expect("valid name")),
        created_at: now,
        updated_at: now,
    }
}

fn claims(kind: TokenKind, now: DateTime<Utc>) -> TokenClaims {
    TokenClaims {
        user_id: user_id(),
        kind,
        jti: Uuid::new_v4(),
        issued_at: now,
        expires_at: now + kind.ttl(),
    }
}

/// Token service that issues `<kind>-token-<n>` and accepts `refresh-token`.
fn token_service(now: DateTime<Utc>) -> MockTokenService {
    let mut tokens = MockTokenService::new();
    tokens.expect_issue().returning(|_, kind, issued_at| {
        Ok(IssuedToken {
            token: format!("{kind}-token-new"),
            claims: claims(kind, issued_at),
        })
    });
    tokens
        .expect_verify()
        .returning(move |token, expected, _| match token {
            "refresh-token" if expected == TokenKind::Refresh => Ok(claims(expected, now)),
            "access-token" => Err(TokenError::WrongKind {
                expected,
                actual: TokenKind::Access,
            }),
            "stale-token" => Err(TokenError::Expired),
            _ => Err(TokenError::invalid("bad signature")),
        });
    tokens
}

/// Hasher whose hashes are `hashed:<secret>`.
fn hasher() -> MockCredentialHasher {
    let mut hasher = MockCredentialHasher::new();
    hasher
        .expect_hash()
        .returning(|secret| Ok(format!("hashed:{secret}")));
    hasher
        .expect_verify()
        .returning(|secret, hash| Ok(hash == format!("hashed:{secret}")));
    hasher
}

fn service(
    users: MockUserRepository,
    refresh_tokens: MockRefreshTokenRepository,
    now: DateTime<Utc>,
) -> Service {
    AuthService::new(
        Arc::new(users),
        Arc::new(refresh_tokens),
        Arc::new(hasher()),
        Arc::new(token_service(now)),
        Arc::new(FixedClock::new(now)),
    )
}

fn stored(id: i32, secret: &str, expires_at: DateTime<Utc>) -> StoredRefreshToken {
    StoredRefreshToken {
        id,
        user_id: user_id(),
        token_hash: format!("hashed:{secret}"),
        expires_at,
    }
}

#[rstest]
#[tokio::test]
async fn register_hashes_password_and_stores_refresh_token(now: DateTime<Utc>) {
    let mut users = MockUserRepository::new();
    users
        .expect_create()
        .withf(|new_user| new_user.password_hash == "hashed:password123")
        .times(1)
        .returning(move |_| Ok(user(now)));
    let mut refresh_tokens = MockRefreshTokenRepository::new();
    refresh_tokens
        .expect_store()
        .withf(move |record| {
            record.token_hash == "hashed:refresh-token-new"
                && record.expires_at == now + Duration::days(7)
        })
        .times(1)
        .returning(|_| Ok(()));

    let registration =
        Registration::parse("ada@example.com", "password123", "Ada").expect("valid input");
    let payload = service(users, refresh_tokens, now)
        .register(registration)
        .await
        .expect("registration succeeds");

    assert_eq!(payload.user.id, user_id());
    assert_eq!(payload.tokens.access_token, "access-token-new");
    assert_eq!(payload.tokens.refresh_token, "refresh-token-new");
}

#[rstest]
#[tokio::test]
async fn register_reports_duplicate_email_as_conflict(now: DateTime<Utc>) {
    let mut users = MockUserRepository::new();
    users
        .expect_create()
        .returning(|_| Err(UserPersistenceError::duplicate_email("ada@example.com")));

    let registration =
        Registration::parse("ada@example.com", "password123", "Ada").expect("valid input");
    let error = service(users, MockRefreshTokenRepository::new(), now)
        .register(registration)
        .await
        .expect_err("duplicate email");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), "Email is already registered");
}

#[rstest]
#[case::unknown_email(None)]
#[case::wrong_password(Some("hashed:other-password"))]
#[tokio::test]
async fn login_failures_share_one_message(
    now: DateTime<Utc>,
    #[case] stored_hash: Option<&'static str>,
) {
    let mut users = MockUserRepository::new();
    users.expect_find_credentials().returning(move |_| {
        Ok(stored_hash.map(|hash| UserCredentials {
            user: user(now),
            password_hash: hash.to_owned(),
        }))
    });

    let credentials =
        LoginCredentials::parse("ada@example.com", "password123").expect("valid input");
    let error = service(users, MockRefreshTokenRepository::new(), now)
        .login(credentials)
        .await
        .expect_err("login fails");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), "Invalid email or password");
}

#[rstest]
#[tokio::test]
async fn login_maps_unavailable_repository(now: DateTime<Utc>) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_credentials()
        .returning(|_| Err(UserPersistenceError::connection("refused")));

    let credentials =
        LoginCredentials::parse("ada@example.com", "password123").expect("valid input");
    let error = service(users, MockRefreshTokenRepository::new(), now)
        .login(credentials)
        .await
        .expect_err("repository down");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn refresh_rotates_matching_token(now: DateTime<Utc>) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(move |_| Ok(Some(user(now))));
    let mut refresh_tokens = MockRefreshTokenRepository::new();
    refresh_tokens.expect_list_for_user().returning(move |_| {
        Ok(vec![
            stored(1, "older-token", now + Duration::days(1)),
            stored(2, "refresh-token", now + Duration::days(6)),
        ])
    });
    refresh_tokens
        .expect_rotate()
        .withf(|old_id, record| *old_id == 2 && record.token_hash == "hashed:refresh-token-new")
        .times(1)
        .returning(|_, _| Ok(true));
    refresh_tokens
        .expect_purge_expired()
        .times(1)
        .returning(|_, _| Ok(0));

    let payload = service(users, refresh_tokens, now)
        .refresh("refresh-token")
        .await
        .expect("refresh succeeds");

    assert_eq!(payload.tokens.refresh_token, "refresh-token-new");
    assert_eq!(payload.user.id, user_id());
}

#[rstest]
#[tokio::test]
async fn refresh_rejects_token_missing_from_store(now: DateTime<Utc>) {
    let mut refresh_tokens = MockRefreshTokenRepository::new();
    refresh_tokens
        .expect_list_for_user()
        .returning(move |_| Ok(vec![stored(1, "someone-else", now + Duration::days(1))]));
    refresh_tokens.expect_rotate().times(0);

    let error = service(MockUserRepository::new(), refresh_tokens, now)
        .refresh("refresh-token")
        .await
        .expect_err("revoked token");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), "Refresh token has been revoked");
}

#[rstest]
#[tokio::test]
async fn refresh_ignores_expired_stored_rows(now: DateTime<Utc>) {
    let mut refresh_tokens = MockRefreshTokenRepository::new();
    refresh_tokens
        .expect_list_for_user()
        .returning(move |_| Ok(vec![stored(3, "refresh-token", now - Duration::minutes(1))]));

    let error = service(MockUserRepository::new(), refresh_tokens, now)
        .refresh("refresh-token")
        .await
        .expect_err("stored row expired");

    assert_eq!(error.message(), "Refresh token has been revoked");
}

#[rstest]
#[tokio::test]
async fn refresh_loses_rotation_race(now: DateTime<Utc>) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(move |_| Ok(Some(user(now))));
    let mut refresh_tokens = MockRefreshTokenRepository::new();
    refresh_tokens
        .expect_list_for_user()
        .returning(move |_| Ok(vec![stored(2, "refresh-token", now + Duration::days(6))]));
    refresh_tokens.expect_rotate().returning(|_, _| Ok(false));
    refresh_tokens.expect_purge_expired().times(0);

    let error = service(users, refresh_tokens, now)
        .refresh("refresh-token")
        .await
        .expect_err("concurrent rotation wins");

    assert_eq!(error.message(), "Refresh token has been revoked");
}

#[rstest]
#[case::access_token("access-token", "Invalid token type")]
#[case::expired("stale-token", "Refresh token expired")]
#[case::forged("forged", "Invalid refresh token")]
#[tokio::test]
async fn refresh_rejects_unusable_tokens(
    now: DateTime<Utc>,
    #[case] token: &str,
    #[case] message: &str,
) {
    let error = service(
        MockUserRepository::new(),
        MockRefreshTokenRepository::new(),
        now,
    )
    .refresh(token)
    .await
    .expect_err("token rejected");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), message);
}

#[rstest]
#[case::known(vec![2], true)]
#[case::unknown(vec![], false)]
#[tokio::test]
async fn logout_deletes_only_matching_token(
    now: DateTime<Utc>,
    #[case] matching_ids: Vec<i32>,
    #[case] expected: bool,
) {
    let mut refresh_tokens = MockRefreshTokenRepository::new();
    let rows: Vec<StoredRefreshToken> = matching_ids
        .iter()
        .map(|id| stored(*id, "refresh-token", now + Duration::days(1)))
        .collect();
    refresh_tokens
        .expect_list_for_user()
        .returning(move |_| Ok(rows.clone()));
    refresh_tokens
        .expect_delete()
        .withf(|id| *id == 2)
        .times(usize::from(expected))
        .returning(|_| Ok(true));

    let removed = service(MockUserRepository::new(), refresh_tokens, now)
        .logout("refresh-token")
        .await
        .expect("logout succeeds");

    assert_eq!(removed, expected);
}

#[rstest]
#[case::expired(TokenError::Expired, "Access token expired")]
#[case::wrong_kind(
    TokenError::WrongKind { expected: TokenKind::Access, actual: TokenKind::Refresh },
    "Invalid token type"
)]
#[case::invalid(TokenError::invalid("bad signature"), "Invalid access token")]
fn verifier_maps_token_errors(now: DateTime<Utc>, #[case] error: TokenError, #[case] message: &str) {
    let mut tokens = MockTokenService::new();
    tokens
        .expect_verify()
        .return_once(move |_, _, _| Err(error));
    let verifier = TokenVerifier::new(Arc::new(tokens), Arc::new(FixedClock::new(now)));

    let rejected = verifier
        .verify_access_token("token")
        .expect_err("token rejected");

    assert_eq!(rejected.code(), ErrorCode::Unauthorized);
    assert_eq!(rejected.message(), message);
}

#[rstest]
fn verifier_returns_subject(now: DateTime<Utc>) {
    let mut tokens = MockTokenService::new();
    tokens
        .expect_verify()
        .withf(|_, expected, _| *expected == TokenKind::Access)
        .return_once(move |_, kind, _| Ok(claims(kind, now)));
    let verifier = TokenVerifier::new(Arc::new(tokens), Arc::new(FixedClock::new(now)));

    assert_eq!(verifier.verify_access_token("token"), Ok(user_id()));
}
