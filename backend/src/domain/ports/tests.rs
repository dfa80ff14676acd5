use super::*;
use crate::domain::TokenKind;
use rstest::rstest;

#[rstest]
#[case(
    UserPersistenceError::connection("pool closed"),
    "user repository connection failed: pool closed"
)]
#[case(
    UserPersistenceError::duplicate_email("ada@example.com"),
    "email already registered: ada@example.com"
)]
fn user_persistence_errors_render_context(
    #[case] error: UserPersistenceError,
    #[case] expected: &str,
) {
    assert_eq!(error.to_string(), expected);
}

#[rstest]
fn already_liked_is_a_unit_variant() {
    assert_eq!(LikePersistenceError::already_liked(), LikePersistenceError::AlreadyLiked);
}

#[rstest]
fn wrong_kind_names_both_token_types() {
    let error = TokenError::WrongKind {
        expected: TokenKind::Access,
        actual: TokenKind::Refresh,
    };
    assert_eq!(error.to_string(), "expected access token, got refresh");
}

#[rstest]
#[case(0, Some(0))]
#[case(u64::try_from(i64::MAX).unwrap_or_default(), Some(i64::MAX))]
#[case(u64::MAX, None)]
fn seeds_convert_to_signed_column(#[case] seed: u64, #[case] expected: Option<i64>) {
    assert_eq!(try_seed_to_i64(seed), expected);
}
