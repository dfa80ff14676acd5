//! Authentication primitives: registration and login input, the request
//! viewer, and the payload returned after a successful sign-in.
//!
//! Constructors validate raw strings so resolvers hand the services only
//! well-formed values.

use crate::domain::{
    Email, Error, Password, TokenPair, User, UserId, UserName, ValidationIssues,
};

/// Validated registration input.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Normalised email.
    pub email: Email,
    /// Password meeting the strength rule.
    pub password: Password,
    /// Trimmed display name.
    pub name: UserName,
}

impl Registration {
    /// Validate all registration fields, reporting every issue at once.
    ///
    /// # Examples
    /// ```
    /// use scribe::domain::Registration;
    ///
    /// let err = Registration::parse("nope", "short", " ").expect_err("invalid");
    /// assert_eq!(
    ///     err.message(),
    ///     "Email must be a valid email address, Password must be at least 8 characters, Name is required"
    /// );
    /// ```
    pub fn parse(email: &str, password: &str, name: &str) -> Result<Self, Error> {
        let mut issues = ValidationIssues::default();
        let email = issues.check(Email::new(email));
        let password = issues.check(Password::new(password));
        let name = issues.check(UserName::new(name));

        let registration = match (email, password, name) {
            (Some(email), Some(password), Some(name)) => Some(Self {
                email,
                password,
                name,
            }),
            _ => None,
        };
        issues.conclude(registration)
    }
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is normalised exactly as at registration.
/// - `password` is non-empty; whitespace is preserved.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    /// Normalised email.
    pub email: Email,
    /// Presented password.
    pub password: Password,
}

impl LoginCredentials {
    /// Validate login input.
    pub fn parse(email: &str, password: &str) -> Result<Self, Error> {
        let mut issues = ValidationIssues::default();
        let email = issues.check(Email::new(email));
        issues.require(!password.is_empty(), "Password is required");

        issues.conclude(email.map(|email| Self {
            email,
            password: Password::presented(password),
        }))
    }
}

/// Result of registration, login, or refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPayload {
    /// Newly issued token pair.
    pub tokens: TokenPair,
    /// Authenticated user.
    pub user: User,
}

/// The caller of an operation as derived from the bearer token.
///
/// An invalid token does not fail the request outright; it yields an
/// anonymous viewer that remembers why the token was rejected so operations
/// requiring authentication can report it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Viewer {
    /// No usable credential.
    #[default]
    Anonymous,
    /// A credential was presented but rejected.
    Rejected {
        /// Reason shown to the client.
        reason: String,
    },
    /// Verified access token.
    Authenticated(UserId),
}

impl Viewer {
    /// Identifier of the authenticated user, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::Authenticated(id) => Some(*id),
            Self::Anonymous | Self::Rejected { .. } => None,
        }
    }

    /// Require an authenticated viewer.
    ///
    /// # Examples
    /// ```
    /// use scribe::domain::{ErrorCode, Viewer};
    ///
    /// let err = Viewer::Rejected { reason: "Access token expired".into() }
    ///     .require_user()
    ///     .expect_err("rejected viewer");
    /// assert_eq!(err.code(), ErrorCode::Unauthorized);
    /// assert_eq!(err.message(), "Access token expired");
    /// ```
    pub fn require_user(&self) -> Result<UserId, Error> {
        match self {
            Self::Authenticated(id) => Ok(*id),
            Self::Rejected { reason } => Err(Error::unauthorized(reason.clone())),
            Self::Anonymous => Err(Error::unauthorized("Authentication required")),
        }
    }
}
