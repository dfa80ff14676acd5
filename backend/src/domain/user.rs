//! User data model.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use zeroize::Zeroizing;

use crate::domain::UserId;

/// Maximum allowed length for a user name.
pub const NAME_MAX: usize = 64;
/// Minimum allowed password length.
pub const PASSWORD_MIN: usize = 8;

/// Validation errors for user-supplied identity fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Email was blank.
    #[error("Email is required")]
    EmptyEmail,
    /// Email does not look like an address.
    #[error("Email must be a valid email address")]
    InvalidEmail,
    /// Name was blank.
    #[error("Name is required")]
    EmptyName,
    /// Name exceeds [`NAME_MAX`].
    #[error("Name cannot exceed {max} characters")]
    NameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// Password shorter than [`PASSWORD_MIN`].
    #[error("Password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum accepted length.
        min: usize,
    },
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Normalised (trimmed, lower-cased) email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Normalise and validate an email address.
    ///
    /// # Examples
    /// ```
    /// use scribe::domain::Email;
    ///
    /// let email = Email::new("  Ada@Example.COM ").expect("valid email");
    /// assert_eq!(email.as_ref(), "ada@example.com");
    /// assert!(Email::new("ada").is_err());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(&normalised) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }

    pub(crate) fn from_row(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trimmed display name between 1 and [`NAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    /// Trim and validate a user name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if trimmed.chars().count() > NAME_MAX {
            return Err(UserValidationError::NameTooLong { max: NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub(crate) fn from_row(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Plain-text password held only long enough to hash or verify it.
///
/// The buffer is wiped on drop and never printed.
#[derive(Clone)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate a new password for registration.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = Zeroizing::new(raw.into());
        if raw.chars().count() < PASSWORD_MIN {
            return Err(UserValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self(raw))
    }

    /// Wrap a password presented at login without strength checks.
    pub fn presented(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    /// Borrow the secret for hashing.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Registered user as exposed to clients. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Identifier.
    pub id: UserId,
    /// Unique normalised email.
    pub email: Email,
    /// Optional display name.
    pub name: Option<UserName>,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last update instant.
    pub updated_at: DateTime<Utc>,
}
