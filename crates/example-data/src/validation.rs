//! Author identity rules mirroring backend constraints.
//!
//! The backend trims and lower-cases emails and requires names between one
//! and [`NAME_MAX`] characters. Generated records must satisfy the same rules
//! so seeding never trips backend validation.

/// Maximum allowed length for an author name.
pub const NAME_MAX: usize = 64;

/// Returns `true` when `name` is a non-blank name within [`NAME_MAX`].
///
/// # Examples
///
/// ```
/// use example_data::is_valid_name;
///
/// assert!(is_valid_name("Ada Lovelace"));
/// assert!(!is_valid_name("   "));
/// ```
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty() && trimmed.chars().count() <= NAME_MAX
}

/// Returns `true` for a lower-case `local@domain.tld` address.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_email;
///
/// assert!(is_valid_email("ada.lovelace.0@example.com"));
/// assert!(!is_valid_email("Ada@Example.com"));
/// assert!(!is_valid_email("no-at-sign"));
/// ```
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && email
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '@' | '_'))
}

/// Builds the local part of an email from a name, keeping only characters
/// the backend accepts.
pub(crate) fn email_local_part(name: &str) -> String {
    let mut local = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            local.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() && !local.ends_with('.') {
            local.push('.');
        }
    }
    let trimmed = local.trim_matches('.');
    if trimmed.is_empty() {
        "author".to_owned()
    } else {
        trimmed.to_owned()
    }
}
