//! Aggregation of input validation failures.
//!
//! Operations check every argument before failing so callers see all issues
//! at once. The combined message joins individual issues with `", "`.

use serde_json::json;

use crate::domain::Error;

/// Collects human-readable validation issues.
///
/// # Examples
/// ```
/// use scribe::domain::{ErrorCode, ValidationIssues};
///
/// let mut issues = ValidationIssues::default();
/// issues.require(false, "Title is required");
/// issues.require(false, "Content is required");
///
/// let err = issues.finish().expect_err("two issues recorded");
/// assert_eq!(err.code(), ErrorCode::InvalidRequest);
/// assert_eq!(err.message(), "Title is required, Content is required");
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationIssues {
    issues: Vec<String>,
}

impl ValidationIssues {
    /// Record an issue unconditionally.
    pub fn push(&mut self, issue: impl Into<String>) {
        self.issues.push(issue.into());
    }

    /// Record `issue` when `condition` does not hold.
    pub fn require(&mut self, condition: bool, issue: impl Into<String>) {
        if !condition {
            self.push(issue);
        }
    }

    /// Record the error of a fallible check and keep its success value.
    pub fn check<T, E: std::fmt::Display>(&mut self, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.push(err.to_string());
                None
            }
        }
    }


    /// Convert the collected issues into an `InvalidRequest` error.
    pub fn finish(self) -> Result<(), Error> {
        if self.issues.is_empty() {
            return Ok(());
        }
        let message = self.issues.join(", ");
        Err(Error::invalid_request(message).with_details(json!({ "issues": self.issues })))
    }

    /// Fail with the collected issues, otherwise yield the assembled value.
    ///
    /// `value` is `None` only when a [`check`](Self::check) failed, which
    /// always records an issue.
    pub fn conclude<T>(self, value: Option<T>) -> Result<T, Error> {
        self.finish()?;
        value.ok_or_else(|| Error::invalid_request("Invalid input"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn empty_collector_succeeds() {
        assert!(ValidationIssues::default().finish().is_ok());
    }

    #[rstest]
    fn details_list_each_issue() {
        let mut issues = ValidationIssues::default();
        issues.push("a");
        issues.require(true, "never");
        let parsed: Option<u8> = issues.check("x".parse::<u8>());
        assert!(parsed.is_none());

        let err = issues.finish().expect_err("issues recorded");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().expect("details attached");
        assert_eq!(details["issues"].as_array().map(Vec::len), Some(2));
    }

    #[rstest]
    fn conclude_yields_the_value_without_issues() {
        let mut issues = ValidationIssues::default();
        let parsed = issues.check("7".parse::<u8>());

        assert_eq!(issues.conclude(parsed).expect("valid"), 7);
    }

    #[rstest]
    fn conclude_reports_every_issue() {
        let mut issues = ValidationIssues::default();
        issues.push("Title is required");
        let parsed = issues.check("x".parse::<u8>());

        let err = issues.conclude(parsed).expect_err("invalid");
        assert_eq!(
            err.message(),
            "Title is required, invalid digit found in string"
        );
    }
}
