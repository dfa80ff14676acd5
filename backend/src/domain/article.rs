//! Articles and their validated inputs.

use chrono::{DateTime, Utc};

use crate::domain::{ArticleId, Error, Timeline, TimelineKey, UserId, ValidationIssues};

/// Maximum title length in characters.
pub const TITLE_MAX: usize = 200;

/// Published article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Identifier.
    pub id: ArticleId,
    /// Headline.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Author.
    pub author_id: UserId,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last update instant.
    pub updated_at: DateTime<Utc>,
}

impl Timeline for Article {
    fn timeline_key(&self) -> TimelineKey {
        TimelineKey {
            created_at: self.created_at,
            id: self.id.get(),
        }
    }
}

/// Validated input for a new article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDraft {
    /// Trimmed headline.
    pub title: String,
    /// Body text.
    pub content: String,
}

impl ArticleDraft {
    /// Validate title and content together.
    ///
    /// # Examples
    /// ```
    /// use scribe::domain::ArticleDraft;
    ///
    /// let err = ArticleDraft::parse("", " ").expect_err("blank fields");
    /// assert_eq!(err.message(), "Title is required, Content is required");
    /// ```
    pub fn parse(title: &str, content: &str) -> Result<Self, Error> {
        let mut issues = ValidationIssues::default();
        check_title(&mut issues, title);
        issues.require(!content.trim().is_empty(), "Content is required");
        issues.finish()?;
        Ok(Self {
            title: title.trim().to_owned(),
            content: content.to_owned(),
        })
    }
}

/// Validated partial update of an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleChanges {
    /// Replacement headline.
    pub title: Option<String>,
    /// Replacement body.
    pub content: Option<String>,
}

impl ArticleChanges {
    /// Validate an update; at least one field must be supplied and every
    /// supplied field must be non-blank.
    pub fn parse(title: Option<&str>, content: Option<&str>) -> Result<Self, Error> {
        let mut issues = ValidationIssues::default();
        let changes = Self::collect(&mut issues, title, content);
        issues.finish()?;
        Ok(changes)
    }

    fn collect(issues: &mut ValidationIssues, title: Option<&str>, content: Option<&str>) -> Self {
        issues.require(
            title.is_some() || content.is_some(),
            "At least one field must be provided",
        );
        if let Some(title) = title {
            check_title(issues, title);
        }
        if let Some(content) = content {
            issues.require(!content.trim().is_empty(), "Content cannot be empty");
        }
        Self {
            title: title.map(|t| t.trim().to_owned()),
            content: content.map(str::to_owned),
        }
    }
}

/// Validated `updateArticle` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleUpdate {
    /// Article to change.
    pub id: ArticleId,
    /// Fields to replace.
    pub changes: ArticleChanges,
}

impl ArticleUpdate {
    /// Validate the id and the changes together.
    ///
    /// # Examples
    /// ```
    /// use scribe::domain::ArticleUpdate;
    ///
    /// let err = ArticleUpdate::parse(0, Some(" "), None).expect_err("two issues");
    /// assert_eq!(
    ///     err.message(),
    ///     "Article id must be a positive integer, Title is required"
    /// );
    /// ```
    pub fn parse(id: i64, title: Option<&str>, content: Option<&str>) -> Result<Self, Error> {
        let mut issues = ValidationIssues::default();
        let id = issues.check(ArticleId::new(id));
        let changes = ArticleChanges::collect(&mut issues, title, content);
        issues.conclude(id.map(|id| Self { id, changes }))
    }
}

fn check_title(issues: &mut ValidationIssues, title: &str) {
    let trimmed = title.trim();
    issues.require(!trimmed.is_empty(), "Title is required");
    issues.require(
        trimmed.chars().count() <= TITLE_MAX,
        format!("Title cannot exceed {TITLE_MAX} characters"),
    );
}
