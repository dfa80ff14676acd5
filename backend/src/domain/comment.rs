//! Comments on articles.

use chrono::{DateTime, Utc};

use crate::domain::{
    ArticleId, CommentId, Error, Timeline, TimelineKey, UserId, ValidationIssues,
};

/// Maximum comment length in characters.
pub const COMMENT_MAX: usize = 1000;

/// Comment left by a user on an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Identifier.
    pub id: CommentId,
    /// Comment text.
    pub content: String,
    /// Author.
    pub author_id: UserId,
    /// Commented article.
    pub article_id: ArticleId,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last update instant.
    pub updated_at: DateTime<Utc>,
}

impl Timeline for Comment {
    fn timeline_key(&self) -> TimelineKey {
        TimelineKey {
            created_at: self.created_at,
            id: self.id.get(),
        }
    }
}

/// Comment text between 1 and [`COMMENT_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentContent(String);

impl CommentContent {
    /// Validate comment text.
    ///
    /// # Examples
    /// ```
    /// use scribe::domain::CommentContent;
    ///
    /// assert!(CommentContent::parse("Nice read").is_ok());
    /// let err = CommentContent::parse("   ").expect_err("blank");
    /// assert_eq!(err.message(), "Comment content is required");
    /// ```
    pub fn parse(raw: &str) -> Result<Self, Error> {
        if raw.trim().is_empty() {
            return Err(Error::invalid_request("Comment content is required"));
        }
        if raw.chars().count() > COMMENT_MAX {
            return Err(Error::invalid_request(format!(
                "Comment content cannot exceed {COMMENT_MAX} characters"
            )));
        }
        Ok(Self(raw.to_owned()))
    }
}

/// Validated `createComment` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft {
    /// Commented article.
    pub article_id: ArticleId,
    /// Comment text.
    pub content: CommentContent,
}

impl CommentDraft {
    /// Validate content and article id, reporting every issue.
    ///
    /// # Examples
    /// ```
    /// use scribe::domain::CommentDraft;
    ///
    /// let err = CommentDraft::parse("", 0).expect_err("two issues");
    /// assert_eq!(
    ///     err.message(),
    ///     "Comment content is required, Article id must be a positive integer"
    /// );
    /// ```
    pub fn parse(content: &str, article_id: i64) -> Result<Self, Error> {
        let mut issues = ValidationIssues::default();
        let content = issues.check(CommentContent::parse(content));
        let article_id = issues.check(ArticleId::new(article_id));
        let draft = match (content, article_id) {
            (Some(content), Some(article_id)) => Some(Self {
                article_id,
                content,
            }),
            _ => None,
        };
        issues.conclude(draft)
    }
}

/// Validated `updateComment` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentEdit {
    /// Comment to change.
    pub id: CommentId,
    /// Replacement text.
    pub content: CommentContent,
}

impl CommentEdit {
    /// Validate the comment id and the new content together.
    pub fn parse(id: i64, content: &str) -> Result<Self, Error> {
        let mut issues = ValidationIssues::default();
        let id = issues.check(CommentId::new(id));
        let content = issues.check(CommentContent::parse(content));
        let edit = match (id, content) {
            (Some(id), Some(content)) => Some(Self { id, content }),
            _ => None,
        };
        issues.conclude(edit)
    }
}

impl AsRef<str> for CommentContent {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
