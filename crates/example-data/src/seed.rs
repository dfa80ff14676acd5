//! Generated dataset record types.
//!
//! Records reference each other by position: `author_index` points into
//! [`ExampleDataset::users`], `article_index` into
//! [`ExampleDataset::articles`]. Consumers map positions to the identifiers
//! their storage assigns on insert.

use serde::{Deserialize, Serialize};

/// A generated user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleUserSeed {
    /// Unique, lower-case email address.
    pub email: String,
    /// Full display name.
    pub name: String,
}

/// A generated article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleArticleSeed {
    /// Position of the author in the user list.
    pub author_index: usize,
    /// Headline sentence.
    pub title: String,
    /// Body text; paragraphs separated by blank lines.
    pub content: String,
    /// How long before the seeding instant the article was published.
    pub minutes_ago: u32,
}

/// A generated comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleCommentSeed {
    /// Position of the author in the user list.
    pub author_index: usize,
    /// Position of the commented article in the article list.
    pub article_index: usize,
    /// Comment text.
    pub content: String,
    /// How long before the seeding instant the comment was posted.
    pub minutes_ago: u32,
}

/// A generated like. Each (user, article) pair appears at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleLikeSeed {
    /// Position of the liking user in the user list.
    pub user_index: usize,
    /// Position of the liked article in the article list.
    pub article_index: usize,
}

/// Complete generated dataset for one seed.
///
/// # Example
///
/// ```
/// use example_data::{ExampleDataset, ExampleUserSeed};
///
/// let dataset = ExampleDataset {
///     users: vec![ExampleUserSeed {
///         email: "ada.lovelace.0@example.com".to_owned(),
///         name: "Ada Lovelace".to_owned(),
///     }],
///     ..ExampleDataset::default()
/// };
/// assert!(dataset.articles.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleDataset {
    /// Generated users.
    pub users: Vec<ExampleUserSeed>,
    /// Generated articles.
    pub articles: Vec<ExampleArticleSeed>,
    /// Generated comments.
    pub comments: Vec<ExampleCommentSeed>,
    /// Generated likes.
    pub likes: Vec<ExampleLikeSeed>,
}
