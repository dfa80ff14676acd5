//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types live next to
//! the rows so every adapter reads storage the same way.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    Article, ArticleId, Comment, CommentId, Email, Like, LikeId, User, UserId, UserName,
};

use super::schema::{articles, comments, example_data_runs, likes, refresh_tokens, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub email: String,
    pub name: Option<String>,
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    /// Split the row into the public user and its password hash.
    pub(crate) fn into_parts(self) -> (User, String) {
        let user = User {
            id: UserId::from_row(self.id),
            email: Email::from_row(self.email),
            name: self.name.map(UserName::from_row),
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        (user, self.password)
    }
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        row.into_parts().0
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub name: Option<&'a str>,
    pub password: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the articles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = articles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ArticleRow {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        Self {
            id: ArticleId::from_row(row.id),
            title: row.title,
            content: row.content,
            author_id: UserId::from_row(row.author_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insertable struct for creating articles.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = articles)]
pub(crate) struct NewArticleRow<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub author_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update of an article; `None` fields are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = articles)]
pub(crate) struct ArticleUpdate<'a> {
    pub title: Option<&'a str>,
    pub content: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the comments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub id: i32,
    pub content: String,
    pub author_id: i32,
    pub article_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: CommentId::from_row(row.id),
            content: row.content,
            author_id: UserId::from_row(row.author_id),
            article_id: ArticleId::from_row(row.article_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insertable struct for creating comments.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub(crate) struct NewCommentRow<'a> {
    pub content: &'a str,
    pub author_id: i32,
    pub article_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the likes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = likes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LikeRow {
    pub id: i32,
    pub user_id: i32,
    pub article_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<LikeRow> for Like {
    fn from(row: LikeRow) -> Self {
        Self {
            id: LikeId::from_row(row.id),
            user_id: UserId::from_row(row.user_id),
            article_id: ArticleId::from_row(row.article_id),
            created_at: row.created_at,
        }
    }
}

/// Insertable struct for creating likes.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = likes)]
pub(crate) struct NewLikeRow {
    pub user_id: i32,
    pub article_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the refresh_tokens table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = refresh_tokens)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RefreshTokenRow {
    pub id: i32,
    pub token: String,
    pub user_id: i32,
    pub expires_at: DateTime<Utc>,
}

/// Insertable struct for storing refresh token hashes.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = refresh_tokens)]
pub(crate) struct NewRefreshTokenRow<'a> {
    pub token: &'a str,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Insertable struct for recording example data seed runs.
///
/// `applied_at` is filled by the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = example_data_runs)]
pub(crate) struct NewExampleDataRunRow<'a> {
    pub seed_key: &'a str,
    pub seed: i64,
    pub user_count: i32,
    pub article_count: i32,
    pub comment_count: i32,
    pub like_count: i32,
}
