//! PostgreSQL-backed `CommentRepository` implementation using Diesel ORM.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::Direction;

use crate::domain::ports::{CommentListQuery, CommentPersistenceError, CommentRepository};
use crate::domain::{ArticleId, Comment, CommentContent, CommentId, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::diesel_helpers::{counts_by_article, limit_to_i64, raw_article_ids};
use super::models::{CommentRow, NewCommentRow};
use super::pool::{DbPool, PoolError};
use super::schema::comments;

/// Diesel-backed implementation of the `CommentRepository` port.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CommentPersistenceError {
    map_basic_pool_error(error, CommentPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CommentPersistenceError {
    map_basic_diesel_error(
        error,
        CommentPersistenceError::query,
        CommentPersistenceError::connection,
    )
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn create(
        &self,
        author_id: UserId,
        article_id: ArticleId,
        content: &CommentContent,
        now: DateTime<Utc>,
    ) -> Result<Comment, CommentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewCommentRow {
            content: content.as_ref(),
            author_id: author_id.get(),
            article_id: article_id.get(),
            created_at: now,
            updated_at: now,
        };

        diesel::insert_into(comments::table)
            .values(&row)
            .returning(CommentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(Comment::from)
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, CommentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        comments::table
            .find(id.get())
            .select(CommentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Comment::from))
            .map_err(map_diesel_error)
    }

    async fn list(&self, query: CommentListQuery) -> Result<Vec<Comment>, CommentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut statement = comments::table
            .filter(comments::article_id.eq(query.article_id.get()))
            .select(CommentRow::as_select())
            .into_boxed();

        statement = match (query.direction, query.after) {
            (Direction::Descending, Some(after)) => statement.filter(
                comments::created_at.lt(after.created_at).or(comments::created_at
                    .eq(after.created_at)
                    .and(comments::id.lt(after.id))),
            ),
            (Direction::Ascending, Some(after)) => statement.filter(
                comments::created_at.gt(after.created_at).or(comments::created_at
                    .eq(after.created_at)
                    .and(comments::id.gt(after.id))),
            ),
            (_, None) => statement,
        };
        statement = match query.direction {
            Direction::Descending => {
                statement.order((comments::created_at.desc(), comments::id.desc()))
            }
            Direction::Ascending => {
                statement.order((comments::created_at.asc(), comments::id.asc()))
            }
        };

        statement
            .limit(limit_to_i64(query.limit))
            .load(&mut conn)
            .await
            .map(|rows| rows.into_iter().map(Comment::from).collect())
            .map_err(map_diesel_error)
    }

    async fn update(
        &self,
        id: CommentId,
        content: &CommentContent,
        now: DateTime<Utc>,
    ) -> Result<Option<Comment>, CommentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(comments::table.find(id.get()))
            .set((
                comments::content.eq(content.as_ref()),
                comments::updated_at.eq(now),
            ))
            .returning(CommentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Comment::from))
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: CommentId) -> Result<bool, CommentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(comments::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map(|deleted| deleted > 0)
            .map_err(map_diesel_error)
    }

    async fn count_by_articles(
        &self,
        ids: &[ArticleId],
    ) -> Result<HashMap<ArticleId, i64>, CommentPersistenceError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        comments::table
            .filter(comments::article_id.eq_any(raw_article_ids(ids)))
            .group_by(comments::article_id)
            .select((comments::article_id, count_star()))
            .load::<(i32, i64)>(&mut conn)
            .await
            .map(counts_by_article)
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let error = map_pool_error(PoolError::checkout("timed out"));

        assert!(matches!(error, CommentPersistenceError::Connection { .. }));
    }

    #[rstest]
    fn not_found_maps_to_query_error() {
        let error = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(error, CommentPersistenceError::Query { .. }));
    }
}
