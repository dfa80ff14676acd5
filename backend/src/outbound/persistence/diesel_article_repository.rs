//! PostgreSQL-backed `ArticleRepository` implementation using Diesel ORM.
//!
//! Listings are keyset-paged on `(created_at, id)` newest first.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ArticleListQuery, ArticlePersistenceError, ArticleRepository};
use crate::domain::{Article, ArticleChanges, ArticleDraft, ArticleId, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::diesel_helpers::{limit_to_i64, raw_article_ids};
use super::models::{ArticleRow, ArticleUpdate, NewArticleRow};
use super::pool::{DbPool, PoolError};
use super::schema::articles;

/// Diesel-backed implementation of the `ArticleRepository` port.
#[derive(Clone)]
pub struct DieselArticleRepository {
    pool: DbPool,
}

impl DieselArticleRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ArticlePersistenceError {
    map_basic_pool_error(error, ArticlePersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ArticlePersistenceError {
    map_basic_diesel_error(
        error,
        ArticlePersistenceError::query,
        ArticlePersistenceError::connection,
    )
}

#[async_trait]
impl ArticleRepository for DieselArticleRepository {
    async fn create(
        &self,
        author_id: UserId,
        draft: &ArticleDraft,
        now: DateTime<Utc>,
    ) -> Result<Article, ArticlePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewArticleRow {
            title: &draft.title,
            content: &draft.content,
            author_id: author_id.get(),
            created_at: now,
            updated_at: now,
        };

        diesel::insert_into(articles::table)
            .values(&row)
            .returning(ArticleRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(Article::from)
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>, ArticlePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        articles::table
            .find(id.get())
            .select(ArticleRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Article::from))
            .map_err(map_diesel_error)
    }

    async fn find_by_ids(
        &self,
        ids: &[ArticleId],
    ) -> Result<Vec<Article>, ArticlePersistenceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        articles::table
            .filter(articles::id.eq_any(raw_article_ids(ids)))
            .select(ArticleRow::as_select())
            .load(&mut conn)
            .await
            .map(|rows| rows.into_iter().map(Article::from).collect())
            .map_err(map_diesel_error)
    }

    async fn list(&self, query: ArticleListQuery) -> Result<Vec<Article>, ArticlePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut statement = articles::table
            .select(ArticleRow::as_select())
            .into_boxed();
        if let Some(author_id) = query.author_id {
            statement = statement.filter(articles::author_id.eq(author_id.get()));
        }
        if let Some(after) = query.after {
            statement = statement.filter(
                articles::created_at.lt(after.created_at).or(articles::created_at
                    .eq(after.created_at)
                    .and(articles::id.lt(after.id))),
            );
        }

        statement
            .order((articles::created_at.desc(), articles::id.desc()))
            .limit(limit_to_i64(query.limit))
            .load(&mut conn)
            .await
            .map(|rows| rows.into_iter().map(Article::from).collect())
            .map_err(map_diesel_error)
    }

    async fn update(
        &self,
        id: ArticleId,
        changes: &ArticleChanges,
        now: DateTime<Utc>,
    ) -> Result<Option<Article>, ArticlePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let update = ArticleUpdate {
            title: changes.title.as_deref(),
            content: changes.content.as_deref(),
            updated_at: now,
        };

        diesel::update(articles::table.find(id.get()))
            .set(&update)
            .returning(ArticleRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Article::from))
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: ArticleId) -> Result<bool, ArticlePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(articles::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map(|deleted| deleted > 0)
            .map_err(map_diesel_error)
    }
}
