//! PostgreSQL-backed `LikeRepository` implementation using Diesel ORM.
//!
//! The `(user_id, article_id)` unique index enforces one like per user and
//! article; a violation surfaces as `LikePersistenceError::AlreadyLiked`.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::{count_star, exists, select};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{LikePersistenceError, LikeRepository};
use crate::domain::{ArticleId, Like, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::diesel_helpers::{counts_by_article, raw_article_ids};
use super::models::{LikeRow, NewLikeRow};
use super::pool::{DbPool, PoolError};
use super::schema::likes;

/// Diesel-backed implementation of the `LikeRepository` port.
#[derive(Clone)]
pub struct DieselLikeRepository {
    pool: DbPool,
}

impl DieselLikeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> LikePersistenceError {
    map_basic_pool_error(error, LikePersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> LikePersistenceError {
    if is_unique_violation(&error) {
        return LikePersistenceError::already_liked();
    }
    map_basic_diesel_error(
        error,
        LikePersistenceError::query,
        LikePersistenceError::connection,
    )
}

fn pair_filter(
    user_id: UserId,
    article_id: ArticleId,
) -> diesel::dsl::Filter<
    diesel::dsl::Filter<likes::table, diesel::dsl::Eq<likes::user_id, i32>>,
    diesel::dsl::Eq<likes::article_id, i32>,
> {
    likes::table
        .filter(likes::user_id.eq(user_id.get()))
        .filter(likes::article_id.eq(article_id.get()))
}

#[async_trait]
impl LikeRepository for DieselLikeRepository {
    async fn create(
        &self,
        user_id: UserId,
        article_id: ArticleId,
        now: DateTime<Utc>,
    ) -> Result<Like, LikePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewLikeRow {
            user_id: user_id.get(),
            article_id: article_id.get(),
            created_at: now,
        };

        diesel::insert_into(likes::table)
            .values(&row)
            .returning(LikeRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(Like::from)
            .map_err(map_diesel_error)
    }

    async fn delete(
        &self,
        user_id: UserId,
        article_id: ArticleId,
    ) -> Result<bool, LikePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(pair_filter(user_id, article_id))
            .execute(&mut conn)
            .await
            .map(|deleted| deleted > 0)
            .map_err(map_diesel_error)
    }

    async fn exists(
        &self,
        user_id: UserId,
        article_id: ArticleId,
    ) -> Result<bool, LikePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        select(exists(pair_filter(user_id, article_id)))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn count_by_articles(
        &self,
        ids: &[ArticleId],
    ) -> Result<HashMap<ArticleId, i64>, LikePersistenceError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        likes::table
            .filter(likes::article_id.eq_any(raw_article_ids(ids)))
            .group_by(likes::article_id)
            .select((likes::article_id, count_star()))
            .load::<(i32, i64)>(&mut conn)
            .await
            .map(counts_by_article)
            .map_err(map_diesel_error)
    }
}
