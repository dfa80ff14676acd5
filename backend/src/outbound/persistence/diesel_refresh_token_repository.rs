//! PostgreSQL-backed refresh token store.
//!
//! Only argon2 hashes are persisted; rotation deletes the presented row and
//! inserts its replacement inside one transaction so a token can be redeemed
//! at most once.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::UserId;
use crate::domain::ports::{
    NewRefreshToken, RefreshTokenPersistenceError, RefreshTokenRepository, StoredRefreshToken,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewRefreshTokenRow, RefreshTokenRow};
use super::pool::{DbPool, PoolError};
use super::schema::refresh_tokens;

/// Diesel-backed implementation of the `RefreshTokenRepository` port.
#[derive(Clone)]
pub struct DieselRefreshTokenRepository {
    pool: DbPool,
}

impl DieselRefreshTokenRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RefreshTokenPersistenceError {
    map_basic_pool_error(error, RefreshTokenPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RefreshTokenPersistenceError {
    map_basic_diesel_error(
        error,
        RefreshTokenPersistenceError::query,
        RefreshTokenPersistenceError::connection,
    )
}

fn new_row(token: &NewRefreshToken) -> NewRefreshTokenRow<'_> {
    NewRefreshTokenRow {
        token: &token.token_hash,
        user_id: token.user_id.get(),
        created_at: token.created_at,
        expires_at: token.expires_at,
    }
}

fn row_to_stored(row: RefreshTokenRow) -> StoredRefreshToken {
    StoredRefreshToken {
        id: row.id,
        user_id: UserId::from_row(row.user_id),
        token_hash: row.token,
        expires_at: row.expires_at,
    }
}

#[async_trait]
impl RefreshTokenRepository for DieselRefreshTokenRepository {
    async fn store(&self, token: &NewRefreshToken) -> Result<(), RefreshTokenPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(refresh_tokens::table)
            .values(&new_row(token))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<StoredRefreshToken>, RefreshTokenPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        refresh_tokens::table
            .filter(refresh_tokens::user_id.eq(user_id.get()))
            .order((refresh_tokens::created_at.asc(), refresh_tokens::id.asc()))
            .select(RefreshTokenRow::as_select())
            .load(&mut conn)
            .await
            .map(|rows| rows.into_iter().map(row_to_stored).collect())
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: i32) -> Result<bool, RefreshTokenPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(refresh_tokens::table.find(id))
            .execute(&mut conn)
            .await
            .map(|deleted| deleted > 0)
            .map_err(map_diesel_error)
    }

    async fn rotate(
        &self,
        old_id: i32,
        replacement: &NewRefreshToken,
    ) -> Result<bool, RefreshTokenPersistenceError> {
        let row = new_row(replacement);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                let deleted = diesel::delete(refresh_tokens::table.find(old_id))
                    .execute(conn)
                    .await?;
                if deleted == 0 {
                    return Ok(false);
                }

                diesel::insert_into(refresh_tokens::table)
                    .values(&row)
                    .execute(conn)
                    .await?;
                Ok(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn purge_expired(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<usize, RefreshTokenPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(
            refresh_tokens::table
                .filter(refresh_tokens::user_id.eq(user_id.get()))
                .filter(refresh_tokens::expires_at.le(now)),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let error = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(
            error,
            RefreshTokenPersistenceError::Connection { .. }
        ));
    }

    #[rstest]
    fn rows_carry_hash_not_token() {
        let at = Utc
            .with_ymd_and_hms(2026, 2, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp");
        let stored = row_to_stored(RefreshTokenRow {
            id: 4,
            token: "$argon2id$hash".to_owned(),
            user_id: 9,
            expires_at: at,
        });

        assert_eq!(stored.id, 4);
        assert_eq!(stored.user_id.get(), 9);
        assert_eq!(stored.token_hash, "$argon2id$hash");
        assert_eq!(stored.expires_at, at);
    }
}
