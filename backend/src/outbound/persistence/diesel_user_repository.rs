//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NewUser, UserCredentials, UserPersistenceError, UserRepository};
use crate::domain::{Email, User, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

/// Map insert failures, translating the unique email index.
fn map_insert_error(error: diesel::result::Error, email: &Email) -> UserPersistenceError {
    if is_unique_violation(&error) {
        return UserPersistenceError::duplicate_email(email.as_ref());
    }
    map_diesel_error(error)
}

fn raw_ids(ids: &[UserId]) -> Vec<i32> {
    ids.iter().map(|id| id.get()).collect()
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            email: user.email.as_ref(),
            name: user.name.as_ref().map(AsRef::as_ref),
            password: &user.password_hash,
            created_at: user.created_at,
            updated_at: user.created_at,
        };

        diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(User::from)
            .map_err(|err| map_insert_error(err, &user.email))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(User::from))
            .map_err(map_diesel_error)
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        users::table
            .filter(users::id.eq_any(raw_ids(ids)))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map(|rows| rows.into_iter().map(User::from).collect())
            .map_err(map_diesel_error)
    }

    async fn find_credentials(
        &self,
        email: &Email,
    ) -> Result<Option<UserCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(|row| {
            let (user, password_hash) = row.into_parts();
            UserCredentials {
                user,
                password_hash,
            }
        }))
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        users::table
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map(|rows| rows.into_iter().map(User::from).collect())
            .map_err(map_diesel_error)
    }
}
