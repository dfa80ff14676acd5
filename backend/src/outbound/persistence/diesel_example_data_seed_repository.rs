//! PostgreSQL-backed example data seeding adapter.
//!
//! Applies a generated dataset within a single transaction. The seed run is
//! recorded first; if the seed key already exists nothing else is written.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{
    ExampleDataSeedRepository, ExampleDataSeedRepositoryError, ExampleDataSeedRequest,
    SeedingResult,
};

use super::models::{
    NewArticleRow, NewCommentRow, NewExampleDataRunRow, NewLikeRow, NewUserRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{articles, comments, example_data_runs, likes, users};

/// Diesel-backed implementation of the example data seeding repository.
#[derive(Clone)]
pub struct DieselExampleDataSeedRepository {
    pool: DbPool,
}

impl DieselExampleDataSeedRepository {
    /// Create a new seeding repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use scribe::outbound::persistence::{
    ///     DbPool, DieselExampleDataSeedRepository, PoolConfig,
    /// };
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost")).await?;
    /// let repository = DieselExampleDataSeedRepository::new(pool);
    /// # let _ = repository;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ExampleDataSeedRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ExampleDataSeedRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain persistence errors.
///
/// Seeding is operator-facing so database messages are kept verbatim.
fn map_diesel_error(error: diesel::result::Error) -> ExampleDataSeedRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    let error_message = error.to_string();
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                error = %error_message,
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            error = %error_message,
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => ExampleDataSeedRepositoryError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            ExampleDataSeedRepositoryError::connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => {
            ExampleDataSeedRepositoryError::query(info.message().to_owned())
        }
        _ => ExampleDataSeedRepositoryError::query(error_message),
    }
}

fn count_to_i32(count: usize, label: &str) -> Result<i32, ExampleDataSeedRepositoryError> {
    i32::try_from(count)
        .map_err(|_| ExampleDataSeedRepositoryError::query(format!("{label} count overflow")))
}

/// Reject requests whose rows point outside the user or article lists.
fn check_references(request: &ExampleDataSeedRequest) -> Result<(), ExampleDataSeedRepositoryError> {
    let users = request.users.len();
    let articles = request.articles.len();
    let bad = |what: &str| {
        Err(ExampleDataSeedRepositoryError::query(format!(
            "{what} references a row outside the dataset"
        )))
    };

    if request.articles.iter().any(|article| article.author >= users) {
        return bad("article");
    }
    if request
        .comments
        .iter()
        .any(|comment| comment.author >= users || comment.article >= articles)
    {
        return bad("comment");
    }
    if request
        .likes
        .iter()
        .any(|like| like.user >= users || like.article >= articles)
    {
        return bad("like");
    }
    Ok(())
}

/// Upsert the seed users and return their ids in request order.
async fn insert_users(
    conn: &mut AsyncPgConnection,
    request: &ExampleDataSeedRequest,
) -> Result<Vec<i32>, diesel::result::Error> {
    if request.users.is_empty() {
        return Ok(Vec::new());
    }
    let rows: Vec<NewUserRow<'_>> = request
        .users
        .iter()
        .map(|user| NewUserRow {
            email: user.email.as_ref(),
            name: Some(user.name.as_ref()),
            password: &user.password_hash,
            created_at: user.created_at,
            updated_at: user.created_at,
        })
        .collect();

    let returned: Vec<(i32, String)> = diesel::insert_into(users::table)
        .values(&rows)
        .on_conflict(users::email)
        .do_update()
        .set(users::name.eq(excluded(users::name)))
        .returning((users::id, users::email))
        .get_results(conn)
        .await?;
    let by_email: HashMap<String, i32> = returned
        .into_iter()
        .map(|(id, email)| (email, id))
        .collect();

    request
        .users
        .iter()
        .map(|user| {
            by_email
                .get(user.email.as_ref())
                .copied()
                .ok_or(diesel::result::Error::NotFound)
        })
        .collect()
}

/// Insert articles one by one so generated ids line up with request order.
async fn insert_articles(
    conn: &mut AsyncPgConnection,
    request: &ExampleDataSeedRequest,
    user_ids: &[i32],
) -> Result<Vec<i32>, diesel::result::Error> {
    let mut ids = Vec::with_capacity(request.articles.len());
    for article in &request.articles {
        let row = NewArticleRow {
            title: &article.title,
            content: &article.content,
            author_id: user_ids[article.author],
            created_at: article.created_at,
            updated_at: article.created_at,
        };
        let id = diesel::insert_into(articles::table)
            .values(&row)
            .returning(articles::id)
            .get_result(conn)
            .await?;
        ids.push(id);
    }
    Ok(ids)
}

async fn insert_comments_and_likes(
    conn: &mut AsyncPgConnection,
    request: &ExampleDataSeedRequest,
    user_ids: &[i32],
    article_ids: &[i32],
) -> Result<(), diesel::result::Error> {
    let comment_rows: Vec<NewCommentRow<'_>> = request
        .comments
        .iter()
        .map(|comment| NewCommentRow {
            content: &comment.content,
            author_id: user_ids[comment.author],
            article_id: article_ids[comment.article],
            created_at: comment.created_at,
            updated_at: comment.created_at,
        })
        .collect();
    if !comment_rows.is_empty() {
        diesel::insert_into(comments::table)
            .values(&comment_rows)
            .execute(conn)
            .await?;
    }

    let like_rows: Vec<NewLikeRow> = request
        .likes
        .iter()
        .map(|like| NewLikeRow {
            user_id: user_ids[like.user],
            article_id: article_ids[like.article],
            created_at: like.created_at,
        })
        .collect();
    if !like_rows.is_empty() {
        diesel::insert_into(likes::table)
            .values(&like_rows)
            .on_conflict((likes::user_id, likes::article_id))
            .do_nothing()
            .execute(conn)
            .await?;
    }
    Ok(())
}

#[async_trait]
impl ExampleDataSeedRepository for DieselExampleDataSeedRepository {
    async fn seed_example_data(
        &self,
        request: ExampleDataSeedRequest,
    ) -> Result<SeedingResult, ExampleDataSeedRepositoryError> {
        check_references(&request)?;
        let user_count = count_to_i32(request.users.len(), "user")?;
        let article_count = count_to_i32(request.articles.len(), "article")?;
        let comment_count = count_to_i32(request.comments.len(), "comment")?;
        let like_count = count_to_i32(request.likes.len(), "like")?;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result = conn
            .transaction(|conn| {
                async move {
                    let new_run = NewExampleDataRunRow {
                        seed_key: request.seed_key.as_str(),
                        seed: request.seed,
                        user_count,
                        article_count,
                        comment_count,
                        like_count,
                    };

                    let rows_affected = diesel::insert_into(example_data_runs::table)
                        .values(&new_run)
                        .on_conflict(example_data_runs::seed_key)
                        .do_nothing()
                        .execute(conn)
                        .await?;

                    if rows_affected == 0 {
                        return Ok(SeedingResult::AlreadySeeded);
                    }

                    let user_ids = insert_users(conn, &request).await?;
                    let article_ids = insert_articles(conn, &request, &user_ids).await?;
                    insert_comments_and_likes(conn, &request, &user_ids, &article_ids).await?;

                    Ok(SeedingResult::Applied)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for seed repository error mapping and validation.
    use super::*;
    use crate::domain::ports::{ExampleDataSeedArticle, ExampleDataSeedLike};
    use chrono::Utc;
    use rstest::rstest;

    fn request() -> ExampleDataSeedRequest {
        ExampleDataSeedRequest {
            seed_key: "quiet-heron".to_owned(),
            seed: 7,
            users: Vec::new(),
            articles: Vec::new(),
            comments: Vec::new(),
            likes: Vec::new(),
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let persistence_err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(
            persistence_err,
            ExampleDataSeedRepositoryError::Connection { .. }
        ));
        assert!(persistence_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let persistence_err = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(
            persistence_err,
            ExampleDataSeedRepositoryError::Query { .. }
        ));
        assert!(persistence_err.to_string().contains("record not found"));
    }

    #[rstest]
    fn empty_request_passes_reference_check() {
        assert!(check_references(&request()).is_ok());
    }

    #[rstest]
    fn article_with_unknown_author_is_rejected() {
        let mut request = request();
        request.articles.push(ExampleDataSeedArticle {
            author: 0,
            title: "Orphan".to_owned(),
            content: "No users exist".to_owned(),
            created_at: Utc::now(),
        });

        let error = check_references(&request).expect_err("dangling author");

        assert!(error.to_string().contains("article references"));
    }

    #[rstest]
    fn like_with_unknown_article_is_rejected() {
        let mut request = request();
        request.likes.push(ExampleDataSeedLike {
            user: 0,
            article: 3,
            created_at: Utc::now(),
        });

        let error = check_references(&request).expect_err("dangling like");

        assert!(error.to_string().contains("like references"));
    }
}
