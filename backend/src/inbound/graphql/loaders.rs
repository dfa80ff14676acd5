//! Batching loaders for relation and aggregate fields.
//!
//! Loaders are built without a cache, so sharing them across requests only
//! coalesces lookups issued in the same tick.

use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::dataloader::{DataLoader, Loader};

use crate::domain::ports::{ArticlesQuery, CommentsQuery, LikesQuery, UsersQuery};
use crate::domain::{Article, ArticleId, Error, User, UserId};

/// Users by id.
pub struct UserLoader(pub Arc<dyn UsersQuery>);

impl Loader<UserId> for UserLoader {
    type Value = User;
    type Error = Error;

    async fn load(&self, keys: &[UserId]) -> Result<HashMap<UserId, User>, Error> {
        let users = self.0.find_users(keys).await?;
        Ok(users.into_iter().map(|user| (user.id, user)).collect())
    }
}

/// Articles by id.
pub struct ArticleLoader(pub Arc<dyn ArticlesQuery>);

impl Loader<ArticleId> for ArticleLoader {
    type Value = Article;
    type Error = Error;

    async fn load(&self, keys: &[ArticleId]) -> Result<HashMap<ArticleId, Article>, Error> {
        let articles = self.0.find_articles(keys).await?;
        Ok(articles
            .into_iter()
            .map(|article| (article.id, article))
            .collect())
    }
}

/// Comment totals per article. Articles without comments are absent.
pub struct CommentCountLoader(pub Arc<dyn CommentsQuery>);

impl Loader<ArticleId> for CommentCountLoader {
    type Value = i64;
    type Error = Error;

    async fn load(&self, keys: &[ArticleId]) -> Result<HashMap<ArticleId, i64>, Error> {
        self.0.count_comments(keys).await
    }
}

/// Like totals per article. Articles without likes are absent.
pub struct LikeCountLoader(pub Arc<dyn LikesQuery>);

impl Loader<ArticleId> for LikeCountLoader {
    type Value = i64;
    type Error = Error;

    async fn load(&self, keys: &[ArticleId]) -> Result<HashMap<ArticleId, i64>, Error> {
        self.0.count_likes(keys).await
    }
}

/// Wrap a loader for registration as schema data.
pub(crate) fn batching<L>(loader: L) -> DataLoader<L>
where
    L: Send + Sync + 'static,
{
    DataLoader::new(loader, tokio::spawn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockCommentsQuery, MockUsersQuery};
    use crate::domain::{Email, UserName};
    use chrono::{TimeZone, Utc};

    fn user(id: i32) -> User {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).single().expect("timestamp");
        User {
            id: UserId::from_row(id),
            email: Email::new(format!("user{id}@example.com")).expect("email"),
            name: Some(UserName::new("Ada").expect("name")),
            created_at: at,
            updated_at: at,
        }
    }

    #[tokio::test]
    async fn concurrent_user_lookups_share_one_batch() {
        let mut users = MockUsersQuery::new();
        users
            .expect_find_users()
            .times(1)
            .returning(|ids| Ok(ids.iter().map(|id| user(id.get())).collect()));
        let loader = batching(UserLoader(Arc::new(users)));

        let (first, second) = tokio::join!(
            loader.load_one(UserId::from_row(1)),
            loader.load_one(UserId::from_row(2))
        );

        assert_eq!(first.expect("first").map(|u| u.id.get()), Some(1));
        assert_eq!(second.expect("second").map(|u| u.id.get()), Some(2));
    }

    #[tokio::test]
    async fn missing_counts_load_as_none() {
        let mut comments = MockCommentsQuery::new();
        comments
            .expect_count_comments()
            .returning(|_| Ok(HashMap::new()));
        let loader = batching(CommentCountLoader(Arc::new(comments)));

        let count = loader
            .load_one(ArticleId::from_row(9))
            .await
            .expect("count loads");

        assert_eq!(count, None);
    }

    #[tokio::test]
    async fn loader_errors_surface_to_callers() {
        let mut users = MockUsersQuery::new();
        users
            .expect_find_users()
            .returning(|_| Err(Error::service_unavailable("db down")));
        let loader = batching(UserLoader(Arc::new(users)));

        let err = loader
            .load_one(UserId::from_row(1))
            .await
            .expect_err("lookup fails");

        assert_eq!(err.message(), "db down");
    }
}
