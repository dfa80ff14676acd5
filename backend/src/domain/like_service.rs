//! Like use-cases.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::article_service::article_not_found;
use crate::domain::ports::{ArticleRepository, LikeRepository, LikesCommand, LikesQuery};
use crate::domain::{ArticleId, Error, Like, UserId};

/// Like service implementing the like driving ports.
#[derive(Clone)]
pub struct LikeService<L, A> {
    likes: Arc<L>,
    articles: Arc<A>,
    clock: Arc<dyn Clock>,
}

impl<L, A> LikeService<L, A> {
    /// Create a new service with the given repositories.
    pub fn new(likes: Arc<L>, articles: Arc<A>, clock: Arc<dyn Clock>) -> Self {
        Self {
            likes,
            articles,
            clock,
        }
    }
}


#[async_trait]
impl<L, A> LikesQuery for LikeService<L, A>
where
    L: LikeRepository,
    A: ArticleRepository,
{
    async fn has_liked(&self, user_id: UserId, article_id: ArticleId) -> Result<bool, Error> {
        self.likes
            .exists(user_id, article_id)
            .await
            .map_err(Error::from)
    }

    async fn count_likes(&self, ids: &[ArticleId]) -> Result<HashMap<ArticleId, i64>, Error> {
        self.likes
            .count_by_articles(ids)
            .await
            .map_err(Error::from)
    }
}

#[async_trait]
impl<L, A> LikesCommand for LikeService<L, A>
where
    L: LikeRepository,
    A: ArticleRepository,
{
    async fn like_article(&self, actor: UserId, article_id: ArticleId) -> Result<Like, Error> {
        self.articles
            .find_by_id(article_id)
            .await
            .map_err(Error::from)?
            .ok_or_else(article_not_found)?;
        let like = self
            .likes
            .create(actor, article_id, self.clock.utc())
            .await
            .map_err(Error::from)?;
        info!(%article_id, user_id = %actor, "article liked");
        Ok(like)
    }

    async fn unlike_article(&self, actor: UserId, article_id: ArticleId) -> Result<bool, Error> {
        if !self
            .likes
            .delete(actor, article_id)
            .await
            .map_err(Error::from)?
        {
            return Err(Error::not_found("You have not liked this article"));
        }
        info!(%article_id, user_id = %actor, "article unliked");
        Ok(true)
    }
}
