//! In-memory implementation of every repository port.
//!
//! One [`MemoryStore`] holds all tables so relational behaviour (cascading
//! article deletes, the per-user like constraint, unique emails) matches the
//! PostgreSQL schema.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::Direction;

use crate::domain::ports::{
    ArticleListQuery, ArticlePersistenceError, ArticleRepository, CommentListQuery,
    CommentPersistenceError, CommentRepository, LikePersistenceError, LikeRepository,
    NewRefreshToken, NewUser, RefreshTokenPersistenceError, RefreshTokenRepository,
    StoredRefreshToken, UserCredentials, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Article, ArticleChanges, ArticleDraft, ArticleId, Comment, CommentContent, CommentId, Email,
    Like, LikeId, Timeline, TimelineKey, User, UserId,
};

#[derive(Default)]
struct Tables {
    users: Vec<UserCredentials>,
    articles: Vec<Article>,
    comments: Vec<Comment>,
    likes: Vec<Like>,
    refresh_tokens: Vec<StoredRefreshToken>,
    last_id: i32,
    unavailable: bool,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }
}

/// Shared in-memory tables.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

const OUTAGE: &str = "memory store offline";

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a connection error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    /// Number of stored refresh token hashes for `user_id`.
    pub fn refresh_token_count(&self, user_id: UserId) -> usize {
        self.lock()
            .refresh_tokens
            .iter()
            .filter(|token| token.user_id == user_id)
            .count()
    }

    /// Insert an article with an explicit creation time.
    pub fn insert_article_at(
        &self,
        author_id: UserId,
        title: &str,
        created_at: DateTime<Utc>,
    ) -> Article {
        let mut tables = self.lock();
        let article = Article {
            id: ArticleId::from_row(tables.next_id()),
            title: title.to_owned(),
            content: format!("{title} body"),
            author_id,
            created_at,
            updated_at: created_at,
        };
        tables.articles.push(article.clone());
        article
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        match self.tables.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("memory store mutex"),
        }
    }

    fn online<E>(&self, outage: impl FnOnce(&'static str) -> E) -> Result<MutexGuard<'_, Tables>, E> {
        let tables = self.lock();
        if tables.unavailable {
            return Err(outage(OUTAGE));
        }
        Ok(tables)
    }
}

/// Sort rows on the timeline and apply the keyset window.
fn window<T: Timeline + Clone>(
    rows: impl Iterator<Item = T>,
    after: Option<TimelineKey>,
    direction: Direction,
    limit: usize,
) -> Vec<T> {
    let mut rows: Vec<T> = rows
        .filter(|row| after.is_none_or(|key| key.precedes(&row.timeline_key(), direction)))
        .collect();
    rows.sort_by_key(|row| {
        let key = row.timeline_key();
        (key.created_at, key.id)
    });
    if direction == Direction::Descending {
        rows.reverse();
    }
    rows.truncate(limit);
    rows
}

fn count_for<'a>(
    ids: &[ArticleId],
    article_ids: impl Iterator<Item = &'a ArticleId>,
) -> HashMap<ArticleId, i64> {
    let mut counts = HashMap::new();
    for id in article_ids.filter(|id| ids.contains(id)) {
        *counts.entry(*id).or_insert(0) += 1;
    }
    counts
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut tables = self.online(UserPersistenceError::connection)?;
        if tables
            .users
            .iter()
            .any(|existing| existing.user.email == user.email)
        {
            return Err(UserPersistenceError::duplicate_email(user.email.as_ref()));
        }
        let created = User {
            id: UserId::from_row(tables.next_id()),
            email: user.email.clone(),
            name: user.name.clone(),
            created_at: user.created_at,
            updated_at: user.created_at,
        };
        tables.users.push(UserCredentials {
            user: created.clone(),
            password_hash: user.password_hash.clone(),
        });
        Ok(created)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.online(UserPersistenceError::connection)?;
        Ok(tables
            .users
            .iter()
            .find(|row| row.user.id == id)
            .map(|row| row.user.clone()))
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        let tables = self.online(UserPersistenceError::connection)?;
        Ok(tables
            .users
            .iter()
            .filter(|row| ids.contains(&row.user.id))
            .map(|row| row.user.clone())
            .collect())
    }

    async fn find_credentials(
        &self,
        email: &Email,
    ) -> Result<Option<UserCredentials>, UserPersistenceError> {
        let tables = self.online(UserPersistenceError::connection)?;
        Ok(tables
            .users
            .iter()
            .find(|row| &row.user.email == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let tables = self.online(UserPersistenceError::connection)?;
        Ok(tables.users.iter().map(|row| row.user.clone()).collect())
    }
}

#[async_trait]
impl RefreshTokenRepository for MemoryStore {
    async fn store(&self, token: &NewRefreshToken) -> Result<(), RefreshTokenPersistenceError> {
        let mut tables = self.online(RefreshTokenPersistenceError::connection)?;
        let id = tables.next_id();
        tables.refresh_tokens.push(StoredRefreshToken {
            id,
            user_id: token.user_id,
            token_hash: token.token_hash.clone(),
            expires_at: token.expires_at,
        });
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<StoredRefreshToken>, RefreshTokenPersistenceError> {
        let tables = self.online(RefreshTokenPersistenceError::connection)?;
        Ok(tables
            .refresh_tokens
            .iter()
            .filter(|token| token.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: i32) -> Result<bool, RefreshTokenPersistenceError> {
        let mut tables = self.online(RefreshTokenPersistenceError::connection)?;
        let before = tables.refresh_tokens.len();
        tables.refresh_tokens.retain(|token| token.id != id);
        Ok(tables.refresh_tokens.len() < before)
    }

    async fn rotate(
        &self,
        old_id: i32,
        replacement: &NewRefreshToken,
    ) -> Result<bool, RefreshTokenPersistenceError> {
        let mut tables = self.online(RefreshTokenPersistenceError::connection)?;
        let before = tables.refresh_tokens.len();
        tables.refresh_tokens.retain(|token| token.id != old_id);
        if tables.refresh_tokens.len() == before {
            return Ok(false);
        }
        let id = tables.next_id();
        tables.refresh_tokens.push(StoredRefreshToken {
            id,
            user_id: replacement.user_id,
            token_hash: replacement.token_hash.clone(),
            expires_at: replacement.expires_at,
        });
        Ok(true)
    }

    async fn purge_expired(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<usize, RefreshTokenPersistenceError> {
        let mut tables = self.online(RefreshTokenPersistenceError::connection)?;
        let before = tables.refresh_tokens.len();
        tables
            .refresh_tokens
            .retain(|token| token.user_id != user_id || token.expires_at > now);
        Ok(before - tables.refresh_tokens.len())
    }
}

#[async_trait]
impl ArticleRepository for MemoryStore {
    async fn create(
        &self,
        author_id: UserId,
        draft: &ArticleDraft,
        now: DateTime<Utc>,
    ) -> Result<Article, ArticlePersistenceError> {
        let mut tables = self.online(ArticlePersistenceError::connection)?;
        let article = Article {
            id: ArticleId::from_row(tables.next_id()),
            title: draft.title.clone(),
            content: draft.content.clone(),
            author_id,
            created_at: now,
            updated_at: now,
        };
        tables.articles.push(article.clone());
        Ok(article)
    }

    async fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>, ArticlePersistenceError> {
        let tables = self.online(ArticlePersistenceError::connection)?;
        Ok(tables.articles.iter().find(|article| article.id == id).cloned())
    }

    async fn find_by_ids(
        &self,
        ids: &[ArticleId],
    ) -> Result<Vec<Article>, ArticlePersistenceError> {
        let tables = self.online(ArticlePersistenceError::connection)?;
        Ok(tables
            .articles
            .iter()
            .filter(|article| ids.contains(&article.id))
            .cloned()
            .collect())
    }

    async fn list(&self, query: ArticleListQuery) -> Result<Vec<Article>, ArticlePersistenceError> {
        let tables = self.online(ArticlePersistenceError::connection)?;
        let rows = tables
            .articles
            .iter()
            .filter(|article| query.author_id.is_none_or(|author| article.author_id == author))
            .cloned();
        Ok(window(rows, query.after, Direction::Descending, query.limit))
    }

    async fn update(
        &self,
        id: ArticleId,
        changes: &ArticleChanges,
        now: DateTime<Utc>,
    ) -> Result<Option<Article>, ArticlePersistenceError> {
        let mut tables = self.online(ArticlePersistenceError::connection)?;
        let Some(article) = tables.articles.iter_mut().find(|article| article.id == id) else {
            return Ok(None);
        };
        if let Some(title) = &changes.title {
            article.title.clone_from(title);
        }
        if let Some(content) = &changes.content {
            article.content.clone_from(content);
        }
        article.updated_at = now;
        Ok(Some(article.clone()))
    }

    async fn delete(&self, id: ArticleId) -> Result<bool, ArticlePersistenceError> {
        let mut tables = self.online(ArticlePersistenceError::connection)?;
        let before = tables.articles.len();
        tables.articles.retain(|article| article.id != id);
        if tables.articles.len() == before {
            return Ok(false);
        }
        tables.comments.retain(|comment| comment.article_id != id);
        tables.likes.retain(|like| like.article_id != id);
        Ok(true)
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn create(
        &self,
        author_id: UserId,
        article_id: ArticleId,
        content: &CommentContent,
        now: DateTime<Utc>,
    ) -> Result<Comment, CommentPersistenceError> {
        let mut tables = self.online(CommentPersistenceError::connection)?;
        let comment = Comment {
            id: CommentId::from_row(tables.next_id()),
            content: content.as_ref().to_owned(),
            author_id,
            article_id,
            created_at: now,
            updated_at: now,
        };
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, CommentPersistenceError> {
        let tables = self.online(CommentPersistenceError::connection)?;
        Ok(tables.comments.iter().find(|comment| comment.id == id).cloned())
    }

    async fn list(&self, query: CommentListQuery) -> Result<Vec<Comment>, CommentPersistenceError> {
        let tables = self.online(CommentPersistenceError::connection)?;
        let rows = tables
            .comments
            .iter()
            .filter(|comment| comment.article_id == query.article_id)
            .cloned();
        Ok(window(rows, query.after, query.direction, query.limit))
    }

    async fn update(
        &self,
        id: CommentId,
        content: &CommentContent,
        now: DateTime<Utc>,
    ) -> Result<Option<Comment>, CommentPersistenceError> {
        let mut tables = self.online(CommentPersistenceError::connection)?;
        let Some(comment) = tables.comments.iter_mut().find(|comment| comment.id == id) else {
            return Ok(None);
        };
        comment.content = content.as_ref().to_owned();
        comment.updated_at = now;
        Ok(Some(comment.clone()))
    }

    async fn delete(&self, id: CommentId) -> Result<bool, CommentPersistenceError> {
        let mut tables = self.online(CommentPersistenceError::connection)?;
        let before = tables.comments.len();
        tables.comments.retain(|comment| comment.id != id);
        Ok(tables.comments.len() < before)
    }

    async fn count_by_articles(
        &self,
        ids: &[ArticleId],
    ) -> Result<HashMap<ArticleId, i64>, CommentPersistenceError> {
        let tables = self.online(CommentPersistenceError::connection)?;
        Ok(count_for(
            ids,
            tables.comments.iter().map(|comment| &comment.article_id),
        ))
    }
}

#[async_trait]
impl LikeRepository for MemoryStore {
    async fn create(
        &self,
        user_id: UserId,
        article_id: ArticleId,
        now: DateTime<Utc>,
    ) -> Result<Like, LikePersistenceError> {
        let mut tables = self.online(LikePersistenceError::connection)?;
        if tables
            .likes
            .iter()
            .any(|like| like.user_id == user_id && like.article_id == article_id)
        {
            return Err(LikePersistenceError::already_liked());
        }
        let like = Like {
            id: LikeId::from_row(tables.next_id()),
            user_id,
            article_id,
            created_at: now,
        };
        tables.likes.push(like.clone());
        Ok(like)
    }

    async fn delete(
        &self,
        user_id: UserId,
        article_id: ArticleId,
    ) -> Result<bool, LikePersistenceError> {
        let mut tables = self.online(LikePersistenceError::connection)?;
        let before = tables.likes.len();
        tables
            .likes
            .retain(|like| like.user_id != user_id || like.article_id != article_id);
        Ok(tables.likes.len() < before)
    }

    async fn exists(
        &self,
        user_id: UserId,
        article_id: ArticleId,
    ) -> Result<bool, LikePersistenceError> {
        let tables = self.online(LikePersistenceError::connection)?;
        Ok(tables
            .likes
            .iter()
            .any(|like| like.user_id == user_id && like.article_id == article_id))
    }

    async fn count_by_articles(
        &self,
        ids: &[ArticleId],
    ) -> Result<HashMap<ArticleId, i64>, LikePersistenceError> {
        let tables = self.online(LikePersistenceError::connection)?;
        Ok(count_for(ids, tables.likes.iter().map(|like| &like.article_id)))
    }
}
