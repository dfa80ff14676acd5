//! Tests for the article service.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use pagination::Direction;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{ArticlePersistenceError, MockArticleRepository, MockCommentRepository};
use crate::test_support::FixedClock;

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn author() -> UserId {
    UserId::new(1).expect("valid id")
}

fn article(id: i64, now: DateTime<Utc>) -> Article {
    Article {
        id: ArticleId::new(id).expect("valid id"),
        title: format!("Article {id}"),
        content: "Body".to_owned(),
        author_id: author(),
        created_at: now - Duration::minutes(id),
        updated_at: now - Duration::minutes(id),
    }
}

fn service(
    articles: MockArticleRepository,
    comments: MockCommentRepository,
    now: DateTime<Utc>,
) -> ArticleService<MockArticleRepository, MockCommentRepository> {
    ArticleService::new(
        Arc::new(articles),
        Arc::new(comments),
        Arc::new(FixedClock::new(now)),
    )
}

#[rstest]
#[tokio::test]
async fn list_overfetches_by_one_and_flags_next_page(now: DateTime<Utc>) {
    let mut articles = MockArticleRepository::new();
    articles
        .expect_list()
        .withf(|query| query.limit == 3 && query.author_id.is_none() && query.after.is_none())
        .times(1)
        .returning(move |_| Ok((1..=3).map(|id| article(id, now)).collect()));

    let request = PageRequest::parse(Some(2), None, Direction::Descending).expect("valid page");
    let page = service(articles, MockCommentRepository::new(), now)
        .list_articles(None, request)
        .await
        .expect("page loads");

    assert_eq!(page.items().len(), 2);
    assert!(page.has_next_page());
}

#[rstest]
#[tokio::test]
async fn create_stamps_clock_time(now: DateTime<Utc>) {
    let mut articles = MockArticleRepository::new();
    articles
        .expect_create()
        .withf(move |author_id, draft, at| {
            *author_id == author() && draft.title == "Hello" && *at == now
        })
        .times(1)
        .returning(move |_, _, _| Ok(article(1, now)));

    let draft = ArticleDraft::parse(" Hello ", "World").expect("valid draft");
    let created = service(articles, MockCommentRepository::new(), now)
        .create_article(author(), draft)
        .await
        .expect("article created");

    assert_eq!(created.author_id, author());
}

#[rstest]
#[tokio::test]
async fn update_by_non_owner_is_forbidden(now: DateTime<Utc>) {
    let mut articles = MockArticleRepository::new();
    articles
        .expect_find_by_id()
        .returning(move |_| Ok(Some(article(4, now))));
    articles.expect_update().times(0);

    let intruder = UserId::new(99).expect("valid id");
    let changes = ArticleChanges::parse(Some("New title"), None).expect("valid changes");
    let error = service(articles, MockCommentRepository::new(), now)
        .update_article(intruder, ArticleId::new(4).expect("valid id"), changes)
        .await
        .expect_err("not the owner");

    assert_eq!(error.code(), ErrorCode::Forbidden);
    assert_eq!(error.message(), "You can only update your own articles");
}

#[rstest]
#[tokio::test]
async fn update_of_missing_article_is_not_found(now: DateTime<Utc>) {
    let mut articles = MockArticleRepository::new();
    articles.expect_find_by_id().returning(|_| Ok(None));

    let changes = ArticleChanges::parse(None, Some("Body")).expect("valid changes");
    let error = service(articles, MockCommentRepository::new(), now)
        .update_article(author(), ArticleId::new(4).expect("valid id"), changes)
        .await
        .expect_err("missing article");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Article not found");
}

#[rstest]
#[tokio::test]
async fn delete_counts_comments_then_deletes(now: DateTime<Utc>) {
    let id = ArticleId::new(4).expect("valid id");
    let mut articles = MockArticleRepository::new();
    articles
        .expect_find_by_id()
        .returning(move |_| Ok(Some(article(4, now))));
    articles.expect_delete().times(1).returning(|_| Ok(true));
    let mut comments = MockCommentRepository::new();
    comments
        .expect_count_by_articles()
        .times(1)
        .returning(move |_| Ok(HashMap::from([(id, 3)])));

    let deleted = service(articles, comments, now)
        .delete_article(author(), id)
        .await
        .expect("article deleted");

    assert!(deleted);
}

#[rstest]
#[tokio::test]
async fn repository_outage_is_service_unavailable(now: DateTime<Utc>) {
    let mut articles = MockArticleRepository::new();
    articles
        .expect_find_by_id()
        .returning(|_| Err(ArticlePersistenceError::connection("pool timed out")));

    let error = service(articles, MockCommentRepository::new(), now)
        .find_article(ArticleId::new(1).expect("valid id"))
        .await
        .expect_err("outage");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
