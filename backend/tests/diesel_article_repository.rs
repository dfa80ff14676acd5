//! `DieselArticleRepository` against embedded PostgreSQL.
//!
//! Covers the newest-first keyset query and the cascading delete that takes
//! an article's comments and likes with it.

#[path = "support/embedded_postgres.rs"]
mod embedded_postgres;

use embedded_postgres::{TestDatabase, at, test_database};
use pagination::Direction;
use rstest::{fixture, rstest};
use scribe::domain::ports::{
    ArticleListQuery, ArticleRepository, CommentListQuery, CommentRepository, LikeRepository,
};
use scribe::domain::{
    Article, ArticleChanges, ArticleDraft, ArticleId, CommentContent, Timeline, UserId,
};
use scribe::outbound::persistence::{
    DieselArticleRepository, DieselCommentRepository, DieselLikeRepository,
};

struct Context {
    db: TestDatabase,
    articles: DieselArticleRepository,
    author: UserId,
}

impl Context {
    fn publish(&self, title: &str, seconds: i64) -> Article {
        self.publish_as(self.author, title, seconds)
    }

    fn publish_as(&self, author: UserId, title: &str, seconds: i64) -> Article {
        let draft = ArticleDraft::parse(title, "Body text").expect("valid draft");
        self.db
            .block_on(self.articles.create(author, &draft, at(seconds)))
            .expect("article inserted")
    }

    fn list(&self, query: ArticleListQuery) -> Vec<String> {
        self.db
            .block_on(self.articles.list(query))
            .expect("list succeeds")
            .into_iter()
            .map(|article| article.title)
            .collect()
    }
}

#[fixture]
fn context() -> Option<Context> {
    let db = test_database()?;
    let author = db.user("ada@example.com").id;
    let articles = DieselArticleRepository::new(db.pool.clone());
    Some(Context {
        db,
        articles,
        author,
    })
}

#[rstest]
fn list_orders_newest_first_and_breaks_ties_by_id(context: Option<Context>) {
    let Some(ctx) = context else {
        eprintln!("SKIP-TEST-CLUSTER: list_orders_newest_first_and_breaks_ties_by_id skipped");
        return;
    };
    ctx.publish("oldest", 10);
    ctx.publish("tied-low", 20);
    let tied_high = ctx.publish("tied-high", 20);
    ctx.publish("newest", 30);

    let first_page = ctx.list(ArticleListQuery {
        author_id: None,
        after: None,
        limit: 2,
    });
    let rest = ctx.list(ArticleListQuery {
        author_id: None,
        after: Some(tied_high.timeline_key()),
        limit: 10,
    });

    assert_eq!(first_page, ["newest", "tied-high"]);
    assert_eq!(rest, ["tied-low", "oldest"]);
}

#[rstest]
fn author_filter_narrows_the_timeline(context: Option<Context>) {
    let Some(ctx) = context else {
        eprintln!("SKIP-TEST-CLUSTER: author_filter_narrows_the_timeline skipped");
        return;
    };
    let other = ctx.db.user("grace@example.com").id;
    ctx.publish("mine", 10);
    ctx.publish_as(other, "theirs", 20);

    let titles = ctx.list(ArticleListQuery {
        author_id: Some(other),
        after: None,
        limit: 10,
    });

    assert_eq!(titles, ["theirs"]);
}

#[rstest]
fn update_touches_only_provided_fields(context: Option<Context>) {
    let Some(ctx) = context else {
        eprintln!("SKIP-TEST-CLUSTER: update_touches_only_provided_fields skipped");
        return;
    };
    let article = ctx.publish("Draft title", 10);
    let changes = ArticleChanges::parse(Some("Final title"), None).expect("valid changes");

    let updated = ctx
        .db
        .block_on(ctx.articles.update(article.id, &changes, at(60)))
        .expect("update succeeds")
        .expect("article exists");

    assert_eq!(updated.title, "Final title");
    assert_eq!(updated.content, "Body text");
    assert_eq!(updated.created_at, at(10));
    assert_eq!(updated.updated_at, at(60));
}

#[rstest]
fn missing_articles_are_reported_without_errors(context: Option<Context>) {
    let Some(ctx) = context else {
        eprintln!("SKIP-TEST-CLUSTER: missing_articles_are_reported_without_errors skipped");
        return;
    };
    let missing = ArticleId::new(9_999).expect("valid id");
    let changes = ArticleChanges::parse(Some("Anything"), None).expect("valid changes");

    let found = ctx.db.block_on(ctx.articles.find_by_id(missing));
    let updated = ctx.db.block_on(ctx.articles.update(missing, &changes, at(1)));
    let deleted = ctx.db.block_on(ctx.articles.delete(missing));

    assert_eq!(found, Ok(None));
    assert_eq!(updated, Ok(None));
    assert_eq!(deleted, Ok(false));
}

#[rstest]
fn deleting_an_article_cascades_to_comments_and_likes(context: Option<Context>) {
    let Some(ctx) = context else {
        eprintln!("SKIP-TEST-CLUSTER: deleting_an_article_cascades_to_comments_and_likes skipped");
        return;
    };
    let comments = DieselCommentRepository::new(ctx.db.pool.clone());
    let likes = DieselLikeRepository::new(ctx.db.pool.clone());
    let reader = ctx.db.user("reader@example.com").id;
    let article = ctx.publish("Short lived", 10);
    let content = CommentContent::parse("First!").expect("valid content");
    let comment = ctx
        .db
        .block_on(comments.create(reader, article.id, &content, at(20)))
        .expect("comment inserted");
    ctx.db
        .block_on(likes.create(reader, article.id, at(30)))
        .expect("like inserted");

    let deleted = ctx.db.block_on(ctx.articles.delete(article.id));

    assert_eq!(deleted, Ok(true));
    assert_eq!(ctx.db.block_on(comments.find_by_id(comment.id)), Ok(None));
    assert_eq!(ctx.db.block_on(likes.exists(reader, article.id)), Ok(false));
    let remaining = ctx
        .db
        .block_on(comments.list(CommentListQuery {
            article_id: article.id,
            after: None,
            direction: Direction::Ascending,
            limit: 10,
        }))
        .expect("list succeeds");
    assert!(remaining.is_empty());
}
