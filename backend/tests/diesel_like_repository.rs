//! `DieselLikeRepository` against embedded PostgreSQL.
//!
//! The `likes_user_article_key` constraint is what rejects a second like.

#[path = "support/embedded_postgres.rs"]
mod embedded_postgres;

use embedded_postgres::{TestDatabase, at, test_database};
use rstest::{fixture, rstest};
use scribe::domain::ports::{ArticleRepository, LikePersistenceError, LikeRepository};
use scribe::domain::{ArticleDraft, ArticleId, UserId};
use scribe::outbound::persistence::{DieselArticleRepository, DieselLikeRepository};

struct Context {
    db: TestDatabase,
    likes: DieselLikeRepository,
    reader: UserId,
    article: ArticleId,
}

#[fixture]
fn context() -> Option<Context> {
    let db = test_database()?;
    let author = db.user("ada@example.com").id;
    let reader = db.user("reader@example.com").id;
    let draft = ArticleDraft::parse("Likeable", "Body text").expect("valid draft");
    let article = db
        .block_on(DieselArticleRepository::new(db.pool.clone()).create(author, &draft, at(0)))
        .expect("article inserted")
        .id;
    let likes = DieselLikeRepository::new(db.pool.clone());
    Some(Context {
        db,
        likes,
        reader,
        article,
    })
}

#[rstest]
fn a_second_like_is_already_liked(context: Option<Context>) {
    let Some(ctx) = context else {
        eprintln!("SKIP-TEST-CLUSTER: a_second_like_is_already_liked skipped");
        return;
    };

    let first = ctx
        .db
        .block_on(ctx.likes.create(ctx.reader, ctx.article, at(10)))
        .expect("first like stored");
    let second = ctx.db.block_on(ctx.likes.create(ctx.reader, ctx.article, at(20)));

    assert_eq!(first.user_id, ctx.reader);
    assert_eq!(first.created_at, at(10));
    assert_eq!(second, Err(LikePersistenceError::AlreadyLiked));
}

#[rstest]
fn unliking_removes_the_pair_once(context: Option<Context>) {
    let Some(ctx) = context else {
        eprintln!("SKIP-TEST-CLUSTER: unliking_removes_the_pair_once skipped");
        return;
    };
    ctx.db
        .block_on(ctx.likes.create(ctx.reader, ctx.article, at(10)))
        .expect("like stored");

    let before = ctx.db.block_on(ctx.likes.exists(ctx.reader, ctx.article));
    let removed = ctx.db.block_on(ctx.likes.delete(ctx.reader, ctx.article));
    let again = ctx.db.block_on(ctx.likes.delete(ctx.reader, ctx.article));
    let after = ctx.db.block_on(ctx.likes.exists(ctx.reader, ctx.article));

    assert_eq!((before, removed, again, after), (Ok(true), Ok(true), Ok(false), Ok(false)));
}

#[rstest]
fn counts_group_likes_per_article(context: Option<Context>) {
    let Some(ctx) = context else {
        eprintln!("SKIP-TEST-CLUSTER: counts_group_likes_per_article skipped");
        return;
    };
    let fan = ctx.db.user("fan@example.com").id;
    for user in [ctx.reader, fan] {
        ctx.db
            .block_on(ctx.likes.create(user, ctx.article, at(10)))
            .expect("like stored");
    }

    let counts = ctx
        .db
        .block_on(ctx.likes.count_by_articles(&[ctx.article]))
        .expect("count succeeds");

    assert_eq!(counts.get(&ctx.article), Some(&2));
}
