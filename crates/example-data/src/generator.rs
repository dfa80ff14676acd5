//! Deterministic dataset generation from seed definitions.
//!
//! The same seed definition always yields an identical dataset: every random
//! choice is drawn from one ChaCha8 stream seeded with the definition's seed,
//! in a fixed order (users, articles, comments, likes).

use std::collections::HashSet;

use fake::Fake;
use fake::faker::lorem::raw::{Paragraph, Paragraphs, Sentence};
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::GenerationError;
use crate::registry::SeedDefinition;
use crate::seed::{
    ExampleArticleSeed, ExampleCommentSeed, ExampleDataset, ExampleLikeSeed, ExampleUserSeed,
};
use crate::validation::{NAME_MAX, email_local_part, is_valid_name};

/// Maximum number of attempts to generate a valid author name.
const MAX_NAME_ATTEMPTS: usize = 100;

/// Oldest generated article, in minutes (ninety days).
const MAX_ARTICLE_AGE_MINUTES: u32 = 60 * 24 * 90;

/// Longest comment the backend accepts.
const COMMENT_MAX_CHARS: usize = 1000;

/// Random draws per requested like before falling back to a grid sweep.
const LIKE_ATTEMPTS_PER_LIKE: usize = 8;

/// Generates a complete dataset from a seed definition.
///
/// # Errors
///
/// Returns [`GenerationError`] when content is requested without users or
/// articles to attach it to, or when name generation keeps failing.
///
/// # Example
///
/// ```
/// use example_data::{SeedDefinition, generate_dataset};
///
/// let def = SeedDefinition::new("demo", 42).with_counts(4, 6, 10, 12);
/// let first = generate_dataset(&def).expect("generated");
/// let second = generate_dataset(&def).expect("generated");
///
/// assert_eq!(first, second);
/// assert_eq!(first.comments.len(), 10);
/// ```
pub fn generate_dataset(seed_def: &SeedDefinition) -> Result<ExampleDataset, GenerationError> {
    let user_count = seed_def.user_count();
    let article_count = seed_def.article_count();
    let wants_article_links = seed_def.comment_count() > 0 || seed_def.like_count() > 0;

    if user_count == 0 && (article_count > 0 || wants_article_links) {
        return Err(GenerationError::NoAuthors {
            seed: seed_def.name().to_owned(),
        });
    }
    if article_count == 0 && wants_article_links {
        return Err(GenerationError::NoArticles {
            seed: seed_def.name().to_owned(),
        });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed_def.seed());

    let users = (0..user_count)
        .map(|index| generate_user(&mut rng, index))
        .collect::<Result<Vec<_>, _>>()?;
    let articles: Vec<ExampleArticleSeed> = (0..article_count)
        .map(|_| generate_article(&mut rng, user_count))
        .collect();
    let comments = (0..seed_def.comment_count())
        .map(|_| generate_comment(&mut rng, user_count, &articles))
        .collect();
    let likes = generate_likes(&mut rng, user_count, article_count, seed_def.like_count());

    Ok(ExampleDataset {
        users,
        articles,
        comments,
        likes,
    })
}

fn generate_user(rng: &mut ChaCha8Rng, index: usize) -> Result<ExampleUserSeed, GenerationError> {
    let name = generate_name(rng)?;
    // The index suffix keeps emails unique even when names repeat.
    let email = format!("{}.{index}@example.com", email_local_part(&name));
    Ok(ExampleUserSeed { email, name })
}

fn generate_name(rng: &mut ChaCha8Rng) -> Result<String, GenerationError> {
    for _ in 0..MAX_NAME_ATTEMPTS {
        let first: String = FirstName(EN).fake_with_rng(rng);
        let last: String = LastName(EN).fake_with_rng(rng);
        let candidate: String = format!("{first} {last}").chars().take(NAME_MAX).collect();
        if is_valid_name(&candidate) {
            return Ok(candidate.trim().to_owned());
        }
    }

    Err(GenerationError::NameGenerationFailed {
        max_attempts: MAX_NAME_ATTEMPTS,
    })
}

fn generate_article(rng: &mut ChaCha8Rng, user_count: usize) -> ExampleArticleSeed {
    let author_index = rng.random_range(0..user_count);
    let sentence: String = Sentence(EN, 3..9).fake_with_rng(rng);
    let title = sentence.trim_end_matches('.').to_owned();
    let paragraphs: Vec<String> = Paragraphs(EN, 5..11).fake_with_rng(rng);
    let minutes_ago = rng.random_range(0..=MAX_ARTICLE_AGE_MINUTES);

    ExampleArticleSeed {
        author_index,
        title,
        content: paragraphs.join("\n\n"),
        minutes_ago,
    }
}

fn generate_comment(
    rng: &mut ChaCha8Rng,
    user_count: usize,
    articles: &[ExampleArticleSeed],
) -> ExampleCommentSeed {
    let author_index = rng.random_range(0..user_count);
    let article_index = rng.random_range(0..articles.len());
    let paragraph: String = Paragraph(EN, 1..4).fake_with_rng(rng);
    let content = paragraph.chars().take(COMMENT_MAX_CHARS).collect();
    // Comments never predate the article they respond to.
    let article_age = articles
        .get(article_index)
        .map_or(0, |article| article.minutes_ago);
    let minutes_ago = rng.random_range(0..=article_age);

    ExampleCommentSeed {
        author_index,
        article_index,
        content,
        minutes_ago,
    }
}

fn generate_likes(
    rng: &mut ChaCha8Rng,
    user_count: usize,
    article_count: usize,
    requested: usize,
) -> Vec<ExampleLikeSeed> {
    let target = requested.min(user_count.saturating_mul(article_count));
    let mut seen = HashSet::with_capacity(target);
    let mut likes = Vec::with_capacity(target);

    let max_attempts = target.saturating_mul(LIKE_ATTEMPTS_PER_LIKE);
    for _ in 0..max_attempts {
        if likes.len() == target {
            return likes;
        }
        let like = ExampleLikeSeed {
            user_index: rng.random_range(0..user_count),
            article_index: rng.random_range(0..article_count),
        };
        if seen.insert(like) {
            likes.push(like);
        }
    }

    // Dense grids: fill the remainder deterministically.
    for user_index in 0..user_count {
        for article_index in 0..article_count {
            if likes.len() == target {
                return likes;
            }
            let like = ExampleLikeSeed {
                user_index,
                article_index,
            };
            if seen.insert(like) {
                likes.push(like);
            }
        }
    }
    likes
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::validation::is_valid_email;

    #[fixture]
    fn blog_seed() -> SeedDefinition {
        SeedDefinition::new("quiet-heron", 2026).with_counts(20, 50, 120, 200)
    }

    #[rstest]
    fn generates_requested_counts(blog_seed: SeedDefinition) {
        let dataset = generate_dataset(&blog_seed).expect("generation succeeds");

        assert_eq!(dataset.users.len(), 20);
        assert_eq!(dataset.articles.len(), 50);
        assert_eq!(dataset.comments.len(), 120);
        assert_eq!(dataset.likes.len(), 200);
    }

    #[rstest]
    fn same_seed_yields_identical_dataset(blog_seed: SeedDefinition) {
        let first = generate_dataset(&blog_seed).expect("first run");
        let second = generate_dataset(&blog_seed).expect("second run");
        assert_eq!(first, second);
    }

    #[rstest]
    fn different_seeds_yield_different_datasets(blog_seed: SeedDefinition) {
        let other = SeedDefinition::new("other", 7).with_counts(20, 50, 120, 200);
        let first = generate_dataset(&blog_seed).expect("first run");
        let second = generate_dataset(&other).expect("second run");
        assert_ne!(first.users, second.users);
    }

    #[rstest]
    fn emails_are_unique_and_valid(blog_seed: SeedDefinition) {
        let dataset = generate_dataset(&blog_seed).expect("generation succeeds");
        let emails: HashSet<&str> = dataset.users.iter().map(|u| u.email.as_str()).collect();

        assert_eq!(emails.len(), dataset.users.len());
        assert!(emails.iter().all(|email| is_valid_email(email)));
    }

    #[rstest]
    fn references_stay_in_bounds(blog_seed: SeedDefinition) {
        let dataset = generate_dataset(&blog_seed).expect("generation succeeds");
        let users = dataset.users.len();
        let articles = dataset.articles.len();

        assert!(dataset.articles.iter().all(|a| a.author_index < users));
        assert!(
            dataset
                .comments
                .iter()
                .all(|c| c.author_index < users && c.article_index < articles)
        );
        assert!(
            dataset
                .likes
                .iter()
                .all(|l| l.user_index < users && l.article_index < articles)
        );
    }

    #[rstest]
    fn likes_are_unique_per_user_and_article(blog_seed: SeedDefinition) {
        let dataset = generate_dataset(&blog_seed).expect("generation succeeds");
        let pairs: HashSet<ExampleLikeSeed> = dataset.likes.iter().copied().collect();
        assert_eq!(pairs.len(), dataset.likes.len());
    }

    #[rstest]
    fn likes_are_capped_by_available_pairs() {
        let def = SeedDefinition::new("dense", 3).with_counts(2, 3, 0, 50);
        let dataset = generate_dataset(&def).expect("generation succeeds");
        assert_eq!(dataset.likes.len(), 6);
    }

    #[rstest]
    fn comments_do_not_predate_their_article(blog_seed: SeedDefinition) {
        let dataset = generate_dataset(&blog_seed).expect("generation succeeds");
        for comment in &dataset.comments {
            let article = dataset
                .articles
                .get(comment.article_index)
                .expect("article exists");
            assert!(comment.minutes_ago <= article.minutes_ago);
            assert!(comment.content.chars().count() <= COMMENT_MAX_CHARS);
        }
    }

    #[rstest]
    #[case::articles_without_users(SeedDefinition::new("s", 1).with_counts(0, 1, 0, 0))]
    #[case::likes_without_users(SeedDefinition::new("s", 1).with_counts(0, 0, 0, 1))]
    fn content_without_authors_is_rejected(#[case] def: SeedDefinition) {
        assert_eq!(
            generate_dataset(&def),
            Err(GenerationError::NoAuthors {
                seed: "s".to_owned()
            })
        );
    }

    #[rstest]
    fn comments_without_articles_are_rejected() {
        let def = SeedDefinition::new("s", 1).with_counts(2, 0, 3, 0);
        assert_eq!(
            generate_dataset(&def),
            Err(GenerationError::NoArticles {
                seed: "s".to_owned()
            })
        );
    }

    #[rstest]
    fn users_only_seed_is_allowed() {
        let def = SeedDefinition::new("users", 9).with_user_count(5);
        let dataset = generate_dataset(&def).expect("generation succeeds");
        assert_eq!(dataset.users.len(), 5);
        assert!(dataset.articles.is_empty());
    }
}
