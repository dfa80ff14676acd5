//! Shared helpers for Diesel repository implementations.

use std::collections::HashMap;

use crate::domain::ArticleId;

/// Convert a row limit into the `i64` Diesel expects, saturating on overflow.
pub fn limit_to_i64(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

/// Collect `(article_id, count)` aggregates into a per-article map.
///
/// Articles missing from `rows` are absent from the map; callers treat a
/// missing entry as zero.
pub fn counts_by_article(rows: Vec<(i32, i64)>) -> HashMap<ArticleId, i64> {
    rows.into_iter()
        .map(|(article_id, count)| (ArticleId::from_row(article_id), count))
        .collect()
}

/// Raw keys for an `eq_any` filter.
pub fn raw_article_ids(ids: &[ArticleId]) -> Vec<i32> {
    ids.iter().map(|id| id.get()).collect()
}
