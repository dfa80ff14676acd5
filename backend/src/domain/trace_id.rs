//! Request-scoped trace identifier for correlating logs and errors.
//!
//! The identifier lives in Tokio task-local storage. Task locals are not
//! inherited by spawned tasks, so wrap spawned or blocking work in
//! [`TraceId::scope`] to keep correlation intact.

use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static TRACE_ID: TraceId;
}

/// Per-request trace identifier.
///
/// # Examples
/// ```
/// use scribe::TraceId;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let id: TraceId = "3f1c1f5e-8d1a-4a44-b1c8-0a6f3d3f2b10".parse().expect("uuid");
/// let seen = TraceId::scope(id, async { TraceId::current() }).await;
/// assert_eq!(seen, Some(id));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Reuse a caller-supplied identifier when it is a well-formed UUID.
    #[must_use]
    pub fn from_header(value: Option<&str>) -> Option<Self> {
        value.and_then(|raw| raw.trim().parse().ok())
    }

    /// Returns the identifier in scope, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` in scope.
    pub async fn scope<Fut>(trace_id: TraceId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn current_is_none_out_of_scope() {
        assert!(TraceId::current().is_none());
    }

    #[tokio::test]
    async fn nested_scopes_shadow_outer_identifier() {
        let outer = TraceId::generate();
        let inner = TraceId::generate();
        let observed = TraceId::scope(outer, async move {
            let nested = TraceId::scope(inner, async { TraceId::current() }).await;
            (nested, TraceId::current())
        })
        .await;

        assert_eq!(observed, (Some(inner), Some(outer)));
    }

    #[rstest]
    #[case(Some("00000000-0000-0000-0000-000000000000"), true)]
    #[case(Some("  00000000-0000-0000-0000-000000000000 "), true)]
    #[case(Some("not-a-uuid"), false)]
    #[case(None, false)]
    fn header_values_must_be_uuids(#[case] raw: Option<&str>, #[case] accepted: bool) {
        assert_eq!(TraceId::from_header(raw).is_some(), accepted);
    }
}
