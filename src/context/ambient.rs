//! Ambient tag context bound to a logical task.
//!
//! # Responsibilities
//! - Hold the tags implicitly visible to log calls of the running task
//! - Install a merged context for the extent of a body and restore it after
//! - Carry the context into futures that are spawned on purpose
//!
//! # Design Decisions
//! - Backed by a tokio task-local: the value is swapped in on every poll of
//!   the scoped future and swapped out when the poll returns, so it follows
//!   the task across suspension points and worker threads
//! - Sibling tasks never see each other's context, even on the same worker
//! - `tokio::spawn` does not inherit; use [`inherit`] or [`spawn_inherited`]
//! - Scope exit restores the parent on return, error, and unwind alike

use std::future::Future;

use tokio::task::JoinHandle;

use crate::context::tags::{merge, TagSet};

/// Typed per-task context.
#[derive(Debug, Clone, Default)]
pub struct AmbientContext {
    pub tags: TagSet,
}

tokio::task_local! {
    static AMBIENT: AmbientContext;
}

/// Tags active for the calling task, or an empty set outside any scope.
pub fn current_tags() -> TagSet {
    AMBIENT
        .try_with(|ctx| ctx.tags.clone())
        .unwrap_or_default()
}

fn entered(tags: &TagSet) -> AmbientContext {
    AmbientContext {
        tags: merge(&current_tags(), tags),
    }
}

/// Run `body` with `tags` merged over the current context.
///
/// The merged context is read when this function is called, and is visible
/// to `body` and everything it awaits inline until `body` completes.
pub fn with_tags<F>(tags: TagSet, body: F) -> impl Future<Output = F::Output>
where
    F: Future,
{
    AMBIENT.scope(entered(&tags), body)
}

/// Synchronous counterpart of [`with_tags`].
pub fn with_tags_sync<F, T>(tags: TagSet, body: F) -> T
where
    F: FnOnce() -> T,
{
    AMBIENT.sync_scope(entered(&tags), body)
}

/// Bind the caller's current context to `future`.
///
/// Use this for futures handed to an executor that would otherwise start
/// them with an empty context.
pub fn inherit<F>(future: F) -> impl Future<Output = F::Output>
where
    F: Future,
{
    AMBIENT.scope(
        AmbientContext {
            tags: current_tags(),
        },
        future,
    )
}

/// `tokio::spawn` a future that starts with the caller's context.
pub fn spawn_inherited<F>(future: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::spawn(inherit(future))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_empty_outside_scope() {
        assert!(current_tags().is_empty());
    }

    #[test]
    fn test_sync_scope_restores() {
        let seen = with_tags_sync(TagSet::single("a", "1"), || {
            let inner = with_tags_sync(TagSet::single("b", "2"), current_tags);
            assert_eq!(inner.get("a"), Some("1"));
            assert_eq!(inner.get("b"), Some("2"));
            current_tags()
        });
        assert_eq!(seen, TagSet::single("a", "1"));
        assert!(current_tags().is_empty());
    }

    #[test]
    fn test_sync_scope_restores_on_panic() {
        let result = std::panic::catch_unwind(|| {
            with_tags_sync(TagSet::single("a", "1"), || panic!("boom"))
        });
        assert!(result.is_err());
        assert!(current_tags().is_empty());
    }

    #[tokio::test]
    async fn test_async_scope_merges_over_parent() {
        let tags = with_tags(TagSet::single("user", "alice"), async {
            with_tags(TagSet::single("USER", "bob").with("req", "7"), async {
                tokio::time::sleep(Duration::from_millis(5)).await;
                current_tags()
            })
            .await
        })
        .await;

        assert_eq!(tags.len(), 2);
        assert_eq!(tags.get("user"), Some("bob"));
        assert_eq!(tags.get("req"), Some("7"));
        assert!(current_tags().is_empty());
    }

    #[tokio::test]
    async fn test_error_propagates_after_restore() {
        let result: Result<(), &str> = with_tags(TagSet::single("a", "1"), async { Err("failed") }).await;
        assert_eq!(result, Err("failed"));
        assert!(current_tags().is_empty());
    }

    #[tokio::test]
    async fn test_plain_spawn_does_not_inherit() {
        let tags = with_tags(TagSet::single("a", "1"), async {
            tokio::spawn(async { current_tags() }).await.unwrap()
        })
        .await;
        assert!(tags.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_spawn_inherited() {
        let tags = with_tags(TagSet::single("a", "1"), async {
            spawn_inherited(async {
                tokio::task::yield_now().await;
                current_tags()
            })
            .await
            .unwrap()
        })
        .await;
        assert_eq!(tags.get("a"), Some("1"));
    }

    #[tokio::test]
    async fn test_joined_children_inherit() {
        let (left, right) = with_tags(TagSet::single("a", "1"), async {
            tokio::join!(
                with_tags(TagSet::single("side", "left"), async {
                    tokio::time::sleep(Duration::from_millis(3)).await;
                    current_tags()
                }),
                with_tags(TagSet::single("side", "right"), async {
                    tokio::task::yield_now().await;
                    current_tags()
                }),
            )
        })
        .await;

        assert_eq!(left.get("a"), Some("1"));
        assert_eq!(left.get("side"), Some("left"));
        assert_eq!(right.get("a"), Some("1"));
        assert_eq!(right.get("side"), Some("right"));
    }
}
