//! Transaction scopes: one fresh correlation id per unit of work.

use std::future::Future;

use crate::context::ambient::{current_tags, with_tags, with_tags_sync};
use crate::context::tags::TagSet;
use crate::context::trace_id::TraceId;

/// Tag key carrying the transaction identifier.
pub const TRACE_ID_KEY: &str = "trace.id";

fn transaction_tags() -> TagSet {
    let id = TraceId::generate();
    tracing::trace!(trace_id = %id, "Entering transaction scope");
    TagSet::single(TRACE_ID_KEY, id.to_hex())
}

/// Run `body` under a freshly generated `trace.id`.
///
/// A nested call shadows the outer id for its own extent; the outer id is
/// visible again once the inner body completes.
pub fn with_transaction<F>(body: F) -> impl Future<Output = F::Output>
where
    F: Future,
{
    with_tags(transaction_tags(), body)
}

/// Synchronous counterpart of [`with_transaction`].
pub fn with_transaction_sync<F, T>(body: F) -> T
where
    F: FnOnce() -> T,
{
    with_tags_sync(transaction_tags(), body)
}

/// The `trace.id` active for the calling task, if any.
pub fn current_trace_id() -> Option<String> {
    current_tags().get(TRACE_ID_KEY).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_sync_transaction() {
        assert!(current_trace_id().is_none());
        let id = with_transaction_sync(current_trace_id).unwrap();
        assert_eq!(id.len(), 32);
        assert!(current_trace_id().is_none());
    }

    #[tokio::test]
    async fn test_nested_shadowing() {
        with_transaction(async {
            let outer = current_trace_id().unwrap();

            let inner = with_transaction(async {
                tokio::time::sleep(Duration::from_millis(2)).await;
                let tags = current_tags();
                assert_eq!(tags.len(), 1, "inner scope must carry a single trace.id");
                current_trace_id().unwrap()
            })
            .await;

            assert_ne!(outer, inner);
            assert_eq!(current_trace_id().unwrap(), outer);
        })
        .await;
    }

    #[tokio::test]
    async fn test_fresh_id_per_scope() {
        let a = with_transaction(async { current_trace_id() }).await;
        let b = with_transaction(async { current_trace_id() }).await;
        assert!(a.is_some() && b.is_some());
        assert_ne!(a, b);
    }
}
