pub mod keys;
#[cfg(any(test, feature = "testing"))]
pub mod memory;
pub mod redis;

use anyhow::Result;
use async_trait::async_trait;

use alcove_types::{CommentId, CommentRecord, ThreadRef};

#[cfg(any(test, feature = "testing"))]
pub use memory::MemoryStore;
pub use redis::RedisStore;

/// Persistence contract for comment threads.
///
/// Every read-modify-write the core needs atomic (id allocation, approval
/// promotion, enablement caching) is a single operation here, so callers
/// never coordinate through in-process locks.
#[async_trait]
pub trait ThreadStore: Send + Sync {
    /// The explicit per-path enablement flag. `None` means "not set",
    /// which is distinct from `Some(false)`.
    async fn enabled_flag(&self, thread: &ThreadRef) -> Result<Option<bool>>;

    /// Persist `enabled = true` as a cache of an allow-list decision.
    /// Idempotent; safe to race with other resolvers.
    async fn cache_enabled(&self, thread: &ThreadRef) -> Result<()>;

    /// Membership of the host in the auto-enable allow-list.
    async fn host_auto_enabled(&self, host: &str) -> Result<bool>;

    /// Add `id` to the thread's full comment index if absent.
    /// Returns whether the id was newly inserted.
    async fn claim_id(&self, thread: &ThreadRef, id: CommentId) -> Result<bool>;

    async fn put_comment(
        &self,
        thread: &ThreadRef,
        id: CommentId,
        record: &CommentRecord,
    ) -> Result<()>;

    async fn get_comment(
        &self,
        thread: &ThreadRef,
        id: CommentId,
    ) -> Result<Option<CommentRecord>>;

    /// Add `id` to the approved index if absent. Returns whether the id was
    /// newly inserted.
    async fn approve(&self, thread: &ThreadRef, id: CommentId) -> Result<bool>;

    /// Remove `id` from the approved index only; the full index and the
    /// record stay. Returns whether the id was present.
    async fn retract(&self, thread: &ThreadRef, id: CommentId) -> Result<bool>;

    /// Approved ids in chronological ascending order, at most `limit`.
    async fn approved_ids(&self, thread: &ThreadRef, limit: usize) -> Result<Vec<CommentId>>;

    /// Liveness probe against the backing store.
    async fn ping(&self) -> Result<()>;
}
