use std::time::Duration;

use chrono::Utc;
use tokio::time::sleep;

use alcove_store::ThreadStore;
use alcove_types::{CommentId, ThreadRef};

use crate::error::Result;

/// Allocate a unique, time-ordered identifier for a new comment.
///
/// The candidate is the current wall-clock second; claiming it is an atomic
/// add-if-absent against the thread's full index, so two submissions landing
/// in the same second race and exactly one wins. The loser sleeps out the
/// rest of the second and retries with a fresh candidate. The loop is
/// unbounded: under sustained one-comment-per-second contention on a single
/// thread it can stall, which we accept — collisions only happen at
/// second granularity within one thread.
pub async fn allocate(store: &dyn ThreadStore, thread: &ThreadRef) -> Result<CommentId> {
    loop {
        let id = Utc::now().timestamp();
        if store.claim_id(thread, id).await? {
            return Ok(id);
        }
        sleep(Duration::from_secs(1)).await;
    }
}
