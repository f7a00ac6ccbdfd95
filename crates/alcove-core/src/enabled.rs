use tracing::warn;

use alcove_store::ThreadStore;
use alcove_types::ThreadRef;

use crate::error::Result;

/// Resolve whether a thread accepts comments.
///
/// An explicit per-path flag wins. With no flag set, the host allow-list
/// decides; a positive allow-list hit is cached back as `enabled = true` so
/// later reads short-circuit. A negative result is never persisted — absence
/// keeps meaning "not yet resolved" for hosts added to the list later.
pub async fn is_enabled(store: &dyn ThreadStore, thread: &ThreadRef) -> Result<bool> {
    if let Some(flag) = store.enabled_flag(thread).await? {
        return Ok(flag);
    }
    if store.host_auto_enabled(&thread.host).await? {
        // Best-effort cache write; resolution already succeeded.
        if let Err(err) = store.cache_enabled(thread).await {
            warn!(
                "failed to cache enablement for {}{}: {}",
                thread.host, thread.path, err
            );
        }
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alcove_store::MemoryStore;

    fn thread() -> ThreadRef {
        ThreadRef {
            host: "example.com".into(),
            path: "/post".into(),
        }
    }

    #[tokio::test]
    async fn explicit_flag_wins_over_allow_list() {
        let store = MemoryStore::new();
        let t = thread();
        store.add_auto_enable_host("example.com");
        store.cache_enabled(&t).await.unwrap();
        assert!(is_enabled(&store, &t).await.unwrap());
    }

    #[tokio::test]
    async fn explicit_false_blocks_an_allow_listed_host() {
        let store = MemoryStore::new();
        let t = thread();
        store.add_auto_enable_host("example.com");
        store.set_enabled_flag(&t, false);
        assert!(!is_enabled(&store, &t).await.unwrap());
    }

    #[tokio::test]
    async fn allow_listed_host_resolves_true_and_caches_the_flag() {
        let store = MemoryStore::new();
        let t = thread();
        store.add_auto_enable_host("example.com");

        assert_eq!(store.enabled_flag(&t).await.unwrap(), None);
        assert!(is_enabled(&store, &t).await.unwrap());
        assert_eq!(store.enabled_flag(&t).await.unwrap(), Some(true));
    }

    #[tokio::test]
    async fn unknown_host_resolves_false_without_persisting() {
        let store = MemoryStore::new();
        let t = thread();
        assert!(!is_enabled(&store, &t).await.unwrap());
        // Absent, not false: the host may join the allow-list later.
        assert_eq!(store.enabled_flag(&t).await.unwrap(), None);
    }
}
