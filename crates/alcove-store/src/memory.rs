//! In-memory `ThreadStore` for tests. Mirrors the Redis semantics: set-if-absent
//! reports insertion, the enablement flag is tri-state, approved ids come back
//! in score order.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Mutex;

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use alcove_types::{CommentId, CommentRecord, ThreadRef};

use crate::ThreadStore;

#[derive(Default)]
struct Inner {
    auto_enable: HashSet<String>,
    enabled: HashMap<ThreadRef, bool>,
    all: HashMap<ThreadRef, BTreeSet<CommentId>>,
    approved: HashMap<ThreadRef, BTreeSet<CommentId>>,
    comments: HashMap<(ThreadRef, CommentId), CommentRecord>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_inner<T>(&self, f: impl FnOnce(&mut Inner) -> T) -> Result<T> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|e| anyhow!("store lock poisoned: {}", e))?;
        Ok(f(&mut inner))
    }

    /// Seed the host allow-list (configuration data in production).
    pub fn add_auto_enable_host(&self, host: &str) {
        self.inner
            .lock()
            .expect("store lock poisoned")
            .auto_enable
            .insert(host.to_string());
    }

    /// Set the explicit per-path flag, including to `false` — something the
    /// service never does itself (operators set it out of band).
    pub fn set_enabled_flag(&self, thread: &ThreadRef, enabled: bool) {
        self.inner
            .lock()
            .expect("store lock poisoned")
            .enabled
            .insert(thread.clone(), enabled);
    }

    /// Every id ever allocated for `thread`, ascending. Test inspection only.
    pub fn all_ids(&self, thread: &ThreadRef) -> Vec<CommentId> {
        let inner = self.inner.lock().expect("store lock poisoned");
        inner
            .all
            .get(thread)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ThreadStore for MemoryStore {
    async fn enabled_flag(&self, thread: &ThreadRef) -> Result<Option<bool>> {
        self.with_inner(|inner| inner.enabled.get(thread).copied())
    }

    async fn cache_enabled(&self, thread: &ThreadRef) -> Result<()> {
        self.with_inner(|inner| {
            inner.enabled.insert(thread.clone(), true);
        })
    }

    async fn host_auto_enabled(&self, host: &str) -> Result<bool> {
        self.with_inner(|inner| inner.auto_enable.contains(host))
    }

    async fn claim_id(&self, thread: &ThreadRef, id: CommentId) -> Result<bool> {
        self.with_inner(|inner| inner.all.entry(thread.clone()).or_default().insert(id))
    }

    async fn put_comment(
        &self,
        thread: &ThreadRef,
        id: CommentId,
        record: &CommentRecord,
    ) -> Result<()> {
        self.with_inner(|inner| {
            inner.comments.insert((thread.clone(), id), record.clone());
        })
    }

    async fn get_comment(
        &self,
        thread: &ThreadRef,
        id: CommentId,
    ) -> Result<Option<CommentRecord>> {
        self.with_inner(|inner| inner.comments.get(&(thread.clone(), id)).cloned())
    }

    async fn approve(&self, thread: &ThreadRef, id: CommentId) -> Result<bool> {
        self.with_inner(|inner| inner.approved.entry(thread.clone()).or_default().insert(id))
    }

    async fn retract(&self, thread: &ThreadRef, id: CommentId) -> Result<bool> {
        self.with_inner(|inner| {
            inner
                .approved
                .get_mut(thread)
                .map(|set| set.remove(&id))
                .unwrap_or(false)
        })
    }

    async fn approved_ids(&self, thread: &ThreadRef, limit: usize) -> Result<Vec<CommentId>> {
        self.with_inner(|inner| {
            inner
                .approved
                .get(thread)
                .map(|set| set.iter().copied().take(limit).collect())
                .unwrap_or_default()
        })
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thread() -> ThreadRef {
        ThreadRef {
            host: "example.com".into(),
            path: "/post".into(),
        }
    }

    #[tokio::test]
    async fn claim_id_reports_only_the_first_insert() {
        let store = MemoryStore::new();
        let t = thread();
        assert!(store.claim_id(&t, 100).await.unwrap());
        assert!(!store.claim_id(&t, 100).await.unwrap());
        assert_eq!(store.all_ids(&t), vec![100]);
    }

    #[tokio::test]
    async fn enabled_flag_is_tri_state() {
        let store = MemoryStore::new();
        let t = thread();
        assert_eq!(store.enabled_flag(&t).await.unwrap(), None);
        store.cache_enabled(&t).await.unwrap();
        assert_eq!(store.enabled_flag(&t).await.unwrap(), Some(true));
    }

    #[tokio::test]
    async fn retract_removes_only_from_approved() {
        let store = MemoryStore::new();
        let t = thread();
        store.claim_id(&t, 100).await.unwrap();
        store.approve(&t, 100).await.unwrap();
        assert!(store.retract(&t, 100).await.unwrap());
        assert!(!store.retract(&t, 100).await.unwrap());
        assert_eq!(store.approved_ids(&t, 10).await.unwrap(), vec![]);
        assert_eq!(store.all_ids(&t), vec![100]);
    }

    #[tokio::test]
    async fn approved_ids_are_ascending_and_bounded() {
        let store = MemoryStore::new();
        let t = thread();
        for id in [300, 100, 200] {
            store.claim_id(&t, id).await.unwrap();
            store.approve(&t, id).await.unwrap();
        }
        assert_eq!(store.approved_ids(&t, 10).await.unwrap(), vec![100, 200, 300]);
        assert_eq!(store.approved_ids(&t, 2).await.unwrap(), vec![100, 200]);
    }
}
