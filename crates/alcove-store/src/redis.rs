use std::collections::HashMap;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use deadpool_redis::{Config, Pool, Runtime};
use deadpool_redis::redis::cmd;
use tracing::info;

use alcove_types::{CommentId, CommentRecord, ThreadRef};

use crate::{ThreadStore, keys};

/// `ThreadStore` backed by a shared Redis, via a deadpool connection pool.
///
/// Holds no state of its own beyond the pool and the key namespace, so any
/// number of processes can share one store without coordination.
pub struct RedisStore {
    pool: Pool,
    ns: String,
}

impl RedisStore {
    pub fn connect(url: &str, namespace: impl Into<String>) -> Result<Self> {
        let pool = Config::from_url(url)
            .create_pool(Some(Runtime::Tokio1))
            .context("failed to create redis pool")?;
        let ns = namespace.into();
        info!("redis store ready (namespace {})", ns);
        Ok(Self { pool, ns })
    }
}

#[async_trait]
impl ThreadStore for RedisStore {
    async fn enabled_flag(&self, thread: &ThreadRef) -> Result<Option<bool>> {
        let mut conn = self.pool.get().await?;
        let value: Option<String> = cmd("GET")
            .arg(keys::enabled(&self.ns, thread))
            .query_async(&mut conn)
            .await?;
        match value {
            None => Ok(None),
            Some(raw) => match raw.parse::<bool>() {
                Ok(flag) => Ok(Some(flag)),
                Err(_) => bail!(
                    "unexpected enablement value {:?} for {}{}",
                    raw,
                    thread.host,
                    thread.path
                ),
            },
        }
    }

    async fn cache_enabled(&self, thread: &ThreadRef) -> Result<()> {
        let mut conn = self.pool.get().await?;
        let _: String = cmd("SET")
            .arg(keys::enabled(&self.ns, thread))
            .arg("true")
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn host_auto_enabled(&self, host: &str) -> Result<bool> {
        let mut conn = self.pool.get().await?;
        let member: bool = cmd("SISMEMBER")
            .arg(keys::auto_enable(&self.ns))
            .arg(host)
            .query_async(&mut conn)
            .await?;
        Ok(member)
    }

    async fn claim_id(&self, thread: &ThreadRef, id: CommentId) -> Result<bool> {
        let mut conn = self.pool.get().await?;
        let added: bool = cmd("ZADD")
            .arg(keys::all(&self.ns, thread))
            .arg("NX")
            .arg(id)
            .arg(id)
            .query_async(&mut conn)
            .await?;
        Ok(added)
    }

    async fn put_comment(
        &self,
        thread: &ThreadRef,
        id: CommentId,
        record: &CommentRecord,
    ) -> Result<()> {
        let mut conn = self.pool.get().await?;
        let mut hset = cmd("HSET");
        hset.arg(keys::comment(&self.ns, thread, id));
        for (field, value) in record.fields() {
            hset.arg(field).arg(value);
        }
        let _: i64 = hset.query_async(&mut conn).await?;
        Ok(())
    }

    async fn get_comment(
        &self,
        thread: &ThreadRef,
        id: CommentId,
    ) -> Result<Option<CommentRecord>> {
        let mut conn = self.pool.get().await?;
        let map: HashMap<String, String> = cmd("HGETALL")
            .arg(keys::comment(&self.ns, thread, id))
            .query_async(&mut conn)
            .await?;
        if map.is_empty() {
            return Ok(None);
        }
        Ok(Some(CommentRecord::from_fields(&map)))
    }

    async fn approve(&self, thread: &ThreadRef, id: CommentId) -> Result<bool> {
        let mut conn = self.pool.get().await?;
        let added: bool = cmd("ZADD")
            .arg(keys::approved(&self.ns, thread))
            .arg("NX")
            .arg(id)
            .arg(id)
            .query_async(&mut conn)
            .await?;
        Ok(added)
    }

    async fn retract(&self, thread: &ThreadRef, id: CommentId) -> Result<bool> {
        let mut conn = self.pool.get().await?;
        let removed: bool = cmd("ZREM")
            .arg(keys::approved(&self.ns, thread))
            .arg(id)
            .query_async(&mut conn)
            .await?;
        Ok(removed)
    }

    async fn approved_ids(&self, thread: &ThreadRef, limit: usize) -> Result<Vec<CommentId>> {
        let mut conn = self.pool.get().await?;
        let ids: Vec<CommentId> = cmd("ZRANGEBYSCORE")
            .arg(keys::approved(&self.ns, thread))
            .arg("-inf")
            .arg("+inf")
            .arg("LIMIT")
            .arg(0)
            .arg(limit as i64)
            .query_async(&mut conn)
            .await?;
        Ok(ids)
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.pool.get().await?;
        let _: String = cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}
