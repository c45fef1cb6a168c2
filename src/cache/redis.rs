use super::provider::{CacheError, CacheResult};
use redis::aio::MultiplexedConnection;
use redis::RedisResult;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
const SCAN_BATCH: usize = 100;

/// Redis cache store.
///
/// One multiplexed connection is opened lazily and shared. Any command error
/// drops it so the next call reconnects.
#[derive(Clone)]
pub struct RedisCacheStore {
    client: redis::Client,
    conn: Arc<Mutex<Option<MultiplexedConnection>>>,
}

impl RedisCacheStore {
    /// Parse the URL. No connection is made here.
    pub fn new(url: &str) -> CacheResult<Self> {
        Ok(Self {
            client: redis::Client::open(url)?,
            conn: Arc::new(Mutex::new(None)),
        })
    }

    pub async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        self.with_connection(|mut conn| async move { get(&mut conn, key).await })
            .await
    }

    pub async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        self.with_connection(|mut conn| async move { set_ex(&mut conn, key, value, ttl).await })
            .await
    }

    pub async fn delete_pattern(&self, pattern: &str) -> CacheResult<usize> {
        self.with_connection(|mut conn| async move { delete_pattern(&mut conn, pattern).await })
            .await
    }

    async fn with_connection<T, F, Fut>(&self, op: F) -> CacheResult<T>
    where
        F: FnOnce(MultiplexedConnection) -> Fut,
        Fut: Future<Output = RedisResult<T>>,
    {
        let conn = self.connection().await?;
        match op(conn).await {
            Ok(value) => Ok(value),
            Err(e) => {
                *self.conn.lock().await = None;
                Err(e.into())
            }
        }
    }

    /// Shared connection, opened on first use. The lock is not held while
    /// connecting, so callers fail after at most one connect timeout each.
    async fn connection(&self) -> CacheResult<MultiplexedConnection> {
        if let Some(conn) = self.conn.lock().await.as_ref() {
            return Ok(conn.clone());
        }

        let conn = tokio::time::timeout(
            CONNECT_TIMEOUT,
            self.client.get_multiplexed_async_connection(),
        )
        .await
        .map_err(|_| CacheError::Unavailable("timed out connecting to redis".to_string()))??;

        let mut slot = self.conn.lock().await;
        Ok(slot.get_or_insert(conn).clone())
    }
}

async fn get(conn: &mut MultiplexedConnection, key: &str) -> RedisResult<Option<String>> {
    redis::cmd("GET").arg(key).query_async(conn).await
}

async fn set_ex(
    conn: &mut MultiplexedConnection,
    key: &str,
    value: &str,
    ttl: Duration,
) -> RedisResult<()> {
    // EX 0 is rejected by Redis
    let secs = ttl.as_secs().max(1);
    redis::cmd("SET")
        .arg(key)
        .arg(value)
        .arg("EX")
        .arg(secs)
        .query_async(conn)
        .await
}

/// SCAN for matching keys, then DEL them in one command. Never uses KEYS.
async fn delete_pattern(conn: &mut MultiplexedConnection, pattern: &str) -> RedisResult<usize> {
    let mut keys: Vec<String> = Vec::new();
    let mut cursor: u64 = 0;
    loop {
        let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
            .arg(cursor)
            .arg("MATCH")
            .arg(pattern)
            .arg("COUNT")
            .arg(SCAN_BATCH)
            .query_async(conn)
            .await?;
        keys.extend(batch);
        if next == 0 {
            break;
        }
        cursor = next;
    }

    if keys.is_empty() {
        return Ok(0);
    }
    debug!("Deleting {} keys matching {}", keys.len(), pattern);
    redis::cmd("DEL").arg(&keys).query_async(conn).await
}
