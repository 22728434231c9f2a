use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{
    AsyncCommands, ConnectionAddr, ConnectionInfo, ErrorKind, RedisConnectionInfo, RedisError,
};
use tokio::sync::OnceCell;
use tokio::task::JoinSet;
use tokio::time::{timeout_at, Instant};

use super::{bulk_outcome, decode_stored, Entries, KvStore, StoreError};
use crate::config::Config;
use crate::hex::HexString;

/// Redis-backed store shared by all handlers
///
/// The connection is opened on first use, so the service can start while
/// Redis is still down. Once established, the [`ConnectionManager`] is a
/// multiplexed handle that reconnects by itself after the link drops;
/// cloning it is cheap and lets concurrent requests share one socket.
///
/// Every operation runs under a single deadline of `timeout` that covers
/// connecting, waiting on another caller's connect attempt, and the command
/// itself.
pub struct RedisStore {
    client: redis::Client,
    manager: OnceCell<ConnectionManager>,
    timeout: Duration,
    target: String,
}

impl RedisStore {
    /// Create a store from configuration without connecting yet
    pub fn from_config(config: &Config) -> Result<Self> {
        let info = ConnectionInfo {
            addr: ConnectionAddr::Tcp(config.redis_host.clone(), config.redis_port),
            redis: RedisConnectionInfo {
                password: config.redis_password.clone(),
                ..Default::default()
            },
        };

        let client = redis::Client::open(info).context("Failed to create Redis client")?;

        Ok(Self {
            client,
            manager: OnceCell::new(),
            timeout: config.redis_timeout,
            target: format!("{}:{}", config.redis_host, config.redis_port),
        })
    }

    /// Get a handle to the shared connection, connecting if needed
    ///
    /// Only one connect attempt runs at a time; other callers wait on it.
    /// A failed attempt leaves the cell empty so the next call tries again.
    async fn connection(&self) -> Result<ConnectionManager, StoreError> {
        let manager = self
            .manager
            .get_or_try_init(|| async {
                let manager = ConnectionManager::new(self.client.clone())
                    .await
                    .map_err(|e| failed("connect", e))?;
                tracing::info!("Connected to Redis at {}", self.target);
                Ok::<_, StoreError>(manager)
            })
            .await?;

        Ok(manager.clone())
    }

    /// Run `fut` to completion or give up at `deadline`
    async fn before<T, F>(&self, op: &str, deadline: Instant, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        timeout_at(deadline, fut)
            .await
            .unwrap_or_else(|_| Err(timed_out(op, self.timeout)))
    }

    fn deadline(&self) -> Instant {
        Instant::now() + self.timeout
    }
}

fn failed(op: &str, e: RedisError) -> StoreError {
    StoreError::Unavailable(format!("{} failed: {}", op, e))
}

fn timed_out(op: &str, limit: Duration) -> StoreError {
    StoreError::Unavailable(format!("{} timed out after {}ms", op, limit.as_millis()))
}

#[async_trait]
impl KvStore for RedisStore {
    async fn put(&self, key: &HexString, value: &HexString) -> Result<(), StoreError> {
        self.before("SET", self.deadline(), async {
            let mut conn = self.connection().await?;
            conn.set::<_, _, ()>(key.as_str(), value.as_str())
                .await
                .map_err(|e| failed("SET", e))
        })
        .await?;

        tracing::debug!("SET {}", key);
        Ok(())
    }

    async fn get(&self, key: &HexString) -> Result<Option<HexString>, StoreError> {
        let raw = self
            .before("GET", self.deadline(), async {
                let mut conn = self.connection().await?;
                conn.get::<_, Option<Vec<u8>>>(key.as_str())
                    .await
                    .map_err(|e| match e.kind() {
                        // WRONGTYPE: another client stored a list, hash, etc.
                        ErrorKind::TypeError => StoreError::CorruptValue { key: key.clone() },
                        _ => failed("GET", e),
                    })
            })
            .await?;

        raw.map(|bytes| decode_stored(key, &bytes)).transpose()
    }

    /// Issues every SET concurrently over the multiplexed connection. The
    /// whole batch, connect included, shares one deadline.
    async fn bulk_put(&self, entries: &Entries) -> Result<usize, StoreError> {
        let deadline = self.deadline();
        let conn = self
            .before("connect", deadline, self.connection())
            .await?;
        let limit = self.timeout;

        let mut writes = JoinSet::new();
        for (key, value) in entries {
            let mut conn = conn.clone();
            let key = key.clone();
            let value = value.clone();
            writes.spawn(async move {
                let outcome = match timeout_at(
                    deadline,
                    conn.set::<_, _, ()>(key.as_str(), value.as_str()),
                )
                .await
                {
                    Ok(Ok(())) => Ok(()),
                    Ok(Err(e)) => Err(failed("SET", e)),
                    Err(_) => Err(timed_out("SET", limit)),
                };
                (key, outcome)
            });
        }

        let mut stored = 0;
        let mut last_error = None;
        while let Some(joined) = writes.join_next().await {
            match joined {
                Ok((_, Ok(()))) => stored += 1,
                Ok((key, Err(e))) => {
                    tracing::warn!("Bulk write failed for key {}: {}", key, e);
                    last_error = Some(e);
                }
                Err(e) => {
                    tracing::error!("Bulk write task failed: {}", e);
                    last_error = Some(StoreError::Unavailable(format!("write task failed: {}", e)));
                }
            }
        }

        bulk_outcome(stored, last_error)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.before("PING", self.deadline(), async {
            let mut conn = self.connection().await?;
            let _pong: String = redis::cmd("PING")
                .query_async(&mut conn)
                .await
                .map_err(|e| failed("PING", e))?;
            Ok(())
        })
        .await
    }
}
