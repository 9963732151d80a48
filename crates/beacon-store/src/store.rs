//! SQLite-backed durable queue store.

use std::str::FromStr;

use chrono::{Duration, Utc};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use beacon_core::config::store::StoreConfig;
use beacon_core::error::{AppError, ErrorKind};
use beacon_core::result::AppResult;

use crate::queue::{QueueEntry, QueueName};

/// Wrapper around the sqlx SQLite connection pool. Opening the store
/// creates the database file and all queue tables if they do not exist;
/// a failure here is fatal to the caller.
#[derive(Debug, Clone)]
pub struct QueueStore {
    pool: SqlitePool,
}

impl QueueStore {
    /// Open (and if necessary create) the queue store.
    pub async fn open(config: &StoreConfig) -> AppResult<Self> {
        info!(url = %config.url, max_connections = config.max_connections, "Opening queue store");

        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Store,
                    format!("Invalid store URL: {e}"),
                    e,
                )
            })?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Store,
                    format!("Failed to open queue store: {e}"),
                    e,
                )
            })?;

        let store = Self { pool };
        store.migrate().await?;

        info!("Queue store ready");
        Ok(store)
    }

    /// Create all queue tables and indexes inside one transaction.
    async fn migrate(&self) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(store_err("begin migration"))?;

        for queue in QueueName::ALL {
            let table = queue.table();
            sqlx::query(&format!(
                "CREATE TABLE IF NOT EXISTS {table} ( \
                    id INTEGER PRIMARY KEY AUTOINCREMENT, \
                    payload TEXT NOT NULL, \
                    enqueued_at TEXT NOT NULL \
                )"
            ))
            .execute(&mut *tx)
            .await
            .map_err(store_err("create queue table"))?;

            sqlx::query(&format!(
                "CREATE INDEX IF NOT EXISTS idx_{table}_enqueued_at ON {table} (enqueued_at)"
            ))
            .execute(&mut *tx)
            .await
            .map_err(store_err("create queue index"))?;
        }

        tx.commit().await.map_err(store_err("commit migration"))?;
        Ok(())
    }

    /// Append a payload to a queue. Returns the assigned entry id.
    pub async fn enqueue(&self, queue: QueueName, payload: &Value) -> AppResult<i64> {
        let mut tx = self.pool.begin().await.map_err(store_err("begin enqueue"))?;

        let result = sqlx::query(&format!(
            "INSERT INTO {} (payload, enqueued_at) VALUES (?1, ?2)",
            queue.table()
        ))
        .bind(payload)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(store_err("enqueue entry"))?;

        tx.commit().await.map_err(store_err("commit enqueue"))?;

        let id = result.last_insert_rowid();
        debug!(queue = %queue, id, "Enqueued entry");
        Ok(id)
    }

    /// List every entry of a queue in enqueue order.
    pub async fn list_all(&self, queue: QueueName) -> AppResult<Vec<QueueEntry>> {
        sqlx::query_as::<_, QueueEntry>(&format!(
            "SELECT id, payload, enqueued_at FROM {} ORDER BY id ASC",
            queue.table()
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(store_err("list queue"))
    }

    /// Remove one entry by id. Removing an already-removed entry is a no-op.
    pub async fn remove(&self, queue: QueueName, id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(store_err("begin remove"))?;

        sqlx::query(&format!("DELETE FROM {} WHERE id = ?1", queue.table()))
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(store_err("remove entry"))?;

        tx.commit().await.map_err(store_err("commit remove"))?;
        debug!(queue = %queue, id, "Removed entry");
        Ok(())
    }

    /// Count the entries currently in a queue.
    pub async fn len(&self, queue: QueueName) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", queue.table()))
            .fetch_one(&self.pool)
            .await
            .map_err(store_err("count queue"))?;
        Ok(count as u64)
    }

    /// Delete entries older than the given number of days, across all
    /// queues. Returns the total number of entries purged.
    pub async fn purge_older_than(&self, days: u32) -> AppResult<u64> {
        let cutoff = Utc::now() - Duration::days(i64::from(days));
        let mut purged = 0u64;

        let mut tx = self.pool.begin().await.map_err(store_err("begin purge"))?;
        for queue in QueueName::ALL {
            let result = sqlx::query(&format!(
                "DELETE FROM {} WHERE enqueued_at < ?1",
                queue.table()
            ))
            .bind(cutoff)
            .execute(&mut *tx)
            .await
            .map_err(store_err("purge queue"))?;
            purged += result.rows_affected();
        }
        tx.commit().await.map_err(store_err("commit purge"))?;

        if purged > 0 {
            info!(purged, "Purged stale queue entries");
        }
        Ok(purged)
    }

    /// Check store health by running a trivial query.
    pub async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(store_err("health check"))
    }

    /// Close all connections in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Queue store closed");
    }

    /// Return a reference to the underlying sqlx pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn store_err(context: &'static str) -> impl Fn(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Store, format!("Failed to {context}: {e}"), e)
}
