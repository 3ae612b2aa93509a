//! SQLite session store
//!
//! Implements the `tower-sessions` store traits over the shared
//! connection pool. Sessions are rows of serialized data plus an expiry,
//! with one extra column: `updated_at`, which drives the touch-after
//! optimization. An unchanged session that was written recently is not
//! rewritten on every request, amortizing store churn for busy cookies.

use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::task;
use tower_sessions::{
    ExpiredDeletion, SessionStore,
    session::{Id, Record},
    session_store,
};
use tracing::debug;

use super::connection::ConnectionPool;

/// SQLite-backed session store with a touch-after interval
#[derive(Debug, Clone)]
pub struct SqliteSessionStore {
    pool: Arc<ConnectionPool>,
    touch_after_secs: i64,
}

impl SqliteSessionStore {
    /// Create a store that rewrites the row on every save
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self {
            pool,
            touch_after_secs: 0,
        }
    }

    /// Skip rewriting unchanged sessions younger than `secs`
    #[must_use]
    pub const fn with_touch_after(mut self, secs: i64) -> Self {
        self.touch_after_secs = secs;
        self
    }
}

fn backend(e: impl ToString) -> session_store::Error {
    session_store::Error::Backend(e.to_string())
}

fn encode_data(record: &Record) -> session_store::Result<String> {
    serde_json::to_string(&record.data).map_err(|e| session_store::Error::Encode(e.to_string()))
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        let pool = Arc::clone(&self.pool);
        let data = encode_data(record)?;
        let mut id = record.id;
        let expiry = record.expiry_date.unix_timestamp();

        let new_id = task::spawn_blocking(move || -> session_store::Result<Id> {
            let conn = pool.get().map_err(backend)?;
            loop {
                let inserted = conn
                    .execute(
                        "INSERT INTO sessions (id, data, expiry_date, updated_at)
                         VALUES (?1, ?2, ?3, ?4)
                         ON CONFLICT(id) DO NOTHING",
                        rusqlite::params![
                            id.to_string(),
                            data,
                            expiry,
                            OffsetDateTime::now_utc().unix_timestamp(),
                        ],
                    )
                    .map_err(backend)?;
                if inserted == 1 {
                    return Ok(id);
                }
                // Cookie ids are random; a collision means regenerate.
                id = Id::default();
            }
        })
        .await
        .map_err(backend)??;

        record.id = new_id;
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        let pool = Arc::clone(&self.pool);
        let data = encode_data(record)?;
        let id = record.id.to_string();
        let expiry = record.expiry_date.unix_timestamp();
        let touch_after = self.touch_after_secs;

        task::spawn_blocking(move || -> session_store::Result<()> {
            let conn = pool.get().map_err(backend)?;
            let now = OffsetDateTime::now_utc().unix_timestamp();

            if touch_after > 0 {
                let existing: Option<(String, i64)> = conn
                    .query_row(
                        "SELECT data, updated_at FROM sessions WHERE id = ?1",
                        [&id],
                        |row| Ok((row.get(0)?, row.get(1)?)),
                    )
                    .map(Some)
                    .or_else(|e| match e {
                        rusqlite::Error::QueryReturnedNoRows => Ok(None),
                        other => Err(backend(other)),
                    })?;

                if let Some((stored_data, updated_at)) = existing {
                    if stored_data == data && now - updated_at < touch_after {
                        debug!("Session unchanged within touch interval, skipping write");
                        return Ok(());
                    }
                }
            }

            conn.execute(
                "INSERT INTO sessions (id, data, expiry_date, updated_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(id) DO UPDATE SET
                     data = excluded.data,
                     expiry_date = excluded.expiry_date,
                     updated_at = excluded.updated_at",
                rusqlite::params![id, data, expiry, now],
            )
            .map_err(backend)?;
            Ok(())
        })
        .await
        .map_err(backend)?
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let pool = Arc::clone(&self.pool);
        let id = *session_id;
        let id_str = id.to_string();

        task::spawn_blocking(move || -> session_store::Result<Option<Record>> {
            let conn = pool.get().map_err(backend)?;
            let row: Option<(String, i64)> = conn
                .query_row(
                    "SELECT data, expiry_date FROM sessions
                     WHERE id = ?1 AND expiry_date > ?2",
                    rusqlite::params![id_str, OffsetDateTime::now_utc().unix_timestamp()],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .map(Some)
                .or_else(|e| match e {
                    rusqlite::Error::QueryReturnedNoRows => Ok(None),
                    other => Err(backend(other)),
                })?;

            row.map(|(data, expiry)| {
                let data = serde_json::from_str(&data)
                    .map_err(|e| session_store::Error::Decode(e.to_string()))?;
                let expiry_date = OffsetDateTime::from_unix_timestamp(expiry)
                    .map_err(|e| session_store::Error::Decode(e.to_string()))?;
                Ok(Record {
                    id,
                    data,
                    expiry_date,
                })
            })
            .transpose()
        })
        .await
        .map_err(backend)?
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        let pool = Arc::clone(&self.pool);
        let id_str = session_id.to_string();

        task::spawn_blocking(move || -> session_store::Result<()> {
            let conn = pool.get().map_err(backend)?;
            conn.execute("DELETE FROM sessions WHERE id = ?1", [&id_str])
                .map_err(backend)?;
            Ok(())
        })
        .await
        .map_err(backend)?
    }
}

#[async_trait]
impl ExpiredDeletion for SqliteSessionStore {
    async fn delete_expired(&self) -> session_store::Result<()> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || -> session_store::Result<()> {
            let conn = pool.get().map_err(backend)?;
            let deleted = conn
                .execute(
                    "DELETE FROM sessions WHERE expiry_date <= ?1",
                    [OffsetDateTime::now_utc().unix_timestamp()],
                )
                .map_err(backend)?;
            if deleted > 0 {
                debug!(deleted, "Purged expired sessions");
            }
            Ok(())
        })
        .await
        .map_err(backend)?
    }
}

#[cfg(test)]
mod tests {
    use time::Duration;

    use super::*;
    use crate::persistence::test_support::pool_with_schema;

    fn record(expires_in: Duration) -> Record {
        let mut data = std::collections::HashMap::new();
        data.insert("user_id".to_string(), serde_json::json!("abc"));
        Record {
            id: Id::default(),
            data,
            expiry_date: OffsetDateTime::now_utc() + expires_in,
        }
    }

    fn updated_at(pool: &ConnectionPool, id: &Id) -> i64 {
        let conn = pool.get().unwrap();
        conn.query_row(
            "SELECT updated_at FROM sessions WHERE id = ?1",
            [id.to_string()],
            |row| row.get(0),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn create_then_load_round_trips() {
        let store = SqliteSessionStore::new(pool_with_schema());
        let mut saved = record(Duration::days(7));
        store.create(&mut saved).await.unwrap();

        let loaded = store.load(&saved.id).await.unwrap().unwrap();
        assert_eq!(loaded.data, saved.data);
    }

    #[tokio::test]
    async fn expired_record_is_not_loaded() {
        let store = SqliteSessionStore::new(pool_with_schema());
        let mut saved = record(Duration::seconds(-10));
        store.create(&mut saved).await.unwrap();

        assert!(store.load(&saved.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unchanged_save_within_touch_interval_skips_write() {
        let pool = pool_with_schema();
        let store = SqliteSessionStore::new(Arc::clone(&pool)).with_touch_after(3600);
        let mut saved = record(Duration::days(7));
        store.create(&mut saved).await.unwrap();
        let first_write = updated_at(&pool, &saved.id);

        // Backdate the row so a rewrite would be observable.
        {
            let conn = pool.get().unwrap();
            conn.execute(
                "UPDATE sessions SET updated_at = ?1 WHERE id = ?2",
                rusqlite::params![first_write - 60, saved.id.to_string()],
            )
            .unwrap();
        }

        saved.expiry_date = OffsetDateTime::now_utc() + Duration::days(7);
        store.save(&saved).await.unwrap();
        assert_eq!(updated_at(&pool, &saved.id), first_write - 60);
    }

    #[tokio::test]
    async fn changed_data_is_written_despite_touch_interval() {
        let pool = pool_with_schema();
        let store = SqliteSessionStore::new(Arc::clone(&pool)).with_touch_after(3600);
        let mut saved = record(Duration::days(7));
        store.create(&mut saved).await.unwrap();

        {
            let conn = pool.get().unwrap();
            conn.execute(
                "UPDATE sessions SET updated_at = 0 WHERE id = ?1",
                [saved.id.to_string()],
            )
            .unwrap();
        }

        saved
            .data
            .insert("flash_success".to_string(), serde_json::json!(["saved"]));
        store.save(&saved).await.unwrap();

        let loaded = store.load(&saved.id).await.unwrap().unwrap();
        assert!(loaded.data.contains_key("flash_success"));
        assert_ne!(updated_at(&pool, &saved.id), 0);
    }

    #[tokio::test]
    async fn idle_session_is_rewritten_after_interval() {
        let pool = pool_with_schema();
        let store = SqliteSessionStore::new(Arc::clone(&pool)).with_touch_after(30);
        let mut saved = record(Duration::days(7));
        store.create(&mut saved).await.unwrap();

        {
            let conn = pool.get().unwrap();
            conn.execute(
                "UPDATE sessions SET updated_at = 0 WHERE id = ?1",
                [saved.id.to_string()],
            )
            .unwrap();
        }

        store.save(&saved).await.unwrap();
        assert_ne!(updated_at(&pool, &saved.id), 0);
    }

    #[tokio::test]
    async fn delete_expired_purges_old_rows() {
        let pool = pool_with_schema();
        let store = SqliteSessionStore::new(Arc::clone(&pool));
        let mut live = record(Duration::days(1));
        let mut dead = record(Duration::seconds(-1));
        store.create(&mut live).await.unwrap();
        store.create(&mut dead).await.unwrap();

        store.delete_expired().await.unwrap();

        let conn = pool.get().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let store = SqliteSessionStore::new(pool_with_schema());
        let mut saved = record(Duration::days(1));
        store.create(&mut saved).await.unwrap();

        store.delete(&saved.id).await.unwrap();
        assert!(store.load(&saved.id).await.unwrap().is_none());
    }
}
