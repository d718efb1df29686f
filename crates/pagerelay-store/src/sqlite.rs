//! SQLite-backed store implementation.

use std::path::Path;

use async_trait::async_trait;
use rusqlite::{OptionalExtension, params};
use tokio_rusqlite::Connection;
use tracing::debug;

use pagerelay_protocols::{
    AutomationTask, Settings, SettingsStore, StoreError, TaskStore, VisitRecord, VisitStore,
};

use crate::schema::init_schema;

#[cfg(test)]
#[path = "sqlite_tests.rs"]
mod tests;

/// One database handle backing all three store contracts.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open an in-memory database (used by tests).
    pub async fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Self::init(conn).await
    }

    /// Open (or create) a file-backed database.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(path)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Self::init(conn).await
    }

    async fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.call(|conn| Ok(init_schema(conn)?))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl TaskStore for SqliteStore {
    async fn stage(&self, task: AutomationTask) -> Result<(), StoreError> {
        self.conn
            .call(move |conn| {
                conn.execute(
                    "INSERT OR REPLACE INTO staged_task (id, payload_text, skip_template_prefix)
                     VALUES (1, ?1, ?2)",
                    params![task.payload_text, task.skip_template_prefix as i64],
                )?;
                Ok(())
            })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        debug!("Staged task");
        Ok(())
    }

    async fn load(&self) -> Result<Option<AutomationTask>, StoreError> {
        let task = self
            .conn
            .call(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT payload_text, skip_template_prefix FROM staged_task WHERE id = 1",
                )?;
                let task = stmt
                    .query_row([], |row| {
                        let payload_text: String = row.get(0)?;
                        let skip: i64 = row.get(1)?;
                        Ok(AutomationTask {
                            payload_text,
                            skip_template_prefix: skip != 0,
                        })
                    })
                    .optional()?;
                Ok(task)
            })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(task.filter(|t| !t.payload_text.is_empty()))
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.conn
            .call(|conn| {
                conn.execute("DELETE FROM staged_task", [])?;
                Ok(())
            })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        debug!("Cleared staged task");
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for SqliteStore {
    async fn load(&self) -> Result<Settings, StoreError> {
        let map = self
            .conn
            .call(|conn| {
                let mut stmt = conn.prepare("SELECT key, value FROM settings")?;
                let rows = stmt.query_map([], |row| {
                    let key: String = row.get(0)?;
                    let value: String = row.get(1)?;
                    Ok((key, value))
                })?;

                let mut map = serde_json::Map::new();
                for row in rows {
                    let (key, value) = row?;
                    if let Ok(value) = serde_json::from_str(&value) {
                        map.insert(key, value);
                    }
                }
                Ok(map)
            })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        // Missing or unreadable keys fall back to the defaults.
        Ok(serde_json::from_value(serde_json::Value::Object(map)).unwrap_or_default())
    }

    async fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        let value = serde_json::to_value(settings)
            .map_err(|e| StoreError::Query(e.to_string()))?;
        let serde_json::Value::Object(map) = value else {
            return Err(StoreError::Query("Settings did not serialize to a map".to_string()));
        };

        self.conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                for (key, value) in &map {
                    tx.execute(
                        "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
                        params![key, value.to_string()],
                    )?;
                }
                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        debug!("Saved settings");
        Ok(())
    }
}

#[async_trait]
impl VisitStore for SqliteStore {
    async fn insert(&self, record: VisitRecord) -> Result<(), StoreError> {
        self.conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO visits
                         (id, url, title, favicon_url, content, domain,
                          visit_time, duration_secs, last_update)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                    params![
                        record.id,
                        record.url,
                        record.title,
                        record.favicon_url,
                        record.content,
                        record.domain,
                        record.visit_time,
                        record.duration_secs,
                        record.last_update,
                    ],
                )?;
                Ok(())
            })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(())
    }

    async fn update_duration(
        &self,
        id: i64,
        duration_secs: i64,
        last_update: i64,
    ) -> Result<(), StoreError> {
        self.conn
            .call(move |conn| {
                conn.execute(
                    "UPDATE visits SET duration_secs = ?2, last_update = ?3 WHERE id = ?1",
                    params![id, duration_secs, last_update],
                )?;
                Ok(())
            })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(())
    }

    async fn list_recent(&self, limit: Option<usize>) -> Result<Vec<VisitRecord>, StoreError> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, url, title, favicon_url, content, domain,
                            visit_time, duration_secs, last_update
                     FROM visits
                     ORDER BY visit_time DESC
                     LIMIT ?1",
                )?;
                let limit = limit.map(|l| l as i64).unwrap_or(-1);
                let rows = stmt.query_map([limit], |row| {
                    Ok(VisitRecord {
                        id: row.get(0)?,
                        url: row.get(1)?,
                        title: row.get(2)?,
                        favicon_url: row.get(3)?,
                        content: row.get(4)?,
                        domain: row.get(5)?,
                        visit_time: row.get(6)?,
                        duration_secs: row.get(7)?,
                        last_update: row.get(8)?,
                    })
                })?;
                Ok(rows.collect::<Result<Vec<_>, _>>()?)
            })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        self.conn
            .call(move |conn| {
                conn.execute("DELETE FROM visits WHERE id = ?1", params![id])?;
                Ok(())
            })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.conn
            .call(|conn| {
                conn.execute("DELETE FROM visits", [])?;
                Ok(())
            })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.conn
            .call(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM visits", [], |row| row.get(0))?;
                Ok(count as u64)
            })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))
    }
}
