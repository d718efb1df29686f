//! Database schema management.

use rusqlite::Connection;
use tokio_rusqlite::Error;

/// Initialize the database schema.
pub fn init_schema(conn: &Connection) -> Result<(), Error> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

const SCHEMA: &str = r#"
-- Single-slot staged task (id is pinned to 1)
CREATE TABLE IF NOT EXISTS staged_task (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    payload_text TEXT NOT NULL,
    skip_template_prefix INTEGER NOT NULL DEFAULT 0
);

-- Durable settings, one JSON-encoded value per key
CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

-- Append-only visit log
CREATE TABLE IF NOT EXISTS visits (
    id INTEGER PRIMARY KEY,
    url TEXT NOT NULL,
    title TEXT NOT NULL,
    favicon_url TEXT NOT NULL DEFAULT '',
    content TEXT NOT NULL DEFAULT '',
    domain TEXT NOT NULL,
    visit_time INTEGER NOT NULL,
    duration_secs INTEGER NOT NULL DEFAULT 0,
    last_update INTEGER NOT NULL
);

-- Indexes for the history queries
CREATE INDEX IF NOT EXISTS idx_visits_time ON visits(visit_time);
CREATE INDEX IF NOT EXISTS idx_visits_domain ON visits(domain);
CREATE INDEX IF NOT EXISTS idx_visits_duration ON visits(duration_secs);
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_creation() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        for table in ["staged_task", "settings", "visits"] {
            let mut stmt = conn
                .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")
                .unwrap();
            assert!(stmt.exists([table]).unwrap(), "missing table {}", table);
        }
    }

    #[test]
    fn test_schema_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();
    }
}
