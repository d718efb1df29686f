//! Store protocol definitions.
//!
//! Three stores back the system: a transient single-slot task store (one
//! staged payload, consumed by the next automation run), a durable settings
//! store, and the append-only visit log.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::{AutomationTask, Settings, VisitRecord};

/// Transient staged-task store. Holds at most one task.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Stage a task, replacing any previously staged one.
    async fn stage(&self, task: AutomationTask) -> Result<(), StoreError>;

    /// Read the staged task without consuming it. `None` when nothing is
    /// staged or the staged payload is empty.
    async fn load(&self) -> Result<Option<AutomationTask>, StoreError>;

    /// Drop the staged task. Idempotent.
    async fn clear(&self) -> Result<(), StoreError>;
}

/// Durable settings store. Missing values fall back to [`Settings::default`].
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn load(&self) -> Result<Settings, StoreError>;

    async fn save(&self, settings: &Settings) -> Result<(), StoreError>;
}

/// Append-only visit log.
#[async_trait]
pub trait VisitStore: Send + Sync {
    /// Insert a new record. Never overwrites an existing id.
    async fn insert(&self, record: VisitRecord) -> Result<(), StoreError>;

    /// Update the accumulated duration of an existing record.
    async fn update_duration(
        &self,
        id: i64,
        duration_secs: i64,
        last_update: i64,
    ) -> Result<(), StoreError>;

    /// Records in descending visit-time order, optionally capped.
    async fn list_recent(&self, limit: Option<usize>) -> Result<Vec<VisitRecord>, StoreError>;

    /// Delete one record. Deleting a missing id is not an error.
    async fn delete(&self, id: i64) -> Result<(), StoreError>;

    /// Delete all records.
    async fn clear(&self) -> Result<(), StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;
}
