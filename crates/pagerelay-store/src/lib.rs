//! PageRelay SQLite stores.
//!
//! One database file backs the three store contracts from
//! `pagerelay-protocols`: the transient staged task (single slot), the
//! durable settings, and the append-only visit log.

mod schema;
mod sqlite;

pub use sqlite::SqliteStore;
