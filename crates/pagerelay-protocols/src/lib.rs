//! # PageRelay Protocols
//!
//! Core contract definitions (traits and shared types) for PageRelay.
//! Contains only interfaces and data types - no implementations.
//!
//! ## Core Traits
//!
//! - [`PageBackend`] - Trait for host-page access (DOM queries and input)
//! - [`TaskStore`] - Trait for the transient staged-task store
//! - [`SettingsStore`] - Trait for the durable settings store
//! - [`VisitStore`] - Trait for the append-only visit log

pub mod error;
pub mod page;
pub mod store;
pub mod types;

pub use error::{PageError, StoreError};
pub use page::{ElementHandle, ElementKind, PageBackend};
pub use store::{SettingsStore, TaskStore, VisitStore};
pub use types::{AutomationTask, Settings, VisitRecord};
