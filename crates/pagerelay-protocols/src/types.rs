//! Shared data types.

use serde::{Deserialize, Serialize};

/// One staged automation task. Created when text is captured, consumed
/// exactly once by the orchestrator, never persisted past a single run.
///
/// Invariant: `payload_text` is non-empty - callers must not stage an empty
/// payload, and the stores treat an empty payload as "no task".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationTask {
    /// Text to deliver into the engine's input.
    pub payload_text: String,

    /// Skip the configured template prefix and send the payload verbatim.
    #[serde(default)]
    pub skip_template_prefix: bool,
}

impl AutomationTask {
    pub fn new(payload_text: impl Into<String>) -> Self {
        Self {
            payload_text: payload_text.into(),
            skip_template_prefix: false,
        }
    }

    pub fn raw(payload_text: impl Into<String>) -> Self {
        Self {
            payload_text: payload_text.into(),
            skip_template_prefix: true,
        }
    }
}

/// Durable user settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Instruction template prepended to the payload unless the task opts out.
    #[serde(default)]
    pub template_prefix: String,

    /// Enable the per-engine secondary action (deep-thinking toggle) when the
    /// engine defines one.
    #[serde(default)]
    pub secondary_action_enabled: bool,

    /// Enable visit-duration tracking.
    #[serde(default)]
    pub tracking_enabled: bool,

    /// Engine used when the CLI does not name one.
    #[serde(default = "default_engine")]
    pub favorite_engine: String,
}

fn default_engine() -> String {
    "qwen".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            template_prefix: String::new(),
            secondary_action_enabled: false,
            tracking_enabled: false,
            favorite_engine: default_engine(),
        }
    }
}

/// One row of the append-only visit log.
///
/// Only `duration_secs` and `last_update` are ever updated after insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitRecord {
    /// Record id: epoch milliseconds at creation time.
    pub id: i64,
    pub url: String,
    pub title: String,
    pub favicon_url: String,
    /// Normalized visible text captured at creation.
    pub content: String,
    pub domain: String,
    /// Epoch milliseconds of the visit start.
    pub visit_time: i64,
    /// Accumulated visible time, whole seconds.
    pub duration_secs: i64,
    /// Epoch milliseconds of the last duration update.
    pub last_update: i64,
}
