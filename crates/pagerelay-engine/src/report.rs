//! Run outcome reporting.
//!
//! Every automation run produces a report; nothing about the run is
//! observable only through logs.

use serde::Serialize;

/// How the submission step completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Submission {
    /// The submit control was clicked.
    Clicked,
    /// The control was absent; a synthesized Enter key was dispatched.
    EnterKey,
}

/// Why a run took no action. Expected outcomes, not failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The run guard was already set for this page load.
    AlreadyRan,
    /// No payload text was staged.
    NoTask,
    /// The page's origin is not in the engine registry.
    UnknownOrigin,
}

/// Result of one orchestrated run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum RunReport {
    /// The full sequence ran and the task was cleared.
    Completed { submission: Submission },
    /// A no-op condition ended the run before any page mutation.
    Skipped { reason: SkipReason },
    /// A step failed; the run was contained and aborted.
    Failed { error: String },
}

impl RunReport {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunReport::Completed { .. })
    }
}

impl std::fmt::Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunReport::Completed {
                submission: Submission::Clicked,
            } => write!(f, "completed (submit clicked)"),
            RunReport::Completed {
                submission: Submission::EnterKey,
            } => write!(f, "completed (Enter key fallback)"),
            RunReport::Skipped {
                reason: SkipReason::AlreadyRan,
            } => write!(f, "skipped: already ran for this page"),
            RunReport::Skipped {
                reason: SkipReason::NoTask,
            } => write!(f, "skipped: no staged task"),
            RunReport::Skipped {
                reason: SkipReason::UnknownOrigin,
            } => write!(f, "skipped: origin not supported"),
            RunReport::Failed { error } => write!(f, "failed: {}", error),
        }
    }
}
