//! PageRelay visit tracking.
//!
//! [`DurationTracker`] is the visibility-aware counter behind the visit log:
//! it folds visible wall time into an accumulated duration, creates the
//! visit record once a stay crosses the creation threshold, and hands the
//! caller flush payloads on a fixed cadence. The clock is always passed in,
//! so the bookkeeping is plain testable state.
//!
//! The `history` module holds the pure query operations over the log:
//! day grouping, calendar day-sets, hour histograms, text search, filters,
//! and stats.

mod duration;
pub mod history;

pub use duration::{
    AUTOSAVE_INTERVAL, CREATION_THRESHOLD, DurationTracker, DurationUpdate, TICK_INTERVAL,
    VisitMeta,
};
