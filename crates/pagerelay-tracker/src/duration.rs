//! Visit-duration accumulation.

use std::time::{Duration, Instant};

use tracing::debug;

use pagerelay_protocols::VisitRecord;

/// Minimum visible stay before a visit record is created. Bounces shorter
/// than this never reach the log.
pub const CREATION_THRESHOLD: Duration = Duration::from_secs(5);

/// Cadence at which the caller should persist the running duration.
pub const AUTOSAVE_INTERVAL: Duration = Duration::from_secs(30);

/// Cadence at which the caller should tick the tracker.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Page metadata captured when the record is created.
#[derive(Debug, Clone)]
pub struct VisitMeta {
    pub url: String,
    pub title: String,
    pub favicon_url: String,
    pub content: String,
    pub domain: String,
}

/// A pending `update_duration` write for the visit store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationUpdate {
    pub id: i64,
    pub duration_secs: i64,
    pub last_update: i64,
}

/// Visibility-aware duration counter for one followed page.
///
/// Time only accumulates while the page is visible. The tracker itself never
/// touches a store: `tick` hands back the record to insert exactly once, and
/// `flush`/`finalize` hand back the update to write.
pub struct DurationTracker {
    meta: VisitMeta,
    accumulated: Duration,
    /// Set while the page is visible; the point accumulation resumes from.
    mark: Option<Instant>,
    record_id: Option<i64>,
}

impl DurationTracker {
    pub fn new(meta: VisitMeta, visible: bool, now: Instant) -> Self {
        Self {
            meta,
            accumulated: Duration::ZERO,
            mark: visible.then_some(now),
            record_id: None,
        }
    }

    /// Whole seconds accumulated so far.
    pub fn duration_secs(&self) -> i64 {
        self.accumulated.as_secs() as i64
    }

    /// The created record's id, once the threshold has been crossed.
    pub fn record_id(&self) -> Option<i64> {
        self.record_id
    }

    /// Fold elapsed visible time into the accumulator and restart the mark.
    fn fold(&mut self, now: Instant) {
        if let Some(mark) = self.mark {
            self.accumulated += now.saturating_duration_since(mark);
            self.mark = Some(now);
        }
    }

    /// Periodic tick. Returns the visit record to insert the first time the
    /// accumulated stay crosses [`CREATION_THRESHOLD`]; `None` otherwise.
    pub fn tick(&mut self, now: Instant, now_ms: i64) -> Option<VisitRecord> {
        self.fold(now);

        if self.record_id.is_some() || self.accumulated < CREATION_THRESHOLD {
            return None;
        }

        self.record_id = Some(now_ms);
        debug!(
            "Visit record created for {} after {}s",
            self.meta.url,
            self.duration_secs()
        );

        Some(VisitRecord {
            id: now_ms,
            url: self.meta.url.clone(),
            title: self.meta.title.clone(),
            favicon_url: self.meta.favicon_url.clone(),
            content: self.meta.content.clone(),
            domain: self.meta.domain.clone(),
            visit_time: now_ms,
            duration_secs: self.duration_secs(),
            last_update: now_ms,
        })
    }

    /// Visibility change. Hiding folds the elapsed time; showing restarts
    /// the mark.
    pub fn set_visible(&mut self, visible: bool, now: Instant) {
        match (self.mark.is_some(), visible) {
            (true, false) => {
                self.fold(now);
                self.mark = None;
                debug!("Page hidden at {}s", self.duration_secs());
            }
            (false, true) => {
                self.mark = Some(now);
                debug!("Page visible, resuming");
            }
            _ => {}
        }
    }

    /// The periodic persistence payload, when there is a record and time on
    /// the clock.
    pub fn flush(&self, now_ms: i64) -> Option<DurationUpdate> {
        let id = self.record_id?;
        if self.accumulated.is_zero() {
            return None;
        }
        Some(DurationUpdate {
            id,
            duration_secs: self.duration_secs(),
            last_update: now_ms,
        })
    }

    /// Final fold-and-flush on teardown.
    pub fn finalize(&mut self, now: Instant, now_ms: i64) -> Option<DurationUpdate> {
        self.fold(now);
        self.flush(now_ms)
    }
}

#[cfg(test)]
#[path = "duration_tests.rs"]
mod tests;
