use super::*;

fn meta() -> VisitMeta {
    VisitMeta {
        url: "https://example.com/article".to_string(),
        title: "An Article".to_string(),
        favicon_url: "https://example.com/favicon.ico".to_string(),
        content: "article text".to_string(),
        domain: "example.com".to_string(),
    }
}

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

#[test]
fn test_no_record_before_threshold() {
    let start = Instant::now();
    let mut tracker = DurationTracker::new(meta(), true, start);

    for i in 1..5 {
        assert!(tracker.tick(start + secs(i), 1000 * i as i64).is_none());
    }
    assert!(tracker.record_id().is_none());
    assert_eq!(tracker.duration_secs(), 4);
}

#[test]
fn test_record_created_once_at_threshold() {
    let start = Instant::now();
    let mut tracker = DurationTracker::new(meta(), true, start);

    let record = tracker.tick(start + secs(5), 5000).unwrap();
    assert_eq!(record.id, 5000);
    assert_eq!(record.visit_time, 5000);
    assert_eq!(record.duration_secs, 5);
    assert_eq!(record.domain, "example.com");

    // Later ticks accumulate but never create a second record.
    assert!(tracker.tick(start + secs(6), 6000).is_none());
    assert_eq!(tracker.record_id(), Some(5000));
}

#[test]
fn test_hidden_time_is_not_accumulated() {
    let start = Instant::now();
    let mut tracker = DurationTracker::new(meta(), true, start);

    tracker.tick(start + secs(2), 2000);
    tracker.set_visible(false, start + secs(3));
    // A long stretch in a background tab.
    tracker.tick(start + secs(60), 60_000);
    assert_eq!(tracker.duration_secs(), 3);
    assert!(tracker.record_id().is_none());

    tracker.set_visible(true, start + secs(100));
    let record = tracker.tick(start + secs(102), 102_000).unwrap();
    assert_eq!(record.duration_secs, 5);
}

#[test]
fn test_starts_hidden() {
    let start = Instant::now();
    let mut tracker = DurationTracker::new(meta(), false, start);

    assert!(tracker.tick(start + secs(30), 30_000).is_none());
    assert_eq!(tracker.duration_secs(), 0);
}

#[test]
fn test_flush_requires_record() {
    let start = Instant::now();
    let mut tracker = DurationTracker::new(meta(), true, start);

    tracker.tick(start + secs(2), 2000);
    assert!(tracker.flush(2000).is_none());

    tracker.tick(start + secs(7), 7000);
    let update = tracker.flush(8000).unwrap();
    assert_eq!(
        update,
        DurationUpdate {
            id: 7000,
            duration_secs: 7,
            last_update: 8000,
        }
    );
}

#[test]
fn test_finalize_folds_the_tail() {
    let start = Instant::now();
    let mut tracker = DurationTracker::new(meta(), true, start);

    tracker.tick(start + secs(6), 6000);
    // Three more visible seconds that no tick has folded yet.
    let update = tracker.finalize(start + secs(9), 9000).unwrap();
    assert_eq!(update.duration_secs, 9);
    assert_eq!(update.last_update, 9000);
}

#[test]
fn test_redundant_visibility_changes_are_no_ops() {
    let start = Instant::now();
    let mut tracker = DurationTracker::new(meta(), true, start);

    tracker.set_visible(true, start + secs(1));
    tracker.tick(start + secs(2), 2000);
    assert_eq!(tracker.duration_secs(), 2);

    tracker.set_visible(false, start + secs(3));
    tracker.set_visible(false, start + secs(10));
    assert_eq!(tracker.duration_secs(), 3);
}
