//! History queries over the visit log.
//!
//! Pure functions: the caller loads records from the store and buckets or
//! filters them here. Timestamps are epoch milliseconds; bucketing uses the
//! local timezone, with reference dates passed in so the grouping is
//! deterministic under test.

use std::collections::BTreeSet;

use chrono::{Datelike, Local, NaiveDate, TimeZone, Timelike};

use pagerelay_protocols::VisitRecord;

/// Local calendar date of an epoch-millisecond timestamp.
pub fn local_date(ms: i64) -> Option<NaiveDate> {
    Local
        .timestamp_millis_opt(ms)
        .single()
        .map(|dt| dt.date_naive())
}

/// Local hour (0-23) of an epoch-millisecond timestamp.
pub fn local_hour(ms: i64) -> Option<u32> {
    Local.timestamp_millis_opt(ms).single().map(|dt| dt.hour())
}

/// Timeline label for a visit date relative to `today`: Today, Yesterday,
/// the weekday name within the last week, or the full date.
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        return "Today".to_string();
    }
    if Some(date) == today.pred_opt() {
        return "Yesterday".to_string();
    }
    let week_ago = today - chrono::Days::new(7);
    if date > week_ago && date < today {
        return date.format("%A").to_string();
    }
    date.format("%Y-%m-%d").to_string()
}

/// Group records into labeled day buckets, newest first. Records inside a
/// bucket keep descending visit-time order.
pub fn group_by_day<'a>(
    records: &'a [VisitRecord],
    today: NaiveDate,
) -> Vec<(String, Vec<&'a VisitRecord>)> {
    let mut sorted: Vec<&VisitRecord> = records.iter().collect();
    sorted.sort_by_key(|r| std::cmp::Reverse(r.visit_time));

    let mut groups: Vec<(String, Vec<&VisitRecord>)> = Vec::new();
    for record in sorted {
        let Some(date) = local_date(record.visit_time) else {
            continue;
        };
        let label = day_label(date, today);
        match groups.last_mut() {
            Some((last, bucket)) if *last == label => bucket.push(record),
            _ => groups.push((label, vec![record])),
        }
    }
    groups
}

/// Days of the given month that have at least one visit. Drives the
/// calendar grid.
pub fn calendar_days(records: &[VisitRecord], year: i32, month: u32) -> BTreeSet<u32> {
    records
        .iter()
        .filter_map(|r| local_date(r.visit_time))
        .filter(|d| d.year() == year && d.month() == month)
        .map(|d| d.day())
        .collect()
}

/// Visit counts by local hour of day.
pub fn hour_histogram(records: &[VisitRecord]) -> [u32; 24] {
    let mut buckets = [0u32; 24];
    for record in records {
        if let Some(hour) = local_hour(record.visit_time) {
            buckets[hour as usize] += 1;
        }
    }
    buckets
}

/// Case-insensitive substring search over title, url, domain, and content.
pub fn search<'a>(records: &'a [VisitRecord], query: &str) -> Vec<&'a VisitRecord> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|r| {
            r.title.to_lowercase().contains(&needle)
                || r.url.to_lowercase().contains(&needle)
                || r.domain.to_lowercase().contains(&needle)
                || r.content.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Conjunctive record filter.
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    /// Keep visits on this local date.
    pub day: Option<NaiveDate>,
    /// Keep visits starting in this local hour.
    pub hour: Option<u32>,
    /// Keep visits at least this long.
    pub min_duration_secs: Option<i64>,
    /// Keep visits at or after this timestamp.
    pub since_ms: Option<i64>,
}

impl HistoryFilter {
    /// Quick filter: today's visits.
    pub fn today(today: NaiveDate) -> Self {
        Self {
            day: Some(today),
            ..Self::default()
        }
    }

    /// Quick filter: visits in the last `days` days before `today`.
    pub fn last_days(today: NaiveDate, days: u64) -> Self {
        let since = (today - chrono::Days::new(days))
            .and_hms_opt(0, 0, 0)
            .and_then(|dt| dt.and_local_timezone(Local).single())
            .map(|dt| dt.timestamp_millis());
        Self {
            since_ms: since,
            ..Self::default()
        }
    }

    /// Quick filter: long visits.
    pub fn long_visits(min_secs: i64) -> Self {
        Self {
            min_duration_secs: Some(min_secs),
            ..Self::default()
        }
    }

    pub fn matches(&self, record: &VisitRecord) -> bool {
        if let Some(day) = self.day {
            if local_date(record.visit_time) != Some(day) {
                return false;
            }
        }
        if let Some(hour) = self.hour {
            if local_hour(record.visit_time) != Some(hour) {
                return false;
            }
        }
        if let Some(min) = self.min_duration_secs {
            if record.duration_secs < min {
                return false;
            }
        }
        if let Some(since) = self.since_ms {
            if record.visit_time < since {
                return false;
            }
        }
        true
    }
}

/// Apply a filter, keeping input order.
pub fn filter<'a>(records: &'a [VisitRecord], filter: &HistoryFilter) -> Vec<&'a VisitRecord> {
    records.iter().filter(|r| filter.matches(r)).collect()
}

/// Summary stats over a record set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryStats {
    pub total: usize,
    pub total_duration_secs: i64,
    pub distinct_domains: usize,
}

pub fn stats(records: &[VisitRecord]) -> HistoryStats {
    let domains: BTreeSet<&str> = records.iter().map(|r| r.domain.as_str()).collect();
    HistoryStats {
        total: records.len(),
        total_duration_secs: records.iter().map(|r| r.duration_secs).sum(),
        distinct_domains: domains.len(),
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
