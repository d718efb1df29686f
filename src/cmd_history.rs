//! The `history` commands: browse, search, and prune the visit log.

use anyhow::{Context, Result, bail};
use chrono::{Datelike, Local, NaiveDate, TimeZone};

use pagerelay_protocols::{VisitRecord, VisitStore};
use pagerelay_store::SqliteStore;
use pagerelay_tracker::history::{
    self, HistoryFilter, calendar_days, group_by_day, hour_histogram, stats,
};

use crate::cli::HistoryAction;

pub async fn run(store: SqliteStore, action: HistoryAction) -> Result<()> {
    match action {
        HistoryAction::List {
            limit,
            today,
            week,
            day,
            hour,
            min_duration,
        } => {
            let records = store.list_recent(limit).await?;
            let now = Local::now().date_naive();

            let mut filter = if today {
                HistoryFilter::today(now)
            } else if week {
                HistoryFilter::last_days(now, 7)
            } else {
                HistoryFilter::default()
            };
            if let Some(day) = day {
                filter.day = Some(
                    NaiveDate::parse_from_str(&day, "%Y-%m-%d")
                        .with_context(|| format!("Invalid date '{}'", day))?,
                );
            }
            filter.hour = hour;
            if min_duration.is_some() {
                filter.min_duration_secs = min_duration;
            }

            let kept: Vec<VisitRecord> = history::filter(&records, &filter)
                .into_iter()
                .cloned()
                .collect();
            if kept.is_empty() {
                println!("No visits recorded");
                return Ok(());
            }

            for (label, bucket) in group_by_day(&kept, now) {
                println!("{}", label);
                for record in bucket {
                    print_record(record);
                }
            }
            Ok(())
        }

        HistoryAction::Search { query } => {
            let records = store.list_recent(None).await?;
            let hits = history::search(&records, &query);
            if hits.is_empty() {
                println!("No matches for '{}'", query);
                return Ok(());
            }
            for record in hits {
                print_record(record);
            }
            Ok(())
        }

        HistoryAction::Calendar { year, month } => {
            let now = Local::now();
            let year = year.unwrap_or_else(|| now.year());
            let month = month.unwrap_or_else(|| now.month());
            if !(1..=12).contains(&month) {
                bail!("Month must be 1-12");
            }

            let records = store.list_recent(None).await?;
            let days = calendar_days(&records, year, month);
            println!("{}-{:02}: {} day(s) with visits", year, month, days.len());
            for day in days {
                println!("  {}-{:02}-{:02}", year, month, day);
            }
            Ok(())
        }

        HistoryAction::Hours => {
            let records = store.list_recent(None).await?;
            let buckets = hour_histogram(&records);
            for (hour, count) in buckets.iter().enumerate() {
                if *count > 0 {
                    println!("{:02}:00  {:4}  {}", hour, count, "#".repeat(*count as usize));
                }
            }
            Ok(())
        }

        HistoryAction::Stats => {
            let records = store.list_recent(None).await?;
            let s = stats(&records);
            println!("Visits:          {}", s.total);
            println!("Total duration:  {}s", s.total_duration_secs);
            println!("Distinct sites:  {}", s.distinct_domains);
            Ok(())
        }

        HistoryAction::Delete { id } => {
            store.delete(id).await?;
            println!("Deleted {}", id);
            Ok(())
        }

        HistoryAction::Clear { yes } => {
            if !yes {
                bail!("Refusing to clear the visit log without --yes");
            }
            let count = store.count().await?;
            VisitStore::clear(&store).await?;
            println!("Cleared {} record(s)", count);
            Ok(())
        }
    }
}

fn print_record(record: &VisitRecord) {
    let time = Local
        .timestamp_millis_opt(record.visit_time)
        .single()
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string());
    println!(
        "  {}  [{}]  {}  ({}s)  {}",
        time, record.id, record.title, record.duration_secs, record.url
    );
}
