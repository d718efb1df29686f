//! The `track` command: follow a page and record its visit duration.

use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, info, warn};

use pagerelay_cdp::{CdpClient, CdpError, CdpPage};
use pagerelay_protocols::{PageBackend, SettingsStore, VisitStore};
use pagerelay_store::SqliteStore;
use pagerelay_tracker::{AUTOSAVE_INTERVAL, DurationTracker, TICK_INTERVAL, VisitMeta};

pub async fn run(cdp: &str, store: SqliteStore, url: &str) -> Result<()> {
    let settings = SettingsStore::load(&store).await?;
    if !settings.tracking_enabled {
        println!("Visit tracking is disabled. Enable it with:");
        println!("  pagerelay config set --tracking-enabled true");
        return Ok(());
    }

    let host = url::Url::parse(url)
        .with_context(|| format!("Invalid URL '{}'", url))?
        .host_str()
        .with_context(|| format!("URL '{}' has no host", url))?
        .to_string();

    let client = CdpClient::connect(cdp)
        .await
        .context("Connecting to the browser")?;
    let session = match client.find_page_by_host(&host).await {
        Ok(session) => session,
        Err(CdpError::PageNotFound(_)) => {
            info!("Opening {}", url);
            let session = client.open_page(url).await?;
            session.wait_for_load().await?;
            session
        }
        Err(e) => return Err(e.into()),
    };
    let page = CdpPage::attach(session).await?;

    let metadata = page.metadata().await?;
    let content = page.visible_text().await.unwrap_or_default();
    let meta = VisitMeta {
        url: metadata.url,
        title: metadata.title,
        favicon_url: metadata.favicon_url,
        content,
        domain: metadata.domain,
    };
    info!("Tracking {} ({})", meta.url, meta.domain);

    let visible = page.session().is_visible().await.unwrap_or(true);
    let mut tracker = DurationTracker::new(meta, visible, Instant::now());

    let mut tick = tokio::time::interval_at(
        tokio::time::Instant::now() + TICK_INTERVAL,
        TICK_INTERVAL,
    );
    let mut autosave = tokio::time::interval_at(
        tokio::time::Instant::now() + AUTOSAVE_INTERVAL,
        AUTOSAVE_INTERVAL,
    );

    loop {
        tokio::select! {
            _ = tick.tick() => {
                // Page teardown ends the follow; the final flush still runs.
                let visible = match page.session().is_visible().await {
                    Ok(visible) => visible,
                    Err(e) => {
                        debug!("Page went away: {}", e);
                        break;
                    }
                };
                tracker.set_visible(visible, Instant::now());
                if let Some(record) = tracker.tick(Instant::now(), now_ms()) {
                    info!("Visit record {} created", record.id);
                    store.insert(record).await?;
                }
            }
            _ = autosave.tick() => {
                if let Some(update) = tracker.flush(now_ms()) {
                    debug!("Autosaving duration: {}s", update.duration_secs);
                    store
                        .update_duration(update.id, update.duration_secs, update.last_update)
                        .await?;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, finishing up");
                break;
            }
        }
    }

    if let Some(update) = tracker.finalize(Instant::now(), now_ms()) {
        if let Err(e) = store
            .update_duration(update.id, update.duration_secs, update.last_update)
            .await
        {
            warn!("Final duration write failed: {}", e);
        }
        println!("Recorded {}s for this visit", update.duration_secs);
    } else {
        println!("Visit shorter than the recording threshold, nothing saved");
    }

    Ok(())
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
