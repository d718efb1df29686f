//! The `send` command: capture, stage, open the engine page, automate.

use std::io::Read;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tracing::info;

use pagerelay_cdp::{CdpClient, CdpError, CdpPage};
use pagerelay_engine::{Orchestrator, RunReport};
use pagerelay_protocols::{AutomationTask, PageBackend, SettingsStore, TaskStore};
use pagerelay_store::SqliteStore;

pub async fn run(
    cdp: &str,
    store: SqliteStore,
    engine: Option<String>,
    text: Option<String>,
    from_url: Option<String>,
    raw: bool,
) -> Result<()> {
    let settings = SettingsStore::load(&store).await?;

    let engine_name = engine.unwrap_or_else(|| settings.favorite_engine.clone());
    let engine = pagerelay_engine::by_name(&engine_name)
        .with_context(|| format!("Unknown engine '{}'", engine_name))?;

    let client = CdpClient::connect(cdp)
        .await
        .context("Connecting to the browser")?;

    let payload = capture_payload(&client, text, from_url).await?;
    if payload.is_empty() {
        bail!("Nothing to send: the captured payload is empty");
    }
    info!("Captured {} characters", payload.len());

    let task = if raw {
        AutomationTask::raw(payload)
    } else {
        AutomationTask::new(payload)
    };
    store.stage(task).await?;

    // Reuse an open engine tab when there is one, otherwise open a fresh
    // conversation.
    let session = match client.find_page_by_host(engine.origin).await {
        Ok(session) => session,
        Err(CdpError::PageNotFound(_)) => {
            info!("Opening {}", engine.open_url);
            client.open_page(engine.open_url).await?
        }
        Err(e) => return Err(e.into()),
    };
    session.wait_for_load().await?;
    let page = CdpPage::attach(session).await?;

    let orchestrator = Orchestrator::new(Arc::new(store.clone()), Arc::new(store));
    let report = orchestrator.run(&page).await;
    println!("{}", report);

    match report {
        RunReport::Failed { error } => bail!("Automation failed: {}", error),
        _ => Ok(()),
    }
}

/// Resolve the payload: a literal, the visible text of an open page, or
/// stdin.
async fn capture_payload(
    client: &CdpClient,
    text: Option<String>,
    from_url: Option<String>,
) -> Result<String> {
    if let Some(text) = text {
        return Ok(text.trim().to_string());
    }

    if let Some(url) = from_url {
        let host = url::Url::parse(&url)
            .with_context(|| format!("Invalid URL '{}'", url))?
            .host_str()
            .with_context(|| format!("URL '{}' has no host", url))?
            .to_string();

        let session = match client.find_page_by_host(&host).await {
            Ok(session) => session,
            Err(CdpError::PageNotFound(_)) => {
                let session = client.open_page(&url).await?;
                session.wait_for_load().await?;
                session
            }
            Err(e) => return Err(e.into()),
        };
        let page = CdpPage::attach(session).await?;
        return Ok(page.visible_text().await?);
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Reading payload from stdin")?;
    Ok(buffer.trim().to_string())
}
