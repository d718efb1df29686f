//! Post-submit hooks, dispatched per engine variant.

use std::time::Duration;

use tracing::debug;

use pagerelay_protocols::PageBackend;

use crate::error::EngineError;
use crate::registry::{EngineConfig, PostSubmit};
use crate::timing::Timing;

/// Run the engine's post-submit behavior.
pub async fn run(
    page: &dyn PageBackend,
    engine: &EngineConfig,
    timing: &Timing,
    result_wait_ceiling: Option<Duration>,
) -> Result<(), EngineError> {
    match engine.post_submit {
        PostSubmit::Default => {
            focus_result_panel(page, engine, timing, result_wait_ceiling).await
        }
        PostSubmit::ClosesOverlayPanel { dismiss_locator } => {
            focus_result_panel(page, engine, timing, result_wait_ceiling).await?;
            dismiss_overlay(page, dismiss_locator, timing).await
        }
    }
}

/// Wait for the result panel, then focus it, scroll it into view, and click
/// it so the host page treats it as the active reading area.
///
/// Result rendering time is unpredictable, so this wait has no attempt cap -
/// unlike the bounded input wait, giving up here could only abandon a
/// submission that already happened. An optional ceiling bounds the wait for
/// callers that want one; hitting it ends the hook quietly, never the run.
async fn focus_result_panel(
    page: &dyn PageBackend,
    engine: &EngineConfig,
    timing: &Timing,
    ceiling: Option<Duration>,
) -> Result<(), EngineError> {
    let deadline = ceiling.map(|c| tokio::time::Instant::now() + c);

    let panel = loop {
        if let Some(panel) = page.query(engine.result_panel_locator).await? {
            break panel;
        }
        if let Some(deadline) = deadline {
            if tokio::time::Instant::now() >= deadline {
                debug!(
                    "Result panel {} not seen within ceiling, leaving it be",
                    engine.result_panel_locator
                );
                return Ok(());
            }
        }
        tokio::time::sleep(timing.result_poll_interval).await;
    };

    debug!("Result panel {} resolved", engine.result_panel_locator);
    page.focus(&panel).await?;
    page.scroll_into_view(&panel).await?;
    page.click(&panel).await?;
    Ok(())
}

/// Dismiss the auxiliary settings overlay if it is open. Absence of the
/// dismiss control means the overlay was already closed or never opened.
async fn dismiss_overlay(
    page: &dyn PageBackend,
    dismiss_locator: &str,
    timing: &Timing,
) -> Result<(), EngineError> {
    tokio::time::sleep(timing.overlay_dismiss_delay).await;

    match page.query(dismiss_locator).await? {
        Some(button) => {
            page.click(&button).await?;
            debug!("Dismissed settings overlay via {}", dismiss_locator);
        }
        None => {
            debug!("No settings overlay to dismiss");
        }
    }
    Ok(())
}
