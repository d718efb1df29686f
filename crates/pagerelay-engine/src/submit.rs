//! Submission trigger: native click with a keyboard fallback.

use tracing::debug;

use pagerelay_protocols::{ElementHandle, PageBackend};

use crate::error::EngineError;
use crate::report::Submission;

/// Attempt to click the submit control matching `submit_locator`.
///
/// Some engines replace or hide their submit affordance intermittently, so a
/// missing control is not a failure: a synthesized `Enter` key-down on the
/// input element is dispatched instead. Single attempt, single fallback - no
/// retry loop.
pub async fn submit(
    page: &dyn PageBackend,
    submit_locator: &str,
    input: &ElementHandle,
) -> Result<Submission, EngineError> {
    if let Some(button) = page.query(submit_locator).await? {
        page.click(&button).await?;
        debug!("Clicked submit control {}", submit_locator);
        return Ok(Submission::Clicked);
    }

    debug!(
        "Submit control {} absent, falling back to Enter key",
        submit_locator
    );
    page.press_enter(input).await?;
    Ok(Submission::EnterKey)
}
