//! Bounded element waiting.

use std::time::Duration;

use tracing::trace;

use pagerelay_protocols::{ElementHandle, PageBackend};

use crate::error::EngineError;

/// Poll the live document for `locator` at fixed `interval` spacing.
///
/// Returns on the first successful match; fails with
/// [`EngineError::ElementNotFound`] after `max_attempts` unsuccessful polls.
/// The first poll happens only after one interval has elapsed - there is no
/// eager immediate check. Dropping the future cancels the wait cleanly.
pub async fn wait_for(
    page: &dyn PageBackend,
    locator: &str,
    max_attempts: u32,
    interval: Duration,
) -> Result<ElementHandle, EngineError> {
    for attempt in 1..=max_attempts {
        tokio::time::sleep(interval).await;

        if let Some(element) = page.query(locator).await? {
            trace!("Found {} on attempt {}", locator, attempt);
            return Ok(element);
        }
        trace!("Attempt {}/{} missed {}", attempt, max_attempts, locator);
    }

    Err(EngineError::ElementNotFound {
        locator: locator.to_string(),
        attempts: max_attempts,
    })
}

#[cfg(test)]
#[path = "waiter_tests.rs"]
mod tests;
