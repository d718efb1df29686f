//! Step timing constants.

use std::time::Duration;

/// Delays and polling bounds for one automation run.
///
/// Defaults are the production values; tests shrink them freely.
#[derive(Debug, Clone, Copy)]
pub struct Timing {
    /// Spacing between element polls.
    pub poll_interval: Duration,
    /// Bounded-wait attempt cap.
    pub max_attempts: u32,
    /// Delay before clicking the secondary-action toggle.
    pub secondary_action_delay: Duration,
    /// Delay after clicking the secondary-action toggle.
    pub secondary_action_response: Duration,
    /// Delay between injection and submission.
    pub submit_delay: Duration,
    /// Delay between submission and blurring the input.
    pub blur_delay: Duration,
    /// Spacing between result-panel polls.
    pub result_poll_interval: Duration,
    /// Delay before dismissing the settings overlay.
    pub overlay_dismiss_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            max_attempts: 50,
            secondary_action_delay: Duration::from_millis(1000),
            secondary_action_response: Duration::from_millis(300),
            submit_delay: Duration::from_millis(200),
            blur_delay: Duration::from_millis(1000),
            result_poll_interval: Duration::from_millis(1000),
            overlay_dismiss_delay: Duration::from_millis(500),
        }
    }
}
