//! End-to-end automation orchestration for one page load.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{debug, info, warn};

use pagerelay_protocols::{PageBackend, SettingsStore, TaskStore};

use crate::error::EngineError;
use crate::registry;
use crate::report::{RunReport, SkipReason, Submission};
use crate::timing::Timing;
use crate::{hooks, inject, submit, waiter};

/// Orchestrator knobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrchestratorOptions {
    /// Optional outer bound on the result-panel wait. `None` preserves the
    /// unbounded wait.
    pub result_wait_ceiling: Option<Duration>,
}

/// Sequences one automation run: guard, load, resolve, inject, submit,
/// post-submit, clean up.
///
/// One orchestrator is bound to one page load. The run guard makes duplicate
/// invocations a no-op, and the outer boundary of [`Orchestrator::run`]
/// contains every failure - automation must never take the hosting page down
/// with it.
pub struct Orchestrator {
    tasks: Arc<dyn TaskStore>,
    settings: Arc<dyn SettingsStore>,
    timing: Timing,
    options: OrchestratorOptions,
    ran: AtomicBool,
}

impl Orchestrator {
    pub fn new(tasks: Arc<dyn TaskStore>, settings: Arc<dyn SettingsStore>) -> Self {
        Self::with_options(tasks, settings, Timing::default(), OrchestratorOptions::default())
    }

    pub fn with_options(
        tasks: Arc<dyn TaskStore>,
        settings: Arc<dyn SettingsStore>,
        timing: Timing,
        options: OrchestratorOptions,
    ) -> Self {
        Self {
            tasks,
            settings,
            timing,
            options,
            ran: AtomicBool::new(false),
        }
    }

    /// Run the full sequence against `page`. Always returns a report.
    pub async fn run(&self, page: &dyn PageBackend) -> RunReport {
        if self.ran.swap(true, Ordering::SeqCst) {
            debug!("Automation already ran for this page, skipping");
            return RunReport::Skipped {
                reason: SkipReason::AlreadyRan,
            };
        }

        match self.execute(page).await {
            Ok(report) => report,
            Err(e) => {
                warn!("Automation run failed: {}", e);
                RunReport::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    async fn execute(&self, page: &dyn PageBackend) -> Result<RunReport, EngineError> {
        let t = &self.timing;

        // Staged task and ambient settings. No payload means nothing to do:
        // no element lookup, no page mutation, no store delete.
        let Some(task) = self.tasks.load().await? else {
            debug!("No staged task, nothing to do");
            return Ok(RunReport::Skipped {
                reason: SkipReason::NoTask,
            });
        };
        let settings = self.settings.load().await?;

        let Some(engine) = registry::lookup(page.origin()) else {
            debug!("Origin {} not in the engine registry", page.origin());
            return Ok(RunReport::Skipped {
                reason: SkipReason::UnknownOrigin,
            });
        };
        info!("Automating {} ({})", engine.name, engine.origin);

        let input =
            waiter::wait_for(page, engine.input_locator, t.max_attempts, t.poll_interval).await?;

        // Best-effort deep-thinking toggle: a missing control is tolerated.
        if settings.secondary_action_enabled {
            if let Some(locator) = engine.secondary_action_locator {
                tokio::time::sleep(t.secondary_action_delay).await;
                match page.query(locator).await? {
                    Some(button) => {
                        page.click(&button).await?;
                        debug!("Toggled secondary action {}", locator);
                        tokio::time::sleep(t.secondary_action_response).await;
                    }
                    None => debug!("Secondary action control {} absent", locator),
                }
            }
        }

        let text = if task.skip_template_prefix {
            task.payload_text
        } else {
            format!("{}{}", settings.template_prefix, task.payload_text)
        };
        inject::inject(page, &input, &text).await?;
        debug!("Injected {} characters", text.len());

        tokio::time::sleep(t.submit_delay).await;
        let submission = submit::submit(page, engine.submit_locator, &input).await?;

        tokio::time::sleep(t.blur_delay).await;
        page.blur(&input).await?;

        hooks::run(page, engine, t, self.options.result_wait_ceiling).await?;

        self.tasks.clear().await?;
        info!(
            "Run complete for {} ({})",
            engine.name,
            match submission {
                Submission::Clicked => "clicked",
                Submission::EnterKey => "enter fallback",
            }
        );

        Ok(RunReport::Completed { submission })
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
