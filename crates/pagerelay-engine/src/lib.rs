//! PageRelay engine automation.
//!
//! Drives one supported AI chat front-end through a full fill-and-submit
//! sequence against an abstract [`pagerelay_protocols::PageBackend`]:
//!
//! 1. Resolve the page's origin against the engine registry.
//! 2. Wait (bounded polling) for the engine's input element.
//! 3. Optionally toggle the engine's secondary action (deep thinking).
//! 4. Compose and inject the payload text.
//! 5. Click the submit control, falling back to a synthesized Enter key.
//! 6. Run the engine's post-submit hook.
//! 7. Clear the staged task.
//!
//! The [`Orchestrator`] owns the run-once guard and contains every failure:
//! a run always produces a [`RunReport`], never a panic or an escaping error.

mod error;
mod hooks;
mod inject;
mod orchestrator;
mod registry;
mod report;
mod submit;
mod timing;
mod waiter;

pub use error::EngineError;
pub use inject::{escape_markup, inject, to_markup};
pub use orchestrator::{Orchestrator, OrchestratorOptions};
pub use registry::{EngineConfig, PostSubmit, all, by_name, lookup};
pub use report::{RunReport, SkipReason, Submission};
pub use submit::submit;
pub use timing::Timing;
pub use waiter::wait_for;

#[cfg(test)]
pub(crate) mod fakepage;
