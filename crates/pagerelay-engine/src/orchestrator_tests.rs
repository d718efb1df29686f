use std::sync::Arc;
use std::time::Duration;

use pagerelay_protocols::{AutomationTask, ElementKind, Settings, TaskStore};

use super::*;
use crate::fakepage::{Action, FakePage, StubSettingsStore, StubTaskStore};

const QWEN_INPUT: &str = "#chat-input";
const QWEN_SUBMIT: &str = "#send-message-button";
const QWEN_THINKING: &str = "button.ThinkingButton,button.chat-input-feature-btn";
const GEMINI_INPUT: &str = "div.ql-editor.textarea, rich-textarea .ql-editor";
const RESULT_PANEL: &str = ".markdown-main-panel";
const AISTUDIO_INPUT: &str = "textarea.textarea, textarea[aria-label*=\"Type something\"]";
const AISTUDIO_SUBMIT: &str = "button[aria-label=\"Run\"], button.run-button";
const AISTUDIO_DISMISS: &str = "button[aria-label=\"Close run settings panel\"]";

fn orchestrator(
    task: Option<AutomationTask>,
    settings: Settings,
) -> (Orchestrator, Arc<StubTaskStore>) {
    let tasks = Arc::new(match task {
        Some(t) => StubTaskStore::with_task(t),
        None => StubTaskStore::default(),
    });
    let store = tasks.clone();
    let orch = Orchestrator::new(
        tasks,
        Arc::new(StubSettingsStore::with_settings(settings)),
    );
    (orch, store)
}

fn qwen_page() -> FakePage {
    let page = FakePage::new("chat.qwen.ai");
    page.plant(QWEN_INPUT, ElementKind::FormControl);
    page.plant(QWEN_SUBMIT, ElementKind::FormControl);
    page.plant(RESULT_PANEL, ElementKind::RichText);
    page
}

fn prefix_settings() -> Settings {
    Settings {
        template_prefix: "PREFIX:".to_string(),
        ..Settings::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_full_happy_path() {
    let page = qwen_page();
    let (orch, tasks) = orchestrator(Some(AutomationTask::new("hello")), prefix_settings());

    let report = orch.run(&page).await;

    assert_eq!(
        report,
        RunReport::Completed {
            submission: Submission::Clicked
        }
    );

    let actions = page.actions();
    assert!(actions.contains(&Action::SetValue {
        target: QWEN_INPUT.to_string(),
        value: "PREFIX:hello".to_string(),
    }));
    assert!(actions.contains(&Action::NotifyInput {
        target: QWEN_INPUT.to_string(),
    }));
    assert_eq!(page.clicks_on(QWEN_SUBMIT), 1);
    assert!(actions.contains(&Action::Blur {
        target: QWEN_INPUT.to_string(),
    }));
    // Default post-submit hook: focus, scroll, click on the result panel.
    assert!(actions.contains(&Action::Focus {
        target: RESULT_PANEL.to_string(),
    }));
    assert!(actions.contains(&Action::ScrollIntoView {
        target: RESULT_PANEL.to_string(),
    }));
    assert_eq!(page.clicks_on(RESULT_PANEL), 1);

    // The staged task is consumed at completion.
    assert!(tasks.staged().is_none());
    assert_eq!(tasks.clear_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_run_guard_is_idempotent() {
    let page = qwen_page();
    let (orch, tasks) = orchestrator(Some(AutomationTask::new("hello")), Settings::default());

    let first = orch.run(&page).await;
    assert!(first.is_completed());
    let mutations_after_first = page.mutation_count();

    // Re-stage to prove the guard, not the missing task, short-circuits.
    tasks.stage(AutomationTask::new("again")).await.unwrap();
    let second = orch.run(&page).await;

    assert_eq!(
        second,
        RunReport::Skipped {
            reason: SkipReason::AlreadyRan
        }
    );
    assert_eq!(page.mutation_count(), mutations_after_first);
}

#[tokio::test(start_paused = true)]
async fn test_no_op_without_task() {
    let page = qwen_page();
    let (orch, tasks) = orchestrator(None, Settings::default());

    let report = orch.run(&page).await;

    assert_eq!(
        report,
        RunReport::Skipped {
            reason: SkipReason::NoTask
        }
    );
    assert_eq!(page.total_queries(), 0);
    assert_eq!(page.mutation_count(), 0);
    assert_eq!(tasks.clear_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_empty_payload_is_no_task() {
    let page = qwen_page();
    let (orch, _) = orchestrator(Some(AutomationTask::new("")), Settings::default());

    let report = orch.run(&page).await;

    assert_eq!(
        report,
        RunReport::Skipped {
            reason: SkipReason::NoTask
        }
    );
    assert_eq!(page.mutation_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_no_op_on_unknown_origin() {
    let page = FakePage::new("example.com");
    let (orch, tasks) = orchestrator(Some(AutomationTask::new("hello")), Settings::default());

    let report = orch.run(&page).await;

    assert_eq!(
        report,
        RunReport::Skipped {
            reason: SkipReason::UnknownOrigin
        }
    );
    assert_eq!(page.mutation_count(), 0);
    // The task stays staged for a page that can use it.
    assert!(tasks.staged().is_some());
}

#[tokio::test(start_paused = true)]
async fn test_template_prefix_skipped_on_raw_task() {
    let page = qwen_page();
    let (orch, _) = orchestrator(Some(AutomationTask::raw("hello")), prefix_settings());

    let report = orch.run(&page).await;
    assert!(report.is_completed());

    assert!(page.actions().contains(&Action::SetValue {
        target: QWEN_INPUT.to_string(),
        value: "hello".to_string(),
    }));
}

#[tokio::test(start_paused = true)]
async fn test_rich_text_injection_escapes_markup() {
    let page = FakePage::new("gemini.google.com");
    page.plant(GEMINI_INPUT, ElementKind::RichText);
    page.plant(RESULT_PANEL, ElementKind::RichText);
    // No submit control planted: gemini falls back to the Enter key here.
    let (orch, _) = orchestrator(
        Some(AutomationTask::raw("a <b> & c\nnext")),
        Settings::default(),
    );

    let report = orch.run(&page).await;
    assert_eq!(
        report,
        RunReport::Completed {
            submission: Submission::EnterKey
        }
    );

    assert!(page.actions().contains(&Action::SetMarkup {
        target: GEMINI_INPUT.to_string(),
        html: "a &lt;b&gt; &amp; c<br>next".to_string(),
    }));
}

#[tokio::test(start_paused = true)]
async fn test_submit_fallback_presses_enter_once() {
    let page = FakePage::new("chat.qwen.ai");
    page.plant(QWEN_INPUT, ElementKind::FormControl);
    page.plant(RESULT_PANEL, ElementKind::RichText);
    let (orch, _) = orchestrator(Some(AutomationTask::new("hello")), Settings::default());

    let report = orch.run(&page).await;

    assert_eq!(
        report,
        RunReport::Completed {
            submission: Submission::EnterKey
        }
    );
    let enters = page
        .actions()
        .iter()
        .filter(|a| matches!(a, Action::PressEnter { target } if target == QWEN_INPUT))
        .count();
    assert_eq!(enters, 1);
    assert_eq!(page.clicks_on(QWEN_SUBMIT), 0);
}

#[tokio::test(start_paused = true)]
async fn test_overlay_dismiss_variant() {
    let page = FakePage::new("aistudio.google.com");
    page.plant(AISTUDIO_INPUT, ElementKind::FormControl);
    page.plant(AISTUDIO_SUBMIT, ElementKind::FormControl);
    page.plant(RESULT_PANEL, ElementKind::RichText);
    page.plant(AISTUDIO_DISMISS, ElementKind::FormControl);
    let (orch, _) = orchestrator(Some(AutomationTask::new("hello")), Settings::default());

    let report = orch.run(&page).await;
    assert!(report.is_completed());

    assert_eq!(page.clicks_on(AISTUDIO_DISMISS), 1);

    // The overlay dismiss comes after the default panel sequence.
    let actions = page.actions();
    let panel_click = actions
        .iter()
        .position(|a| matches!(a, Action::Click { target } if target == RESULT_PANEL))
        .unwrap();
    let dismiss_click = actions
        .iter()
        .position(|a| matches!(a, Action::Click { target } if target == AISTUDIO_DISMISS))
        .unwrap();
    assert!(dismiss_click > panel_click);
}

#[tokio::test(start_paused = true)]
async fn test_overlay_absent_is_tolerated() {
    let page = FakePage::new("aistudio.google.com");
    page.plant(AISTUDIO_INPUT, ElementKind::FormControl);
    page.plant(AISTUDIO_SUBMIT, ElementKind::FormControl);
    page.plant(RESULT_PANEL, ElementKind::RichText);
    let (orch, _) = orchestrator(Some(AutomationTask::new("hello")), Settings::default());

    let report = orch.run(&page).await;
    assert!(report.is_completed());
}

#[tokio::test(start_paused = true)]
async fn test_secondary_action_clicked_when_enabled() {
    let page = qwen_page();
    page.plant(QWEN_THINKING, ElementKind::FormControl);
    let settings = Settings {
        secondary_action_enabled: true,
        ..Settings::default()
    };
    let (orch, _) = orchestrator(Some(AutomationTask::new("hello")), settings);

    let report = orch.run(&page).await;
    assert!(report.is_completed());
    assert_eq!(page.clicks_on(QWEN_THINKING), 1);
}

#[tokio::test(start_paused = true)]
async fn test_secondary_action_absence_tolerated() {
    let page = qwen_page();
    let settings = Settings {
        secondary_action_enabled: true,
        ..Settings::default()
    };
    let (orch, _) = orchestrator(Some(AutomationTask::new("hello")), settings);

    let report = orch.run(&page).await;
    assert!(report.is_completed());
    assert_eq!(page.clicks_on(QWEN_THINKING), 0);
}

#[tokio::test(start_paused = true)]
async fn test_secondary_action_ignored_when_disabled() {
    let page = qwen_page();
    page.plant(QWEN_THINKING, ElementKind::FormControl);
    let (orch, _) = orchestrator(Some(AutomationTask::new("hello")), Settings::default());

    let report = orch.run(&page).await;
    assert!(report.is_completed());
    assert_eq!(page.clicks_on(QWEN_THINKING), 0);
}

#[tokio::test(start_paused = true)]
async fn test_result_wait_ceiling_gives_up_quietly() {
    let page = FakePage::new("chat.qwen.ai");
    page.plant(QWEN_INPUT, ElementKind::FormControl);
    page.plant(QWEN_SUBMIT, ElementKind::FormControl);
    // Result panel never appears.
    let tasks = Arc::new(StubTaskStore::with_task(AutomationTask::new("hello")));
    let orch = Orchestrator::with_options(
        tasks.clone(),
        Arc::new(StubSettingsStore::default()),
        Timing::default(),
        OrchestratorOptions {
            result_wait_ceiling: Some(Duration::from_secs(5)),
        },
    );

    let report = orch.run(&page).await;

    // A missing result panel never fails a submission that already happened.
    assert!(report.is_completed());
    assert!(
        !page
            .actions()
            .iter()
            .any(|a| matches!(a, Action::Focus { target } if target == RESULT_PANEL))
    );
    assert_eq!(tasks.clear_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_input_wait_exhaustion_aborts_without_submitting() {
    let page = FakePage::new("chat.qwen.ai");
    // Input never appears; submit control does.
    page.plant(QWEN_SUBMIT, ElementKind::FormControl);
    let (orch, tasks) = orchestrator(Some(AutomationTask::new("hello")), Settings::default());

    let report = orch.run(&page).await;

    match report {
        RunReport::Failed { error } => assert!(error.contains(QWEN_INPUT)),
        other => panic!("expected Failed, got {:?}", other),
    }
    // No partial submission, and the task survives for a retry.
    assert_eq!(page.mutation_count(), 0);
    assert_eq!(tasks.clear_calls(), 0);
    assert!(tasks.staged().is_some());
}

#[tokio::test(start_paused = true)]
async fn test_late_input_is_still_found() {
    let page = FakePage::new("chat.qwen.ai");
    page.plant_after(QWEN_INPUT, ElementKind::FormControl, 30);
    page.plant(QWEN_SUBMIT, ElementKind::FormControl);
    page.plant(RESULT_PANEL, ElementKind::RichText);
    let (orch, _) = orchestrator(Some(AutomationTask::new("hello")), Settings::default());

    let report = orch.run(&page).await;
    assert!(report.is_completed());
    assert_eq!(page.query_count(QWEN_INPUT), 30);
}
