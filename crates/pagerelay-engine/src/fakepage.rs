//! Scripted page double for engine tests.
//!
//! Elements are planted per locator, optionally appearing only after a
//! number of queries (simulating late rendering). Every mutating call is
//! recorded in a journal so tests can assert exactly what touched the page.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use pagerelay_protocols::{
    AutomationTask, ElementHandle, ElementKind, PageBackend, PageError, Settings, SettingsStore,
    StoreError, TaskStore,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetMarkup { target: String, html: String },
    SetValue { target: String, value: String },
    NotifyInput { target: String },
    Click { target: String },
    PressEnter { target: String },
    Focus { target: String },
    Blur { target: String },
    ScrollIntoView { target: String },
}

struct Planted {
    kind: ElementKind,
    /// The query number (1-based, per locator) at which the element resolves.
    appears_on: u32,
}

pub struct FakePage {
    origin: String,
    planted: Mutex<HashMap<String, Planted>>,
    query_counts: Mutex<HashMap<String, u32>>,
    journal: Mutex<Vec<Action>>,
}

impl FakePage {
    pub fn new(origin: &str) -> Self {
        Self {
            origin: origin.to_string(),
            planted: Mutex::new(HashMap::new()),
            query_counts: Mutex::new(HashMap::new()),
            journal: Mutex::new(Vec::new()),
        }
    }

    /// Plant an element that resolves on the first query.
    pub fn plant(&self, locator: &str, kind: ElementKind) {
        self.plant_after(locator, kind, 1);
    }

    /// Plant an element that resolves on the `appears_on`-th query.
    pub fn plant_after(&self, locator: &str, kind: ElementKind, appears_on: u32) {
        self.planted
            .lock()
            .unwrap()
            .insert(locator.to_string(), Planted { kind, appears_on });
    }

    /// How many times a locator has been queried.
    pub fn query_count(&self, locator: &str) -> u32 {
        *self.query_counts.lock().unwrap().get(locator).unwrap_or(&0)
    }

    /// Total queries across all locators.
    pub fn total_queries(&self) -> u32 {
        self.query_counts.lock().unwrap().values().sum()
    }

    /// Snapshot of the mutation journal.
    pub fn actions(&self) -> Vec<Action> {
        self.journal.lock().unwrap().clone()
    }

    /// Total page mutations recorded.
    pub fn mutation_count(&self) -> usize {
        self.journal.lock().unwrap().len()
    }

    pub fn clicks_on(&self, target: &str) -> usize {
        self.actions()
            .iter()
            .filter(|a| matches!(a, Action::Click { target: t } if t == target))
            .count()
    }

    fn record(&self, action: Action) {
        self.journal.lock().unwrap().push(action);
    }
}

#[async_trait]
impl PageBackend for FakePage {
    fn origin(&self) -> &str {
        &self.origin
    }

    async fn query(&self, locator: &str) -> Result<Option<ElementHandle>, PageError> {
        let count = {
            let mut counts = self.query_counts.lock().unwrap();
            let entry = counts.entry(locator.to_string()).or_insert(0);
            *entry += 1;
            *entry
        };

        let planted = self.planted.lock().unwrap();
        match planted.get(locator) {
            Some(p) if count >= p.appears_on => {
                Ok(Some(ElementHandle::new(locator.to_string(), p.kind)))
            }
            _ => Ok(None),
        }
    }

    async fn set_markup(&self, element: &ElementHandle, html: &str) -> Result<(), PageError> {
        self.record(Action::SetMarkup {
            target: element.object_id.clone(),
            html: html.to_string(),
        });
        Ok(())
    }

    async fn set_value(&self, element: &ElementHandle, value: &str) -> Result<(), PageError> {
        self.record(Action::SetValue {
            target: element.object_id.clone(),
            value: value.to_string(),
        });
        Ok(())
    }

    async fn notify_input(&self, element: &ElementHandle) -> Result<(), PageError> {
        self.record(Action::NotifyInput {
            target: element.object_id.clone(),
        });
        Ok(())
    }

    async fn click(&self, element: &ElementHandle) -> Result<(), PageError> {
        self.record(Action::Click {
            target: element.object_id.clone(),
        });
        Ok(())
    }

    async fn press_enter(&self, element: &ElementHandle) -> Result<(), PageError> {
        self.record(Action::PressEnter {
            target: element.object_id.clone(),
        });
        Ok(())
    }

    async fn focus(&self, element: &ElementHandle) -> Result<(), PageError> {
        self.record(Action::Focus {
            target: element.object_id.clone(),
        });
        Ok(())
    }

    async fn blur(&self, element: &ElementHandle) -> Result<(), PageError> {
        self.record(Action::Blur {
            target: element.object_id.clone(),
        });
        Ok(())
    }

    async fn scroll_into_view(&self, element: &ElementHandle) -> Result<(), PageError> {
        self.record(Action::ScrollIntoView {
            target: element.object_id.clone(),
        });
        Ok(())
    }

    async fn visible_text(&self) -> Result<String, PageError> {
        Ok(String::new())
    }
}

/// In-memory task store recording how often it was cleared.
#[derive(Default)]
pub struct StubTaskStore {
    task: Mutex<Option<AutomationTask>>,
    clears: AtomicUsize,
}

impl StubTaskStore {
    pub fn with_task(task: AutomationTask) -> Self {
        Self {
            task: Mutex::new(Some(task)),
            clears: AtomicUsize::new(0),
        }
    }

    pub fn clear_calls(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }

    pub fn staged(&self) -> Option<AutomationTask> {
        self.task.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskStore for StubTaskStore {
    async fn stage(&self, task: AutomationTask) -> Result<(), StoreError> {
        *self.task.lock().unwrap() = Some(task);
        Ok(())
    }

    async fn load(&self) -> Result<Option<AutomationTask>, StoreError> {
        let task = self.task.lock().unwrap().clone();
        Ok(task.filter(|t| !t.payload_text.is_empty()))
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        *self.task.lock().unwrap() = None;
        Ok(())
    }
}

/// In-memory settings store.
#[derive(Default)]
pub struct StubSettingsStore {
    settings: Mutex<Settings>,
}

impl StubSettingsStore {
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings: Mutex::new(settings),
        }
    }
}

#[async_trait]
impl SettingsStore for StubSettingsStore {
    async fn load(&self) -> Result<Settings, StoreError> {
        Ok(self.settings.lock().unwrap().clone())
    }

    async fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        *self.settings.lock().unwrap() = settings.clone();
        Ok(())
    }
}
