//! Page backend protocol definitions.
//!
//! A page backend gives the automation core access to one hosted page. All
//! DOM coupling goes through locator strings; the backend hands out opaque
//! element handles and performs the low-level reads and writes.

use async_trait::async_trait;

use crate::error::PageError;

/// What kind of input host an element is. Decides how text is written into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// A content-editable block (rich-text container). Takes markup.
    RichText,
    /// A plain form control (`textarea`, `input`). Takes a value string.
    FormControl,
}

/// Opaque handle to a resolved element inside the hosted page.
#[derive(Debug, Clone)]
pub struct ElementHandle {
    /// Backend-specific element identity (e.g. a remote object id).
    pub object_id: String,
    /// Input-host kind, resolved from the element's tag at query time.
    pub kind: ElementKind,
}

/// Core trait for host-page access.
///
/// One instance is bound to one page load; dropping it tears down any
/// backend resources for that page.
#[async_trait]
pub trait PageBackend: Send + Sync {
    /// Origin (host) of the page this backend is attached to.
    fn origin(&self) -> &str;

    /// Resolve a locator against the live document. `None` means no match
    /// right now - an expected outcome, not an error.
    async fn query(&self, locator: &str) -> Result<Option<ElementHandle>, PageError>;

    /// Assign prepared markup as the element's inner content.
    async fn set_markup(&self, element: &ElementHandle, html: &str) -> Result<(), PageError>;

    /// Assign plain text as the element's value.
    async fn set_value(&self, element: &ElementHandle, value: &str) -> Result<(), PageError>;

    /// Dispatch a bubbling `input` event on the element so the host page's
    /// reactive framework observes the direct mutation.
    async fn notify_input(&self, element: &ElementHandle) -> Result<(), PageError>;

    /// Native click on the element.
    async fn click(&self, element: &ElementHandle) -> Result<(), PageError>;

    /// Dispatch a synthesized `Enter` key-down (bubbling, cancelable) on the
    /// element.
    async fn press_enter(&self, element: &ElementHandle) -> Result<(), PageError>;

    /// Focus the element.
    async fn focus(&self, element: &ElementHandle) -> Result<(), PageError>;

    /// Remove focus from the element.
    async fn blur(&self, element: &ElementHandle) -> Result<(), PageError>;

    /// Scroll the element into view.
    async fn scroll_into_view(&self, element: &ElementHandle) -> Result<(), PageError>;

    /// Visible text of the page body, whitespace-normalized. Prefers the
    /// page's `article` element when one exists.
    async fn visible_text(&self) -> Result<String, PageError>;
}

impl ElementHandle {
    pub fn new(object_id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            object_id: object_id.into(),
            kind,
        }
    }
}
