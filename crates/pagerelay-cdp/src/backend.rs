//! [`PageBackend`] implementation on top of a CDP page session.
//!
//! Elements are held as Runtime remote objects so every write goes through
//! `Runtime.callFunctionOn` with `this` bound to the element - content
//! prepared by the caller is applied verbatim, with no extra quoting layer.

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use pagerelay_protocols::{ElementHandle, ElementKind, PageBackend, PageError};

use crate::error::CdpError;
use crate::session::PageSession;

/// One hosted page, attached over CDP.
pub struct CdpPage {
    session: PageSession,
    origin: String,
}

impl CdpPage {
    /// Wrap an attached session, capturing the page's host as its origin.
    pub async fn attach(session: PageSession) -> Result<Self, CdpError> {
        let origin = session.host().await?;
        debug!("Attached page backend for origin {}", origin);
        Ok(Self { session, origin })
    }

    /// The underlying CDP session.
    pub fn session(&self) -> &PageSession {
        &self.session
    }

    /// Page metadata used by the visit tracker.
    pub async fn metadata(&self) -> Result<PageMetadata, CdpError> {
        let url = self.session.url().await?;
        let title = self.session.title().await?;
        let favicon_url = self.favicon_url().await?;
        Ok(PageMetadata {
            url,
            title,
            favicon_url,
            domain: self.origin.clone(),
        })
    }

    /// The page's favicon URL, falling back to `<origin>/favicon.ico`.
    async fn favicon_url(&self) -> Result<String, CdpError> {
        let result = self
            .session
            .evaluate(
                r#"(() => {
                    const icon = document.querySelector('link[rel="icon"]') ||
                                 document.querySelector('link[rel="shortcut icon"]') ||
                                 document.querySelector('link[rel="apple-touch-icon"]');
                    if (icon && icon.href) return icon.href;
                    return window.location.origin + '/favicon.ico';
                })()"#,
            )
            .await?;
        Ok(result.as_str().unwrap_or("").to_string())
    }

    async fn call_on_element(
        &self,
        element: &ElementHandle,
        function: &str,
        args: Vec<serde_json::Value>,
    ) -> Result<(), PageError> {
        self.session
            .call_on(&element.object_id, function, args)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl PageBackend for CdpPage {
    fn origin(&self) -> &str {
        &self.origin
    }

    async fn query(&self, locator: &str) -> Result<Option<ElementHandle>, PageError> {
        // serde_json quoting keeps arbitrary selector strings JS-safe.
        let locator_js = serde_json::to_string(locator)
            .map_err(|e| PageError::Backend(e.to_string()))?;

        let object = self
            .session
            .evaluate_handle(&format!("document.querySelector({})", locator_js))
            .await?;

        if object.is_nullish() {
            return Ok(None);
        }

        let object_id = object
            .object_id
            .ok_or_else(|| PageError::Backend("Element without object id".to_string()))?;

        let is_rich = self
            .session
            .call_on(
                &object_id,
                "function() { return this.isContentEditable || this.tagName === 'DIV'; }",
                Vec::new(),
            )
            .await?;

        let kind = if is_rich.as_bool().unwrap_or(false) {
            ElementKind::RichText
        } else {
            ElementKind::FormControl
        };

        Ok(Some(ElementHandle::new(object_id, kind)))
    }

    async fn set_markup(&self, element: &ElementHandle, html: &str) -> Result<(), PageError> {
        self.call_on_element(
            element,
            "function(html) { this.innerHTML = html; }",
            vec![json!(html)],
        )
        .await
    }

    async fn set_value(&self, element: &ElementHandle, value: &str) -> Result<(), PageError> {
        self.call_on_element(
            element,
            "function(value) { this.value = value; }",
            vec![json!(value)],
        )
        .await
    }

    async fn notify_input(&self, element: &ElementHandle) -> Result<(), PageError> {
        self.call_on_element(
            element,
            "function() { this.dispatchEvent(new Event('input', { bubbles: true, cancelable: true })); }",
            Vec::new(),
        )
        .await
    }

    async fn click(&self, element: &ElementHandle) -> Result<(), PageError> {
        self.call_on_element(element, "function() { this.click(); }", Vec::new())
            .await
    }

    async fn press_enter(&self, element: &ElementHandle) -> Result<(), PageError> {
        self.call_on_element(
            element,
            "function() { this.dispatchEvent(new KeyboardEvent('keydown', { key: 'Enter', code: 'Enter', bubbles: true, cancelable: true })); }",
            Vec::new(),
        )
        .await
    }

    async fn focus(&self, element: &ElementHandle) -> Result<(), PageError> {
        self.call_on_element(element, "function() { this.focus(); }", Vec::new())
            .await
    }

    async fn blur(&self, element: &ElementHandle) -> Result<(), PageError> {
        self.call_on_element(element, "function() { this.blur(); }", Vec::new())
            .await
    }

    async fn scroll_into_view(&self, element: &ElementHandle) -> Result<(), PageError> {
        self.call_on_element(
            element,
            "function() { this.scrollIntoView({ behavior: 'smooth' }); }",
            Vec::new(),
        )
        .await
    }

    async fn visible_text(&self) -> Result<String, PageError> {
        let result = self
            .session
            .evaluate(
                r#"(() => {
                    const article = document.querySelector('article');
                    const content = article ? article.innerText : document.body.innerText;
                    return content.replace(/\s+/g, ' ').trim();
                })()"#,
            )
            .await?;
        Ok(result.as_str().unwrap_or("").to_string())
    }
}

/// Metadata captured from a followed page when a visit record is created.
#[derive(Debug, Clone)]
pub struct PageMetadata {
    pub url: String,
    pub title: String,
    pub favicon_url: String,
    pub domain: String,
}
