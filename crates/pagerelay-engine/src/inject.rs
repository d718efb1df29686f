//! Input injection: content preparation and the write-plus-notify sequence.

use pagerelay_protocols::{ElementHandle, ElementKind, PageBackend};

use crate::error::EngineError;

/// Entity-escape text for insertion as markup.
///
/// `&` is escaped first so payloads that already contain entities survive
/// the round trip.
pub fn escape_markup(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Prepare text for a rich-text host: entity escaping, then newlines as
/// line-break markup.
pub fn to_markup(text: &str) -> String {
    escape_markup(text).replace('\n', "<br>")
}

/// Write `text` into a resolved input element and raise the bubbling `input`
/// notification so the host page's framework observes the change.
///
/// Rich-text containers receive prepared markup; plain form controls receive
/// the unescaped value. Callers never pass empty text (a staged task always
/// carries a non-empty payload).
pub async fn inject(
    page: &dyn PageBackend,
    element: &ElementHandle,
    text: &str,
) -> Result<(), EngineError> {
    debug_assert!(!text.is_empty(), "inject called with empty payload");

    match element.kind {
        ElementKind::RichText => page.set_markup(element, &to_markup(text)).await?,
        ElementKind::FormControl => page.set_value(element, text).await?,
    }

    page.notify_input(element).await?;
    Ok(())
}
