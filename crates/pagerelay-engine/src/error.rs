//! Engine automation errors.

use thiserror::Error;

use pagerelay_protocols::{PageError, StoreError};

/// Errors inside one automation run.
///
/// These never escape the orchestrator: its outer boundary folds them into
/// [`crate::RunReport::Failed`].
#[derive(Debug, Error)]
pub enum EngineError {
    /// A bounded wait exhausted its attempts.
    #[error("Element not found: {locator} (after {attempts} attempts)")]
    ElementNotFound { locator: String, attempts: u32 },

    /// The page backend failed.
    #[error("Page error: {0}")]
    Page(#[from] PageError),

    /// A store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_not_found_display() {
        let err = EngineError::ElementNotFound {
            locator: "#chat-input".to_string(),
            attempts: 50,
        };
        let display = err.to_string();
        assert!(display.contains("#chat-input"));
        assert!(display.contains("50"));
    }

    #[test]
    fn test_from_page_error() {
        let err: EngineError = PageError::SessionClosed.into();
        assert!(matches!(err, EngineError::Page(_)));
    }
}
