//! Error types for the PageRelay protocol layer.

use thiserror::Error;

/// Errors surfaced by a page backend.
#[derive(Debug, Error)]
pub enum PageError {
    /// Transport or protocol failure in the backend.
    #[error("Backend error: {0}")]
    Backend(String),

    /// Script evaluation failed inside the host page.
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    /// The page session is gone (tab closed, navigation teardown).
    #[error("Page session closed")]
    SessionClosed,
}

/// Errors surfaced by the stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_error_display() {
        let err = PageError::Backend("socket reset".to_string());
        assert!(err.to_string().contains("socket reset"));

        let err = PageError::JavaScript("ReferenceError".to_string());
        assert!(err.to_string().contains("ReferenceError"));

        assert_eq!(PageError::SessionClosed.to_string(), "Page session closed");
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Connection("locked".to_string());
        assert!(err.to_string().contains("Connection error"));

        let err = StoreError::Query("no such table".to_string());
        assert!(err.to_string().contains("no such table"));
    }
}
