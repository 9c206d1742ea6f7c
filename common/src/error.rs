//! Error types

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown category: {0}")]
    CategoryNotFound(String),

    #[error("Invalid session state: {0}")]
    InvalidSessionState(String),

    #[error("Classification unavailable: {0}")]
    ClassificationUnavailable(String),

    #[error("Malformed classification result: {0}")]
    MalformedClassificationResult(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_category_not_found() {
        let error = Error::CategoryNotFound("umbrella".to_string());
        assert_eq!(format!("{}", error), "Unknown category: umbrella");
    }

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        let display = format!("{}", error);
        assert!(display.contains("JSON error"));
    }

    #[test]
    fn test_error_display_storage() {
        let error = Error::StorageUnavailable("disk full".to_string());
        assert_eq!(format!("{}", error), "Storage unavailable: disk full");
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::InvalidSessionState("no category selected".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("InvalidSessionState"));
        assert!(debug.contains("no category selected"));
    }
}
