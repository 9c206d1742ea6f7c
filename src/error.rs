use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] baggage_check_common::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Photo not found: {0}")]
    PhotoNotFound(String),

    #[error("Failed to load image: {0}")]
    ImageLoad(String),

    #[error("Classifier execution failed: {0}")]
    ClassifierExecution(String),

    #[error("Interactive input failed: {0}")]
    Prompt(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
