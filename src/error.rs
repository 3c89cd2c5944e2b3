use crate::services::classifier_client::ClassifyError;
use serde::Serialize;
use std::fmt;

/// Error returned across the command boundary. Panel-level failures are not
/// errors here; they end up in the view as a message.
#[derive(Debug, Serialize)]
pub struct AppError {
    pub message: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl From<ClassifyError> for AppError {
    fn from(err: ClassifyError) -> Self {
        AppError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError {
            message: format!("Failed to serialize view: {}", err),
        }
    }
}
