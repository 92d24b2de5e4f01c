use serde::Serialize;
use thiserror::Error;

/// Boundary failures: reading input, parsing JSON, loading configuration.
/// The detection engine itself never fails.
#[derive(Debug, Error)]
pub enum RulebookError {
    #[error("I/O error: {0}")]
    Io(String),
    #[error("JSON error: {0}")]
    Json(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<std::io::Error> for RulebookError {
    fn from(error: std::io::Error) -> Self {
        RulebookError::Io(error.to_string())
    }
}

impl From<serde_json::Error> for RulebookError {
    fn from(error: serde_json::Error) -> Self {
        RulebookError::Json(error.to_string())
    }
}

impl Serialize for RulebookError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

pub type CommandResult<T> = Result<T, RulebookError>;

#[cfg(test)]
#[path = "tests/errors_tests.rs"]
mod tests;
