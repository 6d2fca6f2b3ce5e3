use thiserror::Error;

pub type Result<T> = std::result::Result<T, DeployError>;

/// Terminal failure of a deploy invocation. Every variant short-circuits the
/// remaining workflow steps; nothing is retried internally.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Token signing failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Failed to read artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Submission failed: {0}")]
    Submission(String),

    #[error("Polling failed: Status {status}: {message}")]
    Polling { status: String, message: String },

    #[error("Validation failed: {url} {results}")]
    ValidationFailed { url: String, results: String },
}
