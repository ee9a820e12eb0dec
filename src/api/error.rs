//! Errors raised while asking the backend a question.

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single question request.
///
/// The chat view collapses every variant into the same apology message;
/// the detail only ever reaches the logs.
#[derive(Error, Debug)]
pub enum QuestionError {
    /// The question was empty or whitespace-only.
    #[error("question must not be empty")]
    EmptyQuestion,

    /// The configured base URL could not be parsed.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("API error: {0}")]
    Status(StatusCode),

    /// The response body was not a valid answer payload.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl QuestionError {
    /// HTTP status carried by the error, if the backend answered at all.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status(status) => Some(*status),
            Self::Transport(err) => err.status(),
            _ => None,
        }
    }
}
