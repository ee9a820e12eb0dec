//! Wire types of the question endpoint.

use serde::{Deserialize, Serialize};

/// Answer returned by the backend.
///
/// `sources` keeps the backend's relevance order and is never re-sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResponse {
    /// Markdown-formatted answer.
    pub answer: String,
    /// URLs of the documents backing the answer.
    pub sources: Vec<String>,
}
