//! Client for the external question-answering backend.
//!
//! The backend exposes a single endpoint, `POST {base}/question?question=...`,
//! and answers with a JSON body carrying the generated answer and the URLs
//! of the documents it was built from.
//!
//! [`QuestionApi`] is the seam the rest of the crate talks to, so the chat
//! state machine and the mutation hook can be driven without a network.
//!
//! # Example
//!
//! ```rust,no_run
//! use jobs_rag_chat::api::{QuestionApi, QuestionClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = QuestionClient::new("http://localhost:8000")?;
//! let response = client.ask("Salarios en Naranja X").await?;
//! println!("{} ({} sources)", response.answer, response.sources.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod types;

pub use client::QuestionClient;
pub use error::QuestionError;
pub use types::QuestionResponse;

/// Asks questions to a question-answering backend.
#[async_trait::async_trait]
pub trait QuestionApi: Send + Sync + std::fmt::Debug {
    /// Send one question and wait for the backend's answer.
    async fn ask(&self, question: &str) -> Result<QuestionResponse, QuestionError>;
}
