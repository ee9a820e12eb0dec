//! Page-session storage.
//!
//! Every page load starts a fresh [`ChatSession`]: a [`ChatView`] wired to a
//! [`QuestionMutation`]. Sessions live in memory only and are swept once
//! they have been idle for longer than the configured timeout.
//!
//! # Architecture
//!
//! - [`ChatSession`]: one chat view and its question hook
//! - [`SessionStore`]: thread-safe store for all live page sessions
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use jobs_rag_chat::api::QuestionClient;
//! use jobs_rag_chat::session::SessionStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SessionStore::new(Arc::new(QuestionClient::new("http://localhost:8000")?));
//! let session = store.create();
//! if let Some(request) = session.submit("Salarios en Naranja X") {
//!     request.await?;
//! }
//! assert_eq!(session.snapshot().messages.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! [`ChatView`]: crate::chat::ChatView
//! [`QuestionMutation`]: crate::mutation::QuestionMutation

mod thread;

pub use thread::{ChatSession, ChatSnapshot, SessionStore};
