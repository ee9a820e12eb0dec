//! Jobs RAG Chat
//!
//! A server-rendered chat front end for a question-answering backend about
//! jobs and companies. Questions go to `POST {base}/question`; answers come
//! back as markdown plus a list of source URLs.
//!
//! # Architecture
//!
//! - **Server**: Axum router serving full pages and HTMX fragments
//! - **Chat**: Pure state machine over the transcript and input buffer
//! - **Mutation**: Request hook where only the latest call settles state
//! - **UI**: Leptos SSR + HTMX
//!
//! # Modules
//!
//! - [`api`]: Question backend client
//! - [`chat`]: Messages, suggestions and the view state machine
//! - [`markdown`]: Answer parser
//! - [`mutation`]: Question request hook
//! - [`session`]: Page sessions and their store
//! - [`theme`]: Light/dark preference
//! - [`ui`]: Leptos components

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::implicit_hasher)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]
#![allow(clippy::must_use_candidate)]

pub mod api;
pub mod chat;
pub mod config;
pub mod markdown;
pub mod mutation;
pub mod server;
pub mod session;
pub mod theme;
pub mod ui;

use std::sync::Arc;

use crate::config::AppConfig;
use session::SessionStore;

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Session store for page sessions.
    pub sessions: SessionStore,
    /// Global Configuration
    pub config: Arc<AppConfig>,
}
