//! Chat sessions and their store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::api::QuestionApi;
use crate::chat::{ChatCommand, ChatEvent, ChatPhase, ChatView, Message, suggestions};
use crate::mutation::{MutateOptions, QuestionMutation};

/// Point-in-time copy of a session's view, for rendering.
#[derive(Debug, Clone)]
pub struct ChatSnapshot {
    pub session_id: String,
    pub phase: ChatPhase,
    pub messages: Vec<Message>,
    pub input: String,
}

/// One page session: a chat view plus the hook that answers its questions.
#[derive(Debug, Clone)]
pub struct ChatSession {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    id: String,
    view: Mutex<ChatView>,
    mutation: QuestionMutation,
    last_activity: Mutex<DateTime<Utc>>,
}

impl SessionInner {
    fn view(&self) -> MutexGuard<'_, ChatView> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn touch(&self) {
        *self
            .last_activity
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Utc::now();
    }
}

impl ChatSession {
    fn new(id: String, api: Arc<dyn QuestionApi>) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                id,
                view: Mutex::new(ChatView::new()),
                mutation: QuestionMutation::new(api),
                last_activity: Mutex::new(Utc::now()),
            }),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    #[must_use]
    pub fn snapshot(&self) -> ChatSnapshot {
        let view = self.inner.view();
        ChatSnapshot {
            session_id: self.inner.id.clone(),
            phase: view.phase(),
            messages: view.messages().to_vec(),
            input: view.input().to_string(),
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.inner.view().is_pending()
    }

    /// Whether the question hook is tracking an in-flight request.
    #[must_use]
    pub fn request_in_flight(&self) -> bool {
        self.inner.mutation.is_pending()
    }

    /// Update the input buffer.
    pub fn input_changed(&self, text: impl Into<String>) {
        self.inner.touch();
        self.inner.view().apply(ChatEvent::InputChanged(text.into()));
    }

    /// Put suggestion `index` into the input buffer without submitting.
    ///
    /// Returns `false` for an unknown index.
    pub fn select_suggestion(&self, index: usize) -> bool {
        match suggestions::get(index) {
            Some(suggestion) => {
                self.input_changed(suggestion.question);
                true
            }
            None => false,
        }
    }

    /// Set the input to `text` and submit it.
    ///
    /// Returns the handle of the started request, or `None` when the submit
    /// was a no-op (blank input or a request already pending).
    pub fn submit(&self, text: impl Into<String>) -> Option<JoinHandle<()>> {
        self.inner.touch();

        let command = {
            let mut view = self.inner.view();
            view.apply(ChatEvent::InputChanged(text.into()));
            view.apply(ChatEvent::Submit)
        };

        let ChatCommand::Ask { question } = command?;
        tracing::info!(
            name: "chat.question.submitted",
            session_id = %self.inner.id,
            chars = question.chars().count(),
            "Question submitted"
        );

        let on_success = Arc::clone(&self.inner);
        let on_error = Arc::clone(&self.inner);
        let options = MutateOptions::new()
            .on_success(move |response| {
                tracing::info!(
                    name: "chat.question.answered",
                    session_id = %on_success.id,
                    sources = response.sources.len(),
                    "Question answered"
                );
                on_success
                    .view()
                    .apply(ChatEvent::Succeeded(response.clone()));
            })
            .on_error(move |err| {
                let reason = format!("session {}: {err}", on_error.id);
                on_error.view().apply(ChatEvent::Failed { reason });
            });

        Some(self.inner.mutation.mutate(question, options))
    }

    fn touch(&self) {
        self.inner.touch();
    }

    /// Check if the session has been idle longer than `timeout`.
    #[must_use]
    pub fn is_expired_with_timeout(&self, timeout: Duration) -> bool {
        let last = *self
            .inner
            .last_activity
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // Negative durations (clock skew) never expire.
        (Utc::now() - last).to_std().is_ok_and(|idle| idle > timeout)
    }
}

/// Thread-safe store for page sessions.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

#[derive(Debug)]
struct SessionStoreInner {
    api: Arc<dyn QuestionApi>,
    sessions: RwLock<HashMap<String, ChatSession>>,
}

impl SessionStore {
    /// Create a store whose sessions ask questions through `api`.
    #[must_use]
    pub fn new(api: Arc<dyn QuestionApi>) -> Self {
        Self {
            inner: Arc::new(SessionStoreInner {
                api,
                sessions: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Create a new session and return it.
    #[must_use]
    pub fn create(&self) -> ChatSession {
        let id = Uuid::new_v4().to_string();
        let session = ChatSession::new(id.clone(), Arc::clone(&self.inner.api));
        self.inner
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, session.clone());
        session
    }

    /// Get a session by ID, refreshing its activity time.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<ChatSession> {
        let session = self
            .inner
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()?;
        session.touch();
        Some(session)
    }

    /// Remove a session by ID.
    pub fn remove(&self, id: &str) -> Option<ChatSession> {
        self.inner
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
    }

    /// Get the number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if there are no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove sessions that have been inactive longer than the timeout.
    ///
    /// Returns the number of sessions removed.
    pub fn cleanup_expired_with_timeout(&self, timeout: Duration) -> usize {
        let mut guard = self
            .inner
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = guard.len();
        guard.retain(|_, session| !session.is_expired_with_timeout(timeout));
        before - guard.len()
    }
}
