//! Chat-specific UI components.
//!
//! The whole chat area is one HTMX swap target, `#chat-panel`, and every
//! form endpoint answers with a freshly rendered panel. While a question is
//! pending the loader polls the transcript URL and swaps only
//! `#chat-messages`, so the prompt form is left alone until the answer
//! lands.

mod empty_state;
mod input_area;
mod message_list;
mod panel;
mod suggestions;

pub use empty_state::EmptyState;
pub use input_area::ChatInputArea;
pub use message_list::{CHAT_MESSAGES_ID, MessageBubble, MessageList};
pub use panel::{CHAT_PANEL_ID, ChatPanel};
pub use suggestions::PromptSuggestions;

/// URLs of the endpoints serving one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRoutes {
    session_id: String,
}

impl ChatRoutes {
    #[must_use]
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
        }
    }

    #[must_use]
    pub fn panel(&self) -> String {
        format!("/chat/{}", self.session_id)
    }

    #[must_use]
    pub fn submit(&self) -> String {
        format!("/chat/{}/submit", self.session_id)
    }

    /// Input buffer sync.
    #[must_use]
    pub fn input(&self) -> String {
        format!("/chat/{}/input", self.session_id)
    }

    #[must_use]
    pub fn suggestion(&self, index: usize) -> String {
        format!("/chat/{}/suggestions/{index}", self.session_id)
    }

    /// Transcript fragment, polled while a question is pending.
    #[must_use]
    pub fn transcript(&self) -> String {
        format!("/chat/{}/transcript", self.session_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_are_scoped_to_the_session() {
        let routes = ChatRoutes::new("abc");
        assert_eq!(routes.panel(), "/chat/abc");
        assert_eq!(routes.submit(), "/chat/abc/submit");
        assert_eq!(routes.input(), "/chat/abc/input");
        assert_eq!(routes.suggestion(2), "/chat/abc/suggestions/2");
        assert_eq!(routes.transcript(), "/chat/abc/transcript");
    }
}
