//! Chat view state machine.

use crate::api::QuestionResponse;

use super::message::Message;

/// Assistant reply appended when a question request fails.
pub const FAILURE_MESSAGE: &str = "Sorry, something went wrong. Please try again.";

/// Coarse state of the view, derived from the transcript and request flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatPhase {
    /// No messages yet; suggestions are offered.
    Empty,
    /// At least one message and no request in flight.
    Conversing,
    /// A question is in flight; submission is disabled.
    Pending,
}

/// Inputs to [`ChatView::apply`].
#[derive(Debug, Clone)]
pub enum ChatEvent {
    /// The input buffer changed.
    InputChanged(String),
    /// The user asked to send the current input buffer.
    Submit,
    /// The in-flight question was answered.
    Succeeded(QuestionResponse),
    /// The in-flight question failed; `reason` is for logs only.
    Failed { reason: String },
}

/// Side effect the caller must perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Send `question` to the backend.
    Ask { question: String },
}

/// In-memory transcript plus input buffer for one page session.
///
/// The transcript is append-only. A submit is accepted only when the
/// trimmed input is non-empty and no request is pending, so every user
/// message is followed by exactly one assistant reply.
#[derive(Debug, Clone, Default)]
pub struct ChatView {
    messages: Vec<Message>,
    input: String,
    pending: bool,
}

impl ChatView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> ChatPhase {
        if self.pending {
            ChatPhase::Pending
        } else if self.messages.is_empty() {
            ChatPhase::Empty
        } else {
            ChatPhase::Conversing
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Whether the send action would currently do anything.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.pending && !self.input.trim().is_empty()
    }

    /// Apply `event`, returning the side effect to run, if any.
    pub fn apply(&mut self, event: ChatEvent) -> Option<ChatCommand> {
        match event {
            ChatEvent::InputChanged(text) => {
                self.input = text;
                None
            }
            ChatEvent::Submit => self.submit(),
            ChatEvent::Succeeded(response) => {
                self.pending = false;
                self.messages.push(Message::assistant(
                    response.answer,
                    Some(response.sources),
                ));
                None
            }
            ChatEvent::Failed { reason } => {
                tracing::error!(
                    name: "chat.question.failed",
                    error = %reason,
                    "Failed to get response"
                );
                self.pending = false;
                self.messages
                    .push(Message::assistant(FAILURE_MESSAGE, None));
                None
            }
        }
    }

    fn submit(&mut self) -> Option<ChatCommand> {
        if self.pending {
            tracing::debug!(name: "chat.submit.ignored", "Request already pending");
            return None;
        }

        let question = self.input.trim();
        if question.is_empty() {
            return None;
        }
        let question = question.to_string();

        self.messages.push(Message::user(question.clone()));
        self.input.clear();
        self.pending = true;

        Some(ChatCommand::Ask { question })
    }
}
