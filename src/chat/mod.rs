//! Chat transcript and the state machine driving it.
//!
//! # Architecture
//!
//! - [`Message`]: immutable transcript entry
//! - [`ChatView`]: the explicit state machine; events in, commands out
//! - [`suggestions`]: canned prompts shown before the first message
//!
//! The view never performs I/O. A [`ChatCommand::Ask`] returned from
//! [`ChatView::apply`] is the caller's cue to start the question request and
//! feed its outcome back as [`ChatEvent::Succeeded`] or [`ChatEvent::Failed`].

mod message;
pub mod suggestions;
mod view;

pub use message::{Message, Role};
pub use suggestions::{PromptSuggestion, SUGGESTIONS};
pub use view::{ChatCommand, ChatEvent, ChatPhase, ChatView, FAILURE_MESSAGE};
