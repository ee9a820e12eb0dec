//! The swappable chat panel.

use leptos::prelude::*;

use super::{ChatInputArea, ChatRoutes, EmptyState, MessageList, PromptSuggestions};
use crate::chat::ChatPhase;
use crate::session::ChatSnapshot;

/// DOM id of the panel; every chat endpoint swaps it.
pub const CHAT_PANEL_ID: &str = "chat-panel";

fn phase_name(phase: ChatPhase) -> &'static str {
    match phase {
        ChatPhase::Empty => "empty",
        ChatPhase::Conversing => "conversing",
        ChatPhase::Pending => "pending",
    }
}

/// Messages (or the empty state), suggestions and the input form.
///
/// With `keep_input` the browser keeps its live textarea across the swap.
#[component]
pub fn ChatPanel(
    snapshot: ChatSnapshot,
    poll_interval_ms: u64,
    #[prop(optional)] keep_input: bool,
) -> impl IntoView {
    let routes = ChatRoutes::new(snapshot.session_id);
    let pending = snapshot.phase == ChatPhase::Pending;

    let body = if snapshot.phase == ChatPhase::Empty {
        view! { <EmptyState /> }.into_any()
    } else {
        view! {
            <MessageList
                messages=snapshot.messages
                pending=pending
                routes=routes.clone()
                poll_interval_ms=poll_interval_ms
            />
        }
        .into_any()
    };

    let suggestions = (snapshot.phase == ChatPhase::Empty)
        .then(|| view! { <PromptSuggestions routes=routes.clone() /> });

    view! {
        <section
            id=CHAT_PANEL_ID
            class="flex h-full min-h-0 flex-col"
            data-phase=phase_name(snapshot.phase)
        >
            <div class="flex min-h-0 flex-1 flex-col items-center justify-center">{body}</div>
            <div class="w-full space-y-2">{suggestions}</div>
            <ChatInputArea routes=routes input=snapshot.input pending=pending keep_input=keep_input />
        </section>
    }
}
