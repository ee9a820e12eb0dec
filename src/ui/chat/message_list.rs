//! Transcript rendering.

use leptos::prelude::*;

use super::ChatRoutes;
use crate::chat::{Message, Role};
use crate::ui::components::{Avatar, SourceChip, ThinkingLoader, assistant_avatar_url};
use crate::ui::markdown::Markdown;

const ASSISTANT_BUBBLE: &str =
    "bg-secondary prose prose-sm dark:prose-invert rounded-lg px-3 py-2 text-sm leading-relaxed";
const USER_BUBBLE: &str = "bg-primary text-primary-foreground max-w-[80%] rounded-lg px-3 py-2 \
                           text-sm leading-relaxed font-normal whitespace-pre-wrap break-words";

/// DOM id of the transcript; the pending loader swaps only this element.
pub const CHAT_MESSAGES_ID: &str = "chat-messages";

/// Scrollable list of messages, followed by the loader while pending.
///
/// The loader re-fetches the transcript after `poll_interval_ms`, so the
/// list keeps refreshing until the pending question settles.
#[component]
pub fn MessageList(
    messages: Vec<Message>,
    pending: bool,
    routes: ChatRoutes,
    poll_interval_ms: u64,
) -> impl IntoView {
    let loader = pending.then(|| {
        let trigger = format!("load delay:{poll_interval_ms}ms");
        let target = format!("#{CHAT_MESSAGES_ID}");
        view! {
            <div
                class="flex gap-3"
                data-testid="pending"
                hx-get=routes.transcript()
                hx-trigger=trigger
                hx-target=target
                hx-swap="outerHTML"
            >
                <Avatar src=assistant_avatar_url() alt="Assistant" fallback="AI" />
                <div class="flex items-center">
                    <ThinkingLoader />
                </div>
            </div>
        }
    });

    view! {
        <div id=CHAT_MESSAGES_ID class="flex-1 overflow-y-auto" aria-live="polite" aria-label="Chat messages">
            <div class="space-y-4 p-2">
                {messages
                    .into_iter()
                    .map(|message| view! { <MessageBubble message=message /> })
                    .collect_view()}
                {loader}
            </div>
        </div>
    }
}

/// One transcript entry.
///
/// Assistant messages sit on the left with the assistant avatar, markdown
/// content and source chips; user messages sit on the right as plain text.
#[component]
pub fn MessageBubble(message: Message) -> impl IntoView {
    let id = message.id.to_string();
    let is_user = message.is_user();
    let role = match message.role {
        Role::User => "user",
        Role::Assistant => "assistant",
    };

    let body = if is_user {
        view! {
            <div class=USER_BUBBLE>{message.content}</div>
            <Avatar alt="User" fallback="U" class="bg-muted" />
        }
        .into_any()
    } else {
        let sources = message.sources().to_vec();
        view! {
            <Avatar src=assistant_avatar_url() alt="Assistant" fallback="AI" />
            <div class="flex max-w-[80%] flex-col gap-2">
                <Markdown content=message.content class=ASSISTANT_BUBBLE />
                <div class="flex flex-wrap gap-2">
                    {sources
                        .into_iter()
                        .map(|href| view! { <SourceChip href=href /> })
                        .collect_view()}
                </div>
            </div>
        }
        .into_any()
    };

    let classes = if is_user {
        "flex justify-end gap-3"
    } else {
        "flex gap-3"
    };

    view! {
        <div class=classes data-message-id=id data-role=role>
            {body}
        </div>
    }
}
