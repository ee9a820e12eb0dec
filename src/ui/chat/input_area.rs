//! Chat input area component.

use leptos::prelude::*;

use super::ChatRoutes;
use super::panel::CHAT_PANEL_ID;
use crate::ui::components::{ArrowUpIcon, Button, SquareIcon};

/// Prompt form.
///
/// Typing is synced to the session in the background; Enter (without
/// Shift) submits. While a question is pending the send button is disabled
/// and shows a square instead of an arrow. `keep_input` marks the textarea
/// `hx-preserve` so a swap does not replace what the user is typing.
#[component]
pub fn ChatInputArea(
    routes: ChatRoutes,
    input: String,
    pending: bool,
    #[prop(optional)] keep_input: bool,
) -> impl IntoView {
    let target = format!("#{CHAT_PANEL_ID}");
    let (icon, label) = if pending {
        (view! { <SquareIcon class="size-3 fill-current" /> }.into_any(), "Stop generation")
    } else {
        (view! { <ArrowUpIcon class="size-5" /> }.into_any(), "Send message")
    };

    view! {
        <form
            class="border-input bg-background w-full rounded-3xl border p-2 shadow-xs"
            hx-post=routes.submit()
            hx-target=target
            hx-swap="outerHTML"
        >
            <textarea
                id="chat-input"
                name="message"
                rows="1"
                autofocus=true
                placeholder="Ask about jobs or companies..."
                class="text-primary min-h-[44px] w-full resize-none border-none bg-transparent px-2 py-2 shadow-none outline-none focus-visible:ring-0"
                hx-post=routes.input()
                hx-trigger="input changed delay:300ms"
                hx-swap="none"
                hx-preserve=keep_input.then_some("true")
                onkeydown="if (event.key === 'Enter' && !event.shiftKey) { event.preventDefault(); this.form.requestSubmit(); }"
            >
                {input}
            </textarea>
            <div class="flex items-center justify-end gap-2 pt-2">
                <Button
                    button_type="submit"
                    disabled=pending
                    label=label
                    class="rounded-full"
                >
                    {icon}
                </Button>
            </div>
        </form>
    }
}
