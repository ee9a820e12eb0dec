//! Canned prompts offered in the empty state.

use leptos::prelude::*;

use super::ChatRoutes;
use super::panel::CHAT_PANEL_ID;
use crate::chat::SUGGESTIONS;

/// One button per suggestion. Picking one fills the input; it never sends.
#[component]
pub fn PromptSuggestions(routes: ChatRoutes) -> impl IntoView {
    let target = format!("#{CHAT_PANEL_ID}");

    view! {
        <div class="w-full space-y-1 py-4" data-testid="suggestions">
            {SUGGESTIONS
                .iter()
                .enumerate()
                .map(|(index, suggestion)| {
                    let (highlight, rest) = suggestion.split();
                    view! {
                        <button
                            type="button"
                            class="hover:bg-accent w-full justify-start rounded-xl px-3 py-2 text-left text-sm transition-colors"
                            hx-post=routes.suggestion(index)
                            hx-target=target.clone()
                            hx-swap="outerHTML"
                        >
                            <span class="text-primary font-medium">{highlight}</span>
                            <span class="text-muted-foreground">{rest}</span>
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
