//! Text shimmer shown while an answer is being produced.

use leptos::prelude::*;

#[component]
pub fn ThinkingLoader(
    #[prop(default = "Thinking...")]
    text: &'static str,
) -> impl IntoView {
    view! {
        <div class="thinking-loader text-sm font-medium" role="status" aria-live="polite">
            <span class="text-shimmer">{text}</span>
        </div>
    }
}
