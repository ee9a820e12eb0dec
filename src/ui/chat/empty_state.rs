//! Greeting shown before the first question.

use leptos::prelude::*;

use crate::ui::components::{Avatar, assistant_avatar_url};

#[component]
pub fn EmptyState() -> impl IntoView {
    view! {
        <div class="flex flex-1 items-center justify-center" data-testid="empty-state">
            <div class="text-muted-foreground flex flex-col items-center">
                <Avatar src=assistant_avatar_url() alt="Assistant" fallback="AI" size="h-24 w-24" />
                <h2 class="mb-2 text-lg font-medium">"Jobs RAG Assistant"</h2>
                <p class="text-sm">"Ask me anything about jobs or companies"</p>
            </div>
        </div>
    }
}
