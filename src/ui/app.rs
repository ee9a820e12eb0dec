//! Page shell and HTML rendering entry points.

use leptos::prelude::*;
use leptos::tachys::view::RenderHtml;

use crate::chat::ChatPhase;
use crate::config::UiConfig;
use crate::session::ChatSnapshot;
use crate::theme::Theme;
use crate::ui::chat::{ChatPanel, ChatRoutes, MessageList};
use crate::ui::components::{SystemMessage, SystemMessageVariant, ThemeToggle};

/// Render a view to an HTML string under a fresh reactive owner.
fn render<F, V>(build: F) -> String
where
    F: FnOnce() -> V,
    V: IntoView,
{
    Owner::new().with(|| build().to_html())
}

/// Full document for a new page session.
#[must_use]
pub fn render_page(snapshot: ChatSnapshot, theme: Theme, ui: &UiConfig) -> String {
    let ui = ui.clone();
    let body = render(move || view! { <App snapshot=snapshot theme=theme ui=ui /> });
    format!("<!DOCTYPE html>{body}")
}

/// Just the chat panel, for HTMX swaps.
#[must_use]
pub fn render_panel(snapshot: ChatSnapshot, ui: &UiConfig) -> String {
    let poll_interval_ms = ui.poll_interval_ms;
    render(move || view! { <ChatPanel snapshot=snapshot poll_interval_ms=poll_interval_ms /> })
}

/// Panel for a poll that found the question settled. The textarea is marked
/// `hx-preserve`, so the browser keeps whatever is being typed.
#[must_use]
pub fn render_settled_panel(snapshot: ChatSnapshot, ui: &UiConfig) -> String {
    let poll_interval_ms = ui.poll_interval_ms;
    render(move || {
        view! { <ChatPanel snapshot=snapshot poll_interval_ms=poll_interval_ms keep_input=true /> }
    })
}

/// Just the transcript, for polls while a question is pending.
#[must_use]
pub fn render_transcript(snapshot: ChatSnapshot, ui: &UiConfig) -> String {
    let poll_interval_ms = ui.poll_interval_ms;
    let routes = ChatRoutes::new(snapshot.session_id);
    let pending = snapshot.phase == ChatPhase::Pending;
    let messages = snapshot.messages;
    render(move || {
        view! {
            <MessageList
                messages=messages
                pending=pending
                routes=routes
                poll_interval_ms=poll_interval_ms
            />
        }
    })
}

#[must_use]
pub fn render_theme_toggle(theme: Theme) -> String {
    render(move || view! { <ThemeToggle theme=theme /> })
}

/// Panel replacement shown when the session no longer exists.
#[must_use]
pub fn render_session_expired() -> String {
    render(|| {
        view! {
            <section id="chat-panel" class="flex h-full flex-col items-center justify-center gap-4">
                <SystemMessage variant=SystemMessageVariant::Error>
                    "This chat session has expired. Reload the page to start a new one."
                </SystemMessage>
                <a href="/" class="text-primary text-sm underline">"Reload"</a>
            </section>
        }
    })
}

/// Main application component.
#[component]
fn App(snapshot: ChatSnapshot, theme: Theme, ui: UiConfig) -> impl IntoView {
    let poll_interval_ms = ui.poll_interval_ms;

    view! {
        <html lang="en" class=theme.html_class() data-theme=theme.as_str()>
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <meta name="description" content="AI-powered job search assistant" />

                <title>{ui.title}</title>

                <script src=ui.tailwind_src></script>
                <script src="/static/theme.js"></script>
                <script src=ui.htmx_src></script>
                <script defer src="/static/chat.js"></script>
                <link rel="stylesheet" href="/static/app.css" />
            </head>

            <body class="bg-background text-foreground mx-auto w-full max-w-3xl px-4 antialiased">
                <div class="grid h-screen grid-rows-[auto_1fr_auto] gap-4">
                    <Header theme=theme />
                    <main class="grid min-h-0 grid-rows-[1fr_auto]">
                        <ChatPanel snapshot=snapshot poll_interval_ms=poll_interval_ms />
                    </main>
                    <Footer />
                </div>
            </body>
        </html>
    }
}

#[component]
fn Header(theme: Theme) -> impl IntoView {
    view! {
        <header class="border-border flex items-center justify-between border-b py-3">
            <h1 class="text-[36px]" aria-label="Jobs RAG Chat">"💼"</h1>
            <ThemeToggle theme=theme />
        </header>
    }
}

#[component]
fn Footer() -> impl IntoView {
    view! {
        <footer class="border-border flex flex-col gap-2 border-t py-3">
            <SystemMessage fill=true>
                "This AI assistant may produce inaccurate information. Always verify important details with official sources."
            </SystemMessage>
            <SystemMessage>"Only answer from Argentina for now."</SystemMessage>
        </footer>
    }
}
