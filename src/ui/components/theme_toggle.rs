//! Light/dark switch in the page header.

use leptos::prelude::*;

use super::icons::{MoonIcon, SunIcon};
use crate::theme::Theme;

/// Checkbox switch posting the chosen theme to `/theme`.
///
/// The class on `<html>` flips immediately on the client; the server
/// answers with a fresh toggle and the persisted cookie.
#[component]
pub fn ThemeToggle(theme: Theme) -> impl IntoView {
    let is_dark = theme == Theme::Dark;

    view! {
        <form
            id="theme-toggle-form"
            class="flex items-center gap-2"
            data-theme=theme.as_str()
            hx-post="/theme"
            hx-trigger="change"
            hx-swap="outerHTML"
        >
            <label for="theme-toggle" class="sr-only">"Toggle theme"</label>
            <SunIcon class="text-muted-foreground" />
            <input
                id="theme-toggle"
                type="checkbox"
                role="switch"
                name="dark"
                value="true"
                checked=is_dark
                aria-label="Toggle dark mode"
                class="theme-switch"
                onchange="document.documentElement.classList.toggle('dark', this.checked)"
            />
            <MoonIcon class="text-muted-foreground" />
        </form>
    }
}
