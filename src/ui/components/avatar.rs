//! Avatar component with image and fallback support.

use chrono::{Datelike, Utc};
use leptos::prelude::*;

/// Image of the assistant, rotating daily.
#[must_use]
pub fn assistant_avatar_url() -> String {
    format!("https://robohash.org/{}", Utc::now().day())
}

/// Avatar component for displaying user images.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <Avatar src=assistant_avatar_url() alt="Assistant" fallback="AI" />
/// }
/// ```
#[component]
pub fn Avatar(
    /// Image source URL; the fallback is shown when empty.
    #[prop(optional, into)]
    src: String,
    /// Alt text for the image.
    #[prop(default = "Avatar")]
    alt: &'static str,
    /// Fallback text (initials) when there is no image.
    #[prop(default = "")]
    fallback: &'static str,
    /// Size class (e.g., "h-8 w-8").
    #[prop(default = "h-8 w-8")]
    size: &'static str,
    /// Additional CSS classes.
    #[prop(default = "")]
    class: &'static str,
) -> impl IntoView {
    let container_classes =
        format!("relative flex shrink-0 overflow-hidden rounded-full {size} {class}");

    let image = if src.is_empty() {
        view! {
            <span class="flex h-full w-full items-center justify-center rounded-full bg-muted text-sm font-medium">
                {fallback}
            </span>
        }
        .into_any()
    } else {
        view! { <img class="aspect-square h-full w-full object-cover" src=src alt=alt /> }
            .into_any()
    };

    view! { <span class=container_classes>{image}</span> }
}
