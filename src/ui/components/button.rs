//! Primary icon button.

use leptos::prelude::*;

const CLASSES: &str = "inline-flex h-8 w-8 items-center justify-center font-medium \
                       bg-primary text-primary-foreground hover:bg-primary/90 \
                       transition-colors focus-visible:outline-none focus-visible:ring-2 \
                       focus-visible:ring-ring focus-visible:ring-offset-2 \
                       disabled:pointer-events-none disabled:opacity-50";

/// ShadCN-style icon-only button.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <Button button_type="submit" label="Send message">
///         <ArrowUpIcon />
///     </Button>
/// }
/// ```
#[component]
pub fn Button(
    /// Whether the button is disabled.
    #[prop(default = false)]
    disabled: bool,
    /// Button type attribute.
    #[prop(default = "button")]
    button_type: &'static str,
    /// Accessible label, also used as the tooltip.
    label: &'static str,
    /// Additional CSS classes.
    #[prop(default = "")]
    class: &'static str,
    /// Button content.
    children: Children,
) -> impl IntoView {
    let classes = format!("{CLASSES} {class}");

    view! {
        <button type=button_type class=classes disabled=disabled aria-label=label title=label>
            {children()}
        </button>
    }
}
