//! Inline notice used for the page disclaimers.

use leptos::prelude::*;

use super::icons::{AlertTriangleIcon, InfoIcon, XCircleIcon};

/// Notice tone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SystemMessageVariant {
    /// Neutral information.
    Action,
    /// Something the reader should double-check.
    #[default]
    Warning,
    /// Something went wrong.
    Error,
}

impl SystemMessageVariant {
    /// Border and text colours.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Action => "border border-gray-200 text-gray-600 dark:border-gray-900/50 dark:text-zinc-500",
            Self::Warning => "border border-amber-200 text-amber-800 dark:border-amber-900/50 dark:text-amber-200",
            Self::Error => "border border-red-200 text-red-800 dark:border-red-900/50 dark:text-red-200",
        }
    }

    /// Background, depending on whether the notice is filled.
    #[must_use]
    pub fn fill_classes(self, fill: bool) -> &'static str {
        match (self, fill) {
            (_, false) => "bg-transparent",
            (Self::Action, true) => "bg-gray-100 border-transparent dark:bg-zinc-900 dark:border-transparent",
            (Self::Warning, true) => "bg-amber-50 border-transparent dark:bg-amber-950/30 dark:border-transparent",
            (Self::Error, true) => "bg-red-50 border-transparent dark:bg-red-950/30 dark:border-transparent",
        }
    }
}

#[component]
pub fn SystemMessage(
    #[prop(default = SystemMessageVariant::Warning)]
    variant: SystemMessageVariant,
    /// Paint a tinted background instead of an outline only.
    #[prop(default = false)]
    fill: bool,
    children: Children,
) -> impl IntoView {
    let classes = format!(
        "flex items-start gap-3 rounded-lg px-4 py-3 text-sm {} {}",
        variant.classes(),
        variant.fill_classes(fill)
    );

    let icon = match variant {
        SystemMessageVariant::Action => view! { <InfoIcon /> }.into_any(),
        SystemMessageVariant::Warning => view! { <AlertTriangleIcon /> }.into_any(),
        SystemMessageVariant::Error => view! { <XCircleIcon /> }.into_any(),
    };

    view! {
        <div class=classes role="note">
            <span class="mt-0.5 shrink-0">{icon}</span>
            <p class="flex-1 leading-relaxed">{children()}</p>
        </div>
    }
}
