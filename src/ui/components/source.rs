//! Citation chip linking to one answer source.

use leptos::prelude::*;
use url::Url;

use super::icons::GlobeIcon;

/// Display label and favicon for a source URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLabel {
    pub text: String,
    pub favicon: Option<String>,
}

impl SourceLabel {
    /// Derive the label from `href`: the host without `www.`, or the raw
    /// string when it is not an absolute URL.
    #[must_use]
    pub fn from_href(href: &str) -> Self {
        match Url::parse(href).ok().and_then(|u| u.host_str().map(str::to_string)) {
            Some(host) => Self {
                text: host.strip_prefix("www.").unwrap_or(&host).to_string(),
                favicon: Some(format!(
                    "https://www.google.com/s2/favicons?sz=64&domain_url={host}"
                )),
            },
            None => Self {
                text: href.to_string(),
                favicon: None,
            },
        }
    }
}

/// Clickable source reference opening in a new tab.
#[component]
pub fn SourceChip(#[prop(into)] href: String) -> impl IntoView {
    let label = SourceLabel::from_href(&href);
    let icon = match label.favicon {
        Some(favicon) => {
            view! { <img src=favicon alt="" class="h-4 w-4 rounded-full" loading="lazy" /> }
                .into_any()
        }
        None => view! { <GlobeIcon /> }.into_any(),
    };

    view! {
        <a
            href=href.clone()
            target="_blank"
            rel="noopener noreferrer"
            title=href
            class="source-chip bg-muted hover:bg-muted-foreground/30 text-primary inline-flex h-6 max-w-48 items-center gap-1 overflow-hidden rounded-full py-0 pl-1 pr-2 text-xs no-underline transition-colors duration-150"
        >
            {icon}
            <span class="truncate text-center font-normal">{label.text}</span>
        </a>
    }
}
