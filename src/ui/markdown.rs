//! Markdown renderer for assistant answers.
//!
//! Every [`Block`] and [`Inline`] kind maps to one element with a fixed set
//! of classes. Text always goes through Leptos escaping, so markup in an
//! answer shows up as text.

use leptos::prelude::*;

use crate::markdown::{self, Block, Inline, ListKind};

const H1: &str = "mt-6 mb-4 text-[18px] leading-tight font-bold first:mt-0";
const H2: &str = "mt-5 mb-3 text-[17px] leading-tight font-semibold first:mt-0";
const H3: &str = "mt-4 mb-2 text-[16px] leading-snug font-semibold first:mt-0";
const H4: &str = "mt-3 mb-2 text-[15px] leading-snug font-medium first:mt-0";
const PARAGRAPH: &str = "mb-3 text-[14px] leading-relaxed last:mb-0";
const LINK: &str = "text-purple-600 underline decoration-purple-300 underline-offset-2 \
                    transition-colors hover:text-purple-800 dark:text-purple-400 \
                    dark:decoration-purple-700 dark:hover:text-purple-300";
const BULLET_LIST: &str = "mb-3 ml-4 list-disc space-y-1.5 text-[14px]";
const ORDERED_LIST: &str = "mb-3 ml-4 list-decimal space-y-1.5 text-[14px]";
const LIST_ITEM: &str = "leading-relaxed";
const BLOCKQUOTE: &str = "text-muted-foreground mb-3 border-l-4 border-purple-300 pl-4 \
                          text-[14px] italic dark:border-purple-700";
const STRONG: &str = "font-semibold";
const EMPHASIS: &str = "italic";
const IMAGE: &str = "my-3 max-h-[200px] mx-auto rounded-lg shadow-sm";
const RULE: &str = "border-border my-4";
const CODE_BLOCK: &str = "mb-3 overflow-x-auto rounded-lg bg-muted p-3 text-[13px] leading-snug";
const INLINE_CODE: &str = "rounded bg-muted px-1 py-0.5 font-mono text-[13px]";

/// Render `content` as markdown inside a wrapper carrying `class`.
#[component]
pub fn Markdown(
    /// Markdown source.
    #[prop(into)]
    content: String,
    /// Classes for the wrapping element.
    #[prop(default = "")]
    class: &'static str,
) -> impl IntoView {
    let blocks = markdown::parse(&content);

    view! {
        <div class=class>{render_blocks(&blocks, false)}</div>
    }
}

fn render_blocks(blocks: &[Block], tight: bool) -> AnyView {
    blocks
        .iter()
        .map(|block| render_block(block, tight))
        .collect_view()
        .into_any()
}

fn render_block(block: &Block, tight: bool) -> AnyView {
    match block {
        Block::Heading { level, content } => {
            let content = render_inlines(content);
            match level {
                1 => view! { <h1 class=H1>{content}</h1> }.into_any(),
                2 => view! { <h2 class=H2>{content}</h2> }.into_any(),
                3 => view! { <h3 class=H3>{content}</h3> }.into_any(),
                4 => view! { <h4 class=H4>{content}</h4> }.into_any(),
                5 => view! { <h5 class=H4>{content}</h5> }.into_any(),
                _ => view! { <h6 class=H4>{content}</h6> }.into_any(),
            }
        }
        // Paragraphs directly inside a tight list item are not wrapped.
        Block::Paragraph(content) if tight => render_inlines(content),
        Block::Paragraph(content) => {
            view! { <p class=PARAGRAPH>{render_inlines(content)}</p> }.into_any()
        }
        Block::List { kind, tight, items } => {
            let items = items
                .iter()
                .map(|item| view! { <li class=LIST_ITEM>{render_blocks(item, *tight)}</li> })
                .collect_view();
            match kind {
                ListKind::Bullet => view! { <ul class=BULLET_LIST>{items}</ul> }.into_any(),
                ListKind::Ordered { start } => {
                    let start = (*start != 1).then(|| start.to_string());
                    view! { <ol class=ORDERED_LIST start=start>{items}</ol> }.into_any()
                }
            }
        }
        Block::Blockquote(children) => {
            view! { <blockquote class=BLOCKQUOTE>{render_blocks(children, false)}</blockquote> }
                .into_any()
        }
        Block::Code { language, code } => {
            let language = language.as_ref().map(|lang| format!("language-{lang}"));
            view! {
                <pre class=CODE_BLOCK>
                    <code class=language>{code.clone()}</code>
                </pre>
            }
            .into_any()
        }
        Block::Rule => view! { <hr class=RULE /> }.into_any(),
    }
}

fn render_inlines(inlines: &[Inline]) -> AnyView {
    inlines.iter().map(render_inline).collect_view().into_any()
}

fn render_inline(inline: &Inline) -> AnyView {
    match inline {
        Inline::Text(text) => text.clone().into_any(),
        Inline::Strong(content) => {
            view! { <strong class=STRONG>{render_inlines(content)}</strong> }.into_any()
        }
        Inline::Emphasis(content) => {
            view! { <em class=EMPHASIS>{render_inlines(content)}</em> }.into_any()
        }
        Inline::Code(code) => view! { <code class=INLINE_CODE>{code.clone()}</code> }.into_any(),
        // A destination dropped by the sanitiser leaves only the label.
        Inline::Link { href, content } if href.is_empty() => render_inlines(content),
        Inline::Link { href, content } => view! {
            <a href=href.clone() target="_blank" rel="noopener noreferrer" class=LINK>
                {render_inlines(content)}
            </a>
        }
        .into_any(),
        Inline::Image { src, .. } if src.is_empty() => ().into_any(),
        Inline::Image { src, alt } => {
            view! { <img src=src.clone() alt=alt.clone() class=IMAGE /> }.into_any()
        }
        Inline::LineBreak => view! { <br /> }.into_any(),
    }
}
