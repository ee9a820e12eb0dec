//! Markdown model for assistant answers.
//!
//! Answers go through `pulldown-cmark` (CommonMark, no extensions) and the
//! event stream is folded into a closed set of block and inline kinds. The
//! UI renders each kind with a fixed style mapping (see `ui::markdown`), so
//! anything outside this set is dropped or shown as plain text. Raw HTML is
//! never interpreted and container nesting is capped at [`MAX_NESTING`].
//!
//! # Example
//!
//! ```rust
//! use jobs_rag_chat::markdown::{self, Block, Inline};
//!
//! let blocks = markdown::parse("# Salarios\n\nEl **promedio** es alto.");
//! assert_eq!(
//!     blocks[0],
//!     Block::Heading { level: 1, content: vec![Inline::Text("Salarios".into())] }
//! );
//! ```

mod links;
mod parse;

pub use links::sanitize_url;
pub use parse::{MAX_NESTING, parse};

/// Block-level element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `#` to `######` heading.
    Heading { level: u8, content: Vec<Inline> },
    Paragraph(Vec<Inline>),
    /// Bullet or ordered list. Each item holds its own blocks.
    List {
        kind: ListKind,
        tight: bool,
        items: Vec<Vec<Block>>,
    },
    Blockquote(Vec<Block>),
    /// Fenced or indented code block.
    Code {
        language: Option<String>,
        code: String,
    },
    /// Horizontal rule.
    Rule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Ordered { start: u64 },
}

/// Inline element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Code(String),
    /// Link whose `href` already went through [`sanitize_url`].
    Link { href: String, content: Vec<Inline> },
    /// Image whose `src` already went through [`sanitize_url`].
    Image { src: String, alt: String },
    LineBreak,
}

/// Concatenated text of `inlines`, dropping formatting.
#[must_use]
pub fn plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(text) | Inline::Code(text) => out.push_str(text),
            Inline::Strong(content) | Inline::Emphasis(content) => {
                out.push_str(&plain_text(content));
            }
            Inline::Link { content, .. } => out.push_str(&plain_text(content)),
            Inline::Image { alt, .. } => out.push_str(alt),
            Inline::LineBreak => out.push('\n'),
        }
    }
    out
}
