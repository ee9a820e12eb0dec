//! Folds the `pulldown-cmark` event stream into [`Block`]s.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use super::{Block, Inline, ListKind, plain_text, sanitize_url};

/// Deepest container nesting kept (quotes, lists and list items each count
/// as one level). Deeper containers are dropped and their content joins the
/// innermost kept one.
pub const MAX_NESTING: usize = 32;

/// Parse `input` into blocks.
///
/// Raw HTML comes through as text and link/image destinations are passed
/// through [`sanitize_url`].
#[must_use]
pub fn parse(input: &str) -> Vec<Block> {
    let mut builder = Builder::new();
    for event in Parser::new_ext(input, Options::empty()) {
        builder.push(event);
    }
    builder.finish()
}

enum Container {
    Root,
    Quote,
    List { kind: ListKind, tight: bool, items: Vec<Vec<Block>> },
    Item,
}

enum Leaf {
    Paragraph,
    Heading(u8),
    Code { language: Option<String>, code: String },
}

enum Span {
    Strong,
    Emphasis,
    Link(String),
    Image(String),
}

struct Builder {
    containers: Vec<(Container, Vec<Block>)>,
    dropped_containers: usize,
    leaf: Option<(Leaf, Vec<Inline>)>,
    spans: Vec<(Span, Vec<Inline>)>,
    dropped_spans: usize,
}

impl Builder {
    fn new() -> Self {
        Self {
            containers: vec![(Container::Root, Vec::new())],
            dropped_containers: 0,
            leaf: None,
            spans: Vec::new(),
            dropped_spans: 0,
        }
    }

    fn push(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                if let Some((Leaf::Code { code, .. }, _)) = &mut self.leaf {
                    code.push_str(&text);
                } else {
                    self.inline(Inline::Text(text.into_string()));
                }
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                self.inline(Inline::Text(html.into_string()));
            }
            Event::Code(code) => self.inline(Inline::Code(code.into_string())),
            Event::SoftBreak => self.inline(Inline::Text("\n".into())),
            Event::HardBreak => self.inline(Inline::LineBreak),
            Event::Rule => {
                self.close_leaf();
                self.block(Block::Rule);
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph | Tag::HtmlBlock => {
                self.close_leaf();
                self.loosen_list();
                self.leaf = Some((Leaf::Paragraph, Vec::new()));
            }
            Tag::Heading { level, .. } => {
                self.close_leaf();
                self.leaf = Some((Leaf::Heading(heading_level(level)), Vec::new()));
            }
            Tag::CodeBlock(kind) => {
                self.close_leaf();
                let language = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(str::to_string),
                    CodeBlockKind::Indented => None,
                };
                let code = String::new();
                self.leaf = Some((Leaf::Code { language, code }, Vec::new()));
            }
            Tag::BlockQuote(_) => self.open_container(Container::Quote),
            Tag::List(start) => {
                let kind = start.map_or(ListKind::Bullet, |start| ListKind::Ordered { start });
                self.open_container(Container::List {
                    kind,
                    tight: true,
                    items: Vec::new(),
                });
            }
            Tag::Item => self.open_container(Container::Item),
            Tag::Strong => self.open_span(Span::Strong),
            Tag::Emphasis => self.open_span(Span::Emphasis),
            Tag::Link { dest_url, .. } => self.open_span(Span::Link(sanitize_url(&dest_url))),
            Tag::Image { dest_url, .. } => self.open_span(Span::Image(sanitize_url(&dest_url))),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph | TagEnd::HtmlBlock | TagEnd::Heading(_) | TagEnd::CodeBlock => {
                self.close_leaf();
            }
            TagEnd::BlockQuote(_) | TagEnd::List(_) | TagEnd::Item => self.close_container(),
            TagEnd::Strong | TagEnd::Emphasis | TagEnd::Link | TagEnd::Image => self.close_span(),
            _ => {}
        }
    }

    fn open_container(&mut self, container: Container) {
        self.close_leaf();
        if self.containers.len() >= MAX_NESTING {
            self.dropped_containers += 1;
            return;
        }
        self.containers.push((container, Vec::new()));
    }

    fn close_container(&mut self) {
        self.close_leaf();
        if self.dropped_containers > 0 {
            self.dropped_containers -= 1;
            return;
        }
        if self.containers.len() == 1 {
            return;
        }
        let Some((container, blocks)) = self.containers.pop() else {
            return;
        };
        match container {
            Container::Root => {}
            Container::Quote => self.block(Block::Blockquote(blocks)),
            Container::List { kind, tight, items } => {
                self.block(Block::List { kind, tight, items });
            }
            Container::Item => match self.containers.last_mut() {
                Some((Container::List { items, .. }, _)) => items.push(blocks),
                _ => {
                    for block in blocks {
                        self.block(block);
                    }
                }
            },
        }
    }

    /// An explicit paragraph inside a list item makes the list loose.
    fn loosen_list(&mut self) {
        if self.dropped_containers > 0 {
            return;
        }
        let depth = self.containers.len();
        if depth < 2 || !matches!(self.containers[depth - 1].0, Container::Item) {
            return;
        }
        if let Container::List { tight, .. } = &mut self.containers[depth - 2].0 {
            *tight = false;
        }
    }

    fn open_span(&mut self, span: Span) {
        if self.spans.len() >= MAX_NESTING {
            self.dropped_spans += 1;
            return;
        }
        self.spans.push((span, Vec::new()));
    }

    fn close_span(&mut self) {
        if self.dropped_spans > 0 {
            self.dropped_spans -= 1;
            return;
        }
        let Some((span, content)) = self.spans.pop() else {
            return;
        };
        let inline = match span {
            Span::Strong => Inline::Strong(content),
            Span::Emphasis => Inline::Emphasis(content),
            Span::Link(href) => Inline::Link { href, content },
            Span::Image(src) => Inline::Image {
                src,
                alt: plain_text(&content),
            },
        };
        self.inline(inline);
    }

    fn inline(&mut self, inline: Inline) {
        let target = if let Some((_, content)) = self.spans.last_mut() {
            content
        } else {
            // Tight list items carry their text without a paragraph.
            &mut self
                .leaf
                .get_or_insert_with(|| (Leaf::Paragraph, Vec::new()))
                .1
        };
        let merged = match (&inline, target.last_mut()) {
            (Inline::Text(text), Some(Inline::Text(last))) => {
                last.push_str(text);
                true
            }
            _ => false,
        };
        if !merged {
            target.push(inline);
        }
    }

    fn close_leaf(&mut self) {
        while !self.spans.is_empty() {
            self.close_span();
        }
        let Some((leaf, content)) = self.leaf.take() else {
            return;
        };
        match leaf {
            Leaf::Paragraph if content.is_empty() => {}
            Leaf::Paragraph => self.block(Block::Paragraph(content)),
            Leaf::Heading(level) => self.block(Block::Heading { level, content }),
            Leaf::Code { language, code } => self.block(Block::Code { language, code }),
        }
    }

    fn block(&mut self, block: Block) {
        if let Some((_, blocks)) = self.containers.last_mut() {
            blocks.push(block);
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.close_leaf();
        while self.containers.len() > 1 {
            self.dropped_containers = 0;
            self.close_container();
        }
        self.containers
            .pop()
            .map(|(_, blocks)| blocks)
            .unwrap_or_default()
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
