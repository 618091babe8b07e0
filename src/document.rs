//! Element tree the copier resolves ids against.
//!
//! A `Document` is a forest of `Element`s, each carrying a string id, a kind,
//! its own text, and child elements. Documents are usually built from
//! Markdown: every heading opens a section that owns the blocks below it, so
//! copying a section id copies the heading together with its body.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use pulldown_cmark::{CodeBlockKind, Event as MdEvent, Options, Parser, Tag};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),
    #[error("document is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    Section { level: u8 },
    Heading { level: u8 },
    Paragraph,
    CodeBlock { lang: Option<String> },
    ListItem,
    Quote,
    /// Raw HTML block, kept as its source text.
    Html,
}

impl ElementKind {
    /// Short label used by listings.
    pub fn label(&self) -> &'static str {
        match self {
            ElementKind::Section { .. } => "section",
            ElementKind::Heading { .. } => "heading",
            ElementKind::Paragraph => "paragraph",
            ElementKind::CodeBlock { .. } => "code",
            ElementKind::ListItem => "item",
            ElementKind::Quote => "quote",
            ElementKind::Html => "html",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    id: String,
    kind: ElementKind,
    text: String,
    children: Vec<Element>,
}

impl Element {
    pub fn new(id: impl Into<String>, kind: ElementKind, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            text: text.into(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Text owned directly by this element, excluding children.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Rendered text of the element and all of its descendants.
    ///
    /// Non-empty pieces are joined with `\n`, so selecting a node yields the
    /// same text a reader sees top to bottom.
    pub fn text_content(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if !self.text.is_empty() {
            parts.push(self.text.clone());
        }
        for child in &self.children {
            let content = child.text_content();
            if !content.is_empty() {
                parts.push(content);
            }
        }
        parts.join("\n")
    }

    fn find(&self, id: &str) -> Option<&Element> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    fn walk<'a>(&'a self, depth: usize, out: &mut Vec<(usize, &'a Element)>) {
        out.push((depth, self));
        for child in &self.children {
            child.walk(depth + 1, out);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    roots: Vec<Element>,
}

impl Document {
    pub fn new(roots: Vec<Element>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[Element] {
        &self.roots
    }

    /// Resolve an element by id. The first match in document order wins.
    pub fn get_element_by_id(&self, id: &str) -> Option<&Element> {
        self.roots.iter().find_map(|root| root.find(id))
    }

    /// All elements in document order, paired with their nesting depth.
    pub fn elements(&self) -> Vec<(usize, &Element)> {
        let mut out = Vec::new();
        for root in &self.roots {
            root.walk(0, &mut out);
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let bytes = fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DocumentError> {
        let raw = std::str::from_utf8(bytes)?;
        Ok(Self::from_markdown(raw))
    }

    pub fn from_markdown(raw: &str) -> Self {
        let parser = Parser::new_ext(raw, Options::ENABLE_HEADING_ATTRIBUTES);
        let mut builder = TreeBuilder::default();
        for ev in parser {
            builder.push_event(ev);
        }
        Self::new(builder.finish())
    }
}

/// Lowercase anchor slug: alphanumerics kept, runs of whitespace, `-` and `_`
/// collapsed to a single `-`, everything else dropped.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for ch in text.trim().chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        slug.push_str("section");
    }
    slug
}

#[derive(Debug)]
enum FrameKind {
    Heading { level: u8, explicit_id: Option<String> },
    Paragraph,
    CodeBlock { lang: Option<String> },
    Item,
    Quote,
    Html,
    // Heading or paragraph folded into an enclosing list item or quote.
    Folded,
    // Inline or unsupported tags; only tracked so `End` events pair up.
    Other,
}

#[derive(Debug)]
struct Frame {
    kind: FrameKind,
    id: String,
    text: String,
    children: Vec<Element>,
}

#[derive(Debug, Default)]
struct Counters {
    paragraph: usize,
    code: usize,
    item: usize,
    quote: usize,
    html: usize,
}

#[derive(Debug, Default)]
struct TreeBuilder {
    roots: Vec<Element>,
    sections: Vec<Element>,
    frames: Vec<Frame>,
    used_ids: HashSet<String>,
    counters: Counters,
}

impl TreeBuilder {
    fn push_event(&mut self, ev: MdEvent<'_>) {
        match ev {
            MdEvent::Start(tag) => self.start(tag),
            MdEvent::End(_) => self.end(),
            MdEvent::Text(text) | MdEvent::Code(text) | MdEvent::Html(text) => {
                self.push_text(&text)
            }
            MdEvent::SoftBreak => {
                if self.in_code_block() {
                    self.push_text("\n");
                } else {
                    self.push_text(" ");
                }
            }
            MdEvent::HardBreak => self.push_text("\n"),
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        let kind = match tag {
            Tag::Paragraph | Tag::Heading { .. } if self.in_container() => {
                // Headings and paragraphs inside list items and quotes fold
                // into the container's own text, one line each.
                if let Some(frame) = self.block_frame_mut()
                    && !frame.text.is_empty()
                    && !frame.text.ends_with('\n')
                {
                    frame.text.push('\n');
                }
                FrameKind::Folded
            }
            Tag::Heading { level, id, .. } => FrameKind::Heading {
                level: level as u8,
                explicit_id: id.map(|id| id.to_string()),
            },
            Tag::Paragraph => FrameKind::Paragraph,
            Tag::CodeBlock(CodeBlockKind::Fenced(info)) => {
                let (lang, explicit_id) = parse_code_info(&info);
                self.open(FrameKind::CodeBlock { lang }, explicit_id);
                return;
            }
            Tag::CodeBlock(CodeBlockKind::Indented) => FrameKind::CodeBlock { lang: None },
            Tag::Item => FrameKind::Item,
            Tag::BlockQuote(_) => FrameKind::Quote,
            Tag::HtmlBlock => FrameKind::Html,
            _ => FrameKind::Other,
        };
        self.open(kind, None);
    }

    fn open(&mut self, kind: FrameKind, explicit_id: Option<String>) {
        let id = match &kind {
            FrameKind::Heading { .. } | FrameKind::Folded | FrameKind::Other => String::new(),
            FrameKind::Paragraph => {
                self.counters.paragraph += 1;
                self.claim(&format!("p-{}", self.counters.paragraph))
            }
            FrameKind::CodeBlock { .. } => match explicit_id {
                Some(id) => self.claim_explicit(&id),
                None => {
                    self.counters.code += 1;
                    self.claim(&format!("code-{}", self.counters.code))
                }
            },
            FrameKind::Item => {
                self.counters.item += 1;
                self.claim(&format!("li-{}", self.counters.item))
            }
            FrameKind::Quote => {
                self.counters.quote += 1;
                self.claim(&format!("quote-{}", self.counters.quote))
            }
            FrameKind::Html => {
                self.counters.html += 1;
                self.claim(&format!("html-{}", self.counters.html))
            }
        };
        self.frames.push(Frame {
            kind,
            id,
            text: String::new(),
            children: Vec::new(),
        });
    }

    fn end(&mut self) {
        let Some(frame) = self.frames.pop() else {
            return;
        };
        match frame.kind {
            FrameKind::Other => {}
            FrameKind::Folded => {
                if let Some(container) = self.block_frame_mut() {
                    container.text.push('\n');
                }
            }
            FrameKind::Heading { level, explicit_id } => {
                self.open_section(level, explicit_id, frame.text.trim().to_string());
            }
            FrameKind::Paragraph => {
                let element = Element::new(frame.id, ElementKind::Paragraph, frame.text.trim());
                self.attach(element);
            }
            FrameKind::CodeBlock { lang } => {
                let text = frame.text.strip_suffix('\n').unwrap_or(&frame.text);
                let element = Element::new(frame.id, ElementKind::CodeBlock { lang }, text);
                self.attach(element);
            }
            FrameKind::Item => {
                let mut element = Element::new(frame.id, ElementKind::ListItem, frame.text.trim());
                element.children = frame.children;
                self.attach(element);
            }
            FrameKind::Quote => {
                let mut element = Element::new(frame.id, ElementKind::Quote, frame.text.trim());
                element.children = frame.children;
                self.attach(element);
            }
            FrameKind::Html => {
                let element = Element::new(frame.id, ElementKind::Html, frame.text.trim());
                self.attach(element);
            }
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(frame) = self.block_frame_mut() {
            frame.text.push_str(text);
        }
    }

    fn in_code_block(&self) -> bool {
        self.frames
            .iter()
            .any(|f| matches!(f.kind, FrameKind::CodeBlock { .. }))
    }

    fn in_container(&self) -> bool {
        self.frames
            .iter()
            .any(|f| matches!(f.kind, FrameKind::Item | FrameKind::Quote))
    }

    /// Innermost frame that owns text (skips inline and folded frames).
    fn block_frame_mut(&mut self) -> Option<&mut Frame> {
        self.frames
            .iter_mut()
            .rev()
            .find(|f| !matches!(f.kind, FrameKind::Other | FrameKind::Folded))
    }

    /// Attach a finished block to the innermost open container: a list item
    /// or quote frame first, then the current section, then the root.
    fn attach(&mut self, element: Element) {
        if let Some(frame) = self
            .frames
            .iter_mut()
            .rev()
            .find(|f| matches!(f.kind, FrameKind::Item | FrameKind::Quote))
        {
            frame.children.push(element);
        } else if let Some(section) = self.sections.last_mut() {
            section.children.push(element);
        } else {
            self.roots.push(element);
        }
    }

    fn open_section(&mut self, level: u8, explicit_id: Option<String>, title: String) {
        while self
            .sections
            .last()
            .is_some_and(|s| matches!(s.kind, ElementKind::Section { level: l } if l >= level))
        {
            self.close_section();
        }
        let id = match explicit_id {
            Some(id) => self.claim_explicit(&id),
            None => self.claim(&slugify(&title)),
        };
        let heading_id = self.claim(&format!("{id}-title"));
        let heading = Element::new(heading_id, ElementKind::Heading { level }, title);
        let section = Element::new(id, ElementKind::Section { level }, "").with_child(heading);
        self.sections.push(section);
    }

    fn close_section(&mut self) {
        if let Some(section) = self.sections.pop() {
            if let Some(parent) = self.sections.last_mut() {
                parent.children.push(section);
            } else {
                self.roots.push(section);
            }
        }
    }

    fn claim_explicit(&mut self, id: &str) -> String {
        let claimed = self.claim(id);
        if claimed != id {
            tracing::warn!(id, renamed = %claimed, "duplicate element id");
        }
        claimed
    }

    /// Reserve `base`, or the first free `base-N` when it is taken.
    fn claim(&mut self, base: &str) -> String {
        if self.used_ids.insert(base.to_string()) {
            return base.to_string();
        }
        let mut n = 1;
        loop {
            let candidate = format!("{base}-{n}");
            if self.used_ids.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }

    fn finish(mut self) -> Vec<Element> {
        while !self.frames.is_empty() {
            self.end();
        }
        while !self.sections.is_empty() {
            self.close_section();
        }
        self.roots
    }
}

/// Split a fenced code info string into its language and an optional `#id`.
fn parse_code_info(info: &str) -> (Option<String>, Option<String>) {
    let mut lang = None;
    let mut id = None;
    for token in info.split_whitespace() {
        if let Some(rest) = token.strip_prefix('#') {
            if !rest.is_empty() && id.is_none() {
                id = Some(rest.to_string());
            }
        } else if lang.is_none() {
            lang = Some(token.to_string());
        }
    }
    (lang, id)
}
