// compile.rs - Node tree to pattern text.
//
// Rendering is a single recursive walk. The only rewrites performed are the
// character-class fusion inside `AnyOf`, the separator that keeps a numbered
// backreference apart from a following digit, and the per-dialect spelling
// of a few escapes.

use crate::node::{escape_special, Anchor, Node, Shorthand};

/// Pattern text for an empty expression: matches the empty string.
pub const EMPTY_PATTERN: &str = "(?:)";

/// Target syntax for rendered text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// `\Z` for end of text and `\0` for the null byte.
    #[default]
    Standard,
    /// fancy-regex spelling: `\z` and `\x00`.
    FancyRegex,
}

/// Render a top-level element sequence in the [`Dialect::Standard`] syntax.
///
/// An empty result is replaced by [`EMPTY_PATTERN`] so the output is always a
/// valid standalone pattern.
pub fn render_pattern(nodes: &[Node]) -> String {
    render_pattern_in(nodes, Dialect::Standard)
}

/// Render a top-level element sequence for `dialect`.
pub fn render_pattern_in(nodes: &[Node], dialect: Dialect) -> String {
    let mut renderer = Renderer::new(dialect);
    renderer.render_all(nodes);
    let mut out = renderer.finish();
    if out.is_empty() {
        out.push_str(EMPTY_PATTERN);
    }
    out
}

struct Renderer {
    dialect: Dialect,
    out: String,
    /// Output length right after a numbered backreference was written.
    backref_end: Option<usize>,
}

impl Renderer {
    fn new(dialect: Dialect) -> Self {
        Renderer {
            dialect,
            out: String::new(),
            backref_end: None,
        }
    }

    fn finish(self) -> String {
        self.out
    }

    fn push_str(&mut self, text: &str) {
        // `\1` then `0` would read as `\10`.
        if self.backref_end == Some(self.out.len())
            && text.starts_with(|c: char| c.is_ascii_digit())
        {
            self.out.push_str(EMPTY_PATTERN);
        }
        self.out.push_str(text);
    }

    fn push(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.push_str(c.encode_utf8(&mut buf));
    }

    fn render_all(&mut self, nodes: &[Node]) {
        for node in nodes {
            self.render_node(node);
        }
    }

    fn render_node(&mut self, node: &Node) {
        match node {
            Node::Noop => {}
            Node::AnyChar => self.push('.'),
            Node::Shorthand(Shorthand::NullByte) if self.dialect == Dialect::FancyRegex => {
                self.push_str("\\x00")
            }
            Node::Shorthand(shorthand) => self.push_str(shorthand.as_str()),
            Node::Anchor(Anchor::EndOfText) if self.dialect == Dialect::FancyRegex => {
                self.push_str("\\z")
            }
            Node::Anchor(anchor) => self.push_str(anchor.as_str()),
            Node::WordBoundary => self.push_str("\\b"),
            Node::NonWordBoundary => self.push_str("\\B"),
            Node::Char(text) | Node::String(text) => self.push_str(text),
            Node::Range(start, end) => {
                let mut class = String::from("[");
                push_range(*start, *end, &mut class);
                class.push(']');
                self.push_str(&class);
            }
            Node::AnythingButRange(start, end) => {
                let mut class = String::from("[^");
                push_range(*start, *end, &mut class);
                class.push(']');
                self.push_str(&class);
            }
            Node::AnyOfChars(chars) => {
                self.push('[');
                self.push_str(chars);
                self.push(']');
            }
            Node::AnythingButChars(chars) => {
                self.push_str("[^");
                self.push_str(chars);
                self.push(']');
            }
            Node::AnythingButString(text) => {
                // Width counts characters of the unescaped text.
                let width = text.chars().count();
                self.push_str("(?:(?!");
                self.push_str(&escape_special(text));
                self.push_str(&format!(").{{{width}}})"));
            }
            Node::Backreference(index) => {
                self.push_str(&format!("\\{index}"));
                self.backref_end = Some(self.out.len());
            }
            Node::NamedBackreference(name) => {
                self.push_str("(?P=");
                self.push_str(name);
                self.push(')');
            }
            Node::Quantified { inner, quantifier } => {
                if inner.needs_group_when_quantified() {
                    self.push_str("(?:");
                    self.render_node(inner);
                    self.push(')');
                } else {
                    self.render_node(inner);
                }
                self.push_str(&quantifier.suffix());
            }
            Node::Capture(children) => self.wrap("(", children),
            Node::NamedCapture { name, children } => {
                self.push_str("(?P<");
                self.push_str(name);
                self.push('>');
                self.render_all(children);
                self.push(')');
            }
            Node::Assertion { kind, children } => self.wrap(kind.opener(), children),
            Node::Group(children) => self.wrap("(?:", children),
            Node::AnyOf(children) => self.render_any_of(children),
            Node::Subexpression(children) => self.render_all(children),
        }
    }

    fn wrap(&mut self, opener: &str, children: &[Node]) {
        self.push_str(opener);
        self.render_all(children);
        self.push(')');
    }

    /// Alternation with single characters, ranges and char sets merged into
    /// one class that is always placed last.
    fn render_any_of(&mut self, children: &[Node]) {
        let fused = fused_class(children);
        let mut rest = children.iter().filter(|child| !child.is_fusable()).peekable();

        if rest.peek().is_none() {
            if fused.is_empty() {
                self.push_str(EMPTY_PATTERN);
            } else {
                self.push('[');
                self.push_str(&fused);
                self.push(']');
            }
            return;
        }

        self.push_str("(?:");
        let mut first = true;
        for child in rest {
            if !first {
                self.push('|');
            }
            first = false;
            self.render_node(child);
        }
        if !fused.is_empty() {
            self.push_str("|[");
            self.push_str(&fused);
            self.push(']');
        }
        self.push(')');
    }
}

fn push_range(start: char, end: char, out: &mut String) {
    let mut buf = [0u8; 4];
    out.push_str(&escape_special(start.encode_utf8(&mut buf)));
    out.push('-');
    out.push_str(&escape_special(end.encode_utf8(&mut buf)));
}

// === Fusion ===

/// Concatenated class contents of every fusable node, in input order.
fn fused_class(children: &[Node]) -> String {
    let mut fused = String::new();
    for child in children {
        match child {
            Node::Char(text) | Node::AnyOfChars(text) => fused.push_str(text),
            Node::Range(start, end) => push_range(*start, *end, &mut fused),
            _ => {}
        }
    }
    fused
}
