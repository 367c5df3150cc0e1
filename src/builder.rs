// builder.rs - The immutable expression builder.
//
// Every operation borrows the current Expression and returns a new one, so
// intermediate values stay reusable. A failed call returns an error and
// leaves the receiver as it was.

use smallvec::{smallvec, SmallVec};

use crate::compile::{render_pattern, render_pattern_in, Dialect};
use crate::engine;
use crate::error::{AnchorSource, ExpressionError};
use crate::flags::Flags;
use crate::frame::{Frame, FrameKind};
use crate::node::{escape_special, Anchor, Assertion, Node, Quantifier, Shorthand};

/// A regular expression under construction.
///
/// # Examples
///
/// ```
/// use expressive::builder::Expression;
///
/// let expr = Expression::new()
///     .capture()
///     .string("hello ").unwrap()
///     .word()
///     .char('!')
///     .end().unwrap()
///     .backreference(1).unwrap();
/// assert_eq!(expr.render().unwrap(), r"(hello \w!)\1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expression {
    pub(crate) stack: SmallVec<[Frame; 4]>,
    pub(crate) flags: Flags,
    pub(crate) named_groups: Vec<String>,
    pub(crate) capture_count: usize,
    pub(crate) has_start_of_line: bool,
    pub(crate) has_end_of_line: bool,
}

impl Default for Expression {
    fn default() -> Self {
        Expression {
            stack: smallvec![Frame::new(FrameKind::Root)],
            flags: Flags::empty(),
            named_groups: Vec::new(),
            capture_count: 0,
            has_start_of_line: false,
            has_end_of_line: false,
        }
    }
}

impl Expression {
    /// An empty expression with only the root frame open.
    pub fn new() -> Self {
        Self::default()
    }

    // === Introspection ===

    /// Capture groups declared so far, including still-open ones.
    pub fn capture_count(&self) -> usize {
        self.capture_count
    }

    /// Declared group names, in declaration order.
    pub fn named_groups(&self) -> &[String] {
        &self.named_groups
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Number of containers opened and not yet closed.
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// `true` when no container is left open.
    pub fn is_complete(&self) -> bool {
        self.stack.len() == 1
    }

    // === Flags ===

    fn with_flag(&self, flag: Flags) -> Self {
        let mut next = self.clone();
        next.flags |= flag;
        next
    }

    /// Ignore the uppercase/lowercase distinction (`i`).
    pub fn case_insensitive(&self) -> Self {
        self.with_flag(Flags::CASE_INSENSITIVE)
    }

    /// Let `^` and `$` match at every line boundary (`m`).
    pub fn multiline(&self) -> Self {
        self.with_flag(Flags::MULTILINE)
    }

    /// Let `.` match newlines too (`s`).
    pub fn dot_matches_newline(&self) -> Self {
        self.with_flag(Flags::DOT_MATCHES_NEWLINE)
    }

    /// Restrict classes like `\w` to ASCII (`a`).
    ///
    /// Only rendered as a flag letter; fancy-regex has no inline form for it,
    /// so with [`Expression::to_regex`] `\w` still matches non-ASCII text.
    pub fn ascii_only(&self) -> Self {
        self.with_flag(Flags::ASCII)
    }

    /// Full unicode matching (`u`).
    ///
    /// Rendered as a flag letter only; ignored by [`Expression::to_regex`].
    pub fn unicode(&self) -> Self {
        self.with_flag(Flags::UNICODE)
    }

    /// Accepted for compatibility; renders no flag letter.
    pub fn global(&self) -> Self {
        self.with_flag(Flags::GLOBAL)
    }

    /// Accepted for compatibility; renders no flag letter.
    pub fn sticky(&self) -> Self {
        self.with_flag(Flags::STICKY)
    }

    // === Frame plumbing ===

    pub(crate) fn top_mut(&mut self) -> &mut Frame {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn top(&self) -> &Frame {
        &self.stack[self.stack.len() - 1]
    }

    /// Append an always-quantifiable element.
    fn element(&self, node: Node) -> Self {
        let mut next = self.clone();
        next.top_mut().append(node);
        next
    }

    fn try_element(&self, node: Node) -> Result<Self, ExpressionError> {
        let mut next = self.clone();
        next.top_mut().push(node)?;
        Ok(next)
    }

    fn open(&self, kind: FrameKind) -> Self {
        let mut next = self.clone();
        next.stack.push(Frame::new(kind));
        next
    }

    fn quantify(&self, quantifier: Quantifier) -> Result<Self, ExpressionError> {
        let mut next = self.clone();
        next.top_mut().set_quantifier(quantifier)?;
        Ok(next)
    }

    /// Root elements of a complete expression.
    pub(crate) fn complete_elements(&self) -> Result<&[Node], ExpressionError> {
        let top = self.top();
        if !self.is_complete() {
            return Err(ExpressionError::Incomplete {
                context: top.kind.to_string(),
            });
        }
        top.check_no_pending()?;
        Ok(&top.elements)
    }

    /// Register a group name, enforcing syntax and uniqueness.
    pub(crate) fn track_named_group(&mut self, name: &str) -> Result<(), ExpressionError> {
        if !is_valid_group_name(name) {
            return Err(ExpressionError::InvalidGroupName {
                name: name.to_string(),
            });
        }
        if self.named_groups.iter().any(|known| known == name) {
            return Err(ExpressionError::DuplicateGroupName {
                name: name.to_string(),
            });
        }
        self.named_groups.push(name.to_string());
        Ok(())
    }

    /// Mark a line anchor as declared; each may appear once.
    pub(crate) fn declare_line_anchor(
        &mut self,
        anchor: Anchor,
        source: AnchorSource,
    ) -> Result<(), ExpressionError> {
        let declared = match anchor {
            Anchor::StartOfLine => &mut self.has_start_of_line,
            Anchor::EndOfLine => &mut self.has_end_of_line,
            Anchor::StartOfText | Anchor::EndOfText => return Ok(()),
        };
        if *declared {
            return Err(ExpressionError::AnchorRedeclared { anchor, source });
        }
        *declared = true;
        Ok(())
    }

    fn anchor(&self, anchor: Anchor) -> Result<Self, ExpressionError> {
        let mut next = self.try_element(Node::Anchor(anchor))?;
        next.declare_line_anchor(anchor, AnchorSource::Expression)?;
        Ok(next)
    }

    // === Single-token elements ===

    /// Any character except newline (unless `dot_matches_newline`).
    pub fn any_char(&self) -> Self {
        self.element(Node::AnyChar)
    }

    pub fn whitespace_char(&self) -> Self {
        self.element(Node::Shorthand(Shorthand::Whitespace))
    }

    pub fn non_whitespace_char(&self) -> Self {
        self.element(Node::Shorthand(Shorthand::NonWhitespace))
    }

    pub fn digit(&self) -> Self {
        self.element(Node::Shorthand(Shorthand::Digit))
    }

    pub fn non_digit(&self) -> Self {
        self.element(Node::Shorthand(Shorthand::NonDigit))
    }

    /// A word character: letter, digit or underscore.
    pub fn word(&self) -> Self {
        self.element(Node::Shorthand(Shorthand::Word))
    }

    pub fn non_word(&self) -> Self {
        self.element(Node::Shorthand(Shorthand::NonWord))
    }

    /// Position between a word and a non-word character. Cannot be quantified.
    pub fn word_boundary(&self) -> Result<Self, ExpressionError> {
        self.try_element(Node::WordBoundary)
    }

    /// Position between two word or two non-word characters. Cannot be quantified.
    pub fn non_word_boundary(&self) -> Result<Self, ExpressionError> {
        self.try_element(Node::NonWordBoundary)
    }

    pub fn new_line(&self) -> Self {
        self.element(Node::Shorthand(Shorthand::NewLine))
    }

    pub fn carriage_return(&self) -> Self {
        self.element(Node::Shorthand(Shorthand::CarriageReturn))
    }

    pub fn tab(&self) -> Self {
        self.element(Node::Shorthand(Shorthand::Tab))
    }

    pub fn null_byte(&self) -> Self {
        self.element(Node::Shorthand(Shorthand::NullByte))
    }

    // === Literals and sets ===

    /// A literal character, escaped if it is a metacharacter.
    pub fn char(&self, c: char) -> Self {
        let mut buf = [0u8; 4];
        let escaped = escape_special(c.encode_utf8(&mut buf)).into_owned();
        self.element(Node::Char(escaped))
    }

    /// A literal string. A one-character string behaves exactly like
    /// [`Expression::char`].
    pub fn string(&self, s: &str) -> Result<Self, ExpressionError> {
        let mut chars = s.chars();
        let node = match (chars.next(), chars.next()) {
            (None, _) => return Err(ExpressionError::EmptyText { operation: "string" }),
            (Some(c), None) => return Ok(self.char(c)),
            _ => Node::String(escape_special(s).into_owned()),
        };
        Ok(self.element(node))
    }

    /// Any character between `start` and `end`, inclusive.
    pub fn range(&self, start: char, end: char) -> Result<Self, ExpressionError> {
        check_range(start, end)?;
        Ok(self.element(Node::Range(start, end)))
    }

    /// Any character not between `start` and `end`.
    pub fn anything_but_range(&self, start: char, end: char) -> Result<Self, ExpressionError> {
        check_range(start, end)?;
        Ok(self.element(Node::AnythingButRange(start, end)))
    }

    /// Any one of the characters in `chars`.
    pub fn any_of_chars(&self, chars: &str) -> Result<Self, ExpressionError> {
        if chars.is_empty() {
            return Err(ExpressionError::EmptyText {
                operation: "any_of_chars",
            });
        }
        Ok(self.element(Node::AnyOfChars(escape_special(chars).into_owned())))
    }

    /// Any character not in `chars`.
    pub fn anything_but_chars(&self, chars: &str) -> Result<Self, ExpressionError> {
        if chars.is_empty() {
            return Err(ExpressionError::EmptyText {
                operation: "anything_but_chars",
            });
        }
        Ok(self.element(Node::AnythingButChars(
            escape_special(chars).into_owned(),
        )))
    }

    /// Any run of characters as long as `s` that is not `s` itself.
    pub fn anything_but_string(&self, s: &str) -> Result<Self, ExpressionError> {
        if s.is_empty() {
            return Err(ExpressionError::EmptyText {
                operation: "anything_but_string",
            });
        }
        Ok(self.element(Node::AnythingButString(s.to_string())))
    }

    // === Containers ===

    /// Open a non-capturing group.
    pub fn group(&self) -> Self {
        self.open(FrameKind::Group)
    }

    /// Open a capture group. It counts towards backreferences right away.
    pub fn capture(&self) -> Self {
        let mut next = self.open(FrameKind::Capture);
        next.capture_count += 1;
        next
    }

    /// Open a named capture group.
    pub fn named_capture(&self, name: &str) -> Result<Self, ExpressionError> {
        let mut next = self.clone();
        next.track_named_group(name)?;
        next.stack.push(Frame::new(FrameKind::NamedCapture(name.to_string())));
        next.capture_count += 1;
        Ok(next)
    }

    /// Open an alternation: the closed node matches any one of its elements.
    pub fn any_of(&self) -> Self {
        self.open(FrameKind::AnyOf)
    }

    pub fn assert_ahead(&self) -> Self {
        self.open(FrameKind::Assertion(Assertion::Ahead))
    }

    pub fn assert_not_ahead(&self) -> Self {
        self.open(FrameKind::Assertion(Assertion::NotAhead))
    }

    pub fn assert_behind(&self) -> Self {
        self.open(FrameKind::Assertion(Assertion::Behind))
    }

    pub fn assert_not_behind(&self) -> Self {
        self.open(FrameKind::Assertion(Assertion::NotBehind))
    }

    /// Close the innermost open container.
    pub fn end(&self) -> Result<Self, ExpressionError> {
        if self.is_complete() {
            return Err(ExpressionError::CloseRoot);
        }
        let mut next = self.clone();
        let frame = next.stack.pop().ok_or(ExpressionError::CloseRoot)?;
        frame.check_no_pending()?;
        let node = frame.kind.into_node(frame.elements);
        next.top_mut().append(node);
        Ok(next)
    }

    // === Quantifiers ===

    pub fn optional(&self) -> Result<Self, ExpressionError> {
        self.quantify(Quantifier::Optional)
    }

    pub fn zero_or_more(&self) -> Result<Self, ExpressionError> {
        self.quantify(Quantifier::ZeroOrMore)
    }

    pub fn zero_or_more_lazy(&self) -> Result<Self, ExpressionError> {
        self.quantify(Quantifier::ZeroOrMoreLazy)
    }

    pub fn one_or_more(&self) -> Result<Self, ExpressionError> {
        self.quantify(Quantifier::OneOrMore)
    }

    pub fn one_or_more_lazy(&self) -> Result<Self, ExpressionError> {
        self.quantify(Quantifier::OneOrMoreLazy)
    }

    /// Repeat the next element exactly `n` times.
    pub fn exactly(&self, n: u32) -> Result<Self, ExpressionError> {
        if n == 0 {
            return Err(ExpressionError::InvalidCount {
                operation: "exactly",
                count: n,
            });
        }
        self.quantify(Quantifier::Exactly(n))
    }

    /// Repeat the next element at least `n` times.
    pub fn at_least(&self, n: u32) -> Result<Self, ExpressionError> {
        if n == 0 {
            return Err(ExpressionError::InvalidCount {
                operation: "at_least",
                count: n,
            });
        }
        self.quantify(Quantifier::AtLeast(n))
    }

    /// Repeat the next element between `lower` and `upper` times, greedily.
    pub fn between(&self, lower: u32, upper: u32) -> Result<Self, ExpressionError> {
        check_bounds(lower, upper)?;
        self.quantify(Quantifier::Between(lower, upper))
    }

    /// Repeat the next element between `lower` and `upper` times, lazily.
    pub fn between_lazy(&self, lower: u32, upper: u32) -> Result<Self, ExpressionError> {
        check_bounds(lower, upper)?;
        self.quantify(Quantifier::BetweenLazy(lower, upper))
    }

    // === Anchors ===

    /// Start of the whole input (`\A`).
    pub fn start_of_text(&self) -> Result<Self, ExpressionError> {
        self.anchor(Anchor::StartOfText)
    }

    /// End of the whole input (`\Z`).
    pub fn end_of_text(&self) -> Result<Self, ExpressionError> {
        self.anchor(Anchor::EndOfText)
    }

    /// Start of input, or of each line in multiline mode (`^`). Once per expression.
    pub fn start_of_line(&self) -> Result<Self, ExpressionError> {
        self.anchor(Anchor::StartOfLine)
    }

    /// End of input, or of each line in multiline mode (`$`). Once per expression.
    pub fn end_of_line(&self) -> Result<Self, ExpressionError> {
        self.anchor(Anchor::EndOfLine)
    }

    // === References ===

    /// Match what capture group `index` (1-based) matched.
    pub fn backreference(&self, index: usize) -> Result<Self, ExpressionError> {
        if index == 0 || index > self.capture_count {
            return Err(ExpressionError::InvalidBackreference {
                index,
                captures: self.capture_count,
            });
        }
        Ok(self.element(Node::Backreference(index)))
    }

    /// Match what the capture group called `name` matched.
    pub fn named_backreference(&self, name: &str) -> Result<Self, ExpressionError> {
        if !self.named_groups.iter().any(|known| known == name) {
            return Err(ExpressionError::UnknownGroupName {
                name: name.to_string(),
            });
        }
        Ok(self.element(Node::NamedBackreference(name.to_string())))
    }

    // === Output ===

    /// Pattern text, without flags.
    pub fn render(&self) -> Result<String, ExpressionError> {
        Ok(render_pattern(self.complete_elements()?))
    }

    /// Sorted flag letters, e.g. `"ims"`.
    pub fn render_flags(&self) -> String {
        self.flags.letters()
    }

    /// Pattern text prefixed with its `(?flags)` block when any flag has a letter.
    pub fn to_regex_string(&self) -> Result<String, ExpressionError> {
        let pattern = self.render()?;
        Ok(format!("{}{}", self.flags.block(), pattern))
    }

    /// Compile the expression with the host regex engine.
    ///
    /// The pattern is rendered in fancy-regex spelling (`\z`, `\x00`) and only
    /// the `i`, `m` and `s` flags are passed on.
    pub fn to_regex(&self) -> Result<fancy_regex::Regex, ExpressionError> {
        let pattern = render_pattern_in(self.complete_elements()?, Dialect::FancyRegex);
        engine::compile(&pattern, self.flags)
    }
}

/// `[A-Za-z][A-Za-z0-9_]*`
fn is_valid_group_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn check_range(start: char, end: char) -> Result<(), ExpressionError> {
    if start >= end {
        return Err(ExpressionError::InvalidRange { start, end });
    }
    Ok(())
}

fn check_bounds(lower: u32, upper: u32) -> Result<(), ExpressionError> {
    if lower >= upper {
        return Err(ExpressionError::InvalidBounds { lower, upper });
    }
    Ok(())
}
