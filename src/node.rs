// node.rs - Pattern element tree.
//
// Every element an Expression can hold is a variant of `Node`. Literal text
// is escaped when the node is created, so the compiler can emit it verbatim.

use std::borrow::Cow;
use std::fmt;

/// Characters that carry meaning in pattern syntax and must be escaped.
pub const SPECIAL_CHARS: &str = "\\.^$|?*+()[]{}-";

/// Returns `true` if `c` must be backslash-escaped in pattern text.
#[inline]
pub fn is_special(c: char) -> bool {
    SPECIAL_CHARS.contains(c)
}

/// Escape every metacharacter in `s` with a preceding backslash.
///
/// ```
/// use expressive::node::escape_special;
///
/// assert_eq!(escape_special("a.b"), r"a\.b");
/// assert_eq!(escape_special("plain"), "plain");
/// ```
pub fn escape_special(s: &str) -> Cow<'_, str> {
    if !s.chars().any(is_special) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() * 2);
    for c in s.chars() {
        if is_special(c) {
            out.push('\\');
        }
        out.push(c);
    }
    Cow::Owned(out)
}

// === Leaf kinds ===

/// Single-token character classes and control characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shorthand {
    Digit,
    NonDigit,
    Word,
    NonWord,
    Whitespace,
    NonWhitespace,
    NewLine,
    CarriageReturn,
    Tab,
    NullByte,
}

impl Shorthand {
    pub fn as_str(self) -> &'static str {
        match self {
            Shorthand::Digit => "\\d",
            Shorthand::NonDigit => "\\D",
            Shorthand::Word => "\\w",
            Shorthand::NonWord => "\\W",
            Shorthand::Whitespace => "\\s",
            Shorthand::NonWhitespace => "\\S",
            Shorthand::NewLine => "\\n",
            Shorthand::CarriageReturn => "\\r",
            Shorthand::Tab => "\\t",
            Shorthand::NullByte => "\\0",
        }
    }
}

/// Zero-width position anchors.
///
/// `StartOfText`/`EndOfText` always refer to the whole input. `StartOfLine`
/// and `EndOfLine` become per-line when the multiline flag is set, and may be
/// declared at most once per expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Anchor {
    StartOfText,
    EndOfText,
    StartOfLine,
    EndOfLine,
}

impl Anchor {
    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::StartOfText => "\\A",
            Anchor::EndOfText => "\\Z",
            Anchor::StartOfLine => "^",
            Anchor::EndOfLine => "$",
        }
    }

    /// Line anchors are singletons within one expression.
    pub fn is_line_anchor(self) -> bool {
        matches!(self, Anchor::StartOfLine | Anchor::EndOfLine)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Anchor::StartOfText => "start of text",
            Anchor::EndOfText => "end of text",
            Anchor::StartOfLine => "start of line",
            Anchor::EndOfLine => "end of line",
        })
    }
}

/// Lookaround direction and polarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Assertion {
    Ahead,
    NotAhead,
    Behind,
    NotBehind,
}

impl Assertion {
    /// Opening token; the construct is closed with `)`.
    pub fn opener(self) -> &'static str {
        match self {
            Assertion::Ahead => "(?=",
            Assertion::NotAhead => "(?!",
            Assertion::Behind => "(?<=",
            Assertion::NotBehind => "(?<!",
        }
    }
}

impl fmt::Display for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Assertion::Ahead => "assert ahead",
            Assertion::NotAhead => "assert not ahead",
            Assertion::Behind => "assert behind",
            Assertion::NotBehind => "assert not behind",
        })
    }
}

// === Quantifier ===

/// Repetition applied to the next element appended to a frame.
///
/// Counts are validated by the builder: `Exactly`/`AtLeast` take `n >= 1`,
/// the `Between` forms take `lo < hi`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quantifier {
    Optional,
    ZeroOrMore,
    ZeroOrMoreLazy,
    OneOrMore,
    OneOrMoreLazy,
    Exactly(u32),
    AtLeast(u32),
    Between(u32, u32),
    BetweenLazy(u32, u32),
}

impl Quantifier {
    /// The suffix written after the quantified element.
    pub fn suffix(self) -> Cow<'static, str> {
        match self {
            Quantifier::Optional => Cow::Borrowed("?"),
            Quantifier::ZeroOrMore => Cow::Borrowed("*"),
            Quantifier::ZeroOrMoreLazy => Cow::Borrowed("*?"),
            Quantifier::OneOrMore => Cow::Borrowed("+"),
            Quantifier::OneOrMoreLazy => Cow::Borrowed("+?"),
            Quantifier::Exactly(n) => Cow::Owned(format!("{{{n}}}")),
            Quantifier::AtLeast(n) => Cow::Owned(format!("{{{n},}}")),
            Quantifier::Between(lo, hi) => Cow::Owned(format!("{{{lo},{hi}}}")),
            Quantifier::BetweenLazy(lo, hi) => Cow::Owned(format!("{{{lo},{hi}}}?")),
        }
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantifier::Optional => write!(f, "optional"),
            Quantifier::ZeroOrMore => write!(f, "zero_or_more"),
            Quantifier::ZeroOrMoreLazy => write!(f, "zero_or_more_lazy"),
            Quantifier::OneOrMore => write!(f, "one_or_more"),
            Quantifier::OneOrMoreLazy => write!(f, "one_or_more_lazy"),
            Quantifier::Exactly(n) => write!(f, "exactly({n})"),
            Quantifier::AtLeast(n) => write!(f, "at_least({n})"),
            Quantifier::Between(lo, hi) => write!(f, "between({lo}, {hi})"),
            Quantifier::BetweenLazy(lo, hi) => write!(f, "between_lazy({lo}, {hi})"),
        }
    }
}

// === Node ===

/// One element of a pattern tree.
///
/// Text payloads of `Char`, `String`, `AnyOfChars` and `AnythingButChars`
/// are stored already escaped. `AnythingButString` keeps its raw text since
/// its rendering needs the unescaped length.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Node {
    /// A single escaped character.
    Char(String),
    /// Two or more escaped characters.
    String(String),
    AnyChar,
    Shorthand(Shorthand),
    AnyOfChars(String),
    AnythingButChars(String),
    Range(char, char),
    AnythingButRange(char, char),
    AnythingButString(String),
    Anchor(Anchor),
    WordBoundary,
    NonWordBoundary,
    Backreference(usize),
    NamedBackreference(String),
    Group(Vec<Node>),
    Capture(Vec<Node>),
    NamedCapture { name: String, children: Vec<Node> },
    Assertion { kind: Assertion, children: Vec<Node> },
    AnyOf(Vec<Node>),
    Quantified { inner: Box<Node>, quantifier: Quantifier },
    /// A spliced expression, rendered transparently.
    Subexpression(Vec<Node>),
    Noop,
}

impl Node {
    /// Whether a quantifier applied to this node must wrap it in `(?:...)`.
    pub fn needs_group_when_quantified(&self) -> bool {
        matches!(self, Node::String(_) | Node::Subexpression(_))
    }

    /// Whether this node may be the target of a quantifier.
    pub fn is_quantifiable(&self) -> bool {
        !matches!(
            self,
            Node::Anchor(_) | Node::WordBoundary | Node::NonWordBoundary | Node::Noop
        )
    }

    /// Whether this node can be merged into a character class inside `AnyOf`.
    pub fn is_fusable(&self) -> bool {
        matches!(self, Node::Range(..) | Node::Char(_) | Node::AnyOfChars(_))
    }

    /// Short human-readable kind name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Char(_) => "char",
            Node::String(_) => "string",
            Node::AnyChar => "any char",
            Node::Shorthand(_) => "character class",
            Node::AnyOfChars(_) => "any of chars",
            Node::AnythingButChars(_) => "anything but chars",
            Node::Range(..) => "range",
            Node::AnythingButRange(..) => "anything but range",
            Node::AnythingButString(_) => "anything but string",
            Node::Anchor(Anchor::StartOfText) => "start of text",
            Node::Anchor(Anchor::EndOfText) => "end of text",
            Node::Anchor(Anchor::StartOfLine) => "start of line",
            Node::Anchor(Anchor::EndOfLine) => "end of line",
            Node::WordBoundary => "word boundary",
            Node::NonWordBoundary => "non word boundary",
            Node::Backreference(_) => "backreference",
            Node::NamedBackreference(_) => "named backreference",
            Node::Group(_) => "group",
            Node::Capture(_) => "capture",
            Node::NamedCapture { .. } => "named capture",
            Node::Assertion { .. } => "assertion",
            Node::AnyOf(_) => "any of",
            Node::Quantified { .. } => "quantified element",
            Node::Subexpression(_) => "subexpression",
            Node::Noop => "noop",
        }
    }
}
