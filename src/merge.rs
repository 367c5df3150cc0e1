// merge.rs - Splicing one finished expression into another.
//
// The donor's tree is copied node by node. Positional backreferences are
// shifted past the host's captures, group names get the namespace prefix and
// are registered on the host, and line anchors are dropped or reconciled.

use crate::builder::Expression;
use crate::error::{AnchorSource, ExpressionError};
use crate::node::Node;

/// Options for [`Expression::subexpression`].
///
/// # Examples
///
/// ```
/// use expressive::builder::Expression;
/// use expressive::merge::SubexpressionOptions;
///
/// let digits = Expression::new().named_capture("n").unwrap().one_or_more().unwrap().digit().end().unwrap();
/// let expr = Expression::new()
///     .subexpression(&digits, &SubexpressionOptions::new().namespace("left_"))
///     .unwrap();
/// assert_eq!(expr.render().unwrap(), r"(?P<left_n>\d+)");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubexpressionOptions {
    namespace: String,
    ignore_flags: bool,
    ignore_anchors: bool,
}

impl Default for SubexpressionOptions {
    fn default() -> Self {
        SubexpressionOptions {
            namespace: String::new(),
            ignore_flags: true,
            ignore_anchors: true,
        }
    }
}

impl SubexpressionOptions {
    /// No namespace; donor flags and line anchors are ignored.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix prepended to every group name of the donor.
    pub fn namespace(mut self, namespace: &str) -> Self {
        self.namespace = namespace.to_string();
        self
    }

    /// When `false`, the donor's flags are OR-ed into the host's.
    pub fn ignore_flags(mut self, yes: bool) -> Self {
        self.ignore_flags = yes;
        self
    }

    /// When `false`, the donor's `^`/`$` are kept and count as declared on the host.
    pub fn ignore_anchors(mut self, yes: bool) -> Self {
        self.ignore_anchors = yes;
        self
    }
}

struct Merger<'a> {
    options: &'a SubexpressionOptions,
    host: &'a mut Expression,
    base_captures: usize,
    introduced: usize,
}

impl Merger<'_> {
    fn qualify(&self, name: &str) -> String {
        if self.options.namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}{}", self.options.namespace, name)
        }
    }

    fn merge_all(&mut self, nodes: &[Node]) -> Result<Vec<Node>, ExpressionError> {
        nodes.iter().map(|node| self.merge(node)).collect()
    }

    fn merge(&mut self, node: &Node) -> Result<Node, ExpressionError> {
        let merged = match node {
            Node::Backreference(index) => Node::Backreference(index + self.base_captures),
            Node::NamedBackreference(name) => Node::NamedBackreference(self.qualify(name)),
            Node::Capture(children) => {
                self.introduced += 1;
                Node::Capture(self.merge_all(children)?)
            }
            Node::NamedCapture { name, children } => {
                let name = self.qualify(name);
                self.host.track_named_group(&name)?;
                self.introduced += 1;
                Node::NamedCapture {
                    name,
                    children: self.merge_all(children)?,
                }
            }
            Node::Anchor(anchor) if anchor.is_line_anchor() => {
                if self.options.ignore_anchors {
                    return Ok(Node::Noop);
                }
                self.host
                    .declare_line_anchor(*anchor, AnchorSource::Subexpression)?;
                Node::Anchor(*anchor)
            }
            Node::Group(children) => Node::Group(self.merge_all(children)?),
            Node::AnyOf(children) => Node::AnyOf(self.merge_all(children)?),
            Node::Subexpression(children) => Node::Subexpression(self.merge_all(children)?),
            Node::Assertion { kind, children } => Node::Assertion {
                kind: *kind,
                children: self.merge_all(children)?,
            },
            Node::Quantified { inner, quantifier } => Node::Quantified {
                inner: Box::new(self.merge(inner)?),
                quantifier: *quantifier,
            },
            Node::Char(_)
            | Node::String(_)
            | Node::AnyChar
            | Node::Shorthand(_)
            | Node::AnyOfChars(_)
            | Node::AnythingButChars(_)
            | Node::Range(..)
            | Node::AnythingButRange(..)
            | Node::AnythingButString(_)
            | Node::Anchor(_)
            | Node::WordBoundary
            | Node::NonWordBoundary
            | Node::Noop => node.clone(),
        };
        Ok(merged)
    }
}

impl Expression {
    /// Splice a complete `donor` expression in as the next element.
    ///
    /// The donor is copied; it is not affected and can be spliced again.
    pub fn subexpression(
        &self,
        donor: &Expression,
        options: &SubexpressionOptions,
    ) -> Result<Self, ExpressionError> {
        let elements = donor.complete_elements()?;
        let mut next = self.clone();
        let base_captures = next.capture_count;

        let mut merger = Merger {
            options,
            host: &mut next,
            base_captures,
            introduced: 0,
        };
        let merged = merger.merge_all(elements)?;
        let introduced = merger.introduced;

        next.capture_count += introduced;
        if !options.ignore_flags {
            next.flags |= donor.flags;
        }
        next.top_mut().append(Node::Subexpression(merged));
        Ok(next)
    }
}
