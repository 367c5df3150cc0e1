// frame.rs - Open construction contexts and quantifier binding.
//
// An Expression keeps a stack of frames. The bottom frame is the root; each
// container opener pushes a frame that folds into a single Node on `end()`.

use std::fmt;

use crate::error::ExpressionError;
use crate::node::{Assertion, Node, Quantifier};

/// What a frame turns into when it is closed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FrameKind {
    Root,
    Group,
    Capture,
    NamedCapture(String),
    AnyOf,
    Assertion(Assertion),
}

impl FrameKind {
    /// Build the node this frame stands for out of its children.
    ///
    /// The root never closes through `end()`; folding it yields a transparent
    /// subexpression of its elements.
    pub fn into_node(self, children: Vec<Node>) -> Node {
        match self {
            FrameKind::Root => Node::Subexpression(children),
            FrameKind::Group => Node::Group(children),
            FrameKind::Capture => Node::Capture(children),
            FrameKind::NamedCapture(name) => Node::NamedCapture { name, children },
            FrameKind::AnyOf => Node::AnyOf(children),
            FrameKind::Assertion(kind) => Node::Assertion { kind, children },
        }
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameKind::Root => write!(f, "root"),
            FrameKind::Group => write!(f, "group"),
            FrameKind::Capture => write!(f, "capture"),
            FrameKind::NamedCapture(name) => write!(f, "named_capture({name})"),
            FrameKind::AnyOf => write!(f, "any_of"),
            FrameKind::Assertion(kind) => write!(f, "{kind}"),
        }
    }
}

/// One open context: its kind, finished children and a pending quantifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Frame {
    pub kind: FrameKind,
    pub quantifier: Option<Quantifier>,
    pub elements: Vec<Node>,
}

impl Frame {
    pub fn new(kind: FrameKind) -> Self {
        Frame {
            kind,
            quantifier: None,
            elements: Vec::new(),
        }
    }

    /// Store `quantifier` for the next element; one at a time.
    pub fn set_quantifier(&mut self, quantifier: Quantifier) -> Result<(), ExpressionError> {
        if let Some(pending) = self.quantifier {
            return Err(ExpressionError::QuantifierPending {
                requested: quantifier,
                pending,
            });
        }
        self.quantifier = Some(quantifier);
        Ok(())
    }

    /// Wrap `node` in the pending quantifier, if any, consuming it.
    pub fn bind(&mut self, node: Node) -> Node {
        match self.quantifier.take() {
            Some(quantifier) => Node::Quantified {
                inner: Box::new(node),
                quantifier,
            },
            None => node,
        }
    }

    /// Append an element that is always quantifiable.
    pub fn append(&mut self, node: Node) {
        debug_assert!(node.is_quantifiable());
        let node = self.bind(node);
        self.elements.push(node);
    }

    /// Append `node`, rejecting it if a quantifier is pending and `node`
    /// cannot repeat.
    pub fn push(&mut self, node: Node) -> Result<(), ExpressionError> {
        if let Some(quantifier) = self.quantifier {
            if !node.is_quantifiable() {
                return Err(ExpressionError::Unquantifiable {
                    quantifier,
                    element: node.kind_name(),
                });
            }
        }
        let node = self.bind(node);
        self.elements.push(node);
        Ok(())
    }

    /// Fails if a quantifier is still waiting for its element.
    pub fn check_no_pending(&self) -> Result<(), ExpressionError> {
        match self.quantifier {
            Some(quantifier) => Err(ExpressionError::DanglingQuantifier {
                quantifier,
                context: self.kind.to_string(),
            }),
            None => Ok(()),
        }
    }
}
