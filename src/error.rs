// error.rs - Error types for expression construction.
//
// Every failure is raised by the call that breaks an invariant; the
// expression it was called on stays untouched.

use std::fmt;

use crate::node::{Anchor, Quantifier};

/// Broad category of an [`ExpressionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An argument had the wrong shape (empty text, bad count or range).
    Malformed,
    /// Builder protocol misuse (unbalanced `end`, stacked quantifiers).
    Structural,
    /// A backreference points at a group that does not exist.
    Reference,
    /// A capture group name is invalid or already taken.
    Naming,
    /// A line anchor was declared twice.
    Anchor,
    /// The host regex engine rejected the rendered pattern.
    Engine,
}

/// Where a conflicting anchor came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorSource {
    /// Declared directly on the expression.
    Expression,
    /// Introduced by splicing a subexpression.
    Subexpression,
}

/// Error type for building and rendering expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    /// A text argument was empty.
    EmptyText { operation: &'static str },
    /// Range endpoints were equal or inverted.
    InvalidRange { start: char, end: char },
    /// A repetition count was zero.
    InvalidCount { operation: &'static str, count: u32 },
    /// A `between` lower bound was not below its upper bound.
    InvalidBounds { lower: u32, upper: u32 },
    /// `end` was called with only the root frame open.
    CloseRoot,
    /// A quantifier was set while another one was still waiting for its element.
    QuantifierPending { requested: Quantifier, pending: Quantifier },
    /// A quantifier was left without an element to bind to.
    DanglingQuantifier { quantifier: Quantifier, context: String },
    /// A quantifier was about to bind to an element that cannot repeat.
    Unquantifiable { quantifier: Quantifier, element: &'static str },
    /// Rendering or splicing an expression with open frames.
    Incomplete { context: String },
    /// Positional backreference outside `1..=captures`.
    InvalidBackreference { index: usize, captures: usize },
    /// Named backreference to a group that was never declared.
    UnknownGroupName { name: String },
    /// Group name does not match `[A-Za-z][A-Za-z0-9_]*`.
    InvalidGroupName { name: String },
    /// Group name already declared in this expression.
    DuplicateGroupName { name: String },
    /// A line anchor was declared a second time.
    AnchorRedeclared { anchor: Anchor, source: AnchorSource },
    /// The host engine failed to compile the rendered pattern.
    Engine { message: String },
}

impl ExpressionError {
    /// The semantic category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExpressionError::EmptyText { .. }
            | ExpressionError::InvalidRange { .. }
            | ExpressionError::InvalidCount { .. }
            | ExpressionError::InvalidBounds { .. } => ErrorKind::Malformed,
            ExpressionError::CloseRoot
            | ExpressionError::QuantifierPending { .. }
            | ExpressionError::DanglingQuantifier { .. }
            | ExpressionError::Unquantifiable { .. }
            | ExpressionError::Incomplete { .. } => ErrorKind::Structural,
            ExpressionError::InvalidBackreference { .. }
            | ExpressionError::UnknownGroupName { .. } => ErrorKind::Reference,
            ExpressionError::InvalidGroupName { .. }
            | ExpressionError::DuplicateGroupName { .. } => ErrorKind::Naming,
            ExpressionError::AnchorRedeclared { .. } => ErrorKind::Anchor,
            ExpressionError::Engine { .. } => ErrorKind::Engine,
        }
    }
}

impl fmt::Display for ExpressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionError::EmptyText { operation } => {
                write!(f, "{operation}() requires at least one character")
            }
            ExpressionError::InvalidRange { start, end } => write!(
                f,
                "range start must have a smaller character value than its end (start = {start:?}, end = {end:?})"
            ),
            ExpressionError::InvalidCount { operation, count } => {
                write!(f, "{operation}() requires a positive count (got {count})")
            }
            ExpressionError::InvalidBounds { lower, upper } => write!(
                f,
                "lower bound must be less than upper bound (lower = {lower}, upper = {upper})"
            ),
            ExpressionError::CloseRoot => {
                write!(f, "cannot call end() while building the root expression")
            }
            ExpressionError::QuantifierPending { requested, pending } => write!(
                f,
                "cannot quantify with '{requested}' because the next element is already quantified with '{pending}'"
            ),
            ExpressionError::DanglingQuantifier {
                quantifier,
                context,
            } => write!(
                f,
                "quantifier '{quantifier}' in {context} has no element to apply to"
            ),
            ExpressionError::Unquantifiable {
                quantifier,
                element,
            } => write!(f, "quantifier '{quantifier}' cannot be applied to {element}"),
            ExpressionError::Incomplete { context } => write!(
                f,
                "expression is not fully specified (try adding an end() call to match the '{context}')"
            ),
            ExpressionError::InvalidBackreference { index, captures } => write!(
                f,
                "invalid backreference index {index}: there are {captures} capture groups in this expression"
            ),
            ExpressionError::UnknownGroupName { name } => write!(
                f,
                "no capture group called '{name}' exists (create one with named_capture())"
            ),
            ExpressionError::InvalidGroupName { name } => write!(
                f,
                "group name '{name}' is not valid (must start with a letter, then letters, digits or underscores)"
            ),
            ExpressionError::DuplicateGroupName { name } => {
                write!(f, "cannot use '{name}' again for a capture group")
            }
            ExpressionError::AnchorRedeclared { anchor, source } => match source {
                AnchorSource::Expression => {
                    write!(f, "this expression already has a defined {anchor}")
                }
                AnchorSource::Subexpression => write!(
                    f,
                    "the parent expression already has a defined {anchor}; subexpression anchors can be ignored with the ignore_anchors option"
                ),
            },
            ExpressionError::Engine { message } => write!(f, "engine error: {message}"),
        }
    }
}

impl std::error::Error for ExpressionError {}
