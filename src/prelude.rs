// prelude.rs - Convenient re-exports for building expressions.
//
//! # Prelude
//!
//! ```
//! use expressive::prelude::*;
//!
//! let expr = Expression::new().one_or_more().unwrap().word();
//! assert_eq!(expr.render().unwrap(), r"\w+");
//! ```

pub use crate::builder::Expression;
pub use crate::error::{AnchorSource, ErrorKind, ExpressionError};
pub use crate::flags::Flags;
pub use crate::merge::SubexpressionOptions;
pub use crate::node::Quantifier;
