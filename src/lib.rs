//! # Expressive
//!
//! Build regular expressions from named, composable parts instead of
//! hand-escaped pattern text, then render them to PCRE-style syntax.
//!
//! Every builder call returns a new [`Expression`](builder::Expression); the
//! value it was called on is left as it was, so partial expressions can be
//! shared and reused freely.
//!
//! ## Quick Start
//!
//! ```rust
//! use expressive::prelude::*;
//!
//! let expr = Expression::new()
//!     .start_of_line().unwrap()
//!     .at_least(3).unwrap().digit()
//!     .any_of()
//!         .range('a', 'z').unwrap()
//!         .char('.')
//!         .char('#')
//!     .end().unwrap()
//!     .end_of_line().unwrap();
//! assert_eq!(expr.render().unwrap(), r"^\d{3,}[a-z\.#]$");
//! ```
//!
//! Finished expressions can be spliced into others. Backreferences are
//! renumbered and group names can be namespaced:
//!
//! ```rust
//! use expressive::prelude::*;
//!
//! let pair = Expression::new()
//!     .capture().exactly(2).unwrap().any_char().end().unwrap()
//!     .backreference(1).unwrap();
//! let expr = Expression::new()
//!     .capture().at_least(3).unwrap().digit().end().unwrap()
//!     .subexpression(&pair, &SubexpressionOptions::new()).unwrap()
//!     .backreference(1).unwrap();
//! assert_eq!(expr.render().unwrap(), r"(\d{3,})(.{2})\2\1");
//! ```
//!
//! ## Module Structure
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`node`] | Pattern element tree, quantifier forms, escaping |
//! | [`frame`] | Open containers and quantifier binding |
//! | [`builder`] | The immutable [`Expression`](builder::Expression) builder |
//! | [`merge`] | Subexpression splicing |
//! | [`compile`] | Tree to pattern text, character-class fusion |
//! | [`flags`] | Mode flags and flag-block rendering |
//! | [`engine`] | Compilation with the host regex engine |
//! | [`error`] | Error types |

// Enable #[coverage(off)] attribute when running under cargo-llvm-cov on nightly.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod builder;
pub mod compile;
pub mod engine;
pub mod error;
pub mod flags;
pub mod frame;
pub mod merge;
pub mod node;
pub mod prelude;
