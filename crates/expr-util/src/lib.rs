//! expr-util — dialect configuration, the shared error type, Unicode
//! classification, and the process-wide dialect registry.
//!
//! ============================================================================
//! MODULE OVERVIEW
//! ============================================================================
//!
//! This crate is the foundation the rest of the `expr` workspace builds
//! on. It owns no pipeline logic of its own — no tokenizing, no parsing,
//! no compiling — only the configuration and error types that
//! `expr-lex`, `expr-par`, and `expr-compile` all need to agree on.
//!
//! - [`dialect`] — the [`Dialect`](dialect::Dialect) configuration bundle:
//!   operator table, precedence, associativity, arity, keyword-operator
//!   derivation, and identifier character classes.
//! - [`error`] — [`ExpressionError`](error::ExpressionError), the single
//!   error type every fallible function in this workspace returns.
//! - [`span`] — [`Span`](span::Span), a 0-based code-point offset range.
//! - [`unicode`] — general-category classification restricted to the
//!   major category, per `spec.md` §9.
//! - [`registry`] — an optional process-wide name → dialect map.

pub mod dialect;
pub mod error;
pub mod registry;
pub mod span;
pub mod unicode;

pub use dialect::{default_dialect, Arity, Associativity, Dialect, DialectBuilder, OperatorSpec};
pub use error::{ErrorKind, ExpressionError};
pub use registry::{get_dialect, register_dialect, unregister_dialect, DialectRef};
pub use span::Span;
