//! expr-par — the modified Shunting-yard parser.
//!
//! Consumes the token stream produced by `expr-lex` and turns it into a
//! postfix [`Element`] stream, ready for a compile driver to walk. See
//! [`parser::parse`] for the entry point and `spec.md` §4.3 for the
//! algorithm this module implements.

pub mod element;
pub mod parser;

pub use element::{Element, ElementKind};
pub use parser::{parse, parse_tokens};
