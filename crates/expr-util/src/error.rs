//! The error taxonomy shared by every stage of the pipeline.
//!
//! `spec.md` §7 calls for five distinct, testable error kinds. Four of
//! them — `Syntax`, `Parse`, `Config`, `Internal` — are raised by this
//! workspace and live here as variants of [`ExpressionError`]. The fifth,
//! `Semantic`, is raised by a caller's [`Compiler`](../expr_compile/trait.Compiler.html)
//! implementation and is never constructed by this crate; it travels back
//! to the caller as whatever type the compiler chose, untouched.

use thiserror::Error;

/// The distinct kinds of error this crate can raise, matching `spec.md` §7
/// (`Semantic` is deliberately absent — see the module docs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Syntax,
    Parse,
    Config,
    Internal,
}

/// An error raised by the tokenizer, parser, dialect builder, or compile
/// driver.
///
/// Every variant carries a human-readable `message` and, when the failure
/// can be pinned to a location, an offset: a 0-based code point offset for
/// tokenizer errors, a token index for parser errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExpressionError {
    /// An ill-formed token: an unknown character, a malformed number, an
    /// unterminated string, or a letter embedded in a number.
    #[error("syntax error at offset {offset}: {message}")]
    Syntax { message: String, offset: usize },

    /// Mismatched parentheses, a misplaced comma, or an operator applied
    /// with insufficient operands.
    #[error("parse error at token {token_index}: {message}")]
    Parse {
        message: String,
        token_index: usize,
    },

    /// A malformed `Dialect`: a duplicated operator name with incompatible
    /// precedence/associativity, or an empty operator name.
    #[error("invalid dialect: {message}")]
    Config { message: String },

    /// An internal invariant was violated (the compile driver's value
    /// stack didn't end with exactly one value, or an element of a type
    /// the driver doesn't know how to handle reached it). Indicates a bug
    /// in this crate, not in caller input.
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl ExpressionError {
    pub fn syntax(message: impl Into<String>, offset: usize) -> Self {
        Self::Syntax {
            message: message.into(),
            offset,
        }
    }

    pub fn parse(message: impl Into<String>, token_index: usize) -> Self {
        Self::Parse {
            message: message.into(),
            token_index,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Syntax { .. } => ErrorKind::Syntax,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::Config { .. } => ErrorKind::Config,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// The 0-based character offset of the failure, when known. Parse
    /// errors report a token index instead and return `None` here.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Syntax { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Syntax { message, .. }
            | Self::Parse { message, .. }
            | Self::Config { message, .. }
            | Self::Internal { message, .. } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_reports_kind_and_offset() {
        let err = ExpressionError::syntax("unknown character '$'", 4);
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.offset(), Some(4));
    }

    #[test]
    fn parse_error_has_no_character_offset() {
        let err = ExpressionError::parse("mismatched parenthesis", 3);
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.offset(), None);
    }
}
