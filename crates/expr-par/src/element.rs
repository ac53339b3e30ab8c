//! The postfix element type produced by the parser.

use expr_lex::TokenValue;

/// What an [`Element`] represents, matching `spec.md` §3's `ElementType`.
///
/// `LParen`/`RParen` only ever appear transiently on the parser's
/// internal operator stack (see [`crate::parser::Parser`]) — a valid
/// output stream never contains them, since unmatched parentheses are a
/// parse error rather than an output element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Literal,
    Variable,
    Function,
    Operator,
    LParen,
    RParen,
}

/// A single entry in the postfix (Reverse Polish) element stream, or on
/// the parser's internal stack.
///
/// `argc` is 1 for a unary operator, 2 for a binary operator, and the
/// discovered argument count for a function (0 for everything else).
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    pub value: TokenValue,
    pub argc: u32,
}

impl Element {
    pub fn new(kind: ElementKind, value: TokenValue, argc: u32) -> Self {
        Self { kind, value, argc }
    }

    pub fn literal(value: TokenValue) -> Self {
        Self::new(ElementKind::Literal, value, 0)
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::new(ElementKind::Variable, TokenValue::Text(name.into()), 0)
    }

    pub fn function(name: impl Into<String>, argc: u32) -> Self {
        Self::new(ElementKind::Function, TokenValue::Text(name.into()), argc)
    }

    pub fn operator(name: impl Into<String>, argc: u32) -> Self {
        Self::new(ElementKind::Operator, TokenValue::Text(name.into()), argc)
    }

    pub fn lparen() -> Self {
        Self::new(ElementKind::LParen, TokenValue::Text("(".to_string()), 0)
    }

    /// The element's string payload (operator/function/variable name),
    /// when it has one.
    pub fn name(&self) -> Option<&str> {
        self.value.as_text()
    }
}
