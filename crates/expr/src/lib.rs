//! expr — an extensible arithmetic-expression front end: a Unicode-aware
//! tokenizer, a modified Shunting-yard parser, and a visitor-style
//! compile driver against a caller-supplied [`Compiler`] capability.
//!
//! ============================================================================
//! MODULE OVERVIEW
//! ============================================================================
//!
//! This crate is a thin facade over the workspace's four library crates,
//! re-exporting the surface a caller actually needs:
//!
//! - [`tokenize`] / [`Token`] / [`TokenKind`] / [`TokenValue`] — the
//!   tokenizer (`expr-lex`).
//! - [`parse`] / [`parse_tokens`] / [`Element`] / [`ElementKind`] — the
//!   parser (`expr-par`).
//! - [`Compiler`] / [`compile`] / [`compile_elements`] / [`CompileError`]
//!   — the compile driver and capability trait (`expr-compile`).
//! - [`IdentityCompiler`] / [`IdentityValue`] / [`IdentifierInspector`] /
//!   [`inspect_variables`] — the two built-in compilers (`expr-compile`).
//! - [`Dialect`] / [`DialectBuilder`] / [`default_dialect`] — dialect
//!   configuration (`expr-util`).
//! - [`register_dialect`] / [`get_dialect`] / [`unregister_dialect`] /
//!   [`DialectRef`] — the process-wide dialect registry (`expr-util`).
//! - [`ExpressionError`] / [`ErrorKind`] / [`Span`] — the shared error and
//!   span types (`expr-util`).
//!
//! This crate itself implements none of these — see the module docs of
//! `expr-util`, `expr-lex`, `expr-par`, and `expr-compile` for the actual
//! logic, and `spec.md` for the full design this workspace implements.
//!
//! This library is explicitly not an expression evaluator: see the
//! built-in compilers above for what it *does* do with a parsed
//! expression, and `spec.md` §1 for what it deliberately leaves to the
//! caller.

pub use expr_compile::{
    compile, compile_elements, inspect_variables, CompileError, Compiler, IdentifierInspector,
    IdentityCompiler, IdentityValue,
};
pub use expr_lex::{tokenize, Token, TokenKind, TokenValue};
pub use expr_par::{parse, parse_tokens, Element, ElementKind};
pub use expr_util::{
    default_dialect, get_dialect, register_dialect, unregister_dialect, Arity, Associativity,
    Dialect, DialectBuilder, DialectRef, ErrorKind, ExpressionError, OperatorSpec, Span,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facade_round_trip_tokenize_parse_compile() {
        let dialect = default_dialect();
        let compiler = IdentityCompiler::new();
        let value = compile(&compiler, &mut (), "1 + 2 * 3", &dialect).unwrap();
        assert_eq!(
            value,
            IdentityValue::Binary {
                operator: "+".to_string(),
                left: Box::new(IdentityValue::Literal(TokenValue::Int(1))),
                right: Box::new(IdentityValue::Binary {
                    operator: "*".to_string(),
                    left: Box::new(IdentityValue::Literal(TokenValue::Int(2))),
                    right: Box::new(IdentityValue::Literal(TokenValue::Int(3))),
                }),
            }
        );
    }

    #[test]
    fn facade_exposes_the_dialect_registry() {
        register_dialect("facade-test-dialect", default_dialect()).unwrap();
        assert!(get_dialect(DialectRef::Named("facade-test-dialect")).is_ok());
        unregister_dialect("facade-test-dialect");
        assert!(get_dialect(DialectRef::Named("facade-test-dialect")).is_err());
    }

    #[test]
    fn facade_exposes_identifier_inspection() {
        let dialect = default_dialect();
        let vars = inspect_variables("f(x) + y", &dialect).unwrap();
        assert_eq!(vars, ["x", "y"].iter().map(|s| s.to_string()).collect());
    }
}
