//! The compile driver: walks a postfix [`Element`] stream, dispatching to
//! a [`Compiler`] implementation and maintaining the value stack.
//!
//! Directly mirrors the tokenize → parse → reduce pipeline described in
//! `spec.md` §4.4: this module owns none of the tokenizing or parsing
//! itself (that's `expr-lex`/`expr-par`'s job) and instead reduces an
//! already-parsed [`Element`] stream to a single `Compiler::Output`.

use thiserror::Error;

use expr_par::{parse, Element, ElementKind};
use expr_util::{Dialect, ExpressionError};

use crate::compiler::Compiler;

/// An error from a full compile: either a syntax/parse/internal failure
/// from the lexer, parser, or driver itself, or a [`Compiler::Error`]
/// raised by the caller's own compile logic.
#[derive(Debug, Error)]
pub enum CompileError<E> {
    #[error(transparent)]
    Expression(#[from] ExpressionError),

    #[error("compiler error: {0}")]
    User(E),
}

/// Tokenizes and parses `text` under `dialect`, then drives `compiler`
/// over the result. This is the crate's main entry point.
pub fn compile<C: Compiler>(
    compiler: &C,
    context: &mut C::Context,
    text: &str,
    dialect: &Dialect,
) -> Result<C::Output, CompileError<C::Error>> {
    let elements = parse(text, dialect)?;
    compile_elements(compiler, context, &elements)
}

/// Drives `compiler` over an already-parsed postfix [`Element`] stream.
///
/// Useful when the same parse result is compiled more than once (e.g.
/// once with [`crate::builtin::IdentifierInspector`] to validate
/// identifiers, then again with the caller's real compiler) without
/// re-tokenizing and re-parsing.
pub fn compile_elements<C: Compiler>(
    compiler: &C,
    context: &mut C::Context,
    elements: &[Element],
) -> Result<C::Output, CompileError<C::Error>> {
    let mut stack: Vec<C::Output> = Vec::new();

    for (index, element) in elements.iter().enumerate() {
        let value = match element.kind {
            ElementKind::Literal => compiler
                .compile_literal(context, &element.value)
                .map_err(CompileError::User)?,

            ElementKind::Variable => {
                let name = element.name().ok_or_else(|| {
                    CompileError::Expression(ExpressionError::internal(
                        "variable element carries no name",
                    ))
                })?;
                compiler
                    .compile_variable(context, name)
                    .map_err(CompileError::User)?
            }

            ElementKind::Operator => {
                let name = element.name().ok_or_else(|| {
                    CompileError::Expression(ExpressionError::internal(
                        "operator element carries no name",
                    ))
                })?;
                match element.argc {
                    1 => {
                        let operand = pop(&mut stack, index)?;
                        compiler
                            .compile_unary(context, name, operand)
                            .map_err(CompileError::User)?
                    }
                    2 => {
                        let right = pop(&mut stack, index)?;
                        let left = pop(&mut stack, index)?;
                        compiler
                            .compile_binary(context, name, left, right)
                            .map_err(CompileError::User)?
                    }
                    n => {
                        return Err(CompileError::Expression(ExpressionError::internal(
                            format!("invalid operator argument count: {n}"),
                        )))
                    }
                }
            }

            ElementKind::Function => {
                let name = element
                    .name()
                    .ok_or_else(|| {
                        CompileError::Expression(ExpressionError::internal(
                            "function element carries no name",
                        ))
                    })?
                    .to_string();
                let argc = element.argc as usize;
                if stack.len() < argc {
                    return Err(CompileError::Expression(ExpressionError::internal(
                        format!("function '{name}' expects {argc} argument(s), stack has {}", stack.len()),
                    )));
                }
                let args = stack.split_off(stack.len() - argc);
                compiler
                    .compile_function(context, &name, args)
                    .map_err(CompileError::User)?
            }

            ElementKind::LParen | ElementKind::RParen => {
                return Err(CompileError::Expression(ExpressionError::internal(
                    "parenthesis element reached the compile driver",
                )));
            }
        };

        stack.push(value);
    }

    if stack.len() != 1 {
        return Err(CompileError::Expression(ExpressionError::internal(
            format!("value stack has {} item(s), should have 1", stack.len()),
        )));
    }

    let result = stack.pop().expect("checked len == 1 above");
    compiler.finalize(context, result).map_err(CompileError::User)
}

/// Pops one value for an operator's operand. An empty stack here means the
/// operator was applied with too few operands, which `spec.md` §7
/// classifies as a `ParseError`, not an `InternalError` (that kind is
/// reserved for the final-stack-not-a-singleton and unknown-element-type
/// invariant violations below).
fn pop<T, E>(stack: &mut Vec<T>, index: usize) -> Result<T, CompileError<E>> {
    stack.pop().ok_or_else(|| {
        CompileError::Expression(ExpressionError::parse(
            "operator applied with insufficient operands",
            index,
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::IdentityCompiler;

    #[test]
    fn operator_with_insufficient_operands_is_a_parse_error() {
        let compiler = IdentityCompiler::new();
        let elements = vec![Element::operator("+", 2)];
        let err = compile_elements(&compiler, &mut (), &elements).unwrap_err();
        match err {
            CompileError::Expression(e) => assert_eq!(e.kind(), expr_util::ErrorKind::Parse),
            CompileError::User(_) => panic!("expected a parse Expression error"),
        }
    }

    #[test]
    fn a_stack_left_with_more_than_one_value_is_an_internal_error() {
        let compiler = IdentityCompiler::new();
        let elements = vec![
            Element::literal(expr_lex::TokenValue::Int(1)),
            Element::literal(expr_lex::TokenValue::Int(2)),
        ];
        let err = compile_elements(&compiler, &mut (), &elements).unwrap_err();
        assert!(matches!(err, CompileError::Expression(_)));
    }
}
