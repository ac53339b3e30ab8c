//! The two built-in compilers `spec.md` §6 ships: [`IdentityCompiler`],
//! which reconstructs an AST-shaped value instead of evaluating anything,
//! and [`IdentifierInspector`], which collects the variable and function
//! names an expression references without compiling a result at all.
//!
//! Neither compiler evaluates the expression — this crate is explicitly
//! not an evaluator (see `spec.md` §1's Non-goals). `IdentityCompiler` is
//! the nearest equivalent of the `SimpleCompiler` example the original
//! `expressions` library ships, rehomed here as a zero-evaluation
//! structural transform rather than a Python-`eval`-string builder.

use std::cell::RefCell;
use std::collections::HashSet;
use std::convert::Infallible;

use expr_lex::TokenValue;
use expr_util::{Dialect, ExpressionError};

use crate::compiler::Compiler;
use crate::driver::{compile, CompileError};

/// The structural value [`IdentityCompiler`] produces: a direct,
/// allocation-light reconstruction of the parsed expression tree, with no
/// evaluation performed at any node.
#[derive(Debug, Clone, PartialEq)]
pub enum IdentityValue {
    Literal(TokenValue),
    Variable(String),
    Unary {
        operator: String,
        operand: Box<IdentityValue>,
    },
    Binary {
        operator: String,
        left: Box<IdentityValue>,
        right: Box<IdentityValue>,
    },
    Call {
        name: String,
        args: Vec<IdentityValue>,
    },
}

/// A [`Compiler`] that performs no semantic work: it rebuilds the parsed
/// expression as an [`IdentityValue`] tree. Useful for snapshot testing a
/// dialect's parse behavior, or as a starting point for a real compiler
/// that only needs to override a handful of methods.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityCompiler;

impl IdentityCompiler {
    pub fn new() -> Self {
        Self
    }
}

impl Compiler for IdentityCompiler {
    type Context = ();
    type Output = IdentityValue;
    type Error = Infallible;

    fn compile_literal(&self, _context: &mut (), value: &TokenValue) -> Result<IdentityValue, Infallible> {
        Ok(IdentityValue::Literal(value.clone()))
    }

    fn compile_variable(&self, _context: &mut (), name: &str) -> Result<IdentityValue, Infallible> {
        Ok(IdentityValue::Variable(name.to_string()))
    }

    fn compile_unary(
        &self,
        _context: &mut (),
        operator: &str,
        operand: IdentityValue,
    ) -> Result<IdentityValue, Infallible> {
        Ok(IdentityValue::Unary {
            operator: operator.to_string(),
            operand: Box::new(operand),
        })
    }

    fn compile_binary(
        &self,
        _context: &mut (),
        operator: &str,
        left: IdentityValue,
        right: IdentityValue,
    ) -> Result<IdentityValue, Infallible> {
        Ok(IdentityValue::Binary {
            operator: operator.to_string(),
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn compile_function(
        &self,
        _context: &mut (),
        name: &str,
        args: Vec<IdentityValue>,
    ) -> Result<IdentityValue, Infallible> {
        Ok(IdentityValue::Call {
            name: name.to_string(),
            args,
        })
    }
}

/// A [`Compiler`] that compiles nothing: it walks the expression purely
/// to collect the set of free variable names and the set of called
/// function names it references, via interior mutability (every method
/// takes `&self`, matching the trait's contract).
#[derive(Debug, Default)]
pub struct IdentifierInspector {
    variables: RefCell<HashSet<String>>,
    functions: RefCell<HashSet<String>>,
}

impl IdentifierInspector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the inspector, returning the collected `(variables,
    /// functions)` name sets.
    pub fn into_names(self) -> (HashSet<String>, HashSet<String>) {
        (self.variables.into_inner(), self.functions.into_inner())
    }
}

impl Compiler for IdentifierInspector {
    type Context = ();
    type Output = ();
    type Error = Infallible;

    fn compile_literal(&self, _context: &mut (), _value: &TokenValue) -> Result<(), Infallible> {
        Ok(())
    }

    fn compile_variable(&self, _context: &mut (), name: &str) -> Result<(), Infallible> {
        self.variables.borrow_mut().insert(name.to_string());
        Ok(())
    }

    fn compile_unary(&self, _context: &mut (), _operator: &str, _operand: ()) -> Result<(), Infallible> {
        Ok(())
    }

    fn compile_binary(&self, _context: &mut (), _operator: &str, _left: (), _right: ()) -> Result<(), Infallible> {
        Ok(())
    }

    fn compile_function(&self, _context: &mut (), name: &str, _args: Vec<()>) -> Result<(), Infallible> {
        self.functions.borrow_mut().insert(name.to_string());
        Ok(())
    }
}

/// Convenience wrapper around [`IdentifierInspector`]: parses `text`
/// under `dialect` and returns just the set of free variable names it
/// references, per `spec.md` §6.
pub fn inspect_variables(text: &str, dialect: &Dialect) -> Result<HashSet<String>, ExpressionError> {
    let inspector = IdentifierInspector::new();
    match compile(&inspector, &mut (), text, dialect) {
        Ok(()) => Ok(inspector.into_names().0),
        Err(CompileError::Expression(e)) => Err(e),
        Err(CompileError::User(never)) => match never {},
    }
}
