//! The `Compiler` capability trait — the callback surface every compile
//! target (an evaluator, a SQL fragment builder, an identifier inspector,
//! ...) implements.
//!
//! This crate never evaluates an expression itself: each method is handed
//! the already-compiled operands and returns whatever representation the
//! caller's target language needs. See `spec.md` §4.4/§4.5 for the
//! visitor contract this trait is a direct translation of, and
//! [`crate::builtin`] for the two compilers this workspace ships.

use expr_lex::TokenValue;

/// A compile target: given the postfix stream the parser produces,
/// builds up a `Self::Output` bottom-up, one node at a time.
///
/// Implementors are free to be stateless (carrying configuration only,
/// as [`crate::builtin::IdentityCompiler`] does) or to accumulate state
/// through interior mutability (as [`crate::builtin::IdentifierInspector`]
/// does), since every method takes `&self` — mutable, per-compile state
/// belongs in `Context` instead, which the driver threads through by
/// `&mut` reference.
pub trait Compiler {
    /// Caller-supplied state threaded through every callback for a single
    /// compile. Use `()` when no external state is needed.
    type Context;
    /// The type each expression node compiles down to.
    type Output;
    /// The error type this compiler's callbacks can raise. This is the
    /// `spec.md` §7 `Semantic` error kind: it never originates in this
    /// crate and travels back to the caller untouched, wrapped in
    /// [`crate::driver::CompileError::User`].
    type Error;

    /// Compiles a literal (integer, float, or string) token value.
    fn compile_literal(
        &self,
        context: &mut Self::Context,
        value: &TokenValue,
    ) -> Result<Self::Output, Self::Error>;

    /// Compiles a bare identifier reference.
    fn compile_variable(
        &self,
        context: &mut Self::Context,
        name: &str,
    ) -> Result<Self::Output, Self::Error>;

    /// Compiles a unary operator application (`-x`, `not x`).
    fn compile_unary(
        &self,
        context: &mut Self::Context,
        operator: &str,
        operand: Self::Output,
    ) -> Result<Self::Output, Self::Error>;

    /// Compiles a binary operator application (`x + y`).
    fn compile_binary(
        &self,
        context: &mut Self::Context,
        operator: &str,
        left: Self::Output,
        right: Self::Output,
    ) -> Result<Self::Output, Self::Error>;

    /// Compiles a function call with its already-compiled arguments, in
    /// source order.
    fn compile_function(
        &self,
        context: &mut Self::Context,
        name: &str,
        args: Vec<Self::Output>,
    ) -> Result<Self::Output, Self::Error>;

    /// Gives the compiler a final chance to transform the fully-reduced
    /// result. The default implementation returns it unchanged.
    fn finalize(
        &self,
        _context: &mut Self::Context,
        output: Self::Output,
    ) -> Result<Self::Output, Self::Error> {
        Ok(output)
    }
}
