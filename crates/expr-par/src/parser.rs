//! The modified Shunting-yard parser.
//!
//! Turns a token stream into a postfix (Reverse Polish) [`Element`]
//! stream, resolving operator precedence/associativity, disambiguating
//! unary from binary uses of the same operator spelling from context,
//! and discovering variable-arity function-call argument counts as it
//! goes. See `spec.md` §4.3 for the algorithm this is a direct
//! translation of.

use expr_lex::{tokenize, Token, TokenKind, TokenValue};
use expr_util::dialect::{Arity, Associativity};
use expr_util::{Dialect, ExpressionError};

use crate::element::{Element, ElementKind};

/// Parses `text` under `dialect`: tokenizes, then runs the Shunting-yard
/// algorithm over the resulting tokens.
pub fn parse(text: &str, dialect: &Dialect) -> Result<Vec<Element>, ExpressionError> {
    let tokens = tokenize(text, dialect)?;
    parse_tokens(&tokens, dialect)
}

/// Parses an already-tokenized stream under `dialect`.
pub fn parse_tokens(tokens: &[Token], dialect: &Dialect) -> Result<Vec<Element>, ExpressionError> {
    Parser::new(dialect).run(tokens)
}

/// Holds the Shunting-yard algorithm's per-call mutable state: the
/// operator/paren/function stack, the output queue, and the parallel
/// `argc`/`saw_arg` stacks that track variable-arity function calls.
struct Parser<'d> {
    dialect: &'d Dialect,
    stack: Vec<Element>,
    output: Vec<Element>,
    argc: Vec<u32>,
    saw_arg: Vec<bool>,
    prev_was_value: bool,
}

impl<'d> Parser<'d> {
    fn new(dialect: &'d Dialect) -> Self {
        Self {
            dialect,
            stack: Vec::new(),
            output: Vec::new(),
            argc: Vec::new(),
            saw_arg: Vec::new(),
            prev_was_value: false,
        }
    }

    fn run(mut self, tokens: &[Token]) -> Result<Vec<Element>, ExpressionError> {
        for i in 0..tokens.len() {
            let token = &tokens[i];

            // Function-call detection: an identifier immediately followed
            // by '(' is retagged as a function, per spec.md §4.3.
            let is_function_call = token.kind == TokenKind::Identifier
                && tokens
                    .get(i + 1)
                    .map(|next| next.kind == TokenKind::LParen)
                    .unwrap_or(false);

            if is_function_call {
                self.on_function(token);
                continue;
            }

            match token.kind {
                TokenKind::Integer | TokenKind::Float | TokenKind::String => {
                    self.on_literal(token);
                }
                TokenKind::Identifier => self.on_variable(token),
                TokenKind::Comma => self.on_comma(i)?,
                TokenKind::Operator => self.on_operator(token, i)?,
                TokenKind::LParen => self.on_lparen(),
                TokenKind::RParen => self.on_rparen(i)?,
                TokenKind::LBracket | TokenKind::RBracket | TokenKind::Colon | TokenKind::Semicolon => {
                    return Err(ExpressionError::parse(
                        format!("unexpected token at position {i}"),
                        i,
                    ));
                }
            }
        }

        while let Some(item) = self.stack.pop() {
            if item.kind == ElementKind::LParen {
                return Err(ExpressionError::parse(
                    "mismatched parenthesis",
                    tokens.len(),
                ));
            }
            self.output.push(item);
        }

        Ok(self.output)
    }

    fn mark_saw_arg(&mut self) {
        if let Some(top) = self.saw_arg.last_mut() {
            *top = true;
        }
    }

    fn on_literal(&mut self, token: &Token) {
        let value = token.value.clone();
        self.output.push(Element::literal(value));
        self.mark_saw_arg();
        self.prev_was_value = true;
    }

    fn on_variable(&mut self, token: &Token) {
        let name = token
            .value
            .as_text()
            .expect("identifier tokens always carry text")
            .to_string();
        self.output.push(Element::variable(name));
        self.mark_saw_arg();
        self.prev_was_value = true;
    }

    fn on_function(&mut self, token: &Token) {
        let name = token
            .value
            .as_text()
            .expect("identifier tokens always carry text")
            .to_string();
        self.stack.push(Element::function(name, 0));
        self.argc.push(0);
        self.mark_saw_arg();
        self.saw_arg.push(false);
        self.prev_was_value = false;
    }

    fn on_comma(&mut self, index: usize) -> Result<(), ExpressionError> {
        loop {
            match self.stack.last() {
                Some(top) if top.kind == ElementKind::LParen => break,
                Some(_) => self.output.push(self.stack.pop().unwrap()),
                None => {
                    return Err(ExpressionError::parse(
                        "comma outside of a function call argument list",
                        index,
                    ));
                }
            }
        }

        let top = self.saw_arg.last_mut().ok_or_else(|| {
            ExpressionError::parse("comma outside of a function call argument list", index)
        })?;
        if *top {
            *self.argc.last_mut().expect("argc stack matches saw_arg stack") += 1;
        }
        *top = false;

        self.prev_was_value = false;
        Ok(())
    }

    fn on_operator(&mut self, token: &Token, index: usize) -> Result<(), ExpressionError> {
        let name = token
            .value
            .as_text()
            .expect("operator tokens always carry text")
            .to_string();
        // A keyword operator's token retains the source's original spelling
        // (see `lex_identifier`), so under a case-insensitive dialect the
        // dialect-table lookup must go through `canonical_keyword` rather
        // than the raw spelling — otherwise "AND" never resolves to the
        // declared "and" operator.
        let canonical = self
            .dialect
            .canonical_keyword(&name)
            .unwrap_or(name.as_str())
            .to_string();
        let spec = *self.dialect.operator(&canonical).ok_or_else(|| {
            ExpressionError::parse(format!("unknown operator '{name}'"), index)
        })?;

        let is_unary = if spec.arity == Arity::UNARY {
            true
        } else {
            spec.arity.contains(Arity::UNARY) && !self.prev_was_value
        };

        self.prev_was_value = false;

        if is_unary {
            self.stack.push(Element::operator(name, 1));
            return Ok(());
        }

        while let Some(top) = self.stack.last() {
            if top.kind != ElementKind::Operator {
                break;
            }
            let top_name = top.name().expect("operator elements carry a name");
            let top_canonical = self
                .dialect
                .canonical_keyword(top_name)
                .unwrap_or(top_name)
                .to_string();
            let top_spec = *self.dialect.operator(&top_canonical).ok_or_else(|| {
                ExpressionError::internal(format!(
                    "operator '{top_name}' on the parse stack is not in the dialect"
                ))
            })?;

            let left_assoc = spec.associativity == Associativity::Left;
            let should_pop =
                (left_assoc && spec.precedence == top_spec.precedence) || spec.precedence < top_spec.precedence;
            if !should_pop {
                break;
            }
            self.output.push(self.stack.pop().unwrap());
        }

        self.stack.push(Element::operator(name, 2));
        Ok(())
    }

    fn on_lparen(&mut self) {
        self.stack.push(Element::lparen());
        self.prev_was_value = false;
    }

    fn on_rparen(&mut self, index: usize) -> Result<(), ExpressionError> {
        loop {
            match self.stack.last() {
                Some(top) if top.kind == ElementKind::LParen => break,
                Some(_) => self.output.push(self.stack.pop().unwrap()),
                None => {
                    return Err(ExpressionError::parse("mismatched parenthesis", index));
                }
            }
        }
        self.stack.pop(); // the LPAREN itself

        if matches!(self.stack.last().map(|e| e.kind), Some(ElementKind::Function)) {
            let func = self.stack.pop().expect("checked Some above");
            let mut argc = self.argc.pop().expect("argc stack matches function stack");
            let saw = self.saw_arg.pop().expect("saw_arg stack matches function stack");
            if saw {
                argc += 1;
            }
            let name = func.name().expect("function elements carry a name").to_string();
            self.output.push(Element::function(name, argc));
        }

        self.prev_was_value = true;
        Ok(())
    }
}
