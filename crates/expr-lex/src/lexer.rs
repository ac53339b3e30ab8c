//! The tokenizer: turns source text into a flat, finite sequence of
//! [`Token`]s, driven entirely by a [`Dialect`].
//!
//! This is a direct-coded lexer (one function per token shape, dispatched
//! on the current character) rather than a table-driven state machine —
//! the dialect's character classes are themselves data, so a transition
//! table would just be this dispatch rewritten less legibly.

use expr_util::unicode::{major_category, CAT_CONTROL, CAT_LETTER, CAT_NUMBER, CAT_SEPARATOR};
use expr_util::{Dialect, ExpressionError, Span};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind, TokenValue};

/// Tokenizes `text` under `dialect`.
///
/// Guarantees (`spec.md` §4.2): total over valid inputs, finite and
/// deterministic, zero tokens for empty or whitespace-only input, and
/// every reported offset is a 0-based code point position.
pub fn tokenize(text: &str, dialect: &Dialect) -> Result<Vec<Token>, ExpressionError> {
    let mut cursor = Cursor::new(text);
    let mut tokens = Vec::new();

    loop {
        skip_whitespace(&mut cursor);
        if cursor.at_end() {
            break;
        }

        let start = cursor.pos();
        let c = cursor.current().expect("checked not at_end above");

        let (kind, value) = if major_category(c) == CAT_NUMBER {
            lex_number(&mut cursor, start)?
        } else if dialect.is_identifier_start(c) {
            lex_identifier(&mut cursor, dialect, start)
        } else if dialect.operator_characters().contains(c) {
            lex_operator(&mut cursor, dialect, start)
        } else if c == '"' || c == '\'' {
            let decoded = lex_string(&mut cursor, c, start)?;
            (TokenKind::String, TokenValue::Text(decoded))
        } else if let Some(kind) = single_char_punctuator(c) {
            cursor.advance();
            (kind, TokenValue::Text(c.to_string()))
        } else {
            return Err(ExpressionError::syntax(
                format!(
                    "unknown character {:?}, category {}",
                    c,
                    major_category(c)
                ),
                start,
            ));
        };

        tokens.push(Token::new(kind, value, Span::new(start, cursor.pos())));
    }

    Ok(tokens)
}

fn skip_whitespace(cursor: &mut Cursor) {
    cursor.consume_while(|c| {
        let cat = major_category(c);
        cat == CAT_SEPARATOR || cat == CAT_CONTROL
    });
}

fn single_char_punctuator(c: char) -> Option<TokenKind> {
    match c {
        '(' => Some(TokenKind::LParen),
        ')' => Some(TokenKind::RParen),
        '[' => Some(TokenKind::LBracket),
        ']' => Some(TokenKind::RBracket),
        ',' => Some(TokenKind::Comma),
        ':' => Some(TokenKind::Colon),
        ';' => Some(TokenKind::Semicolon),
        _ => None,
    }
}

/// Consumes a numeric literal starting at the cursor (which must be
/// positioned on a digit) and returns its kind and decoded value.
fn lex_number(
    cursor: &mut Cursor,
    start: usize,
) -> Result<(TokenKind, TokenValue), ExpressionError> {
    let is_digit = |c: char| major_category(c) == CAT_NUMBER;

    cursor.consume_while(is_digit);
    let mut is_float = false;

    if cursor.current() == Some('.') {
        is_float = true;
        cursor.advance();
        if cursor.current().map(is_digit).unwrap_or(false) {
            cursor.consume_while(is_digit);
        }
    }

    if matches!(cursor.current(), Some('e') | Some('E')) {
        is_float = true;
        cursor.advance();
        if matches!(cursor.current(), Some('+') | Some('-')) {
            cursor.advance();
        } else if !cursor.current().map(is_digit).unwrap_or(false) {
            return Err(ExpressionError::syntax(
                "number expected after exponent",
                cursor.pos(),
            ));
        }
        cursor.consume_while(is_digit);
    } else if cursor.current().map(|c| major_category(c) == CAT_LETTER).unwrap_or(false) {
        return Err(ExpressionError::syntax("letter in a number", cursor.pos()));
    }

    let text = cursor.slice(start);
    if is_float {
        let value: f64 = text
            .parse()
            .map_err(|_| ExpressionError::syntax(format!("invalid float literal '{text}'"), start))?;
        Ok((TokenKind::Float, TokenValue::Float(value)))
    } else {
        let value: i64 = text
            .parse()
            .map_err(|_| ExpressionError::syntax(format!("invalid integer literal '{text}'"), start))?;
        Ok((TokenKind::Integer, TokenValue::Int(value)))
    }
}

fn lex_identifier(
    cursor: &mut Cursor,
    dialect: &Dialect,
    start: usize,
) -> (TokenKind, TokenValue) {
    cursor.advance();
    cursor.consume_while(|c| dialect.is_identifier_continue(c));
    let text = cursor.slice(start);

    let kind = if dialect.is_keyword_operator(&text) {
        TokenKind::Operator
    } else {
        TokenKind::Identifier
    };
    (kind, TokenValue::Text(text))
}

fn lex_operator(cursor: &mut Cursor, dialect: &Dialect, start: usize) -> (TokenKind, TokenValue) {
    let first = cursor.current().expect("operator lexing starts on a char");
    cursor.advance();

    if let Some(next) = cursor.current() {
        let mut composed = String::with_capacity(first.len_utf8() + next.len_utf8());
        composed.push(first);
        composed.push(next);
        if dialect.composed_operators().iter().any(|op| op == &composed) {
            cursor.advance();
        }
    }

    let text = cursor.slice(start);
    (TokenKind::Operator, TokenValue::Text(text))
}

/// Consumes a string literal starting at the cursor (positioned on the
/// opening `quote`) and returns its unescaped contents.
///
/// `\` protects exactly one following character; recognized escapes are
/// `\n`, `\t`, `\r`, `\0`, `\\`, `\'`, `\"` — anything else passes the
/// escaped character through unchanged.
fn lex_string(cursor: &mut Cursor, quote: char, start: usize) -> Result<String, ExpressionError> {
    cursor.advance(); // consume opening quote
    let mut decoded = String::new();

    loop {
        match cursor.current() {
            None => {
                return Err(ExpressionError::syntax("missing string end quote", start));
            }
            Some(c) if c == quote => {
                cursor.advance(); // consume closing quote
                break;
            }
            Some('\\') => {
                cursor.advance(); // consume backslash
                match cursor.current() {
                    None => {
                        return Err(ExpressionError::syntax("missing string end quote", start));
                    }
                    Some(escaped) => {
                        decoded.push(decode_escape(escaped));
                        cursor.advance();
                    }
                }
            }
            Some(c) => {
                decoded.push(c);
                cursor.advance();
            }
        }
    }

    Ok(decoded)
}

fn decode_escape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        other => other, // \\, \', \", and anything else pass through verbatim
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expr_util::default_dialect;

    fn toks(text: &str) -> Vec<Token> {
        tokenize(text, &default_dialect()).unwrap()
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(toks("").is_empty());
        assert!(toks("   \t\n").is_empty());
    }

    #[test]
    fn s1_single_integer() {
        let tokens = toks("1");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Integer);
        assert_eq!(tokens[0].value, TokenValue::Int(1));
        assert_eq!(tokens[0].span, Span::new(0, 1));
    }

    #[test]
    fn integer_then_dot_then_letter_is_not_consumed_into_number() {
        // "1.5" is a float...
        let tokens = toks("1.5");
        assert_eq!(tokens[0].value, TokenValue::Float(1.5));
    }

    #[test]
    fn trailing_dot_with_no_fraction_digits_is_float() {
        let tokens = toks("1. + 2");
        assert_eq!(tokens[0].value, TokenValue::Float(1.0));
    }

    #[test]
    fn exponent_without_sign() {
        let tokens = toks("1e10");
        assert_eq!(tokens[0].value, TokenValue::Float(1e10));
    }

    #[test]
    fn exponent_with_sign() {
        let tokens = toks("1.5e-3");
        assert_eq!(tokens[0].value, TokenValue::Float(1.5e-3));
    }

    #[test]
    fn letter_immediately_after_number_is_a_syntax_error() {
        let err = tokenize("10x", &default_dialect()).unwrap_err();
        assert_eq!(err.kind(), expr_util::ErrorKind::Syntax);
    }

    #[test]
    fn exponent_missing_digit_is_a_syntax_error() {
        let err = tokenize("1e", &default_dialect()).unwrap_err();
        assert_eq!(err.kind(), expr_util::ErrorKind::Syntax);
    }

    #[test]
    fn identifiers_and_unicode_identifiers() {
        let tokens = toks("foo_bar");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].value, TokenValue::Text("foo_bar".to_string()));

        let tokens = toks("λambda");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
    }

    #[test]
    fn keyword_operators_promote_from_identifier() {
        let tokens = toks("a and b");
        assert_eq!(tokens[1].kind, TokenKind::Operator);
        assert_eq!(tokens[1].value, TokenValue::Text("and".to_string()));
    }

    #[test]
    fn s7_case_insensitive_vs_case_sensitive_keyword_operators() {
        let insensitive = tokenize("AND and OR or", &default_dialect()).unwrap();
        assert!(insensitive.iter().all(|t| t.kind == TokenKind::Operator));

        let sensitive = expr_util::DialectBuilder::new()
            .case_sensitive(true)
            .identifier_start_category("L")
            .identifier_category("LN")
            .operator(
                "and",
                110,
                expr_util::Associativity::Left,
                expr_util::Arity::BINARY,
            )
            .operator(
                "or",
                100,
                expr_util::Associativity::Left,
                expr_util::Arity::BINARY,
            )
            .build()
            .unwrap();
        let tokens = tokenize("AND and OR or", &sensitive).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Identifier); // "AND" != "and"
        assert_eq!(tokens[1].kind, TokenKind::Operator); // "and" matches
        assert_eq!(tokens[2].kind, TokenKind::Identifier); // "OR" != "or"
        assert_eq!(tokens[3].kind, TokenKind::Operator); // "or" matches
    }

    #[test]
    fn composed_operators_prefer_the_longer_match() {
        let tokens = toks("a <= b");
        assert_eq!(tokens[1].value, TokenValue::Text("<=".to_string()));

        let tokens = toks("a < b");
        assert_eq!(tokens[1].value, TokenValue::Text("<".to_string()));
    }

    #[test]
    fn string_literals_strip_quotes_and_decode_escapes() {
        let tokens = toks(r#""hello\nworld""#);
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(
            tokens[0].value,
            TokenValue::Text("hello\nworld".to_string())
        );

        let tokens = toks(r"'it\'s'");
        assert_eq!(tokens[0].value, TokenValue::Text("it's".to_string()));
    }

    #[test]
    fn unterminated_string_is_a_syntax_error() {
        let err = tokenize("\"abc", &default_dialect()).unwrap_err();
        assert_eq!(err.kind(), expr_util::ErrorKind::Syntax);
    }

    #[test]
    fn punctuators_lex_as_single_characters() {
        let tokens = toks("f(1,2)[0]:;");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::LParen,
                TokenKind::Integer,
                TokenKind::Comma,
                TokenKind::Integer,
                TokenKind::RParen,
                TokenKind::LBracket,
                TokenKind::Integer,
                TokenKind::RBracket,
                TokenKind::Colon,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn unknown_character_is_a_syntax_error() {
        let err = tokenize("a $ b", &default_dialect()).unwrap_err();
        assert_eq!(err.kind(), expr_util::ErrorKind::Syntax);
        assert_eq!(err.offset(), Some(2));
    }

    #[test]
    fn spans_line_up_with_code_point_offsets() {
        let tokens = toks("ab + cd");
        assert_eq!(tokens[0].span, Span::new(0, 2)); // "ab"
        assert_eq!(tokens[1].span, Span::new(3, 4)); // "+"
        assert_eq!(tokens[2].span, Span::new(5, 7)); // "cd"
    }

    // ------------------------------------------------------------------
    // Property-based tests (spec.md §8 invariants #2 and #4)
    // ------------------------------------------------------------------

    #[test]
    fn property_plain_identifiers_lex_to_a_single_token_spanning_the_whole_input() {
        use proptest::prelude::*;

        proptest!(|(input in "[a-zA-Z_][a-zA-Z0-9_]{0,20}")| {
            let tokens = toks(&input);
            prop_assert_eq!(tokens.len(), 1);
            prop_assert_eq!(tokens[0].span, Span::new(0, input.chars().count()));
        });
    }

    #[test]
    fn property_decimal_integers_round_trip_through_i64() {
        use proptest::prelude::*;

        proptest!(|(n in 0i64..1_000_000_000)| {
            let tokens = toks(&n.to_string());
            prop_assert_eq!(tokens.len(), 1);
            prop_assert_eq!(tokens[0].value.as_int(), Some(n));
        });
    }

    #[test]
    fn property_case_sensitivity_does_not_affect_tokenization_without_keyword_operators() {
        use proptest::prelude::*;

        // Invariant #4: for expressions lacking keyword operators, case
        // sensitivity of the dialect must not change the token stream.
        proptest!(|(a in "[a-zA-Z_][a-zA-Z0-9_]{0,10}", b in "[a-zA-Z_][a-zA-Z0-9_]{0,10}")| {
            // "and"/"or"/"not" (case-insensitively) are the only keyword
            // operators in the default dialect; skip names that could
            // collide with them under either dialect's case folding.
            for name in [&a, &b] {
                prop_assume!(!["and", "or", "not"].contains(&name.to_lowercase().as_str()));
            }

            let expr = format!("{a} + {b}");
            let sensitive = expr_util::DialectBuilder::new()
                .case_sensitive(true)
                .identifier_start_category("L")
                .identifier_category("LN")
                .identifier_start_characters("_")
                .identifier_characters("_")
                .operator("+", 500, expr_util::Associativity::Left, expr_util::Arity::BINARY)
                .build()
                .unwrap();
            let insensitive = expr_util::DialectBuilder::new()
                .case_sensitive(false)
                .identifier_start_category("L")
                .identifier_category("LN")
                .identifier_start_characters("_")
                .identifier_characters("_")
                .operator("+", 500, expr_util::Associativity::Left, expr_util::Arity::BINARY)
                .build()
                .unwrap();

            let t1 = tokenize(&expr, &sensitive).unwrap();
            let t2 = tokenize(&expr, &insensitive).unwrap();
            let kinds1: Vec<_> = t1.iter().map(|t| t.kind).collect();
            let kinds2: Vec<_> = t2.iter().map(|t| t.kind).collect();
            prop_assert_eq!(kinds1, kinds2);
        });
    }
}
