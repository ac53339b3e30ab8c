//! Dialect configuration — the operator table, keyword-operator and
//! identifier character classes, and case-sensitivity that the tokenizer
//! and parser are both driven by.
//!
//! A [`Dialect`] is built once, through [`DialectBuilder`], and is
//! immutable and `Send + Sync` afterward so a single instance can be
//! shared (typically behind an `Arc`) across concurrent compiles.

use std::collections::BTreeMap;

use bitflags::bitflags;

use crate::error::ExpressionError;
use crate::unicode::major_category;

bitflags! {
    /// Which arities an operator may be used with. `UNARY | BINARY` marks
    /// an operator (e.g. `-`) that is disambiguated by the parser from
    /// context — see `spec.md` §4.3.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Arity: u8 {
        const UNARY  = 0b01;
        const BINARY = 0b10;
    }
}

/// Operator associativity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

/// A single operator's fixed properties: precedence, associativity, and
/// which arities it supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorSpec {
    pub precedence: u32,
    pub associativity: Associativity,
    pub arity: Arity,
}

impl OperatorSpec {
    pub fn new(precedence: u32, associativity: Associativity, arity: Arity) -> Self {
        Self {
            precedence,
            associativity,
            arity,
        }
    }
}

/// Immutable dialect configuration: operator table plus the character
/// classes the tokenizer uses to recognize identifiers.
///
/// Derived fields (`keyword_operators`, `operator_characters`,
/// `composed_operators`) are computed once, in [`DialectBuilder::build`],
/// exactly as `spec.md` §4.1 specifies.
#[derive(Debug, Clone)]
pub struct Dialect {
    operators: BTreeMap<String, OperatorSpec>,
    case_sensitive: bool,
    identifier_start_characters: String,
    identifier_characters: String,
    identifier_start_category: String,
    identifier_category: String,

    keyword_operators: Vec<String>,
    operator_characters: String,
    composed_operators: Vec<String>,
}

impl Dialect {
    pub fn builder() -> DialectBuilder {
        DialectBuilder::new()
    }

    pub fn operator(&self, name: &str) -> Option<&OperatorSpec> {
        self.operators.get(name)
    }

    pub fn operators(&self) -> impl Iterator<Item = (&str, &OperatorSpec)> {
        self.operators.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn identifier_start_category(&self) -> &str {
        &self.identifier_start_category
    }

    pub fn identifier_category(&self) -> &str {
        &self.identifier_category
    }

    pub fn identifier_start_characters(&self) -> &str {
        &self.identifier_start_characters
    }

    pub fn identifier_characters(&self) -> &str {
        &self.identifier_characters
    }

    pub fn operator_characters(&self) -> &str {
        &self.operator_characters
    }

    pub fn composed_operators(&self) -> &[String] {
        &self.composed_operators
    }

    pub fn is_identifier_start(&self, c: char) -> bool {
        self.identifier_start_category.contains(major_category(c))
            || self.identifier_start_characters.contains(c)
    }

    pub fn is_identifier_continue(&self, c: char) -> bool {
        self.identifier_category.contains(major_category(c))
            || self.identifier_characters.contains(c)
    }

    /// Does `word` name a keyword operator (e.g. `and`), honouring the
    /// dialect's case sensitivity?
    pub fn is_keyword_operator(&self, word: &str) -> bool {
        if self.case_sensitive {
            self.keyword_operators.iter().any(|k| k == word)
        } else {
            self.keyword_operators
                .iter()
                .any(|k| k.eq_ignore_ascii_case(word))
        }
    }

    /// The canonical operator name to look up for a keyword spelling found
    /// in the source, respecting case sensitivity (the operator table key
    /// retains its originally-declared spelling; a case-insensitive
    /// dialect matches regardless of the source's casing).
    pub fn canonical_keyword(&self, word: &str) -> Option<&str> {
        if self.case_sensitive {
            self.keyword_operators
                .iter()
                .find(|k| k.as_str() == word)
                .map(|s| s.as_str())
        } else {
            self.keyword_operators
                .iter()
                .find(|k| k.eq_ignore_ascii_case(word))
                .map(|s| s.as_str())
        }
    }
}

/// Builder for [`Dialect`]. Collects operator declarations and identifier
/// character-class overrides, then validates and derives the rest in
/// [`build`](Self::build).
///
/// Operator declarations are kept in the order given, duplicates and all
/// — [`build`](Self::build) is where redeclarations of the same name are
/// reconciled, so that a name declared twice with incompatible
/// precedence/associativity is caught rather than one silently
/// clobbering the other.
#[derive(Debug, Clone)]
pub struct DialectBuilder {
    operators: Vec<(String, OperatorSpec)>,
    case_sensitive: bool,
    identifier_start_characters: String,
    identifier_characters: String,
    identifier_start_category: String,
    identifier_category: String,
}

impl Default for DialectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DialectBuilder {
    pub fn new() -> Self {
        Self {
            operators: Vec::new(),
            case_sensitive: true,
            identifier_start_characters: String::new(),
            identifier_characters: String::new(),
            identifier_start_category: "L".to_string(),
            identifier_category: "LN".to_string(),
        }
    }

    /// Declares an operator. Declaring the same name more than once is
    /// permitted — e.g. `-` as both unary and binary — but only when the
    /// redeclarations agree on precedence and associativity; the arity
    /// masks are unioned together. See [`build`](Self::build).
    pub fn operator(
        mut self,
        name: impl Into<String>,
        precedence: u32,
        associativity: Associativity,
        arity: Arity,
    ) -> Self {
        let name = name.into();
        self.operators
            .push((name, OperatorSpec::new(precedence, associativity, arity)));
        self
    }

    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.case_sensitive = yes;
        self
    }

    pub fn identifier_start_characters(mut self, chars: impl Into<String>) -> Self {
        self.identifier_start_characters = chars.into();
        self
    }

    pub fn identifier_characters(mut self, chars: impl Into<String>) -> Self {
        self.identifier_characters = chars.into();
        self
    }

    pub fn identifier_start_category(mut self, category: impl Into<String>) -> Self {
        self.identifier_start_category = category.into();
        self
    }

    pub fn identifier_category(mut self, category: impl Into<String>) -> Self {
        self.identifier_category = category.into();
        self
    }

    /// Validates the operator table and derives `keyword_operators`,
    /// `operator_characters`, and `composed_operators`.
    ///
    /// Fails with [`ExpressionError::Config`] if an operator name is
    /// empty, or if the same name is declared more than once with
    /// different precedence or associativity. Redeclarations that agree
    /// on precedence and associativity are accepted and their arity masks
    /// unioned — this is how `-` is declared as both unary and binary in
    /// [`default_dialect`] without a special-cased builder method.
    pub fn build(self) -> Result<Dialect, ExpressionError> {
        let mut operators: BTreeMap<String, OperatorSpec> = BTreeMap::new();
        for (name, spec) in self.operators {
            if name.is_empty() {
                return Err(ExpressionError::config("operator name must not be empty"));
            }
            match operators.get_mut(&name) {
                None => {
                    operators.insert(name, spec);
                }
                Some(existing) => {
                    if existing.precedence != spec.precedence
                        || existing.associativity != spec.associativity
                    {
                        return Err(ExpressionError::config(format!(
                            "operator '{name}' redeclared with incompatible precedence/associativity"
                        )));
                    }
                    existing.arity |= spec.arity;
                }
            }
        }

        let opnames: Vec<&str> = operators.keys().map(|s| s.as_str()).collect();

        let keyword_operators: Vec<String> = opnames
            .iter()
            .filter(|name| !name.is_empty() && name.chars().all(|c| major_category(c) == 'L'))
            .map(|s| s.to_string())
            .collect();

        let plain_operators: Vec<&str> = opnames
            .iter()
            .copied()
            .filter(|name| !keyword_operators.iter().any(|k| k == name))
            .collect();

        let mut seen = std::collections::BTreeSet::new();
        let mut operator_characters = String::new();
        for op in &plain_operators {
            for c in op.chars() {
                if seen.insert(c) {
                    operator_characters.push(c);
                }
            }
        }

        let composed_operators: Vec<String> = plain_operators
            .iter()
            .filter(|op| op.chars().count() > 1)
            .map(|s| s.to_string())
            .collect();

        Ok(Dialect {
            operators,
            case_sensitive: self.case_sensitive,
            identifier_start_characters: self.identifier_start_characters,
            identifier_characters: self.identifier_characters,
            identifier_start_category: self.identifier_start_category,
            identifier_category: self.identifier_category,
            keyword_operators,
            operator_characters,
            composed_operators,
        })
    }
}

/// The default dialect described in `spec.md` §4.1: C-like arithmetic and
/// comparison operators plus Python-style keyword booleans.
///
/// The source `expressions` library this crate descends from is
/// internally inconsistent about `^` — one variant of it lists both an
/// exponent operator and a bitwise-XOR operator at precedence 1000 and
/// 300 under the same spelling. `spec.md` §9 resolves the ambiguity in
/// favour of a single `^` as right-associative exponentiation; this
/// dialect does not provide bitwise-XOR at all. See DESIGN.md.
pub fn default_dialect() -> Dialect {
    DialectBuilder::new()
        .case_sensitive(false)
        .identifier_start_characters("_")
        .identifier_characters("_")
        .identifier_start_category("L")
        .identifier_category("LN")
        .operator("^", 1000, Associativity::Right, Arity::BINARY)
        .operator("*", 900, Associativity::Left, Arity::BINARY)
        .operator("/", 900, Associativity::Left, Arity::BINARY)
        .operator("%", 900, Associativity::Left, Arity::BINARY)
        .operator("+", 500, Associativity::Left, Arity::BINARY)
        .operator(
            "-",
            500,
            Associativity::Left,
            Arity::UNARY | Arity::BINARY,
        )
        .operator("&", 300, Associativity::Left, Arity::BINARY)
        .operator("|", 300, Associativity::Left, Arity::BINARY)
        .operator("<", 200, Associativity::Left, Arity::BINARY)
        .operator("<=", 200, Associativity::Left, Arity::BINARY)
        .operator(">", 200, Associativity::Left, Arity::BINARY)
        .operator(">=", 200, Associativity::Left, Arity::BINARY)
        .operator("!=", 200, Associativity::Left, Arity::BINARY)
        .operator("==", 200, Associativity::Left, Arity::BINARY)
        .operator("not", 120, Associativity::Left, Arity::UNARY)
        .operator("and", 110, Associativity::Left, Arity::BINARY)
        .operator("or", 100, Associativity::Left, Arity::BINARY)
        .build()
        .expect("the default dialect is statically well-formed")
}
