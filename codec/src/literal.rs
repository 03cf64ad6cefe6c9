//! Input forms delivered by the query parser.
//!
//! Literals keep their source text so that range checks happen against the
//! declared column type, not against whatever integer width the parser had
//! at hand.

use regex_lite::Regex;
use std::fmt;
use std::net::IpAddr;
use std::sync::OnceLock;
use uuid::Uuid;

/// A literal as written in the statement text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// `null`.
    Null,
    /// `true` / `false`.
    Bool(bool),
    /// Signed integer digits, e.g. `-12`.
    Integer(String),
    /// Fractional or exponent numeric, e.g. `3.1`.
    Decimal(String),
    /// Quoted string, unescaped.
    Text(String),
    /// Bare token shaped like a uuid (five dash-separated groups).
    Uuid(String),
    /// Bare `0x...` token.
    Hex(String),
    /// Anything else, e.g. `abcxyz`.
    Identifier(String),
}

fn integer_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?[0-9]+$").expect("integer pattern"))
}

fn decimal_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^-?(?:(?:[0-9]+\.[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?|[0-9]+[eE][+-]?[0-9]+)$")
            .expect("decimal pattern")
    })
}

fn hex_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^0[xX][0-9A-Za-z]*$").expect("hex pattern"))
}

fn uuid_token_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[0-9A-Za-z]+(?:-[0-9A-Za-z]+){4}$").expect("uuid token pattern")
    })
}

impl Literal {
    /// Integer literal from a native value.
    pub fn integer(value: i64) -> Self {
        Literal::Integer(value.to_string())
    }

    /// Text literal.
    pub fn text(value: impl Into<String>) -> Self {
        Literal::Text(value.into())
    }

    /// Bare uuid token.
    pub fn uuid(token: impl Into<String>) -> Self {
        Literal::Uuid(token.into())
    }

    /// Classify a raw token the way the lexer would.
    ///
    /// Single-quoted tokens become `Text` with `''` unescaped; everything
    /// else is matched by shape, falling back to `Identifier`.
    pub fn classify(token: &str) -> Literal {
        let token = token.trim();

        if token.len() >= 2 && token.starts_with('\'') && token.ends_with('\'') {
            return Literal::Text(token[1..token.len() - 1].replace("''", "'"));
        }
        if token.eq_ignore_ascii_case("null") {
            return Literal::Null;
        }
        if token.eq_ignore_ascii_case("true") {
            return Literal::Bool(true);
        }
        if token.eq_ignore_ascii_case("false") {
            return Literal::Bool(false);
        }
        if hex_shape().is_match(token) {
            return Literal::Hex(token.to_string());
        }
        if integer_shape().is_match(token) {
            return Literal::Integer(token.to_string());
        }
        if decimal_shape().is_match(token) {
            return Literal::Decimal(token.to_string());
        }
        if uuid_token_shape().is_match(token) {
            return Literal::Uuid(token.to_string());
        }
        Literal::Identifier(token.to_string())
    }

    /// Returns true if this is the `null` literal.
    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }

    /// Short description used in type mismatch errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Literal::Null => "null",
            Literal::Bool(_) => "boolean literal",
            Literal::Integer(_) => "integer literal",
            Literal::Decimal(_) => "decimal literal",
            Literal::Text(_) => "string literal",
            Literal::Uuid(_) => "uuid literal",
            Literal::Hex(_) => "hex literal",
            Literal::Identifier(_) => "identifier",
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => write!(f, "null"),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Literal::Integer(s)
            | Literal::Decimal(s)
            | Literal::Uuid(s)
            | Literal::Hex(s)
            | Literal::Identifier(s) => write!(f, "{}", s),
        }
    }
}

/// A value bound to a statement parameter, already typed by the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    Null,
    Bool(bool),
    Int(i32),
    BigInt(i64),
    Double(f64),
    Text(String),
    /// Epoch milliseconds.
    Timestamp(i64),
    Inet(IpAddr),
    Uuid(Uuid),
    Blob(Vec<u8>),
}

impl BoundValue {
    /// Returns true if this is a bound null.
    pub fn is_null(&self) -> bool {
        matches!(self, BoundValue::Null)
    }

    /// Short description used in type mismatch errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            BoundValue::Null => "bound null",
            BoundValue::Bool(_) => "bound boolean",
            BoundValue::Int(_) => "bound int",
            BoundValue::BigInt(_) => "bound bigint",
            BoundValue::Double(_) => "bound double",
            BoundValue::Text(_) => "bound text",
            BoundValue::Timestamp(_) => "bound timestamp",
            BoundValue::Inet(_) => "bound inet",
            BoundValue::Uuid(_) => "bound uuid",
            BoundValue::Blob(_) => "bound blob",
        }
    }
}

/// Either form of input for one column or clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Literal(Literal),
    Bound(BoundValue),
}

impl Term {
    /// Returns true for a literal or bound null.
    pub fn is_null(&self) -> bool {
        match self {
            Term::Literal(l) => l.is_null(),
            Term::Bound(b) => b.is_null(),
        }
    }

    /// Short description used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Term::Literal(l) => l.kind_name(),
            Term::Bound(b) => b.kind_name(),
        }
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Term::Literal(literal)
    }
}

impl From<BoundValue> for Term {
    fn from(value: BoundValue) -> Self {
        Term::Bound(value)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Literal(l) => write!(f, "{}", l),
            Term::Bound(b) => write!(f, "{:?}", b),
        }
    }
}
