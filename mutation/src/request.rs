//! Inbound mutation requests.

use tern_codec::Term;
use tern_core::Generation;

/// A parsed INSERT.
///
/// ```ignore
/// let req = InsertRequest::new("test_insert")
///     .value("h1", Literal::integer(1))
///     .value("h2", Literal::text("h2"))
///     .value("v1", Literal::integer(1))
///     .ttl(Literal::integer(2));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InsertRequest {
    pub table: String,
    /// Column assignments in request order.
    pub values: Vec<(String, Term)>,
    /// `USING TTL` term.
    pub ttl: Option<Term>,
    /// `USING TIMESTAMP` term, in microseconds.
    pub timestamp: Option<Term>,
    /// Generation this request was prepared against.
    pub pinned: Option<Generation>,
}

impl InsertRequest {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            values: Vec::new(),
            ttl: None,
            timestamp: None,
            pinned: None,
        }
    }

    /// Assign a column.
    pub fn value(mut self, column: impl Into<String>, term: impl Into<Term>) -> Self {
        self.values.push((column.into(), term.into()));
        self
    }

    pub fn ttl(mut self, term: impl Into<Term>) -> Self {
        self.ttl = Some(term.into());
        self
    }

    pub fn timestamp(mut self, term: impl Into<Term>) -> Self {
        self.timestamp = Some(term.into());
        self
    }

    /// Fail unless the table is still at `generation`.
    pub fn pinned(mut self, generation: Generation) -> Self {
        self.pinned = Some(generation);
        self
    }
}

/// A parsed DELETE addressing one row by its full primary key.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteRequest {
    pub table: String,
    /// Primary-key equalities in request order.
    pub key: Vec<(String, Term)>,
    /// Columns to delete; empty deletes the whole row.
    pub columns: Vec<String>,
    /// `USING TIMESTAMP` term, in microseconds.
    pub timestamp: Option<Term>,
    pub pinned: Option<Generation>,
}

impl DeleteRequest {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            key: Vec::new(),
            columns: Vec::new(),
            timestamp: None,
            pinned: None,
        }
    }

    /// Add a `column = term` key condition.
    pub fn key(mut self, column: impl Into<String>, term: impl Into<Term>) -> Self {
        self.key.push((column.into(), term.into()));
        self
    }

    /// Restrict the delete to one column.
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.columns.push(column.into());
        self
    }

    pub fn timestamp(mut self, term: impl Into<Term>) -> Self {
        self.timestamp = Some(term.into());
        self
    }

    pub fn pinned(mut self, generation: Generation) -> Self {
        self.pinned = Some(generation);
        self
    }
}
