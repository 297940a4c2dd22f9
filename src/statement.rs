//! SQL statement classification.
//!
//! Lexical sniffing of the leading keyword only. The classifier is pure and
//! total: it never parses SQL structurally and never fails, and it is allowed
//! to misclassify malformed or ambiguous input. Callers that need a hard
//! guarantee get it from the engine, not from here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The syntactic category of a SQL statement, derived from its leading keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Create,
    Drop,
    Alter,
    Truncate,
    Begin,
    Commit,
    Rollback,
    Set,
    Pragma,
    Explain,
    Describe,
    Show,
    Copy,
    Export,
    Import,
    Unknown,
    Error,
}

impl StatementKind {
    /// Returns the canonical uppercase tag used in the public response shape.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Create => "CREATE",
            Self::Drop => "DROP",
            Self::Alter => "ALTER",
            Self::Truncate => "TRUNCATE",
            Self::Begin => "BEGIN",
            Self::Commit => "COMMIT",
            Self::Rollback => "ROLLBACK",
            Self::Set => "SET",
            Self::Pragma => "PRAGMA",
            Self::Explain => "EXPLAIN",
            Self::Describe => "DESCRIBE",
            Self::Show => "SHOW",
            Self::Copy => "COPY",
            Self::Export => "EXPORT",
            Self::Import => "IMPORT",
            Self::Unknown => "UNKNOWN",
            Self::Error => "ERROR",
        }
    }

    /// True for statements whose engine result is the answer: a table of rows.
    ///
    /// The arms are deliberately exhaustive so a new kind forces every
    /// consumer branch to be revisited.
    pub fn is_row_returning(&self) -> bool {
        match self {
            Self::Select | Self::Show | Self::Describe | Self::Explain | Self::Pragma => true,
            Self::Insert
            | Self::Update
            | Self::Delete
            | Self::Create
            | Self::Drop
            | Self::Alter
            | Self::Truncate
            | Self::Begin
            | Self::Commit
            | Self::Rollback
            | Self::Set
            | Self::Copy
            | Self::Export
            | Self::Import
            | Self::Unknown
            | Self::Error => false,
        }
    }

    /// True for data-modifying statements whose result carries an affected-row
    /// count rather than an answer.
    pub fn is_mutating(&self) -> bool {
        match self {
            Self::Insert | Self::Update | Self::Delete => true,
            Self::Select
            | Self::Create
            | Self::Drop
            | Self::Alter
            | Self::Truncate
            | Self::Begin
            | Self::Commit
            | Self::Rollback
            | Self::Set
            | Self::Pragma
            | Self::Explain
            | Self::Describe
            | Self::Show
            | Self::Copy
            | Self::Export
            | Self::Import
            | Self::Unknown
            | Self::Error => false,
        }
    }

    /// True for schema-changing statements. DDL is still projected as a bare
    /// statement; the predicate exists for collaborators that branch on it
    /// (e.g. a schema viewer deciding when to refresh).
    pub fn is_ddl(&self) -> bool {
        matches!(self, Self::Create | Self::Drop | Self::Alter | Self::Truncate)
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a SQL string by its leading keyword.
///
/// Trims whitespace, uppercases, and tests prefixes in a fixed priority
/// order; the first match wins and unmatched input yields
/// [`StatementKind::Unknown`]. `WITH` classifies as `Select` and `DESC` as
/// `Describe`.
pub fn classify(sql: &str) -> StatementKind {
    let s = sql.trim().to_uppercase();

    if s.starts_with("SELECT") || s.starts_with("WITH") {
        return StatementKind::Select;
    }
    if s.starts_with("INSERT") {
        return StatementKind::Insert;
    }
    if s.starts_with("UPDATE") {
        return StatementKind::Update;
    }
    if s.starts_with("DELETE") {
        return StatementKind::Delete;
    }
    if s.starts_with("CREATE") {
        return StatementKind::Create;
    }
    if s.starts_with("DROP") {
        return StatementKind::Drop;
    }
    if s.starts_with("ALTER") {
        return StatementKind::Alter;
    }
    if s.starts_with("TRUNCATE") {
        return StatementKind::Truncate;
    }
    if s.starts_with("BEGIN") {
        return StatementKind::Begin;
    }
    if s.starts_with("COMMIT") {
        return StatementKind::Commit;
    }
    if s.starts_with("ROLLBACK") {
        return StatementKind::Rollback;
    }
    if s.starts_with("SET") {
        return StatementKind::Set;
    }
    if s.starts_with("PRAGMA") {
        return StatementKind::Pragma;
    }
    if s.starts_with("EXPLAIN") {
        return StatementKind::Explain;
    }
    if s.starts_with("DESCRIBE") || s.starts_with("DESC") {
        return StatementKind::Describe;
    }
    if s.starts_with("SHOW") {
        return StatementKind::Show;
    }
    if s.starts_with("COPY") {
        return StatementKind::Copy;
    }
    if s.starts_with("EXPORT") {
        return StatementKind::Export;
    }
    if s.starts_with("IMPORT") {
        return StatementKind::Import;
    }

    StatementKind::Unknown
}
