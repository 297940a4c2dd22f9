//! Engine-facing value and result types.
//!
//! `NativeResult` models the engine's uniform native shape: an ordered field
//! schema plus rows whose cells are addressed by field name. The executor
//! projects rows into positional form itself; nothing here may assume the
//! engine reports cells in schema order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell value produced by the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    /// NULL value.
    #[default]
    Null,

    /// Boolean value.
    Bool(bool),

    /// Signed integer (up to i64).
    Int(i64),

    /// Floating point number.
    Float(f64),

    /// Text/string value.
    String(String),

    /// Binary data.
    Bytes(Vec<u8>),
}

impl Value {
    /// Returns true if this value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Best-effort interpretation as a non-negative count.
    ///
    /// Used by affected-row extraction; anything that is not a plain
    /// non-negative integer yields `None`.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Int(i) if *i >= 0 => Some(*i as u64),
            _ => None,
        }
    }

    /// Converts the value to a display string.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
            Value::Bytes(b) => format!("<{} bytes>", b.len()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

/// One column of the native result schema: name plus engine-reported type tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Column name.
    pub name: String,

    /// Engine-reported type tag (e.g. "INTEGER", "TEXT").
    pub type_name: String,
}

impl Field {
    /// Creates a new field with the given name and type tag.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// One native row: cells keyed by field name, in whatever order the engine
/// produced them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NativeRow {
    cells: Vec<(String, Value)>,
}

impl NativeRow {
    /// Builds a row from `(name, value)` pairs.
    pub fn from_pairs<N, I>(pairs: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Value)>,
    {
        Self {
            cells: pairs.into_iter().map(|(n, v)| (n.into(), v)).collect(),
        }
    }

    /// Looks up a cell by field name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.cells
            .iter()
            .find(|(cell_name, _)| cell_name == name)
            .map(|(_, value)| value)
    }

    /// Returns the cells in engine-produced order.
    pub fn cells(&self) -> &[(String, Value)] {
        &self.cells
    }
}

/// The engine's native result: a cursor-like table of rows with a field
/// schema, regardless of statement kind. What the shape *means* is decided
/// downstream by the executor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NativeResult {
    fields: Vec<Field>,
    rows: Vec<NativeRow>,
}

impl NativeResult {
    /// Creates a result with the given schema and rows.
    pub fn new(fields: Vec<Field>, rows: Vec<NativeRow>) -> Self {
        Self { fields, rows }
    }

    /// Creates an empty result with no schema.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Ordered `(name, type)` schema of the result.
    pub fn schema_fields(&self) -> &[Field] {
        &self.fields
    }

    /// Rows of the result.
    pub fn rows(&self) -> &[NativeRow] {
        &self.rows
    }

    /// Number of rows in the result.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }
}
