//! Schema introspection over the engine session.
//!
//! Issues engine-dialect SQL through the same session the executor uses.
//! The dialect targets the shipped embedded engine and lives only in this
//! module, so a different engine adapter means changing exactly one place.

use std::sync::Arc;

use serde::Serialize;

use crate::engine::{NativeResult, Value};
use crate::error::Result;
use crate::session::SessionManager;

/// One column of a user table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableColumn {
    pub name: String,
    pub data_type: String,
}

/// One row of the flattened workspace schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaRow {
    pub table_name: String,
    pub column_name: String,
    pub data_type: String,
}

/// Read-only schema access for the schema viewer and import collaborators.
pub struct SchemaInspector {
    sessions: Arc<SessionManager>,
}

impl SchemaInspector {
    /// Creates an inspector over the given session manager.
    pub fn new(sessions: Arc<SessionManager>) -> Self {
        Self { sessions }
    }

    /// Names of all user tables, sorted.
    pub async fn tables(&self) -> Result<Vec<String>> {
        let session = self.sessions.ensure_session().await?;
        let result = session
            .run(
                "SELECT name FROM sqlite_master \
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
            )
            .await?;

        Ok(result
            .rows()
            .iter()
            .filter_map(|row| match row.get("name") {
                Some(Value::String(name)) => Some(name.clone()),
                _ => None,
            })
            .collect())
    }

    /// Columns of one table, in declaration order.
    pub async fn table_columns(&self, table: &str) -> Result<Vec<TableColumn>> {
        let session = self.sessions.ensure_session().await?;
        let result = session
            .run(&format!("PRAGMA table_info({})", quote_ident(table)))
            .await?;

        Ok(result
            .rows()
            .iter()
            .filter_map(|row| {
                let name = match row.get("name") {
                    Some(Value::String(name)) => name.clone(),
                    _ => return None,
                };
                let data_type = match row.get("type") {
                    Some(Value::String(data_type)) => data_type.clone(),
                    _ => String::new(),
                };
                Some(TableColumn { name, data_type })
            })
            .collect())
    }

    /// The whole workspace schema, flattened to (table, column, type) rows.
    pub async fn schema(&self) -> Result<Vec<SchemaRow>> {
        let mut rows = Vec::new();
        for table in self.tables().await? {
            for column in self.table_columns(&table).await? {
                rows.push(SchemaRow {
                    table_name: table.clone(),
                    column_name: column.name,
                    data_type: column.data_type,
                });
            }
        }
        Ok(rows)
    }

    /// True if a user table with the given name exists.
    pub async fn table_exists(&self, table: &str) -> Result<bool> {
        Ok(self.tables().await?.iter().any(|t| t == table))
    }

    /// Drops every user table, returning the workspace to an empty state.
    pub async fn reset(&self) -> Result<()> {
        let session = self.sessions.ensure_session().await?;
        for table in self.tables().await? {
            session
                .run(&format!("DROP TABLE IF EXISTS {}", quote_ident(&table)))
                .await?;
        }
        Ok(())
    }

    /// Runs `EXPLAIN` for the given statement and returns the native plan rows.
    pub async fn explain(&self, sql: &str) -> Result<NativeResult> {
        let session = self.sessions.ensure_session().await?;
        session.run(&format!("EXPLAIN {sql}")).await
    }
}

/// Quotes an identifier for interpolation into engine SQL.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
