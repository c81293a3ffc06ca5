//! Connection configuration.

use std::path::{Path, PathBuf};

/// Configuration for opening a SQLite-backed connection.
///
/// Names the target database and, optionally, DDL statements to run once
/// at open time so the schema is in place before the first caller
/// statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqliteConfig {
    db_path: Option<PathBuf>,
    schema: Vec<String>,
}

impl SqliteConfig {
    /// Configuration for a file-backed database at `db_path`.
    pub fn file(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Some(db_path.into()),
            schema: Vec::new(),
        }
    }

    /// Configuration for a private in-memory database.
    pub fn memory() -> Self {
        Self::default()
    }

    /// Appends one DDL statement to run at open time.
    pub fn with_schema_statement(mut self, statement: impl Into<String>) -> Self {
        self.schema.push(statement.into());
        self
    }

    /// Target path, or `None` for an in-memory database.
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Schema statements in the order they will run.
    pub fn schema(&self) -> &[String] {
        &self.schema
    }
}
