//! SQLite engine binding over `rusqlite`.

use rusqlite::types::ValueRef;
use rusqlite::OpenFlags;

use crate::engine::{Engine, RowVisitor};
use crate::error::EngineError;
use crate::types::CellValue;

/// [`Engine`] implementation backed by a bundled SQLite library.
///
/// Owns exactly one open SQLite handle for its lifetime. The handle is
/// opened without cross-thread mutex overhead, so it must stay on one
/// thread at a time; that is the caller's responsibility.
#[derive(Debug)]
pub struct SqliteEngine {
    conn: Option<rusqlite::Connection>,
}

impl SqliteEngine {
    /// Opens a file-backed database in read/write mode.
    ///
    /// The target must already exist; this never creates a database file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AccessFailed`] when the target cannot be
    /// opened (missing file, permissions, lock contention) and
    /// [`EngineError::Execution`] for other engine-reported failures.
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        match rusqlite::Connection::open_with_flags(path, flags) {
            Ok(conn) => {
                tracing::debug!(path = %path.display(), "opened database");
                Ok(Self { conn: Some(conn) })
            }
            Err(error) => Err(open_error(error)),
        }
    }

    /// Opens a private in-memory database.
    ///
    /// All data is lost when the engine is dropped. Intended for tests,
    /// development and embedded use.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self, EngineError> {
        match rusqlite::Connection::open_in_memory() {
            Ok(conn) => {
                tracing::debug!("opened in-memory database");
                Ok(Self { conn: Some(conn) })
            }
            Err(error) => Err(open_error(error)),
        }
    }

    fn handle(&self) -> Result<&rusqlite::Connection, EngineError> {
        self.conn.as_ref().ok_or(EngineError::Closed)
    }
}

impl Engine for SqliteEngine {
    fn execute(&self, statement: &str, on_row: &mut RowVisitor<'_>) -> Result<(), EngineError> {
        let conn = self.handle()?;
        let mut stmt = conn.prepare(statement)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();

        let mut result_rows = stmt.query([])?;
        let mut values = Vec::with_capacity(columns.len());
        while let Some(row) = result_rows.next()? {
            values.clear();
            for idx in 0..columns.len() {
                values.push(cell_from_ref(row.get_ref(idx)?));
            }
            on_row(&columns, &values);
        }
        Ok(())
    }

    fn rows_affected(&self) -> u64 {
        self.conn.as_ref().map_or(0, |conn| conn.changes())
    }

    fn last_insert_id(&self) -> i64 {
        self.conn.as_ref().map_or(0, |conn| conn.last_insert_rowid())
    }

    fn close(&mut self) -> Result<(), EngineError> {
        match self.conn.take() {
            Some(conn) => match conn.close() {
                Ok(()) => {
                    tracing::debug!("closed database");
                    Ok(())
                }
                // The handle is dropped either way; only the failure text survives.
                Err((_conn, error)) => Err(EngineError::Execution {
                    message: error.to_string(),
                }),
            },
            None => Ok(()),
        }
    }
}

/// Converts one column of the current result row to its textual cell form.
///
/// SQL NULL stays explicit; integers and reals render as decimal text;
/// blobs pass through as lossy UTF-8.
fn cell_from_ref(value: ValueRef<'_>) -> CellValue {
    match value {
        ValueRef::Null => CellValue::Null,
        ValueRef::Integer(n) => CellValue::Text(n.to_string()),
        ValueRef::Real(n) => CellValue::Text(n.to_string()),
        ValueRef::Text(t) => CellValue::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => CellValue::Text(String::from_utf8_lossy(b).into_owned()),
    }
}

fn open_error(error: rusqlite::Error) -> EngineError {
    match &error {
        rusqlite::Error::SqliteFailure(cause, _)
            if cause.code == rusqlite::ErrorCode::CannotOpen =>
        {
            EngineError::AccessFailed {
                message: error.to_string(),
            }
        }
        _ => EngineError::Execution {
            message: error.to_string(),
        },
    }
}

impl From<rusqlite::Error> for EngineError {
    fn from(error: rusqlite::Error) -> Self {
        EngineError::Execution {
            message: error.to_string(),
        }
    }
}
