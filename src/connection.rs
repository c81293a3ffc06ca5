//! Connection over a single engine handle.

use crate::config::SqliteConfig;
use crate::engine::Engine;
use crate::error::EngineError;
use crate::outcome::{Outcome, Status};
use crate::sqlite::SqliteEngine;
use crate::transaction::Transaction;
use crate::types::{Row, Rows};

/// A connection owning exactly one open engine handle.
///
/// The handle is opened at construction and closed at drop (or by an
/// explicit [`Connection::close`]). There is no sharing and no pooling:
/// one connection per handle, used from one thread at a time.
///
/// # Example
///
/// ```ignore
/// use sqlite_access::Connection;
///
/// let conn = Connection::open("data.db")?;
/// let outcome = conn.execute("SELECT id, name FROM users;");
/// for row in outcome.rows.unwrap() {
///     println!("{}", row.get("name")?.as_text()?);
/// }
/// ```
pub struct Connection<E: Engine = SqliteEngine> {
    engine: E,
}

impl Connection<SqliteEngine> {
    /// Opens a connection to a file-backed database in read/write mode.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AccessFailed`] when the target cannot be
    /// opened, or [`EngineError::Execution`] for other engine failures.
    /// On failure no connection comes into existence.
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, EngineError> {
        Ok(Self {
            engine: SqliteEngine::open(path)?,
        })
    }

    /// Opens a connection to a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self, EngineError> {
        Ok(Self {
            engine: SqliteEngine::open_in_memory()?,
        })
    }

    /// Opens a connection from a [`SqliteConfig`], running the configured
    /// schema statements before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or any schema
    /// statement fails; no connection escapes in that case.
    pub fn open_with_config(config: &SqliteConfig) -> Result<Self, EngineError> {
        let conn = match config.db_path() {
            Some(path) => Self::open(path)?,
            None => Self::open_in_memory()?,
        };
        for statement in config.schema() {
            let outcome = conn.execute(statement);
            if !outcome.is_success() {
                return Err(EngineError::Execution {
                    message: outcome.message,
                });
            }
        }
        Ok(conn)
    }
}

impl<E: Engine> Connection<E> {
    /// Wraps a caller-supplied engine.
    ///
    /// Use this to substitute alternative engines behind the same
    /// connection surface.
    pub fn from_engine(engine: E) -> Self {
        Self { engine }
    }

    /// The underlying engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Sends one SQL statement to the engine.
    ///
    /// Each row the engine produces is materialized into a [`Row`] (one
    /// visitor invocation per row, columns in engine order) and appended
    /// to the outcome's result set. After execution the outcome captures
    /// the engine's connection-level `rows_affected` and `last_insert_id`
    /// counters.
    ///
    /// Engine failures are recovered locally: the returned outcome carries
    /// [`Status::Error`] (or [`Status::AccessFailed`]) with the engine's
    /// own failure text and no result set. This method never panics on an
    /// engine failure.
    pub fn execute(&self, statement: &str) -> Outcome {
        let mut rows = Rows::new();
        let result = self.engine.execute(statement, &mut |columns, values| {
            let mut row = Row::new();
            for (column, value) in columns.iter().zip(values) {
                row.push(column.clone(), value.clone());
            }
            rows.push(row);
        });

        match result {
            Ok(()) => Outcome {
                status: Status::Success,
                message: format!("executed SQL statement [{statement}]"),
                rows: Some(rows),
                rows_affected: self.engine.rows_affected(),
                last_insert_id: self.engine.last_insert_id(),
            },
            Err(error) => Outcome::failure(error.status(), error.to_string()),
        }
    }

    /// Begins a transaction bound to this connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the BEGIN statement fails; no guard is created
    /// in that case.
    pub fn transaction(&self) -> Result<Transaction<'_, E>, EngineError> {
        Transaction::begin(self)
    }

    /// Closes the engine handle.
    ///
    /// Invoked automatically at drop; callable early. Closing an
    /// already-closed connection is a successful no-op.
    pub fn close(&mut self) -> Outcome {
        match self.engine.close() {
            Ok(()) => Outcome::success("closed database connection"),
            Err(error) => Outcome::failure(error.status(), error.to_string()),
        }
    }
}

impl<E: Engine> std::fmt::Debug for Connection<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection").finish_non_exhaustive()
    }
}

impl<E: Engine> Drop for Connection<E> {
    fn drop(&mut self) {
        // Teardown must not panic; a close failure is only reported.
        if let Err(error) = self.engine.close() {
            tracing::warn!(%error, "failed to close database connection");
        }
    }
}
