//! Engine trait for the access layer.
//!
//! Defines the narrow contract a SQL engine must implement, enabling
//! substitute engines (in-memory fakes for tests, alternative bindings)
//! behind the same [`crate::Connection`] surface.

use crate::error::EngineError;
use crate::types::CellValue;

/// Per-row visitor invoked while a statement streams its result rows.
///
/// Called once per result row with parallel column-name and value slices,
/// in the order the engine produced them. Values are textual (or NULL) at
/// this layer; typed decoding is deferred to the point of use.
pub type RowVisitor<'a> = dyn FnMut(&[String], &[CellValue]) + 'a;

/// Contract between the access layer and an underlying SQL engine.
///
/// Implementations are synchronous and single-threaded: `execute` blocks
/// the calling thread until the statement completes and every row visit
/// has run. The handle must not be touched from two threads at once; no
/// internal locking is provided.
pub trait Engine {
    /// Runs one SQL statement, invoking `on_row` once per result row.
    ///
    /// Statements that produce no rows (DDL, DML) run through the same
    /// path with zero visitor invocations.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement cannot be prepared or executed,
    /// or if the handle is already closed. The engine's own failure text
    /// is preserved in the error.
    fn execute(&self, statement: &str, on_row: &mut RowVisitor<'_>) -> Result<(), EngineError>;

    /// Rows modified by the most recent statement on this handle.
    ///
    /// Connection-scoped, not statement-scoped.
    fn rows_affected(&self) -> u64;

    /// Rowid of the most recent successful insert on this handle.
    ///
    /// Connection-scoped, not statement-scoped.
    fn last_insert_id(&self) -> i64;

    /// Closes the handle. Idempotent: closing an already-closed handle
    /// succeeds without touching the engine.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine reports a failure while closing.
    fn close(&mut self) -> Result<(), EngineError>;
}
