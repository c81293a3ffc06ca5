//! Error types for the access layer.
//!
//! Two failure surfaces exist: engine-level failures (opening, executing,
//! closing) and cell-level failures (typed retrieval from a row). Both are
//! structured errors so callers can match on them instead of scraping
//! message strings.

use crate::outcome::Status;

/// Engine-level failures.
///
/// The engine's own failure text is carried verbatim in the `message`
/// fields so it is never lost on the way to an [`crate::Outcome`].
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The target database cannot be opened (missing file, permissions,
    /// lock contention).
    #[error("{message}")]
    AccessFailed { message: String },

    /// Any other engine-reported failure: malformed statement, constraint
    /// violation, internal engine error.
    #[error("{message}")]
    Execution { message: String },

    /// The engine handle was already closed.
    #[error("database connection is already closed")]
    Closed,
}

impl EngineError {
    /// Maps this error onto the outcome status taxonomy.
    pub fn status(&self) -> Status {
        match self {
            EngineError::AccessFailed { .. } => Status::AccessFailed,
            EngineError::Execution { .. } | EngineError::Closed => Status::Error,
        }
    }
}

/// Typed-retrieval failures on a [`crate::Row`] or [`crate::CellValue`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CellError {
    /// The requested column name is not present in the row.
    #[error("column [{column}] not present in row")]
    MissingColumn { column: String },

    /// The cell holds SQL NULL and cannot be read as the requested type.
    #[error("cannot read NULL cell as {target}")]
    Null { target: &'static str },

    /// The stored text cannot be parsed as the requested type.
    #[error("cannot read cell [{value}] as {target}: {source}")]
    Parse {
        target: &'static str,
        value: String,
        source: std::num::ParseIntError,
    },
}
