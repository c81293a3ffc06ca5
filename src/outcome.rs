//! Execution outcomes.

use serde::{Deserialize, Serialize};

use crate::types::Rows;

/// Status of a single execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// The statement executed successfully.
    Success,
    /// The target database could not be opened.
    AccessFailed,
    /// Any other failure: malformed statement, engine internal failure,
    /// transaction-state violation.
    Error,
}

/// The full result of one `execute` call.
///
/// Constructed fresh per call and returned by value; the result set, when
/// present, is owned by this outcome and moves with it.
///
/// `rows_affected` and `last_insert_id` are connection-level counters
/// queried from the engine after execution. They reflect the connection's
/// most recent activity, not necessarily only this statement's effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    /// Execution status.
    pub status: Status,
    /// Human-readable description; on failure this carries the engine's
    /// own error text.
    pub message: String,
    /// Result rows, present only on success.
    pub rows: Option<Rows>,
    /// Rows modified by the most recent statement on the connection.
    pub rows_affected: u64,
    /// Rowid of the most recent successful insert on the connection.
    pub last_insert_id: i64,
}

impl Outcome {
    /// A successful outcome carrying no result set (lifecycle operations,
    /// no-op transaction teardown).
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
            rows: None,
            rows_affected: 0,
            last_insert_id: 0,
        }
    }

    /// A failed outcome with the given status; carries no result set.
    pub fn failure(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            rows: None,
            rows_affected: 0,
            last_insert_id: 0,
        }
    }

    /// A failed outcome with the catch-all [`Status::Error`] status.
    pub fn error(message: impl Into<String>) -> Self {
        Self::failure(Status::Error, message)
    }

    /// Returns true if the status is [`Status::Success`].
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}
