//! Scoped transaction guard.

use crate::connection::Connection;
use crate::engine::Engine;
use crate::error::EngineError;
use crate::outcome::Outcome;
use crate::sqlite::SqliteEngine;

const BEGIN: &str = "BEGIN TRANSACTION;";
const COMMIT: &str = "COMMIT TRANSACTION;";
const ROLLBACK: &str = "ROLLBACK TRANSACTION;";

/// Lifecycle state of a [`Transaction`].
///
/// Terminal states are distinguished so callers can tell a committed
/// transaction from one aborted by a failed statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    /// BEGIN has been issued; statements may be executed.
    Active,
    /// COMMIT was issued; the transaction is finished.
    Committed,
    /// ROLLBACK was issued; the transaction is finished.
    RolledBack,
}

/// A scoped unit of work bound to one [`Connection`].
///
/// Issues BEGIN on construction and COMMIT on scope exit, on every exit
/// path, unless a failure already rolled it back. Any statement returning
/// a non-success outcome rolls the transaction back immediately; further
/// statements through the guard are refused without contacting the
/// connection.
///
/// Transactions are strictly sequential and scoped to one call stack.
/// Nesting is not supported: the guard only borrows the connection, so
/// issuing a second BEGIN on the same connection is caller error.
///
/// # Example
///
/// ```ignore
/// let tx = conn.transaction()?;
/// tx.execute("INSERT INTO t(name) VALUES ('a');");
/// tx.execute("INSERT INTO t(name) VALUES ('b');");
/// // commits here unless a statement failed
/// ```
pub struct Transaction<'conn, E: Engine = SqliteEngine> {
    connection: &'conn Connection<E>,
    state: TransactionState,
}

impl<'conn, E: Engine> Transaction<'conn, E> {
    pub(crate) fn begin(connection: &'conn Connection<E>) -> Result<Self, EngineError> {
        let outcome = connection.execute(BEGIN);
        if !outcome.is_success() {
            return Err(EngineError::Execution {
                message: outcome.message,
            });
        }
        tracing::debug!("transaction started");
        Ok(Self {
            connection,
            state: TransactionState::Active,
        })
    }

    /// Executes one statement inside the transaction.
    ///
    /// On a non-success outcome the transaction rolls back and transitions
    /// to [`TransactionState::RolledBack`]; the failed outcome is returned
    /// as-is. Once the transaction is finished, calls return an error
    /// outcome immediately without contacting the connection.
    pub fn execute(&mut self, statement: &str) -> Outcome {
        if self.state != TransactionState::Active {
            return Outcome::error(
                "transaction has already been committed or rolled back; start a new one",
            );
        }
        let outcome = self.connection.execute(statement);
        if !outcome.is_success() {
            self.roll_back();
        }
        outcome
    }

    /// Commits the transaction early.
    ///
    /// Callable any number of times: once the transaction is finished this
    /// is a no-op success and no further COMMIT is issued. If the COMMIT
    /// statement itself fails, the transaction rolls back and the failed
    /// outcome is returned.
    pub fn commit(&mut self) -> Outcome {
        if self.state != TransactionState::Active {
            return Outcome::success("transaction already completed");
        }
        let outcome = self.connection.execute(COMMIT);
        if outcome.is_success() {
            self.state = TransactionState::Committed;
        } else {
            self.roll_back();
        }
        outcome
    }

    /// Rolls the transaction back early, discarding its statements.
    ///
    /// A no-op success once the transaction is finished.
    pub fn rollback(&mut self) -> Outcome {
        if self.state != TransactionState::Active {
            return Outcome::success("transaction already completed");
        }
        self.roll_back()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TransactionState {
        self.state
    }

    /// Returns true while statements may still be executed.
    pub fn is_active(&self) -> bool {
        self.state == TransactionState::Active
    }

    /// Returns true once the transaction committed.
    pub fn is_committed(&self) -> bool {
        self.state == TransactionState::Committed
    }

    /// Returns true once the transaction rolled back.
    pub fn is_rolled_back(&self) -> bool {
        self.state == TransactionState::RolledBack
    }

    fn roll_back(&mut self) -> Outcome {
        let outcome = self.connection.execute(ROLLBACK);
        if !outcome.is_success() {
            tracing::warn!(error = %outcome.message, "rollback statement failed");
        }
        self.state = TransactionState::RolledBack;
        outcome
    }
}

impl<E: Engine> std::fmt::Debug for Transaction<'_, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transaction")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<E: Engine> Drop for Transaction<'_, E> {
    fn drop(&mut self) {
        // Commit exactly once on scope exit; never re-issue once finished,
        // never panic out of teardown.
        if self.state == TransactionState::Active {
            let outcome = self.commit();
            if !outcome.is_success() {
                tracing::warn!(error = %outcome.message, "commit on scope exit failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::outcome::Status;

    /// Engine double that records every statement and can be told to fail.
    struct RecordingEngine {
        statements: RefCell<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    impl RecordingEngine {
        fn new() -> Self {
            Self {
                statements: RefCell::new(Vec::new()),
                fail_on: None,
            }
        }

        fn failing_on(pattern: &'static str) -> Self {
            Self {
                statements: RefCell::new(Vec::new()),
                fail_on: Some(pattern),
            }
        }
    }

    impl Engine for RecordingEngine {
        fn execute(
            &self,
            statement: &str,
            _on_row: &mut crate::engine::RowVisitor<'_>,
        ) -> Result<(), EngineError> {
            self.statements.borrow_mut().push(statement.to_string());
            match self.fail_on {
                Some(pattern) if statement.contains(pattern) => Err(EngineError::Execution {
                    message: format!("forced failure on [{statement}]"),
                }),
                _ => Ok(()),
            }
        }

        fn rows_affected(&self) -> u64 {
            0
        }

        fn last_insert_id(&self) -> i64 {
            0
        }

        fn close(&mut self) -> Result<(), EngineError> {
            Ok(())
        }
    }

    fn statements(conn: &Connection<RecordingEngine>) -> Vec<String> {
        conn.engine().statements.borrow().clone()
    }

    #[test]
    fn scope_exit_commits_exactly_once() {
        let conn = Connection::from_engine(RecordingEngine::new());
        {
            let mut tx = conn.transaction().unwrap();
            tx.execute("INSERT INTO t(name) VALUES ('a');");
        }
        assert_eq!(
            statements(&conn),
            [BEGIN, "INSERT INTO t(name) VALUES ('a');", COMMIT]
        );
    }

    #[test]
    fn commit_is_idempotent() {
        let conn = Connection::from_engine(RecordingEngine::new());
        let mut tx = conn.transaction().unwrap();
        assert!(tx.commit().is_success());
        assert!(tx.is_committed());
        assert!(tx.commit().is_success());
        drop(tx);
        // One BEGIN, one COMMIT, nothing else.
        assert_eq!(statements(&conn), [BEGIN, COMMIT]);
    }

    #[test]
    fn failed_statement_rolls_back() {
        let conn = Connection::from_engine(RecordingEngine::failing_on("t_nonexistent"));
        let mut tx = conn.transaction().unwrap();
        let outcome = tx.execute("INSERT INTO t_nonexistent(x) VALUES (1);");
        assert_eq!(outcome.status, Status::Error);
        assert!(tx.is_rolled_back());
        drop(tx);
        assert_eq!(
            statements(&conn),
            [BEGIN, "INSERT INTO t_nonexistent(x) VALUES (1);", ROLLBACK]
        );
    }

    #[test]
    fn finished_transaction_refuses_statements_without_engine_contact() {
        let conn = Connection::from_engine(RecordingEngine::failing_on("boom"));
        let mut tx = conn.transaction().unwrap();
        tx.execute("boom;");
        let before = statements(&conn).len();

        let outcome = tx.execute("SELECT 1;");
        assert_eq!(outcome.status, Status::Error);
        assert!(outcome.message.contains("already been committed or rolled back"));
        assert_eq!(statements(&conn).len(), before);
    }

    #[test]
    fn explicit_rollback_discards_and_is_idempotent() {
        let conn = Connection::from_engine(RecordingEngine::new());
        let mut tx = conn.transaction().unwrap();
        tx.execute("INSERT INTO t(name) VALUES ('a');");
        assert!(tx.rollback().is_success());
        assert!(tx.is_rolled_back());
        assert!(tx.rollback().is_success());
        drop(tx);
        assert_eq!(
            statements(&conn),
            [BEGIN, "INSERT INTO t(name) VALUES ('a');", ROLLBACK]
        );
    }

    #[test]
    fn failed_begin_creates_no_guard() {
        let conn = Connection::from_engine(RecordingEngine::failing_on("BEGIN"));
        assert!(conn.transaction().is_err());
        assert_eq!(statements(&conn), [BEGIN]);
    }

    #[test]
    fn failed_commit_rolls_back() {
        let conn = Connection::from_engine(RecordingEngine::failing_on("COMMIT"));
        let mut tx = conn.transaction().unwrap();
        let outcome = tx.commit();
        assert_eq!(outcome.status, Status::Error);
        assert!(tx.is_rolled_back());
        drop(tx);
        assert_eq!(statements(&conn), [BEGIN, COMMIT, ROLLBACK]);
    }
}
