//! Minimal SQLite access layer with scoped transactions and typed rows.
//!
//! # Intention
//!
//! - Provide one connection abstraction over a single open SQLite handle.
//! - Materialize query results row-by-row into an owned, iterable result
//!   set with on-demand typed cell decoding.
//! - Guard units of work with a transaction that begins on construction,
//!   commits on scope exit and rolls back on the first failed statement.
//!
//! # Architectural Boundaries
//!
//! - The SQL engine itself is an external collaborator behind the
//!   [`Engine`] trait; only the narrow open/execute/close contract lives
//!   here. No SQL parsing, planning or storage.
//! - Single-connection, synchronous, in-process use. No pooling, no async
//!   driver, no ORM.
//!
//! # Example
//!
//! ```ignore
//! use sqlite_access::Connection;
//!
//! let conn = Connection::open("data.db")?;
//! conn.execute("CREATE TABLE t(id INTEGER PRIMARY KEY, name TEXT);");
//!
//! let mut tx = conn.transaction()?;
//! tx.execute("INSERT INTO t(name) VALUES ('a');");
//! drop(tx); // commits
//!
//! let outcome = conn.execute("SELECT id, name FROM t;");
//! for row in outcome.rows.unwrap() {
//!     let id = row.get("id")?.as_u64()?;
//!     let name = row.get("name")?.as_text()?;
//!     println!("{id}: {name}");
//! }
//! ```

mod config;
mod connection;
mod engine;
mod error;
mod outcome;
mod sqlite;
mod transaction;
mod types;

pub use config::SqliteConfig;
pub use connection::Connection;
pub use engine::{Engine, RowVisitor};
pub use error::{CellError, EngineError};
pub use outcome::{Outcome, Status};
pub use sqlite::SqliteEngine;
pub use transaction::{Transaction, TransactionState};
pub use types::{CellValue, Row, Rows};
