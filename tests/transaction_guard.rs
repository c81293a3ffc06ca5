use anyhow::Result;
use sqlite_access::{Connection, Status, TransactionState};

fn open_with_table() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    let outcome = conn.execute("CREATE TABLE t(id INTEGER PRIMARY KEY, name TEXT);");
    assert!(outcome.is_success(), "{}", outcome.message);
    Ok(conn)
}

fn names(conn: &Connection) -> Vec<String> {
    conn.execute("SELECT name FROM t ORDER BY id;")
        .rows
        .unwrap()
        .iter()
        .map(|row| row.get("name").unwrap().as_text().unwrap().to_string())
        .collect()
}

#[test]
fn scope_exit_commits_writes() -> Result<()> {
    let conn = open_with_table()?;
    {
        let mut tx = conn.transaction()?;
        assert!(tx.is_active());
        let outcome = tx.execute("INSERT INTO t(name) VALUES ('a');");
        assert!(outcome.is_success());
    }
    assert_eq!(names(&conn), ["a"]);
    Ok(())
}

#[test]
fn early_commit_persists_and_is_idempotent() -> Result<()> {
    let conn = open_with_table()?;
    let mut tx = conn.transaction()?;
    tx.execute("INSERT INTO t(name) VALUES ('a');");
    assert!(tx.commit().is_success());
    assert_eq!(tx.state(), TransactionState::Committed);
    assert!(tx.commit().is_success());
    drop(tx);

    // Visible after commit, and usable outside any transaction.
    assert_eq!(names(&conn), ["a"]);
    Ok(())
}

#[test]
fn failed_statement_rolls_back_earlier_writes() -> Result<()> {
    let conn = open_with_table()?;
    {
        let mut tx = conn.transaction()?;
        let outcome = tx.execute("INSERT INTO t(name) VALUES ('b');");
        assert!(outcome.is_success());

        let outcome = tx.execute("INSERT INTO t_nonexistent(x) VALUES (1);");
        assert_eq!(outcome.status, Status::Error);
        assert!(tx.is_rolled_back());
    }
    // The earlier insert of 'b' was rolled back.
    assert!(names(&conn).is_empty());
    Ok(())
}

#[test]
fn finished_transaction_refuses_further_statements() -> Result<()> {
    let conn = open_with_table()?;
    let mut tx = conn.transaction()?;
    tx.execute("INSERT INTO t_nonexistent(x) VALUES (1);");
    assert!(tx.is_rolled_back());

    let outcome = tx.execute("INSERT INTO t(name) VALUES ('c');");
    assert_eq!(outcome.status, Status::Error);
    drop(tx);
    assert!(names(&conn).is_empty());
    Ok(())
}

#[test]
fn explicit_rollback_discards_writes() -> Result<()> {
    let conn = open_with_table()?;
    let mut tx = conn.transaction()?;
    tx.execute("INSERT INTO t(name) VALUES ('a');");
    assert!(tx.rollback().is_success());
    assert_eq!(tx.state(), TransactionState::RolledBack);
    drop(tx);
    assert!(names(&conn).is_empty());
    Ok(())
}

#[test]
fn sequential_transactions_on_one_connection() -> Result<()> {
    let conn = open_with_table()?;
    {
        let mut tx = conn.transaction()?;
        tx.execute("INSERT INTO t(name) VALUES ('a');");
    }
    {
        let mut tx = conn.transaction()?;
        tx.execute("INSERT INTO t(name) VALUES ('b');");
        tx.rollback();
    }
    {
        let mut tx = conn.transaction()?;
        tx.execute("INSERT INTO t(name) VALUES ('c');");
    }
    assert_eq!(names(&conn), ["a", "c"]);
    Ok(())
}

#[test]
fn last_insert_id_visible_through_transaction() -> Result<()> {
    let conn = open_with_table()?;
    let mut tx = conn.transaction()?;
    let outcome = tx.execute("INSERT INTO t(name) VALUES ('a');");
    assert_eq!(outcome.last_insert_id, 1);
    let outcome = tx.execute("INSERT INTO t(name) VALUES ('b');");
    assert_eq!(outcome.last_insert_id, 2);
    Ok(())
}
