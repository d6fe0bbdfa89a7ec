//! Database access
//!
//! Every call opens its own connection and closes it before returning, so
//! the database file is fully flushed and unlocked when the dump tool reads
//! it.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use gitbench_core::sql::{create_table, table_name};
use rusqlite::Connection;
use std::path::Path;

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

fn close(conn: Connection) -> Result<()> {
    conn.close().map_err(|(_, e)| from_rusqlite(e))
}

/// Create `tables` empty tables of `fields` integer columns each
pub fn create_schema(path: &Path, tables: usize, fields: usize) -> Result<()> {
    let mut conn = open(path)?;
    apply_schema(&mut conn, tables, fields)?;
    close(conn)
}

/// Execute the `create table` statements in one transaction
pub fn apply_schema(conn: &mut Connection, tables: usize, fields: usize) -> Result<()> {
    let tx = conn.transaction().map_err(from_rusqlite)?;
    for t in 0..tables {
        tx.execute(&create_table(t, fields), [])
            .map_err(from_rusqlite)?;
    }
    tx.commit().map_err(from_rusqlite)
}

/// Run one mutating statement in its own connection and transaction
///
/// Returns the number of rows changed.
pub fn execute_op(path: &Path, sql: &str) -> Result<usize> {
    let mut conn = open(path)?;
    let tx = conn.transaction().map_err(from_rusqlite)?;
    let changed = tx.execute(sql, []).map_err(from_rusqlite)?;
    tx.commit().map_err(from_rusqlite)?;
    close(conn)?;
    Ok(changed)
}

/// Number of rows currently in `table{t}`
pub fn row_count(conn: &Connection, table: usize) -> Result<u64> {
    let count: i64 = conn
        .query_row(
            &format!("SELECT COUNT(*) FROM {}", table_name(table)),
            [],
            |row| row.get(0),
        )
        .map_err(from_rusqlite)?;
    Ok(count as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_apply_schema_creates_tables() {
        let mut conn = open_in_memory().unwrap();
        apply_schema(&mut conn, 2, 10).unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert_eq!(tables, vec!["table0", "table1"]);

        let columns: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('table1')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(columns, 11);
    }

    #[test]
    fn test_schema_twice_fails() {
        let mut conn = open_in_memory().unwrap();
        apply_schema(&mut conn, 1, 3).unwrap();
        assert!(apply_schema(&mut conn, 1, 3).is_err());
    }

    #[test]
    fn test_execute_op_persists_across_connections() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bench.db");
        create_schema(&path, 1, 3).unwrap();

        let inserted = execute_op(
            &path,
            "insert into table0 (field0,field1,field2) values (1,2,3)",
        )
        .unwrap();
        assert_eq!(inserted, 1);

        let updated = execute_op(&path, "update table0 set field1=9 where key=1").unwrap();
        assert_eq!(updated, 1);

        let conn = open(&path).unwrap();
        assert_eq!(row_count(&conn, 0).unwrap(), 1);
        let field1: i64 = conn
            .query_row("SELECT field1 FROM table0 WHERE key = 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(field1, 9);
    }

    #[test]
    fn test_first_inserts_get_sequential_keys() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bench.db");
        create_schema(&path, 1, 3).unwrap();

        for _ in 0..3 {
            execute_op(&path, "insert into table0 (field0,field1,field2) values (0,0,0)").unwrap();
        }

        let conn = open(&path).unwrap();
        let max_key: i64 = conn
            .query_row("SELECT MAX(key) FROM table0", [], |row| row.get(0))
            .unwrap();
        assert_eq!(max_key, 3);
    }

    #[test]
    fn test_bad_sql_is_persistence_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bench.db");
        create_schema(&path, 1, 3).unwrap();

        let err = execute_op(&path, "insert into missing_table values (1)").unwrap_err();
        assert_eq!(err.kind(), gitbench_core::ExErrorKind::Persistence);
    }
}
