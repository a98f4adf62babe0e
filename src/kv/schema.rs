//! Table setup for the store.
//!
//! The store itself never creates its table; these helpers are what callers
//! (and [`StoreConfig::create_table`](super::StoreConfig)) use to set one up.

use rusqlite::{Connection, OptionalExtension};

use crate::logging::{debug, info};

/// Table name used when none is given.
pub const DEFAULT_TABLE: &str = "kv";

/// Create the key-value table.
///
/// Fails with the engine error if the table already exists.
///
/// ```
/// use rusqlite::Connection;
///
/// let conn = Connection::open_in_memory()?;
/// tinykv::create_schema(&conn, "kv")?;
/// assert!(tinykv::table_exists(&conn, "kv")?);
/// # Ok::<(), rusqlite::Error>(())
/// ```
pub fn create_schema(conn: &Connection, table: &str) -> rusqlite::Result<()> {
    debug!(table = table, "creating key-value table");
    conn.execute_batch(&format!(
        "CREATE TABLE {} (\
         k TEXT NOT NULL COLLATE NOCASE, \
         t TINYINT NOT NULL CHECK (t BETWEEN 1 AND 6), \
         v BLOB, \
         PRIMARY KEY (k)\
         )",
        quote_ident(table)
    ))?;
    info!(table = table, "key-value table created");
    Ok(())
}

/// Check whether `table` exists in the connection's main schema catalog.
pub fn table_exists(conn: &Connection, table: &str) -> rusqlite::Result<bool> {
    let found: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Quote an identifier so it can be spliced into a statement.
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
