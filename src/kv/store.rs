//! KV Store implementation over a single SQLite table.

use std::borrow::Borrow;
use std::collections::HashMap;

use rusqlite::{Connection, OptionalExtension, Row, ToSql, params, params_from_iter};

use crate::error::{Error, Result};
use crate::logging::{debug, error, info, trace, warn};

use super::config::StoreConfig;
use super::format::{Payload, Tag, decode_raw, encode};
use super::schema::{DEFAULT_TABLE, create_schema, quote_ident, table_exists};
use super::value::Value;

/// Statements that do not depend on the number of keys.
#[derive(Debug)]
struct Statements {
    set: String,
    get: String,
    glob: String,
    remove: String,
}

impl Statements {
    fn new(quoted: &str) -> Self {
        Self {
            set: format!("INSERT OR REPLACE INTO {} (k, t, v) VALUES (?1, ?2, ?3)", quoted),
            get: format!("SELECT t, v FROM {} WHERE k = ?1", quoted),
            glob: format!("SELECT k, t, v FROM {} WHERE k GLOB ?1", quoted),
            remove: format!("DELETE FROM {} WHERE k = ?1", quoted),
        }
    }
}

/// A typed key-value store over one SQLite table.
///
/// `KvStore` is a thin façade: it keeps the connection handle and the table
/// name, and every call is one statement against the engine. Values go
/// through the codec in [`format`](super::format) on the way in and out.
///
/// # Example
///
/// ```
/// use rusqlite::Connection;
/// use tinykv::{KvStore, Value, create_schema};
///
/// let conn = Connection::open_in_memory()?;
/// create_schema(&conn, "kv")?;
///
/// let store = KvStore::new(&conn)?;
/// store.set("foo", "bar")?;
/// store.set("one", 1)?;
///
/// assert_eq!(store.get("FOO")?, Value::from("bar"));
/// assert_eq!(store.get_or("missing", Value::None)?, Value::None);
///
/// store.remove("foo")?;
/// assert!(store.get("foo").unwrap_err().is_key_not_found());
/// # Ok::<(), tinykv::Error>(())
/// ```
///
/// # Connection ownership
///
/// The store is generic over anything that borrows as a [`Connection`]:
/// `&Connection`, `Connection`, `Rc<Connection>`, `Arc<Connection>`, and so
/// on. It never opens, commits or closes the connection, and it does not
/// serialize access to it. Wrap several calls in a transaction on the
/// connection when they must be atomic together.
#[derive(Debug)]
pub struct KvStore<C = Connection> {
    conn: C,
    table: String,
    quoted: String,
    sql: Statements,
}

impl<C: Borrow<Connection>> KvStore<C> {
    /// Bind to the default `kv` table.
    ///
    /// Fails with [`Error::TableNotFound`] if the table does not exist.
    pub fn new(conn: C) -> Result<Self> {
        Self::with_table(conn, DEFAULT_TABLE)
    }

    /// Bind to an existing table.
    ///
    /// Fails with [`Error::TableNotFound`] if the table does not exist.
    pub fn with_table(conn: C, table: impl Into<String>) -> Result<Self> {
        let table = table.into();
        debug!(table = %table, "opening KV store");

        let db: &Connection = conn.borrow();
        if !table_exists(db, &table)? {
            error!(table = %table, "table not found in the database");
            return Err(Error::TableNotFound { table });
        }

        let quoted = quote_ident(&table);
        let sql = Statements::new(&quoted);
        info!(table = %table, "KV store opened");
        Ok(Self {
            conn,
            table,
            quoted,
            sql,
        })
    }

    /// Bind according to a [`StoreConfig`], creating the table first when
    /// `create_table` is set and it is missing.
    pub fn with_config(conn: C, config: &StoreConfig) -> Result<Self> {
        config.validate()?;

        let db: &Connection = conn.borrow();
        if config.create_table && !table_exists(db, &config.table)? {
            create_schema(db, &config.table)?;
        }

        Self::with_table(conn, config.table.clone())
    }

    /// The connection this store issues statements on.
    pub fn conn(&self) -> &Connection {
        self.conn.borrow()
    }

    /// The table holding the entries.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Give back the wrapped connection handle.
    pub fn into_inner(self) -> C {
        self.conn
    }

    /// Store a value, replacing any existing entry for `key`.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> Result<()> {
        let (tag, payload) = encode(&value.into());
        trace!(key = key, tag = %tag, "setting value");

        self.conn()
            .prepare_cached(&self.sql.set)?
            .execute(params![key, tag, payload])?;
        Ok(())
    }

    /// Get the value for `key`, or [`Error::KeyNotFound`] if there is none.
    pub fn get(&self, key: &str) -> Result<Value> {
        self.try_get(key)?.ok_or_else(|| {
            warn!(key = key, "key not found");
            Error::KeyNotFound(key.to_string())
        })
    }

    /// Get the value for `key`, or `default` if there is none.
    ///
    /// `default` may itself be [`Value::None`].
    pub fn get_or(&self, key: &str, default: impl Into<Value>) -> Result<Value> {
        Ok(self.try_get(key)?.unwrap_or_else(|| default.into()))
    }

    /// Get the value for `key`, if present.
    pub fn try_get(&self, key: &str) -> Result<Option<Value>> {
        trace!(key = key, "getting value");
        let row = self
            .conn()
            .prepare_cached(&self.sql.get)?
            .query_row([key], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, Payload>(1)?)))
            .optional()?;

        row.map(|(tag, payload)| self.decode_row(key, tag, payload))
            .transpose()
    }

    /// Get every entry whose key is in `keys`.
    ///
    /// Missing keys are left out of the result. The result is keyed by the
    /// stored spelling of each key.
    pub fn get_many<I, K>(&self, keys: I) -> Result<HashMap<String, Value>>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let keys: Vec<K> = keys.into_iter().collect();
        if keys.is_empty() {
            return Ok(HashMap::new());
        }
        debug!(count = keys.len(), "getting many values");

        let sql = format!(
            "SELECT k, t, v FROM {} WHERE k IN ({})",
            self.quoted,
            placeholders(keys.len())
        );
        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt.query_map(
            params_from_iter(keys.iter().map(AsRef::<str>::as_ref)),
            read_entry,
        )?;
        self.collect_entries(rows)
    }

    /// Get every entry whose key matches a shell-style glob.
    ///
    /// `*` matches any run of characters, `?` one character and `[...]` a
    /// character class. Matching is case-sensitive, unlike exact lookups.
    pub fn get_glob(&self, pattern: &str) -> Result<HashMap<String, Value>> {
        debug!(pattern = pattern, "getting values by glob");
        let mut stmt = self.conn().prepare_cached(&self.sql.glob)?;
        let rows = stmt.query_map([pattern], read_entry)?;
        self.collect_entries(rows)
    }

    /// Store many values in one statement.
    ///
    /// The statement is atomic on its own; it is not wrapped in a
    /// transaction. If a key appears more than once the last value wins.
    pub fn set_many<I, K, V>(&self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let rows: Vec<(String, Tag, Payload)> = entries
            .into_iter()
            .map(|(key, value)| {
                let (tag, payload) = encode(&value.into());
                (key.into(), tag, payload)
            })
            .collect();
        if rows.is_empty() {
            return Ok(());
        }
        debug!(count = rows.len(), "setting many values");

        let sql = format!(
            "INSERT OR REPLACE INTO {} (k, t, v) VALUES {}",
            self.quoted,
            vec!["(?, ?, ?)"; rows.len()].join(", ")
        );
        let params: Vec<&dyn ToSql> = rows
            .iter()
            .flat_map(|(key, tag, payload)| {
                [key as &dyn ToSql, tag as &dyn ToSql, payload as &dyn ToSql]
            })
            .collect();
        self.conn().execute(&sql, params.as_slice())?;
        Ok(())
    }

    /// Remove the entry for `key`, or [`Error::KeyNotFound`] if there is none.
    pub fn remove(&self, key: &str) -> Result<()> {
        trace!(key = key, "removing value");
        let removed = self
            .conn()
            .prepare_cached(&self.sql.remove)?
            .execute([key])?;
        if removed == 0 {
            warn!(key = key, "key not found");
            return Err(Error::KeyNotFound(key.to_string()));
        }
        Ok(())
    }

    /// Remove every entry whose key is in `keys`.
    ///
    /// Missing keys are ignored. Returns how many entries were removed.
    pub fn remove_many<I, K>(&self, keys: I) -> Result<usize>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let keys: Vec<K> = keys.into_iter().collect();
        if keys.is_empty() {
            return Ok(0);
        }

        let sql = format!(
            "DELETE FROM {} WHERE k IN ({})",
            self.quoted,
            placeholders(keys.len())
        );
        let removed = self
            .conn()
            .execute(&sql, params_from_iter(keys.iter().map(AsRef::<str>::as_ref)))?;
        debug!(requested = keys.len(), removed = removed, "removed many values");
        Ok(removed)
    }

    // Helper methods

    fn decode_row(&self, key: &str, tag: i64, payload: Payload) -> Result<Value> {
        decode_raw(tag, payload).map_err(|e| {
            error!(
                table = %self.table,
                key = key,
                tag = tag,
                error = %e,
                "failed to decode stored value"
            );
            Error::Decode(e)
        })
    }

    fn collect_entries<R>(&self, rows: R) -> Result<HashMap<String, Value>>
    where
        R: Iterator<Item = rusqlite::Result<(String, i64, Payload)>>,
    {
        let mut entries = HashMap::new();
        for row in rows {
            let (key, tag, payload) = row?;
            let value = self.decode_row(&key, tag, payload)?;
            entries.insert(key, value);
        }
        trace!(count = entries.len(), "collected entries");
        Ok(entries)
    }
}

fn read_entry(row: &Row<'_>) -> rusqlite::Result<(String, i64, Payload)> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}
