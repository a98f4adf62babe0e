//! A tiny typed key-value store on top of SQLite.
//!
//! tinykv keeps arbitrary values under case-insensitive string keys in a
//! single SQLite table. Each value is stored as a one-byte type tag plus an
//! untyped payload column, so strings, bytes, booleans, numbers and
//! structured (JSON) values all round-trip through the same table.
//!
//! # Quick Start
//!
//! ```
//! use rusqlite::Connection;
//! use tinykv::prelude::*;
//!
//! let conn = Connection::open_in_memory()?;
//! create_schema(&conn, DEFAULT_TABLE)?;
//!
//! let store = KvStore::new(&conn)?;
//! store.set_many([("foo:abc", 1), ("foo:xyz", 2), ("bar:abc", 3)])?;
//!
//! let foos = store.get_glob("foo:*")?;
//! assert_eq!(foos.len(), 2);
//! assert_eq!(store.get("FOO:ABC")?, Value::from(1));
//! # Ok::<(), Error>(())
//! ```
//!
//! # Modules
//!
//! - [`kv`] - Value codec, schema helpers and the [`KvStore`] itself
//! - [`error`] - Unified error type
//! - [`prelude`] - Convenient re-exports
//!
//! # Feature Flags
//!
//! - `config` - Load [`StoreConfig`] from TOML (enabled by default)
//! - `logging` - Enable library-level tracing (consumers provide their own subscriber)
//! - `full` - Enable all features

mod logging;

pub mod error;
pub mod kv;
pub mod prelude;

// Re-export the unified error type
pub use error::{Error, Result};

// Re-export KV types at crate root for convenience
pub use kv::{
    ConfigError, DEFAULT_TABLE, DecodeError, KvStore, Number, StoreConfig, Tag, Value,
    create_schema, table_exists,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
