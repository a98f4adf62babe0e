//! Convenient re-exports for common usage patterns.
//!
//! # Example
//!
//! ```
//! use tinykv::prelude::*;
//!
//! let conn = rusqlite::Connection::open_in_memory()?;
//! create_schema(&conn, DEFAULT_TABLE)?;
//! let store = KvStore::new(&conn)?;
//! store.set("p1", Value::from(10))?;
//! # Ok::<(), Error>(())
//! ```

// Unified error handling
pub use crate::error::{Error, Result};

// Store and configuration
pub use crate::kv::{ConfigError, DEFAULT_TABLE, KvStore, StoreConfig, create_schema, table_exists};

// Value model and codec
pub use crate::kv::{DecodeError, Number, Tag, Value};
