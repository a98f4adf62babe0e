//! Key-value store module.
//!
//! Values are translated to a `(tag, payload)` pair by [`format`] and kept
//! in a single three-column SQLite table managed by [`KvStore`].

mod config;
pub mod format;
mod schema;
mod store;
mod value;

pub use config::{ConfigError, StoreConfig};
pub use format::{DecodeError, Payload, Tag, decode, encode};
pub use schema::{DEFAULT_TABLE, create_schema, table_exists};
pub use store::KvStore;
pub use value::{Number, Value};
