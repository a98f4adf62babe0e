//! Unified error type for the tinykv library.
//!
//! Logical failures raised by the store (missing table, missing key,
//! undecodable row) get their own variants. Anything coming from SQLite is
//! wrapped unmodified in [`Error::Engine`].

use thiserror::Error;

use crate::kv::{ConfigError, DecodeError};

/// Unified error type for all tinykv operations.
///
/// # Example
///
/// ```
/// use rusqlite::Connection;
/// use tinykv::{KvStore, Result};
///
/// fn lookup(store: &KvStore<&Connection>) -> Result<i64> {
///     match store.get("counter") {
///         Ok(value) => Ok(value.as_i64().unwrap_or(0)),
///         Err(e) if e.is_key_not_found() => Ok(0),
///         Err(e) => Err(e),
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The store's table does not exist; raised at construction.
    #[error("Table '{table}' not found in the database")]
    TableNotFound { table: String },

    /// `get` without a default, or `remove`, on a missing key.
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// A stored row could not be decoded under its tag.
    #[error("Decoding error: {0}")]
    Decode(#[from] DecodeError),

    /// Error from the underlying SQLite engine, passed through as-is.
    #[error(transparent)]
    Engine(#[from] rusqlite::Error),

    /// Invalid or unreadable store configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A [`Result`] type alias using the unified [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns `true` if the store could not be initialized.
    pub fn is_initialization(&self) -> bool {
        matches!(self, Self::TableNotFound { .. })
    }

    /// Returns `true` if a requested key was missing.
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound(_))
    }

    /// Returns `true` if a stored value could not be decoded.
    pub fn is_decoding(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    /// Returns `true` if this is an engine error.
    pub fn is_engine(&self) -> bool {
        matches!(self, Self::Engine(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifiers() {
        let init = Error::TableNotFound {
            table: "kv".to_string(),
        };
        assert!(init.is_initialization());
        assert_eq!(init.to_string(), "Table 'kv' not found in the database");

        let missing = Error::KeyNotFound("foo".to_string());
        assert!(missing.is_key_not_found());
        assert!(!missing.is_engine());

        let decode = Error::from(DecodeError::UnsupportedType(9));
        assert!(decode.is_decoding());
        assert_eq!(decode.to_string(), "Decoding error: Unsupported type tag 9");

        let engine = Error::from(rusqlite::Error::InvalidQuery);
        assert!(engine.is_engine());
    }
}
