//! Common test utilities and fixtures.
//!
//! This module provides shared test data, database fixtures and logging
//! setup to reduce duplication across the test suite.

#![allow(dead_code)]

use std::path::PathBuf;

use rusqlite::Connection;
use serde_json::json;
use tempfile::TempDir;
use tinykv::{DEFAULT_TABLE, Value, create_schema};

// =============================================================================
// Test Data
// =============================================================================

/// One value of every kind the store supports.
pub fn test_data() -> Vec<(&'static str, Value)> {
    vec![
        ("none", Value::None),
        ("foo", Value::from("bar")),
        (
            "bytes",
            Value::from(vec![
                0x9b, 0x00, 0x4f, 0xe1, 0x22, 0x7a, 0xff, 0x10, 0x03, 0xc8, 0x5e, 0x91, 0x00,
                0x6d, 0xb4, 0x27, 0xee, 0x01, 0x80, 0x39,
            ]),
        ),
        ("maybe", Value::from(true)),
        ("one", Value::from(1)),
        ("pi", Value::from(1234.5678)),
        ("complex", Value::from(json!({"re": 1.0, "im": 2.0}))),
        (
            "now",
            Value::from(json!({"timestamp": "2024-05-17T10:31:07.123456", "tz": null})),
        ),
    ]
}

// =============================================================================
// Database Fixtures
// =============================================================================

/// An on-disk database in a temporary directory, with the schema created.
pub struct TestDb {
    dir: TempDir,
    pub path: PathBuf,
}

impl TestDb {
    /// Create a fresh database file and the default table.
    pub fn new() -> Self {
        init_tracing();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.sqlite3");
        let conn = Connection::open(&path).unwrap();
        create_schema(&conn, DEFAULT_TABLE).unwrap();
        Self { dir, path }
    }

    /// Open a new connection to the database.
    pub fn open(&self) -> Connection {
        Connection::open(&self.path).unwrap()
    }
}

/// An in-memory connection with the default table.
pub fn memory_conn() -> Connection {
    init_tracing();
    let conn = Connection::open_in_memory().unwrap();
    create_schema(&conn, DEFAULT_TABLE).unwrap();
    conn
}

// =============================================================================
// Logging
// =============================================================================

/// Route library logs to the test writer (set `RUST_LOG` to see them).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
