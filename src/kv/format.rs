//! Value encoding and decoding.
//!
//! Every [`Value`] is stored as a one-byte [`Tag`] plus a [`Payload`] that
//! lands in the untyped `v` column. The mapping is:
//!
//! | Tag | Payload written | Accepted on read |
//! |---|---|---|
//! | `None` (1) | `NULL` | anything |
//! | `String` (2) | UTF-8 blob | blob or text |
//! | `Bytes` (3) | blob | blob or text |
//! | `Bool` (4) | integer 0/1 | integer, real or blob, nonzero is true |
//! | `Number` (5) | integer or real | integer or real |
//! | `Structured` (6) | compact JSON blob | blob or text |
//!
//! Numbers are read back through an `f64` and narrowed to an integer when
//! they have no fractional part, so integers beyond 2^53 lose precision.
//!
//! # Compatibility
//!
//! The `Structured` payload is JSON produced by `serde_json`. It is not
//! compatible with payloads written by other implementations of this table
//! layout, and decoding a foreign payload under tag 6 fails with
//! [`DecodeError::Structured`].

use std::string::FromUtf8Error;

use rusqlite::ToSql;
use rusqlite::types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef};
use thiserror::Error;

use super::value::{Number, Value};

/// Type discriminator stored in the `t` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
    None = 1,
    String = 2,
    Bytes = 3,
    Bool = 4,
    Number = 5,
    Structured = 6,
}

impl Tag {
    /// All tags, in numeric order.
    pub const ALL: [Tag; 6] = [
        Tag::None,
        Tag::String,
        Tag::Bytes,
        Tag::Bool,
        Tag::Number,
        Tag::Structured,
    ];

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<i64> for Tag {
    type Error = DecodeError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        match raw {
            1 => Ok(Tag::None),
            2 => Ok(Tag::String),
            3 => Ok(Tag::Bytes),
            4 => Ok(Tag::Bool),
            5 => Ok(Tag::Number),
            6 => Ok(Tag::Structured),
            other => Err(DecodeError::UnsupportedType(other)),
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Tag::None => "none",
            Tag::String => "string",
            Tag::Bytes => "bytes",
            Tag::Bool => "bool",
            Tag::Number => "number",
            Tag::Structured => "structured",
        };
        write!(f, "{}({})", name, self.as_u8())
    }
}

impl ToSql for Tag {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(i64::from(self.as_u8())))
    }
}

/// Raw storage form of a value, one variant per engine storage class.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Null,
    Integer(i64),
    Real(f64),
    Blob(Vec<u8>),
}

impl Payload {
    fn kind(&self) -> &'static str {
        match self {
            Payload::Null => "null",
            Payload::Integer(_) => "integer",
            Payload::Real(_) => "real",
            Payload::Blob(_) => "blob",
        }
    }
}

impl ToSql for Payload {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Payload::Null => ToSqlOutput::from(rusqlite::types::Null),
            Payload::Integer(i) => ToSqlOutput::from(*i),
            Payload::Real(f) => ToSqlOutput::from(*f),
            Payload::Blob(b) => ToSqlOutput::from(b.as_slice()),
        })
    }
}

impl FromSql for Payload {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Ok(match value {
            ValueRef::Null => Payload::Null,
            ValueRef::Integer(i) => Payload::Integer(i),
            ValueRef::Real(f) => Payload::Real(f),
            ValueRef::Text(t) | ValueRef::Blob(t) => Payload::Blob(t.to_vec()),
        })
    }
}

/// Errors raised while turning a stored row back into a [`Value`].
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Unsupported type tag {0}")]
    UnsupportedType(i64),

    #[error("Invalid UTF-8 in string value: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),

    #[error("Malformed structured payload: {0}")]
    Structured(#[from] serde_json::Error),

    #[error("Tag {tag} cannot hold a {found} payload")]
    PayloadMismatch { tag: Tag, found: &'static str },
}

/// Encode a value into its tag and storage payload.
pub fn encode(value: &Value) -> (Tag, Payload) {
    match value {
        Value::None => (Tag::None, Payload::Null),
        Value::String(s) => (Tag::String, Payload::Blob(s.as_bytes().to_vec())),
        Value::Bytes(b) => (Tag::Bytes, Payload::Blob(b.clone())),
        Value::Bool(b) => (Tag::Bool, Payload::Integer(i64::from(*b))),
        Value::Number(Number::Int(i)) => (Tag::Number, Payload::Integer(*i)),
        Value::Number(Number::Float(f)) => (Tag::Number, Payload::Real(*f)),
        Value::Structured(json) => (Tag::Structured, Payload::Blob(json.to_string().into_bytes())),
    }
}

/// Decode a tag and storage payload back into a value.
pub fn decode(tag: Tag, payload: Payload) -> Result<Value, DecodeError> {
    let mismatch = |payload: &Payload| DecodeError::PayloadMismatch {
        tag,
        found: payload.kind(),
    };

    match (tag, payload) {
        (Tag::None, _) => Ok(Value::None),
        (Tag::String, Payload::Blob(b)) => Ok(Value::String(String::from_utf8(b)?)),
        (Tag::Bytes, Payload::Blob(b)) => Ok(Value::Bytes(b)),
        (Tag::Bool, Payload::Integer(i)) => Ok(Value::Bool(i != 0)),
        (Tag::Bool, Payload::Real(f)) => Ok(Value::Bool(f != 0.0)),
        (Tag::Bool, Payload::Blob(b)) => Ok(Value::Bool(b.iter().any(|&byte| byte != 0))),
        (Tag::Number, Payload::Integer(i)) => Ok(Value::Number(Number::from_f64(i as f64))),
        (Tag::Number, Payload::Real(f)) => Ok(Value::Number(Number::from_f64(f))),
        (Tag::Structured, Payload::Blob(b)) => Ok(Value::Structured(serde_json::from_slice(&b)?)),
        (_, other) => Err(mismatch(&other)),
    }
}

/// Decode a row whose tag column has not been validated yet.
pub fn decode_raw(raw_tag: i64, payload: Payload) -> Result<Value, DecodeError> {
    decode(Tag::try_from(raw_tag)?, payload)
}
