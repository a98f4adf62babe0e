//! Native values stored under a key.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::format::Tag;

/// A numeric value.
///
/// The store keeps integers and floats under one [`Tag::Number`] tag and
/// reads them back through an `f64`, so a float without a fractional part
/// comes back as [`Number::Int`]. Equality is numeric to match that:
/// `Number::Int(2) == Number::Float(2.0)`.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// The value as an `f64` (may round integers beyond 2^53).
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    /// The value as an `i64` if it is whole and in range.
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Number::Int(i) => Some(i),
            Number::Float(f) => whole_f64_to_i64(f),
        }
    }

    /// Narrow a float the way the store does on read.
    pub(crate) fn from_f64(f: f64) -> Self {
        match whole_f64_to_i64(f) {
            Some(i) => Number::Int(i),
            None => Number::Float(f),
        }
    }
}

/// `f` as an `i64` when it has no fractional part and fits.
fn whole_f64_to_i64(f: f64) -> Option<i64> {
    // 2^63 is exactly representable; anything at or above it overflows.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if f.is_finite() && f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f) {
        Some(f as i64)
    } else {
        None
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            (a, b) => a.as_f64() == b.as_f64(),
        }
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Float(x) => write!(f, "{}", x),
        }
    }
}

/// A value that can be stored under a key.
///
/// Each variant maps to exactly one [`Tag`]. Anything that is not text,
/// bytes, a boolean or a number goes through [`Value::Structured`], which is
/// persisted as compact JSON.
///
/// # Example
///
/// ```
/// use tinykv::Value;
///
/// assert_eq!(Value::from("bar"), Value::String("bar".to_string()));
/// assert_eq!(Value::from(1), Value::from(1.0));
/// assert!(Value::from(None::<i64>).is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An explicit null.
    None,
    /// UTF-8 text.
    String(String),
    /// Raw binary.
    Bytes(Vec<u8>),
    /// A boolean, kept distinct from numbers.
    Bool(bool),
    /// An integer or float.
    Number(Number),
    /// Any other structured value.
    Structured(serde_json::Value),
}

impl Value {
    /// Serialize any serde type into a [`Value::Structured`].
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Value::Structured)
    }

    /// Deserialize a [`Value::Structured`] back into a serde type.
    ///
    /// Other variants are converted through their JSON equivalent first, so
    /// `Value::from(3).deserialize::<u8>()` works as well.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        match self {
            Value::Structured(json) => Deserialize::deserialize(json),
            other => Deserialize::deserialize(other.to_json()),
        }
    }

    /// The tag this value is stored under.
    pub fn tag(&self) -> Tag {
        match self {
            Value::None => Tag::None,
            Value::String(_) => Tag::String,
            Value::Bytes(_) => Tag::Bytes,
            Value::Bool(_) => Tag::Bool,
            Value::Number(_) => Tag::Number,
            Value::Structured(_) => Tag::Structured,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    pub fn as_structured(&self) -> Option<&serde_json::Value> {
        match self {
            Value::Structured(json) => Some(json),
            _ => None,
        }
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            Value::None => serde_json::Value::Null,
            Value::String(s) => serde_json::Value::from(s.as_str()),
            Value::Bytes(b) => serde_json::Value::from(b.as_slice()),
            Value::Bool(b) => serde_json::Value::from(*b),
            Value::Number(Number::Int(i)) => serde_json::Value::from(*i),
            Value::Number(Number::Float(f)) => serde_json::Value::from(*f),
            Value::Structured(json) => json.clone(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(i: $ty) -> Self {
                    Value::Number(Number::Int(i64::from(i)))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Number(Number::Float(f64::from(f)))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Number(Number::Float(f))
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Value::Structured(json)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::None, Into::into)
    }
}

impl From<&Value> for Value {
    fn from(v: &Value) -> Self {
        v.clone()
    }
}
