//! Runtime values crossing the driver boundary
//!
//! `PgValue` carries both bind parameters on their way into a statement and
//! raw column values on their way out of a result row. Integer sequences
//! arrive from the driver already decoded; string arrays arrive as the
//! literal text form and are resolved later by the array codec.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PgValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Timestamp(DateTime<Utc>),
    IntSeq(Vec<i64>),
    FloatSeq(Vec<f64>),
    TextSeq(Vec<String>),
}

impl PgValue {
    pub fn is_null(&self) -> bool {
        matches!(self, PgValue::Null)
    }

    /// Short name of the carried variant, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            PgValue::Null => "null",
            PgValue::Bool(_) => "bool",
            PgValue::Int(_) => "integer",
            PgValue::Float(_) => "float",
            PgValue::Text(_) => "text",
            PgValue::Bytes(_) => "bytes",
            PgValue::Timestamp(_) => "timestamp",
            PgValue::IntSeq(_) => "integer sequence",
            PgValue::FloatSeq(_) => "float sequence",
            PgValue::TextSeq(_) => "text sequence",
        }
    }
}

impl From<bool> for PgValue {
    fn from(val: bool) -> Self {
        PgValue::Bool(val)
    }
}

impl From<i16> for PgValue {
    fn from(val: i16) -> Self {
        PgValue::Int(i64::from(val))
    }
}

impl From<i32> for PgValue {
    fn from(val: i32) -> Self {
        PgValue::Int(i64::from(val))
    }
}

impl From<i64> for PgValue {
    fn from(val: i64) -> Self {
        PgValue::Int(val)
    }
}

impl From<f32> for PgValue {
    fn from(val: f32) -> Self {
        PgValue::Float(f64::from(val))
    }
}

impl From<f64> for PgValue {
    fn from(val: f64) -> Self {
        PgValue::Float(val)
    }
}

impl From<&str> for PgValue {
    fn from(val: &str) -> Self {
        PgValue::Text(val.to_string())
    }
}

impl From<String> for PgValue {
    fn from(val: String) -> Self {
        PgValue::Text(val)
    }
}

impl From<Vec<u8>> for PgValue {
    fn from(val: Vec<u8>) -> Self {
        PgValue::Bytes(val)
    }
}

impl From<DateTime<Utc>> for PgValue {
    fn from(val: DateTime<Utc>) -> Self {
        PgValue::Timestamp(val)
    }
}

impl From<Vec<i64>> for PgValue {
    fn from(val: Vec<i64>) -> Self {
        PgValue::IntSeq(val)
    }
}

impl From<Vec<f64>> for PgValue {
    fn from(val: Vec<f64>) -> Self {
        PgValue::FloatSeq(val)
    }
}

impl From<Vec<String>> for PgValue {
    fn from(val: Vec<String>) -> Self {
        PgValue::TextSeq(val)
    }
}

impl<T> From<Option<T>> for PgValue
where
    T: Into<PgValue>,
{
    fn from(val: Option<T>) -> Self {
        match val {
            Some(v) => v.into(),
            None => PgValue::Null,
        }
    }
}
