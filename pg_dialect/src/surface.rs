//! SQL syntax surface
//!
//! `PgDialect` captures the backend's statement syntax rules as an explicit
//! value passed into whatever assembles or executes statement text, rather
//! than living in process-wide state.

use crate::array;
use crate::value::PgValue;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PgDialect;

impl PgDialect {
    /// Positional bind placeholder, 1-based: `$1`, `$2`, ...
    pub fn bind_var(&self, position: usize) -> String {
        format!("${}", position)
    }

    /// Identifier quoting via double-quote wrapping.
    pub fn quote(&self, identifier: &str) -> String {
        format!("\"{}\"", identifier)
    }

    /// `RETURNING "<column>"` clause for statements that hand back a column.
    pub fn returning(&self, column: &str) -> String {
        format!("RETURNING \"{}\"", column)
    }

    /// The backend reports inserted keys via RETURNING, not last-insert-id.
    pub fn supports_last_insert_id(&self) -> bool {
        false
    }

    /// Pre-process a value before it is bound: sequences are formatted into
    /// the backend's array literal text, everything else passes through.
    pub fn db_value(&self, value: PgValue) -> PgValue {
        match value {
            PgValue::IntSeq(items) => PgValue::Text(array::encode_int_array(&items)),
            PgValue::FloatSeq(items) => PgValue::Text(array::encode_float_array(&items)),
            PgValue::TextSeq(items) => PgValue::Text(array::encode_text_array(&items)),
            other => other,
        }
    }
}
