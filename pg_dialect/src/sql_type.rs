//! Scalar-to-column-type mapping for DDL generation
//!
//! Pure functions from a field's bindable kind (plus declared size) to the
//! canonical PostgreSQL column type keyword. A kind with no mapping rule is
//! a developer-time contract violation and aborts immediately; these are
//! consulted while schemas are being defined, never while serving requests.

use crate::kind::FieldKind;

/// Longest string that still fits a `varchar`; anything at or above this
/// declared size becomes `text`.
const MAX_VARCHAR: u32 = 65532;

/// Map a field kind and declared size to its PostgreSQL column type.
///
/// Panics for kinds with no column representation (sequences included);
/// schema generation must never fall back to a guessed type.
pub fn sql_type(kind: FieldKind, size: u32) -> String {
    match kind {
        FieldKind::Bool => "boolean".to_string(),
        FieldKind::Int8
        | FieldKind::Int16
        | FieldKind::Int32
        | FieldKind::ISize
        | FieldKind::UInt8
        | FieldKind::UInt16
        | FieldKind::UInt32
        | FieldKind::USize => "integer".to_string(),
        FieldKind::Int64 | FieldKind::UInt64 => "bigint".to_string(),
        FieldKind::Float32 | FieldKind::Float64 => "numeric".to_string(),
        FieldKind::Text => {
            if size > 0 && size < MAX_VARCHAR {
                format!("varchar({})", size)
            } else {
                "text".to_string()
            }
        }
        FieldKind::Timestamp => "timestamp with time zone".to_string(),
        FieldKind::Hstore => "hstore".to_string(),
        FieldKind::Bytes => "bytea".to_string(),
        other => panic!("invalid sql type for field kind {:?}", other),
    }
}

/// Map a primary-key field kind to its auto-incrementing column definition.
///
/// Panics for non-integer kinds; a primary key outside the integer family is
/// a schema definition error.
pub fn primary_key_sql(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Int8
        | FieldKind::Int16
        | FieldKind::Int32
        | FieldKind::ISize
        | FieldKind::UInt8
        | FieldKind::UInt16
        | FieldKind::UInt32
        | FieldKind::USize => "serial PRIMARY KEY",
        FieldKind::Int64 | FieldKind::UInt64 => "bigserial PRIMARY KEY",
        other => panic!("invalid primary key kind {:?}", other),
    }
}
