//! PostgreSQL dialect type bridge for the rowbridge ecosystem
//!
//! This crate owns the conversions between native Rust values and the
//! backend's textual and binary encodings: scalar-to-column-type mapping for
//! schema generation, array literal encode/decode, the hstore key-value
//! format, and the SQL syntax surface (placeholders, quoting, RETURNING).

pub mod array;
pub mod catalog;
pub mod errors;
pub mod hstore;
pub mod kind;
pub mod sql_type;
pub mod surface;
pub mod value;


pub use array::{decode_array, decode_text_array, encode_float_array, encode_int_array, encode_text_array};
pub use catalog::{has_column, has_table};
pub use errors::DialectError;
pub use hstore::Hstore;
pub use kind::{ElemKind, FieldKind};
pub use sql_type::{primary_key_sql, sql_type};
pub use surface::PgDialect;
pub use value::PgValue;
