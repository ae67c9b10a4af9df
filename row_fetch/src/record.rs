//! Destination records and field descriptors
//!
//! A `Record` describes how result columns land in a struct: a static table
//! of field descriptors, each carrying the field's logical name, bindable
//! kind, and a setter. Implementations normally come from
//! `#[derive(Record)]`, which also generates a compile-time name lookup so
//! the column-to-field mapping is never recomputed per row.

use pg_dialect::{DialectError, FieldKind, PgValue};

/// One bindable field of a destination struct.
pub struct FieldDescriptor<T> {
    /// Logical field name: the column name's lower-case, underscore-delimited
    /// tokens, each capitalized and concatenated (`user_name` -> `UserName`).
    pub name: &'static str,
    pub kind: FieldKind,
    /// Declared size for `varchar` mapping; 0 when unsized.
    pub size: u32,
    pub primary_key: bool,
    pub set: fn(&mut T, PgValue) -> Result<(), DialectError>,
}

impl<T> std::fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("size", &self.size)
            .field("primary_key", &self.primary_key)
            .finish()
    }
}

/// A struct that result rows can be materialized into.
pub trait Record: Default + Send {
    /// Field descriptors, in declaration order.
    fn fields() -> &'static [FieldDescriptor<Self>]
    where
        Self: Sized;

    /// Resolve a logical field name to its descriptor index.
    fn field_index(name: &str) -> Option<usize>
    where
        Self: Sized,
    {
        Self::fields().iter().position(|field| field.name == name)
    }

    /// Hook invoked once per materialized record, after all of its columns
    /// (including deferred sequence fields) have been bound.
    fn on_loaded(&mut self) {}
}

/// Convert a lower-case, underscore-delimited name to the records' logical
/// naming convention: each token capitalized, concatenated, no delimiter.
pub fn snake_to_upper_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for token in name.split('_') {
        let mut chars = token.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Resolve a raw result column name to a logical field name. Matching is
/// case-insensitive on the raw column name.
pub fn column_to_field_name(column: &str) -> String {
    snake_to_upper_camel(&column.to_ascii_lowercase())
}

/// Inverse of [`snake_to_upper_camel`]: derive the column name for a logical
/// field name (`UserName` -> `user_name`), for DDL generation.
pub fn field_to_column_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            if !out.is_empty() {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
