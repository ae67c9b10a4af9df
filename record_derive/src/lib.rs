//! Procedural macro generating `Record` implementations for result rows
//!
//! This crate provides the `#[derive(Record)]` macro, which turns a plain
//! struct into a materialization destination: a static field descriptor
//! table, per-field setters implementing the column decode rules, and a
//! compile-time column-name lookup.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod parsing;
mod record_generation;

use parsing::{parse_fields, parse_record_attributes};
use record_generation::generate_record_impl;

/// Derive macro for the `Record` trait
///
/// Field types map to bindable kinds by their written form: scalars,
/// `String`, `Vec<u8>` (a byte buffer, not a sequence), `Vec` of integer,
/// float, or `String` elements, `DateTime<Utc>`, and `Hstore`. Any other
/// type is a compile error; there is no fallback mapping.
///
/// ```rust
/// use record_derive::Record;
///
/// #[derive(Default, Record)]
/// #[record(after_load)]
/// pub struct User {
///     #[primary_key]
///     pub id: i64,
///
///     #[field(size = 100)]
///     pub user_name: String,
///
///     pub tags: Vec<String>,
///
///     #[field(skip)]
///     pub loaded: bool,
/// }
///
/// impl User {
///     fn after_load(&mut self) {
///         self.loaded = true;
///     }
/// }
/// ```
///
/// `#[record(after_load)]` wires the per-record loaded hook to an inherent
/// `after_load` method; `#[field(skip)]` keeps a struct field out of the
/// descriptor table entirely.
#[proc_macro_derive(Record, attributes(record, primary_key, field))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;

    let record_info = match parse_record_attributes(&input.attrs) {
        Ok(info) => info,
        Err(e) => return e.to_compile_error().into(),
    };

    let fields = match parse_fields(&input.data) {
        Ok(fields) => fields,
        Err(e) => return e.to_compile_error().into(),
    };

    let expanded = generate_record_impl(name, &record_info, &fields);
    TokenStream::from(expanded)
}
