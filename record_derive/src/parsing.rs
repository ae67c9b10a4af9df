//! Parsing of struct fields and record attributes
//!
//! Resolves each struct field to a bindable kind from the written form of
//! its type, and collects the `#[record]`, `#[primary_key]`, and `#[field]`
//! attributes.

use quote::quote;
use syn::{Attribute, Data, Error, Fields, Ident, LitInt, Result, Type};

/// Struct-level record options.
#[derive(Debug, Default)]
pub struct RecordInfo {
    /// Wire the loaded hook to an inherent `after_load` method.
    pub after_load: bool,
}

/// Element kind of a sequence-typed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedElem {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Text,
}

/// Bindable kind resolved from a field's written type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedKind {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    ISize,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    USize,
    Float32,
    Float64,
    Text,
    Bytes,
    Timestamp,
    Hstore,
    Seq(ParsedElem),
}

/// One materializable field of the derived struct.
#[derive(Debug)]
pub struct FieldSpec {
    pub ident: Ident,
    /// Logical name in the records' naming convention (`user_name` ->
    /// `UserName`).
    pub logical_name: String,
    pub kind: ParsedKind,
    pub size: u32,
    pub primary_key: bool,
}

pub fn parse_record_attributes(attrs: &[Attribute]) -> Result<RecordInfo> {
    let mut info = RecordInfo::default();
    for attr in attrs {
        if attr.path().is_ident("record") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("after_load") {
                    info.after_load = true;
                    Ok(())
                } else {
                    Err(meta.error("unsupported record attribute"))
                }
            })?;
        }
    }
    Ok(info)
}

pub fn parse_fields(data: &Data) -> Result<Vec<FieldSpec>> {
    let Data::Struct(data) = data else {
        return Err(Error::new(
            proc_macro2::Span::call_site(),
            "Record can only be derived for structs",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(Error::new(
            proc_macro2::Span::call_site(),
            "Record requires named struct fields",
        ));
    };

    let mut specs = Vec::new();
    for field in &named.named {
        let ident = field.ident.clone().expect("named field");
        let mut size = 0u32;
        let mut primary_key = false;
        let mut skip = false;

        for attr in &field.attrs {
            if attr.path().is_ident("primary_key") {
                primary_key = true;
            } else if attr.path().is_ident("field") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("size") {
                        let lit: LitInt = meta.value()?.parse()?;
                        size = lit.base10_parse()?;
                        Ok(())
                    } else if meta.path.is_ident("skip") {
                        skip = true;
                        Ok(())
                    } else {
                        Err(meta.error("unsupported field attribute"))
                    }
                })?;
            }
        }

        if skip {
            continue;
        }

        let kind = kind_for_type(&field.ty).ok_or_else(|| {
            let ty = &field.ty;
            Error::new_spanned(
                ty,
                format!("unsupported field type `{}` for Record derive", quote!(#ty)),
            )
        })?;

        specs.push(FieldSpec {
            logical_name: snake_to_upper_camel(&ident.to_string()),
            ident,
            kind,
            size,
            primary_key,
        });
    }
    Ok(specs)
}

/// Resolve a field's written type to its bindable kind. Matching runs on the
/// whitespace-stripped type text, the same way the column type mapper is
/// keyed on declared kinds rather than runtime inspection.
fn kind_for_type(ty: &Type) -> Option<ParsedKind> {
    let rendered = quote!(#ty).to_string().replace(' ', "");
    let kind = match rendered.as_str() {
        "bool" => ParsedKind::Bool,
        "i8" => ParsedKind::Int8,
        "i16" => ParsedKind::Int16,
        "i32" => ParsedKind::Int32,
        "i64" => ParsedKind::Int64,
        "isize" => ParsedKind::ISize,
        "u8" => ParsedKind::UInt8,
        "u16" => ParsedKind::UInt16,
        "u32" => ParsedKind::UInt32,
        "u64" => ParsedKind::UInt64,
        "usize" => ParsedKind::USize,
        "f32" => ParsedKind::Float32,
        "f64" => ParsedKind::Float64,
        "String" => ParsedKind::Text,
        "Vec<u8>" => ParsedKind::Bytes,
        "Vec<i8>" => ParsedKind::Seq(ParsedElem::Int8),
        "Vec<i16>" => ParsedKind::Seq(ParsedElem::Int16),
        "Vec<i32>" => ParsedKind::Seq(ParsedElem::Int32),
        "Vec<i64>" => ParsedKind::Seq(ParsedElem::Int64),
        "Vec<u16>" => ParsedKind::Seq(ParsedElem::UInt16),
        "Vec<u32>" => ParsedKind::Seq(ParsedElem::UInt32),
        "Vec<u64>" => ParsedKind::Seq(ParsedElem::UInt64),
        "Vec<f32>" => ParsedKind::Seq(ParsedElem::Float32),
        "Vec<f64>" => ParsedKind::Seq(ParsedElem::Float64),
        "Vec<String>" => ParsedKind::Seq(ParsedElem::Text),
        "DateTime<Utc>" | "chrono::DateTime<Utc>" | "chrono::DateTime<chrono::Utc>" => {
            ParsedKind::Timestamp
        }
        "Hstore" | "pg_dialect::Hstore" | "rowbridge::Hstore" => ParsedKind::Hstore,
        _ => return None,
    };
    Some(kind)
}

/// Convert a lower-case, underscore-delimited field name to the logical
/// naming convention used for column matching.
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
