//! Record code generation
//!
//! Generates the `Record` implementation from parsed field specs: a static
//! field descriptor table, one setter function per field implementing that
//! kind's decode rule, and a compile-time logical-name lookup.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::Ident;

use crate::parsing::{FieldSpec, ParsedElem, ParsedKind, RecordInfo};

pub fn generate_record_impl(
    name: &Ident,
    record_info: &RecordInfo,
    fields: &[FieldSpec],
) -> TokenStream {
    let setters: Vec<TokenStream> = fields
        .iter()
        .map(|field| generate_setter(name, field))
        .collect();

    let descriptors: Vec<TokenStream> = fields
        .iter()
        .map(|field| {
            let logical_name = &field.logical_name;
            let kind = kind_tokens(field.kind);
            let size = field.size;
            let primary_key = field.primary_key;
            let setter = setter_ident(&field.ident);
            quote! {
                row_fetch::FieldDescriptor {
                    name: #logical_name,
                    kind: #kind,
                    size: #size,
                    primary_key: #primary_key,
                    set: #setter,
                }
            }
        })
        .collect();

    let lookup_arms: Vec<TokenStream> = fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let logical_name = &field.logical_name;
            quote! { #logical_name => Some(#index), }
        })
        .collect();

    let on_loaded_impl = if record_info.after_load {
        quote! {
            fn on_loaded(&mut self) {
                self.after_load();
            }
        }
    } else {
        quote! {}
    };

    quote! {
        impl row_fetch::Record for #name {
            fn fields() -> &'static [row_fetch::FieldDescriptor<Self>] {
                #(#setters)*

                static FIELDS: &[row_fetch::FieldDescriptor<#name>] = &[
                    #(#descriptors),*
                ];
                FIELDS
            }

            fn field_index(name: &str) -> Option<usize> {
                match name {
                    #(#lookup_arms)*
                    _ => None,
                }
            }

            #on_loaded_impl
        }
    }
}

fn setter_ident(field: &Ident) -> Ident {
    format_ident!("set_{}", field)
}

/// Generate the setter for one field. Every setter leaves the field at its
/// default value for SQL NULL and rejects mismatched variants.
fn generate_setter(name: &Ident, field: &FieldSpec) -> TokenStream {
    let setter = setter_ident(&field.ident);
    let ident = &field.ident;

    let body = match field.kind {
        ParsedKind::Bool => quote! {
            match value {
                pg_dialect::PgValue::Null => Ok(()),
                pg_dialect::PgValue::Bool(v) => {
                    record.#ident = v;
                    Ok(())
                }
                other => Err(pg_dialect::DialectError::mismatch("boolean", other.kind_name())),
            }
        },
        ParsedKind::Int8
        | ParsedKind::Int16
        | ParsedKind::Int32
        | ParsedKind::Int64
        | ParsedKind::ISize
        | ParsedKind::UInt8
        | ParsedKind::UInt16
        | ParsedKind::UInt32
        | ParsedKind::UInt64
        | ParsedKind::USize => {
            let ty = integer_type_tokens(field.kind);
            quote! {
                match value {
                    pg_dialect::PgValue::Null => Ok(()),
                    pg_dialect::PgValue::Int(v) => {
                        record.#ident = v as #ty;
                        Ok(())
                    }
                    other => Err(pg_dialect::DialectError::mismatch("integer", other.kind_name())),
                }
            }
        }
        ParsedKind::Float32 | ParsedKind::Float64 => {
            let ty = if field.kind == ParsedKind::Float32 {
                quote!(f32)
            } else {
                quote!(f64)
            };
            quote! {
                match value {
                    pg_dialect::PgValue::Null => Ok(()),
                    pg_dialect::PgValue::Float(v) => {
                        record.#ident = v as #ty;
                        Ok(())
                    }
                    pg_dialect::PgValue::Int(v) => {
                        record.#ident = v as #ty;
                        Ok(())
                    }
                    other => Err(pg_dialect::DialectError::mismatch("float", other.kind_name())),
                }
            }
        }
        ParsedKind::Text => quote! {
            match value {
                pg_dialect::PgValue::Null => Ok(()),
                pg_dialect::PgValue::Text(v) => {
                    record.#ident = v;
                    Ok(())
                }
                other => Err(pg_dialect::DialectError::mismatch("text", other.kind_name())),
            }
        },
        ParsedKind::Bytes => quote! {
            match value {
                pg_dialect::PgValue::Null => Ok(()),
                pg_dialect::PgValue::Bytes(v) => {
                    record.#ident = v;
                    Ok(())
                }
                other => Err(pg_dialect::DialectError::mismatch("bytes", other.kind_name())),
            }
        },
        ParsedKind::Timestamp => quote! {
            match value {
                pg_dialect::PgValue::Null => Ok(()),
                pg_dialect::PgValue::Timestamp(v) => {
                    record.#ident = v;
                    Ok(())
                }
                other => Err(pg_dialect::DialectError::mismatch("timestamp", other.kind_name())),
            }
        },
        // The map value's own unmarshal contract owns the decode rules,
        // including NULL and empty-parse handling.
        ParsedKind::Hstore => quote! {
            record.#ident.scan(&value)
        },
        ParsedKind::Seq(ParsedElem::Text) => quote! {
            match value {
                pg_dialect::PgValue::Null => Ok(()),
                pg_dialect::PgValue::TextSeq(items) => {
                    record.#ident = items;
                    Ok(())
                }
                other => Err(pg_dialect::DialectError::mismatch(
                    "text sequence",
                    other.kind_name(),
                )),
            }
        },
        ParsedKind::Seq(ParsedElem::Float32) | ParsedKind::Seq(ParsedElem::Float64) => {
            let ty = if field.kind == ParsedKind::Seq(ParsedElem::Float32) {
                quote!(f32)
            } else {
                quote!(f64)
            };
            quote! {
                match value {
                    pg_dialect::PgValue::Null => Ok(()),
                    pg_dialect::PgValue::FloatSeq(items) => {
                        let mut out = Vec::with_capacity(items.len());
                        for item in items {
                            out.push(item as #ty);
                        }
                        record.#ident = out;
                        Ok(())
                    }
                    other => Err(pg_dialect::DialectError::mismatch(
                        "float sequence",
                        other.kind_name(),
                    )),
                }
            }
        }
        ParsedKind::Seq(elem) => {
            let ty = integer_elem_tokens(elem);
            quote! {
                match value {
                    pg_dialect::PgValue::Null => Ok(()),
                    pg_dialect::PgValue::IntSeq(items) => {
                        let mut out = Vec::with_capacity(items.len());
                        for item in items {
                            out.push(item as #ty);
                        }
                        record.#ident = out;
                        Ok(())
                    }
                    other => Err(pg_dialect::DialectError::mismatch(
                        "integer sequence",
                        other.kind_name(),
                    )),
                }
            }
        }
    };

    quote! {
        fn #setter(
            record: &mut #name,
            value: pg_dialect::PgValue,
        ) -> Result<(), pg_dialect::DialectError> {
            #body
        }
    }
}

fn kind_tokens(kind: ParsedKind) -> TokenStream {
    match kind {
        ParsedKind::Bool => quote!(pg_dialect::FieldKind::Bool),
        ParsedKind::Int8 => quote!(pg_dialect::FieldKind::Int8),
        ParsedKind::Int16 => quote!(pg_dialect::FieldKind::Int16),
        ParsedKind::Int32 => quote!(pg_dialect::FieldKind::Int32),
        ParsedKind::Int64 => quote!(pg_dialect::FieldKind::Int64),
        ParsedKind::ISize => quote!(pg_dialect::FieldKind::ISize),
        ParsedKind::UInt8 => quote!(pg_dialect::FieldKind::UInt8),
        ParsedKind::UInt16 => quote!(pg_dialect::FieldKind::UInt16),
        ParsedKind::UInt32 => quote!(pg_dialect::FieldKind::UInt32),
        ParsedKind::UInt64 => quote!(pg_dialect::FieldKind::UInt64),
        ParsedKind::USize => quote!(pg_dialect::FieldKind::USize),
        ParsedKind::Float32 => quote!(pg_dialect::FieldKind::Float32),
        ParsedKind::Float64 => quote!(pg_dialect::FieldKind::Float64),
        ParsedKind::Text => quote!(pg_dialect::FieldKind::Text),
        ParsedKind::Bytes => quote!(pg_dialect::FieldKind::Bytes),
        ParsedKind::Timestamp => quote!(pg_dialect::FieldKind::Timestamp),
        ParsedKind::Hstore => quote!(pg_dialect::FieldKind::Hstore),
        ParsedKind::Seq(elem) => {
            let elem = elem_tokens(elem);
            quote!(pg_dialect::FieldKind::Seq(#elem))
        }
    }
}

fn elem_tokens(elem: ParsedElem) -> TokenStream {
    match elem {
        ParsedElem::Int8 => quote!(pg_dialect::ElemKind::Int8),
        ParsedElem::Int16 => quote!(pg_dialect::ElemKind::Int16),
        ParsedElem::Int32 => quote!(pg_dialect::ElemKind::Int32),
        ParsedElem::Int64 => quote!(pg_dialect::ElemKind::Int64),
        ParsedElem::UInt8 => quote!(pg_dialect::ElemKind::UInt8),
        ParsedElem::UInt16 => quote!(pg_dialect::ElemKind::UInt16),
        ParsedElem::UInt32 => quote!(pg_dialect::ElemKind::UInt32),
        ParsedElem::UInt64 => quote!(pg_dialect::ElemKind::UInt64),
        ParsedElem::Float32 => quote!(pg_dialect::ElemKind::Float32),
        ParsedElem::Float64 => quote!(pg_dialect::ElemKind::Float64),
        ParsedElem::Text => quote!(pg_dialect::ElemKind::Text),
    }
}

fn integer_type_tokens(kind: ParsedKind) -> TokenStream {
    match kind {
        ParsedKind::Int8 => quote!(i8),
        ParsedKind::Int16 => quote!(i16),
        ParsedKind::Int32 => quote!(i32),
        ParsedKind::Int64 => quote!(i64),
        ParsedKind::ISize => quote!(isize),
        ParsedKind::UInt8 => quote!(u8),
        ParsedKind::UInt16 => quote!(u16),
        ParsedKind::UInt32 => quote!(u32),
        ParsedKind::UInt64 => quote!(u64),
        ParsedKind::USize => quote!(usize),
        other => unreachable!("not an integer kind: {:?}", other),
    }
}

fn integer_elem_tokens(elem: ParsedElem) -> TokenStream {
    match elem {
        ParsedElem::Int8 => quote!(i8),
        ParsedElem::Int16 => quote!(i16),
        ParsedElem::Int32 => quote!(i32),
        ParsedElem::Int64 => quote!(i64),
        ParsedElem::UInt8 => quote!(u8),
        ParsedElem::UInt16 => quote!(u16),
        ParsedElem::UInt32 => quote!(u32),
        ParsedElem::UInt64 => quote!(u64),
        other => unreachable!("not an integer element kind: {:?}", other),
    }
}
