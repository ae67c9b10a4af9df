//! Bindable field kinds
//!
//! The closed set of type categories the binder and schema mapper
//! understand. Every destination field declares exactly one of these; there
//! is no fallthrough category.

use serde::{Deserialize, Serialize};

/// Element type of a sequence-valued field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElemKind {
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

impl ElemKind {
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            ElemKind::Int8
                | ElemKind::Int16
                | ElemKind::Int32
                | ElemKind::Int64
                | ElemKind::UInt8
                | ElemKind::UInt16
                | ElemKind::UInt32
                | ElemKind::UInt64
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, ElemKind::Float32 | ElemKind::Float64)
    }
}

/// Category of a destination field's type, governing how a column value is
/// decoded into it and which column type it maps to in DDL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    /// Pointer-width signed integer (`isize`).
    ISize,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    /// Pointer-width unsigned integer (`usize`).
    USize,
    Float32,
    Float64,
    Text,
    /// Opaque byte buffer (`Vec<u8>`), distinct from integer sequences.
    Bytes,
    Timestamp,
    Hstore,
    /// Ordered sequence of scalar elements, bound via deferred two-phase
    /// decode rather than a direct column bind.
    Seq(ElemKind),
}

impl FieldKind {
    pub fn is_sequence(self) -> bool {
        matches!(self, FieldKind::Seq(_))
    }
}
