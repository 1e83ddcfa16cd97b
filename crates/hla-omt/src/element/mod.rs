// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime value tree.
//!
//! A [`DataElement`] is created from one data type and stays bound to it for
//! its whole life. Decoding mutates the tree in place; composite nodes own
//! their children.

mod array;
mod enumerated;
mod fixed_record;
mod scalar;
mod string;
mod variant_record;

pub use array::ArrayDataElement;
pub use enumerated::EnumeratedDataElement;
pub use fixed_record::FixedRecordDataElement;
pub use scalar::{ScalarDataElement, ScalarValue};
pub use string::StringDataElement;
pub use variant_record::VariantRecordDataElement;

use crate::config::DEFAULT_MAX_NESTING_DEPTH;
use crate::decode::Decoder;
use crate::error::DecodeResult;
use crate::types::{DataTypeId, DataTypeRef, TypeRegistry};

/// Value node of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum DataElement {
    Scalar(ScalarDataElement),
    String(StringDataElement),
    Array(ArrayDataElement),
    FixedRecord(FixedRecordDataElement),
    Enumerated(EnumeratedDataElement),
    VariantRecord(VariantRecordDataElement),
}

/// Generate `as_*`/`as_*_mut` accessors for each variant.
macro_rules! impl_as_variant {
    ($($variant:ident: $ty:ty => $as:ident, $as_mut:ident;)*) => {
        impl DataElement {
            $(
                pub fn $as(&self) -> Option<&$ty> {
                    match self {
                        Self::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }

                pub fn $as_mut(&mut self) -> Option<&mut $ty> {
                    match self {
                        Self::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            )*
        }
    };
}

impl_as_variant! {
    Scalar: ScalarDataElement => as_scalar, as_scalar_mut;
    String: StringDataElement => as_string, as_string_mut;
    Array: ArrayDataElement => as_array, as_array_mut;
    FixedRecord: FixedRecordDataElement => as_fixed_record, as_fixed_record_mut;
    Enumerated: EnumeratedDataElement => as_enumerated, as_enumerated_mut;
    VariantRecord: VariantRecordDataElement => as_variant_record, as_variant_record_mut;
}

impl DataElement {
    /// Instantiate a node for `id`; `None` if the type does not resolve.
    pub fn create(registry: &TypeRegistry, id: DataTypeId) -> Option<Self> {
        Self::create_at(registry, id, 0, DEFAULT_MAX_NESTING_DEPTH)
    }

    pub(crate) fn create_at(
        registry: &TypeRegistry,
        id: DataTypeId,
        depth: usize,
        max_depth: usize,
    ) -> Option<Self> {
        if depth >= max_depth {
            tracing::debug!(depth, "data element nesting too deep");
            return None;
        }
        let element = match registry.resolve(id)? {
            DataTypeRef::Basic(_) | DataTypeRef::Simple(_) => {
                Self::Scalar(ScalarDataElement::new(id))
            }
            DataTypeRef::Enumerated(enumerated) => {
                Self::Enumerated(EnumeratedDataElement::new(enumerated.handle()))
            }
            DataTypeRef::Array(array) if array.is_string() => {
                Self::String(StringDataElement::new(array.handle()))
            }
            DataTypeRef::Array(array) => Self::Array(ArrayDataElement::new(array.handle())),
            DataTypeRef::FixedRecord(record) => {
                let fields = record
                    .fields()
                    .iter()
                    .map(|field| {
                        let mut child = Self::create_at(registry, field.data_type()?, depth + 1, max_depth)?;
                        child.set_index_in_parent(Some(field.index()));
                        Some(child)
                    })
                    .collect();
                Self::FixedRecord(FixedRecordDataElement {
                    data_type: record.handle(),
                    index_in_parent: None,
                    fields,
                })
            }
            DataTypeRef::VariantRecord(variant) => {
                let discriminant = variant
                    .discriminant_type()
                    .filter(|&h| registry.enumerated_data_types().get(h).is_some())
                    .map(|h| EnumeratedDataElement {
                        index_in_parent: Some(0),
                        ..EnumeratedDataElement::new(h)
                    });
                Self::VariantRecord(VariantRecordDataElement {
                    data_type: variant.handle(),
                    index_in_parent: None,
                    discriminant,
                    alternative: None,
                })
            }
        };
        Some(element)
    }

    /// The data type this node was created from.
    pub fn data_type(&self) -> DataTypeId {
        match self {
            Self::Scalar(e) => e.data_type,
            Self::String(e) => e.data_type.into(),
            Self::Array(e) => e.data_type.into(),
            Self::FixedRecord(e) => e.data_type.into(),
            Self::Enumerated(e) => e.data_type.into(),
            Self::VariantRecord(e) => e.data_type.into(),
        }
    }

    /// Position among siblings, `None` for a root node.
    pub fn index_in_parent(&self) -> Option<usize> {
        match self {
            Self::Scalar(e) => e.index_in_parent,
            Self::String(e) => e.index_in_parent,
            Self::Array(e) => e.index_in_parent,
            Self::FixedRecord(e) => e.index_in_parent,
            Self::Enumerated(e) => e.index_in_parent,
            Self::VariantRecord(e) => e.index_in_parent,
        }
    }

    pub(crate) fn set_index_in_parent(&mut self, index: Option<usize>) {
        match self {
            Self::Scalar(e) => e.index_in_parent = index,
            Self::String(e) => e.index_in_parent = index,
            Self::Array(e) => e.index_in_parent = index,
            Self::FixedRecord(e) => e.index_in_parent = index,
            Self::Enumerated(e) => e.index_in_parent = index,
            Self::VariantRecord(e) => e.index_in_parent = index,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::FixedRecord(_) => "fixedRecord",
            Self::Enumerated(_) => "enumerated",
            Self::VariantRecord(_) => "variantRecord",
        }
    }

    /// Decode `buffer` from `pos` into this node with the default
    /// configuration; returns the position after the value.
    pub fn decode(&mut self, registry: &TypeRegistry, buffer: &[u8], pos: usize) -> DecodeResult<usize> {
        Decoder::new(registry).decode(self, buffer, pos)
    }
}
