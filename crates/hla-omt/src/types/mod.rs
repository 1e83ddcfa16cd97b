// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Data type model.
//!
//! Six concrete kinds, each owned by its own [`DataTypeList`]:
//!
//! | Kind | Wire form |
//! |------|-----------|
//! | [`BasicDataType`] | fixed-width integer or float |
//! | [`SimpleDataType`] | same as its basic representation |
//! | [`EnumeratedDataType`] | same as its basic representation |
//! | [`ArrayDataType`] | optional BE `u32` count, then elements |
//! | [`FixedRecordDataType`] | fields back to back |
//! | [`VariantRecordDataType`] | discriminant, then the selected alternative |
//!
//! Cross references between types are [`DataTypeId`]s (kind tag + stable
//! handle), so a [`TypeRegistry`] can be freely borrowed while elements and
//! other types point into it.

/// Handle, name and display index accessors shared by every kind.
macro_rules! impl_common_accessors {
    ($ty:ident) => {
        impl $ty {
            /// Stable handle within the owning list.
            pub fn handle(&self) -> Handle<$ty> {
                self.handle
            }

            pub fn name(&self) -> &str {
                &self.name
            }

            pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
                self.name = name.into();
                self
            }

            /// Dense display index, `None` once erased.
            pub fn index_in_list(&self) -> Option<usize> {
                self.index_in_list
            }
        }
    };
}
pub(crate) use impl_common_accessors;

pub mod array;
pub mod basic;
pub mod enumerated;
pub mod fixed_record;
pub mod list;
mod standard;
pub mod simple;
pub mod variant_record;

use std::fmt;

pub use array::{ArrayDataType, Cardinality};
pub use basic::{BasicDataType, Endianness, NumericKind};
pub use enumerated::{EnumeratedDataType, Enumerator};
pub use fixed_record::{Field, FixedRecordDataType};
pub use list::{DataTypeList, Handle, ListEntry};
pub use simple::SimpleDataType;
pub use variant_record::{Alternative, VariantRecordDataType, OTHER_ENUMERATOR};

use crate::config::DEFAULT_MAX_NESTING_DEPTH;
use crate::element::DataElement;

/// Kind tag of a data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataTypeKind {
    Basic,
    Simple,
    Enumerated,
    Array,
    FixedRecord,
    VariantRecord,
}

impl DataTypeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => BasicDataType::KIND,
            Self::Simple => SimpleDataType::KIND,
            Self::Enumerated => EnumeratedDataType::KIND,
            Self::Array => ArrayDataType::KIND,
            Self::FixedRecord => FixedRecordDataType::KIND,
            Self::VariantRecord => VariantRecordDataType::KIND,
        }
    }
}

impl fmt::Display for DataTypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Reference to a data type of any kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataTypeId {
    Basic(Handle<BasicDataType>),
    Simple(Handle<SimpleDataType>),
    Enumerated(Handle<EnumeratedDataType>),
    Array(Handle<ArrayDataType>),
    FixedRecord(Handle<FixedRecordDataType>),
    VariantRecord(Handle<VariantRecordDataType>),
}

impl DataTypeId {
    pub fn kind(self) -> DataTypeKind {
        match self {
            Self::Basic(_) => DataTypeKind::Basic,
            Self::Simple(_) => DataTypeKind::Simple,
            Self::Enumerated(_) => DataTypeKind::Enumerated,
            Self::Array(_) => DataTypeKind::Array,
            Self::FixedRecord(_) => DataTypeKind::FixedRecord,
            Self::VariantRecord(_) => DataTypeKind::VariantRecord,
        }
    }
}

macro_rules! impl_from_handle {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<Handle<$ty>> for DataTypeId {
                fn from(handle: Handle<$ty>) -> Self {
                    Self::$variant(handle)
                }
            }
        )*
    };
}

impl_from_handle! {
    Basic => BasicDataType,
    Simple => SimpleDataType,
    Enumerated => EnumeratedDataType,
    Array => ArrayDataType,
    FixedRecord => FixedRecordDataType,
    VariantRecord => VariantRecordDataType,
}

/// Borrowed data type of any kind; match on it to branch per kind.
#[derive(Debug, Clone, Copy)]
pub enum DataTypeRef<'a> {
    Basic(&'a BasicDataType),
    Simple(&'a SimpleDataType),
    Enumerated(&'a EnumeratedDataType),
    Array(&'a ArrayDataType),
    FixedRecord(&'a FixedRecordDataType),
    VariantRecord(&'a VariantRecordDataType),
}

impl<'a> DataTypeRef<'a> {
    pub fn name(self) -> &'a str {
        match self {
            Self::Basic(t) => t.name(),
            Self::Simple(t) => t.name(),
            Self::Enumerated(t) => t.name(),
            Self::Array(t) => t.name(),
            Self::FixedRecord(t) => t.name(),
            Self::VariantRecord(t) => t.name(),
        }
    }

    pub fn id(self) -> DataTypeId {
        match self {
            Self::Basic(t) => t.handle().into(),
            Self::Simple(t) => t.handle().into(),
            Self::Enumerated(t) => t.handle().into(),
            Self::Array(t) => t.handle().into(),
            Self::FixedRecord(t) => t.handle().into(),
            Self::VariantRecord(t) => t.handle().into(),
        }
    }

    pub fn kind(self) -> DataTypeKind {
        self.id().kind()
    }

    pub fn index_in_list(self) -> Option<usize> {
        match self {
            Self::Basic(t) => t.index_in_list(),
            Self::Simple(t) => t.index_in_list(),
            Self::Enumerated(t) => t.index_in_list(),
            Self::Array(t) => t.index_in_list(),
            Self::FixedRecord(t) => t.index_in_list(),
            Self::VariantRecord(t) => t.index_in_list(),
        }
    }
}

/// Generate per-kind create/lookup/list accessors on [`TypeRegistry`].
macro_rules! impl_registry_kind {
    ($field:ident, $ty:ty, $create:ident, $get:ident, $list:ident, $list_mut:ident) => {
        impl TypeRegistry {
            /// Append a fresh, empty instance; the caller fills it in.
            pub fn $create(&mut self) -> &mut $ty {
                self.$field.create_data_type()
            }

            pub fn $get(&self, name: &str) -> Option<&$ty> {
                self.$field.get_data_type(name)
            }

            pub fn $list(&self) -> &DataTypeList<$ty> {
                &self.$field
            }

            pub fn $list_mut(&mut self) -> &mut DataTypeList<$ty> {
                &mut self.$field
            }
        }
    };
}

/// Owner of every data type of an object model.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    basic: DataTypeList<BasicDataType>,
    simple: DataTypeList<SimpleDataType>,
    enumerated: DataTypeList<EnumeratedDataType>,
    array: DataTypeList<ArrayDataType>,
    fixed_record: DataTypeList<FixedRecordDataType>,
    variant_record: DataTypeList<VariantRecordDataType>,
}

impl_registry_kind!(basic, BasicDataType, create_basic_data_type, get_basic_data_type, basic_data_types, basic_data_types_mut);
impl_registry_kind!(simple, SimpleDataType, create_simple_data_type, get_simple_data_type, simple_data_types, simple_data_types_mut);
impl_registry_kind!(enumerated, EnumeratedDataType, create_enumerated_data_type, get_enumerated_data_type, enumerated_data_types, enumerated_data_types_mut);
impl_registry_kind!(array, ArrayDataType, create_array_data_type, get_array_data_type, array_data_types, array_data_types_mut);
impl_registry_kind!(fixed_record, FixedRecordDataType, create_fixed_record_data_type, get_fixed_record_data_type, fixed_record_data_types, fixed_record_data_types_mut);
impl_registry_kind!(variant_record, VariantRecordDataType, create_variant_record_data_type, get_variant_record_data_type, variant_record_data_types, variant_record_data_types_mut);

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look a name up across all kinds.
    ///
    /// Kinds are searched in the order basic, simple, enumerated, array,
    /// fixed record, variant record; the first hit wins.
    pub fn get_data_type(&self, name: &str) -> Option<DataTypeId> {
        self.basic
            .get_data_type(name)
            .map(|t| t.handle().into())
            .or_else(|| self.simple.get_data_type(name).map(|t| t.handle().into()))
            .or_else(|| self.enumerated.get_data_type(name).map(|t| t.handle().into()))
            .or_else(|| self.array.get_data_type(name).map(|t| t.handle().into()))
            .or_else(|| self.fixed_record.get_data_type(name).map(|t| t.handle().into()))
            .or_else(|| self.variant_record.get_data_type(name).map(|t| t.handle().into()))
    }

    /// Borrow the data type behind `id`, `None` if it was erased.
    pub fn resolve(&self, id: DataTypeId) -> Option<DataTypeRef<'_>> {
        Some(match id {
            DataTypeId::Basic(h) => DataTypeRef::Basic(self.basic.get(h)?),
            DataTypeId::Simple(h) => DataTypeRef::Simple(self.simple.get(h)?),
            DataTypeId::Enumerated(h) => DataTypeRef::Enumerated(self.enumerated.get(h)?),
            DataTypeId::Array(h) => DataTypeRef::Array(self.array.get(h)?),
            DataTypeId::FixedRecord(h) => DataTypeRef::FixedRecord(self.fixed_record.get(h)?),
            DataTypeId::VariantRecord(h) => DataTypeRef::VariantRecord(self.variant_record.get(h)?),
        })
    }

    pub fn name_of(&self, id: DataTypeId) -> Option<&str> {
        self.resolve(id).map(DataTypeRef::name)
    }

    /// Remove a data type. References to it elsewhere become dangling and
    /// resolve to nothing.
    pub fn erase_data_type(&mut self, id: DataTypeId) -> bool {
        match id {
            DataTypeId::Basic(h) => self.basic.erase_data_type(h).is_some(),
            DataTypeId::Simple(h) => self.simple.erase_data_type(h).is_some(),
            DataTypeId::Enumerated(h) => self.enumerated.erase_data_type(h).is_some(),
            DataTypeId::Array(h) => self.array.erase_data_type(h).is_some(),
            DataTypeId::FixedRecord(h) => self.fixed_record.erase_data_type(h).is_some(),
            DataTypeId::VariantRecord(h) => self.variant_record.erase_data_type(h).is_some(),
        }
    }

    /// Every data type, kind by kind, each kind in display index order.
    pub fn iter(&self) -> impl Iterator<Item = DataTypeRef<'_>> {
        self.basic
            .iter()
            .map(DataTypeRef::Basic)
            .chain(self.simple.iter().map(DataTypeRef::Simple))
            .chain(self.enumerated.iter().map(DataTypeRef::Enumerated))
            .chain(self.array.iter().map(DataTypeRef::Array))
            .chain(self.fixed_record.iter().map(DataTypeRef::FixedRecord))
            .chain(self.variant_record.iter().map(DataTypeRef::VariantRecord))
    }

    pub fn len(&self) -> usize {
        self.basic.len()
            + self.simple.len()
            + self.enumerated.len()
            + self.array.len()
            + self.fixed_record.len()
            + self.variant_record.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Natural byte alignment of a value of type `id`.
    ///
    /// Unresolved references (and type graphs nested deeper than the
    /// default limit) count as alignment 1.
    pub fn alignment(&self, id: DataTypeId) -> usize {
        self.alignment_at(id, 0, DEFAULT_MAX_NESTING_DEPTH)
    }

    pub(crate) fn alignment_at(&self, id: DataTypeId, depth: usize, max_depth: usize) -> usize {
        if depth >= max_depth {
            return 1;
        }
        let Some(ty) = self.resolve(id) else {
            return 1;
        };
        let next = depth + 1;
        match ty {
            DataTypeRef::Basic(basic) => basic.alignment(),
            DataTypeRef::Simple(simple) => self.basic_alignment(simple.representation()),
            DataTypeRef::Enumerated(enumerated) => {
                self.basic_alignment(enumerated.representation())
            }
            DataTypeRef::Array(array) => {
                let element = array
                    .element_type()
                    .map_or(1, |e| self.alignment_at(e, next, max_depth));
                if array.cardinality().is_dynamic() {
                    element.max(4)
                } else {
                    element
                }
            }
            DataTypeRef::FixedRecord(record) => record
                .fields()
                .iter()
                .filter_map(Field::data_type)
                .map(|f| self.alignment_at(f, next, max_depth))
                .max()
                .unwrap_or(1),
            DataTypeRef::VariantRecord(variant) => {
                let discriminant = variant
                    .discriminant_type()
                    .map_or(1, |d| self.alignment_at(d.into(), next, max_depth));
                variant
                    .alternatives()
                    .iter()
                    .filter_map(Alternative::data_type)
                    .map(|a| self.alignment_at(a, next, max_depth))
                    .fold(discriminant, usize::max)
            }
        }
    }

    fn basic_alignment(&self, representation: Option<Handle<BasicDataType>>) -> usize {
        representation
            .and_then(|h| self.basic.get(h))
            .map_or(1, BasicDataType::alignment)
    }

    /// Smallest number of bytes any value of type `id` occupies, ignoring
    /// padding. Dynamic arrays count their 4-byte length prefix only.
    pub fn min_encoded_size(&self, id: DataTypeId) -> usize {
        self.min_encoded_size_at(id, 0, DEFAULT_MAX_NESTING_DEPTH)
    }

    pub(crate) fn min_encoded_size_at(&self, id: DataTypeId, depth: usize, max_depth: usize) -> usize {
        if depth >= max_depth {
            return 0;
        }
        let Some(ty) = self.resolve(id) else {
            return 0;
        };
        let next = depth + 1;
        match ty {
            DataTypeRef::Basic(basic) => basic.encoded_size(),
            DataTypeRef::Simple(simple) => self.basic_size(simple.representation()),
            DataTypeRef::Enumerated(enumerated) => self.basic_size(enumerated.representation()),
            DataTypeRef::Array(array) => match array.cardinality() {
                Cardinality::Dynamic => 4,
                Cardinality::Fixed(n) => array.element_type().map_or(0, |e| {
                    n.saturating_mul(self.min_encoded_size_at(e, next, max_depth))
                }),
            },
            DataTypeRef::FixedRecord(record) => record
                .fields()
                .iter()
                .filter_map(Field::data_type)
                .map(|f| self.min_encoded_size_at(f, next, max_depth))
                .fold(0, usize::saturating_add),
            DataTypeRef::VariantRecord(variant) => variant
                .discriminant_type()
                .map_or(0, |d| self.min_encoded_size_at(d.into(), next, max_depth)),
        }
    }

    fn basic_size(&self, representation: Option<Handle<BasicDataType>>) -> usize {
        representation
            .and_then(|h| self.basic.get(h))
            .map_or(0, BasicDataType::encoded_size)
    }

    /// Instantiate a value node bound to `id`.
    ///
    /// Returns `None` if `id` does not resolve, or if an array type is
    /// flagged as string but is otherwise unusable.
    pub fn create_data_element(&self, id: DataTypeId) -> Option<DataElement> {
        DataElement::create(self, id)
    }
}
