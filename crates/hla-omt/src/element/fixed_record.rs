// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fixed record values.

use super::DataElement;
use crate::types::{DataTypeRef, FixedRecordDataType, Handle, TypeRegistry};

/// One child per declared field, created with the record.
///
/// A slot is `None` when the field's data type could not be resolved at
/// creation time; decoding such a record fails.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedRecordDataElement {
    pub(crate) data_type: Handle<FixedRecordDataType>,
    pub(crate) index_in_parent: Option<usize>,
    pub(crate) fields: Vec<Option<DataElement>>,
}

impl FixedRecordDataElement {
    pub fn data_type(&self) -> Handle<FixedRecordDataType> {
        self.data_type
    }

    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    pub fn field(&self, index: usize) -> Option<&DataElement> {
        self.fields.get(index)?.as_ref()
    }

    pub fn field_mut(&mut self, index: usize) -> Option<&mut DataElement> {
        self.fields.get_mut(index)?.as_mut()
    }

    pub fn field_by_name(&self, registry: &TypeRegistry, name: &str) -> Option<&DataElement> {
        let Some(DataTypeRef::FixedRecord(record)) = registry.resolve(self.data_type.into()) else {
            return None;
        };
        self.field(record.field_index(name)?)
    }

    /// Fields in declaration order (`None` for unresolved field types).
    pub fn fields(&self) -> impl Iterator<Item = Option<&DataElement>> {
        self.fields.iter().map(Option::as_ref)
    }
}
