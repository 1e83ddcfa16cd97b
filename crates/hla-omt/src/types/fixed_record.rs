// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fixed record data types.

use super::list::{Handle, ListEntry};
use super::DataTypeId;

/// Named member of a fixed record.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    data_type: Option<DataTypeId>,
    semantics: String,
    index: usize,
}

impl Field {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn data_type(&self) -> Option<DataTypeId> {
        self.data_type
    }

    pub fn set_data_type(&mut self, data_type: Option<DataTypeId>) -> &mut Self {
        self.data_type = data_type;
        self
    }

    pub fn semantics(&self) -> &str {
        &self.semantics
    }

    pub fn set_semantics(&mut self, semantics: impl Into<String>) -> &mut Self {
        self.semantics = semantics.into();
        self
    }

    /// Declaration position within the record.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Ordered heterogeneous record; fields are encoded back to back.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedRecordDataType {
    handle: Handle<FixedRecordDataType>,
    index_in_list: Option<usize>,
    name: String,
    fields: Vec<Field>,
    encoding: String,
    semantics: String,
}

impl ListEntry for FixedRecordDataType {
    const KIND: &'static str = "fixedRecord";

    fn with_handle(handle: Handle<Self>) -> Self {
        Self {
            handle,
            index_in_list: None,
            name: String::new(),
            fields: Vec::new(),
            encoding: String::new(),
            semantics: String::new(),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_index_in_list(&mut self, index: Option<usize>) {
        self.index_in_list = index;
    }
}

super::impl_common_accessors!(FixedRecordDataType);

impl FixedRecordDataType {
    /// Append a new field at the end of the record.
    pub fn create_field(&mut self) -> &mut Field {
        let index = self.fields.len();
        self.fields.push(Field {
            name: String::new(),
            data_type: None,
            semantics: String::new(),
            index,
        });
        &mut self.fields[index]
    }

    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    pub fn field(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    pub fn field_mut(&mut self, index: usize) -> Option<&mut Field> {
        self.fields.get_mut(index)
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    pub fn set_encoding(&mut self, encoding: impl Into<String>) -> &mut Self {
        self.encoding = encoding.into();
        self
    }

    pub fn semantics(&self) -> &str {
        &self.semantics
    }

    pub fn set_semantics(&mut self, semantics: impl Into<String>) -> &mut Self {
        self.semantics = semantics.into();
        self
    }
}
