// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Array values.

use super::{DataElement, ScalarValue};
use crate::config::DEFAULT_MAX_NESTING_DEPTH;
use crate::error::{DecodeError, DecodeResult};
use crate::types::{ArrayDataType, DataTypeRef, Handle, TypeRegistry};

/// Owned, resizable sequence of child elements.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayDataElement {
    pub(crate) data_type: Handle<ArrayDataType>,
    pub(crate) index_in_parent: Option<usize>,
    pub(crate) elements: Vec<DataElement>,
}

impl ArrayDataElement {
    pub(crate) fn new(data_type: Handle<ArrayDataType>) -> Self {
        Self {
            data_type,
            index_in_parent: None,
            elements: Vec::new(),
        }
    }

    pub fn data_type(&self) -> Handle<ArrayDataType> {
        self.data_type
    }

    pub fn size(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn data_element(&self, index: usize) -> Option<&DataElement> {
        self.elements.get(index)
    }

    pub fn data_element_mut(&mut self, index: usize) -> Option<&mut DataElement> {
        self.elements.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataElement> {
        self.elements.iter()
    }

    /// Grow or shrink to exactly `size` children.
    ///
    /// Surviving children keep their values; new ones are created from the
    /// array's element type.
    pub fn resize(&mut self, registry: &TypeRegistry, size: usize) -> DecodeResult<()> {
        self.resize_at(registry, size, 0, DEFAULT_MAX_NESTING_DEPTH)
    }

    pub(crate) fn resize_at(
        &mut self,
        registry: &TypeRegistry,
        size: usize,
        depth: usize,
        max_depth: usize,
    ) -> DecodeResult<()> {
        if size <= self.elements.len() {
            self.elements.truncate(size);
            return Ok(());
        }
        let element_type = match registry.resolve(self.data_type.into()) {
            Some(DataTypeRef::Array(array)) => array.element_type(),
            _ => None,
        }
        .ok_or(DecodeError::MissingDataType)?;

        if depth + 1 >= max_depth {
            return Err(DecodeError::NestingTooDeep { depth: depth + 1 });
        }
        self.elements.reserve(size - self.elements.len());
        while self.elements.len() < size {
            let mut element = DataElement::create_at(registry, element_type, depth + 1, max_depth)
                .ok_or(DecodeError::MissingDataType)?;
            element.set_index_in_parent(Some(self.elements.len()));
            self.elements.push(element);
        }
        Ok(())
    }

    /// Raw bytes of an octet array, `None` unless every child is an 8-bit scalar.
    pub fn to_bytes(&self) -> Option<Vec<u8>> {
        self.elements
            .iter()
            .map(|element| match element.as_scalar()?.value()? {
                ScalarValue::U8(b) => Some(b),
                ScalarValue::I8(b) => Some(b as u8),
                _ => None,
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a ArrayDataElement {
    type Item = &'a DataElement;
    type IntoIter = std::slice::Iter<'a, DataElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
