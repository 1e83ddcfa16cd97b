// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Enumerated values.

use crate::types::{EnumeratedDataType, Enumerator, Handle, TypeRegistry};

/// Numeric value of an enumerated data type.
///
/// The value is not checked against the declared enumerators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumeratedDataElement {
    pub(crate) data_type: Handle<EnumeratedDataType>,
    pub(crate) index_in_parent: Option<usize>,
    pub(crate) numeric_value: i64,
}

impl EnumeratedDataElement {
    pub(crate) fn new(data_type: Handle<EnumeratedDataType>) -> Self {
        Self {
            data_type,
            index_in_parent: None,
            numeric_value: 0,
        }
    }

    pub fn data_type(&self) -> Handle<EnumeratedDataType> {
        self.data_type
    }

    /// Position among siblings; a variant record discriminant sits at 0.
    pub fn index_in_parent(&self) -> Option<usize> {
        self.index_in_parent
    }

    pub fn numeric_value(&self) -> i64 {
        self.numeric_value
    }

    pub fn set_numeric_value(&mut self, value: i64) {
        self.numeric_value = value;
    }

    /// Enumerator matching the current value, if any.
    pub fn enumerator<'r>(&self, registry: &'r TypeRegistry) -> Option<&'r Enumerator> {
        registry
            .enumerated_data_types()
            .get(self.data_type)?
            .enumerator_for_value(self.numeric_value)
    }

    pub fn enumerator_name<'r>(&self, registry: &'r TypeRegistry) -> Option<&'r str> {
        self.enumerator(registry).map(Enumerator::name)
    }
}
