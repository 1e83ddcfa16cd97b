// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Variant record values.

use super::{DataElement, EnumeratedDataElement};
use crate::types::{Handle, VariantRecordDataType};

/// Discriminant plus the currently selected alternative.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecordDataElement {
    pub(crate) data_type: Handle<VariantRecordDataType>,
    pub(crate) index_in_parent: Option<usize>,
    pub(crate) discriminant: Option<EnumeratedDataElement>,
    pub(crate) alternative: Option<(usize, Box<DataElement>)>,
}

impl VariantRecordDataElement {
    pub fn data_type(&self) -> Handle<VariantRecordDataType> {
        self.data_type
    }

    /// `None` when the discriminant type did not resolve at creation time.
    pub fn discriminant(&self) -> Option<&EnumeratedDataElement> {
        self.discriminant.as_ref()
    }

    /// Payload of the last decoded alternative.
    pub fn alternative(&self) -> Option<&DataElement> {
        self.alternative.as_ref().map(|(_, element)| element.as_ref())
    }

    pub fn alternative_mut(&mut self) -> Option<&mut DataElement> {
        self.alternative.as_mut().map(|(_, element)| element.as_mut())
    }

    /// Index of the active alternative within the variant record type.
    pub fn alternative_index(&self) -> Option<usize> {
        self.alternative.as_ref().map(|(index, _)| *index)
    }
}
