// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! String values (array data types flagged as string).

use crate::types::{ArrayDataType, Handle};

/// Decoded character sequence; no per-character child elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringDataElement {
    pub(crate) data_type: Handle<ArrayDataType>,
    pub(crate) index_in_parent: Option<usize>,
    pub(crate) code_units: Vec<u32>,
}

impl StringDataElement {
    pub(crate) fn new(data_type: Handle<ArrayDataType>) -> Self {
        Self {
            data_type,
            index_in_parent: None,
            code_units: Vec::new(),
        }
    }

    pub fn data_type(&self) -> Handle<ArrayDataType> {
        self.data_type
    }

    /// Raw code units as read from the wire.
    pub fn code_units(&self) -> &[u32] {
        &self.code_units
    }

    pub fn len(&self) -> usize {
        self.code_units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code_units.is_empty()
    }

    /// Text view of the code units.
    ///
    /// Units that all fit 16 bits are treated as UTF-16 (so 8-bit ASCII and
    /// surrogate pairs both work); wider units are Unicode scalar values.
    /// Invalid units become U+FFFD.
    pub fn value(&self) -> String {
        if self.code_units.iter().all(|&u| u <= 0xFFFF) {
            let units: Vec<u16> = self.code_units.iter().map(|&u| u as u16).collect();
            String::from_utf16_lossy(&units)
        } else {
            self.code_units
                .iter()
                .map(|&u| char::from_u32(u).unwrap_or(char::REPLACEMENT_CHARACTER))
                .collect()
        }
    }
}
