// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Basic (fixed-width numeric) data types.

use super::list::{Handle, ListEntry};

/// Byte order of a basic data type on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endianness {
    Little,
    #[default]
    Big,
}

impl Endianness {
    /// Map an OMT `endian` attribute: `"Little"` is little endian, anything else big.
    pub fn from_name(name: &str) -> Self {
        if name == "Little" {
            Self::Little
        } else {
            Self::Big
        }
    }
}

/// How the raw bits of a basic value are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum NumericKind {
    #[default]
    Signed,
    Unsigned,
    Float,
}

impl NumericKind {
    /// Guess the numeric kind from a basic type name.
    ///
    /// OMT basic data declarations carry no signedness attribute, so the
    /// conventional names decide: `HLAfloat64BE` is a float,
    /// `UnsignedInteger16` unsigned, everything else signed.
    pub fn infer_from_name(name: &str) -> Self {
        if name.contains("float") || name.contains("Float") {
            Self::Float
        } else if name.contains("unsigned") || name.contains("Unsigned") {
            Self::Unsigned
        } else {
            Self::Signed
        }
    }
}

/// A fixed-width integer or IEEE-754 value.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicDataType {
    handle: Handle<BasicDataType>,
    index_in_list: Option<usize>,
    name: String,
    size_bits: u32,
    alignment: usize,
    endianness: Endianness,
    numeric_kind: NumericKind,
    interpretation: String,
    encoding: String,
}

impl ListEntry for BasicDataType {
    const KIND: &'static str = "basic";

    fn with_handle(handle: Handle<Self>) -> Self {
        Self {
            handle,
            index_in_list: None,
            name: String::new(),
            size_bits: 0,
            alignment: 1,
            endianness: Endianness::default(),
            numeric_kind: NumericKind::default(),
            interpretation: String::new(),
            encoding: String::new(),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_index_in_list(&mut self, index: Option<usize>) {
        self.index_in_list = index;
    }
}

super::impl_common_accessors!(BasicDataType);

impl BasicDataType {
    /// Width in bits.
    pub fn size_bits(&self) -> u32 {
        self.size_bits
    }

    /// Set the width in bits; alignment follows as `size / 8` (at least 1).
    pub fn set_size(&mut self, size_bits: u32) -> &mut Self {
        self.size_bits = size_bits;
        self.alignment = ((size_bits / 8) as usize).max(1);
        self
    }

    pub fn alignment(&self) -> usize {
        self.alignment
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    pub fn set_endianness(&mut self, endianness: Endianness) -> &mut Self {
        self.endianness = endianness;
        self
    }

    pub fn numeric_kind(&self) -> NumericKind {
        self.numeric_kind
    }

    pub fn set_numeric_kind(&mut self, kind: NumericKind) -> &mut Self {
        self.numeric_kind = kind;
        self
    }

    pub fn interpretation(&self) -> &str {
        &self.interpretation
    }

    pub fn set_interpretation(&mut self, interpretation: impl Into<String>) -> &mut Self {
        self.interpretation = interpretation.into();
        self
    }

    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    pub fn set_encoding(&mut self, encoding: impl Into<String>) -> &mut Self {
        self.encoding = encoding.into();
        self
    }

    /// Minimum number of bytes a value occupies on the wire.
    pub fn encoded_size(&self) -> usize {
        (self.size_bits / 8) as usize
    }
}
