// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Array data types (including strings and opaque data).

use std::fmt;

use super::list::{Handle, ListEntry};
use super::DataTypeId;

/// Element count of an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cardinality {
    /// Count known from the schema, not present on the wire.
    Fixed(usize),
    /// Count encoded on the wire as a big-endian `u32`.
    #[default]
    Dynamic,
}

impl Cardinality {
    /// Parse an OMT cardinality attribute.
    ///
    /// `"Dynamic"` and anything unparsable map to [`Cardinality::Dynamic`].
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text == "Dynamic" {
            return Self::Dynamic;
        }
        text.parse().map_or(Self::Dynamic, Self::Fixed)
    }

    pub fn is_dynamic(self) -> bool {
        matches!(self, Self::Dynamic)
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(n) => write!(f, "{}", n),
            Self::Dynamic => f.write_str("Dynamic"),
        }
    }
}

/// Homogeneous sequence of an element type.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayDataType {
    handle: Handle<ArrayDataType>,
    index_in_list: Option<usize>,
    name: String,
    element_type: Option<DataTypeId>,
    cardinality: Cardinality,
    is_string: bool,
    is_opaque_data: bool,
    encoding: String,
    semantics: String,
}

impl ListEntry for ArrayDataType {
    const KIND: &'static str = "array";

    fn with_handle(handle: Handle<Self>) -> Self {
        Self {
            handle,
            index_in_list: None,
            name: String::new(),
            element_type: None,
            cardinality: Cardinality::default(),
            is_string: false,
            is_opaque_data: false,
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

super::impl_common_accessors!(ArrayDataType);

impl ArrayDataType {
    pub fn element_type(&self) -> Option<DataTypeId> {
        self.element_type
    }

    pub fn set_element_type(&mut self, element_type: Option<DataTypeId>) -> &mut Self {
        self.element_type = element_type;
        self
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn set_cardinality(&mut self, cardinality: Cardinality) -> &mut Self {
        self.cardinality = cardinality;
        self
    }

    pub fn set_cardinality_str(&mut self, text: &str) -> &mut Self {
        self.set_cardinality(Cardinality::parse(text))
    }

    /// Decoded into a [`StringDataElement`](crate::element::StringDataElement).
    pub fn is_string(&self) -> bool {
        self.is_string
    }

    pub fn set_is_string(&mut self, is_string: bool) -> &mut Self {
        self.is_string = is_string;
        self
    }

    pub fn is_opaque_data(&self) -> bool {
        self.is_opaque_data
    }

    pub fn set_is_opaque_data(&mut self, is_opaque_data: bool) -> &mut Self {
        self.is_opaque_data = is_opaque_data;
        self
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
