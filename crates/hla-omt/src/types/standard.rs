// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! HLA standard (MIM) data types.

use super::{Cardinality, Endianness, Handle, NumericKind, TypeRegistry};
use super::BasicDataType;

/// (name, bits, endianness, kind)
const STANDARD_BASIC: &[(&str, u32, Endianness, NumericKind)] = &[
    ("HLAoctet", 8, Endianness::Big, NumericKind::Unsigned),
    ("HLAoctetPairBE", 16, Endianness::Big, NumericKind::Unsigned),
    ("HLAoctetPairLE", 16, Endianness::Little, NumericKind::Unsigned),
    ("HLAinteger16BE", 16, Endianness::Big, NumericKind::Signed),
    ("HLAinteger16LE", 16, Endianness::Little, NumericKind::Signed),
    ("HLAinteger32BE", 32, Endianness::Big, NumericKind::Signed),
    ("HLAinteger32LE", 32, Endianness::Little, NumericKind::Signed),
    ("HLAinteger64BE", 64, Endianness::Big, NumericKind::Signed),
    ("HLAinteger64LE", 64, Endianness::Little, NumericKind::Signed),
    ("HLAfloat32BE", 32, Endianness::Big, NumericKind::Float),
    ("HLAfloat32LE", 32, Endianness::Little, NumericKind::Float),
    ("HLAfloat64BE", 64, Endianness::Big, NumericKind::Float),
    ("HLAfloat64LE", 64, Endianness::Little, NumericKind::Float),
];

/// (name, representation)
const STANDARD_SIMPLE: &[(&str, &str)] = &[
    ("HLAASCIIchar", "HLAoctet"),
    ("HLAunicodeChar", "HLAoctetPairBE"),
    ("HLAbyte", "HLAoctet"),
];

impl TypeRegistry {
    /// Registry pre-populated with the HLA standard data types.
    pub fn with_standard_types() -> Self {
        let mut registry = Self::new();
        registry.register_standard_types();
        registry
    }

    /// Add the HLA standard data types. Names already present are kept
    /// untouched.
    pub fn register_standard_types(&mut self) {
        for &(name, bits, endianness, kind) in STANDARD_BASIC {
            if self.get_basic_data_type(name).is_none() {
                self.create_basic_data_type()
                    .set_name(name)
                    .set_size(bits)
                    .set_endianness(endianness)
                    .set_numeric_kind(kind)
                    .set_encoding(format!("{}-bit {:?} endian", bits, endianness));
            }
        }

        for &(name, representation) in STANDARD_SIMPLE {
            if self.get_simple_data_type(name).is_some() {
                continue;
            }
            let representation = self.standard_basic(representation);
            self.create_simple_data_type()
                .set_name(name)
                .set_representation(representation);
        }

        if self.get_enumerated_data_type("HLAboolean").is_none() {
            let representation = self.standard_basic("HLAinteger32BE");
            let boolean = self.create_enumerated_data_type();
            boolean.set_name("HLAboolean").set_representation(representation);
            boolean.create_enumerator().set_name("HLAfalse").set_values("0");
            boolean.create_enumerator().set_name("HLAtrue").set_values("1");
        }

        self.register_standard_array("HLAASCIIstring", "HLAASCIIchar", true, false);
        self.register_standard_array("HLAunicodeString", "HLAunicodeChar", true, false);
        self.register_standard_array("HLAopaqueData", "HLAbyte", false, true);

        tracing::debug!(types = self.len(), "registered standard data types");
    }

    fn standard_basic(&self, name: &str) -> Option<Handle<BasicDataType>> {
        self.get_basic_data_type(name).map(BasicDataType::handle)
    }

    fn register_standard_array(&mut self, name: &str, element: &str, is_string: bool, is_opaque: bool) {
        if self.get_array_data_type(name).is_some() {
            return;
        }
        let element_type = self.get_data_type(element);
        self.create_array_data_type()
            .set_name(name)
            .set_element_type(element_type)
            .set_cardinality(Cardinality::Dynamic)
            .set_is_string(is_string)
            .set_is_opaque_data(is_opaque);
    }
}
