// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use hla_omt::{DecodeConfig, Decoder, SchemaDocument, TypeRegistry};
use libfuzzer_sys::fuzz_target;

const SCHEMA: &str = r#"
[[enumerated]]
name = "Shape"
representation = "HLAinteger32BE"
enumerators = [
    { name = "Point", values = "0" },
    { name = "Polyline", values = "1..3" },
]

[[array]]
name = "Coordinates"
data_type = "HLAfloat64LE"

[[fixed_record]]
name = "Vertex"
fields = [
    { name = "id", data_type = "HLAinteger16BE" },
    { name = "label", data_type = "HLAunicodeString" },
    { name = "position", data_type = "Coordinates" },
]

[[array]]
name = "Vertices"
data_type = "Vertex"

[[variant_record]]
name = "Geometry"
discriminant = "shape"
data_type = "Shape"
alternatives = [
    { name = "point", enumerator = "Point", data_type = "Vertex" },
    { name = "polyline", enumerator = "Polyline", data_type = "Vertices" },
    { name = "raw", enumerator = "HLAother", data_type = "HLAopaqueData" },
]
"#;

fuzz_target!(|data: &[u8]| {
    let mut registry = TypeRegistry::with_standard_types();
    let Ok(schema) = SchemaDocument::from_toml_str(SCHEMA) else {
        return;
    };
    if schema.merge_into(&mut registry).is_err() {
        return;
    }
    let Some(id) = registry.get_data_type("Geometry") else {
        return;
    };

    // First byte picks the configuration, the rest is the payload.
    let Some((&selector, payload)) = data.split_first() else {
        return;
    };
    let config = DecodeConfig {
        max_dynamic_length: 1 << (selector & 0x0F),
        ..if selector & 0x80 != 0 {
            DecodeConfig::packed()
        } else {
            DecodeConfig::default()
        }
    };

    let decoder = Decoder::new(&registry).with_config(config);
    if let Some(mut element) = registry.create_data_element(id) {
        if let Ok(end) = decoder.decode(&mut element, payload, 0) {
            assert!(end <= payload.len());
        }
    }
});
