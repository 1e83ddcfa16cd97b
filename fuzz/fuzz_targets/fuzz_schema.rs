// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use hla_omt::{SchemaDocument, TypeRegistry};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(schema) = SchemaDocument::from_toml_str(text) else {
        return;
    };
    let mut registry = TypeRegistry::with_standard_types();
    let _ = schema.merge_into(&mut registry);

    // Whatever merged must be usable by the size queries.
    for ty in registry.iter() {
        let _ = registry.alignment(ty.id());
        let _ = registry.min_encoded_size(ty.id());
    }
});
