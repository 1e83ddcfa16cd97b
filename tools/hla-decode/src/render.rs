// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Text and JSON views of a decoded value tree.

use hla_omt::element::{ArrayDataElement, FixedRecordDataElement, VariantRecordDataElement};
use hla_omt::{DataElement, TypeRegistry};
use serde_json::{json, Map, Value};
use std::fmt::Write;

const INDENT: &str = "  ";

/// Indented, one value per line.
pub fn pretty(registry: &TypeRegistry, element: &DataElement, label: &str) -> String {
    let mut out = String::new();
    write_pretty(registry, element, label, 0, &mut out);
    out
}

fn write_pretty(registry: &TypeRegistry, element: &DataElement, label: &str, depth: usize, out: &mut String) {
    let pad = INDENT.repeat(depth);
    match element {
        DataElement::Scalar(scalar) => {
            let value = scalar
                .value()
                .map_or_else(|| "<unset>".to_string(), |v| v.to_string());
            let _ = writeln!(out, "{pad}{label}: {value}");
        }
        DataElement::Enumerated(enumerated) => {
            let value = enumerated.numeric_value();
            match enumerated.enumerator_name(registry) {
                Some(name) => {
                    let _ = writeln!(out, "{pad}{label}: {name} ({value})");
                }
                None => {
                    let _ = writeln!(out, "{pad}{label}: {value}");
                }
            }
        }
        DataElement::String(string) => {
            let _ = writeln!(out, "{pad}{label}: {:?}", string.value());
        }
        DataElement::Array(array) => write_array(registry, array, label, depth, out),
        DataElement::FixedRecord(record) => {
            let _ = writeln!(out, "{pad}{label}:");
            for (index, child) in record.fields().enumerate() {
                let name = field_name(registry, record, index);
                match child {
                    Some(child) => write_pretty(registry, child, &name, depth + 1, out),
                    None => {
                        let _ = writeln!(out, "{pad}{INDENT}{name}: <unresolved>");
                    }
                }
            }
        }
        DataElement::VariantRecord(variant) => {
            let _ = writeln!(out, "{pad}{label}:");
            if let Some(discriminant) = variant.discriminant() {
                let name = discriminant_name(registry, variant);
                write_pretty(
                    registry,
                    &DataElement::Enumerated(discriminant.clone()),
                    &name,
                    depth + 1,
                    out,
                );
            }
            if let Some(alternative) = variant.alternative() {
                let name = alternative_name(registry, variant);
                write_pretty(registry, alternative, &name, depth + 1, out);
            }
        }
    }
}

fn write_array(registry: &TypeRegistry, array: &ArrayDataElement, label: &str, depth: usize, out: &mut String) {
    let pad = INDENT.repeat(depth);
    let opaque = registry
        .array_data_types()
        .get(array.data_type())
        .is_some_and(|ty| ty.is_opaque_data());
    if let Some(bytes) = array.to_bytes().filter(|_| opaque) {
        let _ = write!(out, "{pad}{label}: [{} bytes]", bytes.len());
        for byte in &bytes {
            let _ = write!(out, " {byte:02x}");
        }
        out.push('\n');
        return;
    }
    let _ = writeln!(out, "{pad}{label}: [{}]", array.size());
    for (index, child) in array.iter().enumerate() {
        write_pretty(registry, child, &format!("[{index}]"), depth + 1, out);
    }
}

fn field_name(registry: &TypeRegistry, record: &FixedRecordDataElement, index: usize) -> String {
    registry
        .fixed_record_data_types()
        .get(record.data_type())
        .and_then(|ty| ty.field(index))
        .map_or_else(|| format!("field{index}"), |field| field.name().to_string())
}

fn discriminant_name(registry: &TypeRegistry, variant: &VariantRecordDataElement) -> String {
    registry
        .variant_record_data_types()
        .get(variant.data_type())
        .map(|ty| ty.discriminant_name())
        .filter(|name| !name.is_empty())
        .unwrap_or("discriminant")
        .to_string()
}

fn alternative_name(registry: &TypeRegistry, variant: &VariantRecordDataElement) -> String {
    variant
        .alternative_index()
        .and_then(|index| {
            registry
                .variant_record_data_types()
                .get(variant.data_type())?
                .alternative(index)
        })
        .map_or_else(|| "alternative".to_string(), |alt| alt.name().to_string())
}

/// JSON value mirroring the tree; records become objects keyed by field name.
pub fn json(registry: &TypeRegistry, element: &DataElement) -> Value {
    match element {
        DataElement::Scalar(scalar) => scalar
            .value()
            .and_then(|v| serde_json::to_value(v).ok())
            .unwrap_or(Value::Null),
        DataElement::Enumerated(enumerated) => json!({
            "value": enumerated.numeric_value(),
            "enumerator": enumerated.enumerator_name(registry),
        }),
        DataElement::String(string) => Value::String(string.value()),
        DataElement::Array(array) => {
            Value::Array(array.iter().map(|child| json(registry, child)).collect())
        }
        DataElement::FixedRecord(record) => {
            let mut fields = Map::new();
            for (index, child) in record.fields().enumerate() {
                let value = child.map_or(Value::Null, |child| json(registry, child));
                fields.insert(field_name(registry, record, index), value);
            }
            Value::Object(fields)
        }
        DataElement::VariantRecord(variant) => {
            let mut fields = Map::new();
            if let Some(discriminant) = variant.discriminant() {
                fields.insert(
                    discriminant_name(registry, variant),
                    json(registry, &DataElement::Enumerated(discriminant.clone())),
                );
            }
            if let Some(alternative) = variant.alternative() {
                fields.insert(alternative_name(registry, variant), json(registry, alternative));
            }
            Value::Object(fields)
        }
    }
}
