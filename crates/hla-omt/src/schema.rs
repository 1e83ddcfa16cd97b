// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! TOML data type schema.
//!
//! A compact, file-based stand-in for the data type section of an object
//! model. Tables mirror the OMT categories:
//!
//! ```toml
//! [[basic]]
//! name = "UnsignedInteger16BE"
//! size = 16
//! endian = "Big"
//!
//! [[array]]
//! name = "Samples"
//! data_type = "UnsignedInteger16BE"
//! cardinality = "Dynamic"
//!
//! [[fixed_record]]
//! name = "Reading"
//! fields = [
//!     { name = "id", data_type = "HLAoctet" },
//!     { name = "samples", data_type = "Samples" },
//! ]
//! ```
//!
//! [`SchemaDocument::merge_into`] applies the document in two passes: every
//! type whose name is not yet registered is created first, then element,
//! field and alternative references are resolved by name. Forward and
//! cyclic references therefore work.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use crate::types::{
    ArrayDataType, BasicDataType, DataTypeId, EnumeratedDataType, Endianness, FixedRecordDataType,
    Handle, ListEntry, NumericKind, SimpleDataType, TypeRegistry, VariantRecordDataType,
};

/// Schema loading errors.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("data type '{0}' declared more than once")]
    DuplicateType(String),

    #[error("'{owner}' references unknown data type '{reference}'")]
    UnresolvedReference { owner: String, reference: String },

    #[error("'{owner}' references '{reference}', which is not a {expected} data type")]
    WrongKind {
        owner: String,
        reference: String,
        expected: &'static str,
    },

    #[error("Invalid schema: {0}")]
    Invalid(String),
}

/// Basic data representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicDataDecl {
    pub name: String,
    /// Width in bits.
    pub size: u32,
    /// `"Little"` or `"Big"`; anything else is big endian.
    #[serde(default)]
    pub endian: String,
    /// Inferred from the name when absent.
    #[serde(default)]
    pub kind: Option<NumericKind>,
    #[serde(default)]
    pub interpretation: String,
    #[serde(default)]
    pub encoding: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleDataDecl {
    pub name: String,
    pub representation: String,
    #[serde(default)]
    pub units: String,
    #[serde(default)]
    pub resolution: String,
    #[serde(default)]
    pub accuracy: String,
    #[serde(default)]
    pub semantics: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumeratorDecl {
    pub name: String,
    #[serde(default)]
    pub values: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumeratedDataDecl {
    pub name: String,
    pub representation: String,
    #[serde(default)]
    pub semantics: String,
    #[serde(default)]
    pub enumerators: Vec<EnumeratorDecl>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrayDataDecl {
    pub name: String,
    pub data_type: String,
    /// `"Dynamic"` or an element count.
    #[serde(default = "default_cardinality")]
    pub cardinality: String,
    #[serde(default)]
    pub encoding: String,
    #[serde(default)]
    pub semantics: String,
    /// Defaults to true for `HLAASCIIstring` and `HLAunicodeString`.
    #[serde(default)]
    pub string: Option<bool>,
    /// Defaults to true for `HLAopaqueData`.
    #[serde(default)]
    pub opaque: Option<bool>,
}

fn default_cardinality() -> String {
    "Dynamic".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    pub data_type: String,
    #[serde(default)]
    pub semantics: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedRecordDataDecl {
    pub name: String,
    #[serde(default)]
    pub encoding: String,
    #[serde(default)]
    pub semantics: String,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlternativeDecl {
    pub name: String,
    /// Comma separated enumerator names, or `HLAother`.
    pub enumerator: String,
    pub data_type: String,
    #[serde(default)]
    pub semantics: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantRecordDataDecl {
    pub name: String,
    /// Name of the discriminant member.
    #[serde(default)]
    pub discriminant: String,
    /// Enumerated data type of the discriminant.
    pub data_type: String,
    #[serde(default)]
    pub encoding: String,
    #[serde(default)]
    pub semantics: String,
    #[serde(default)]
    pub alternatives: Vec<AlternativeDecl>,
}

/// A set of data type declarations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaDocument {
    #[serde(default)]
    pub basic: Vec<BasicDataDecl>,
    #[serde(default)]
    pub simple: Vec<SimpleDataDecl>,
    #[serde(default)]
    pub enumerated: Vec<EnumeratedDataDecl>,
    #[serde(default)]
    pub array: Vec<ArrayDataDecl>,
    #[serde(default)]
    pub fixed_record: Vec<FixedRecordDataDecl>,
    #[serde(default)]
    pub variant_record: Vec<VariantRecordDataDecl>,
}

/// Types created by the first merge pass, awaiting reference resolution.
#[derive(Default)]
struct Created<'d> {
    simple: Vec<(&'d SimpleDataDecl, Handle<SimpleDataType>)>,
    enumerated: Vec<(&'d EnumeratedDataDecl, Handle<EnumeratedDataType>)>,
    array: Vec<(&'d ArrayDataDecl, Handle<ArrayDataType>)>,
    fixed_record: Vec<(&'d FixedRecordDataDecl, Handle<FixedRecordDataType>)>,
    variant_record: Vec<(&'d VariantRecordDataDecl, Handle<VariantRecordDataType>)>,
    count: usize,
}

impl SchemaDocument {
    /// Load a schema from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a TOML schema.
    pub fn from_toml_str(content: &str) -> Result<Self, SchemaError> {
        let document: Self = toml::from_str(content)?;
        document.validate()?;
        Ok(document)
    }

    /// Names of all declared types, in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.basic
            .iter()
            .map(|d| d.name.as_str())
            .chain(self.simple.iter().map(|d| d.name.as_str()))
            .chain(self.enumerated.iter().map(|d| d.name.as_str()))
            .chain(self.array.iter().map(|d| d.name.as_str()))
            .chain(self.fixed_record.iter().map(|d| d.name.as_str()))
            .chain(self.variant_record.iter().map(|d| d.name.as_str()))
    }

    /// Reject empty and duplicate names.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for name in self.names() {
            if name.trim().is_empty() {
                return Err(SchemaError::Invalid("data type with empty name".into()));
            }
            if !seen.insert(name) {
                return Err(SchemaError::DuplicateType(name.to_string()));
            }
        }
        Ok(())
    }

    /// Add the declared types to `registry`.
    ///
    /// Types whose name is already registered are skipped. Returns the
    /// number of types created. On error the registry may hold some of the
    /// new types with unresolved references and should be discarded.
    pub fn merge_into(&self, registry: &mut TypeRegistry) -> Result<usize, SchemaError> {
        self.validate()?;
        let created = self.create_types(registry);
        self.resolve_references(registry, &created)?;
        tracing::debug!(created = created.count, "merged data type schema");
        Ok(created.count)
    }

    fn create_types<'d>(&'d self, registry: &mut TypeRegistry) -> Created<'d> {
        let mut created = Created::default();

        for decl in &self.basic {
            if registry.get_data_type(&decl.name).is_some() {
                tracing::debug!(name = %decl.name, "data type already registered, skipped");
                continue;
            }
            let kind = decl
                .kind
                .unwrap_or_else(|| NumericKind::infer_from_name(&decl.name));
            registry
                .create_basic_data_type()
                .set_name(decl.name.as_str())
                .set_size(decl.size)
                .set_endianness(Endianness::from_name(decl.endian.trim()))
                .set_numeric_kind(kind)
                .set_interpretation(decl.interpretation.as_str())
                .set_encoding(decl.encoding.as_str());
            created.count += 1;
        }

        for decl in &self.simple {
            if registry.get_data_type(&decl.name).is_some() {
                continue;
            }
            let simple = registry.create_simple_data_type();
            simple
                .set_name(decl.name.as_str())
                .set_units(decl.units.as_str())
                .set_resolution(decl.resolution.as_str())
                .set_accuracy(decl.accuracy.as_str())
                .set_semantics(decl.semantics.as_str());
            created.simple.push((decl, simple.handle()));
            created.count += 1;
        }

        for decl in &self.enumerated {
            if registry.get_data_type(&decl.name).is_some() {
                continue;
            }
            let enumerated = registry.create_enumerated_data_type();
            enumerated
                .set_name(decl.name.as_str())
                .set_semantics(decl.semantics.as_str());
            for enumerator in &decl.enumerators {
                enumerated
                    .create_enumerator()
                    .set_name(enumerator.name.as_str())
                    .set_values(enumerator.values.as_str());
            }
            created.enumerated.push((decl, enumerated.handle()));
            created.count += 1;
        }

        for decl in &self.array {
            if registry.get_data_type(&decl.name).is_some() {
                continue;
            }
            let is_string = decl
                .string
                .unwrap_or(matches!(decl.name.as_str(), "HLAASCIIstring" | "HLAunicodeString"));
            let is_opaque = decl.opaque.unwrap_or(decl.name == "HLAopaqueData");
            let array = registry.create_array_data_type();
            array
                .set_name(decl.name.as_str())
                .set_cardinality_str(&decl.cardinality)
                .set_encoding(decl.encoding.as_str())
                .set_semantics(decl.semantics.as_str())
                .set_is_string(is_string)
                .set_is_opaque_data(is_opaque);
            created.array.push((decl, array.handle()));
            created.count += 1;
        }

        for decl in &self.fixed_record {
            if registry.get_data_type(&decl.name).is_some() {
                continue;
            }
            let record = registry.create_fixed_record_data_type();
            record
                .set_name(decl.name.as_str())
                .set_encoding(decl.encoding.as_str())
                .set_semantics(decl.semantics.as_str());
            for field in &decl.fields {
                record
                    .create_field()
                    .set_name(field.name.as_str())
                    .set_semantics(field.semantics.as_str());
            }
            created.fixed_record.push((decl, record.handle()));
            created.count += 1;
        }

        for decl in &self.variant_record {
            if registry.get_data_type(&decl.name).is_some() {
                continue;
            }
            let variant = registry.create_variant_record_data_type();
            variant
                .set_name(decl.name.as_str())
                .set_discriminant_name(decl.discriminant.as_str())
                .set_encoding(decl.encoding.as_str())
                .set_semantics(decl.semantics.as_str());
            for alternative in &decl.alternatives {
                variant
                    .create_alternative()
                    .set_name(alternative.name.as_str())
                    .set_enumerator(alternative.enumerator.as_str())
                    .set_semantics(alternative.semantics.as_str());
            }
            created.variant_record.push((decl, variant.handle()));
            created.count += 1;
        }

        created
    }

    fn resolve_references(&self, registry: &mut TypeRegistry, created: &Created<'_>) -> Result<(), SchemaError> {
        for &(decl, handle) in &created.simple {
            let representation = lookup_basic(registry, &decl.name, &decl.representation)?;
            if let Some(simple) = registry.simple_data_types_mut().get_mut(handle) {
                simple.set_representation(Some(representation));
            }
        }

        for &(decl, handle) in &created.enumerated {
            let representation = lookup_basic(registry, &decl.name, &decl.representation)?;
            if let Some(enumerated) = registry.enumerated_data_types_mut().get_mut(handle) {
                enumerated.set_representation(Some(representation));
            }
        }

        for &(decl, handle) in &created.array {
            let element_type = lookup(registry, &decl.name, &decl.data_type)?;
            if let Some(array) = registry.array_data_types_mut().get_mut(handle) {
                array.set_element_type(Some(element_type));
            }
        }

        for &(decl, handle) in &created.fixed_record {
            for (index, field) in decl.fields.iter().enumerate() {
                let owner = format!("{}.{}", decl.name, field.name);
                let data_type = lookup(registry, &owner, &field.data_type)?;
                if let Some(field) = registry
                    .fixed_record_data_types_mut()
                    .get_mut(handle)
                    .and_then(|record| record.field_mut(index))
                {
                    field.set_data_type(Some(data_type));
                }
            }
        }

        for &(decl, handle) in &created.variant_record {
            let discriminant = match lookup(registry, &decl.name, &decl.data_type)? {
                DataTypeId::Enumerated(enumerated) => enumerated,
                _ => {
                    return Err(SchemaError::WrongKind {
                        owner: decl.name.clone(),
                        reference: decl.data_type.clone(),
                        expected: EnumeratedDataType::KIND,
                    })
                }
            };
            let mut alternatives = Vec::with_capacity(decl.alternatives.len());
            for alternative in &decl.alternatives {
                let owner = format!("{}.{}", decl.name, alternative.name);
                alternatives.push(lookup(registry, &owner, &alternative.data_type)?);
            }
            if let Some(variant) = registry.variant_record_data_types_mut().get_mut(handle) {
                variant.set_discriminant_type(Some(discriminant));
                for (index, data_type) in alternatives.into_iter().enumerate() {
                    if let Some(alternative) = variant.alternative_mut(index) {
                        alternative.set_data_type(Some(data_type));
                    }
                }
            }
        }

        Ok(())
    }
}

fn lookup(registry: &TypeRegistry, owner: &str, reference: &str) -> Result<DataTypeId, SchemaError> {
    registry
        .get_data_type(reference.trim())
        .ok_or_else(|| SchemaError::UnresolvedReference {
            owner: owner.to_string(),
            reference: reference.to_string(),
        })
}

fn lookup_basic(
    registry: &TypeRegistry,
    owner: &str,
    reference: &str,
) -> Result<Handle<BasicDataType>, SchemaError> {
    match lookup(registry, owner, reference)? {
        DataTypeId::Basic(handle) => Ok(handle),
        _ => Err(SchemaError::WrongKind {
            owner: owner.to_string(),
            reference: reference.to_string(),
            expected: BasicDataType::KIND,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cardinality;

    const SCHEMA: &str = r#"
[[basic]]
name = "UnsignedInteger16LE"
size = 16
endian = "Little"

[[simple]]
name = "Counter"
representation = "UnsignedInteger16LE"
units = "NA"

[[enumerated]]
name = "Mode"
representation = "HLAoctet"
enumerators = [
    { name = "Off", values = "0" },
    { name = "On", values = "1" },
]

[[array]]
name = "Counters"
data_type = "Counter"
cardinality = "4"

[[array]]
name = "NodeList"
data_type = "Node"

[[fixed_record]]
name = "Node"
fields = [
    { name = "mode", data_type = "Mode" },
    { name = "children", data_type = "NodeList" },
]

[[variant_record]]
name = "Payload"
discriminant = "mode"
data_type = "Mode"
alternatives = [
    { name = "counters", enumerator = "On", data_type = "Counters" },
]
"#;

    #[test]
    fn test_merge_resolves_forward_references() {
        let mut registry = TypeRegistry::with_standard_types();
        let document = SchemaDocument::from_toml_str(SCHEMA).unwrap();
        assert_eq!(document.merge_into(&mut registry).unwrap(), 7);

        let basic = registry.get_basic_data_type("UnsignedInteger16LE").unwrap();
        assert_eq!(basic.numeric_kind(), NumericKind::Unsigned);
        assert_eq!(basic.endianness(), Endianness::Little);

        let counters = registry.get_array_data_type("Counters").unwrap();
        assert_eq!(counters.cardinality(), Cardinality::Fixed(4));
        assert_eq!(counters.element_type(), registry.get_data_type("Counter"));

        let node = registry.get_fixed_record_data_type("Node").unwrap();
        assert_eq!(
            node.field(1).and_then(|f| f.data_type()),
            registry.get_data_type("NodeList")
        );

        let payload = registry.get_variant_record_data_type("Payload").unwrap();
        assert_eq!(payload.discriminant_name(), "mode");
        assert!(payload.discriminant_type().is_some());
        assert_eq!(
            payload.alternative(0).and_then(|a| a.data_type()),
            registry.get_data_type("Counters")
        );
    }

    #[test]
    fn test_existing_names_are_skipped() {
        let mut registry = TypeRegistry::with_standard_types();
        let document = SchemaDocument::from_toml_str(
            r#"
[[basic]]
name = "HLAoctet"
size = 32
"#,
        )
        .unwrap();
        assert_eq!(document.merge_into(&mut registry).unwrap(), 0);
        assert_eq!(registry.get_basic_data_type("HLAoctet").unwrap().size_bits(), 8);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = SchemaDocument::from_toml_str(
            r#"
[[basic]]
name = "Twice"
size = 8

[[simple]]
name = "Twice"
representation = "HLAoctet"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateType(name) if name == "Twice"));
    }

    #[test]
    fn test_unresolved_reference() {
        let mut registry = TypeRegistry::new();
        let document = SchemaDocument::from_toml_str(
            r#"
[[array]]
name = "Dangling"
data_type = "Nowhere"
"#,
        )
        .unwrap();
        let err = document.merge_into(&mut registry).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::UnresolvedReference { ref owner, ref reference }
                if owner == "Dangling" && reference == "Nowhere"
        ));
    }

    #[test]
    fn test_wrong_kind_reference() {
        let mut registry = TypeRegistry::with_standard_types();
        let document = SchemaDocument::from_toml_str(
            r#"
[[simple]]
name = "Bad"
representation = "HLAASCIIchar"
"#,
        )
        .unwrap();
        let err = document.merge_into(&mut registry).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::WrongKind { expected, .. } if expected == BasicDataType::KIND
        ));
    }

    #[test]
    fn test_string_flags_follow_names() {
        let mut registry = TypeRegistry::new();
        let document = SchemaDocument::from_toml_str(
            r#"
[[basic]]
name = "HLAoctet"
size = 8

[[array]]
name = "HLAASCIIstring"
data_type = "HLAoctet"

[[array]]
name = "Text"
data_type = "HLAoctet"
string = true
"#,
        )
        .unwrap();
        document.merge_into(&mut registry).unwrap();
        assert!(registry.get_array_data_type("HLAASCIIstring").unwrap().is_string());
        assert!(registry.get_array_data_type("Text").unwrap().is_string());
        assert_eq!(
            registry.get_basic_data_type("HLAoctet").unwrap().numeric_kind(),
            NumericKind::Signed
        );
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("types.toml");
        std::fs::write(&path, SCHEMA).unwrap();
        let document = SchemaDocument::from_file(&path).unwrap();
        assert_eq!(document.names().count(), 7);
    }
}
