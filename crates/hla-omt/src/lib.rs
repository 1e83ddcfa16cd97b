// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! HLA OMT data types and binary decoding
//!
//! Decodes attribute and parameter payloads encoded with the IEEE 1516 HLA
//! encoding rules into introspectable value trees, driven by a runtime data
//! type schema.
//!
//! # Features
//!
//! - **Data type model**: basic, simple, enumerated, array, fixed record and
//!   variant record types in per-kind registries
//! - **Value tree**: [`DataElement`] nodes created from, and bound to, a type
//! - **Decoder**: alignment, endianness, dynamic counts and discriminated
//!   unions, with a sticky first-failure cursor
//! - **Schemas**: HLA standard types built in, more from TOML documents
//!
//! # Quick Start
//!
//! ```
//! use hla_omt::TypeRegistry;
//!
//! let registry = TypeRegistry::with_standard_types();
//! let string = registry.get_data_type("HLAASCIIstring").unwrap();
//! let mut element = registry.create_data_element(string).unwrap();
//!
//! let pos = element.decode(&registry, &[0, 0, 0, 2, b'o', b'k'], 0).unwrap();
//! assert_eq!(pos, 6);
//! assert_eq!(element.as_string().unwrap().value(), "ok");
//! ```
//!
//! # Decoder Configuration
//!
//! ```toml
//! alignment = "natural"        # or "packed"
//! max_dynamic_length = 65536
//! max_nesting_depth = 32
//! ```

pub mod config;
pub mod cursor;
pub mod decode;
pub mod element;
pub mod error;
pub mod schema;
pub mod types;

pub use config::{AlignmentPolicy, ConfigError, DecodeConfig, MAX_DYNAMIC_LENGTH};
pub use cursor::Cursor;
pub use decode::Decoder;
pub use element::{
    ArrayDataElement, DataElement, EnumeratedDataElement, FixedRecordDataElement,
    ScalarDataElement, ScalarValue, StringDataElement, VariantRecordDataElement,
};
pub use error::{DecodeError, DecodeResult};
pub use schema::{SchemaDocument, SchemaError};
pub use types::{
    ArrayDataType, BasicDataType, Cardinality, DataTypeId, DataTypeKind, DataTypeRef,
    Endianness, EnumeratedDataType, FixedRecordDataType, NumericKind, SimpleDataType,
    TypeRegistry, VariantRecordDataType,
};
