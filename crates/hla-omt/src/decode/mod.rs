// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decode engine.
//!
//! Walks a [`DataElement`] tree alongside a [`Cursor`], one algorithm per data
//! type kind:
//!
//! - basic / simple: align, read `size/8` bytes, reinterpret per numeric kind
//! - enumerated: like basic, narrowed to `i64`
//! - array: align, optional BE `u32` count, resize, decode children
//! - string: like array, but characters go into a code unit buffer
//! - fixed record: align, fields back to back in declaration order
//! - variant record: discriminant, then the alternative it selects
//!
//! The first failure is latched in the cursor; nothing is rolled back, so
//! children decoded before the failure keep their new values.

use crate::config::DecodeConfig;
use crate::cursor::Cursor;
use crate::element::{
    ArrayDataElement, DataElement, EnumeratedDataElement, FixedRecordDataElement, ScalarValue,
    StringDataElement, VariantRecordDataElement,
};
use crate::error::{DecodeError, DecodeResult};
use crate::types::{
    ArrayDataType, BasicDataType, Cardinality, DataTypeId, DataTypeRef, Endianness, NumericKind,
    TypeRegistry, OTHER_ENUMERATOR,
};

/// Decodes buffers against the data types of one registry.
#[derive(Debug, Clone)]
pub struct Decoder<'r> {
    registry: &'r TypeRegistry,
    config: DecodeConfig,
}

impl<'r> Decoder<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self {
            registry,
            config: DecodeConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DecodeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// Decode `buffer` from `pos` into `element`.
    ///
    /// Returns the position just past the decoded value.
    pub fn decode(&self, element: &mut DataElement, buffer: &[u8], pos: usize) -> DecodeResult<usize> {
        let mut cursor = Cursor::new(buffer, pos);
        self.decode_element(&mut cursor, element, 0);
        let result = cursor.finish();
        if let Err(err) = &result {
            tracing::debug!(
                data_type = self.registry.name_of(element.data_type()).unwrap_or("<erased>"),
                start = pos,
                len = buffer.len(),
                %err,
                "decode failed"
            );
        }
        result
    }

    fn decode_element(&self, cursor: &mut Cursor<'_>, element: &mut DataElement, depth: usize) {
        if cursor.is_failed() {
            return;
        }
        if depth >= self.config.max_nesting_depth {
            cursor.fail(DecodeError::NestingTooDeep { depth });
            return;
        }
        tracing::trace!(kind = element.kind_name(), pos = ?cursor.position(), depth, "decode element");
        match element {
            DataElement::Scalar(scalar) => {
                let basic = match self.representation_of(scalar.data_type) {
                    Ok(basic) => basic,
                    Err(err) => return cursor.fail(err),
                };
                if let Some(value) = self.read_basic(cursor, basic) {
                    scalar.value = Some(value);
                }
            }
            DataElement::Enumerated(enumerated) => self.decode_enumerated(cursor, enumerated),
            DataElement::String(string) => self.decode_string(cursor, string, depth),
            DataElement::Array(array) => self.decode_array(cursor, array, depth),
            DataElement::FixedRecord(record) => self.decode_fixed_record(cursor, record, depth),
            DataElement::VariantRecord(variant) => self.decode_variant_record(cursor, variant, depth),
        }
    }

    /// Basic data type that defines the wire form of a scalar-like type.
    fn representation_of(&self, id: DataTypeId) -> DecodeResult<&'r BasicDataType> {
        let representation = match self.registry.resolve(id) {
            None => return Err(DecodeError::MissingDataType),
            Some(DataTypeRef::Basic(basic)) => return Ok(basic),
            Some(DataTypeRef::Simple(simple)) => simple.representation(),
            Some(DataTypeRef::Enumerated(enumerated)) => enumerated.representation(),
            Some(other) => {
                return Err(DecodeError::KindMismatch {
                    expected: "basic",
                    found: other.kind().as_str(),
                })
            }
        };
        representation
            .and_then(|handle| self.registry.basic_data_types().get(handle))
            .ok_or(DecodeError::MissingDataType)
    }

    fn align(&self, cursor: &mut Cursor<'_>, natural: usize) {
        cursor.align(self.config.effective_alignment(natural));
    }

    /// Align and read one basic value; `None` once the cursor has failed.
    fn read_basic(&self, cursor: &mut Cursor<'_>, basic: &BasicDataType) -> Option<ScalarValue> {
        let bits = basic.size_bits();
        let kind = basic.numeric_kind();
        match (bits, kind) {
            (8 | 16, NumericKind::Float) => {
                cursor.fail(DecodeError::UnrepresentableFloat { size_bits: bits });
                return None;
            }
            (8 | 16 | 32 | 64, _) => {}
            _ => {
                cursor.fail(DecodeError::UnsupportedSize { size_bits: bits });
                return None;
            }
        }

        self.align(cursor, basic.alignment());
        let little = basic.endianness() == Endianness::Little;
        let value = match (bits, kind) {
            (8, NumericKind::Signed) => ScalarValue::I8(cursor.read_u8() as i8),
            (8, _) => ScalarValue::U8(cursor.read_u8()),
            (16, NumericKind::Signed) => ScalarValue::I16(read_u16(cursor, little) as i16),
            (16, _) => ScalarValue::U16(read_u16(cursor, little)),
            (32, NumericKind::Signed) => ScalarValue::I32(read_u32(cursor, little) as i32),
            (32, NumericKind::Unsigned) => ScalarValue::U32(read_u32(cursor, little)),
            (32, NumericKind::Float) => ScalarValue::F32(f32::from_bits(read_u32(cursor, little))),
            (64, NumericKind::Signed) => ScalarValue::I64(read_u64(cursor, little) as i64),
            (64, NumericKind::Unsigned) => ScalarValue::U64(read_u64(cursor, little)),
            (64, NumericKind::Float) => ScalarValue::F64(f64::from_bits(read_u64(cursor, little))),
            _ => return None,
        };
        (!cursor.is_failed()).then_some(value)
    }

    fn decode_enumerated(&self, cursor: &mut Cursor<'_>, element: &mut EnumeratedDataElement) {
        let basic = match self.representation_of(element.data_type.into()) {
            Ok(basic) => basic,
            Err(err) => return cursor.fail(err),
        };
        if let Some(value) = self.read_basic(cursor, basic) {
            element.numeric_value = value.as_i64();
        }
    }

    /// Align an array and produce its element count.
    ///
    /// Dynamic counts are bounded by the configuration and by what the
    /// remaining bytes could possibly hold, before anything is allocated.
    fn read_count(
        &self,
        cursor: &mut Cursor<'_>,
        array: &ArrayDataType,
        element_type: DataTypeId,
        depth: usize,
    ) -> Option<usize> {
        let max_depth = self.config.max_nesting_depth;
        self.align(
            cursor,
            self.registry.alignment_at(array.handle().into(), depth, max_depth),
        );
        let count = match array.cardinality() {
            Cardinality::Fixed(n) => n,
            Cardinality::Dynamic => {
                let count = cursor.read_u32_be();
                if cursor.is_failed() {
                    return None;
                }
                let max = self.config.effective_max_dynamic_length();
                if count as usize > max {
                    cursor.fail(DecodeError::OversizedLength {
                        count: u64::from(count),
                        max,
                    });
                    return None;
                }
                count as usize
            }
        };

        let min_size = self
            .registry
            .min_encoded_size_at(element_type, depth + 1, max_depth)
            .max(1);
        let needed = count.saturating_mul(min_size);
        if needed > cursor.remaining() {
            cursor.fail(DecodeError::Truncated {
                offset: cursor.position().unwrap_or_default(),
                needed,
                available: cursor.remaining(),
            });
            return None;
        }
        (!cursor.is_failed()).then_some(count)
    }

    fn decode_array(&self, cursor: &mut Cursor<'_>, element: &mut ArrayDataElement, depth: usize) {
        let Some(array) = self.registry.array_data_types().get(element.data_type) else {
            return cursor.fail(DecodeError::MissingDataType);
        };
        let Some(element_type) = array.element_type() else {
            return cursor.fail(DecodeError::MissingDataType);
        };
        let Some(count) = self.read_count(cursor, array, element_type, depth) else {
            return;
        };
        if let Err(err) = element.resize_at(self.registry, count, depth, self.config.max_nesting_depth) {
            return cursor.fail(err);
        }
        for child in &mut element.elements {
            self.decode_element(cursor, child, depth + 1);
            if cursor.is_failed() {
                return;
            }
        }
    }

    fn decode_string(&self, cursor: &mut Cursor<'_>, element: &mut StringDataElement, depth: usize) {
        let Some(array) = self.registry.array_data_types().get(element.data_type) else {
            return cursor.fail(DecodeError::MissingDataType);
        };
        let Some(element_type) = array.element_type() else {
            return cursor.fail(DecodeError::MissingDataType);
        };
        let character = match self.registry.resolve(element_type) {
            None => return cursor.fail(DecodeError::MissingDataType),
            Some(DataTypeRef::Basic(_) | DataTypeRef::Simple(_)) => {
                match self.representation_of(element_type) {
                    Ok(basic) => basic,
                    Err(err) => return cursor.fail(err),
                }
            }
            Some(other) => {
                return cursor.fail(DecodeError::KindMismatch {
                    expected: "basic",
                    found: other.kind().as_str(),
                })
            }
        };
        match (character.size_bits(), character.numeric_kind()) {
            (_, NumericKind::Float) => {
                return cursor.fail(DecodeError::KindMismatch {
                    expected: "integer",
                    found: "float",
                })
            }
            (8 | 16 | 32, _) => {}
            (bits, _) => return cursor.fail(DecodeError::UnsupportedSize { size_bits: bits }),
        }

        let Some(count) = self.read_count(cursor, array, element_type, depth) else {
            return;
        };
        let mask = u64::MAX >> (64 - character.size_bits());
        element.code_units.clear();
        element.code_units.reserve(count.min(cursor.remaining()));
        for _ in 0..count {
            let Some(value) = self.read_basic(cursor, character) else {
                return;
            };
            element.code_units.push((value.as_u64() & mask) as u32);
        }
    }

    fn decode_fixed_record(
        &self,
        cursor: &mut Cursor<'_>,
        element: &mut FixedRecordDataElement,
        depth: usize,
    ) {
        if self.registry.fixed_record_data_types().get(element.data_type).is_none() {
            return cursor.fail(DecodeError::MissingDataType);
        }
        let alignment =
            self.registry
                .alignment_at(element.data_type.into(), depth, self.config.max_nesting_depth);
        self.align(cursor, alignment);
        for field in &mut element.fields {
            match field {
                Some(child) => self.decode_element(cursor, child, depth + 1),
                None => cursor.fail(DecodeError::MissingDataType),
            }
            if cursor.is_failed() {
                return;
            }
        }
    }

    fn decode_variant_record(
        &self,
        cursor: &mut Cursor<'_>,
        element: &mut VariantRecordDataElement,
        depth: usize,
    ) {
        let Some(variant) = self.registry.variant_record_data_types().get(element.data_type) else {
            return cursor.fail(DecodeError::MissingDataType);
        };
        let Some(discriminant) = element.discriminant.as_mut() else {
            return cursor.fail(DecodeError::MissingDataType);
        };
        self.decode_enumerated(cursor, discriminant);
        if cursor.is_failed() {
            return;
        }

        let value = discriminant.numeric_value;
        let Some(discriminant_type) = self.registry.enumerated_data_types().get(discriminant.data_type)
        else {
            return cursor.fail(DecodeError::MissingDataType);
        };
        let enumerator = discriminant_type
            .enumerator_for_value(value)
            .map_or(OTHER_ENUMERATOR, |e| e.name());
        let Some(alternative) = variant.alternative_for_enumerator(enumerator) else {
            return cursor.fail(DecodeError::UnmatchedDiscriminant { value });
        };
        let Some(alternative_type) = alternative.data_type() else {
            return cursor.fail(DecodeError::MissingDataType);
        };

        let index = alternative.index();
        let reuse = matches!(
            &element.alternative,
            Some((active, child)) if *active == index && child.data_type() == alternative_type
        );
        if !reuse {
            if depth + 1 >= self.config.max_nesting_depth {
                return cursor.fail(DecodeError::NestingTooDeep { depth: depth + 1 });
            }
            let created = DataElement::create_at(
                self.registry,
                alternative_type,
                depth + 1,
                self.config.max_nesting_depth,
            );
            let Some(mut child) = created else {
                element.alternative = None;
                return cursor.fail(DecodeError::MissingDataType);
            };
            child.set_index_in_parent(Some(1));
            element.alternative = Some((index, Box::new(child)));
        }
        if let Some((_, child)) = element.alternative.as_mut() {
            self.decode_element(cursor, child, depth + 1);
        }
    }
}

fn read_u16(cursor: &mut Cursor<'_>, little: bool) -> u16 {
    if little {
        cursor.read_u16_le()
    } else {
        cursor.read_u16_be()
    }
}

fn read_u32(cursor: &mut Cursor<'_>, little: bool) -> u32 {
    if little {
        cursor.read_u32_le()
    } else {
        cursor.read_u32_be()
    }
}

fn read_u64(cursor: &mut Cursor<'_>, little: bool) -> u64 {
    if little {
        cursor.read_u64_le()
    } else {
        cursor.read_u64_be()
    }
}

#[cfg(test)]
mod tests;
