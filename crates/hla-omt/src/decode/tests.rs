// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decode engine unit tests.

use super::*;
use crate::config::AlignmentPolicy;

fn basic(
    registry: &mut TypeRegistry,
    name: &str,
    bits: u32,
    endianness: Endianness,
    kind: NumericKind,
) -> DataTypeId {
    registry
        .create_basic_data_type()
        .set_name(name)
        .set_size(bits)
        .set_endianness(endianness)
        .set_numeric_kind(kind)
        .handle()
        .into()
}

fn std_type(registry: &TypeRegistry, name: &str) -> DataTypeId {
    registry.get_data_type(name).expect("standard type")
}

fn decode_with(
    registry: &TypeRegistry,
    config: DecodeConfig,
    id: DataTypeId,
    buffer: &[u8],
) -> (DataElement, DecodeResult<usize>) {
    let mut element = registry.create_data_element(id).expect("element");
    let result = Decoder::new(registry)
        .with_config(config)
        .decode(&mut element, buffer, 0);
    (element, result)
}

fn decode(registry: &TypeRegistry, id: DataTypeId, buffer: &[u8]) -> (DataElement, DecodeResult<usize>) {
    decode_with(registry, DecodeConfig::default(), id, buffer)
}

fn scalar(element: &DataElement) -> ScalarValue {
    element
        .as_scalar()
        .and_then(|s| s.value())
        .expect("decoded scalar")
}

#[test]
fn test_basic_widths_and_kinds() {
    let registry = TypeRegistry::with_standard_types();

    let (e, r) = decode(&registry, std_type(&registry, "HLAinteger16BE"), &[0xFF, 0xFE]);
    assert_eq!(r, Ok(2));
    assert_eq!(scalar(&e), ScalarValue::I16(-2));

    let (e, r) = decode(&registry, std_type(&registry, "HLAoctetPairLE"), &[0x34, 0x12]);
    assert_eq!(r, Ok(2));
    assert_eq!(scalar(&e), ScalarValue::U16(0x1234));

    let (e, r) = decode(
        &registry,
        std_type(&registry, "HLAinteger32LE"),
        &(-7i32).to_le_bytes(),
    );
    assert_eq!(r, Ok(4));
    assert_eq!(scalar(&e), ScalarValue::I32(-7));

    let (e, r) = decode(
        &registry,
        std_type(&registry, "HLAfloat32BE"),
        &1.5f32.to_be_bytes(),
    );
    assert_eq!(r, Ok(4));
    assert_eq!(scalar(&e), ScalarValue::F32(1.5));

    let (e, r) = decode(
        &registry,
        std_type(&registry, "HLAfloat64LE"),
        &(-0.125f64).to_le_bytes(),
    );
    assert_eq!(r, Ok(8));
    assert_eq!(scalar(&e), ScalarValue::F64(-0.125));

    let (e, r) = decode(
        &registry,
        std_type(&registry, "HLAinteger64BE"),
        &i64::MIN.to_be_bytes(),
    );
    assert_eq!(r, Ok(8));
    assert_eq!(scalar(&e), ScalarValue::I64(i64::MIN));
}

#[test]
fn test_signed_and_unsigned_64() {
    let mut registry = TypeRegistry::new();
    let u64_ty = basic(&mut registry, "U64", 64, Endianness::Little, NumericKind::Unsigned);
    let i8_ty = basic(&mut registry, "I8", 8, Endianness::Big, NumericKind::Signed);

    let (e, r) = decode(&registry, u64_ty, &u64::MAX.to_le_bytes());
    assert_eq!(r, Ok(8));
    assert_eq!(scalar(&e), ScalarValue::U64(u64::MAX));

    let (e, r) = decode(&registry, i8_ty, &[0x80]);
    assert_eq!(r, Ok(1));
    assert_eq!(scalar(&e), ScalarValue::I8(-128));
}

#[test]
fn test_small_float_is_rejected() {
    let mut registry = TypeRegistry::new();
    let half = basic(&mut registry, "Half", 16, Endianness::Big, NumericKind::Float);
    let (e, r) = decode(&registry, half, &[0x3C, 0x00]);
    assert_eq!(r, Err(DecodeError::UnrepresentableFloat { size_bits: 16 }));
    assert!(e.as_scalar().and_then(|s| s.value()).is_none());
}

#[test]
fn test_unsupported_size() {
    let mut registry = TypeRegistry::new();
    let odd = basic(&mut registry, "U24", 24, Endianness::Big, NumericKind::Unsigned);
    let (_, r) = decode(&registry, odd, &[0, 0, 0, 0]);
    assert_eq!(r, Err(DecodeError::UnsupportedSize { size_bits: 24 }));
}

#[test]
fn test_simple_decodes_like_representation() {
    let registry = TypeRegistry::with_standard_types();
    let (e, r) = decode(&registry, std_type(&registry, "HLAunicodeChar"), &[0x00, 0x41]);
    assert_eq!(r, Ok(2));
    assert_eq!(scalar(&e), ScalarValue::U16(0x41));
}

#[test]
fn test_simple_without_representation_fails() {
    let mut registry = TypeRegistry::new();
    let id = registry.create_simple_data_type().set_name("Loose").handle().into();
    let (_, r) = decode(&registry, id, &[0x01]);
    assert_eq!(r, Err(DecodeError::MissingDataType));
}

#[test]
fn test_enumerated_value_and_name() {
    let registry = TypeRegistry::with_standard_types();
    let (e, r) = decode(&registry, std_type(&registry, "HLAboolean"), &[0, 0, 0, 1]);
    assert_eq!(r, Ok(4));
    let value = e.as_enumerated().expect("enumerated");
    assert_eq!(value.numeric_value(), 1);
    assert_eq!(value.enumerator_name(&registry), Some("HLAtrue"));

    // Undeclared values are kept as-is.
    let (e, r) = decode(&registry, std_type(&registry, "HLAboolean"), &[0, 0, 0, 7]);
    assert_eq!(r, Ok(4));
    let value = e.as_enumerated().expect("enumerated");
    assert_eq!(value.numeric_value(), 7);
    assert_eq!(value.enumerator_name(&registry), None);
}

#[test]
fn test_ascii_and_unicode_strings() {
    let registry = TypeRegistry::with_standard_types();
    let (e, r) = decode(
        &registry,
        std_type(&registry, "HLAASCIIstring"),
        &[0, 0, 0, 3, b'H', b'L', b'A'],
    );
    assert_eq!(r, Ok(7));
    assert_eq!(e.as_string().map(StringDataElement::value).as_deref(), Some("HLA"));

    let (e, r) = decode(
        &registry,
        std_type(&registry, "HLAunicodeString"),
        &[0, 0, 0, 2, 0x00, 0xE9, 0x20, 0xAC],
    );
    assert_eq!(r, Ok(8));
    assert_eq!(e.as_string().map(StringDataElement::value).as_deref(), Some("é€"));
}

#[test]
fn test_string_buffer_is_cleared_between_decodes() {
    let registry = TypeRegistry::with_standard_types();
    let id = std_type(&registry, "HLAASCIIstring");
    let mut element = registry.create_data_element(id).expect("string");
    assert_eq!(element.decode(&registry, &[0, 0, 0, 2, b'o', b'k'], 0), Ok(6));
    assert_eq!(element.decode(&registry, &[0, 0, 0, 1, b'!'], 0), Ok(5));
    assert_eq!(element.as_string().map(StringDataElement::value).as_deref(), Some("!"));
}

#[test]
fn test_signed_string_characters_keep_bit_pattern() {
    let mut registry = TypeRegistry::new();
    let ch = basic(&mut registry, "SChar", 8, Endianness::Big, NumericKind::Signed);
    let id = registry
        .create_array_data_type()
        .set_name("SString")
        .set_element_type(Some(ch))
        .set_cardinality(Cardinality::Fixed(2))
        .set_is_string(true)
        .handle()
        .into();
    let (e, r) = decode(&registry, id, &[0xE9, 0x41]);
    assert_eq!(r, Ok(2));
    assert_eq!(e.as_string().map(|s| s.code_units().to_vec()), Some(vec![0xE9, 0x41]));
}

#[test]
fn test_string_of_floats_is_rejected() {
    let mut registry = TypeRegistry::new();
    let f32_ty = basic(&mut registry, "F32", 32, Endianness::Big, NumericKind::Float);
    let id = registry
        .create_array_data_type()
        .set_name("FloatString")
        .set_element_type(Some(f32_ty))
        .set_is_string(true)
        .handle()
        .into();
    let (_, r) = decode(&registry, id, &[0, 0, 0, 1, 0, 0, 0, 0]);
    assert_eq!(
        r,
        Err(DecodeError::KindMismatch {
            expected: "integer",
            found: "float"
        })
    );
}

#[test]
fn test_string_of_enumerated_is_kind_mismatch() {
    let mut registry = TypeRegistry::with_standard_types();
    let boolean = std_type(&registry, "HLAboolean");
    let id = registry
        .create_array_data_type()
        .set_name("Flags")
        .set_element_type(Some(boolean))
        .set_is_string(true)
        .handle()
        .into();
    let (_, r) = decode(&registry, id, &[0, 0, 0, 0]);
    assert_eq!(
        r,
        Err(DecodeError::KindMismatch {
            expected: "basic",
            found: "enumerated"
        })
    );
}

#[test]
fn test_opaque_data_bytes() {
    let registry = TypeRegistry::with_standard_types();
    let (e, r) = decode(
        &registry,
        std_type(&registry, "HLAopaqueData"),
        &[0, 0, 0, 3, 0xDE, 0xAD, 0xBE],
    );
    assert_eq!(r, Ok(7));
    let array = e.as_array().expect("array");
    assert_eq!(array.to_bytes(), Some(vec![0xDE, 0xAD, 0xBE]));
    assert_eq!(array.data_element(2).and_then(DataElement::index_in_parent), Some(2));
}

#[test]
fn test_array_without_element_type_fails() {
    let mut registry = TypeRegistry::new();
    let id = registry.create_array_data_type().set_name("Empty").handle().into();
    let (_, r) = decode(&registry, id, &[0, 0, 0, 0]);
    assert_eq!(r, Err(DecodeError::MissingDataType));
}

#[test]
fn test_dynamic_count_above_limit() {
    let registry = TypeRegistry::with_standard_types();
    let config = DecodeConfig {
        max_dynamic_length: 2,
        ..Default::default()
    };
    let (e, r) = decode_with(
        &registry,
        config,
        std_type(&registry, "HLAopaqueData"),
        &[0, 0, 0, 3, 1, 2, 3],
    );
    assert_eq!(r, Err(DecodeError::OversizedLength { count: 3, max: 2 }));
    assert_eq!(e.as_array().map(ArrayDataElement::size), Some(0));
}

#[test]
fn test_hostile_count_does_not_resize() {
    let registry = TypeRegistry::with_standard_types();
    let (e, r) = decode(
        &registry,
        std_type(&registry, "HLAopaqueData"),
        &[0x7F, 0xFF, 0xFF, 0xFF, 0x01],
    );
    assert!(matches!(r, Err(DecodeError::Truncated { offset: 4, .. })));
    assert_eq!(e.as_array().map(ArrayDataElement::size), Some(0));
}

#[test]
fn test_zero_size_elements_need_one_byte_each() {
    let mut registry = TypeRegistry::new();
    let empty = registry.create_fixed_record_data_type().set_name("Empty").handle();
    let id = registry
        .create_array_data_type()
        .set_name("Empties")
        .set_element_type(Some(empty.into()))
        .set_cardinality(Cardinality::Fixed(3))
        .handle()
        .into();

    let (e, r) = decode(&registry, id, &[0x00]);
    assert_eq!(
        r,
        Err(DecodeError::Truncated {
            offset: 0,
            needed: 3,
            available: 1,
        })
    );
    assert_eq!(e.as_array().map(ArrayDataElement::size), Some(0));

    // Enough bytes for the guard: elements consume nothing.
    let (e, r) = decode(&registry, id, &[0x00, 0x00, 0x00]);
    assert_eq!(r, Ok(0));
    assert_eq!(e.as_array().map(ArrayDataElement::size), Some(3));
}

#[test]
fn test_count_limit_capped_at_signed_length() {
    let registry = TypeRegistry::with_standard_types();
    let config = DecodeConfig {
        max_dynamic_length: u32::MAX as usize,
        ..Default::default()
    };
    let (e, r) = decode_with(
        &registry,
        config,
        std_type(&registry, "HLAopaqueData"),
        &[0x80, 0x00, 0x00, 0x00, 0x01],
    );
    assert_eq!(
        r,
        Err(DecodeError::OversizedLength {
            count: 0x8000_0000,
            max: i32::MAX as usize,
        })
    );
    assert_eq!(e.as_array().map(ArrayDataElement::size), Some(0));
}

#[test]
fn test_array_shrinks_and_grows() {
    let registry = TypeRegistry::with_standard_types();
    let id = std_type(&registry, "HLAopaqueData");
    let mut element = registry.create_data_element(id).expect("array");
    assert_eq!(element.decode(&registry, &[0, 0, 0, 3, 1, 2, 3], 0), Ok(7));
    assert_eq!(element.decode(&registry, &[0, 0, 0, 1, 9], 0), Ok(5));
    let array = element.as_array().expect("array");
    assert_eq!(array.size(), 1);
    assert_eq!(array.to_bytes(), Some(vec![9]));
}

#[test]
fn test_record_aligns_to_widest_field() {
    let mut registry = TypeRegistry::with_standard_types();
    let octet = std_type(&registry, "HLAoctet");
    let int32 = std_type(&registry, "HLAinteger32BE");
    let record = registry.create_fixed_record_data_type();
    record.set_name("Padded");
    record.create_field().set_name("tag").set_data_type(Some(octet));
    record.create_field().set_name("value").set_data_type(Some(int32));
    let id = record.handle().into();

    // Record starts at 4, field 1 is padded from 5 to 8.
    let buffer = [0xAA, 0, 0, 0, 0x01, 0, 0, 0, 0, 0, 0, 0x2A];
    let mut element = registry.create_data_element(id).expect("record");
    let result = Decoder::new(&registry).decode(&mut element, &buffer, 1);
    assert_eq!(result, Ok(12));
    let record = element.as_fixed_record().expect("record");
    assert_eq!(record.field(0).map(scalar), Some(ScalarValue::U8(1)));
    assert_eq!(record.field(1).map(scalar), Some(ScalarValue::I32(42)));

    let packed = [0x01, 0, 0, 0, 0x2A];
    let (element, result) = decode_with(&registry, DecodeConfig::packed(), id, &packed);
    assert_eq!(result, Ok(5));
    let record = element.as_fixed_record().expect("record");
    assert_eq!(record.field(1).map(scalar), Some(ScalarValue::I32(42)));
}

#[test]
fn test_record_with_unresolved_field_fails() {
    let mut registry = TypeRegistry::with_standard_types();
    let octet = std_type(&registry, "HLAoctet");
    let record = registry.create_fixed_record_data_type();
    record.set_name("Broken");
    record.create_field().set_name("ok").set_data_type(Some(octet));
    record.create_field().set_name("missing").set_data_type(None);
    let id = record.handle().into();

    let (element, result) = decode(&registry, id, &[0x05, 0x06]);
    assert_eq!(result, Err(DecodeError::MissingDataType));
    // Not transactional: the first field keeps its value.
    let record = element.as_fixed_record().expect("record");
    assert_eq!(record.field(0).map(scalar), Some(ScalarValue::U8(5)));
}

fn shape_registry() -> (TypeRegistry, DataTypeId) {
    let mut registry = TypeRegistry::with_standard_types();
    let octet = registry.get_basic_data_type("HLAoctet").map(BasicDataType::handle);
    let int16 = std_type(&registry, "HLAinteger16BE");
    let float64 = std_type(&registry, "HLAfloat64BE");
    let string = std_type(&registry, "HLAASCIIstring");

    let kind = registry.create_enumerated_data_type();
    kind.set_name("ShapeKind").set_representation(octet);
    kind.create_enumerator().set_name("Circle").set_values("1");
    kind.create_enumerator().set_name("Square").set_values("2");
    kind.create_enumerator().set_name("Label").set_values("3");
    kind.create_enumerator().set_name("Unknown").set_values("9");
    let kind = kind.handle();

    let variant = registry.create_variant_record_data_type();
    variant
        .set_name("Shape")
        .set_discriminant_name("kind")
        .set_discriminant_type(Some(kind));
    variant
        .create_alternative()
        .set_name("radius")
        .set_enumerator("Circle")
        .set_data_type(Some(float64));
    variant
        .create_alternative()
        .set_name("side")
        .set_enumerator("Square")
        .set_data_type(Some(int16));
    variant
        .create_alternative()
        .set_name("text")
        .set_enumerator("Label")
        .set_data_type(Some(string));
    let id = variant.handle().into();
    (registry, id)
}

#[test]
fn test_variant_selects_alternative() {
    let (registry, id) = shape_registry();
    let mut element = registry.create_data_element(id).expect("variant");

    let mut buffer = vec![0x01, 0, 0, 0, 0, 0, 0, 0];
    buffer.extend_from_slice(&2.5f64.to_be_bytes());
    assert_eq!(element.decode(&registry, &buffer, 0), Ok(16));
    let variant = element.as_variant_record().expect("variant");
    assert_eq!(variant.discriminant().map(EnumeratedDataElement::numeric_value), Some(1));
    assert_eq!(variant.alternative_index(), Some(0));
    assert_eq!(variant.alternative().map(scalar), Some(ScalarValue::F64(2.5)));
    assert_eq!(
        variant.discriminant().and_then(EnumeratedDataElement::index_in_parent),
        Some(0)
    );
    assert_eq!(variant.alternative().and_then(DataElement::index_in_parent), Some(1));

    // Switching alternatives replaces the payload element.
    assert_eq!(element.decode(&registry, &[0x02, 0x00, 0x00, 0x07], 0), Ok(4));
    let variant = element.as_variant_record().expect("variant");
    assert_eq!(variant.alternative_index(), Some(1));
    assert_eq!(variant.alternative().map(scalar), Some(ScalarValue::I16(7)));
}

#[test]
fn test_variant_with_string_payload() {
    let (registry, id) = shape_registry();
    let (element, result) = decode(&registry, id, &[0x03, 0, 0, 0, 0, 0, 0, 2, b'h', b'i']);
    assert_eq!(result, Ok(10));
    let variant = element.as_variant_record().expect("variant");
    let text = variant.alternative().and_then(DataElement::as_string);
    assert_eq!(text.map(StringDataElement::value).as_deref(), Some("hi"));
}

#[test]
fn test_variant_unmatched_discriminant() {
    let (registry, id) = shape_registry();
    let (_, result) = decode(&registry, id, &[0x09, 0, 0, 0]);
    assert_eq!(result, Err(DecodeError::UnmatchedDiscriminant { value: 9 }));
    let (_, result) = decode(&registry, id, &[0x05, 0, 0, 0]);
    assert_eq!(result, Err(DecodeError::UnmatchedDiscriminant { value: 5 }));
}

#[test]
fn test_variant_other_alternative() {
    let (mut registry, id) = shape_registry();
    let int32 = std_type(&registry, "HLAinteger32BE");
    let DataTypeId::VariantRecord(handle) = id else {
        panic!("not a variant record");
    };
    registry
        .variant_record_data_types_mut()
        .get_mut(handle)
        .expect("variant")
        .create_alternative()
        .set_name("other")
        .set_enumerator(OTHER_ENUMERATOR)
        .set_data_type(Some(int32));

    let (element, result) = decode(&registry, id, &[0x09, 0, 0, 0, 0, 0, 0, 0x10]);
    assert_eq!(result, Ok(8));
    let variant = element.as_variant_record().expect("variant");
    assert_eq!(variant.alternative_index(), Some(3));
    assert_eq!(variant.alternative().map(scalar), Some(ScalarValue::I32(16)));

    // Values outside every enumerator also fall through to HLAother.
    let (_, result) = decode(&registry, id, &[0x42, 0, 0, 0, 0, 0, 0, 0x10]);
    assert_eq!(result, Ok(8));
}

#[test]
fn test_nesting_limit() {
    let registry = TypeRegistry::with_standard_types();
    let config = DecodeConfig {
        max_nesting_depth: 1,
        ..Default::default()
    };
    let (_, result) = decode_with(
        &registry,
        config,
        std_type(&registry, "HLAopaqueData"),
        &[0, 0, 0, 1, 0xFF],
    );
    assert!(matches!(result, Err(DecodeError::NestingTooDeep { depth: 1 })));
}

#[test]
fn test_erased_type_fails_decode() {
    let mut registry = TypeRegistry::with_standard_types();
    let id = std_type(&registry, "HLAoctet");
    let mut element = registry.create_data_element(id).expect("scalar");
    registry.erase_data_type(id);
    assert_eq!(
        element.decode(&registry, &[0x01], 0),
        Err(DecodeError::MissingDataType)
    );
}

#[test]
fn test_packed_policy_skips_padding() {
    let registry = TypeRegistry::with_standard_types();
    let config = DecodeConfig {
        alignment: AlignmentPolicy::Packed,
        ..Default::default()
    };
    let id = std_type(&registry, "HLAinteger32BE");
    let mut element = registry.create_data_element(id).expect("scalar");
    let result = Decoder::new(&registry)
        .with_config(config)
        .decode(&mut element, &[0xEE, 0, 0, 0, 5], 1);
    assert_eq!(result, Ok(5));
    assert_eq!(scalar(&element), ScalarValue::I32(5));
}

#[test]
fn test_decode_from_unaligned_offset_pads() {
    let registry = TypeRegistry::with_standard_types();
    let id = std_type(&registry, "HLAinteger32BE");
    let mut element = registry.create_data_element(id).expect("scalar");
    let result = element.decode(&registry, &[0xEE, 0xEE, 0, 0, 0, 5], 1);
    // Aligned from 1 to 4, only two bytes remain there.
    assert_eq!(
        result,
        Err(DecodeError::Truncated {
            offset: 4,
            needed: 4,
            available: 2
        })
    );
}
