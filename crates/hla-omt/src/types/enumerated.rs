// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Enumerated data types.

use std::ops::RangeInclusive;

use super::basic::BasicDataType;
use super::list::{Handle, ListEntry};

/// One named value of an enumerated data type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumerator {
    name: String,
    values: String,
    index: usize,
    ranges: Vec<RangeInclusive<i64>>,
}

impl Enumerator {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    /// Raw value text as declared in the object model.
    pub fn values(&self) -> &str {
        &self.values
    }

    /// Set the value text; it is parsed here, once.
    pub fn set_values(&mut self, values: impl Into<String>) -> &mut Self {
        self.values = values.into();
        self.ranges = parse_values(&self.values, self.index);
        self
    }

    /// Position among the enumerators of the owning type.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Inclusive ranges parsed from the value text.
    ///
    /// Accepts integers and `lo..hi` ranges separated by commas or
    /// whitespace. Tokens that do not parse are ignored. Empty text yields
    /// the enumerator's ordinal position.
    pub fn numeric_values(&self) -> &[RangeInclusive<i64>] {
        &self.ranges
    }

    pub fn matches(&self, value: i64) -> bool {
        self.ranges.iter().any(|range| range.contains(&value))
    }
}

fn parse_values(values: &str, ordinal: usize) -> Vec<RangeInclusive<i64>> {
    if values.trim().is_empty() {
        let ordinal = ordinal as i64;
        return vec![ordinal..=ordinal];
    }
    values
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .filter_map(parse_value_token)
        .collect()
}

fn parse_value_token(token: &str) -> Option<RangeInclusive<i64>> {
    match token.split_once("..") {
        Some((lo, hi)) => {
            let lo = lo.trim().parse().ok()?;
            let hi = hi.trim().parse().ok()?;
            Some(lo..=hi)
        }
        None => {
            let value = token.parse().ok()?;
            Some(value..=value)
        }
    }
}

/// Enumeration encoded through a basic representation.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumeratedDataType {
    handle: Handle<EnumeratedDataType>,
    index_in_list: Option<usize>,
    name: String,
    representation: Option<Handle<BasicDataType>>,
    enumerators: Vec<Enumerator>,
    semantics: String,
}

impl ListEntry for EnumeratedDataType {
    const KIND: &'static str = "enumerated";

    fn with_handle(handle: Handle<Self>) -> Self {
        Self {
            handle,
            index_in_list: None,
            name: String::new(),
            representation: None,
            enumerators: Vec::new(),
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

super::impl_common_accessors!(EnumeratedDataType);

impl EnumeratedDataType {
    pub fn representation(&self) -> Option<Handle<BasicDataType>> {
        self.representation
    }

    pub fn set_representation(&mut self, representation: Option<Handle<BasicDataType>>) -> &mut Self {
        self.representation = representation;
        self
    }

    pub fn semantics(&self) -> &str {
        &self.semantics
    }

    pub fn set_semantics(&mut self, semantics: impl Into<String>) -> &mut Self {
        self.semantics = semantics.into();
        self
    }

    /// Append a new, unnamed enumerator.
    pub fn create_enumerator(&mut self) -> &mut Enumerator {
        let index = self.enumerators.len();
        self.enumerators.push(Enumerator {
            name: String::new(),
            values: String::new(),
            index,
            ranges: parse_values("", index),
        });
        &mut self.enumerators[index]
    }

    pub fn num_enumerators(&self) -> usize {
        self.enumerators.len()
    }

    pub fn enumerator(&self, index: usize) -> Option<&Enumerator> {
        self.enumerators.get(index)
    }

    pub fn enumerator_mut(&mut self, index: usize) -> Option<&mut Enumerator> {
        self.enumerators.get_mut(index)
    }

    pub fn enumerators(&self) -> &[Enumerator] {
        &self.enumerators
    }

    pub fn enumerator_by_name(&self, name: &str) -> Option<&Enumerator> {
        self.enumerators.iter().find(|e| e.name == name)
    }

    /// First enumerator whose declared values contain `value`.
    pub fn enumerator_for_value(&self, value: i64) -> Option<&Enumerator> {
        self.enumerators.iter().find(|e| e.matches(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enumerated(values: &[(&str, &str)]) -> EnumeratedDataType {
        let mut ty = EnumeratedDataType::with_handle(Handle::new(0));
        ty.set_name("Color");
        for (name, value) in values {
            ty.create_enumerator().set_name(*name).set_values(*value);
        }
        ty
    }

    #[test]
    fn test_numeric_values_parsing() {
        let ty = enumerated(&[("A", "1, 3 5..7"), ("B", "x, 9")]);
        let a = ty.enumerator(0).unwrap();
        assert_eq!(a.numeric_values(), vec![1..=1, 3..=3, 5..=7]);
        let b = ty.enumerator(1).unwrap();
        assert_eq!(b.numeric_values(), vec![9..=9]);
    }

    #[test]
    fn test_negative_values_and_ranges() {
        let ty = enumerated(&[("Neg", "-3..-1"), ("Zero", "0")]);
        assert_eq!(ty.enumerator_for_value(-2).map(Enumerator::name), Some("Neg"));
        assert_eq!(ty.enumerator_for_value(0).map(Enumerator::name), Some("Zero"));
        assert!(ty.enumerator_for_value(1).is_none());
    }

    #[test]
    fn test_values_parsed_when_set() {
        let mut ty = enumerated(&[("Low", "1")]);
        let low = ty.enumerator_mut(0).expect("enumerator");
        low.set_values("2..4");
        assert_eq!(low.numeric_values(), [2..=4].as_slice());
        assert!(low.matches(3));
        assert!(!low.matches(1));

        let fresh = ty.create_enumerator();
        assert_eq!(fresh.numeric_values(), [1..=1].as_slice());
    }

    #[test]
    fn test_empty_values_use_ordinal() {
        let ty = enumerated(&[("Red", ""), ("Green", ""), ("Blue", "")]);
        assert_eq!(ty.enumerator_for_value(2).map(Enumerator::name), Some("Blue"));
        assert_eq!(ty.enumerator_by_name("Green").map(Enumerator::index), Some(1));
    }
}
