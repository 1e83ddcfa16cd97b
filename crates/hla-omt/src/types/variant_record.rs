// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Variant (discriminated) record data types.

use super::enumerated::EnumeratedDataType;
use super::list::{Handle, ListEntry};
use super::DataTypeId;

/// Enumerator name that catches every value no other alternative claims.
pub const OTHER_ENUMERATOR: &str = "HLAother";

/// Payload selected by one or more discriminant enumerators.
#[derive(Debug, Clone, PartialEq)]
pub struct Alternative {
    name: String,
    enumerator: String,
    data_type: Option<DataTypeId>,
    semantics: String,
    index: usize,
}

impl Alternative {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    /// Enumerator names selecting this alternative, comma separated.
    pub fn enumerator(&self) -> &str {
        &self.enumerator
    }

    pub fn set_enumerator(&mut self, enumerator: impl Into<String>) -> &mut Self {
        self.enumerator = enumerator.into();
        self
    }

    pub fn enumerator_names(&self) -> impl Iterator<Item = &str> {
        self.enumerator
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn data_type(&self) -> Option<DataTypeId> {
        self.data_type
    }

    pub fn set_data_type(&mut self, data_type: Option<DataTypeId>) -> &mut Self {
        self.data_type = data_type;
        self
    }

    pub fn semantics(&self) -> &str {
        &self.semantics
    }

    pub fn set_semantics(&mut self, semantics: impl Into<String>) -> &mut Self {
        self.semantics = semantics.into();
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    fn is_selected_by(&self, enumerator: &str) -> bool {
        self.enumerator_names().any(|name| name == enumerator)
    }
}

/// Enumerated discriminant followed by the payload of the selected alternative.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecordDataType {
    handle: Handle<VariantRecordDataType>,
    index_in_list: Option<usize>,
    name: String,
    discriminant_name: String,
    discriminant_type: Option<Handle<EnumeratedDataType>>,
    alternatives: Vec<Alternative>,
    encoding: String,
    semantics: String,
}

impl ListEntry for VariantRecordDataType {
    const KIND: &'static str = "variantRecord";

    fn with_handle(handle: Handle<Self>) -> Self {
        Self {
            handle,
            index_in_list: None,
            name: String::new(),
            discriminant_name: String::new(),
            discriminant_type: None,
            alternatives: Vec::new(),
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

super::impl_common_accessors!(VariantRecordDataType);

impl VariantRecordDataType {
    /// Name of the discriminant member.
    pub fn discriminant_name(&self) -> &str {
        &self.discriminant_name
    }

    pub fn set_discriminant_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.discriminant_name = name.into();
        self
    }

    pub fn discriminant_type(&self) -> Option<Handle<EnumeratedDataType>> {
        self.discriminant_type
    }

    pub fn set_discriminant_type(
        &mut self,
        discriminant_type: Option<Handle<EnumeratedDataType>>,
    ) -> &mut Self {
        self.discriminant_type = discriminant_type;
        self
    }

    pub fn create_alternative(&mut self) -> &mut Alternative {
        let index = self.alternatives.len();
        self.alternatives.push(Alternative {
            name: String::new(),
            enumerator: String::new(),
            data_type: None,
            semantics: String::new(),
            index,
        });
        &mut self.alternatives[index]
    }

    pub fn num_alternatives(&self) -> usize {
        self.alternatives.len()
    }

    pub fn alternative(&self, index: usize) -> Option<&Alternative> {
        self.alternatives.get(index)
    }

    pub fn alternative_mut(&mut self, index: usize) -> Option<&mut Alternative> {
        self.alternatives.get_mut(index)
    }

    pub fn alternatives(&self) -> &[Alternative] {
        &self.alternatives
    }

    /// Alternative selected by `enumerator`, falling back to `HLAother`.
    pub fn alternative_for_enumerator(&self, enumerator: &str) -> Option<&Alternative> {
        self.alternatives
            .iter()
            .find(|alt| alt.is_selected_by(enumerator))
            .or_else(|| {
                self.alternatives
                    .iter()
                    .find(|alt| alt.is_selected_by(OTHER_ENUMERATOR))
            })
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternative_selection() {
        let mut ty = VariantRecordDataType::with_handle(Handle::new(0));
        ty.set_name("Shape");
        ty.create_alternative().set_name("circle").set_enumerator("Circle");
        ty.create_alternative()
            .set_name("polygon")
            .set_enumerator("Triangle, Square");
        ty.create_alternative().set_name("rest").set_enumerator(OTHER_ENUMERATOR);

        let pick = |e: &str| ty.alternative_for_enumerator(e).map(Alternative::name);
        assert_eq!(pick("Circle"), Some("circle"));
        assert_eq!(pick("Square"), Some("polygon"));
        assert_eq!(pick("Hexagon"), Some("rest"));
        assert_eq!(ty.alternative(1).map(Alternative::index), Some(1));
    }

    #[test]
    fn test_no_fallback_without_other() {
        let mut ty = VariantRecordDataType::with_handle(Handle::new(0));
        ty.create_alternative().set_name("a").set_enumerator("A");
        assert!(ty.alternative_for_enumerator("B").is_none());
    }
}
