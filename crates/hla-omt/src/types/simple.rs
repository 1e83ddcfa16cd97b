// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Simple data types: a basic representation plus descriptive metadata.

use super::basic::BasicDataType;
use super::list::{Handle, ListEntry};

/// Named wrapper around a basic representation (units, resolution...).
///
/// Decodes exactly like its representation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleDataType {
    handle: Handle<SimpleDataType>,
    index_in_list: Option<usize>,
    name: String,
    representation: Option<Handle<BasicDataType>>,
    units: String,
    resolution: String,
    accuracy: String,
    semantics: String,
}

impl ListEntry for SimpleDataType {
    const KIND: &'static str = "simple";

    fn with_handle(handle: Handle<Self>) -> Self {
        Self {
            handle,
            index_in_list: None,
            name: String::new(),
            representation: None,
            units: String::new(),
            resolution: String::new(),
            accuracy: String::new(),
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

super::impl_common_accessors!(SimpleDataType);

impl SimpleDataType {
    pub fn representation(&self) -> Option<Handle<BasicDataType>> {
        self.representation
    }

    pub fn set_representation(&mut self, representation: Option<Handle<BasicDataType>>) -> &mut Self {
        self.representation = representation;
        self
    }

    pub fn units(&self) -> &str {
        &self.units
    }

    pub fn set_units(&mut self, units: impl Into<String>) -> &mut Self {
        self.units = units.into();
        self
    }

    pub fn resolution(&self) -> &str {
        &self.resolution
    }

    pub fn set_resolution(&mut self, resolution: impl Into<String>) -> &mut Self {
        self.resolution = resolution.into();
        self
    }

    pub fn accuracy(&self) -> &str {
        &self.accuracy
    }

    pub fn set_accuracy(&mut self, accuracy: impl Into<String>) -> &mut Self {
        self.accuracy = accuracy.into();
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
