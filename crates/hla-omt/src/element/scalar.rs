// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Scalar values (basic and simple data types).

use std::fmt;

use crate::types::DataTypeId;

/// Decoded numeric value, tagged with its wire width and kind.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum ScalarValue {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    F32(f32),
    I64(i64),
    U64(u64),
    F64(f64),
}

impl ScalarValue {
    /// Integer view; floats truncate toward zero, `u64` above `i64::MAX` wraps.
    pub fn as_i64(self) -> i64 {
        match self {
            Self::I8(v) => i64::from(v),
            Self::U8(v) => i64::from(v),
            Self::I16(v) => i64::from(v),
            Self::U16(v) => i64::from(v),
            Self::I32(v) => i64::from(v),
            Self::U32(v) => i64::from(v),
            Self::F32(v) => v as i64,
            Self::I64(v) => v,
            Self::U64(v) => v as i64,
            Self::F64(v) => v as i64,
        }
    }

    /// Unsigned view; negative integers wrap.
    pub fn as_u64(self) -> u64 {
        match self {
            Self::U8(v) => u64::from(v),
            Self::U16(v) => u64::from(v),
            Self::U32(v) => u64::from(v),
            Self::U64(v) => v,
            Self::F32(v) => v as u64,
            Self::F64(v) => v as u64,
            other => other.as_i64() as u64,
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Self::F32(v) => f64::from(v),
            Self::F64(v) => v,
            Self::U64(v) => v as f64,
            other => other.as_i64() as f64,
        }
    }

    /// Wire width of the value.
    pub fn size_bits(self) -> u32 {
        match self {
            Self::I8(_) | Self::U8(_) => 8,
            Self::I16(_) | Self::U16(_) => 16,
            Self::I32(_) | Self::U32(_) | Self::F32(_) => 32,
            Self::I64(_) | Self::U64(_) | Self::F64(_) => 64,
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, Self::F32(_) | Self::F64(_))
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I8(v) => write!(f, "{}", v),
            Self::U8(v) => write!(f, "{}", v),
            Self::I16(v) => write!(f, "{}", v),
            Self::U16(v) => write!(f, "{}", v),
            Self::I32(v) => write!(f, "{}", v),
            Self::U32(v) => write!(f, "{}", v),
            Self::F32(v) => write!(f, "{}", v),
            Self::I64(v) => write!(f, "{}", v),
            Self::U64(v) => write!(f, "{}", v),
            Self::F64(v) => write!(f, "{}", v),
        }
    }
}

/// One numeric value bound to a basic or simple data type.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarDataElement {
    pub(crate) data_type: DataTypeId,
    pub(crate) index_in_parent: Option<usize>,
    pub(crate) value: Option<ScalarValue>,
}

impl ScalarDataElement {
    pub(crate) fn new(data_type: DataTypeId) -> Self {
        Self {
            data_type,
            index_in_parent: None,
            value: None,
        }
    }

    pub fn data_type(&self) -> DataTypeId {
        self.data_type
    }

    /// Last decoded value, `None` before the first successful read.
    pub fn value(&self) -> Option<ScalarValue> {
        self.value
    }

    pub fn set_value(&mut self, value: ScalarValue) {
        self.value = Some(value);
    }
}
