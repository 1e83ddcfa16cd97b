// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decode-time error taxonomy.
//!
//! A decode never unwinds: the first failure is latched in the
//! [`Cursor`](crate::cursor::Cursor) and every later step becomes a no-op.
//! The latched value is one of these variants.

use thiserror::Error;

/// Reason a decode call stopped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Not enough bytes for the next primitive read or alignment step.
    #[error("truncated buffer at offset {offset}: need {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A data type of the wrong kind was bound where a specific kind is required.
    #[error("data type kind mismatch: expected {expected}, found {found}")]
    KindMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// The bound data type (or a structurally required child type) is absent.
    #[error("missing data type")]
    MissingDataType,

    /// A dynamic array announced more elements than accepted.
    #[error("dynamic length {count} exceeds maximum {max}")]
    OversizedLength { count: u64, max: usize },

    /// 8- and 16-bit basic types cannot carry an IEEE-754 value.
    #[error("{size_bits}-bit basic data type cannot be decoded as float")]
    UnrepresentableFloat { size_bits: u32 },

    /// Basic data type width other than 8, 16, 32 or 64 bits.
    #[error("unsupported basic data type size: {size_bits} bits")]
    UnsupportedSize { size_bits: u32 },

    /// Variant record discriminant without a matching alternative.
    #[error("no alternative matches discriminant value {value}")]
    UnmatchedDiscriminant { value: i64 },

    /// Type graph recursion exceeded the configured limit.
    #[error("data type nesting exceeds depth {depth}")]
    NestingTooDeep { depth: usize },
}

/// Convenience alias for decode results.
pub type DecodeResult<T> = Result<T, DecodeError>;
