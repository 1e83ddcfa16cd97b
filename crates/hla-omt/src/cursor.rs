// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Read cursor with a sticky failure state.
//!
//! Once any operation fails the cursor stops touching the buffer: every later
//! `align`/`read_*` is a no-op returning zero, and the position reported
//! through [`Cursor::raw_position`] stays `-1`.

use crate::error::{DecodeError, DecodeResult};

/// Round `pos` up to the next multiple of `alignment` (a power of two).
///
/// An alignment of zero is treated as one.
#[inline]
pub fn align_offset(pos: usize, alignment: usize) -> usize {
    let alignment = alignment.max(1);
    let mask = alignment - 1;
    (pos + mask) & !mask
}

/// Generate endian-aware unsigned read methods.
///
/// Each generated method:
/// 1. Returns 0 if the cursor already failed
/// 2. Checks bounds (latches `DecodeError::Truncated` on overflow)
/// 3. Assembles the value with the requested byte order
/// 4. Advances the position
macro_rules! impl_read {
    ($name:ident, $type:ty, $size:expr, $from:ident) => {
        pub fn $name(&mut self) -> $type {
            match self.take($size) {
                Some(slice) => {
                    let mut bytes = [0u8; $size];
                    bytes.copy_from_slice(slice);
                    <$type>::$from(bytes)
                }
                None => 0,
            }
        }
    };
}

/// Bounds-checked, zero-copy reader over an incoming attribute buffer.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buffer: &'a [u8],
    state: Result<usize, DecodeError>,
}

impl<'a> Cursor<'a> {
    /// Start reading `buffer` at `pos`.
    pub fn new(buffer: &'a [u8], pos: usize) -> Self {
        Self {
            buffer,
            state: Ok(pos),
        }
    }

    /// Current position, or `None` once failed.
    pub fn position(&self) -> Option<usize> {
        self.state.as_ref().ok().copied()
    }

    /// Current position with the `-1` failure sentinel.
    pub fn raw_position(&self) -> i64 {
        match self.state {
            Ok(pos) => pos as i64,
            Err(_) => -1,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.state.is_err()
    }

    /// First error latched by this cursor.
    pub fn error(&self) -> Option<&DecodeError> {
        self.state.as_ref().err()
    }

    /// Bytes left after the current position (0 once failed).
    pub fn remaining(&self) -> usize {
        match self.state {
            Ok(pos) => self.buffer.len().saturating_sub(pos),
            Err(_) => 0,
        }
    }

    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    /// Latch `err` unless an earlier failure is already recorded.
    pub fn fail(&mut self, err: DecodeError) {
        if self.state.is_ok() {
            self.state = Err(err);
        }
    }

    /// Advance to the next multiple of `alignment`.
    ///
    /// Fails when the aligned position is not inside the buffer.
    pub fn align(&mut self, alignment: usize) {
        let Ok(pos) = self.state else {
            return;
        };
        let aligned = align_offset(pos, alignment);
        if aligned >= self.buffer.len() {
            self.state = Err(DecodeError::Truncated {
                offset: aligned,
                needed: 1,
                available: 0,
            });
            return;
        }
        self.state = Ok(aligned);
    }

    fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        let Ok(pos) = self.state else {
            return None;
        };
        let end = match pos.checked_add(len) {
            Some(end) if end <= self.buffer.len() => end,
            _ => {
                self.state = Err(DecodeError::Truncated {
                    offset: pos,
                    needed: len,
                    available: self.buffer.len().saturating_sub(pos),
                });
                return None;
            }
        };
        self.state = Ok(end);
        Some(&self.buffer[pos..end])
    }

    impl_read!(read_u8, u8, 1, from_le_bytes);
    impl_read!(read_u16_le, u16, 2, from_le_bytes);
    impl_read!(read_u16_be, u16, 2, from_be_bytes);
    impl_read!(read_u32_le, u32, 4, from_le_bytes);
    impl_read!(read_u32_be, u32, 4, from_be_bytes);
    impl_read!(read_u64_le, u64, 8, from_le_bytes);
    impl_read!(read_u64_be, u64, 8, from_be_bytes);

    /// Consume the cursor, yielding the final position or the latched error.
    pub fn finish(self) -> DecodeResult<usize> {
        self.state
    }
}
