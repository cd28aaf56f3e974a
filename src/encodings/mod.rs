// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Value and level encodings for data pages.

pub(crate) mod levels;
pub(crate) mod plain;
pub(crate) mod rle;

use crate::errors::Result;

/// A decoding cursor over a byte slice. Reads advance the offset by the
/// exact number of bytes consumed; underflow fails with an EOF error.
pub(crate) struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Remaining bytes without consuming them.
    pub(crate) fn peek_rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    pub(crate) fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.buf.len())
            .ok_or_else(|| {
                eof_err!(
                    "truncated input: need {} bytes at offset {}, have {}",
                    n,
                    self.pos,
                    self.buf.len() - self.pos
                )
            })?;
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_exact(1)?[0])
    }

    pub(crate) fn read_u32_le(&mut self) -> Result<u32> {
        let bytes = self.read_exact(4)?;
        Ok(u32::from_le_bytes(bytes.try_into().unwrap()))
    }
}

/// Returns the number of bits needed to represent `value`.
pub(crate) fn num_required_bits(value: u64) -> u8 {
    (64 - value.leading_zeros()) as u8
}

/// Integer division rounding up.
pub(crate) fn ceil(value: usize, divisor: usize) -> usize {
    (value + divisor - 1) / divisor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_advances_exactly() {
        let data = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_exact(2).unwrap(), &[1, 2]);
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.read_u32_le().unwrap(), u32::from_le_bytes([3, 4, 5, 6]));
        assert_eq!(cursor.remaining(), 2);
        assert!(cursor.read_exact(3).is_err());
        // a failed read does not advance
        assert_eq!(cursor.position(), 6);
    }

    #[test]
    fn test_num_required_bits() {
        assert_eq!(num_required_bits(0), 0);
        assert_eq!(num_required_bits(1), 1);
        assert_eq!(num_required_bits(2), 2);
        assert_eq!(num_required_bits(3), 2);
        assert_eq!(num_required_bits(7), 3);
        assert_eq!(num_required_bits(8), 4);
        assert_eq!(num_required_bits(u64::MAX), 64);
    }

    #[test]
    fn test_ceil() {
        assert_eq!(ceil(0, 8), 0);
        assert_eq!(ceil(1, 8), 1);
        assert_eq!(ceil(8, 8), 1);
        assert_eq!(ceil(9, 8), 2);
    }
}
