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

//! Encoder and decoder for definition and repetition levels.
//!
//! Levels are RLE encoded with the bit width derived from the maximum
//! level. Data page v1 keeps the 4-byte length envelope; v2 strips it and
//! records the byte length in the page header instead. A column whose
//! maximum level is zero has no level stream at all.

use crate::encodings::{num_required_bits, rle, ByteCursor};
use crate::errors::Result;

/// Encodes a level stream; returns an empty buffer when `max_level` is 0.
pub(crate) fn encode_levels(
    levels: &[u32],
    max_level: u32,
    disable_envelope: bool,
) -> Result<Vec<u8>> {
    if max_level == 0 {
        return Ok(Vec::new());
    }
    let bit_width = num_required_bits(max_level as u64);
    let widened: Vec<u64> = levels.iter().map(|l| *l as u64).collect();
    rle::encode(&widened, bit_width, disable_envelope)
}

/// Decodes `count` levels; yields all zeros without consuming input when
/// `max_level` is 0.
pub(crate) fn decode_levels(
    cursor: &mut ByteCursor,
    count: usize,
    max_level: u32,
    disable_envelope: bool,
) -> Result<Vec<u32>> {
    if max_level == 0 {
        return Ok(vec![0; count]);
    }
    let bit_width = num_required_bits(max_level as u64);
    let values = rle::decode(cursor, count, bit_width, disable_envelope)?;
    values
        .into_iter()
        .map(|v| {
            if v > max_level as u64 {
                Err(codec_err!("level {} exceeds maximum {}", v, max_level))
            } else {
                Ok(v as u32)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_max_level_produces_nothing() {
        let encoded = encode_levels(&[0, 0, 0], 0, false).unwrap();
        assert!(encoded.is_empty());
        let mut cursor = ByteCursor::new(&[]);
        let decoded = decode_levels(&mut cursor, 3, 0, false).unwrap();
        assert_eq!(decoded, vec![0, 0, 0]);
    }

    #[test]
    fn test_round_trip_with_envelope() {
        let levels = vec![0u32, 2, 1, 1, 0, 2, 2, 2, 1, 0];
        let encoded = encode_levels(&levels, 2, false).unwrap();
        let mut cursor = ByteCursor::new(&encoded);
        let decoded = decode_levels(&mut cursor, levels.len(), 2, false).unwrap();
        assert_eq!(decoded, levels);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_round_trip_without_envelope() {
        let levels = vec![1u32; 100];
        let encoded = encode_levels(&levels, 3, true).unwrap();
        let mut cursor = ByteCursor::new(&encoded);
        let decoded = decode_levels(&mut cursor, levels.len(), 3, true).unwrap();
        assert_eq!(decoded, levels);
    }

    #[test]
    fn test_level_exceeding_max_fails_decode() {
        let encoded = encode_levels(&[3, 3, 3, 3, 3, 3, 3, 3], 3, true).unwrap();
        let mut cursor = ByteCursor::new(&encoded);
        // decode with a smaller declared maximum
        assert!(decode_levels(&mut cursor, 8, 1, true).is_err());
    }
}
