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

//! RLE/bit-packed hybrid encoding.
//!
//! Values are walked in blocks of 8. A block whose values are all equal
//! extends or starts a repeated run; other blocks accumulate into a
//! bit-packed run. Trailing values beyond the last full block are emitted
//! as count-1 repeated runs. Run headers are ULEB128 varints: repeated
//! runs encode `count << 1` followed by the value in `ceil(bit_width / 8)`
//! little-endian bytes; bit-packed runs encode `(blocks << 1) | 1`
//! followed by `bit_width` bytes per block, packed LSB-first.
//!
//! With the length envelope enabled the payload is prefixed by its byte
//! length as a 4-byte little-endian integer (data page v1 levels); v2
//! levels disable the envelope.

use crate::encodings::{ceil, ByteCursor};
use crate::errors::Result;

enum Run {
    Repeated { value: u64, count: usize },
    BitPacked { values: Vec<u64> },
}

fn check_bit_width(bit_width: u8) -> Result<()> {
    if bit_width == 0 || bit_width > 64 {
        return Err(codec_err!("invalid RLE bit width {}", bit_width));
    }
    Ok(())
}

/// Encodes `values`, each of which must fit in `bit_width` bits.
pub(crate) fn encode(values: &[u64], bit_width: u8, disable_envelope: bool) -> Result<Vec<u8>> {
    check_bit_width(bit_width)?;
    if bit_width < 64 {
        let limit = 1u64 << bit_width;
        if let Some(value) = values.iter().find(|v| **v >= limit) {
            return Err(codec_err!(
                "value {} does not fit in {} bits",
                value,
                bit_width
            ));
        }
    }

    let mut runs: Vec<Run> = Vec::new();
    let mut chunks = values.chunks_exact(8);
    for block in chunks.by_ref() {
        if block.iter().all(|v| *v == block[0]) {
            match runs.last_mut() {
                Some(Run::Repeated { value, count }) if *value == block[0] => *count += 8,
                _ => runs.push(Run::Repeated {
                    value: block[0],
                    count: 8,
                }),
            }
        } else {
            match runs.last_mut() {
                Some(Run::BitPacked { values }) => values.extend_from_slice(block),
                _ => runs.push(Run::BitPacked {
                    values: block.to_vec(),
                }),
            }
        }
    }
    // trailing values are emitted as single-count repeated runs
    for value in chunks.remainder() {
        runs.push(Run::Repeated {
            value: *value,
            count: 1,
        });
    }

    let mut payload = Vec::new();
    for run in &runs {
        match run {
            Run::Repeated { value, count } => {
                write_vlq(&mut payload, (*count as u64) << 1);
                let mut v = *value;
                for _ in 0..ceil(bit_width as usize, 8) {
                    payload.push(v as u8);
                    v >>= 8;
                }
            }
            Run::BitPacked { values } => {
                let blocks = values.len() / 8;
                write_vlq(&mut payload, ((blocks as u64) << 1) | 1);
                let start = payload.len();
                payload.resize(start + bit_width as usize * blocks, 0u8);
                let packed = &mut payload[start..];
                let mut bit_pos = 0usize;
                for value in values {
                    for k in 0..bit_width {
                        if value >> k & 1 == 1 {
                            packed[bit_pos / 8] |= 1 << (bit_pos % 8);
                        }
                        bit_pos += 1;
                    }
                }
            }
        }
    }

    if disable_envelope {
        Ok(payload)
    } else {
        let mut out = Vec::with_capacity(payload.len() + 4);
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out.extend_from_slice(&payload);
        Ok(out)
    }
}

/// Decodes exactly `count` values, advancing the cursor past the payload
/// (and the envelope when present).
pub(crate) fn decode(
    cursor: &mut ByteCursor,
    count: usize,
    bit_width: u8,
    disable_envelope: bool,
) -> Result<Vec<u64>> {
    check_bit_width(bit_width)?;
    if disable_envelope {
        return decode_payload(cursor, count, bit_width);
    }
    let payload_len = cursor.read_u32_le()? as usize;
    let payload = cursor.read_exact(payload_len)?;
    let mut inner = ByteCursor::new(payload);
    decode_payload(&mut inner, count, bit_width)
}

fn decode_payload(cursor: &mut ByteCursor, count: usize, bit_width: u8) -> Result<Vec<u64>> {
    let value_width = ceil(bit_width as usize, 8);
    let mut values = Vec::with_capacity(count);
    while values.len() < count {
        let header = read_vlq(cursor)?;
        if header & 1 == 1 {
            // bit-packed run
            let blocks = (header >> 1) as usize;
            let packed = cursor.read_exact(bit_width as usize * blocks)?;
            let mut bit_pos = 0usize;
            for _ in 0..blocks * 8 {
                let mut value = 0u64;
                for k in 0..bit_width {
                    value |= ((packed[bit_pos / 8] >> (bit_pos % 8)) as u64 & 1) << k;
                    bit_pos += 1;
                }
                values.push(value);
            }
        } else {
            let run_count = (header >> 1) as usize;
            let bytes = cursor.read_exact(value_width)?;
            let mut value = 0u64;
            for (i, byte) in bytes.iter().enumerate() {
                value |= (*byte as u64) << (8 * i);
            }
            values.extend(std::iter::repeat(value).take(run_count));
        }
    }
    if values.len() != count {
        return Err(codec_err!(
            "invalid RLE run: decoded {} values, expected {}",
            values.len(),
            count
        ));
    }
    Ok(values)
}

fn write_vlq(out: &mut Vec<u8>, mut value: u64) {
    while value > 0x7f {
        out.push(value as u8 | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

fn read_vlq(cursor: &mut ByteCursor) -> Result<u64> {
    let mut value = 0u64;
    let mut shift = 0u32;
    loop {
        let byte = cursor.read_u8()?;
        value |= ((byte & 0x7f) as u64).wrapping_shl(shift);
        if byte & 0x80 == 0 {
            return Ok(value);
        }
        shift += 7;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(values: &[u64], bit_width: u8, disable_envelope: bool) {
        let encoded = encode(values, bit_width, disable_envelope).unwrap();
        let mut cursor = ByteCursor::new(&encoded);
        let decoded = decode(&mut cursor, values.len(), bit_width, disable_envelope).unwrap();
        assert_eq!(decoded, values);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_bit_packed_block() {
        let values: Vec<u64> = (0..8).collect();
        let encoded = encode(&values, 3, true).unwrap();
        assert_eq!(encoded, vec![0x03, 0x88, 0xc6, 0xfa]);
        round_trip(&values, 3, true);
    }

    #[test]
    fn test_repeated_run() {
        let values = vec![42u64; 8];
        let encoded = encode(&values, 6, true).unwrap();
        assert_eq!(encoded, vec![0x10, 0x2a]);
        round_trip(&values, 6, true);
    }

    #[test]
    fn test_mixed_runs() {
        let mut values: Vec<u64> = (0..8).collect();
        values.extend(std::iter::repeat(4u64).take(8));
        values.extend(0..8);
        let encoded = encode(&values, 3, true).unwrap();
        assert_eq!(
            encoded,
            vec![0x03, 0x88, 0xc6, 0xfa, 0x10, 0x04, 0x03, 0x88, 0xc6, 0xfa]
        );
        round_trip(&values, 3, true);
    }

    #[test]
    fn test_envelope_prefixes_length() {
        let values = vec![1u64; 8];
        let encoded = encode(&values, 1, false).unwrap();
        let payload_len = u32::from_le_bytes(encoded[0..4].try_into().unwrap()) as usize;
        assert_eq!(payload_len, encoded.len() - 4);
        round_trip(&values, 1, false);
    }

    #[test]
    fn test_all_zero_aligned_input_is_one_run() {
        let values = vec![0u64; 32];
        let encoded = encode(&values, 3, true).unwrap();
        // header varint (32 << 1) = 64, then one zero value byte
        assert_eq!(encoded, vec![0x40, 0x00]);
        round_trip(&values, 3, true);
    }

    #[test]
    fn test_distinct_blocks_coalesce_into_one_bit_packed_run() {
        let values: Vec<u64> = (0..24).map(|v| v % 8).collect();
        let encoded = encode(&values, 3, true).unwrap();
        // one header for three blocks: (3 << 1) | 1 = 7
        assert_eq!(encoded[0], 0x07);
        assert_eq!(encoded.len(), 1 + 3 * 3);
        round_trip(&values, 3, true);
    }

    #[test]
    fn test_trailing_values_become_single_runs() {
        let values = vec![3u64, 3, 3];
        let encoded = encode(&values, 2, true).unwrap();
        // three repeated runs of count 1: (1 << 1) = 2, value byte 3
        assert_eq!(encoded, vec![0x02, 0x03, 0x02, 0x03, 0x02, 0x03]);
        round_trip(&values, 2, true);
    }

    #[test]
    fn test_wide_repeated_value_shifts_through_bytes() {
        // a 16-bit value must survive the multi-byte repeated-run body
        let values = vec![0x1234u64; 8];
        let encoded = encode(&values, 16, true).unwrap();
        assert_eq!(encoded, vec![0x10, 0x34, 0x12]);
        round_trip(&values, 16, true);
    }

    #[test]
    fn test_value_exceeding_bit_width_fails() {
        assert!(encode(&[8u64], 3, true).is_err());
        assert!(encode(&[2u64], 1, true).is_err());
    }

    #[test]
    fn test_invalid_bit_width() {
        assert!(encode(&[0u64], 0, true).is_err());
        assert!(encode(&[0u64], 65, true).is_err());
        let mut cursor = ByteCursor::new(&[0x02, 0x00]);
        assert!(decode(&mut cursor, 1, 0, true).is_err());
    }

    #[test]
    fn test_count_mismatch_fails() {
        // a bit-packed run always carries a multiple of 8 values
        let values: Vec<u64> = (0..8).collect();
        let encoded = encode(&values, 3, true).unwrap();
        let mut cursor = ByteCursor::new(&encoded);
        assert!(decode(&mut cursor, 5, 3, true).is_err());
    }

    #[test]
    fn test_truncated_payload_fails() {
        let values = vec![1u64; 16];
        let encoded = encode(&values, 1, true).unwrap();
        let mut cursor = ByteCursor::new(&encoded[..1]);
        assert!(decode(&mut cursor, 16, 1, true).is_err());
    }

    #[test]
    fn test_random_round_trips() {
        use rand::{rngs::StdRng, Rng, SeedableRng};
        let mut rng = StdRng::seed_from_u64(17);
        for bit_width in [1u8, 2, 3, 5, 7, 8, 13, 16, 31, 32, 40, 63, 64] {
            for len in [0usize, 1, 7, 8, 9, 64, 100, 1000] {
                let limit = if bit_width == 64 {
                    u64::MAX
                } else {
                    (1u64 << bit_width) - 1
                };
                let values: Vec<u64> = (0..len)
                    .map(|_| {
                        if rng.gen_bool(0.5) {
                            // runs are common in level streams
                            limit.min(1)
                        } else {
                            rng.gen_range(0..=limit)
                        }
                    })
                    .collect();
                round_trip(&values, bit_width, true);
                round_trip(&values, bit_width, false);
            }
        }
    }
}
