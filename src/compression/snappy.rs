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

//! In-tree implementation of the [Snappy] raw block format.
//!
//! The payload starts with the uncompressed length as a ULEB128 varint,
//! followed by a stream of tagged instructions: literals and copies with
//! 1, 2 or 4 byte offsets. Compression works on 64 KiB fragments with an
//! LZ77 hash table per fragment.
//!
//! [Snappy]: https://github.com/google/snappy/blob/main/format_description.txt

use crate::errors::Result;

/// Fragment size for the block compressor.
const MAX_FRAGMENT: usize = 1 << 16;
/// Multiplier from the reference implementation's hash function.
const HASH_MULTIPLIER: u32 = 0x1e35_a7bd;
/// Upper bound on the hash table size (2^14 slots).
const MAX_HASH_BITS: u32 = 14;

/// An upper bound on the compressed size of `uncompressed_len` bytes.
pub fn max_compress_len(uncompressed_len: usize) -> usize {
    32 + uncompressed_len + uncompressed_len / 6
}

/// Compresses `input` into a fresh buffer.
pub fn compress(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(max_compress_len(input.len()) / 4 + 8);
    write_varint(&mut out, input.len() as u64);
    for fragment in input.chunks(MAX_FRAGMENT) {
        compress_fragment(fragment, &mut out);
    }
    out
}

fn load32(input: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes(input[pos..pos + 4].try_into().unwrap())
}

fn compress_fragment(fragment: &[u8], out: &mut Vec<u8>) {
    let len = fragment.len();
    if len < 4 {
        emit_literal(fragment, out);
        return;
    }

    let bits = (usize::BITS - 1 - len.leading_zeros()).clamp(1, MAX_HASH_BITS);
    let shift = 32 - bits;
    let mut table = vec![0u16; 1 << bits];
    let hash = |x: u32| (x.wrapping_mul(HASH_MULTIPLIER) >> shift) as usize;

    // last position where a 4-byte load is possible
    let bound = len - 4;
    let mut anchor = 0usize;
    let mut pos = 0usize;

    'outer: loop {
        // scan for a match, stepping further the longer nothing is found
        let mut skip = 32usize;
        let candidate = loop {
            if pos > bound {
                break 'outer;
            }
            let cur = load32(fragment, pos);
            let h = hash(cur);
            let candidate = table[h] as usize;
            table[h] = pos as u16;
            if candidate < pos && load32(fragment, candidate) == cur {
                break candidate;
            }
            pos += skip >> 5;
            skip += 1;
        };

        emit_literal(&fragment[anchor..pos], out);

        let mut matched = 4usize;
        while pos + matched < len && fragment[candidate + matched] == fragment[pos + matched] {
            matched += 1;
        }
        emit_copy(pos - candidate, matched, out);
        pos += matched;
        anchor = pos;
    }

    emit_literal(&fragment[anchor..], out);
}

fn emit_literal(literal: &[u8], out: &mut Vec<u8>) {
    if literal.is_empty() {
        return;
    }
    let n = literal.len() - 1;
    if n < 60 {
        out.push((n as u8) << 2);
    } else {
        let bits = usize::BITS - n.leading_zeros();
        let bytes = (bits + 7) / 8;
        out.push(((59 + bytes) as u8) << 2);
        for i in 0..bytes {
            out.push((n >> (8 * i)) as u8);
        }
    }
    out.extend_from_slice(literal);
}

fn emit_copy(offset: usize, mut len: usize, out: &mut Vec<u8>) {
    // long matches are chunked so each instruction stays within the tag
    // range; keep the final piece at least 4 bytes long
    while len >= 68 {
        emit_copy_upto_64(offset, 64, out);
        len -= 64;
    }
    if len > 64 {
        emit_copy_upto_64(offset, 60, out);
        len -= 60;
    }
    emit_copy_upto_64(offset, len, out);
}

fn emit_copy_upto_64(offset: usize, len: usize, out: &mut Vec<u8>) {
    debug_assert!((4..=64).contains(&len));
    if len < 12 && offset < 2048 {
        // 1-byte offset form: 3 high offset bits live in the tag
        out.push(0x01 | (((len - 4) as u8) << 2) | (((offset >> 8) as u8) << 5));
        out.push(offset as u8);
    } else if offset < 65536 {
        out.push(0x02 | (((len - 1) as u8) << 2));
        out.extend_from_slice(&(offset as u16).to_le_bytes());
    } else {
        out.push(0x03 | (((len - 1) as u8) << 2));
        out.extend_from_slice(&(offset as u32).to_le_bytes());
    }
}

/// Decompresses a Snappy payload.
pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    let (expected_len, mut pos) = read_varint(input)?;
    let expected_len = expected_len as usize;
    let mut out = Vec::with_capacity(expected_len);

    while pos < input.len() {
        let tag = input[pos];
        pos += 1;
        match tag & 0x03 {
            0x00 => {
                // literal
                let n = (tag >> 2) as usize;
                let len = if n < 60 {
                    n + 1
                } else {
                    let bytes = n - 59;
                    let raw = take(input, &mut pos, bytes)?;
                    let mut len = 0usize;
                    for (i, byte) in raw.iter().enumerate() {
                        len |= (*byte as usize) << (8 * i);
                    }
                    len + 1
                };
                out.extend_from_slice(take(input, &mut pos, len)?);
            }
            0x01 => {
                let len = 4 + ((tag >> 2) & 0x07) as usize;
                let offset = (((tag >> 5) as usize) << 8) | take(input, &mut pos, 1)?[0] as usize;
                copy_within(&mut out, offset, len)?;
            }
            0x02 => {
                let len = ((tag >> 2) as usize) + 1;
                let raw = take(input, &mut pos, 2)?;
                let offset = u16::from_le_bytes(raw.try_into().unwrap()) as usize;
                copy_within(&mut out, offset, len)?;
            }
            _ => {
                let len = ((tag >> 2) as usize) + 1;
                let raw = take(input, &mut pos, 4)?;
                let offset = u32::from_le_bytes(raw.try_into().unwrap()) as usize;
                copy_within(&mut out, offset, len)?;
            }
        }
    }

    if out.len() != expected_len {
        return Err(compression_err!(
            "invalid Snappy data: expected {} uncompressed bytes, produced {}",
            expected_len,
            out.len()
        ));
    }
    Ok(out)
}

fn take<'a>(input: &'a [u8], pos: &mut usize, n: usize) -> Result<&'a [u8]> {
    let end = pos
        .checked_add(n)
        .filter(|end| *end <= input.len())
        .ok_or_else(|| eof_err!("truncated Snappy instruction"))?;
    let slice = &input[*pos..end];
    *pos = end;
    Ok(slice)
}

/// Appends `len` bytes starting `offset` bytes back from the end of `out`.
/// Copies byte-by-byte so self-overlapping runs repeat correctly.
fn copy_within(out: &mut Vec<u8>, offset: usize, len: usize) -> Result<()> {
    if offset == 0 || offset > out.len() {
        return Err(compression_err!(
            "invalid Snappy copy: offset {} with {} bytes of output",
            offset,
            out.len()
        ));
    }
    let mut src = out.len() - offset;
    for _ in 0..len {
        let byte = out[src];
        out.push(byte);
        src += 1;
    }
    Ok(())
}

fn write_varint(out: &mut Vec<u8>, mut value: u64) {
    while value > 0x7f {
        out.push(value as u8 | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

fn read_varint(input: &[u8]) -> Result<(u64, usize)> {
    let mut value = 0u64;
    let mut pos = 0usize;
    loop {
        let byte = *input
            .get(pos)
            .ok_or_else(|| eof_err!("truncated Snappy length prefix"))?;
        value |= ((byte & 0x7f) as u64).wrapping_shl(7 * pos as u32);
        pos += 1;
        if byte & 0x80 == 0 {
            return Ok((value, pos));
        }
    }
}
