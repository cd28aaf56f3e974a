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

//! PLAIN encoding: little-endian identity packing per physical type.
//!
//! Layouts:
//! * BOOLEAN: one bit per value, LSB-first within each byte
//! * INT32/FLOAT: 4 bytes LE; INT64/DOUBLE: 8 bytes LE
//! * INT96: 8 bytes LE sign-magnitude plus a 4-byte sign word
//! * BYTE_ARRAY: u32 LE length prefix per value
//! * FIXED_LEN_BYTE_ARRAY: concatenation of exactly `type_length` bytes

use bytes::Bytes;

use crate::basic::Type as PhysicalType;
use crate::encodings::{ceil, ByteCursor};
use crate::errors::Result;
use crate::record::ColumnValues;

/// Encodes a column's values, returning the value bytes of a page.
pub(crate) fn encode(values: &ColumnValues, type_length: i32) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    match values {
        ColumnValues::Boolean(values) => {
            out.resize(ceil(values.len(), 8), 0u8);
            for (i, value) in values.iter().enumerate() {
                if *value {
                    out[i / 8] |= 1 << (i % 8);
                }
            }
        }
        ColumnValues::Int32(values) => {
            out.reserve(values.len() * 4);
            for value in values {
                out.extend_from_slice(&value.to_le_bytes());
            }
        }
        ColumnValues::Int64(values) => {
            out.reserve(values.len() * 8);
            for value in values {
                out.extend_from_slice(&value.to_le_bytes());
            }
        }
        ColumnValues::Int96(values) => {
            out.reserve(values.len() * 12);
            for value in values {
                out.extend_from_slice(&value.unsigned_abs().to_le_bytes());
                let sign_word = if *value < 0 { u32::MAX } else { 0 };
                out.extend_from_slice(&sign_word.to_le_bytes());
            }
        }
        ColumnValues::Float(values) => {
            out.reserve(values.len() * 4);
            for value in values {
                out.extend_from_slice(&value.to_le_bytes());
            }
        }
        ColumnValues::Double(values) => {
            out.reserve(values.len() * 8);
            for value in values {
                out.extend_from_slice(&value.to_le_bytes());
            }
        }
        ColumnValues::ByteArray(values) => {
            for value in values {
                out.extend_from_slice(&(value.len() as u32).to_le_bytes());
                out.extend_from_slice(value);
            }
        }
        ColumnValues::FixedLenByteArray(values) => {
            if type_length <= 0 {
                return Err(codec_err!(
                    "FIXED_LEN_BYTE_ARRAY requires a positive type length, got {}",
                    type_length
                ));
            }
            for value in values {
                if value.len() != type_length as usize {
                    return Err(codec_err!(
                        "FIXED_LEN_BYTE_ARRAY value has {} bytes, expected {}",
                        value.len(),
                        type_length
                    ));
                }
                out.extend_from_slice(value);
            }
        }
    }
    Ok(out)
}

/// Decodes `count` values of the given physical type, advancing the cursor
/// by exactly the bytes consumed.
pub(crate) fn decode(
    cursor: &mut ByteCursor,
    physical_type: PhysicalType,
    count: usize,
    type_length: i32,
) -> Result<ColumnValues> {
    Ok(match physical_type {
        PhysicalType::BOOLEAN => {
            let bytes = cursor.read_exact(ceil(count, 8))?;
            let mut values = Vec::with_capacity(count);
            for i in 0..count {
                values.push(bytes[i / 8] >> (i % 8) & 1 == 1);
            }
            ColumnValues::Boolean(values)
        }
        PhysicalType::INT32 => {
            let bytes = cursor.read_exact(count * 4)?;
            ColumnValues::Int32(
                bytes
                    .chunks_exact(4)
                    .map(|c| i32::from_le_bytes(c.try_into().unwrap()))
                    .collect(),
            )
        }
        PhysicalType::INT64 => {
            let bytes = cursor.read_exact(count * 8)?;
            ColumnValues::Int64(
                bytes
                    .chunks_exact(8)
                    .map(|c| i64::from_le_bytes(c.try_into().unwrap()))
                    .collect(),
            )
        }
        PhysicalType::INT96 => {
            let bytes = cursor.read_exact(count * 12)?;
            ColumnValues::Int96(
                bytes
                    .chunks_exact(12)
                    .map(|c| {
                        let magnitude = u64::from_le_bytes(c[0..8].try_into().unwrap());
                        let sign_word = u32::from_le_bytes(c[8..12].try_into().unwrap());
                        let magnitude = magnitude as i64;
                        if sign_word != 0 {
                            -magnitude
                        } else {
                            magnitude
                        }
                    })
                    .collect(),
            )
        }
        PhysicalType::FLOAT => {
            let bytes = cursor.read_exact(count * 4)?;
            ColumnValues::Float(
                bytes
                    .chunks_exact(4)
                    .map(|c| f32::from_le_bytes(c.try_into().unwrap()))
                    .collect(),
            )
        }
        PhysicalType::DOUBLE => {
            let bytes = cursor.read_exact(count * 8)?;
            ColumnValues::Double(
                bytes
                    .chunks_exact(8)
                    .map(|c| f64::from_le_bytes(c.try_into().unwrap()))
                    .collect(),
            )
        }
        PhysicalType::BYTE_ARRAY => {
            let mut values = Vec::with_capacity(count);
            for _ in 0..count {
                let len = cursor.read_u32_le()? as usize;
                values.push(Bytes::copy_from_slice(cursor.read_exact(len)?));
            }
            ColumnValues::ByteArray(values)
        }
        PhysicalType::FIXED_LEN_BYTE_ARRAY => {
            if type_length <= 0 {
                return Err(codec_err!(
                    "FIXED_LEN_BYTE_ARRAY requires a positive type length, got {}",
                    type_length
                ));
            }
            let mut values = Vec::with_capacity(count);
            for _ in 0..count {
                values.push(Bytes::copy_from_slice(
                    cursor.read_exact(type_length as usize)?,
                ));
            }
            ColumnValues::FixedLenByteArray(values)
        }
    })
}
