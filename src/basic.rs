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

//! Rust mappings for the enums of the Parquet Thrift definition.
//! Refer to [`parquet.thrift`](https://github.com/apache/parquet-format/blob/master/src/main/thrift/parquet.thrift)
//! for the raw definitions; the numeric values here are the wire values.

use std::{fmt, str};

use crate::errors::{ParquetError, Result};

// ----------------------------------------------------------------------
// Mirrors thrift enum `Type`

/// Physical types supported by Parquet.
///
/// These are the on-disk carrier types; logical meaning is layered on top
/// through [`ConvertedType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum Type {
    BOOLEAN,
    INT32,
    INT64,
    INT96,
    FLOAT,
    DOUBLE,
    BYTE_ARRAY,
    FIXED_LEN_BYTE_ARRAY,
}

impl Type {
    /// Returns the wire value of this physical type.
    pub fn as_i32(&self) -> i32 {
        match self {
            Type::BOOLEAN => 0,
            Type::INT32 => 1,
            Type::INT64 => 2,
            Type::INT96 => 3,
            Type::FLOAT => 4,
            Type::DOUBLE => 5,
            Type::BYTE_ARRAY => 6,
            Type::FIXED_LEN_BYTE_ARRAY => 7,
        }
    }

    pub fn try_from_i32(value: i32) -> Result<Self> {
        Ok(match value {
            0 => Type::BOOLEAN,
            1 => Type::INT32,
            2 => Type::INT64,
            3 => Type::INT96,
            4 => Type::FLOAT,
            5 => Type::DOUBLE,
            6 => Type::BYTE_ARRAY,
            7 => Type::FIXED_LEN_BYTE_ARRAY,
            _ => return Err(general_err!("unexpected physical type {}", value)),
        })
    }
}

// ----------------------------------------------------------------------
// Mirrors thrift enum `ConvertedType`
//
// `NONE` is added to avoid `Option<ConvertedType>` everywhere; the wire
// value is the discriminant minus one.

/// Converted (logical) types overlaying a physical type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum ConvertedType {
    /// No type conversion; values carry the physical type unchanged.
    NONE,
    /// A BYTE_ARRAY holding UTF8 encoded chars.
    UTF8,
    /// A map converted as a group holding a repeated key/value pair group.
    MAP,
    /// The repeated key/value pair group inside a MAP.
    MAP_KEY_VALUE,
    /// A list converted as a group holding a repeated element group.
    LIST,
    /// An enum, stored as a binary field.
    ENUM,
    /// An unscaled decimal; precision and scale live in the schema element.
    DECIMAL,
    /// Days since the Unix epoch, stored as INT32.
    DATE,
    /// Milliseconds since midnight, stored as INT32.
    TIME_MILLIS,
    /// Microseconds since midnight, stored as INT64.
    TIME_MICROS,
    /// Milliseconds since the Unix epoch, stored as INT64.
    TIMESTAMP_MILLIS,
    /// Microseconds since the Unix epoch, stored as INT64.
    TIMESTAMP_MICROS,
    UINT_8,
    UINT_16,
    UINT_32,
    UINT_64,
    INT_8,
    INT_16,
    INT_32,
    INT_64,
    /// A JSON document, stored as a UTF8 BYTE_ARRAY.
    JSON,
    /// A BSON document, stored as a BYTE_ARRAY.
    BSON,
    /// A (months, days, milliseconds) triple of little-endian u32s,
    /// stored as a FIXED_LEN_BYTE_ARRAY of length 12.
    INTERVAL,
}

impl ConvertedType {
    /// Returns the wire value, or `None` for [`ConvertedType::NONE`].
    pub fn as_wire(&self) -> Option<i32> {
        match self {
            ConvertedType::NONE => None,
            other => Some(*other as i32 - 1),
        }
    }

    pub fn try_from_i32(value: i32) -> Result<Self> {
        Ok(match value {
            0 => ConvertedType::UTF8,
            1 => ConvertedType::MAP,
            2 => ConvertedType::MAP_KEY_VALUE,
            3 => ConvertedType::LIST,
            4 => ConvertedType::ENUM,
            5 => ConvertedType::DECIMAL,
            6 => ConvertedType::DATE,
            7 => ConvertedType::TIME_MILLIS,
            8 => ConvertedType::TIME_MICROS,
            9 => ConvertedType::TIMESTAMP_MILLIS,
            10 => ConvertedType::TIMESTAMP_MICROS,
            11 => ConvertedType::UINT_8,
            12 => ConvertedType::UINT_16,
            13 => ConvertedType::UINT_32,
            14 => ConvertedType::UINT_64,
            15 => ConvertedType::INT_8,
            16 => ConvertedType::INT_16,
            17 => ConvertedType::INT_32,
            18 => ConvertedType::INT_64,
            19 => ConvertedType::JSON,
            20 => ConvertedType::BSON,
            21 => ConvertedType::INTERVAL,
            _ => return Err(general_err!("unexpected converted type {}", value)),
        })
    }
}

// ----------------------------------------------------------------------
// Mirrors thrift enum `FieldRepetitionType`

/// Representation of field repetition in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum Repetition {
    /// Field is required (can not be null) and each row has exactly one value.
    REQUIRED,
    /// Field is optional (can be null) and each row has zero or one value.
    OPTIONAL,
    /// Field is repeated and each row has zero or more values.
    REPEATED,
}

impl Repetition {
    pub fn as_i32(&self) -> i32 {
        match self {
            Repetition::REQUIRED => 0,
            Repetition::OPTIONAL => 1,
            Repetition::REPEATED => 2,
        }
    }

    pub fn try_from_i32(value: i32) -> Result<Self> {
        Ok(match value {
            0 => Repetition::REQUIRED,
            1 => Repetition::OPTIONAL,
            2 => Repetition::REPEATED,
            _ => return Err(general_err!("unexpected repetition type {}", value)),
        })
    }
}

// ----------------------------------------------------------------------
// Mirrors thrift enum `Encoding`

/// Encodings supported for data pages and level streams.
///
/// Only the subset this crate can read and write is represented; other
/// wire values fail conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(non_camel_case_types)]
pub enum Encoding {
    /// Default encoding: little-endian packing per physical type.
    PLAIN,
    /// Group packed run length encoding, grouping values in runs of
    /// repeated values or blocks of bit-packed literals.
    RLE,
}

impl Encoding {
    pub fn as_i32(&self) -> i32 {
        match self {
            Encoding::PLAIN => 0,
            Encoding::RLE => 3,
        }
    }

    pub fn try_from_i32(value: i32) -> Result<Self> {
        Ok(match value {
            0 => Encoding::PLAIN,
            3 => Encoding::RLE,
            _ => return Err(codec_err!("invalid or unsupported encoding {}", value)),
        })
    }
}

// ----------------------------------------------------------------------
// Mirrors thrift enum `CompressionCodec`

/// Supported block compression algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum Compression {
    UNCOMPRESSED,
    SNAPPY,
    GZIP,
    LZO,
    BROTLI,
    LZ4,
}

impl Compression {
    pub fn as_i32(&self) -> i32 {
        match self {
            Compression::UNCOMPRESSED => 0,
            Compression::SNAPPY => 1,
            Compression::GZIP => 2,
            Compression::LZO => 3,
            Compression::BROTLI => 4,
            Compression::LZ4 => 5,
        }
    }

    pub fn try_from_i32(value: i32) -> Result<Self> {
        Ok(match value {
            0 => Compression::UNCOMPRESSED,
            1 => Compression::SNAPPY,
            2 => Compression::GZIP,
            3 => Compression::LZO,
            4 => Compression::BROTLI,
            5 => Compression::LZ4,
            _ => return Err(compression_err!("unknown compression method {}", value)),
        })
    }
}

// ----------------------------------------------------------------------
// Mirrors thrift enum `PageType`

/// Types of pages found in column chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum PageType {
    DATA_PAGE,
    INDEX_PAGE,
    DICTIONARY_PAGE,
    DATA_PAGE_V2,
}

impl PageType {
    pub fn as_i32(&self) -> i32 {
        match self {
            PageType::DATA_PAGE => 0,
            PageType::INDEX_PAGE => 1,
            PageType::DICTIONARY_PAGE => 2,
            PageType::DATA_PAGE_V2 => 3,
        }
    }

    pub fn try_from_i32(value: i32) -> Result<Self> {
        Ok(match value {
            0 => PageType::DATA_PAGE,
            1 => PageType::INDEX_PAGE,
            2 => PageType::DICTIONARY_PAGE,
            3 => PageType::DATA_PAGE_V2,
            _ => return Err(format_err!("unknown page type {}", value)),
        })
    }
}

// ----------------------------------------------------------------------
// Display

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl fmt::Display for ConvertedType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl fmt::Display for Repetition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

// ----------------------------------------------------------------------
// FromStr

impl str::FromStr for Encoding {
    type Err = ParquetError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PLAIN" | "plain" => Ok(Encoding::PLAIN),
            "RLE" | "rle" => Ok(Encoding::RLE),
            other => Err(codec_err!("invalid encoding {}", other)),
        }
    }
}

impl str::FromStr for Compression {
    type Err = ParquetError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "UNCOMPRESSED" | "uncompressed" => Ok(Compression::UNCOMPRESSED),
            "SNAPPY" | "snappy" => Ok(Compression::SNAPPY),
            "GZIP" | "gzip" => Ok(Compression::GZIP),
            "LZO" | "lzo" => Ok(Compression::LZO),
            "BROTLI" | "brotli" => Ok(Compression::BROTLI),
            "LZ4" | "lz4" => Ok(Compression::LZ4),
            other => Err(compression_err!("unknown compression method {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_wire_values_round_trip() {
        let all = [
            Type::BOOLEAN,
            Type::INT32,
            Type::INT64,
            Type::INT96,
            Type::FLOAT,
            Type::DOUBLE,
            Type::BYTE_ARRAY,
            Type::FIXED_LEN_BYTE_ARRAY,
        ];
        for t in all {
            assert_eq!(Type::try_from_i32(t.as_i32()).unwrap(), t);
        }
        assert!(Type::try_from_i32(8).is_err());
    }

    #[test]
    fn test_converted_type_wire_values_round_trip() {
        for raw in 0..=21 {
            let ct = ConvertedType::try_from_i32(raw).unwrap();
            assert_eq!(ct.as_wire(), Some(raw));
        }
        assert_eq!(ConvertedType::NONE.as_wire(), None);
        assert!(ConvertedType::try_from_i32(22).is_err());
    }

    #[test]
    fn test_encoding_from_str() {
        assert_eq!("PLAIN".parse::<Encoding>().unwrap(), Encoding::PLAIN);
        assert_eq!("rle".parse::<Encoding>().unwrap(), Encoding::RLE);
        assert!("DELTA_BINARY_PACKED".parse::<Encoding>().is_err());
    }

    #[test]
    fn test_compression_from_str() {
        assert_eq!(
            "SNAPPY".parse::<Compression>().unwrap(),
            Compression::SNAPPY
        );
        assert!("ZSTD".parse::<Compression>().is_err());
    }

    #[test]
    fn test_page_type_unknown() {
        assert!(PageType::try_from_i32(9).is_err());
        assert_eq!(
            PageType::try_from_i32(3).unwrap(),
            PageType::DATA_PAGE_V2
        );
    }
}
