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

//! The type kit: conversions between dynamic [`Value`]s and the physical
//! carrier values dictated by a column's converted type.

use bytes::Bytes;

use crate::basic::{ConvertedType, Type as PhysicalType};
use crate::errors::Result;
use crate::record::Value;
use crate::schema::types::ColumnDescriptor;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// A single value in its on-disk carrier representation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PhysicalValue {
    Boolean(bool),
    Int32(i32),
    Int64(i64),
    /// INT96 carried through an i64; see DESIGN notes on the narrow path.
    Int96(i64),
    Float(f32),
    Double(f64),
    ByteArray(Bytes),
    FixedLenByteArray(Bytes),
}

/// Converts a native value to the column's physical carrier, applying the
/// converted-type semantics and range checks.
pub(crate) fn to_physical(descr: &ColumnDescriptor, value: &Value) -> Result<PhysicalValue> {
    use ConvertedType::*;
    match descr.converted_type() {
        NONE => physical_passthrough(descr, value),
        UTF8 | ENUM | JSON => match value {
            Value::String(s) => Ok(PhysicalValue::ByteArray(Bytes::copy_from_slice(
                s.as_bytes(),
            ))),
            other => Err(conversion_err(descr, other)),
        },
        BSON => match value {
            Value::Bytes(b) => Ok(PhysicalValue::ByteArray(b.clone())),
            other => Err(conversion_err(descr, other)),
        },
        DATE => match value {
            Value::Date(days) => Ok(PhysicalValue::Int32(*days)),
            // a millisecond timestamp is accepted and truncated to days
            Value::TimestampMillis(ms) => {
                Ok(PhysicalValue::Int32((ms.div_euclid(MILLIS_PER_DAY)) as i32))
            }
            other => Err(conversion_err(descr, other)),
        },
        TIME_MILLIS => match value {
            Value::TimeMillis(v) => Ok(PhysicalValue::Int32(*v)),
            Value::Int32(v) => Ok(PhysicalValue::Int32(*v)),
            other => Err(conversion_err(descr, other)),
        },
        TIME_MICROS => match value {
            Value::TimeMicros(v) => Ok(PhysicalValue::Int64(*v)),
            Value::Int64(v) => Ok(PhysicalValue::Int64(*v)),
            other => Err(conversion_err(descr, other)),
        },
        TIMESTAMP_MILLIS => match value {
            Value::TimestampMillis(v) => Ok(PhysicalValue::Int64(*v)),
            Value::Int64(v) => Ok(PhysicalValue::Int64(*v)),
            other => Err(conversion_err(descr, other)),
        },
        TIMESTAMP_MICROS => match value {
            Value::TimestampMicros(v) => Ok(PhysicalValue::Int64(*v)),
            Value::Int64(v) => Ok(PhysicalValue::Int64(*v)),
            other => Err(conversion_err(descr, other)),
        },
        INT_8 => ranged_int32(descr, value, i8::MIN as i64, i8::MAX as i64),
        INT_16 => ranged_int32(descr, value, i16::MIN as i64, i16::MAX as i64),
        INT_32 => ranged_int32(descr, value, i32::MIN as i64, i32::MAX as i64),
        UINT_8 => ranged_int32(descr, value, 0, u8::MAX as i64),
        UINT_16 => ranged_int32(descr, value, 0, u16::MAX as i64),
        UINT_32 => match value {
            // the carrier keeps the raw bit pattern
            Value::UInt32(v) => Ok(PhysicalValue::Int32(*v as i32)),
            other => ranged_int32(descr, other, 0, u32::MAX as i64),
        },
        INT_64 => match value.as_i64() {
            Some(v) => Ok(PhysicalValue::Int64(v)),
            None => Err(conversion_err(descr, value)),
        },
        UINT_64 => match value {
            Value::UInt64(v) => Ok(PhysicalValue::Int64(*v as i64)),
            other => match other.as_i64() {
                Some(v) if v >= 0 => Ok(PhysicalValue::Int64(v)),
                _ => Err(conversion_err(descr, other)),
            },
        },
        INTERVAL => match value {
            Value::Interval(months, days, millis) => {
                let mut buf = Vec::with_capacity(12);
                buf.extend_from_slice(&months.to_le_bytes());
                buf.extend_from_slice(&days.to_le_bytes());
                buf.extend_from_slice(&millis.to_le_bytes());
                Ok(PhysicalValue::FixedLenByteArray(Bytes::from(buf)))
            }
            other => Err(conversion_err(descr, other)),
        },
        DECIMAL => decimal_to_physical(descr, value),
        LIST | MAP | MAP_KEY_VALUE => Err(record_err!(
            "structural type {} cannot carry values",
            descr.converted_type()
        )),
    }
}

/// Converts a physical carrier value back to the native representation.
pub(crate) fn from_physical(descr: &ColumnDescriptor, value: PhysicalValue) -> Result<Value> {
    use ConvertedType::*;
    match descr.converted_type() {
        NONE => native_passthrough(descr, value),
        UTF8 | ENUM | JSON => match value {
            PhysicalValue::ByteArray(b) => {
                let s = std::str::from_utf8(&b)
                    .map_err(|_| record_err!("invalid UTF-8 in column '{}'", descr.path()))?;
                Ok(Value::String(s.to_owned()))
            }
            other => Err(decode_mismatch(descr, &other)),
        },
        BSON => match value {
            PhysicalValue::ByteArray(b) => Ok(Value::Bytes(b)),
            other => Err(decode_mismatch(descr, &other)),
        },
        DATE => match value {
            PhysicalValue::Int32(days) => Ok(Value::Date(days)),
            other => Err(decode_mismatch(descr, &other)),
        },
        TIME_MILLIS => match value {
            PhysicalValue::Int32(v) => Ok(Value::TimeMillis(v)),
            other => Err(decode_mismatch(descr, &other)),
        },
        TIME_MICROS => match value {
            PhysicalValue::Int64(v) => Ok(Value::TimeMicros(v)),
            other => Err(decode_mismatch(descr, &other)),
        },
        TIMESTAMP_MILLIS => match value {
            PhysicalValue::Int64(v) => Ok(Value::TimestampMillis(v)),
            other => Err(decode_mismatch(descr, &other)),
        },
        TIMESTAMP_MICROS => match value {
            PhysicalValue::Int64(v) => Ok(Value::TimestampMicros(v)),
            other => Err(decode_mismatch(descr, &other)),
        },
        INT_8 => match value {
            PhysicalValue::Int32(v) => Ok(Value::Int8(v as i8)),
            other => Err(decode_mismatch(descr, &other)),
        },
        INT_16 => match value {
            PhysicalValue::Int32(v) => Ok(Value::Int16(v as i16)),
            other => Err(decode_mismatch(descr, &other)),
        },
        INT_32 => match value {
            PhysicalValue::Int32(v) => Ok(Value::Int32(v)),
            other => Err(decode_mismatch(descr, &other)),
        },
        INT_64 => match value {
            PhysicalValue::Int64(v) => Ok(Value::Int64(v)),
            other => Err(decode_mismatch(descr, &other)),
        },
        UINT_8 => match value {
            PhysicalValue::Int32(v) => Ok(Value::UInt8(v as u8)),
            other => Err(decode_mismatch(descr, &other)),
        },
        UINT_16 => match value {
            PhysicalValue::Int32(v) => Ok(Value::UInt16(v as u16)),
            other => Err(decode_mismatch(descr, &other)),
        },
        UINT_32 => match value {
            PhysicalValue::Int32(v) => Ok(Value::UInt32(v as u32)),
            other => Err(decode_mismatch(descr, &other)),
        },
        UINT_64 => match value {
            PhysicalValue::Int64(v) => Ok(Value::UInt64(v as u64)),
            other => Err(decode_mismatch(descr, &other)),
        },
        INTERVAL => match value {
            PhysicalValue::FixedLenByteArray(b) if b.len() == 12 => {
                let months = u32::from_le_bytes(b[0..4].try_into().unwrap());
                let days = u32::from_le_bytes(b[4..8].try_into().unwrap());
                let millis = u32::from_le_bytes(b[8..12].try_into().unwrap());
                Ok(Value::Interval(months, days, millis))
            }
            other => Err(decode_mismatch(descr, &other)),
        },
        DECIMAL => decimal_from_physical(descr, value),
        LIST | MAP | MAP_KEY_VALUE => Err(record_err!(
            "structural type {} cannot carry values",
            descr.converted_type()
        )),
    }
}

// ----------------------------------------------------------------------
// Plain physical pass-through

fn physical_passthrough(descr: &ColumnDescriptor, value: &Value) -> Result<PhysicalValue> {
    match (descr.physical_type(), value) {
        (PhysicalType::BOOLEAN, Value::Boolean(v)) => Ok(PhysicalValue::Boolean(*v)),
        (PhysicalType::INT32, Value::Int32(v)) => Ok(PhysicalValue::Int32(*v)),
        (PhysicalType::INT64, Value::Int64(v)) => Ok(PhysicalValue::Int64(*v)),
        (PhysicalType::INT96, Value::Int64(v)) => Ok(PhysicalValue::Int96(*v)),
        (PhysicalType::FLOAT, Value::Float32(v)) => Ok(PhysicalValue::Float(*v)),
        (PhysicalType::DOUBLE, Value::Float64(v)) => Ok(PhysicalValue::Double(*v)),
        (PhysicalType::BYTE_ARRAY, Value::Bytes(b)) => Ok(PhysicalValue::ByteArray(b.clone())),
        (PhysicalType::FIXED_LEN_BYTE_ARRAY, Value::Bytes(b)) => {
            if b.len() != descr.type_length() as usize {
                return Err(record_err!(
                    "invalid value for column '{}': expected {} bytes, got {}",
                    descr.path(),
                    descr.type_length(),
                    b.len()
                ));
            }
            Ok(PhysicalValue::FixedLenByteArray(b.clone()))
        }
        (_, other) => Err(conversion_err(descr, other)),
    }
}

fn native_passthrough(descr: &ColumnDescriptor, value: PhysicalValue) -> Result<Value> {
    match value {
        PhysicalValue::Boolean(v) => Ok(Value::Boolean(v)),
        PhysicalValue::Int32(v) => Ok(Value::Int32(v)),
        PhysicalValue::Int64(v) => Ok(Value::Int64(v)),
        PhysicalValue::Int96(v) => Ok(Value::Int64(v)),
        PhysicalValue::Float(v) => Ok(Value::Float32(v)),
        PhysicalValue::Double(v) => Ok(Value::Float64(v)),
        PhysicalValue::ByteArray(b) => Ok(Value::Bytes(b)),
        PhysicalValue::FixedLenByteArray(b) => {
            if b.len() != descr.type_length() as usize {
                return Err(record_err!(
                    "invalid value for column '{}': expected {} bytes, got {}",
                    descr.path(),
                    descr.type_length(),
                    b.len()
                ));
            }
            Ok(Value::Bytes(b))
        }
    }
}

// ----------------------------------------------------------------------
// Integers

fn ranged_int32(descr: &ColumnDescriptor, value: &Value, min: i64, max: i64) -> Result<PhysicalValue> {
    match value.as_i64() {
        Some(v) if v >= min && v <= max => Ok(PhysicalValue::Int32(v as i32)),
        Some(v) => Err(record_err!(
            "invalid value for column '{}': {} out of range [{}, {}]",
            descr.path(),
            v,
            min,
            max
        )),
        None => Err(conversion_err(descr, value)),
    }
}

// ----------------------------------------------------------------------
// DECIMAL

fn unscaled_from_value(descr: &ColumnDescriptor, value: &Value) -> Result<i128> {
    let scale = descr.type_scale();
    match value {
        Value::Decimal(unscaled, value_scale) => {
            if *value_scale != scale {
                return Err(record_err!(
                    "invalid value for column '{}': scale {} does not match column scale {}",
                    descr.path(),
                    value_scale,
                    scale
                ));
            }
            Ok(*unscaled)
        }
        // numeric inputs are scaled and rounded toward zero
        Value::Float64(v) => Ok((v * 10f64.powi(scale)).trunc() as i128),
        Value::Float32(v) => Ok((*v as f64 * 10f64.powi(scale)).trunc() as i128),
        other => match other.as_i64() {
            Some(v) => Ok((v as i128) * 10i128.pow(scale as u32)),
            None => Err(conversion_err(descr, other)),
        },
    }
}

fn decimal_to_physical(descr: &ColumnDescriptor, value: &Value) -> Result<PhysicalValue> {
    let unscaled = unscaled_from_value(descr, value)?;
    match descr.physical_type() {
        PhysicalType::INT32 => {
            let v = i32::try_from(unscaled).map_err(|_| {
                record_err!(
                    "invalid value for column '{}': unscaled decimal {} exceeds INT32",
                    descr.path(),
                    unscaled
                )
            })?;
            Ok(PhysicalValue::Int32(v))
        }
        PhysicalType::INT64 => {
            let v = i64::try_from(unscaled).map_err(|_| {
                record_err!(
                    "invalid value for column '{}': unscaled decimal {} exceeds INT64",
                    descr.path(),
                    unscaled
                )
            })?;
            Ok(PhysicalValue::Int64(v))
        }
        PhysicalType::FIXED_LEN_BYTE_ARRAY => {
            let length = descr.type_length() as usize;
            let bytes = unscaled.to_be_bytes();
            let fill = if unscaled < 0 { 0xff } else { 0x00 };
            // the value must survive truncation to `length` big-endian bytes
            if length < 16 && bytes[..16 - length].iter().any(|b| *b != fill) {
                return Err(record_err!(
                    "invalid value for column '{}': unscaled decimal {} does not fit in {} bytes",
                    descr.path(),
                    unscaled,
                    length
                ));
            }
            let mut out = vec![fill; length];
            let copy = length.min(16);
            out[length - copy..].copy_from_slice(&bytes[16 - copy..]);
            Ok(PhysicalValue::FixedLenByteArray(Bytes::from(out)))
        }
        PhysicalType::BYTE_ARRAY => {
            // minimal big-endian two's complement
            let bytes = unscaled.to_be_bytes();
            let fill = if unscaled < 0 { 0xffu8 } else { 0x00 };
            let mut start = 0;
            while start < 15
                && bytes[start] == fill
                && (bytes[start + 1] & 0x80 == 0x80) == (unscaled < 0)
            {
                start += 1;
            }
            Ok(PhysicalValue::ByteArray(Bytes::copy_from_slice(
                &bytes[start..],
            )))
        }
        other => Err(record_err!(
            "DECIMAL cannot be carried by physical type {}",
            other
        )),
    }
}

fn decimal_from_physical(descr: &ColumnDescriptor, value: PhysicalValue) -> Result<Value> {
    let scale = descr.type_scale();
    match value {
        PhysicalValue::Int32(v) => Ok(Value::Decimal(v as i128, scale)),
        PhysicalValue::Int64(v) => Ok(Value::Decimal(v as i128, scale)),
        PhysicalValue::FixedLenByteArray(b) | PhysicalValue::ByteArray(b) => {
            if b.is_empty() || b.len() > 16 {
                return Err(record_err!(
                    "invalid decimal width {} in column '{}'",
                    b.len(),
                    descr.path()
                ));
            }
            let negative = b[0] & 0x80 == 0x80;
            let fill = if negative { 0xff } else { 0x00 };
            let mut bytes = [fill; 16];
            bytes[16 - b.len()..].copy_from_slice(&b);
            Ok(Value::Decimal(i128::from_be_bytes(bytes), scale))
        }
        other => Err(decode_mismatch(descr, &other)),
    }
}

// ----------------------------------------------------------------------
// Errors

fn conversion_err(descr: &ColumnDescriptor, value: &Value) -> crate::errors::ParquetError {
    record_err!(
        "invalid value for column '{}': cannot convert {} to {} ({})",
        descr.path(),
        value.type_name(),
        descr.converted_type(),
        descr.physical_type()
    )
}

fn decode_mismatch(descr: &ColumnDescriptor, value: &PhysicalValue) -> crate::errors::ParquetError {
    record_err!(
        "decoded value {:?} does not match column '{}' ({})",
        value,
        descr.path(),
        descr.physical_type()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::Repetition;
    use crate::schema::types::{ColumnPath, Type};
    use std::sync::Arc;

    fn descr_for(builder: crate::schema::types::PrimitiveTypeBuilder) -> ColumnDescriptor {
        let t = Arc::new(builder.with_repetition(Repetition::REQUIRED).build().unwrap());
        let path = ColumnPath::from(t.name());
        ColumnDescriptor::new(t, 0, 0, path)
    }

    #[test]
    fn test_utf8_round_trip() {
        let descr = descr_for(
            Type::primitive_type_builder("s", PhysicalType::BYTE_ARRAY)
                .with_converted_type(ConvertedType::UTF8),
        );
        let physical = to_physical(&descr, &Value::from("grüße")).unwrap();
        assert_eq!(
            physical,
            PhysicalValue::ByteArray(Bytes::copy_from_slice("grüße".as_bytes()))
        );
        assert_eq!(from_physical(&descr, physical).unwrap(), Value::from("grüße"));
    }

    #[test]
    fn test_invalid_utf8_fails_decode() {
        let descr = descr_for(
            Type::primitive_type_builder("s", PhysicalType::BYTE_ARRAY)
                .with_converted_type(ConvertedType::UTF8),
        );
        let physical = PhysicalValue::ByteArray(Bytes::from_static(&[0xff, 0xfe]));
        assert!(from_physical(&descr, physical).is_err());
    }

    #[test]
    fn test_int8_range_check() {
        let descr = descr_for(
            Type::primitive_type_builder("i", PhysicalType::INT32)
                .with_converted_type(ConvertedType::INT_8),
        );
        assert_eq!(
            to_physical(&descr, &Value::Int8(-5)).unwrap(),
            PhysicalValue::Int32(-5)
        );
        assert_eq!(
            to_physical(&descr, &Value::Int32(127)).unwrap(),
            PhysicalValue::Int32(127)
        );
        assert!(to_physical(&descr, &Value::Int32(128)).is_err());
        assert_eq!(
            from_physical(&descr, PhysicalValue::Int32(-5)).unwrap(),
            Value::Int8(-5)
        );
    }

    #[test]
    fn test_uint64_bit_pattern() {
        let descr = descr_for(
            Type::primitive_type_builder("u", PhysicalType::INT64)
                .with_converted_type(ConvertedType::UINT_64),
        );
        let big = u64::MAX - 1;
        let physical = to_physical(&descr, &Value::UInt64(big)).unwrap();
        assert_eq!(physical, PhysicalValue::Int64(big as i64));
        assert_eq!(from_physical(&descr, physical).unwrap(), Value::UInt64(big));
    }

    #[test]
    fn test_date_from_timestamp_millis() {
        let descr = descr_for(
            Type::primitive_type_builder("d", PhysicalType::INT32)
                .with_converted_type(ConvertedType::DATE),
        );
        // 1970-01-03T12:00:00 -> day 2
        let ms = 2 * MILLIS_PER_DAY + MILLIS_PER_DAY / 2;
        assert_eq!(
            to_physical(&descr, &Value::TimestampMillis(ms)).unwrap(),
            PhysicalValue::Int32(2)
        );
        assert_eq!(
            to_physical(&descr, &Value::Date(19000)).unwrap(),
            PhysicalValue::Int32(19000)
        );
        assert_eq!(
            from_physical(&descr, PhysicalValue::Int32(19000)).unwrap(),
            Value::Date(19000)
        );
    }

    #[test]
    fn test_interval_layout() {
        let descr = descr_for(
            Type::primitive_type_builder("iv", PhysicalType::FIXED_LEN_BYTE_ARRAY)
                .with_converted_type(ConvertedType::INTERVAL)
                .with_length(12),
        );
        let physical = to_physical(&descr, &Value::Interval(1, 2, 3)).unwrap();
        match &physical {
            PhysicalValue::FixedLenByteArray(b) => {
                assert_eq!(
                    b.as_ref(),
                    [1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0]
                );
            }
            _ => panic!("expected fixed"),
        }
        assert_eq!(
            from_physical(&descr, physical).unwrap(),
            Value::Interval(1, 2, 3)
        );
    }

    #[test]
    fn test_decimal_int32_carrier() {
        let descr = descr_for(
            Type::primitive_type_builder("d", PhysicalType::INT32)
                .with_converted_type(ConvertedType::DECIMAL)
                .with_precision(9)
                .with_scale(2),
        );
        assert_eq!(
            to_physical(&descr, &Value::Decimal(123, 2)).unwrap(),
            PhysicalValue::Int32(123)
        );
        // numeric input is scaled and truncated toward zero
        assert_eq!(
            to_physical(&descr, &Value::Float64(1.239)).unwrap(),
            PhysicalValue::Int32(123)
        );
        assert_eq!(
            to_physical(&descr, &Value::Float64(-1.239)).unwrap(),
            PhysicalValue::Int32(-123)
        );
        assert_eq!(
            from_physical(&descr, PhysicalValue::Int32(123)).unwrap(),
            Value::Decimal(123, 2)
        );
        // scale mismatch
        assert!(to_physical(&descr, &Value::Decimal(123, 3)).is_err());
    }

    #[test]
    fn test_decimal_fixed_carrier_big_endian() {
        let descr = descr_for(
            Type::primitive_type_builder("d", PhysicalType::FIXED_LEN_BYTE_ARRAY)
                .with_converted_type(ConvertedType::DECIMAL)
                .with_precision(9)
                .with_scale(2)
                .with_length(4),
        );
        let physical = to_physical(&descr, &Value::Decimal(-1, 2)).unwrap();
        assert_eq!(
            physical,
            PhysicalValue::FixedLenByteArray(Bytes::from_static(&[0xff, 0xff, 0xff, 0xff]))
        );
        assert_eq!(
            from_physical(&descr, physical).unwrap(),
            Value::Decimal(-1, 2)
        );

        let physical = to_physical(&descr, &Value::Decimal(256, 2)).unwrap();
        assert_eq!(
            physical,
            PhysicalValue::FixedLenByteArray(Bytes::from_static(&[0, 0, 1, 0]))
        );
        // too wide for 4 bytes
        assert!(to_physical(&descr, &Value::Decimal(1i128 << 40, 2)).is_err());
    }

    #[test]
    fn test_decimal_byte_array_carrier_minimal() {
        let descr = descr_for(
            Type::primitive_type_builder("d", PhysicalType::BYTE_ARRAY)
                .with_converted_type(ConvertedType::DECIMAL)
                .with_precision(18)
                .with_scale(4),
        );
        let physical = to_physical(&descr, &Value::Decimal(1, 4)).unwrap();
        assert_eq!(physical, PhysicalValue::ByteArray(Bytes::from_static(&[1])));
        let physical = to_physical(&descr, &Value::Decimal(-1, 4)).unwrap();
        assert_eq!(
            physical,
            PhysicalValue::ByteArray(Bytes::from_static(&[0xff]))
        );
        let physical = to_physical(&descr, &Value::Decimal(128, 4)).unwrap();
        assert_eq!(
            physical,
            PhysicalValue::ByteArray(Bytes::from_static(&[0x00, 0x80]))
        );
        for unscaled in [0i128, 1, -1, 127, -128, 128, 300000, -300000] {
            let physical = to_physical(&descr, &Value::Decimal(unscaled, 4)).unwrap();
            assert_eq!(
                from_physical(&descr, physical).unwrap(),
                Value::Decimal(unscaled, 4)
            );
        }
    }

    #[test]
    fn test_fixed_len_byte_array_length_check() {
        let descr = descr_for(
            Type::primitive_type_builder("f", PhysicalType::FIXED_LEN_BYTE_ARRAY).with_length(3),
        );
        assert!(to_physical(&descr, &Value::from(vec![1u8, 2, 3])).is_ok());
        assert!(to_physical(&descr, &Value::from(vec![1u8, 2])).is_err());
    }

    #[test]
    fn test_int96_narrow_path() {
        let descr = descr_for(Type::primitive_type_builder("t", PhysicalType::INT96));
        let physical = to_physical(&descr, &Value::Int64(-42)).unwrap();
        assert_eq!(physical, PhysicalValue::Int96(-42));
        assert_eq!(from_physical(&descr, physical).unwrap(), Value::Int64(-42));
    }

    #[test]
    fn test_type_mismatch_fails() {
        let descr = descr_for(Type::primitive_type_builder("i", PhysicalType::INT32));
        assert!(to_physical(&descr, &Value::from("nope")).is_err());
        assert!(to_physical(&descr, &Value::Int64(1)).is_err());
    }
}
