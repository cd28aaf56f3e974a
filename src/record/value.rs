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

//! Dynamic record tree handed to the shredder and produced by assembly.

use bytes::Bytes;
use indexmap::IndexMap;

/// A dynamically typed value in a record tree.
///
/// Rows appended to a writer are [`Value::Record`]s whose field names match
/// the schema; nested groups are records, repeated fields are
/// [`Value::List`]s. Temporal values carry plain integers in the resolution
/// the column's converted type dictates.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    String(String),
    Bytes(Bytes),
    /// Days since the Unix epoch.
    Date(i32),
    /// Milliseconds since midnight.
    TimeMillis(i32),
    /// Microseconds since midnight.
    TimeMicros(i64),
    /// Milliseconds since the Unix epoch.
    TimestampMillis(i64),
    /// Microseconds since the Unix epoch.
    TimestampMicros(i64),
    /// Unscaled value and scale.
    Decimal(i128, i32),
    /// (months, days, milliseconds), each a u32.
    Interval(u32, u32, u32),
    List(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Record(IndexMap<String, Value>),
}

impl Value {
    /// Builds a record from field name/value pairs, preserving order.
    pub fn record<I, S>(fields: I) -> Value
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        Value::Record(
            fields
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        )
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Field lookup for records; `None` for any other variant.
    pub fn get_field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Record(fields) => fields.get(name),
            _ => None,
        }
    }

    /// The name of this variant, used in conversion error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Boolean(_) => "Boolean",
            Value::Int8(_) => "Int8",
            Value::Int16(_) => "Int16",
            Value::Int32(_) => "Int32",
            Value::Int64(_) => "Int64",
            Value::UInt8(_) => "UInt8",
            Value::UInt16(_) => "UInt16",
            Value::UInt32(_) => "UInt32",
            Value::UInt64(_) => "UInt64",
            Value::Float32(_) => "Float32",
            Value::Float64(_) => "Float64",
            Value::String(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::Date(_) => "Date",
            Value::TimeMillis(_) => "TimeMillis",
            Value::TimeMicros(_) => "TimeMicros",
            Value::TimestampMillis(_) => "TimestampMillis",
            Value::TimestampMicros(_) => "TimestampMicros",
            Value::Decimal(_, _) => "Decimal",
            Value::Interval(_, _, _) => "Interval",
            Value::List(_) => "List",
            Value::Map(_) => "Map",
            Value::Record(_) => "Record",
        }
    }

    /// Widens any signed or unsigned integer variant to i64.
    /// `None` for non-integer variants or out-of-range u64.
    pub(crate) fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int8(v) => Some(*v as i64),
            Value::Int16(v) => Some(*v as i64),
            Value::Int32(v) => Some(*v as i64),
            Value::Int64(v) => Some(*v),
            Value::UInt8(v) => Some(*v as i64),
            Value::UInt16(v) => Some(*v as i64),
            Value::UInt32(v) => Some(*v as i64),
            Value::UInt64(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int32(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int64(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float32(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float64(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Bytes> for Value {
    fn from(value: Bytes) -> Self {
        Value::Bytes(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(Bytes::from(value))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/// Builds a [`Value::Record`] from `name => value` pairs.
///
/// ```
/// use parq::record::Value;
/// use parq::record;
///
/// let row = record!("id" => 7i64, "name" => "alice");
/// assert_eq!(row.get_field("id"), Some(&Value::Int64(7)));
/// ```
#[macro_export]
macro_rules! record {
    ($($name:expr => $value:expr),* $(,)?) => {
        $crate::record::Value::record([
            $(($name, $crate::record::Value::from($value))),*
        ])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_macro_preserves_order() {
        let row = record!("b" => 1i64, "a" => 2i64);
        match &row {
            Value::Record(fields) => {
                let names: Vec<_> = fields.keys().cloned().collect();
                assert_eq!(names, vec!["b", "a"]);
            }
            _ => panic!("expected record"),
        }
    }

    #[test]
    fn test_from_impls() {
        assert_eq!(Value::from(true), Value::Boolean(true));
        assert_eq!(Value::from(1i32), Value::Int32(1));
        assert_eq!(Value::from("x"), Value::String("x".to_owned()));
        assert_eq!(
            Value::from(vec![1i64, 2]),
            Value::List(vec![Value::Int64(1), Value::Int64(2)])
        );
        assert_eq!(Value::from(None::<i64>), Value::Null);
    }

    #[test]
    fn test_as_i64_widening() {
        assert_eq!(Value::Int8(-3).as_i64(), Some(-3));
        assert_eq!(Value::UInt32(7).as_i64(), Some(7));
        assert_eq!(Value::UInt64(u64::MAX).as_i64(), None);
        assert_eq!(Value::String("no".to_owned()).as_i64(), None);
    }

    #[test]
    fn test_get_field() {
        let row = record!("x" => 1i32);
        assert_eq!(row.get_field("x"), Some(&Value::Int32(1)));
        assert_eq!(row.get_field("y"), None);
        assert_eq!(Value::Null.get_field("x"), None);
    }
}
