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

//! Record shredding: striping nested records into per-leaf
//! (value, repetition level, definition level) column streams.

use bytes::Bytes;
use indexmap::IndexMap;

use crate::basic::{ConvertedType, Repetition, Type as PhysicalType};
use crate::errors::Result;
use crate::record::convert::{to_physical, PhysicalValue};
use crate::record::Value;
use crate::schema::types::{ColumnPath, SchemaDescriptor, TypePtr};

// ----------------------------------------------------------------------
// Column buffers

/// Typed storage for the non-null values of one column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Boolean(Vec<bool>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Int96(Vec<i64>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    ByteArray(Vec<Bytes>),
    FixedLenByteArray(Vec<Bytes>),
}

impl ColumnValues {
    pub(crate) fn new(physical_type: PhysicalType) -> Self {
        match physical_type {
            PhysicalType::BOOLEAN => ColumnValues::Boolean(Vec::new()),
            PhysicalType::INT32 => ColumnValues::Int32(Vec::new()),
            PhysicalType::INT64 => ColumnValues::Int64(Vec::new()),
            PhysicalType::INT96 => ColumnValues::Int96(Vec::new()),
            PhysicalType::FLOAT => ColumnValues::Float(Vec::new()),
            PhysicalType::DOUBLE => ColumnValues::Double(Vec::new()),
            PhysicalType::BYTE_ARRAY => ColumnValues::ByteArray(Vec::new()),
            PhysicalType::FIXED_LEN_BYTE_ARRAY => ColumnValues::FixedLenByteArray(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Boolean(v) => v.len(),
            ColumnValues::Int32(v) => v.len(),
            ColumnValues::Int64(v) => v.len(),
            ColumnValues::Int96(v) => v.len(),
            ColumnValues::Float(v) => v.len(),
            ColumnValues::Double(v) => v.len(),
            ColumnValues::ByteArray(v) => v.len(),
            ColumnValues::FixedLenByteArray(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn push(&mut self, value: PhysicalValue) -> Result<()> {
        match (self, value) {
            (ColumnValues::Boolean(v), PhysicalValue::Boolean(x)) => v.push(x),
            (ColumnValues::Int32(v), PhysicalValue::Int32(x)) => v.push(x),
            (ColumnValues::Int64(v), PhysicalValue::Int64(x)) => v.push(x),
            (ColumnValues::Int96(v), PhysicalValue::Int96(x)) => v.push(x),
            (ColumnValues::Float(v), PhysicalValue::Float(x)) => v.push(x),
            (ColumnValues::Double(v), PhysicalValue::Double(x)) => v.push(x),
            (ColumnValues::ByteArray(v), PhysicalValue::ByteArray(x)) => v.push(x),
            (ColumnValues::FixedLenByteArray(v), PhysicalValue::FixedLenByteArray(x)) => v.push(x),
            (buf, value) => {
                return Err(record_err!(
                    "value {:?} does not match column buffer {:?}",
                    value,
                    std::mem::discriminant(&*buf)
                ));
            }
        }
        Ok(())
    }

    pub(crate) fn get(&self, i: usize) -> PhysicalValue {
        match self {
            ColumnValues::Boolean(v) => PhysicalValue::Boolean(v[i]),
            ColumnValues::Int32(v) => PhysicalValue::Int32(v[i]),
            ColumnValues::Int64(v) => PhysicalValue::Int64(v[i]),
            ColumnValues::Int96(v) => PhysicalValue::Int96(v[i]),
            ColumnValues::Float(v) => PhysicalValue::Float(v[i]),
            ColumnValues::Double(v) => PhysicalValue::Double(v[i]),
            ColumnValues::ByteArray(v) => PhysicalValue::ByteArray(v[i].clone()),
            ColumnValues::FixedLenByteArray(v) => PhysicalValue::FixedLenByteArray(v[i].clone()),
        }
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        match self {
            ColumnValues::Boolean(v) => v.truncate(len),
            ColumnValues::Int32(v) => v.truncate(len),
            ColumnValues::Int64(v) => v.truncate(len),
            ColumnValues::Int96(v) => v.truncate(len),
            ColumnValues::Float(v) => v.truncate(len),
            ColumnValues::Double(v) => v.truncate(len),
            ColumnValues::ByteArray(v) => v.truncate(len),
            ColumnValues::FixedLenByteArray(v) => v.truncate(len),
        }
    }

    /// Appends all values from `other`, which must be the same variant.
    pub(crate) fn append(&mut self, other: ColumnValues) -> Result<()> {
        match (self, other) {
            (ColumnValues::Boolean(v), ColumnValues::Boolean(mut o)) => v.append(&mut o),
            (ColumnValues::Int32(v), ColumnValues::Int32(mut o)) => v.append(&mut o),
            (ColumnValues::Int64(v), ColumnValues::Int64(mut o)) => v.append(&mut o),
            (ColumnValues::Int96(v), ColumnValues::Int96(mut o)) => v.append(&mut o),
            (ColumnValues::Float(v), ColumnValues::Float(mut o)) => v.append(&mut o),
            (ColumnValues::Double(v), ColumnValues::Double(mut o)) => v.append(&mut o),
            (ColumnValues::ByteArray(v), ColumnValues::ByteArray(mut o)) => v.append(&mut o),
            (ColumnValues::FixedLenByteArray(v), ColumnValues::FixedLenByteArray(mut o)) => {
                v.append(&mut o)
            }
            _ => return Err(record_err!("cannot append mismatched column buffers")),
        }
        Ok(())
    }
}

/// The three parallel streams of one leaf column.
///
/// Invariants: `rep_levels.len() == def_levels.len() == num_values`, and
/// `values.len()` equals the number of entries whose definition level is
/// the column maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnData {
    pub rep_levels: Vec<u32>,
    pub def_levels: Vec<u32>,
    pub values: ColumnValues,
    pub num_values: usize,
}

impl ColumnData {
    pub(crate) fn new(physical_type: PhysicalType) -> Self {
        Self {
            rep_levels: Vec::new(),
            def_levels: Vec::new(),
            values: ColumnValues::new(physical_type),
            num_values: 0,
        }
    }

    pub(crate) fn append(&mut self, other: ColumnData) -> Result<()> {
        self.rep_levels.extend_from_slice(&other.rep_levels);
        self.def_levels.extend_from_slice(&other.def_levels);
        self.num_values += other.num_values;
        self.values.append(other.values)
    }
}

/// Buffered rows shredded into per-leaf column streams, keyed by leaf path
/// in schema order.
#[derive(Debug)]
pub struct RowBuffer {
    pub(crate) num_rows: usize,
    pub(crate) columns: IndexMap<ColumnPath, ColumnData>,
}

impl RowBuffer {
    /// Creates an empty buffer with one column stream per schema leaf.
    pub fn new(descr: &SchemaDescriptor) -> Self {
        let columns = descr
            .columns()
            .iter()
            .map(|c| (c.path().clone(), ColumnData::new(c.physical_type())))
            .collect();
        Self {
            num_rows: 0,
            columns,
        }
    }

    /// Creates a buffer holding only the given leaf columns (by index into
    /// the descriptor). Used by the reader for projected scans.
    pub(crate) fn with_columns(descr: &SchemaDescriptor, leaf_indices: &[usize]) -> Self {
        let columns = leaf_indices
            .iter()
            .map(|&i| {
                let c = descr.column(i);
                (c.path().clone(), ColumnData::new(c.physical_type()))
            })
            .collect();
        Self {
            num_rows: 0,
            columns,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn column(&self, path: &ColumnPath) -> Option<&ColumnData> {
        self.columns.get(path)
    }

    pub(crate) fn columns(&self) -> impl Iterator<Item = (&ColumnPath, &ColumnData)> {
        self.columns.iter()
    }

    /// Per-column stream lengths, used to roll back a partially shredded
    /// record.
    pub(crate) fn checkpoint(&self) -> Vec<(usize, usize)> {
        self.columns
            .values()
            .map(|c| (c.num_values, c.values.len()))
            .collect()
    }

    pub(crate) fn restore(&mut self, checkpoint: &[(usize, usize)]) {
        for (column, (num_values, value_count)) in self.columns.values_mut().zip(checkpoint) {
            column.rep_levels.truncate(*num_values);
            column.def_levels.truncate(*num_values);
            column.values.truncate(*value_count);
            column.num_values = *num_values;
        }
    }
}

// ----------------------------------------------------------------------
// Shredding

/// Shreds one record into the buffer, appending to every leaf column and
/// incrementing the row count.
pub fn shred_record(
    descr: &SchemaDescriptor,
    record: &Value,
    buffer: &mut RowBuffer,
) -> Result<()> {
    if !matches!(record, Value::Record(_)) {
        return Err(record_err!(
            "can only shred records, got {}",
            record.type_name()
        ));
    }
    let mut path = Vec::new();
    shred_group(
        descr,
        descr.root_schema().get_fields(),
        Some(record),
        0,
        0,
        0,
        0,
        &mut path,
        buffer,
    )?;
    buffer.num_rows += 1;
    Ok(())
}

/// Rewrites a plain list/map value into the canonical nested shape the
/// schema expects. The caller's value is left untouched.
fn composite_wrapper(field: &TypePtr, value: &Value) -> Option<Value> {
    match (field.get_basic_info().converted_type(), value) {
        (ConvertedType::LIST, Value::List(elements)) => {
            let items: Vec<Value> = elements
                .iter()
                .map(|e| Value::record([("element", e.clone())]))
                .collect();
            Some(Value::record([("list", Value::List(items))]))
        }
        (ConvertedType::MAP, Value::Map(entries)) => {
            let items: Vec<Value> = entries
                .iter()
                .map(|(k, v)| Value::record([("key", k.clone()), ("value", v.clone())]))
                .collect();
            Some(Value::record([("map", Value::List(items))]))
        }
        _ => None,
    }
}

#[allow(clippy::too_many_arguments)]
fn shred_group(
    descr: &SchemaDescriptor,
    fields: &[TypePtr],
    record: Option<&Value>,
    rlvl: u32,
    dlvl: u32,
    max_rep: u32,
    max_def: u32,
    path: &mut Vec<String>,
    buffer: &mut RowBuffer,
) -> Result<()> {
    for field in fields {
        let repetition = field.get_basic_info().repetition();
        let field_max_rep = max_rep + (repetition == Repetition::REPEATED) as u32;
        let field_max_def =
            max_def + (repetition != Repetition::REQUIRED) as u32;

        // fetch values; plain lists/maps are rewritten into the canonical
        // nested shape first
        let raw = record.and_then(|r| r.get_field(field.name()));
        let wrapper = raw.and_then(|v| composite_wrapper(field, v));
        let raw = wrapper.as_ref().or(raw);

        let values: Vec<&Value> = match raw {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::List(elements)) => elements.iter().collect(),
            Some(v) => vec![v],
        };

        if values.is_empty() && record.is_some() && repetition == Repetition::REQUIRED {
            return Err(record_err!(
                "missing required field '{}'",
                join_path(path, field.name())
            ));
        }
        if values.len() > 1 && repetition != Repetition::REPEATED {
            return Err(record_err!(
                "too many values for field '{}'",
                join_path(path, field.name())
            ));
        }

        path.push(field.name().to_owned());
        let result = if values.is_empty() {
            // the whole subtree is absent at the current levels
            match field.as_ref() {
                crate::schema::types::Type::GroupType { fields, .. } => shred_group(
                    descr,
                    fields,
                    None,
                    rlvl,
                    dlvl,
                    field_max_rep,
                    field_max_def,
                    path,
                    buffer,
                ),
                crate::schema::types::Type::PrimitiveType { .. } => {
                    push_null(descr, path, rlvl, dlvl, buffer)
                }
            }
        } else {
            let mut result = Ok(());
            for (i, value) in values.iter().copied().enumerate() {
                let rlvl_i = if i == 0 { rlvl } else { field_max_rep };
                result = match field.as_ref() {
                    crate::schema::types::Type::GroupType { fields, .. } => shred_group(
                        descr,
                        fields,
                        Some(value),
                        rlvl_i,
                        field_max_def,
                        field_max_rep,
                        field_max_def,
                        path,
                        buffer,
                    ),
                    crate::schema::types::Type::PrimitiveType { .. } => {
                        push_value(descr, path, rlvl_i, field_max_def, value, buffer)
                    }
                };
                if result.is_err() {
                    break;
                }
            }
            result
        };
        path.pop();
        result?;
    }
    Ok(())
}

fn join_path(path: &[String], name: &str) -> String {
    if path.is_empty() {
        name.to_owned()
    } else {
        format!("{}.{}", path.join("."), name)
    }
}

fn push_null(
    descr: &SchemaDescriptor,
    path: &[String],
    rlvl: u32,
    dlvl: u32,
    buffer: &mut RowBuffer,
) -> Result<()> {
    let idx = descr
        .column_index_by_parts(path)
        .ok_or_else(|| record_err!("unknown column '{}'", path.join(".")))?;
    let (_, column) = buffer
        .columns
        .get_index_mut(idx)
        .ok_or_else(|| record_err!("column '{}' not buffered", path.join(".")))?;
    column.rep_levels.push(rlvl);
    column.def_levels.push(dlvl);
    column.num_values += 1;
    Ok(())
}

fn push_value(
    descr: &SchemaDescriptor,
    path: &[String],
    rlvl: u32,
    dlvl: u32,
    value: &Value,
    buffer: &mut RowBuffer,
) -> Result<()> {
    let idx = descr
        .column_index_by_parts(path)
        .ok_or_else(|| record_err!("unknown column '{}'", path.join(".")))?;
    let physical = to_physical(descr.column(idx).as_ref(), value)?;
    let (_, column) = buffer
        .columns
        .get_index_mut(idx)
        .ok_or_else(|| record_err!("column '{}' not buffered", path.join(".")))?;
    column.rep_levels.push(rlvl);
    column.def_levels.push(dlvl);
    column.num_values += 1;
    column.values.push(physical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::Repetition;
    use crate::record;
    use crate::schema::types::{SchemaDescPtr, Type};
    use std::sync::Arc;

    fn simple_schema() -> SchemaDescPtr {
        let fields = vec![
            Arc::new(
                Type::primitive_type_builder("id", PhysicalType::INT64)
                    .with_repetition(Repetition::REQUIRED)
                    .build()
                    .unwrap(),
            ),
            Arc::new(
                Type::primitive_type_builder("score", PhysicalType::DOUBLE)
                    .with_repetition(Repetition::OPTIONAL)
                    .build()
                    .unwrap(),
            ),
        ];
        let root = Type::group_type_builder("root")
            .with_fields(fields)
            .build()
            .unwrap();
        Arc::new(SchemaDescriptor::new(Arc::new(root)).unwrap())
    }

    #[test]
    fn test_flat_shred() {
        let descr = simple_schema();
        let mut buffer = RowBuffer::new(&descr);
        shred_record(&descr, &record!("id" => 1i64, "score" => 0.5f64), &mut buffer).unwrap();
        shred_record(&descr, &record!("id" => 2i64), &mut buffer).unwrap();

        assert_eq!(buffer.num_rows(), 2);
        let id = buffer.column(&"id".into()).unwrap();
        assert_eq!(id.rep_levels, vec![0, 0]);
        assert_eq!(id.def_levels, vec![0, 0]);
        assert_eq!(id.values, ColumnValues::Int64(vec![1, 2]));

        let score = buffer.column(&"score".into()).unwrap();
        assert_eq!(score.def_levels, vec![1, 0]);
        assert_eq!(score.values, ColumnValues::Double(vec![0.5]));
        assert_eq!(score.num_values, 2);
    }

    #[test]
    fn test_missing_required_field() {
        let descr = simple_schema();
        let mut buffer = RowBuffer::new(&descr);
        let err = shred_record(&descr, &record!("score" => 0.5f64), &mut buffer).unwrap_err();
        assert!(err.to_string().contains("missing required field 'id'"));
    }

    #[test]
    fn test_explicit_null_for_required_field() {
        let descr = simple_schema();
        let mut buffer = RowBuffer::new(&descr);
        let row = record!("id" => None::<i64>, "score" => 0.5f64);
        assert!(shred_record(&descr, &row, &mut buffer).is_err());
    }

    #[test]
    fn test_too_many_values() {
        let descr = simple_schema();
        let mut buffer = RowBuffer::new(&descr);
        let row = record!("id" => vec![1i64, 2]);
        let err = shred_record(&descr, &row, &mut buffer).unwrap_err();
        assert!(err.to_string().contains("too many values"));
    }

    #[test]
    fn test_single_element_list_for_scalar_is_accepted() {
        let descr = simple_schema();
        let mut buffer = RowBuffer::new(&descr);
        let row = record!("id" => vec![9i64]);
        shred_record(&descr, &row, &mut buffer).unwrap();
        let id = buffer.column(&"id".into()).unwrap();
        assert_eq!(id.values, ColumnValues::Int64(vec![9]));
    }

    #[test]
    fn test_dremel_document_shred() {
        let descr = crate::schema::types::tests::dremel_document_schema();
        let mut buffer = RowBuffer::new(&descr);

        let r1 = record!(
            "DocId" => 10i64,
            "Links" => record!("Forward" => vec![20i64, 40, 60]),
            "Name" => Value::List(vec![
                record!(
                    "Language" => Value::List(vec![
                        record!("Code" => "en-us", "Country" => "us"),
                        record!("Code" => "en"),
                    ]),
                    "Url" => "http://A",
                ),
                record!("Url" => "http://B"),
                record!(
                    "Language" => Value::List(vec![
                        record!("Code" => "en-gb", "Country" => "gb"),
                    ]),
                ),
            ]),
        );
        let r2 = record!(
            "DocId" => 20i64,
            "Links" => record!("Backward" => vec![10i64, 30], "Forward" => vec![80i64]),
            "Name" => Value::List(vec![record!("Url" => "http://C")]),
        );
        shred_record(&descr, &r1, &mut buffer).unwrap();
        shred_record(&descr, &r2, &mut buffer).unwrap();

        let code = buffer.column(&"Name.Language.Code".into()).unwrap();
        assert_eq!(code.rep_levels, vec![0, 2, 1, 1, 0]);
        assert_eq!(code.def_levels, vec![2, 2, 1, 2, 1]);
        assert_eq!(
            code.values,
            ColumnValues::ByteArray(vec![
                Bytes::from_static(b"en-us"),
                Bytes::from_static(b"en"),
                Bytes::from_static(b"en-gb"),
            ])
        );

        let country = buffer.column(&"Name.Language.Country".into()).unwrap();
        assert_eq!(country.rep_levels, vec![0, 2, 1, 1, 0]);
        assert_eq!(country.def_levels, vec![3, 2, 1, 3, 1]);
        assert_eq!(
            country.values,
            ColumnValues::ByteArray(vec![Bytes::from_static(b"us"), Bytes::from_static(b"gb")])
        );

        let doc_id = buffer.column(&"DocId".into()).unwrap();
        assert_eq!(doc_id.rep_levels, vec![0, 0]);
        assert_eq!(doc_id.def_levels, vec![0, 0]);
        assert_eq!(doc_id.values, ColumnValues::Int64(vec![10, 20]));

        let backward = buffer.column(&"Links.Backward".into()).unwrap();
        assert_eq!(backward.rep_levels, vec![0, 0, 1]);
        assert_eq!(backward.def_levels, vec![1, 2, 2]);
        assert_eq!(backward.values, ColumnValues::Int64(vec![10, 30]));

        let forward = buffer.column(&"Links.Forward".into()).unwrap();
        assert_eq!(forward.rep_levels, vec![0, 1, 1, 0]);
        assert_eq!(forward.def_levels, vec![2, 2, 2, 2]);
        assert_eq!(forward.values, ColumnValues::Int64(vec![20, 40, 60, 80]));

        let url = buffer.column(&"Name.Url".into()).unwrap();
        assert_eq!(url.rep_levels, vec![0, 1, 1, 0]);
        assert_eq!(url.def_levels, vec![2, 2, 1, 2]);
    }

    #[test]
    fn test_list_sugar_shreds_like_canonical_shape() {
        let element = Arc::new(
            Type::primitive_type_builder("element", PhysicalType::INT64)
                .with_repetition(Repetition::REQUIRED)
                .build()
                .unwrap(),
        );
        let list = Type::list_of("values", Repetition::OPTIONAL, element).unwrap();
        let root = Type::group_type_builder("root")
            .with_fields(vec![Arc::new(list)])
            .build()
            .unwrap();
        let descr = Arc::new(SchemaDescriptor::new(Arc::new(root)).unwrap());

        let mut sugar = RowBuffer::new(&descr);
        shred_record(&descr, &record!("values" => vec![1i64, 2, 3]), &mut sugar).unwrap();

        let mut canonical = RowBuffer::new(&descr);
        let row = record!(
            "values" => record!(
                "list" => Value::List(vec![
                    record!("element" => 1i64),
                    record!("element" => 2i64),
                    record!("element" => 3i64),
                ]),
            ),
        );
        shred_record(&descr, &row, &mut canonical).unwrap();

        let path: ColumnPath = "values.list.element".into();
        assert_eq!(sugar.column(&path), canonical.column(&path));
        let col = sugar.column(&path).unwrap();
        assert_eq!(col.rep_levels, vec![0, 1, 1]);
        assert_eq!(col.def_levels, vec![2, 2, 2]);
    }

    #[test]
    fn test_map_sugar_shreds_into_key_value_columns() {
        let key = Arc::new(
            Type::primitive_type_builder("key", PhysicalType::BYTE_ARRAY)
                .with_converted_type(ConvertedType::UTF8)
                .with_repetition(Repetition::REQUIRED)
                .build()
                .unwrap(),
        );
        let value = Arc::new(
            Type::primitive_type_builder("value", PhysicalType::INT64)
                .with_repetition(Repetition::OPTIONAL)
                .build()
                .unwrap(),
        );
        let map = Type::map_of("attrs", Repetition::OPTIONAL, key, value).unwrap();
        let root = Type::group_type_builder("root")
            .with_fields(vec![Arc::new(map)])
            .build()
            .unwrap();
        let descr = Arc::new(SchemaDescriptor::new(Arc::new(root)).unwrap());

        let mut buffer = RowBuffer::new(&descr);
        let row = record!(
            "attrs" => Value::Map(vec![
                (Value::from("a"), Value::Int64(1)),
                (Value::from("b"), Value::Int64(2)),
            ]),
        );
        shred_record(&descr, &row, &mut buffer).unwrap();

        let keys = buffer.column(&"attrs.map.key".into()).unwrap();
        assert_eq!(keys.rep_levels, vec![0, 1]);
        assert_eq!(keys.def_levels, vec![2, 2]);
        let values = buffer.column(&"attrs.map.value".into()).unwrap();
        assert_eq!(values.def_levels, vec![3, 3]);
    }

    #[test]
    fn test_empty_repeated_list_shreds_as_absent() {
        let descr = crate::schema::types::tests::dremel_document_schema();
        let mut with_empty = RowBuffer::new(&descr);
        let row = record!(
            "DocId" => 1i64,
            "Links" => record!("Backward" => Value::List(vec![])),
        );
        shred_record(&descr, &row, &mut with_empty).unwrap();

        let mut without = RowBuffer::new(&descr);
        let row = record!("DocId" => 1i64, "Links" => Value::record([] as [(&str, Value); 0]));
        shred_record(&descr, &row, &mut without).unwrap();

        let path: ColumnPath = "Links.Backward".into();
        assert_eq!(with_empty.column(&path), without.column(&path));
    }
}
