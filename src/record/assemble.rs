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

//! Record assembly: rebuilding nested records from per-leaf
//! (value, repetition level, definition level) column streams.

use indexmap::IndexMap;

use crate::basic::{ConvertedType, Repetition};
use crate::errors::Result;
use crate::record::convert::from_physical;
use crate::record::shred::RowBuffer;
use crate::record::Value;
use crate::schema::types::{SchemaDescriptor, Type, TypePtr};

/// One step of a leaf's ancestor chain with its static level information.
struct BranchStep {
    name: String,
    max_def: u32,
    repeated: bool,
}

/// Materializes all buffered rows back into records.
///
/// Rows come back in insertion order. Absent optional fields stay absent;
/// repeated fields materialize as lists in the canonical nested shape (use
/// [`unpack_composites`] to fold LIST/MAP groups into plain values).
pub fn materialize(descr: &SchemaDescriptor, buffer: &RowBuffer) -> Result<Vec<Value>> {
    let mut records: Vec<IndexMap<String, Value>> = Vec::new();
    records.resize_with(buffer.num_rows(), IndexMap::new);

    for (path, column) in buffer.columns() {
        let leaf_idx = descr
            .column_index(path)
            .ok_or_else(|| record_err!("unknown column '{}'", path))?;
        let leaf = descr.column(leaf_idx);
        let branch = descr
            .find_field_branch(path)
            .ok_or_else(|| record_err!("no schema branch for column '{}'", path))?;
        let steps = branch_steps(&branch);

        let mut r_counts = vec![0u32; leaf.max_rep_level() as usize + 1];
        let mut value_idx = 0usize;
        for i in 0..column.num_values {
            let r = column.rep_levels[i] as usize;
            let d = column.def_levels[i];
            r_counts[r] += 1;
            for count in r_counts[r + 1..].iter_mut() {
                *count = 0;
            }

            let mut value = if d == leaf.max_def_level() {
                let physical = column.values.get(value_idx);
                value_idx += 1;
                Some(from_physical(leaf.as_ref(), physical)?)
            } else {
                None
            };

            let row = r_counts[0] as usize - 1;
            let record = records
                .get_mut(row)
                .ok_or_else(|| record_err!("row index {} out of range", row))?;
            assemble_field(record, &steps, &r_counts[1..], d, &mut value)?;
        }
    }

    Ok(records.into_iter().map(Value::Record).collect())
}

fn branch_steps(branch: &[TypePtr]) -> Vec<BranchStep> {
    let mut max_def = 0;
    branch
        .iter()
        .map(|node| {
            let repetition = node.get_basic_info().repetition();
            if repetition != Repetition::REQUIRED {
                max_def += 1;
            }
            BranchStep {
                name: node.name().to_owned(),
                max_def,
                repeated: repetition == Repetition::REPEATED,
            }
        })
        .collect()
}

/// Walks one leaf entry down the branch, creating intermediate records and
/// repeated slots as dictated by the levels.
fn assemble_field(
    record: &mut IndexMap<String, Value>,
    steps: &[BranchStep],
    r_counts: &[u32],
    d_level: u32,
    value: &mut Option<Value>,
) -> Result<()> {
    let step = &steps[0];
    // the branch is null from this step on
    if d_level < step.max_def {
        return Ok(());
    }

    if steps.len() > 1 {
        if step.repeated {
            let slot = record
                .entry(step.name.clone())
                .or_insert_with(|| Value::List(Vec::new()));
            let items = match slot {
                Value::List(items) => items,
                other => {
                    return Err(record_err!(
                        "field '{}' materialized as both list and {}",
                        step.name,
                        other.type_name()
                    ));
                }
            };
            let idx = r_counts[0] as usize;
            while items.len() <= idx {
                items.push(Value::Record(IndexMap::new()));
            }
            match &mut items[idx] {
                Value::Record(child) => {
                    assemble_field(child, &steps[1..], &r_counts[1..], d_level, value)
                }
                other => Err(record_err!(
                    "repeated field '{}' holds a {} instead of a record",
                    step.name,
                    other.type_name()
                )),
            }
        } else {
            let slot = record
                .entry(step.name.clone())
                .or_insert_with(|| Value::Record(IndexMap::new()));
            match slot {
                Value::Record(child) => assemble_field(child, &steps[1..], r_counts, d_level, value),
                other => Err(record_err!(
                    "field '{}' materialized as both record and {}",
                    step.name,
                    other.type_name()
                )),
            }
        }
    } else {
        let leaf_value = value
            .take()
            .ok_or_else(|| record_err!("missing value for fully defined leaf '{}'", step.name))?;
        if step.repeated {
            let slot = record
                .entry(step.name.clone())
                .or_insert_with(|| Value::List(Vec::new()));
            let items = match slot {
                Value::List(items) => items,
                other => {
                    return Err(record_err!(
                        "field '{}' materialized as both list and {}",
                        step.name,
                        other.type_name()
                    ));
                }
            };
            let idx = r_counts[0] as usize;
            while items.len() <= idx {
                items.push(Value::Null);
            }
            items[idx] = leaf_value;
        } else {
            record.insert(step.name.clone(), leaf_value);
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------
// LIST / MAP unpacking

/// Folds canonical LIST and MAP group shapes back into plain
/// [`Value::List`] / [`Value::Map`] values, bottom-up. The input is
/// consumed; a fresh tree is returned.
pub fn unpack_composites(schema: &Type, value: Value) -> Value {
    let Value::Record(fields) = value else {
        return value;
    };
    let mut out = IndexMap::with_capacity(fields.len());
    for (name, field_value) in fields {
        let unpacked = match schema.get_field(&name) {
            Some(node) => unpack_node(node, field_value),
            None => field_value,
        };
        out.insert(name, unpacked);
    }
    Value::Record(out)
}

fn unpack_node(node: &TypePtr, value: Value) -> Value {
    if !node.is_group() {
        return value;
    }
    match node.get_basic_info().converted_type() {
        ConvertedType::LIST => unpack_list(node, value),
        ConvertedType::MAP => unpack_map(node, value),
        _ => match value {
            Value::List(items) => Value::List(
                items
                    .into_iter()
                    .map(|item| unpack_composites(node, item))
                    .collect(),
            ),
            other => unpack_composites(node, other),
        },
    }
}

fn unpack_list(node: &TypePtr, value: Value) -> Value {
    let Value::Record(mut fields) = value else {
        return value;
    };
    let Some(Value::List(items)) = fields.swap_remove("list") else {
        return Value::List(Vec::new());
    };
    let element_type = node.get_fields()[0].get_field("element").cloned();
    Value::List(
        items
            .into_iter()
            .map(|item| {
                let element = match item {
                    Value::Record(mut entry) => {
                        entry.swap_remove("element").unwrap_or(Value::Null)
                    }
                    other => other,
                };
                match &element_type {
                    Some(t) => unpack_node(t, element),
                    None => element,
                }
            })
            .collect(),
    )
}

fn unpack_map(node: &TypePtr, value: Value) -> Value {
    let Value::Record(mut fields) = value else {
        return value;
    };
    let Some(Value::List(items)) = fields.swap_remove("map") else {
        return Value::Map(Vec::new());
    };
    let value_type = node.get_fields()[0].get_field("value").cloned();
    Value::Map(
        items
            .into_iter()
            .map(|item| match item {
                Value::Record(mut entry) => {
                    let key = entry.swap_remove("key").unwrap_or(Value::Null);
                    let val = entry.swap_remove("value").unwrap_or(Value::Null);
                    let val = match &value_type {
                        Some(t) => unpack_node(t, val),
                        None => val,
                    };
                    (key, val)
                }
                other => (other, Value::Null),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::{Repetition, Type as PhysicalType};
    use crate::record;
    use crate::record::shred::shred_record;
    use crate::schema::types::SchemaDescPtr;
    use std::sync::Arc;

    fn round_trip(descr: &SchemaDescPtr, rows: &[Value]) -> Vec<Value> {
        let mut buffer = RowBuffer::new(descr);
        for row in rows {
            shred_record(descr, row, &mut buffer).unwrap();
        }
        materialize(descr, &buffer).unwrap()
    }

    #[test]
    fn test_dremel_document_round_trip() {
        let descr = crate::schema::types::tests::dremel_document_schema();
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

        let rows = round_trip(&descr, &[r1.clone(), r2.clone()]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], r1);
        assert_eq!(rows[1], r2);
    }

    #[test]
    fn test_optional_null_materializes_as_absent() {
        let fields = vec![
            Arc::new(
                Type::primitive_type_builder("id", PhysicalType::INT64)
                    .with_repetition(Repetition::REQUIRED)
                    .build()
                    .unwrap(),
            ),
            Arc::new(
                Type::primitive_type_builder("note", PhysicalType::BYTE_ARRAY)
                    .with_converted_type(ConvertedType::UTF8)
                    .with_repetition(Repetition::OPTIONAL)
                    .build()
                    .unwrap(),
            ),
        ];
        let root = Type::group_type_builder("root")
            .with_fields(fields)
            .build()
            .unwrap();
        let descr = Arc::new(SchemaDescriptor::new(Arc::new(root)).unwrap());

        let rows = round_trip(
            &descr,
            &[record!("id" => 1i64), record!("id" => 2i64, "note" => "hi")],
        );
        assert_eq!(rows[0], record!("id" => 1i64));
        assert_eq!(rows[1], record!("id" => 2i64, "note" => "hi"));
        assert_eq!(rows[0].get_field("note"), None);
    }

    #[test]
    fn test_repeated_leaf_round_trip() {
        let fields = vec![Arc::new(
            Type::primitive_type_builder("tags", PhysicalType::BYTE_ARRAY)
                .with_converted_type(ConvertedType::UTF8)
                .with_repetition(Repetition::REPEATED)
                .build()
                .unwrap(),
        )];
        let root = Type::group_type_builder("root")
            .with_fields(fields)
            .build()
            .unwrap();
        let descr = Arc::new(SchemaDescriptor::new(Arc::new(root)).unwrap());

        let rows = round_trip(
            &descr,
            &[
                record!("tags" => vec!["a", "b", "c"]),
                Value::record([] as [(&str, Value); 0]),
                record!("tags" => vec!["z"]),
            ],
        );
        assert_eq!(rows[0], record!("tags" => vec!["a", "b", "c"]));
        // empty repeated coalesces to absent
        assert_eq!(rows[1].get_field("tags"), None);
        assert_eq!(rows[2], record!("tags" => vec!["z"]));
    }

    #[test]
    fn test_multi_record_streams_concatenate() {
        let descr = crate::schema::types::tests::dremel_document_schema();
        let rows: Vec<Value> = (0..10)
            .map(|i| {
                record!(
                    "DocId" => i as i64,
                    "Name" => Value::List(vec![record!("Url" => format!("http://{i}"))]),
                )
            })
            .collect();
        let out = round_trip(&descr, &rows);
        assert_eq!(out.len(), 10);
        for (i, row) in out.iter().enumerate() {
            assert_eq!(row.get_field("DocId"), Some(&Value::Int64(i as i64)));
        }
    }

    #[test]
    fn test_unpack_list_and_map() {
        let element = Arc::new(
            Type::primitive_type_builder("element", PhysicalType::INT64)
                .with_repetition(Repetition::REQUIRED)
                .build()
                .unwrap(),
        );
        let list = Type::list_of("values", Repetition::OPTIONAL, element).unwrap();
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
        let root = Arc::new(
            Type::group_type_builder("root")
                .with_fields(vec![Arc::new(list), Arc::new(map)])
                .build()
                .unwrap(),
        );
        let descr = Arc::new(SchemaDescriptor::new(root.clone()).unwrap());

        let row = record!(
            "values" => vec![1i64, 2],
            "attrs" => Value::Map(vec![(Value::from("k"), Value::Int64(5))]),
        );
        let materialized = round_trip(&descr, std::slice::from_ref(&row));
        // canonical shape before unpacking
        assert!(matches!(
            materialized[0].get_field("values"),
            Some(Value::Record(_))
        ));
        let unpacked = unpack_composites(&root, materialized[0].clone());
        assert_eq!(unpacked, row);
    }
}
