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

//! Contains structs and methods to build Parquet schema and schema
//! descriptors.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::basic::{Compression, ConvertedType, Encoding, Repetition, Type as PhysicalType};
use crate::errors::Result;
use crate::format::SchemaElement;

/// Type alias for a reference counted schema node.
pub type TypePtr = Arc<Type>;
/// Type alias for a reference counted column descriptor.
pub type ColumnDescPtr = Arc<ColumnDescriptor>;
/// Type alias for a reference counted schema descriptor.
pub type SchemaDescPtr = Arc<SchemaDescriptor>;

// ----------------------------------------------------------------------
// Type

/// Representation of a Parquet schema node.
///
/// Primitive nodes (leaves) carry a physical type; group nodes carry named
/// children. The schema root is a group without a repetition.
#[derive(Debug, PartialEq)]
pub enum Type {
    PrimitiveType {
        basic_info: BasicTypeInfo,
        physical_type: PhysicalType,
        type_length: i32,
        scale: i32,
        precision: i32,
        encoding: Encoding,
        /// Per-column compression override; `None` inherits the file default.
        compression: Option<Compression>,
        /// Bit width for RLE-encoded columns.
        bit_width: Option<u8>,
    },
    GroupType {
        basic_info: BasicTypeInfo,
        fields: Vec<TypePtr>,
    },
}

/// Common type information shared by primitive and group nodes.
#[derive(Debug, PartialEq)]
pub struct BasicTypeInfo {
    name: String,
    repetition: Option<Repetition>,
    converted_type: ConvertedType,
}

impl BasicTypeInfo {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` for every node except the schema root.
    pub fn has_repetition(&self) -> bool {
        self.repetition.is_some()
    }

    /// Repetition of this node. Panics on the schema root, which has none.
    pub fn repetition(&self) -> Repetition {
        assert!(self.repetition.is_some());
        self.repetition.unwrap()
    }

    pub fn converted_type(&self) -> ConvertedType {
        self.converted_type
    }
}

impl Type {
    /// Creates a builder for a primitive (leaf) node.
    pub fn primitive_type_builder(
        name: &str,
        physical_type: PhysicalType,
    ) -> PrimitiveTypeBuilder {
        PrimitiveTypeBuilder::new(name, physical_type)
    }

    /// Creates a builder for a group node.
    pub fn group_type_builder(name: &str) -> GroupTypeBuilder {
        GroupTypeBuilder::new(name)
    }

    /// Builds the canonical LIST shape:
    /// `<name> (LIST) { repeated group list { element } }`.
    ///
    /// `element` must be named "element"; the shredder relies on the
    /// canonical child names when rewriting plain arrays.
    pub fn list_of(name: &str, repetition: Repetition, element: TypePtr) -> Result<Type> {
        if element.name() != "element" {
            return Err(schema_err!(
                "list element for '{}' must be named 'element', got '{}'",
                name,
                element.name()
            ));
        }
        let repeated = Type::group_type_builder("list")
            .with_repetition(Repetition::REPEATED)
            .with_fields(vec![element])
            .build()?;
        Type::group_type_builder(name)
            .with_repetition(repetition)
            .with_converted_type(ConvertedType::LIST)
            .with_fields(vec![Arc::new(repeated)])
            .build()
    }

    /// Builds the canonical MAP shape:
    /// `<name> (MAP) { repeated group map (MAP_KEY_VALUE) { key, value } }`.
    ///
    /// `key` must be a REQUIRED leaf named "key"; `value` must be named
    /// "value".
    pub fn map_of(
        name: &str,
        repetition: Repetition,
        key: TypePtr,
        value: TypePtr,
    ) -> Result<Type> {
        if key.name() != "key" || value.name() != "value" {
            return Err(schema_err!(
                "map children for '{}' must be named 'key' and 'value'",
                name
            ));
        }
        if !key.is_primitive() || key.get_basic_info().repetition() != Repetition::REQUIRED {
            return Err(schema_err!("map key for '{}' must be a required leaf", name));
        }
        let repeated = Type::group_type_builder("map")
            .with_repetition(Repetition::REPEATED)
            .with_converted_type(ConvertedType::MAP_KEY_VALUE)
            .with_fields(vec![key, value])
            .build()?;
        Type::group_type_builder(name)
            .with_repetition(repetition)
            .with_converted_type(ConvertedType::MAP)
            .with_fields(vec![Arc::new(repeated)])
            .build()
    }

    /// Returns this node's common information.
    pub fn get_basic_info(&self) -> &BasicTypeInfo {
        match self {
            Type::PrimitiveType { basic_info, .. } => basic_info,
            Type::GroupType { basic_info, .. } => basic_info,
        }
    }

    pub fn name(&self) -> &str {
        self.get_basic_info().name()
    }

    /// Gets the fields of this group. Panics on a primitive node.
    pub fn get_fields(&self) -> &[TypePtr] {
        match self {
            Type::GroupType { fields, .. } => &fields[..],
            _ => panic!("Cannot call get_fields() on a non-group type"),
        }
    }

    /// Gets the physical type of this leaf. Panics on a group node.
    pub fn get_physical_type(&self) -> PhysicalType {
        match self {
            Type::PrimitiveType { physical_type, .. } => *physical_type,
            _ => panic!("Cannot call get_physical_type() on a non-primitive type"),
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::PrimitiveType { .. })
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Type::GroupType { .. })
    }

    /// Returns `true` if this is the schema root (a group without
    /// repetition).
    pub fn is_schema(&self) -> bool {
        self.is_group() && !self.get_basic_info().has_repetition()
    }

    /// Looks up a direct child of this group by name.
    pub fn get_field(&self, name: &str) -> Option<&TypePtr> {
        match self {
            Type::GroupType { fields, .. } => fields.iter().find(|f| f.name() == name),
            _ => None,
        }
    }
}

// ----------------------------------------------------------------------
// Builders

/// Builder for primitive (leaf) nodes. `build()` validates the combination
/// of physical type, converted type, encoding, and compression.
pub struct PrimitiveTypeBuilder {
    name: String,
    physical_type: PhysicalType,
    repetition: Repetition,
    converted_type: ConvertedType,
    length: i32,
    precision: i32,
    scale: i32,
    encoding: Encoding,
    compression: Option<Compression>,
    bit_width: Option<u8>,
}

impl PrimitiveTypeBuilder {
    fn new(name: &str, physical_type: PhysicalType) -> Self {
        Self {
            name: name.to_owned(),
            physical_type,
            repetition: Repetition::OPTIONAL,
            converted_type: ConvertedType::NONE,
            length: -1,
            precision: -1,
            scale: -1,
            encoding: Encoding::PLAIN,
            compression: None,
            bit_width: None,
        }
    }

    pub fn with_repetition(mut self, repetition: Repetition) -> Self {
        self.repetition = repetition;
        self
    }

    pub fn with_converted_type(mut self, converted_type: ConvertedType) -> Self {
        self.converted_type = converted_type;
        self
    }

    /// Physical length for FIXED_LEN_BYTE_ARRAY columns.
    pub fn with_length(mut self, length: i32) -> Self {
        self.length = length;
        self
    }

    pub fn with_precision(mut self, precision: i32) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_scale(mut self, scale: i32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = Some(compression);
        self
    }

    /// Bit width for RLE value encoding of INT32/INT64 columns.
    pub fn with_bit_width(mut self, bit_width: u8) -> Self {
        self.bit_width = Some(bit_width);
        self
    }

    pub fn build(self) -> Result<Type> {
        let basic_info = BasicTypeInfo {
            name: self.name.clone(),
            repetition: Some(self.repetition),
            converted_type: self.converted_type,
        };

        if self.physical_type == PhysicalType::FIXED_LEN_BYTE_ARRAY && self.length <= 0 {
            return Err(schema_err!(
                "invalid FIXED_LEN_BYTE_ARRAY length {} for field '{}'",
                self.length,
                self.name
            ));
        }

        self.check_converted_type()?;
        let bit_width = self.check_encoding()?;

        Ok(Type::PrimitiveType {
            basic_info,
            physical_type: self.physical_type,
            type_length: self.length,
            scale: self.scale,
            precision: self.precision,
            encoding: self.encoding,
            compression: self.compression,
            bit_width,
        })
    }

    fn check_encoding(&self) -> Result<Option<u8>> {
        match self.encoding {
            Encoding::PLAIN => Ok(None),
            Encoding::RLE => match self.physical_type {
                PhysicalType::BOOLEAN => Ok(Some(1)),
                PhysicalType::INT32 | PhysicalType::INT64 => {
                    let max = if self.physical_type == PhysicalType::INT32 { 32 } else { 64 };
                    match self.bit_width {
                        Some(w) if (1..=max).contains(&w) => Ok(Some(w)),
                        Some(w) => Err(schema_err!(
                            "bit width {} out of range for RLE {} field '{}'",
                            w,
                            self.physical_type,
                            self.name
                        )),
                        None => Err(codec_err!(
                            "missing bit width for RLE encoded field '{}'",
                            self.name
                        )),
                    }
                }
                _ => Err(schema_err!(
                    "RLE encoding is not supported for {} field '{}'",
                    self.physical_type,
                    self.name
                )),
            },
        }
    }

    fn check_converted_type(&self) -> Result<()> {
        use ConvertedType::*;
        match self.converted_type {
            NONE => Ok(()),
            UTF8 | ENUM | JSON | BSON => self.expect_physical(PhysicalType::BYTE_ARRAY),
            DATE | TIME_MILLIS | UINT_8 | UINT_16 | UINT_32 | INT_8 | INT_16 | INT_32 => {
                self.expect_physical(PhysicalType::INT32)
            }
            TIME_MICROS | TIMESTAMP_MILLIS | TIMESTAMP_MICROS | UINT_64 | INT_64 => {
                self.expect_physical(PhysicalType::INT64)
            }
            INTERVAL => {
                self.expect_physical(PhysicalType::FIXED_LEN_BYTE_ARRAY)?;
                if self.length != 12 {
                    return Err(schema_err!(
                        "INTERVAL field '{}' must have length 12, got {}",
                        self.name,
                        self.length
                    ));
                }
                Ok(())
            }
            DECIMAL => self.check_decimal(),
            LIST | MAP | MAP_KEY_VALUE => Err(schema_err!(
                "{} cannot be applied to primitive field '{}'",
                self.converted_type,
                self.name
            )),
        }
    }

    fn expect_physical(&self, expected: PhysicalType) -> Result<()> {
        if self.physical_type != expected {
            return Err(schema_err!(
                "{} cannot annotate field '{}' because it is not a {} field",
                self.converted_type,
                self.name,
                expected
            ));
        }
        Ok(())
    }

    fn check_decimal(&self) -> Result<()> {
        match self.physical_type {
            PhysicalType::INT32
            | PhysicalType::INT64
            | PhysicalType::BYTE_ARRAY
            | PhysicalType::FIXED_LEN_BYTE_ARRAY => {}
            _ => {
                return Err(schema_err!(
                    "DECIMAL can only annotate INT32, INT64, BYTE_ARRAY and FIXED_LEN_BYTE_ARRAY, \
                     not {} field '{}'",
                    self.physical_type,
                    self.name
                ));
            }
        }
        if self.precision < 1 {
            return Err(schema_err!(
                "invalid DECIMAL precision {} for field '{}'",
                self.precision,
                self.name
            ));
        }
        if self.scale < 0 {
            return Err(schema_err!(
                "invalid DECIMAL scale {} for field '{}'",
                self.scale,
                self.name
            ));
        }
        if self.scale > self.precision {
            return Err(schema_err!(
                "DECIMAL scale {} exceeds precision {} for field '{}'",
                self.scale,
                self.precision,
                self.name
            ));
        }
        match self.physical_type {
            PhysicalType::INT32 if self.precision > 9 => Err(schema_err!(
                "DECIMAL precision {} too large for INT32 field '{}'",
                self.precision,
                self.name
            )),
            PhysicalType::INT64 if self.precision > 18 => Err(schema_err!(
                "DECIMAL precision {} too large for INT64 field '{}'",
                self.precision,
                self.name
            )),
            PhysicalType::FIXED_LEN_BYTE_ARRAY => {
                let max_precision =
                    (2f64.powi(8 * self.length - 1) - 1f64).log10().floor() as i32;
                if self.precision > max_precision {
                    Err(schema_err!(
                        "DECIMAL precision {} too large for FIXED_LEN_BYTE_ARRAY({}) field '{}'",
                        self.precision,
                        self.length,
                        self.name
                    ))
                } else {
                    Ok(())
                }
            }
            _ => Ok(()),
        }
    }
}

/// Builder for group nodes.
pub struct GroupTypeBuilder {
    name: String,
    repetition: Option<Repetition>,
    converted_type: ConvertedType,
    fields: Vec<TypePtr>,
}

impl GroupTypeBuilder {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            repetition: None,
            converted_type: ConvertedType::NONE,
            fields: Vec::new(),
        }
    }

    pub fn with_repetition(mut self, repetition: Repetition) -> Self {
        self.repetition = Some(repetition);
        self
    }

    pub fn with_converted_type(mut self, converted_type: ConvertedType) -> Self {
        self.converted_type = converted_type;
        self
    }

    pub fn with_fields(mut self, fields: Vec<TypePtr>) -> Self {
        self.fields = fields;
        self
    }

    pub fn build(self) -> Result<Type> {
        let mut seen = HashMap::new();
        for (i, field) in self.fields.iter().enumerate() {
            if seen.insert(field.name().to_owned(), i).is_some() {
                return Err(schema_err!(
                    "duplicate field name '{}' in group '{}'",
                    field.name(),
                    self.name
                ));
            }
        }
        Ok(Type::GroupType {
            basic_info: BasicTypeInfo {
                name: self.name,
                repetition: self.repetition,
                converted_type: self.converted_type,
            },
            fields: self.fields,
        })
    }
}

// ----------------------------------------------------------------------
// ColumnPath

/// Path from the schema root to a node, excluding the root itself.
#[derive(Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Default)]
pub struct ColumnPath {
    parts: Vec<String>,
}

impl ColumnPath {
    pub fn new(parts: Vec<String>) -> Self {
        Self { parts }
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Stable serialized form of this path.
    pub fn string(&self) -> String {
        self.parts.join(".")
    }
}

impl fmt::Display for ColumnPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.string())
    }
}

impl std::borrow::Borrow<[String]> for ColumnPath {
    fn borrow(&self) -> &[String] {
        &self.parts
    }
}

impl From<&str> for ColumnPath {
    fn from(single_path: &str) -> Self {
        ColumnPath::new(single_path.split('.').map(|s| s.to_owned()).collect())
    }
}

impl From<Vec<String>> for ColumnPath {
    fn from(parts: Vec<String>) -> Self {
        ColumnPath::new(parts)
    }
}

// ----------------------------------------------------------------------
// ColumnDescriptor

/// Descriptor for one leaf column: the primitive node plus the maximum
/// definition and repetition levels and the path from the root.
#[derive(Debug, PartialEq)]
pub struct ColumnDescriptor {
    primitive_type: TypePtr,
    max_def_level: u32,
    max_rep_level: u32,
    path: ColumnPath,
}

impl ColumnDescriptor {
    pub fn new(
        primitive_type: TypePtr,
        max_def_level: u32,
        max_rep_level: u32,
        path: ColumnPath,
    ) -> Self {
        Self {
            primitive_type,
            max_def_level,
            max_rep_level,
            path,
        }
    }

    pub fn max_def_level(&self) -> u32 {
        self.max_def_level
    }

    pub fn max_rep_level(&self) -> u32 {
        self.max_rep_level
    }

    pub fn path(&self) -> &ColumnPath {
        &self.path
    }

    pub fn self_type(&self) -> &Type {
        self.primitive_type.as_ref()
    }

    pub fn name(&self) -> &str {
        self.primitive_type.name()
    }

    pub fn physical_type(&self) -> PhysicalType {
        self.primitive_type.get_physical_type()
    }

    pub fn converted_type(&self) -> ConvertedType {
        self.primitive_type.get_basic_info().converted_type()
    }

    pub fn type_length(&self) -> i32 {
        match self.primitive_type.as_ref() {
            Type::PrimitiveType { type_length, .. } => *type_length,
            _ => panic!("Expected primitive type"),
        }
    }

    pub fn type_precision(&self) -> i32 {
        match self.primitive_type.as_ref() {
            Type::PrimitiveType { precision, .. } => *precision,
            _ => panic!("Expected primitive type"),
        }
    }

    pub fn type_scale(&self) -> i32 {
        match self.primitive_type.as_ref() {
            Type::PrimitiveType { scale, .. } => *scale,
            _ => panic!("Expected primitive type"),
        }
    }

    pub fn encoding(&self) -> Encoding {
        match self.primitive_type.as_ref() {
            Type::PrimitiveType { encoding, .. } => *encoding,
            _ => panic!("Expected primitive type"),
        }
    }

    /// Per-column compression override, if any.
    pub fn compression(&self) -> Option<Compression> {
        match self.primitive_type.as_ref() {
            Type::PrimitiveType { compression, .. } => *compression,
            _ => panic!("Expected primitive type"),
        }
    }

    pub fn bit_width(&self) -> Option<u8> {
        match self.primitive_type.as_ref() {
            Type::PrimitiveType { bit_width, .. } => *bit_width,
            _ => panic!("Expected primitive type"),
        }
    }
}

// ----------------------------------------------------------------------
// SchemaDescriptor

/// A schema descriptor: the root node plus the flattened list of leaf
/// column descriptors in depth-first order.
#[derive(Debug)]
pub struct SchemaDescriptor {
    schema: TypePtr,
    leaves: Vec<ColumnDescPtr>,
    leaf_to_idx: HashMap<ColumnPath, usize>,
}

impl SchemaDescriptor {
    /// Creates a descriptor from a schema root. Fails if the root is not a
    /// group or if two leaves share a path.
    pub fn new(tp: TypePtr) -> Result<Self> {
        if !tp.is_group() {
            return Err(schema_err!("schema root must be a group type"));
        }
        let mut leaves = Vec::new();
        let mut leaf_to_idx = HashMap::new();
        let mut path = Vec::new();
        for f in tp.get_fields() {
            build_tree(f, 0, 0, &mut path, &mut leaves, &mut leaf_to_idx)?;
        }
        Ok(Self {
            schema: tp,
            leaves,
            leaf_to_idx,
        })
    }

    pub fn name(&self) -> &str {
        self.schema.name()
    }

    pub fn root_schema(&self) -> &Type {
        self.schema.as_ref()
    }

    pub fn root_schema_ptr(&self) -> TypePtr {
        self.schema.clone()
    }

    pub fn num_columns(&self) -> usize {
        self.leaves.len()
    }

    pub fn column(&self, i: usize) -> ColumnDescPtr {
        self.leaves[i].clone()
    }

    pub fn columns(&self) -> &[ColumnDescPtr] {
        &self.leaves
    }

    /// Returns the leaf index for the given path, if it names a leaf.
    pub fn column_index(&self, path: &ColumnPath) -> Option<usize> {
        self.leaf_to_idx.get(path).copied()
    }

    /// Borrow-only leaf index lookup for path parts assembled during a
    /// schema walk.
    pub(crate) fn column_index_by_parts(&self, parts: &[String]) -> Option<usize> {
        self.leaf_to_idx.get(parts).copied()
    }

    /// Returns the node at `path`, leaf or group.
    pub fn find_field(&self, path: &ColumnPath) -> Option<TypePtr> {
        self.find_field_branch(path)
            .and_then(|branch| branch.last().cloned())
    }

    /// Returns the full ancestor chain for `path`, inclusive of the node
    /// itself and exclusive of the root.
    pub fn find_field_branch(&self, path: &ColumnPath) -> Option<Vec<TypePtr>> {
        let mut branch = Vec::with_capacity(path.parts().len());
        let mut current = &self.schema;
        for part in path.parts() {
            let next = current.get_field(part)?;
            branch.push(next.clone());
            current = next;
        }
        if branch.is_empty() {
            None
        } else {
            Some(branch)
        }
    }
}

fn build_tree(
    tp: &TypePtr,
    mut max_rep_level: u32,
    mut max_def_level: u32,
    path_so_far: &mut Vec<String>,
    leaves: &mut Vec<ColumnDescPtr>,
    leaf_to_idx: &mut HashMap<ColumnPath, usize>,
) -> Result<()> {
    if !tp.get_basic_info().has_repetition() {
        return Err(schema_err!(
            "nested node '{}' must have a repetition",
            tp.name()
        ));
    }
    match tp.get_basic_info().repetition() {
        Repetition::REQUIRED => {}
        Repetition::OPTIONAL => {
            max_def_level += 1;
        }
        Repetition::REPEATED => {
            max_def_level += 1;
            max_rep_level += 1;
        }
    }

    path_so_far.push(tp.name().to_owned());
    match tp.as_ref() {
        Type::PrimitiveType { .. } => {
            let path = ColumnPath::new(path_so_far.clone());
            if leaf_to_idx.insert(path.clone(), leaves.len()).is_some() {
                path_so_far.pop();
                return Err(schema_err!("duplicate leaf path '{}'", path));
            }
            leaves.push(Arc::new(ColumnDescriptor::new(
                tp.clone(),
                max_def_level,
                max_rep_level,
                path,
            )));
        }
        Type::GroupType { fields, .. } => {
            for f in fields {
                build_tree(f, max_rep_level, max_def_level, path_so_far, leaves, leaf_to_idx)?;
            }
        }
    }
    path_so_far.pop();
    Ok(())
}

// ----------------------------------------------------------------------
// Thrift conversion

/// Flattens a schema tree into the depth-first SchemaElement list, root
/// element first with its child count.
pub fn to_thrift(schema: &Type) -> Result<Vec<SchemaElement>> {
    if !schema.is_group() {
        return Err(schema_err!("root schema must be a group type"));
    }
    let mut elements = Vec::new();
    to_thrift_helper(schema, &mut elements);
    Ok(elements)
}

fn to_thrift_helper(schema: &Type, elements: &mut Vec<SchemaElement>) {
    match schema {
        Type::PrimitiveType {
            basic_info,
            physical_type,
            type_length,
            scale,
            precision,
            ..
        } => {
            elements.push(SchemaElement {
                type_: Some(*physical_type),
                type_length: if *type_length >= 0 { Some(*type_length) } else { None },
                repetition_type: Some(basic_info.repetition()),
                name: basic_info.name().to_owned(),
                num_children: None,
                converted_type: match basic_info.converted_type() {
                    ConvertedType::NONE => None,
                    other => Some(other),
                },
                scale: if *scale >= 0 { Some(*scale) } else { None },
                precision: if *precision >= 0 { Some(*precision) } else { None },
            });
        }
        Type::GroupType { basic_info, fields } => {
            elements.push(SchemaElement {
                type_: None,
                type_length: None,
                repetition_type: if basic_info.has_repetition() {
                    Some(basic_info.repetition())
                } else {
                    None
                },
                name: basic_info.name().to_owned(),
                num_children: Some(fields.len() as i32),
                converted_type: match basic_info.converted_type() {
                    ConvertedType::NONE => None,
                    other => Some(other),
                },
                scale: None,
                precision: None,
            });
            for field in fields {
                to_thrift_helper(field, elements);
            }
        }
    }
}

/// Rebuilds a schema tree from the flattened SchemaElement list. The first
/// element is the root; its `num_children` drives the reconstruction.
pub fn from_thrift(elements: &[SchemaElement]) -> Result<TypePtr> {
    if elements.is_empty() {
        return Err(schema_err!("empty schema element list"));
    }
    let (index, root) = from_thrift_helper(elements, 0, true)?;
    if index != elements.len() {
        return Err(schema_err!(
            "expected {} schema elements, consumed {}",
            elements.len(),
            index
        ));
    }
    Ok(root)
}

fn from_thrift_helper(
    elements: &[SchemaElement],
    index: usize,
    is_root: bool,
) -> Result<(usize, TypePtr)> {
    if index >= elements.len() {
        return Err(schema_err!(
            "index {} out of bounds for schema element list of length {}",
            index,
            elements.len()
        ));
    }
    let element = &elements[index];
    let num_children = element.num_children.unwrap_or(0);

    if num_children == 0 && !is_root {
        // leaf
        let repetition = element
            .repetition_type
            .ok_or_else(|| schema_err!("leaf '{}' missing repetition", element.name))?;
        let physical_type = element
            .type_
            .ok_or_else(|| schema_err!("leaf '{}' missing physical type", element.name))?;
        let mut builder = Type::primitive_type_builder(&element.name, physical_type)
            .with_repetition(repetition);
        if let Some(converted_type) = element.converted_type {
            builder = builder.with_converted_type(converted_type);
        }
        if let Some(length) = element.type_length {
            builder = builder.with_length(length);
        }
        if let Some(scale) = element.scale {
            builder = builder.with_scale(scale);
        }
        if let Some(precision) = element.precision {
            builder = builder.with_precision(precision);
        }
        Ok((index + 1, Arc::new(builder.build()?)))
    } else {
        let mut fields = Vec::with_capacity(num_children as usize);
        let mut next_index = index + 1;
        for _ in 0..num_children {
            let (new_index, child) = from_thrift_helper(elements, next_index, false)?;
            next_index = new_index;
            fields.push(child);
        }
        let mut builder = Type::group_type_builder(&element.name).with_fields(fields);
        if let Some(repetition) = element.repetition_type {
            if !is_root {
                builder = builder.with_repetition(repetition);
            }
        }
        if let Some(converted_type) = element.converted_type {
            builder = builder.with_converted_type(converted_type);
        }
        Ok((next_index, Arc::new(builder.build()?)))
    }
}
