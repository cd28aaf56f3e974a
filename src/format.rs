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

//! Rust structs for the Parquet metadata IDL with hand-written compact
//! protocol serialization. Field ids mirror `parquet.thrift`; unknown
//! fields are skipped on read so files from richer writers still parse.

use std::io::Write;

use crate::basic::{Compression, ConvertedType, Encoding, PageType, Repetition, Type};
use crate::errors::Result;
use crate::thrift::{ElementType, FieldType, ThriftSliceReader, ThriftWriter};

// ----------------------------------------------------------------------
// KeyValue

/// Arbitrary user key/value metadata carried in the file footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Option<String>,
}

impl KeyValue {
    pub fn new(key: String, value: Option<String>) -> Self {
        Self { key, value }
    }

    pub(crate) fn write_thrift<W: Write>(&self, w: &mut ThriftWriter<W>) -> Result<()> {
        w.write_field_begin(FieldType::Binary, 1, 0)?;
        w.write_string(&self.key)?;
        if let Some(value) = &self.value {
            w.write_field_begin(FieldType::Binary, 2, 1)?;
            w.write_string(value)?;
        }
        w.write_struct_end()
    }

    pub(crate) fn read_thrift(r: &mut ThriftSliceReader) -> Result<Self> {
        let mut key = None;
        let mut value = None;
        let mut last_field_id = 0i16;
        loop {
            let field = r.read_field_begin(last_field_id)?;
            if field.field_type == FieldType::Stop {
                break;
            }
            match field.id {
                1 => key = Some(r.read_string()?),
                2 => value = Some(r.read_string()?),
                _ => r.skip(field.field_type)?,
            }
            last_field_id = field.id;
        }
        Ok(Self {
            key: key.ok_or_else(|| general_err!("KeyValue missing key"))?,
            value,
        })
    }
}

// ----------------------------------------------------------------------
// SchemaElement

/// One node of the depth-first flattened schema tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaElement {
    pub type_: Option<Type>,
    pub type_length: Option<i32>,
    pub repetition_type: Option<Repetition>,
    pub name: String,
    pub num_children: Option<i32>,
    pub converted_type: Option<ConvertedType>,
    pub scale: Option<i32>,
    pub precision: Option<i32>,
}

impl SchemaElement {
    pub(crate) fn write_thrift<W: Write>(&self, w: &mut ThriftWriter<W>) -> Result<()> {
        let mut last_field_id = 0i16;
        if let Some(t) = self.type_ {
            w.write_field_begin(FieldType::I32, 1, last_field_id)?;
            w.write_i32(t.as_i32())?;
            last_field_id = 1;
        }
        if let Some(len) = self.type_length {
            w.write_field_begin(FieldType::I32, 2, last_field_id)?;
            w.write_i32(len)?;
            last_field_id = 2;
        }
        if let Some(rep) = self.repetition_type {
            w.write_field_begin(FieldType::I32, 3, last_field_id)?;
            w.write_i32(rep.as_i32())?;
            last_field_id = 3;
        }
        w.write_field_begin(FieldType::Binary, 4, last_field_id)?;
        w.write_string(&self.name)?;
        last_field_id = 4;
        if let Some(n) = self.num_children {
            w.write_field_begin(FieldType::I32, 5, last_field_id)?;
            w.write_i32(n)?;
            last_field_id = 5;
        }
        if let Some(wire) = self.converted_type.and_then(|ct| ct.as_wire()) {
            w.write_field_begin(FieldType::I32, 6, last_field_id)?;
            w.write_i32(wire)?;
            last_field_id = 6;
        }
        if let Some(scale) = self.scale {
            w.write_field_begin(FieldType::I32, 7, last_field_id)?;
            w.write_i32(scale)?;
            last_field_id = 7;
        }
        if let Some(precision) = self.precision {
            w.write_field_begin(FieldType::I32, 8, last_field_id)?;
            w.write_i32(precision)?;
        }
        w.write_struct_end()
    }

    pub(crate) fn read_thrift(r: &mut ThriftSliceReader) -> Result<Self> {
        let mut type_ = None;
        let mut type_length = None;
        let mut repetition_type = None;
        let mut name = None;
        let mut num_children = None;
        let mut converted_type = None;
        let mut scale = None;
        let mut precision = None;
        let mut last_field_id = 0i16;
        loop {
            let field = r.read_field_begin(last_field_id)?;
            if field.field_type == FieldType::Stop {
                break;
            }
            match field.id {
                1 => type_ = Some(Type::try_from_i32(r.read_i32()?)?),
                2 => type_length = Some(r.read_i32()?),
                3 => repetition_type = Some(Repetition::try_from_i32(r.read_i32()?)?),
                4 => name = Some(r.read_string()?),
                5 => num_children = Some(r.read_i32()?),
                6 => converted_type = Some(ConvertedType::try_from_i32(r.read_i32()?)?),
                7 => scale = Some(r.read_i32()?),
                8 => precision = Some(r.read_i32()?),
                _ => r.skip(field.field_type)?,
            }
            last_field_id = field.id;
        }
        Ok(Self {
            type_,
            type_length,
            repetition_type,
            name: name.ok_or_else(|| general_err!("SchemaElement missing name"))?,
            num_children,
            converted_type,
            scale,
            precision,
        })
    }
}

// ----------------------------------------------------------------------
// DataPageHeader

/// Header for a v1 data page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPageHeader {
    pub num_values: i32,
    pub encoding: Encoding,
    pub definition_level_encoding: Encoding,
    pub repetition_level_encoding: Encoding,
}

impl DataPageHeader {
    pub(crate) fn write_thrift<W: Write>(&self, w: &mut ThriftWriter<W>) -> Result<()> {
        w.write_field_begin(FieldType::I32, 1, 0)?;
        w.write_i32(self.num_values)?;
        w.write_field_begin(FieldType::I32, 2, 1)?;
        w.write_i32(self.encoding.as_i32())?;
        w.write_field_begin(FieldType::I32, 3, 2)?;
        w.write_i32(self.definition_level_encoding.as_i32())?;
        w.write_field_begin(FieldType::I32, 4, 3)?;
        w.write_i32(self.repetition_level_encoding.as_i32())?;
        w.write_struct_end()
    }

    pub(crate) fn read_thrift(r: &mut ThriftSliceReader) -> Result<Self> {
        let mut num_values = None;
        let mut encoding = None;
        let mut definition_level_encoding = None;
        let mut repetition_level_encoding = None;
        let mut last_field_id = 0i16;
        loop {
            let field = r.read_field_begin(last_field_id)?;
            if field.field_type == FieldType::Stop {
                break;
            }
            match field.id {
                1 => num_values = Some(r.read_i32()?),
                2 => encoding = Some(Encoding::try_from_i32(r.read_i32()?)?),
                3 => definition_level_encoding = Some(Encoding::try_from_i32(r.read_i32()?)?),
                4 => repetition_level_encoding = Some(Encoding::try_from_i32(r.read_i32()?)?),
                _ => r.skip(field.field_type)?,
            }
            last_field_id = field.id;
        }
        Ok(Self {
            num_values: num_values
                .ok_or_else(|| general_err!("DataPageHeader missing num_values"))?,
            encoding: encoding.ok_or_else(|| general_err!("DataPageHeader missing encoding"))?,
            definition_level_encoding: definition_level_encoding
                .ok_or_else(|| general_err!("DataPageHeader missing definition_level_encoding"))?,
            repetition_level_encoding: repetition_level_encoding
                .ok_or_else(|| general_err!("DataPageHeader missing repetition_level_encoding"))?,
        })
    }
}

// ----------------------------------------------------------------------
// DataPageHeaderV2

/// Header for a v2 data page; level byte lengths live here and levels are
/// written without the RLE length envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPageHeaderV2 {
    pub num_values: i32,
    pub num_nulls: i32,
    pub num_rows: i32,
    pub encoding: Encoding,
    pub definition_levels_byte_length: i32,
    pub repetition_levels_byte_length: i32,
    pub is_compressed: bool,
}

impl DataPageHeaderV2 {
    pub(crate) fn write_thrift<W: Write>(&self, w: &mut ThriftWriter<W>) -> Result<()> {
        w.write_field_begin(FieldType::I32, 1, 0)?;
        w.write_i32(self.num_values)?;
        w.write_field_begin(FieldType::I32, 2, 1)?;
        w.write_i32(self.num_nulls)?;
        w.write_field_begin(FieldType::I32, 3, 2)?;
        w.write_i32(self.num_rows)?;
        w.write_field_begin(FieldType::I32, 4, 3)?;
        w.write_i32(self.encoding.as_i32())?;
        w.write_field_begin(FieldType::I32, 5, 4)?;
        w.write_i32(self.definition_levels_byte_length)?;
        w.write_field_begin(FieldType::I32, 6, 5)?;
        w.write_i32(self.repetition_levels_byte_length)?;
        w.write_bool_field(self.is_compressed, 7, 6)?;
        w.write_struct_end()
    }

    pub(crate) fn read_thrift(r: &mut ThriftSliceReader) -> Result<Self> {
        let mut num_values = None;
        let mut num_nulls = None;
        let mut num_rows = None;
        let mut encoding = None;
        let mut definition_levels_byte_length = None;
        let mut repetition_levels_byte_length = None;
        // is_compressed defaults to true when absent
        let mut is_compressed = true;
        let mut last_field_id = 0i16;
        loop {
            let field = r.read_field_begin(last_field_id)?;
            if field.field_type == FieldType::Stop {
                break;
            }
            match field.id {
                1 => num_values = Some(r.read_i32()?),
                2 => num_nulls = Some(r.read_i32()?),
                3 => num_rows = Some(r.read_i32()?),
                4 => encoding = Some(Encoding::try_from_i32(r.read_i32()?)?),
                5 => definition_levels_byte_length = Some(r.read_i32()?),
                6 => repetition_levels_byte_length = Some(r.read_i32()?),
                7 => {
                    is_compressed = field
                        .bool_val
                        .ok_or_else(|| general_err!("is_compressed is not a bool field"))?;
                }
                _ => r.skip(field.field_type)?,
            }
            last_field_id = field.id;
        }
        Ok(Self {
            num_values: num_values
                .ok_or_else(|| general_err!("DataPageHeaderV2 missing num_values"))?,
            num_nulls: num_nulls
                .ok_or_else(|| general_err!("DataPageHeaderV2 missing num_nulls"))?,
            num_rows: num_rows.ok_or_else(|| general_err!("DataPageHeaderV2 missing num_rows"))?,
            encoding: encoding.ok_or_else(|| general_err!("DataPageHeaderV2 missing encoding"))?,
            definition_levels_byte_length: definition_levels_byte_length.ok_or_else(|| {
                general_err!("DataPageHeaderV2 missing definition_levels_byte_length")
            })?,
            repetition_levels_byte_length: repetition_levels_byte_length.ok_or_else(|| {
                general_err!("DataPageHeaderV2 missing repetition_levels_byte_length")
            })?,
            is_compressed,
        })
    }
}

// ----------------------------------------------------------------------
// PageHeader

/// Common page header preceding every page body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHeader {
    pub type_: PageType,
    pub uncompressed_page_size: i32,
    pub compressed_page_size: i32,
    pub data_page_header: Option<DataPageHeader>,
    pub data_page_header_v2: Option<DataPageHeaderV2>,
}

impl PageHeader {
    pub(crate) fn write_thrift<W: Write>(&self, w: &mut ThriftWriter<W>) -> Result<()> {
        w.write_field_begin(FieldType::I32, 1, 0)?;
        w.write_i32(self.type_.as_i32())?;
        w.write_field_begin(FieldType::I32, 2, 1)?;
        w.write_i32(self.uncompressed_page_size)?;
        w.write_field_begin(FieldType::I32, 3, 2)?;
        w.write_i32(self.compressed_page_size)?;
        let mut last_field_id = 3i16;
        if let Some(header) = &self.data_page_header {
            w.write_field_begin(FieldType::Struct, 5, last_field_id)?;
            header.write_thrift(w)?;
            last_field_id = 5;
        }
        if let Some(header) = &self.data_page_header_v2 {
            w.write_field_begin(FieldType::Struct, 8, last_field_id)?;
            header.write_thrift(w)?;
        }
        w.write_struct_end()
    }

    pub(crate) fn read_thrift(r: &mut ThriftSliceReader) -> Result<Self> {
        let mut type_ = None;
        let mut uncompressed_page_size = None;
        let mut compressed_page_size = None;
        let mut data_page_header = None;
        let mut data_page_header_v2 = None;
        let mut last_field_id = 0i16;
        loop {
            let field = r.read_field_begin(last_field_id)?;
            if field.field_type == FieldType::Stop {
                break;
            }
            match field.id {
                1 => type_ = Some(PageType::try_from_i32(r.read_i32()?)?),
                2 => uncompressed_page_size = Some(r.read_i32()?),
                3 => compressed_page_size = Some(r.read_i32()?),
                5 => data_page_header = Some(DataPageHeader::read_thrift(r)?),
                8 => data_page_header_v2 = Some(DataPageHeaderV2::read_thrift(r)?),
                _ => r.skip(field.field_type)?,
            }
            last_field_id = field.id;
        }
        Ok(Self {
            type_: type_.ok_or_else(|| general_err!("PageHeader missing type"))?,
            uncompressed_page_size: uncompressed_page_size
                .ok_or_else(|| general_err!("PageHeader missing uncompressed_page_size"))?,
            compressed_page_size: compressed_page_size
                .ok_or_else(|| general_err!("PageHeader missing compressed_page_size"))?,
            data_page_header,
            data_page_header_v2,
        })
    }
}

// ----------------------------------------------------------------------
// ColumnMetaData

/// Metadata for one column chunk, written inline after the chunk's pages
/// and embedded in the footer's [`ColumnChunk`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMetaData {
    pub type_: Type,
    pub encodings: Vec<Encoding>,
    pub path_in_schema: Vec<String>,
    pub codec: Compression,
    pub num_values: i64,
    pub total_uncompressed_size: i64,
    pub total_compressed_size: i64,
    pub data_page_offset: i64,
}

impl ColumnMetaData {
    pub(crate) fn write_thrift<W: Write>(&self, w: &mut ThriftWriter<W>) -> Result<()> {
        w.write_field_begin(FieldType::I32, 1, 0)?;
        w.write_i32(self.type_.as_i32())?;
        w.write_field_begin(FieldType::List, 2, 1)?;
        w.write_list_begin(ElementType::I32, self.encodings.len())?;
        for encoding in &self.encodings {
            w.write_i32(encoding.as_i32())?;
        }
        w.write_field_begin(FieldType::List, 3, 2)?;
        w.write_list_begin(ElementType::Binary, self.path_in_schema.len())?;
        for part in &self.path_in_schema {
            w.write_string(part)?;
        }
        w.write_field_begin(FieldType::I32, 4, 3)?;
        w.write_i32(self.codec.as_i32())?;
        w.write_field_begin(FieldType::I64, 5, 4)?;
        w.write_i64(self.num_values)?;
        w.write_field_begin(FieldType::I64, 6, 5)?;
        w.write_i64(self.total_uncompressed_size)?;
        w.write_field_begin(FieldType::I64, 7, 6)?;
        w.write_i64(self.total_compressed_size)?;
        w.write_field_begin(FieldType::I64, 9, 7)?;
        w.write_i64(self.data_page_offset)?;
        w.write_struct_end()
    }

    pub(crate) fn read_thrift(r: &mut ThriftSliceReader) -> Result<Self> {
        let mut type_ = None;
        let mut encodings = None;
        let mut path_in_schema = None;
        let mut codec = None;
        let mut num_values = None;
        let mut total_uncompressed_size = None;
        let mut total_compressed_size = None;
        let mut data_page_offset = None;
        let mut last_field_id = 0i16;
        loop {
            let field = r.read_field_begin(last_field_id)?;
            if field.field_type == FieldType::Stop {
                break;
            }
            match field.id {
                1 => type_ = Some(Type::try_from_i32(r.read_i32()?)?),
                2 => {
                    let list = r.read_list_begin()?;
                    let mut items = Vec::with_capacity(list.size);
                    for _ in 0..list.size {
                        items.push(Encoding::try_from_i32(r.read_i32()?)?);
                    }
                    encodings = Some(items);
                }
                3 => {
                    let list = r.read_list_begin()?;
                    let mut items = Vec::with_capacity(list.size);
                    for _ in 0..list.size {
                        items.push(r.read_string()?);
                    }
                    path_in_schema = Some(items);
                }
                4 => codec = Some(Compression::try_from_i32(r.read_i32()?)?),
                5 => num_values = Some(r.read_i64()?),
                6 => total_uncompressed_size = Some(r.read_i64()?),
                7 => total_compressed_size = Some(r.read_i64()?),
                9 => data_page_offset = Some(r.read_i64()?),
                _ => r.skip(field.field_type)?,
            }
            last_field_id = field.id;
        }
        Ok(Self {
            type_: type_.ok_or_else(|| general_err!("ColumnMetaData missing type"))?,
            encodings: encodings.ok_or_else(|| general_err!("ColumnMetaData missing encodings"))?,
            path_in_schema: path_in_schema
                .ok_or_else(|| general_err!("ColumnMetaData missing path_in_schema"))?,
            codec: codec.ok_or_else(|| general_err!("ColumnMetaData missing codec"))?,
            num_values: num_values
                .ok_or_else(|| general_err!("ColumnMetaData missing num_values"))?,
            total_uncompressed_size: total_uncompressed_size
                .ok_or_else(|| general_err!("ColumnMetaData missing total_uncompressed_size"))?,
            total_compressed_size: total_compressed_size
                .ok_or_else(|| general_err!("ColumnMetaData missing total_compressed_size"))?,
            data_page_offset: data_page_offset
                .ok_or_else(|| general_err!("ColumnMetaData missing data_page_offset"))?,
        })
    }
}

// ----------------------------------------------------------------------
// ColumnChunk

/// One column's contribution to a row group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnChunk {
    /// Path to an external file holding the chunk; always `None` for chunks
    /// written by this crate, and rejected on read when set.
    pub file_path: Option<String>,
    /// Absolute offset of this chunk's inline [`ColumnMetaData`].
    pub file_offset: i64,
    pub meta_data: Option<ColumnMetaData>,
}

impl ColumnChunk {
    pub(crate) fn write_thrift<W: Write>(&self, w: &mut ThriftWriter<W>) -> Result<()> {
        let mut last_field_id = 0i16;
        if let Some(path) = &self.file_path {
            w.write_field_begin(FieldType::Binary, 1, last_field_id)?;
            w.write_string(path)?;
            last_field_id = 1;
        }
        w.write_field_begin(FieldType::I64, 2, last_field_id)?;
        w.write_i64(self.file_offset)?;
        if let Some(meta) = &self.meta_data {
            w.write_field_begin(FieldType::Struct, 3, 2)?;
            meta.write_thrift(w)?;
        }
        w.write_struct_end()
    }

    pub(crate) fn read_thrift(r: &mut ThriftSliceReader) -> Result<Self> {
        let mut file_path = None;
        let mut file_offset = None;
        let mut meta_data = None;
        let mut last_field_id = 0i16;
        loop {
            let field = r.read_field_begin(last_field_id)?;
            if field.field_type == FieldType::Stop {
                break;
            }
            match field.id {
                1 => file_path = Some(r.read_string()?),
                2 => file_offset = Some(r.read_i64()?),
                3 => meta_data = Some(ColumnMetaData::read_thrift(r)?),
                _ => r.skip(field.field_type)?,
            }
            last_field_id = field.id;
        }
        Ok(Self {
            file_path,
            file_offset: file_offset
                .ok_or_else(|| general_err!("ColumnChunk missing file_offset"))?,
            meta_data,
        })
    }
}

// ----------------------------------------------------------------------
// RowGroup

/// Metadata for one row group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowGroup {
    pub columns: Vec<ColumnChunk>,
    pub total_byte_size: i64,
    pub num_rows: i64,
}

impl RowGroup {
    pub(crate) fn write_thrift<W: Write>(&self, w: &mut ThriftWriter<W>) -> Result<()> {
        w.write_field_begin(FieldType::List, 1, 0)?;
        w.write_list_begin(ElementType::Struct, self.columns.len())?;
        for column in &self.columns {
            column.write_thrift(w)?;
        }
        w.write_field_begin(FieldType::I64, 2, 1)?;
        w.write_i64(self.total_byte_size)?;
        w.write_field_begin(FieldType::I64, 3, 2)?;
        w.write_i64(self.num_rows)?;
        w.write_struct_end()
    }

    pub(crate) fn read_thrift(r: &mut ThriftSliceReader) -> Result<Self> {
        let mut columns = None;
        let mut total_byte_size = None;
        let mut num_rows = None;
        let mut last_field_id = 0i16;
        loop {
            let field = r.read_field_begin(last_field_id)?;
            if field.field_type == FieldType::Stop {
                break;
            }
            match field.id {
                1 => {
                    let list = r.read_list_begin()?;
                    let mut items = Vec::with_capacity(list.size);
                    for _ in 0..list.size {
                        items.push(ColumnChunk::read_thrift(r)?);
                    }
                    columns = Some(items);
                }
                2 => total_byte_size = Some(r.read_i64()?),
                3 => num_rows = Some(r.read_i64()?),
                _ => r.skip(field.field_type)?,
            }
            last_field_id = field.id;
        }
        Ok(Self {
            columns: columns.ok_or_else(|| general_err!("RowGroup missing columns"))?,
            total_byte_size: total_byte_size
                .ok_or_else(|| general_err!("RowGroup missing total_byte_size"))?,
            num_rows: num_rows.ok_or_else(|| general_err!("RowGroup missing num_rows"))?,
        })
    }
}

// ----------------------------------------------------------------------
// FileMetaData

/// The footer metadata describing the whole file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetaData {
    pub version: i32,
    pub schema: Vec<SchemaElement>,
    pub num_rows: i64,
    pub row_groups: Vec<RowGroup>,
    pub key_value_metadata: Option<Vec<KeyValue>>,
    pub created_by: Option<String>,
}

impl FileMetaData {
    pub(crate) fn write_thrift<W: Write>(&self, w: &mut ThriftWriter<W>) -> Result<()> {
        w.write_field_begin(FieldType::I32, 1, 0)?;
        w.write_i32(self.version)?;
        w.write_field_begin(FieldType::List, 2, 1)?;
        w.write_list_begin(ElementType::Struct, self.schema.len())?;
        for element in &self.schema {
            element.write_thrift(w)?;
        }
        w.write_field_begin(FieldType::I64, 3, 2)?;
        w.write_i64(self.num_rows)?;
        w.write_field_begin(FieldType::List, 4, 3)?;
        w.write_list_begin(ElementType::Struct, self.row_groups.len())?;
        for row_group in &self.row_groups {
            row_group.write_thrift(w)?;
        }
        let mut last_field_id = 4i16;
        if let Some(kvs) = &self.key_value_metadata {
            w.write_field_begin(FieldType::List, 5, last_field_id)?;
            w.write_list_begin(ElementType::Struct, kvs.len())?;
            for kv in kvs {
                kv.write_thrift(w)?;
            }
            last_field_id = 5;
        }
        if let Some(created_by) = &self.created_by {
            w.write_field_begin(FieldType::Binary, 6, last_field_id)?;
            w.write_string(created_by)?;
        }
        w.write_struct_end()
    }

    pub(crate) fn read_thrift(r: &mut ThriftSliceReader) -> Result<Self> {
        let mut version = None;
        let mut schema = None;
        let mut num_rows = None;
        let mut row_groups = None;
        let mut key_value_metadata = None;
        let mut created_by = None;
        let mut last_field_id = 0i16;
        loop {
            let field = r.read_field_begin(last_field_id)?;
            if field.field_type == FieldType::Stop {
                break;
            }
            match field.id {
                1 => version = Some(r.read_i32()?),
                2 => {
                    let list = r.read_list_begin()?;
                    let mut items = Vec::with_capacity(list.size);
                    for _ in 0..list.size {
                        items.push(SchemaElement::read_thrift(r)?);
                    }
                    schema = Some(items);
                }
                3 => num_rows = Some(r.read_i64()?),
                4 => {
                    let list = r.read_list_begin()?;
                    let mut items = Vec::with_capacity(list.size);
                    for _ in 0..list.size {
                        items.push(RowGroup::read_thrift(r)?);
                    }
                    row_groups = Some(items);
                }
                5 => {
                    let list = r.read_list_begin()?;
                    let mut items = Vec::with_capacity(list.size);
                    for _ in 0..list.size {
                        items.push(KeyValue::read_thrift(r)?);
                    }
                    key_value_metadata = Some(items);
                }
                6 => created_by = Some(r.read_string()?),
                _ => r.skip(field.field_type)?,
            }
            last_field_id = field.id;
        }
        Ok(Self {
            version: version.ok_or_else(|| general_err!("FileMetaData missing version"))?,
            schema: schema.ok_or_else(|| general_err!("FileMetaData missing schema"))?,
            num_rows: num_rows.ok_or_else(|| general_err!("FileMetaData missing num_rows"))?,
            row_groups: row_groups
                .ok_or_else(|| general_err!("FileMetaData missing row_groups"))?,
            key_value_metadata,
            created_by,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip<T, Wf, Rf>(value: &T, write: Wf, read: Rf) -> T
    where
        Wf: FnOnce(&T, &mut ThriftWriter<&mut Vec<u8>>) -> Result<()>,
        Rf: FnOnce(&mut ThriftSliceReader) -> Result<T>,
    {
        let mut buf = Vec::new();
        let mut writer = ThriftWriter::new(&mut buf);
        write(value, &mut writer).unwrap();
        let mut reader = ThriftSliceReader::new(&buf);
        let out = read(&mut reader).unwrap();
        assert!(reader.as_slice().is_empty());
        out
    }

    #[test]
    fn test_key_value_round_trip() {
        let kv = KeyValue::new("writer".to_owned(), Some("parq".to_owned()));
        let out = round_trip(&kv, |v, w| KeyValue::write_thrift(v, w), KeyValue::read_thrift);
        assert_eq!(out, kv);

        let kv = KeyValue::new("flag".to_owned(), None);
        let out = round_trip(&kv, |v, w| KeyValue::write_thrift(v, w), KeyValue::read_thrift);
        assert_eq!(out, kv);
    }

    #[test]
    fn test_schema_element_round_trip() {
        let leaf = SchemaElement {
            type_: Some(Type::FIXED_LEN_BYTE_ARRAY),
            type_length: Some(12),
            repetition_type: Some(Repetition::OPTIONAL),
            name: "duration".to_owned(),
            num_children: None,
            converted_type: Some(ConvertedType::INTERVAL),
            scale: None,
            precision: None,
        };
        let out = round_trip(&leaf, |v, w| SchemaElement::write_thrift(v, w), SchemaElement::read_thrift);
        assert_eq!(out, leaf);

        let group = SchemaElement {
            type_: None,
            type_length: None,
            repetition_type: None,
            name: "root".to_owned(),
            num_children: Some(3),
            converted_type: None,
            scale: None,
            precision: None,
        };
        let out = round_trip(&group, |v, w| SchemaElement::write_thrift(v, w), SchemaElement::read_thrift);
        assert_eq!(out, group);
    }

    #[test]
    fn test_decimal_element_round_trip() {
        let element = SchemaElement {
            type_: Some(Type::INT32),
            type_length: None,
            repetition_type: Some(Repetition::REQUIRED),
            name: "price".to_owned(),
            num_children: None,
            converted_type: Some(ConvertedType::DECIMAL),
            scale: Some(2),
            precision: Some(9),
        };
        let out = round_trip(&element, |v, w| SchemaElement::write_thrift(v, w), SchemaElement::read_thrift);
        assert_eq!(out, element);
    }

    #[test]
    fn test_page_header_v1_round_trip() {
        let header = PageHeader {
            type_: PageType::DATA_PAGE,
            uncompressed_page_size: 1234,
            compressed_page_size: 567,
            data_page_header: Some(DataPageHeader {
                num_values: 100,
                encoding: Encoding::PLAIN,
                definition_level_encoding: Encoding::RLE,
                repetition_level_encoding: Encoding::RLE,
            }),
            data_page_header_v2: None,
        };
        let out = round_trip(&header, |v, w| PageHeader::write_thrift(v, w), PageHeader::read_thrift);
        assert_eq!(out, header);
    }

    #[test]
    fn test_page_header_v2_round_trip() {
        let header = PageHeader {
            type_: PageType::DATA_PAGE_V2,
            uncompressed_page_size: 99,
            compressed_page_size: 99,
            data_page_header: None,
            data_page_header_v2: Some(DataPageHeaderV2 {
                num_values: 10,
                num_nulls: 4,
                num_rows: 7,
                encoding: Encoding::PLAIN,
                definition_levels_byte_length: 2,
                repetition_levels_byte_length: 0,
                is_compressed: false,
            }),
        };
        let out = round_trip(&header, |v, w| PageHeader::write_thrift(v, w), PageHeader::read_thrift);
        assert_eq!(out, header);
    }

    #[test]
    fn test_file_metadata_round_trip() {
        let metadata = FileMetaData {
            version: 1,
            schema: vec![
                SchemaElement {
                    type_: None,
                    type_length: None,
                    repetition_type: None,
                    name: "root".to_owned(),
                    num_children: Some(1),
                    converted_type: None,
                    scale: None,
                    precision: None,
                },
                SchemaElement {
                    type_: Some(Type::INT64),
                    type_length: None,
                    repetition_type: Some(Repetition::REQUIRED),
                    name: "id".to_owned(),
                    num_children: None,
                    converted_type: None,
                    scale: None,
                    precision: None,
                },
            ],
            num_rows: 42,
            row_groups: vec![RowGroup {
                columns: vec![ColumnChunk {
                    file_path: None,
                    file_offset: 4000,
                    meta_data: Some(ColumnMetaData {
                        type_: Type::INT64,
                        encodings: vec![Encoding::RLE, Encoding::PLAIN],
                        path_in_schema: vec!["id".to_owned()],
                        codec: Compression::SNAPPY,
                        num_values: 42,
                        total_uncompressed_size: 400,
                        total_compressed_size: 350,
                        data_page_offset: 4,
                    }),
                }],
                total_byte_size: 350,
                num_rows: 42,
            }],
            key_value_metadata: Some(vec![KeyValue::new("a".to_owned(), Some("b".to_owned()))]),
            created_by: Some("parq version 0.4.0".to_owned()),
        };
        let out = round_trip(&metadata, |v, w| FileMetaData::write_thrift(v, w), FileMetaData::read_thrift);
        assert_eq!(out, metadata);
    }

    #[test]
    fn test_missing_required_field_fails() {
        // A struct with only a stop byte has no name
        let data = [0u8];
        let mut reader = ThriftSliceReader::new(&data);
        assert!(SchemaElement::read_thrift(&mut reader).is_err());
    }
}
