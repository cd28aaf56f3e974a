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

//! Column chunk assembly: data pages followed by an inline
//! [`ColumnMetaData`] trailer, with a copy of the metadata embedded in the
//! footer's [`ColumnChunk`].

use std::io::Write;

use crate::basic::{Compression, Encoding};
use crate::column::page::{decode_data_page, encode_data_page};
use crate::compression::create_codec;
use crate::encodings::ByteCursor;
use crate::errors::Result;
use crate::format::{ColumnChunk, ColumnMetaData};
use crate::record::ColumnData;
use crate::schema::types::ColumnDescPtr;
use crate::thrift::ThriftWriter;

/// Writes one column chunk (pages then inline metadata) to the sink and
/// returns the footer record for it. `offset` is the absolute position of
/// the sink before the first page byte.
pub(crate) fn write_column_chunk<W: Write>(
    sink: &mut W,
    offset: u64,
    descr: &ColumnDescPtr,
    column: &ColumnData,
    num_rows: usize,
    compression: Compression,
    data_page_v2: bool,
) -> Result<(ColumnChunk, u64)> {
    let mut codec = create_codec(compression)?;
    let page = encode_data_page(descr, column, num_rows, &mut codec, data_page_v2)?;
    sink.write_all(&page.buf)?;

    let mut encodings = vec![Encoding::RLE];
    if !encodings.contains(&descr.encoding()) {
        encodings.push(descr.encoding());
    }

    let meta_data = ColumnMetaData {
        type_: descr.physical_type(),
        encodings,
        path_in_schema: descr.path().parts().to_vec(),
        codec: compression,
        num_values: page.num_values as i64,
        total_uncompressed_size: page.uncompressed_size,
        total_compressed_size: page.buf.len() as i64,
        data_page_offset: offset as i64,
    };

    let mut meta_buf = Vec::new();
    meta_data.write_thrift(&mut ThriftWriter::new(&mut meta_buf))?;
    sink.write_all(&meta_buf)?;

    let chunk = ColumnChunk {
        file_path: None,
        file_offset: (offset + page.buf.len() as u64) as i64,
        meta_data: Some(meta_data),
    };
    let bytes_written = page.buf.len() as u64 + meta_buf.len() as u64;
    Ok((chunk, bytes_written))
}

/// Decodes a whole column chunk from its page bytes (as located by
/// `data_page_offset` / `total_compressed_size`).
pub(crate) fn read_column_chunk(
    chunk_bytes: &[u8],
    descr: &ColumnDescPtr,
    meta: &ColumnMetaData,
) -> Result<ColumnData> {
    let mut codec = create_codec(meta.codec)?;
    let mut cursor = ByteCursor::new(chunk_bytes);
    let mut column = ColumnData::new(descr.physical_type());
    let expected = meta.num_values as usize;
    while column.num_values < expected {
        let page = decode_data_page(&mut cursor, descr, &mut codec)?;
        column.append(page)?;
    }
    if column.num_values != expected {
        return Err(format_err!(
            "column chunk '{}' decoded {} values, expected {}",
            descr.path(),
            column.num_values,
            expected
        ));
    }
    Ok(column)
}
