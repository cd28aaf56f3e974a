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

//! DATA_PAGE and DATA_PAGE_V2 bodies.
//!
//! A v1 body is `rep levels (RLE, enveloped) || def levels (RLE,
//! enveloped) || value bytes (compressed)`. A v2 body drops the level
//! envelopes and records their byte lengths in the header; only the value
//! bytes are ever compressed, in both versions.

use crate::basic::{Encoding, PageType, Type as PhysicalType};
use crate::compression::Codec;
use crate::encodings::{levels, plain, rle, ByteCursor};
use crate::errors::Result;
use crate::format::{DataPageHeader, DataPageHeaderV2, PageHeader};
use crate::record::{ColumnData, ColumnValues};
use crate::schema::types::ColumnDescPtr;
use crate::thrift::{ThriftSliceReader, ThriftWriter};

/// A fully serialized page plus the size bookkeeping the chunk metadata
/// needs.
pub(crate) struct EncodedPage {
    /// Header and body bytes, ready to be written out.
    pub buf: Vec<u8>,
    /// Header length plus `uncompressed_page_size`.
    pub uncompressed_size: i64,
    pub num_values: usize,
}

/// Encodes one data page holding the entire column slice.
pub(crate) fn encode_data_page(
    descr: &ColumnDescPtr,
    column: &ColumnData,
    num_rows: usize,
    codec: &mut Option<Box<dyn Codec>>,
    data_page_v2: bool,
) -> Result<EncodedPage> {
    let values_buf = encode_values(descr, &column.values)?;
    let compressed = match codec {
        Some(codec) => {
            let mut out = Vec::with_capacity(values_buf.len());
            codec.compress(&values_buf, &mut out)?;
            out
        }
        None => values_buf.clone(),
    };

    let rep = levels::encode_levels(&column.rep_levels, descr.max_rep_level(), data_page_v2)?;
    let def = levels::encode_levels(&column.def_levels, descr.max_def_level(), data_page_v2)?;

    let uncompressed_page_size = (rep.len() + def.len() + values_buf.len()) as i32;
    let compressed_page_size = (rep.len() + def.len() + compressed.len()) as i32;

    let header = if data_page_v2 {
        PageHeader {
            type_: PageType::DATA_PAGE_V2,
            uncompressed_page_size,
            compressed_page_size,
            data_page_header: None,
            data_page_header_v2: Some(DataPageHeaderV2 {
                num_values: column.num_values as i32,
                num_nulls: (column.num_values - column.values.len()) as i32,
                num_rows: num_rows as i32,
                encoding: descr.encoding(),
                definition_levels_byte_length: def.len() as i32,
                repetition_levels_byte_length: rep.len() as i32,
                is_compressed: codec.is_some(),
            }),
        }
    } else {
        PageHeader {
            type_: PageType::DATA_PAGE,
            uncompressed_page_size,
            compressed_page_size,
            data_page_header: Some(DataPageHeader {
                num_values: column.num_values as i32,
                encoding: descr.encoding(),
                definition_level_encoding: Encoding::RLE,
                repetition_level_encoding: Encoding::RLE,
            }),
            data_page_header_v2: None,
        }
    };

    let mut buf = Vec::with_capacity(64 + compressed_page_size as usize);
    header.write_thrift(&mut ThriftWriter::new(&mut buf))?;
    let header_len = buf.len();
    buf.extend_from_slice(&rep);
    buf.extend_from_slice(&def);
    buf.extend_from_slice(&compressed);

    Ok(EncodedPage {
        buf,
        uncompressed_size: (header_len as i64) + uncompressed_page_size as i64,
        num_values: column.num_values,
    })
}

/// Decodes the next data page from a chunk cursor.
pub(crate) fn decode_data_page(
    cursor: &mut ByteCursor,
    descr: &ColumnDescPtr,
    codec: &mut Option<Box<dyn Codec>>,
) -> Result<ColumnData> {
    let header = read_page_header(cursor)?;

    let sizes = header_sizes(&header)?;
    match header.type_ {
        PageType::DATA_PAGE => {
            let page_header = header
                .data_page_header
                .ok_or_else(|| format_err!("DATA_PAGE is missing its data page header"))?;
            decode_v1(cursor, descr, codec, &sizes, &page_header)
        }
        PageType::DATA_PAGE_V2 => {
            let page_header = header
                .data_page_header_v2
                .ok_or_else(|| format_err!("DATA_PAGE_V2 is missing its data page header"))?;
            decode_v2(cursor, descr, codec, &sizes, &page_header)
        }
        other => Err(format_err!("unknown page type {}", other)),
    }
}

struct PageSizes {
    uncompressed: usize,
    compressed: usize,
}

fn header_sizes(header: &PageHeader) -> Result<PageSizes> {
    if header.uncompressed_page_size < 0 || header.compressed_page_size < 0 {
        return Err(format_err!(
            "negative page size ({}, {})",
            header.uncompressed_page_size,
            header.compressed_page_size
        ));
    }
    Ok(PageSizes {
        uncompressed: header.uncompressed_page_size as usize,
        compressed: header.compressed_page_size as usize,
    })
}

fn read_page_header(cursor: &mut ByteCursor) -> Result<PageHeader> {
    // the header length is only known after decoding it, so decode from the
    // rest of the chunk and consume exactly what the reader took
    let rest = cursor.peek_rest();
    let mut reader = ThriftSliceReader::new(rest);
    let header = PageHeader::read_thrift(&mut reader)?;
    let consumed = rest.len() - reader.as_slice().len();
    cursor.read_exact(consumed)?;
    Ok(header)
}

fn decode_v1(
    cursor: &mut ByteCursor,
    descr: &ColumnDescPtr,
    codec: &mut Option<Box<dyn Codec>>,
    sizes: &PageSizes,
    header: &DataPageHeader,
) -> Result<ColumnData> {
    let num_values = header.num_values as usize;
    let body = cursor.read_exact(sizes.compressed)?;
    let mut body_cursor = ByteCursor::new(body);

    let rep_levels =
        levels::decode_levels(&mut body_cursor, num_values, descr.max_rep_level(), false)?;
    let def_levels =
        levels::decode_levels(&mut body_cursor, num_values, descr.max_def_level(), false)?;
    let level_bytes = body_cursor.position();

    let value_bytes = body_cursor.read_exact(sizes.compressed - level_bytes)?;
    let uncompressed_len = sizes
        .uncompressed
        .checked_sub(level_bytes)
        .ok_or_else(|| format_err!("page level bytes exceed uncompressed size"))?;
    let raw;
    let value_bytes = match codec {
        Some(codec) => {
            let mut out = Vec::with_capacity(uncompressed_len);
            codec.decompress(value_bytes, &mut out, Some(uncompressed_len))?;
            raw = out;
            &raw[..]
        }
        None => value_bytes,
    };

    let non_null = count_non_null(&def_levels, descr.max_def_level());
    let values = decode_values(descr, value_bytes, header.encoding, non_null)?;

    Ok(ColumnData {
        rep_levels,
        def_levels,
        values,
        num_values,
    })
}

fn decode_v2(
    cursor: &mut ByteCursor,
    descr: &ColumnDescPtr,
    codec: &mut Option<Box<dyn Codec>>,
    sizes: &PageSizes,
    header: &DataPageHeaderV2,
) -> Result<ColumnData> {
    let num_values = header.num_values as usize;
    let rep_len = header.repetition_levels_byte_length as usize;
    let def_len = header.definition_levels_byte_length as usize;
    if rep_len + def_len > sizes.compressed {
        return Err(format_err!("page level bytes exceed compressed size"));
    }

    let mut rep_cursor = ByteCursor::new(cursor.read_exact(rep_len)?);
    let rep_levels =
        levels::decode_levels(&mut rep_cursor, num_values, descr.max_rep_level(), true)?;
    let mut def_cursor = ByteCursor::new(cursor.read_exact(def_len)?);
    let def_levels =
        levels::decode_levels(&mut def_cursor, num_values, descr.max_def_level(), true)?;

    let value_bytes = cursor.read_exact(sizes.compressed - rep_len - def_len)?;
    let uncompressed_len = sizes
        .uncompressed
        .checked_sub(rep_len + def_len)
        .ok_or_else(|| format_err!("page level bytes exceed uncompressed size"))?;
    let raw;
    let value_bytes = match codec {
        Some(codec) if header.is_compressed => {
            let mut out = Vec::with_capacity(uncompressed_len);
            codec.decompress(value_bytes, &mut out, Some(uncompressed_len))?;
            raw = out;
            &raw[..]
        }
        _ => value_bytes,
    };

    let non_null = count_non_null(&def_levels, descr.max_def_level());
    if non_null + header.num_nulls as usize != num_values {
        return Err(format_err!(
            "page declares {} nulls but levels define {} of {} values",
            header.num_nulls,
            non_null,
            num_values
        ));
    }
    let values = decode_values(descr, value_bytes, header.encoding, non_null)?;

    Ok(ColumnData {
        rep_levels,
        def_levels,
        values,
        num_values,
    })
}

fn count_non_null(def_levels: &[u32], max_def_level: u32) -> usize {
    def_levels.iter().filter(|d| **d == max_def_level).count()
}

// ----------------------------------------------------------------------
// Value encoding dispatch

fn encode_values(descr: &ColumnDescPtr, values: &ColumnValues) -> Result<Vec<u8>> {
    match descr.encoding() {
        Encoding::PLAIN => plain::encode(values, descr.type_length()),
        Encoding::RLE => {
            let bit_width = rle_bit_width(descr)?;
            let widened: Vec<u64> = match values {
                ColumnValues::Boolean(v) => v.iter().map(|b| *b as u64).collect(),
                ColumnValues::Int32(v) => v.iter().map(|x| *x as u32 as u64).collect(),
                ColumnValues::Int64(v) => v.iter().map(|x| *x as u64).collect(),
                _ => {
                    return Err(codec_err!(
                        "RLE encoding is not supported for {}",
                        descr.physical_type()
                    ));
                }
            };
            rle::encode(&widened, bit_width, false)
        }
    }
}

fn decode_values(
    descr: &ColumnDescPtr,
    bytes: &[u8],
    encoding: Encoding,
    count: usize,
) -> Result<ColumnValues> {
    let mut cursor = ByteCursor::new(bytes);
    match encoding {
        Encoding::PLAIN => plain::decode(&mut cursor, descr.physical_type(), count, descr.type_length()),
        Encoding::RLE => {
            let bit_width = rle_bit_width(descr)?;
            let raw = rle::decode(&mut cursor, count, bit_width, false)?;
            Ok(match descr.physical_type() {
                PhysicalType::BOOLEAN => {
                    ColumnValues::Boolean(raw.into_iter().map(|v| v != 0).collect())
                }
                PhysicalType::INT32 => {
                    ColumnValues::Int32(raw.into_iter().map(|v| v as u32 as i32).collect())
                }
                PhysicalType::INT64 => {
                    ColumnValues::Int64(raw.into_iter().map(|v| v as i64).collect())
                }
                other => {
                    return Err(codec_err!("RLE encoding is not supported for {}", other));
                }
            })
        }
    }
}

fn rle_bit_width(descr: &ColumnDescPtr) -> Result<u8> {
    if descr.physical_type() == PhysicalType::BOOLEAN {
        return Ok(1);
    }
    descr.bit_width().ok_or_else(|| {
        codec_err!(
            "missing bit width for RLE encoded column '{}'",
            descr.path()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::{Compression, Repetition};
    use crate::compression::create_codec;
    use crate::record::{shred_record, RowBuffer};
    use crate::record::Value;
    use crate::record;
    use crate::schema::types::{SchemaDescPtr, SchemaDescriptor, Type};
    use std::sync::Arc;

    fn one_column_schema(optional: bool) -> SchemaDescPtr {
        let repetition = if optional {
            Repetition::OPTIONAL
        } else {
            Repetition::REQUIRED
        };
        let field = Arc::new(
            Type::primitive_type_builder("v", PhysicalType::INT64)
                .with_repetition(repetition)
                .build()
                .unwrap(),
        );
        let root = Type::group_type_builder("root")
            .with_fields(vec![field])
            .build()
            .unwrap();
        Arc::new(SchemaDescriptor::new(Arc::new(root)).unwrap())
    }

    fn shredded_column(descr: &SchemaDescPtr, rows: &[Value]) -> ColumnData {
        let mut buffer = RowBuffer::new(descr);
        for row in rows {
            shred_record(descr, row, &mut buffer).unwrap();
        }
        buffer.column(&"v".into()).unwrap().clone()
    }

    fn page_round_trip(v2: bool, compression: Compression) {
        let descr = one_column_schema(true);
        let rows: Vec<Value> = (0..100)
            .map(|i| {
                if i % 3 == 0 {
                    Value::record([] as [(&str, Value); 0])
                } else {
                    record!("v" => i as i64)
                }
            })
            .collect();
        let column = shredded_column(&descr, &rows);

        let leaf = descr.column(0);
        let mut codec = create_codec(compression).unwrap();
        let page = encode_data_page(&leaf, &column, rows.len(), &mut codec, v2).unwrap();

        let mut cursor = ByteCursor::new(&page.buf);
        let decoded = decode_data_page(&mut cursor, &leaf, &mut codec).unwrap();
        assert_eq!(cursor.remaining(), 0);
        assert_eq!(decoded, column);
    }

    #[test]
    fn test_v1_page_round_trip() {
        page_round_trip(false, Compression::UNCOMPRESSED);
    }

    #[test]
    fn test_v1_page_round_trip_snappy() {
        page_round_trip(false, Compression::SNAPPY);
    }

    #[test]
    fn test_v2_page_round_trip() {
        page_round_trip(true, Compression::UNCOMPRESSED);
    }

    #[test]
    fn test_v2_page_round_trip_gzip() {
        page_round_trip(true, Compression::GZIP);
    }

    #[test]
    fn test_required_column_has_no_level_streams() {
        let descr = one_column_schema(false);
        let rows: Vec<Value> = (0..8).map(|i| record!("v" => i as i64)).collect();
        let column = shredded_column(&descr, &rows);
        let leaf = descr.column(0);
        let mut codec = None;
        let page = encode_data_page(&leaf, &column, rows.len(), &mut codec, false).unwrap();

        // uncompressed size is exactly the PLAIN value bytes
        let mut cursor = ByteCursor::new(&page.buf);
        let decoded = decode_data_page(&mut cursor, &leaf, &mut codec).unwrap();
        assert_eq!(decoded.values, ColumnValues::Int64((0..8).collect()));
        assert_eq!(decoded.def_levels, vec![0; 8]);
    }

    #[test]
    fn test_unknown_page_type_fails() {
        let header = PageHeader {
            type_: PageType::DICTIONARY_PAGE,
            uncompressed_page_size: 0,
            compressed_page_size: 0,
            data_page_header: None,
            data_page_header_v2: None,
        };
        let mut buf = Vec::new();
        header.write_thrift(&mut ThriftWriter::new(&mut buf)).unwrap();
        let descr = one_column_schema(false);
        let leaf = descr.column(0);
        let mut cursor = ByteCursor::new(&buf);
        let err = decode_data_page(&mut cursor, &leaf, &mut None).unwrap_err();
        assert!(err.to_string().contains("unknown page type"));
    }

    #[test]
    fn test_truncated_page_body_fails() {
        let descr = one_column_schema(true);
        let rows: Vec<Value> = (0..10).map(|i| record!("v" => i as i64)).collect();
        let column = shredded_column(&descr, &rows);
        let leaf = descr.column(0);
        let mut codec = None;
        let page = encode_data_page(&leaf, &column, rows.len(), &mut codec, false).unwrap();
        let mut cursor = ByteCursor::new(&page.buf[..page.buf.len() - 4]);
        assert!(decode_data_page(&mut cursor, &leaf, &mut codec).is_err());
    }

    #[test]
    fn test_rle_boolean_values_round_trip() {
        let field = Arc::new(
            Type::primitive_type_builder("flag", PhysicalType::BOOLEAN)
                .with_encoding(Encoding::RLE)
                .with_repetition(Repetition::REQUIRED)
                .build()
                .unwrap(),
        );
        let root = Type::group_type_builder("root")
            .with_fields(vec![field])
            .build()
            .unwrap();
        let descr = Arc::new(SchemaDescriptor::new(Arc::new(root)).unwrap());
        let rows: Vec<Value> = (0..64).map(|i| record!("flag" => i % 2 == 0)).collect();
        let mut buffer = RowBuffer::new(&descr);
        for row in &rows {
            shred_record(&descr, row, &mut buffer).unwrap();
        }
        let column = buffer.column(&"flag".into()).unwrap().clone();

        let leaf = descr.column(0);
        let mut codec = None;
        let page = encode_data_page(&leaf, &column, rows.len(), &mut codec, false).unwrap();
        let mut cursor = ByteCursor::new(&page.buf);
        let decoded = decode_data_page(&mut cursor, &leaf, &mut codec).unwrap();
        assert_eq!(decoded, column);
    }
}
