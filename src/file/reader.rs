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

//! Contains the file reader API and the row cursor over materialized
//! records.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{Read, Seek, SeekFrom};
use std::sync::Arc;

use crate::column::chunk::read_column_chunk;
use crate::errors::Result;
use crate::file::{FOOTER_SIZE, PARQUET_MAGIC};
use crate::format;
use crate::record::{materialize, unpack_composites, RowBuffer, Value};
use crate::schema::types::{self, ColumnPath, SchemaDescPtr, SchemaDescriptor};
use crate::thrift::ThriftSliceReader;

/// Reader for a single Parquet file.
///
/// The reader owns the underlying file handle; cursors created with
/// [`get_row_iter`](Self::get_row_iter) borrow the reader and serialize
/// their reads through it. Dropping the reader releases the file.
pub struct SerializedFileReader<R: Read + Seek> {
    inner: RefCell<R>,
    metadata: format::FileMetaData,
    descr: SchemaDescPtr,
}

impl<R: Read + Seek> std::fmt::Debug for SerializedFileReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerializedFileReader")
            .field("metadata", &self.metadata)
            .field("descr", &self.descr)
            .finish()
    }
}

impl<R: Read + Seek> SerializedFileReader<R> {
    /// Opens a file: verifies both magics, reads the footer, and rebuilds
    /// the schema.
    pub fn new(mut file: R) -> Result<Self> {
        let file_size = file.seek(SeekFrom::End(0))?;
        if file_size < (4 + FOOTER_SIZE) as u64 {
            return Err(format_err!(
                "bad magic: file of {} bytes is too small to be a Parquet file",
                file_size
            ));
        }

        let mut magic = [0u8; 4];
        file.seek(SeekFrom::Start(0))?;
        file.read_exact(&mut magic)?;
        if magic != PARQUET_MAGIC {
            return Err(format_err!("bad magic in file header"));
        }

        let mut trailer = [0u8; FOOTER_SIZE];
        file.seek(SeekFrom::End(-(FOOTER_SIZE as i64)))?;
        file.read_exact(&mut trailer)?;
        if trailer[4..] != PARQUET_MAGIC {
            return Err(format_err!("bad magic in file trailer"));
        }

        let metadata_len = u32::from_le_bytes(trailer[..4].try_into().unwrap()) as u64;
        if metadata_len + (4 + FOOTER_SIZE) as u64 > file_size {
            return Err(format_err!(
                "bad trailer: declared metadata size {} underflows the header in a {} byte file",
                metadata_len,
                file_size
            ));
        }

        file.seek(SeekFrom::End(-(FOOTER_SIZE as i64) - metadata_len as i64))?;
        let mut meta_buf = vec![0u8; metadata_len as usize];
        file.read_exact(&mut meta_buf)?;
        let mut prot = ThriftSliceReader::new(&meta_buf);
        let metadata = format::FileMetaData::read_thrift(&mut prot)?;

        if metadata.version != 1 {
            return Err(format_err!("bad version {}", metadata.version));
        }

        let schema = types::from_thrift(&metadata.schema)?;
        let descr = Arc::new(SchemaDescriptor::new(schema)?);

        Ok(Self {
            inner: RefCell::new(file),
            metadata,
            descr,
        })
    }

    /// Total number of rows in the file.
    pub fn num_rows(&self) -> i64 {
        self.metadata.num_rows
    }

    /// The rebuilt schema descriptor.
    pub fn schema(&self) -> &SchemaDescriptor {
        &self.descr
    }

    pub fn schema_descr_ptr(&self) -> SchemaDescPtr {
        self.descr.clone()
    }

    /// User key-value metadata from the footer.
    pub fn metadata(&self) -> HashMap<String, Option<String>> {
        self.metadata
            .key_value_metadata
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .map(|kv| (kv.key.clone(), kv.value.clone()))
            .collect()
    }

    /// The writer identification string, if present.
    pub fn created_by(&self) -> Option<&str> {
        self.metadata.created_by.as_deref()
    }

    /// Closes the reader, releasing the underlying file. Outstanding
    /// cursors borrow the reader and must be dropped first.
    pub fn close(self) -> Result<()> {
        drop(self.inner.into_inner());
        Ok(())
    }

    /// Returns a cursor over all materialized rows. With a projection,
    /// only leaf columns whose path starts with one of the given paths are
    /// read from storage.
    pub fn get_row_iter(&self, projection: Option<Vec<ColumnPath>>) -> Result<RowIter<'_, R>> {
        let selected = self.select_leaves(projection)?;
        Ok(RowIter {
            reader: self,
            selected,
            row_group_idx: 0,
            rows: Vec::new().into_iter(),
            packed: false,
            failed: false,
        })
    }

    fn select_leaves(&self, projection: Option<Vec<ColumnPath>>) -> Result<Vec<usize>> {
        let Some(projection) = projection.filter(|p| !p.is_empty()) else {
            return Ok((0..self.descr.num_columns()).collect());
        };
        for path in &projection {
            let matches_any = self
                .descr
                .columns()
                .iter()
                .any(|c| c.path().parts().starts_with(path.parts()));
            if !matches_any {
                return Err(schema_err!("projected column '{}' not found", path));
            }
        }
        Ok((0..self.descr.num_columns())
            .filter(|i| {
                let leaf = self.descr.column(*i);
                projection
                    .iter()
                    .any(|p| leaf.path().parts().starts_with(p.parts()))
            })
            .collect())
    }

    /// Reads and materializes one row group.
    fn read_row_group(&self, idx: usize, selected: &[usize]) -> Result<Vec<Value>> {
        let row_group = &self.metadata.row_groups[idx];
        if row_group.columns.len() != self.descr.num_columns() {
            return Err(format_err!(
                "row group {} has {} column chunks, schema has {} leaves",
                idx,
                row_group.columns.len(),
                self.descr.num_columns()
            ));
        }

        let mut buffer = RowBuffer::with_columns(&self.descr, selected);
        buffer.num_rows = row_group.num_rows as usize;

        for &leaf_idx in selected {
            let chunk = &row_group.columns[leaf_idx];
            if chunk.file_path.is_some() {
                return Err(format_err!(
                    "external column chunk reference '{}' is not supported",
                    chunk.file_path.as_deref().unwrap_or_default()
                ));
            }
            let leaf = self.descr.column(leaf_idx);
            let meta = chunk.meta_data.as_ref().ok_or_else(|| {
                format_err!("column chunk '{}' is missing its metadata", leaf.path())
            })?;
            if meta.path_in_schema != leaf.path().parts() {
                return Err(format_err!(
                    "column chunk path {:?} does not match schema leaf '{}'",
                    meta.path_in_schema,
                    leaf.path()
                ));
            }

            let mut file = self.inner.borrow_mut();
            file.seek(SeekFrom::Start(meta.data_page_offset as u64))?;
            let mut chunk_bytes = vec![0u8; meta.total_compressed_size as usize];
            file.read_exact(&mut chunk_bytes)?;
            drop(file);

            let column = read_column_chunk(&chunk_bytes, &leaf, meta)?;
            if let Some(slot) = buffer.columns.get_mut(leaf.path()) {
                *slot = column;
            }
        }

        materialize(&self.descr, &buffer)
    }
}

/// Lazy cursor over materialized rows: one row group is read and
/// materialized at a time, rows are handed out in order.
pub struct RowIter<'a, R: Read + Seek> {
    reader: &'a SerializedFileReader<R>,
    selected: Vec<usize>,
    row_group_idx: usize,
    rows: std::vec::IntoIter<Value>,
    packed: bool,
    failed: bool,
}

impl<'a, R: Read + Seek> RowIter<'a, R> {
    /// Enables packed mode: canonical LIST/MAP shapes are folded into
    /// plain lists and maps.
    pub fn packed(mut self, packed: bool) -> Self {
        self.packed = packed;
        self
    }
}

impl<'a, R: Read + Seek> Iterator for RowIter<'a, R> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            if let Some(row) = self.rows.next() {
                let row = if self.packed {
                    unpack_composites(self.reader.descr.root_schema(), row)
                } else {
                    row
                };
                return Some(Ok(row));
            }
            if self.row_group_idx >= self.reader.metadata.row_groups.len() {
                return None;
            }
            match self
                .reader
                .read_row_group(self.row_group_idx, &self.selected)
            {
                Ok(rows) => {
                    self.row_group_idx += 1;
                    self.rows = rows.into_iter();
                }
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn open(bytes: Vec<u8>) -> Result<SerializedFileReader<Cursor<Vec<u8>>>> {
        SerializedFileReader::new(Cursor::new(bytes))
    }

    #[test]
    fn test_too_small_file_fails() {
        let err = open(b"PAR1PAR".to_vec()).unwrap_err();
        assert!(err.to_string().contains("too small"));
    }

    #[test]
    fn test_bad_header_magic() {
        let err = open(b"NOPE\x00\x00\x00\x00\x00\x00\x00\x00PAR1".to_vec()).unwrap_err();
        assert!(err.to_string().contains("bad magic in file header"));
    }

    #[test]
    fn test_bad_trailer_magic() {
        let err = open(b"PAR1\x00\x00\x00\x00\x00\x00\x00\x00NOPE".to_vec()).unwrap_err();
        assert!(err.to_string().contains("bad magic in file trailer"));
    }

    #[test]
    fn test_metadata_size_underflows_header() {
        let mut bytes = b"PAR1".to_vec();
        bytes.extend_from_slice(&200u32.to_le_bytes());
        bytes.extend_from_slice(b"PAR1");
        let err = open(bytes).unwrap_err();
        assert!(err.to_string().contains("bad trailer"));
    }
}
