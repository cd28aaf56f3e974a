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

//! Contains the row-oriented file writer API.

use std::io::Write;
use std::sync::Arc;

use crate::column::chunk::write_column_chunk;
use crate::errors::Result;
use crate::file::properties::{WriterProperties, WriterPropertiesPtr};
use crate::file::PARQUET_MAGIC;
use crate::format;
use crate::record::{shred_record, RowBuffer, Value};
use crate::schema::types::{self, SchemaDescPtr, SchemaDescriptor, TypePtr};
use crate::thrift::ThriftWriter;

/// A wrapper around a [`Write`] that keeps track of the number of bytes
/// that have been written.
pub struct TrackedWrite<W> {
    inner: W,
    bytes_written: usize,
}

impl<W: Write> TrackedWrite<W> {
    /// Create a new [`TrackedWrite`] from a [`Write`].
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            bytes_written: 0,
        }
    }

    /// Returns the number of bytes written to this instance.
    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for TrackedWrite<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let bytes = self.inner.write(buf)?;
        self.bytes_written += bytes;
        Ok(bytes)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

// ----------------------------------------------------------------------
// Serialized impl for the file writer

/// Row-oriented Parquet file writer.
///
/// Rows are appended one record at a time; a row group is flushed whenever
/// the buffered row count reaches the configured row group size, and
/// [`close`](Self::close) flushes the residual rows and writes the footer.
///
/// ```no_run
/// use std::fs::File;
/// use std::sync::Arc;
/// use parq::basic::{Repetition, Type as PhysicalType};
/// use parq::file::properties::WriterProperties;
/// use parq::file::writer::SerializedFileWriter;
/// use parq::record;
/// use parq::schema::types::Type;
///
/// let field = Arc::new(
///     Type::primitive_type_builder("id", PhysicalType::INT64)
///         .with_repetition(Repetition::REQUIRED)
///         .build()
///         .unwrap(),
/// );
/// let schema = Arc::new(
///     Type::group_type_builder("schema")
///         .with_fields(vec![field])
///         .build()
///         .unwrap(),
/// );
/// let props = Arc::new(WriterProperties::builder().build());
/// let file = File::create("rows.parquet").unwrap();
/// let mut writer = SerializedFileWriter::new(file, schema, props).unwrap();
/// writer.append_row(&record!("id" => 1i64)).unwrap();
/// writer.close().unwrap();
/// ```
pub struct SerializedFileWriter<W: Write> {
    buf: TrackedWrite<W>,
    descr: SchemaDescPtr,
    props: WriterPropertiesPtr,
    buffer: RowBuffer,
    row_groups: Vec<format::RowGroup>,
    total_rows: i64,
    closed: bool,
}

impl<W: Write> SerializedFileWriter<W> {
    /// Creates a new file writer, writing the header magic immediately.
    pub fn new(sink: W, schema: TypePtr, properties: WriterPropertiesPtr) -> Result<Self> {
        let descr = Arc::new(SchemaDescriptor::new(schema)?);
        let mut buf = TrackedWrite::new(sink);
        buf.write_all(&PARQUET_MAGIC)?;
        let buffer = RowBuffer::new(&descr);
        Ok(Self {
            buf,
            descr,
            props: properties,
            buffer,
            row_groups: vec![],
            total_rows: 0,
            closed: false,
        })
    }

    /// Convenience constructor using default properties.
    pub fn new_with_defaults(sink: W, schema: TypePtr) -> Result<Self> {
        Self::new(sink, schema, Arc::new(WriterProperties::builder().build()))
    }

    /// Shreds one record into the current row buffer, flushing a row group
    /// when the buffer reaches the configured size.
    ///
    /// A record that fails validation leaves the buffered rows untouched;
    /// the writer stays usable.
    pub fn append_row(&mut self, row: &Value) -> Result<()> {
        self.assert_open()?;
        let checkpoint = self.buffer.checkpoint();
        if let Err(e) = shred_record(&self.descr, row, &mut self.buffer) {
            self.buffer.restore(&checkpoint);
            return Err(e);
        }
        self.total_rows += 1;
        if self.buffer.num_rows() >= self.props.row_group_size() {
            self.flush_row_group()?;
        }
        Ok(())
    }

    /// Number of rows appended so far.
    pub fn num_rows(&self) -> i64 {
        self.total_rows
    }

    /// Metadata of the row groups flushed so far.
    pub fn flushed_row_groups(&self) -> &[format::RowGroup] {
        &self.row_groups
    }

    /// Flushes residual rows, writes the footer, and seals the writer.
    /// Appending or closing again afterwards fails.
    pub fn close(&mut self) -> Result<()> {
        self.assert_open()?;
        if self.total_rows == 0 || self.descr.num_columns() == 0 {
            return Err(writer_err!(
                "cannot write an empty file: {} rows, {} columns",
                self.total_rows,
                self.descr.num_columns()
            ));
        }
        if self.buffer.num_rows() > 0 {
            self.flush_row_group()?;
        }
        self.write_footer()?;
        self.buf.flush()?;
        self.closed = true;
        Ok(())
    }

    /// Releases the underlying sink. The writer must be closed first.
    pub fn into_inner(self) -> Result<W> {
        if !self.closed {
            return Err(writer_err!("writer is not closed"));
        }
        Ok(self.buf.into_inner())
    }

    fn assert_open(&self) -> Result<()> {
        if self.closed {
            return Err(writer_err!("writer is closed"));
        }
        Ok(())
    }

    fn flush_row_group(&mut self) -> Result<()> {
        let buffer = std::mem::replace(&mut self.buffer, RowBuffer::new(&self.descr));
        let num_rows = buffer.num_rows();

        let mut columns = Vec::with_capacity(self.descr.num_columns());
        let mut total_byte_size = 0i64;
        for (i, (path, column)) in buffer.columns().enumerate() {
            let leaf = self.descr.column(i);
            debug_assert_eq!(leaf.path(), path);
            let compression = leaf.compression().unwrap_or_else(|| self.props.compression());
            let offset = self.buf.bytes_written() as u64;
            let (chunk, bytes_written) = write_column_chunk(
                &mut self.buf,
                offset,
                &leaf,
                column,
                num_rows,
                compression,
                self.props.data_page_v2(),
            )?;
            total_byte_size += bytes_written as i64;
            columns.push(chunk);
        }

        self.row_groups.push(format::RowGroup {
            columns,
            total_byte_size,
            num_rows: num_rows as i64,
        });
        Ok(())
    }

    fn write_footer(&mut self) -> Result<()> {
        let metadata = format::FileMetaData {
            version: 1,
            schema: types::to_thrift(self.descr.root_schema())?,
            num_rows: self.total_rows,
            row_groups: std::mem::take(&mut self.row_groups),
            key_value_metadata: self.props.key_value_metadata().cloned(),
            created_by: Some(self.props.created_by().to_owned()),
        };

        let mut meta_buf = Vec::new();
        metadata.write_thrift(&mut ThriftWriter::new(&mut meta_buf))?;
        self.buf.write_all(&meta_buf)?;
        self.buf.write_all(&(meta_buf.len() as u32).to_le_bytes())?;
        self.buf.write_all(&PARQUET_MAGIC)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::{Repetition, Type as PhysicalType};
    use crate::file::FOOTER_SIZE;
    use crate::record;
    use crate::schema::types::Type;

    fn test_schema() -> TypePtr {
        let field = Arc::new(
            Type::primitive_type_builder("id", PhysicalType::INT64)
                .with_repetition(Repetition::REQUIRED)
                .build()
                .unwrap(),
        );
        Arc::new(
            Type::group_type_builder("schema")
                .with_fields(vec![field])
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_header_magic_written_on_construction() {
        let writer = SerializedFileWriter::new_with_defaults(Vec::new(), test_schema()).unwrap();
        assert_eq!(writer.buf.bytes_written(), 4);
    }

    #[test]
    fn test_empty_file_fails_at_close() {
        let mut writer =
            SerializedFileWriter::new_with_defaults(Vec::new(), test_schema()).unwrap();
        let err = writer.close().unwrap_err();
        assert!(err.to_string().contains("empty file"));
    }

    #[test]
    fn test_schema_without_leaves_fails_at_close() {
        let schema = Arc::new(Type::group_type_builder("schema").build().unwrap());
        let mut writer = SerializedFileWriter::new_with_defaults(Vec::new(), schema).unwrap();
        writer
            .append_row(&crate::record::Value::record([] as [(&str, crate::record::Value); 0]))
            .unwrap();
        let err = writer.close().unwrap_err();
        assert!(err.to_string().contains("empty file"));
    }

    #[test]
    fn test_append_after_close_fails() {
        let mut writer =
            SerializedFileWriter::new_with_defaults(Vec::new(), test_schema()).unwrap();
        writer.append_row(&record!("id" => 1i64)).unwrap();
        writer.close().unwrap();
        assert!(writer.append_row(&record!("id" => 2i64)).is_err());
        assert!(writer.close().is_err());
    }

    #[test]
    fn test_failed_append_rolls_back_and_writer_stays_usable() {
        use crate::record::Value as V;
        let mut writer =
            SerializedFileWriter::new_with_defaults(Vec::new(), test_schema()).unwrap();
        writer.append_row(&record!("id" => 1i64)).unwrap();
        // missing required field is rejected without corrupting the buffer
        assert!(writer
            .append_row(&V::record([] as [(&str, V); 0]))
            .is_err());
        writer.append_row(&record!("id" => 2i64)).unwrap();
        writer.close().unwrap();
        assert_eq!(writer.num_rows(), 2);
    }

    #[test]
    fn test_into_inner_requires_close() {
        let writer = SerializedFileWriter::new_with_defaults(Vec::new(), test_schema()).unwrap();
        assert!(writer.into_inner().is_err());
    }

    #[test]
    fn test_row_group_boundary_leaves_no_residual() {
        let props = Arc::new(WriterProperties::builder().set_row_group_size(10).build());
        let mut writer =
            SerializedFileWriter::new(Vec::new(), test_schema(), props).unwrap();
        for i in 0..20i64 {
            writer.append_row(&record!("id" => i)).unwrap();
        }
        // both groups flushed by the boundary, none pending
        assert_eq!(writer.flushed_row_groups().len(), 2);
        writer.close().unwrap();
        assert_eq!(writer.num_rows(), 20);
    }

    #[test]
    fn test_trailer_layout() {
        let mut writer =
            SerializedFileWriter::new_with_defaults(Vec::new(), test_schema()).unwrap();
        writer.append_row(&record!("id" => 7i64)).unwrap();
        writer.close().unwrap();
        let bytes = writer.into_inner().unwrap();

        assert_eq!(&bytes[0..4], b"PAR1");
        assert_eq!(&bytes[bytes.len() - 4..], b"PAR1");
        let meta_len = u32::from_le_bytes(
            bytes[bytes.len() - 8..bytes.len() - 4].try_into().unwrap(),
        ) as usize;
        assert!(meta_len < bytes.len() - FOOTER_SIZE);
    }
}
