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

//! Writer properties.
//!
//! # Usage
//!
//! ```rust
//! use parq::basic::Compression;
//! use parq::file::properties::WriterProperties;
//!
//! let props = WriterProperties::builder()
//!     .set_row_group_size(1024)
//!     .set_compression(Compression::SNAPPY)
//!     .set_data_page_v2(true)
//!     .build();
//! assert_eq!(props.row_group_size(), 1024);
//! assert_eq!(props.compression(), Compression::SNAPPY);
//! ```

use std::sync::Arc;

use crate::basic::Compression;
use crate::format::KeyValue;

/// Default number of buffered rows before a row group is flushed.
pub const DEFAULT_ROW_GROUP_SIZE: usize = 4096;
/// Default advisory number of column values per data page.
pub const DEFAULT_PAGE_SIZE: usize = 8192;
const DEFAULT_COMPRESSION: Compression = Compression::UNCOMPRESSED;
const DEFAULT_DATA_PAGE_V2: bool = false;
const DEFAULT_CREATED_BY: &str = concat!("parq version ", env!("CARGO_PKG_VERSION"));

/// Reference counted writer properties.
pub type WriterPropertiesPtr = Arc<WriterProperties>;

/// Immutable writer configuration, assembled via
/// [`WriterProperties::builder`].
#[derive(Debug, Clone)]
pub struct WriterProperties {
    row_group_size: usize,
    page_size: usize,
    compression: Compression,
    data_page_v2: bool,
    created_by: String,
    key_value_metadata: Option<Vec<KeyValue>>,
}

impl WriterProperties {
    pub fn builder() -> WriterPropertiesBuilder {
        WriterPropertiesBuilder::new()
    }

    /// Number of buffered rows that triggers a row-group flush.
    pub fn row_group_size(&self) -> usize {
        self.row_group_size
    }

    /// Advisory page size in column values. One page per chunk is written
    /// regardless.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// File-level default compression; per-column schema settings override
    /// it.
    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Whether DATA_PAGE_V2 pages are written.
    pub fn data_page_v2(&self) -> bool {
        self.data_page_v2
    }

    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    pub fn key_value_metadata(&self) -> Option<&Vec<KeyValue>> {
        self.key_value_metadata.as_ref()
    }
}

/// Builder for [`WriterProperties`].
pub struct WriterPropertiesBuilder {
    row_group_size: usize,
    page_size: usize,
    compression: Compression,
    data_page_v2: bool,
    created_by: String,
    key_value_metadata: Option<Vec<KeyValue>>,
}

impl WriterPropertiesBuilder {
    fn new() -> Self {
        Self {
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
            page_size: DEFAULT_PAGE_SIZE,
            compression: DEFAULT_COMPRESSION,
            data_page_v2: DEFAULT_DATA_PAGE_V2,
            created_by: DEFAULT_CREATED_BY.to_owned(),
            key_value_metadata: None,
        }
    }

    pub fn set_row_group_size(mut self, value: usize) -> Self {
        assert!(value > 0, "row group size must be greater than 0");
        self.row_group_size = value;
        self
    }

    pub fn set_page_size(mut self, value: usize) -> Self {
        assert!(value > 0, "page size must be greater than 0");
        self.page_size = value;
        self
    }

    pub fn set_compression(mut self, value: Compression) -> Self {
        self.compression = value;
        self
    }

    pub fn set_data_page_v2(mut self, value: bool) -> Self {
        self.data_page_v2 = value;
        self
    }

    pub fn set_created_by(mut self, value: String) -> Self {
        self.created_by = value;
        self
    }

    pub fn set_key_value_metadata(mut self, value: Option<Vec<KeyValue>>) -> Self {
        self.key_value_metadata = value;
        self
    }

    pub fn build(self) -> WriterProperties {
        WriterProperties {
            row_group_size: self.row_group_size,
            page_size: self.page_size,
            compression: self.compression,
            data_page_v2: self.data_page_v2,
            created_by: self.created_by,
            key_value_metadata: self.key_value_metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let props = WriterProperties::builder().build();
        assert_eq!(props.row_group_size(), DEFAULT_ROW_GROUP_SIZE);
        assert_eq!(props.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(props.compression(), Compression::UNCOMPRESSED);
        assert!(!props.data_page_v2());
        assert!(props.created_by().starts_with("parq version"));
        assert!(props.key_value_metadata().is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let props = WriterProperties::builder()
            .set_row_group_size(10)
            .set_page_size(100)
            .set_compression(Compression::BROTLI)
            .set_data_page_v2(true)
            .set_created_by("test writer".to_owned())
            .set_key_value_metadata(Some(vec![KeyValue::new(
                "origin".to_owned(),
                Some("unit test".to_owned()),
            )]))
            .build();
        assert_eq!(props.row_group_size(), 10);
        assert_eq!(props.page_size(), 100);
        assert_eq!(props.compression(), Compression::BROTLI);
        assert!(props.data_page_v2());
        assert_eq!(props.created_by(), "test writer");
        assert_eq!(props.key_value_metadata().unwrap().len(), 1);
    }

    #[test]
    #[should_panic(expected = "row group size must be greater than 0")]
    fn test_zero_row_group_size_panics() {
        WriterProperties::builder().set_row_group_size(0);
    }
}
