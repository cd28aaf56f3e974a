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

//! A self-contained implementation of the
//! [Apache Parquet](https://parquet.apache.org/) columnar storage format
//! for dynamically typed record trees.
//!
//! Records are nested [`record::Value`]s. Writing shreds each record into
//! per-leaf column streams with the [Dremel] striping algorithm, encodes
//! and compresses them into data pages, and lays the pages out in
//! magic-bounded row groups with a Thrift compact footer. Reading reverses
//! every step and reassembles the records, with optional column
//! projection.
//!
//! # Example
//!
//! ```no_run
//! use std::fs::File;
//! use std::sync::Arc;
//! use parq::basic::{ConvertedType, Repetition, Type as PhysicalType};
//! use parq::file::reader::SerializedFileReader;
//! use parq::file::writer::SerializedFileWriter;
//! use parq::record;
//! use parq::schema::types::Type;
//!
//! let name = Arc::new(
//!     Type::primitive_type_builder("name", PhysicalType::BYTE_ARRAY)
//!         .with_converted_type(ConvertedType::UTF8)
//!         .with_repetition(Repetition::REQUIRED)
//!         .build()?,
//! );
//! let schema = Arc::new(
//!     Type::group_type_builder("schema").with_fields(vec![name]).build()?,
//! );
//!
//! let mut writer =
//!     SerializedFileWriter::new_with_defaults(File::create("fruit.parquet")?, schema)?;
//! writer.append_row(&record!("name" => "apple"))?;
//! writer.append_row(&record!("name" => "orange"))?;
//! writer.close()?;
//!
//! let reader = SerializedFileReader::new(File::open("fruit.parquet")?)?;
//! for row in reader.get_row_iter(None)? {
//!     println!("{:?}", row?);
//! }
//! # Ok::<(), parq::errors::ParquetError>(())
//! ```
//!
//! [Dremel]: https://research.google/pubs/pub36632/

#[macro_use]
pub mod errors;
pub mod basic;

pub mod format;

mod thrift;

mod column;
pub mod compression;
mod encodings;
pub mod file;
pub mod record;
pub mod schema;
