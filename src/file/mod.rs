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

//! File reader and writer APIs plus writer configuration.
//!
//! File layout:
//! ```text
//!   0            : 4 bytes ASCII "PAR1"
//!   4 ..         : row-group bodies (column chunks in schema leaf order)
//!   F-8-M .. F-8 : file metadata (Thrift compact), M bytes
//!   F-8 .. F-4   : 4 bytes LE = M
//!   F-4 .. F     : 4 bytes ASCII "PAR1"
//! ```

pub mod properties;
pub mod reader;
pub mod writer;

/// Magic bytes at both ends of every file.
pub const PARQUET_MAGIC: [u8; 4] = *b"PAR1";
/// Size of the fixed trailer: metadata length plus trailing magic.
pub const FOOTER_SIZE: usize = 8;
