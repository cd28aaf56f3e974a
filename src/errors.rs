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

//! Common error types and macros.

use std::error::Error;
use std::{io, result, str};

/// Parquet error enumeration.
///
/// Variants group failures by the subsystem that raised them; the message
/// carries the precise condition (e.g. "missing required field", "bad magic").
#[derive(Debug)]
pub enum ParquetError {
    /// General error not covered by the other variants.
    General(String),
    /// Schema construction or lookup failure: unknown type, unsupported
    /// encoding or compression, bad DECIMAL parameters, missing type length.
    Schema(String),
    /// Record shredding, assembly, or value conversion failure.
    Record(String),
    /// Value or level encoding/decoding failure.
    Codec(String),
    /// Compression or decompression failure.
    Compression(String),
    /// File envelope failure: bad magic, bad trailer, bad version,
    /// external column reference, unknown page type.
    Format(String),
    /// Writer lifecycle failure: use after close, empty file at close.
    Writer(String),
    /// Returned when there are not enough bytes to decode.
    EOF(String),
    /// An external error, e.g. from the underlying storage.
    External(Box<dyn Error + Send + Sync>),
}

impl std::fmt::Display for ParquetError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self {
            ParquetError::General(message) => write!(fmt, "Parquet error: {message}"),
            ParquetError::Schema(message) => write!(fmt, "Schema error: {message}"),
            ParquetError::Record(message) => write!(fmt, "Record error: {message}"),
            ParquetError::Codec(message) => write!(fmt, "Codec error: {message}"),
            ParquetError::Compression(message) => write!(fmt, "Compression error: {message}"),
            ParquetError::Format(message) => write!(fmt, "Format error: {message}"),
            ParquetError::Writer(message) => write!(fmt, "Writer error: {message}"),
            ParquetError::EOF(message) => write!(fmt, "EOF: {message}"),
            ParquetError::External(e) => write!(fmt, "External: {e}"),
        }
    }
}

impl Error for ParquetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParquetError::External(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<io::Error> for ParquetError {
    fn from(e: io::Error) -> ParquetError {
        ParquetError::External(Box::new(e))
    }
}

impl From<str::Utf8Error> for ParquetError {
    fn from(e: str::Utf8Error) -> ParquetError {
        ParquetError::External(Box::new(e))
    }
}

impl From<std::string::FromUtf8Error> for ParquetError {
    fn from(e: std::string::FromUtf8Error) -> ParquetError {
        ParquetError::External(Box::new(e))
    }
}

/// A specialized `Result` for Parquet errors.
pub type Result<T, E = ParquetError> = result::Result<T, E>;

// ----------------------------------------------------------------------
// Conversion from `ParquetError` to other types of `Error`s

impl From<ParquetError> for io::Error {
    fn from(e: ParquetError) -> Self {
        io::Error::new(io::ErrorKind::Other, e)
    }
}

// ----------------------------------------------------------------------
// Convenient macros for different errors

macro_rules! general_err {
    ($fmt:expr) => (crate::errors::ParquetError::General($fmt.to_owned()));
    ($fmt:expr, $($args:expr),*) => (crate::errors::ParquetError::General(format!($fmt, $($args),*)));
}

macro_rules! schema_err {
    ($fmt:expr) => (crate::errors::ParquetError::Schema($fmt.to_owned()));
    ($fmt:expr, $($args:expr),*) => (crate::errors::ParquetError::Schema(format!($fmt, $($args),*)));
}

macro_rules! record_err {
    ($fmt:expr) => (crate::errors::ParquetError::Record($fmt.to_owned()));
    ($fmt:expr, $($args:expr),*) => (crate::errors::ParquetError::Record(format!($fmt, $($args),*)));
}

macro_rules! codec_err {
    ($fmt:expr) => (crate::errors::ParquetError::Codec($fmt.to_owned()));
    ($fmt:expr, $($args:expr),*) => (crate::errors::ParquetError::Codec(format!($fmt, $($args),*)));
}

macro_rules! compression_err {
    ($fmt:expr) => (crate::errors::ParquetError::Compression($fmt.to_owned()));
    ($fmt:expr, $($args:expr),*) => (crate::errors::ParquetError::Compression(format!($fmt, $($args),*)));
}

macro_rules! format_err {
    ($fmt:expr) => (crate::errors::ParquetError::Format($fmt.to_owned()));
    ($fmt:expr, $($args:expr),*) => (crate::errors::ParquetError::Format(format!($fmt, $($args),*)));
}

macro_rules! writer_err {
    ($fmt:expr) => (crate::errors::ParquetError::Writer($fmt.to_owned()));
    ($fmt:expr, $($args:expr),*) => (crate::errors::ParquetError::Writer(format!($fmt, $($args),*)));
}

macro_rules! eof_err {
    ($fmt:expr) => (crate::errors::ParquetError::EOF($fmt.to_owned()));
    ($fmt:expr, $($args:expr),*) => (crate::errors::ParquetError::EOF(format!($fmt, $($args),*)));
}
