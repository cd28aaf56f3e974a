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

//! Contains codec interface and supported codec implementations.
//!
//! See [`Compression`] for all available compression algorithms. Snappy is
//! implemented in-tree (see [`snappy`]); GZIP, BROTLI and LZ4 delegate to
//! their respective crates.

pub mod snappy;

use std::io::{Read, Write};

use crate::basic::Compression;
use crate::errors::Result;

const BROTLI_DEFAULT_BUFFER_SIZE: usize = 4096;
const BROTLI_DEFAULT_COMPRESSION_QUALITY: u32 = 1;
const BROTLI_DEFAULT_LG_WINDOW_SIZE: u32 = 22;

/// Parquet block compression codec interface.
pub trait Codec: Send {
    /// Compresses data stored in slice `input_buf` and appends the
    /// compressed result to `output_buf`.
    fn compress(&mut self, input_buf: &[u8], output_buf: &mut Vec<u8>) -> Result<()>;

    /// Decompresses data stored in slice `input_buf` and appends output to
    /// `output_buf`, returning the number of bytes appended.
    ///
    /// `uncompress_size` carries the expected uncompressed size for
    /// formats that need it up front.
    fn decompress(
        &mut self,
        input_buf: &[u8],
        output_buf: &mut Vec<u8>,
        uncompress_size: Option<usize>,
    ) -> Result<usize>;
}

/// Given the compression type `codec`, returns a codec used to compress
/// and decompress bytes, or `None` for [`Compression::UNCOMPRESSED`].
pub fn create_codec(codec: Compression) -> Result<Option<Box<dyn Codec>>> {
    match codec {
        Compression::UNCOMPRESSED => Ok(None),
        Compression::SNAPPY => Ok(Some(Box::new(SnappyCodec::new()))),
        Compression::GZIP => Ok(Some(Box::new(GZipCodec::new()))),
        Compression::BROTLI => Ok(Some(Box::new(BrotliCodec::new()))),
        Compression::LZ4 => Ok(Some(Box::new(LZ4Codec::new()))),
        Compression::LZO => Err(compression_err!("LZO support is not enabled")),
    }
}

/// Codec for the Snappy compression format (implemented in-tree).
pub struct SnappyCodec {}

impl SnappyCodec {
    fn new() -> Self {
        Self {}
    }
}

impl Codec for SnappyCodec {
    fn compress(&mut self, input_buf: &[u8], output_buf: &mut Vec<u8>) -> Result<()> {
        output_buf.extend_from_slice(&snappy::compress(input_buf));
        Ok(())
    }

    fn decompress(
        &mut self,
        input_buf: &[u8],
        output_buf: &mut Vec<u8>,
        _uncompress_size: Option<usize>,
    ) -> Result<usize> {
        let decompressed = snappy::decompress(input_buf)?;
        output_buf.extend_from_slice(&decompressed);
        Ok(decompressed.len())
    }
}

/// Codec for GZIP compression algorithm.
pub struct GZipCodec {}

impl GZipCodec {
    fn new() -> Self {
        Self {}
    }
}

impl Codec for GZipCodec {
    fn compress(&mut self, input_buf: &[u8], output_buf: &mut Vec<u8>) -> Result<()> {
        let mut encoder = flate2::write::GzEncoder::new(output_buf, flate2::Compression::default());
        encoder.write_all(input_buf)?;
        encoder.try_finish()?;
        Ok(())
    }

    fn decompress(
        &mut self,
        input_buf: &[u8],
        output_buf: &mut Vec<u8>,
        _uncompress_size: Option<usize>,
    ) -> Result<usize> {
        let mut decoder = flate2::read::GzDecoder::new(input_buf);
        let size = decoder.read_to_end(output_buf)?;
        Ok(size)
    }
}

/// Codec for Brotli compression algorithm.
pub struct BrotliCodec {}

impl BrotliCodec {
    fn new() -> Self {
        Self {}
    }
}

impl Codec for BrotliCodec {
    fn compress(&mut self, input_buf: &[u8], output_buf: &mut Vec<u8>) -> Result<()> {
        let mut encoder = brotli::CompressorWriter::new(
            output_buf,
            BROTLI_DEFAULT_BUFFER_SIZE,
            BROTLI_DEFAULT_COMPRESSION_QUALITY,
            BROTLI_DEFAULT_LG_WINDOW_SIZE,
        );
        encoder.write_all(input_buf)?;
        encoder.flush()?;
        Ok(())
    }

    fn decompress(
        &mut self,
        input_buf: &[u8],
        output_buf: &mut Vec<u8>,
        uncompress_size: Option<usize>,
    ) -> Result<usize> {
        let buffer_size = uncompress_size.unwrap_or(BROTLI_DEFAULT_BUFFER_SIZE);
        brotli::Decompressor::new(input_buf, buffer_size.max(1))
            .read_to_end(output_buf)
            .map_err(|e| {
                crate::errors::ParquetError::Compression(format!("brotli inflate failed: {e}"))
            })
    }
}

/// Codec for LZ4 compression algorithm (block format with a length
/// prefix).
pub struct LZ4Codec {}

impl LZ4Codec {
    fn new() -> Self {
        Self {}
    }
}

impl Codec for LZ4Codec {
    fn compress(&mut self, input_buf: &[u8], output_buf: &mut Vec<u8>) -> Result<()> {
        output_buf.extend_from_slice(&lz4_flex::block::compress_prepend_size(input_buf));
        Ok(())
    }

    fn decompress(
        &mut self,
        input_buf: &[u8],
        output_buf: &mut Vec<u8>,
        _uncompress_size: Option<usize>,
    ) -> Result<usize> {
        let decompressed = lz4_flex::block::decompress_size_prepended(input_buf)
            .map_err(|e| compression_err!("LZ4 inflate failed: {}", e))?;
        output_buf.extend_from_slice(&decompressed);
        Ok(decompressed.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn test_codec_round_trip(compression: Compression) {
        let mut codec = create_codec(compression).unwrap().unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for size in [0usize, 1, 100, 10_000] {
            // compressible data with some noise
            let data: Vec<u8> = (0..size)
                .map(|i| {
                    if rng.gen_bool(0.8) {
                        (i % 16) as u8
                    } else {
                        rng.gen()
                    }
                })
                .collect();
            let mut compressed = Vec::new();
            codec.compress(&data, &mut compressed).unwrap();
            let mut decompressed = Vec::new();
            let n = codec
                .decompress(&compressed, &mut decompressed, Some(size))
                .unwrap();
            assert_eq!(n, size);
            assert_eq!(decompressed, data);
        }
    }

    #[test]
    fn test_snappy_codec() {
        test_codec_round_trip(Compression::SNAPPY);
    }

    #[test]
    fn test_gzip_codec() {
        test_codec_round_trip(Compression::GZIP);
    }

    #[test]
    fn test_brotli_codec() {
        test_codec_round_trip(Compression::BROTLI);
    }

    #[test]
    fn test_lz4_codec() {
        test_codec_round_trip(Compression::LZ4);
    }

    #[test]
    fn test_uncompressed_has_no_codec() {
        assert!(create_codec(Compression::UNCOMPRESSED).unwrap().is_none());
    }

    #[test]
    fn test_lzo_not_enabled() {
        assert!(create_codec(Compression::LZO).is_err());
    }
}
