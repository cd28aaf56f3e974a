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

//! Thrift [compact protocol] support used for the file metadata structs.
//!
//! Only the subset of the protocol the Parquet metadata IDL needs is
//! implemented: a slice-based decoder ([`ThriftSliceReader`]) and a
//! [`Write`]-based encoder ([`ThriftWriter`]).
//!
//! [compact protocol]: https://github.com/apache/thrift/blob/master/doc/specs/thrift-compact-protocol.md

use std::io::Write;

use crate::errors::Result;

/// Compact protocol wire types for struct fields.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum FieldType {
    Stop = 0,
    BooleanTrue = 1,
    BooleanFalse = 2,
    Byte = 3,
    I16 = 4,
    I32 = 5,
    I64 = 6,
    Double = 7,
    Binary = 8,
    List = 9,
    Set = 10,
    Map = 11,
    Struct = 12,
}

impl FieldType {
    fn try_from_u8(value: u8) -> Result<Self> {
        Ok(match value {
            0 => Self::Stop,
            1 => Self::BooleanTrue,
            2 => Self::BooleanFalse,
            3 => Self::Byte,
            4 => Self::I16,
            5 => Self::I32,
            6 => Self::I64,
            7 => Self::Double,
            8 => Self::Binary,
            9 => Self::List,
            10 => Self::Set,
            11 => Self::Map,
            12 => Self::Struct,
            _ => return Err(general_err!("unexpected thrift field type {}", value)),
        })
    }
}

/// Compact protocol wire types for list elements.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ElementType {
    Bool = 2,
    Byte = 3,
    I16 = 4,
    I32 = 5,
    I64 = 6,
    Double = 7,
    Binary = 8,
    List = 9,
    Struct = 12,
}

impl ElementType {
    fn try_from_u8(value: u8) -> Result<Self> {
        Ok(match value {
            // Both 1 and 2 appear in the wild for bool elements; accept both.
            1 | 2 => Self::Bool,
            3 => Self::Byte,
            4 => Self::I16,
            5 => Self::I32,
            6 => Self::I64,
            7 => Self::Double,
            8 => Self::Binary,
            9 => Self::List,
            12 => Self::Struct,
            _ => return Err(general_err!("unexpected thrift element type {}", value)),
        })
    }

    fn as_field_type(&self) -> FieldType {
        match self {
            Self::Bool => FieldType::BooleanTrue,
            Self::Byte => FieldType::Byte,
            Self::I16 => FieldType::I16,
            Self::I32 => FieldType::I32,
            Self::I64 => FieldType::I64,
            Self::Double => FieldType::Double,
            Self::Binary => FieldType::Binary,
            Self::List => FieldType::List,
            Self::Struct => FieldType::Struct,
        }
    }
}

/// Identifier for a struct field during decoding.
pub(crate) struct FieldIdentifier {
    pub(crate) field_type: FieldType,
    pub(crate) id: i16,
    /// Boolean fields carry their value in the field type nibble.
    pub(crate) bool_val: Option<bool>,
}

/// Identifier for a list header during decoding.
pub(crate) struct ListIdentifier {
    pub(crate) element_type: ElementType,
    pub(crate) size: usize,
}

// ----------------------------------------------------------------------
// Decoder

/// Compact protocol decoder over a byte slice.
pub(crate) struct ThriftSliceReader<'a> {
    buf: &'a [u8],
}

impl<'a> ThriftSliceReader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    /// Remaining undecoded bytes.
    pub(crate) fn as_slice(&self) -> &'a [u8] {
        self.buf
    }

    #[inline]
    pub(crate) fn read_byte(&mut self) -> Result<u8> {
        let ret = *self
            .buf
            .first()
            .ok_or_else(|| eof_err!("unexpected end of thrift input"))?;
        self.buf = &self.buf[1..];
        Ok(ret)
    }

    fn read_slice(&mut self, n: usize) -> Result<&'a [u8]> {
        let ret = self
            .buf
            .get(..n)
            .ok_or_else(|| eof_err!("unexpected end of thrift input"))?;
        self.buf = &self.buf[n..];
        Ok(ret)
    }

    /// Read a ULEB128 encoded unsigned varint.
    pub(crate) fn read_vlq(&mut self) -> Result<u64> {
        let mut in_progress = 0u64;
        let mut shift = 0u32;
        loop {
            let byte = self.read_byte()?;
            in_progress |= ((byte & 0x7f) as u64).wrapping_shl(shift);
            if byte & 0x80 == 0 {
                return Ok(in_progress);
            }
            shift += 7;
        }
    }

    /// Read a zig-zag encoded signed varint.
    fn read_zig_zag(&mut self) -> Result<i64> {
        let val = self.read_vlq()?;
        Ok((val >> 1) as i64 ^ -((val & 1) as i64))
    }

    pub(crate) fn read_i16(&mut self) -> Result<i16> {
        Ok(self.read_zig_zag()? as i16)
    }

    pub(crate) fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_zig_zag()? as i32)
    }

    pub(crate) fn read_i64(&mut self) -> Result<i64> {
        self.read_zig_zag()
    }

    pub(crate) fn read_bool(&mut self) -> Result<bool> {
        match self.read_byte()? {
            0x01 => Ok(true),
            0x00 | 0x02 => Ok(false),
            b => Err(general_err!("cannot convert {} into bool", b)),
        }
    }

    pub(crate) fn read_bytes(&mut self) -> Result<&'a [u8]> {
        let len = self.read_vlq()? as usize;
        self.read_slice(len)
    }

    pub(crate) fn read_string(&mut self) -> Result<String> {
        Ok(std::str::from_utf8(self.read_bytes()?)?.to_owned())
    }

    /// Read the header of a struct field. `last_field_id` is used to resolve
    /// delta-encoded field ids.
    pub(crate) fn read_field_begin(&mut self, last_field_id: i16) -> Result<FieldIdentifier> {
        let byte = self.read_byte()?;
        let field_delta = (byte & 0xf0) >> 4;
        let field_type = FieldType::try_from_u8(byte & 0x0f)?;

        if field_type == FieldType::Stop {
            return Ok(FieldIdentifier {
                field_type,
                id: 0,
                bool_val: None,
            });
        }

        let bool_val = match field_type {
            FieldType::BooleanTrue => Some(true),
            FieldType::BooleanFalse => Some(false),
            _ => None,
        };

        let id = if field_delta != 0 {
            last_field_id
                .checked_add(field_delta as i16)
                .ok_or_else(|| general_err!("thrift field id overflow"))?
        } else {
            self.read_i16()?
        };

        Ok(FieldIdentifier {
            field_type,
            id,
            bool_val,
        })
    }

    /// Read a list header.
    pub(crate) fn read_list_begin(&mut self) -> Result<ListIdentifier> {
        let header = self.read_byte()?;
        // some writers emit element type 0 for an empty list
        if header == 0 {
            return Ok(ListIdentifier {
                element_type: ElementType::Byte,
                size: 0,
            });
        }
        let element_type = ElementType::try_from_u8(header & 0x0f)?;
        let short_size = (header & 0xf0) >> 4;
        let size = if short_size != 15 {
            short_size as usize
        } else {
            self.read_vlq()? as usize
        };
        Ok(ListIdentifier { element_type, size })
    }

    /// Skip a field of the given type, recursing into structs and lists up
    /// to a fixed depth.
    pub(crate) fn skip(&mut self, field_type: FieldType) -> Result<()> {
        self.skip_till_depth(field_type, 32)
    }

    fn skip_till_depth(&mut self, field_type: FieldType, depth: u8) -> Result<()> {
        if depth == 0 {
            return Err(general_err!("thrift skip depth exceeded"));
        }
        match field_type {
            FieldType::BooleanTrue | FieldType::BooleanFalse => Ok(()),
            FieldType::Byte => self.read_byte().map(|_| ()),
            FieldType::I16 | FieldType::I32 | FieldType::I64 => {
                self.read_vlq().map(|_| ())
            }
            FieldType::Double => self.read_slice(8).map(|_| ()),
            FieldType::Binary => self.read_bytes().map(|_| ()),
            FieldType::Struct => {
                let mut last_field_id = 0i16;
                loop {
                    let field = self.read_field_begin(last_field_id)?;
                    if field.field_type == FieldType::Stop {
                        return Ok(());
                    }
                    // bool struct fields carry no payload
                    if field.bool_val.is_none() {
                        self.skip_till_depth(field.field_type, depth - 1)?;
                    }
                    last_field_id = field.id;
                }
            }
            FieldType::List => {
                let list = self.read_list_begin()?;
                for _ in 0..list.size {
                    if list.element_type == ElementType::Bool {
                        self.read_bool()?;
                    } else {
                        self.skip_till_depth(list.element_type.as_field_type(), depth - 1)?;
                    }
                }
                Ok(())
            }
            FieldType::Set | FieldType::Map => {
                Err(general_err!("cannot skip thrift field type {:?}", field_type))
            }
            FieldType::Stop => Err(general_err!("cannot skip a stop field")),
        }
    }
}

// ----------------------------------------------------------------------
// Encoder

/// Compact protocol encoder over a [`Write`] sink.
pub(crate) struct ThriftWriter<W: Write> {
    sink: W,
}

impl<W: Write> ThriftWriter<W> {
    pub(crate) fn new(sink: W) -> Self {
        Self { sink }
    }

    fn write_byte(&mut self, b: u8) -> Result<()> {
        self.sink.write_all(&[b])?;
        Ok(())
    }

    /// Write a ULEB128 encoded unsigned varint.
    pub(crate) fn write_vlq(&mut self, val: u64) -> Result<()> {
        let mut v = val;
        while v > 0x7f {
            self.write_byte(v as u8 | 0x80)?;
            v >>= 7;
        }
        self.write_byte(v as u8)
    }

    fn write_zig_zag(&mut self, val: i64) -> Result<()> {
        let s = (val < 0) as i64;
        self.write_vlq((((val ^ -s) << 1) + s) as u64)
    }

    pub(crate) fn write_i16(&mut self, val: i16) -> Result<()> {
        self.write_zig_zag(val as i64)
    }

    pub(crate) fn write_i32(&mut self, val: i32) -> Result<()> {
        self.write_zig_zag(val as i64)
    }

    pub(crate) fn write_i64(&mut self, val: i64) -> Result<()> {
        self.write_zig_zag(val)
    }

    pub(crate) fn write_bytes(&mut self, val: &[u8]) -> Result<()> {
        self.write_vlq(val.len() as u64)?;
        self.sink.write_all(val)?;
        Ok(())
    }

    pub(crate) fn write_string(&mut self, val: &str) -> Result<()> {
        self.write_bytes(val.as_bytes())
    }

    /// Write a struct field header. The field id is delta-encoded against
    /// `last_field_id` when it fits in a nibble.
    pub(crate) fn write_field_begin(
        &mut self,
        field_type: FieldType,
        field_id: i16,
        last_field_id: i16,
    ) -> Result<()> {
        let delta = field_id.wrapping_sub(last_field_id);
        if delta > 0 && delta <= 0xf {
            self.write_byte((delta as u8) << 4 | field_type as u8)
        } else {
            self.write_byte(field_type as u8)?;
            self.write_i16(field_id)
        }
    }

    /// Write a boolean struct field; the value lives in the type nibble.
    pub(crate) fn write_bool_field(
        &mut self,
        val: bool,
        field_id: i16,
        last_field_id: i16,
    ) -> Result<()> {
        let field_type = if val {
            FieldType::BooleanTrue
        } else {
            FieldType::BooleanFalse
        };
        self.write_field_begin(field_type, field_id, last_field_id)
    }

    pub(crate) fn write_list_begin(
        &mut self,
        element_type: ElementType,
        len: usize,
    ) -> Result<()> {
        if len < 15 {
            self.write_byte((len as u8) << 4 | element_type as u8)
        } else {
            self.write_byte(0xf0 | element_type as u8)?;
            self.write_vlq(len as u64)
        }
    }

    /// Mark the end of a struct.
    pub(crate) fn write_struct_end(&mut self) -> Result<()> {
        self.write_byte(0)
    }
}
