#![doc = r#"
Big-endian primitive reads for NRB streams

# Overview

The [`Reader`] pulls fixed-width fields from any [`NrbSource`]. There are
two layers:

- the raw reads ([`Reader::read_u8`], [`Reader::read_u16`],
  [`Reader::read_u32`], [`Reader::read_u64`], [`Reader::read_bias8`]) fail
  only when the stream ends or errors;
- the unsigned reads ([`Reader::read_uint32`], [`Reader::read_uint64`])
  additionally reject values with the top bit set, because the format
  stores those fields in signed types.

Range checks that belong to the format itself (pitch bounds, counts and
so on) are applied above this module.
"#]

mod error;
pub use error::*;

mod source;
pub use source::*;

use crate::{ParseError, constants::BIAS8};

/// Reads big-endian fields from a source, tracking the byte position.
#[derive(Debug)]
pub struct Reader<S> {
    source: S,
    position: usize,
    field_start: usize,
    last_error_offset: usize,
}

impl<'a> Reader<SliceSource<'a>> {
    /// Read from an in-memory slice
    pub const fn from_byte_slice(bytes: &'a [u8]) -> Self {
        Self::new(SliceSource::new(bytes))
    }
}

impl<S: NrbSource> Reader<S> {
    /// Read from the given source
    pub const fn new(source: S) -> Self {
        Self {
            source,
            position: 0,
            field_start: 0,
            last_error_offset: 0,
        }
    }

    /// Number of bytes consumed so far.
    pub const fn buffer_position(&self) -> usize {
        self.position
    }

    /// Offset of the first byte of the field most recently read.
    pub const fn field_position(&self) -> usize {
        self.field_start
    }

    /// Offset of the last field that was rejected.
    pub const fn last_error_offset(&self) -> usize {
        self.last_error_offset
    }

    pub(crate) fn set_last_error_offset(&mut self, offset: usize) {
        self.last_error_offset = offset;
    }

    /// Unwrap the source
    pub fn into_source(self) -> S {
        self.source
    }

    fn read_exact_size<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let mut buf = [0; N];
        self.field_start = self.position;
        self.source
            .fill(&mut buf)
            .map_err(|kind| ReaderError::new(self.position, kind))?;
        self.position += N;
        Ok(buf)
    }

    /// Read a single byte
    pub fn read_u8(&mut self) -> ReadResult<u8> {
        self.read_exact_size::<1>().map(|[b]| b)
    }

    /// Read a big-endian `u16`
    pub fn read_u16(&mut self) -> ReadResult<u16> {
        self.read_exact_size().map(u16::from_be_bytes)
    }

    /// Read a big-endian `u32`
    pub fn read_u32(&mut self) -> ReadResult<u32> {
        self.read_exact_size().map(u32::from_be_bytes)
    }

    /// Read a big-endian `u64`
    pub fn read_u64(&mut self) -> ReadResult<u64> {
        self.read_exact_size().map(u64::from_be_bytes)
    }

    /// Read a byte and remove the bias, giving a value in [-128, 127].
    pub fn read_bias8(&mut self) -> ReadResult<i8> {
        let byte = self.read_u8()?;
        Ok((byte as i16 - BIAS8) as i8)
    }

    /// Read a `u32` that must fit in an `i32`.
    pub fn read_uint32(&mut self) -> ReadResult<i32> {
        let v = self.read_u32()?;
        i32::try_from(v).map_err(|_| inv_data(self, ParseError::UnsignedRange(v as u64)))
    }

    /// Read a `u64` that must fit in an `i64`.
    pub fn read_uint64(&mut self) -> ReadResult<i64> {
        let v = self.read_u64()?;
        i64::try_from(v).map_err(|_| inv_data(self, ParseError::UnsignedRange(v)))
    }
}

#[test]
fn reads_are_big_endian() {
    use pretty_assertions::assert_eq;
    let bytes = [
        0x01, //
        0x12, 0x34, //
        0xDE, 0xAD, 0xBE, 0xEF, //
        0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08,
    ];
    let mut reader = Reader::from_byte_slice(&bytes);
    assert_eq!(reader.read_u8().unwrap(), 0x01);
    assert_eq!(reader.read_u16().unwrap(), 0x1234);
    assert_eq!(reader.read_u32().unwrap(), 0xDEAD_BEEF);
    assert_eq!(reader.read_u64().unwrap(), 0x0102_0304_0506_0708);
    assert_eq!(reader.buffer_position(), 15);
    assert!(reader.read_u8().unwrap_err().is_out_of_bounds());
}

#[test]
fn truncated_field_reports_its_start() {
    use pretty_assertions::assert_eq;
    let mut reader = Reader::from_byte_slice(&[0xAA, 0x00, 0x01, 0x02]);
    reader.read_u8().unwrap();
    let err = reader.read_u64().unwrap_err();
    assert!(err.is_out_of_bounds());
    assert_eq!(err.position(), 1);
}

#[test]
fn top_bit_is_rejected_by_unsigned_reads() {
    use pretty_assertions::assert_eq;

    let mut reader = Reader::from_byte_slice(&[0x80, 0, 0, 0, 0x7F, 0xFF, 0xFF, 0xFF]);
    let err = reader.read_uint32().unwrap_err();
    assert_eq!(err.parse_error(), Some(&ParseError::UnsignedRange(0x8000_0000)));
    assert_eq!(err.position(), 0);
    assert_eq!(reader.read_uint32().unwrap(), i32::MAX);

    let mut bytes = [0xFF; 8];
    let err = Reader::from_byte_slice(&bytes).read_uint64().unwrap_err();
    assert_eq!(err.parse_error(), Some(&ParseError::UnsignedRange(u64::MAX)));
    bytes[0] = 0x7F;
    assert_eq!(Reader::from_byte_slice(&bytes).read_uint64().unwrap(), i64::MAX);
}

#[test]
fn bias_decoding() {
    use pretty_assertions::assert_eq;
    let mut reader = Reader::from_byte_slice(&[0x00, 0x80, 0xFF, 0x59]);
    assert_eq!(reader.read_bias8().unwrap(), -128);
    assert_eq!(reader.read_bias8().unwrap(), 0);
    assert_eq!(reader.read_bias8().unwrap(), 127);
    assert_eq!(reader.read_bias8().unwrap(), -39);
}
