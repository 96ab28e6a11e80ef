#![doc = r#"
Big-endian primitive writes for NRB streams
"#]

mod sink;
pub use sink::*;

use crate::constants::BIAS8;

/// Writes big-endian fields to a sink.
#[derive(Debug)]
pub struct Writer<S> {
    sink: S,
    written: usize,
}

impl<S: NrbSink> Writer<S> {
    /// Write to the given sink
    pub const fn new(sink: S) -> Self {
        Self { sink, written: 0 }
    }

    /// Number of bytes written so far
    pub const fn written(&self) -> usize {
        self.written
    }

    /// Unwrap the sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn put<const N: usize>(&mut self, bytes: [u8; N]) -> Result<(), SinkError> {
        self.sink.put(&bytes)?;
        self.written += N;
        Ok(())
    }

    /// Write a single byte
    pub fn write_u8(&mut self, v: u8) -> Result<(), SinkError> {
        self.put([v])
    }

    /// Write a big-endian `u16`
    pub fn write_u16(&mut self, v: u16) -> Result<(), SinkError> {
        self.put(v.to_be_bytes())
    }

    /// Write a big-endian `u32`
    pub fn write_u32(&mut self, v: u32) -> Result<(), SinkError> {
        self.put(v.to_be_bytes())
    }

    /// Write a big-endian `u64`
    pub fn write_u64(&mut self, v: u64) -> Result<(), SinkError> {
        self.put(v.to_be_bytes())
    }

    /// Write a signed byte with a bias of 128, so `-128` becomes `0x00`.
    pub fn write_bias8(&mut self, v: i8) -> Result<(), SinkError> {
        self.write_u8((v as i16 + BIAS8) as u8)
    }
}

#[test]
fn writes_are_big_endian() {
    use alloc::vec::Vec;
    use pretty_assertions::assert_eq;

    let mut writer = Writer::new(Vec::<u8>::new());
    writer.write_u8(0x01).unwrap();
    writer.write_u16(0x1234).unwrap();
    writer.write_u32(0xDEAD_BEEF).unwrap();
    writer.write_u64(0x0102_0304_0506_0708).unwrap();
    writer.write_bias8(-39).unwrap();
    assert_eq!(writer.written(), 16);
    assert_eq!(
        writer.into_sink(),
        [
            0x01, 0x12, 0x34, 0xDE, 0xAD, 0xBE, 0xEF, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07,
            0x08, 0x59
        ]
    );
}

#[test]
fn bias_encoding_is_symmetric() {
    use crate::reader::Reader;
    use alloc::vec::Vec;
    use pretty_assertions::assert_eq;

    let mut writer = Writer::new(Vec::<u8>::new());
    for v in i8::MIN..=i8::MAX {
        writer.write_bias8(v).unwrap();
    }
    let bytes = writer.into_sink();
    assert_eq!(bytes.first(), Some(&0x00));
    assert_eq!(bytes.last(), Some(&0xFF));

    let mut reader = Reader::from_byte_slice(&bytes);
    for v in i8::MIN..=i8::MAX {
        assert_eq!(reader.read_bias8().unwrap(), v);
    }
}
