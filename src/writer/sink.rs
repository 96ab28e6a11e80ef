use alloc::vec::Vec;
use thiserror::Error;

/// Reasons an [`NrbSink`] may refuse output
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SinkError {
    /// A fixed-size buffer has no room left.
    #[error("Output buffer is full")]
    Full,
    /// The underlying stream failed.
    #[cfg(feature = "std")]
    #[error("I/O error: {0}")]
    Io(std::io::ErrorKind),
}

/// A sequential destination for a [`Writer`](super::Writer).
pub trait NrbSink {
    /// Write all of `bytes`, or fail.
    fn put(&mut self, bytes: &[u8]) -> Result<(), SinkError>;
}

impl<S: NrbSink + ?Sized> NrbSink for &mut S {
    fn put(&mut self, bytes: &[u8]) -> Result<(), SinkError> {
        (**self).put(bytes)
    }
}

impl NrbSink for Vec<u8> {
    fn put(&mut self, bytes: &[u8]) -> Result<(), SinkError> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// Writes into a caller-provided buffer.
#[derive(Debug)]
pub struct SliceSink<'a> {
    buf: &'a mut [u8],
    written: usize,
}

impl<'a> SliceSink<'a> {
    /// Write from the start of `buf`
    pub const fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, written: 0 }
    }

    /// Number of bytes written so far
    pub const fn written(&self) -> usize {
        self.written
    }
}

impl NrbSink for SliceSink<'_> {
    fn put(&mut self, bytes: &[u8]) -> Result<(), SinkError> {
        let end = self.written + bytes.len();
        let Some(dest) = self.buf.get_mut(self.written..end) else {
            return Err(SinkError::Full);
        };
        dest.copy_from_slice(bytes);
        self.written = end;
        Ok(())
    }
}

/// Adapts any [`std::io::Write`] into an [`NrbSink`].
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoSink<W> {
    inner: W,
}

#[cfg(feature = "std")]
impl<W: std::io::Write> IoSink<W> {
    /// Wrap a writer
    pub const fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Unwrap the writer
    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[cfg(feature = "std")]
impl<W: std::io::Write> NrbSink for IoSink<W> {
    fn put(&mut self, bytes: &[u8]) -> Result<(), SinkError> {
        self.inner
            .write_all(bytes)
            .map_err(|e| SinkError::Io(e.kind()))
    }
}

#[test]
fn slice_sink_reports_full() {
    use pretty_assertions::assert_eq;
    let mut buf = [0u8; 3];
    let mut sink = SliceSink::new(&mut buf);
    sink.put(&[1, 2]).unwrap();
    assert_eq!(sink.put(&[3, 4]), Err(SinkError::Full));
    assert_eq!(sink.written(), 2);
    assert_eq!(buf, [1, 2, 0]);
}
