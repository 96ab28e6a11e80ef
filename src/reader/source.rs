use super::ReaderErrorKind;

/// A sequential source of bytes for a [`Reader`](super::Reader).
///
/// Implementations either fill the whole buffer or fail. A source that
/// runs dry must report [`ReaderErrorKind::OutOfBounds`].
pub trait NrbSource {
    /// Read exactly `buf.len()` bytes.
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), ReaderErrorKind>;
}

impl<S: NrbSource + ?Sized> NrbSource for &mut S {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), ReaderErrorKind> {
        (**self).fill(buf)
    }
}

/// An in-memory byte slice.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> SliceSource<'a> {
    /// Read from the start of `bytes`
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.offset..]
    }
}

impl NrbSource for SliceSource<'_> {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), ReaderErrorKind> {
        let end = self.offset + buf.len();
        let Some(slice) = self.bytes.get(self.offset..end) else {
            return Err(ReaderErrorKind::OutOfBounds);
        };
        buf.copy_from_slice(slice);
        self.offset = end;
        Ok(())
    }
}

/// Adapts any [`std::io::Read`] into an [`NrbSource`].
///
/// The stream is read strictly sequentially from its current position and
/// anything after the NRB data is left unread.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoSource<R> {
    inner: R,
}

#[cfg(feature = "std")]
impl<R: std::io::Read> IoSource<R> {
    /// Wrap a reader
    pub const fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Unwrap the reader
    pub fn into_inner(self) -> R {
        self.inner
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read> NrbSource for IoSource<R> {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), ReaderErrorKind> {
        self.inner.read_exact(buf).map_err(|e| match e.kind() {
            std::io::ErrorKind::UnexpectedEof => ReaderErrorKind::OutOfBounds,
            kind => ReaderErrorKind::Io(kind),
        })
    }
}

#[test]
fn slice_source_does_not_advance_on_short_read() {
    use pretty_assertions::assert_eq;
    let mut source = SliceSource::new(&[1, 2, 3]);
    let mut two = [0; 2];
    source.fill(&mut two).unwrap();
    assert_eq!(two, [1, 2]);

    assert_eq!(source.fill(&mut two), Err(ReaderErrorKind::OutOfBounds));
    assert_eq!(source.remaining(), &[3]);
}
