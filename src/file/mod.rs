#![doc = r#"
Reading and writing whole NRB files

# Layout

All integers are big-endian. Version 1.0:

```text
[Header: 32 bytes]            see Header
[Section table: count x 8]    offsets in microseconds; first is 0, never decreasing
[Note table: count x 24]      see the note module
```

Parsing is a single forward pass that stops at the first problem. Bytes
after the note table are never read.
"#]

mod header;
pub use header::*;

mod version;
pub use version::*;

use alloc::vec::Vec;
use thiserror::Error;

use crate::{
    Document, Micros, NoteError, ParseError, SerializeError,
    note::{Articulation, Note, Pitch, Ramp},
    reader::{NrbSource, ReadResult, Reader, ReaderError, inv_data},
    validate::{
        check_articulation, check_pitch, check_ramp, check_release, check_section, check_start,
        validate_section,
    },
    writer::{NrbSink, Writer},
};

/// A successfully parsed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    /// The parsed score
    pub document: Document,
    /// Either [`VersionStatus::Supported`] or
    /// [`VersionStatus::MinorUnsupported`], which callers should warn about.
    pub version: VersionStatus,
    /// The header as read
    pub header: Header,
}

/// A failed parse.
///
/// The version status is kept so callers can tell a file that is not NRB
/// at all from one written by a newer major version, and both of those
/// from a damaged file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid NRB data ({version}): {error}")]
pub struct ParseFailure {
    /// What was learned about the version before failing
    pub version: VersionStatus,
    /// Where and why the parse stopped
    #[source]
    pub error: ReaderError,
}

impl ParseFailure {
    /// Pair a reader error with a version status
    pub const fn new(version: VersionStatus, error: ReaderError) -> Self {
        Self { version, error }
    }
}

impl Document {
    /// Parse an NRB file held in memory.
    pub fn parse(bytes: &[u8]) -> Result<Parsed, ParseFailure> {
        Self::parse_source(crate::reader::SliceSource::new(bytes))
    }

    /// Parse an NRB file from a [`std::io::Read`], starting at its current position.
    #[cfg(feature = "std")]
    pub fn parse_reader<R: std::io::Read>(reader: R) -> Result<Parsed, ParseFailure> {
        Self::parse_source(crate::reader::IoSource::new(reader))
    }

    /// Parse an NRB file from any [`NrbSource`].
    ///
    /// Nothing is kept from a failed parse.
    pub fn parse_source<S: NrbSource>(source: S) -> Result<Parsed, ParseFailure> {
        let mut reader = Reader::new(source);
        let header = Header::read(&mut reader)?;
        let version = header.version().status();

        match read_tables(&mut reader, &header) {
            Ok(document) => {
                log::debug!(
                    "parsed NRB document: {} sections, {} notes, {} bytes",
                    document.section_count(),
                    document.note_count(),
                    reader.buffer_position()
                );
                Ok(Parsed {
                    document,
                    version,
                    header,
                })
            }
            Err(error) => {
                log::debug!("NRB parse failed: {error}");
                Err(ParseFailure::new(version, error))
            }
        }
    }

    /// Write the document as an NRB 1.0 file.
    ///
    /// # Errors
    /// - [`SerializeError::Empty`] if there are no notes; nothing is written.
    /// - [`SerializeError::Sink`] if the sink refuses the output.
    pub fn serialize<S: NrbSink>(&self, sink: S) -> Result<(), SerializeError> {
        if self.note_count() == 0 {
            return Err(SerializeError::Empty);
        }
        let mut writer = Writer::new(sink);
        Header::for_document(self).write(&mut writer)?;

        for offset in self.sections() {
            writer.write_u64(offset.us() as u64)?;
        }
        for note in self.notes() {
            writer.write_u64(note.start.us() as u64)?;
            writer.write_u64(note.release.us() as u64)?;
            writer.write_bias8(note.pitch.semitones())?;
            writer.write_u8(note.articulation.byte())?;
            writer.write_u16(note.ramp.value())?;
            writer.write_u16(note.sect)?;
            writer.write_u16(note.layer_i)?;
        }

        log::debug!(
            "serialized NRB document: {} sections, {} notes, {} bytes",
            self.section_count(),
            self.note_count(),
            writer.written()
        );
        Ok(())
    }

    /// Write the document to a [`std::io::Write`].
    #[cfg(feature = "std")]
    pub fn serialize_writer<W: std::io::Write>(&self, writer: W) -> Result<(), SerializeError> {
        self.serialize(crate::writer::IoSink::new(writer))
    }

    /// Serialize into a new buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SerializeError> {
        let mut bytes = Vec::with_capacity(self.encoded_len());
        self.serialize(&mut bytes)?;
        Ok(bytes)
    }

    /// The exact length [`Document::serialize`] would write.
    pub fn encoded_len(&self) -> usize {
        use crate::constants::{HEADER_LEN, NOTE_RECORD_LEN, SECTION_RECORD_LEN};
        HEADER_LEN
            + self.section_count() * SECTION_RECORD_LEN
            + self.note_count() * NOTE_RECORD_LEN
    }
}

/// Parse an NRB file from a path.
///
/// A file that cannot be opened is reported as
/// [`VersionStatus::Unreadable`] with an I/O error at position zero.
#[cfg(feature = "std")]
pub fn parse_path<P: AsRef<std::path::Path>>(path: P) -> Result<Parsed, ParseFailure> {
    use crate::reader::ReaderErrorKind;

    let file = std::fs::File::open(path.as_ref()).map_err(|e| {
        log::debug!("cannot open {}: {e}", path.as_ref().display());
        ParseFailure::new(
            VersionStatus::Unreadable,
            ReaderError::new(0, ReaderErrorKind::Io(e.kind())),
        )
    })?;
    Document::parse_reader(std::io::BufReader::new(file))
}

fn read_tables<S: NrbSource>(reader: &mut Reader<S>, header: &Header) -> ReadResult<Document> {
    let section_count = header.section_count() as usize;
    let note_count = header.note_count() as usize;

    let mut sections = Vec::with_capacity(section_count);
    for index in 0..section_count {
        let offset = Micros::new(reader.read_uint64()?);
        validate_section(sections.last().copied(), offset)
            .map_err(|source| inv_data(reader, ParseError::Section { index, source }))?;
        sections.push(offset);
    }

    let mut notes = Vec::with_capacity(note_count);
    for index in 0..note_count {
        notes.push(read_note(reader, index, &sections)?);
    }

    Ok(Document::from_validated(sections, notes))
}

/// Read one note record, checking each field as soon as it is read.
fn read_note<S: NrbSource>(
    reader: &mut Reader<S>,
    index: usize,
    sections: &[Micros],
) -> ReadResult<Note> {
    let reject = |reader: &mut Reader<S>, source: NoteError| {
        inv_data(reader, ParseError::Note { index, source })
    };

    let start = Micros::new(reader.read_uint64()?);
    check_start(start).map_err(|e| reject(reader, e))?;

    let release = Micros::new(reader.read_uint64()?);
    check_release(start, release).map_err(|e| reject(reader, e))?;

    let pitch = Pitch::new_unchecked(reader.read_bias8()?);
    check_pitch(pitch).map_err(|e| reject(reader, e))?;

    let articulation = Articulation::from_byte_unchecked(reader.read_u8()?);
    check_articulation(articulation).map_err(|e| reject(reader, e))?;

    let ramp = Ramp::new_unchecked(reader.read_u16()?);
    check_ramp(ramp).map_err(|e| reject(reader, e))?;

    let sect = reader.read_u16()?;
    check_section(start, sect, sections).map_err(|e| reject(reader, e))?;

    let layer_i = reader.read_u16()?;

    Ok(Note {
        start,
        release,
        pitch,
        articulation,
        ramp,
        sect,
        layer_i,
    })
}

#[cfg(test)]
fn one_note_file(minor: u8, record: [u8; 24]) -> Vec<u8> {
    let mut bytes = alloc::vec![
        0x72, 0xED, 0xF0, 0x78, 0x2E, 0x6E, 0x72, 0x62, // signature
        0x01, minor, // version
        0x00, 0x01, // sections
        0x00, 0x00, 0x00, 0x01, // notes
    ];
    bytes.extend([0; 16]); // reserved
    bytes.extend([0; 8]); // section 0
    bytes.extend(record);
    bytes
}

#[cfg(test)]
const SIMPLE_RECORD: [u8; 24] = [
    0, 0, 0, 0, 0, 0, 0, 0, // start
    0, 0, 0, 0, 0, 0, 0x03, 0xE8, // release 1000
    0x80, // pitch 0
    0x00, // articulation
    0x00, 0x00, // ramp
    0x00, 0x00, // sect
    0x00, 0x00, // layer
];

#[test]
fn parse_simple_file() {
    use pretty_assertions::assert_eq;
    let parsed = Document::parse(&one_note_file(0, SIMPLE_RECORD)).unwrap();
    assert_eq!(parsed.version, VersionStatus::Supported);
    assert_eq!(parsed.document.sections(), &[Micros::ZERO]);
    assert_eq!(
        parsed.document.get_note(0).unwrap(),
        Note {
            start: Micros::ZERO,
            release: Micros::new(1000),
            ..Default::default()
        }
    );
}

#[test]
fn minor_version_warns_but_parses() {
    use pretty_assertions::assert_eq;
    let parsed = Document::parse(&one_note_file(1, SIMPLE_RECORD)).unwrap();
    assert_eq!(parsed.version, VersionStatus::MinorUnsupported);
    assert_eq!(parsed.header.version(), Version { major: 1, minor: 1 });
    assert_eq!(parsed.document.note_count(), 1);
}

#[test]
fn trailing_bytes_are_ignored() {
    let mut bytes = one_note_file(0, SIMPLE_RECORD);
    bytes.extend(b"trailing garbage");
    assert!(Document::parse(&bytes).is_ok());
}

#[test]
fn note_field_errors_point_at_the_field() {
    use pretty_assertions::assert_eq;
    const NOTE: usize = 40;
    let cases: [(fn(&mut [u8; 24]), NoteError, usize); 5] = [
        (
            |r| r[8..16].fill(0),
            NoteError::ReleaseNotAfterStart {
                start: Micros::ZERO,
                release: Micros::ZERO,
            },
            8,
        ),
        (|r| r[16] = 0x80 + 49, NoteError::Pitch(49), 16),
        (|r| r[17] = 0x3E, NoteError::Articulation(0x3E), 17),
        (|r| r[18..20].copy_from_slice(&[0x40, 0x01]), NoteError::Ramp(16385), 18),
        (
            |r| r[21] = 0x01,
            NoteError::UndefinedSection {
                sect: 1,
                sections: 1,
            },
            20,
        ),
    ];
    for (corrupt, expected, field) in cases {
        let mut record = SIMPLE_RECORD;
        corrupt(&mut record);
        let failure = Document::parse(&one_note_file(0, record)).unwrap_err();
        assert_eq!(failure.version, VersionStatus::Supported);
        assert_eq!(
            failure.error.parse_error(),
            Some(&ParseError::Note {
                index: 0,
                source: expected
            })
        );
        assert_eq!(failure.error.position(), NOTE + field);
    }
}
