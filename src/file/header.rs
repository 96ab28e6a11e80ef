use crate::{
    Document, ParseError,
    constants::*,
    file::{ParseFailure, Version, VersionStatus},
    reader::{NrbSource, ReadResult, Reader, ReaderError, inv_data},
    writer::{NrbSink, SinkError, Writer},
};

#[doc = r#"
The fixed 32-byte header at the start of every NRB file.

```text
offset  width  field
0       4      signature A (0x72EDF078)
4       4      signature B (0x2E6E7262)
8       1      major version
9       1      minor version
10      2      section count  [1, 65535]
12      4      note count     [1, 1048576]
16      4x4    reserved, written as zero
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
    version: Version,
    section_count: u16,
    note_count: u32,
    reserved: [u32; RESERVED_WORDS],
}

impl Header {
    /// The header [`Document::serialize`] writes for `document`.
    pub fn for_document(document: &Document) -> Self {
        // both counts are capped by the document's ceilings
        Self {
            version: Version::CURRENT,
            section_count: document.section_count() as u16,
            note_count: document.note_count() as u32,
            reserved: [0; RESERVED_WORDS],
        }
    }

    /// The version the file was written with
    pub const fn version(&self) -> Version {
        self.version
    }
    /// Number of entries in the section table
    pub const fn section_count(&self) -> u16 {
        self.section_count
    }
    /// Number of entries in the note table
    pub const fn note_count(&self) -> u32 {
        self.note_count
    }
    /// The reserved words, which carry no meaning in version 1.0
    pub const fn reserved(&self) -> [u32; RESERVED_WORDS] {
        self.reserved
    }

    /// Read and check a header.
    ///
    /// A failure carries [`VersionStatus::Unreadable`] up to and including
    /// the version bytes, and the status of the version read after that.
    pub(crate) fn read<S: NrbSource>(reader: &mut Reader<S>) -> Result<Self, ParseFailure> {
        let version = read_version(reader)
            .map_err(|error| ParseFailure::new(VersionStatus::Unreadable, error))?;
        read_counts(reader, version).map_err(|error| ParseFailure::new(version.status(), error))
    }

    /// Write this header.
    pub(crate) fn write<S: NrbSink>(&self, writer: &mut Writer<S>) -> Result<(), SinkError> {
        writer.write_u32(SIGNATURE_PRIMARY)?;
        writer.write_u32(SIGNATURE_SECONDARY)?;
        writer.write_u8(self.version.major)?;
        writer.write_u8(self.version.minor)?;
        writer.write_u16(self.section_count)?;
        writer.write_u32(self.note_count)?;
        for word in self.reserved {
            writer.write_u32(word)?;
        }
        Ok(())
    }
}

fn read_version<S: NrbSource>(reader: &mut Reader<S>) -> ReadResult<Version> {
    let primary = reader.read_u32()?;
    let secondary = reader.read_u32()?;
    if primary != SIGNATURE_PRIMARY || secondary != SIGNATURE_SECONDARY {
        return Err(ReaderError::new(
            0,
            ParseError::Signature { primary, secondary }.into(),
        ));
    }
    let major = reader.read_u8()?;
    let minor = reader.read_u8()?;
    Ok(Version { major, minor })
}

fn read_counts<S: NrbSource>(reader: &mut Reader<S>, version: Version) -> ReadResult<Header> {
    match version.status() {
        VersionStatus::MajorUnsupported => {
            return Err(ReaderError::new(8, ParseError::MajorVersion(version.major).into()));
        }
        VersionStatus::MinorUnsupported => {
            log::warn!("NRB minor version {version} is not supported, reading as 1.0");
        }
        _ => {}
    }

    let section_count = reader.read_u16()?;
    if section_count == 0 || section_count as usize > MAX_SECTIONS {
        return Err(inv_data(reader, ParseError::SectionCount(section_count)));
    }

    let note_count = reader.read_uint32()? as u32;
    if note_count == 0 || note_count as usize > MAX_NOTES {
        return Err(inv_data(reader, ParseError::NoteCount(note_count)));
    }

    let mut reserved = [0; RESERVED_WORDS];
    for word in &mut reserved {
        *word = reader.read_uint32()? as u32;
    }

    log::debug!(
        "NRB {version} header: {section_count} sections, {note_count} notes"
    );
    Ok(Header {
        version,
        section_count,
        note_count,
        reserved,
    })
}

#[cfg(test)]
fn header_bytes(major: u8, minor: u8, sections: u16, notes: u32) -> alloc::vec::Vec<u8> {
    let mut writer = Writer::new(alloc::vec::Vec::<u8>::new());
    Header {
        version: Version { major, minor },
        section_count: sections,
        note_count: notes,
        reserved: [0; RESERVED_WORDS],
    }
    .write(&mut writer)
    .unwrap();
    writer.into_sink()
}

#[test]
fn header_layout() {
    use pretty_assertions::assert_eq;
    let bytes = header_bytes(1, 0, 2, 3);
    assert_eq!(bytes.len(), HEADER_LEN);
    assert_eq!(
        &bytes[..16],
        &[
            0x72, 0xED, 0xF0, 0x78, 0x2E, 0x6E, 0x72, 0x62, 0x01, 0x00, 0x00, 0x02, 0x00, 0x00,
            0x00, 0x03
        ]
    );
    assert!(bytes[16..].iter().all(|&b| b == 0));

    let header = Header::read(&mut Reader::from_byte_slice(&bytes)).unwrap();
    assert_eq!(header.version(), Version::CURRENT);
    assert_eq!(header.section_count(), 2);
    assert_eq!(header.note_count(), 3);
}

#[test]
fn signature_mismatch_is_unreadable() {
    use pretty_assertions::assert_eq;
    let mut bytes = header_bytes(1, 0, 1, 1);
    bytes[7] = b'x';
    let failure = Header::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
    assert_eq!(failure.version, VersionStatus::Unreadable);
    assert!(matches!(
        failure.error.parse_error(),
        Some(ParseError::Signature { .. })
    ));
}

#[test]
fn truncated_version_is_unreadable() {
    use pretty_assertions::assert_eq;
    let bytes = header_bytes(1, 0, 1, 1);
    let failure = Header::read(&mut Reader::from_byte_slice(&bytes[..9])).unwrap_err();
    assert_eq!(failure.version, VersionStatus::Unreadable);
    assert!(failure.error.is_out_of_bounds());
}

#[test]
fn major_version_mismatch() {
    use pretty_assertions::assert_eq;
    let bytes = header_bytes(2, 0, 1, 1);
    let failure = Header::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
    assert_eq!(failure.version, VersionStatus::MajorUnsupported);
    assert_eq!(failure.error.parse_error(), Some(&ParseError::MajorVersion(2)));
    assert_eq!(failure.error.position(), 8);
}

#[test]
fn count_limits() {
    use pretty_assertions::assert_eq;
    let cases = [
        (header_bytes(1, 0, 0, 1), ParseError::SectionCount(0), 10),
        (header_bytes(1, 0, 1, 0), ParseError::NoteCount(0), 12),
        (
            header_bytes(1, 0, 1, MAX_NOTES as u32 + 1),
            ParseError::NoteCount(1_048_577),
            12,
        ),
        (
            header_bytes(1, 0, 1, 0x8000_0000),
            ParseError::UnsignedRange(0x8000_0000),
            12,
        ),
    ];
    for (bytes, expected, position) in cases {
        let failure = Header::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
        assert_eq!(failure.version, VersionStatus::Supported);
        assert_eq!(failure.error.parse_error(), Some(&expected));
        assert_eq!(failure.error.position(), position);
    }

    let bytes = header_bytes(1, 0, u16::MAX, MAX_NOTES as u32);
    assert!(Header::read(&mut Reader::from_byte_slice(&bytes)).is_ok());
}

#[test]
fn reserved_words_are_read_but_ignored() {
    use pretty_assertions::assert_eq;
    let mut bytes = header_bytes(1, 0, 1, 1);
    bytes[16..20].copy_from_slice(&0x0102_0304u32.to_be_bytes());
    let header = Header::read(&mut Reader::from_byte_slice(&bytes)).unwrap();
    assert_eq!(header.reserved(), [0x0102_0304, 0, 0, 0]);

    let failure = Header::read(&mut Reader::from_byte_slice(&bytes[..30])).unwrap_err();
    assert!(failure.error.is_out_of_bounds());
    assert_eq!(failure.error.position(), 28);
}
