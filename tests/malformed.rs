use nrb::prelude::*;
use pretty_assertions::assert_eq;

fn valid_bytes() -> Vec<u8> {
    let mut doc = Document::new();
    doc.append_section(Micros::new(100)).unwrap();
    doc.append_section(Micros::new(200)).unwrap();
    for (start, sect) in [(0, 0), (150, 1), (250, 2)] {
        doc.append_note(Note {
            start: Micros::new(start),
            release: Micros::new(start + 10),
            sect,
            ..Default::default()
        })
        .unwrap();
    }
    doc.to_bytes().unwrap()
}

const SECTIONS: usize = HEADER_LEN;
const NOTES: usize = HEADER_LEN + 3 * SECTION_RECORD_LEN;

#[test]
fn signature_mismatch_is_unreadable() {
    for corrupt in 0..8 {
        let mut bytes = valid_bytes();
        bytes[corrupt] ^= 0xFF;
        let failure = Document::parse(&bytes).unwrap_err();
        assert_eq!(failure.version, VersionStatus::Unreadable);
        assert!(matches!(
            failure.error.parse_error(),
            Some(ParseError::Signature { .. })
        ));
    }

    let failure = Document::parse(b"MThd\0\0\0\x06\0\x01\0\x02\0\x60").unwrap_err();
    assert_eq!(failure.version, VersionStatus::Unreadable);
}

#[test]
fn every_truncation_fails_cleanly() {
    let bytes = valid_bytes();
    for len in 0..bytes.len() {
        let failure = Document::parse(&bytes[..len]).unwrap_err();
        assert!(failure.error.is_out_of_bounds(), "length {len}");
        let expected = if len < 10 {
            VersionStatus::Unreadable
        } else {
            VersionStatus::Supported
        };
        assert_eq!(failure.version, expected, "length {len}");
    }
    assert!(Document::parse(&bytes).is_ok());
}

#[test]
fn major_version_is_reported() {
    for major in [0, 2, 255] {
        let mut bytes = valid_bytes();
        bytes[8] = major;
        let failure = Document::parse(&bytes).unwrap_err();
        assert_eq!(failure.version, VersionStatus::MajorUnsupported);
        assert_eq!(
            failure.error.parse_error(),
            Some(&ParseError::MajorVersion(major))
        );
    }
}

#[test]
fn first_section_must_be_zero() {
    let mut bytes = valid_bytes();
    bytes[SECTIONS + 7] = 1;
    let failure = Document::parse(&bytes).unwrap_err();
    assert_eq!(
        failure.error.parse_error(),
        Some(&ParseError::Section {
            index: 0,
            source: SectionError::FirstNotZero(Micros::new(1)),
        })
    );
    assert_eq!(failure.error.position(), SECTIONS);
}

#[test]
fn sections_must_not_decrease() {
    let mut bytes = valid_bytes();
    // section 2: 200 -> 99
    bytes[SECTIONS + 2 * SECTION_RECORD_LEN + 7] = 99;
    let failure = Document::parse(&bytes).unwrap_err();
    assert_eq!(
        failure.error.parse_error(),
        Some(&ParseError::Section {
            index: 2,
            source: SectionError::Decreasing {
                previous: Micros::new(100),
                offset: Micros::new(99),
            },
        })
    );
    assert_eq!(failure.error.position(), SECTIONS + 2 * SECTION_RECORD_LEN);
}

#[test]
fn top_bit_offsets_are_rejected() {
    let mut bytes = valid_bytes();
    bytes[SECTIONS + SECTION_RECORD_LEN] = 0x80;
    let failure = Document::parse(&bytes).unwrap_err();
    assert_eq!(
        failure.error.parse_error(),
        Some(&ParseError::UnsignedRange(0x8000_0000_0000_0064))
    );

    let mut bytes = valid_bytes();
    bytes[NOTES + 8] = 0xFF;
    let failure = Document::parse(&bytes).unwrap_err();
    assert!(matches!(
        failure.error.parse_error(),
        Some(ParseError::UnsignedRange(_))
    ));
    assert_eq!(failure.error.position(), NOTES + 8);
}

#[test]
fn note_before_its_section() {
    let mut bytes = valid_bytes();
    // second note: start 150 -> 50, still in section 1 at 100
    bytes[NOTES + NOTE_RECORD_LEN + 7] = 50;
    let failure = Document::parse(&bytes).unwrap_err();
    assert_eq!(failure.version, VersionStatus::Supported);
    assert_eq!(
        failure.error.parse_error(),
        Some(&ParseError::Note {
            index: 1,
            source: NoteError::StartBeforeSection {
                start: Micros::new(50),
                offset: Micros::new(100),
            },
        })
    );
}

#[test]
fn flag_bits_are_never_rejected() {
    for flags in [0x00, 0x40, 0x80, 0xC0] {
        let mut bytes = valid_bytes();
        bytes[NOTES + 17] = flags | MAX_ARTICULATION;
        let parsed = Document::parse(&bytes).unwrap();
        let art = parsed.document.get_note(0).unwrap().articulation;
        assert_eq!(art.byte(), flags | MAX_ARTICULATION);
    }
}

#[test]
fn note_count_must_match_table() {
    let mut bytes = valid_bytes();
    bytes[15] = 4;
    let failure = Document::parse(&bytes).unwrap_err();
    assert!(failure.error.is_out_of_bounds());
    assert_eq!(failure.error.position(), NOTES + 3 * NOTE_RECORD_LEN);
}

#[test]
fn failure_reports_are_readable() {
    let mut bytes = valid_bytes();
    bytes[8] = 9;
    let failure = Document::parse(&bytes).unwrap_err();
    assert_eq!(
        failure.to_string(),
        "Invalid NRB data (unsupported major version): \
         Reading at Position 8, Parsing Unsupported major version 9"
    );
}
