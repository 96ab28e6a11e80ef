use nrb::prelude::*;
use pretty_assertions::assert_eq;

fn note(start: i64, release: i64, pitch: i8, sect: u16) -> Note {
    Note {
        start: Micros::new(start),
        release: Micros::new(release),
        pitch: Pitch::new(pitch).unwrap(),
        articulation: Articulation::new((start % 62) as u8, start % 2 == 0, start % 3 == 0)
            .unwrap(),
        ramp: Ramp::new((start % 16385) as u16).unwrap(),
        sect,
        layer_i: (start % 7) as u16,
    }
}

fn sample() -> Document {
    let mut doc = Document::new();
    for offset in [1_000, 1_000, 5_000, 9_000] {
        assert!(doc.append_section(Micros::new(offset)).unwrap());
    }
    let notes = [
        note(9_500, 9_501, 48, 4),
        note(0, 1_000_000, -39, 0),
        note(1_000, 2_000, 0, 2),
        note(1_000, 1_500, 12, 1),
        note(6_000, 7_000, -7, 3),
        note(i64::MAX - 1, i64::MAX, 3, 4),
    ];
    for n in notes {
        assert!(doc.append_note(n).unwrap());
    }
    doc
}

#[test]
fn round_trip_preserves_tables() {
    let doc = sample();
    let bytes = doc.to_bytes().unwrap();
    assert_eq!(bytes.len(), doc.encoded_len());

    let parsed = Document::parse(&bytes).unwrap();
    assert_eq!(parsed.version, VersionStatus::Supported);
    assert_eq!(parsed.header.version(), Version::CURRENT);
    assert_eq!(parsed.header.reserved(), [0; 4]);
    assert_eq!(parsed.document.sections(), doc.sections());
    assert_eq!(parsed.document.notes(), doc.notes());
    assert_eq!(parsed.document, doc);
}

#[test]
fn round_trip_after_sort_keeps_sorted_order() {
    let mut doc = sample();
    doc.sort_notes();
    let parsed = Document::parse(&doc.to_bytes().unwrap()).unwrap();
    assert_eq!(parsed.document.notes(), doc.notes());
    assert!(
        parsed
            .document
            .notes()
            .windows(2)
            .all(|w| w[0].start <= w[1].start)
    );
}

#[test]
fn minor_version_is_not_carried_forward() {
    let mut bytes = sample().to_bytes().unwrap();
    bytes[9] = 4;
    let parsed = Document::parse(&bytes).unwrap();
    assert_eq!(parsed.version, VersionStatus::MinorUnsupported);

    let rewritten = parsed.document.to_bytes().unwrap();
    assert_eq!(rewritten[8..10], [1, 0]);
    assert_eq!(
        Document::parse(&rewritten).unwrap().version,
        VersionStatus::Supported
    );
}

#[test]
fn parsed_document_is_mutable_and_growable() {
    let mut doc = Document::parse(&sample().to_bytes().unwrap())
        .unwrap()
        .document;

    let mut changed = doc.get_note(0).unwrap();
    changed.release = Micros::new(10_000);
    doc.set_note(0, changed).unwrap();

    assert!(doc.append_section(Micros::new(20_000)).unwrap());
    assert!(doc.append_note(note(20_001, 20_002, 1, 5)).unwrap());

    let again = Document::parse(&doc.to_bytes().unwrap()).unwrap();
    assert_eq!(again.document, doc);
    assert_eq!(again.document.get_note(0).unwrap().release, Micros::new(10_000));
}

#[test]
fn minor_version_single_note_parses() {
    let mut bytes = vec![
        0x72, 0xED, 0xF0, 0x78, 0x2E, 0x6E, 0x72, 0x62, //
        1, 1, //
        0, 1, //
        0, 0, 0, 1,
    ];
    bytes.extend([0; 16]);
    bytes.extend(0u64.to_be_bytes());
    bytes.extend(0u64.to_be_bytes());
    bytes.extend(1000u64.to_be_bytes());
    bytes.extend([0x80, 0, 0, 0, 0, 0, 0, 0]);

    let parsed = Document::parse(&bytes).unwrap();
    assert_eq!(parsed.version, VersionStatus::MinorUnsupported);
    assert_eq!(parsed.document.note_count(), 1);
    assert_eq!(parsed.document.get_note(0).unwrap().duration(), Micros::new(1000));
}

#[test]
fn invalid_append_is_rejected() {
    let mut doc = sample();
    let before = doc.clone();

    let mut bad = note(2_000, 3_000, 0, 0);
    bad.release = bad.start;
    assert_eq!(
        doc.append_note(bad),
        Err(ContractViolation::Note(NoteError::ReleaseNotAfterStart {
            start: Micros::new(2_000),
            release: Micros::new(2_000),
        }))
    );
    assert_eq!(doc, before);
}

#[test]
fn empty_document_writes_nothing() {
    let doc = Document::new();
    let mut out: Vec<u8> = Vec::new();
    assert!(matches!(doc.serialize(&mut out), Err(SerializeError::Empty)));
    assert!(out.is_empty());
    assert!(matches!(doc.to_bytes(), Err(SerializeError::Empty)));
}

#[test]
fn serialize_into_fixed_buffer() {
    let doc = sample();
    let mut exact = vec![0u8; doc.encoded_len()];
    let mut sink = SliceSink::new(&mut exact);
    doc.serialize(&mut sink).unwrap();
    assert_eq!(sink.written(), doc.encoded_len());
    assert_eq!(exact, doc.to_bytes().unwrap());

    let mut short = vec![0u8; doc.encoded_len() - 1];
    assert!(matches!(
        doc.serialize(SliceSink::new(&mut short)),
        Err(SerializeError::Sink(SinkError::Full))
    ));
}

#[test]
fn invalid_mutations_leave_document_untouched() {
    let mut doc = sample();
    let before = doc.clone();

    let mut bad = doc.get_note(0).unwrap();
    bad.sect = 99;
    assert!(matches!(
        doc.set_note(0, bad),
        Err(ContractViolation::Note(NoteError::UndefinedSection { sect: 99, .. }))
    ));

    let mut bad = doc.get_note(0).unwrap();
    bad.pitch = Pitch::new_unchecked(-40);
    assert_eq!(
        doc.set_note(0, bad),
        Err(ContractViolation::Note(NoteError::Pitch(-40)))
    );

    assert_eq!(
        doc.append_section(Micros::new(8_999)),
        Err(ContractViolation::Section(SectionError::Decreasing {
            previous: Micros::new(9_000),
            offset: Micros::new(8_999),
        }))
    );
    assert_eq!(
        doc.section_offset(5),
        Err(ContractViolation::SectionIndex { index: 5, count: 5 })
    );
    assert_eq!(doc, before);
}
