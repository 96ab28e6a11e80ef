use nrb::prelude::*;
use pretty_assertions::assert_eq;

fn check_invariants(doc: &Document) {
    let sections = doc.sections();
    assert_eq!(sections[0], Micros::ZERO);
    assert!(sections.windows(2).all(|w| w[0] <= w[1]));

    for note in doc.notes() {
        assert!((note.sect as usize) < doc.section_count());
        assert!(note.start >= doc.section_offset(note.sect as usize).unwrap());
        assert!(note.release > note.start);
    }
}

#[test]
fn read_etude() {
    let parsed = Document::parse(include_bytes!("../test-asset/Etude.nrb")).unwrap();
    assert_eq!(parsed.version, VersionStatus::Supported);

    let doc = &parsed.document;
    check_invariants(doc);
    assert_eq!(doc.section_count(), 4);
    assert_eq!(doc.note_count(), 7);
    assert_eq!(
        doc.sections(),
        &[
            Micros::ZERO,
            Micros::from_ms(2_000),
            Micros::from_ms(2_000),
            Micros::from_ms(3_500)
        ]
    );

    let low = doc.get_note(4).unwrap();
    assert_eq!(low.pitch, Pitch::MIN);
    assert_eq!(low.pitch.to_string(), "A0");
    assert_eq!(low.articulation.index(), MAX_ARTICULATION);
    assert_eq!(low.duration(), Micros::from_ms(250));
    assert_eq!(low.ramp.as_fraction(), 0.25);

    let high = doc.get_note(5).unwrap();
    assert_eq!(high.pitch, Pitch::MAX);
    assert!(high.is_pedal() && high.is_grace());
    assert_eq!(high.sect, 2);
    assert_eq!(high.layer(), 3);

    let pedal = doc.get_note(1).unwrap();
    assert!(pedal.is_pedal() && !pedal.is_grace());
    assert_eq!(pedal.pitch.to_string(), "C3");
}

#[test]
fn read_etude_minor_version() {
    let parsed = Document::parse(include_bytes!("../test-asset/EtudeMinor.nrb")).unwrap();
    assert_eq!(parsed.version, VersionStatus::MinorUnsupported);
    assert_eq!(parsed.header.version(), Version { major: 1, minor: 3 });

    let supported = Document::parse(include_bytes!("../test-asset/Etude.nrb")).unwrap();
    assert_eq!(parsed.document, supported.document);
}

#[test]
fn read_etude_damaged() {
    let failure =
        Document::parse(include_bytes!("../test-asset/EtudeDamaged.nrb")).unwrap_err();
    assert_eq!(failure.version, VersionStatus::Supported);
    assert_eq!(
        failure.error.parse_error(),
        Some(&ParseError::Note {
            index: 4,
            source: NoteError::StartBeforeSection {
                start: Micros::from_ms(2_000),
                offset: Micros::from_ms(3_500),
            }
        })
    );
    // header, four sections, four notes, then the sect field of the fifth
    assert_eq!(
        failure.error.position(),
        HEADER_LEN + 4 * SECTION_RECORD_LEN + 4 * NOTE_RECORD_LEN + 20
    );
}

#[test]
fn reserialized_etude_is_byte_identical() {
    let bytes = include_bytes!("../test-asset/Etude.nrb");
    let parsed = Document::parse(bytes).unwrap();
    assert_eq!(parsed.document.encoded_len(), bytes.len());
    assert_eq!(parsed.document.to_bytes().unwrap(), bytes);
}
