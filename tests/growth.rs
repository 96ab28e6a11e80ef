use nrb::prelude::*;
use pretty_assertions::assert_eq;

fn note(start: i64) -> Note {
    Note {
        start: Micros::new(start),
        release: Micros::new(start + 1),
        layer_i: (start % 3) as u16,
        ..Default::default()
    }
}

#[test]
fn sections_fill_to_the_ceiling() {
    let mut doc = Document::new();
    for i in 1..MAX_SECTIONS as i64 {
        assert!(doc.append_section(Micros::new(i / 2)).unwrap(), "section {i}");
    }
    assert_eq!(doc.section_count(), MAX_SECTIONS);

    let before = doc.clone();
    assert_eq!(doc.append_section(Micros::new(i64::MAX)), Ok(false));
    assert_eq!(doc, before);

    // ordering is still checked at the ceiling
    assert!(doc.append_section(Micros::ZERO).is_err());

    for i in [0, 1, 2, 16, 17, 1000, MAX_SECTIONS - 1] {
        assert_eq!(doc.section_offset(i), Ok(Micros::new(i as i64 / 2)));
    }
}

#[test]
fn notes_fill_to_the_ceiling() {
    let mut doc = Document::new();
    for i in 0..MAX_NOTES as i64 {
        assert_eq!(doc.append_note(note(i)), Ok(true));
    }
    assert_eq!(doc.note_count(), MAX_NOTES);

    assert_eq!(doc.append_note(note(0)), Ok(false));
    assert_eq!(doc.note_count(), MAX_NOTES);

    for i in [0, 255, 256, 257, 511, 512, 65_535, MAX_NOTES - 1] {
        assert_eq!(doc.get_note(i), Ok(note(i as i64)));
    }

    let bytes = doc.to_bytes().unwrap();
    let parsed = Document::parse(&bytes).unwrap();
    assert_eq!(parsed.header.note_count() as usize, MAX_NOTES);
    assert_eq!(parsed.document, doc);
}

#[test]
fn growth_past_initial_capacity() {
    let mut doc = Document::new();
    for n in [SECTION_CAPACITY_INIT - 1, SECTION_CAPACITY_INIT, SECTION_CAPACITY_INIT + 1] {
        while doc.section_count() < n + 1 {
            let next = doc.last_section_offset() + Micros::new(10);
            assert!(doc.append_section(next).unwrap());
        }
        assert_eq!(doc.section_count(), n + 1);
    }
    for (i, offset) in doc.sections().iter().enumerate() {
        assert_eq!(*offset, Micros::new(i as i64 * 10));
    }
}
