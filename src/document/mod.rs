use alloc::vec::Vec;

use crate::{
    ContractViolation, Micros,
    constants::*,
    note::Note,
    validate::{validate_note, validate_section},
};

#[doc = r#"
An NRB score: an ordered section table and a note table.

A `Document` always satisfies the format's invariants:

- there is at least one section and the first begins at zero;
- section offsets never decrease;
- every note passes [`validate_note`] against the section table.

Both tables are owned outright. Reads hand back copies (or shared slices
that the borrow checker keeps from outliving a mutation) and writes copy
the caller's data in.

# Example
```rust
# use nrb::prelude::*;
let mut doc = Document::new();
assert_eq!(doc.section_count(), 1);
assert_eq!(doc.note_count(), 0);

let bad = Note {
    start: Micros::new(100),
    release: Micros::new(100),
    ..Default::default()
};
assert!(doc.append_note(bad).is_err());
assert_eq!(doc.note_count(), 0);
```
"#]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Document {
    sections: Vec<Micros>,
    notes: Vec<Note>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document with section zero at offset zero and no notes.
    pub fn new() -> Self {
        let mut sections = Vec::with_capacity(SECTION_CAPACITY_INIT);
        sections.push(Micros::ZERO);
        Self {
            sections,
            notes: Vec::with_capacity(NOTE_CAPACITY_INIT),
        }
    }

    /// Tables that the parser has already validated.
    pub(crate) fn from_validated(sections: Vec<Micros>, notes: Vec<Note>) -> Self {
        debug_assert!(sections.first() == Some(&Micros::ZERO));
        Self { sections, notes }
    }

    /// Number of sections, in [1, [`MAX_SECTIONS`]]
    #[inline]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Number of notes, in [0, [`MAX_NOTES`]]
    ///
    /// Parsed documents always have at least one note.
    #[inline]
    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    /// The section table
    #[inline]
    pub fn sections(&self) -> &[Micros] {
        &self.sections
    }

    /// The note table, in its current order
    #[inline]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// The starting offset of a section.
    ///
    /// # Errors
    /// if `index` is not below [`Document::section_count`]
    pub fn section_offset(&self, index: usize) -> Result<Micros, ContractViolation> {
        self.sections
            .get(index)
            .copied()
            .ok_or(ContractViolation::SectionIndex {
                index,
                count: self.sections.len(),
            })
    }

    /// The offset of the last section, which new sections may not precede.
    pub fn last_section_offset(&self) -> Micros {
        // never empty
        self.sections.last().copied().unwrap_or(Micros::ZERO)
    }

    /// A copy of a note.
    ///
    /// # Errors
    /// if `index` is not below [`Document::note_count`]
    pub fn get_note(&self, index: usize) -> Result<Note, ContractViolation> {
        self.notes
            .get(index)
            .copied()
            .ok_or(ContractViolation::NoteIndex {
                index,
                count: self.notes.len(),
            })
    }

    /// Replace an existing note.
    ///
    /// # Errors
    /// if `index` is out of bounds or `note` fails [`validate_note`]. The
    /// document is unchanged in either case.
    pub fn set_note(&mut self, index: usize, note: Note) -> Result<(), ContractViolation> {
        let count = self.notes.len();
        if index >= count {
            return Err(ContractViolation::NoteIndex { index, count });
        }
        validate_note(&note, &self.sections)?;
        self.notes[index] = note;
        Ok(())
    }

    /// Append a note.
    ///
    /// Notes may be appended in any order, but a note can only refer to a
    /// section that has already been appended.
    ///
    /// Returns `Ok(false)` without changing anything once the document
    /// already holds [`MAX_NOTES`] notes.
    ///
    /// # Errors
    /// if `note` fails [`validate_note`]
    pub fn append_note(&mut self, note: Note) -> Result<bool, ContractViolation> {
        validate_note(&note, &self.sections)?;
        if self.notes.len() >= MAX_NOTES {
            return Ok(false);
        }
        grow(&mut self.notes, NOTE_CAPACITY_INIT, MAX_NOTES);
        self.notes.push(note);
        Ok(true)
    }

    /// Append a section beginning at `offset`.
    ///
    /// Section zero always exists, so the first call defines section one.
    ///
    /// Returns `Ok(false)` without changing anything once the document
    /// already holds [`MAX_SECTIONS`] sections.
    ///
    /// # Errors
    /// if `offset` is negative or earlier than [`Document::last_section_offset`]
    pub fn append_section(&mut self, offset: Micros) -> Result<bool, ContractViolation> {
        validate_section(Some(self.last_section_offset()), offset)?;
        if self.sections.len() >= MAX_SECTIONS {
            return Ok(false);
        }
        grow(&mut self.sections, SECTION_CAPACITY_INIT, MAX_SECTIONS);
        self.sections.push(offset);
        Ok(true)
    }

    /// Sort the notes by ascending start offset.
    ///
    /// Notes that start together keep their relative order, so sorting
    /// twice gives the same table as sorting once.
    pub fn sort_notes(&mut self) {
        self.notes.sort_by_key(|note| note.start);
    }

    /// Drop the document and both of its tables.
    pub fn release(self) {}
}

/// Double the capacity of a full table, starting from `init` and never
/// reserving past `ceiling`.
fn grow<T>(table: &mut Vec<T>, init: usize, ceiling: usize) {
    let len = table.len();
    if len < table.capacity() {
        return;
    }
    let new_cap = (table.capacity() * 2).max(init).min(ceiling);
    log::trace!("growing table from {} to {} entries", table.capacity(), new_cap);
    table.reserve_exact(new_cap.saturating_sub(len));
}

#[cfg(test)]
fn note_at(start: i64, sect: u16) -> Note {
    Note {
        start: Micros::new(start),
        release: Micros::new(start + 1),
        sect,
        ..Default::default()
    }
}

#[test]
fn empty_document() {
    use pretty_assertions::assert_eq;
    let doc = Document::new();
    assert_eq!(doc.section_count(), 1);
    assert_eq!(doc.section_offset(0), Ok(Micros::ZERO));
    assert_eq!(doc.note_count(), 0);
    assert_eq!(
        doc.section_offset(1),
        Err(ContractViolation::SectionIndex { index: 1, count: 1 })
    );
    assert_eq!(
        doc.get_note(0),
        Err(ContractViolation::NoteIndex { index: 0, count: 0 })
    );
}

#[test]
fn append_and_get_copies() {
    use pretty_assertions::assert_eq;
    let mut doc = Document::new();
    let note = note_at(5, 0);
    assert_eq!(doc.append_note(note), Ok(true));

    let mut copy = doc.get_note(0).unwrap();
    copy.layer_i = 9;
    assert_ne!(copy, note);
    assert_eq!(doc.get_note(0), Ok(note));
}

#[test]
fn set_note_validates_against_sections() {
    use crate::{NoteError, SectionError};
    use pretty_assertions::assert_eq;

    let mut doc = Document::new();
    doc.append_section(Micros::new(100)).unwrap();
    doc.append_note(note_at(0, 0)).unwrap();

    assert_eq!(doc.set_note(0, note_at(150, 1)), Ok(()));
    assert_eq!(doc.get_note(0).unwrap().sect, 1);

    assert_eq!(
        doc.set_note(0, note_at(50, 1)),
        Err(ContractViolation::Note(NoteError::StartBeforeSection {
            start: Micros::new(50),
            offset: Micros::new(100)
        }))
    );
    assert_eq!(
        doc.set_note(1, note_at(0, 0)),
        Err(ContractViolation::NoteIndex { index: 1, count: 1 })
    );
    assert_eq!(doc.get_note(0), Ok(note_at(150, 1)));

    assert_eq!(
        doc.append_section(Micros::new(99)),
        Err(ContractViolation::Section(SectionError::Decreasing {
            previous: Micros::new(100),
            offset: Micros::new(99)
        }))
    );
    assert_eq!(doc.section_count(), 2);
}

#[test]
fn note_growth_doubles_from_initial_capacity() {
    use pretty_assertions::assert_eq;
    let mut doc = Document::new();
    assert!(doc.notes.capacity() >= NOTE_CAPACITY_INIT);

    for i in 0..=NOTE_CAPACITY_INIT as i64 {
        assert_eq!(doc.append_note(note_at(i, 0)), Ok(true));
    }
    assert_eq!(doc.note_count(), NOTE_CAPACITY_INIT + 1);
    assert!(doc.notes.capacity() >= NOTE_CAPACITY_INIT * 2);
    assert_eq!(doc.get_note(NOTE_CAPACITY_INIT), Ok(note_at(256, 0)));
}

#[test]
fn grow_clamps_to_ceiling() {
    let mut table: Vec<u8> = Vec::new();
    grow(&mut table, 16, 20);
    assert!(table.capacity() >= 16);

    table.resize(table.capacity(), 0);
    grow(&mut table, 16, 20);
    assert!(table.capacity() >= 20);
}

#[test]
fn sort_is_idempotent() {
    use pretty_assertions::assert_eq;
    let mut doc = Document::new();
    for (start, layer) in [(30, 0), (10, 1), (30, 2), (20, 3), (10, 4)] {
        let mut note = note_at(start, 0);
        note.layer_i = layer;
        doc.append_note(note).unwrap();
    }
    doc.sort_notes();
    let once = doc.clone();
    doc.sort_notes();
    assert_eq!(doc, once);

    let starts: Vec<i64> = doc.notes().iter().map(|n| n.start.us()).collect();
    assert_eq!(starts, [10, 10, 20, 30, 30]);
    let layers: Vec<u16> = doc.notes().iter().map(|n| n.layer_i).collect();
    assert_eq!(layers, [1, 4, 3, 0, 2]);
}
