#![doc = r#"
Range and ordering rules shared by the parser and the mutation API.

Each rule is a separate function so the parser can check fields in the
order they are read and stop at the first failure. [`validate_note`] runs
all of them in that same order.
"#]

use crate::{
    Micros, NoteError, SectionError,
    note::{Articulation, Note, Pitch, Ramp},
};

#[cfg(test)]
use crate::constants::*;

/// `start >= 0`
#[inline]
pub const fn check_start(start: Micros) -> Result<(), NoteError> {
    if start.is_negative() {
        return Err(NoteError::NegativeStart(start));
    }
    Ok(())
}

/// `release > start`
#[inline]
pub const fn check_release(start: Micros, release: Micros) -> Result<(), NoteError> {
    if release.us() <= start.us() {
        return Err(NoteError::ReleaseNotAfterStart { start, release });
    }
    Ok(())
}

/// Pitch within [[`MIN_PITCH`](crate::constants::MIN_PITCH), [`MAX_PITCH`](crate::constants::MAX_PITCH)]
#[inline]
pub const fn check_pitch(pitch: Pitch) -> Result<(), NoteError> {
    match Pitch::new(pitch.semitones()) {
        Ok(_) => Ok(()),
        Err(e) => Err(e),
    }
}

/// Articulation index (ignoring the pedal and grace bits) at most [`MAX_ARTICULATION`](crate::constants::MAX_ARTICULATION)
#[inline]
pub const fn check_articulation(articulation: Articulation) -> Result<(), NoteError> {
    match Articulation::from_byte(articulation.byte()) {
        Ok(_) => Ok(()),
        Err(e) => Err(e),
    }
}

/// Ramp at most [`MAX_RAMP`](crate::constants::MAX_RAMP)
#[inline]
pub const fn check_ramp(ramp: Ramp) -> Result<(), NoteError> {
    match Ramp::new(ramp.value()) {
        Ok(_) => Ok(()),
        Err(e) => Err(e),
    }
}

/// The section index refers to one of `sections`, and the note does not
/// start before that section.
pub fn check_section(start: Micros, sect: u16, sections: &[Micros]) -> Result<(), NoteError> {
    let Some(&offset) = sections.get(sect as usize) else {
        return Err(NoteError::UndefinedSection {
            sect,
            sections: sections.len(),
        });
    };
    if start < offset {
        return Err(NoteError::StartBeforeSection { start, offset });
    }
    Ok(())
}

/// Check every rule a note must satisfy against the given section table.
///
/// # Errors
/// The first rule broken, in wire field order.
pub fn validate_note(note: &Note, sections: &[Micros]) -> Result<(), NoteError> {
    check_start(note.start)?;
    check_release(note.start, note.release)?;
    check_pitch(note.pitch)?;
    check_articulation(note.articulation)?;
    check_ramp(note.ramp)?;
    check_section(note.start, note.sect, sections)
}

/// Check that `offset` may follow `previous` in a section table.
///
/// `previous` is `None` for the first section, which must be zero.
pub const fn validate_section(previous: Option<Micros>, offset: Micros) -> Result<(), SectionError> {
    if offset.is_negative() {
        return Err(SectionError::Negative(offset));
    }
    match previous {
        None if offset.us() != 0 => Err(SectionError::FirstNotZero(offset)),
        Some(previous) if offset.us() < previous.us() => {
            Err(SectionError::Decreasing { previous, offset })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
fn valid_note() -> Note {
    Note {
        start: Micros::new(10),
        release: Micros::new(20),
        ..Default::default()
    }
}

#[test]
fn accepts_valid_note() {
    assert!(validate_note(&valid_note(), &[Micros::ZERO]).is_ok());
}

#[test]
fn rejects_each_rule() {
    use pretty_assertions::assert_eq;
    let sections = [Micros::ZERO, Micros::new(15)];

    let mut note = valid_note();
    note.start = Micros::new(-1);
    assert_eq!(
        validate_note(&note, &sections),
        Err(NoteError::NegativeStart(Micros::new(-1)))
    );

    let mut note = valid_note();
    note.release = note.start;
    assert!(matches!(
        validate_note(&note, &sections),
        Err(NoteError::ReleaseNotAfterStart { .. })
    ));

    let mut note = valid_note();
    note.pitch = Pitch::new_unchecked(MAX_PITCH + 1);
    assert_eq!(validate_note(&note, &sections), Err(NoteError::Pitch(49)));

    let mut note = valid_note();
    note.articulation = Articulation::from_byte_unchecked(0xFF);
    assert_eq!(
        validate_note(&note, &sections),
        Err(NoteError::Articulation(0xFF))
    );

    let mut note = valid_note();
    note.ramp = Ramp::new_unchecked(MAX_RAMP + 1);
    assert_eq!(validate_note(&note, &sections), Err(NoteError::Ramp(16385)));

    let mut note = valid_note();
    note.sect = 2;
    assert_eq!(
        validate_note(&note, &sections),
        Err(NoteError::UndefinedSection {
            sect: 2,
            sections: 2
        })
    );

    let mut note = valid_note();
    note.sect = 1;
    note.start = Micros::new(14);
    assert_eq!(
        validate_note(&note, &sections),
        Err(NoteError::StartBeforeSection {
            start: Micros::new(14),
            offset: Micros::new(15)
        })
    );
}

#[test]
fn section_ordering() {
    use pretty_assertions::assert_eq;
    assert_eq!(validate_section(None, Micros::ZERO), Ok(()));
    assert_eq!(
        validate_section(None, Micros::new(1)),
        Err(SectionError::FirstNotZero(Micros::new(1)))
    );
    assert_eq!(validate_section(Some(Micros::new(5)), Micros::new(5)), Ok(()));
    assert_eq!(
        validate_section(Some(Micros::new(5)), Micros::new(4)),
        Err(SectionError::Decreasing {
            previous: Micros::new(5),
            offset: Micros::new(4)
        })
    );
    assert_eq!(
        validate_section(Some(Micros::ZERO), Micros::new(-4)),
        Err(SectionError::Negative(Micros::new(-4)))
    );
}
