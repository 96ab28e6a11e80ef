use thiserror::Error;

use crate::{Micros, writer::SinkError};

/// A note field that breaks one of the format's rules.
///
/// Returned by the value constructors in [`note`](crate::note), by
/// [`validate_note`](crate::validate_note), and wrapped by both
/// [`ContractViolation`] and [`ParseError`].
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum NoteError {
    /// The note starts before the beginning of the piece.
    #[error("Start offset {0} is negative")]
    NegativeStart(Micros),
    /// The release is not strictly later than the start.
    #[error("Release {release} is not after start {start}")]
    ReleaseNotAfterStart {
        /// Start offset
        start: Micros,
        /// Release offset
        release: Micros,
    },
    /// The pitch is outside [-39, 48].
    #[error("Pitch {0} is out of range")]
    Pitch(i8),
    /// The articulation index (low six bits) is greater than 61.
    #[error("Articulation byte {0:#04X} has an invalid index")]
    Articulation(u8),
    /// The ramp is greater than 16384.
    #[error("Ramp {0} is out of range")]
    Ramp(u16),
    /// The section index does not name a defined section.
    #[error("Section index {sect} is not below the section count {sections}")]
    UndefinedSection {
        /// Referenced section
        sect: u16,
        /// Number of sections defined
        sections: usize,
    },
    /// The note starts before the section it belongs to.
    #[error("Start offset {start} is before its section offset {offset}")]
    StartBeforeSection {
        /// Start offset
        start: Micros,
        /// Offset of the referenced section
        offset: Micros,
    },
}

/// A section offset that breaks the ordering of the section table.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SectionError {
    /// The first section must begin at zero.
    #[error("First section begins at {0} instead of zero")]
    FirstNotZero(Micros),
    /// Offsets may not be negative.
    #[error("Section offset {0} is negative")]
    Negative(Micros),
    /// Each section must begin no earlier than the one before it.
    #[error("Section offset {offset} is before the previous offset {previous}")]
    Decreasing {
        /// Offset of the previous section
        previous: Micros,
        /// The rejected offset
        offset: Micros,
    },
}

#[doc = r#"
A caller passed an argument that the document API does not accept.

These are programming mistakes, kept apart from [`ParseError`] and
[`SerializeError`], which describe bad data or a failing stream. The
document is left untouched whenever one is returned.
"#]
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ContractViolation {
    /// No section exists at this index.
    #[error("Section index {index} is out of bounds for {count} sections")]
    SectionIndex {
        /// Requested index
        index: usize,
        /// Number of sections
        count: usize,
    },
    /// No note exists at this index.
    #[error("Note index {index} is out of bounds for {count} notes")]
    NoteIndex {
        /// Requested index
        index: usize,
        /// Number of notes
        count: usize,
    },
    /// The note does not satisfy the format's rules.
    #[error("Invalid note: {0}")]
    Note(#[from] NoteError),
    /// The section offset does not satisfy the format's rules.
    #[error("Invalid section: {0}")]
    Section(#[from] SectionError),
}

/// Problems found in the content of an NRB byte stream
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The first eight bytes are not the NRB signature.
    #[error("Signature {primary:#010X} {secondary:#010X} is not an NRB signature")]
    Signature {
        /// First signature word read
        primary: u32,
        /// Second signature word read
        secondary: u32,
    },
    /// The file was written by an incompatible major version.
    #[error("Unsupported major version {0}")]
    MajorVersion(u8),
    /// The section count is zero. (Any 16-bit count other than zero fits.)
    #[error("Invalid section count {0}")]
    SectionCount(u16),
    /// The note count is zero or greater than 1,048,576.
    #[error("Invalid note count {0}")]
    NoteCount(u32),
    /// An unsigned field has its top bit set.
    #[error("Unsigned value {0:#X} exceeds the signed range")]
    UnsignedRange(u64),
    /// An entry in the section table is out of order.
    #[error("Section {index}: {source}")]
    Section {
        /// Position in the section table
        index: usize,
        /// What was wrong
        source: SectionError,
    },
    /// An entry in the note table is invalid.
    #[error("Note {index}: {source}")]
    Note {
        /// Position in the note table
        index: usize,
        /// What was wrong
        source: NoteError,
    },
}

/// Reasons [`Document::serialize`](crate::Document::serialize) can fail
#[derive(Debug, Error)]
pub enum SerializeError {
    /// The document has no notes. Nothing was written.
    #[error("Document has no notes to serialize")]
    Empty,
    /// The sink refused the output.
    #[error("Writing output: {0}")]
    Sink(#[from] SinkError),
}
