#![doc = r#"
Fixed numeric limits and layout sizes of the NRB format
"#]

/// First signature word of every NRB file.
pub const SIGNATURE_PRIMARY: u32 = 0x72ED_F078;

/// Second signature word of every NRB file (`.nrb` in ASCII).
pub const SIGNATURE_SECONDARY: u32 = 0x2E6E_7262;

/// The major version this crate reads and writes.
pub const VERSION_MAJOR: u8 = 1;

/// The minor version this crate writes.
pub const VERSION_MINOR: u8 = 0;

/// The maximum number of sections a document may hold.
pub const MAX_SECTIONS: usize = 65535;

/// The maximum number of notes a document may hold.
pub const MAX_NOTES: usize = 1_048_576;

/// The lowest pitch, in semitones below middle C.
pub const MIN_PITCH: i8 = -39;

/// The highest pitch, in semitones above middle C.
pub const MAX_PITCH: i8 = 48;

/// The largest articulation index (the low six bits of the articulation byte).
pub const MAX_ARTICULATION: u8 = 61;

/// The integer ramp value that encodes `1.0`.
pub const MAX_RAMP: u16 = 16384;

/// Added to a signed byte in [-128, 127] before it is stored.
pub const BIAS8: i16 = 128;

/// Section capacity of a freshly created document.
pub const SECTION_CAPACITY_INIT: usize = 16;

/// Note capacity of a freshly created document.
pub const NOTE_CAPACITY_INIT: usize = 256;

/// Number of reserved 32-bit words in the header.
pub const RESERVED_WORDS: usize = 4;

/// Byte length of the header, up to the section table.
pub const HEADER_LEN: usize = 32;

/// Byte length of one entry in the section table.
pub const SECTION_RECORD_LEN: usize = 8;

/// Byte length of one entry in the note table.
pub const NOTE_RECORD_LEN: usize = 24;
