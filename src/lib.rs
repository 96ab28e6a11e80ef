#![doc = r#"
A reader and writer for NRB binary score files.

An NRB file stores a timed score: a table of section offsets (rehearsal
or structural markers, in microseconds) followed by a table of notes.
Each note is anchored to a section and carries its start and release
times, a pitch relative to middle C, an articulation byte and a ramp
value.

# Overview

- [`Document`] owns the section and note tables. Every way of putting data
  into a document, parsing or mutation, runs through the same validation,
  so a [`Document`] can never hold an inconsistent score.
- [`Document::parse`] decodes a byte slice and reports a [`VersionStatus`]
  whether or not the parse succeeded.
- [`Document::serialize`] writes the document back out as version 1.0.

# Example
```rust
# use nrb::prelude::*;
let mut doc = Document::new();
assert!(doc.append_section(Micros::from_ms(500)).unwrap());

let note = Note {
    start: Micros::from_ms(600),
    release: Micros::from_ms(900),
    pitch: Pitch::MIDDLE_C,
    articulation: Articulation::new(3, true, false).unwrap(),
    ramp: Ramp::MAX,
    sect: 1,
    layer_i: 0,
};
assert!(doc.append_note(note).unwrap());

let bytes = doc.to_bytes().unwrap();
let parsed = Document::parse(&bytes).unwrap();

assert_eq!(parsed.version, VersionStatus::Supported);
assert_eq!(parsed.document, doc);
```
"#]
#![warn(missing_docs)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod constants;

mod micros;
pub use micros::*;

pub mod note;

pub mod validate;
pub use validate::{validate_note, validate_section};

pub mod reader;

pub mod writer;

mod document;
pub use document::*;

pub mod file;

mod error;
pub use error::*;

#[doc = r#"
Common re-exports when working with NRB documents
"#]
pub mod prelude {
    pub use crate::{
        ContractViolation, Document, Micros, NoteError, ParseError, SectionError,
        SerializeError, validate_note, validate_section,
        constants::*,
        file::{Header, ParseFailure, Parsed, Version, VersionStatus},
        note::*,
        reader::{NrbSource, ReadResult, Reader, ReaderError, ReaderErrorKind, SliceSource},
        writer::{NrbSink, SinkError, SliceSink, Writer},
    };

    #[cfg(feature = "std")]
    pub use crate::{
        file::parse_path,
        reader::IoSource,
        writer::IoSink,
    };
}
