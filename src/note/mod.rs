#![doc = r#"
Note records and their typed fields

# Layout

On the wire a note occupies 24 bytes, all integers big-endian:

```text
| start (8) | release (8) | pitch (1) | art (1) | ramp (2) | sect (2) | layer (2) |
```

The pitch byte is stored with a bias of 128 so that middle C is `0x80`.
"#]

mod pitch;
pub use pitch::*;

mod articulation;
pub use articulation::*;

mod ramp;
pub use ramp::*;

use crate::Micros;

/// A single timed note event.
///
/// A `Note` is a plain value: a [`Document`](crate::Document) hands out
/// copies of its notes and copies new notes in, so a `Note` is never tied
/// to the document it came from. Use
/// [`validate_note`](crate::validate_note) to check one against a section
/// table before handing it over.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note {
    /// The starting time offset.
    ///
    /// Zero or greater, and no earlier than the offset of [`Note::sect`].
    pub start: Micros,
    /// The release time offset. Must be strictly later than `start`.
    pub release: Micros,
    /// Semitones from middle C.
    pub pitch: Pitch,
    /// Pedal and grace flags plus articulation index.
    pub articulation: Articulation,
    /// Expressive ramp value.
    pub ramp: Ramp,
    /// Index of the section this note belongs to.
    pub sect: u16,
    /// Zero-based layer index within the section.
    pub layer_i: u16,
}

impl Note {
    /// How long the note sounds
    #[inline]
    pub fn duration(&self) -> Micros {
        self.release - self.start
    }

    /// The one-based layer number, as reported to users.
    #[inline]
    pub const fn layer(&self) -> u32 {
        self.layer_i as u32 + 1
    }

    /// True if the note was held by the sustain pedal
    #[inline]
    pub const fn is_pedal(&self) -> bool {
        self.articulation.pedal()
    }

    /// True if this is a grace note
    #[inline]
    pub const fn is_grace(&self) -> bool {
        self.articulation.grace()
    }
}

#[test]
fn derived_accessors() {
    use pretty_assertions::assert_eq;
    let note = Note {
        start: Micros::new(1_000),
        release: Micros::new(4_500),
        articulation: Articulation::new(5, false, true).unwrap(),
        layer_i: u16::MAX,
        ..Default::default()
    };

    assert_eq!(note.duration(), Micros::new(3_500));
    assert_eq!(note.layer(), 65536);
    assert!(note.is_grace());
    assert!(!note.is_pedal());
}
