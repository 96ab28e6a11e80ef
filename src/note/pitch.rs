use core::fmt;

use crate::{NoteError, constants::*};

#[doc = r#"
The pitch of a note, counted in semitones (half steps) away from middle C.

A value of zero is middle C, `-1` is the B below middle C, `2` is the D
above middle C, and so forth. The representable range is
[`MIN_PITCH`, `MAX_PITCH`], which is exactly the span of an 88-key piano,
from `A0` up to `C8`.

# Example
```rust
# use nrb::prelude::*;
let pitch = Pitch::new(-39).unwrap();

assert_eq!(pitch.key(), Key::A);
assert_eq!(pitch.octave(), 0);

assert!(Pitch::new(49).is_err());
```
"#]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pitch(i8);

impl Pitch {
    /// Middle C (`C4`).
    pub const MIDDLE_C: Self = Self(0);
    /// The lowest representable pitch (`A0`).
    pub const MIN: Self = Self(MIN_PITCH);
    /// The highest representable pitch (`C8`).
    pub const MAX: Self = Self(MAX_PITCH);

    /// Create a new pitch.
    ///
    /// # Errors
    /// if `semitones` is outside [`MIN_PITCH`, `MAX_PITCH`]
    pub const fn new(semitones: i8) -> Result<Self, NoteError> {
        if semitones < MIN_PITCH || semitones > MAX_PITCH {
            return Err(NoteError::Pitch(semitones));
        }
        Ok(Self(semitones))
    }

    /// Creates a new pitch without checking the range.
    ///
    /// A [`Document`](crate::Document) will still refuse a note carrying
    /// an out-of-range pitch.
    pub const fn new_unchecked(semitones: i8) -> Self {
        Self(semitones)
    }

    /// Semitones relative to middle C
    #[inline]
    pub const fn semitones(&self) -> i8 {
        self.0
    }

    /// The pitch class of this pitch
    pub const fn key(&self) -> Key {
        Key::from_semitone(self.0.rem_euclid(12) as u8)
    }

    /// The scientific octave of this pitch. Middle C is in octave 4.
    pub const fn octave(&self) -> i8 {
        4 + self.0.div_euclid(12)
    }
}

impl TryFrom<i8> for Pitch {
    type Error = NoteError;
    fn try_from(value: i8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Pitch> for i8 {
    fn from(value: Pitch) -> Self {
        value.0
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.key(), self.octave())
    }
}

#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[doc = r#"
Identifies the pitch class of a [`Pitch`]
"#]
pub enum Key {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl Key {
    /// Returns an array beginning with [`Key::C`] to [`Key::B`]
    pub fn all() -> [Key; 12] {
        use Key::*;
        [C, CSharp, D, DSharp, E, F, FSharp, G, GSharp, A, ASharp, B]
    }

    /// Returns true if the key is sharp.
    #[inline]
    pub const fn is_sharp(&self) -> bool {
        use Key::*;
        matches!(self, CSharp | DSharp | FSharp | GSharp | ASharp)
    }

    const fn from_semitone(semitone: u8) -> Self {
        use Key::*;
        match semitone {
            0 => C,
            1 => CSharp,
            2 => D,
            3 => DSharp,
            4 => E,
            5 => F,
            6 => FSharp,
            7 => G,
            8 => GSharp,
            9 => A,
            10 => ASharp,
            11 => B,
            _ => unreachable!(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Key::*;
        let name = match self {
            C => "C",
            CSharp => "C#",
            D => "D",
            DSharp => "D#",
            E => "E",
            F => "F",
            FSharp => "F#",
            G => "G",
            GSharp => "G#",
            A => "A",
            ASharp => "A#",
            B => "B",
        };
        f.write_str(name)
    }
}

#[test]
fn pitch_bounds() {
    use pretty_assertions::assert_eq;
    assert_eq!(Pitch::new(MIN_PITCH), Ok(Pitch::MIN));
    assert_eq!(Pitch::new(MAX_PITCH), Ok(Pitch::MAX));
    assert_eq!(Pitch::new(-40), Err(NoteError::Pitch(-40)));
    assert_eq!(Pitch::new(49), Err(NoteError::Pitch(49)));
}

#[test]
fn pitch_names() {
    use alloc::string::ToString;
    use pretty_assertions::assert_eq;

    assert_eq!(Pitch::MIDDLE_C.to_string(), "C4");
    assert_eq!(Pitch::new(-1).unwrap().to_string(), "B3");
    assert_eq!(Pitch::new(2).unwrap().to_string(), "D4");
    assert_eq!(Pitch::MIN.to_string(), "A0");
    assert_eq!(Pitch::MAX.to_string(), "C8");
    assert_eq!(Pitch::new(-13).unwrap().to_string(), "B2");
}

#[test]
fn every_key_is_reachable() {
    use pretty_assertions::assert_eq;
    for (i, key) in Key::all().into_iter().enumerate() {
        let pitch = Pitch::new(i as i8).unwrap();
        assert_eq!(pitch.key(), key);
        assert_eq!(pitch.octave(), 4);
    }
}
