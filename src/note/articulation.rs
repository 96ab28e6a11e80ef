use crate::{NoteError, constants::MAX_ARTICULATION};

const PEDAL_BIT: u8 = 0b1000_0000;
const GRACE_BIT: u8 = 0b0100_0000;
const INDEX_MASK: u8 = 0b0011_1111;

#[doc = r#"
The articulation byte of a note.

```text
 7   6   5 4 3 2 1 0
[P] [G] [A A A A A A]
```

- `P` is set if the note was modified by a sustain pedal.
- `G` is set if the note is a grace note.
- `A` is an articulation index in the range [0, 61].

The two flag bits are never themselves restricted: any combination of
pedal and grace is accepted.

# Example
```rust
# use nrb::prelude::*;
let art = Articulation::new(12, true, false).unwrap();

assert!(art.pedal());
assert!(!art.grace());
assert_eq!(art.index(), 12);
assert_eq!(art.byte(), 0x8C);
```
"#]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Articulation(u8);

impl Articulation {
    /// Build an articulation from its index and flags.
    ///
    /// # Errors
    /// if `index` is greater than [`MAX_ARTICULATION`]
    pub const fn new(index: u8, pedal: bool, grace: bool) -> Result<Self, NoteError> {
        if index > MAX_ARTICULATION {
            return Err(NoteError::Articulation(index));
        }
        let mut byte = index;
        if pedal {
            byte |= PEDAL_BIT;
        }
        if grace {
            byte |= GRACE_BIT;
        }
        Ok(Self(byte))
    }

    /// Interpret a raw articulation byte.
    ///
    /// # Errors
    /// if the low six bits exceed [`MAX_ARTICULATION`]
    pub const fn from_byte(byte: u8) -> Result<Self, NoteError> {
        if byte & INDEX_MASK > MAX_ARTICULATION {
            return Err(NoteError::Articulation(byte));
        }
        Ok(Self(byte))
    }

    /// Wrap a raw byte without checking the index.
    pub const fn from_byte_unchecked(byte: u8) -> Self {
        Self(byte)
    }

    /// The raw byte
    #[inline]
    pub const fn byte(&self) -> u8 {
        self.0
    }

    /// Sustain pedal flag
    #[inline]
    pub const fn pedal(&self) -> bool {
        self.0 & PEDAL_BIT != 0
    }

    /// Grace note flag
    #[inline]
    pub const fn grace(&self) -> bool {
        self.0 & GRACE_BIT != 0
    }

    /// The articulation index, without the flag bits
    #[inline]
    pub const fn index(&self) -> u8 {
        self.0 & INDEX_MASK
    }
}

impl TryFrom<u8> for Articulation {
    type Error = NoteError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_byte(value)
    }
}

impl From<Articulation> for u8 {
    fn from(value: Articulation) -> Self {
        value.0
    }
}

#[test]
fn flags_do_not_affect_index() {
    use pretty_assertions::assert_eq;
    for byte in [0x3D, 0x7D, 0xBD, 0xFD] {
        let art = Articulation::from_byte(byte).unwrap();
        assert_eq!(art.index(), MAX_ARTICULATION);
    }
    let both = Articulation::new(0, true, true).unwrap();
    assert_eq!(both.byte(), 0xC0);
    assert!(both.pedal() && both.grace());
}

#[test]
fn index_above_max_is_rejected() {
    use pretty_assertions::assert_eq;
    assert_eq!(Articulation::new(62, false, false), Err(NoteError::Articulation(62)));
    assert_eq!(Articulation::from_byte(0xBF), Err(NoteError::Articulation(0xBF)));
    assert_eq!(Articulation::from_byte(0x3E), Err(NoteError::Articulation(0x3E)));
}
