use crate::{NoteError, constants::MAX_RAMP};

#[doc = r#"
An integer-encoded fraction in `[0.0, 1.0]`.

The stored value is in [0, [`MAX_RAMP`]], where `MAX_RAMP` stands for `1.0`.

# Example
```rust
# use nrb::prelude::*;
let half = Ramp::from_fraction(0.5);

assert_eq!(half.value(), 8192);
assert_eq!(half.as_fraction(), 0.5);
```
"#]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ramp(u16);

impl Ramp {
    /// `0.0`
    pub const ZERO: Self = Self(0);
    /// `1.0`
    pub const MAX: Self = Self(MAX_RAMP);

    /// Create a ramp from its integer encoding.
    ///
    /// # Errors
    /// if `value` is greater than [`MAX_RAMP`]
    pub const fn new(value: u16) -> Result<Self, NoteError> {
        if value > MAX_RAMP {
            return Err(NoteError::Ramp(value));
        }
        Ok(Self(value))
    }

    /// Create a ramp without checking the range.
    pub const fn new_unchecked(value: u16) -> Self {
        Self(value)
    }

    /// Nearest ramp to the given fraction. Values outside `[0.0, 1.0]`
    /// (and NaN, which maps to zero) are clamped.
    pub fn from_fraction(fraction: f32) -> Self {
        let clamped = if fraction.is_nan() {
            0.
        } else {
            fraction.clamp(0., 1.)
        };
        // `as` saturates and the product is already within range
        Self((clamped * MAX_RAMP as f32 + 0.5) as u16)
    }

    /// The integer encoding
    #[inline]
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// The encoded fraction
    pub fn as_fraction(&self) -> f32 {
        self.0 as f32 / MAX_RAMP as f32
    }
}

impl TryFrom<u16> for Ramp {
    type Error = NoteError;
    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Ramp> for u16 {
    fn from(value: Ramp) -> Self {
        value.0
    }
}

#[test]
fn ramp_range() {
    use pretty_assertions::assert_eq;
    assert_eq!(Ramp::new(MAX_RAMP), Ok(Ramp::MAX));
    assert_eq!(Ramp::new(MAX_RAMP + 1), Err(NoteError::Ramp(16385)));
}

#[test]
fn ramp_fraction_clamps() {
    use pretty_assertions::assert_eq;
    assert_eq!(Ramp::from_fraction(-3.), Ramp::ZERO);
    assert_eq!(Ramp::from_fraction(7.), Ramp::MAX);
    assert_eq!(Ramp::from_fraction(f32::NAN), Ramp::ZERO);
    assert_eq!(Ramp::from_fraction(0.25).value(), 4096);
    assert_eq!(Ramp::MAX.as_fraction(), 1.);
}
