use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

/// Signed Microseconds
///
/// All times in an NRB document (section offsets, note start and release)
/// are measured in microseconds from the beginning of the piece.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Micros(i64);

impl Micros {
    /// Zero.
    pub const ZERO: Self = Self(0);
    /// The largest offset the format can carry.
    pub const MAX: Self = Self(i64::MAX);

    /// Creates a new instance of microseconds
    #[inline]
    pub const fn new(microseconds: i64) -> Self {
        Self(microseconds)
    }
    /// Returns the microseconds as an i64
    #[inline]
    pub const fn us(&self) -> i64 {
        self.0
    }
    /// ms -> us
    pub const fn from_ms(ms: i64) -> Self {
        Self(ms * 1_000)
    }
    /// Returns seconds
    pub const fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1_000_000.
    }
    /// True if this offset lies before the beginning of the piece.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl From<i64> for Micros {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Micros> for i64 {
    fn from(value: Micros) -> Self {
        value.0
    }
}

impl fmt::Display for Micros {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}us", self.0)
    }
}

impl Add for Micros {
    type Output = Micros;
    fn add(self, rhs: Self) -> Self::Output {
        Micros(self.0 + rhs.0)
    }
}

impl AddAssign for Micros {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Micros {
    type Output = Micros;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Micros {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

#[test]
fn micros_arithmetic() {
    use pretty_assertions::assert_eq;
    let start = Micros::from_ms(250);
    let release = start + Micros::new(1_500);

    assert_eq!(release.us(), 251_500);
    assert_eq!(release - start, Micros::new(1_500));
    assert!(!release.is_negative());
    assert!((Micros::ZERO - start).is_negative());
}

#[test]
fn micros_as_secs() {
    assert_eq!(Micros::from_ms(1_500).as_secs_f64(), 1.5);
}
