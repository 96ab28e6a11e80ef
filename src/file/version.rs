use core::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::constants::{VERSION_MAJOR, VERSION_MINOR};

#[doc = r#"
How well this crate supports the version found in an NRB header.

A status is reported for every parse, successful or not:

| status | parse outcome |
|---|---|
| [`Supported`](Self::Supported) | may still fail on malformed content |
| [`MinorUnsupported`](Self::MinorUnsupported) | may succeed; warn the user either way |
| [`MajorUnsupported`](Self::MajorUnsupported) | always fails |
| [`Unreadable`](Self::Unreadable) | always fails; not an NRB stream |

The numeric codes are stable.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum VersionStatus {
    /// The version is fully supported.
    Supported = 0,
    /// The major version is supported but the minor version is not.
    MinorUnsupported = 1,
    /// The major version is not supported.
    MajorUnsupported = 2,
    /// No version could be read.
    Unreadable = 3,
}

impl VersionStatus {
    /// True for [`VersionStatus::Supported`]
    pub const fn is_supported(&self) -> bool {
        matches!(self, Self::Supported)
    }
}

impl fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Supported => "supported",
            Self::MinorUnsupported => "unsupported minor version",
            Self::MajorUnsupported => "unsupported major version",
            Self::Unreadable => "unreadable version",
        };
        f.write_str(text)
    }
}

/// The version pair from an NRB header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Version {
    /// Incompatible revisions
    pub major: u8,
    /// Compatible revisions
    pub minor: u8,
}

impl Version {
    /// The version this crate writes, 1.0
    pub const CURRENT: Self = Self {
        major: VERSION_MAJOR,
        minor: VERSION_MINOR,
    };

    /// Classify this version
    pub const fn status(&self) -> VersionStatus {
        if self.major != VERSION_MAJOR {
            VersionStatus::MajorUnsupported
        } else if self.minor != VERSION_MINOR {
            VersionStatus::MinorUnsupported
        } else {
            VersionStatus::Supported
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[test]
fn version_classification() {
    use pretty_assertions::assert_eq;
    assert_eq!(Version::CURRENT.status(), VersionStatus::Supported);
    assert_eq!(
        Version { major: 1, minor: 7 }.status(),
        VersionStatus::MinorUnsupported
    );
    assert_eq!(
        Version { major: 2, minor: 0 }.status(),
        VersionStatus::MajorUnsupported
    );
    assert_eq!(
        Version { major: 0, minor: 3 }.status(),
        VersionStatus::MajorUnsupported
    );
}

#[test]
fn status_codes_are_stable() {
    use pretty_assertions::assert_eq;
    assert_eq!(u8::from(VersionStatus::Supported), 0);
    assert_eq!(u8::from(VersionStatus::Unreadable), 3);
    assert_eq!(
        VersionStatus::try_from(2u8).unwrap(),
        VersionStatus::MajorUnsupported
    );
    assert!(VersionStatus::try_from(4u8).is_err());
}
