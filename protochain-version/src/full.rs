//! Full (absolute) protocol version packed into two bytes

use std::cell::Cell;
use std::fmt;
use std::rc::Weak;

use serde::{Serialize, Serializer};

use crate::bits::byte_bits;
use crate::observer::ListenerSlot;
use crate::{ShortVersion, VersionChangeListener, VersionError, VersionResult, VersionTriple};

/// Number of bytes in the packed form: `[major:8][minor:4][patch:4]`.
pub const FULL_VERSION_SIZE: usize = 2;

const MINOR_MAX: u8 = 15;
const PATCH_MAX: u8 = 15;

/// Absolute protocol version for a block's primary header.
///
/// Semantic versioning with major packed into 8 bits and minor/patch into
/// 4 bits each. The minimal version is `0.1.0`: minor cannot be zero while
/// major is zero.
///
/// Fields use interior mutability so setters take `&self` and the
/// synchronous change notification can read the fields without re-entrant
/// borrows.
#[derive(Debug)]
pub struct FullVersion {
    major: Cell<u8>,
    minor: Cell<u8>,
    patch: Cell<u8>,
    listener: ListenerSlot,
}

impl FullVersion {
    /// Create a version from its three fields, validating each one.
    ///
    /// The setters run in major → minor → patch order, so the minor check
    /// sees the already-set major.
    pub fn from_fields(major: u8, minor: u8, patch: u8) -> VersionResult<Self> {
        let version = Self::unchecked(0, 1, 0);
        version.set_major(major)?;
        version.set_minor(minor)?;
        version.set_patch(patch)?;
        Ok(version)
    }

    /// Unpack a version from exactly [`FULL_VERSION_SIZE`] raw bytes.
    ///
    /// Raw bytes are trusted: the unpacked fields bypass validation.
    pub fn from_bytes(raw: &[u8]) -> VersionResult<Self> {
        if raw.len() != FULL_VERSION_SIZE {
            return Err(VersionError::InvalidLength {
                expected: FULL_VERSION_SIZE,
                actual: raw.len(),
            });
        }
        Ok(Self::unchecked(raw[0], raw[1] >> 4, raw[1] & 0b0000_1111))
    }

    fn unchecked(major: u8, minor: u8, patch: u8) -> Self {
        Self {
            major: Cell::new(major),
            minor: Cell::new(minor),
            patch: Cell::new(patch),
            listener: ListenerSlot::default(),
        }
    }

    /// Major version number.
    pub fn major(&self) -> u8 {
        self.major.get()
    }

    /// Minor version number.
    pub fn minor(&self) -> u8 {
        self.minor.get()
    }

    /// Patch version number.
    pub fn patch(&self) -> u8 {
        self.patch.get()
    }

    /// Minimal permitted minor for a given major: `0.0.x` is disallowed,
    /// so minor starts at 1 while major is zero.
    fn min_minor_for(major: u8) -> u8 {
        if major > 0 {
            0
        } else {
            1
        }
    }

    /// Set the major field. Any byte is a valid 8-bit major; the listener
    /// is notified on success.
    pub fn set_major(&self, value: u8) -> VersionResult<()> {
        self.major.set(value);
        self.listener.notify();
        Ok(())
    }

    /// Set the minor field (4 bits; minimum depends on the current major).
    pub fn set_minor(&self, value: u8) -> VersionResult<()> {
        let min = Self::min_minor_for(self.major.get());
        if value < min || value > MINOR_MAX {
            return Err(VersionError::InvalidMinor {
                value,
                min,
                max: MINOR_MAX,
            });
        }
        self.minor.set(value);
        self.listener.notify();
        Ok(())
    }

    /// Set the patch field (4 bits).
    pub fn set_patch(&self, value: u8) -> VersionResult<()> {
        if value > PATCH_MAX {
            return Err(VersionError::InvalidPatch {
                value,
                min: 0,
                max: PATCH_MAX,
            });
        }
        self.patch.set(value);
        self.listener.notify();
        Ok(())
    }

    /// Dotted string form, e.g. `"1.2.3"`.
    pub fn as_str(&self) -> String {
        format!("{}.{}.{}", self.major.get(), self.minor.get(), self.patch.get())
    }

    /// Packed form: `[major, minor << 4 | patch]`.
    pub fn as_bytes(&self) -> [u8; FULL_VERSION_SIZE] {
        [self.major.get(), (self.minor.get() << 4) | self.patch.get()]
    }

    /// Lowercase hex of the packed form.
    pub fn as_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }

    /// 16-character binary string of the packed form, MSB first.
    pub fn as_binary_str(&self) -> String {
        let [first, second] = self.as_bytes();
        byte_bits(first) + &byte_bits(second)
    }

    /// Field-wise sum of this version and a short offset.
    ///
    /// The result is semantic, not bit-packed: fields may exceed their
    /// packed widths. Neither operand is mutated.
    pub fn add_offset(&self, offset: &ShortVersion) -> VersionTriple {
        (
            self.major.get() as i32 + offset.major() as i32,
            self.minor.get() as i32 + offset.minor() as i32,
            self.patch.get() as i32 + offset.patch() as i32,
        )
    }

    /// Register a change listener; fires one immediate notification so the
    /// listener can sync its initial state.
    pub fn set_listener(&self, listener: Weak<dyn VersionChangeListener>) -> VersionResult<()> {
        self.listener.bind(listener)
    }
}

impl Default for FullVersion {
    /// The minimal valid version, `0.1.0`.
    fn default() -> Self {
        Self::unchecked(0, 1, 0)
    }
}

impl fmt::Display for FullVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for FullVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::Cell as StdCell;
    use std::rc::Rc;

    #[test]
    fn test_default_is_minimal_version() {
        let v = FullVersion::default();
        assert_eq!(v.as_str(), "0.1.0");
        assert_eq!(v.as_bytes(), [0x00, 0x10]);
    }

    #[test]
    fn test_packed_layout() {
        let v = FullVersion::from_fields(1, 2, 3).unwrap();
        assert_eq!(v.as_bytes(), [0x01, 0x23]);
        assert_eq!(v.as_binary_str(), "0000000100100011");
        assert_eq!(v.as_str(), "1.2.3");
        assert_eq!(v.to_string(), "1.2.3");
    }

    #[test]
    fn test_hex_form() {
        let v = FullVersion::from_fields(5, 8, 13).unwrap();
        assert_eq!(v.as_bytes(), [0x05, 0x8d]);
        assert_eq!(v.as_hex(), "058d");
    }

    #[test]
    fn test_from_bytes_round_trip() {
        let v = FullVersion::from_fields(1, 2, 3).unwrap();
        let decoded = FullVersion::from_bytes(&v.as_bytes()).unwrap();
        assert_eq!(decoded.as_str(), "1.2.3");
        assert_eq!(decoded.as_binary_str(), "0000000100100011");
    }

    #[test]
    fn test_from_bytes_is_trusted() {
        // 0.0.0 violates the minor invariant but raw bytes bypass validation
        let v = FullVersion::from_bytes(&[0, 0]).unwrap();
        assert_eq!(v.as_str(), "0.0.0");
    }

    #[test]
    fn test_from_bytes_rejects_wrong_length() {
        assert_eq!(
            FullVersion::from_bytes(&[1]).unwrap_err(),
            VersionError::InvalidLength {
                expected: 2,
                actual: 1
            }
        );
        assert!(FullVersion::from_bytes(&[1, 2, 3]).is_err());
    }

    #[test]
    fn test_minor_depends_on_major() {
        // 0.0.x is disallowed, minimum is 0.1.0
        assert_eq!(
            FullVersion::from_fields(0, 0, 0).unwrap_err(),
            VersionError::InvalidMinor {
                value: 0,
                min: 1,
                max: 15
            }
        );
        // minor = 0 is fine once major > 0
        assert!(FullVersion::from_fields(1, 0, 0).is_ok());
    }

    #[test]
    fn test_rejected_setter_leaves_value_unchanged() {
        let v = FullVersion::from_fields(1, 2, 3).unwrap();
        assert!(v.set_minor(16).is_err());
        assert_eq!(v.minor(), 2);
        assert!(v.set_patch(200).is_err());
        assert_eq!(v.patch(), 3);
    }

    #[test]
    fn test_add_offset() {
        let full = FullVersion::from_fields(255, 15, 15).unwrap();
        let short = ShortVersion::from_fields(3, 7, 7).unwrap();
        assert_eq!(full.add_offset(&short), (258, 22, 22));
        // operands untouched
        assert_eq!(full.as_str(), "255.15.15");
        assert_eq!(short.as_str(), "+3.+7.+7");
    }

    struct Counter {
        hits: StdCell<u32>,
    }

    impl VersionChangeListener for Counter {
        fn on_change(&self) {
            self.hits.set(self.hits.get() + 1);
        }
    }

    #[test]
    fn test_setters_notify_listener() {
        let v = FullVersion::from_fields(1, 2, 3).unwrap();
        let counter = Rc::new(Counter {
            hits: StdCell::new(0),
        });
        let weak = Rc::downgrade(&counter);
        let weak: Weak<dyn VersionChangeListener> = weak;
        v.set_listener(weak).unwrap();
        assert_eq!(counter.hits.get(), 1); // replay on subscribe

        v.set_patch(4).unwrap();
        assert_eq!(counter.hits.get(), 2);

        // a rejected mutation must not notify
        assert!(v.set_patch(16).is_err());
        assert_eq!(counter.hits.get(), 2);
    }

    fn full_version_fields() -> impl Strategy<Value = (u8, u8, u8)> {
        (0u8..=255).prop_flat_map(|major| {
            let min_minor = if major > 0 { 0u8 } else { 1u8 };
            (Just(major), min_minor..=15u8, 0u8..=15u8)
        })
    }

    proptest! {
        #[test]
        fn prop_full_version_round_trips((major, minor, patch) in full_version_fields()) {
            let v = FullVersion::from_fields(major, minor, patch).unwrap();
            let decoded = FullVersion::from_bytes(&v.as_bytes()).unwrap();
            prop_assert_eq!(
                (decoded.major(), decoded.minor(), decoded.patch()),
                (major, minor, patch)
            );
        }
    }
}
