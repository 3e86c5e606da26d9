//! Short protocol version offset packed into a single byte

use std::cell::Cell;
use std::fmt;
use std::rc::Weak;

use serde::{Serialize, Serializer};

use crate::bits::byte_bits;
use crate::observer::ListenerSlot;
use crate::{VersionChangeListener, VersionError, VersionResult};

/// Number of bytes in the packed form: `[major:2][minor:3][patch:3]`.
pub const SHORT_VERSION_SIZE: usize = 1;

const MAJOR_MAX: u8 = 3;
const MINOR_MAX: u8 = 7;
const PATCH_MAX: u8 = 7;

/// Per-block version *offset* relative to the last full version, used in
/// compact headers to save space.
///
/// All three fields are deltas and may be zero; there is no cross-field
/// invariant. Packed as `[major:2][minor:3][patch:3]` within one byte.
#[derive(Debug, Default)]
pub struct ShortVersion {
    major: Cell<u8>,
    minor: Cell<u8>,
    patch: Cell<u8>,
    listener: ListenerSlot,
}

impl ShortVersion {
    /// Create an offset from its three fields, validating each one.
    pub fn from_fields(major: u8, minor: u8, patch: u8) -> VersionResult<Self> {
        let version = Self::default();
        version.set_major(major)?;
        version.set_minor(minor)?;
        version.set_patch(patch)?;
        Ok(version)
    }

    /// Unpack an offset from exactly [`SHORT_VERSION_SIZE`] raw byte.
    ///
    /// Raw bytes are trusted: the unpacked fields bypass validation (every
    /// bit pattern is a valid offset anyway).
    pub fn from_bytes(raw: &[u8]) -> VersionResult<Self> {
        if raw.len() != SHORT_VERSION_SIZE {
            return Err(VersionError::InvalidLength {
                expected: SHORT_VERSION_SIZE,
                actual: raw.len(),
            });
        }
        let byte = raw[0];
        Ok(Self {
            major: Cell::new(byte >> 6),
            minor: Cell::new((byte & 0b0011_1000) >> 3),
            patch: Cell::new(byte & 0b0000_0111),
            listener: ListenerSlot::default(),
        })
    }

    /// Major offset.
    pub fn major(&self) -> u8 {
        self.major.get()
    }

    /// Minor offset.
    pub fn minor(&self) -> u8 {
        self.minor.get()
    }

    /// Patch offset.
    pub fn patch(&self) -> u8 {
        self.patch.get()
    }

    /// Set the major offset (2 bits); notifies the listener on success.
    pub fn set_major(&self, value: u8) -> VersionResult<()> {
        if value > MAJOR_MAX {
            return Err(VersionError::InvalidMajor {
                value,
                min: 0,
                max: MAJOR_MAX,
            });
        }
        self.major.set(value);
        self.listener.notify();
        Ok(())
    }

    /// Set the minor offset (3 bits).
    pub fn set_minor(&self, value: u8) -> VersionResult<()> {
        if value > MINOR_MAX {
            return Err(VersionError::InvalidMinor {
                value,
                min: 0,
                max: MINOR_MAX,
            });
        }
        self.minor.set(value);
        self.listener.notify();
        Ok(())
    }

    /// Set the patch offset (3 bits).
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

    /// String form with a leading `+` per field to mark the values as
    /// offsets, e.g. `"+1.+2.+3"`.
    pub fn as_str(&self) -> String {
        format!(
            "+{}.+{}.+{}",
            self.major.get(),
            self.minor.get(),
            self.patch.get()
        )
    }

    /// Packed form: `major << 6 | minor << 3 | patch`.
    pub fn as_bytes(&self) -> [u8; SHORT_VERSION_SIZE] {
        [(self.major.get() << 6) | (self.minor.get() << 3) | self.patch.get()]
    }

    /// Lowercase hex of the packed byte.
    pub fn as_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }

    /// 8-character binary string of the packed byte, MSB first.
    pub fn as_binary_str(&self) -> String {
        byte_bits(self.as_bytes()[0])
    }

    /// Register a change listener; fires one immediate notification so the
    /// listener can sync its initial state.
    pub fn set_listener(&self, listener: Weak<dyn VersionChangeListener>) -> VersionResult<()> {
        self.listener.bind(listener)
    }
}

impl fmt::Display for ShortVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ShortVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_str())
    }
}
