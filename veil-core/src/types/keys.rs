//! Fixed-size byte values used throughout the protocol.
//!
//! - [`PublicKey`]: A 32-byte public value (spend key, view key, or ephemeral R)
//! - [`Hash32`]: A 32-byte digest output (derived secrets, commitments, nullifiers)
//! - [`StealthAddress`]: A 20-byte one-time address rendered with a `0x` prefix
//! - [`ViewTag`]: The 1-byte discovery tag
//!
//! All of them serialize as lowercase hex strings.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{ADDRESS_PREFIX, ADDRESS_SIZE, DIGEST_SIZE, PUBLIC_KEY_SIZE};
use crate::error::{Result, VeilError};

// ═══════════════════════════════════════════════════════════════════════════════
// 32-BYTE VALUES
// ═══════════════════════════════════════════════════════════════════════════════

macro_rules! fixed_bytes {
    ($(#[$meta:meta])* $name:ident, $size:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name {
            bytes: [u8; $size],
        }

        impl $name {
            /// Creates a value from raw bytes.
            ///
            /// # Errors
            /// Returns `InvalidEncoding` if the length is wrong.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                let bytes: [u8; $size] = bytes.try_into().map_err(|_| {
                    VeilError::InvalidEncoding(format!(
                        "{}: expected {} bytes, got {}",
                        stringify!($name),
                        $size,
                        bytes.len()
                    ))
                })?;
                Ok(Self { bytes })
            }

            /// Creates a value from a fixed-size array.
            pub const fn from_array(bytes: [u8; $size]) -> Self {
                Self { bytes }
            }

            /// Returns the raw bytes.
            pub fn as_bytes(&self) -> &[u8] {
                &self.bytes
            }

            /// Returns the value as a fixed-size array reference.
            pub fn as_array(&self) -> &[u8; $size] {
                &self.bytes
            }

            /// Returns the lowercase hex encoding (no prefix).
            pub fn to_hex(&self) -> String {
                hex::encode(self.bytes)
            }

            /// Parses a hex string (no prefix).
            pub fn from_hex(s: &str) -> Result<Self> {
                let bytes = hex::decode(s)?;
                Self::from_bytes(&bytes)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::from_hex(&s).map_err(de::Error::custom)
            }
        }
    };
}

fixed_bytes!(
    /// A 32-byte public value: a meta-address key or an ephemeral R.
    PublicKey,
    PUBLIC_KEY_SIZE
);

fixed_bytes!(
    /// A 32-byte digest output.
    Hash32,
    DIGEST_SIZE
);

// ═══════════════════════════════════════════════════════════════════════════════
// STEALTH ADDRESS
// ═══════════════════════════════════════════════════════════════════════════════

/// A one-time address: the first 20 bytes of a derived secret.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StealthAddress {
    bytes: [u8; ADDRESS_SIZE],
}

impl StealthAddress {
    /// Truncates a derived secret to an address.
    pub fn from_secret(secret: &Hash32) -> Self {
        let mut bytes = [0u8; ADDRESS_SIZE];
        bytes.copy_from_slice(&secret.as_bytes()[..ADDRESS_SIZE]);
        Self { bytes }
    }

    /// Creates from a fixed-size array.
    pub const fn from_array(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self { bytes }
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the hex encoding without the `0x` prefix.
    ///
    /// This is the form hashed into commitments and nullifiers.
    pub fn to_hex_unprefixed(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Returns the `0x`-prefixed lowercase hex encoding.
    pub fn to_hex_string(&self) -> String {
        format!("{}{}", ADDRESS_PREFIX, self.to_hex_unprefixed())
    }
}

impl FromStr for StealthAddress {
    type Err = VeilError;

    fn from_str(s: &str) -> Result<Self> {
        let raw = s.strip_prefix(ADDRESS_PREFIX).unwrap_or(s);
        let bytes = hex::decode(raw)?;
        let bytes: [u8; ADDRESS_SIZE] = bytes.as_slice().try_into().map_err(|_| {
            VeilError::InvalidEncoding(format!(
                "address: expected {} bytes, got {}",
                ADDRESS_SIZE,
                bytes.len()
            ))
        })?;
        Ok(Self { bytes })
    }
}

impl fmt::Debug for StealthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StealthAddress({})", self.to_hex_string())
    }
}

impl fmt::Display for StealthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl Serialize for StealthAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_string())
    }
}

impl<'de> Deserialize<'de> for StealthAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// VIEW TAG
// ═══════════════════════════════════════════════════════════════════════════════

/// One-byte discovery tag, rendered as two hex characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewTag(u8);

impl ViewTag {
    /// Wraps a raw tag byte.
    pub const fn new(tag: u8) -> Self {
        Self(tag)
    }

    /// Takes the first byte of a digest.
    pub fn from_digest(digest: &Hash32) -> Self {
        Self(digest.as_bytes()[0])
    }

    /// Returns the raw tag byte.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the two-character lowercase hex form.
    pub fn to_hex(&self) -> String {
        format!("{:02x}", self.0)
    }

    /// Parses exactly two hex characters (either case).
    pub fn from_hex(s: &str) -> Result<Self> {
        if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(VeilError::InvalidEncoding(format!(
                "view tag must be 2 hex characters, got {:?}",
                s
            )));
        }
        u8::from_str_radix(s, 16)
            .map(Self)
            .map_err(|e| VeilError::InvalidEncoding(format!("view tag {:?}: {}", s, e)))
    }
}

impl fmt::Display for ViewTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for ViewTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ViewTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(de::Error::custom)
    }
}
