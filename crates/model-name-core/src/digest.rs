//! Content digests
//!
//! A digest identifies content by its hash rather than by name. The textual
//! form is `type-hex`, e.g. `sha256-e3b0c442...`. Parsing also accepts
//! `type:hex`, but formatting always uses `-`, so the `:` form does not
//! round trip.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest as _, Sha256};
use std::fmt;
use std::io::{self, Read};
use std::str::FromStr;

use crate::error::DigestError;

/// Supported digest hash families
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DigestType {
    /// No recognized type; the state of a digest that failed to parse
    #[default]
    Unknown,
    /// SHA-256
    Sha256,
}

impl DigestType {
    /// Get the string representation of the digest type
    pub fn as_str(&self) -> &'static str {
        match self {
            DigestType::Unknown => "unknown",
            DigestType::Sha256 => "sha256",
        }
    }
}

impl fmt::Display for DigestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DigestType {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sha256" => Ok(DigestType::Sha256),
            _ => Err(DigestError::UnknownType(s.to_string())),
        }
    }
}

/// A content digest: a hash family and a 32-byte hash.
///
/// The zero value (`Digest::default()`) is the invalid digest every failed
/// parse collapses to. Digests compare and hash by their raw bytes, so they
/// can be used directly as map keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest {
    typ: DigestType,
    hash: [u8; 32],
}

impl Digest {
    /// Number of bytes in a hash
    pub const HASH_LEN: usize = 32;

    /// Create a digest from a type and a raw hash
    pub fn from_hash(typ: DigestType, hash: [u8; 32]) -> Self {
        Self { typ, hash }
    }

    /// Compute the SHA-256 digest of `data`
    pub fn sha256(data: impl AsRef<[u8]>) -> Self {
        Self::from_hash(DigestType::Sha256, Sha256::digest(data.as_ref()).into())
    }

    /// Compute the SHA-256 digest of everything readable from `reader`
    pub fn sha256_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut hasher = Sha256::new();
        io::copy(&mut reader, &mut hasher)?;
        Ok(Self::from_hash(DigestType::Sha256, hasher.finalize().into()))
    }

    /// Decode a `type:hex` or `type-hex` string.
    ///
    /// The string is cut at its last `:`, or at its last `-` when there is no
    /// `:`. The hash must be exactly 64 hex characters. An all-zero hash is
    /// accepted here; use [`Digest::is_valid`] or `FromStr` to reject it.
    pub fn try_parse(s: &str) -> Result<Self, DigestError> {
        let (typ, hex_hash) = s
            .rsplit_once(':')
            .or_else(|| s.rsplit_once('-'))
            .ok_or(DigestError::MissingSeparator)?;

        let typ: DigestType = typ.parse()?;

        if hex_hash.len() != Self::HASH_LEN * 2 {
            return Err(DigestError::InvalidLength(hex_hash.len()));
        }
        let mut hash = [0u8; 32];
        hex::decode_to_slice(hex_hash, &mut hash).map_err(|_| DigestError::InvalidHex)?;

        Ok(Self { typ, hash })
    }

    /// Returns true if the type is recognized and the hash is not all zeros
    pub fn is_valid(&self) -> bool {
        self.typ != DigestType::Unknown && self.hash != [0u8; 32]
    }

    /// Get the digest type
    pub fn digest_type(&self) -> DigestType {
        self.typ
    }

    /// Get the raw hash bytes
    pub fn hash(&self) -> &[u8; 32] {
        &self.hash
    }

    /// Get the hash as a lowercase hex string
    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash)
    }
}

/// Parse a digest string, collapsing every failure to the zero digest.
///
/// This never fails; check [`Digest::is_valid`] on the result.
pub fn parse_digest(s: &str) -> Digest {
    Digest::try_parse(s).unwrap_or_default()
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.typ, self.hash_hex())
    }
}

impl FromStr for Digest {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digest = Self::try_parse(s)?;
        if !digest.is_valid() {
            return Err(DigestError::ZeroHash);
        }
        Ok(digest)
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
