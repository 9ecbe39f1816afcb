//! Error types for strict name and digest parsing
//!
//! The total parsing functions never fail. These errors are only produced by
//! the strict entry points (`FromStr`, [`Name::validate`](crate::Name::validate),
//! [`Digest::try_parse`](crate::Digest::try_parse)) so callers can tell which
//! rule a rejected input broke.

use thiserror::Error;

use crate::part::PartKind;

/// Result type alias for strict name operations
pub type Result<T> = std::result::Result<T, NameError>;

/// Reasons a model name fails validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// Neither a model nor a digest part is present
    #[error("name has neither a model nor a digest")]
    Empty,

    /// A separator promised a part that was left empty
    #[error("missing {kind} part")]
    MissingPart { kind: PartKind },

    /// A part breaks its length or character rule
    #[error("invalid {kind} part: {value:?}")]
    InvalidPart { kind: PartKind, value: String },
}

/// Reasons a digest string fails to decode
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DigestError {
    /// No `:` or `-` between type and hash
    #[error("digest has no type separator")]
    MissingSeparator,

    /// The type is not a supported hash family
    #[error("unknown digest type: {0}")]
    UnknownType(String),

    /// The hash is not hexadecimal
    #[error("digest hash is not valid hex")]
    InvalidHex,

    /// The hash decodes to the wrong number of bytes
    #[error("digest hash has {0} hex characters, expected 64")]
    InvalidLength(usize),

    /// The hash is all zeros
    #[error("digest hash is all zeros")]
    ZeroHash,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_error_display() {
        let err = NameError::InvalidPart {
            kind: PartKind::Namespace,
            value: "n".to_string(),
        };
        assert_eq!(err.to_string(), "invalid namespace part: \"n\"");
        assert_eq!(
            NameError::MissingPart { kind: PartKind::Tag }.to_string(),
            "missing tag part"
        );
    }

    #[test]
    fn test_digest_error_display() {
        assert_eq!(
            DigestError::UnknownType("blah".to_string()).to_string(),
            "unknown digest type: blah"
        );
        assert_eq!(
            DigestError::InvalidLength(63).to_string(),
            "digest hash has 63 hex characters, expected 64"
        );
    }
}
