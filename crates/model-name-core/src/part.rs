//! Name parts and their validation rules
//!
//! A model name is made of up to five parts. Each part kind has its own
//! length bounds and character set; this module holds those rules so they
//! can be applied to a whole [`Name`](crate::Name) or to a single part while
//! a name is being built up incrementally.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder for a part that was promised by a separator but left empty,
/// as in `"namespace/"` or `"model:"`.
///
/// It is never a legal part: `!` fails every part rule, so a name holding
/// it is always invalid. The value is also easy to spot in logs.
pub const MISSING_PART: &str = "!MISSING!";

/// The kinds of parts that make up a model name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartKind {
    /// Registry host, optionally with a port (`registry.example.com:5000`)
    Host,
    /// Namespace (user or organization)
    Namespace,
    /// Model name
    Model,
    /// Tag (`latest`, `7b`, ...)
    Tag,
    /// Raw digest string, not yet decoded
    Digest,
}

impl PartKind {
    /// All part kinds, in the order they appear in a formatted name
    pub const ALL: [PartKind; 5] = [
        PartKind::Host,
        PartKind::Namespace,
        PartKind::Model,
        PartKind::Tag,
        PartKind::Digest,
    ];

    /// Get the string representation of the part kind
    pub fn as_str(&self) -> &'static str {
        match self {
            PartKind::Host => "host",
            PartKind::Namespace => "namespace",
            PartKind::Model => "model",
            PartKind::Tag => "tag",
            PartKind::Digest => "digest",
        }
    }

    /// Inclusive length bounds, in bytes
    pub fn len_bounds(&self) -> (usize, usize) {
        match self {
            PartKind::Host => (1, 350),
            PartKind::Tag => (1, 80),
            PartKind::Namespace | PartKind::Model | PartKind::Digest => (2, 80),
        }
    }

    /// Check whether `s` is a valid part of this kind.
    ///
    /// Every part must start with an ASCII alphanumeric character. After
    /// that, `_` and `-` are always allowed, `.` is allowed everywhere but
    /// the namespace, and `:` only in the host.
    pub fn is_valid(&self, s: &str) -> bool {
        if !self.is_valid_len(s) {
            return false;
        }

        let bytes = s.as_bytes();
        if !is_alphanumeric(bytes[0]) {
            return false;
        }

        bytes[1..].iter().all(|&c| match c {
            b'_' | b'-' => true,
            b'.' => *self != PartKind::Namespace,
            b':' => *self == PartKind::Host,
            _ => is_alphanumeric(c),
        })
    }

    fn is_valid_len(&self, s: &str) -> bool {
        let (min, max) = self.len_bounds();
        (min..=max).contains(&s.len())
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn is_alphanumeric(c: u8) -> bool {
    c.is_ascii_alphanumeric()
}

/// Returns true if `namespace` and `model` are valid namespace and model
/// parts, respectively.
///
/// Useful for validating a name while it is being typed. For non-empty
/// arguments it is equivalent to checking a [`Name`](crate::Name) holding
/// only these two parts. An empty namespace fails here, while a `Name`
/// treats it as absent. To check just one of them, pass a placeholder such
/// as `"xx"` for the other.
pub fn is_valid_short(namespace: &str, model: &str) -> bool {
    PartKind::Namespace.is_valid(namespace) && PartKind::Model.is_valid(model)
}
