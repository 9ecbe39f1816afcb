//! Model names
//!
//! A model name has the form `[host/][namespace/]model[:tag][@digest]`.
//! Parsing is total: every input string produces a [`Name`], and only
//! [`Name::is_valid`] decides whether that name can be trusted as an
//! identity. Formatting a valid name gives back exactly the string it was
//! parsed from.

use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hasher};
use std::str::FromStr;
use tracing::debug;

use crate::defaults::{default_name, NameDefaults};
use crate::digest::{parse_digest, Digest};
use crate::error::{NameError, Result};
use crate::part::{PartKind, MISSING_PART};

/// Structured model name.
///
/// Any part may be empty, and a parsed name may be invalid. Parts keep the
/// case they were given in; [`Name::equal`] and [`Name::map_hash`] compare
/// them case-insensitively, while `==` compares them exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Name {
    host: String,
    namespace: String,
    model: String,
    tag: String,
    raw_digest: String,
}

/// Parse a name and fill in missing host, namespace and tag from
/// [`default_name`].
pub fn parse_name(s: &str) -> Name {
    parse_name_no_defaults(s).merge(&default_name())
}

/// Parse a name and fill in missing parts from the given defaults
pub fn parse_name_with(s: &str, defaults: &NameDefaults) -> Name {
    parse_name_no_defaults(s).merge(&defaults.to_name())
}

/// Parse a name without applying any defaults.
///
/// The string is cut from the right: first at the last `@` (digest), then
/// at the last `:` (tag), then at the last two `/` (model, namespace), and
/// whatever is left is the host. A separator with nothing on one side puts
/// [`MISSING_PART`] on that side, except for the name before a digest,
/// which may be absent.
///
/// The result is not guaranteed to be valid.
pub fn parse_name_no_defaults(s: &str) -> Name {
    let mut name = Name::default();

    let rest = match s.rsplit_once('@') {
        Some((rest, digest)) => {
            name.raw_digest = or_missing(digest).to_string();
            rest
        }
        None => s,
    };

    let rest = match cut_promised(rest, ':') {
        Some((rest, tag)) => {
            name.tag = tag.to_string();
            rest
        }
        None => rest,
    };

    let Some((rest, model)) = cut_promised(rest, '/') else {
        name.model = rest.to_string();
        return name;
    };
    name.model = model.to_string();

    let Some((rest, namespace)) = cut_promised(rest, '/') else {
        name.namespace = rest.to_string();
        return name;
    };
    name.namespace = namespace.to_string();
    name.host = rest.to_string();

    name
}

/// Cut `s` at the last `sep`, replacing an empty side with [`MISSING_PART`]
fn cut_promised(s: &str, sep: char) -> Option<(&str, &str)> {
    s.rsplit_once(sep)
        .map(|(before, after)| (or_missing(before), or_missing(after)))
}

fn or_missing(part: &str) -> &str {
    if part.is_empty() {
        MISSING_PART
    } else {
        part
    }
}

static MAP_HASH_SEED: Lazy<RandomState> = Lazy::new(RandomState::new);

impl Name {
    /// Set the host part
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the namespace part
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the model part
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the tag part
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Set the raw digest part
    pub fn with_raw_digest(mut self, raw_digest: impl Into<String>) -> Self {
        self.raw_digest = raw_digest.into();
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn raw_digest(&self) -> &str {
        &self.raw_digest
    }

    /// Decode the raw digest part. Returns the zero digest if it is absent
    /// or malformed.
    pub fn digest(&self) -> Digest {
        parse_digest(&self.raw_digest)
    }

    /// All parts paired with their kind, in formatting order
    pub fn parts(&self) -> [(PartKind, &str); 5] {
        [
            (PartKind::Host, self.host.as_str()),
            (PartKind::Namespace, self.namespace.as_str()),
            (PartKind::Model, self.model.as_str()),
            (PartKind::Tag, self.tag.as_str()),
            (PartKind::Digest, self.raw_digest.as_str()),
        ]
    }

    /// Fill the host, namespace and tag from `other` where they are empty.
    /// The model and digest are never taken from `other`.
    pub fn merge(mut self, other: &Name) -> Self {
        if self.host.is_empty() {
            self.host = other.host.clone();
        }
        if self.namespace.is_empty() {
            self.namespace = other.namespace.clone();
        }
        if self.tag.is_empty() {
            self.tag = other.tag.clone();
        }
        self
    }

    /// Check the name, reporting the first rule it breaks.
    ///
    /// A name needs a model or a digest, and every non-empty part must pass
    /// the rule for its kind (see [`PartKind::is_valid`]).
    pub fn validate(&self) -> Result<()> {
        if self.model.is_empty() && self.raw_digest.is_empty() {
            return Err(NameError::Empty);
        }
        for (kind, part) in self.parts() {
            if part.is_empty() {
                continue;
            }
            if part == MISSING_PART {
                return Err(NameError::MissingPart { kind });
            }
            if !kind.is_valid(part) {
                return Err(NameError::InvalidPart {
                    kind,
                    value: part.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns true if the name has a model or digest and all set parts are
    /// valid
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Case-insensitive hash of all parts, for use as an in-memory map key.
    ///
    /// The hash is seeded once per process. It is stable within a run but
    /// must never be persisted or sent to another process.
    pub fn map_hash(&self) -> u64 {
        let mut hasher = MAP_HASH_SEED.build_hasher();
        self.hash_lowercase(&mut hasher);
        hasher.finish()
    }

    /// Returns true if both names have the same parts, ignoring ASCII case
    pub fn equal(&self, other: &Name) -> bool {
        self.parts()
            .into_iter()
            .zip(other.parts())
            .all(|((_, a), (_, b))| a.eq_ignore_ascii_case(b))
    }

    pub(crate) fn hash_lowercase<H: Hasher>(&self, state: &mut H) {
        for (_, part) in self.parts() {
            for b in part.bytes() {
                state.write_u8(b.to_ascii_lowercase());
            }
            // 0xff never occurs in UTF-8, so parts cannot run together
            state.write_u8(0xff);
        }
    }
}

/// Formats the name as `[host/][namespace/]model[:tag][@digest]`.
///
/// Invalid names format as the empty string.
impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return Ok(());
        }
        if !self.host.is_empty() {
            write!(f, "{}/", self.host)?;
        }
        if !self.namespace.is_empty() {
            write!(f, "{}/", self.namespace)?;
        }
        f.write_str(&self.model)?;
        if !self.tag.is_empty() {
            write!(f, ":{}", self.tag)?;
        }
        if !self.raw_digest.is_empty() {
            write!(f, "@{}", self.raw_digest)?;
        }
        Ok(())
    }
}

/// Strict parse without defaults: fails unless the parsed name is valid
impl FromStr for Name {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self> {
        let name = parse_name_no_defaults(s);
        if let Err(err) = name.validate() {
            debug!(input = s, error = %err, "rejected model name");
            return Err(err);
        }
        Ok(name)
    }
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.validate().map_err(serde::ser::Error::custom)?;
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
