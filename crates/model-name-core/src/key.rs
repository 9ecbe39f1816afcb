//! Case-insensitive map keys

use std::hash::{Hash, Hasher};

use crate::name::Name;

/// A [`Name`] that hashes and compares its parts ignoring ASCII case.
///
/// `Name` itself compares exactly. Wrap it in a `NameKey` to use it in a
/// `HashMap` or `HashSet` where `Llama` and `llama` must be the same entry.
#[derive(Debug, Clone)]
pub struct NameKey(Name);

impl NameKey {
    pub fn new(name: Name) -> Self {
        Self(name)
    }

    /// Get the wrapped name, with its original case
    pub fn name(&self) -> &Name {
        &self.0
    }

    pub fn into_inner(self) -> Name {
        self.0
    }
}

impl From<Name> for NameKey {
    fn from(name: Name) -> Self {
        Self(name)
    }
}

impl PartialEq for NameKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.equal(&other.0)
    }
}

impl Eq for NameKey {}

impl Hash for NameKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash_lowercase(state);
    }
}
