//! Model names and content digests
//!
//! This crate parses, validates and formats model names of the form
//! `[host/][namespace/]model[:tag][@digest]`, and the `type-hex` content
//! digests they may carry. It is the identity layer that registry clients,
//! local stores and caches key their data by.
//!
//! Parsing never fails. Use [`Name::is_valid`] (or the strict `FromStr`
//! impls) before trusting a parsed name as a key.

pub mod defaults;
pub mod digest;
pub mod error;
pub mod key;
pub mod name;
pub mod part;

// Re-exports for convenience
pub use defaults::{default_name, NameDefaults};
pub use digest::{parse_digest, Digest, DigestType};
pub use error::{DigestError, NameError, Result};
pub use key::NameKey;
pub use name::{parse_name, parse_name_no_defaults, parse_name_with, Name};
pub use part::{is_valid_short, PartKind, MISSING_PART};
