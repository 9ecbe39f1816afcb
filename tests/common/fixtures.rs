//! Test fixtures
//!
//! Strategies that generate name parts which always pass their part rule,
//! plus free-form input over the name alphabet for totality checks.

use proptest::prelude::*;

pub const VALID_SHA256_HEX: &str =
    "abcdef0123456789abcdef0123456789abcdef0123456789abcdef0123456789";

/// Host without a port
pub fn host() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9_.-]{0,30}"
}

/// Host with a port, e.g. `localhost:5000`
pub fn host_with_port() -> impl Strategy<Value = String> {
    ("[a-zA-Z0-9][a-zA-Z0-9_.-]{0,20}", 1u16..=u16::MAX)
        .prop_map(|(h, port)| format!("{h}:{port}"))
}

pub fn namespace() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9_-]{1,30}"
}

pub fn model() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9_.-]{1,30}"
}

pub fn tag() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9_.-]{0,30}"
}

/// Raw digest in the `type-hex` form, which passes the raw digest rule
pub fn raw_digest() -> impl Strategy<Value = String> {
    prop::array::uniform32(any::<u8>()).prop_map(|hash| format!("sha256-{}", hex::encode(hash)))
}

/// A well-formed name string: optional host (only with a namespace),
/// optional namespace, model, optional tag and optional digest
pub fn name_string() -> impl Strategy<Value = String> {
    (
        prop::option::of((prop::option::of(host()), namespace())),
        model(),
        prop::option::of(tag()),
        prop::option::of(raw_digest()),
    )
        .prop_map(|(prefix, model, tag, digest)| {
            let mut s = String::new();
            if let Some((host, namespace)) = prefix {
                if let Some(host) = host {
                    s.push_str(&host);
                    s.push('/');
                }
                s.push_str(&namespace);
                s.push('/');
            }
            s.push_str(&model);
            if let Some(tag) = tag {
                s.push(':');
                s.push_str(&tag);
            }
            if let Some(digest) = digest {
                s.push('@');
                s.push_str(&digest);
            }
            s
        })
}

/// Free-form input biased towards separators and edge characters
pub fn noisy_string() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        "[a-zA-Z0-9_.:/@!-]{0,60}",
        "[a/:@.-]{0,12}",
    ]
}
