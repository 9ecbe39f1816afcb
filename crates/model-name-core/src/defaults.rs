//! Default name parts
//!
//! Names are usually written short (`llama`, `me/llama:7b`) and completed
//! with a default host, namespace and tag before they are used as an
//! identity. The fixed defaults point at the public registry; deployments
//! that mirror it can load their own [`NameDefaults`] from configuration.

use serde::{Deserialize, Serialize};

use crate::name::Name;

/// Default registry host
pub const DEFAULT_HOST: &str = "registry.ollama.ai";

/// Default namespace
pub const DEFAULT_NAMESPACE: &str = "library";

/// Default tag
pub const DEFAULT_TAG: &str = "latest";

/// Returns a name holding the default host, namespace and tag. The model
/// and digest parts are empty.
pub fn default_name() -> Name {
    NameDefaults::default().to_name()
}

/// Host, namespace and tag used to complete a partial name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameDefaults {
    /// Registry host
    #[serde(default = "default_host")]
    pub host: String,

    /// Namespace
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Tag
    #[serde(default = "default_tag")]
    pub tag: String,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_tag() -> String {
    DEFAULT_TAG.to_string()
}

impl Default for NameDefaults {
    fn default() -> Self {
        Self {
            host: default_host(),
            namespace: default_namespace(),
            tag: default_tag(),
        }
    }
}

impl NameDefaults {
    /// Build the name that [`Name::merge`] takes the defaults from
    pub fn to_name(&self) -> Name {
        Name::default()
            .with_host(&self.host)
            .with_namespace(&self.namespace)
            .with_tag(&self.tag)
    }
}
