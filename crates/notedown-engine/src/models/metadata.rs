use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Cached profile data for one person identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataCache {
    pub pubkey: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub nip05: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    /// Unix timestamp of when this entry was fetched.
    #[serde(default)]
    pub loaded: u64,
}

impl MetadataCache {
    /// The name to show for this profile, if it has any.
    pub fn best_name(&self) -> Option<&str> {
        self.display_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.name.as_deref().filter(|n| !n.is_empty()))
    }
}

/// Read-only profile lookup keyed by person identifier (hex pubkey).
pub type UserMetadata = HashMap<String, MetadataCache>;
