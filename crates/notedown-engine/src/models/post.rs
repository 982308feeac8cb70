use serde::{Deserialize, Serialize};

use super::Tag;

/// The subset of a nostr event needed to render its body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Post {
    /// Author identifier (hex).
    pub pubkey: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<Vec<String>>,
}

impl Post {
    pub fn parsed_tags(&self) -> Vec<Tag> {
        Tag::parse_all(&self.tags)
    }
}
