use serde::Serialize;

/// The payload-bearing part of a [`Tag`], keyed by the first element of the
/// raw tag array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TagKind {
    /// `["p", <pubkey>, <relay>?]`
    Person {
        pubkey: Option<String>,
        relay: Option<String>,
    },
    /// `["e", <event-id>, <relay>?, <marker>?]`
    Event {
        id: Option<String>,
        relay: Option<String>,
        marker: Option<String>,
    },
    /// `["t", <topic>]`
    Topic { hashtag: Option<String> },
    /// Any other key (`d`, `delegation`, custom tags...).
    Other { key: String },
}

/// One entry of the side list that accompanies a post.
///
/// Text refers to tags positionally with `#[N]` placeholders, where `N` is
/// the tag's `index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub index: usize,
    pub kind: TagKind,
    /// Set when a person or event tag has no identifier.
    pub invalid: bool,
    /// The raw tag array as received.
    pub original: Vec<String>,
}

impl Tag {
    pub fn new(index: usize, kind: TagKind) -> Self {
        Self {
            index,
            kind,
            invalid: false,
            original: Vec::new(),
        }
    }

    /// Shorthand for a person tag, mostly useful when building tag lists by hand.
    pub fn person(index: usize, pubkey: impl Into<String>) -> Self {
        Self::new(
            index,
            TagKind::Person {
                pubkey: Some(pubkey.into()),
                relay: None,
            },
        )
    }

    pub fn event(index: usize, id: impl Into<String>) -> Self {
        Self::new(
            index,
            TagKind::Event {
                id: Some(id.into()),
                relay: None,
                marker: None,
            },
        )
    }

    pub fn topic(index: usize, hashtag: impl Into<String>) -> Self {
        Self::new(
            index,
            TagKind::Topic {
                hashtag: Some(hashtag.into()),
            },
        )
    }

    /// Builds a tag from its wire form. Never fails: missing fields become
    /// `None` and mark the tag invalid where an identifier is mandatory.
    pub fn from_raw(index: usize, raw: &[String]) -> Self {
        let field = |i: usize| raw.get(i).filter(|s| !s.is_empty()).cloned();
        let key = raw.first().map(String::as_str).unwrap_or_default();

        let kind = match key {
            "p" => TagKind::Person {
                pubkey: field(1),
                relay: field(2),
            },
            "e" => TagKind::Event {
                id: field(1),
                relay: field(2),
                marker: field(3),
            },
            "t" => TagKind::Topic { hashtag: field(1) },
            other => TagKind::Other {
                key: other.to_string(),
            },
        };

        let invalid = matches!(
            kind,
            TagKind::Person { pubkey: None, .. } | TagKind::Event { id: None, .. }
        );

        Self {
            index,
            kind,
            invalid,
            original: raw.to_vec(),
        }
    }

    /// Parses a whole tag list, indexing tags by their position.
    pub fn parse_all(raw: &[Vec<String>]) -> Vec<Tag> {
        raw.iter()
            .enumerate()
            .map(|(i, t)| Tag::from_raw(i, t))
            .collect()
    }
}
