use regex::Regex;
use std::sync::OnceLock;

use super::fragment::Element;
use crate::encoding::hex_to_bech32;
use crate::models::{Tag, TagKind};
use crate::routes::event_link;

/// Visible length of an event reference label (`note1...` prefix).
pub const DEFAULT_EVENT_LABEL_LEN: usize = 12;

/// Resolves `#[N]` placeholders against the tag list of one post.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceResolver<'a> {
    tags: &'a [Tag],
    event_label_len: usize,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(tags: &'a [Tag]) -> Self {
        Self {
            tags,
            event_label_len: DEFAULT_EVENT_LABEL_LEN,
        }
    }

    pub fn with_event_label_len(mut self, len: usize) -> Self {
        self.event_label_len = len;
        self
    }

    /// Returns `None` when `placeholder` is not exactly `#[<digits>]`, so the
    /// caller keeps it as literal text. Any well-formed placeholder yields an
    /// element: the referenced entity, or an error marker.
    pub fn resolve(&self, placeholder: &str) -> Option<Element> {
        static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
        let re = PLACEHOLDER
            .get_or_init(|| Regex::new(r"^#\[([0-9]+)\]$").expect("Invalid placeholder regex"));

        let caps = re.captures(placeholder)?;
        // Digits that overflow usize cannot name a tag; they resolve to the marker.
        let index = caps[1].parse::<usize>().ok();
        let tag = index.and_then(|i| self.tags.iter().find(|t| t.index == i));

        let source = placeholder.to_string();
        let element = match tag.map(|t| &t.kind) {
            Some(TagKind::Person { pubkey, .. }) => Element::Mention {
                pubkey: pubkey.clone().unwrap_or_default(),
                source,
            },
            Some(TagKind::Event { id, .. }) => {
                let id = id.clone().unwrap_or_default();
                let label = hex_to_bech32("note", &id)
                    .chars()
                    .take(self.event_label_len)
                    .collect();
                let route = event_link(&id);
                Element::EventRef {
                    id,
                    label,
                    route,
                    source,
                }
            }
            Some(TagKind::Topic { hashtag }) => Element::Hashtag {
                tag: hashtag.clone().unwrap_or_default(),
                source,
            },
            Some(TagKind::Other { key }) => {
                log::debug!("placeholder {placeholder} points at unsupported tag {key:?}");
                Element::Unresolved {
                    placeholder: source,
                }
            }
            None => {
                log::debug!("placeholder {placeholder} has no matching tag");
                Element::Unresolved {
                    placeholder: source,
                }
            }
        };
        Some(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const EVENT_ID: &str = "7e7e9c42a91bfef19fa929e5fda1b72e0ebc1a4c1141673e2794234d86addf4e";

    fn tags() -> Vec<Tag> {
        vec![
            Tag::person(0, "abc123"),
            Tag::event(1, EVENT_ID),
            Tag::topic(2, "nostr"),
            Tag::new(
                3,
                TagKind::Other {
                    key: "d".to_string(),
                },
            ),
        ]
    }

    #[test]
    fn person_tag_becomes_mention() {
        let tags = tags();
        let resolved = ReferenceResolver::new(&tags).resolve("#[0]");
        assert_eq!(
            resolved,
            Some(Element::Mention {
                pubkey: "abc123".to_string(),
                source: "#[0]".to_string(),
            })
        );
    }

    #[test]
    fn event_tag_becomes_short_reference() {
        let tags = tags();
        let Some(Element::EventRef {
            id, label, route, ..
        }) = ReferenceResolver::new(&tags).resolve("#[1]")
        else {
            panic!("expected EventRef");
        };
        assert_eq!(id, EVENT_ID);
        assert_eq!(label.len(), 12);
        assert!(label.starts_with("note1"));
        assert!(route.starts_with("/e/"));
        assert!(route[3..].starts_with(&label));
    }

    #[test]
    fn label_length_is_configurable() {
        let tags = tags();
        let resolved = ReferenceResolver::new(&tags)
            .with_event_label_len(8)
            .resolve("#[1]");
        assert!(matches!(resolved, Some(Element::EventRef { label, .. }) if label.len() == 8));
    }

    #[test]
    fn topic_tag_becomes_hashtag() {
        let tags = tags();
        assert_eq!(
            ReferenceResolver::new(&tags).resolve("#[2]"),
            Some(Element::Hashtag {
                tag: "nostr".to_string(),
                source: "#[2]".to_string(),
            })
        );
    }

    #[rstest]
    #[case("#[3]")]
    #[case("#[4]")]
    #[case("#[99999999999999999999999999]")]
    fn unresolvable_placeholder_is_marked(#[case] placeholder: &str) {
        let tags = tags();
        assert_eq!(
            ReferenceResolver::new(&tags).resolve(placeholder),
            Some(Element::Unresolved {
                placeholder: placeholder.to_string()
            })
        );
    }

    #[rstest]
    #[case("#[a]")]
    #[case("x#[0]")]
    #[case("#[0] ")]
    #[case("hello")]
    fn malformed_placeholder_is_literal(#[case] text: &str) {
        let tags = tags();
        assert_eq!(ReferenceResolver::new(&tags).resolve(text), None);
    }

    #[test]
    fn missing_payload_defaults_to_empty() {
        let tags = vec![Tag::from_raw(0, &["p".to_string()])];
        assert_eq!(
            ReferenceResolver::new(&tags).resolve("#[0]"),
            Some(Element::Mention {
                pubkey: String::new(),
                source: "#[0]".to_string(),
            })
        );
    }

    #[test]
    fn lookup_uses_tag_index_not_position() {
        let tags = vec![Tag::topic(7, "late")];
        assert!(matches!(
            ReferenceResolver::new(&tags).resolve("#[7]"),
            Some(Element::Hashtag { .. })
        ));
        assert!(matches!(
            ReferenceResolver::new(&tags).resolve("#[0]"),
            Some(Element::Unresolved { .. })
        ));
    }
}
