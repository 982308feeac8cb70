use super::fragment::{Element, Fragment};
use super::patterns::Pattern;
use super::resolver::{DEFAULT_EVENT_LABEL_LEN, ReferenceResolver};
use crate::models::{Tag, UserMetadata};

/// What a block renderer hands to the pipeline: the block's children plus
/// the document-wide tag list and profile lookup.
///
/// `tags` and `users` are borrowed, so every block of a document shares the
/// same instances.
#[derive(Debug)]
pub struct TextFragmentContext<'a> {
    pub body: Vec<Fragment>,
    pub tags: &'a [Tag],
    pub users: &'a UserMetadata,
}

impl<'a> TextFragmentContext<'a> {
    pub fn new(body: Vec<Fragment>, tags: &'a [Tag], users: &'a UserMetadata) -> Self {
        Self { body, tags, users }
    }
}

/// Runs the extraction passes over a fragment sequence.
#[derive(Debug, Clone)]
pub struct FragmentPipeline<'a> {
    creator: &'a str,
    event_label_len: usize,
}

impl<'a> FragmentPipeline<'a> {
    /// `creator` is the author of the post being rendered; links carry it.
    pub fn new(creator: &'a str) -> Self {
        Self {
            creator,
            event_label_len: DEFAULT_EVENT_LABEL_LEN,
        }
    }

    pub fn with_event_label_len(mut self, len: usize) -> Self {
        self.event_label_len = len;
        self
    }

    pub fn creator(&self) -> &'a str {
        self.creator
    }

    /// Runs one pass per pattern in [`Pattern::PIPELINE_ORDER`].
    pub fn process(&self, frag: TextFragmentContext<'_>) -> Vec<Fragment> {
        let resolver = ReferenceResolver::new(frag.tags).with_event_label_len(self.event_label_len);
        Pattern::PIPELINE_ORDER
            .into_iter()
            .fold(frag.body, |fragments, pattern| {
                split_pass(fragments, pattern, |piece| {
                    self.annotate(pattern, piece, &resolver)
                })
            })
    }

    fn annotate(
        &self,
        pattern: Pattern,
        piece: &str,
        resolver: &ReferenceResolver<'_>,
    ) -> Option<Element> {
        match pattern {
            Pattern::Mention => resolver.resolve(piece),
            Pattern::Url => Some(Element::Hyperlink {
                url: piece.to_string(),
                creator: self.creator.to_string(),
            }),
            Pattern::Invoice => Some(Element::Invoice {
                invoice: piece.to_string(),
            }),
            Pattern::Hashtag => Some(Element::Hashtag {
                tag: piece[1..].to_string(),
                source: piece.to_string(),
            }),
        }
    }
}

/// Convenience wrapper running the whole pipeline over `fragments`.
pub fn process(
    fragments: Vec<Fragment>,
    tags: &[Tag],
    users: &UserMetadata,
    creator: &str,
) -> Vec<Fragment> {
    FragmentPipeline::new(creator).process(TextFragmentContext::new(fragments, tags, users))
}

/// Joins per-fragment results into one sequence. Flattens exactly one level:
/// fragments nested inside markup are left where they are.
pub fn flatten(nested: impl IntoIterator<Item = Vec<Fragment>>) -> Vec<Fragment> {
    nested.into_iter().flatten().collect()
}

/// Splits every text fragment with `pattern`, handing matched pieces to
/// `annotate`. Non-text fragments pass through untouched.
fn split_pass<F>(fragments: Vec<Fragment>, pattern: Pattern, annotate: F) -> Vec<Fragment>
where
    F: Fn(&str) -> Option<Element>,
{
    flatten(fragments.into_iter().map(|f| match f {
        Fragment::Text(text) => split_text(&text, pattern, &annotate),
        other => vec![other],
    }))
}

fn split_text<F>(text: &str, pattern: Pattern, annotate: &F) -> Vec<Fragment>
where
    F: Fn(&str) -> Option<Element>,
{
    pattern
        .split(text)
        .into_iter()
        .map(|piece| {
            piece
                .matched
                .then(|| annotate(piece.text))
                .flatten()
                .map(Fragment::Element)
                .unwrap_or_else(|| Fragment::text(piece.text))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TagKind;
    use crate::text::Markup;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const CREATOR: &str = "f00d";

    fn run(text: &str, tags: &[Tag]) -> Vec<Fragment> {
        process(vec![Fragment::text(text)], tags, &UserMetadata::new(), CREATOR)
    }

    fn link(url: &str) -> Fragment {
        Element::Hyperlink {
            url: url.to_string(),
            creator: CREATOR.to_string(),
        }
        .into()
    }

    #[test]
    fn mention_and_link() {
        let tags = vec![Tag::person(0, "abc123")];
        let out = run("hello #[0] check https://example.com", &tags);
        assert_eq!(
            out,
            vec![
                Fragment::text("hello "),
                Element::Mention {
                    pubkey: "abc123".to_string(),
                    source: "#[0]".to_string(),
                }
                .into(),
                Fragment::text(" check "),
                link("https://example.com"),
            ]
        );
    }

    #[test]
    fn invoice() {
        let invoice = "lnbc1pvjluezpp5qqqsyqcyq5rqwzqfqqqsyqcyq5rqwzqfqqqsyqcyq5rqwzqfqypq";
        let out = run(&format!("pay {invoice}"), &[]);
        assert_eq!(
            out,
            vec![
                Fragment::text("pay "),
                Element::Invoice {
                    invoice: invoice.to_string()
                }
                .into(),
            ]
        );
    }

    #[test]
    fn unresolved_reference_with_empty_tags() {
        let out = run("see #[5]", &[]);
        assert_eq!(
            out,
            vec![
                Fragment::text("see "),
                Element::Unresolved {
                    placeholder: "#[5]".to_string()
                }
                .into(),
            ]
        );
    }

    #[test]
    fn placeholder_resolves_before_raw_hashtags() {
        let tags = vec![Tag::topic(0, "bitcoin")];
        let out = run("#[0] and #nostr", &tags);
        assert_eq!(
            out,
            vec![
                Element::Hashtag {
                    tag: "bitcoin".to_string(),
                    source: "#[0]".to_string(),
                }
                .into(),
                Fragment::text(" and "),
                Element::Hashtag {
                    tag: "nostr".to_string(),
                    source: "#nostr".to_string(),
                }
                .into(),
            ]
        );
    }

    #[test]
    fn unresolved_marker_is_not_split_as_hashtag() {
        let out = run("#[3]", &[]);
        assert_eq!(out.len(), 1);
        assert!(matches!(
            out[0],
            Fragment::Element(Element::Unresolved { .. })
        ));
    }

    #[test]
    fn url_fragments_are_not_rescanned_for_hashtags() {
        let out = run("https://example.com/#anchor", &[]);
        assert_eq!(out, vec![link("https://example.com/#anchor")]);
    }

    #[rstest]
    #[case("just some words")]
    #[case("")]
    #[case("   ")]
    #[case("price: 5$ (approx)")]
    fn text_without_matches_is_unchanged(#[case] text: &str) {
        assert_eq!(run(text, &[]), vec![Fragment::text(text)]);
    }

    #[rstest]
    #[case("hello #[0] check https://example.com")]
    #[case("#tag1 #tag2 lnbc1abc https://a.test/x?y=1 #[9] end")]
    #[case("#[0]#[1]#[2]")]
    fn sources_reassemble_the_input(#[case] text: &str) {
        let tags = vec![
            Tag::person(0, "aa"),
            Tag::topic(1, "t"),
            Tag::new(
                2,
                TagKind::Other {
                    key: "x".to_string(),
                },
            ),
        ];
        let out = run(text, &tags);
        let joined: String = out.iter().filter_map(Fragment::source).collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn every_placeholder_yields_one_element() {
        let tags = vec![Tag::person(0, "aa"), Tag::event(1, "bb"), Tag::topic(2, "cc")];
        let out = run("#[0] #[1] #[2] #[3] #[4]", &tags);
        let elements: Vec<&Element> = out
            .iter()
            .filter_map(|f| match f {
                Fragment::Element(e) => Some(e),
                _ => None,
            })
            .collect();
        assert_eq!(elements.len(), 5);
        assert!(matches!(elements[0], Element::Mention { .. }));
        assert!(matches!(elements[1], Element::EventRef { .. }));
        assert!(matches!(elements[2], Element::Hashtag { .. }));
        assert!(matches!(elements[3], Element::Unresolved { .. }));
        assert!(matches!(elements[4], Element::Unresolved { .. }));
    }

    #[test]
    fn non_text_fragments_pass_through() {
        let strong = Fragment::Markup(Markup::Strong(vec![Fragment::text("#[0] https://a.test")]));
        let out = process(
            vec![strong.clone(), Fragment::text(" #x")],
            &[],
            &UserMetadata::new(),
            CREATOR,
        );
        assert_eq!(
            out,
            vec![
                strong,
                Fragment::text(" "),
                Element::Hashtag {
                    tag: "x".to_string(),
                    source: "#x".to_string(),
                }
                .into(),
            ]
        );
    }

    #[test]
    fn processing_is_deterministic() {
        let tags = vec![Tag::person(0, "aa")];
        let text = "#[0] https://a.test #b lnbc1x";
        assert_eq!(run(text, &tags), run(text, &tags));
    }

    #[test]
    fn flatten_is_single_level() {
        let inner = Fragment::Markup(Markup::Group(vec![Fragment::text("a")]));
        let out = flatten(vec![vec![Fragment::text("x")], vec![inner.clone()], vec![]]);
        assert_eq!(out, vec![Fragment::text("x"), inner]);
    }
}
