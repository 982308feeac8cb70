use regex::Regex;
use std::sync::OnceLock;

/// The fixed set of recognizers the pipeline splits text with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// `#[<digits>]` placeholder referring to a tag by index.
    Mention,
    Url,
    /// Lightning invoice (`lnbc...`).
    Invoice,
    Hashtag,
}

/// One piece of a split string. Concatenating all pieces of a split
/// reproduces the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece<'a> {
    pub text: &'a str,
    /// The piece matched the pattern and passed its predicate.
    pub matched: bool,
}

impl<'a> Piece<'a> {
    pub fn literal(text: &'a str) -> Self {
        Self {
            text,
            matched: false,
        }
    }
}

impl Pattern {
    /// The order the pipeline applies the patterns in.
    pub const PIPELINE_ORDER: [Pattern; 4] = [
        Pattern::Mention,
        Pattern::Url,
        Pattern::Invoice,
        Pattern::Hashtag,
    ];

    pub fn regex(self) -> &'static Regex {
        static MENTION: OnceLock<Regex> = OnceLock::new();
        static URL: OnceLock<Regex> = OnceLock::new();
        static INVOICE: OnceLock<Regex> = OnceLock::new();
        static HASHTAG: OnceLock<Regex> = OnceLock::new();

        match self {
            Pattern::Mention => MENTION
                .get_or_init(|| Regex::new(r"#\[[0-9]+\]").expect("Invalid mention regex")),
            Pattern::Url => URL.get_or_init(|| {
                Regex::new(
                    r"(?i)(?:http|ftp|https)://[A-Za-z0-9_+?.]+(?:[a-zA-Z0-9~!@#$%^&*()_\-=+\\/?.:;',]*)?[-A-Za-z0-9+&@#/%=~_|]",
                )
                .expect("Invalid URL regex")
            }),
            Pattern::Invoice => INVOICE
                .get_or_init(|| Regex::new(r"(?i)lnbc[A-Za-z0-9_]+").expect("Invalid invoice regex")),
            Pattern::Hashtag => HASHTAG.get_or_init(|| {
                Regex::new(r#"#[^\s!@#$%^&*()=+./,\[{\]};:'"?><]+"#).expect("Invalid hashtag regex")
            }),
        }
    }

    /// Predicate a regex match must also satisfy to be annotated.
    ///
    /// The URL regex also accepts `ftp://` and is case-insensitive, but only
    /// pieces starting with a lowercase `http` become links.
    pub fn accepts(self, piece: &str) -> bool {
        match self {
            Pattern::Mention => true,
            Pattern::Url => piece.starts_with("http"),
            Pattern::Invoice => piece.to_lowercase().starts_with("lnbc"),
            Pattern::Hashtag => piece.starts_with('#'),
        }
    }

    /// Splits `text` into alternating literal and matched pieces, in order.
    ///
    /// A string without matches comes back as a single literal piece (even
    /// when empty). Otherwise empty literals around matches are dropped.
    pub fn split(self, text: &str) -> Vec<Piece<'_>> {
        let mut pieces = Vec::new();
        let mut last = 0;

        for m in self.regex().find_iter(text) {
            if m.start() > last {
                pieces.push(Piece::literal(&text[last..m.start()]));
            }
            pieces.push(Piece {
                text: m.as_str(),
                matched: self.accepts(m.as_str()),
            });
            last = m.end();
        }

        if pieces.is_empty() {
            return vec![Piece::literal(text)];
        }
        if last < text.len() {
            pieces.push(Piece::literal(&text[last..]));
        }
        pieces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn matched(pattern: Pattern, text: &str) -> Vec<String> {
        pattern
            .split(text)
            .into_iter()
            .filter(|p| p.matched)
            .map(|p| p.text.to_string())
            .collect()
    }

    #[rstest]
    #[case(Pattern::Url, "see https://example.com now", vec!["https://example.com"])]
    #[case(Pattern::Url, "(https://example.com/path).", vec!["https://example.com/path"])]
    #[case(Pattern::Url, "[a link](http://x.test/ )", vec!["http://x.test/"])]
    #[case(Pattern::Url, "a http://a.test b https://b.test?q=1", vec!["http://a.test", "https://b.test?q=1"])]
    #[case(Pattern::Url, "ftp://files.test/x", vec![])]
    #[case(Pattern::Url, "HTTPS://LOUD.TEST", vec![])]
    #[case(Pattern::Mention, "hi #[0] and #[12]", vec!["#[0]", "#[12]"])]
    #[case(Pattern::Mention, "#[x] #[] #[1", vec![])]
    #[case(Pattern::Invoice, "pay LNBC10u1abc please", vec!["LNBC10u1abc"])]
    #[case(Pattern::Hashtag, "#nostr and #rust-lang!", vec!["#nostr", "#rust-lang"])]
    #[case(Pattern::Hashtag, "a # b", vec![])]
    fn finds_expected_matches(
        #[case] pattern: Pattern,
        #[case] text: &str,
        #[case] expected: Vec<&str>,
    ) {
        assert_eq!(matched(pattern, text), expected);
    }

    #[rstest]
    #[case(Pattern::Url, "x https://a.test y https://b.test")]
    #[case(Pattern::Mention, "#[0]#[1] tail")]
    #[case(Pattern::Hashtag, "#a #b #c")]
    #[case(Pattern::Invoice, "lnbc1 lnbc2")]
    fn split_is_lossless(#[case] pattern: Pattern, #[case] text: &str) {
        let joined: String = pattern.split(text).iter().map(|p| p.text).collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn no_match_returns_whole_string() {
        assert_eq!(Pattern::Url.split("plain"), vec![Piece::literal("plain")]);
        assert_eq!(Pattern::Url.split(""), vec![Piece::literal("")]);
    }

    #[test]
    fn empty_pieces_around_matches_are_dropped() {
        let pieces = Pattern::Mention.split("#[0]");
        assert_eq!(
            pieces,
            vec![Piece {
                text: "#[0]",
                matched: true
            }]
        );
    }

    #[test]
    fn whitespace_literal_survives() {
        let pieces = Pattern::Hashtag.split("#a  #b");
        assert_eq!(pieces[1], Piece::literal("  "));
    }

    #[test]
    fn rejected_match_stays_literal() {
        let pieces = Pattern::Url.split("get ftp://files.test");
        assert!(pieces.iter().all(|p| !p.matched));
    }

    #[test]
    fn mentions_run_before_hashtags() {
        assert_eq!(
            Pattern::PIPELINE_ORDER,
            [
                Pattern::Mention,
                Pattern::Url,
                Pattern::Invoice,
                Pattern::Hashtag
            ]
        );
    }
}
