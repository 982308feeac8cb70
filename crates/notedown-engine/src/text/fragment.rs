use serde::Serialize;

/// A unit of rendered content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fragment {
    /// Literal text, still eligible for splitting.
    Text(String),
    /// An element produced by the fragment pipeline.
    Element(Element),
    /// Structure produced by the markdown layer. Opaque to the pipeline.
    Markup(Markup),
}

impl Fragment {
    pub fn text(s: impl Into<String>) -> Self {
        Fragment::Text(s.into())
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Fragment::Text(_))
    }

    /// The slice of source text this fragment stands for. `None` for markup.
    pub fn source(&self) -> Option<&str> {
        match self {
            Fragment::Text(s) => Some(s),
            Fragment::Element(e) => Some(e.source()),
            Fragment::Markup(_) => None,
        }
    }
}

impl From<&str> for Fragment {
    fn from(s: &str) -> Self {
        Fragment::Text(s.to_string())
    }
}

impl From<String> for Fragment {
    fn from(s: String) -> Self {
        Fragment::Text(s)
    }
}

impl From<Element> for Fragment {
    fn from(e: Element) -> Self {
        Fragment::Element(e)
    }
}

impl From<Markup> for Fragment {
    fn from(m: Markup) -> Self {
        Fragment::Markup(m)
    }
}

/// An annotated entity found in the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    Hyperlink {
        url: String,
        /// Author of the post the link appears in.
        creator: String,
    },
    Mention {
        pubkey: String,
        source: String,
    },
    /// Reference to another event, resolved from an `e` tag.
    EventRef {
        id: String,
        /// Shortened `note1...` encoding of `id`.
        label: String,
        route: String,
        source: String,
    },
    Hashtag {
        /// Topic without the leading `#`.
        tag: String,
        source: String,
    },
    Invoice {
        invoice: String,
    },
    /// A `#[N]` placeholder that could not be resolved.
    Unresolved {
        placeholder: String,
    },
}

impl Element {
    pub fn source(&self) -> &str {
        match self {
            Element::Hyperlink { url, .. } => url,
            Element::Mention { source, .. }
            | Element::EventRef { source, .. }
            | Element::Hashtag { source, .. } => source,
            Element::Invoice { invoice } => invoice,
            Element::Unresolved { placeholder } => placeholder,
        }
    }

    /// Text of the error marker shown for an unresolved placeholder.
    pub fn marker(placeholder: &str) -> String {
        format!("{placeholder}?")
    }
}

/// Block and inline containers produced while rendering the markdown tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "children", rename_all = "snake_case")]
pub enum Markup {
    Paragraph(Vec<Fragment>),
    /// Bare grouping, used for paragraphs that carry annotated elements.
    Group(Vec<Fragment>),
    ListItem(Vec<Fragment>),
    List {
        start: Option<u64>,
        items: Vec<Fragment>,
    },
    Heading {
        level: u8,
        children: Vec<Fragment>,
    },
    BlockQuote(Vec<Fragment>),
    Emphasis(Vec<Fragment>),
    Strong(Vec<Fragment>),
    CodeBlock {
        lang: Option<String>,
        code: String,
    },
    InlineCode(String),
    Image {
        src: String,
        alt: String,
    },
    LineBreak,
    Rule,
}
