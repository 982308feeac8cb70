//! Owned markdown node tree built from pulldown-cmark's offset event stream.

use pulldown_cmark::{CodeBlockKind, Event, LinkType, Options, Parser, Tag};
use std::fmt;
use std::str::FromStr;

use super::span::Span;

/// Node type names, as used by type predicates and configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeType {
    Root,
    Paragraph,
    Heading,
    BlockQuote,
    List,
    ListItem,
    Code,
    Html,
    ThematicBreak,
    Emphasis,
    Strong,
    InlineCode,
    Break,
    Link,
    LinkReference,
    Image,
    ImageReference,
    Definition,
    Text,
    Other,
}

impl NodeType {
    /// Node types the markdown engine would render as links or images.
    pub const LINK_LIKE: [NodeType; 5] = [
        NodeType::Link,
        NodeType::LinkReference,
        NodeType::Image,
        NodeType::ImageReference,
        NodeType::Definition,
    ];

    pub const ALL: [NodeType; 20] = [
        NodeType::Root,
        NodeType::Paragraph,
        NodeType::Heading,
        NodeType::BlockQuote,
        NodeType::List,
        NodeType::ListItem,
        NodeType::Code,
        NodeType::Html,
        NodeType::ThematicBreak,
        NodeType::Emphasis,
        NodeType::Strong,
        NodeType::InlineCode,
        NodeType::Break,
        NodeType::Link,
        NodeType::LinkReference,
        NodeType::Image,
        NodeType::ImageReference,
        NodeType::Definition,
        NodeType::Text,
        NodeType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Root => "root",
            NodeType::Paragraph => "paragraph",
            NodeType::Heading => "heading",
            NodeType::BlockQuote => "blockquote",
            NodeType::List => "list",
            NodeType::ListItem => "listItem",
            NodeType::Code => "code",
            NodeType::Html => "html",
            NodeType::ThematicBreak => "thematicBreak",
            NodeType::Emphasis => "emphasis",
            NodeType::Strong => "strong",
            NodeType::InlineCode => "inlineCode",
            NodeType::Break => "break",
            NodeType::Link => "link",
            NodeType::LinkReference => "linkReference",
            NodeType::Image => "image",
            NodeType::ImageReference => "imageReference",
            NodeType::Definition => "definition",
            NodeType::Text => "text",
            NodeType::Other => "other",
        }
    }

    pub fn is_link_like(self) -> bool {
        Self::LINK_LIKE.contains(&self)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown markdown node type: {0}")]
pub struct ParseNodeTypeError(pub String);

impl FromStr for NodeType {
    type Err = ParseNodeTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseNodeTypeError(s.to_string()))
    }
}

/// Node payload. Leaf text lives in [`Node::value`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Paragraph,
    Heading(u8),
    BlockQuote,
    List { start: Option<u64> },
    ListItem,
    Code { lang: Option<String> },
    Html,
    ThematicBreak,
    Emphasis,
    Strong,
    InlineCode,
    Break,
    Link { href: String, title: String },
    LinkReference { href: String, title: String },
    Image { src: String, title: String },
    ImageReference { src: String, title: String },
    Definition,
    Text,
    Other,
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Root => NodeType::Root,
            NodeKind::Paragraph => NodeType::Paragraph,
            NodeKind::Heading(_) => NodeType::Heading,
            NodeKind::BlockQuote => NodeType::BlockQuote,
            NodeKind::List { .. } => NodeType::List,
            NodeKind::ListItem => NodeType::ListItem,
            NodeKind::Code { .. } => NodeType::Code,
            NodeKind::Html => NodeType::Html,
            NodeKind::ThematicBreak => NodeType::ThematicBreak,
            NodeKind::Emphasis => NodeType::Emphasis,
            NodeKind::Strong => NodeType::Strong,
            NodeKind::InlineCode => NodeType::InlineCode,
            NodeKind::Break => NodeType::Break,
            NodeKind::Link { .. } => NodeType::Link,
            NodeKind::LinkReference { .. } => NodeType::LinkReference,
            NodeKind::Image { .. } => NodeType::Image,
            NodeKind::ImageReference { .. } => NodeType::ImageReference,
            NodeKind::Definition => NodeType::Definition,
            NodeKind::Text => NodeType::Text,
            NodeKind::Other => NodeType::Other,
        }
    }

    fn holds_blocks(&self) -> bool {
        matches!(
            self,
            NodeKind::BlockQuote | NodeKind::List { .. } | NodeKind::ListItem
        )
    }

    /// Kinds whose children are collapsed into a single literal value.
    fn is_literal(&self) -> bool {
        matches!(self, NodeKind::Code { .. } | NodeKind::Html)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub value: Option<String>,
    pub position: Option<Span>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind, position: Option<Span>) -> Self {
        Self {
            kind,
            value: None,
            position,
            children: Vec::new(),
        }
    }

    pub fn leaf(kind: NodeKind, value: impl Into<String>, position: Option<Span>) -> Self {
        Self {
            kind,
            value: Some(value.into()),
            position,
            children: Vec::new(),
        }
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    /// Concatenated text of this node and its descendants.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(v) = &self.value {
            out.push_str(v);
        }
        for c in &self.children {
            c.collect_text(out);
        }
    }

    /// Depth-first, pre-order walk. Nodes the visitor does not want are not
    /// passed to it, but their children still are.
    pub fn walk_mut<V: Visitor>(&mut self, visitor: &mut V) -> Result<(), V::Error> {
        if visitor.wants(self.node_type()) && visitor.visit(self)? == Visit::SkipChildren {
            return Ok(());
        }
        for child in &mut self.children {
            child.walk_mut(visitor)?;
        }
        Ok(())
    }
}

/// What the walk does after visiting a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Continue,
    SkipChildren,
}

pub trait Visitor {
    type Error;

    /// Type predicate; only wanted nodes reach [`Visitor::visit`].
    fn wants(&self, _node_type: NodeType) -> bool {
        true
    }

    fn visit(&mut self, node: &mut Node) -> Result<Visit, Self::Error>;
}

/// Parses `content` as CommonMark into a tree rooted at a `Root` node.
///
/// Link reference definitions are consumed by pulldown-cmark; they are put
/// back as `Definition` nodes where they were written.
pub fn parse(content: &str) -> Node {
    let parser = Parser::new_ext(content, Options::empty());

    let mut definitions: Vec<Span> = parser
        .reference_definitions()
        .iter()
        .map(|(_, def)| trim_end_span(content, def.span.clone().into()))
        .collect();
    definitions.sort();

    let mut builder = TreeBuilder::new(content.len());
    for (event, range) in parser.into_offset_iter() {
        builder.push(event, range.into(), content);
    }

    let mut root = builder.finish();
    for span in definitions {
        insert_definition(&mut root, span);
    }
    root
}

fn trim_end_span(content: &str, span: Span) -> Span {
    match span.slice(content) {
        Some(s) => Span::new(span.start, span.start + s.trim_end().len()),
        None => span,
    }
}

/// Puts a definition back inside the innermost block container holding it,
/// ordered by position among that container's children.
fn insert_definition(parent: &mut Node, span: Span) {
    let container = parent.children.iter().position(|c| {
        c.kind.holds_blocks()
            && c.position
                .is_some_and(|p| p.start <= span.start && span.start < p.end)
    });
    if let Some(i) = container {
        return insert_definition(&mut parent.children[i], span);
    }

    let at = parent
        .children
        .iter()
        .position(|c| c.position.is_some_and(|p| p.start > span.start))
        .unwrap_or(parent.children.len());
    parent
        .children
        .insert(at, Node::new(NodeKind::Definition, Some(span)));
}

struct TreeBuilder {
    stack: Vec<Node>,
}

impl TreeBuilder {
    fn new(len: usize) -> Self {
        Self {
            stack: vec![Node::new(NodeKind::Root, Some(Span::new(0, len)))],
        }
    }

    fn push(&mut self, event: Event<'_>, span: Span, content: &str) {
        match event {
            Event::Start(tag) => self.stack.push(Node::new(node_kind(tag), Some(span))),
            Event::End(_) => self.close(),
            Event::Text(text) => self.push_text(&text, span),
            Event::SoftBreak => self.push_text("\n", span),
            Event::HardBreak => self.append(Node::new(NodeKind::Break, Some(span))),
            Event::Code(code) => {
                self.append(Node::leaf(NodeKind::InlineCode, code.to_string(), Some(span)))
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                self.append(Node::leaf(NodeKind::Html, html.to_string(), Some(span)))
            }
            Event::Rule => self.append(Node::new(NodeKind::ThematicBreak, Some(span))),
            // Extensions are disabled; anything else is kept as its source.
            _ => {
                let source = span.slice(content).unwrap_or_default().to_string();
                self.push_text(&source, span);
            }
        }
    }

    fn close(&mut self) {
        if self.stack.len() < 2 {
            return;
        }
        if let Some(mut node) = self.stack.pop() {
            if node.kind.is_literal() {
                node.value = Some(node.plain_text());
                node.children.clear();
            }
            self.append(node);
        }
    }

    fn append(&mut self, node: Node) {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
        }
    }

    /// Adjacent text and soft breaks form a single text node.
    fn push_text(&mut self, text: &str, span: Span) {
        let Some(parent) = self.stack.last_mut() else {
            return;
        };
        if let Some(last) = parent.children.last_mut()
            && last.kind == NodeKind::Text
        {
            last.value.get_or_insert_with(String::new).push_str(text);
            if let Some(pos) = last.position.as_mut() {
                pos.end = span.end;
            }
            return;
        }
        parent
            .children
            .push(Node::leaf(NodeKind::Text, text, Some(span)));
    }

    fn finish(mut self) -> Node {
        while self.stack.len() > 1 {
            self.close();
        }
        self.stack
            .pop()
            .unwrap_or_else(|| Node::new(NodeKind::Root, None))
    }
}

fn is_reference(link_type: LinkType) -> bool {
    matches!(
        link_type,
        LinkType::Reference
            | LinkType::ReferenceUnknown
            | LinkType::Collapsed
            | LinkType::CollapsedUnknown
            | LinkType::Shortcut
            | LinkType::ShortcutUnknown
    )
}

fn node_kind(tag: Tag<'_>) -> NodeKind {
    match tag {
        Tag::Paragraph => NodeKind::Paragraph,
        Tag::Heading { level, .. } => NodeKind::Heading(level as u8),
        Tag::BlockQuote(_) => NodeKind::BlockQuote,
        Tag::CodeBlock(kind) => NodeKind::Code {
            lang: match kind {
                CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                _ => None,
            },
        },
        Tag::HtmlBlock => NodeKind::Html,
        Tag::List(start) => NodeKind::List { start },
        Tag::Item => NodeKind::ListItem,
        Tag::Emphasis => NodeKind::Emphasis,
        Tag::Strong => NodeKind::Strong,
        Tag::Link {
            link_type,
            dest_url,
            title,
            ..
        } => {
            let href = dest_url.to_string();
            let title = title.to_string();
            if is_reference(link_type) {
                NodeKind::LinkReference { href, title }
            } else {
                NodeKind::Link { href, title }
            }
        }
        Tag::Image {
            link_type,
            dest_url,
            title,
            ..
        } => {
            let src = dest_url.to_string();
            let title = title.to_string();
            if is_reference(link_type) {
                NodeKind::ImageReference { src, title }
            } else {
                NodeKind::Image { src, title }
            }
        }
        _ => NodeKind::Other,
    }
}
