//! Demotes the markdown engine's own link handling back to literal text, so
//! the fragment pipeline is the only thing that ever produces links.

use std::collections::BTreeSet;

use super::tree::{Node, NodeKind, NodeType, Visit, Visitor};
use crate::error::RenderError;

/// Which node types get demoted to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterceptOptions {
    demote: BTreeSet<NodeType>,
}

impl Default for InterceptOptions {
    fn default() -> Self {
        Self {
            demote: NodeType::LINK_LIKE.into_iter().collect(),
        }
    }
}

impl InterceptOptions {
    /// Lets `node_type` through to the markdown renderers untouched.
    pub fn allow(mut self, node_type: NodeType) -> Self {
        self.demote.remove(&node_type);
        self
    }

    pub fn demotes(&self, node_type: NodeType) -> bool {
        self.demote.contains(&node_type)
    }
}

/// Rewrites every link, link reference, image, image reference and
/// definition node (minus any allowed by `options`) into a text node holding
/// its verbatim source slice.
pub fn disable_markdown_links(
    tree: &mut Node,
    content: &str,
    options: &InterceptOptions,
) -> Result<(), RenderError> {
    let mut demoter = LinkDemoter { content, options };
    tree.walk_mut(&mut demoter)
}

struct LinkDemoter<'a> {
    content: &'a str,
    options: &'a InterceptOptions,
}

impl Visitor for LinkDemoter<'_> {
    type Error = RenderError;

    fn wants(&self, node_type: NodeType) -> bool {
        node_type.is_link_like() && self.options.demotes(node_type)
    }

    fn visit(&mut self, node: &mut Node) -> Result<Visit, RenderError> {
        let node_type = node.node_type();
        let span = node
            .position
            .ok_or(RenderError::MissingPosition { node: node_type })?;
        let source = span
            .slice(self.content)
            .ok_or(RenderError::SourceOutOfRange {
                node: node_type,
                start: span.start,
                end: span.end,
                len: self.content.len(),
            })?;

        log::debug!("demoting {node_type} at {}..{} to text", span.start, span.end);
        node.kind = NodeKind::Text;
        node.value = Some(space_trailing_paren(source));
        node.children.clear();
        Ok(Visit::SkipChildren)
    }
}

/// `foo)` becomes `foo )`, keeping a closing paren from gluing onto whatever
/// text the pipeline finds next to it.
fn space_trailing_paren(source: &str) -> String {
    match source.strip_suffix(')') {
        Some(head) => format!("{head} )"),
        None => source.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::span::Span;
    use crate::markdown::tree::parse;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn intercepted(src: &str) -> Node {
        let mut tree = parse(src);
        disable_markdown_links(&mut tree, src, &InterceptOptions::default()).unwrap();
        tree
    }

    #[test]
    fn inline_link_becomes_source_text() {
        let tree = intercepted("[a link](http://x.test/)");
        let node = &tree.children[0].children[0];
        assert_eq!(node.kind, NodeKind::Text);
        assert_eq!(node.value.as_deref(), Some("[a link](http://x.test/ )"));
        assert!(node.children.is_empty());
    }

    #[rstest]
    #[case("see ![pic](http://i.test/a.png) here", "![pic](http://i.test/a.png )")]
    #[case("<https://auto.test>", "<https://auto.test>")]
    #[case("[x]: http://a.test\n\n[x]", "[x]")]
    fn link_like_nodes_keep_source(#[case] src: &str, #[case] expected: &str) {
        let tree = intercepted(src);
        let texts: Vec<String> = tree
            .children
            .iter()
            .flat_map(|c| c.children.iter())
            .filter_map(|n| n.value.clone())
            .collect();
        assert!(texts.iter().any(|t| t == expected), "{texts:?}");
    }

    #[test]
    fn definition_is_restored_at_root() {
        let tree = intercepted("[x]: http://a.test\n\n[x]");
        assert_eq!(tree.children[0].kind, NodeKind::Text);
        assert_eq!(tree.children[0].value.as_deref(), Some("[x]: http://a.test"));
    }

    #[test]
    fn no_link_like_nodes_remain() {
        let mut tree =
            intercepted("[a](http://a.test) ![b](http://b.test) [c]\n\n[c]: http://c.test");
        let mut finder = Finder(Vec::new());
        tree.walk_mut(&mut finder).unwrap();
        assert!(finder.0.is_empty(), "{:?}", finder.0);
    }

    #[test]
    fn second_pass_changes_nothing() {
        let src = "[a](http://a.test) and ![b](http://b.test)";
        let once = intercepted(src);
        let mut twice = once.clone();
        disable_markdown_links(&mut twice, src, &InterceptOptions::default()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn allowed_types_survive() {
        let src = "[a](http://a.test) ![b](http://b.test)";
        let mut tree = parse(src);
        let options = InterceptOptions::default().allow(NodeType::Link);
        disable_markdown_links(&mut tree, src, &options).unwrap();
        let para = &tree.children[0];
        assert_eq!(para.children[0].node_type(), NodeType::Link);
        assert_eq!(para.children[2].node_type(), NodeType::Text);
    }

    #[test]
    fn missing_position_is_an_error() {
        let mut tree = Node::new(NodeKind::Root, None);
        tree.children.push(Node::new(
            NodeKind::Link {
                href: "http://a.test".into(),
                title: String::new(),
            },
            None,
        ));
        assert_eq!(
            disable_markdown_links(&mut tree, "", &InterceptOptions::default()),
            Err(RenderError::MissingPosition {
                node: NodeType::Link
            })
        );
    }

    #[test]
    fn position_outside_source_is_an_error() {
        let mut tree = Node::new(NodeKind::Root, None);
        tree.children
            .push(Node::new(NodeKind::Definition, Some(Span::new(0, 10))));
        assert!(matches!(
            disable_markdown_links(&mut tree, "short", &InterceptOptions::default()),
            Err(RenderError::SourceOutOfRange { len: 5, .. })
        ));
    }

    #[rstest]
    #[case("(x)", "(x )")]
    #[case("x", "x")]
    #[case(")", " )")]
    fn trailing_paren(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(space_trailing_paren(input), expected);
    }

    struct Finder(Vec<NodeType>);

    impl Visitor for Finder {
        type Error = ();

        fn wants(&self, node_type: NodeType) -> bool {
            node_type.is_link_like()
        }

        fn visit(&mut self, node: &mut Node) -> Result<Visit, ()> {
            self.0.push(node.node_type());
            Ok(Visit::Continue)
        }
    }
}
