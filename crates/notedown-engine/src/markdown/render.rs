use super::blocks::{render_link, transform_list_item, transform_paragraph};
use super::intercept::{InterceptOptions, disable_markdown_links};
use super::tree::{Node, NodeKind, parse};
use crate::error::RenderError;
use crate::models::{Post, Tag, UserMetadata};
use crate::text::resolver::DEFAULT_EVENT_LABEL_LEN;
use crate::text::{Fragment, FragmentPipeline, Markup, TextFragmentContext};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub intercept: InterceptOptions,
    /// Characters of the `note1...` encoding shown for event references.
    pub event_label_len: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            intercept: InterceptOptions::default(),
            event_label_len: DEFAULT_EVENT_LABEL_LEN,
        }
    }
}

/// Renders post bodies into fragment trees.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Parses `content` as markdown, neutralizes native links, and renders
    /// every block. `creator` is the post author.
    pub fn render(
        &self,
        content: &str,
        creator: &str,
        tags: &[Tag],
        users: &UserMetadata,
    ) -> Result<Vec<Fragment>, RenderError> {
        let mut tree = parse(content);
        disable_markdown_links(&mut tree, content, &self.options.intercept)?;

        let pipeline =
            FragmentPipeline::new(creator).with_event_label_len(self.options.event_label_len);
        let walker = DocumentWalker {
            tags,
            users,
            pipeline: &pipeline,
        };
        Ok(walker.children(&tree))
    }

    pub fn render_post(
        &self,
        post: &Post,
        users: &UserMetadata,
    ) -> Result<Vec<Fragment>, RenderError> {
        let tags = post.parsed_tags();
        self.render(&post.content, &post.pubkey, &tags, users)
    }
}

/// Renders `post` with default options.
pub fn render_post(post: &Post, users: &UserMetadata) -> Result<Vec<Fragment>, RenderError> {
    Renderer::default().render_post(post, users)
}

struct DocumentWalker<'a> {
    tags: &'a [Tag],
    users: &'a UserMetadata,
    pipeline: &'a FragmentPipeline<'a>,
}

impl DocumentWalker<'_> {
    fn children(&self, node: &Node) -> Vec<Fragment> {
        node.children.iter().flat_map(|c| self.node(c)).collect()
    }

    fn context(&self, node: &Node) -> TextFragmentContext<'_> {
        TextFragmentContext::new(self.children(node), self.tags, self.users)
    }

    fn node(&self, node: &Node) -> Vec<Fragment> {
        let fragment: Fragment = match &node.kind {
            NodeKind::Root | NodeKind::Other => return self.children(node),
            NodeKind::Text | NodeKind::Html => {
                return node.value.iter().map(|v| Fragment::text(v.as_str())).collect();
            }
            NodeKind::Definition => {
                log::debug!("dropping definition that was allowed through");
                return Vec::new();
            }
            NodeKind::Paragraph => transform_paragraph(self.context(node), self.pipeline),
            NodeKind::ListItem => transform_list_item(self.context(node), self.pipeline),
            NodeKind::Link { href, .. } | NodeKind::LinkReference { href, .. } => {
                render_link(href, self.pipeline)
            }
            NodeKind::List { start } => Markup::List {
                start: *start,
                items: self.children(node),
            }
            .into(),
            NodeKind::Heading(level) => Markup::Heading {
                level: *level,
                children: self.children(node),
            }
            .into(),
            NodeKind::BlockQuote => Markup::BlockQuote(self.children(node)).into(),
            NodeKind::Emphasis => Markup::Emphasis(self.children(node)).into(),
            NodeKind::Strong => Markup::Strong(self.children(node)).into(),
            NodeKind::Code { lang } => Markup::CodeBlock {
                lang: lang.clone(),
                code: node.value.clone().unwrap_or_default(),
            }
            .into(),
            NodeKind::InlineCode => {
                Markup::InlineCode(node.value.clone().unwrap_or_default()).into()
            }
            NodeKind::Image { src, .. } | NodeKind::ImageReference { src, .. } => Markup::Image {
                src: src.clone(),
                alt: node.plain_text(),
            }
            .into(),
            NodeKind::Break => Markup::LineBreak.into(),
            NodeKind::ThematicBreak => Markup::Rule.into(),
        };
        vec![fragment]
    }
}
