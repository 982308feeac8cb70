//! # Markdown Layer
//!
//! Wraps pulldown-cmark so the fragment pipeline, not the markdown engine,
//! owns link semantics.
//!
//! ## Flow
//!
//! 1. **`tree`**: content → owned node tree with byte spans
//! 2. **`intercept`**: link-like nodes → literal source text
//! 3. **`render`**: walk the tree; paragraphs and list items go through the
//!    **`blocks`** renderers, which run the fragment pipeline

pub mod blocks;
pub mod intercept;
pub mod render;
pub mod span;
pub mod tree;

pub use intercept::{InterceptOptions, disable_markdown_links};
pub use render::{RenderOptions, Renderer, render_post};
pub use span::Span;
pub use tree::{Node, NodeKind, NodeType, ParseNodeTypeError, Visit, Visitor, parse};
