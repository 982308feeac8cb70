//! Annotates nostr post bodies.
//!
//! A post's markdown is parsed, its native links are turned back into plain
//! text, and every paragraph and list item is split into literal text and
//! annotated [`Element`]s: mentions, event references, hyperlinks, lightning
//! invoices and hashtags. Presentation lives in [`render`].

pub mod encoding;
pub mod error;
pub mod markdown;
pub mod models;
pub mod render;
pub mod routes;
pub mod text;

pub use error::RenderError;
pub use markdown::{RenderOptions, Renderer, render_post};
pub use models::*;
pub use render::{ElementRenderer, HtmlRenderer};
pub use text::{Element, Fragment, FragmentPipeline, Markup, process};
