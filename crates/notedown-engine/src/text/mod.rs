//! # Fragment Extraction
//!
//! Turns plain text spans into a flat, ordered sequence of [`Fragment`]s:
//! literal text interleaved with annotated elements.
//!
//! ## Modules
//!
//! - **`fragment`**: `Fragment`, `Element` and `Markup` output types
//! - **`patterns`**: the four recognizers as order-preserving string splitters
//! - **`resolver`**: maps `#[N]` placeholders onto the post's tag list
//! - **`pipeline`**: runs the passes in their fixed order
//!
//! ## Pass Order
//!
//! mentions → links → invoices → hashtags. Placeholders must be resolved
//! before the generic `#` pattern sees the text, and anything already
//! annotated is never split again.

pub mod fragment;
pub mod patterns;
pub mod pipeline;
pub mod resolver;

pub use fragment::{Element, Fragment, Markup};
pub use patterns::{Pattern, Piece};
pub use pipeline::{FragmentPipeline, TextFragmentContext, flatten, process};
pub use resolver::ReferenceResolver;
