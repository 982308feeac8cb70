pub mod metadata;
pub mod post;
pub mod tag;

pub use metadata::{MetadataCache, UserMetadata};
pub use post::Post;
pub use tag::{Tag, TagKind};
