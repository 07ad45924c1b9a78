//! The file-backed post store and its rebuild hook.
//!
//! Every post is a single Markdown file named by its slug: a YAML
//! frontmatter header followed by the body. The repository owns the
//! content directory; nothing else writes to it. Writes are whole-file
//! with no locking, so two concurrent updates to the same slug race and
//! the last writer wins. Acceptable for a single-admin tool.

pub mod builder;
pub mod frontmatter;
pub mod repository;
pub mod slug;

pub use builder::SiteBuilder;
pub use frontmatter::FrontMatter;
pub use repository::{NewPost, Post, PostMetadata, PostPatch, PostRepository};
pub use slug::slugify;
