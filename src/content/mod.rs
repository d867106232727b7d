//! Content module - the post loading and rendering pipeline

mod error;
mod frontmatter;
mod loader;
mod markdown;
mod post;

pub use error::ContentError;
pub use frontmatter::FrontMatter;
pub use loader::PostLoader;
pub use markdown::MarkdownRenderer;
pub use post::Post;
