//! Error taxonomy for the content pipeline

use thiserror::Error;

/// Errors surfaced by the post loader and renderer.
///
/// None of these are recovered inside the pipeline. Missing files map to
/// 404 at the HTTP layer; everything else is a content-authoring defect
/// and maps to 500.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("no post found for `{id}`")]
    NotFound { id: String },

    #[error("invalid front-matter in `{id}`: {reason}")]
    Frontmatter { id: String, reason: String },

    #[error("cannot parse published date `{value}` in `{id}`")]
    Date { id: String, value: String },

    #[error("syntax highlighting failed")]
    Render(#[from] syntect::Error),

    #[error("failed to read `{id}`")]
    Io {
        id: String,
        #[source]
        source: std::io::Error,
    },
}

impl ContentError {
    /// True when the error means the requested post simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound { .. })
    }
}
