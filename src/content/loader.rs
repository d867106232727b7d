//! Post loader - resolves identifiers to files and builds Post values

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{ContentError, FrontMatter, Post};

/// Loads posts from a fixed directory.
///
/// No caching: every call reads the file from disk again.
pub struct PostLoader {
    posts_dir: PathBuf,
}

impl PostLoader {
    pub fn new<P: AsRef<Path>>(posts_dir: P) -> Self {
        Self {
            posts_dir: posts_dir.as_ref().to_path_buf(),
        }
    }

    /// Load a single post by identifier.
    ///
    /// The identifier may or may not carry the `.md` extension; either form
    /// resolves to the same file. Identifiers that would escape the posts
    /// directory are treated as not found rather than touching the
    /// filesystem.
    pub fn load(&self, id: &str) -> Result<Post, ContentError> {
        let id = id.strip_suffix(".md").unwrap_or(id);

        if id.is_empty() || id == ".." || id.contains(['/', '\\']) {
            return Err(ContentError::NotFound { id: id.to_string() });
        }

        let path = self.posts_dir.join(format!("{}.md", id));

        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ContentError::NotFound { id: id.to_string() },
            _ => ContentError::Io {
                id: id.to_string(),
                source: e,
            },
        })?;

        let (fm, body) = FrontMatter::parse(&content).map_err(|e| ContentError::Frontmatter {
            id: id.to_string(),
            reason: e.to_string(),
        })?;

        let published = fm.published_date().ok_or_else(|| ContentError::Date {
            id: id.to_string(),
            value: fm.published.clone(),
        })?;

        Ok(Post::new(
            id.to_string(),
            fm.title,
            published,
            body.to_string(),
            fm.extra,
        ))
    }

    /// Load every post in the posts directory, newest first.
    ///
    /// Ties in published date are broken by identifier so the listing order
    /// is stable across platforms.
    pub fn load_all(&self) -> Result<Vec<Post>, ContentError> {
        let mut posts = Vec::new();

        for entry in WalkDir::new(&self.posts_dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                let id = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or_default();
                posts.push(self.load(id)?);
            }
        }

        posts.sort_by(|a, b| {
            b.published
                .cmp(&a.published)
                .then_with(|| a.id.cmp(&b.id))
        });

        Ok(posts)
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}
