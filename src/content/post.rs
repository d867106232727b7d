//! Post model

use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::HashMap;

/// A blog post, built fresh from its markdown file on every request
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// Identifier: the file stem under the posts directory
    pub id: String,

    /// Post title
    pub title: String,

    /// Publication date
    pub published: DateTime<Local>,

    /// Slug (URL-friendly name) derived from the title
    pub slug: String,

    /// Raw markdown/HTML body after the front-matter block
    pub body: String,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Post {
    pub fn new(
        id: String,
        title: String,
        published: DateTime<Local>,
        body: String,
        extra: HashMap<String, serde_yaml::Value>,
    ) -> Self {
        let slug = slug::slugify(&title);
        Self {
            id,
            title,
            published,
            slug,
            body,
            extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(title: &str) -> Post {
        Post::new(
            "sample".to_string(),
            title.to_string(),
            Local.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            String::new(),
            HashMap::new(),
        )
    }

    #[test]
    fn test_slug_from_title() {
        assert_eq!(sample("Hello World").slug, "hello-world");
        assert_eq!(sample("  Spaced   Out!  ").slug, "spaced-out");
        assert_eq!(sample("C++ & Rust: a tale").slug, "c-rust-a-tale");
    }

    #[test]
    fn test_slug_deterministic() {
        assert_eq!(sample("Some Title").slug, sample("Some Title").slug);
    }
}
