//! Page templates using the Tera template engine
//!
//! The two page shells (listing and post detail) are embedded directly in
//! the binary.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

/// Template renderer with the embedded page shells
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // The post body arrives pre-rendered as HTML, so autoescaping
        // would mangle it.
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("index.html", include_str!("pages/index.html")),
            ("post.html", include_str!("pages/post.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub root: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub title: String,
    pub slug: String,
    pub published: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostPage {
    pub title: String,
    pub published: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteData {
        SiteData {
            title: "Test Site".to_string(),
            subtitle: String::new(),
            description: "words".to_string(),
            author: "tester".to_string(),
            root: "/".to_string(),
        }
    }

    #[test]
    fn test_render_index() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut ctx = Context::new();
        ctx.insert("site", &site());
        ctx.insert(
            "posts",
            &vec![PostSummary {
                title: "Hello World".to_string(),
                slug: "hello-world".to_string(),
                published: "Mon Jan 1 2024".to_string(),
            }],
        );

        let html = renderer.render("index.html", &ctx).unwrap();
        assert!(html.contains("Hello World"));
        assert!(html.contains("/posts/hello-world"));
        assert!(html.contains("Mon Jan 1 2024"));
    }

    #[test]
    fn test_render_post_keeps_html() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut ctx = Context::new();
        ctx.insert("site", &site());
        ctx.insert(
            "post",
            &PostPage {
                title: "Hello World".to_string(),
                published: "Mon Jan 1 2024".to_string(),
                content: r#"<h1 class="post-title-lg">Hi</h1>"#.to_string(),
            },
        );

        let html = renderer.render("post.html", &ctx).unwrap();
        // Pre-rendered HTML must not be escaped
        assert!(html.contains(r#"<h1 class="post-title-lg">Hi</h1>"#));
    }
}
