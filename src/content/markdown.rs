//! Markdown rendering with element overrides and syntax highlighting
//!
//! The body is markdown with embedded raw HTML, which passes through
//! unescaped. Content is authored by the site owner, so no sanitization
//! is applied.

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use super::ContentError;

/// Fixed intrinsic size for post images
const IMAGE_WIDTH: u32 = 644;
const IMAGE_HEIGHT: u32 = 362;

/// Markdown renderer with per-element overrides
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer with the default highlight theme
    pub fn new() -> Self {
        Self::with_theme("base16-ocean.dark")
    }

    /// Create with a specific syntect theme
    pub fn with_theme(theme: &str) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
        }
    }

    /// Render a post body to HTML
    pub fn render(&self, markdown: &str) -> Result<String, ContentError> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        // (language tag, accumulated content) while inside a code block
        let mut code_block: Option<(Option<String>, String)> = None;
        // (src, accumulated alt text) while inside an image
        let mut image: Option<(String, String)> = None;

        for event in parser {
            if code_block.is_some() {
                match event {
                    Event::Text(text) => {
                        if let Some((_, content)) = code_block.as_mut() {
                            content.push_str(&text);
                        }
                    }
                    Event::End(TagEnd::CodeBlock) => {
                        if let Some((lang, content)) = code_block.take() {
                            let rendered = self.render_code(&content, lang.as_deref())?;
                            events.push(Event::Html(CowStr::from(rendered)));
                        }
                    }
                    _ => {}
                }
                continue;
            }

            if image.is_some() {
                match event {
                    Event::Text(text) | Event::Code(text) => {
                        if let Some((_, alt)) = image.as_mut() {
                            alt.push_str(&text);
                        }
                    }
                    Event::SoftBreak | Event::HardBreak => {
                        if let Some((_, alt)) = image.as_mut() {
                            alt.push(' ');
                        }
                    }
                    Event::End(TagEnd::Image) => {
                        if let Some((src, alt)) = image.take() {
                            events.push(Event::Html(CowStr::from(image_tag(&src, &alt))));
                        }
                    }
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::Start(Tag::Image { dest_url, .. }) => {
                    image = Some((dest_url.to_string(), String::new()));
                }
                Event::Start(Tag::Heading {
                    level: HeadingLevel::H1,
                    ..
                }) => {
                    events.push(Event::Html(CowStr::from(r#"<h1 class="post-title-lg">"#)));
                }
                Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                    events.push(Event::Html(CowStr::from("</h1>")));
                }
                Event::Start(Tag::Link {
                    dest_url, title, ..
                }) => {
                    let tag = if title.is_empty() {
                        format!(
                            r#"<a class="post-link" href="{}">"#,
                            html_escape(&dest_url)
                        )
                    } else {
                        format!(
                            r#"<a class="post-link" href="{}" title="{}">"#,
                            html_escape(&dest_url),
                            html_escape(&title)
                        )
                    };
                    events.push(Event::Html(CowStr::from(tag)));
                }
                Event::End(TagEnd::Link) => {
                    events.push(Event::Html(CowStr::from("</a>")));
                }
                Event::Start(Tag::Emphasis) => {
                    events.push(Event::Html(CowStr::from(r#"<em class="post-accent">"#)));
                }
                Event::End(TagEnd::Emphasis) => {
                    events.push(Event::Html(CowStr::from("</em>")));
                }
                Event::Code(code) => {
                    events.push(Event::Html(CowStr::from(inline_code_span(&code))));
                }
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Render a code block: single-line content gets the inline span
    /// treatment, multi-line content goes through the highlighter.
    fn render_code(&self, content: &str, lang: Option<&str>) -> Result<String, ContentError> {
        let trimmed = content.trim_end_matches('\n');
        if !trimmed.contains('\n') {
            return Ok(inline_code_span(trimmed));
        }
        self.highlight_code(content, lang)
    }

    /// Highlight a multi-line code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> Result<String, ContentError> {
        let lang = lang.map(remap_language);

        let syntax = lang
            .and_then(|l| {
                self.syntax_set
                    .find_syntax_by_token(l)
                    .or_else(|| self.syntax_set.find_syntax_by_extension(l))
            })
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .unwrap_or_else(|| {
                self.theme_set
                    .themes
                    .values()
                    .next()
                    .expect("No themes available")
            });

        let highlighted = highlighted_html_for_string(code, &self.syntax_set, syntax, theme)?;

        Ok(match lang {
            Some(l) => format!(
                r#"<div class="code-block" data-lang="{}">{}</div>"#,
                html_escape(l),
                highlighted
            ),
            None => format!(r#"<div class="code-block">{}</div>"#, highlighted),
        })
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Map short fence tags to the token names syntect knows
fn remap_language(tag: &str) -> &str {
    match tag {
        "rs" => "rust",
        "js" => "javascript",
        "ts" => "typescript",
        other => other,
    }
}

/// A styled inline code span
fn inline_code_span(code: &str) -> String {
    format!(r#"<span class="inline-code">{}</span>"#, html_escape(code))
}

/// An image with fixed intrinsic size and lazy decode hints
fn image_tag(src: &str, alt: &str) -> String {
    format!(
        r#"<img class="post-image" width="{}" height="{}" loading="lazy" decoding="async" src="{}" alt="{}">"#,
        IMAGE_WIDTH,
        IMAGE_HEIGHT,
        html_escape(src),
        html_escape(alt)
    )
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_h1_gets_style_class() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World").unwrap();
        assert!(html.contains(r#"<h1 class="post-title-lg">Hello World</h1>"#));
    }

    #[test]
    fn test_other_headings_untouched() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("## Section").unwrap();
        assert!(html.contains("<h2>Section</h2>"));
    }

    #[test]
    fn test_link_gets_style_class() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("[site](https://example.com)").unwrap();
        assert!(html.contains(r#"<a class="post-link" href="https://example.com">site</a>"#));
    }

    #[test]
    fn test_emphasis_gets_style_class() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("some *quiet* words").unwrap();
        assert!(html.contains(r#"<em class="post-accent">quiet</em>"#));
    }

    #[test]
    fn test_image_fixed_size() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("![cover image](/shot.png)").unwrap();
        assert!(html.contains(r#"width="644""#));
        assert!(html.contains(r#"height="362""#));
        assert!(html.contains(r#"src="/shot.png""#));
        assert!(html.contains(r#"alt="cover image""#));
    }

    #[test]
    fn test_inline_code_span() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("run `inline` now").unwrap();
        assert!(html.contains(r#"<span class="inline-code">inline</span>"#));
    }

    #[test]
    fn test_single_line_fence_renders_inline() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```\ncargo build\n```").unwrap();
        assert!(html.contains(r#"<span class="inline-code">cargo build</span>"#));
    }

    #[test]
    fn test_rs_fence_highlights_as_rust() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("```rs\nfn main() {\n    println!(\"hi\");\n}\n```")
            .unwrap();
        assert!(html.contains(r#"data-lang="rust""#));
        assert!(html.contains("<pre"));
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("```nosuchlang\nfoo bar\nbaz\n```")
            .unwrap();
        assert!(html.contains(r#"data-lang="nosuchlang""#));
        assert!(html.contains("foo bar"));
    }

    #[test]
    fn test_raw_html_passes_through() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("before\n\n<div class=\"custom\">raw</div>\n\nafter")
            .unwrap();
        assert!(html.contains(r#"<div class="custom">raw</div>"#));
    }

    #[test]
    fn test_code_content_is_escaped() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("`a < b`").unwrap();
        assert!(html.contains("a &lt; b"));
    }
}
