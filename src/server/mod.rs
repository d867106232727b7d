//! Blog HTTP server
//!
//! Two routes: the listing page and the post detail page. There is no
//! cache layer; every request re-reads the post files from disk.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::content::{ContentError, MarkdownRenderer, Post};
use crate::templates::{PostPage, PostSummary, SiteData, TemplateRenderer};
use crate::Site;

/// Display format matching the classic `Date.toDateString()` shape,
/// e.g. "Mon Jan 1 2024"
const DATE_FORMAT: &str = "%a %b %-d %Y";

/// Server state shared across requests
struct ServerState {
    site: Site,
    renderer: MarkdownRenderer,
    templates: TemplateRenderer,
}

impl ServerState {
    fn site_data(&self) -> SiteData {
        SiteData {
            title: self.site.config.title.clone(),
            subtitle: self.site.config.subtitle.clone(),
            description: self.site.config.description.clone(),
            author: self.site.config.author.clone(),
            root: self.site.config.root.clone(),
        }
    }
}

/// Start the blog server
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(ServerState {
        site: site.clone(),
        renderer: MarkdownRenderer::with_theme(&site.config.highlight.theme),
        templates: TemplateRenderer::new()?,
    });

    let app = router(state);

    // Handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/posts/:id", get(post_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Listing page: every post, newest first
async fn index_handler(State(state): State<Arc<ServerState>>) -> Result<Html<String>, PageError> {
    let posts = state.site.loader().load_all()?;

    let summaries: Vec<PostSummary> = posts.iter().map(summarize).collect();

    let mut ctx = tera::Context::new();
    ctx.insert("site", &state.site_data());
    ctx.insert("posts", &summaries);

    let html = state.templates.render("index.html", &ctx)?;
    Ok(Html(html))
}

/// Detail page for a single post
async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let post = state.site.loader().load(&id)?;
    let content = state.renderer.render(&post.body)?;

    let mut ctx = tera::Context::new();
    ctx.insert("site", &state.site_data());
    ctx.insert(
        "post",
        &PostPage {
            title: post.title,
            published: post.published.format(DATE_FORMAT).to_string(),
            content,
        },
    );

    let html = state.templates.render("post.html", &ctx)?;
    Ok(Html(html))
}

fn summarize(post: &Post) -> PostSummary {
    PostSummary {
        title: post.title.clone(),
        slug: post.slug.clone(),
        published: post.published.format(DATE_FORMAT).to_string(),
    }
}

/// Error wrapper that maps pipeline failures to HTTP responses
enum PageError {
    Content(ContentError),
    Template(anyhow::Error),
}

impl From<ContentError> for PageError {
    fn from(e: ContentError) -> Self {
        PageError::Content(e)
    }
}

impl From<anyhow::Error> for PageError {
    fn from(e: anyhow::Error) -> Self {
        PageError::Template(e)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::Content(e) if e.is_not_found() => {
                tracing::debug!("{}", e);
                (StatusCode::NOT_FOUND, "Not found").into_response()
            }
            PageError::Content(e) => {
                tracing::warn!("content error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
            }
            PageError::Template(e) => {
                tracing::warn!("template error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
            }
        }
    }
}
