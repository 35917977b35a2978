//! Development server
//!
//! Pages are rendered on every request straight from the posts directory, so
//! edits show up on reload without regenerating the site.

use anyhow::Result;
use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::ContentError;
use crate::helpers::decode_identifier;
use crate::templates::PageRenderer;
use crate::Blog;

/// Server state
struct ServerState {
    blog: Blog,
    renderer: PageRenderer,
}

impl ServerState {
    fn not_found_page(&self, missing: Option<&str>) -> String {
        self.renderer
            .not_found(missing)
            .unwrap_or_else(|_| "Not found".to_string())
    }
}

/// Start the development server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let app = router(blog)?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}{}", ip, port, blog.config.root);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(blog: &Blog) -> Result<Router> {
    let state = Arc::new(ServerState {
        blog: blog.clone(),
        renderer: PageRenderer::new(&blog.config)?,
    });

    let post_dir = blog.config.post_dir.trim_matches('/');
    let category_dir = blog.config.category_dir.trim_matches('/');

    let site = Router::new()
        .route("/", get(index_handler))
        .route(&format!("/{}/:id", post_dir), get(post_handler))
        .route(&format!("/{}/:id/", post_dir), get(post_handler))
        .route(&format!("/{}/:slug", category_dir), get(category_handler))
        .route(&format!("/{}/:slug/", category_dir), get(category_handler))
        .fallback(fallback_handler)
        .with_state(state);

    let root = blog.config.root.trim_end_matches('/');
    let app = if root.is_empty() {
        site
    } else {
        Router::new().nest(root, site)
    };

    Ok(app.layer(TraceLayer::new_for_http()))
}

/// Last path segment, still percent-encoded
fn last_segment(uri: &Uri) -> &str {
    uri.path()
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
}

async fn index_handler(State(state): State<Arc<ServerState>>) -> Response {
    respond(state, |state| {
        let loader = state.blog.loader();
        let posts = loader.list_all()?;
        let categories = loader.categories()?;
        state.renderer.index(&posts, &categories)
    })
    .await
}

async fn post_handler(State(state): State<Arc<ServerState>>, uri: Uri) -> Response {
    let identifier = last_segment(&uri).to_string();
    respond(state, move |state| {
        let post = state.blog.loader().find_by_identifier(&identifier)?;
        state.renderer.post(&post)
    })
    .await
}

async fn category_handler(State(state): State<Arc<ServerState>>, uri: Uri) -> Response {
    let slug = decode_identifier(last_segment(&uri));
    respond(state, move |state| {
        let listing = state.blog.loader().find_by_category(&slug)?;
        if listing.posts.is_empty() {
            return Err(ContentError::NotFound(slug).into());
        }
        state.renderer.category(&listing)
    })
    .await
}

/// Static files, or the not-found page
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let mut service = ServeDir::new(&state.blog.static_dir);
    match service.try_call(request).await {
        Ok(response) if response.status() != StatusCode::NOT_FOUND => response.into_response(),
        Ok(_) => (StatusCode::NOT_FOUND, Html(state.not_found_page(None))).into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
    }
}

/// Run a page builder off the async runtime and map its outcome to a response
async fn respond<F>(state: Arc<ServerState>, build: F) -> Response
where
    F: FnOnce(&ServerState) -> Result<String> + Send + 'static,
{
    let outcome = tokio::task::spawn_blocking(move || render_outcome(&state, build)).await;
    match outcome {
        Ok((status, html)) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Page rendering task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

fn render_outcome<F>(state: &ServerState, build: F) -> (StatusCode, String)
where
    F: FnOnce(&ServerState) -> Result<String>,
{
    match build(state) {
        Ok(html) => (StatusCode::OK, html),
        Err(e) => match e.downcast_ref::<ContentError>() {
            Some(ContentError::NotFound(missing)) => {
                (StatusCode::NOT_FOUND, state.not_found_page(Some(missing)))
            }
            _ => {
                tracing::error!("Failed to render page: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error".to_string(),
                )
            }
        },
    }
}
