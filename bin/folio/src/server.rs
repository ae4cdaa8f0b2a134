//! Local server for a built bundle.
//!
//! Every file in the output directory is served as-is. Post permalinks
//! (`/blog/{slug}`) have no file of their own: known slugs get the app shell so
//! the frontend can open the overlay, unknown slugs are redirected home.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    sync::Arc,
};

use axum::{
    Router,
    extract::{Path as UrlPath, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use folio_generator::{BuildError, read_index};
use tower_http::{services::ServeDir, trace::TraceLayer};

/// File served for client-rendered routes.
pub const SHELL_FILE: &str = "index.html";

/// What the server knows about the bundle it serves.
#[derive(Debug, Clone)]
pub struct ServerState {
    output_dir: PathBuf,
    slugs: HashSet<String>,
}

impl ServerState {
    pub fn new(output_dir: impl Into<PathBuf>, slugs: impl IntoIterator<Item = String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            slugs: slugs.into_iter().collect(),
        }
    }

    /// Read the slugs from the bundle's `index.json`.
    pub fn from_bundle(output_dir: &Path) -> Result<Self, BuildError> {
        let index = read_index(output_dir)?;
        Ok(Self::new(
            output_dir,
            index.posts.into_iter().map(|post| post.slug),
        ))
    }

    pub fn knows(&self, slug: &str) -> bool {
        self.slugs.contains(slug)
    }

    pub fn post_count(&self) -> usize {
        self.slugs.len()
    }
}

/// Create the router for a built bundle.
pub fn create_router(state: Arc<ServerState>) -> Router {
    let files = ServeDir::new(&state.output_dir);

    Router::new()
        .route("/blog/{slug}", get(post_shell))
        .route("/blog/{slug}/", get(post_shell))
        .fallback_service(files)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn post_shell(
    State(state): State<Arc<ServerState>>,
    UrlPath(slug): UrlPath<String>,
) -> Response {
    if !state.knows(&slug) {
        tracing::debug!(slug = %slug, "unknown post, redirecting home");
        return Redirect::to("/").into_response();
    }

    match tokio::fs::read_to_string(state.output_dir.join(SHELL_FILE)).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "app shell missing from output directory");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
