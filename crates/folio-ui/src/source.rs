//! HTTP content source.
//!
//! Fetches the bundle written by the generator: `/index.json` for the grid and
//! `/posts/{slug}.json` for an expanded post.

use folio_core::{PostContent, SiteIndex};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;

use crate::overlay::LoadOutcome;

/// Errors fetching bundle files.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceError {
    Network(String),
    Status { url: String, status: u16 },
    Parse(String),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Network(e) => write!(f, "Network error: {e}"),
            SourceError::Status { url, status } => write!(f, "{url} returned HTTP {status}"),
            SourceError::Parse(e) => write!(f, "Parse error: {e}"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Reads the bundle over HTTP, relative to `base`.
#[derive(Debug, Clone, Copy)]
pub struct HttpSource {
    base: &'static str,
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new("")
    }
}

impl HttpSource {
    /// `base` is prepended to every path; empty means same origin.
    pub const fn new(base: &'static str) -> Self {
        Self { base }
    }

    pub fn index_url(&self) -> String {
        format!("{}/index.json", self.base.trim_end_matches('/'))
    }

    pub fn post_url(&self, slug: &str) -> String {
        format!("{}/posts/{slug}.json", self.base.trim_end_matches('/'))
    }

    /// Site metadata and every post summary.
    pub async fn list_posts(&self) -> Result<SiteIndex, SourceError> {
        fetch_json(&self.index_url())
            .await?
            .ok_or_else(|| SourceError::Status {
                url: self.index_url(),
                status: 404,
            })
    }

    /// Content for one post. `Ok(None)` when the bundle has no file for it.
    pub async fn load_post_content(&self, slug: &str) -> Result<Option<PostContent>, SourceError> {
        fetch_json(&self.post_url(slug)).await
    }
}

async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<Option<T>, SourceError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| SourceError::Network(e.to_string()))?;

    if response.status() == 404 {
        return Ok(None);
    }
    if !response.ok() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }

    let text = response
        .text()
        .await
        .map_err(|e| SourceError::Network(e.to_string()))?;
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|e| SourceError::Parse(e.to_string()))
}

impl From<Result<Option<PostContent>, SourceError>> for LoadOutcome {
    fn from(result: Result<Option<PostContent>, SourceError>) -> Self {
        match result {
            Ok(Some(content)) => LoadOutcome::Loaded(content),
            Ok(None) => LoadOutcome::NotFound,
            Err(e) => LoadOutcome::Failed(e.to_string()),
        }
    }
}
