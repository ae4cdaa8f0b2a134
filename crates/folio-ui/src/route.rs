//! Client routes.
//!
//! `/` and `/?category=x` / `/?tag=x` show the grid, `/blog/{slug}` shows the
//! grid with that post expanded.

use folio_core::Filter;
use url::{Url, form_urlencoded};

/// Base used to resolve relative paths. Only the path and query are kept.
const RESOLVE_BASE: &str = "http://folio.invalid/";

/// Prefix of expanded post paths.
pub const POST_PREFIX: &str = "/blog/";

/// A client route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home(Option<Filter>),
    Post(String),
}

impl Route {
    /// Parse a path with optional query. Anything unrecognised is `Home(None)`.
    pub fn parse(path_and_query: &str) -> Self {
        let Ok(url) = Url::parse(RESOLVE_BASE).and_then(|base| base.join(path_and_query)) else {
            return Self::Home(None);
        };

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            [] => Self::Home(Filter::from_query_pairs(url.query_pairs())),
            ["blog", slug] => Self::Post(decode_segment(slug)),
            _ => Self::Home(None),
        }
    }

    /// Path with query, as written to the address bar.
    pub fn to_path(&self) -> String {
        match self {
            Self::Home(None) => "/".to_string(),
            Self::Home(Some(filter)) => {
                let (name, value) = filter.query_pair();
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair(name, value)
                    .finish();
                format!("/?{query}")
            }
            Self::Post(slug) => format!("{POST_PREFIX}{slug}"),
        }
    }

    pub fn filter(&self) -> Option<&Filter> {
        match self {
            Self::Home(filter) => filter.as_ref(),
            Self::Post(_) => None,
        }
    }
}

fn decode_segment(segment: &str) -> String {
    // form_urlencoded treats '+' as a space; path segments do not.
    let escaped = segment.replace('+', "%2B");
    form_urlencoded::parse(format!("s={escaped}").as_bytes())
        .next()
        .map(|(_, v)| v.into_owned())
        .unwrap_or_else(|| segment.to_string())
}
