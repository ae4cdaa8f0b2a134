//! Folio Core Library
//!
//! Core types, configuration, and error handling shared by the Folio site
//! generator and the browser frontend.

pub mod config;
pub mod error;
pub mod filter;
pub mod frontmatter;
pub mod post;
pub mod registry;
pub mod site;

pub use config::Config;
pub use error::{CoreError, Result};
pub use filter::{Filter, FilterKind, TagCount};
pub use frontmatter::PostFrontmatter;
pub use post::{PostContent, PostKind, PostLayout, PostSummary, ProjectStatus, sort_posts};
pub use registry::{Keyed, Lookup, Registry};
pub use site::{CategoryLabel, CommentsMeta, SiteIndex, SiteMeta, SocialLinks};
