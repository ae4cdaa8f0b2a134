//! Folio Generator Library
//!
//! Turns `content/blog/*.md` into the static bundle the frontend fetches.
//!
//! # Modules
//!
//! - [`collector`] - Post discovery and parsing
//! - [`rss`] - RSS feed generation
//! - [`assets`] - Static asset copying
//! - [`build`] - Build orchestration

pub mod assets;
pub mod build;
pub mod collector;
pub mod rss;

pub use assets::{CopyReport, StaticAssets};
pub use build::{BuildError, BuildStats, Builder, read_index};
pub use collector::{CollectFailure, ContentCollector, SiteContent};
pub use rss::RssGenerator;
