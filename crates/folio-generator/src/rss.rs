//! RSS feed generation.
//!
//! Generates an RSS 2.0 feed of the newest posts. Item links point at the
//! `/blog/{slug}` route so readers land on the expanded post.

use std::io::Write;

use chrono::{NaiveTime, Utc};
use folio_core::{Config, PostSummary};
use rss::{ChannelBuilder, GuidBuilder, Item, ItemBuilder};
use thiserror::Error;
use tracing::debug;

/// RSS generation errors.
#[derive(Debug, Error)]
pub enum RssError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for RSS operations.
pub type Result<T> = std::result::Result<T, RssError>;

/// RSS feed generator.
#[derive(Debug)]
pub struct RssGenerator {
    config: Config,
}

impl RssGenerator {
    /// Create a new RSS generator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Generate feed XML. `posts` are expected newest first.
    pub fn generate(&self, posts: &[PostSummary]) -> String {
        let limit = self.config.rss.limit;
        debug!(count = posts.len().min(limit), limit, "generating RSS feed");

        let items: Vec<Item> = posts
            .iter()
            .take(limit)
            .map(|post| self.post_to_item(post))
            .collect();

        let site = &self.config.site;
        ChannelBuilder::default()
            .title(&site.title)
            .link(&site.base_url)
            .description(site.description.as_deref().unwrap_or(&site.title))
            .language(Some(site.language.clone()))
            .last_build_date(Some(Utc::now().to_rfc2822()))
            .items(items)
            .build()
            .to_string()
    }

    fn post_to_item(&self, post: &PostSummary) -> Item {
        let url = self.config.url_for(&post.path());
        let guid = GuidBuilder::default().value(&url).permalink(true).build();
        let published = post.date.and_time(NaiveTime::MIN).and_utc();

        let categories: Vec<_> = post
            .tags
            .iter()
            .map(|tag| rss::Category {
                name: tag.clone(),
                domain: None,
            })
            .collect();

        let mut builder = ItemBuilder::default();
        builder
            .title(Some(post.title.clone()))
            .link(Some(url))
            .guid(Some(guid))
            .pub_date(Some(published.to_rfc2822()))
            .categories(categories);

        if !post.excerpt.is_empty() {
            builder.description(Some(post.excerpt.clone()));
        }
        if let Some(author) = &self.config.site.author {
            builder.author(Some(author.clone()));
        }

        builder.build()
    }

    /// Write the feed to a writer.
    pub fn write_to<W: Write>(&self, posts: &[PostSummary], writer: &mut W) -> Result<()> {
        writer.write_all(self.generate(posts).as_bytes())?;
        Ok(())
    }
}
