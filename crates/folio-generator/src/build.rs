//! Build orchestration.
//!
//! Produces the bundle the frontend reads: `index.json` with every post
//! summary, one `posts/{slug}.json` per post body, the feed, and the static
//! app shell.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use folio_core::{PostContent, SiteIndex, SiteMeta};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    assets::{AssetError, StaticAssets},
    collector::{CollectFailure, CollectorError, ContentCollector, SiteContent},
    rss::{RssError, RssGenerator},
};

/// File name of the site index.
pub const INDEX_FILE: &str = "index.json";

/// Directory holding per-post content files.
pub const POSTS_DIR: &str = "posts";

/// File name of the feed.
pub const FEED_FILE: &str = "rss.xml";

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Collector error.
    #[error("collector error: {0}")]
    Collector(#[from] CollectorError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// RSS generation error.
    #[error("RSS error: {0}")]
    Rss(#[from] RssError),

    /// Asset error.
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),

    /// Posts failed to parse in strict mode.
    #[error("{} post(s) failed to parse", .0.len())]
    Strict(Vec<CollectFailure>),
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of posts written.
    pub posts: usize,

    /// Drafts left out.
    pub drafts_skipped: usize,

    /// Sources that failed to parse and were left out.
    pub failures: usize,

    /// Static files copied.
    pub assets: usize,

    /// Whether a feed was written.
    pub feed: bool,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Site builder that orchestrates the build process.
#[derive(Debug)]
pub struct Builder {
    config: folio_core::Config,
    content_dir: PathBuf,
    output_dir: PathBuf,
    static_dir: Option<PathBuf>,
    strict: bool,
}

impl Builder {
    /// Create a new builder.
    #[must_use]
    pub fn new(
        config: folio_core::Config,
        content_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            content_dir: content_dir.into(),
            output_dir: output_dir.into(),
            static_dir: None,
            strict: false,
        }
    }

    /// Set the static assets directory.
    #[must_use]
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// Fail the build when any post fails to parse.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Execute the full build process.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();
        let mut stats = BuildStats::default();

        info!(
            content = %self.content_dir.display(),
            output = %self.output_dir.display(),
            "starting build"
        );

        let collector = ContentCollector::new(self.config.clone(), &self.content_dir);
        let content = collector.collect()?;

        if self.strict && !content.failures.is_empty() {
            return Err(BuildError::Strict(content.failures));
        }

        self.clean_output()?;

        if let Some(ref static_dir) = self.static_dir {
            stats.assets = StaticAssets::copy(static_dir, &self.output_dir)?.copied;
        }

        self.write_index(&content)?;
        stats.posts = self.write_post_contents(content.contents.items())?;

        if self.config.rss.enabled {
            let path = self.output_dir.join(FEED_FILE);
            let mut file = fs::File::create(&path)?;
            RssGenerator::new(self.config.clone()).write_to(&content.posts, &mut file)?;
            debug!(path = %path.display(), "wrote feed");
            stats.feed = true;
        }

        stats.drafts_skipped = content.drafts_skipped;
        stats.failures = content.failures.len();
        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            posts = stats.posts,
            drafts = stats.drafts_skipped,
            failures = stats.failures,
            assets = stats.assets,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    /// Clean the output directory.
    fn clean_output(&self) -> Result<()> {
        if self.output_dir.exists() {
            debug!(dir = %self.output_dir.display(), "cleaning output directory");
            fs::remove_dir_all(&self.output_dir)?;
        }
        fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    fn write_index(&self, content: &SiteContent) -> Result<()> {
        let index = SiteIndex::new(SiteMeta::from_config(&self.config), content.posts.clone());
        let path = self.output_dir.join(INDEX_FILE);
        fs::write(&path, serde_json::to_string(&index)?)?;
        debug!(path = %path.display(), posts = index.posts.len(), "wrote site index");
        Ok(())
    }

    /// Write one JSON file per post body, in parallel.
    fn write_post_contents(&self, contents: &[PostContent]) -> Result<usize> {
        let dir = self.output_dir.join(POSTS_DIR);
        fs::create_dir_all(&dir)?;

        contents
            .par_iter()
            .map(|content| {
                let path = post_content_path(&self.output_dir, &content.slug);
                fs::write(&path, serde_json::to_string(content)?)?;
                debug!(path = %path.display(), "wrote post");
                Ok::<_, BuildError>(())
            })
            .collect::<Result<Vec<_>>>()
            .map(|written| written.len())
    }
}

/// Location of a post's content file inside an output directory.
pub fn post_content_path(output_dir: &Path, slug: &str) -> PathBuf {
    output_dir.join(POSTS_DIR).join(format!("{slug}.json"))
}

/// Read the site index back from a built output directory.
pub fn read_index(output_dir: &Path) -> Result<SiteIndex> {
    let raw = fs::read_to_string(output_dir.join(INDEX_FILE))?;
    Ok(serde_json::from_str(&raw)?)
}
