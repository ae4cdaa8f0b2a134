//! Content collection.
//!
//! Reads `blog/*.md` under the content directory and turns every source into a
//! [`PostSummary`] for the grid and a [`PostContent`] for the overlay.

use std::{
    fs,
    path::{Path, PathBuf},
};

use folio_core::{Config, PostContent, PostSummary, Registry, sort_posts};
use folio_parser::MarkdownParser;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Directory under the content root that holds post sources.
pub const BLOG_DIR: &str = "blog";

/// Content collection errors.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parser error.
    #[error("parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// The posts directory does not exist.
    #[error("posts directory not found: {0}")]
    MissingDir(PathBuf),
}

/// Result type for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;

/// A source file that could not be turned into a post.
#[derive(Debug, Clone)]
pub struct CollectFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Collected site content.
#[derive(Debug, Default)]
pub struct SiteContent {
    /// Summaries, newest first.
    pub posts: Vec<PostSummary>,

    /// Rendered bodies keyed by slug.
    pub contents: Registry<PostContent>,

    /// Drafts left out of the build.
    pub drafts_skipped: usize,

    /// Sources that failed to parse.
    pub failures: Vec<CollectFailure>,
}

struct CollectedPost {
    summary: PostSummary,
    content: PostContent,
    draft: bool,
}

/// Content collector that walks the posts directory and parses files.
#[derive(Debug)]
pub struct ContentCollector {
    config: Config,
    parser: MarkdownParser,
    content_dir: PathBuf,
}

impl ContentCollector {
    /// Create a new content collector.
    #[must_use]
    pub fn new(config: Config, content_dir: impl Into<PathBuf>) -> Self {
        let parser = MarkdownParser::with_theme(&config.build.syntax_theme);
        Self {
            config,
            parser,
            content_dir: content_dir.into(),
        }
    }

    /// Directory the post sources are read from.
    pub fn posts_dir(&self) -> PathBuf {
        self.content_dir.join(BLOG_DIR)
    }

    /// Collect all posts.
    ///
    /// Files that fail to parse are logged and recorded in
    /// [`SiteContent::failures`]; they never abort the collection.
    pub fn collect(&self) -> Result<SiteContent> {
        let dir = self.posts_dir();
        info!(dir = %dir.display(), "collecting posts");

        let files = find_post_files(&dir)?;
        info!(count = files.len(), "found post files");

        let results: Vec<_> = files
            .par_iter()
            .map(|path| (path, self.parse_file(path)))
            .collect();

        let mut content = SiteContent::default();
        let mut posts = Vec::with_capacity(results.len());
        let mut bodies = Vec::with_capacity(results.len());

        for (path, result) in results {
            match result {
                Ok(post) if post.draft && !self.config.build.drafts => {
                    debug!(slug = %post.summary.slug, "skipping draft");
                    content.drafts_skipped += 1;
                }
                Ok(post) => {
                    posts.push(post.summary);
                    bodies.push(post.content);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to parse post");
                    content.failures.push(CollectFailure {
                        path: path.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        sort_posts(&mut posts);
        content.posts = posts;
        content.contents = Registry::new(bodies);

        info!(
            posts = content.posts.len(),
            drafts = content.drafts_skipped,
            failures = content.failures.len(),
            "collection complete"
        );
        Ok(content)
    }

    fn parse_file(&self, path: &Path) -> Result<CollectedPost> {
        let source = fs::read_to_string(path)?;
        let parse_error = |message: String| CollectorError::Parse {
            path: path.to_path_buf(),
            message,
        };

        let slug = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| parse_error("file has no name".to_string()))?;

        let parsed = self
            .parser
            .parse(&source, path)
            .map_err(|e| parse_error(e.to_string()))?;

        let draft = parsed.frontmatter.draft;
        let excerpt = parsed.excerpt;
        let summary = PostSummary::from_frontmatter(&slug, parsed.frontmatter, || excerpt)
            .map_err(|e| parse_error(e.to_string()))?;
        let content = PostContent::new(slug, parsed.html, &parsed.raw);

        Ok(CollectedPost {
            summary,
            content,
            draft,
        })
    }
}

/// List `*.md` files directly inside `dir`, sorted by name. Hidden files are skipped.
fn find_post_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(CollectorError::MissingDir(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if path
            .file_name()
            .is_some_and(|n| n.to_string_lossy().starts_with('.'))
        {
            continue;
        }

        if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use folio_core::config::{BuildConfig, OverlayConfig, RssConfig, SiteConfig};
    use tempfile::TempDir;

    use super::*;

    fn test_config(drafts: bool) -> Config {
        Config {
            site: SiteConfig {
                title: "Test".to_string(),
                base_url: "https://example.com".to_string(),
                language: "en".to_string(),
                description: None,
                author: None,
                bio: None,
                links: Default::default(),
            },
            build: BuildConfig {
                drafts,
                ..Default::default()
            },
            rss: RssConfig::default(),
            overlay: OverlayConfig::default(),
            comments: None,
            categories: Vec::new(),
        }
    }

    fn write_post(dir: &Path, name: &str, frontmatter: &str, body: &str) {
        let blog = dir.join(BLOG_DIR);
        fs::create_dir_all(&blog).unwrap();
        fs::write(blog.join(name), format!("---\n{frontmatter}\n---\n\n{body}\n")).unwrap();
    }

    #[test]
    fn test_collect_posts() {
        let dir = TempDir::new().unwrap();
        write_post(
            dir.path(),
            "first.md",
            "title: First\ndate: 2024-01-01\ntags: [rust]",
            "The first post.",
        );
        write_post(
            dir.path(),
            "second.md",
            "title: Second\ndate: 2024-02-01\nexcerpt: Custom excerpt",
            "The second post.",
        );

        let collector = ContentCollector::new(test_config(false), dir.path());
        let content = collector.collect().unwrap();

        let slugs: Vec<_> = content.posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["second", "first"]);
        assert_eq!(content.posts[0].excerpt, "Custom excerpt");
        assert_eq!(content.posts[1].excerpt, "The first post.");
        assert_eq!(content.contents.len(), 2);

        let first = content.contents.lookup("first").found().unwrap();
        assert!(first.html.contains("<p>The first post.</p>"));
        assert_eq!(first.reading_time, 1);
    }

    #[test]
    fn test_drafts_skipped_by_default() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "live.md", "title: Live\ndate: 2024-01-01", "Body");
        write_post(
            dir.path(),
            "wip.md",
            "title: WIP\ndate: 2024-01-02\ndraft: true",
            "Body",
        );

        let content = ContentCollector::new(test_config(false), dir.path())
            .collect()
            .unwrap();
        assert_eq!(content.posts.len(), 1);
        assert_eq!(content.drafts_skipped, 1);
        assert!(!content.contents.contains("wip"));

        let content = ContentCollector::new(test_config(true), dir.path())
            .collect()
            .unwrap();
        assert_eq!(content.posts.len(), 2);
        assert_eq!(content.drafts_skipped, 0);
    }

    #[test]
    fn test_failures_recorded_not_fatal() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "good.md", "title: Good\ndate: 2024-01-01", "Body");
        write_post(dir.path(), "undated.md", "title: Undated", "Body");

        let content = ContentCollector::new(test_config(false), dir.path())
            .collect()
            .unwrap();

        assert_eq!(content.posts.len(), 1);
        assert_eq!(content.failures.len(), 1);
        assert!(content.failures[0].path.ends_with("undated.md"));
    }

    #[test]
    fn test_non_markdown_and_hidden_files_ignored() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "post.md", "title: Post\ndate: 2024-01-01", "Body");
        let blog = dir.path().join(BLOG_DIR);
        fs::write(blog.join("notes.txt"), "not a post").unwrap();
        fs::write(blog.join(".hidden.md"), "---\ntitle: x\n---\n").unwrap();

        let files = find_post_files(&blog).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("post.md"));
    }

    #[test]
    fn test_missing_posts_dir() {
        let dir = TempDir::new().unwrap();
        let result = ContentCollector::new(test_config(false), dir.path()).collect();
        assert!(matches!(result, Err(CollectorError::MissingDir(_))));
    }
}
