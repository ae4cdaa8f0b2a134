//! Site configuration management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Longest exit transition the overlay may be configured with.
const MAX_CLOSE_DELAY_MS: u64 = 5_000;

/// Main configuration structure for Folio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,

    /// RSS feed settings.
    #[serde(default)]
    pub rss: RssConfig,

    /// Post overlay and grid settings.
    #[serde(default)]
    pub overlay: OverlayConfig,

    /// Comments widget settings. Comments are disabled when absent.
    #[serde(default)]
    pub comments: Option<CommentsConfig>,

    /// Display labels for post categories, in filter bar order.
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title, also the identity tile heading.
    pub title: String,

    /// Base URL for the site (e.g., "https://example.com").
    pub base_url: String,

    /// Language code for the feed and the document.
    #[serde(default = "default_language")]
    pub language: String,

    /// Site description for the feed.
    #[serde(default)]
    pub description: Option<String>,

    /// Site author name.
    #[serde(default)]
    pub author: Option<String>,

    /// Short bio shown on the identity tile.
    #[serde(default)]
    pub bio: Option<String>,

    /// Social links shown on the identity tile.
    #[serde(default)]
    pub links: LinksConfig,
}

/// Social links for the identity tile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinksConfig {
    /// GitHub profile URL.
    #[serde(default)]
    pub github: Option<String>,

    /// LinkedIn profile URL.
    #[serde(default)]
    pub linkedin: Option<String>,

    /// Contact email address (without `mailto:`).
    #[serde(default)]
    pub email: Option<String>,
}

/// Build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Directory holding `blog/*.md` sources.
    #[serde(default = "default_content_dir")]
    pub content_dir: String,

    /// Output directory for the generated bundle.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Whether to include drafts.
    #[serde(default)]
    pub drafts: bool,

    /// Syntax highlighting theme name.
    #[serde(default = "default_syntax_theme")]
    pub syntax_theme: String,
}

/// RSS feed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RssConfig {
    /// Whether RSS feed is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum number of items in feed.
    #[serde(default = "default_rss_limit")]
    pub limit: usize,
}

/// Overlay and grid configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Delay between a close request and dropping the overlay content.
    /// Matches the exit transition duration in the stylesheet.
    #[serde(default = "default_close_delay_ms")]
    pub close_delay_ms: u64,

    /// Number of post tiles in the unfiltered grid, hero included.
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,
}

/// Giscus comments configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommentsConfig {
    /// Repository in `owner/name` form.
    pub repo: String,

    /// Repository node id.
    pub repo_id: String,

    /// Discussion category name.
    pub category: String,

    /// Discussion category node id.
    pub category_id: String,
}

/// A category label entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryConfig {
    /// Category slug as used in frontmatter.
    pub slug: String,

    /// Human readable label.
    pub label: String,
}

// Default value functions
fn default_language() -> String {
    "en".to_string()
}

fn default_content_dir() -> String {
    "content".to_string()
}

fn default_output_dir() -> String {
    "public".to_string()
}

fn default_syntax_theme() -> String {
    "base16-ocean.dark".to_string()
}

fn default_true() -> bool {
    true
}

fn default_rss_limit() -> usize {
    20
}

fn default_close_delay_ms() -> u64 {
    400
}

fn default_grid_size() -> usize {
    5
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            output_dir: default_output_dir(),
            drafts: false,
            syntax_theme: default_syntax_theme(),
        }
    }
}

impl Default for RssConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            limit: default_rss_limit(),
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            close_delay_ms: default_close_delay_ms(),
            grid_size: default_grid_size(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration, letting `FOLIO__SECTION__KEY` variables override the file.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("FOLIO").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.site.base_url.is_empty() {
            return Err(CoreError::config("site.base_url cannot be empty"));
        }

        if self.overlay.grid_size == 0 {
            return Err(CoreError::config("overlay.grid_size must be at least 1"));
        }

        if self.overlay.close_delay_ms > MAX_CLOSE_DELAY_MS {
            return Err(CoreError::config(format!(
                "overlay.close_delay_ms must not exceed {MAX_CLOSE_DELAY_MS}"
            )));
        }

        if self.site.base_url.ends_with('/') {
            tracing::warn!("site.base_url should not have a trailing slash");
        }

        Ok(())
    }

    /// Get the full URL for a path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}
