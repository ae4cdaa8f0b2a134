//! The site index shipped to the browser as `index.json`.

use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    post::{PostSummary, sort_posts},
};

/// Social links on the identity tile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Settings the comments widget needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentsMeta {
    pub repo: String,
    pub repo_id: String,
    pub category: String,
    pub category_id: String,
}

/// Category slug with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLabel {
    pub slug: String,
    pub label: String,
}

/// Site metadata needed by the browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteMeta {
    pub title: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub links: SocialLinks,
    #[serde(default)]
    pub comments: Option<CommentsMeta>,
    #[serde(default)]
    pub categories: Vec<CategoryLabel>,
    pub close_delay_ms: u64,
    pub grid_size: usize,
}

impl SiteMeta {
    pub fn from_config(config: &Config) -> Self {
        let links = &config.site.links;
        Self {
            title: config.site.title.clone(),
            bio: config.site.bio.clone(),
            author: config.site.author.clone(),
            links: SocialLinks {
                github: links.github.clone(),
                linkedin: links.linkedin.clone(),
                email: links.email.clone(),
            },
            comments: config.comments.as_ref().map(|c| CommentsMeta {
                repo: c.repo.clone(),
                repo_id: c.repo_id.clone(),
                category: c.category.clone(),
                category_id: c.category_id.clone(),
            }),
            categories: config
                .categories
                .iter()
                .map(|c| CategoryLabel {
                    slug: c.slug.clone(),
                    label: c.label.clone(),
                })
                .collect(),
            close_delay_ms: config.overlay.close_delay_ms,
            grid_size: config.overlay.grid_size,
        }
    }

    /// Display label for a category slug.
    pub fn category_label<'a>(&'a self, slug: &'a str) -> &'a str {
        self.categories
            .iter()
            .find(|c| c.slug == slug)
            .map(|c| c.label.as_str())
            .unwrap_or(slug)
    }

    /// Position of a category in the configured order; unlisted ones sort last.
    pub fn category_rank(&self, slug: &str) -> usize {
        self.categories
            .iter()
            .position(|c| c.slug == slug)
            .unwrap_or(self.categories.len())
    }
}

/// Everything the grid needs on page load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteIndex {
    pub site: SiteMeta,
    /// Newest first.
    pub posts: Vec<PostSummary>,
}

impl SiteIndex {
    pub fn new(site: SiteMeta, mut posts: Vec<PostSummary>) -> Self {
        sort_posts(&mut posts);
        Self { site, posts }
    }
}
