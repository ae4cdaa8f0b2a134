//! Post summaries and full post content.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    error::{CoreError, Result},
    frontmatter::PostFrontmatter,
};

/// Category assigned to posts that do not name one.
pub const DEFAULT_CATEGORY: &str = "personal";

/// Display type of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    /// Long-form writing.
    #[default]
    Essay,
    /// Short note.
    Note,
    /// Project write-up.
    Project,
}

impl PostKind {
    /// Lowercase label used on tiles and in the overlay meta line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Essay => "essay",
            Self::Note => "note",
            Self::Project => "project",
        }
    }
}

/// Preferred tile size in the bento grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostLayout {
    Wide,
    Tall,
    Small,
}

impl PostLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wide => "wide",
            Self::Tall => "tall",
            Self::Small => "small",
        }
    }
}

/// Status of a project post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Archived,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }
}

/// Lightweight metadata for a post, enough to render a grid tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    /// Unique identifier, also the `/blog/{slug}` path segment.
    pub slug: String,

    /// Post title.
    pub title: String,

    /// Publication date.
    pub date: NaiveDate,

    /// Display type.
    pub kind: PostKind,

    /// Short excerpt.
    pub excerpt: String,

    /// Category slug.
    pub category: String,

    /// Tags, possibly empty.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Accent color.
    #[serde(default)]
    pub accent: Option<String>,

    /// Hue used when no accent is given.
    #[serde(default)]
    pub hue: Option<u16>,

    /// Cover image path.
    #[serde(default)]
    pub cover: Option<String>,

    /// Procedural banner name.
    #[serde(default)]
    pub shader: Option<String>,

    /// Banner colors.
    #[serde(default)]
    pub shader_colors: Vec<String>,

    /// Preferred tile size.
    #[serde(default)]
    pub layout: Option<PostLayout>,

    /// Source repository (projects).
    #[serde(default)]
    pub repo: Option<String>,

    /// Live demo (projects).
    #[serde(default)]
    pub demo: Option<String>,

    /// Project status.
    #[serde(default)]
    pub status: Option<ProjectStatus>,
}

impl PostSummary {
    /// Build a summary from parsed frontmatter.
    ///
    /// `fallback_excerpt` is used when the frontmatter has none.
    pub fn from_frontmatter(
        slug: impl Into<String>,
        fm: PostFrontmatter,
        fallback_excerpt: impl FnOnce() -> String,
    ) -> Result<Self> {
        let slug = slug.into();
        validate_slug(&slug)?;

        let date = fm
            .date
            .ok_or_else(|| CoreError::slug(slug.clone(), "post has no date"))?;
        let excerpt = fm.excerpt.unwrap_or_else(fallback_excerpt);
        let category = fm
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        Ok(Self {
            slug,
            title: fm.title,
            date,
            kind: fm.kind,
            excerpt,
            category,
            tags: fm.tags,
            accent: fm.accent,
            hue: fm.hue,
            cover: fm.cover,
            shader: fm.shader,
            shader_colors: fm.shader_colors,
            layout: fm.layout,
            repo: fm.repo,
            demo: fm.demo,
            status: fm.status,
        })
    }

    /// URL path of the expanded post.
    pub fn path(&self) -> String {
        format!("/blog/{}", self.slug)
    }

    /// Accent color, derived from the hue when no explicit accent exists.
    pub fn accent_color(&self) -> Option<String> {
        self.accent
            .clone()
            .or_else(|| self.hue.map(|h| format!("hsl({h}, 65%, 55%)")))
    }

    /// Whether the tag list contains `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Whether this project post has anything for the project metadata bar.
    pub fn has_project_meta(&self) -> bool {
        self.kind == PostKind::Project
            && (self.repo.is_some() || self.demo.is_some() || self.status.is_some())
    }
}

/// Full renderable content of a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostContent {
    /// Slug of the post this content belongs to.
    pub slug: String,

    /// Rendered HTML body.
    pub html: String,

    /// Reading time in minutes.
    pub reading_time: u32,

    /// Word count of the source body.
    pub word_count: u32,
}

impl PostContent {
    /// Build content from rendered HTML and the raw source body.
    pub fn new(slug: impl Into<String>, html: String, raw: &str) -> Self {
        let word_count = raw.split_whitespace().count() as u32;
        // 200 words per minute, never less than a minute
        let reading_time = (word_count / 200).max(1);

        Self {
            slug: slug.into(),
            html,
            reading_time,
            word_count,
        }
    }
}

/// Sort posts newest first. Posts sharing a date are ordered by slug.
pub fn sort_posts(posts: &mut [PostSummary]) {
    posts.sort_by(|a, b| match b.date.cmp(&a.date) {
        Ordering::Equal => a.slug.cmp(&b.slug),
        other => other,
    });
}

/// Check that a slug is usable as a single path segment.
pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() {
        return Err(CoreError::slug(slug, "slug cannot be empty"));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(CoreError::slug(
            slug,
            "only lowercase letters, digits, '-' and '_' are allowed",
        ));
    }
    Ok(())
}
