//! Frontmatter parsing for post sources.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    error::{CoreError, Result},
    post::{PostKind, PostLayout, ProjectStatus},
};

/// Frontmatter metadata of a post source file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostFrontmatter {
    /// Post title (required).
    pub title: String,

    /// Publication date (required), `YYYY-MM-DD` or RFC 3339.
    #[serde(default, with = "date_format")]
    pub date: Option<NaiveDate>,

    /// Display type of the post.
    #[serde(default, rename = "type")]
    pub kind: PostKind,

    /// Short excerpt for grid tiles. Derived from the body when absent.
    #[serde(default)]
    pub excerpt: Option<String>,

    /// Category slug.
    #[serde(default)]
    pub category: Option<String>,

    /// Tags for filtering.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Accent color for the tile border and overlay.
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
    #[serde(default, alias = "shaderColors")]
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

    /// Whether this is a draft.
    #[serde(default)]
    pub draft: bool,
}

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split content into frontmatter and body.
pub fn split_frontmatter(content: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let content = content.trim_start();

    let format = if content.starts_with("---") {
        FrontmatterFormat::Yaml
    } else if content.starts_with("+++") {
        FrontmatterFormat::Toml
    } else {
        return None;
    };

    let delimiter = format.delimiter();

    let after_first = &content[delimiter.len()..];
    let closing_pos = after_first.find(delimiter)?;

    let frontmatter = after_first[..closing_pos].trim();
    let body = after_first[closing_pos + delimiter.len()..].trim_start();

    Some((format, frontmatter, body))
}

/// Parse frontmatter from a post source, returning it with the remaining body.
///
/// Posts must carry frontmatter; a file without it is rejected.
pub fn parse_frontmatter(content: &str, path: &Path) -> Result<(PostFrontmatter, String)> {
    let Some((format, fm_str, body)) = split_frontmatter(content) else {
        return Err(CoreError::frontmatter(path, "missing frontmatter block"));
    };

    let frontmatter: PostFrontmatter = match format {
        FrontmatterFormat::Yaml => {
            serde_yaml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?
        }
        FrontmatterFormat::Toml => {
            toml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?
        }
    };

    frontmatter.validate(path)?;
    Ok((frontmatter, body.to_string()))
}

impl PostFrontmatter {
    /// Validate required fields.
    pub fn validate(&self, path: &Path) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(CoreError::frontmatter(path, "title is required"));
        }
        if self.date.is_none() {
            return Err(CoreError::frontmatter(path, "date is required"));
        }
        Ok(())
    }
}

mod date_format {
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_str(&d.format("%Y-%m-%d").to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let Some(raw) = Option::<String>::deserialize(d)? else {
            return Ok(None);
        };
        let raw = raw.trim();

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Ok(Some(date));
        }
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| Some(dt.date_naive()))
            .map_err(|_| serde::de::Error::custom(format!("invalid date: {raw}")))
    }
}
