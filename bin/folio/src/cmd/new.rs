//! New command - create a draft post

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::Utc;
use color_eyre::eyre::{Result, WrapErr, bail};
use folio_core::{Config, post::validate_slug};
use folio_generator::collector::BLOG_DIR;

/// Run the new command.
///
/// Writes `{content_dir}/blog/{slug}.md` with draft frontmatter. Existing
/// files are never overwritten.
pub fn run(config_path: &Path, slug: &str, kind: &str) -> Result<()> {
    tracing::info!(slug, kind, "Creating new post");

    let content_dir = match Config::load(config_path) {
        Ok(config) => config.build.content_dir,
        Err(e) => {
            tracing::debug!(error = %e, "No usable configuration, using default content dir");
            "content".to_string()
        }
    };
    let root = config_path.parent().unwrap_or(Path::new("."));

    let file_path = create_post(&root.join(content_dir), slug, kind, &today())?;

    tracing::info!(?file_path, "Created new post");
    println!("Created: {}", file_path.display());

    Ok(())
}

/// Write the post source and return its path.
pub fn create_post(content_dir: &Path, slug: &str, kind: &str, date: &str) -> Result<PathBuf> {
    validate_slug(slug)?;

    if !matches!(kind, "essay" | "note" | "project") {
        bail!("Unknown post kind {kind:?}, expected essay, note or project");
    }

    let dir = content_dir.join(BLOG_DIR);
    let file_path = dir.join(format!("{slug}.md"));
    if file_path.exists() {
        bail!("{} already exists", file_path.display());
    }

    fs::create_dir_all(&dir).wrap_err("Failed to create directories")?;
    fs::write(&file_path, frontmatter(slug, kind, date)).wrap_err("Failed to write file")?;

    Ok(file_path)
}

fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

fn frontmatter(slug: &str, kind: &str, date: &str) -> String {
    let title = slug.replace(['-', '_'], " ");

    let project = if kind == "project" {
        "# repo: https://github.com/you/project\nstatus: active\n"
    } else {
        ""
    };

    format!(
        r#"---
title: "{title}"
date: {date}
type: {kind}
category: personal
tags: []
{project}draft: true
---

Write your post here.
"#
    )
}
