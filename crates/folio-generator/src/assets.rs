//! Static asset copying.
//!
//! Copies the app shell, stylesheet and images into the output directory.
//! Paths the build generates itself are never overwritten by a static file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info, warn};

/// Output paths owned by the generator.
pub const RESERVED_PATHS: &[&str] = &["index.json", "posts", "rss.xml"];

/// Asset copying errors.
#[derive(Debug, Error)]
pub enum AssetError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Path outside the source directory.
    #[error("invalid asset path: {0}")]
    InvalidPath(PathBuf),
}

/// Result type for asset operations.
pub type Result<T> = std::result::Result<T, AssetError>;

/// Summary of a static copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    /// Files copied.
    pub copied: usize,

    /// Files skipped because they collide with generated output.
    pub shadowed: Vec<String>,
}

/// Copies a static directory tree into the output directory.
#[derive(Debug, Default)]
pub struct StaticAssets;

impl StaticAssets {
    /// Copy everything under `source_dir` into `dest_dir`.
    ///
    /// A missing source directory copies nothing.
    pub fn copy(source_dir: &Path, dest_dir: &Path) -> Result<CopyReport> {
        let mut report = CopyReport::default();

        if !source_dir.exists() {
            debug!(dir = %source_dir.display(), "static directory does not exist, skipping");
            return Ok(report);
        }

        copy_dir(source_dir, source_dir, dest_dir, &mut report)?;

        info!(
            copied = report.copied,
            shadowed = report.shadowed.len(),
            "static assets copied"
        );
        Ok(report)
    }
}

fn copy_dir(base: &Path, current: &Path, dest: &Path, report: &mut CopyReport) -> Result<()> {
    for entry in fs::read_dir(current)? {
        let path = entry?.path();

        if path
            .file_name()
            .is_some_and(|n| n.to_string_lossy().starts_with('.'))
        {
            continue;
        }

        let relative = path
            .strip_prefix(base)
            .map_err(|_| AssetError::InvalidPath(path.clone()))?;

        if is_reserved(relative) {
            let shown = relative.to_string_lossy().replace('\\', "/");
            warn!(path = %shown, "static file shadows generated output, skipped");
            report.shadowed.push(shown);
            continue;
        }

        if path.is_dir() {
            copy_dir(base, &path, dest, report)?;
        } else if path.is_file() {
            let target = dest.join(relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(&path, &target)?;
            report.copied += 1;
            debug!(src = %path.display(), dest = %target.display(), "copied asset");
        }
    }

    Ok(())
}

fn is_reserved(relative: &Path) -> bool {
    relative
        .components()
        .next()
        .is_some_and(|first| RESERVED_PATHS.iter().any(|r| first.as_os_str() == *r))
}
