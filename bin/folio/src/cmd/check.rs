//! Check command - validate configuration and content

use std::{collections::BTreeSet, path::Path};

use color_eyre::eyre::{Result, bail};
use folio_core::Config;
use folio_generator::{ContentCollector, SiteContent};

use super::build::STATIC_DIR;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates the configuration and every post source without writing output.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and content");

    let result = validate(config_path);

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Collect every problem with the site rooted next to `config_path`.
pub fn validate(config_path: &Path) -> ValidationResult {
    let mut result = ValidationResult::default();

    let config = match Config::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            return result;
        }
    };
    check_config_values(&config, &mut result);

    let root = config_path.parent().unwrap_or(Path::new("."));
    if !root.join(STATIC_DIR).join("index.html").is_file() {
        result.add_warning(format!(
            "{STATIC_DIR}/index.html missing, the bundle will have no app shell"
        ));
    }

    let collector = ContentCollector::new(config.clone(), root.join(&config.build.content_dir));
    match collector.collect() {
        Ok(content) => check_content(&config, &content, &mut result),
        Err(e) => result.add_error(format!("Content error: {e}")),
    }

    result
}

fn check_config_values(config: &Config, result: &mut ValidationResult) {
    if !config.site.base_url.starts_with("http") {
        result.add_warning("site.base_url should start with http:// or https://");
    }

    if config.site.base_url.ends_with('/') {
        result.add_warning("site.base_url should not end with '/'");
    }

    let mut seen = BTreeSet::new();
    for category in &config.categories {
        if !seen.insert(category.slug.as_str()) {
            result.add_warning(format!("category {:?} is listed twice", category.slug));
        }
    }
}

fn check_content(config: &Config, content: &SiteContent, result: &mut ValidationResult) {
    for failure in &content.failures {
        result.add_error(format!("{}: {}", failure.path.display(), failure.message));
    }

    if content.posts.is_empty() {
        result.add_warning("no published posts");
    }

    if !config.categories.is_empty() {
        let labelled: BTreeSet<&str> = config.categories.iter().map(|c| c.slug.as_str()).collect();
        let unlabelled: BTreeSet<&str> = content
            .posts
            .iter()
            .map(|post| post.category.as_str())
            .filter(|category| !labelled.contains(category))
            .collect();
        for category in unlabelled {
            result.add_warning(format!("category {category:?} has no label in [[categories]]"));
        }
    }

    println!(
        "  ✓ {} posts, {} drafts skipped, {} failed",
        content.posts.len(),
        content.drafts_skipped,
        content.failures.len()
    );
}
