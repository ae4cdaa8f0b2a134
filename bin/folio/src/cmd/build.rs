//! Build command - generates the site bundle

use std::{path::Path, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use folio_core::Config;
use folio_generator::{BuildStats, Builder};

/// Directory copied verbatim into the bundle when present.
pub const STATIC_DIR: &str = "static";

/// Run the build command.
///
/// Configuration comes from `config_path` with `FOLIO__*` environment
/// overrides; the flags override both.
pub fn run(
    config_path: &Path,
    output: Option<&Path>,
    drafts: bool,
    base_url: Option<&str>,
    strict: bool,
) -> Result<()> {
    let start = Instant::now();
    tracing::info!(?config_path, ?output, drafts, ?base_url, strict, "Starting build");

    let mut config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;

    if let Some(output) = output {
        config.build.output_dir = output.to_string_lossy().to_string();
    }

    if drafts {
        config.build.drafts = true;
    }

    if let Some(url) = base_url {
        tracing::info!(base_url = url, "Overriding site base URL from CLI");
        config.site.base_url = url.trim_end_matches('/').to_string();
    }

    tracing::debug!(?config, "Loaded configuration");

    let root = config_path.parent().unwrap_or(Path::new("."));
    let content_dir = root.join(&config.build.content_dir);
    let output_dir = root.join(&config.build.output_dir);
    let static_dir = root.join(STATIC_DIR);

    let mut builder = Builder::new(config, &content_dir, &output_dir).strict(strict);
    if static_dir.is_dir() {
        tracing::info!("Found static directory, will copy to output");
        builder = builder.with_static_dir(static_dir);
    }

    let stats = builder.build().wrap_err("Build failed")?;
    print_build_stats(&stats, &output_dir);

    tracing::info!(?stats, elapsed = ?start.elapsed(), "Build completed successfully");

    Ok(())
}

fn print_build_stats(stats: &BuildStats, output_dir: &Path) {
    println!();
    println!("  Build completed successfully!");
    println!();
    println!("  Posts:      {}", stats.posts);
    println!("  Drafts:     {} skipped", stats.drafts_skipped);
    if stats.failures > 0 {
        println!("  Failed:     {} (run `folio check` for details)", stats.failures);
    }
    println!("  Assets:     {}", stats.assets);
    println!("  Feed:       {}", if stats.feed { "rss.xml" } else { "disabled" });
    println!();
    println!("  Duration:   {}ms", stats.duration_ms);
    println!("  Output:     {}", output_dir.display());
    println!();
}
