//! End-to-end build tests.
//!
//! Each test lays out a small site in a temp directory, runs the builder and
//! inspects the bundle the frontend would fetch.

use std::{fs, path::Path};

use folio_core::{Config, PostContent, SiteIndex};
use folio_generator::{BuildError, Builder, build::post_content_path, read_index};
use tempfile::TempDir;

const CONFIG: &str = r#"
[site]
title = "Ada Example"
base_url = "https://example.com"
bio = "Data, code, and the occasional print."

[overlay]
close_delay_ms = 350
grid_size = 3

[[categories]]
slug = "technical"
label = "Technical"
"#;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn sample_site() -> (TempDir, Config) {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(root, "folio.toml", CONFIG);
    write(
        root,
        "content/blog/hello-world.md",
        "---\ntitle: Hello World\ndate: 2024-01-14\ncategory: personal\ntags: [intro]\n---\n\nFirst words.\n",
    );
    write(
        root,
        "content/blog/spatial-joins.md",
        "---\ntitle: Spatial Joins\ndate: 2024-03-02\ncategory: technical\ntags: [gis, rust]\ntype: project\nrepo: https://github.com/ada/joins\nstatus: active\n---\n\nJoining points to polygons.\n\n```rust\nfn join() {}\n```\n",
    );
    write(
        root,
        "content/blog/unfinished.md",
        "---\ntitle: Unfinished\ndate: 2024-04-01\ndraft: true\n---\n\nNot yet.\n",
    );
    write(root, "static/index.html", "<!doctype html><title>app</title>");
    write(root, "static/style.css", "body { margin: 0 }");

    let config = Config::load(&root.join("folio.toml")).unwrap();
    (dir, config)
}

#[test]
fn test_build_writes_index_and_posts() {
    let (dir, config) = sample_site();
    let out = dir.path().join("public");

    let stats = Builder::new(config, dir.path().join("content"), &out)
        .with_static_dir(dir.path().join("static"))
        .build()
        .unwrap();

    assert_eq!(stats.posts, 2);
    assert_eq!(stats.drafts_skipped, 1);
    assert_eq!(stats.assets, 2);
    assert!(stats.feed);

    let index: SiteIndex = read_index(&out).unwrap();
    let slugs: Vec<_> = index.posts.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["spatial-joins", "hello-world"]);
    assert_eq!(index.site.title, "Ada Example");
    assert_eq!(index.site.close_delay_ms, 350);
    assert_eq!(index.site.grid_size, 3);
    assert_eq!(index.site.category_label("technical"), "Technical");

    let raw = fs::read_to_string(post_content_path(&out, "spatial-joins")).unwrap();
    let content: PostContent = serde_json::from_str(&raw).unwrap();
    assert_eq!(content.slug, "spatial-joins");
    assert!(content.html.contains("code-block"));

    assert!(!post_content_path(&out, "unfinished").exists());
    assert!(out.join("index.html").exists());
    assert!(out.join("style.css").exists());

    let feed = fs::read_to_string(out.join("rss.xml")).unwrap();
    assert!(feed.contains("https://example.com/blog/hello-world"));
    assert!(!feed.contains("Unfinished"));
}

#[test]
fn test_every_summary_has_content() {
    let (dir, config) = sample_site();
    let out = dir.path().join("public");

    Builder::new(config, dir.path().join("content"), &out)
        .build()
        .unwrap();

    let index = read_index(&out).unwrap();
    for post in &index.posts {
        assert!(
            post_content_path(&out, &post.slug).exists(),
            "missing content for {}",
            post.slug
        );
    }
}

#[test]
fn test_build_cleans_previous_output() {
    let (dir, config) = sample_site();
    let out = dir.path().join("public");
    write(&out, "posts/stale.json", "{}");

    Builder::new(config, dir.path().join("content"), &out)
        .build()
        .unwrap();

    assert!(!post_content_path(&out, "stale").exists());
}

#[test]
fn test_drafts_included_when_configured() {
    let (dir, mut config) = sample_site();
    config.build.drafts = true;
    let out = dir.path().join("public");

    let stats = Builder::new(config, dir.path().join("content"), &out)
        .build()
        .unwrap();

    assert_eq!(stats.posts, 3);
    assert!(post_content_path(&out, "unfinished").exists());
}

#[test]
fn test_feed_disabled() {
    let (dir, mut config) = sample_site();
    config.rss.enabled = false;
    let out = dir.path().join("public");

    let stats = Builder::new(config, dir.path().join("content"), &out)
        .build()
        .unwrap();

    assert!(!stats.feed);
    assert!(!out.join("rss.xml").exists());
}

#[test]
fn test_strict_build_rejects_broken_post() {
    let (dir, config) = sample_site();
    write(
        dir.path(),
        "content/blog/broken.md",
        "---\ntitle: Broken\n---\n\nNo date.\n",
    );
    let out = dir.path().join("public");

    let lenient = Builder::new(config.clone(), dir.path().join("content"), &out)
        .build()
        .unwrap();
    assert_eq!(lenient.failures, 1);
    assert_eq!(lenient.posts, 2);

    let strict = Builder::new(config, dir.path().join("content"), &out)
        .strict(true)
        .build();
    assert!(matches!(strict, Err(BuildError::Strict(ref f)) if f.len() == 1));
}

