//! Bento grid of post tiles.

use folio_core::{Filter, PostSummary, filter};
use leptos::prelude::*;

/// Tiles to show for the current filter.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout<'a> {
    /// Newest visible post, drawn large.
    pub hero: Option<&'a PostSummary>,
    pub rest: Vec<&'a PostSummary>,
    /// Whether a "View all" tile follows.
    pub has_more: bool,
}

/// Pick the tiles for `posts` (newest first).
///
/// Unfiltered, the grid holds `grid_size` posts including the hero, plus a
/// "View all" tile when more exist. A filter or `show_all` shows every match.
pub fn arrange<'a>(
    posts: &'a [PostSummary],
    active: Option<&Filter>,
    grid_size: usize,
    show_all: bool,
) -> GridLayout<'a> {
    let mut visible = filter::apply(posts, active).into_iter();
    let hero = visible.next();

    if active.is_some() || show_all {
        return GridLayout {
            hero,
            rest: visible.collect(),
            has_more: false,
        };
    }

    let rest: Vec<_> = visible.by_ref().take(grid_size.saturating_sub(1)).collect();
    GridLayout {
        hero,
        rest,
        has_more: visible.next().is_some(),
    }
}

/// Inline style carrying the post accent.
pub fn tile_style(post: &PostSummary) -> String {
    let accent = post
        .accent_color()
        .unwrap_or_else(|| "var(--accent)".to_string());
    let wash = if accent.starts_with('#') {
        format!("{accent}11")
    } else {
        format!("color-mix(in srgb, {accent} 7%, transparent)")
    };
    format!(
        "--tile-accent: {accent}; border-left: 3px solid {accent}; \
         background: linear-gradient(135deg, {wash} 0%, var(--tile-bg) 40%)"
    )
}

/// CSS background for a shader banner.
pub fn banner_gradient(post: &PostSummary) -> Option<String> {
    post.shader.as_ref()?;
    match post.shader_colors.as_slice() {
        [] => Some(format!(
            "linear-gradient(135deg, {} 0%, var(--tile-bg) 100%)",
            post.accent_color()
                .unwrap_or_else(|| "var(--accent)".to_string())
        )),
        [single] => Some(format!("linear-gradient(135deg, {single}, {single})")),
        colors => Some(format!("linear-gradient(135deg, {})", colors.join(", "))),
    }
}

/// "Jan 5" style date used on tiles.
pub fn short_date(post: &PostSummary) -> String {
    post.date.format("%b %-d").to_string()
}

/// Cover image or shader banner above a tile.
#[component]
fn TilePreview(post: PostSummary, height: &'static str) -> impl IntoView {
    if let Some(gradient) = banner_gradient(&post) {
        let style = format!("height: {height}; background: {gradient}");
        return view! { <div class="tile-preview tile-preview--shader" style=style></div> }
            .into_any();
    }
    match post.cover {
        Some(cover) => {
            let style = format!("width: 100%; height: {height}; object-fit: cover");
            view! {
              <div class="tile-preview">
                <img src=cover alt="" loading="lazy" style=style />
              </div>
            }
                .into_any()
        }
        None => ().into_any(),
    }
}

/// A clickable post tile. Opens on click or Enter.
#[component]
pub fn Tile(
    post: PostSummary,
    #[prop(optional)] hero: bool,
    on_open: Callback<String>,
) -> impl IntoView {
    let size = if hero { "tile--hero" } else { "tile--small" };
    let class = match post.layout {
        Some(layout) => format!("tile {size} tile--{} tile--clickable tile--colored", layout.as_str()),
        None => format!("tile {size} tile--clickable tile--colored"),
    };
    let slug = StoredValue::new(post.slug.clone());
    let kind_color = post
        .accent_color()
        .unwrap_or_else(|| "var(--text-secondary)".to_string());
    let style = tile_style(&post);
    let date = short_date(&post);
    let status = post.status.map(|s| s.as_str());
    let preview_height = if hero { "80px" } else { "48px" };

    view! {
      <div
        class=class
        role="button"
        tabindex="0"
        data-slug=post.slug.clone()
        style=style
        on:click=move |_| on_open.run(slug.get_value())
        on:keydown=move |ev: web_sys::KeyboardEvent| {
          if ev.key() == "Enter" {
            on_open.run(slug.get_value());
          }
        }
      >
        <TilePreview post=post.clone() height=preview_height />
        <div>
          <span class="tile-type" style=format!("color: {kind_color}")>
            {post.kind.as_str()}
          </span>
          <h2 class="tile-title">{post.title.clone()}</h2>
          <p class="tile-excerpt">{post.excerpt.clone()}</p>
        </div>
        {status
          .map(|s| {
            view! {
              <span class=format!("tile-status tile-status--{s}")>
                <span class="tile-status-dot" aria-hidden="true"></span>
                {s}
              </span>
            }
          })}
        <span class="tile-date">{date}</span>
      </div>
    }
}

/// Tile that expands the grid to every post.
#[component]
pub fn ViewAllTile(on_click: Callback<()>) -> impl IntoView {
    view! {
      <div
        class="tile tile--small tile--viewall tile--clickable"
        role="button"
        tabindex="0"
        on:click=move |_| on_click.run(())
        on:keydown=move |ev: web_sys::KeyboardEvent| {
          if ev.key() == "Enter" {
            on_click.run(());
          }
        }
      >
        <span class="viewall-text">"View all writing →"</span>
      </div>
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use folio_core::PostKind;

    use super::*;

    fn post(slug: &str, day: u32, tags: &[&str]) -> PostSummary {
        PostSummary {
            slug: slug.to_string(),
            title: slug.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            kind: PostKind::Essay,
            excerpt: String::new(),
            category: "personal".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            accent: None,
            hue: None,
            cover: None,
            shader: None,
            shader_colors: Vec::new(),
            layout: None,
            repo: None,
            demo: None,
            status: None,
        }
    }

    fn posts(n: u32) -> Vec<PostSummary> {
        (1..=n)
            .rev()
            .map(|d| {
                let tags: &[&str] = if d % 2 == 0 { &["even"] } else { &[] };
                post(&format!("p{d}"), d, tags)
            })
            .collect()
    }

    fn slugs(layout: &GridLayout<'_>) -> Vec<String> {
        layout
            .hero
            .into_iter()
            .chain(layout.rest.iter().copied())
            .map(|p| p.slug.clone())
            .collect()
    }

    #[test]
    fn test_unfiltered_grid_is_capped() {
        let all = posts(8);
        let layout = arrange(&all, None, 5, false);

        assert_eq!(slugs(&layout), vec!["p8", "p7", "p6", "p5", "p4"]);
        assert!(layout.has_more);
    }

    #[test]
    fn test_no_view_all_when_everything_fits() {
        let all = posts(5);
        let layout = arrange(&all, None, 5, false);
        assert_eq!(layout.rest.len(), 4);
        assert!(!layout.has_more);
    }

    #[test]
    fn test_show_all_lists_everything() {
        let all = posts(8);
        let layout = arrange(&all, None, 5, true);
        assert_eq!(slugs(&layout).len(), 8);
        assert!(!layout.has_more);
    }

    #[test]
    fn test_filter_shows_every_match() {
        let all = posts(12);
        let tag = Filter::Tag("even".to_string());
        let layout = arrange(&all, Some(&tag), 3, false);

        assert_eq!(slugs(&layout), vec!["p12", "p10", "p8", "p6", "p4", "p2"]);
        assert!(!layout.has_more);
    }

    #[test]
    fn test_empty_grid() {
        let layout = arrange(&[], None, 5, false);
        assert!(layout.hero.is_none());
        assert!(layout.rest.is_empty());
        assert!(!layout.has_more);
    }

    #[test]
    fn test_grid_size_one_is_hero_only() {
        let all = posts(3);
        let layout = arrange(&all, None, 1, false);
        assert_eq!(slugs(&layout), vec!["p3"]);
        assert!(layout.has_more);
    }

    #[test]
    fn test_tile_style_uses_hue() {
        let mut p = post("x", 1, &[]);
        p.hue = Some(200);
        let style = tile_style(&p);
        assert!(style.contains("--tile-accent: hsl(200, 65%, 55%)"));
        assert!(style.contains("color-mix"));

        p.accent = Some("#ff6600".to_string());
        assert!(tile_style(&p).contains("#ff660011 0%"));
    }

    #[test]
    fn test_banner_gradient() {
        let mut p = post("x", 1, &[]);
        assert_eq!(banner_gradient(&p), None);

        p.shader = Some("mesh".to_string());
        p.shader_colors = vec!["#111".to_string(), "#222".to_string()];
        assert_eq!(
            banner_gradient(&p).as_deref(),
            Some("linear-gradient(135deg, #111, #222)")
        );
    }

    #[test]
    fn test_short_date() {
        assert_eq!(short_date(&post("x", 5, &[])), "Jan 5");
    }
}
