//! Category and tag filter pills.

use folio_core::{
    Filter, PostSummary, SiteMeta, TagCount,
    filter::{self, category_counts, tag_counts},
};
use leptos::prelude::*;

/// A category pill with its post count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPill {
    pub slug: String,
    pub label: String,
    pub count: usize,
}

/// Categories that have posts, in configured order. Unlisted ones follow by slug.
pub fn category_pills(site: &SiteMeta, posts: &[PostSummary]) -> Vec<CategoryPill> {
    let mut pills: Vec<_> = category_counts(posts)
        .into_iter()
        .map(|(slug, count)| CategoryPill {
            label: site.category_label(&slug).to_string(),
            slug,
            count,
        })
        .collect();
    pills.sort_by_key(|p| site.category_rank(&p.slug));
    pills
}

/// The bar is hidden when there is nothing to choose between.
pub fn bar_visible(categories: &[CategoryPill], tags: &[TagCount]) -> bool {
    categories.len() > 1 || !tags.is_empty()
}

fn pill_class(active: bool, tag: bool) -> &'static str {
    match (active, tag) {
        (false, false) => "filter-pill",
        (true, false) => "filter-pill filter-pill--active",
        (false, true) => "filter-pill filter-pill--tag",
        (true, true) => "filter-pill filter-pill--tag filter-pill--active",
    }
}

/// Filter bar above the grid.
#[component]
pub fn FilterBar(
    site: StoredValue<SiteMeta>,
    posts: StoredValue<Vec<PostSummary>>,
    active: RwSignal<Option<Filter>>,
    on_filter: Callback<Option<Filter>>,
) -> impl IntoView {
    let categories = posts.with_value(|p| site.with_value(|s| category_pills(s, p)));
    let tags = posts.with_value(|p| tag_counts(p));
    let total = posts.with_value(|p| p.len());

    if !bar_visible(&categories, &tags) {
        return ().into_any();
    }

    let click = move |clicked: Filter| {
        on_filter.run(filter::toggle(active.get_untracked().as_ref(), clicked));
    };
    let is_active = move |candidate: &Filter| active.with(|a| a.as_ref() == Some(candidate));

    let category_views = categories
        .into_iter()
        .map(|pill| {
            let f = Filter::Category(pill.slug.clone());
            let f_click = f.clone();
            let f_pressed = f.clone();
            view! {
              <button
                class=move || pill_class(is_active(&f), false)
                aria-pressed=move || is_active(&f_pressed).to_string()
                aria-label=format!("Filter by {}", pill.label)
                on:click=move |_| click(f_click.clone())
              >
                {format!("{} ({})", pill.label, pill.count)}
              </button>
            }
        })
        .collect_view();

    let has_tags = !tags.is_empty();
    let tag_views = tags
        .into_iter()
        .map(|TagCount { tag, count }| {
            let f = Filter::Tag(tag.clone());
            let f_click = f.clone();
            let f_pressed = f.clone();
            view! {
              <button
                class=move || pill_class(is_active(&f), true)
                aria-pressed=move || is_active(&f_pressed).to_string()
                aria-label=format!("Filter by {tag}")
                on:click=move |_| click(f_click.clone())
              >
                {format!("{tag} ({count})")}
              </button>
            }
        })
        .collect_view();

    view! {
      <nav class="filter-bar" aria-label="Filter posts">
        <div class="filter-bar-scroll">
          <button
            class=move || pill_class(active.with(Option::is_none), false)
            aria-pressed=move || active.with(Option::is_none).to_string()
            on:click=move |_| on_filter.run(None)
          >
            {format!("All ({total})")}
          </button>
          {category_views}
          <Show when=move || has_tags>
            <span class="filter-divider" aria-hidden="true"></span>
          </Show>
          {tag_views}
        </div>
      </nav>
    }
        .into_any()
}
