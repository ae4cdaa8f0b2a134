//! Expanded post view shown in the overlay.

use folio_core::{CommentsMeta, PostKind, PostSummary};
use leptos::{html, prelude::*};

use crate::{
    comments::Comments,
    grid::banner_gradient,
    host::BrowserHost,
    overlay::{ContentSlot, OverlayController, OverlayState},
    theme::Theme,
};

/// Shown when the bundle has no content for a known post.
pub const MISSING_MESSAGE: &str = "This post could not be found.";
/// Shown when fetching the content failed.
pub const FAILED_MESSAGE: &str = "This post failed to load.";

/// "essay · January 14, 2024".
pub fn meta_line(post: &PostSummary) -> String {
    format!("{} · {}", post.kind.as_str(), post.date.format("%B %-d, %Y"))
}

/// Placeholder text for a content slot without a body.
pub fn slot_message(slot: &ContentSlot) -> Option<&'static str> {
    match slot {
        ContentSlot::Missing => Some(MISSING_MESSAGE),
        ContentSlot::Failed(_) => Some(FAILED_MESSAGE),
        ContentSlot::Loading | ContentSlot::Ready(_) => None,
    }
}

/// Overlay phase, used for the enter/exit transition classes.
fn overlay_phase(state: &OverlayState) -> &'static str {
    match state {
        OverlayState::Open(_) => "open",
        OverlayState::Closing(_) => "closing",
        OverlayState::Closed => "closed",
    }
}

/// Overlay hosting the expanded post. Renders nothing once fully closed.
#[component]
pub fn PostOverlay(
    controller: RwSignal<OverlayController<BrowserHost>>,
    comments: Option<CommentsMeta>,
    theme: Signal<Theme>,
    on_close: Callback<()>,
    on_tag: Callback<String>,
) -> impl IntoView {
    let shown = Memo::new(move |_| controller.with(|c| c.expanded_summary().cloned()));
    let phase = Memo::new(move |_| controller.with(|c| overlay_phase(c.state())));
    let slot = Signal::derive(move || {
        controller.with(|c| c.state().expanded().map(|e| e.content.clone()))
    });
    let comments = StoredValue::new(comments);

    let dialog = NodeRef::<html::Div>::new();
    Effect::new(move |_| {
        if phase.get() == "open" {
            if let Some(el) = dialog.get() {
                if el.focus().is_err() {
                    log::warn!("could not focus the post dialog");
                }
            }
        }
    });

    move || {
        shown.get().map(|post| {
            let label = post.title.clone();
            view! {
              <div class=move || format!("post-overlay-bg post-overlay-bg--{}", phase.get())></div>
              <div
                class=move || format!("post-overlay post-overlay--{}", phase.get())
                node_ref=dialog
                tabindex="-1"
                role="dialog"
                aria-modal="true"
                aria-label=label
              >
                <PostArticle
                  post=post
                  slot=slot
                  comments=comments.get_value()
                  theme=theme
                  on_back=on_close
                  on_tag=on_tag
                />
              </div>
            }
        })
    }
}

/// Banner, header, body, comments and tag pills of one post.
#[component]
pub fn PostArticle(
    post: PostSummary,
    slot: Signal<Option<ContentSlot>>,
    comments: Option<CommentsMeta>,
    theme: Signal<Theme>,
    on_back: Callback<()>,
    on_tag: Callback<String>,
) -> impl IntoView {
    let accent = post
        .accent_color()
        .unwrap_or_else(|| "var(--accent)".to_string());
    let banner = banner_gradient(&post)
        .map(|gradient| {
            view! {
              <div class="post-banner-wrapper" style=format!("height: 180px; background: {gradient}")></div>
            }
                .into_any()
        })
        .or_else(|| {
            post.cover.clone().map(|cover| {
                view! {
                  <div class="post-banner-wrapper">
                    <img src=cover alt=post.title.clone() class="post-banner-img" />
                  </div>
                }
                    .into_any()
            })
        });

    let reading_time = move || {
        slot.with(|s| match s {
            Some(ContentSlot::Ready(c)) => Some(format!(" · {} min read", c.reading_time)),
            _ => None,
        })
    };

    let body = move || match slot.get() {
        Some(ContentSlot::Ready(content)) => {
            view! { <div class="post-content" inner_html=content.html></div> }.into_any()
        }
        Some(other) => match slot_message(&other) {
            Some(message) => view! { <p class="post-content post-content--empty">{message}</p> }.into_any(),
            None => view! { <div class="post-content" aria-busy="true"></div> }.into_any(),
        },
        None => ().into_any(),
    };

    let project_bar = post.has_project_meta().then(|| {
        let status = post.status.map(|s| {
            let s = s.as_str();
            view! {
              <span class=format!("tile-status tile-status--{s}") aria-label=format!("Project status: {s}")>
                <span class="tile-status-dot" aria-hidden="true"></span>
                {s}
              </span>
            }
        });
        let repo = post.repo.clone().map(|href| {
            view! {
              <a href=href target="_blank" rel="noopener noreferrer" class="post-project-link" aria-label="View source code">
                "GitHub ↗"
              </a>
            }
        });
        let demo = post.demo.clone().map(|href| {
            view! {
              <a href=href target="_blank" rel="noopener noreferrer" class="post-project-link" aria-label="View live demo">
                "Demo ↗"
              </a>
            }
        });
        view! { <div class="post-project-meta">{status} {repo} {demo}</div> }
    });

    let tags = (!post.tags.is_empty()).then(|| {
        let pills = post
            .tags
            .iter()
            .cloned()
            .map(|tag| {
                let label = format!("Filter by {tag}");
                let clicked = tag.clone();
                view! {
                  <button class="post-tag-pill" aria-label=label on:click=move |_| on_tag.run(clicked.clone())>
                    {tag}
                  </button>
                }
            })
            .collect_view();
        view! { <div class="post-tags">{pills}</div> }
    });

    let comments = comments
        .map(|meta| view! { <Comments slug=post.slug.clone() meta=meta theme=theme /> });
    let class = if post.kind == PostKind::Project {
        "post-expanded post-expanded--project"
    } else {
        "post-expanded"
    };

    view! {
      <article class=class style=format!("border-top: 3px solid {accent}")>
        <button class="post-back" on:click=move |_| on_back.run(()) aria-label="Go back">
          "← Back"
        </button>
        {banner}
        <header class="post-header">
          <div class="post-meta">{meta_line(&post)} {reading_time}</div>
          <h1 class="post-title">{post.title.clone()}</h1>
          {project_bar}
        </header>
        {body}
        {comments}
        {tags}
      </article>
    }
}
