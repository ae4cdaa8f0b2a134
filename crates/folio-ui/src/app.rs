//! Application root and the home page that ties the pieces together.

use std::time::Duration;

use folio_core::{Filter, Registry, SiteIndex};
use leptos::{ev, prelude::*, task::spawn_local};
use leptos_meta::{Title, provide_meta_context};

use crate::{
    article::PostOverlay,
    easter::{INVERT_MS, KonamiDetector, TOAST_MS, TOAST_TEXT},
    filter_bar::FilterBar,
    grid::{Tile, ViewAllTile, arrange},
    host::{BrowserHost, Host},
    identity::{IdentityTile, pulse},
    overlay::{CleanupTicket, OpenOutcome, OverlayController},
    route::Route,
    source::{HttpSource, SourceError},
    theme,
};

fn bento_class(suppressed: bool, wobble: bool) -> String {
    let mut class = String::from("bento");
    if suppressed {
        class.push_str(" bento--suppressed");
    }
    if wobble {
        class.push_str(" wobble");
    }
    class
}

/// Loads the site index, then renders the home page.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let index = RwSignal::new(None::<Result<SiteIndex, SourceError>>);
    spawn_local(async move {
        let result = HttpSource::default().list_posts().await;
        if let Err(e) = &result {
            log::error!("failed to load site index: {e}");
        }
        index.set(Some(result));
    });

    move || match index.get() {
        None => view! { <div class="loading" aria-busy="true"></div> }.into_any(),
        Some(Ok(index)) => view! { <HomePage index=index /> }.into_any(),
        Some(Err(_)) => view! { <p class="load-error">"Could not load posts."</p> }.into_any(),
    }
}

/// Identity tile, filter bar, bento grid and the post overlay.
#[component]
pub fn HomePage(index: SiteIndex) -> impl IntoView {
    let SiteIndex { site, posts } = index;
    let close_delay = Duration::from_millis(site.close_delay_ms);
    let grid_size = site.grid_size;
    let comments = site.comments.clone();
    let site_title = StoredValue::new(site.title.clone());

    let source = HttpSource::default();
    let controller = RwSignal::new(OverlayController::new(
        Registry::new(posts.clone()),
        BrowserHost,
    ));
    let site = StoredValue::new(site);
    let posts = StoredValue::new(posts);

    let initial = Route::parse(&BrowserHost.current_path());
    let active = RwSignal::new(initial.filter().cloned());
    let show_all = RwSignal::new(false);

    let theme = RwSignal::new(theme::load());
    theme::apply(theme.get_untracked(), false);

    let wobble = RwSignal::new(false);
    let inverted = RwSignal::new(false);
    let toast = RwSignal::new(None::<&'static str>);
    let konami = StoredValue::new(KonamiDetector::default());

    let schedule_cleanup = move |ticket: Option<CleanupTicket>| {
        if let Some(ticket) = ticket {
            set_timeout(
                move || {
                    controller.update(|c| {
                        c.finish_close(ticket);
                    })
                },
                close_delay,
            );
        }
    };

    let fetch = move |outcome: OpenOutcome| {
        if let OpenOutcome::Opened(ticket) = outcome {
            spawn_local(async move {
                let result = source.load_post_content(ticket.slug()).await;
                controller.update(|c| {
                    c.content_loaded(ticket, result.into());
                });
            });
        }
    };

    let open_post = Callback::new(move |slug: String| {
        if let Some(outcome) = controller.try_update(|c| c.open(&slug)) {
            fetch(outcome);
        }
    });

    let close_post = Callback::new(move |_: ()| {
        schedule_cleanup(controller.try_update(|c| c.close()).flatten());
    });

    let set_filter = Callback::new(move |next: Option<Filter>| {
        show_all.set(false);
        BrowserHost.replace_path(&Route::Home(next.clone()).to_path());
        active.set(next);
    });

    let on_tag = Callback::new(move |tag: String| {
        close_post.run(());
        set_filter.run(Some(Filter::Tag(tag)));
    });

    if let Route::Post(slug) = &initial {
        if let Some(outcome) = controller.try_update(|c| c.adopt(slug)) {
            fetch(outcome);
        }
    }

    let keydown = window_event_listener(ev::keydown, move |ev| {
        let key = ev.key();
        if controller.with_untracked(|c| c.handles_key(&key)) {
            schedule_cleanup(controller.try_update(|c| c.handle_key(&key)).flatten());
        }

        if konami.try_update_value(|k| k.push(&key)).unwrap_or(false) {
            pulse(inverted, INVERT_MS);
            toast.set(Some(TOAST_TEXT));
            set_timeout(move || toast.set(None), Duration::from_millis(TOAST_MS));
        }
    });

    let popstate = window_event_listener(ev::popstate, move |_| {
        if controller.with_untracked(|c| c.state().is_open()) {
            schedule_cleanup(controller.try_update(|c| c.handle_pop_state()).flatten());
        }
    });

    on_cleanup(move || {
        keydown.remove();
        popstate.remove();
        controller.update(|c| c.teardown());
    });

    // Grid and filter bar leave the tab order while a post is open.
    let suppressed = Memo::new(move |_| controller.with(|c| c.grid_suppressed()));

    let open_title = Memo::new(move |_| {
        controller.with(|c| {
            c.state()
                .open_slug()
                .and_then(|_| c.expanded_summary())
                .map(|p| p.title.clone())
        })
    });
    let title = move || {
        let site_title = site_title.get_value();
        match open_title.get() {
            Some(post) => format!("{post} · {site_title}"),
            None => site_title,
        }
    };

    let tiles = move || {
        let filter = active.get();
        let everything = show_all.get();
        posts.with_value(|posts| {
            let layout = arrange(posts, filter.as_ref(), grid_size, everything);
            let hero = layout
                .hero
                .cloned()
                .map(|post| view! { <Tile post=post hero=true on_open=open_post /> });
            let rest = layout
                .rest
                .into_iter()
                .cloned()
                .map(|post| view! { <Tile post=post on_open=open_post /> })
                .collect_view();
            let more = layout.has_more.then(|| {
                view! { <ViewAllTile on_click=Callback::new(move |_: ()| show_all.set(true)) /> }
            });
            view! { {hero} {rest} {more} }
        })
    };

    view! {
      <Title text=title />
      <div class="app" class:inverted=move || inverted.get()>
        <div class="home" inert=move || suppressed.get()>
          <FilterBar site=site posts=posts active=active on_filter=set_filter />
          <div class=move || bento_class(suppressed.get(), wobble.get())>
            <IdentityTile site=site theme=theme wobble=wobble />
            {tiles}
          </div>
        </div>
        <PostOverlay
          controller=controller
          comments=comments
          theme=Signal::from(theme)
          on_close=close_post
          on_tag=on_tag
        />
        <Show when=move || toast.get().is_some()>
          <div class="toast" role="status">
            {move || toast.get()}
          </div>
        </Show>
      </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bento_class() {
        assert_eq!(bento_class(false, false), "bento");
        assert_eq!(bento_class(true, false), "bento bento--suppressed");
        assert_eq!(bento_class(true, true), "bento bento--suppressed wobble");
    }
}
