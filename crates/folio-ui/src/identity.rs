//! Identity tile: name, bio, social links and the theme toggle.

use std::time::Duration;

use folio_core::SiteMeta;
use leptos::prelude::*;

use crate::{
    easter::{FOUND_MS, NameClickEffect, NameClicks, SHIMMER_MS, WOBBLE_MS},
    theme::{self, Theme},
};

/// Raise `flag` for `ms` milliseconds.
pub(crate) fn pulse(flag: RwSignal<bool>, ms: u64) {
    flag.set(true);
    set_timeout(move || flag.set(false), Duration::from_millis(ms));
}

#[component]
pub fn IdentityTile(
    site: StoredValue<SiteMeta>,
    theme: RwSignal<Theme>,
    /// Raised while the grid wobbles.
    wobble: RwSignal<bool>,
) -> impl IntoView {
    let clicks = StoredValue::new(NameClicks::default());
    let shimmer = RwSignal::new(false);
    let found = RwSignal::new(false);

    let on_name_click = move |_| {
        let effect = clicks
            .try_update_value(|c| c.click())
            .unwrap_or(NameClickEffect::Nothing);
        match effect {
            NameClickEffect::Shimmer => pulse(shimmer, SHIMMER_MS),
            NameClickEffect::Wobble => pulse(wobble, WOBBLE_MS),
            NameClickEffect::Found => pulse(found, FOUND_MS),
            NameClickEffect::Nothing => {}
        }
    };

    let toggle_theme = move |_| {
        theme.update(|t| *t = t.toggled());
        theme::apply(theme.get_untracked(), true);
    };

    let (title, bio, links) = site.with_value(|s| (s.title.clone(), s.bio.clone(), s.links.clone()));

    let github = links.github.map(|href| {
        view! {
          <a href=href target="_blank" rel="noreferrer" aria-label="GitHub">
            "GitHub"
          </a>
        }
    });
    let linkedin = links.linkedin.map(|href| {
        view! {
          <a href=href target="_blank" rel="noreferrer" aria-label="LinkedIn">
            "LinkedIn"
          </a>
        }
    });
    let email = links.email.map(|address| {
        view! {
          <a href=format!("mailto:{address}") aria-label="Email">
            "Email"
          </a>
        }
    });

    view! {
      <div class="tile tile--identity">
        <div>
          <h1
            class="identity-name"
            class:shimmer=move || shimmer.get()
            style="cursor: pointer"
            on:click=on_name_click
          >
            {title}
          </h1>
          {bio.map(|bio| view! { <p class="identity-bio">{bio}</p> })}
          <Show when=move || found.get()>
            <p class="identity-found">"you found me"</p>
          </Show>
        </div>
        <div class="identity-links">
          {github}
          {linkedin}
          {email}
          <button
            class="theme-toggle"
            on:click=toggle_theme
            aria-label=move || theme.get().toggle_label()
          >
            {move || match theme.get() {
              Theme::Light => "☾",
              Theme::Dark => "☀",
            }}
          </button>
        </div>
      </div>
    }
}
