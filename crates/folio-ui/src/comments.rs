//! giscus discussion widget.
//!
//! The widget is one `<script>` that replaces itself with an iframe. It is
//! re-injected whenever the post or the site theme changes.

use folio_core::CommentsMeta;
use leptos::{html, prelude::*};

use crate::theme::Theme;

const GISCUS_SRC: &str = "https://giscus.app/client.js";

/// Attributes for the giscus script tag.
pub fn giscus_attributes(meta: &CommentsMeta, slug: &str, theme: Theme) -> Vec<(&'static str, String)> {
    vec![
        ("data-repo", meta.repo.clone()),
        ("data-repo-id", meta.repo_id.clone()),
        ("data-category", meta.category.clone()),
        ("data-category-id", meta.category_id.clone()),
        ("data-mapping", "specific".to_string()),
        ("data-term", slug.to_string()),
        ("data-strict", "0".to_string()),
        ("data-reactions-enabled", "1".to_string()),
        ("data-emit-metadata", "0".to_string()),
        ("data-input-position", "top".to_string()),
        ("data-theme", theme.giscus_theme().to_string()),
        ("data-lang", "en".to_string()),
        ("data-loading", "lazy".to_string()),
        ("crossorigin", "anonymous".to_string()),
    ]
}

fn inject(container: &web_sys::HtmlDivElement, attributes: &[(&'static str, String)]) {
    container.set_inner_html("");

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let script = match document.create_element("script") {
        Ok(script) => script,
        Err(_) => {
            log::warn!("could not create comments script");
            return;
        }
    };

    let mut result = script.set_attribute("src", GISCUS_SRC);
    result = result.and_then(|_| script.set_attribute("async", ""));
    for (name, value) in attributes {
        result = result.and_then(|_| script.set_attribute(name, value));
    }
    if result.and_then(|_| container.append_child(&script)).is_err() {
        log::warn!("could not mount comments widget");
    }
}

/// Comments for one post.
#[component]
pub fn Comments(slug: String, meta: CommentsMeta, theme: Signal<Theme>) -> impl IntoView {
    let container = NodeRef::<html::Div>::new();

    Effect::new(move |_| {
        let theme = theme.get();
        if let Some(div) = container.get() {
            inject(&div, &giscus_attributes(&meta, &slug, theme));
        }
    });

    view! { <div node_ref=container class="comments-section" role="region" aria-label="Comments"></div> }
}
