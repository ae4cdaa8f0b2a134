//! Post overlay controller.
//!
//! Owns which post is expanded, keeps browser history in step with it, and
//! decides whether late async results still apply. Every state change bumps a
//! generation counter; fetch results and cleanup timers carry the generation
//! they were issued under and are dropped when it no longer matches.
//!
//! The controller is plain data over a [`Host`], so the same code runs in the
//! browser and in unit tests.

use folio_core::{PostContent, PostSummary, Registry};

use crate::{host::Host, route::Route};

/// Content area of an expanded post.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentSlot {
    /// Fetch in flight. The overlay chrome is shown with an empty body.
    Loading,
    Ready(PostContent),
    /// The slug is known but the content source has nothing for it.
    Missing,
    /// The fetch failed. Not retried.
    Failed(String),
}

/// The post currently shown in the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct Expanded {
    pub slug: String,
    pub content: ContentSlot,
}

/// Expansion state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum OverlayState {
    #[default]
    Closed,
    Open(Expanded),
    /// Logically closed. The fields linger for the exit transition.
    Closing(Expanded),
}

impl OverlayState {
    /// The expanded post, open or closing.
    pub fn expanded(&self) -> Option<&Expanded> {
        match self {
            Self::Open(e) | Self::Closing(e) => Some(e),
            Self::Closed => None,
        }
    }

    /// Slug of the open post. `None` while closing.
    pub fn open_slug(&self) -> Option<&str> {
        match self {
            Self::Open(e) => Some(&e.slug),
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }
}

/// Result of a content fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(PostContent),
    NotFound,
    Failed(String),
}

/// Permission to deliver content for one open.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct LoadTicket {
    slug: String,
    generation: u64,
}

impl LoadTicket {
    /// Slug to fetch.
    pub fn slug(&self) -> &str {
        &self.slug
    }
}

/// Permission to clear the lingering fields of one close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct CleanupTicket {
    generation: u64,
}

/// What [`OverlayController::open`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// A new post is open; fetch its content with the ticket.
    Opened(LoadTicket),
    /// The slug was already open. Nothing changed.
    AlreadyOpen,
    /// No post has this slug. Nothing changed.
    UnknownSlug,
}

/// Drives the post overlay.
#[derive(Debug)]
pub struct OverlayController<H: Host> {
    state: OverlayState,
    generation: u64,
    posts: Registry<PostSummary>,
    host: H,
    /// Where `close` sends the address bar.
    return_path: String,
    scroll_locked: bool,
}

impl<H: Host> OverlayController<H> {
    pub fn new(posts: Registry<PostSummary>, host: H) -> Self {
        Self {
            state: OverlayState::Closed,
            generation: 0,
            posts,
            host,
            return_path: "/".to_string(),
            scroll_locked: false,
        }
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn posts(&self) -> &Registry<PostSummary> {
        &self.posts
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Whether the grid behind the overlay should be visually suppressed.
    pub fn grid_suppressed(&self) -> bool {
        self.state.is_open()
    }

    /// Summary of the post in the overlay, open or closing.
    pub fn expanded_summary(&self) -> Option<&PostSummary> {
        self.state
            .expanded()
            .and_then(|e| self.posts.lookup(&e.slug).found())
    }

    /// Open `slug` and push `/blog/{slug}`.
    ///
    /// Switching from another open post replaces its entry instead.
    pub fn open(&mut self, slug: &str) -> OpenOutcome {
        self.open_inner(slug, true)
    }

    /// Open `slug` for a page that was loaded at `/blog/{slug}`.
    ///
    /// No entry is pushed. An unknown slug rewrites the address to `/`.
    pub fn adopt(&mut self, slug: &str) -> OpenOutcome {
        let outcome = self.open_inner(slug, false);
        if outcome == OpenOutcome::UnknownSlug {
            self.host.replace_path("/");
        }
        outcome
    }

    fn open_inner(&mut self, slug: &str, push: bool) -> OpenOutcome {
        if !self.posts.contains(slug) {
            log::warn!("ignoring open for unknown slug {slug:?}");
            return OpenOutcome::UnknownSlug;
        }
        if self.state.open_slug() == Some(slug) {
            return OpenOutcome::AlreadyOpen;
        }

        let switching = self.state.is_open();
        if !switching {
            self.return_path = if push {
                home_path(&self.host.current_path())
            } else {
                "/".to_string()
            };
        }

        self.generation += 1;
        self.state = OverlayState::Open(Expanded {
            slug: slug.to_string(),
            content: ContentSlot::Loading,
        });

        if !self.scroll_locked {
            self.host.lock_scroll();
            self.scroll_locked = true;
        }
        // At most one post entry sits above the return path.
        let path = Route::Post(slug.to_string()).to_path();
        if switching {
            self.host.replace_path(&path);
        } else if push {
            self.host.push_path(&path);
        }

        log::debug!("opened {slug} (generation {})", self.generation);
        OpenOutcome::Opened(LoadTicket {
            slug: slug.to_string(),
            generation: self.generation,
        })
    }

    /// Deliver a fetch result. Returns `false` when the result is stale.
    pub fn content_loaded(&mut self, ticket: LoadTicket, outcome: LoadOutcome) -> bool {
        if ticket.generation != self.generation {
            log::debug!("discarding stale content for {}", ticket.slug);
            return false;
        }
        let OverlayState::Open(expanded) = &mut self.state else {
            return false;
        };
        if expanded.slug != ticket.slug {
            return false;
        }

        expanded.content = match outcome {
            LoadOutcome::Loaded(content) => ContentSlot::Ready(content),
            LoadOutcome::NotFound => {
                log::warn!("no content for {}", ticket.slug);
                ContentSlot::Missing
            }
            LoadOutcome::Failed(reason) => {
                log::error!("failed to load {}: {reason}", ticket.slug);
                ContentSlot::Failed(reason)
            }
        };
        true
    }

    /// Close the overlay and replace the current entry with the home path.
    ///
    /// Returns `None` when nothing was open.
    pub fn close(&mut self) -> Option<CleanupTicket> {
        if !self.state.is_open() {
            return None;
        }
        let OverlayState::Open(expanded) = std::mem::take(&mut self.state) else {
            return None;
        };
        self.generation += 1;
        self.state = OverlayState::Closing(expanded);

        if self.scroll_locked {
            self.host.unlock_scroll();
            self.scroll_locked = false;
        }
        self.host.replace_path(&self.return_path);

        Some(CleanupTicket {
            generation: self.generation,
        })
    }

    /// Drop the lingering fields after the exit transition.
    ///
    /// Returns `false` when a later open or close superseded this ticket.
    pub fn finish_close(&mut self, ticket: CleanupTicket) -> bool {
        if ticket.generation != self.generation || !matches!(self.state, OverlayState::Closing(_))
        {
            return false;
        }
        self.state = OverlayState::Closed;
        true
    }

    /// Browser back/forward. Closes through [`Self::close`] when open.
    pub fn handle_pop_state(&mut self) -> Option<CleanupTicket> {
        if self.state.is_open() { self.close() } else { None }
    }

    /// Whether [`Self::handle_key`] would do anything for `key`.
    pub fn handles_key(&self, key: &str) -> bool {
        key == "Escape" && self.state.is_open()
    }

    /// Keyboard input. `Escape` closes; every other key is ignored.
    pub fn handle_key(&mut self, key: &str) -> Option<CleanupTicket> {
        if self.handles_key(key) {
            self.close()
        } else {
            None
        }
    }

    /// Release the scroll lock when the page unmounts.
    pub fn teardown(&mut self) {
        if self.scroll_locked {
            self.host.unlock_scroll();
            self.scroll_locked = false;
        }
    }
}

/// The home path a close returns to, keeping an active filter query.
fn home_path(current: &str) -> String {
    match Route::parse(current) {
        home @ Route::Home(_) => home.to_path(),
        Route::Post(_) => "/".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use folio_core::PostKind;

    use super::*;
    use crate::host::MemoryHost;

    fn summary(slug: &str, day: u32) -> PostSummary {
        PostSummary {
            slug: slug.to_string(),
            title: slug.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            kind: PostKind::Essay,
            excerpt: String::new(),
            category: "personal".to_string(),
            tags: vec!["rust".to_string()],
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

    fn content(slug: &str) -> PostContent {
        PostContent::new(slug, format!("<p>{slug}</p>"), slug)
    }

    fn controller() -> OverlayController<MemoryHost> {
        controller_at("/")
    }

    fn controller_at(path: &str) -> OverlayController<MemoryHost> {
        let posts = Registry::new(vec![summary("a", 3), summary("b", 2), summary("c", 1)]);
        OverlayController::new(posts, MemoryHost::new(path))
    }

    fn opened(outcome: OpenOutcome) -> LoadTicket {
        match outcome {
            OpenOutcome::Opened(ticket) => ticket,
            other => panic!("expected Opened, got {other:?}"),
        }
    }

    #[test]
    fn test_open_pushes_post_path() {
        let mut overlay = controller();
        let ticket = opened(overlay.open("a"));

        assert_eq!(ticket.slug(), "a");
        assert_eq!(overlay.host().current_path(), "/blog/a");
        assert_eq!(overlay.host().len(), 2);
        assert!(overlay.host().scroll_locked());
        assert!(overlay.grid_suppressed());
        assert_eq!(
            overlay.state().expanded().map(|e| &e.content),
            Some(&ContentSlot::Loading)
        );
    }

    #[test]
    fn test_close_returns_to_root() {
        let mut overlay = controller();
        let _ = overlay.open("a");
        let cleanup = overlay.close().unwrap();

        assert_eq!(overlay.host().current_path(), "/");
        assert!(!overlay.host().scroll_locked());
        assert!(!overlay.grid_suppressed());
        assert!(matches!(overlay.state(), OverlayState::Closing(_)));

        assert!(overlay.close().is_none());
        assert!(matches!(overlay.state(), OverlayState::Closing(_)));

        assert!(overlay.finish_close(cleanup));
        assert_eq!(overlay.state(), &OverlayState::Closed);
    }

    #[test]
    fn test_open_same_slug_twice_is_idempotent() {
        let mut overlay = controller();
        let _ = opened(overlay.open("a"));

        assert_eq!(overlay.open("a"), OpenOutcome::AlreadyOpen);
        assert_eq!(overlay.host().len(), 2);
        assert_eq!(overlay.host().entries(), ["/", "/blog/a"]);
    }

    #[test]
    fn test_content_arriving_after_close_is_discarded() {
        let mut overlay = controller();
        let ticket = opened(overlay.open("a"));
        let cleanup = overlay.close().unwrap();

        // Fetch resolves inside the exit transition window.
        assert!(!overlay.content_loaded(ticket.clone(), LoadOutcome::Loaded(content("a"))));
        assert_eq!(
            overlay.state().expanded().map(|e| &e.content),
            Some(&ContentSlot::Loading)
        );

        assert!(overlay.finish_close(cleanup));
        assert!(!overlay.content_loaded(ticket, LoadOutcome::Loaded(content("a"))));
        assert_eq!(overlay.state(), &OverlayState::Closed);
    }

    #[test]
    fn test_back_while_open_closes() {
        let mut overlay = controller();
        let _ = overlay.open("a");

        assert!(overlay.host_mut().back());
        let cleanup = overlay.handle_pop_state();

        assert!(cleanup.is_some());
        assert!(!overlay.state().is_open());
        assert_eq!(overlay.host().current_path(), "/");
        assert!(!overlay.host().scroll_locked());
    }

    #[test]
    fn test_pop_state_while_closed_does_nothing() {
        let mut overlay = controller();
        overlay.host_mut().push_path("/?tag=rust");
        assert!(overlay.host_mut().back());

        assert!(overlay.handle_pop_state().is_none());
        assert_eq!(overlay.state(), &OverlayState::Closed);
        assert_eq!(overlay.host().entries(), ["/", "/?tag=rust"]);
    }

    #[test]
    fn test_escape_closes_other_keys_ignored() {
        let mut overlay = controller();
        let _ = overlay.open("a");

        assert!(overlay.handle_key("Enter").is_none());
        assert!(overlay.state().is_open());

        assert!(overlay.handle_key("Escape").is_some());
        assert!(!overlay.state().is_open());
        assert_eq!(overlay.host().current_path(), "/");

        assert!(overlay.handle_key("Escape").is_none());
    }

    #[test]
    fn test_reopen_during_exit_supersedes_cleanup() {
        let mut overlay = controller();
        let _ = overlay.open("a");
        let cleanup = overlay.close().unwrap();

        let ticket = opened(overlay.open("a"));
        assert!(overlay.content_loaded(ticket, LoadOutcome::Loaded(content("a"))));

        assert!(!overlay.finish_close(cleanup));
        assert!(matches!(
            overlay.state().expanded().map(|e| &e.content),
            Some(ContentSlot::Ready(c)) if c.slug == "a"
        ));
        assert!(overlay.host().scroll_locked());
    }

    #[test]
    fn test_switching_posts_discards_previous_fetch() {
        let mut overlay = controller();
        let first = opened(overlay.open("a"));
        let second = opened(overlay.open("b"));

        assert_eq!(overlay.host().entries(), ["/", "/blog/b"]);
        assert!(!overlay.content_loaded(first, LoadOutcome::Loaded(content("a"))));
        assert!(overlay.content_loaded(second, LoadOutcome::Loaded(content("b"))));
        assert_eq!(overlay.state().open_slug(), Some("b"));
    }

    #[test]
    fn test_unknown_slug_is_ignored() {
        let mut overlay = controller();

        assert_eq!(overlay.open("nope"), OpenOutcome::UnknownSlug);
        assert_eq!(overlay.state(), &OverlayState::Closed);
        assert_eq!(overlay.host().len(), 1);
        assert!(!overlay.host().scroll_locked());
    }

    #[test]
    fn test_missing_and_failed_content_stay_closable() {
        let mut overlay = controller();
        let ticket = opened(overlay.open("a"));
        assert!(overlay.content_loaded(ticket, LoadOutcome::NotFound));
        assert_eq!(
            overlay.state().expanded().map(|e| &e.content),
            Some(&ContentSlot::Missing)
        );
        assert!(overlay.handle_key("Escape").is_some());

        let ticket = opened(overlay.open("b"));
        assert!(overlay.content_loaded(ticket, LoadOutcome::Failed("timeout".to_string())));
        assert!(overlay.close().is_some());
        assert_eq!(overlay.host().current_path(), "/");
    }

    #[test]
    fn test_adopt_does_not_push() {
        let mut overlay = controller_at("/blog/b");
        let ticket = opened(overlay.adopt("b"));

        assert_eq!(ticket.slug(), "b");
        assert_eq!(overlay.host().len(), 1);
        assert!(overlay.host().scroll_locked());

        let _ = overlay.close();
        assert_eq!(overlay.host().entries(), ["/"]);
    }

    #[test]
    fn test_adopt_unknown_slug_rewrites_to_root() {
        let mut overlay = controller_at("/blog/gone");

        assert_eq!(overlay.adopt("gone"), OpenOutcome::UnknownSlug);
        assert_eq!(overlay.host().entries(), ["/"]);
    }

    #[test]
    fn test_close_keeps_active_filter_in_url() {
        let mut overlay = controller_at("/?tag=rust");
        let _ = overlay.open("a");
        assert_eq!(overlay.host().current_path(), "/blog/a");

        let _ = overlay.close();
        assert_eq!(overlay.host().current_path(), "/?tag=rust");
    }

    #[test]
    fn test_close_when_closed_is_noop() {
        let mut overlay = controller();
        assert!(overlay.close().is_none());
        assert_eq!(overlay.host().len(), 1);
    }

    #[test]
    fn test_stale_cleanup_after_second_close() {
        let mut overlay = controller();
        let _ = overlay.open("a");
        let first = overlay.close().unwrap();
        let _ = overlay.open("b");
        let second = overlay.close().unwrap();

        assert!(!overlay.finish_close(first));
        assert!(matches!(overlay.state(), OverlayState::Closing(e) if e.slug == "b"));
        assert!(overlay.finish_close(second));
    }

    #[test]
    fn test_expanded_summary_lingers_while_closing() {
        let mut overlay = controller();
        let _ = overlay.open("c");
        let cleanup = overlay.close().unwrap();

        assert_eq!(overlay.expanded_summary().map(|p| p.slug.as_str()), Some("c"));
        assert!(overlay.finish_close(cleanup));
        assert!(overlay.expanded_summary().is_none());
    }

    #[test]
    fn test_switch_then_close_leaves_no_post_entry() {
        let mut overlay = controller();
        let _ = overlay.open("a");
        let _ = overlay.open("b");
        assert!(overlay.handle_key("Escape").is_some());
        assert_eq!(overlay.host().entries(), ["/", "/"]);

        assert!(overlay.host_mut().back());
        assert!(overlay.handle_pop_state().is_none());
        assert_eq!(overlay.host().current_path(), "/");
        assert!(!overlay.state().is_open());
    }

    #[test]
    fn test_escape_while_closed_is_noop() {
        let mut overlay = controller();

        assert!(!overlay.handles_key("Escape"));
        assert!(overlay.handle_key("Escape").is_none());
        assert_eq!(overlay.state(), &OverlayState::Closed);
        assert_eq!(overlay.host().entries(), ["/"]);
        assert!(!overlay.host().scroll_locked());
    }

    #[test]
    fn test_handles_key_only_for_escape_while_open() {
        let mut overlay = controller();
        let _ = overlay.open("a");

        assert!(overlay.handles_key("Escape"));
        assert!(!overlay.handles_key("a"));

        let _ = overlay.close();
        assert!(!overlay.handles_key("Escape"));
    }

    #[test]
    fn test_forward_after_back_leaves_overlay_closed() {
        let mut overlay = controller();
        let _ = overlay.open("a");
        assert!(overlay.host_mut().back());
        let _ = overlay.handle_pop_state();

        assert!(overlay.host_mut().forward());
        assert!(overlay.handle_pop_state().is_none());
        assert_eq!(overlay.host().current_path(), "/blog/a");
        assert!(!overlay.state().is_open());
    }

    /// Deterministic xorshift so failures replay.
    struct Rng(u64);

    impl Rng {
        fn below(&mut self, n: usize) -> usize {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 7;
            self.0 ^= self.0 << 17;
            (self.0 % n as u64) as usize
        }
    }

    fn assert_in_step(overlay: &OverlayController<MemoryHost>, trace: &[String]) {
        let path = overlay.host().current_path();
        match overlay.state().open_slug() {
            Some(slug) => {
                assert_eq!(path, format!("/blog/{slug}"), "after {trace:?}");
                assert!(overlay.host().scroll_locked(), "after {trace:?}");
                assert!(overlay.expanded_summary().is_some(), "after {trace:?}");
            }
            None => {
                assert!(
                    matches!(Route::parse(&path), Route::Home(_)),
                    "path {path} after {trace:?}"
                );
                assert!(!overlay.host().scroll_locked(), "after {trace:?}");
            }
        }
        assert_eq!(overlay.grid_suppressed(), overlay.state().is_open());

        let post_entries = overlay
            .host()
            .entries()
            .iter()
            .filter(|e| e.starts_with("/blog/"))
            .count();
        assert!(post_entries <= 1, "{:?} after {trace:?}", overlay.host().entries());
    }

    #[test]
    fn test_random_sequences_keep_history_in_step() {
        for run in 0..2000u64 {
            let mut rng = Rng(0x9E37_79B9_7F4A_7C15 ^ (run + 1));
            let mut overlay = controller();
            let mut loads: Vec<LoadTicket> = Vec::new();
            let mut cleanups: Vec<CleanupTicket> = Vec::new();
            let mut trace = Vec::new();

            for _ in 0..40 {
                match rng.below(8) {
                    op @ 0..=2 => {
                        let slug = ["a", "b", "c"][op];
                        trace.push(format!("open {slug}"));
                        if let OpenOutcome::Opened(ticket) = overlay.open(slug) {
                            loads.push(ticket);
                        }
                    }
                    3 => {
                        trace.push("close".to_string());
                        cleanups.extend(overlay.close());
                    }
                    4 => {
                        trace.push("escape".to_string());
                        cleanups.extend(overlay.handle_key("Escape"));
                    }
                    5 => {
                        trace.push("back".to_string());
                        if overlay.host_mut().back() {
                            cleanups.extend(overlay.handle_pop_state());
                        }
                    }
                    6 if !loads.is_empty() => {
                        let ticket = loads.remove(rng.below(loads.len()));
                        trace.push(format!("loaded {}", ticket.slug()));
                        let body = content(ticket.slug());
                        let _ = overlay.content_loaded(ticket, LoadOutcome::Loaded(body));
                    }
                    7 if !cleanups.is_empty() => {
                        let ticket = cleanups.remove(rng.below(cleanups.len()));
                        trace.push("finish close".to_string());
                        let _ = overlay.finish_close(ticket);
                    }
                    _ => continue,
                }
                assert_in_step(&overlay, &trace);
            }
        }
    }

    #[test]
    fn test_teardown_releases_scroll() {
        let mut overlay = controller();
        let _ = overlay.open("a");
        overlay.teardown();
        assert!(!overlay.host().scroll_locked());
    }
}
