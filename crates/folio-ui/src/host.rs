//! History and scroll-lock seam for the overlay controller.
//!
//! [`BrowserHost`] drives the real `window.history` and `<body>` overflow.
//! [`MemoryHost`] keeps an in-memory history stack for tests and for
//! non-browser targets.

/// What the overlay controller needs from its environment.
pub trait Host {
    /// Current path including the query string.
    fn current_path(&self) -> String;

    /// Push a new history entry without reloading.
    fn push_path(&mut self, path: &str);

    /// Replace the current history entry without reloading.
    fn replace_path(&mut self, path: &str);

    /// Stop the page behind the overlay from scrolling.
    fn lock_scroll(&mut self);

    /// Undo [`Host::lock_scroll`].
    fn unlock_scroll(&mut self);
}

/// Host backed by `web_sys`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserHost;

impl BrowserHost {
    fn history() -> Option<web_sys::History> {
        web_sys::window().and_then(|w| w.history().ok())
    }

    fn set_body_overflow(value: &str) {
        let body = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body());
        if let Some(body) = body {
            let style = body.style();
            let result = if value.is_empty() {
                style.remove_property("overflow").map(|_| ())
            } else {
                style.set_property("overflow", value)
            };
            if result.is_err() {
                log::warn!("could not update body overflow");
            }
        }
    }
}

impl Host for BrowserHost {
    fn current_path(&self) -> String {
        web_sys::window()
            .map(|w| w.location())
            .and_then(|l| Some(format!("{}{}", l.pathname().ok()?, l.search().ok()?)))
            .unwrap_or_else(|| "/".to_string())
    }

    fn push_path(&mut self, path: &str) {
        let result = Self::history()
            .map(|h| h.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path)));
        if let Some(Err(_)) = result {
            log::warn!("pushState failed for {path}");
        }
    }

    fn replace_path(&mut self, path: &str) {
        let result = Self::history()
            .map(|h| h.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path)));
        if let Some(Err(_)) = result {
            log::warn!("replaceState failed for {path}");
        }
    }

    fn lock_scroll(&mut self) {
        Self::set_body_overflow("hidden");
    }

    fn unlock_scroll(&mut self) {
        Self::set_body_overflow("");
    }
}

/// In-memory history stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHost {
    entries: Vec<String>,
    index: usize,
    scroll_locked: bool,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new("/")
    }
}

impl MemoryHost {
    pub fn new(initial: &str) -> Self {
        Self {
            entries: vec![initial.to_string()],
            index: 0,
            scroll_locked: false,
        }
    }

    /// Move back one entry. Returns `false` at the start of history.
    ///
    /// Like the browser, this only moves the cursor; the caller delivers the
    /// popstate to whoever is listening.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Move forward one entry. Returns `false` at the end of history.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Number of entries in the history stack.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }
}

impl Host for MemoryHost {
    fn current_path(&self) -> String {
        self.entries[self.index].clone()
    }

    fn push_path(&mut self, path: &str) {
        self.entries.truncate(self.index + 1);
        self.entries.push(path.to_string());
        self.index += 1;
    }

    fn replace_path(&mut self, path: &str) {
        self.entries[self.index] = path.to_string();
    }

    fn lock_scroll(&mut self) {
        self.scroll_locked = true;
    }

    fn unlock_scroll(&mut self) {
        self.scroll_locked = false;
    }
}
