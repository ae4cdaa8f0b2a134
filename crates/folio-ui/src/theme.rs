//! Light/dark theme.
//!
//! The choice is stored under [`STORAGE_KEY`] in local storage and written to
//! `data-theme` on `<html>`. Without a stored value the OS preference wins.

/// Local storage key.
pub const STORAGE_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Stored value if valid, else the OS preference.
    pub fn initial(stored: Option<&str>, prefers_dark: bool) -> Self {
        stored
            .and_then(Self::parse)
            .unwrap_or(if prefers_dark { Self::Dark } else { Self::Light })
    }

    /// Matching giscus widget theme.
    pub fn giscus_theme(&self) -> &'static str {
        match self {
            Self::Light => "light_tritanopia",
            Self::Dark => "dark_dimmed",
        }
    }

    /// Accessible label for the toggle button.
    pub fn toggle_label(&self) -> &'static str {
        match self {
            Self::Light => "Switch to dark mode",
            Self::Dark => "Switch to light mode",
        }
    }
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Read the initial theme from the browser.
pub fn load() -> Theme {
    let stored = storage().and_then(|s| s.get_item(STORAGE_KEY).ok().flatten());
    let prefers_dark = web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .is_some_and(|m| m.matches());
    Theme::initial(stored.as_deref(), prefers_dark)
}

/// Write the theme to the document. With `persist`, also to local storage.
pub fn apply(theme: Theme, persist: bool) {
    let set = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .map(|root| root.set_attribute("data-theme", theme.as_str()));
    if let Some(Err(_)) = set {
        log::warn!("could not set data-theme");
    }

    if persist {
        let stored = storage().map(|s| s.set_item(STORAGE_KEY, theme.as_str()));
        if let Some(Err(_)) = stored {
            log::warn!("could not persist theme");
        }
    }
}
