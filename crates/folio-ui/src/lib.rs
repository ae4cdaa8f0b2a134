//! Folio UI
//!
//! Leptos components and client logic for the folio frontend.
//!
//! # Overlay
//! - [`OverlayController`] - Expansion state, history sync and stale-result guards
//! - [`Host`] - History and scroll-lock seam ([`BrowserHost`], [`MemoryHost`])
//!
//! # Components
//! - [`App`] / [`HomePage`] - Root wiring
//! - [`IdentityTile`], [`Tile`], [`ViewAllTile`] - Bento grid tiles
//! - [`FilterBar`] - Category and tag pills
//! - [`PostOverlay`] / [`PostArticle`] - Expanded post
//! - [`Comments`] - giscus widget
//!
//! # Example
//!
//! ```ignore
//! use folio_ui::App;
//! use leptos::prelude::*;
//!
//! leptos::mount::mount_to_body(App);
//! ```

pub mod app;
pub mod article;
pub mod comments;
pub mod easter;
pub mod filter_bar;
pub mod grid;
pub mod host;
pub mod identity;
pub mod overlay;
pub mod route;
pub mod source;
pub mod theme;

pub use app::{App, HomePage};
pub use article::{PostArticle, PostOverlay};
pub use comments::Comments;
pub use filter_bar::FilterBar;
pub use grid::{Tile, ViewAllTile};
pub use host::{BrowserHost, Host, MemoryHost};
pub use identity::IdentityTile;
pub use overlay::{
    CleanupTicket, ContentSlot, Expanded, LoadOutcome, LoadTicket, OpenOutcome,
    OverlayController, OverlayState,
};
pub use route::Route;
pub use source::{HttpSource, SourceError};
pub use theme::Theme;
