//! DG Takeover
//!
//! Stable, accessible takeover (full-screen) navigation. A takeover is bound
//! to page markup by data attributes:
//!
//! ```html
//! <button data-dgtakeover-toggle="nav">Menu</button>
//! <nav data-dgtakeover-menu="nav">...</nav>
//! ```
//!
//! Opening adds `takeover__opening` immediately and `takeover__open` once the
//! configured duration has elapsed; closing removes them in reverse. Page
//! styles key their animations off those classes.

mod config;
mod observer;
mod signal;
mod takeover;

pub use config::{TakeoverConfig, TakeoverOptions};
pub use observer::Subscription;
pub use signal::{Action, Command, Phase, Signal};
pub use takeover::Takeover;

/// Marks a trigger: `data-dgtakeover-toggle="<id>"`
pub const TOGGLE_ATTR: &str = "data-dgtakeover-toggle";
/// Marks the panel: `data-dgtakeover-menu="<id>"`
pub const MENU_ATTR: &str = "data-dgtakeover-menu";
/// Optional per-panel duration override in seconds
pub const DURATION_ATTR: &str = "data-dgtakeover-duration";

/// Scroll lock on `<html>` and `<body>`
pub const CLASS_NO_SCROLL: &str = "js-no-scroll";
/// Added when a transition to open starts
pub const CLASS_OPENING: &str = "takeover__opening";
/// Added when the open transition completes
pub const CLASS_OPEN: &str = "takeover__open";

/// A required element the takeover could not find
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingElement {
    Root,
    Body,
    Triggers,
    Panel,
}

impl std::fmt::Display for MissingElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Root => "html",
            Self::Body => "body",
            Self::Triggers => "[data-dgtakeover-toggle]",
            Self::Panel => "[data-dgtakeover-menu]",
        })
    }
}

/// Takeover error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TakeoverError {
    #[error("Takeover {id:?} is inert, not found: {}", join(.missing))]
    MissingElements {
        id: String,
        missing: Vec<MissingElement>,
    },
}

fn join(missing: &[MissingElement]) -> String {
    missing.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
