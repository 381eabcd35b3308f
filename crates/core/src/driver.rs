//! Capability traits consumed by the dispatch engine.
//!
//! The engine never touches a browser or the OS directly. Everything goes
//! through these two traits, which keeps the engine testable against fakes
//! and lets the production adapters live outside this crate.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// How the driver should find an element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Locator {
    /// CSS selector.
    Css(String),
    /// Substring of an element's rendered text. The invalid-recipient
    /// notices come in several phrasings and locales, so text matching is a
    /// first-class locator rather than a convenience.
    Text(String),
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    pub fn text(fragment: impl Into<String>) -> Self {
        Self::Text(fragment.into())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(selector) => write!(f, "css:{selector}"),
            Self::Text(fragment) => write!(f, "text:{fragment}"),
        }
    }
}

/// Key events understood by both capability surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
}

impl Key {
    pub fn name(self) -> &'static str {
        match self {
            Self::Enter => "Enter",
            Self::Escape => "Escape",
        }
    }
}

/// Outcome of a bounded wait.
///
/// `Absent` is a normal result (the element did not appear within the
/// budget) and is deliberately not an error. Driver faults are `Err`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Probe {
    Present,
    Absent,
}

impl Probe {
    pub fn is_present(self) -> bool {
        matches!(self, Self::Present)
    }
}

/// DOM-side automation surface: navigation, bounded element waits, clicks
/// and key events against one long-lived browser session.
#[async_trait]
pub trait AutomationDriver: Send + Sync {
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Waits up to `timeout` for the element to be present.
    async fn wait_for(&self, locator: &Locator, timeout: Duration) -> Result<Probe>;

    /// Waits up to `timeout` for the element to be present and clickable.
    async fn wait_for_clickable(&self, locator: &Locator, timeout: Duration) -> Result<Probe>;

    async fn click(&self, locator: &Locator) -> Result<()>;

    async fn send_key(&self, locator: &Locator, key: Key) -> Result<()>;

    /// Releases the underlying browser process. Invoked exactly once per
    /// run, on every exit path.
    async fn shutdown(&self) -> Result<()>;
}

/// OS-side input injection into whatever native window holds focus.
///
/// Focus is not verifiable from here, so callers must only invoke this
/// immediately after an action known to raise the target dialog.
#[async_trait]
pub trait InputInjector: Send + Sync {
    async fn type_text(&self, text: &str) -> Result<()>;

    async fn press_key(&self, key: Key) -> Result<()>;
}
