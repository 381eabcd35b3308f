//! herald: bulk delivery of a personalized message plus one attached file
//! through a browser-mediated messaging surface.
//!
//! There is no wire protocol here. The target platform exposes only a
//! rendered web UI, so delivery is driven through two narrow capability
//! traits: an [`AutomationDriver`] for the DOM side (navigate, bounded
//! waits, clicks, key events) and an [`InputInjector`] for the one step the
//! browser cannot see, the native file-open dialog.
//!
//! The [`DispatchEngine`] owns the run: one authenticated session, a
//! strictly sequential pass over the contact table, and exactly one terminal
//! [`Status`] per contact. Per-contact failures are converted to statuses
//! and never abort the pass; session teardown happens on every exit path.

pub mod attachment;
pub mod contact;
pub mod driver;
pub mod engine;
pub mod error;
pub mod markers;
pub mod message;
pub mod phone;
pub mod session;
pub mod timeouts;

pub use contact::{Contact, Status};
pub use driver::{AutomationDriver, InputInjector, Key, Locator, Probe};
pub use engine::{DispatchEngine, DispatchObserver, DispatchSummary, EngineConfig, NullObserver};
pub use error::{HeraldError, Result};
pub use phone::{NormalizedPhone, PhoneCheck};
pub use session::Session;
pub use timeouts::Timeouts;
