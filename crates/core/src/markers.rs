//! UI touchpoints of the web messaging client, named in one place.
//!
//! The client offers no structured API; every locator here is a heuristic
//! against a DOM that changes between builds. Selectors prefer stable
//! `data-icon` markers over layout position.

use crate::driver::Locator;

/// Web client entry point, loaded once at session open.
pub const ENTRY_URL: &str = "https://web.whatsapp.com";

/// Base of the per-recipient deep link; query carries `phone` and `text`.
pub const DEEP_LINK_BASE: &str = "https://web.whatsapp.com/send";

/// Present only once the session is authenticated.
pub fn session_ready() -> Locator {
    Locator::css("#pane-side")
}

/// Known renderings of the invalid-recipient notice.
///
/// The client is not consistent across locales or builds, so every variant
/// is probed. Order roughly by observed frequency.
pub fn invalid_recipient() -> Vec<Locator> {
    vec![
        Locator::text("phone number shared via url is invalid"),
        Locator::text("não está no WhatsApp"),
        Locator::text("isn't on WhatsApp"),
        Locator::css("div[data-animate-modal-body] span[data-icon=\"alert-phone\"]"),
    ]
}

/// Message compose box in the conversation footer.
pub fn compose_box() -> Locator {
    Locator::css("#main footer div[contenteditable=\"true\"][data-tab]")
}

/// Attach-menu affordance. Older builds render a clip icon, newer ones a
/// plus; the union selector covers both.
pub fn attach_menu() -> Locator {
    Locator::css("#main footer span[data-icon=\"plus\"], #main footer span[data-icon=\"clip\"]")
}

/// "Attach document" entry in the opened attach menu. Clicking it raises
/// the host OS file-open dialog.
pub fn attach_document() -> Locator {
    Locator::css("span[data-icon=\"document\"]")
}

/// Send affordance for the attachment preview.
pub fn send_button() -> Locator {
    Locator::css("span[data-icon=\"send\"]")
}
