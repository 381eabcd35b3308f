//! Named wait and settle parameters.
//!
//! Every point where the engine waits on the UI has its own named budget
//! here instead of an inline sleep. Settle delays exist because several UI
//! transitions expose no completion signal to the automation layer; they are
//! the main source of flakiness and need to be tunable per deployment.

use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Timeouts {
    /// Pairing-code scan budget at session open.
    pub session_ready: Duration,
    /// Settle after navigating a deep link; load completion is not
    /// observable.
    pub url_settle: Duration,
    /// Total budget for the invalid-recipient probe race, split across the
    /// marker variants.
    pub recipient_probe: Duration,
    /// Wait for the compose box after the recipient check passes.
    pub compose_wait: Duration,
    /// Wait for attach-flow affordances to become clickable.
    pub clickable_wait: Duration,
    /// Settle for the native file dialog to gain focus before keystrokes
    /// are injected.
    pub dialog_settle: Duration,
    /// Gap between path entry and each dialog confirmation.
    pub dialog_confirm_gap: Duration,
    /// Settle for the attachment preview to render and upload.
    pub attachment_settle: Duration,
    /// Settle after committing a message, before the attachment flow.
    pub post_send_settle: Duration,
    /// Settle after refocusing the compose box at the end of a contact.
    pub refocus_settle: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            session_ready: Duration::from_secs(120),
            url_settle: Duration::from_secs(5),
            recipient_probe: Duration::from_secs(5),
            compose_wait: Duration::from_secs(15),
            clickable_wait: Duration::from_secs(20),
            dialog_settle: Duration::from_secs(2),
            dialog_confirm_gap: Duration::from_secs(1),
            attachment_settle: Duration::from_secs(15),
            post_send_settle: Duration::from_secs(10),
            refocus_settle: Duration::from_secs(2),
        }
    }
}

impl Timeouts {
    /// All-zero budgets; waits resolve immediately. Test use.
    pub fn zero() -> Self {
        Self {
            session_ready: Duration::ZERO,
            url_settle: Duration::ZERO,
            recipient_probe: Duration::ZERO,
            compose_wait: Duration::ZERO,
            clickable_wait: Duration::ZERO,
            dialog_settle: Duration::ZERO,
            dialog_confirm_gap: Duration::ZERO,
            attachment_settle: Duration::ZERO,
            post_send_settle: Duration::ZERO,
            refocus_settle: Duration::ZERO,
        }
    }
}
